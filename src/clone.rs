// Copyright (C) 2026 The univmax Authors
//
// Permission is hereby granted, free of charge, to any
// person obtaining a copy of this software and associated
// documentation files (the "Software"), to deal in the
// Software without restriction, including without
// limitation the rights to use, copy, modify, merge,
// publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software
// is furnished to do so, subject to the following
// conditions:
//
// The above copyright notice and this permission notice
// shall be included in all copies or substantial portions
// of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF
// ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED
// TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A
// PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT
// SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY
// CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR
// IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
// DEALINGS IN THE SOFTWARE.
use serde_json::{Map, Value};

use super::common::*;
use super::error::*;

const CLONE: &str = "clone";
const VOLUME: &str = "volume";

/// Filters of [`Clones::get_clone_target_storage_group_list()`][1].
/// Counts and tracks take Unisphere filter expressions like `>1`.
///
/// [1]: struct.Clones.html#method.get_clone_target_storage_group_list
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct CloneTargetFilters {
    /// Target storage groups equal to or like this name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_storage_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_storage_group_volume_count: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_pair_count: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub state: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_tracks: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src_protected_tracks: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src_modified_tracks: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_copy: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub differential: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precopy: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vse: Option<bool>,
}

/// Flags of clone create and terminate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CloneFlags {
    /// Run even if volumes are not in the expected state.
    pub force: bool,
    /// Needed when the storage group is in an SRDF/Star setup.
    pub star: bool,
    pub skip: bool,
    /// Terminate only.
    pub symforce: bool,
    /// Terminate only, set the targets not ready afterwards.
    pub not_ready: bool,
    /// Terminate only.
    pub restored: Option<bool>,
}

/// Clone sessions between a source storage group and targets.
pub struct Clones<'a> {
    common: &'a Common,
    array_id: Option<String>,
}

impl<'a> Clones<'a> {
    pub(crate) fn new(common: &'a Common, array_id: Option<&str>) -> Self {
        Clones {
            common,
            array_id: array_id.map(|a| a.to_string()),
        }
    }

    pub fn with_array(mut self, array_id: &str) -> Self {
        self.array_id = Some(array_id.to_string());
        self
    }

    pub fn array_id(&self) -> Result<&str> {
        require_array(&self.array_id)
    }

    fn path(&self, storage_group_id: &str) -> Result<ResourcePath> {
        Ok(ResourcePath::array(REPLICATION, self.array_id()?)
            .resource_type(STORAGEGROUP)
            .resource_type_id(storage_group_id)
            .resource(CLONE))
    }

    pub fn get_clone_target_storage_group_list(
        &self,
        storage_group_id: &str,
        filters: &CloneTargetFilters,
    ) -> Result<Value> {
        let params = serde_json::to_value(filters)?;
        self.common.get_resource(
            &self.path(storage_group_id)?.resource_id(STORAGEGROUP),
            Some(&params),
        )
    }

    pub fn get_clone_pairs_list(
        &self,
        storage_group_id: &str,
    ) -> Result<Value> {
        self.common.get_resource(
            &self.path(storage_group_id)?.resource_id(VOLUME),
            None,
        )
    }

    pub fn get_clone_storage_group_pair_details(
        &self,
        storage_group_id: &str,
        target_storage_group_id: &str,
    ) -> Result<Value> {
        self.common.get_resource(
            &self
                .path(storage_group_id)?
                .resource_id(STORAGEGROUP)
                .object_type(target_storage_group_id),
            None,
        )
    }

    /// Create a consistent clone of a storage group into
    /// `target_storage_group_name`.
    pub fn create_clone(
        &self,
        storage_group_id: &str,
        target_storage_group_name: &str,
        flags: &CloneFlags,
    ) -> Result<Value> {
        let mut payload = Map::new();
        payload.insert(
            "target_storage_group_name".to_string(),
            json!(target_storage_group_name),
        );
        payload.insert("establish_terminate".to_string(), json!(true));
        payload.insert("consistent".to_string(), json!(true));
        payload.insert("force".to_string(), json!(flags.force));
        payload.insert("star".to_string(), json!(flags.star));
        payload.insert("skip".to_string(), json!(flags.skip));
        let (resp, _) = self.common.create_resource(
            &self.path(storage_group_id)?.resource_id(STORAGEGROUP),
            Some(&Value::Object(payload)),
        )?;
        Ok(resp)
    }

    /// Terminate clone sessions, options go to the query string.
    pub fn terminate_clone(
        &self,
        storage_group_id: &str,
        target_storage_group_name: Option<&str>,
        flags: &CloneFlags,
    ) -> Result<()> {
        let params = json!({
            "target_storage_group_name": target_storage_group_name,
            "force": flags.force,
            "star": flags.star,
            "skip": flags.skip,
            "symforce": flags.symforce,
            "not_ready": flags.not_ready,
            "restored": flags.restored,
        });
        self.common.delete_resource_with_params(
            &self.path(storage_group_id)?.resource_id(STORAGEGROUP),
            &params,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_skip_unset() {
        let f = CloneTargetFilters {
            target_storage_group: Some("tgt".to_string()),
            precopy: Some(false),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&f).unwrap(),
            json!({"target_storage_group": "tgt", "precopy": false})
        );
    }
}
