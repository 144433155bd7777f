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
use tracing::debug;

use super::common::*;
use super::data::StorageObject;
use super::error::*;

/// Version prefix of the enhanced API, independent of the Unisphere
/// REST version.
pub const ENHANCED_API_VERSION: &str = "v1";

const SYSTEMS: &str = "systems";
const METADATA: &str = "metadata";
const PERFORMANCE_CATEGORIES: &str = "performance-categories";

/// Attributes left out of details unless asked for, they make the
/// request slow.
pub const DEFAULT_EXCLUDE: [&str; 2] = ["rdf_infos", "snapshots"];

/// Enhanced API: attribute selection and filtering of storage objects,
/// and the latest diagnostic KPIs of an array.
pub struct Enhanced<'a> {
    common: &'a Common,
    array_id: Option<String>,
}

impl<'a> Enhanced<'a> {
    pub(crate) fn new(common: &'a Common, array_id: Option<&str>) -> Self {
        Enhanced {
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

    fn path() -> ResourcePath {
        ResourcePath::new(SYSTEMS).version(ENHANCED_API_VERSION)
    }

    fn array_path(&self) -> Result<ResourcePath> {
        Ok(Enhanced::path().level(self.array_id()?))
    }

    /// Attributes of `object` usable in selections and filters, one
    /// `{"name": .., "type": .., "description": ..}` entry each.
    pub fn get_storage_object_meta_data(
        &self,
        object: StorageObject,
    ) -> Result<Value> {
        self.common.get_resource(
            &Enhanced::path().level(object.as_str()).level_id(METADATA),
            None,
        )
    }

    /// Objects of the array with the chosen attributes.
    ///
    ///  * `filters` -- Conditions like `num_of_volumes eq 32` or
    ///    `id ilike gk`, all must hold.
    ///  * `select` -- Attributes to return, e.g. `volumes.wwn`. `None` or
    ///    empty selects every top level attribute not in `exclude`, `[""]`
    ///    returns the ids only.
    ///  * `exclude` -- Only used without `select`. `None` means
    ///    [`DEFAULT_EXCLUDE`][1].
    ///
    /// # Errors
    ///
    ///  * [`U4vError::InvalidInput`][2] when no array id is set.
    ///
    /// [1]: constant.DEFAULT_EXCLUDE.html
    /// [2]: enum.U4vError.html#variant.InvalidInput
    pub fn get_storage_object_details(
        &self,
        object: StorageObject,
        filters: &[&str],
        select: Option<&[&str]>,
        exclude: Option<&[&str]>,
    ) -> Result<Value> {
        let path = self.array_path()?.resource_type(object.as_str());
        let select: Vec<String> = match select {
            Some(s) if !s.is_empty() => {
                s.iter().map(|a| a.to_string()).collect()
            }
            _ => {
                let metadata = self.get_storage_object_meta_data(object)?;
                selectable_attributes(
                    &metadata,
                    exclude.unwrap_or(&DEFAULT_EXCLUDE),
                )
            }
        };
        self.common
            .get_resource(&path, Some(&details_params(&select, filters)))
    }

    pub fn get_storage_groups_meta_data(&self) -> Result<Value> {
        self.get_storage_object_meta_data(StorageObject::StorageGroups)
    }

    /// Storage groups of the array, see
    /// [`get_storage_object_details()`][1].
    ///
    /// [1]: #method.get_storage_object_details
    pub fn get_storage_groups_details(
        &self,
        filters: &[&str],
        select: Option<&[&str]>,
        exclude: Option<&[&str]>,
    ) -> Result<Value> {
        self.get_storage_object_details(
            StorageObject::StorageGroups,
            filters,
            select,
            exclude,
        )
    }

    /// Categories of the array with the metrics each reports, empty
    /// when Unisphere returns nothing.
    pub fn get_performance_categories_list(&self) -> Result<Vec<Value>> {
        let resp = self.common.get_resource(
            &self.array_path()?.resource_type(PERFORMANCE_CATEGORIES),
            None,
        )?;
        Ok(value_list(&resp, "performance_categories"))
    }

    /// Latest KPIs of one category.
    ///
    ///  * `filters` -- Conditions like `id eq sg_1` or `time_range eq 2`.
    pub fn get_category_metrics(
        &self,
        category: &str,
        filters: &[&str],
    ) -> Result<Value> {
        let params = if filters.is_empty() {
            None
        } else {
            let mut p = Map::new();
            p.insert("filter".to_string(), json!(filters.join(",")));
            Some(Value::Object(p))
        };
        self.common.get_resource(
            &self
                .array_path()?
                .resource_type(PERFORMANCE_CATEGORIES)
                .resource_type_id(category),
            params.as_ref(),
        )
    }

    /// Latest KPIs of every category of the array, categories without
    /// data are left out.
    pub fn get_all_performance_metrics_for_system(&self) -> Result<Vec<Value>> {
        let mut collection = Vec::new();
        for category in self.get_performance_categories_list()? {
            let id = match category.get("id").and_then(|i| i.as_str()) {
                Some(i) => i.to_string(),
                None => continue,
            };
            let resp = self.get_category_metrics(&id, &[])?;
            if resp.is_null() {
                debug!("No enhanced performance data for category {}", id);
                continue;
            }
            collection.push(resp);
        }
        Ok(collection)
    }
}

// Names of the metadata entries not excluded, in metadata order.
fn selectable_attributes(metadata: &Value, exclude: &[&str]) -> Vec<String> {
    match metadata.as_array() {
        Some(attrs) => attrs
            .iter()
            .filter_map(|a| a.get("name").and_then(|n| n.as_str()))
            .filter(|n| !exclude.contains(n))
            .map(|n| n.to_string())
            .collect(),
        None => Vec::new(),
    }
}

fn details_params(select: &[String], filters: &[&str]) -> Value {
    let mut params = Map::new();
    params.insert("select".to_string(), json!(select.join(",")));
    if !filters.is_empty() {
        params.insert("filter".to_string(), json!(filters.join(",")));
    }
    Value::Object(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_use_enhanced_version() {
        let uri = Enhanced::path()
            .level("storage-groups")
            .level_id(METADATA)
            .build("91");
        assert_eq!(uri, "/v1/systems/storage-groups/metadata");
        let uri = Enhanced::path()
            .level("000197800123")
            .resource_type(PERFORMANCE_CATEGORIES)
            .resource_type_id("Array")
            .build("100");
        assert_eq!(
            uri,
            "/v1/systems/000197800123/performance-categories/Array"
        );
    }

    #[test]
    fn default_selection_drops_excluded() {
        let metadata = json!([
            {"name": "id", "type": "string"},
            {"name": "rdf_infos", "type": "array"},
            {"name": "num_of_volumes", "type": "integer"},
            {"name": "snapshots", "type": "array"},
        ]);
        assert_eq!(
            selectable_attributes(&metadata, &DEFAULT_EXCLUDE),
            vec!["id", "num_of_volumes"]
        );
        assert_eq!(selectable_attributes(&metadata, &[]).len(), 4);
        assert!(selectable_attributes(&json!({}), &[]).is_empty());
    }

    #[test]
    fn filter_only_when_given() {
        let select = vec!["id".to_string(), "type".to_string()];
        assert_eq!(details_params(&select, &[]), json!({"select": "id,type"}));
        assert_eq!(
            details_params(&select, &["id ilike gk", "num_of_volumes eq 32"]),
            json!({
                "select": "id,type",
                "filter": "id ilike gk,num_of_volumes eq 32",
            })
        );
    }
}
