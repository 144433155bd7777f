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
use chrono::Local;
use serde_json::{Map, Value};
use tracing::info;

use super::common::*;
use super::error::*;

const HEALTH: &str = "health";
const HEALTH_CHECK: &str = "health_check";
const DISK: &str = "disk";
const TAG: &str = "tag";

/// Filters of [`System::get_tags()`][1].
///
/// [1]: struct.System.html#method.get_tags
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TagFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub array_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_group_id: Option<String>,
    /// Such as `">1"` or `"<3"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_of_storage_groups: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_of_arrays: Option<String>,
}

pub(crate) fn default_health_check_description(array_id: &str) -> String {
    format!(
        "univmax-{}-{}",
        array_id,
        Local::now().format("%d%m%Y-%H%M%S")
    )
}

/// Array health, disks and tags.
pub struct System<'a> {
    common: &'a Common,
    array_id: Option<String>,
}

impl<'a> System<'a> {
    pub(crate) fn new(common: &'a Common, array_id: Option<&str>) -> Self {
        System {
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

    fn base(&self) -> Result<ResourcePath> {
        Ok(ResourcePath::array(SYSTEM, self.array_id()?))
    }

    fn health_check_path(&self, health_check_id: &str) -> Result<ResourcePath> {
        Ok(self
            .base()?
            .resource_type(HEALTH)
            .resource_type_id(HEALTH_CHECK)
            .object_type(health_check_id))
    }

    /// Overall health score of the array.
    pub fn get_system_health(&self) -> Result<Value> {
        self.common
            .get_resource(&self.base()?.object_type(HEALTH), None)
    }

    /// Ids of the health checks run on the array.
    pub fn list_system_health_check(&self) -> Result<Value> {
        self.common.get_resource(
            &self.base()?.object_type(HEALTH).object_type_id(HEALTH_CHECK),
            None,
        )
    }

    pub fn get_health_check_details(
        &self,
        health_check_id: &str,
    ) -> Result<Value> {
        self.common
            .get_resource(&self.health_check_path(health_check_id)?, None)
    }

    /// Run a health check on the array.
    ///
    ///  * `description` -- Defaults to
    ///    `univmax-{array_id}-{ddmmYYYY}-{HHMMSS}` in local time.
    pub fn perform_health_check(
        &self,
        description: Option<&str>,
    ) -> Result<Value> {
        let array_id = self.array_id()?;
        let description = match description {
            Some(d) => d.to_string(),
            None => default_health_check_description(array_id),
        };
        info!("Running health check {} on array {}", description, array_id);
        let (resp, _) = self.common.create_resource(
            &self.base()?.object_type(HEALTH).object_type_id(HEALTH_CHECK),
            Some(&json!({ "description": description })),
        )?;
        Ok(resp)
    }

    pub fn delete_health_check(&self, health_check_id: &str) -> Result<()> {
        self.common
            .delete_resource(&self.health_check_path(health_check_id)?, None)
    }

    /// Disk ids of the array.
    ///
    ///  * `failed` -- Only list failed disks.
    pub fn get_disk_id_list(&self, failed: bool) -> Result<Value> {
        self.common.get_resource(
            &self.base()?.resource_type(DISK),
            Some(&json!({ "failed": failed })),
        )
    }

    pub fn get_disk_details(&self, disk_id: &str) -> Result<Value> {
        self.common.get_resource(
            &self.base()?.resource_type(DISK).resource_type_id(disk_id),
            None,
        )
    }

    /// Tags known to Unisphere, this does not need an array id.
    pub fn get_tags(&self, filters: &TagFilters) -> Result<Value> {
        let params = serde_json::to_value(filters)?;
        let params = match params.as_object() {
            Some(m) if !m.is_empty() => Some(params.clone()),
            _ => None,
        };
        self.common.get_resource(
            &ResourcePath::new(SYSTEM).level(TAG),
            params.as_ref(),
        )
    }

    /// Arrays and storage groups carrying `tag_name`.
    pub fn get_tagged_objects(&self, tag_name: &str) -> Result<Value> {
        let resp = self.common.get_resource(
            &ResourcePath::new(SYSTEM).level(TAG).level_id(tag_name),
            None,
        )?;
        if resp.is_null() {
            return Ok(Value::Object(Map::new()));
        }
        Ok(resp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn health_check_description_format() {
        let desc = default_health_check_description("000197800123");
        let re = Regex::new(r"^univmax-000197800123-\d{8}-\d{6}$").unwrap();
        assert!(re.is_match(&desc), "unexpected description {}", desc);
    }

    #[test]
    fn empty_tag_filters_serialize_to_empty_object() {
        let v = serde_json::to_value(&TagFilters::default()).unwrap();
        assert_eq!(v, json!({}));
        let f = TagFilters {
            tag_name: Some("gold".to_string()),
            num_of_arrays: Some(">1".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&f).unwrap(),
            json!({"tag_name": "gold", "num_of_arrays": ">1"})
        );
    }
}
