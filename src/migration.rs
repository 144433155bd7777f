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
use super::data::*;
use super::error::*;

const CAPABILITIES: &str = "capabilities";
const ENVIRONMENT: &str = "environment";

/// Non disruptive migration of storage groups between arrays.
pub struct Migration<'a> {
    common: &'a Common,
    array_id: Option<String>,
}

impl<'a> Migration<'a> {
    pub(crate) fn new(common: &'a Common, array_id: Option<&str>) -> Self {
        Migration {
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
        Ok(ResourcePath::array(MIGRATION, self.array_id()?))
    }

    pub fn get_migration_info(&self) -> Result<Value> {
        self.common.get_resource(&self.base()?, None)
    }

    /// Create a migration environment towards `target_array_id`.
    pub fn create_migration_environment(
        &self,
        target_array_id: &str,
    ) -> Result<Value> {
        let (resp, _) = self.common.create_resource(
            &self.base()?,
            Some(&json!({"otherArrayId": target_array_id})),
        )?;
        Ok(resp)
    }

    /// Delete the migration environment once all migrations are done.
    pub fn delete_migration_environment(
        &self,
        target_array_id: &str,
    ) -> Result<()> {
        self.common.delete_resource(
            &self
                .base()?
                .resource_type(ENVIRONMENT)
                .resource_type_id(target_array_id),
            None,
        )
    }

    /// Migration capabilities of the array, empty object if not listed.
    pub fn get_array_migration_capabilities(&self) -> Result<Value> {
        let capabilities = self.common.get_resource(
            &ResourcePath::new(MIGRATION)
                .level(CAPABILITIES)
                .resource_type(SYMMETRIX),
            None,
        )?;
        Ok(array_capability(&capabilities, self.array_id()?))
    }

    /// Target arrays of the migration environments.
    pub fn get_environment_list(&self) -> Result<Vec<String>> {
        let resp = self
            .common
            .get_resource(&self.base()?.resource_type(ENVIRONMENT), None)?;
        Ok(string_list(&resp, "arrayId"))
    }

    pub fn get_environment(&self, target_array_id: &str) -> Result<Value> {
        self.common.get_resource(
            &self
                .base()?
                .resource_type(ENVIRONMENT)
                .resource_type_id(target_array_id),
            None,
        )
    }

    /// Storage groups of the array, or only those being migrated.
    pub fn get_storage_group_list(
        &self,
        include_migrations: bool,
    ) -> Result<Vec<String>> {
        let resp = self.get_storage_groups()?;
        let key = if include_migrations { "migratingName" } else { "name" };
        Ok(string_list(&resp, key))
    }

    pub fn get_storage_groups(&self) -> Result<Value> {
        self.common
            .get_resource(&self.base()?.resource_type(STORAGEGROUP), None)
    }

    pub fn get_storage_group(&self, storage_group_name: &str) -> Result<Value> {
        self.common.get_resource(
            &self
                .base()?
                .resource_type(STORAGEGROUP)
                .resource_type_id(storage_group_name),
            None,
        )
    }

    /// Start migrating a storage group to `target_array_id`.
    ///
    ///  * `validate` -- Only check the migration could run.
    pub fn create_storage_group_migration(
        &self,
        storage_group_name: &str,
        target_array_id: &str,
        srp_id: Option<&str>,
        port_group_id: Option<&str>,
        no_compression: bool,
        pre_copy: bool,
        validate: bool,
    ) -> Result<Value> {
        let payload = migration_payload(
            target_array_id,
            srp_id,
            port_group_id,
            no_compression,
            pre_copy,
            validate,
        );
        let (resp, _) = self.common.create_resource(
            &self
                .base()?
                .resource_type(STORAGEGROUP)
                .resource_type_id(storage_group_name),
            Some(&Value::Object(payload)),
        )?;
        Ok(resp)
    }

    /// Move a migration session on.
    ///
    ///  * `options` -- Merged into the payload, e.g.
    ///    `{"cutover": {"force": true}}`.
    pub fn modify_storage_group_migration(
        &self,
        storage_group_name: &str,
        action: MigrationAction,
        options: Option<&Value>,
        is_async: bool,
    ) -> Result<Value> {
        let mut payload = Map::new();
        payload.insert("action".to_string(), json!(action.as_str()));
        if let Some(opts) = options.and_then(|o| o.as_object()) {
            for (k, v) in opts {
                payload.insert(k.to_string(), v.clone());
            }
        }
        if is_async {
            add_async(&mut payload);
        }
        let (resp, _) = self.common.modify_resource(
            &self
                .base()?
                .resource_type(STORAGEGROUP)
                .resource_type_id(storage_group_name),
            Some(&Value::Object(payload)),
        )?;
        Ok(resp)
    }

    pub fn delete_storage_group_migration(
        &self,
        storage_group_name: &str,
    ) -> Result<()> {
        self.common.delete_resource(
            &self
                .base()?
                .resource_type(STORAGEGROUP)
                .resource_type_id(storage_group_name),
            None,
        )
    }
}

fn array_capability(capabilities: &Value, array_id: &str) -> Value {
    value_list(capabilities, "storageArrayCapability")
        .into_iter()
        .find(|c| c.get("arrayId").and_then(|a| a.as_str()) == Some(array_id))
        .unwrap_or_else(|| Value::Object(Map::new()))
}

// Flags left false are not sent.
fn migration_payload(
    target_array_id: &str,
    srp_id: Option<&str>,
    port_group_id: Option<&str>,
    no_compression: bool,
    pre_copy: bool,
    validate: bool,
) -> Map<String, Value> {
    let mut payload = Map::new();
    payload.insert("otherArrayId".to_string(), json!(target_array_id));
    if let Some(s) = srp_id {
        payload.insert("srpId".to_string(), json!(s));
    }
    if let Some(p) = port_group_id {
        payload.insert("portGroupId".to_string(), json!(p));
    }
    if no_compression {
        payload.insert("noCompression".to_string(), json!(true));
    }
    if pre_copy {
        payload.insert("preCopy".to_string(), json!(true));
    }
    if validate {
        payload.insert("validate".to_string(), json!(true));
    }
    payload
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_skips_unset_flags() {
        let p =
            migration_payload("000197800456", None, None, false, false, false);
        assert_eq!(
            Value::Object(p),
            json!({"otherArrayId": "000197800456"})
        );
        let p = migration_payload(
            "000197800456",
            Some("SRP_1"),
            Some("pg_1"),
            true,
            true,
            true,
        );
        assert_eq!(
            Value::Object(p),
            json!({
                "otherArrayId": "000197800456",
                "srpId": "SRP_1",
                "portGroupId": "pg_1",
                "noCompression": true,
                "preCopy": true,
                "validate": true,
            })
        );
    }

    #[test]
    fn capability_of_missing_array_is_empty() {
        let caps = json!({
            "storageArrayCapability": [
                {"arrayId": "000197800123", "srdfsTarget": true},
            ],
        });
        assert_eq!(
            array_capability(&caps, "000197800123")["srdfsTarget"],
            true
        );
        assert_eq!(array_capability(&caps, "000197800456"), json!({}));
    }
}
