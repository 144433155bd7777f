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
use tracing::error;

use super::common::*;
use super::data::*;
use super::error::*;

const METRO_DR: &str = "metrodr";

/// Flags of [`MetroDr::modify_metrodr_environment()`][1].
///
/// [1]: struct.MetroDr.html#method.modify_metrodr_environment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetroDrOptions {
    /// Act on the R11 to R21 Metro leg.
    pub metro: bool,
    /// Act on the disaster recovery leg.
    pub dr: bool,
    /// With suspend, keep the Metro R2 available to hosts.
    pub keep_r2: bool,
    pub force: bool,
    /// Needs `ALLOW_SRDF_SYMFORCE` in the Solutions Enabler options file.
    pub symforce: bool,
    /// Mode of the DR link for `SetMode`.
    pub dr_replication_mode: Option<DrReplicationMode>,
    /// Reverse the link direction on a Metro only establish.
    pub reverse: bool,
}

fn modify_payload(
    action: MetroDrAction,
    opts: &MetroDrOptions,
) -> Result<Map<String, Value>> {
    let mut param = Map::new();
    match action {
        MetroDrAction::Suspend => {
            param.insert("metro".to_string(), json!(opts.metro));
            param.insert("force".to_string(), json!(opts.force));
            param.insert("keep_r2".to_string(), json!(opts.keep_r2));
            param.insert("dr".to_string(), json!(opts.dr));
            param.insert("symforce".to_string(), json!(opts.symforce));
        }
        MetroDrAction::Failover
        | MetroDrAction::Failback
        | MetroDrAction::Split
        | MetroDrAction::UpdateR1 => {
            param.insert("force".to_string(), json!(opts.force));
            param.insert("symforce".to_string(), json!(opts.symforce));
        }
        MetroDrAction::Establish | MetroDrAction::Restore => {
            if action == MetroDrAction::Restore && opts.metro && opts.dr {
                let msg = "Restore Operation can only be performed on a \
                           single SRDF leg, please choice either Metro or DR \
                           not both"
                    .to_string();
                error!("{}", msg);
                return Err(U4vError::InvalidInput(msg));
            }
            param.insert("metro".to_string(), json!(opts.metro));
            param.insert("force".to_string(), json!(opts.force));
            param.insert("dr".to_string(), json!(opts.dr));
            param.insert("symforce".to_string(), json!(opts.symforce));
            if action == MetroDrAction::Establish && opts.metro && !opts.dr {
                param.insert("reverse".to_string(), json!(opts.reverse));
            }
        }
        MetroDrAction::SetMode => {
            param.insert(
                "mode".to_string(),
                json!(opts.dr_replication_mode.map(|m| m.as_str())),
            );
            param.insert("force".to_string(), json!(opts.force));
            param.insert("symforce".to_string(), json!(opts.symforce));
        }
        MetroDrAction::Recover | MetroDrAction::Resume => (),
    }
    let mut payload = Map::new();
    payload.insert("action".to_string(), json!(action.as_str()));
    if !param.is_empty() {
        payload.insert(action.param_key(), Value::Object(param));
    }
    Ok(payload)
}

/// SRDF Metro plus asynchronous DR leg environments.
pub struct MetroDr<'a> {
    common: &'a Common,
    array_id: Option<String>,
}

impl<'a> MetroDr<'a> {
    pub(crate) fn new(common: &'a Common, array_id: Option<&str>) -> Self {
        MetroDr {
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

    fn path_on(&self, array_id: Option<&str>) -> Result<ResourcePath> {
        let array_id = match array_id {
            Some(a) => a,
            None => self.array_id()?,
        };
        Ok(ResourcePath::array(REPLICATION, array_id).resource_type(METRO_DR))
    }

    pub fn get_metrodr_environment_list(&self) -> Result<Vec<String>> {
        let resp = self.common.get_resource(&self.path_on(None)?, None)?;
        Ok(string_list(&resp, "names"))
    }

    /// Details of an environment, `config` selects the full configuration
    /// instead of the summary.
    pub fn get_metrodr_environment_details(
        &self,
        environment_name: &str,
        config: bool,
    ) -> Result<Value> {
        self.common.get_resource(
            &self.path_on(None)?.resource_type_id(environment_name),
            Some(&json!({"config": config})),
        )
    }

    /// Protect a storage group without SRDF with Metro and DR legs.
    ///
    /// Storage groups and RDF groups are created automatically and the
    /// result is R2--SRDF/A--R11--Metro--R2. The request is sent to the
    /// Metro R1 array.
    ///
    ///  * `environment_name` -- Up to 16 characters.
    ///  * `metro_r2_storage_group_name`, `dr_storage_group_name` -- Default
    ///    to `storage_group_name`.
    ///  * `force_new_metro_r1_dr_rdfg`, `force_new_metro_r2_dr_rdfg` --
    ///    Create new RDF groups towards DR instead of picking existing
    ///    ones.
    pub fn create_metrodr_environment(
        &self,
        storage_group_name: &str,
        environment_name: &str,
        metro_r1_array_id: &str,
        metro_r2_array_id: &str,
        dr_array_id: &str,
        dr_replication_mode: DrReplicationMode,
        metro_r2_storage_group_name: Option<&str>,
        dr_storage_group_name: Option<&str>,
        force_new_metro_r1_dr_rdfg: bool,
        force_new_metro_r2_dr_rdfg: bool,
        is_async: bool,
    ) -> Result<Value> {
        let mut param = Map::new();
        param.insert(
            "storage_group_name".to_string(),
            json!(storage_group_name),
        );
        param.insert("environment_name".to_string(), json!(environment_name));
        param.insert("metro_r2_array_id".to_string(), json!(metro_r2_array_id));
        param.insert(
            "metro_r2_storage_group_name".to_string(),
            json!(metro_r2_storage_group_name.unwrap_or(storage_group_name)),
        );
        param.insert("dr_array_id".to_string(), json!(dr_array_id));
        param.insert(
            "force_new_metro_r1_dr_rdfg".to_string(),
            json!(force_new_metro_r1_dr_rdfg),
        );
        param.insert(
            "force_new_metro_r2_dr_rdfg".to_string(),
            json!(force_new_metro_r2_dr_rdfg),
        );
        param.insert(
            "dr_replication_mode".to_string(),
            json!(dr_replication_mode.as_str()),
        );
        param.insert(
            "dr_storage_group_name".to_string(),
            json!(dr_storage_group_name.unwrap_or(storage_group_name)),
        );
        param.insert("metro_establish".to_string(), json!(true));
        param.insert("dr_establish".to_string(), json!(true));
        let mut payload = Map::new();
        payload.insert("action".to_string(), json!("CreateEnvironment"));
        payload.insert(
            "create_environment_param".to_string(),
            Value::Object(param),
        );
        if is_async {
            add_async(&mut payload);
        }
        let (resp, _) = self.common.create_resource(
            &self.path_on(Some(metro_r1_array_id))?,
            Some(&Value::Object(payload)),
        )?;
        Ok(resp)
    }

    /// Convert an existing R2--Async--R11--Metro--R2 setup into an
    /// environment, adding the recovery RDF group between Metro R2 and
    /// DR.
    pub fn convert_to_metrodr_environment(
        &self,
        storage_group_name: &str,
        environment_name: &str,
        metro_r2_dr_rdfg: Option<u32>,
        is_async: bool,
    ) -> Result<Value> {
        let mut param = Map::new();
        param.insert(
            "storage_group_name".to_string(),
            json!(storage_group_name),
        );
        param.insert("environment_name".to_string(), json!(environment_name));
        if let Some(r) = metro_r2_dr_rdfg {
            param.insert("metro_r2_dr_rdfg".to_string(), json!(r));
        }
        let mut payload = Map::new();
        payload.insert("action".to_string(), json!("ConvertToMetroDR"));
        payload.insert(
            "convert_to_metrodr_param".to_string(),
            Value::Object(param),
        );
        if is_async {
            add_async(&mut payload);
        }
        let (resp, _) = self.common.create_resource(
            &self.path_on(None)?,
            Some(&Value::Object(payload)),
        )?;
        Ok(resp)
    }

    /// Change the state of an environment.
    ///
    /// # Errors
    ///
    ///  * [`U4vError::InvalidInput`][1] for a restore on both legs.
    ///
    /// [1]: enum.U4vError.html#variant.InvalidInput
    pub fn modify_metrodr_environment(
        &self,
        environment_name: &str,
        action: MetroDrAction,
        opts: &MetroDrOptions,
        is_async: bool,
    ) -> Result<Value> {
        let mut payload = modify_payload(action, opts)?;
        if is_async {
            add_async(&mut payload);
        }
        let (resp, _) = self.common.modify_resource(
            &self.path_on(None)?.resource_type_id(environment_name),
            Some(&Value::Object(payload)),
        )?;
        Ok(resp)
    }

    /// Delete an environment. SRDF replication of the Metro and DR legs
    /// stays, only the standby RDF group on the R2 site goes.
    ///
    ///  * `remove_r1_dr_rdfg` -- Also delete the R11 to DR RDF group, needs
    ///    `force`.
    pub fn delete_metrodr_environment(
        &self,
        environment_name: &str,
        remove_r1_dr_rdfg: bool,
        force: bool,
    ) -> Result<()> {
        let params = json!({
            "remove_r1_dr_rdfg": remove_r1_dr_rdfg,
            "force": force,
        });
        self.common.delete_resource_with_params(
            &self.path_on(None)?.resource_type_id(environment_name),
            &params,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suspend_payload() {
        let opts = MetroDrOptions {
            metro: true,
            keep_r2: true,
            ..Default::default()
        };
        let p = modify_payload(MetroDrAction::Suspend, &opts).unwrap();
        assert_eq!(p["action"], "Suspend");
        assert_eq!(p["suspend_param"]["keep_r2"], true);
        assert_eq!(p["suspend_param"]["dr"], false);
    }

    #[test]
    fn restore_both_legs_rejected() {
        let opts = MetroDrOptions {
            metro: true,
            dr: true,
            ..Default::default()
        };
        assert!(matches!(
            modify_payload(MetroDrAction::Restore, &opts),
            Err(U4vError::InvalidInput(_))
        ));
    }

    #[test]
    fn metro_establish_carries_reverse() {
        let opts = MetroDrOptions {
            metro: true,
            reverse: true,
            ..Default::default()
        };
        let p = modify_payload(MetroDrAction::Establish, &opts).unwrap();
        assert_eq!(p["establish_param"]["reverse"], true);
        let opts = MetroDrOptions {
            dr: true,
            ..Default::default()
        };
        let p = modify_payload(MetroDrAction::Establish, &opts).unwrap();
        assert!(p["establish_param"].get("reverse").is_none());
    }

    #[test]
    fn set_mode_payload() {
        let opts = MetroDrOptions {
            dr_replication_mode: Some(DrReplicationMode::AdaptiveCopyDisk),
            ..Default::default()
        };
        let p = modify_payload(MetroDrAction::SetMode, &opts).unwrap();
        assert_eq!(p["setmode_param"]["mode"], "AdaptiveCopyDisk");
    }

    #[test]
    fn resume_has_no_param() {
        let p =
            modify_payload(MetroDrAction::Resume, &MetroDrOptions::default())
                .unwrap();
        assert_eq!(p.len(), 1);
    }
}
