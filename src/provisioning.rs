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
use tracing::{debug, error, info, warn};

use super::common::*;
use super::data::*;
use super::error::*;
use super::misc::is_director_id;

const DIRECTOR: &str = "director";
const PORT: &str = "port";
const HOST: &str = "host";
const HOSTGROUP: &str = "hostgroup";
const INITIATOR: &str = "initiator";
const MASKINGVIEW: &str = "maskingview";
const CONNECTIONS: &str = "connections";
const PORTGROUP: &str = "portgroup";
const SLO: &str = "slo";
const SRP: &str = "srp";
const VOLUME: &str = "volume";
const WORKLOADTYPE: &str = "workloadtype";
const COMPRESSIBILITY_REPORT: &str = "compressibility_report";
const SG_DEMAND_REPORT: &str = "storage_group_demand_report";
const CREATE_VOL_STRING: &str = "Creating new Volumes";
const DEFAULT_SRP: &str = "SRP_1";
const GOS_PORT_START: u32 = 30;

/// One change applied by [`Provisioning::modify_host()`][1].
///
/// [1]: struct.Provisioning.html#method.modify_host
#[derive(Debug, Clone, PartialEq)]
pub enum HostEdit {
    SetFlags(Value),
    RemoveInitiators(Vec<String>),
    AddInitiators(Vec<String>),
    Rename(String),
}

/// One change applied by [`Provisioning::modify_host_group()`][1].
///
/// [1]: struct.Provisioning.html#method.modify_host_group
#[derive(Debug, Clone, PartialEq)]
pub enum HostGroupEdit {
    SetFlags(Value),
    RemoveHosts(Vec<String>),
    AddHosts(Vec<String>),
    Rename(String),
}

/// One change applied by [`Provisioning::modify_initiator()`][1].
///
/// [1]: struct.Provisioning.html#method.modify_initiator
#[derive(Debug, Clone, PartialEq)]
pub enum InitiatorEdit {
    RemoveMaskingEntry(bool),
    Replace(String),
    /// Node name and port name.
    RenameAlias(String, String),
    SetFcid(String),
    SetFlags(Value),
}

/// One change applied by [`Provisioning::modify_port_group()`][1].
///
/// [1]: struct.Provisioning.html#method.modify_port_group
#[derive(Debug, Clone, PartialEq)]
pub enum PortGroupEdit {
    /// Director id and port id.
    RemovePort(String, String),
    /// Director id and port id.
    AddPort(String, String),
    Rename(String),
}

/// Director and port of a port group member.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DirectorPort {
    #[serde(rename = "directorId")]
    pub director_id: String,
    #[serde(rename = "portId")]
    pub port_id: String,
}

impl DirectorPort {
    pub fn new(director_id: &str, port_id: &str) -> Self {
        DirectorPort {
            director_id: director_id.to_string(),
            port_id: port_id.to_string(),
        }
    }
}

/// Storage groups on up to two remote arrays which also get the new or
/// removed SRDF volumes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemoteStorageGroups {
    pub remote_array_1_id: Option<String>,
    pub remote_array_1_sgs: Vec<String>,
    pub remote_array_2_id: Option<String>,
    pub remote_array_2_sgs: Vec<String>,
}

impl RemoteStorageGroups {
    fn to_param(&self) -> Option<Value> {
        let r1 = match self.remote_array_1_id {
            Some(ref r) if !self.remote_array_1_sgs.is_empty() => r,
            _ => return None,
        };
        let mut param = Map::new();
        param.insert("remote_symmetrix_1_id".to_string(), json!(r1));
        param.insert(
            "remote_symmetrix_1_sgs".to_string(),
            json!(self.remote_array_1_sgs),
        );
        if let Some(ref r2) = self.remote_array_2_id {
            if !self.remote_array_2_sgs.is_empty() {
                param.insert("remote_symmetrix_2_id".to_string(), json!(r2));
                param.insert(
                    "remote_symmetrix_2_sgs".to_string(),
                    json!(self.remote_array_2_sgs),
                );
            }
        }
        Some(Value::Object(param))
    }
}

/// Arguments of [`Provisioning::create_storage_group()`][1].
///
/// [1]: struct.Provisioning.html#method.create_storage_group
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StorageGroupCreate {
    pub srp_id: Option<String>,
    pub storage_group_id: String,
    pub service_level: Option<String>,
    pub workload: Option<String>,
    pub disable_compression: bool,
    pub num_vols: u32,
    pub vol_size: VolumeSize,
    /// Fully allocate each volume, implies no compression.
    pub allocate_full: bool,
    pub vol_name: Option<String>,
    pub is_async: bool,
}

impl StorageGroupCreate {
    pub fn new(storage_group_id: &str) -> Self {
        StorageGroupCreate {
            storage_group_id: storage_group_id.to_string(),
            ..Default::default()
        }
    }

    pub(crate) fn to_payload(&self) -> Value {
        let none = "None".to_string();
        let mut volume_attributes = Map::new();
        volume_attributes
            .insert("volume_size".to_string(), json!(self.vol_size.size_str()));
        volume_attributes.insert(
            "capacityUnit".to_string(),
            json!(self.vol_size.unit.as_str()),
        );
        volume_attributes.insert(
            "num_of_vols".to_string(),
            json!(self.num_vols),
        );
        if let Some(ref name) = self.vol_name {
            volume_attributes.insert(
                "volumeIdentifier".to_string(),
                volume_identifier(name),
            );
        }
        let mut slo_param = Map::new();
        slo_param.insert(
            "sloId".to_string(),
            json!(self.service_level.as_ref().unwrap_or(&none)),
        );
        slo_param.insert(
            "workloadSelection".to_string(),
            json!(self.workload.as_ref().unwrap_or(&none)),
        );
        slo_param.insert(
            "volumeAttributes".to_string(),
            Value::Array(vec![Value::Object(volume_attributes)]),
        );
        if self.disable_compression || self.allocate_full {
            slo_param.insert("noCompression".to_string(), json!("true"));
        }
        if self.allocate_full {
            slo_param.insert(
                "allocate_capacity_for_each_vol".to_string(),
                json!("true"),
            );
            slo_param.insert(
                "persist_preallocated_capacity_through_reclaim_or_copy"
                    .to_string(),
                json!("true"),
            );
        }
        let mut payload = Map::new();
        payload.insert(
            "srpId".to_string(),
            json!(self.srp_id.as_ref().unwrap_or(&none)),
        );
        payload
            .insert("storageGroupId".to_string(), json!(self.storage_group_id));
        payload.insert("emulation".to_string(), json!("FBA"));
        payload.insert(
            "sloBasedStorageGroupParam".to_string(),
            Value::Array(vec![Value::Object(slo_param)]),
        );
        if self.is_async {
            add_async(&mut payload);
        }
        Value::Object(payload)
    }
}

fn volume_identifier(name: &str) -> Value {
    json!({
        "identifier_name": name,
        "volumeIdentifierChoice": "identifier_name",
    })
}

fn edit_storage_group(param_name: &str, param: Value, is_async: bool) -> Value {
    let mut action = Map::new();
    action.insert(param_name.to_string(), param);
    let mut payload = Map::new();
    payload.insert(
        "editStorageGroupActionParam".to_string(),
        Value::Object(action),
    );
    if is_async {
        add_async(&mut payload);
    }
    Value::Object(payload)
}

// Strip the `FA-1D:` prefix Unisphere sometimes puts into `portId`.
fn update_port_group_port_ids(mut port_group_details: Value) -> Value {
    if let Some(keys) = port_group_details
        .get_mut("symmetrixPortKey")
        .and_then(|k| k.as_array_mut())
    {
        for key in keys.iter_mut() {
            let corrected = match key.get("portId").and_then(|p| p.as_str()) {
                Some(p) if p.contains(':') => {
                    p.rsplit(':').next().map(|s| s.to_string())
                }
                _ => None,
            };
            if let (Some(c), Some(obj)) = (corrected, key.as_object_mut()) {
                obj.insert("portId".to_string(), Value::String(c));
            }
        }
    }
    port_group_details
}

/// Host, storage group, masking view, port group and volume management.
pub struct Provisioning<'a> {
    common: &'a Common,
    array_id: Option<String>,
}

impl<'a> Provisioning<'a> {
    pub(crate) fn new(common: &'a Common, array_id: Option<&str>) -> Self {
        Provisioning {
            common,
            array_id: array_id.map(|a| a.to_string()),
        }
    }

    /// Work on another array.
    pub fn with_array(mut self, array_id: &str) -> Self {
        self.array_id = Some(array_id.to_string());
        self
    }

    pub fn array_id(&self) -> Result<&str> {
        require_array(&self.array_id)
    }

    fn path(&self, resource_type: &str) -> Result<ResourcePath> {
        Ok(ResourcePath::array(SLOPROVISIONING, self.array_id()?)
            .resource_type(resource_type))
    }

    fn system_path(&self) -> Result<ResourcePath> {
        Ok(ResourcePath::array(SYSTEM, self.array_id()?)
            .resource_type(DIRECTOR))
    }

    fn get_list(
        &self,
        resource_type: &str,
        key: &str,
        filters: Option<&Value>,
    ) -> Result<Vec<String>> {
        let resp = self.common.get_resource(
            &self.path(resource_type)?,
            filters,
        )?;
        Ok(string_list(&resp, key))
    }

    fn get_one(&self, resource_type: &str, id: &str) -> Result<Value> {
        self.common.get_resource(
            &self.path(resource_type)?.resource_type_id(id),
            None,
        )
    }

    fn modify_one(
        &self,
        resource_type: &str,
        id: &str,
        payload: &Value,
    ) -> Result<Value> {
        let (resp, _) = self.common.modify_resource(
            &self.path(resource_type)?.resource_type_id(id),
            Some(payload),
        )?;
        Ok(resp)
    }

    fn delete_one(&self, resource_type: &str, id: &str) -> Result<()> {
        self.common.delete_resource(
            &self.path(resource_type)?.resource_type_id(id),
            None,
        )
    }

    /// Query details of a director, e.g. `FA-1D`.
    pub fn get_director(&self, director: &str) -> Result<Value> {
        self.common
            .get_resource(&self.system_path()?.resource_type_id(director), None)
    }

    pub fn get_director_list(&self) -> Result<Vec<String>> {
        let resp = self.common.get_resource(&self.system_path()?, None)?;
        Ok(string_list(&resp, "directorId"))
    }

    pub fn get_director_port(
        &self,
        director: &str,
        port_no: &str,
    ) -> Result<Value> {
        self.common.get_resource(
            &self
                .system_path()?
                .resource_type_id(director)
                .resource(PORT)
                .resource_id(port_no),
            None,
        )
    }

    /// Return the port keys of a director.
    pub fn get_director_port_list(
        &self,
        director: &str,
        filters: Option<&Value>,
    ) -> Result<Vec<DirectorPort>> {
        let resp = self.common.get_resource(
            &self.system_path()?.resource_type_id(director).resource(PORT),
            filters,
        )?;
        extract_list(&resp, "symmetrixPortKey")
    }

    /// Return the WWN (FC) or IQN (iSCSI) of a director port.
    pub fn get_port_identifier(
        &self,
        director: &str,
        port_no: &str,
    ) -> Result<Option<String>> {
        let port_info = self.get_director_port(director, port_no)?;
        let wwn = port_info
            .get("symmetrixPort")
            .and_then(|p| p.get("identifier"))
            .and_then(|i| i.as_str())
            .map(|i| i.to_string());
        if wwn.is_none() {
            error!("Cannot retrieve port information.");
        }
        Ok(wwn)
    }

    /// Get the IP addresses and IQN of an iSCSI port like `SE-4E:0`.
    pub fn get_iscsi_ip_address_and_iqn(
        &self,
        port_id: &str,
    ) -> Result<(Vec<String>, Option<String>)> {
        let mut parts = port_id.splitn(2, ':');
        let (dir_id, port_no) = match (parts.next(), parts.next()) {
            (Some(d), Some(p)) => (d, p),
            _ => {
                return Err(U4vError::InvalidInput(format!(
                    "Invalid director port '{}', expecting format like \
                     'SE-4E:0'",
                    port_id
                )))
            }
        };
        let port_details = self.get_director_port(dir_id, port_no)?;
        let port = match port_details.get("symmetrixPort") {
            Some(p) => p,
            None => {
                info!("Could not get IP address from director port");
                return Ok((Vec::new(), None));
            }
        };
        let iqn = port
            .get("identifier")
            .and_then(|i| i.as_str())
            .map(|i| i.to_string());
        Ok((string_list(port, "ip_addresses"), iqn))
    }

    /// Return all front end (`FA-`) directors.
    pub fn get_fa_directors(&self) -> Result<Vec<String>> {
        let mut fa_directors: Vec<String> = self
            .get_director_list()?
            .into_iter()
            .filter(|d| d.contains("FA-"))
            .collect();
        fa_directors.sort();
        fa_directors.dedup();
        Ok(fa_directors)
    }

    /// Get a port of the director which is not a GuestOS port.
    pub fn get_any_director_port(
        &self,
        director: &str,
        filters: Option<&Value>,
    ) -> Result<Option<String>> {
        if !is_director_id(director)? {
            return Ok(None);
        }
        for port in self.get_director_port_list(director, filters)? {
            if let Ok(n) = port.port_id.parse::<u32>() {
                if n < GOS_PORT_START {
                    return Ok(Some(port.port_id));
                }
            }
        }
        Ok(None)
    }

    /// Format director and port into `FA-1D:4`.
    pub fn format_director_port(director: &str, port: &str) -> String {
        format!("{}:{}", director, port)
    }

    /// Query the port keys of the array, front end, back end and RDF
    /// filters cannot be mixed.
    pub fn get_port_list(
        &self,
        filters: Option<&Value>,
    ) -> Result<Vec<DirectorPort>> {
        let resp = self.common.get_resource(&self.path(PORT)?, filters)?;
        extract_list(&resp, "symmetrixPortKey")
    }

    pub fn get_host(&self, host_id: &str) -> Result<Value> {
        self.get_one(HOST, host_id)
    }

    pub fn get_host_list(
        &self,
        filters: Option<&Value>,
    ) -> Result<Vec<String>> {
        self.get_list(HOST, "hostId", filters)
    }

    /// Create a host with the given initiators.
    ///
    /// An empty host is created when `initiators` is empty. The initiators
    /// must not belong to another host.
    pub fn create_host(
        &self,
        host_name: &str,
        initiators: &[&str],
        host_flags: Option<&Value>,
        is_async: bool,
    ) -> Result<Value> {
        let mut payload = Map::new();
        payload.insert("hostId".to_string(), json!(host_name));
        if !initiators.is_empty() {
            payload.insert("initiatorId".to_string(), json!(initiators));
        }
        if let Some(f) = host_flags {
            payload.insert("hostFlags".to_string(), f.clone());
        }
        if is_async {
            add_async(&mut payload);
        }
        let (resp, _) = self
            .common
            .create_resource(&self.path(HOST)?, Some(&Value::Object(payload)))?;
        Ok(resp)
    }

    /// Apply one modification to a host.
    ///
    /// # Errors
    ///
    ///  * [`U4vError::InvalidInput`][1] when the change carries no data.
    ///
    /// [1]: enum.U4vError.html#variant.InvalidInput
    pub fn modify_host(&self, host_id: &str, edit: &HostEdit) -> Result<Value> {
        let param = match edit {
            HostEdit::SetFlags(f) if !f.is_null() => {
                json!({"setHostFlagsParam": {"hostFlags": f}})
            }
            HostEdit::RemoveInitiators(i) if !i.is_empty() => {
                json!({"removeInitiatorParam": {"initiator": i}})
            }
            HostEdit::AddInitiators(i) if !i.is_empty() => {
                json!({"addInitiatorParam": {"initiator": i}})
            }
            HostEdit::Rename(n) if !n.is_empty() => {
                json!({"renameHostParam": {"new_host_name": n}})
            }
            _ => {
                return Err(U4vError::InvalidInput(
                    "No modify host parameters chosen - please supply one \
                     of the following: host_flag_dict, remove_init_list, \
                     add_init_list, or new_name."
                        .to_string(),
                ))
            }
        };
        self.modify_one(HOST, host_id, &json!({"editHostActionParam": param}))
    }

    /// Delete a host, fails if it belongs to a masking view.
    pub fn delete_host(&self, host_id: &str) -> Result<()> {
        self.delete_one(HOST, host_id)
    }

    pub fn get_masking_views_from_host(
        &self,
        host_id: &str,
    ) -> Result<Vec<String>> {
        Ok(string_list(&self.get_host(host_id)?, "maskingview"))
    }

    pub fn get_initiator_ids_from_host(
        &self,
        host_id: &str,
    ) -> Result<Vec<String>> {
        Ok(string_list(&self.get_host(host_id)?, "initiator"))
    }

    pub fn get_host_group(&self, host_group_id: &str) -> Result<Value> {
        self.get_one(HOSTGROUP, host_group_id)
    }

    pub fn get_host_group_list(
        &self,
        filters: Option<&Value>,
    ) -> Result<Vec<String>> {
        self.get_list(HOSTGROUP, "hostGroupId", filters)
    }

    pub fn create_host_group(
        &self,
        host_group_id: &str,
        hosts: &[&str],
        host_flags: Option<&Value>,
        is_async: bool,
    ) -> Result<Value> {
        let mut payload = Map::new();
        payload.insert("hostId".to_string(), json!(hosts));
        payload.insert("hostGroupId".to_string(), json!(host_group_id));
        if let Some(f) = host_flags {
            payload.insert("hostFlags".to_string(), f.clone());
        }
        if is_async {
            add_async(&mut payload);
        }
        let (resp, _) = self.common.create_resource(
            &self.path(HOSTGROUP)?,
            Some(&Value::Object(payload)),
        )?;
        Ok(resp)
    }

    /// Apply one modification to a host group.
    ///
    /// # Errors
    ///
    ///  * [`U4vError::InvalidInput`][1] when the change carries no data.
    ///
    /// [1]: enum.U4vError.html#variant.InvalidInput
    pub fn modify_host_group(
        &self,
        host_group_id: &str,
        edit: &HostGroupEdit,
    ) -> Result<Value> {
        let param = match edit {
            HostGroupEdit::SetFlags(f) if !f.is_null() => {
                json!({"setHostGroupFlagsParam": {"hostFlags": f}})
            }
            HostGroupEdit::RemoveHosts(h) if !h.is_empty() => {
                json!({"removeHostParam": {"host": h}})
            }
            HostGroupEdit::AddHosts(h) if !h.is_empty() => {
                json!({"addHostParam": {"host": h}})
            }
            HostGroupEdit::Rename(n) if !n.is_empty() => {
                json!({"renameHostGroupParam": {"new_host_group_name": n}})
            }
            _ => {
                return Err(U4vError::InvalidInput(
                    "No modify host group parameters chosen - please supply \
                     one of the following: host_flag_dict, \
                     remove_host_list, add_host_list, or new_name."
                        .to_string(),
                ))
            }
        };
        self.modify_one(
            HOSTGROUP,
            host_group_id,
            &json!({"editHostGroupActionParam": param}),
        )
    }

    pub fn delete_host_group(&self, host_group_id: &str) -> Result<()> {
        self.delete_one(HOSTGROUP, host_group_id)
    }

    pub fn get_initiator(&self, initiator_id: &str) -> Result<Value> {
        self.get_one(INITIATOR, initiator_id)
    }

    pub fn get_initiator_list(
        &self,
        params: Option<&Value>,
    ) -> Result<Vec<String>> {
        self.get_list(INITIATOR, "initiatorId", params)
    }

    /// Apply one modification to an initiator.
    ///
    /// # Errors
    ///
    ///  * [`U4vError::InvalidInput`][1] when the change carries no data.
    ///
    /// [1]: enum.U4vError.html#variant.InvalidInput
    pub fn modify_initiator(
        &self,
        initiator_id: &str,
        edit: &InitiatorEdit,
    ) -> Result<Value> {
        let param = match edit {
            InitiatorEdit::RemoveMaskingEntry(r) => {
                json!({"removeMaskingEntry": r.to_string()})
            }
            InitiatorEdit::Replace(i) if !i.is_empty() => {
                json!({"replaceInitiatorParam": {"new_initiator": i}})
            }
            InitiatorEdit::RenameAlias(node, port)
                if !node.is_empty() || !port.is_empty() =>
            {
                json!({"renameAliasParam": {
                    "node_name": node,
                    "port_name": port,
                }})
            }
            InitiatorEdit::SetFcid(f) if !f.is_empty() => {
                json!({"initiatorSetAttributesParam": {"fcidValue": f}})
            }
            InitiatorEdit::SetFlags(f) if !f.is_null() => {
                json!({"initiatorSetFlagsParam": {"initiatorFlags": f}})
            }
            _ => {
                return Err(U4vError::InvalidInput(
                    "No modify initiator parameters chosen - please supply \
                     one of the following: removeMaskingEntry, \
                     replace_init, rename_alias, set_fcid, initiator_flags."
                        .to_string(),
                ))
            }
        };
        self.modify_one(
            INITIATOR,
            initiator_id,
            &json!({"editInitiatorActionParam": param}),
        )
    }

    /// Return initiators which belong to a host.
    pub fn get_in_use_initiator_list_from_array(&self) -> Result<Vec<String>> {
        self.get_initiator_list(Some(&json!({"in_a_host": "true"})))
    }

    /// Return the host of an initiator, if any.
    pub fn get_initiator_group_from_initiator(
        &self,
        initiator: &str,
    ) -> Result<Option<String>> {
        let init = self.get_initiator(initiator)?;
        Ok(init
            .get("host")
            .and_then(|h| h.as_str())
            .map(|h| h.to_string()))
    }

    /// Check whether the initiator (or a substring of an in-use initiator
    /// id) is already assigned to a host.
    pub fn is_initiator_in_host(&self, initiator: &str) -> Result<bool> {
        Ok(self
            .get_in_use_initiator_list_from_array()?
            .iter()
            .any(|i| i.contains(initiator)))
    }

    pub fn get_masking_view(&self, masking_view_name: &str) -> Result<Value> {
        self.get_one(MASKINGVIEW, masking_view_name)
    }

    pub fn get_masking_view_list(
        &self,
        filters: Option<&Value>,
    ) -> Result<Vec<String>> {
        self.get_list(MASKINGVIEW, "maskingViewId", filters)
    }

    /// Create a masking view from an existing port group, storage group and
    /// host or host group.
    ///
    /// # Errors
    ///
    ///  * [`U4vError::InvalidInput`][1] if neither host nor host group is
    ///    given.
    ///
    /// [1]: enum.U4vError.html#variant.InvalidInput
    pub fn create_masking_view_existing_components(
        &self,
        port_group_name: &str,
        masking_view_name: &str,
        storage_group_name: &str,
        host_name: Option<&str>,
        host_group_name: Option<&str>,
        is_async: bool,
    ) -> Result<Value> {
        let host_details = match (host_name, host_group_name) {
            (Some(h), _) => json!({"useExistingHostParam": {"hostId": h}}),
            (None, Some(hg)) => {
                json!({"useExistingHostGroupParam": {"hostGroupId": hg}})
            }
            (None, None) => {
                return Err(U4vError::InvalidInput(
                    "Must enter either a host name or a host group name."
                        .to_string(),
                ))
            }
        };
        let mut payload = Map::new();
        payload.insert(
            "portGroupSelection".to_string(),
            json!({"useExistingPortGroupParam": {
                "portGroupId": port_group_name}}),
        );
        payload.insert("maskingViewId".to_string(), json!(masking_view_name));
        payload.insert("hostOrHostGroupSelection".to_string(), host_details);
        payload.insert(
            "storageGroupSelection".to_string(),
            json!({"useExistingStorageGroupParam": {
                "storageGroupId": storage_group_name}}),
        );
        if is_async {
            add_async(&mut payload);
        }
        let (resp, _) = self.common.create_resource(
            &self.path(MASKINGVIEW)?,
            Some(&Value::Object(payload)),
        )?;
        Ok(resp)
    }

    pub fn get_masking_views_from_storage_group(
        &self,
        storage_group: &str,
    ) -> Result<Vec<String>> {
        Ok(string_list(
            &self.get_storage_group(storage_group)?,
            "maskingview",
        ))
    }

    pub fn get_masking_views_by_initiator_group(
        &self,
        initiator_group_name: &str,
    ) -> Result<Vec<String>> {
        Ok(string_list(
            &self.get_host(initiator_group_name)?,
            "maskingview",
        ))
    }

    /// Return the name of the port group, host (or host group) or storage
    /// group of a masking view.
    ///
    /// # Errors
    ///
    ///  * [`U4vError::ResourceNotFound`][1] when the masking view reply is
    ///    empty.
    ///
    /// [1]: enum.U4vError.html#variant.ResourceNotFound
    pub fn get_element_from_masking_view(
        &self,
        masking_view_name: &str,
        element: MaskingViewElement,
    ) -> Result<Option<String>> {
        let mv = self.get_masking_view(masking_view_name)?;
        if mv.is_null() {
            return Err(U4vError::ResourceNotFound(
                "Error retrieving masking group.".to_string(),
            ));
        }
        let keys: &[&str] = match element {
            MaskingViewElement::PortGroup => &["portGroupId"],
            MaskingViewElement::Host => &["hostId", "hostGroupId"],
            MaskingViewElement::StorageGroup => &["storageGroupId"],
        };
        for k in keys {
            if let Some(v) = mv.get(*k).and_then(|v| v.as_str()) {
                return Ok(Some(v.to_string()));
            }
        }
        Ok(None)
    }

    /// Masking views shared by a port group and a host.
    pub fn get_port_group_common_masking_views(
        &self,
        port_group_name: &str,
        initiator_group_name: &str,
    ) -> Result<Vec<String>> {
        self.get_masking_view_list(Some(&json!({
            "port_group_name": port_group_name,
            "host_or_host_group_name": initiator_group_name,
        })))
    }

    pub fn rename_masking_view(
        &self,
        masking_view_id: &str,
        new_name: &str,
    ) -> Result<Value> {
        self.modify_one(
            MASKINGVIEW,
            masking_view_id,
            &json!({"editMaskingViewActionParam": {
                "renameMaskingViewParam": {
                    "new_masking_view_name": new_name}}}),
        )
    }

    pub fn delete_masking_view(&self, masking_view_name: &str) -> Result<()> {
        self.delete_one(MASKINGVIEW, masking_view_name)
    }

    pub fn get_masking_view_connections(
        &self,
        masking_view_id: &str,
        filters: Option<&Value>,
    ) -> Result<Vec<Value>> {
        let resp = self.common.get_resource(
            &self
                .path(MASKINGVIEW)?
                .resource_type_id(masking_view_id)
                .resource(CONNECTIONS),
            filters,
        )?;
        Ok(value_list(&resp, "maskingViewConnection"))
    }

    /// Return the first masking view with connections and its connections.
    pub fn get_active_masking_view_connections(
        &self,
    ) -> Result<Option<(String, Vec<Value>)>> {
        for mv in self.get_masking_view_list(None)? {
            let connections = self.get_masking_view_connections(&mv, None)?;
            if !connections.is_empty() {
                return Ok(Some((mv, connections)));
            }
        }
        Ok(None)
    }

    /// Find the host LUN id of a volume in a masking view.
    pub fn find_host_lun_id_for_volume(
        &self,
        masking_view_id: &str,
        device_id: &str,
    ) -> Result<Option<u32>> {
        let connections = self.get_masking_view_connections(
            masking_view_id,
            Some(&json!({"volume_id": device_id})),
        )?;
        let first = match connections.get(0) {
            Some(c) => c,
            None => {
                error!(
                    "Cannot retrieve masking view connection information \
                     for {} in {}",
                    device_id, masking_view_id
                );
                return Ok(None);
            }
        };
        let address = first.get("host_lun_address").and_then(|a| a.as_str());
        match address.map(|a| u32::from_str_radix(a, 16)) {
            Some(Ok(id)) => Ok(Some(id)),
            _ => {
                error!(
                    "Unable to retrieve connection information for volume \
                     {} in masking view {}.",
                    device_id, masking_view_id
                );
                Ok(None)
            }
        }
    }

    pub fn get_port_group(&self, port_group_id: &str) -> Result<Value> {
        self.get_one(PORTGROUP, port_group_id)
    }

    pub fn get_port_group_list(
        &self,
        filters: Option<&Value>,
    ) -> Result<Vec<String>> {
        self.get_list(PORTGROUP, "portGroupId", filters)
    }

    /// Port ids of a port group.
    pub fn get_ports_from_port_group(
        &self,
        port_group: &str,
    ) -> Result<Vec<String>> {
        let pg = self.get_port_group(port_group)?;
        let keys: Vec<DirectorPort> = extract_list(&pg, "symmetrixPortKey")?;
        Ok(keys.into_iter().map(|k| k.port_id).collect())
    }

    /// WWNs of the director ports of a port group.
    pub fn get_target_wwns_from_port_group(
        &self,
        port_group_id: &str,
    ) -> Result<Vec<Option<String>>> {
        let pg = self.get_port_group(port_group_id)?;
        let keys: Vec<DirectorPort> = extract_list(&pg, "symmetrixPortKey")?;
        let mut target_wwns = Vec::new();
        for k in keys {
            target_wwns.push(
                self.get_port_identifier(&k.director_id, &k.port_id)?,
            );
        }
        Ok(target_wwns)
    }

    pub fn create_port_group(
        &self,
        port_group_id: &str,
        director_id: &str,
        port_id: &str,
    ) -> Result<Value> {
        self.create_multiport_port_group(
            port_group_id,
            &[DirectorPort::new(director_id, port_id)],
        )
    }

    pub fn create_multiport_port_group(
        &self,
        port_group_id: &str,
        ports: &[DirectorPort],
    ) -> Result<Value> {
        let mut payload = Map::new();
        payload.insert("portGroupId".to_string(), json!(port_group_id));
        payload.insert(
            "symmetrixPortKey".to_string(),
            serde_json::to_value(ports)?,
        );
        let (resp, _) = self.common.create_resource(
            &self.path(PORTGROUP)?,
            Some(&Value::Object(payload)),
        )?;
        Ok(update_port_group_port_ids(resp))
    }

    /// Apply one modification to a port group.
    ///
    /// # Errors
    ///
    ///  * [`U4vError::InvalidInput`][1] when the change carries no data.
    ///
    /// [1]: enum.U4vError.html#variant.InvalidInput
    pub fn modify_port_group(
        &self,
        port_group_id: &str,
        edit: &PortGroupEdit,
    ) -> Result<Value> {
        let param = match edit {
            PortGroupEdit::RemovePort(d, p) => json!({"removePortParam": {
                "port": [DirectorPort::new(d, p)]}}),
            PortGroupEdit::AddPort(d, p) => json!({"addPortParam": {
                "port": [DirectorPort::new(d, p)]}}),
            PortGroupEdit::Rename(n) if !n.is_empty() => {
                json!({"renamePortGroupParam": {"new_port_group_name": n}})
            }
            _ => {
                return Err(U4vError::InvalidInput(
                    "No modify portgroup parameters set - please set one of \
                     the following: remove_port, add_port, or \
                     rename_portgroup."
                        .to_string(),
                ))
            }
        };
        let resp = self.modify_one(
            PORTGROUP,
            port_group_id,
            &json!({"editPortGroupActionParam": param}),
        )?;
        match edit {
            PortGroupEdit::Rename(_) => Ok(resp),
            _ => Ok(update_port_group_port_ids(resp)),
        }
    }

    pub fn delete_port_group(&self, port_group_id: &str) -> Result<()> {
        self.delete_one(PORTGROUP, port_group_id)
    }

    pub fn get_service_level(&self, service_level_id: &str) -> Result<Value> {
        self.get_one(SLO, service_level_id)
    }

    pub fn get_service_level_list(
        &self,
        filters: Option<&Value>,
    ) -> Result<Vec<String>> {
        self.get_list(SLO, "sloId", filters)
    }

    /// Rename a service level, the only modification Unisphere allows.
    pub fn modify_service_level(
        &self,
        service_level_id: &str,
        new_name: &str,
    ) -> Result<Value> {
        self.modify_one(
            SLO,
            service_level_id,
            &json!({"editSloActionParam": {
                "renameSloParam": {"sloId": new_name}}}),
        )
    }

    pub fn get_workload_settings(&self) -> Result<Vec<String>> {
        self.get_list(WORKLOADTYPE, "workloadId", None)
    }

    pub fn get_srp(&self, srp: &str) -> Result<Value> {
        self.get_one(SRP, srp)
    }

    pub fn get_srp_list(&self, filters: Option<&Value>) -> Result<Vec<String>> {
        self.get_list(SRP, "srpId", filters)
    }

    pub fn get_compressibility_report(
        &self,
        srp_id: &str,
    ) -> Result<Vec<Value>> {
        let resp = self.common.get_resource(
            &self
                .path(SRP)?
                .resource_type_id(srp_id)
                .resource(COMPRESSIBILITY_REPORT),
            None,
        )?;
        Ok(value_list(&resp, "storageGroupCompressibility"))
    }

    /// Storage group demand report of an SRP, `SRP_1` when not given.
    pub fn get_storage_group_demand_report(
        &self,
        srp_id: Option<&str>,
    ) -> Result<Value> {
        self.common.get_resource(
            &self
                .path(SRP)?
                .resource_type_id(srp_id.unwrap_or(DEFAULT_SRP))
                .resource(SG_DEMAND_REPORT),
            None,
        )
    }

    pub fn is_compression_capable(&self) -> Result<bool> {
        let arrays = self
            .common
            .get_v3_or_newer_array_list(
                Some(&json!({"compressionCapable": "true"})),
            )?;
        let array_id = self.array_id()?;
        Ok(arrays.iter().any(|a| a == array_id))
    }

    pub fn get_storage_group(&self, storage_group_name: &str) -> Result<Value> {
        self.get_one(STORAGEGROUP, storage_group_name)
    }

    pub fn get_storage_group_list(
        &self,
        filters: Option<&Value>,
    ) -> Result<Vec<String>> {
        self.get_list(STORAGEGROUP, "storageGroupId", filters)
    }

    /// Replication details of a storage group.
    pub fn get_storage_group_rep(
        &self,
        storage_group_name: &str,
    ) -> Result<Value> {
        self.common.get_resource(
            &ResourcePath::array(REPLICATION, self.array_id()?)
                .resource_type(STORAGEGROUP)
                .resource_type_id(storage_group_name),
            None,
        )
    }

    pub fn get_num_vols_in_storage_group(
        &self,
        storage_group_name: &str,
    ) -> Result<u64> {
        let sg = self.get_storage_group(storage_group_name)?;
        Ok(sg.get("num_of_vols").and_then(|n| n.as_u64()).unwrap_or(0))
    }

    pub fn get_child_storage_groups_from_parent(
        &self,
        parent_name: &str,
    ) -> Result<Vec<String>> {
        Ok(string_list(
            &self.get_storage_group(parent_name)?,
            "child_storage_group",
        ))
    }

    pub fn is_child_storage_group_in_parent(
        &self,
        child_name: &str,
        parent_name: &str,
    ) -> Result<bool> {
        Ok(self
            .get_child_storage_groups_from_parent(parent_name)?
            .iter()
            .any(|c| c == child_name))
    }

    /// Create a storage group, optionally with new volumes.
    ///
    /// An asynchronous create waits for the job and returns the new
    /// storage group details.
    pub fn create_storage_group(
        &self,
        args: &StorageGroupCreate,
    ) -> Result<Value> {
        let (resp, sc) = self
            .common
            .create_resource(
                &self.path(STORAGEGROUP)?,
                Some(&args.to_payload()),
            )?;
        if args.is_async {
            self.common
                .wait_for_job("Create storage group", sc, &resp)?;
            return self.get_storage_group(&args.storage_group_id);
        }
        Ok(resp)
    }

    /// Create a storage group with no volumes.
    pub fn create_empty_storage_group(
        &self,
        srp_id: Option<&str>,
        storage_group_id: &str,
        service_level: Option<&str>,
        workload: Option<&str>,
        disable_compression: bool,
        is_async: bool,
    ) -> Result<Value> {
        let mut args = StorageGroupCreate::new(storage_group_id);
        args.srp_id = srp_id.map(|s| s.to_string());
        args.service_level = service_level.map(|s| s.to_string());
        args.workload = workload.map(|s| s.to_string());
        args.disable_compression = disable_compression;
        args.is_async = is_async;
        self.create_storage_group(&args)
    }

    /// Create a storage group with `num_vols` new volumes of `vol_size`.
    pub fn create_non_empty_storage_group(
        &self,
        srp_id: Option<&str>,
        storage_group_id: &str,
        service_level: Option<&str>,
        workload: Option<&str>,
        num_vols: u32,
        vol_size: VolumeSize,
        disable_compression: bool,
        is_async: bool,
    ) -> Result<Value> {
        let mut args = StorageGroupCreate::new(storage_group_id);
        args.srp_id = srp_id.map(|s| s.to_string());
        args.service_level = service_level.map(|s| s.to_string());
        args.workload = workload.map(|s| s.to_string());
        args.num_vols = num_vols;
        args.vol_size = vol_size;
        args.disable_compression = disable_compression;
        args.is_async = is_async;
        self.create_storage_group(&args)
    }

    pub fn modify_storage_group(
        &self,
        storage_group_id: &str,
        payload: &Value,
    ) -> Result<Value> {
        self.modify_one(STORAGEGROUP, storage_group_id, payload)
    }

    /// Expand a storage group with existing volumes.
    pub fn add_existing_volume_to_storage_group(
        &self,
        storage_group_id: &str,
        vol_ids: &[&str],
        is_async: bool,
    ) -> Result<Value> {
        let payload = edit_storage_group(
            "expandStorageGroupParam",
            json!({"addSpecificVolumeParam": {"volumeId": vol_ids}}),
            is_async,
        );
        self.modify_storage_group(storage_group_id, &payload)
    }

    /// Expand a storage group with new volumes.
    ///
    ///  * `create_new_volumes` -- When false, Unisphere may reuse free
    ///    volumes of matching size.
    ///  * `remote` -- Storage groups on remote arrays receiving the SRDF
    ///    mirrors of the new volumes.
    pub fn add_new_volume_to_storage_group(
        &self,
        storage_group_id: &str,
        num_vols: u32,
        vol_size: VolumeSize,
        is_async: bool,
        vol_name: Option<&str>,
        create_new_volumes: bool,
        remote: Option<&RemoteStorageGroups>,
    ) -> Result<Value> {
        let mut volume_attributes = Map::new();
        volume_attributes.insert("num_of_vols".to_string(), json!(num_vols));
        volume_attributes.insert(
            "volume_size".to_string(),
            json!(vol_size.size_str()),
        );
        volume_attributes.insert(
            "capacityUnit".to_string(),
            json!(vol_size.unit.as_str()),
        );
        if let Some(name) = vol_name {
            volume_attributes.insert(
                "volumeIdentifier".to_string(),
                volume_identifier(name),
            );
        }
        let mut add_volume_param = Map::new();
        add_volume_param.insert("emulation".to_string(), json!("FBA"));
        if !create_new_volumes {
            add_volume_param.insert(
                "create_new_volumes".to_string(),
                json!(false),
            );
        }
        add_volume_param.insert(
            "volumeAttributes".to_string(),
            Value::Array(vec![Value::Object(volume_attributes)]),
        );
        if let Some(r) = remote.and_then(|r| r.to_param()) {
            add_volume_param.insert("remoteSymmSGInfoParam".to_string(), r);
        }
        let payload = edit_storage_group(
            "expandStorageGroupParam",
            json!({"addVolumeParam": add_volume_param}),
            is_async,
        );
        self.modify_storage_group(storage_group_id, &payload)
    }

    /// Create one named volume in a storage group and return its device
    /// id.
    pub fn create_volume_from_storage_group_return_id(
        &self,
        volume_name: &str,
        storage_group_id: &str,
        vol_size: VolumeSize,
    ) -> Result<Option<String>> {
        let job = self.add_new_volume_to_storage_group(
            storage_group_id,
            1,
            vol_size,
            true,
            Some(volume_name),
            false,
            None,
        )?;
        let tasks = self
            .common
            .wait_for_job("Create volume from storage group", 202, &job)?;
        for t in tasks.unwrap_or_default() {
            let desc = match t.get("description").and_then(|d| d.as_str()) {
                Some(d) => d,
                None => continue,
            };
            if desc.contains(CREATE_VOL_STRING) {
                if let Some(last) = desc.split_whitespace().last() {
                    // Last word looks like `[00123]`.
                    let id = last.trim_matches(&['[', ']', '(', ')'][..]);
                    if !id.is_empty() {
                        return Ok(Some(id.to_string()));
                    }
                }
            }
        }
        info!(
            "Could not retrieve device id from job, attempting retrieval by \
             volume_identifier."
        );
        Ok(self.find_volume_device_id(volume_name)?.into_iter().next())
    }

    /// Remove volumes from a storage group.
    pub fn remove_volume_from_storage_group(
        &self,
        storage_group_id: &str,
        vol_ids: &[&str],
        is_async: bool,
        remote: Option<&RemoteStorageGroups>,
    ) -> Result<Value> {
        let mut param = Map::new();
        param.insert("volumeId".to_string(), json!(vol_ids));
        if let Some(r) = remote.and_then(|r| r.to_param()) {
            param.insert("remoteSymmSGInfoParam".to_string(), r);
        }
        let payload =
            edit_storage_group(
                "removeVolumeParam",
                Value::Object(param),
                is_async,
            );
        self.modify_storage_group(storage_group_id, &payload)
    }

    /// Move volumes to another storage group, `force` is needed when the
    /// volumes are in a masking view.
    pub fn move_volumes_between_storage_groups(
        &self,
        device_ids: &[&str],
        source_storage_group: &str,
        target_storage_group: &str,
        force: bool,
        is_async: bool,
    ) -> Result<Value> {
        let payload = edit_storage_group(
            "moveVolumeToStorageGroupParam",
            json!({
                "volumeId": device_ids,
                "storageGroupId": target_storage_group,
                "force": force.to_string(),
            }),
            is_async,
        );
        self.modify_storage_group(source_storage_group, &payload)
    }

    /// Cascade `child` under `parent`.
    pub fn add_child_storage_group_to_parent_group(
        &self,
        child: &str,
        parent: &str,
    ) -> Result<Value> {
        let payload = edit_storage_group(
            "expandStorageGroupParam",
            json!({
                "addExistingStorageGroupParam": {"storageGroupId": [child]}
            }),
            false,
        );
        self.modify_storage_group(parent, &payload)
    }

    pub fn remove_child_storage_group_from_parent_group(
        &self,
        child: &str,
        parent: &str,
    ) -> Result<Value> {
        let payload = edit_storage_group(
            "removeStorageGroupParam",
            json!({"storageGroupId": [child], "force": "true"}),
            false,
        );
        self.modify_storage_group(parent, &payload)
    }

    /// Update host I/O limits of a storage group.
    ///
    /// Nothing is sent and `None` is returned when the requested limits
    /// match the current ones.
    ///
    /// # Errors
    ///
    ///  * [`U4vError::InvalidInput`][1] on unknown distribution type.
    ///
    /// [1]: enum.U4vError.html#variant.InvalidInput
    pub fn update_storage_group_qos(
        &self,
        storage_group_id: &str,
        qos_specs: &QosSpecs,
    ) -> Result<Option<Value>> {
        let sg = self.get_storage_group(storage_group_id)?;
        let sg_qos = sg.get("hostIOLimit");
        if sg_qos.is_none() {
            debug!("Unable to get storage group QoS details.");
        }
        let current = |key: &str| -> Option<String> {
            sg_qos.and_then(|q| q.get(key)).map(|v| match v {
                Value::String(s) => s.to_string(),
                _ => v.to_string(),
            })
        };
        let mut changed = false;
        let mut max_iops = "nolimit".to_string();
        let mut max_mbps = "nolimit".to_string();
        let mut distribution_type =
            DistributionType::Never.as_str().to_string();
        if let Some(iops) = qos_specs.max_iops {
            max_iops = iops.to_string();
            if Some(&max_iops) != current("host_io_limit_io_sec").as_ref() {
                changed = true;
            }
        }
        if let Some(mbps) = qos_specs.max_mbps {
            max_mbps = mbps.to_string();
            if Some(&max_mbps) != current("host_io_limit_mb_sec").as_ref() {
                changed = true;
            }
        }
        if let Some(ref dt) = qos_specs.distribution_type {
            if changed || sg_qos.is_some() {
                let parsed = dt.parse::<DistributionType>().map_err(|_| {
                    let msg = format!(
                        "Wrong Distribution type value {} entered. Please \
                         enter one of: ['never', 'onfailure', 'always']",
                        dt
                    );
                    error!("{}", msg);
                    U4vError::InvalidInput(msg)
                })?;
                distribution_type = parsed.as_str().to_string();
                let current_type = current("dynamicDistribution");
                if Some(&distribution_type) != current_type.as_ref() {
                    changed = true;
                }
            }
        }
        if !changed {
            return Ok(None);
        }
        let payload = edit_storage_group(
            "setHostIOLimitsParam",
            json!({
                "host_io_limit_io_sec": max_iops,
                "host_io_limit_mb_sec": max_mbps,
                "dynamicDistribution": distribution_type,
            }),
            false,
        );
        Ok(Some(self.modify_storage_group(storage_group_id, &payload)?))
    }

    /// Set the host I/O limits of a storage group. Limits are multiples of
    /// 100.
    pub fn set_host_io_limit_iops_or_mbps(
        &self,
        storage_group: &str,
        iops: Option<u64>,
        dynamic_distribution: &str,
        mbps: Option<u64>,
    ) -> Result<Option<Value>> {
        let qos_specs = QosSpecs {
            max_iops: iops,
            max_mbps: mbps,
            distribution_type: Some(dynamic_distribution.to_string()),
        };
        self.update_storage_group_qos(storage_group, &qos_specs)
    }

    /// Delete a storage group, fails if it is in a masking view.
    pub fn delete_storage_group(&self, storage_group_id: &str) -> Result<()> {
        self.delete_one(STORAGEGROUP, storage_group_id)
    }

    pub fn get_storage_groups_from_volume(
        &self,
        volume_id: &str,
    ) -> Result<Vec<String>> {
        Ok(string_list(&self.get_volume(volume_id)?, "storageGroupId"))
    }

    pub fn is_volume_in_storage_group(
        &self,
        device_id: &str,
        storage_group_id: &str,
    ) -> Result<bool> {
        Ok(self
            .get_storage_groups_from_volume(device_id)?
            .iter()
            .any(|s| s == storage_group_id))
    }

    pub fn get_volumes_from_storage_group(
        &self,
        storage_group_id: &str,
    ) -> Result<Vec<String>> {
        let vols =
            self.get_volume_list(
                Some(&json!({"storageGroupId": storage_group_id})),
            )?;
        if vols.is_empty() {
            debug!("Cannot find record for storage group {}", storage_group_id);
        }
        Ok(vols)
    }

    pub fn get_volume(&self, device_id: &str) -> Result<Value> {
        self.get_one(VOLUME, device_id)
    }

    /// Return device ids of volumes, following all iterator pages.
    pub fn get_volume_list(
        &self,
        filters: Option<&Value>,
    ) -> Result<Vec<String>> {
        let resp = self.common.get_resource(&self.path(VOLUME)?, filters)?;
        let count = resp.get("count").and_then(|c| c.as_u64()).unwrap_or(0);
        if count == 0 {
            return Ok(Vec::new());
        }
        Ok(self
            .common
            .get_iterator_results(&resp)?
            .iter()
            .filter_map(|v| v.get("volumeId").and_then(|i| i.as_str()))
            .map(|i| i.to_string())
            .collect())
    }

    /// Effective WWN details as rows of `[volume_id, effective_wwn, wwn,
    /// has_effective_wwn, storage_group_id]`.
    pub fn get_volume_effective_wwn_details(
        &self,
        vol_list: &[&str],
    ) -> Result<Vec<Vec<Value>>> {
        let mut data = Vec::new();
        for device_id in vol_list {
            let vol = self.get_volume(device_id)?;
            let mut row = vec![json!(device_id)];
            let keys =
                ["effective_wwn", "wwn", "has_effective_wwn", "storageGroupId"];
            for k in &keys {
                row.push(vol.get(*k).cloned().unwrap_or(Value::Null));
            }
            data.push(row);
        }
        Ok(data)
    }

    /// Find device ids of volumes with the given identifier.
    pub fn find_volume_device_id(
        &self,
        volume_name: &str,
    ) -> Result<Vec<String>> {
        let vols =
            self.get_volume_list(
                Some(&json!({"volume_identifier": volume_name})),
            )?;
        if vols.is_empty() {
            debug!("Cannot find record for volume {}", volume_name);
        } else if vols.len() > 1 {
            warn!(
                "{} volume name is not unique, returning a list of device ids",
                volume_name
            );
        }
        Ok(vols)
    }

    pub fn find_volume_identifier(
        &self,
        device_id: &str,
    ) -> Result<Option<String>> {
        let vol = self.get_volume(device_id)?;
        Ok(vol
            .get("volume_identifier")
            .and_then(|i| i.as_str())
            .map(|i| i.to_string()))
    }

    /// Size of a volume in GB.
    ///
    /// # Errors
    ///
    ///  * [`U4vError::ResourceNotFound`][1] when the size is missing.
    ///
    /// [1]: enum.U4vError.html#variant.ResourceNotFound
    pub fn get_size_of_device_on_array(&self, device_id: &str) -> Result<f64> {
        let vol = self.get_volume(device_id)?;
        match vol.get("cap_gb").and_then(|c| c.as_f64()) {
            Some(c) if c > 0f64 => Ok(c),
            _ => Err(U4vError::ResourceNotFound(format!(
                "Unable to retrieve size of device {} on the array",
                device_id
            ))),
        }
    }

    /// Extend a volume to `new_size` GB, `rdf_group_num` also extends the
    /// R2 device.
    pub fn extend_volume(
        &self,
        device_id: &str,
        new_size: f64,
        is_async: bool,
        rdf_group_num: Option<u32>,
    ) -> Result<Value> {
        info!("Extending device {} to {}GB.", device_id, new_size);
        let mut expand = Map::new();
        expand.insert(
            "volumeAttribute".to_string(),
            json!({
                "volume_size": VolumeSize::gb(new_size).size_str(),
                "capacityUnit": "GB",
            }),
        );
        if let Some(rdfg) = rdf_group_num {
            info!(
                "Extending {} RDF paired device using online device \
                 expansion.",
                device_id
            );
            expand.insert("rdfGroupNumber".to_string(), json!(rdfg));
        }
        let mut payload = Map::new();
        payload.insert(
            "editVolumeActionParam".to_string(),
            json!({"expandVolumeParam": expand}),
        );
        if is_async {
            add_async(&mut payload);
        }
        self.modify_one(VOLUME, device_id, &Value::Object(payload))
    }

    /// Rename a volume, `None` removes the identifier.
    pub fn rename_volume(
        &self,
        device_id: &str,
        new_name: Option<&str>,
    ) -> Result<Value> {
        let identifier = match new_name {
            Some(n) => volume_identifier(n),
            None => json!({"volumeIdentifierChoice": "none"}),
        };
        self.modify_one(
            VOLUME,
            device_id,
            &json!({"editVolumeActionParam": {
                "modifyVolumeIdentifierParam": {
                    "volumeIdentifier": identifier}}}),
        )
    }

    /// Deallocate all tracks of a volume, needed before deletion. The
    /// deallocation runs in the background after this returns.
    pub fn deallocate_volume(&self, device_id: &str) -> Result<Value> {
        self.modify_one(
            VOLUME,
            device_id,
            &json!({"editVolumeActionParam": {
                "freeVolumeParam": {"free_volume": "true"}}}),
        )
    }

    pub fn delete_volume(&self, device_id: &str) -> Result<()> {
        self.delete_one(VOLUME, device_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_group_payload_full_allocation() {
        let mut args = StorageGroupCreate::new("sg_1");
        args.srp_id = Some("SRP_1".to_string());
        args.service_level = Some("Diamond".to_string());
        args.num_vols = 2;
        args.vol_size = VolumeSize::gb(10f64);
        args.allocate_full = true;
        args.vol_name = Some("data".to_string());
        let p = args.to_payload();
        assert_eq!(p["srpId"], "SRP_1");
        assert_eq!(p["emulation"], "FBA");
        let slo = &p["sloBasedStorageGroupParam"][0];
        assert_eq!(slo["sloId"], "Diamond");
        assert_eq!(slo["workloadSelection"], "None");
        assert_eq!(slo["noCompression"], "true");
        assert_eq!(slo["allocate_capacity_for_each_vol"], "true");
        let attr = &slo["volumeAttributes"][0];
        assert_eq!(attr["volume_size"], "10");
        assert_eq!(attr["capacityUnit"], "GB");
        assert_eq!(attr["num_of_vols"], 2);
        assert_eq!(attr["volumeIdentifier"]["identifier_name"], "data");
        assert!(p.get("executionOption").is_none());
    }

    #[test]
    fn storage_group_payload_defaults() {
        let mut args = StorageGroupCreate::new("sg_2");
        args.is_async = true;
        let p = args.to_payload();
        assert_eq!(p["srpId"], "None");
        assert_eq!(p["executionOption"], "ASYNCHRONOUS");
        assert!(p["sloBasedStorageGroupParam"][0]
            .get("noCompression")
            .is_none());
    }

    #[test]
    fn remote_sg_param() {
        let mut r = RemoteStorageGroups::default();
        assert!(r.to_param().is_none());
        r.remote_array_1_id = Some("000197800124".to_string());
        r.remote_array_1_sgs = vec!["sg_r".to_string()];
        r.remote_array_2_id = Some("000197800125".to_string());
        let p = r.to_param().unwrap();
        assert_eq!(p["remote_symmetrix_1_sgs"], json!(["sg_r"]));
        assert!(p.get("remote_symmetrix_2_id").is_none());
    }

    #[test]
    fn port_ids_are_corrected() {
        let pg = json!({"symmetrixPortKey": [
            {"directorId": "FA-1D", "portId": "FA-1D:4"},
            {"directorId": "FA-2D", "portId": "5"},
        ]});
        let pg = update_port_group_port_ids(pg);
        assert_eq!(pg["symmetrixPortKey"][0]["portId"], "4");
        assert_eq!(pg["symmetrixPortKey"][1]["portId"], "5");
    }

    #[test]
    fn director_port_format() {
        assert_eq!(Provisioning::format_director_port("FA-1D", "4"), "FA-1D:4");
    }
}
