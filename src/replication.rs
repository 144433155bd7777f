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
use tracing::{debug, error, warn};

use super::common::*;
use super::data::*;
use super::error::*;

const CAPABILITIES: &str = "capabilities";
const SNAPSHOT: &str = "snapshot";
const GENERATION: &str = "generation";
const RDF_GROUP: &str = "rdf_group";
const RDF_DIRECTOR: &str = "rdf_director";
const REMOTE_PORT: &str = "remote_port";
const VOLUME: &str = "volume";
const PORT: &str = "port";

/// One change applied by
/// [`Replication::modify_storage_group_snapshot()`][1].
///
/// [1]: struct.Replication.html#method.modify_storage_group_snapshot
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotEdit {
    /// Link to the target storage group, created if missing.
    Link(String),
    /// Unlink from the target storage group.
    Unlink(String),
    Restore,
    Rename(String),
}

impl SnapshotEdit {
    fn to_payload(&self) -> Map<String, Value> {
        let mut payload = Map::new();
        match self {
            SnapshotEdit::Link(tgt) => {
                payload.insert("action".to_string(), json!("Link"));
                payload.insert(
                    "link".to_string(),
                    json!({"linkStorageGroupName": tgt, "copy": false}),
                );
            }
            SnapshotEdit::Unlink(tgt) => {
                payload.insert("action".to_string(), json!("Unlink"));
                payload.insert(
                    "unlink".to_string(),
                    json!({"unlinkStorageGroupName": tgt}),
                );
            }
            SnapshotEdit::Restore => {
                payload.insert("action".to_string(), json!("Restore"));
            }
            SnapshotEdit::Rename(new_name) => {
                payload.insert("action".to_string(), json!("Rename"));
                payload.insert(
                    "rename".to_string(),
                    json!({"newSnapshotName": new_name}),
                );
            }
        }
        payload
    }
}

/// One change applied by [`Replication::modify_rdf_group()`][1].
///
/// Ports are written as `RF-1E:10`.
///
/// [1]: struct.Replication.html#method.modify_rdf_group
#[derive(Debug, Clone, PartialEq)]
pub enum RdfGroupEdit {
    Move {
        target_rdf_group: u32,
        devices: Vec<String>,
        consistency_exempt: bool,
    },
    AddPorts(Vec<String>),
    RemovePorts(Vec<String>),
    SetLabel(String),
}

impl RdfGroupEdit {
    pub fn action(&self) -> RdfGroupAction {
        match self {
            RdfGroupEdit::Move { .. } => RdfGroupAction::Move,
            RdfGroupEdit::AddPorts(_) => RdfGroupAction::AddPorts,
            RdfGroupEdit::RemovePorts(_) => RdfGroupAction::RemovePorts,
            RdfGroupEdit::SetLabel(_) => RdfGroupAction::SetLabel,
        }
    }

    fn to_payload(&self, array_id: &str) -> Result<Value> {
        let action = self.action().as_str();
        let param = match self {
            RdfGroupEdit::Move {
                target_rdf_group,
                devices,
                consistency_exempt,
            } => json!({
                "targetRdfGroup": target_rdf_group,
                "volumesToMove": devices,
                "exempt": consistency_exempt,
            }),
            RdfGroupEdit::SetLabel(label) => json!({"label": label}),
            RdfGroupEdit::AddPorts(ports)
            | RdfGroupEdit::RemovePorts(ports) => {
                if ports.is_empty() {
                    let msg = "list of ports must be supplied when adding or \
                               removing ports from RDFG e.g. [RF-1E:10, \
                               RF-2E:10]"
                        .to_string();
                    error!("{}", msg);
                    return Err(U4vError::InvalidInput(msg));
                }
                json!({"ports": rdf_port_list(array_id, ports)?})
            }
        };
        let mut payload = Map::new();
        payload.insert("action".to_string(), json!(action));
        payload.insert(action.to_lowercase(), param);
        Ok(Value::Object(payload))
    }
}

/// Turn `RF-1E:10` strings into RDF port objects of `array_id`.
fn rdf_port_list(array_id: &str, ports: &[String]) -> Result<Vec<Value>> {
    let mut rc = Vec::new();
    for port in ports {
        let mut parts = port.splitn(2, ':');
        match (parts.next(), parts.next()) {
            (Some(d), Some(p)) if !d.is_empty() && !p.is_empty() => {
                rc.push(json!({
                    "symmetrixID": array_id,
                    "directorId": d,
                    "portNumber": p,
                }));
            }
            _ => {
                return Err(U4vError::InvalidInput(format!(
                    "Invalid RDF director port '{}', expecting format like \
                     'RF-1E:10'",
                    port
                )))
            }
        }
    }
    Ok(rc)
}

/// Pairing of a local volume with a remote one inside an RDF group.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RdfPairState {
    pub paired: bool,
    pub local_volume_state: String,
    pub rdf_pair_state: String,
}

/// Replication sessions a volume takes part in.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VolumeReplicationSession {
    pub snapvx_target: bool,
    pub snapvx_source: bool,
    pub rdf_groups: Option<Value>,
}

/// A snapshot generation past its expiry which is kept alive by a link.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ExpiredSnapshot {
    pub storage_group_name: String,
    pub snapshot_name: String,
    pub generation_number: u32,
    pub expiration_time: Value,
    pub linked_sg_name: String,
    pub snap_creation_time: Value,
}

/// SnapVX snapshots, RDF groups and storage group SRDF operations.
pub struct Replication<'a> {
    common: &'a Common,
    array_id: Option<String>,
}

impl<'a> Replication<'a> {
    pub(crate) fn new(common: &'a Common, array_id: Option<&str>) -> Self {
        Replication {
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
        Ok(ResourcePath::array(REPLICATION, self.array_id()?))
    }

    fn sg_path(&self, storage_group_id: &str) -> Result<ResourcePath> {
        Ok(self
            .base()?
            .resource_type(STORAGEGROUP)
            .resource_type_id(storage_group_id))
    }

    fn generation_path(
        &self,
        storage_group_id: &str,
        snap_name: &str,
        gen_num: u32,
    ) -> Result<ResourcePath> {
        Ok(self
            .sg_path(storage_group_id)?
            .resource(SNAPSHOT)
            .resource_id(snap_name)
            .object_type(GENERATION)
            .object_type_id(&gen_num.to_string()))
    }

    pub fn get_replication_info(&self) -> Result<Value> {
        self.common.get_resource(&self.base()?, None)
    }

    /// Replication capabilities of the array, empty object when Unisphere
    /// does not list it.
    pub fn get_array_replication_capabilities(&self) -> Result<Value> {
        let capabilities = self.common.get_resource(
            &ResourcePath::new(REPLICATION)
                .level(CAPABILITIES)
                .resource_type(SYMMETRIX),
            None,
        )?;
        let array_id = self.array_id()?;
        for symm in value_list(&capabilities, "symmetrixCapability") {
            let symm_id = symm.get("symmetrixId").and_then(|s| s.as_str());
            if symm_id == Some(array_id) {
                return Ok(symm);
            }
        }
        Ok(Value::Object(Map::new()))
    }

    pub fn is_snapvx_licensed(&self) -> Result<bool> {
        let capabilities = self.get_array_replication_capabilities()?;
        match capabilities.as_object() {
            Some(c) if !c.is_empty() => Ok(c
                .get("snapVxCapable")
                .and_then(|s| s.as_bool())
                .unwrap_or(false)),
            _ => {
                error!(
                    "Cannot access replication capabilities for array {}",
                    self.array_id()?
                );
                Ok(false)
            }
        }
    }

    pub fn get_storage_group_replication_details(
        &self,
        storage_group_id: &str,
    ) -> Result<Value> {
        self.common.get_resource(&self.sg_path(storage_group_id)?, None)
    }

    /// Storage groups with snapshots and/or SRDF.
    pub fn get_replication_enabled_storage_groups(
        &self,
        has_snapshots: bool,
        has_srdf: bool,
    ) -> Result<Vec<String>> {
        let mut filters = Map::new();
        if has_snapshots {
            filters.insert("hasSnapshots".to_string(), json!("true"));
        }
        if has_srdf {
            filters.insert("hasSrdf".to_string(), json!("true"));
        }
        let resp = self.common.get_resource(
            &self.base()?.resource_type(STORAGEGROUP),
            Some(&Value::Object(filters)),
        )?;
        Ok(string_list(&resp, "name"))
    }

    pub fn get_storage_group_snapshot_list(
        &self,
        storage_group_id: &str,
    ) -> Result<Vec<String>> {
        let resp = self
            .common
            .get_resource(
                &self.sg_path(storage_group_id)?.resource(SNAPSHOT),
                None,
            )?;
        Ok(string_list(&resp, "name"))
    }

    /// Create a SnapVX snapshot of a storage group.
    ///
    /// Reusing an existing snapshot name establishes a new generation.
    ///
    ///  * `ttl` -- Time to live in days, or hours when `hours` is set.
    ///  * `secure` -- The snapshot can not be deleted before `ttl`
    ///    expires.
    pub fn create_storage_group_snapshot(
        &self,
        storage_group_id: &str,
        snap_name: &str,
        ttl: Option<u32>,
        hours: bool,
        secure: bool,
    ) -> Result<Value> {
        let mut payload = Map::new();
        payload.insert("snapshotName".to_string(), json!(snap_name));
        if let Some(ttl) = ttl {
            if secure {
                warn!(
                    "Secure snapshot {} can not be terminated before its \
                     time to live expires.",
                    snap_name
                );
                payload.insert("secure".to_string(), json!(ttl));
            } else {
                payload.insert("timeToLive".to_string(), json!(ttl));
            }
            if hours {
                payload.insert("timeInHours".to_string(), json!("True"));
            }
        }
        let (resp, _) = self.common.create_resource(
            &self.sg_path(storage_group_id)?.resource(SNAPSHOT),
            Some(&Value::Object(payload)),
        )?;
        Ok(resp)
    }

    /// Generation numbers of a snapshot, newest is 0.
    pub fn get_storage_group_snapshot_generation_list(
        &self,
        storage_group_id: &str,
        snap_name: &str,
    ) -> Result<Vec<u32>> {
        let resp = self.common.get_resource(
            &self
                .sg_path(storage_group_id)?
                .resource(SNAPSHOT)
                .resource_id(snap_name)
                .object_type(GENERATION),
            None,
        )?;
        extract_list(&resp, "generations")
    }

    pub fn get_snapshot_generation_details(
        &self,
        storage_group_id: &str,
        snap_name: &str,
        gen_num: u32,
    ) -> Result<Value> {
        self.common.get_resource(
            &self.generation_path(storage_group_id, snap_name, gen_num)?,
            None,
        )
    }

    /// Snapshot generations which are expired but still linked.
    pub fn find_expired_snapvx_snapshots(
        &self,
    ) -> Result<Vec<ExpiredSnapshot>> {
        let mut expired = Vec::new();
        for sg in self.get_replication_enabled_storage_groups(true, false)? {
            let rep = self.get_storage_group_replication_details(&sg)?;
            for snap_name in string_list(&rep, "snapVXSnapshots") {
                let gens = self
                    .get_storage_group_snapshot_generation_list(
                        &sg,
                        &snap_name,
                    )?;
                for gen in 0..gens.len() as u32 {
                    let details =
                        self.get_snapshot_generation_details(
                            &sg,
                            &snap_name,
                            gen,
                        )?;
                    let is_expired = details
                        .get("isExpired")
                        .and_then(|e| e.as_bool())
                        .unwrap_or(false);
                    if !is_expired {
                        continue;
                    }
                    let creation = details
                        .get("timestamp")
                        .cloned()
                        .unwrap_or(Value::Null);
                    let expiration = details
                        .get("timeToLiveExpiryDate")
                        .cloned()
                        .unwrap_or(Value::Null);
                    for linked in value_list(&details, "linkedStorageGroup") {
                        let linked_name = match linked
                            .get("name")
                            .and_then(|n| n.as_str())
                        {
                            Some(n) => n.to_string(),
                            None => continue,
                        };
                        debug!(
                            "Storage group {} has expired snapshot. Snapshot \
                             name {}, Generation Number {}, snapshot expired \
                             on {}, linked storage group name is {}",
                            sg, snap_name, gen, expiration, linked_name
                        );
                        expired.push(ExpiredSnapshot {
                            storage_group_name: sg.clone(),
                            snapshot_name: snap_name.clone(),
                            generation_number: gen,
                            expiration_time: expiration.clone(),
                            linked_sg_name: linked_name,
                            snap_creation_time: creation.clone(),
                        });
                    }
                }
            }
        }
        Ok(expired)
    }

    /// Link, unlink, restore or rename a snapshot generation.
    pub fn modify_storage_group_snapshot(
        &self,
        storage_group_id: &str,
        snap_name: &str,
        edit: &SnapshotEdit,
        gen_num: u32,
        is_async: bool,
    ) -> Result<Value> {
        let mut payload = edit.to_payload();
        if is_async {
            add_async(&mut payload);
        }
        let (resp, _) = self.common.modify_resource(
            &self.generation_path(storage_group_id, snap_name, gen_num)?,
            Some(&Value::Object(payload)),
        )?;
        Ok(resp)
    }

    pub fn restore_snapshot(
        &self,
        storage_group_id: &str,
        snap_name: &str,
        gen_num: u32,
    ) -> Result<Value> {
        self.modify_storage_group_snapshot(
            storage_group_id,
            snap_name,
            &SnapshotEdit::Restore,
            gen_num,
            false,
        )
    }

    pub fn rename_snapshot(
        &self,
        storage_group_id: &str,
        snap_name: &str,
        new_name: &str,
        gen_num: u32,
    ) -> Result<Value> {
        self.modify_storage_group_snapshot(
            storage_group_id,
            snap_name,
            &SnapshotEdit::Rename(new_name.to_string()),
            gen_num,
            false,
        )
    }

    /// Link a snapshot generation to `link_sg_name`, which is created if
    /// it does not exist.
    pub fn link_gen_snapshot(
        &self,
        storage_group_id: &str,
        snap_name: &str,
        link_sg_name: &str,
        is_async: bool,
        gen_num: u32,
    ) -> Result<Value> {
        self.modify_storage_group_snapshot(
            storage_group_id,
            snap_name,
            &SnapshotEdit::Link(link_sg_name.to_string()),
            gen_num,
            is_async,
        )
    }

    pub fn unlink_gen_snapshot(
        &self,
        storage_group_id: &str,
        snap_name: &str,
        unlink_sg_name: &str,
        is_async: bool,
        gen_num: u32,
    ) -> Result<Value> {
        self.modify_storage_group_snapshot(
            storage_group_id,
            snap_name,
            &SnapshotEdit::Unlink(unlink_sg_name.to_string()),
            gen_num,
            is_async,
        )
    }

    pub fn delete_storage_group_snapshot(
        &self,
        storage_group_id: &str,
        snap_name: &str,
        gen_num: u32,
    ) -> Result<()> {
        self.common.delete_resource(
            &self.generation_path(storage_group_id, snap_name, gen_num)?,
            None,
        )
    }

    /// Check whether a volume is a SnapVX source or target, and its RDF
    /// groups.
    pub fn is_volume_in_replication_session(
        &self,
        device_id: &str,
    ) -> Result<VolumeReplicationSession> {
        let vol = self.common.get_resource(
            &ResourcePath::array(SLOPROVISIONING, self.array_id()?)
                .resource_type(VOLUME)
                .resource_type_id(device_id),
            None,
        )?;
        debug!("Vol details: {}", vol);
        let flag = |k: &str| {
            vol.get(k).and_then(|v| v.as_bool()).unwrap_or(false)
        };
        Ok(VolumeReplicationSession {
            snapvx_target: flag("snapvx_target"),
            snapvx_source: flag("snapvx_source"),
            rdf_groups: match vol.get("rdfGroupId") {
                Some(r) if !r.is_null() => Some(r.clone()),
                _ => None,
            },
        })
    }

    pub fn get_rdf_group(&self, rdf_number: u32) -> Result<Value> {
        self.common.get_resource(
            &self
                .base()?
                .resource_type(RDF_GROUP)
                .resource_type_id(&rdf_number.to_string()),
            None,
        )
    }

    /// RDF groups of the array, each with `rdfgNumber` and `label`.
    pub fn get_rdf_group_list(&self) -> Result<Vec<Value>> {
        let resp = self
            .common
            .get_resource(&self.base()?.resource_type(RDF_GROUP), None)?;
        Ok(value_list(&resp, "rdfGroupID"))
    }

    pub fn get_rdf_group_volume(
        &self,
        rdf_number: u32,
        device_id: &str,
    ) -> Result<Value> {
        self.common.get_resource(
            &self
                .base()?
                .resource_type(RDF_GROUP)
                .resource_type_id(&rdf_number.to_string())
                .resource(VOLUME)
                .resource_id(device_id),
            None,
        )
    }

    pub fn get_rdf_group_volume_list(
        &self,
        rdf_number: u32,
    ) -> Result<Vec<String>> {
        let resp = self.common.get_resource(
            &self
                .base()?
                .resource_type(RDF_GROUP)
                .resource_type_id(&rdf_number.to_string())
                .resource(VOLUME),
            None,
        )?;
        Ok(string_list(&resp, "name"))
    }

    /// Check if `device_id` is paired with `target_device` on
    /// `remote_array` within `rdf_group`.
    pub fn are_volumes_rdf_paired(
        &self,
        remote_array: &str,
        device_id: &str,
        target_device: &str,
        rdf_group: u32,
    ) -> Result<RdfPairState> {
        let mut rc = RdfPairState::default();
        let vol = self.get_rdf_group_volume(rdf_group, device_id)?;
        if vol.is_null() {
            warn!("Cannot find source RDF volume {}.", device_id);
            return Ok(rc);
        }
        let get = |k: &str| vol.get(k).and_then(|v| v.as_str()).unwrap_or("");
        if get("remoteVolumeName") == target_device
            && get("remoteSymmetrixId") == remote_array
        {
            rc.paired = true;
            rc.local_volume_state = get("localVolumeState").to_string();
            rc.rdf_pair_state = get("rdfpairState").to_string();
        }
        Ok(rc)
    }

    /// RDF group number of the group labelled `rdf_group_label`.
    pub fn get_rdf_group_number(
        &self,
        rdf_group_label: &str,
    ) -> Result<Option<u32>> {
        let number = self
            .get_rdf_group_list()?
            .iter()
            .filter(|r| {
                r.get("label").and_then(|l| l.as_str()) == Some(rdf_group_label)
            })
            .filter_map(|r| r.get("rdfgNumber").and_then(|n| n.as_u64()))
            .next();
        match number {
            Some(n) => {
                let n = n as u32;
                if self.get_rdf_group(n)?.is_null() {
                    Ok(None)
                } else {
                    Ok(Some(n))
                }
            }
            None => Ok(None),
        }
    }

    /// Create an RDF group between the two arrays.
    ///
    /// For the first group between two arrays, scan the remote side with
    /// [`get_rdf_port_remote_connections()`][1] and use a single port.
    ///
    ///  * `local_ports` -- Local director ports, e.g. `RF-1E:1`.
    ///  * `label` -- Up to 10 characters.
    ///
    /// [1]: #method.get_rdf_port_remote_connections
    pub fn create_rdf_group(
        &self,
        local_ports: &[String],
        remote_array_id: &str,
        label: &str,
        local_rdfg_number: u32,
        remote_rdfg_number: u32,
        remote_ports: &[String],
    ) -> Result<Value> {
        let array_id = self.array_id()?;
        let mut payload = Map::new();
        payload.insert(
            "local_ports".to_string(),
            json!(rdf_port_list(array_id, local_ports)?),
        );
        payload.insert(
            "remote_rdfg_number".to_string(),
            json!(remote_rdfg_number),
        );
        payload.insert(
            "remote_ports".to_string(),
            json!(rdf_port_list(remote_array_id, remote_ports)?),
        );
        payload.insert("label".to_string(), json!(label));
        payload.insert(
            "local_rdfg_number".to_string(),
            json!(local_rdfg_number),
        );
        let (resp, _) = self.common.create_resource(
            &self.base()?.resource_type(RDF_GROUP),
            Some(&Value::Object(payload)),
        )?;
        Ok(resp)
    }

    /// Move volumes between RDF groups, add or remove ports, or relabel.
    ///
    /// # Errors
    ///
    ///  * [`U4vError::InvalidInput`][1] when adding or removing no ports.
    ///
    /// [1]: enum.U4vError.html#variant.InvalidInput
    pub fn modify_rdf_group(
        &self,
        srdf_group_number: u32,
        edit: &RdfGroupEdit,
    ) -> Result<Value> {
        let payload = edit.to_payload(self.array_id()?)?;
        let (resp, _) = self.common.modify_resource(
            &self
                .base()?
                .resource_type(RDF_GROUP)
                .resource_type_id(&srdf_group_number.to_string()),
            Some(&payload),
        )?;
        Ok(resp)
    }

    pub fn delete_rdf_group(&self, srdf_group_number: u32) -> Result<()> {
        self.common.delete_resource(
            &self
                .base()?
                .resource_type(RDF_GROUP)
                .resource_type_id(&srdf_group_number.to_string()),
            None,
        )
    }

    /// Create a management storage group holding every device of an RDF
    /// group.
    ///
    ///  * `rdf_type` -- `RDF1` or `RDF2`, needed only when the group holds
    ///    both.
    pub fn create_storage_group_from_rdfg(
        &self,
        storage_group_name: &str,
        srdf_group_number: u32,
        rdf_type: Option<&str>,
        remote_storage_group_name: Option<&str>,
    ) -> Result<Value> {
        let mut create_sg = Map::new();
        create_sg.insert(
            "rdf_group_number".to_string(),
            json!(srdf_group_number),
        );
        if let Some(t) = rdf_type {
            create_sg.insert("rdf_type".to_string(), json!(t));
        }
        if let Some(r) = remote_storage_group_name {
            create_sg.insert("remote_storage_group_name".to_string(), json!(r));
        }
        let payload = json!({
            "create_sg_from_rdfg": create_sg,
            "storage_group_name": storage_group_name,
            "action": "CreateSgFromRdfg",
        });
        let (resp, _) = self
            .common
            .create_resource(
                &self.base()?.resource_type(STORAGEGROUP),
                Some(&payload),
            )?;
        Ok(resp)
    }

    pub fn get_storage_group_srdf_group_list(
        &self,
        storage_group_id: &str,
    ) -> Result<Vec<u32>> {
        let resp = self
            .common
            .get_resource(
                &self.sg_path(storage_group_id)?.resource(RDF_GROUP),
                None,
            )?;
        extract_list(&resp, "rdfgs")
    }

    pub fn get_storage_group_srdf_details(
        &self,
        storage_group_id: &str,
        rdfg_num: u32,
    ) -> Result<Value> {
        self.common.get_resource(
            &self
                .sg_path(storage_group_id)?
                .resource(RDF_GROUP)
                .resource_id(&rdfg_num.to_string()),
            None,
        )
    }

    /// SRDF protect a storage group.
    ///
    ///  * `srdf_mode` -- `Active`, `AdaptiveCopyDisk`, `Synchronous` or
    ///    `Asynchronous`.
    ///  * `rdfg_number` -- Use this RDF group instead of letting Unisphere
    ///    pick one.
    pub fn create_storage_group_srdf_pairings(
        &self,
        storage_group_id: &str,
        remote_array_id: &str,
        srdf_mode: &str,
        establish: bool,
        rdfg_number: Option<u32>,
        force_new_rdf_group: bool,
        is_async: bool,
    ) -> Result<Value> {
        let mut payload = Map::new();
        payload.insert("replicationMode".to_string(), json!(srdf_mode));
        payload.insert("remoteSymmId".to_string(), json!(remote_array_id));
        payload.insert(
            "remoteStorageGroupName".to_string(),
            json!(storage_group_id),
        );
        payload.insert(
            "establish".to_string(),
            json!(if establish { "True" } else { "False" }),
        );
        if let Some(n) = rdfg_number {
            payload.insert("rdfgNumber".to_string(), json!(n));
        }
        if force_new_rdf_group {
            payload.insert("forceNewRdfGroup".to_string(), json!(true));
        }
        if is_async {
            add_async(&mut payload);
        }
        let (resp, _) = self.common.create_resource(
            &self.sg_path(storage_group_id)?.resource(RDF_GROUP),
            Some(&Value::Object(payload)),
        )?;
        Ok(resp)
    }

    /// Change the SRDF state of a storage group. This can run long, use
    /// `is_async` for big groups.
    ///
    ///  * `options` -- Merged into the payload, e.g.
    ///    `{"setMode": {"mode": "Asynchronous"}}`.
    pub fn modify_storage_group_srdf(
        &self,
        storage_group_id: &str,
        action: SrdfAction,
        srdf_group_number: u32,
        options: Option<&Value>,
        is_async: bool,
    ) -> Result<Value> {
        let mut payload = Map::new();
        payload.insert("action".to_string(), json!(action.as_str()));
        if is_async {
            add_async(&mut payload);
        }
        if let Some(opts) = options.and_then(|o| o.as_object()) {
            for (k, v) in opts {
                payload.insert(k.to_string(), v.clone());
            }
        }
        let (resp, _) = self.common.modify_resource(
            &self
                .sg_path(storage_group_id)?
                .resource(RDF_GROUP)
                .resource_id(&srdf_group_number.to_string()),
            Some(&Value::Object(payload)),
        )?;
        Ok(resp)
    }

    // Flags like `{"force": true}` go under the action key, options already
    // keyed by it pass through.
    fn action_options(
        action: SrdfAction,
        flags: Option<&Value>,
    ) -> Option<Value> {
        let flags = flags?;
        let key = action.param_key();
        if flags.get(&key).is_some() {
            return Some(flags.clone());
        }
        let mut opts = Map::new();
        opts.insert(key, flags.clone());
        Some(Value::Object(opts))
    }

    fn srdf_action(
        &self,
        storage_group_id: &str,
        action: SrdfAction,
        srdf_group_number: u32,
        flags: Option<&Value>,
        is_async: bool,
    ) -> Result<Value> {
        let options = Replication::action_options(action, flags);
        self.modify_storage_group_srdf(
            storage_group_id,
            action,
            srdf_group_number,
            options.as_ref(),
            is_async,
        )
    }

    /// Suspend I/O on the links of a storage group.
    ///
    ///  * `flags` -- Optional booleans `bypass`, `metroBias`, `star`,
    ///    `immediate`, `hop2`, `consExempt`, `force`, `symForce`.
    pub fn suspend_storage_group_srdf(
        &self,
        storage_group_id: &str,
        srdf_group_number: u32,
        flags: Option<&Value>,
        is_async: bool,
    ) -> Result<Value> {
        self.srdf_action(
            storage_group_id,
            SrdfAction::Suspend,
            srdf_group_number,
            flags,
            is_async,
        )
    }

    /// Establish I/O on the links of a storage group.
    pub fn establish_storage_group_srdf(
        &self,
        storage_group_id: &str,
        srdf_group_number: u32,
        flags: Option<&Value>,
        is_async: bool,
    ) -> Result<Value> {
        self.srdf_action(
            storage_group_id,
            SrdfAction::Establish,
            srdf_group_number,
            flags,
            is_async,
        )
    }

    pub fn failover_storage_group_srdf(
        &self,
        storage_group_id: &str,
        srdf_group_number: u32,
        flags: Option<&Value>,
        is_async: bool,
    ) -> Result<Value> {
        self.srdf_action(
            storage_group_id,
            SrdfAction::Failover,
            srdf_group_number,
            flags,
            is_async,
        )
    }

    pub fn failback_storage_group_srdf(
        &self,
        storage_group_id: &str,
        srdf_group_number: u32,
        flags: Option<&Value>,
        is_async: bool,
    ) -> Result<Value> {
        self.srdf_action(
            storage_group_id,
            SrdfAction::Failback,
            srdf_group_number,
            flags,
            is_async,
        )
    }

    /// Delete SRDF pairings of a storage group, every RDF group of it when
    /// `srdf_group_number` is `None`.
    pub fn delete_storage_group_srdf(
        &self,
        storage_group_id: &str,
        srdf_group_number: Option<u32>,
    ) -> Result<()> {
        let groups = match srdf_group_number {
            Some(n) => vec![n],
            None => self.get_storage_group_srdf_group_list(storage_group_id)?,
        };
        for rdfg in groups {
            self.common.delete_resource(
                &self
                    .sg_path(storage_group_id)?
                    .resource(RDF_GROUP)
                    .resource_id(&rdfg.to_string()),
                None,
            )?;
        }
        Ok(())
    }

    pub fn get_rdf_director_list(
        &self,
        filters: Option<&Value>,
    ) -> Result<Vec<String>> {
        let resp = self
            .common
            .get_resource(&self.base()?.resource_type(RDF_DIRECTOR), filters)?;
        Ok(string_list(&resp, "directorId"))
    }

    /// Details of an RDF director, e.g. `RF-1F`.
    pub fn get_rdf_director_detail(&self, director_id: &str) -> Result<Value> {
        self.common.get_resource(
            &self
                .base()?
                .resource_type(RDF_DIRECTOR)
                .resource_type_id(director_id),
            None,
        )
    }

    pub fn get_rdf_director_port_list(
        &self,
        director_id: &str,
        filters: Option<&Value>,
    ) -> Result<Vec<u32>> {
        let resp = self.common.get_resource(
            &self
                .base()?
                .resource_type(RDF_DIRECTOR)
                .resource_type_id(director_id)
                .resource(PORT),
            filters,
        )?;
        extract_list(&resp, "portNumber")
    }

    pub fn get_rdf_director_port_details(
        &self,
        director_id: &str,
        port_id: u32,
    ) -> Result<Value> {
        self.common.get_resource(
            &self
                .base()?
                .resource_type(RDF_DIRECTOR)
                .resource_type_id(director_id)
                .resource(PORT)
                .resource_id(&port_id.to_string()),
            None,
        )
    }

    /// Scan the SRDF environment through a port. Run this once zoning or
    /// IP routing is in place and before the first RDF group is created.
    pub fn get_rdf_port_remote_connections(
        &self,
        director_id: &str,
        port_id: u32,
    ) -> Result<Value> {
        self.common.get_resource(
            &self
                .base()?
                .resource_type(RDF_DIRECTOR)
                .resource_type_id(director_id)
                .resource(PORT)
                .resource_id(&port_id.to_string())
                .object_type(REMOTE_PORT),
            None,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_link_payload() {
        let p = SnapshotEdit::Link("sg_tgt".to_string()).to_payload();
        assert_eq!(p["action"], "Link");
        assert_eq!(p["link"]["linkStorageGroupName"], "sg_tgt");
        assert_eq!(p["link"]["copy"], false);
    }

    #[test]
    fn snapshot_rename_payload() {
        let p = SnapshotEdit::Rename("new".to_string()).to_payload();
        assert_eq!(p["action"], "Rename");
        assert_eq!(p["rename"]["newSnapshotName"], "new");
    }

    #[test]
    fn rdf_group_add_ports() {
        let edit = RdfGroupEdit::AddPorts(vec!["RF-1E:10".to_string()]);
        let p = edit.to_payload("000197800123").unwrap();
        assert_eq!(p["action"], "add_ports");
        assert_eq!(p["add_ports"]["ports"][0]["directorId"], "RF-1E");
        assert_eq!(p["add_ports"]["ports"][0]["portNumber"], "10");
        assert_eq!(p["add_ports"]["ports"][0]["symmetrixID"], "000197800123");
    }

    #[test]
    fn rdf_group_remove_no_ports() {
        let edit = RdfGroupEdit::RemovePorts(Vec::new());
        assert!(matches!(
            edit.to_payload("000197800123"),
            Err(U4vError::InvalidInput(_))
        ));
    }

    #[test]
    fn rdf_group_move() {
        let edit = RdfGroupEdit::Move {
            target_rdf_group: 3,
            devices: vec!["00123".to_string()],
            consistency_exempt: false,
        };
        let p = edit.to_payload("000197800123").unwrap();
        assert_eq!(p["action"], "Move");
        assert_eq!(p["move"]["targetRdfGroup"], 3);
        assert_eq!(p["move"]["exempt"], false);
    }

    #[test]
    fn srdf_flags_are_wrapped() {
        let flags = json!({"force": true});
        let opts =
            Replication::action_options(SrdfAction::Suspend, Some(&flags))
                .unwrap();
        assert_eq!(opts, json!({"suspend": {"force": true}}));
        let keyed = json!({"setMode": {"mode": "Asynchronous"}});
        let opts =
            Replication::action_options(SrdfAction::SetMode, Some(&keyed))
                .unwrap();
        assert_eq!(opts, keyed);
        assert!(Replication::action_options(SrdfAction::Swap, None).is_none());
    }
}
