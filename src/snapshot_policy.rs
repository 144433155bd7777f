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
use tracing::{error, info, warn};

use super::common::*;
use super::data::*;
use super::error::*;
use super::misc::{check_epoch_timestamp, check_timestamp};

const SNAPSHOT_POLICY: &str = "snapshot_policy";
const COMPLIANCE: &str = "compliance";
const SNAPSHOT: &str = "snapshot";

fn invalid<T>(msg: &str) -> Result<T> {
    error!("{}", msg);
    Err(U4vError::InvalidInput(msg.to_string()))
}

/// Arguments of [`SnapshotPolicy::create_snapshot_policy()`][1].
///
/// Either `cloud_provider_name` with `cloud_retention_days`, or
/// `snapshot_count` for a local policy, is required.
///
/// [1]: struct.SnapshotPolicy.html#method.create_snapshot_policy
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewSnapshotPolicy {
    pub name: String,
    pub interval: Option<SnapshotPolicyInterval>,
    pub cloud_retention_days: Option<u32>,
    pub cloud_provider_name: Option<String>,
    /// Secure local snapshots can only be terminated after they expire.
    pub secure: bool,
    pub snapshot_count: Option<u32>,
    /// Minutes after midnight UTC (daily) or after Sunday midnight UTC
    /// (weekly), less than the interval.
    pub offset_mins: Option<u32>,
    pub compliance_count_warning: Option<u32>,
    pub compliance_count_critical: Option<u32>,
    pub is_async: bool,
}

impl NewSnapshotPolicy {
    pub fn local(
        name: &str,
        interval: SnapshotPolicyInterval,
        snapshot_count: u32,
    ) -> Self {
        NewSnapshotPolicy {
            name: name.to_string(),
            interval: Some(interval),
            snapshot_count: Some(snapshot_count),
            ..Default::default()
        }
    }

    pub fn cloud(
        name: &str,
        interval: SnapshotPolicyInterval,
        cloud_provider_name: &str,
        cloud_retention_days: u32,
    ) -> Self {
        NewSnapshotPolicy {
            name: name.to_string(),
            interval: Some(interval),
            cloud_provider_name: Some(cloud_provider_name.to_string()),
            cloud_retention_days: Some(cloud_retention_days),
            ..Default::default()
        }
    }

    fn to_payload(&self) -> Result<Value> {
        let mut payload = Map::new();
        if self.name.is_empty() {
            return invalid("Snapshot policy name cannot be None.");
        }
        payload.insert("snapshot_policy_name".to_string(), json!(self.name));
        if let Some(ref provider) = self.cloud_provider_name {
            let days = match self.cloud_retention_days {
                Some(d) if d > 0 => d,
                _ => {
                    return invalid(
                        "If cloud_provider_name is set, cloud_retention_days \
                         cannot be None.",
                    )
                }
            };
            payload.insert(
                "cloud_snapshot_policy_details".to_string(),
                json!({
                    "cloud_retention_days": days,
                    "cloud_provider_name": provider,
                }),
            );
        } else if let Some(count) = self.snapshot_count.filter(|c| *c > 0) {
            let mut local = Map::new();
            local.insert("snapshot_count".to_string(), json!(count));
            if self.secure {
                local.insert("secure".to_string(), json!(true));
                warn!(
                    "The secure snap option cannot be enabled or disabled on \
                     an existing policy. Secure snapshots may only be \
                     terminated after they expire or by customer-authorized \
                     Dell EMC support."
                );
            }
            payload.insert(
                "local_snapshot_policy_details".to_string(),
                Value::Object(local),
            );
        } else {
            return invalid(
                "One of cloud snapshot policy or local snapshot policy must \
                 be chosen. Check that you have the minimum parameters set.",
            );
        }
        match self.interval {
            Some(i) => {
                payload.insert("interval".to_string(), json!(i.as_str()));
            }
            None => {
                return invalid(
                    "interval cannot be None. The interval supplied must be \
                     one of '10 Minutes', '12 Minutes', '15 Minutes' etc.",
                )
            }
        }
        if let Some(o) = self.offset_mins {
            payload.insert("offset_mins".to_string(), json!(o));
        }
        if let Some(w) = self.compliance_count_warning {
            payload.insert("compliance_count_warning".to_string(), json!(w));
        }
        if let Some(c) = self.compliance_count_critical {
            payload.insert("compliance_count_critical".to_string(), json!(c));
        }
        if self.is_async {
            add_async(&mut payload);
        }
        Ok(Value::Object(payload))
    }
}

/// Properties changed by a `Modify` action.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotPolicyProperties {
    pub interval: Option<SnapshotPolicyInterval>,
    pub offset_mins: Option<u32>,
    /// Between 1 and 1024.
    pub snapshot_count: Option<u32>,
    /// Not 0 and at most the snapshot count.
    pub compliance_count_warning: Option<u32>,
    /// At most the warning count when both are set.
    pub compliance_count_critical: Option<u32>,
    pub new_name: Option<String>,
}

impl SnapshotPolicyProperties {
    fn to_param(&self) -> Map<String, Value> {
        let mut param = Map::new();
        if let Some(ref n) = self.new_name {
            param.insert("snapshot_policy_name".to_string(), json!(n));
        }
        if let Some(i) = self.interval {
            param.insert("interval_mins".to_string(), json!(i.minutes()));
        }
        if let Some(o) = self.offset_mins {
            param.insert("offset_mins".to_string(), json!(o));
        }
        if let Some(c) = self.snapshot_count {
            param.insert("snapshot_count".to_string(), json!(c));
        }
        if let Some(w) = self.compliance_count_warning {
            param.insert("compliance_count_warning".to_string(), json!(w));
        }
        if let Some(c) = self.compliance_count_critical {
            param.insert("compliance_count_critical".to_string(), json!(c));
        }
        param
    }
}

fn modify_payload(
    policy_name: &str,
    action: SnapshotPolicyAction,
    props: &SnapshotPolicyProperties,
    storage_group_names: &[&str],
    is_async: bool,
) -> Result<Value> {
    if policy_name.is_empty() {
        return invalid("Snapshot policy name cannot be None.");
    }
    let mut payload = Map::new();
    payload.insert("action".to_string(), json!(action.as_str()));
    match action {
        SnapshotPolicyAction::AssociateToStorageGroups
        | SnapshotPolicyAction::DisassociateFromStorageGroups => {
            let associate =
                action == SnapshotPolicyAction::AssociateToStorageGroups;
            let key = if associate {
                info!("Associating storage groups to {}.", policy_name);
                "associate_to_storage_group"
            } else {
                info!("Disassociating storage groups from {}.", policy_name);
                "disassociate_from_storage_group"
            };
            if storage_group_names.is_empty() {
                return invalid("storage_group_names cannot be None.");
            }
            payload.insert(
                key.to_string(),
                json!({"storage_group_name": storage_group_names}),
            );
        }
        SnapshotPolicyAction::Modify => {
            info!("Modifying {}.", policy_name);
            let param = props.to_param();
            if param.is_empty() {
                return invalid("No modify payload received.");
            }
            payload.insert("modify".to_string(), Value::Object(param));
        }
        SnapshotPolicyAction::Suspend => info!("Suspending {}.", policy_name),
        SnapshotPolicyAction::Resume => info!("Resuming {}.", policy_name),
    }
    if is_async {
        add_async(&mut payload);
    }
    Ok(Value::Object(payload))
}

/// Start or end of a compliance window.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeBound {
    /// Seconds since epoch, ten digits.
    Epoch(String),
    /// `YYYY-MM-DD HH:MM`.
    TimeString(String),
}

/// Time window of a snapshot compliance query.
#[derive(Debug, Clone, PartialEq)]
pub enum ComplianceWindow {
    /// Whatever Unisphere reports by default.
    Default,
    LastWeek,
    LastFourWeeks,
    Range(TimeBound, TimeBound),
}

impl ComplianceWindow {
    /// Build a window from loose arguments, enforcing the allowed
    /// combinations.
    pub fn from_parts(
        last_week: bool,
        last_four_weeks: bool,
        from_epoch: Option<&str>,
        to_epoch: Option<&str>,
        from_time_string: Option<&str>,
        to_time_string: Option<&str>,
    ) -> Result<Self> {
        let set = [
            last_week,
            last_four_weeks,
            from_epoch.is_some(),
            from_time_string.is_some(),
        ];
        if set.iter().filter(|s| **s).count() > 1 {
            return invalid(
                "Only one of last_week, last_four_weeks, from_epoch, \
                 from_time_string can be true or not None.",
            );
        }
        if to_epoch.is_some() && to_time_string.is_some() {
            return invalid(
                "to_epoch and to_time_string should not both be supplied as \
                 they are different formats of the same thing.",
            );
        }
        if last_week {
            return Ok(ComplianceWindow::LastWeek);
        }
        if last_four_weeks {
            return Ok(ComplianceWindow::LastFourWeeks);
        }
        let to = match (to_epoch, to_time_string) {
            (Some(e), _) => Some(TimeBound::Epoch(e.to_string())),
            (None, Some(t)) => Some(TimeBound::TimeString(t.to_string())),
            (None, None) => None,
        };
        let from = match (from_epoch, from_time_string) {
            (Some(e), _) => Some(TimeBound::Epoch(e.to_string())),
            (None, Some(t)) => Some(TimeBound::TimeString(t.to_string())),
            (None, None) => None,
        };
        match (from, to) {
            (Some(f), Some(t)) => Ok(ComplianceWindow::Range(f, t)),
            (None, None) => Ok(ComplianceWindow::Default),
            (Some(TimeBound::Epoch(_)), None) => invalid(
                "from_epoch must be accompanied with one of to_epoch or \
                 to_time_string.",
            ),
            (Some(TimeBound::TimeString(_)), None) => invalid(
                "from_time_string must be accompanied with one of \
                 to_time_string or to_epoch.",
            ),
            (None, Some(TimeBound::Epoch(_))) => invalid(
                "to_epoch must be accompanied with one of from_epoch or \
                 from_time_string.",
            ),
            (None, Some(TimeBound::TimeString(_))) => invalid(
                "to_time_string must be accompanied with one of \
                 from_time_string or to_epoch.",
            ),
        }
    }

    /// Query parameters of the window after format checks.
    pub(crate) fn to_params(&self) -> Result<Value> {
        let mut params = Map::new();
        match self {
            ComplianceWindow::Default => (),
            ComplianceWindow::LastWeek => {
                params.insert("last_week".to_string(), json!("true"));
            }
            ComplianceWindow::LastFourWeeks => {
                params.insert("last_four_weeks".to_string(), json!("true"));
            }
            ComplianceWindow::Range(from, to) => {
                for (bound, epoch_key, string_key, name) in &[
                    (from, "from_epoch", "fromTimeString", "from"),
                    (to, "to_epoch", "toTimeString", "to"),
                ] {
                    match bound {
                        TimeBound::Epoch(e) => {
                            if !check_epoch_timestamp(e)? {
                                return invalid(&format!(
                                    "{}_epoch {} is in the wrong format.",
                                    name, e
                                ));
                            }
                            params.insert(epoch_key.to_string(), json!(e));
                        }
                        TimeBound::TimeString(t) => {
                            if !check_timestamp(t) {
                                return invalid(&format!(
                                    "{}_time_string {} is in the wrong format.",
                                    name, t
                                ));
                            }
                            params.insert(string_key.to_string(), json!(t));
                        }
                    }
                }
            }
        }
        Ok(Value::Object(params))
    }
}

/// Scheduled snapshot policies and their compliance.
pub struct SnapshotPolicy<'a> {
    common: &'a Common,
    array_id: Option<String>,
}

impl<'a> SnapshotPolicy<'a> {
    pub(crate) fn new(common: &'a Common, array_id: Option<&str>) -> Self {
        SnapshotPolicy {
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

    fn path(&self) -> Result<ResourcePath> {
        Ok(ResourcePath::array(REPLICATION, self.array_id()?)
            .resource_type(SNAPSHOT_POLICY))
    }

    pub fn get_snapshot_policy_list(&self) -> Result<Vec<String>> {
        let resp = self.common.get_resource(&self.path()?, None)?;
        Ok(string_list(&resp, "name"))
    }

    pub fn get_snapshot_policy(
        &self,
        snapshot_policy_name: &str,
    ) -> Result<Value> {
        self.common
            .get_resource(
                &self.path()?.resource_type_id(snapshot_policy_name),
                None,
            )
    }

    /// Storage groups associated with a policy.
    pub fn get_snapshot_policy_storage_group_list(
        &self,
        snapshot_policy_name: &str,
    ) -> Result<Vec<String>> {
        let resp = self.common.get_resource(
            &self
                .path()?
                .resource_type_id(snapshot_policy_name)
                .object_type(STORAGEGROUP),
            None,
        )?;
        Ok(string_list(&resp, "name"))
    }

    /// Create a local or cloud snapshot policy.
    ///
    /// # Errors
    ///
    ///  * [`U4vError::InvalidInput`][1] when the name or interval is
    ///    missing, or neither a local nor a cloud policy is described.
    ///
    /// [1]: enum.U4vError.html#variant.InvalidInput
    pub fn create_snapshot_policy(
        &self,
        policy: &NewSnapshotPolicy,
    ) -> Result<Value> {
        let payload = policy.to_payload()?;
        let (resp, _) = self.common.create_resource(
            &self.path()?,
            Some(&payload),
        )?;
        Ok(resp)
    }

    /// Modify, suspend, resume or (dis)associate a policy.
    ///
    ///  * `props` -- Only read by `Modify`, at least one field must be set.
    ///  * `storage_group_names` -- Only read by the (dis)associate actions,
    ///    must not be empty for them.
    pub fn modify_snapshot_policy(
        &self,
        snapshot_policy_name: &str,
        action: SnapshotPolicyAction,
        props: &SnapshotPolicyProperties,
        storage_group_names: &[&str],
        is_async: bool,
    ) -> Result<Value> {
        let payload = modify_payload(
            snapshot_policy_name,
            action,
            props,
            storage_group_names,
            is_async,
        )?;
        let (resp, _) = self.common.modify_resource(
            &self.path()?.resource_type_id(snapshot_policy_name),
            Some(&payload),
        )?;
        Ok(resp)
    }

    pub fn modify_snapshot_policy_properties(
        &self,
        snapshot_policy_name: &str,
        props: &SnapshotPolicyProperties,
        is_async: bool,
    ) -> Result<Value> {
        self.modify_snapshot_policy(
            snapshot_policy_name,
            SnapshotPolicyAction::Modify,
            props,
            &[],
            is_async,
        )
    }

    pub fn associate_to_storage_groups(
        &self,
        snapshot_policy_name: &str,
        storage_group_names: &[&str],
        is_async: bool,
    ) -> Result<Value> {
        self.modify_snapshot_policy(
            snapshot_policy_name,
            SnapshotPolicyAction::AssociateToStorageGroups,
            &SnapshotPolicyProperties::default(),
            storage_group_names,
            is_async,
        )
    }

    pub fn disassociate_from_storage_groups(
        &self,
        snapshot_policy_name: &str,
        storage_group_names: &[&str],
        is_async: bool,
    ) -> Result<Value> {
        self.modify_snapshot_policy(
            snapshot_policy_name,
            SnapshotPolicyAction::DisassociateFromStorageGroups,
            &SnapshotPolicyProperties::default(),
            storage_group_names,
            is_async,
        )
    }

    pub fn suspend_snapshot_policy(
        &self,
        snapshot_policy_name: &str,
        is_async: bool,
    ) -> Result<Value> {
        self.modify_snapshot_policy(
            snapshot_policy_name,
            SnapshotPolicyAction::Suspend,
            &SnapshotPolicyProperties::default(),
            &[],
            is_async,
        )
    }

    pub fn resume_snapshot_policy(
        &self,
        snapshot_policy_name: &str,
        is_async: bool,
    ) -> Result<Value> {
        self.modify_snapshot_policy(
            snapshot_policy_name,
            SnapshotPolicyAction::Resume,
            &SnapshotPolicyProperties::default(),
            &[],
            is_async,
        )
    }

    pub fn delete_snapshot_policy(
        &self,
        snapshot_policy_name: &str,
    ) -> Result<()> {
        if snapshot_policy_name.is_empty() {
            return invalid("Snapshot policy name cannot be None.");
        }
        self.common
            .delete_resource(
                &self.path()?.resource_type_id(snapshot_policy_name),
                None,
            )
    }

    /// Snapshot compliance of a storage group over `window`.
    pub fn get_snapshot_policy_compliance(
        &self,
        storage_group_name: &str,
        window: &ComplianceWindow,
    ) -> Result<Value> {
        if storage_group_name.is_empty() {
            return invalid("Storage group name cannot be None.");
        }
        let params = window.to_params()?;
        self.common.get_resource(
            &ResourcePath::array(REPLICATION, self.array_id()?)
                .resource_type(STORAGEGROUP)
                .resource_type_id(storage_group_name)
                .resource(COMPLIANCE)
                .object_type(SNAPSHOT),
            Some(&params),
        )
    }

    pub fn get_snapshot_policy_compliance_last_week(
        &self,
        storage_group_name: &str,
    ) -> Result<Value> {
        self.get_snapshot_policy_compliance(
            storage_group_name,
            &ComplianceWindow::LastWeek,
        )
    }

    pub fn get_snapshot_policy_compliance_last_four_weeks(
        &self,
        storage_group_name: &str,
    ) -> Result<Value> {
        self.get_snapshot_policy_compliance(
            storage_group_name,
            &ComplianceWindow::LastFourWeeks,
        )
    }

    /// Compliance between two epoch timestamps in seconds, e.g.
    /// `1606820929`.
    pub fn get_snapshot_policy_compliance_epoch(
        &self,
        storage_group_name: &str,
        from_epoch: Option<&str>,
        to_epoch: Option<&str>,
    ) -> Result<Value> {
        let window =
            ComplianceWindow::from_parts(
                false,
                false,
                from_epoch,
                to_epoch,
                None,
                None,
            )?;
        self.get_snapshot_policy_compliance(storage_group_name, &window)
    }

    /// Compliance between two `YYYY-MM-DD HH:MM` times.
    pub fn get_snapshot_policy_compliance_human_readable_time(
        &self,
        storage_group_name: &str,
        from_time_string: Option<&str>,
        to_time_string: Option<&str>,
    ) -> Result<Value> {
        let window = ComplianceWindow::from_parts(
            false,
            false,
            None,
            None,
            from_time_string,
            to_time_string,
        )?;
        self.get_snapshot_policy_compliance(storage_group_name, &window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_policy_payload() {
        let mut p = NewSnapshotPolicy::local(
            "pol",
            SnapshotPolicyInterval::OneHour,
            10,
        );
        p.secure = true;
        p.offset_mins = Some(5);
        let v = p.to_payload().unwrap();
        assert_eq!(v["snapshot_policy_name"], "pol");
        assert_eq!(v["interval"], "1 Hour");
        assert_eq!(v["local_snapshot_policy_details"]["snapshot_count"], 10);
        assert_eq!(v["local_snapshot_policy_details"]["secure"], true);
        assert_eq!(v["offset_mins"], 5);
    }

    #[test]
    fn cloud_policy_needs_retention() {
        let mut p = NewSnapshotPolicy::cloud(
            "pol",
            SnapshotPolicyInterval::OneDay,
            "aws",
            7,
        );
        assert!(p.to_payload().is_ok());
        p.cloud_retention_days = None;
        assert!(matches!(p.to_payload(), Err(U4vError::InvalidInput(_))));
    }

    #[test]
    fn policy_needs_a_kind() {
        let p = NewSnapshotPolicy {
            name: "pol".to_string(),
            interval: Some(SnapshotPolicyInterval::OneDay),
            ..Default::default()
        };
        assert!(matches!(p.to_payload(), Err(U4vError::InvalidInput(_))));
    }

    #[test]
    fn modify_needs_a_property() {
        let e = modify_payload(
            "pol",
            SnapshotPolicyAction::Modify,
            &SnapshotPolicyProperties::default(),
            &[],
            false,
        );
        assert_eq!(
            e,
            Err(U4vError::InvalidInput(
                "No modify payload received.".to_string()
            ))
        );
        let props = SnapshotPolicyProperties {
            interval: Some(SnapshotPolicyInterval::TwoHours),
            ..Default::default()
        };
        let p = modify_payload(
            "pol",
            SnapshotPolicyAction::Modify,
            &props,
            &[],
            true,
        )
        .unwrap();
        assert_eq!(p["modify"]["interval_mins"], 120);
        assert_eq!(p["executionOption"], "ASYNCHRONOUS");
    }

    #[test]
    fn associate_needs_storage_groups() {
        let props = SnapshotPolicyProperties::default();
        assert!(modify_payload(
            "pol",
            SnapshotPolicyAction::AssociateToStorageGroups,
            &props,
            &[],
            false
        )
        .is_err());
        let p = modify_payload(
            "pol",
            SnapshotPolicyAction::DisassociateFromStorageGroups,
            &props,
            &["sg1"],
            false,
        )
        .unwrap();
        assert_eq!(
            p["disassociate_from_storage_group"]["storage_group_name"],
            json!(["sg1"])
        );
    }

    #[test]
    fn compliance_window_flags() {
        let w =
            ComplianceWindow::from_parts(true, false, None, None, None, None)
                .unwrap();
        assert_eq!(w.to_params().unwrap(), json!({"last_week": "true"}));
        let w =
            ComplianceWindow::from_parts(false, true, None, None, None, None)
                .unwrap();
        assert_eq!(w.to_params().unwrap(), json!({"last_four_weeks": "true"}));
        assert!(
            ComplianceWindow::from_parts(true, true, None, None, None, None)
                .is_err()
        );
    }

    #[test]
    fn compliance_window_mixed_range() {
        let w = ComplianceWindow::from_parts(
            false,
            false,
            Some("1606820929"),
            None,
            None,
            Some("2020-12-01 15:00"),
        )
        .unwrap();
        assert_eq!(
            w.to_params().unwrap(),
            json!({
                "from_epoch": "1606820929",
                "toTimeString": "2020-12-01 15:00",
            })
        );
    }

    #[test]
    fn compliance_window_errors() {
        assert!(ComplianceWindow::from_parts(
            false,
            false,
            Some("1606820929"),
            None,
            None,
            None,
        )
            .is_err());
        assert!(ComplianceWindow::from_parts(
            false,
            false,
            None,
            Some("1606820929"),
            None,
            None,
        )
            .is_err());
        let w = ComplianceWindow::Range(
            TimeBound::Epoch("16068".to_string()),
            TimeBound::Epoch("1606820929".to_string()),
        );
        assert_eq!(
            w.to_params(),
            Err(U4vError::InvalidInput(
                "from_epoch 16068 is in the wrong format.".to_string()
            ))
        );
    }
}
