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
use super::error::*;

const SETTINGS: &str = "settings";
const REGISTRATION: &str = "registration";
const ALERT: &str = "alert";
const ACCESS_CONTROL: &str = "access_control";
const NOTIFICATION: &str = "notification";
const MAX_ROLES: usize = 4;
const ROLE_NONE: &str = "none";

fn invalid<T>(msg: &str) -> Result<T> {
    error!("{}", msg);
    Err(U4vError::InvalidInput(msg.to_string()))
}

/// Alert notification targets to update.
///
/// Only the targets with `enable_*` set are sent. Email needs
/// `email_server`, `sender_address` and `email_port` when enabled, syslog
/// needs every `syslog_*` field plus `tls`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertTargets {
    /// Settings fetched earlier, the targets below are merged over it.
    pub base: Option<Value>,
    pub enable_email: Option<bool>,
    pub email_server: Option<String>,
    pub sender_address: Option<String>,
    pub email_port: Option<u16>,
    pub enable_syslog: Option<bool>,
    pub syslog_host: Option<String>,
    pub syslog_protocol: Option<String>,
    pub syslog_text_format: Option<String>,
    pub tls: Option<bool>,
    pub syslog_port: Option<u16>,
    pub enable_snmp: Option<bool>,
    pub snmp_host: Option<String>,
    pub snmp_port: Option<u16>,
    pub snmp_version: Option<u8>,
    /// `usm` or `tsm`, SNMP v3 only.
    pub snmp_security_model: Option<String>,
    pub snmp_username: Option<String>,
    pub snmp_password: Option<String>,
    pub snmp_passphrase: Option<String>,
    pub tls_security_name: Option<String>,
    /// Base64 encoded CA certificate.
    pub certificate_authority_pem: Option<String>,
}

impl AlertTargets {
    pub(crate) fn to_payload(&self) -> Result<Value> {
        let mut payload = match self.base.as_ref().and_then(|b| b.as_object()) {
            Some(b) => b.clone(),
            None => Map::new(),
        };
        match self.enable_email {
            Some(true) => {
                let (server, sender, port) = match (
                    &self.email_server,
                    &self.sender_address,
                    self.email_port,
                ) {
                    (Some(s), Some(a), Some(p)) => (s, a, p),
                    _ => {
                        return invalid(
                            "enable_email is True but email server, sender \
                             address, or email port is missing.",
                        )
                    }
                };
                payload.insert(
                    "email".to_string(),
                    json!({
                        "enabled": true,
                        "email_server": server,
                        "sender_address": sender,
                        "email_port": port,
                    }),
                );
            }
            Some(false) => {
                payload.insert("email".to_string(), json!({"enabled": false}));
            }
            None => (),
        }

        match self.enable_snmp {
            Some(true) => {
                let mut target = Map::new();
                target.insert("host".to_string(), json!(self.snmp_host));
                target.insert("port".to_string(), json!(self.snmp_port));
                target.insert("version".to_string(), json!(self.snmp_version));
                if self.snmp_version == Some(3) {
                    target.insert(
                        "security_model".to_string(),
                        json!(self.snmp_security_model),
                    );
                    target.insert(
                        "authorization".to_string(),
                        json!({
                            "username": self.snmp_username,
                            "password": self.snmp_password,
                            "passphrase": self.snmp_passphrase,
                        }),
                    );
                    if let (Some(name), Some(pem)) = (
                        &self.tls_security_name,
                        &self.certificate_authority_pem,
                    ) {
                        target.insert(
                            "tls".to_string(),
                            json!({
                                "security_name": name,
                                "certificate_authority_pem": pem,
                            }),
                        );
                    }
                }
                payload.insert(
                    "snmp".to_string(),
                    json!({
                        "enabled": true,
                        "snmp_trap_targets": [Value::Object(target)],
                    }),
                );
            }
            Some(false) => {
                payload.insert("snmp".to_string(), json!({"enabled": false}));
            }
            None => (),
        }

        if self.enable_syslog == Some(true) {
            let target = match (
                &self.syslog_host,
                &self.syslog_protocol,
                &self.syslog_text_format,
                self.tls,
                self.syslog_port,
            ) {
                (Some(h), Some(pr), Some(f), Some(t), Some(p)) => json!({
                    "host": h,
                    "protocol": pr,
                    "text_format": f,
                    "tls": t,
                    "port": p,
                }),
                _ => {
                    return invalid(
                        "enable_syslog is True but one or more required \
                         syslog fields are missing.",
                    )
                }
            };
            payload.insert(
                "syslog".to_string(),
                json!({"enabled": true, "syslog_target": target}),
            );
        }
        Ok(Value::Object(payload))
    }
}

/// Role limited to storage groups, e.g. local replication.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScopedRole {
    /// Comma separated storage group names.
    pub storage_groups: Option<String>,
    pub wildcards: Option<String>,
}

impl ScopedRole {
    fn to_value(&self) -> Value {
        let mut role = Map::new();
        role.insert("enabled".to_string(), json!(true));
        if let Some(ref s) = self.storage_groups {
            role.insert("storage_groups".to_string(), json!(s));
        }
        if let Some(ref w) = self.wildcards {
            role.insert("wildcards".to_string(), json!(w));
        }
        Value::Object(role)
    }
}

/// Arguments of [`Settings::create_authorization_rule()`][1].
///
/// [1]: struct.Settings.html#method.create_authorization_rule
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthorizationRule {
    /// User or group name.
    pub name: String,
    /// Up to 4 of `admin`, `security_admin`, `storage_admin`,
    /// `mainframe_admin`, `monitor`, `auditor`, `perf_monitor` or the lone
    /// `none`.
    pub roles: Vec<String>,
    /// `user` or `group`.
    pub account_type: Option<String>,
    /// `localDirectory`, `ldapSSL`, `windowsAD`, `host`, `sso` or `none`.
    pub authority: Option<String>,
    /// Domain or host name.
    pub qualifier: Option<String>,
    pub local_rep: Option<ScopedRole>,
    pub remote_rep: Option<ScopedRole>,
    pub device_manage: Option<ScopedRole>,
}

impl AuthorizationRule {
    pub fn new(name: &str, roles: &[&str]) -> Self {
        AuthorizationRule {
            name: name.to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            ..Default::default()
        }
    }

    pub(crate) fn to_payload(&self) -> Result<Value> {
        if self.roles.len() > MAX_ROLES {
            return invalid("A user/group can have a maximum of 4 roles.");
        }
        if self.roles.len() > 1 && self.roles.iter().any(|r| r == ROLE_NONE) {
            return invalid("'none' cannot be combined with other roles.");
        }
        let mut roles = Map::new();
        for role in &self.roles {
            roles.insert(role.to_string(), json!(true));
        }
        for (key, scoped) in &[
            ("local_rep", &self.local_rep),
            ("remote_rep", &self.remote_rep),
            ("device_manage", &self.device_manage),
        ] {
            if let Some(s) = scoped {
                roles.insert(key.to_string(), s.to_value());
            }
        }
        let mut payload = Map::new();
        payload.insert("name".to_string(), json!(self.name));
        payload.insert("account_type".to_string(), json!(self.account_type));
        payload.insert("authority".to_string(), json!(self.authority));
        payload.insert("qualifier".to_string(), json!(self.qualifier));
        payload.insert("roles".to_string(), Value::Object(roles));
        Ok(Value::Object(payload))
    }
}

/// Keep the thresholds of `category`, or only those with alerting
/// enabled.
pub(crate) fn filter_thresholds(
    all: &Value,
    enabled_only: bool,
    category: Option<&str>,
) -> Value {
    let filtered: Vec<Value> = value_list(all, "global_performance_thresholds")
        .into_iter()
        .filter(|t| match category {
            Some(c) => t.get("category").and_then(|v| v.as_str()) == Some(c),
            None => true,
        })
        .filter(|t| {
            !enabled_only
                || t.get("alert_error").and_then(|v| v.as_bool()) == Some(true)
        })
        .collect();
    json!({ "global_performance_thresholds": filtered })
}

/// Unisphere settings: performance registration, Secure Connect Gateway,
/// alerting and access control.
pub struct Settings<'a> {
    common: &'a Common,
    array_id: Option<String>,
}

impl<'a> Settings<'a> {
    pub(crate) fn new(common: &'a Common, array_id: Option<&str>) -> Self {
        Settings {
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

    fn global(level: &str, level_id: &str) -> ResourcePath {
        ResourcePath::new(SETTINGS).level(level).level_id(level_id)
    }

    fn array_path(
        &self,
        resource_type: &str,
        resource_type_id: &str,
    ) -> Result<ResourcePath> {
        Ok(ResourcePath::array(SETTINGS, self.array_id()?)
            .resource_type(resource_type)
            .resource_type_id(resource_type_id))
    }

    fn modify(&self, path: &ResourcePath, payload: &Value) -> Result<Value> {
        let (resp, _) = self.common.modify_resource(path, Some(payload))?;
        Ok(resp)
    }

    pub fn get_performance_registration_settings(&self) -> Result<Value> {
        self.common
            .get_resource(&Settings::global(REGISTRATION, PERFORMANCE), None)
    }

    /// Register an array for performance data collection.
    ///
    ///  * `diagnostic` -- Collect diagnostic data every 5 minutes.
    ///  * `real_time` -- Collect real time data every 5 seconds.
    ///  * `file` -- Collect file performance data.
    ///  * `real_time_storage_groups` -- Storage groups to collect real
    ///    time data on, needs `real_time`.
    pub fn update_performance_registration_settings(
        &self,
        array_id: &str,
        diagnostic: bool,
        real_time: bool,
        file: bool,
        real_time_storage_groups: Option<&[&str]>,
    ) -> Result<Value> {
        let mut payload = Map::new();
        payload.insert(
            "registration_details".to_string(),
            json!([{
                "system_id": array_id,
                "diagnostic": diagnostic,
                "real_time": real_time,
                "file": file,
            }]),
        );
        if let Some(sgs) = real_time_storage_groups {
            if !sgs.is_empty() {
                payload.insert("selectedSGs".to_string(), json!(sgs));
            }
        }
        self.modify(
            &Settings::global(REGISTRATION, PERFORMANCE),
            &Value::Object(payload),
        )
    }

    pub fn get_scg_configuration_details(&self) -> Result<Value> {
        self.common
            .get_resource(&Settings::global(REGISTRATION, "scg"), None)
    }

    pub fn get_scg_server_certificate_configuration(&self) -> Result<Value> {
        self.common.get_resource(
            &Settings::global(REGISTRATION, "scg").resource_type("server_cert"),
            None,
        )
    }

    /// Register Unisphere with a Secure Connect Gateway.
    ///
    ///  * `server_cert` -- Base64 encoded certificate of the gateway.
    ///  * `access_key`, `pin` -- Gateway registration credentials.
    ///  * `unisphere_registered` -- Unisphere is already registered.
    ///  * `internal_connection` -- Registered over an internal connection.
    pub fn configure_scg_connection(
        &self,
        unisphere_ip_address: &str,
        gateway_host: &str,
        scg_serial_number: &str,
        model: &str,
        server_cert: &str,
        access_key: &str,
        pin: &str,
        gateway_port: u16,
        unisphere_registered: bool,
        internal_connection: bool,
    ) -> Result<Value> {
        let payload = json!({
            "unisphere_ip_address": unisphere_ip_address,
            "gateway_host": gateway_host,
            "scg_serial_number": scg_serial_number,
            "model": model,
            "server_cert": server_cert,
            "access_key": access_key,
            "pin": pin,
            "gateway_port": gateway_port,
            "unisphere_registered": unisphere_registered,
            "internal_connection": internal_connection,
        });
        let (resp, _) = self.common.create_resource(
            &Settings::global(REGISTRATION, "scg").resource_type("connection"),
            Some(&payload),
        )?;
        Ok(resp)
    }

    pub fn get_cloudiq_data_collection_configuration(&self) -> Result<Value> {
        self.common
            .get_resource(&Settings::global(REGISTRATION, "cloudiq"), None)
    }

    /// Send data to CloudIQ, the Secure Connect Gateway must be
    /// configured first.
    ///
    ///  * `data_collection_disabled` -- Arrays excluded from collection.
    pub fn register_cloudiq_data_collection(
        &self,
        send_data: bool,
        data_collection_disabled: &[&str],
    ) -> Result<Value> {
        let mut payload = Map::new();
        payload.insert("send_data".to_string(), json!(send_data));
        payload.insert(
            "data_collection_disabled".to_string(),
            json!(data_collection_disabled),
        );
        self.modify(
            &Settings::global(REGISTRATION, "cloudiq"),
            &Value::Object(payload),
        )
    }

    /// Global performance thresholds, filtered locally.
    ///
    ///  * `enabled_only` -- Only thresholds raising alerts.
    ///  * `category` -- Only thresholds of this category, e.g. `Array`.
    pub fn get_performance_thresholds_and_alerts(
        &self,
        enabled_only: bool,
        category: Option<&str>,
    ) -> Result<Value> {
        let all = self
            .common
            .get_resource(
                &Settings::global(ALERT, "performance_threshold"),
                None,
            )?;
        Ok(filter_thresholds(&all, enabled_only, category))
    }

    /// Set global thresholds, `payload` may be a subset of what
    /// [`get_performance_thresholds_and_alerts()`][1] returns.
    ///
    /// [1]: #method.get_performance_thresholds_and_alerts
    pub fn update_performance_thresholds_and_alerts(
        &self,
        payload: &Value,
    ) -> Result<Value> {
        self.modify(&Settings::global(ALERT, "performance_threshold"), payload)
    }

    pub fn get_alert_notification_target_config(&self) -> Result<Value> {
        self.common
            .get_resource(&Settings::global(ALERT, NOTIFICATION), None)
    }

    /// Update email, SNMP and syslog targets.
    ///
    /// # Errors
    ///
    ///  * [`U4vError::InvalidInput`][1] when email or syslog is enabled
    ///    without its required fields.
    ///
    /// [1]: enum.U4vError.html#variant.InvalidInput
    pub fn update_alert_notification_targets(
        &self,
        targets: &AlertTargets,
    ) -> Result<Value> {
        let payload = targets.to_payload()?;
        let (resp, _) = self.common.create_resource(
            &Settings::global(ALERT, NOTIFICATION),
            Some(&payload),
        )?;
        Ok(resp)
    }

    pub fn get_alert_notification_agent_details(&self) -> Result<Value> {
        self.common.get_resource(
            &Settings::global(ALERT, NOTIFICATION)
                .resource_type("agent_details"),
            None,
        )
    }

    /// Alert severities and email subscriptions of the array.
    pub fn get_alert_notification_settings(&self) -> Result<Value> {
        self.common
            .get_resource(&self.array_path(ALERT, NOTIFICATION)?, None)
    }

    pub fn update_alert_notifications(&self, payload: &Value) -> Result<Value> {
        self.modify(&self.array_path(ALERT, NOTIFICATION)?, payload)
    }

    /// Alert policies of the array.
    ///
    ///  * `filters` -- e.g. `{"name": "<like>array", "enabled": true}`.
    pub fn get_alert_policies(&self, filters: Option<&Value>) -> Result<Value> {
        self.common
            .get_resource(&self.array_path(ALERT, "alert_policy")?, filters)
    }

    pub fn update_alert_policies(&self, payload: &Value) -> Result<Value> {
        self.modify(&self.array_path(ALERT, "alert_policy")?, payload)
    }

    pub fn get_host_access_control_configuration(&self) -> Result<Value> {
        self.common
            .get_resource(
                &self.array_path(ACCESS_CONTROL, "host_access")?,
                None,
            )
    }

    /// Authorization rules of the array.
    ///
    ///  * `filters` -- Any of `name`, `account_type`, `authority`,
    ///    `qualifier` and `role`.
    pub fn get_authorization_rules(
        &self,
        filters: Option<&Value>,
    ) -> Result<Value> {
        self.common.get_resource(
            &self.array_path(ACCESS_CONTROL, "authorization_rule")?,
            filters,
        )
    }

    /// Create an authorization rule.
    ///
    /// # Errors
    ///
    ///  * [`U4vError::InvalidInput`][1] on more than 4 roles or when `none`
    ///    is combined with other roles.
    ///
    /// [1]: enum.U4vError.html#variant.InvalidInput
    pub fn create_authorization_rule(
        &self,
        rule: &AuthorizationRule,
    ) -> Result<Value> {
        let payload = rule.to_payload()?;
        let (resp, _) = self.common.create_resource(
            &self.array_path(ACCESS_CONTROL, "authorization_rule")?,
            Some(&payload),
        )?;
        Ok(resp)
    }

    pub fn update_authorization_rules(&self, payload: &Value) -> Result<Value> {
        self.modify(
            &self.array_path(ACCESS_CONTROL, "authorization_rule")?,
            payload,
        )
    }

    /// System threshold alert configuration.
    ///
    ///  * `filters` -- e.g. `{"type": "srp", "warning_threshold": ">60"}`.
    pub fn get_system_thresholds(
        &self,
        filters: Option<&Value>,
    ) -> Result<Value> {
        self.common
            .get_resource(&self.array_path(ALERT, "system_threshold")?, filters)
    }

    pub fn update_system_thresholds(&self, payload: &Value) -> Result<Value> {
        self.modify(&self.array_path(ALERT, "system_threshold")?, payload)
    }

    pub fn get_storage_group_compliance_policy_allocation(
        &self,
    ) -> Result<Value> {
        self.common.get_resource(
            &self
                .array_path(ALERT, "compliance_alert_policy")?
                .resource(STORAGEGROUP),
            None,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_needs_server_sender_and_port() {
        let targets = AlertTargets {
            enable_email: Some(true),
            email_server: Some("smtp.example.com".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            targets.to_payload(),
            Err(U4vError::InvalidInput(_))
        ));

        let targets = AlertTargets {
            enable_email: Some(true),
            email_server: Some("smtp.example.com".to_string()),
            sender_address: Some("array@example.com".to_string()),
            email_port: Some(25),
            ..Default::default()
        };
        let payload = targets.to_payload().unwrap();
        assert_eq!(payload["email"]["enabled"], json!(true));
        assert_eq!(payload["email"]["email_port"], json!(25));
        assert!(payload.get("syslog").is_none());
    }

    #[test]
    fn syslog_needs_tls_flag() {
        let mut targets = AlertTargets {
            enable_syslog: Some(true),
            syslog_host: Some("10.0.0.1".to_string()),
            syslog_protocol: Some("TCP".to_string()),
            syslog_text_format: Some("RFC5424".to_string()),
            syslog_port: Some(514),
            ..Default::default()
        };
        assert!(targets.to_payload().is_err());
        targets.tls = Some(false);
        let payload = targets.to_payload().unwrap();
        assert_eq!(payload["syslog"]["syslog_target"]["port"], json!(514));
        assert_eq!(payload["syslog"]["syslog_target"]["tls"], json!(false));
    }

    #[test]
    fn snmp_v3_carries_authorization() {
        let targets = AlertTargets {
            base: Some(json!({"email": {"enabled": false}})),
            enable_snmp: Some(true),
            snmp_host: Some("10.0.0.2".to_string()),
            snmp_port: Some(162),
            snmp_version: Some(3),
            snmp_security_model: Some("usm".to_string()),
            snmp_username: Some("trap".to_string()),
            ..Default::default()
        };
        let payload = targets.to_payload().unwrap();
        let target = &payload["snmp"]["snmp_trap_targets"][0];
        assert_eq!(target["security_model"], json!("usm"));
        assert_eq!(target["authorization"]["username"], json!("trap"));
        assert!(target.get("tls").is_none());
        assert_eq!(payload["email"], json!({"enabled": false}));
    }

    #[test]
    fn authorization_rule_roles() {
        let rule = AuthorizationRule::new(
            "bob",
            &["admin", "monitor", "auditor", "perf_monitor", "storage_admin"],
        );
        assert!(rule.to_payload().is_err());

        let rule = AuthorizationRule::new("bob", &["none", "monitor"]);
        assert!(rule.to_payload().is_err());

        let mut rule = AuthorizationRule::new("bob", &["monitor"]);
        rule.local_rep = Some(ScopedRole {
            storage_groups: Some("sg_1,sg_2".to_string()),
            wildcards: None,
        });
        let payload = rule.to_payload().unwrap();
        assert_eq!(
            payload["roles"],
            json!({
                "monitor": true,
                "local_rep": {"enabled": true, "storage_groups": "sg_1,sg_2"},
            })
        );
    }

    #[test]
    fn threshold_filtering() {
        let all = json!({"global_performance_thresholds": [
            {"category": "Array", "metric": "HostIOs", "alert_error": true},
            {
                "category": "Array",
                "metric": "BEUtilization",
                "alert_error": false,
            },
            {
                "category": "FEPort",
                "metric": "PercentBusy",
                "alert_error": true,
            },
        ]});
        let r = filter_thresholds(&all, true, Some("Array"));
        let list = r["global_performance_thresholds"].as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["metric"], json!("HostIOs"));
        let r = filter_thresholds(&all, false, None);
        assert_eq!(
            r["global_performance_thresholds"].as_array().unwrap().len(),
            3
        );
    }
}
