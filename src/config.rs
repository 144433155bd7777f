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
use std::env;
use std::time::Duration;

use super::error::*;

pub(crate) const UNISPHERE_VERSION: &str = "91";
const DEFAULT_PORT: u16 = 8443;
const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);
const DEFAULT_RETRIES: u32 = 200;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

static USERNAME_VAR_NAME: &str = "UNIVMAX_USERNAME";
static PASSWORD_VAR_NAME: &str = "UNIVMAX_PASSWORD";
static SERVER_IP_VAR_NAME: &str = "UNIVMAX_SERVER_IP";
static PORT_VAR_NAME: &str = "UNIVMAX_PORT";
static VERIFY_VAR_NAME: &str = "UNIVMAX_VERIFY";
static ARRAY_VAR_NAME: &str = "UNIVMAX_ARRAY";
static REMOTE_ARRAY_VAR_NAME: &str = "UNIVMAX_REMOTE_ARRAY";
static INTERVAL_VAR_NAME: &str = "UNIVMAX_INTERVAL";
static TIMEOUT_VAR_NAME: &str = "UNIVMAX_TIMEOUT";

/// Settings used by [`Client::new()`][1] to reach Unisphere.
///
/// All setters consume and return the config so it can be chained:
///
/// ```rust
/// use std::time::Duration;
/// use univmax::ConnectionConfig;
///
/// let cfg = ConnectionConfig::new()
///     .username("smc")
///     .password("smc")
///     .server_ip("10.0.0.1")
///     .verify(false)
///     .array_id("000197800123")
///     .interval(Duration::from_secs(2));
/// assert_eq!(cfg.port_or_default(), 8443);
/// ```
///
/// [1]: struct.Client.html#method.new
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub server_ip: Option<String>,
    /// Unisphere port, 8443 when unset.
    pub port: Option<u16>,
    /// Whether to verify the server certificate, true when unset.
    pub verify: Option<bool>,
    /// PEM CA bundle used in addition to the system trust store.
    pub ca_cert_path: Option<String>,
    /// Unisphere REST version placed in resource URIs, e.g. `91`.
    pub version: String,
    /// Sleep between two job status polls, 5 seconds when unset.
    pub interval: Option<Duration>,
    /// Maximum job status polls before giving up.
    pub retries: u32,
    /// Per request timeout, 120 seconds when unset.
    pub timeout: Option<Duration>,
    pub array_id: Option<String>,
    /// Remote array serial number used by SRDF helpers.
    pub remote_array: Option<String>,
    /// Value of the `application-type` header.
    pub application_type: Option<String>,
    /// Override of `https://{server_ip}:{port}/univmax/restapi`.
    pub base_url: Option<String>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        ConnectionConfig {
            username: None,
            password: None,
            server_ip: None,
            port: None,
            verify: None,
            ca_cert_path: None,
            version: UNISPHERE_VERSION.to_string(),
            interval: None,
            retries: DEFAULT_RETRIES,
            timeout: None,
            array_id: None,
            remote_array: None,
            application_type: None,
            base_url: None,
        }
    }
}

impl ConnectionConfig {
    pub fn new() -> Self {
        Default::default()
    }

    /// Fill unset fields from `UNIVMAX_*` environment variables.
    ///
    /// `UNIVMAX_VERIFY` accepts `true`, `false` or a path to a CA bundle.
    /// `UNIVMAX_INTERVAL` and `UNIVMAX_TIMEOUT` take human readable
    /// durations like `5s` or `2m`.
    ///
    /// # Errors
    ///
    ///  * [`U4vError::InvalidInput`][1] on unparsable port or duration.
    ///
    /// [1]: enum.U4vError.html#variant.InvalidInput
    pub fn from_env(self) -> Result<Self> {
        self.from_lookup(|k| env::var(k).ok())
    }

    pub(crate) fn from_lookup<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.username.is_none() {
            self.username = lookup(USERNAME_VAR_NAME);
        }
        if self.password.is_none() {
            self.password = lookup(PASSWORD_VAR_NAME);
        }
        if self.server_ip.is_none() {
            self.server_ip = lookup(SERVER_IP_VAR_NAME);
        }
        if self.array_id.is_none() {
            self.array_id = lookup(ARRAY_VAR_NAME);
        }
        if self.remote_array.is_none() {
            self.remote_array = lookup(REMOTE_ARRAY_VAR_NAME);
        }
        if self.port.is_none() {
            if let Some(port) = lookup(PORT_VAR_NAME) {
                self.port = Some(port.trim().parse::<u16>().map_err(|e| {
                    U4vError::InvalidInput(format!(
                        "Invalid {} '{}': {}",
                        PORT_VAR_NAME, port, e
                    ))
                })?);
            }
        }
        // A CA bundle set by the caller already decides verification.
        if self.verify.is_none() && self.ca_cert_path.is_none() {
            if let Some(verify) = lookup(VERIFY_VAR_NAME) {
                match verify.to_lowercase().as_str() {
                    "false" => self.verify = Some(false),
                    "true" => self.verify = Some(true),
                    _ => {
                        self.verify = Some(true);
                        self.ca_cert_path = Some(verify);
                    }
                }
            }
        }
        if self.interval.is_none() {
            if let Some(i) = lookup(INTERVAL_VAR_NAME) {
                self.interval = Some(parse_duration(INTERVAL_VAR_NAME, &i)?);
            }
        }
        if self.timeout.is_none() {
            if let Some(t) = lookup(TIMEOUT_VAR_NAME) {
                self.timeout = Some(parse_duration(TIMEOUT_VAR_NAME, &t)?);
            }
        }
        Ok(self)
    }

    pub fn username(mut self, v: &str) -> Self {
        self.username = Some(v.to_string());
        self
    }

    pub fn password(mut self, v: &str) -> Self {
        self.password = Some(v.to_string());
        self
    }

    pub fn server_ip(mut self, v: &str) -> Self {
        self.server_ip = Some(v.to_string());
        self
    }

    pub fn port(mut self, v: u16) -> Self {
        self.port = Some(v);
        self
    }

    pub fn verify(mut self, v: bool) -> Self {
        self.verify = Some(v);
        self
    }

    pub fn ca_cert_path(mut self, v: &str) -> Self {
        self.ca_cert_path = Some(v.to_string());
        self
    }

    pub fn version(mut self, v: &str) -> Self {
        self.version = v.to_string();
        self
    }

    pub fn interval(mut self, v: Duration) -> Self {
        self.interval = Some(v);
        self
    }

    pub fn retries(mut self, v: u32) -> Self {
        self.retries = v;
        self
    }

    pub fn timeout(mut self, v: Duration) -> Self {
        self.timeout = Some(v);
        self
    }

    pub fn array_id(mut self, v: &str) -> Self {
        self.array_id = Some(v.to_string());
        self
    }

    pub fn remote_array(mut self, v: &str) -> Self {
        self.remote_array = Some(v.to_string());
        self
    }

    pub fn application_type(mut self, v: &str) -> Self {
        self.application_type = Some(v.to_string());
        self
    }

    pub fn base_url(mut self, v: &str) -> Self {
        self.base_url = Some(v.trim_end_matches('/').to_string());
        self
    }

    pub fn port_or_default(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn verify_or_default(&self) -> bool {
        self.verify.unwrap_or(true)
    }

    pub fn interval_or_default(&self) -> Duration {
        self.interval.unwrap_or(DEFAULT_INTERVAL)
    }

    pub fn timeout_or_default(&self) -> Duration {
        self.timeout.unwrap_or(DEFAULT_TIMEOUT)
    }

    /// Check mandatory fields are present.
    ///
    /// # Errors
    ///
    ///  * [`U4vError::MissingConfiguration`][1]
    ///
    /// [1]: enum.U4vError.html#variant.MissingConfiguration
    pub fn validate(&self) -> Result<()> {
        if self.username.is_none()
            || self.password.is_none()
            || (self.server_ip.is_none() && self.base_url.is_none())
        {
            return Err(U4vError::MissingConfiguration(
                "univmax settings could not be loaded, please check \
                 connection input parameters."
                    .to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn resolved_base_url(&self) -> Result<String> {
        if let Some(ref u) = self.base_url {
            url::Url::parse(u)?;
            return Ok(u.clone());
        }
        let ip = match self.server_ip {
            Some(ref i) => i,
            None => {
                return Err(U4vError::MissingConfiguration(
                    "No Unisphere server address defined".to_string(),
                ))
            }
        };
        // IPv6 literals need brackets inside URLs.
        let host = if super::misc::check_ipv6(ip) {
            format!("[{}]", ip)
        } else {
            ip.to_string()
        };
        let u = format!(
            "https://{}:{}/univmax/restapi",
            host,
            self.port_or_default()
        );
        url::Url::parse(&u)?;
        Ok(u)
    }
}

fn parse_duration(var_name: &str, value: &str) -> Result<Duration> {
    value
        .parse::<humantime::Duration>()
        .map(|d| d.into())
        .map_err(|e| {
            U4vError::InvalidInput(format!(
                "Invalid {} '{}': {}",
                var_name, value, e
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults() {
        let cfg = ConnectionConfig::new();
        assert_eq!(cfg.port, None);
        assert_eq!(cfg.port_or_default(), 8443);
        assert_eq!(cfg.version, "91");
        assert_eq!(cfg.interval_or_default(), Duration::from_secs(5));
        assert_eq!(cfg.retries, 200);
        assert_eq!(cfg.timeout_or_default(), Duration::from_secs(120));
        assert!(cfg.verify_or_default());
    }

    #[test]
    fn missing_credentials() {
        let cfg = ConnectionConfig::new().server_ip("10.0.0.1");
        assert!(matches!(
            cfg.validate(),
            Err(U4vError::MissingConfiguration(_))
        ));
    }

    #[test]
    fn env_lookup() {
        let mut vars = HashMap::new();
        vars.insert(USERNAME_VAR_NAME, "smc");
        vars.insert(PASSWORD_VAR_NAME, "secret");
        vars.insert(SERVER_IP_VAR_NAME, "10.0.0.1");
        vars.insert(PORT_VAR_NAME, "8444");
        vars.insert(VERIFY_VAR_NAME, "/etc/pki/unisphere.pem");
        vars.insert(INTERVAL_VAR_NAME, "2s");
        vars.insert(TIMEOUT_VAR_NAME, "1m");
        let cfg = ConnectionConfig::new()
            .username("admin")
            .from_lookup(|k| vars.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(cfg.username.as_deref(), Some("admin"));
        assert_eq!(cfg.password.as_deref(), Some("secret"));
        assert_eq!(cfg.port_or_default(), 8444);
        assert!(cfg.verify_or_default());
        assert_eq!(
            cfg.ca_cert_path.as_deref(),
            Some("/etc/pki/unisphere.pem")
        );
        assert_eq!(cfg.interval_or_default(), Duration::from_secs(2));
        assert_eq!(cfg.timeout_or_default(), Duration::from_secs(60));
        cfg.validate().unwrap();
    }

    #[test]
    fn env_keeps_explicit_values() {
        let mut vars = HashMap::new();
        vars.insert(PORT_VAR_NAME, "8443");
        vars.insert(VERIFY_VAR_NAME, "true");
        vars.insert(INTERVAL_VAR_NAME, "30s");
        vars.insert(TIMEOUT_VAR_NAME, "10m");
        let cfg = ConnectionConfig::new()
            .port(9000)
            .verify(false)
            .interval(Duration::from_millis(100))
            .timeout(Duration::from_secs(7))
            .from_lookup(|k| vars.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(cfg.port_or_default(), 9000);
        assert!(!cfg.verify_or_default());
        assert_eq!(cfg.interval_or_default(), Duration::from_millis(100));
        assert_eq!(cfg.timeout_or_default(), Duration::from_secs(7));

        let cfg = ConnectionConfig::new()
            .ca_cert_path("/etc/pki/mine.pem")
            .from_lookup(|k| {
                if k == VERIFY_VAR_NAME {
                    Some("false".to_string())
                } else {
                    None
                }
            })
            .unwrap();
        assert!(cfg.verify_or_default());
        assert_eq!(cfg.ca_cert_path.as_deref(), Some("/etc/pki/mine.pem"));
    }

    #[test]
    fn env_bad_duration() {
        let r = ConnectionConfig::new()
            .from_lookup(|k| {
                if k == INTERVAL_VAR_NAME {
                    Some("soon".to_string())
                } else {
                    None
                }
            });
        assert!(matches!(r, Err(U4vError::InvalidInput(_))));
    }

    #[test]
    fn base_url_from_ip() {
        let cfg = ConnectionConfig::new().server_ip("10.0.0.1").port(8443);
        assert_eq!(
            cfg.resolved_base_url().unwrap(),
            "https://10.0.0.1:8443/univmax/restapi"
        );
        let cfg = ConnectionConfig::new().server_ip("fe80::1");
        assert_eq!(
            cfg.resolved_base_url().unwrap(),
            "https://[fe80::1]:8443/univmax/restapi"
        );
    }
}
