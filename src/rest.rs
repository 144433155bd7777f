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
use std::cell::{Cell, RefCell};
use std::error::Error as StdError;
use std::fs;
use std::io;
use std::time::Duration;

use reqwest::blocking::{Client as HttpClient, RequestBuilder};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Certificate, Method};
use serde_json::Value;
use tracing::debug;

use super::config::ConnectionConfig;
use super::error::*;

pub(crate) struct RestTransport {
    base_url: String,
    username: String,
    password: String,
    verify: bool,
    ca_cert_path: Option<String>,
    application_type: Option<String>,
    timeout: Cell<Duration>,
    session: RefCell<Option<HttpClient>>,
}

fn user_agent() -> String {
    format!(
        "univmax/{} ({}; {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

// Query string pairs out of a JSON object. Nulls are skipped and arrays
// repeat the key.
pub(crate) fn query_pairs(params: &Value) -> Vec<(String, String)> {
    let mut ret = Vec::new();
    if let Some(obj) = params.as_object() {
        for (k, v) in obj {
            match v {
                Value::Null => (),
                Value::Array(items) => {
                    for i in items {
                        if let Some(s) = query_value(i) {
                            ret.push((k.to_string(), s));
                        }
                    }
                }
                _ => {
                    if let Some(s) = query_value(v) {
                        ret.push((k.to_string(), s));
                    }
                }
            }
        }
    }
    ret
}

fn query_value(v: &Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::String(s) => Some(s.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => Some(v.to_string()),
    }
}

// rustls failures reach us as `io::ErrorKind::InvalidData` somewhere in
// the source chain of a connect error.
fn is_tls_error(e: &reqwest::Error) -> bool {
    e.is_connect() && has_invalid_data_source(e)
}

fn has_invalid_data_source(e: &(dyn StdError + 'static)) -> bool {
    let mut source = e.source();
    while let Some(s) = source {
        if let Some(io_err) = s.downcast_ref::<io::Error>() {
            if io_err.kind() == io::ErrorKind::InvalidData {
                return true;
            }
        }
        source = s.source();
    }
    false
}

impl RestTransport {
    pub(crate) fn new(cfg: &ConnectionConfig) -> Result<RestTransport> {
        let tp = RestTransport {
            base_url: cfg.resolved_base_url()?,
            username: cfg.username.clone().unwrap_or_default(),
            password: cfg.password.clone().unwrap_or_default(),
            verify: cfg.verify_or_default(),
            ca_cert_path: cfg.ca_cert_path.clone(),
            application_type: cfg.application_type.clone(),
            timeout: Cell::new(cfg.timeout_or_default()),
            session: RefCell::new(None),
        };
        tp.session.replace(Some(tp.establish_rest_session()?));
        Ok(tp)
    }

    fn establish_rest_session(&self) -> Result<HttpClient> {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let ua = HeaderValue::from_str(&user_agent()).map_err(|e| {
            U4vError::LibBug(format!("Invalid user agent: {}", e))
        })?;
        headers.insert(USER_AGENT, ua);
        if let Some(ref app_type) = self.application_type {
            let v = HeaderValue::from_str(app_type).map_err(|e| {
                U4vError::InvalidInput(format!(
                    "Invalid application type '{}': {}",
                    app_type, e
                ))
            })?;
            headers.insert("application-type", v);
        }
        let mut builder = HttpClient::builder()
            .default_headers(headers)
            .danger_accept_invalid_certs(!self.verify);
        if let Some(ref path) = self.ca_cert_path {
            let pem = fs::read(path).map_err(|e| {
                U4vError::Ssl(format!(
                    "Failed to read CA bundle '{}': {}",
                    path, e
                ))
            })?;
            let cert = Certificate::from_pem(&pem).map_err(|e| {
                U4vError::Ssl(format!(
                    "Invalid CA bundle '{}': {}",
                    path, e
                ))
            })?;
            builder = builder.add_root_certificate(cert);
        }
        Ok(builder.build()?)
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn set_timeout(&self, timeout: Duration) {
        self.timeout.set(timeout);
    }

    pub(crate) fn timeout(&self) -> Duration {
        self.timeout.get()
    }

    /// Drop pooled connections, the next request opens a new session.
    pub(crate) fn close_session(&self) {
        self.session.replace(None);
    }

    fn session(&self) -> Result<HttpClient> {
        if let Some(ref s) = *self.session.borrow() {
            return Ok(s.clone());
        }
        let s = self.establish_rest_session()?;
        self.session.replace(Some(s.clone()));
        Ok(s)
    }

    fn build_request(
        &self,
        url: &str,
        method: &Method,
        params: Option<&Value>,
        body: Option<&Value>,
        timeout: Duration,
    ) -> Result<RequestBuilder> {
        let mut req = self
            .session()?
            .request(method.clone(), url)
            .basic_auth(&self.username, Some(&self.password))
            .timeout(timeout);
        match (body, params) {
            (Some(b), _) if !b.is_null() => {
                req = req.body(serde_json::to_string_pretty(b)?);
            }
            (_, Some(p)) if !p.is_null() => {
                req = req.query(&query_pairs(p));
            }
            _ => (),
        }
        Ok(req)
    }

    /// Send one request to `{base_url}{target_uri}`.
    ///
    /// Returns the parsed JSON reply, `None` when the reply is not JSON,
    /// and the status code.
    pub(crate) fn request(
        &self,
        target_uri: &str,
        method: Method,
        params: Option<&Value>,
        body: Option<&Value>,
        timeout: Option<Duration>,
    ) -> Result<(Option<Value>, u16)> {
        let url = format!("{}{}", self.base_url, target_uri);
        let timeout = timeout.unwrap_or_else(|| self.timeout.get());
        let req =
            self.build_request(&url, &method, params, body, timeout)?;
        let resp = match req.send() {
            Ok(r) => r,
            Err(e) => return Err(self.map_send_error(&method, &url, e)),
        };
        let status_code = resp.status().as_u16();
        let text = match resp.text() {
            Ok(t) => t,
            Err(e) => return Err(self.map_send_error(&method, &url, e)),
        };
        let reply: Option<Value> = match serde_json::from_str(&text) {
            Ok(v) => Some(v),
            Err(_) => {
                debug!(
                    "No response received from API. Status code received \
                     is: {}.",
                    status_code
                );
                None
            }
        };
        debug!(
            "{} request to {} has returned with a status code of: {}.",
            method, url, status_code
        );
        Ok((reply, status_code))
    }

    fn map_send_error(
        &self,
        method: &Method,
        url: &str,
        e: reqwest::Error,
    ) -> U4vError {
        if e.is_timeout() {
            U4vError::TimeOut(format!(
                "The {} request to URL {} timed-out, but may have been \
                 successful. Please check the array. Exception received: {}.",
                method, url, e
            ))
        } else if is_tls_error(&e) {
            U4vError::Ssl(format!(
                "The connection to {} has encountered an SSL error. Please \
                 check your SSL config or supplied SSL cert. SSL Exception \
                 message: {}",
                self.base_url, e
            ))
        } else if e.is_connect() || e.is_request() || e.is_status() {
            let kind = if e.is_connect() {
                "ConnectionError"
            } else {
                "HTTPError"
            };
            U4vError::Connection(format!(
                "The {} to Unisphere server {} has experienced a {} error. \
                 Please check your Unisphere server connection and \
                 availability. Exception message: {}",
                method, self.base_url, kind, e
            ))
        } else {
            U4vError::VolumeBackendApi(format!(
                "The {} request to URL {} failed with exception: {}.",
                method, url, e
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_pairs_skip_null_and_repeat_arrays() {
        let p = json!({
            "a": "x",
            "b": null,
            "c": true,
            "d": 3,
            "e": ["1", "2"],
        });
        let pairs = query_pairs(&p);
        assert_eq!(
            pairs,
            vec![
                ("a".to_string(), "x".to_string()),
                ("c".to_string(), "true".to_string()),
                ("d".to_string(), "3".to_string()),
                ("e".to_string(), "1".to_string()),
                ("e".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn user_agent_names_crate() {
        assert!(user_agent().starts_with("univmax/"));
        assert_eq!(env!("CARGO_PKG_AUTHORS"), "The univmax Authors");
    }

    #[derive(Debug)]
    struct Wrapped(io::Error);

    impl std::fmt::Display for Wrapped {
        fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "connect failed")
        }
    }

    impl StdError for Wrapped {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn tls_failure_found_in_source_chain() {
        let tls = Wrapped(io::Error::new(
            io::ErrorKind::InvalidData,
            "received corrupt message",
        ));
        assert!(has_invalid_data_source(&tls));
        let refused = Wrapped(io::Error::new(
            io::ErrorKind::ConnectionRefused,
            "certificate mentioned but not a tls failure",
        ));
        assert!(!has_invalid_data_source(&refused));
    }
}
