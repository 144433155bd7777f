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
use std::time::Duration;

use tracing::{debug, warn};

use super::clone::Clones;
use super::common::Common;
use super::config::{ConnectionConfig, UNISPHERE_VERSION};
use super::enhanced::Enhanced;
use super::error::*;
use super::metro_dr::MetroDr;
use super::migration::Migration;
use super::performance::Performance;
use super::provisioning::Provisioning;
use super::real_time::RealTime;
use super::replication::Replication;
use super::rest::RestTransport;
use super::settings::Settings;
use super::snapshot_policy::SnapshotPolicy;
use super::system::System;
use super::wlp::Wlp;

/// Represent the connection to Unisphere.
pub struct Client {
    common: Common,
    array_id: Option<String>,
    remote_array: Option<String>,
}

impl Client {
    /// Connect to Unisphere and check its version.
    ///
    /// No request is sent until the version check, which needs valid
    /// credentials.
    ///
    /// # Errors
    ///
    ///  * [`U4vError::MissingConfiguration`][1] when the username,
    ///    password or server is not set.
    ///  * [`U4vError::UnsupportedVersion`][2] when Unisphere is older than
    ///    9.1.
    ///
    /// [1]: enum.U4vError.html#variant.MissingConfiguration
    /// [2]: enum.U4vError.html#variant.UnsupportedVersion
    pub fn new(cfg: &ConnectionConfig) -> Result<Client> {
        cfg.validate()?;
        if cfg.array_id.is_none() {
            warn!(
                "No array id specified. Please set array ID using \
                 Client::set_array_id()."
            );
        }
        let tp = RestTransport::new(cfg)?;
        let common = Common::new(
            tp,
            &cfg.version,
            cfg.interval_or_default(),
            cfg.retries,
        );
        let client = Client {
            common,
            array_id: cfg.array_id.clone(),
            remote_array: cfg.remote_array.clone(),
        };
        client.validate_unisphere()?;
        Ok(client)
    }

    /// Check that Unisphere is at least 9.1.
    pub fn validate_unisphere(&self) -> Result<()> {
        let (uni_ver, major_ver) = self.common.get_uni_version()?;
        check_unisphere_version(&uni_ver, &major_ver)?;
        debug!(
            "Unisphere version {} passes minimum requirement check.",
            uni_ver
        );
        Ok(())
    }

    /// Array used by the facades created after this call.
    pub fn set_array_id(&mut self, array_id: &str) {
        self.array_id = Some(array_id.to_string());
    }

    pub fn array_id(&self) -> Option<&str> {
        self.array_id.as_ref().map(|a| a.as_str())
    }

    pub fn set_remote_array(&mut self, remote_array: &str) {
        self.remote_array = Some(remote_array.to_string());
    }

    pub fn remote_array(&self) -> Option<&str> {
        self.remote_array.as_ref().map(|a| a.as_str())
    }

    /// Timeout of every following request.
    pub fn set_requests_timeout(&self, timeout: Duration) {
        self.common.tp.set_timeout(timeout);
    }

    pub fn requests_timeout(&self) -> Duration {
        self.common.tp.timeout()
    }

    /// Drop the HTTP session, the next request opens a new one.
    pub fn close_session(&self) {
        self.common.tp.close_session();
    }

    /// Raw REST helpers, for endpoints without a dedicated method.
    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn provisioning(&self) -> Provisioning {
        Provisioning::new(&self.common, self.array_id())
    }

    pub fn replication(&self) -> Replication {
        Replication::new(&self.common, self.array_id())
    }

    pub fn metro_dr(&self) -> MetroDr {
        MetroDr::new(&self.common, self.array_id())
    }

    pub fn snapshot_policy(&self) -> SnapshotPolicy {
        SnapshotPolicy::new(&self.common, self.array_id())
    }

    pub fn clones(&self) -> Clones {
        Clones::new(&self.common, self.array_id())
    }

    pub fn migration(&self) -> Migration {
        Migration::new(&self.common, self.array_id())
    }

    pub fn system(&self) -> System {
        System::new(&self.common, self.array_id())
    }

    pub fn settings(&self) -> Settings {
        Settings::new(&self.common, self.array_id())
    }

    pub fn performance(&self) -> Performance {
        Performance::new(&self.common, self.array_id())
    }

    pub fn real_time(&self) -> RealTime {
        RealTime::new(&self.common, self.array_id())
    }

    pub fn wlp(&self) -> Wlp {
        Wlp::new(&self.common, self.array_id())
    }

    /// Enhanced API, served under its own version prefix.
    pub fn enhanced(&self) -> Enhanced {
        Enhanced::new(&self.common, self.array_id())
    }
}

// `major_ver` is the major and minor digits, e.g. `91` of `V9.1.0.5`.
fn check_unisphere_version(uni_ver: &str, major_ver: &str) -> Result<()> {
    let major: u32 = major_ver.parse().map_err(|_| {
        U4vError::VolumeBackendApi(format!(
            "Unable to parse Unisphere version '{}'",
            uni_ver
        ))
    })?;
    let minimum: u32 = UNISPHERE_VERSION.parse().unwrap_or(91);
    if major < minimum {
        return Err(U4vError::UnsupportedVersion(format!(
            "Unisphere version {} does not meet the minimum requirement \
             of v9.1.0.x. Please upgrade your version of Unisphere to \
             use this SDK.",
            uni_ver
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unisphere_version_minimum() {
        assert!(check_unisphere_version("V9.1.0.5", "91").is_ok());
        assert!(check_unisphere_version("V10.0.0.1", "100").is_ok());
        assert!(matches!(
            check_unisphere_version("V9.0.2.7", "90"),
            Err(U4vError::UnsupportedVersion(_))
        ));
        assert!(matches!(
            check_unisphere_version("garbage", ""),
            Err(U4vError::VolumeBackendApi(_))
        ));
    }
}
