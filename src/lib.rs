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

//! # univmax
//!
//! `univmax` is a client of the Unisphere for PowerMax REST API, letting
//! programs manage PowerMax and VMAX arrays:
//!
//!  * Provision storage groups, volumes, hosts, port groups and masking
//!    views.
//!
//!  * Protect storage groups with SnapVX snapshots, snapshot policies,
//!    clones, SRDF and MetroDR.
//!
//!  * Migrate storage groups between arrays.
//!
//!  * Collect diagnostic and real time performance data.
//!
//!  * Manage alerting, access control and system health.
//!
//!  * Select and filter storage objects through the enhanced API.
//!
//! To use `univmax`, you need:
//!
//!  * Unisphere for PowerMax 9.1 or newer.
//!
//!  * Fill a [`ConnectionConfig`][1], by hand or from `UNIVMAX_*`
//!    environment variables.
//!
//!  * Connect with [`univmax::Client`][2].
//!
//!  * Invoke methods of the facades returned by the client, such as
//!    [`Client::provisioning()`][3].
//!
//! Asynchronous requests answered with status 202 are polled until the
//! job finishes, see [`Common::wait_for_job()`][4].
//!
//! # Example code
//!
//! ```no_run
//! extern crate univmax;
//! use univmax::{Client, ConnectionConfig, U4vError};
//! fn main() {
//!     let cfg = ConnectionConfig::new()
//!         .username("smc")
//!         .password("smc")
//!         .server_ip("10.0.0.1")
//!         .array_id("000197800123");
//!     let client = match Client::new(&cfg) {
//!         Ok(i) => i,
//!         Err(e) => {
//!             match e {
//!                 // Error handling goes here
//!                 U4vError::UnsupportedVersion(_) =>
//!                     panic!("Please upgrade Unisphere"),
//!                 _ => panic!("{}", e),
//!             };
//!         }
//!     };
//!     let sgs = match client.provisioning().get_storage_group_list(None) {
//!         Ok(i) => i,
//!         Err(e) => panic!("{}", e), // Please use error handling as above.
//!     };
//!     for sg in sgs {
//!         println!("Got storage group: {}", sg);
//!     }
//! }
//! ```
//!
//! [1]: struct.ConnectionConfig.html
//! [2]: struct.Client.html
//! [3]: struct.Client.html#method.provisioning
//! [4]: struct.Common.html#method.wait_for_job

extern crate chrono;
extern crate humantime;
extern crate regex;
extern crate reqwest;
extern crate serde;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate serde_json;
extern crate tracing;
extern crate url;

pub use self::client::Client;
pub use self::clone::{CloneFlags, CloneTargetFilters, Clones};
pub use self::common::{Common, Job, JobOutcome, ResourcePath};
pub use self::config::ConnectionConfig;
pub use self::data::*;
pub use self::enhanced::{Enhanced, DEFAULT_EXCLUDE, ENHANCED_API_VERSION};
pub use self::error::{Result, U4vError};
pub use self::metro_dr::{MetroDr, MetroDrOptions};
pub use self::migration::Migration;
pub use self::misc::{
    check_epoch_timestamp, check_ipv4, check_ipv6, check_timestamp,
    convert_to_snake_case, is_valid_iqn, is_valid_wwn, verify_initiator_id,
};
pub use self::performance::{Performance, PerformanceStats};
pub use self::provisioning::{
    DirectorPort, HostEdit, HostGroupEdit, InitiatorEdit, PortGroupEdit,
    Provisioning, RemoteStorageGroups, StorageGroupCreate,
};
pub use self::real_time::{
    format_metrics, RealTime, RealTimeStats, RT_ARRAY, RT_BE_DIRECTOR,
    RT_BE_PORT, RT_EXTERNAL_DIRECTOR, RT_FE_DIRECTOR, RT_FE_PORT,
    RT_RDF_DIRECTOR, RT_RDF_PORT, RT_STORAGE_GROUP,
};
pub use self::replication::{
    ExpiredSnapshot, RdfGroupEdit, RdfPairState, Replication, SnapshotEdit,
    VolumeReplicationSession,
};
pub use self::settings::{AlertTargets, AuthorizationRule, ScopedRole, Settings};
pub use self::snapshot_policy::{
    ComplianceWindow, NewSnapshotPolicy, SnapshotPolicy,
    SnapshotPolicyProperties, TimeBound,
};
pub use self::system::{System, TagFilters};
pub use self::wlp::Wlp;

mod client;
mod clone;
mod common;
mod config;
mod data;
mod enhanced;
mod error;
mod metro_dr;
mod migration;
mod misc;
mod performance;
mod provisioning;
mod real_time;
mod replication;
mod rest;
mod settings;
mod snapshot_policy;
mod system;
mod wlp;
