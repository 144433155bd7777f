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

extern crate httpmock;
extern crate rand;
#[macro_use]
extern crate serde_json;
extern crate univmax;

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use httpmock::prelude::*;
use rand::distributions::Alphanumeric;
use rand::Rng;
use univmax::{
    AuthorizationRule, Client, CloneFlags, ConnectionConfig, DataFormat,
    HostEdit, MetroDrAction, MetroDrOptions, Metrics, PerformanceCategory,
    SrdfAction, StorageGroupCreate, StorageObject, U4vError, VolumeSize,
};

static ARRAY_ID: &'static str = "000197800123";

fn mock_version(server: &MockServer, version: &str) {
    server.mock(|when, then| {
        when.method(GET).path("/version");
        then.status(200).json_body(json!({ "version": version }));
    });
}

fn make_config(server: &MockServer) -> ConnectionConfig {
    ConnectionConfig::new()
        .username("smc")
        .password("smc")
        .base_url(&server.base_url())
        .array_id(ARRAY_ID)
        .interval(Duration::from_millis(1))
        .retries(3)
}

fn make_connection(server: &MockServer) -> Client {
    mock_version(server, "V9.1.0.5");
    Client::new(&make_config(server)).unwrap()
}

fn random_string(prefix: &str) -> String {
    let rand_str: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(5)
        .map(char::from)
        .collect();
    format!("{}{}", prefix, rand_str)
}

fn sg_uri(sg_name: &str) -> String {
    format!(
        "/91/sloprovisioning/symmetrix/{}/storagegroup/{}",
        ARRAY_ID, sg_name
    )
}

#[test]
fn connect() {
    let server = MockServer::start();
    let c = make_connection(&server);
    assert_eq!(c.array_id(), Some(ARRAY_ID));
    let (ver, major) = c.common().get_uni_version().unwrap();
    println!("Unisphere version {}, major {}", ver, major);
    assert_eq!(ver, "V9.1.0.5");
    assert_eq!(major, "91");
}

#[test]
fn connect_missing_credentials() {
    let cfg = ConnectionConfig::new().server_ip("10.0.0.1");
    match Client::new(&cfg) {
        Err(U4vError::MissingConfiguration(_)) => (),
        Err(e) => panic!("Unexpected error {}", e),
        Ok(_) => panic!("Connected without credentials"),
    }
}

#[test]
fn connect_old_unisphere() {
    let server = MockServer::start();
    mock_version(&server, "V9.0.1.6");
    match Client::new(&make_config(&server)) {
        Err(U4vError::UnsupportedVersion(msg)) => {
            println!("{}", msg);
            assert!(msg.contains("V9.0.1.6"));
        }
        Err(e) => panic!("Unexpected error {}", e),
        Ok(_) => panic!("Accepted Unisphere 9.0"),
    }
}

#[test]
fn connect_bad_credentials() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/version");
        then.status(401);
    });
    match Client::new(&make_config(&server)) {
        Err(U4vError::UnauthorizedRequest(_)) => (),
        Err(e) => panic!("Unexpected error {}", e),
        Ok(_) => panic!("Connected with bad credentials"),
    }
}

#[test]
fn requests_timeout() {
    let server = MockServer::start();
    let c = make_connection(&server);
    c.set_requests_timeout(Duration::from_secs(5));
    assert_eq!(c.requests_timeout(), Duration::from_secs(5));
    c.close_session();
    // A new session is opened on demand.
    c.common().get_uni_version().unwrap();
}

#[test]
fn host_list_with_filters() {
    let server = MockServer::start();
    let c = make_connection(&server);
    let m = server.mock(|when, then| {
        when.method(GET)
            .path(format!("/91/sloprovisioning/symmetrix/{}/host", ARRAY_ID))
            .query_param("num_of_initiators", "2");
        then.status(200)
            .json_body(json!({"hostId": ["host_a", "host_b"]}));
    });
    let hosts = c
        .provisioning()
        .get_host_list(Some(&json!({"num_of_initiators": 2})))
        .unwrap();
    m.assert();
    assert_eq!(hosts, vec!["host_a".to_string(), "host_b".to_string()]);
}

#[test]
fn host_not_found() {
    let server = MockServer::start();
    let c = make_connection(&server);
    server.mock(|when, then| {
        when.method(GET).path(format!(
            "/91/sloprovisioning/symmetrix/{}/host/no_such_host",
            ARRAY_ID
        ));
        then.status(404)
            .json_body(json!({"message": "Cannot find host"}));
    });
    match c.provisioning().get_host("no_such_host") {
        Err(U4vError::ResourceNotFound(msg)) => {
            println!("{}", msg);
            assert!(msg.contains("404"));
        }
        Err(e) => panic!("Unexpected error {}", e),
        Ok(_) => panic!("Found a missing host"),
    }
}

#[test]
fn modify_host_without_change() {
    let server = MockServer::start();
    let c = make_connection(&server);
    match c
        .provisioning()
        .modify_host("host_a", &HostEdit::AddInitiators(Vec::new()))
    {
        Err(U4vError::InvalidInput(_)) => (),
        Err(e) => panic!("Unexpected error {}", e),
        Ok(_) => panic!("Sent an empty host modification"),
    }
}

#[test]
fn missing_array_id() {
    let server = MockServer::start();
    mock_version(&server, "V9.2.1.1");
    let mut cfg = make_config(&server);
    cfg.array_id = None;
    let mut c = Client::new(&cfg).unwrap();
    match c.provisioning().get_host_list(None) {
        Err(U4vError::InvalidInput(_)) => (),
        Err(e) => panic!("Unexpected error {}", e),
        Ok(_) => panic!("Queried hosts without array id"),
    }
    c.set_array_id(ARRAY_ID);
    assert_eq!(c.provisioning().array_id().unwrap(), ARRAY_ID);
    assert_eq!(
        c.provisioning().with_array("000197800456").array_id().unwrap(),
        "000197800456"
    );
}

#[test]
fn create_storage_group_async() {
    let server = MockServer::start();
    let c = make_connection(&server);
    let sg_name = random_string("rust_sg_");
    let create = server.mock(|when, then| {
        when.method(POST)
            .path(format!(
                "/91/sloprovisioning/symmetrix/{}/storagegroup",
                ARRAY_ID
            ))
            .body_contains("ASYNCHRONOUS");
        then.status(202)
            .json_body(json!({"jobId": "1588", "status": "RUNNING"}));
    });
    let job = server.mock(|when, then| {
        when.method(GET).path("/91/system/job/1588");
        then.status(200).json_body(json!({
            "jobId": "1588",
            "status": "SUCCEEDED",
            "result": "Succeeded",
            "task": [],
        }));
    });
    let sg_name_clone = sg_name.clone();
    let get = server.mock(|when, then| {
        when.method(GET).path(sg_uri(&sg_name_clone));
        then.status(200).json_body(json!({
            "storageGroupId": sg_name_clone,
            "num_of_vols": 2,
        }));
    });
    let mut args = StorageGroupCreate::new(&sg_name);
    args.srp_id = Some("SRP_1".to_string());
    args.service_level = Some("Diamond".to_string());
    args.num_vols = 2;
    args.vol_size = "1GB".parse::<VolumeSize>().unwrap();
    args.is_async = true;
    let sg = c.provisioning().create_storage_group(&args).unwrap();
    println!("Created storage group {}", sg);
    create.assert();
    job.assert();
    get.assert();
    assert_eq!(sg["storageGroupId"], json!(sg_name));
}

#[test]
fn job_failure() {
    let server = MockServer::start();
    let c = make_connection(&server);
    server.mock(|when, then| {
        when.method(POST).path(format!(
            "/91/sloprovisioning/symmetrix/{}/storagegroup",
            ARRAY_ID
        ));
        then.status(202)
            .json_body(json!({"jobId": "1589", "status": "SCHEDULED"}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/91/system/job/1589");
        then.status(200).json_body(json!({
            "jobId": "1589",
            "status": "FAILED",
            "result": "Storage group already exists",
        }));
    });
    let mut args = StorageGroupCreate::new("rust_sg_dup");
    args.is_async = true;
    match c.provisioning().create_storage_group(&args) {
        Err(U4vError::VolumeBackendApi(msg)) => {
            println!("{}", msg);
            assert!(msg.contains("Storage group already exists"));
        }
        Err(e) => panic!("Unexpected error {}", e),
        Ok(_) => panic!("Failed job reported as success"),
    }
}

#[test]
fn job_retries_exhausted() {
    let server = MockServer::start();
    let c = make_connection(&server);
    let (resp, sc) = (json!({"jobId": "1590", "status": "RUNNING"}), 202);
    let job = server.mock(|when, then| {
        when.method(GET).path("/91/system/job/1590");
        then.status(200)
            .json_body(json!({"jobId": "1590", "status": "RUNNING"}));
    });
    assert!(c.common().wait_for_job("test job", sc, &resp).is_err());
    // One poll per retry plus the final one.
    assert_eq!(job.hits(), 4);
    assert_eq!(c.common().wait_for_job("sync", 200, &resp).unwrap(), None);
}

#[test]
fn iterator_pages() {
    let server = MockServer::start();
    let c = make_connection(&server);
    let page = server.mock(|when, then| {
        when.method(GET)
            .path("/common/Iterator/it-1/page")
            .query_param("from", "3")
            .query_param("to", "3");
        then.status(200).json_body(json!({"result": [{"volumeId": "0003C"}]}));
    });
    let first = json!({
        "id": "it-1",
        "count": 3,
        "maxPageSize": 2,
        "resultList": {
            "result": [{"volumeId": "0003A"}, {"volumeId": "0003B"}],
        },
    });
    let all = c.common().get_iterator_results(&first).unwrap();
    page.assert();
    assert_eq!(all.len(), 3);
    assert_eq!(all[2]["volumeId"], json!("0003C"));
}

#[test]
fn create_snapshot() {
    let server = MockServer::start();
    let c = make_connection(&server);
    let m = server.mock(|when, then| {
        when.method(POST)
            .path(format!(
                "/91/replication/symmetrix/{}/storagegroup/rust_sg/snapshot",
                ARRAY_ID
            ))
            .json_body(json!({"snapshotName": "snap_1", "timeToLive": 2}));
        then.status(200).json_body(json!({"name": "snap_1"}));
    });
    let snap = c
        .replication()
        .create_storage_group_snapshot(
            "rust_sg",
            "snap_1",
            Some(2),
            false,
            false,
        )
        .unwrap();
    m.assert();
    assert_eq!(snap["name"], json!("snap_1"));
}

#[test]
fn authorization_rule_roles() {
    let server = MockServer::start();
    let c = make_connection(&server);
    let too_many = AuthorizationRule::new(
        "rust_user",
        &["Auditor", "Monitor", "PerfMonitor", "StorageAdmin", "SecurityAdmin"],
    );
    match c.settings().create_authorization_rule(&too_many) {
        Err(U4vError::InvalidInput(_)) => (),
        Err(e) => panic!("Unexpected error {}", e),
        Ok(_) => panic!("Accepted more than 4 roles"),
    }
    let m = server.mock(|when, then| {
        when.method(POST).path(format!(
            "/91/settings/symmetrix/{}/access_control/authorization_rule",
            ARRAY_ID
        ));
        then.status(201).json_body(json!({"success": true}));
    });
    let rule = AuthorizationRule::new("rust_user", &["Monitor"]);
    c.settings().create_authorization_rule(&rule).unwrap();
    m.assert();
}

#[test]
fn performance_registration() {
    let server = MockServer::start();
    let c = make_connection(&server);
    server.mock(|when, then| {
        when.method(GET).path(format!(
            "/performance/Array/registrationdetails/{}",
            ARRAY_ID
        ));
        then.status(200).json_body(json!({
            "registrationDetailsInfo": [
                {"symmetrixId": ARRAY_ID, "realtime": true, "diagnostic": true},
            ],
        }));
    });
    assert!(c.performance().is_array_performance_registered().unwrap());
}

#[test]
fn migration_capabilities() {
    let server = MockServer::start();
    let c = make_connection(&server);
    server.mock(|when, then| {
        when.method(GET).path("/91/migration/capabilities/symmetrix");
        then.status(200).json_body(json!({
            "storageArrayCapability": [
                {"arrayId": "000197800456", "srdfsTarget": false},
                {"arrayId": ARRAY_ID, "srdfsTarget": true},
            ],
        }));
    });
    let cap = c.migration().get_array_migration_capabilities().unwrap();
    assert_eq!(cap["srdfsTarget"], json!(true));
    let other = c
        .migration()
        .with_array("000197800789")
        .get_array_migration_capabilities()
        .unwrap();
    assert_eq!(other, json!({}));
}

#[test]
fn wlp_headroom() {
    let server = MockServer::start();
    let c = make_connection(&server);
    let m = server.mock(|when, then| {
        when.method(GET)
            .path(format!("/91/wlp/symmetrix/{}/headroom", ARRAY_ID))
            .query_param("srp", "SRP_1")
            .query_param("slo", "Diamond")
            .query_param("workloadtype", "OLTP");
        then.status(200).json_body(json!({
            "gbHeadroom": [{"headroom": [{"capacity": 512.0}]}],
        }));
    });
    let headroom = c.wlp().get_headroom("OLTP", "SRP_1", "Diamond").unwrap();
    m.assert();
    assert_eq!(headroom.len(), 1);
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_millis() as u64
}

fn clone_uri(sg_name: &str) -> String {
    format!(
        "/91/replication/symmetrix/{}/storagegroup/{}/clone/storagegroup",
        ARRAY_ID, sg_name
    )
}

#[test]
fn create_clone() {
    let server = MockServer::start();
    let c = make_connection(&server);
    let m = server.mock(|when, then| {
        when.method(POST).path(clone_uri("sg_src")).json_body(json!({
            "target_storage_group_name": "sg_tgt",
            "establish_terminate": true,
            "consistent": true,
            "force": true,
            "star": false,
            "skip": true,
        }));
        then.status(200).json_body(json!({"storageGroupId": "sg_src"}));
    });
    let flags = CloneFlags {
        force: true,
        skip: true,
        ..Default::default()
    };
    let resp = c.clones().create_clone("sg_src", "sg_tgt", &flags).unwrap();
    m.assert();
    assert_eq!(resp["storageGroupId"], "sg_src");
}

#[test]
fn terminate_clone() {
    let server = MockServer::start();
    let c = make_connection(&server);
    let m = server.mock(|when, then| {
        when.method(DELETE)
            .path(clone_uri("sg_src"))
            .query_param("target_storage_group_name", "sg_tgt")
            .query_param("force", "false")
            .query_param("star", "false")
            .query_param("skip", "false")
            .query_param("symforce", "true")
            .query_param("not_ready", "true")
            .matches(|req: &HttpMockRequest| {
                let no_restored = match req.query_params {
                    Some(ref q) => !q.iter().any(|(k, _)| k == "restored"),
                    None => true,
                };
                let no_body = match req.body {
                    Some(ref b) => b.is_empty(),
                    None => true,
                };
                no_restored && no_body
            });
        then.status(204);
    });
    let flags = CloneFlags {
        symforce: true,
        not_ready: true,
        ..Default::default()
    };
    c.clones()
        .terminate_clone("sg_src", Some("sg_tgt"), &flags)
        .unwrap();
    m.assert();
}

#[test]
fn modify_storage_group_srdf() {
    let server = MockServer::start();
    let c = make_connection(&server);
    let m = server.mock(|when, then| {
        when.method(PUT)
            .path(format!(
                "/91/replication/symmetrix/{}/storagegroup/sg_1/rdf_group/12",
                ARRAY_ID
            ))
            .json_body(json!({
                "action": "Establish",
                "executionOption": "ASYNCHRONOUS",
                "establish": {"force": true},
            }));
        then.status(200).json_body(json!({"storageGroupName": "sg_1"}));
    });
    let resp = c
        .replication()
        .modify_storage_group_srdf(
            "sg_1",
            SrdfAction::Establish,
            12,
            Some(&json!({"establish": {"force": true}})),
            true,
        )
        .unwrap();
    m.assert();
    assert_eq!(resp["storageGroupName"], "sg_1");
}

#[test]
fn metrodr_modify_and_delete() {
    let server = MockServer::start();
    let c = make_connection(&server);
    let env_uri =
        format!("/91/replication/symmetrix/{}/metrodr/metro_env", ARRAY_ID);
    let modify = server.mock(|when, then| {
        when.method(PUT).path(env_uri.as_str()).json_body(json!({
            "action": "Suspend",
            "suspend_param": {
                "metro": true,
                "force": false,
                "keep_r2": true,
                "dr": false,
                "symforce": false,
            },
        }));
        then.status(200).json_body(json!({"name": "metro_env"}));
    });
    let delete = server.mock(|when, then| {
        when.method(DELETE)
            .path(env_uri.as_str())
            .query_param("remove_r1_dr_rdfg", "true")
            .query_param("force", "true");
        then.status(204);
    });
    let opts = MetroDrOptions {
        metro: true,
        keep_r2: true,
        ..Default::default()
    };
    let resp = c
        .metro_dr()
        .modify_metrodr_environment(
            "metro_env",
            MetroDrAction::Suspend,
            &opts,
            false,
        )
        .unwrap();
    assert_eq!(resp["name"], "metro_env");
    c.metro_dr()
        .delete_metrodr_environment("metro_env", true, true)
        .unwrap();
    modify.assert();
    delete.assert();
}

#[test]
fn performance_stats() {
    let server = MockServer::start();
    let c = make_connection(&server);
    let m = server.mock(|when, then| {
        when.method(POST)
            .path("/performance/StorageGroup/metrics")
            .json_body(json!({
                "storageGroupId": "sg_1",
                "startDate": 1600000000000u64,
                "endDate": 1600000300000u64,
                "symmetrixId": ARRAY_ID,
                "dataFormat": "Average",
                "metrics": ["HostIOs"],
            }));
        then.status(200).json_body(json!({
            "resultList": {
                "result": [{"HostIOs": 12.5, "timestamp": 1600000300000u64}],
            },
            "count": 1,
            "maxPageSize": 1000,
            "id": "it_1",
        }));
    });
    let mut perf = c.performance();
    let stats = perf
        .get_performance_stats(
            PerformanceCategory::StorageGroup,
            Some(&json!({"storageGroupId": "sg_1"})),
            &Metrics::List(vec!["HostIOs".to_string()]),
            DataFormat::Average,
            Some(1600000000000),
            Some(1600000300000),
            None,
        )
        .unwrap();
    m.assert();
    println!("Got stats: {:?}", stats);
    assert_eq!(stats.reporting_level, "storage_group");
    assert_eq!(stats.ids["storage_group_id"], "sg_1");
    assert_eq!(stats.result.len(), 1);
    assert_eq!(stats.timestamp, 1600000300000);
    assert_eq!(perf.timestamp(), Some(1600000300000));
}

#[test]
fn real_time_performance_data() {
    let server = MockServer::start();
    let c = make_connection(&server);
    let help = format!("/performance/realtime/help/{}", ARRAY_ID);
    server.mock(|when, then| {
        when.method(GET).path(format!("{}/categories", help));
        then.status(200).json_body(json!({
            "categoryName": ["Array", "StorageGroup"],
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path(format!("{}/StorageGroup/metrics", help));
        then.status(200).json_body(json!({
            "metricName": ["HostIOs", "HostMBs"],
        }));
    });
    server.mock(|when, then| {
        when.method(POST).path("/performance/realtime/keys").json_body(json!({
            "symmetrixId": ARRAY_ID,
            "category": "StorageGroup",
        }));
        then.status(200).json_body(json!({"keys": ["sg_1", "sg_2"]}));
    });
    let end = now_millis() - 10 * 60 * 1000;
    let start = end - 5 * 60 * 1000;
    let m = server.mock(|when, then| {
        when.method(POST).path("/performance/realtime/metrics").json_body(
            json!({
                "symmetrixId": ARRAY_ID,
                "startDate": start,
                "endDate": end,
                "category": "StorageGroup",
                "metrics": ["HostIOs"],
                "instanceId": "sg_1",
            }),
        );
        then.status(200).json_body(json!({
            "resultList": {"result": [{"HostIOs": 3.0, "timestamp": end}]},
            "count": 1,
            "maxPageSize": 1000,
            "id": "it_2",
        }));
    });
    let stats = c
        .real_time()
        .get_performance_data(
            start,
            end,
            "StorageGroup",
            &Metrics::List(vec!["HostIOs".to_string()]),
            Some("sg_1"),
        )
        .unwrap()
        .unwrap();
    m.assert();
    assert_eq!(stats.reporting_level, "storage_group");
    assert_eq!(stats.instance_id.as_ref().map(|s| s.as_str()), Some("sg_1"));
    assert_eq!(stats.result[0]["HostIOs"], json!(3.0));

    match c.real_time().get_performance_data(
        start,
        end,
        "StorageGroup",
        &Metrics::List(vec!["HostIOs".to_string()]),
        Some("sg_9"),
    ) {
        Ok(_) => panic!("Unknown instance id was accepted"),
        Err(U4vError::InvalidInput(msg)) => println!("Expected: {}", msg),
        Err(e) => panic!("Unexpected error: {}", e),
    };
    assert_eq!(m.hits(), 1);
}

#[test]
fn enhanced_storage_group_details() {
    let server = MockServer::start();
    let c = make_connection(&server);
    let meta = server.mock(|when, then| {
        when.method(GET).path("/v1/systems/storage-groups/metadata");
        then.status(200).json_body(json!([
            {"name": "id", "type": "string"},
            {"name": "num_of_volumes", "type": "integer"},
            {"name": "rdf_infos", "type": "array"},
            {"name": "snapshots", "type": "array"},
        ]));
    });
    let details = server.mock(|when, then| {
        when.method(GET)
            .path(format!("/v1/systems/{}/storage-groups", ARRAY_ID))
            .query_param("select", "id,num_of_volumes")
            .query_param("filter", "num_of_volumes eq 32");
        then.status(200).json_body(json!({
            "storage_groups": [{"id": "sg_1", "num_of_volumes": 32}],
        }));
    });
    let resp = c
        .enhanced()
        .get_storage_groups_details(&["num_of_volumes eq 32"], None, None)
        .unwrap();
    meta.assert();
    details.assert();
    assert_eq!(resp["storage_groups"][0]["id"], "sg_1");
}

#[test]
fn enhanced_explicit_selection() {
    let server = MockServer::start();
    let c = make_connection(&server);
    let meta = server.mock(|when, then| {
        when.method(GET).path("/v1/systems/volumes/metadata");
        then.status(200).json_body(json!([]));
    });
    let details = server.mock(|when, then| {
        when.method(GET)
            .path(format!("/v1/systems/{}/volumes", ARRAY_ID))
            .query_param("select", "wwn,snapshots.name")
            .matches(|req: &HttpMockRequest| match req.query_params {
                Some(ref q) => !q.iter().any(|(k, _)| k == "filter"),
                None => false,
            });
        then.status(200).json_body(json!({"volumes": []}));
    });
    c.enhanced()
        .get_storage_object_details(
            StorageObject::Volumes,
            &[],
            Some(&["wwn", "snapshots.name"][..]),
            None,
        )
        .unwrap();
    details.assert();
    assert_eq!(meta.hits(), 0);
}

#[test]
fn enhanced_performance_categories() {
    let server = MockServer::start();
    let c = make_connection(&server);
    let base = format!("/v1/systems/{}/performance-categories", ARRAY_ID);
    server.mock(|when, then| {
        when.method(GET).path(base.as_str());
        then.status(200).json_body(json!({
            "performance_categories": [
                {"id": "Array", "metrics": ["HostIOs"]},
                {"id": "StorageGroup", "metrics": ["HostIOs"]},
            ],
        }));
    });
    let array = server.mock(|when, then| {
        when.method(GET).path(format!("{}/Array", base));
        then.status(200).json_body(json!({"id": "Array", "HostIOs": 10.0}));
    });
    let mut sg = server.mock(|when, then| {
        when.method(GET).path(format!("{}/StorageGroup", base));
        then.status(200).json_body(json!({"id": "StorageGroup"}));
    });
    let all = c.enhanced().get_all_performance_metrics_for_system().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0]["HostIOs"], json!(10.0));
    array.assert();
    sg.assert();
    sg.delete();

    let filtered = server.mock(|when, then| {
        when.method(GET)
            .path(format!("{}/StorageGroup", base))
            .query_param("filter", "id eq sg_1,time_range eq 2");
        then.status(200).json_body(json!({"id": "StorageGroup", "n": 1}));
    });
    let resp = c
        .enhanced()
        .get_category_metrics(
            "StorageGroup",
            &["id eq sg_1", "time_range eq 2"],
        )
        .unwrap();
    filtered.assert();
    assert_eq!(resp["n"], 1);
}
