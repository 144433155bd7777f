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
use std::thread::sleep;
use std::time::Duration;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, error};

use super::error::*;
use super::rest::RestTransport;

pub(crate) const SUCCEEDED: &str = "succeeded";
const INCOMPLETE_LIST: [&str; 5] =
    ["created", "scheduled", "running", "validating", "validated"];
const STATUS_202: u16 = 202;

pub(crate) const SYSTEM: &str = "system";
pub(crate) const SLOPROVISIONING: &str = "sloprovisioning";
pub(crate) const REPLICATION: &str = "replication";
pub(crate) const PERFORMANCE: &str = "performance";
pub(crate) const MIGRATION: &str = "migration";
pub(crate) const WLP: &str = "wlp";
pub(crate) const COMMON: &str = "common";
pub(crate) const SYMMETRIX: &str = "symmetrix";
pub(crate) const STORAGEGROUP: &str = "storagegroup";
const VERSION: &str = "version";
const JOB: &str = "job";
const ITERATOR: &str = "Iterator";
const PAGE: &str = "page";

/// Target URI of a Unisphere resource.
///
/// ```rust
/// use univmax::ResourcePath;
///
/// let uri = ResourcePath::new("sloprovisioning")
///     .level("symmetrix")
///     .level_id("000197800123")
///     .resource_type("storagegroup")
///     .resource_type_id("sg_1")
///     .build("91");
/// assert_eq!(
///     uri,
///     "/91/sloprovisioning/symmetrix/000197800123/storagegroup/sg_1"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourcePath {
    pub category: String,
    pub resource_level: Option<String>,
    pub resource_level_id: Option<String>,
    pub resource_type: Option<String>,
    pub resource_type_id: Option<String>,
    pub resource: Option<String>,
    pub resource_id: Option<String>,
    pub object_type: Option<String>,
    pub object_type_id: Option<String>,
    pub version: Option<String>,
    pub no_version: bool,
}

impl ResourcePath {
    pub fn new(category: &str) -> Self {
        ResourcePath {
            category: category.to_string(),
            ..Default::default()
        }
    }

    /// Shortcut of `/{category}/symmetrix/{array_id}`.
    pub fn array(category: &str, array_id: &str) -> Self {
        ResourcePath::new(category).level(SYMMETRIX).level_id(array_id)
    }

    pub fn level(mut self, v: &str) -> Self {
        self.resource_level = Some(v.to_string());
        self
    }

    pub fn level_id(mut self, v: &str) -> Self {
        self.resource_level_id = Some(v.to_string());
        self
    }

    pub fn resource_type(mut self, v: &str) -> Self {
        self.resource_type = Some(v.to_string());
        self
    }

    pub fn resource_type_id(mut self, v: &str) -> Self {
        self.resource_type_id = Some(v.to_string());
        self
    }

    pub fn resource(mut self, v: &str) -> Self {
        self.resource = Some(v.to_string());
        self
    }

    pub fn resource_id(mut self, v: &str) -> Self {
        self.resource_id = Some(v.to_string());
        self
    }

    pub fn object_type(mut self, v: &str) -> Self {
        self.object_type = Some(v.to_string());
        self
    }

    pub fn object_type_id(mut self, v: &str) -> Self {
        self.object_type_id = Some(v.to_string());
        self
    }

    pub fn version(mut self, v: &str) -> Self {
        self.version = Some(v.to_string());
        self
    }

    pub fn no_version(mut self) -> Self {
        self.no_version = true;
        self
    }

    fn uri_version<'a>(&'a self, default_version: &'a str) -> Option<&'a str> {
        if self.category == PERFORMANCE || self.category == COMMON {
            return None;
        }
        match self.version {
            Some(ref v) => {
                if self.no_version {
                    debug!(
                        "Version has been specified along with no_version \
                         flag, ignoring no_version flag and using version {}",
                        v
                    );
                }
                Some(v.as_str())
            }
            None if self.no_version => None,
            None => Some(default_version),
        }
    }

    /// Build the target URI, `default_version` is used unless the path
    /// carries its own version or is versionless.
    pub fn build(&self, default_version: &str) -> String {
        let mut target_uri = String::new();
        if let Some(v) = self.uri_version(default_version) {
            target_uri.push_str(&format!("/{}", v));
        }
        target_uri.push_str(&format!("/{}", self.category));
        for part in &[&self.resource_level, &self.resource_level_id] {
            if let Some(p) = part {
                target_uri.push_str(&format!("/{}", p));
            }
        }
        let pairs = [
            (&self.resource_type, &self.resource_type_id),
            (&self.resource, &self.resource_id),
            (&self.object_type, &self.object_type_id),
        ];
        for (name, id) in pairs.iter() {
            if let Some(n) = name {
                target_uri.push_str(&format!("/{}", n));
                if let Some(i) = id {
                    target_uri.push_str(&format!("/{}", i));
                }
            }
        }
        target_uri
    }

    fn operation_name(&self) -> &str {
        match self.resource_level {
            Some(ref l) => l,
            None => &self.category,
        }
    }
}

/// Asynchronous job returned by Unisphere with status code 202.
#[derive(Deserialize, Debug, Clone)]
pub struct Job {
    #[serde(rename = "jobId")]
    pub job_id: String,
    pub status: String,
    /// Usually a message, some jobs report an object or a number.
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub task: Option<Vec<Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Final state of a job.
#[derive(Debug, Clone, PartialEq)]
pub struct JobOutcome {
    /// `0` on success, `-1` on failure or when retries ran out.
    pub rc: i32,
    pub result: Option<Value>,
    pub status: String,
    pub task: Option<Vec<Value>>,
}

fn job_result_text(result: &Option<Value>) -> String {
    match result {
        Some(Value::String(s)) => s.clone(),
        Some(v) => v.to_string(),
        None => "None".to_string(),
    }
}

/// Shared REST plumbing of every function group.
pub struct Common {
    pub(crate) tp: RestTransport,
    pub(crate) version: String,
    pub(crate) interval: Duration,
    pub(crate) retries: u32,
}

/// Insert `executionOption: ASYNCHRONOUS` into the payload.
pub(crate) fn add_async(payload: &mut Map<String, Value>) {
    payload.insert(
        "executionOption".to_string(),
        Value::String("ASYNCHRONOUS".to_string()),
    );
}

// `V9.1.0.5` gives `91`, `T10.0.1.2` gives `100`.
fn major_version(version: &str) -> Option<String> {
    let mut parts = version.split('.');
    let major = parts
        .next()?
        .trim_start_matches(|c: char| !c.is_ascii_digit());
    let minor = parts.next()?;
    if major.is_empty() || minor.is_empty() {
        return None;
    }
    Some(format!("{}{}", major, minor))
}

/// Strings under `key` of a reply, empty if the key is missing.
pub(crate) fn string_list(resp: &Value, key: &str) -> Vec<String> {
    match resp.get(key).and_then(|v| v.as_array()) {
        Some(items) => items
            .iter()
            .filter_map(|i| i.as_str().map(|s| s.to_string()))
            .collect(),
        None => Vec::new(),
    }
}

/// Objects under `key` of a reply, empty if the key is missing.
pub(crate) fn value_list(resp: &Value, key: &str) -> Vec<Value> {
    match resp.get(key).and_then(|v| v.as_array()) {
        Some(items) => items.clone(),
        None => Vec::new(),
    }
}

/// Deserialize the list under `key`, empty if the key is missing.
pub(crate) fn extract_list<T: DeserializeOwned>(
    resp: &Value,
    key: &str,
) -> Result<Vec<T>> {
    match resp.get(key) {
        Some(v) if !v.is_null() => Ok(serde_json::from_value(v.clone())?),
        _ => Ok(Vec::new()),
    }
}

/// Array id a function group works on.
///
/// # Errors
///
///  * [`U4vError::InvalidInput`][1] when no array id was set.
///
/// [1]: enum.U4vError.html#variant.InvalidInput
pub(crate) fn require_array(array_id: &Option<String>) -> Result<&str> {
    match array_id {
        Some(a) if !a.is_empty() => Ok(a.as_str()),
        _ => Err(U4vError::InvalidInput(
            "No array id defined, please set one on the client or call \
             with_array()"
                .to_string(),
        )),
    }
}

impl Common {
    pub(crate) fn new(
        tp: RestTransport,
        version: &str,
        interval: Duration,
        retries: u32,
    ) -> Common {
        Common {
            tp,
            version: version.to_string(),
            interval,
            retries,
        }
    }

    /// Unisphere REST version used in URIs.
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn retries(&self) -> u32 {
        self.retries
    }

    pub fn build_uri(&self, path: &ResourcePath) -> String {
        path.build(&self.version)
    }

    /// Check if a status code indicates success.
    ///
    /// # Errors
    ///
    ///  * [`U4vError::ResourceNotFound`][1] on 404.
    ///  * [`U4vError::UnauthorizedRequest`][2] on 401.
    ///  * [`U4vError::VolumeBackendApi`][3] on other failures.
    ///
    /// [1]: enum.U4vError.html#variant.ResourceNotFound
    /// [2]: enum.U4vError.html#variant.UnauthorizedRequest
    /// [3]: enum.U4vError.html#variant.VolumeBackendApi
    pub fn check_status_code_success(
        operation: &str,
        status_code: u16,
        message: &Value,
    ) -> Result<()> {
        if is_status_success(status_code) {
            return Ok(());
        }
        let msg = if message.is_null() {
            None
        } else {
            Some(message)
        };
        Err(U4vError::from_status(operation, status_code, msg))
    }

    fn send(
        &self,
        target_uri: &str,
        method: Method,
        params: Option<&Value>,
        body: Option<&Value>,
    ) -> Result<(Value, u16)> {
        let (reply, sc) =
            self.tp.request(target_uri, method, params, body, None)?;
        Ok((reply.unwrap_or(Value::Null), sc))
    }

    /// Send a GET request to a literal target URI.
    ///
    ///  * `target_uri` -- URI below the REST base URL, e.g.
    ///    `/91/system/tag`.
    ///  * `resource_type` -- Name used in error messages.
    ///  * `params` -- Optional query parameters.
    ///
    /// Replies without a JSON body give `Value::Null`.
    pub fn get_request(
        &self,
        target_uri: &str,
        resource_type: &str,
        params: Option<&Value>,
    ) -> Result<Value> {
        let (message, sc) = self.send(target_uri, Method::GET, params, None)?;
        let operation = format!("GET {}", resource_type);
        Common::check_status_code_success(&operation, sc, &message)?;
        Ok(message)
    }

    /// Send a POST request to a literal target URI.
    pub fn create_request(
        &self,
        target_uri: &str,
        resource_type: &str,
        payload: Option<&Value>,
    ) -> Result<(Value, u16)> {
        let (message, sc) =
            self.send(target_uri, Method::POST, None, payload)?;
        let operation = format!("POST {} resource", resource_type);
        Common::check_status_code_success(&operation, sc, &message)?;
        Ok((message, sc))
    }

    /// Send a PUT request to a literal target URI.
    pub fn modify_request(
        &self,
        target_uri: &str,
        resource_type: &str,
        payload: Option<&Value>,
    ) -> Result<(Value, u16)> {
        let (message, sc) = self.send(target_uri, Method::PUT, None, payload)?;
        let operation = format!("PUT {} resource", resource_type);
        Common::check_status_code_success(&operation, sc, &message)?;
        Ok((message, sc))
    }

    /// Send a DELETE request to a literal target URI, `params` go to the
    /// query string.
    pub fn delete_request(
        &self,
        target_uri: &str,
        resource_type: &str,
        params: Option<&Value>,
    ) -> Result<()> {
        let (message, sc) =
            self.send(target_uri, Method::DELETE, params, None)?;
        let operation = format!("DELETE {} resource", resource_type);
        Common::check_status_code_success(&operation, sc, &message)
    }

    /// Get resource details from the array.
    pub fn get_resource(
        &self,
        path: &ResourcePath,
        params: Option<&Value>,
    ) -> Result<Value> {
        self.get_request(&self.build_uri(path), path.operation_name(), params)
    }

    /// Create a resource. Returns the reply and the status code, the
    /// status code is 202 when the request ran as a job.
    pub fn create_resource(
        &self,
        path: &ResourcePath,
        payload: Option<&Value>,
    ) -> Result<(Value, u16)> {
        self.create_request(
            &self.build_uri(path),
            path.operation_name(),
            payload,
        )
    }

    /// Modify a resource. Returns the reply and the status code.
    pub fn modify_resource(
        &self,
        path: &ResourcePath,
        payload: Option<&Value>,
    ) -> Result<(Value, u16)> {
        self.modify_request(
            &self.build_uri(path),
            path.operation_name(),
            payload,
        )
    }

    /// Delete a resource. A payload is sent as the request body.
    pub fn delete_resource(
        &self,
        path: &ResourcePath,
        payload: Option<&Value>,
    ) -> Result<()> {
        let (message, sc) = self.send(
            &self.build_uri(path),
            Method::DELETE,
            payload,
            payload,
        )?;
        let operation = format!("DELETE {} resource", path.operation_name());
        Common::check_status_code_success(&operation, sc, &message)
    }

    /// Delete a resource, `params` go to the query string only.
    pub fn delete_resource_with_params(
        &self,
        path: &ResourcePath,
        params: &Value,
    ) -> Result<()> {
        self.delete_request(
            &self.build_uri(path),
            path.operation_name(),
            Some(params),
        )
    }

    /// Get details of a specific job.
    pub fn get_job_by_id(&self, job_id: &str) -> Result<Value> {
        self.get_resource(
            &ResourcePath::new(SYSTEM).level(JOB).level_id(job_id),
            None,
        )
    }

    // Returns (complete, rc, job).
    fn is_job_finished(&self, job_id: &str) -> Result<(bool, i32, Job)> {
        let job: Job = serde_json::from_value(self.get_job_by_id(job_id)?)?;
        let status = job.status.to_lowercase();
        if status == SUCCEEDED {
            Ok((true, 0, job))
        } else if INCOMPLETE_LIST.contains(&status.as_str()) {
            Ok((false, 0, job))
        } else {
            Ok((true, -1, job))
        }
    }

    /// Poll the job every interval until it finishes or retries run out.
    ///
    /// # Errors
    ///
    ///  * [`U4vError::VolumeBackendApi`][1] when the job status could not be
    ///    fetched.
    ///
    /// [1]: enum.U4vError.html#variant.VolumeBackendApi
    pub fn wait_for_job_complete(&self, job: &Job) -> Result<JobOutcome> {
        if job.status.to_lowercase() == SUCCEEDED {
            return Ok(JobOutcome {
                rc: 0,
                result: job.result.clone(),
                status: job.status.clone(),
                task: job.task.clone(),
            });
        }
        let mut retries: u32 = 0;
        let mut outcome = JobOutcome {
            rc: 0,
            result: None,
            status: job.status.clone(),
            task: None,
        };
        loop {
            sleep(self.interval);
            retries += 1;
            match self.is_job_finished(&job.job_id) {
                Ok((complete, rc, cur)) => {
                    outcome.status = cur.status;
                    outcome.task = cur.task;
                    if complete {
                        outcome.rc = rc;
                        outcome.result = cur.result;
                        break;
                    }
                }
                Err(e) => {
                    error!("Issue encountered waiting for job: {}", e);
                    return Err(U4vError::VolumeBackendApi(
                        "Issue encountered waiting for job.".to_string(),
                    ));
                }
            }
            if retries > self.retries {
                error!(
                    "_wait_for_job_complete failed after {} tries.",
                    retries
                );
                outcome.rc = -1;
                break;
            }
        }
        debug!(
            "Return code is: {}. Result is {:?}.",
            outcome.rc, outcome.result
        );
        Ok(outcome)
    }

    /// Wait for the job when `status_code` is 202, returns the job tasks.
    ///
    ///  * `operation` -- Operation name used in the error message.
    ///  * `status_code` -- Status code of the request creating the job.
    ///  * `job` -- Reply of the request creating the job.
    ///
    /// # Errors
    ///
    ///  * [`U4vError::VolumeBackendApi`][1] when the job failed.
    ///
    /// [1]: enum.U4vError.html#variant.VolumeBackendApi
    pub fn wait_for_job(
        &self,
        operation: &str,
        status_code: u16,
        job: &Value,
    ) -> Result<Option<Vec<Value>>> {
        if status_code != STATUS_202 {
            return Ok(None);
        }
        let job: Job = serde_json::from_value(job.clone())?;
        let outcome = self.wait_for_job_complete(&job)?;
        if outcome.rc != 0 {
            let msg = format!(
                "Error {}. Status code: {}. Error: {}. Status: {}.",
                operation,
                outcome.rc,
                job_result_text(&outcome.result),
                outcome.status
            );
            error!("{}", msg);
            return Err(U4vError::VolumeBackendApi(msg));
        }
        Ok(outcome.task)
    }

    /// Get the Unisphere version, e.g. (`V9.1.0.5`, `91`).
    pub fn get_uni_version(&self) -> Result<(String, String)> {
        let resp =
            self.get_resource(&ResourcePath::new(VERSION).no_version(), None)?;
        let version = resp
            .get("version")
            .and_then(|v| v.as_str())
            .ok_or_lib_bug(&resp)?;
        match major_version(version) {
            Some(major) => Ok((version.to_string(), major)),
            None => Err(U4vError::VolumeBackendApi(format!(
                "Unable to parse Unisphere version '{}'",
                version
            ))),
        }
    }

    /// Return the ids of arrays managed by Unisphere.
    pub fn get_array_list(
        &self,
        filters: Option<&Value>,
    ) -> Result<Vec<String>> {
        let resp = self.get_resource(
            &ResourcePath::new(SYSTEM).level(SYMMETRIX),
            filters,
        )?;
        Ok(string_list(&resp, "symmetrixId"))
    }

    /// Return the ids of V3 or newer arrays.
    pub fn get_v3_or_newer_array_list(
        &self,
        filters: Option<&Value>,
    ) -> Result<Vec<String>> {
        let resp = self.get_resource(
            &ResourcePath::new(SLOPROVISIONING).level(SYMMETRIX),
            filters,
        )?;
        Ok(string_list(&resp, "symmetrixId"))
    }

    pub fn get_array(&self, array_id: &str) -> Result<Value> {
        self.get_resource(&ResourcePath::array(SYSTEM, array_id), None)
    }

    /// Get one page of results from an iterator instance.
    pub fn get_iterator_page_list(
        &self,
        iterator_id: &str,
        start: u64,
        end: u64,
    ) -> Result<Vec<Value>> {
        let path = ResourcePath::new(COMMON)
            .no_version()
            .level(ITERATOR)
            .level_id(iterator_id)
            .resource_type(PAGE);
        let resp = self.get_resource(
            &path,
            Some(&json!({"from": start, "to": end})),
        )?;
        Ok(value_list(&resp, "result"))
    }

    /// Get results from all pages of an iterator.
    pub fn get_iterator_results(
        &self,
        rest_response: &Value,
    ) -> Result<Vec<Value>> {
        let mut full_response = rest_response
            .get("resultList")
            .and_then(|r| r.get("result"))
            .and_then(|r| r.as_array())
            .ok_or_lib_bug(rest_response)?
            .clone();
        let count = rest_response
            .get("count")
            .and_then(|c| c.as_u64())
            .unwrap_or(0);
        if count == 0 {
            return Ok(full_response);
        }
        let max_page_size = rest_response
            .get("maxPageSize")
            .and_then(|m| m.as_u64())
            .ok_or_lib_bug(rest_response)?;
        if max_page_size == 0 || count <= max_page_size {
            return Ok(full_response);
        }
        let iterator_id = rest_response
            .get("id")
            .and_then(|i| i.as_str())
            .ok_or_lib_bug(rest_response)?;
        let total_iterations = (count + max_page_size - 1) / max_page_size;
        // First page is already in the response.
        for x in 1..total_iterations {
            let start = x * max_page_size + 1;
            let end = ((x + 1) * max_page_size).min(count);
            full_response.extend(self.get_iterator_page_list(
                iterator_id,
                start,
                end,
            )?);
        }
        Ok(full_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uri_with_default_version() {
        let uri = ResourcePath::array(SLOPROVISIONING, "000197800123")
            .resource_type("storagegroup")
            .build("91");
        assert_eq!(
            uri,
            "/91/sloprovisioning/symmetrix/000197800123/storagegroup"
        );
    }

    #[test]
    fn uri_performance_is_versionless() {
        let uri = ResourcePath::new(PERFORMANCE)
            .level("Array")
            .resource_type("keys")
            .version("91")
            .build("91");
        assert_eq!(uri, "/performance/Array/keys");
    }

    #[test]
    fn uri_no_version() {
        let uri = ResourcePath::new("version").no_version().build("91");
        assert_eq!(uri, "/version");
        let uri = ResourcePath::new(SYSTEM)
            .no_version()
            .version("90")
            .build("91");
        assert_eq!(uri, "/90/system");
    }

    #[test]
    fn uri_ids_need_their_type() {
        let mut path = ResourcePath::array(REPLICATION, "000197800123");
        path.resource_type_id = Some("orphan".to_string());
        assert_eq!(path.build("91"), "/91/replication/symmetrix/000197800123");
        let uri = ResourcePath::array(REPLICATION, "000197800123")
            .resource_type("storagegroup")
            .resource_type_id("sg_1")
            .resource("snapshot")
            .resource_id("snap")
            .object_type("generation")
            .object_type_id("0")
            .build("91");
        assert_eq!(
            uri,
            "/91/replication/symmetrix/000197800123/storagegroup/sg_1/\
             snapshot/snap/generation/0"
        );
    }

    #[test]
    fn operation_name_falls_back_to_category() {
        assert_eq!(ResourcePath::new("version").operation_name(), "version");
        assert_eq!(
            ResourcePath::new(SYSTEM).level(JOB).operation_name(),
            "job"
        );
    }

    #[test]
    fn status_check() {
        Common::check_status_code_success("GET x", 204, &Value::Null).unwrap();
        let e = Common::check_status_code_success("GET x", 404, &Value::Null);
        assert!(matches!(e, Err(U4vError::ResourceNotFound(_))));
    }

    #[test]
    fn list_helpers() {
        let resp = json!({"names": ["a", "b"], "objs": [{"id": 1}]});
        assert_eq!(string_list(&resp, "names"), vec!["a", "b"]);
        assert!(string_list(&resp, "missing").is_empty());
        assert_eq!(value_list(&resp, "objs").len(), 1);
        let names: Vec<String> = extract_list(&resp, "names").unwrap();
        assert_eq!(names.len(), 2);
        assert!(string_list(&Value::Null, "names").is_empty());
    }

    #[test]
    fn async_payload() {
        let mut payload = Map::new();
        add_async(&mut payload);
        assert_eq!(
            Value::Object(payload),
            json!({"executionOption": "ASYNCHRONOUS"})
        );
    }

    #[test]
    fn major_version_of_two_digit_release() {
        assert_eq!(major_version("V9.1.0.5"), Some("91".to_string()));
        assert_eq!(major_version("T10.0.1.2"), Some("100".to_string()));
        assert_eq!(major_version("V9"), None);
        assert_eq!(major_version("X.1"), None);
    }

    #[test]
    fn job_result_any_json() {
        let job: Job = serde_json::from_value(json!({
            "jobId": "1591",
            "status": "FAILED",
            "result": {"errorCode": 23, "message": "busy"},
        }))
        .unwrap();
        let expected = json!({"errorCode": 23, "message": "busy"});
        assert_eq!(job.result, Some(expected));
        assert_eq!(
            job_result_text(&job.result),
            r#"{"errorCode":23,"message":"busy"}"#
        );
        let job: Job = serde_json::from_value(
            json!({"jobId": "1592", "status": "FAILED", "result": 7}),
        )
        .unwrap();
        assert_eq!(job_result_text(&job.result), "7");
        let job: Job = serde_json::from_value(
            json!({"jobId": "1593", "status": "SUCCEEDED"}),
        )
        .unwrap();
        assert_eq!(job_result_text(&job.result), "None");
        assert_eq!(
            job_result_text(&Some(json!("Storage group exists"))),
            "Storage group exists"
        );
    }
}
