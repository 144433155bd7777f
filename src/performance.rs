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
use chrono::Utc;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::{error, info};

use super::common::*;
use super::data::*;
use super::error::*;
use super::misc::convert_to_snake_case;

pub(crate) const ONE_MINUTE: u64 = 60_000;
pub(crate) const ONE_HOUR: u64 = 3_600_000;
const DEFAULT_RECENCY: u32 = 7;
const KEYS: &str = "keys";
const METRICS: &str = "metrics";
const THRESHOLD: &str = "threshold";
const SYMMETRIX_ID: &str = "symmetrixId";
const DIRECTOR_ID: &str = "directorId";
const DISK_TECHNOLOGY: &str = "diskTechnology";
const START_DATE: &str = "startDate";
const END_DATE: &str = "endDate";
const FIRST_AVAILABLE_DATE: &str = "firstAvailableDate";
const LAST_AVAILABLE_DATE: &str = "lastAvailableDate";

/// Milliseconds since epoch.
pub(crate) fn now_millis() -> u64 {
    let now = Utc::now().timestamp_millis();
    if now < 0 {
        0
    } else {
        now as u64
    }
}

pub(crate) fn is_within(timestamp: u64, minutes: u32) -> bool {
    (now_millis() as i128) - (timestamp as i128)
        < i128::from(minutes) * i128::from(ONE_MINUTE)
}

/// Check a time range is in milliseconds since epoch and not reversed.
pub(crate) fn check_time_range(start_time: u64, end_time: u64) -> Result<()> {
    if start_time.to_string().len() != 13 || end_time.to_string().len() != 13 {
        return Err(U4vError::InvalidInput(
            "Invalid time input, time must be in milliseconds since epoch"
                .to_string(),
        ));
    }
    if start_time > end_time {
        return Err(U4vError::InvalidInput(
            "The end_time cannot be before start_time".to_string(),
        ));
    }
    Ok(())
}

/// Diagnostic performance data of one object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceStats {
    /// One entry per sample.
    pub result: Vec<Value>,
    pub array_id: String,
    /// Snake case category name, e.g. `fe_director`.
    pub reporting_level: String,
    pub start_date: u64,
    pub end_date: u64,
    pub timestamp: u64,
    /// Object ids of the request in snake case, e.g. `director_id`.
    #[serde(flatten)]
    pub ids: Map<String, Value>,
}

/// Diagnostic performance data, sampled every five minutes.
pub struct Performance<'a> {
    common: &'a Common,
    array_id: Option<String>,
    recency: u32,
    timestamp: Option<u64>,
}

impl<'a> Performance<'a> {
    pub(crate) fn new(common: &'a Common, array_id: Option<&str>) -> Self {
        Performance {
            common,
            array_id: array_id.map(|a| a.to_string()),
            recency: DEFAULT_RECENCY,
            timestamp: None,
        }
    }

    pub fn with_array(mut self, array_id: &str) -> Self {
        self.array_id = Some(array_id.to_string());
        self
    }

    pub fn array_id(&self) -> Result<&str> {
        require_array(&self.array_id)
    }

    /// Minutes within which a timestamp counts as current.
    pub fn recency(&self) -> u32 {
        self.recency
    }

    pub fn set_recency(&mut self, minutes: u32) {
        self.recency = minutes;
    }

    /// Timestamp of the latest stats request.
    pub fn timestamp(&self) -> Option<u64> {
        self.timestamp
    }

    pub fn set_timestamp(&mut self, timestamp: u64) {
        self.timestamp = Some(timestamp);
    }

    fn category_path(category: &str) -> ResourcePath {
        ResourcePath::new(PERFORMANCE).level(category)
    }

    /// Registration of the array, empty when not registered.
    pub fn get_array_registration_details(&self) -> Result<Value> {
        self.common.get_resource(
            &Performance::category_path(PerformanceCategory::Array.as_str())
                .resource_type("registrationdetails")
                .resource_type_id(self.array_id()?),
            None,
        )
    }

    /// Whether the array collects diagnostic data, an array registered
    /// only for real time data is not.
    pub fn is_array_performance_registered(&self) -> Result<bool> {
        let resp = self.get_array_registration_details()?;
        Ok(value_list(&resp, "registrationDetailsInfo")
            .first()
            .and_then(|r| r.get("diagnostic"))
            .and_then(|d| d.as_bool())
            .unwrap_or(false))
    }

    /// Last diagnostic timestamp of the array.
    ///
    /// # Errors
    ///
    ///  * [`U4vError::ResourceNotFound`][1] when the array is not in the
    ///    performance key list.
    ///
    /// [1]: enum.U4vError.html#variant.ResourceNotFound
    pub fn get_last_available_timestamp(&self) -> Result<u64> {
        let array_id = self.array_id()?;
        let resp = self.get_performance_key_list(
            PerformanceCategory::Array,
            None,
            None,
            None,
        )?;
        let found = value_list(&resp, PerformanceCategory::Array.info_key())
            .into_iter()
            .filter(|k| {
                k.get(SYMMETRIX_ID).and_then(|s| s.as_str()) == Some(array_id)
            })
            .filter_map(|k| k.get(LAST_AVAILABLE_DATE).and_then(|d| d.as_u64()))
            .last();
        match found {
            Some(t) => Ok(t),
            None => {
                let msg = format!(
                    "Array {} could not be found in list of performance keys.",
                    array_id
                );
                info!("{}", msg);
                Err(U4vError::ResourceNotFound(msg))
            }
        }
    }

    /// Whether `timestamp` is less than `minutes` old, the recency of this
    /// instance is used when `minutes` is `None`.
    pub fn is_timestamp_current(
        &self,
        timestamp: u64,
        minutes: Option<u32>,
    ) -> bool {
        is_within(timestamp, minutes.unwrap_or(self.recency))
    }

    /// Time range of `hours_difference` hours.
    ///
    /// The range follows `start_time` or precedes `end_time` when only one
    /// of them is given, otherwise it ends now.
    pub fn get_timestamp_by_hour(
        start_time: Option<u64>,
        end_time: Option<u64>,
        hours_difference: u64,
    ) -> (u64, u64) {
        let diff = ONE_HOUR * hours_difference;
        match (start_time, end_time) {
            (Some(s), None) => (s, s + diff),
            (None, Some(e)) => (e.saturating_sub(diff), e),
            _ => {
                let e = now_millis();
                (e.saturating_sub(diff), e)
            }
        }
    }

    /// Key list of a category.
    ///
    ///  * `request_body` -- Object ids narrowing the list, e.g.
    ///    `{"directorId": "FA-1D"}`. The array id is added.
    ///  * `start_time`, `end_time` -- Needed by time ranged categories.
    pub fn get_performance_key_list(
        &self,
        category: PerformanceCategory,
        request_body: Option<&Value>,
        start_time: Option<u64>,
        end_time: Option<u64>,
    ) -> Result<Value> {
        let path =
            Performance::category_path(category.as_str()).resource_type(KEYS);
        if category == PerformanceCategory::Array {
            return self.common.get_resource(&path, None);
        }
        let mut body = match request_body.and_then(|b| b.as_object()) {
            Some(b) => b.clone(),
            None => Map::new(),
        };
        if let Some(ref a) = self.array_id {
            body.insert(SYMMETRIX_ID.to_string(), json!(a));
        }
        if start_time.is_some() || end_time.is_some() {
            body.insert(START_DATE.to_string(), json!(start_time));
            body.insert(END_DATE.to_string(), json!(end_time));
        }
        let (resp, _) = self
            .common
            .create_resource(&path, Some(&Value::Object(body)))?;
        Ok(resp)
    }

    pub fn get_performance_categories_list() -> Vec<&'static str> {
        PerformanceCategory::ALL.iter().map(|c| c.as_str()).collect()
    }

    /// Parse a category name, case insensitive.
    pub fn validate_category(category: &str) -> Result<PerformanceCategory> {
        category.parse()
    }

    pub fn get_performance_metrics_list(
        category: PerformanceCategory,
        kpi_only: bool,
    ) -> Vec<String> {
        category.metrics(kpi_only)
    }

    /// First and last available timestamps of an object.
    ///
    ///  * `director_id` -- Only for port keys.
    ///  * `key_target_id` -- Object to look for, the array by default.
    pub fn extract_timestamp_keys(
        &self,
        category: PerformanceCategory,
        director_id: Option<&str>,
        key_target_id: Option<&str>,
    ) -> Result<(Option<u64>, Option<u64>)> {
        let array_id = self.array_id()?;
        let body = director_id.map(|d| json!({ DIRECTOR_ID: d }));
        let resp = self.get_performance_key_list(
            category,
            body.as_ref(),
            None,
            None,
        )?;
        let target = key_target_id.unwrap_or(array_id);
        let key_regex = Regex::new(r"\A\w*Info$")?;
        let mut start = None;
        let mut end = None;
        if let Some(obj) = resp.as_object() {
            for (key, infos) in obj {
                if !key_regex.is_match(key) {
                    continue;
                }
                for info in infos.as_array().into_iter().flatten() {
                    let matched = info.as_object().map_or(false, |o| {
                        o.values()
                            .filter_map(|v| v.as_str())
                            .any(|v| v.contains(target))
                    });
                    if matched {
                        start = info
                            .get(FIRST_AVAILABLE_DATE)
                            .and_then(|d| d.as_u64());
                        end = info
                            .get(LAST_AVAILABLE_DATE)
                            .and_then(|d| d.as_u64());
                    }
                }
            }
        }
        Ok((start, end))
    }

    /// Complete a time range from the available performance data.
    ///
    /// A missing end is the last available timestamp of the array, a
    /// missing start is the first available timestamp of the object. With
    /// neither given both are the last available timestamp of the object.
    ///
    /// # Errors
    ///
    ///  * [`U4vError::InvalidInput`][1] when a value is not 13 digits or
    ///    the range is reversed.
    ///  * [`U4vError::VolumeBackendApi`][2] when Unisphere holds no
    ///    timestamps for the object.
    ///
    /// [1]: enum.U4vError.html#variant.InvalidInput
    /// [2]: enum.U4vError.html#variant.VolumeBackendApi
    pub fn format_time_input(
        &self,
        category: PerformanceCategory,
        director_id: Option<&str>,
        key_target_id: Option<&str>,
        start_time: Option<u64>,
        end_time: Option<u64>,
    ) -> Result<(u64, u64)> {
        let (start, end) = match (start_time, end_time) {
            (Some(s), Some(e)) => (s, e),
            (Some(s), None) => (s, self.get_last_available_timestamp()?),
            (None, Some(e)) => {
                match self.extract_timestamp_keys(
                    category,
                    director_id,
                    key_target_id,
                )? {
                    (Some(s), _) => (s, e),
                    _ => {
                        return backend_error(
                            "First available timestamp could not be extracted \
                             from Unisphere, please array check performance \
                             registration.",
                        )
                    }
                }
            }
            (None, None) => {
                match self.extract_timestamp_keys(
                    category,
                    director_id,
                    key_target_id,
                )? {
                    (_, Some(e)) => (e, e),
                    _ => {
                        return backend_error(
                            "Timestamps could not be extracted from Unisphere, \
                             please array check performance registration.",
                        )
                    }
                }
            }
        };
        check_time_range(start, end)?;
        Ok((start, end))
    }

    /// Diagnostic stats of one object.
    ///
    ///  * `request_body` -- Object ids, e.g. `{"storageGroupId": "sg_1"}`,
    ///    nothing for the array itself.
    ///  * `recency` -- Fail unless the end timestamp is this many minutes
    ///    old at most.
    ///
    /// # Errors
    ///
    ///  * [`U4vError::VolumeBackendApi`][1] when the recency check fails.
    ///
    /// [1]: enum.U4vError.html#variant.VolumeBackendApi
    pub fn get_performance_stats(
        &mut self,
        category: PerformanceCategory,
        request_body: Option<&Value>,
        metrics: &Metrics,
        data_format: DataFormat,
        start_time: Option<u64>,
        end_time: Option<u64>,
        recency: Option<u32>,
    ) -> Result<PerformanceStats> {
        let array_id = self.array_id()?.to_string();
        let mut body = match request_body.and_then(|b| b.as_object()) {
            Some(b) => b.clone(),
            None => Map::new(),
        };

        let mut director_id = None;
        let mut object_id = None;
        if !body.is_empty() {
            let mut ids = body.clone();
            if ids.len() > 1 {
                if let Some(d) = ids.remove(DIRECTOR_ID) {
                    director_id = d.as_str().map(|s| s.to_string());
                }
            }
            object_id = match ids.get(DISK_TECHNOLOGY) {
                Some(d) => d.as_str().map(|s| s.to_string()),
                None => ids
                    .iter()
                    .filter(|(k, _)| k.ends_with("Id"))
                    .filter_map(|(_, v)| v.as_str())
                    .last()
                    .map(|s| s.to_string()),
            };
        }
        let (start, end) = self.format_time_input(
            category,
            director_id.as_ref().map(|s| s.as_str()),
            object_id.as_ref().map(|s| s.as_str()),
            start_time,
            end_time,
        )?;

        if let Some(r) = recency {
            if !self.is_timestamp_current(end, Some(r)) {
                return backend_error(&format!(
                    "Timestamp failed recency check of {} minutes.",
                    r
                ));
            }
        }

        let metrics_list = match metrics {
            Metrics::Kpi => category.metrics(true),
            Metrics::All => category.metrics(false),
            Metrics::List(l) => l.clone(),
        };

        let mut ids = Map::new();
        for (k, v) in &body {
            ids.insert(convert_to_snake_case(k)?, v.clone());
        }

        body.insert(START_DATE.to_string(), json!(start));
        body.insert(END_DATE.to_string(), json!(end));
        body.insert(SYMMETRIX_ID.to_string(), json!(array_id));
        body.insert("dataFormat".to_string(), json!(data_format.as_str()));
        body.insert(METRICS.to_string(), json!(metrics_list));

        let (resp, _) = self.common.create_resource(
            &Performance::category_path(category.as_str())
                .resource_type(METRICS),
            Some(&Value::Object(body)),
        )?;
        let result = self.common.get_iterator_results(&resp)?;
        self.timestamp = Some(end);
        Ok(PerformanceStats {
            result,
            array_id,
            reporting_level: convert_to_snake_case(category.as_str())?,
            start_date: start,
            end_date: end,
            timestamp: end,
            ids,
        })
    }

    fn id_body(
        keys: &[&str],
        ids: &[&str],
        category: PerformanceCategory,
    ) -> Result<Value> {
        if keys.len() != ids.len() {
            let msg = format!(
                "Category {} needs {} object id(s): {}, got {}",
                category,
                keys.len(),
                keys.join(", "),
                ids.len()
            );
            error!("{}", msg);
            return Err(U4vError::InvalidInput(msg));
        }
        let mut body = Map::new();
        for (k, v) in keys.iter().zip(ids.iter()) {
            body.insert(k.to_string(), json!(v));
        }
        Ok(Value::Object(body))
    }

    /// Objects of `category` with their first and last available dates.
    ///
    ///  * `parent_ids` -- Ids named by
    ///    [`PerformanceCategory::key_scope()`][1], e.g. the director of
    ///    port keys.
    ///  * `start_time`, `end_time` -- Only used by time ranged categories,
    ///    defaults to the array time range.
    ///
    /// [1]: enum.PerformanceCategory.html#method.key_scope
    pub fn get_category_keys(
        &self,
        category: PerformanceCategory,
        parent_ids: &[&str],
        start_time: Option<u64>,
        end_time: Option<u64>,
    ) -> Result<Vec<Value>> {
        let body = Performance::id_body(
            category.key_scope(),
            parent_ids,
            category,
        )?;
        let (start, end) = if category.is_time_ranged() {
            let (s, e) = self.format_time_input(
                PerformanceCategory::Array,
                None,
                None,
                start_time,
                end_time,
            )?;
            (Some(s), Some(e))
        } else {
            (None, None)
        };
        let resp = self.get_performance_key_list(
            category,
            Some(&body),
            start,
            end,
        )?;
        Ok(value_list(&resp, category.info_key()))
    }

    /// Stats of one object of `category`.
    ///
    ///  * `ids` -- Ids named by
    ///    [`PerformanceCategory::id_keys()`][1], in order.
    ///
    /// [1]: enum.PerformanceCategory.html#method.id_keys
    pub fn get_category_stats(
        &mut self,
        category: PerformanceCategory,
        ids: &[&str],
        metrics: &Metrics,
        data_format: DataFormat,
        start_time: Option<u64>,
        end_time: Option<u64>,
        recency: Option<u32>,
    ) -> Result<PerformanceStats> {
        let body = Performance::id_body(category.id_keys(), ids, category)?;
        let (start_time, end_time) = if category.is_time_ranged() {
            let (s, e) = self.format_time_input(
                PerformanceCategory::Array,
                None,
                None,
                start_time,
                end_time,
            )?;
            (Some(s), Some(e))
        } else {
            (start_time, end_time)
        };
        let body = match body.as_object() {
            Some(m) if m.is_empty() => None,
            _ => Some(body),
        };
        self.get_performance_stats(
            category,
            body.as_ref(),
            metrics,
            data_format,
            start_time,
            end_time,
            recency,
        )
    }

    /// Arrays registered for diagnostic data.
    pub fn get_array_keys(&self) -> Result<Vec<Value>> {
        self.get_category_keys(PerformanceCategory::Array, &[], None, None)
    }

    pub fn get_array_stats(
        &mut self,
        metrics: &Metrics,
        data_format: DataFormat,
        start_time: Option<u64>,
        end_time: Option<u64>,
        recency: Option<u32>,
    ) -> Result<PerformanceStats> {
        self.get_category_stats(
            PerformanceCategory::Array,
            &[],
            metrics,
            data_format,
            start_time,
            end_time,
            recency,
        )
    }

    pub fn get_backend_director_keys(&self) -> Result<Vec<Value>> {
        self.get_category_keys(PerformanceCategory::BeDirector, &[], None, None)
    }

    pub fn get_backend_director_stats(
        &mut self,
        director_id: &str,
        metrics: &Metrics,
        data_format: DataFormat,
        start_time: Option<u64>,
        end_time: Option<u64>,
        recency: Option<u32>,
    ) -> Result<PerformanceStats> {
        self.get_category_stats(
            PerformanceCategory::BeDirector,
            &[director_id],
            metrics,
            data_format,
            start_time,
            end_time,
            recency,
        )
    }

    pub fn get_frontend_director_keys(&self) -> Result<Vec<Value>> {
        self.get_category_keys(PerformanceCategory::FeDirector, &[], None, None)
    }

    pub fn get_frontend_director_stats(
        &mut self,
        director_id: &str,
        metrics: &Metrics,
        data_format: DataFormat,
        start_time: Option<u64>,
        end_time: Option<u64>,
        recency: Option<u32>,
    ) -> Result<PerformanceStats> {
        self.get_category_stats(
            PerformanceCategory::FeDirector,
            &[director_id],
            metrics,
            data_format,
            start_time,
            end_time,
            recency,
        )
    }

    /// Front end ports of a director.
    pub fn get_frontend_port_keys(
        &self,
        director_id: &str,
    ) -> Result<Vec<Value>> {
        self.get_category_keys(
            PerformanceCategory::FePort,
            &[director_id],
            None,
            None,
        )
    }

    pub fn get_frontend_port_stats(
        &mut self,
        director_id: &str,
        port_id: &str,
        metrics: &Metrics,
        data_format: DataFormat,
        start_time: Option<u64>,
        end_time: Option<u64>,
        recency: Option<u32>,
    ) -> Result<PerformanceStats> {
        self.get_category_stats(
            PerformanceCategory::FePort,
            &[director_id, port_id],
            metrics,
            data_format,
            start_time,
            end_time,
            recency,
        )
    }

    pub fn get_storage_group_keys(&self) -> Result<Vec<Value>> {
        self.get_category_keys(
            PerformanceCategory::StorageGroup,
            &[],
            None,
            None,
        )
    }

    pub fn get_storage_group_stats(
        &mut self,
        storage_group_id: &str,
        metrics: &Metrics,
        data_format: DataFormat,
        start_time: Option<u64>,
        end_time: Option<u64>,
        recency: Option<u32>,
    ) -> Result<PerformanceStats> {
        self.get_category_stats(
            PerformanceCategory::StorageGroup,
            &[storage_group_id],
            metrics,
            data_format,
            start_time,
            end_time,
            recency,
        )
    }

    /// Hosts active within the time range, the array time range by
    /// default.
    pub fn get_host_keys(
        &self,
        start_time: Option<u64>,
        end_time: Option<u64>,
    ) -> Result<Vec<Value>> {
        self.get_category_keys(
            PerformanceCategory::Host,
            &[],
            start_time,
            end_time,
        )
    }

    pub fn get_host_stats(
        &mut self,
        host_id: &str,
        metrics: &Metrics,
        data_format: DataFormat,
        start_time: Option<u64>,
        end_time: Option<u64>,
        recency: Option<u32>,
    ) -> Result<PerformanceStats> {
        self.get_category_stats(
            PerformanceCategory::Host,
            &[host_id],
            metrics,
            data_format,
            start_time,
            end_time,
            recency,
        )
    }

    pub fn get_port_group_keys(&self) -> Result<Vec<Value>> {
        self.get_category_keys(PerformanceCategory::PortGroup, &[], None, None)
    }

    pub fn get_port_group_stats(
        &mut self,
        port_group_id: &str,
        metrics: &Metrics,
        data_format: DataFormat,
        start_time: Option<u64>,
        end_time: Option<u64>,
        recency: Option<u32>,
    ) -> Result<PerformanceStats> {
        self.get_category_stats(
            PerformanceCategory::PortGroup,
            &[port_group_id],
            metrics,
            data_format,
            start_time,
            end_time,
            recency,
        )
    }

    pub fn get_storage_resource_pool_keys(&self) -> Result<Vec<Value>> {
        self.get_category_keys(PerformanceCategory::Srp, &[], None, None)
    }

    pub fn get_storage_resource_pool_stats(
        &mut self,
        srp_id: &str,
        metrics: &Metrics,
        data_format: DataFormat,
        start_time: Option<u64>,
        end_time: Option<u64>,
        recency: Option<u32>,
    ) -> Result<PerformanceStats> {
        self.get_category_stats(
            PerformanceCategory::Srp,
            &[srp_id],
            metrics,
            data_format,
            start_time,
            end_time,
            recency,
        )
    }

    pub fn get_rdf_director_keys(&self) -> Result<Vec<Value>> {
        self.get_category_keys(
            PerformanceCategory::RdfDirector,
            &[],
            None,
            None,
        )
    }

    pub fn get_rdf_director_stats(
        &mut self,
        director_id: &str,
        metrics: &Metrics,
        data_format: DataFormat,
        start_time: Option<u64>,
        end_time: Option<u64>,
        recency: Option<u32>,
    ) -> Result<PerformanceStats> {
        self.get_category_stats(
            PerformanceCategory::RdfDirector,
            &[director_id],
            metrics,
            data_format,
            start_time,
            end_time,
            recency,
        )
    }

    /// Days until the array, SRPs or thin pools fill up. Needs at least
    /// ten days of performance data.
    pub fn get_days_to_full(
        &self,
        category: DaysToFullCategory,
    ) -> Result<Vec<Value>> {
        let mut payload = Map::new();
        payload.insert(SYMMETRIX_ID.to_string(), json!(self.array_id()?));
        payload.insert("category".to_string(), json!(category.as_str()));
        let (resp, _) = self.common.create_resource(
            &Performance::category_path("daystofull"),
            Some(&Value::Object(payload)),
        )?;
        Ok(value_list(&resp, "daysToFullObjectResultType"))
    }

    pub fn get_threshold_categories(&self) -> Result<Vec<String>> {
        let resp = self.common.get_resource(
            &Performance::category_path(THRESHOLD).resource_type("categories"),
            None,
        )?;
        Ok(string_list(&resp, "endpoint"))
    }

    pub fn get_threshold_category_settings(
        &self,
        category: &str,
    ) -> Result<Value> {
        self.common.get_resource(
            &Performance::category_path(THRESHOLD)
                .resource_type("list")
                .resource_type_id(category),
            None,
        )
    }

    /// Edit a global threshold across all arrays.
    ///
    ///  * `first`, `second` -- Threshold levels, commonly
    ///    [`ThresholdLevel::warning()`][1] and
    ///    [`ThresholdLevel::critical()`][2].
    ///  * `alert` -- Raise alerts on the threshold.
    ///
    /// [1]: struct.ThresholdLevel.html#method.warning
    /// [2]: struct.ThresholdLevel.html#method.critical
    pub fn update_threshold_settings(
        &self,
        category: &str,
        metric: &str,
        first: &ThresholdLevel,
        second: &ThresholdLevel,
        alert: bool,
    ) -> Result<Value> {
        let mut payload = Map::new();
        payload.insert("metric".to_string(), json!(metric));
        payload.insert("alert".to_string(), json!(alert));
        for (prefix, level) in &[("first", first), ("second", second)] {
            payload.insert(
                format!("{}Threshold", prefix),
                json!(level.threshold.to_string()),
            );
            // Unisphere spells it with three r.
            payload.insert(
                format!("{}ThresholdOccurrrences", prefix),
                json!(level.occurrences.to_string()),
            );
            payload.insert(
                format!("{}ThresholdSamples", prefix),
                json!(level.samples.to_string()),
            );
            payload.insert(
                format!("{}ThresholdSeverity", prefix),
                json!(level.severity.as_str()),
            );
        }
        let (resp, _) = self.common.modify_resource(
            &Performance::category_path(THRESHOLD)
                .resource_type("update")
                .resource_type_id(category),
            Some(&Value::Object(payload)),
        )?;
        Ok(resp)
    }
}

fn backend_error<T>(msg: &str) -> Result<T> {
    error!("{}", msg);
    Err(U4vError::VolumeBackendApi(msg.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_range_checks() {
        assert!(check_time_range(1_600_000_000_000, 1_600_000_300_000).is_ok());
        assert!(matches!(
            check_time_range(1_600_000_000, 1_600_000_300_000),
            Err(U4vError::InvalidInput(_))
        ));
        assert!(matches!(
            check_time_range(1_600_000_300_000, 1_600_000_000_000),
            Err(U4vError::InvalidInput(_))
        ));
    }

    #[test]
    fn timestamp_by_hour() {
        let start = 1_600_000_000_000;
        assert_eq!(
            Performance::get_timestamp_by_hour(Some(start), None, 2),
            (start, start + 2 * ONE_HOUR)
        );
        assert_eq!(
            Performance::get_timestamp_by_hour(None, Some(start), 1),
            (start - ONE_HOUR, start)
        );
        let (s, e) = Performance::get_timestamp_by_hour(None, None, 1);
        assert_eq!(e - s, ONE_HOUR);
        assert!(is_within(e, 1));
    }

    #[test]
    fn recency() {
        let now = now_millis();
        assert!(is_within(now - 2 * ONE_MINUTE, 7));
        assert!(!is_within(now - 10 * ONE_MINUTE, 7));
        assert!(!is_within(now, 0));
    }

    #[test]
    fn category_catalogue() {
        let cats = Performance::get_performance_categories_list();
        assert_eq!(cats.len(), PerformanceCategory::ALL.len());
        assert!(cats.contains(&"StorageGroup"));
        assert_eq!(
            Performance::validate_category("srp").unwrap(),
            PerformanceCategory::Srp
        );
        assert!(Performance::validate_category("Widget").is_err());
        assert!(Performance::get_performance_metrics_list(
            PerformanceCategory::FePort,
            true
        )
        .contains(&"PercentBusy".to_string()));
    }
}
