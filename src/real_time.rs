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
use super::data::Metrics;
use super::error::*;
use super::misc::convert_to_snake_case;
use super::performance::{is_within, now_millis, ONE_HOUR, ONE_MINUTE};

const REALTIME: &str = "realtime";
const HELP: &str = "help";
const KEYS: &str = "keys";
const METRICS: &str = "metrics";
const ALL: &str = "All";

pub const RT_ARRAY: &str = "Array";
pub const RT_BE_DIRECTOR: &str = "BEDirector";
pub const RT_BE_PORT: &str = "BEPort";
pub const RT_EXTERNAL_DIRECTOR: &str = "ExternalDirector";
pub const RT_FE_DIRECTOR: &str = "FEDirector";
pub const RT_FE_PORT: &str = "FEPort";
pub const RT_RDF_DIRECTOR: &str = "RDFDirector";
pub const RT_RDF_PORT: &str = "RDFPort";
/// Listed as `StorageGroups` by Unisphere, this name is accepted too.
pub const RT_STORAGE_GROUP: &str = "StorageGroup";

/// Real time performance data of one object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RealTimeStats {
    pub result: Vec<Value>,
    pub array_id: String,
    pub reporting_level: String,
    pub start_date: u64,
    pub end_date: u64,
    pub timestamp: u64,
    pub real_time: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,
}

/// Metric names of a request, `All` is sent as is.
pub fn format_metrics(metrics: &Metrics) -> Result<Vec<String>> {
    match metrics {
        Metrics::All => Ok(vec![ALL.to_string()]),
        Metrics::List(l) if l.len() == 1 && l[0].eq_ignore_ascii_case(ALL) => {
            Ok(vec![ALL.to_string()])
        }
        Metrics::List(l) => Ok(l.clone()),
        Metrics::Kpi => Err(U4vError::InvalidInput(
            "KPI metrics are not available for real-time performance data, \
             please use All or a list of metrics."
                .to_string(),
        )),
    }
}

// Checks needing no Unisphere round trip.
pub(crate) fn check_window(
    start_date: u64,
    end_date: u64,
    now: u64,
    recency: u32,
) -> Option<String> {
    let delta = end_date.saturating_sub(start_date);
    if end_date < start_date {
        Some("The end_date cannot be before start_date.".to_string())
    } else if delta < ONE_MINUTE {
        if now.saturating_sub(end_date) < ONE_MINUTE
            || now.saturating_sub(start_date) < ONE_MINUTE
        {
            Some(
                "Real-time timestamps cannot be for intervals of less than \
                 one minute if the start or end timestamps are within one \
                 minute of local time."
                    .to_string(),
            )
        } else {
            None
        }
    } else if delta > ONE_HOUR {
        Some(
            "It is not possible to query for more than one hour of \
             real-time performance data in one request."
                .to_string(),
        )
    } else if recency > 0 && !is_within(end_date, recency) {
        Some(format!(
            "Timestamp \"{}\" failed recency check of {} minutes.",
            end_date, recency
        ))
    } else {
        None
    }
}

/// Real time performance data, sampled every five seconds for at most
/// the last hour.
pub struct RealTime<'a> {
    common: &'a Common,
    array_id: Option<String>,
    recency: u32,
}

impl<'a> RealTime<'a> {
    pub(crate) fn new(common: &'a Common, array_id: Option<&str>) -> Self {
        RealTime {
            common,
            array_id: array_id.map(|a| a.to_string()),
            recency: 0,
        }
    }

    pub fn with_array(mut self, array_id: &str) -> Self {
        self.array_id = Some(array_id.to_string());
        self
    }

    pub fn array_id(&self) -> Result<&str> {
        require_array(&self.array_id)
    }

    /// Minutes within which the end of a request must be, 0 disables the
    /// check.
    pub fn set_recency(&mut self, minutes: u32) {
        self.recency = minutes;
    }

    pub fn recency(&self) -> u32 {
        self.recency
    }

    pub fn is_timestamp_current(
        &self,
        timestamp: u64,
        minutes: Option<u32>,
    ) -> bool {
        is_within(timestamp, minutes.unwrap_or(self.recency))
    }

    fn path() -> ResourcePath {
        ResourcePath::new(PERFORMANCE).no_version().level(REALTIME)
    }

    /// Categories supporting real time data.
    pub fn get_categories(&self) -> Result<Vec<String>> {
        let resp = self.common.get_resource(
            &RealTime::path()
                .resource_type(HELP)
                .resource_type_id(self.array_id()?)
                .object_type("categories"),
            None,
        )?;
        Ok(string_list(&resp, "categoryName"))
    }

    pub fn get_category_metrics(&self, category: &str) -> Result<Vec<String>> {
        let resp = self.common.get_resource(
            &RealTime::path()
                .resource_type(HELP)
                .resource_type_id(self.array_id()?)
                .resource(category)
                .object_type(METRICS),
            None,
        )?;
        Ok(string_list(&resp, "metricName"))
    }

    /// First and last real time timestamps of every array, or only of
    /// `array_id`.
    pub fn get_timestamps(&self, array_id: Option<&str>) -> Result<Vec<Value>> {
        let resp = self.common.get_resource(
            &RealTime::path().resource_type(HELP).resource("times"),
            None,
        )?;
        let timestamps = value_list(&resp, "arrayInfo");
        if let Some(a) = array_id {
            if let Some(info) = timestamps.iter().find(|t| {
                t.get("symmetrixId").and_then(|s| s.as_str()) == Some(a)
            }) {
                return Ok(vec![info.clone()]);
            }
        }
        Ok(timestamps)
    }

    /// Object ids of `category` collecting real time data. Failures are
    /// logged and give an empty list.
    pub fn get_category_keys(&self, category: &str) -> Vec<String> {
        let array_id = match self.array_id() {
            Ok(a) => a,
            Err(e) => {
                error!("Error in get_category_keys: {}", e);
                return Vec::new();
            }
        };
        let mut payload = Map::new();
        payload.insert("symmetrixId".to_string(), json!(array_id));
        payload.insert("category".to_string(), json!(category));
        match self
            .common
            .create_resource(
                &RealTime::path().resource_type(KEYS),
                Some(&Value::Object(payload)),
            )
        {
            Ok((resp, _)) => string_list(&resp, KEYS),
            Err(e) => {
                error!("Error in get_category_keys: {}", e);
                Vec::new()
            }
        }
    }

    fn validate(
        &self,
        start_date: u64,
        end_date: u64,
        category: &str,
        metrics: &[String],
        instance_id: Option<&str>,
    ) -> Result<()> {
        let categories = self.get_categories()?;
        let known_category = categories.iter().any(|c| c == category)
            || category == RT_STORAGE_GROUP;
        let msg = if !known_category {
            Some(format!(
                "Real-time performance category \"{}\" is not one of {:?}.",
                category, categories
            ))
        } else if !(metrics.len() == 1 && metrics[0] == ALL) {
            let known = self.get_category_metrics(category)?;
            if metrics.iter().all(|m| known.contains(m)) {
                None
            } else {
                Some(format!(
                    "The supplied real-time metrics {:?} are not valid. Valid \
                     options are \"All\", and one or more of {:?}",
                    metrics, known
                ))
            }
        } else {
            None
        };
        let msg = msg.or_else(|| match instance_id {
            None if category != RT_ARRAY => Some(
                "For real-time performance data other than from the \"Array\" \
                 category an instance_id must be specified."
                    .to_string(),
            ),
            Some(i) => {
                let keys = self.get_category_keys(category);
                if keys.iter().any(|k| k == i) {
                    None
                } else {
                    Some(format!(
                        "Instance ID \"{}\" is not one of {} real-time \
                         performance keys {:?}",
                        i, category, keys
                    ))
                }
            }
            None => None,
        });
        let msg = msg.or_else(|| {
            check_window(start_date, end_date, now_millis(), self.recency)
        });
        match msg {
            Some(m) => {
                error!("{}", m);
                Err(U4vError::InvalidInput(m))
            }
            None => Ok(()),
        }
    }

    /// Real time data of a category.
    ///
    ///  * `start_date`, `end_date` -- Milliseconds since epoch, at most one
    ///    hour apart.
    ///  * `instance_id` -- Object id, required except for `Array`.
    ///
    /// # Errors
    ///
    ///  * [`U4vError::InvalidInput`][1] when the category, metrics,
    ///    instance id or time window is not valid. Nothing is requested
    ///    in that case.
    ///
    /// [1]: enum.U4vError.html#variant.InvalidInput
    pub fn get_performance_data(
        &self,
        start_date: u64,
        end_date: u64,
        category: &str,
        metrics: &Metrics,
        instance_id: Option<&str>,
    ) -> Result<Option<RealTimeStats>> {
        let array_id = self.array_id()?.to_string();
        let metrics = format_metrics(metrics)?;
        self.validate(start_date, end_date, category, &metrics, instance_id)?;
        let mut payload = Map::new();
        payload.insert("symmetrixId".to_string(), json!(array_id));
        payload.insert("startDate".to_string(), json!(start_date));
        payload.insert("endDate".to_string(), json!(end_date));
        payload.insert("category".to_string(), json!(category));
        payload.insert(METRICS.to_string(), json!(metrics));
        if let Some(i) = instance_id {
            payload.insert("instanceId".to_string(), json!(i));
        }
        let (resp, _) = self.common.create_resource(
            &RealTime::path().resource_type(METRICS),
            Some(&Value::Object(payload)),
        )?;
        if resp.is_null() {
            return Ok(None);
        }
        Ok(Some(RealTimeStats {
            result: self.common.get_iterator_results(&resp)?,
            array_id,
            reporting_level: convert_to_snake_case(category)?,
            start_date,
            end_date,
            timestamp: end_date,
            real_time: true,
            instance_id: instance_id.map(|i| i.to_string()),
        }))
    }

    pub fn get_array_stats(
        &self,
        start_date: u64,
        end_date: u64,
        metrics: &Metrics,
    ) -> Result<Option<RealTimeStats>> {
        self.get_performance_data(start_date, end_date, RT_ARRAY, metrics, None)
    }

    pub fn get_backend_director_stats(
        &self,
        start_date: u64,
        end_date: u64,
        metrics: &Metrics,
        director_id: &str,
    ) -> Result<Option<RealTimeStats>> {
        self.get_performance_data(
            start_date,
            end_date,
            RT_BE_DIRECTOR,
            metrics,
            Some(director_id),
        )
    }

    pub fn get_frontend_director_stats(
        &self,
        start_date: u64,
        end_date: u64,
        metrics: &Metrics,
        director_id: &str,
    ) -> Result<Option<RealTimeStats>> {
        self.get_performance_data(
            start_date,
            end_date,
            RT_FE_DIRECTOR,
            metrics,
            Some(director_id),
        )
    }

    /// `port_id` is the `director:port` key, e.g. `FA-1D:4`.
    pub fn get_frontend_port_stats(
        &self,
        start_date: u64,
        end_date: u64,
        metrics: &Metrics,
        port_id: &str,
    ) -> Result<Option<RealTimeStats>> {
        self.get_performance_data(
            start_date,
            end_date,
            RT_FE_PORT,
            metrics,
            Some(port_id),
        )
    }

    pub fn get_rdf_director_stats(
        &self,
        start_date: u64,
        end_date: u64,
        metrics: &Metrics,
        director_id: &str,
    ) -> Result<Option<RealTimeStats>> {
        self.get_performance_data(
            start_date,
            end_date,
            RT_RDF_DIRECTOR,
            metrics,
            Some(director_id),
        )
    }

    pub fn get_storage_group_stats(
        &self,
        start_date: u64,
        end_date: u64,
        metrics: &Metrics,
        storage_group_id: &str,
    ) -> Result<Option<RealTimeStats>> {
        self.get_performance_data(
            start_date,
            end_date,
            RT_STORAGE_GROUP,
            metrics,
            Some(storage_group_id),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_formatting() {
        assert_eq!(format_metrics(&Metrics::All).unwrap(), vec!["All"]);
        assert_eq!(format_metrics(&Metrics::from("all")).unwrap(), vec!["All"]);
        assert_eq!(
            format_metrics(&Metrics::from(vec!["HostIOs", "HostMBs"])).unwrap(),
            vec!["HostIOs", "HostMBs"]
        );
        assert!(format_metrics(&Metrics::Kpi).is_err());
    }

    #[test]
    fn window_checks() {
        let now = 1_600_000_000_000u64;
        let old = now - 10 * ONE_MINUTE;
        assert!(check_window(old, old + 5_000, now, 0).is_none());
        assert!(check_window(now - 5_000, now, now, 0).is_some());
        assert!(check_window(now - 2 * ONE_HOUR, now, now, 0).is_some());
        assert!(check_window(now - 30 * ONE_MINUTE, now, now, 0).is_none());
        assert!(check_window(now, now - ONE_MINUTE, now, 0).is_some());
    }
}
