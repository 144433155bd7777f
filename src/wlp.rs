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

use super::common::*;
use super::error::*;

const HEADROOM: &str = "headroom";
const CAPABILITIES: &str = "capabilities";

/// Workload planner, headroom of service levels on an array.
pub struct Wlp<'a> {
    common: &'a Common,
    array_id: Option<String>,
}

impl<'a> Wlp<'a> {
    pub(crate) fn new(common: &'a Common, array_id: Option<&str>) -> Self {
        Wlp {
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

    pub fn get_wlp_information(&self) -> Result<Value> {
        self.common
            .get_resource(&ResourcePath::array(WLP, self.array_id()?), None)
    }

    /// Remaining capacity in GB for a workload on a service level.
    ///
    ///  * `workload` -- Workload type, e.g. `OLTP`.
    ///  * `srp` -- Storage resource pool id.
    ///  * `slo` -- Service level name.
    pub fn get_headroom(
        &self,
        workload: &str,
        srp: &str,
        slo: &str,
    ) -> Result<Vec<Value>> {
        let mut params = Map::new();
        params.insert("srp".to_string(), json!(srp));
        params.insert("slo".to_string(), json!(slo));
        params.insert("workloadtype".to_string(), json!(workload));
        let resp = self.common.get_resource(
            &ResourcePath::array(WLP, self.array_id()?).resource_type(HEADROOM),
            Some(&Value::Object(params)),
        )?;
        Ok(value_list(&resp, "gbHeadroom"))
    }

    /// Workload planner capabilities of all arrays, or only of
    /// `array_id` when given.
    pub fn get_capabilities(
        &self,
        array_id: Option<&str>,
    ) -> Result<Vec<Value>> {
        let resp = self.common.get_resource(
            &ResourcePath::new(WLP)
                .level(CAPABILITIES)
                .resource_type(SYMMETRIX),
            None,
        )?;
        Ok(array_capabilities(&resp, array_id))
    }
}

fn array_capabilities(resp: &Value, array_id: Option<&str>) -> Vec<Value> {
    let capabilities = value_list(resp, "symmetrixCapability");
    match array_id {
        Some(a) => capabilities
            .into_iter()
            .filter(|c| {
                c.get("symmetrixId").and_then(|s| s.as_str()) == Some(a)
            })
            .collect(),
        None => capabilities,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capabilities_of_one_array() {
        let resp = json!({
            "symmetrixCapability": [
                {"symmetrixId": "000197800123", "rdfCapable": true},
                {"symmetrixId": "000197800456", "rdfCapable": false},
            ],
        });
        let caps = array_capabilities(&resp, Some("000197800456"));
        assert_eq!(caps.len(), 1);
        assert_eq!(caps[0]["rdfCapable"], false);
        assert_eq!(array_capabilities(&resp, None).len(), 2);
        assert!(array_capabilities(&resp, Some("000197800789")).is_empty());
        assert!(array_capabilities(&json!({}), None).is_empty());
    }
}
