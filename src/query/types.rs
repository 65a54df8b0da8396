use ahash::AHashMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{METRIC_NAME_LABEL, SERIES_NAME_LABEL};

/// Identifying label set of a time series.
pub type LabelSet = AHashMap<String, String>;

/// Raw sample as sent on the wire: `[<unix seconds>, "<value>"]`.
///
/// Timestamps are fractional seconds since the epoch; values arrive as
/// decimal strings and are only parsed at the resampling boundary.
pub type RawSample = (f64, String);

static EMPTY_STRING: &str = "";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    #[default]
    Success,
    Error,
}

/// Top-level envelope of the query HTTP API.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub status: ResponseStatus,
    #[serde(default)]
    pub data: QueryResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(
        default,
        rename = "errorType",
        skip_serializing_if = "Option::is_none"
    )]
    pub error_type: Option<String>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultType {
    #[default]
    Matrix,
    Vector,
    Scalar,
    String,
}

/// Result represents the expected response from the query endpoint.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    #[serde(rename = "resultType")]
    pub result_type: ResultType,
    /// List of received series, in response order.
    pub result: Vec<Series>,
}

/// Series is the basic entity returned by the query endpoint.
///
/// Range (matrix) results populate `values`, instant (vector) results
/// populate `value`.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    #[serde(default)]
    pub metric: LabelSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<RawSample>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<RawSample>>,
}

impl Series {
    /// Returns the given label value.
    /// If the label is missing an empty string will be returned.
    pub fn label(&self, name: &str) -> &str {
        match self.metric.get(name) {
            Some(value) => value,
            None => EMPTY_STRING,
        }
    }

    /// The label value the dashboard names this series by.
    pub fn display_name(&self) -> Option<&str> {
        self.metric.get(SERIES_NAME_LABEL).map(String::as_str)
    }

    /// Raw range samples, empty for instant results.
    pub fn samples(&self) -> &[RawSample] {
        self.values.as_deref().unwrap_or_default()
    }

    /// Formats the full metric name, e.g. `message{guildId="42",type="text"}`.
    /// Labels are emitted in sorted order so the output is deterministic.
    pub fn metric_name(&self) -> String {
        let name = self.label(METRIC_NAME_LABEL);
        let mut labels: Vec<(&String, &String)> = self
            .metric
            .iter()
            .filter(|(key, _)| key.as_str() != METRIC_NAME_LABEL)
            .collect();
        labels.sort_by(|a, b| a.0.cmp(b.0));

        let size_hint = name.len()
            + labels
                .iter()
                .map(|(k, v)| k.len() + v.len() + 4)
                .sum::<usize>();
        let mut full_name = String::with_capacity(size_hint);
        full_name.push_str(name);
        if !labels.is_empty() {
            full_name.push('{');
            for (i, (key, value)) in labels.iter().enumerate() {
                if i > 0 {
                    full_name.push(',');
                }
                full_name.push_str(key);
                full_name.push('=');
                full_name.push_str(&enquote::enquote('"', value));
            }
            full_name.push('}');
        }
        full_name
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertState {
    #[default]
    Inactive,
    Pending,
    Firing,
}

/// A single alert as listed by the alerts endpoint.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(default)]
    pub labels: LabelSet,
    #[serde(default)]
    pub annotations: LabelSet,
    pub state: AlertState,
    #[serde(
        default,
        rename = "activeAt",
        skip_serializing_if = "Option::is_none"
    )]
    pub active_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label_set(pairs: &[(&str, &str)]) -> LabelSet {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn deserialize_matrix_response() -> anyhow::Result<()> {
        let body = r#"{
            "status": "success",
            "data": {
                "resultType": "matrix",
                "result": [
                    {
                        "metric": {"__name__": "message", "guildId": "42"},
                        "values": [[0, "10"], [2, "20"], [4, "30"]]
                    }
                ]
            }
        }"#;
        let response: QueryResponse = serde_json::from_str(body)?;
        assert_eq!(response.status, ResponseStatus::Success);
        assert_eq!(response.data.result_type, ResultType::Matrix);
        assert_eq!(response.data.result.len(), 1);

        let series = &response.data.result[0];
        assert_eq!(series.display_name(), Some("42"));
        assert_eq!(
            series.samples(),
            &[(0.0, "10".to_string()), (2.0, "20".to_string()), (4.0, "30".to_string())]
        );
        Ok(())
    }

    #[test]
    fn deserialize_vector_response() -> anyhow::Result<()> {
        let body = r#"{
            "status": "success",
            "data": {
                "resultType": "vector",
                "result": [
                    {"metric": {"guildId": "7"}, "value": [1625097600, "3"]}
                ]
            }
        }"#;
        let response: QueryResponse = serde_json::from_str(body)?;
        let series = &response.data.result[0];
        assert_eq!(series.value, Some((1625097600.0, "3".to_string())));
        assert!(series.samples().is_empty());
        Ok(())
    }

    #[test]
    fn deserialize_error_response() -> anyhow::Result<()> {
        let body = r#"{"status": "error", "errorType": "bad_data", "error": "invalid expression"}"#;
        let response: QueryResponse = serde_json::from_str(body)?;
        assert_eq!(response.status, ResponseStatus::Error);
        assert_eq!(response.error_type.as_deref(), Some("bad_data"));
        assert!(response.data.result.is_empty());
        Ok(())
    }

    #[test]
    fn label_returns_empty_string_when_missing() {
        let series = Series {
            metric: label_set(&[("guildId", "42")]),
            ..Default::default()
        };
        assert_eq!(series.label("guildId"), "42");
        assert_eq!(series.label("userId"), "");
    }

    #[test]
    fn display_name_requires_guild_label() {
        let series = Series {
            metric: label_set(&[("userId", "9")]),
            ..Default::default()
        };
        assert_eq!(series.display_name(), None);
    }

    #[test]
    fn metric_name_is_sorted_and_quoted() {
        let series = Series {
            metric: label_set(&[
                ("__name__", "message"),
                ("type", "text"),
                ("guildId", "42"),
            ]),
            ..Default::default()
        };
        assert_eq!(series.metric_name(), r#"message{guildId="42",type="text"}"#);
    }

    #[test]
    fn metric_name_escapes_quotes() {
        let series = Series {
            metric: label_set(&[("__name__", "message"), ("content", "say \"hi\"")]),
            ..Default::default()
        };
        assert_eq!(
            series.metric_name(),
            r#"message{content="say \"hi\""}"#
        );
    }

    #[test]
    fn deserialize_alerts() -> anyhow::Result<()> {
        let body = r#"[
            {
                "labels": {"alertname": "HighMessageRate", "guildId": "42"},
                "annotations": {"summary": "message rate too high"},
                "state": "firing",
                "activeAt": "2024-05-01T10:00:00Z",
                "value": "1e+00"
            }
        ]"#;
        let alerts: Vec<Alert> = serde_json::from_str(body)?;
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].state, AlertState::Firing);
        assert_eq!(alerts[0].labels.get("alertname").map(String::as_str), Some("HighMessageRate"));
        Ok(())
    }
}
