use std::collections::BTreeMap;

use thiserror::Error;

/// Label carrying the cluster identifier on every dashboard series.
pub const CLUSTER_LABEL: &str = "taco_cluster";

/// Label carrying the metric name on multi-metric queries.
pub const METRIC_NAME_LABEL: &str = "__name__";

/// One point-in-time sample from an instant query.
///
/// Values stay text until a caller decides how to degrade a bad one.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    pub labels: BTreeMap<String, String>,
    pub timestamp: f64,
    pub value: String,
}

/// One series from a range query. Timestamps are non-decreasing inside a
/// series but are not aligned with other series.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeSeries {
    pub labels: BTreeMap<String, String>,
    pub points: Vec<(f64, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid metric value '{raw}'")]
pub struct ParseError {
    pub raw: String,
}

impl MetricSample {
    pub fn cluster_id(&self) -> Option<&str> {
        self.labels.get(CLUSTER_LABEL).map(String::as_str)
    }

    pub fn metric_name(&self) -> Option<&str> {
        self.labels.get(METRIC_NAME_LABEL).map(String::as_str)
    }
}

impl RangeSeries {
    pub fn cluster_id(&self) -> Option<&str> {
        self.labels.get(CLUSTER_LABEL).map(String::as_str)
    }
}

/// Parse a wire value as a finite float. `NaN` and infinities are rejected so
/// they render as gaps instead of leaking into charts.
pub fn parse_metric_value(raw: &str) -> Result<f64, ParseError> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ParseError {
            raw: raw.to_string(),
        }),
    }
}

/// Parse a wire value that must be a whole number (core counts, byte totals).
pub fn parse_whole_number(raw: &str) -> Result<i64, ParseError> {
    raw.trim().parse::<i64>().map_err(|_| ParseError {
        raw: raw.to_string(),
    })
}
