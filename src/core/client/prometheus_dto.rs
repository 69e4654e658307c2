use std::collections::BTreeMap;

use serde::Deserialize;

// ── Prometheus HTTP API response types ──

#[derive(Debug, Deserialize)]
pub struct PromResponse {
    pub status: String,
    #[serde(default)]
    pub data: Option<PromData>,
    #[serde(rename = "errorType", default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "resultType", content = "result", rename_all = "lowercase")]
pub enum PromData {
    Vector(Vec<VectorResult>),
    Matrix(Vec<MatrixResult>),
    Scalar((f64, String)),
    String((f64, String)),
}

#[derive(Debug, Deserialize)]
pub struct VectorResult {
    #[serde(default)]
    pub metric: BTreeMap<String, String>,
    pub value: (f64, String), // (timestamp, value_string)
}

#[derive(Debug, Deserialize)]
pub struct MatrixResult {
    #[serde(default)]
    pub metric: BTreeMap<String, String>,
    pub values: Vec<(f64, String)>, // [(timestamp, value_string), ...]
}
