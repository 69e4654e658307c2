use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Url};
use tracing::debug;

use crate::core::client::metrics_backend::{MetricsBackend, MetricsBackendFactory};
use crate::core::client::prometheus_dto::{PromData, PromResponse};
use crate::domain::dashboard::model::metric_sample::{MetricSample, RangeSeries};
use crate::errors::DashboardError;

/// Prometheus-compatible HTTP client (Prometheus, Thanos Query).
pub struct PrometheusClient {
    client: Client,
    base_url: Url,
}

impl PrometheusClient {
    pub fn new(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    fn api_url(&self, path: &str) -> Result<Url, DashboardError> {
        self.base_url
            .join(path)
            .map_err(|e| DashboardError::Resolution(format!("Invalid metrics endpoint: {}", e)))
    }

    async fn fetch(&self, path: &str, params: &[(&str, String)]) -> Result<PromData, DashboardError> {
        let url = self.api_url(path)?;
        debug!("Querying {} with {:?}", url, params);

        let resp = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(transport_error)?;

        let body: PromResponse = resp.json().await.map_err(transport_error)?;
        into_data(body)
    }
}

fn transport_error(err: reqwest::Error) -> DashboardError {
    if err.is_timeout() {
        DashboardError::Transport(format!("Metrics query timed out: {}", err))
    } else {
        DashboardError::Transport(err.to_string())
    }
}

/// Unwrap a response envelope, turning backend-reported failures into transport errors.
pub fn into_data(body: PromResponse) -> Result<PromData, DashboardError> {
    if body.status != "success" {
        return Err(DashboardError::Transport(format!(
            "Query failed ({}): {}",
            body.error_type.unwrap_or_else(|| "unknown".into()),
            body.error.unwrap_or_default()
        )));
    }

    body.data
        .ok_or_else(|| DashboardError::Transport("Query response has no data".into()))
}

pub fn into_samples(data: PromData) -> Vec<MetricSample> {
    match data {
        PromData::Vector(results) => results
            .into_iter()
            .map(|r| MetricSample {
                labels: r.metric,
                timestamp: r.value.0,
                value: r.value.1,
            })
            .collect(),
        PromData::Matrix(results) => results
            .into_iter()
            .filter_map(|r| {
                let (timestamp, value) = r.values.into_iter().last()?;
                Some(MetricSample {
                    labels: r.metric,
                    timestamp,
                    value,
                })
            })
            .collect(),
        PromData::Scalar((timestamp, value)) | PromData::String((timestamp, value)) => {
            vec![MetricSample {
                labels: Default::default(),
                timestamp,
                value,
            }]
        }
    }
}

pub fn into_series(data: PromData) -> Vec<RangeSeries> {
    match data {
        PromData::Matrix(results) => results
            .into_iter()
            .map(|r| RangeSeries {
                labels: r.metric,
                points: r.values,
            })
            .collect(),
        PromData::Vector(results) => results
            .into_iter()
            .map(|r| RangeSeries {
                labels: r.metric,
                points: vec![r.value],
            })
            .collect(),
        PromData::Scalar(point) | PromData::String(point) => vec![RangeSeries {
            labels: Default::default(),
            points: vec![point],
        }],
    }
}

#[async_trait]
impl MetricsBackend for PrometheusClient {
    async fn instant_query(&self, expr: &str) -> Result<Vec<MetricSample>, DashboardError> {
        let data = self.fetch("api/v1/query", &[("query", expr.to_string())]).await?;
        Ok(into_samples(data))
    }

    async fn range_query(
        &self,
        expr: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        step_secs: i64,
    ) -> Result<Vec<RangeSeries>, DashboardError> {
        let params = [
            ("query", expr.to_string()),
            ("start", start.timestamp().to_string()),
            ("end", end.timestamp().to_string()),
            ("step", step_secs.to_string()),
        ];
        let data = self.fetch("api/v1/query_range", &params).await?;
        Ok(into_series(data))
    }
}

/// Hands out [`PrometheusClient`]s sharing one connection pool.
pub struct PrometheusClientFactory {
    client: Client,
}

impl PrometheusClientFactory {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl MetricsBackendFactory for PrometheusClientFactory {
    fn connect(&self, endpoint: &str) -> Result<Arc<dyn MetricsBackend>, DashboardError> {
        // a trailing slash makes `join` append instead of replacing the last segment
        let normalized = if endpoint.ends_with('/') {
            endpoint.to_string()
        } else {
            format!("{}/", endpoint)
        };

        let base_url = Url::parse(&normalized).map_err(|e| {
            DashboardError::Resolution(format!("Invalid metrics endpoint '{}': {}", endpoint, e))
        })?;

        Ok(Arc::new(PrometheusClient::new(self.client.clone(), base_url)))
    }
}
