use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::dashboard::model::metric_sample::{MetricSample, RangeSeries};
use crate::errors::DashboardError;

/// Query surface of a time-series backend.
#[async_trait]
pub trait MetricsBackend: Send + Sync {
    async fn instant_query(&self, expr: &str) -> Result<Vec<MetricSample>, DashboardError>;

    async fn range_query(
        &self,
        expr: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        step_secs: i64,
    ) -> Result<Vec<RangeSeries>, DashboardError>;
}

/// Builds a backend handle for a resolved endpoint URL.
pub trait MetricsBackendFactory: Send + Sync {
    fn connect(&self, endpoint: &str) -> Result<Arc<dyn MetricsBackend>, DashboardError>;
}
