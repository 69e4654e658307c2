use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::alert_entity::AlertEventEntity;

#[async_trait]
pub trait AlertStore: Send + Sync {
    /// Pod restart alerts created in `[start, end)`, oldest first.
    async fn fetch_pod_restart_events(
        &self,
        organization_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> anyhow::Result<Vec<AlertEventEntity>>;
}
