use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::core::persistence::json_file::read_json_list;
use crate::core::persistence::storage_path::alerts_path;

use super::alert_entity::{AlertEventEntity, POD_RESTART_ALERT_NAME};
use super::alert_repository_trait::AlertStore;

/// Reads alert events from `alerts.json` under the data directory.
pub struct AlertFsAdapter {
    data_dir: PathBuf,
}

impl AlertFsAdapter {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }
}

#[async_trait]
impl AlertStore for AlertFsAdapter {
    async fn fetch_pod_restart_events(
        &self,
        organization_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<AlertEventEntity>> {
        let mut events: Vec<AlertEventEntity> = read_json_list::<AlertEventEntity>(
            &alerts_path(&self.data_dir),
        )?
        .into_iter()
        .filter(|a| {
            a.organization_id == organization_id
                && a.name == POD_RESTART_ALERT_NAME
                && a.created_at >= start
                && a.created_at < end
        })
        .collect();

        events.sort_by_key(|a| a.created_at);
        Ok(events)
    }
}
