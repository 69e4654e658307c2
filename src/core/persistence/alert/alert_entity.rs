use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Alert name raised when a pod restarts repeatedly.
pub const POD_RESTART_ALERT_NAME: &str = "pod-restart-frequently";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertEventEntity {
    pub id: String,
    pub organization_id: String,
    #[serde(default)]
    pub cluster_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
