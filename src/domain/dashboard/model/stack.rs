use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::persistence::cluster::cluster_entity::ClusterStatus;

/// Memory and disk gauges of every cluster, one sample per `(metric, cluster)`.
pub const STACK_MEMORY_DISK_QUERY: &str = "sum by (__name__, taco_cluster) ({__name__=~\"node_memory_MemFree_bytes|machine_memory_bytes|kubelet_volume_stats_used_bytes|kubelet_volume_stats_capacity_bytes\"})";
pub const STACK_CPU_QUERY: &str = "avg by (taco_cluster) (instance:node_cpu:ratio*100)";

pub const TOTAL_CPU_QUERY: &str = "sum by (taco_cluster) (machine_cpu_cores)";
pub const TOTAL_MEMORY_QUERY: &str = "sum by (taco_cluster) (machine_memory_bytes)";
pub const TOTAL_STORAGE_QUERY: &str = "sum by (taco_cluster) (kubelet_volume_stats_capacity_bytes)";

/// Dashboard card for one stack.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: ClusterStatus,
    pub created_at: DateTime<Utc>,
    /// `"12.34 %"` or empty when the cluster reports nothing.
    pub cpu: String,
    pub memory: String,
    pub storage: String,
}

/// Organization-wide resource totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceTotals {
    pub stack_count: usize,
    pub cpu_cores: u64,
    pub memory_gb: u64,
    pub storage_gb: u64,
}

/// Move running stacks in front of everything else, keeping input order
/// within each group.
pub fn running_first(stacks: &mut [StackSummary]) {
    stacks.sort_by_key(|s| s.status != ClusterStatus::Running);
}
