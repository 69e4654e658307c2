use async_trait::async_trait;

use super::cluster_entity::ClusterEntity;

/// Cluster registry lookups used by the dashboard.
#[async_trait]
pub trait ClusterRegistry: Send + Sync {
    /// All clusters of an organization, in registry order.
    async fn list_by_organization(&self, organization_id: &str)
        -> anyhow::Result<Vec<ClusterEntity>>;

    async fn get(&self, cluster_id: &str) -> anyhow::Result<Option<ClusterEntity>>;
}
