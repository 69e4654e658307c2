use std::sync::Arc;

use tracing::{debug, warn};

use crate::core::cache::ttl_cache_trait::TtlCache;
use crate::core::persistence::cluster::cluster_repository_trait::ClusterRegistry;

const CACHE_PREFIX: &str = "cluster-name:";

/// Cluster id → display name, degrading to the id when the registry fails.
pub struct NameResolver {
    clusters: Arc<dyn ClusterRegistry>,
    cache: Arc<dyn TtlCache>,
}

impl NameResolver {
    pub fn new(clusters: Arc<dyn ClusterRegistry>, cache: Arc<dyn TtlCache>) -> Self {
        Self { clusters, cache }
    }

    pub async fn resolve(&self, cluster_id: &str) -> String {
        let key = format!("{}{}", CACHE_PREFIX, cluster_id);
        if let Some(name) = self.cache.get(&key).await {
            debug!("Cluster name cache hit for {}", cluster_id);
            return name;
        }

        match self.clusters.get(cluster_id).await {
            Ok(Some(cluster)) => {
                self.cache.set(&key, cluster.name.clone()).await;
                cluster.name
            }
            Ok(None) => {
                warn!("Cluster {} not found in registry, using id as name", cluster_id);
                cluster_id.to_string()
            }
            Err(e) => {
                warn!("Failed to get cluster {}: {:?}", cluster_id, e);
                cluster_id.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cache::ttl_cache::InMemoryTtlCache;
    use crate::core::persistence::cluster::cluster_entity::ClusterStatus;
    use crate::domain::dashboard::service::test_support::{cluster, MockClusters};
    use std::time::Duration;

    #[tokio::test]
    async fn caches_resolved_names() {
        let clusters = Arc::new(MockClusters::new(vec![cluster(
            "c1",
            "org-1",
            "production",
            ClusterStatus::Running,
        )]));
        let resolver = NameResolver::new(
            clusters.clone(),
            InMemoryTtlCache::new(Duration::from_secs(300)).shared(),
        );

        assert_eq!(resolver.resolve("c1").await, "production");
        assert_eq!(resolver.resolve("c1").await, "production");
        assert_eq!(clusters.get_calls(), 1);
    }

    #[tokio::test]
    async fn registry_failure_falls_back_to_id_without_caching() {
        let clusters = Arc::new(MockClusters::failing());
        let cache = InMemoryTtlCache::new(Duration::from_secs(300)).shared();
        let resolver = NameResolver::new(clusters.clone(), cache.clone());

        assert_eq!(resolver.resolve("c9").await, "c9");
        assert_eq!(resolver.resolve("c9").await, "c9");
        assert_eq!(clusters.get_calls(), 2);
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn unknown_cluster_falls_back_to_id() {
        let resolver = NameResolver::new(
            Arc::new(MockClusters::new(vec![])),
            InMemoryTtlCache::new(Duration::from_secs(300)).shared(),
        );

        assert_eq!(resolver.resolve("ghost").await, "ghost");
    }
}
