use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::AppConfig;
use crate::core::cache::ttl_cache::InMemoryTtlCache;
use crate::core::client::kube_client::{build_kube_client, KubeControlPlane};
use crate::core::client::prometheus_client::PrometheusClientFactory;
use crate::core::persistence::alert::alert_fs_adapter::AlertFsAdapter;
use crate::core::persistence::cluster::cluster_fs_adapter::ClusterFsAdapter;
use crate::core::persistence::organization::organization_fs_adapter::OrganizationFsAdapter;
use crate::domain::dashboard::service::dashboard_service::DashboardService;

#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: Arc<DashboardService>,
    /// Shared endpoint and cluster-name cache, also handed to the janitor.
    pub cache: Arc<InMemoryTtlCache>,
}

pub async fn build_app_state(config: &AppConfig) -> Result<AppState> {
    let cache = InMemoryTtlCache::new(config.cache_ttl).shared();

    let admin = build_kube_client()
        .await
        .context("Failed to create admin Kubernetes client")?;

    let http = reqwest::Client::builder()
        .timeout(config.outbound_timeout)
        .build()
        .context("Failed to create metrics HTTP client")?;

    let dashboard_service = DashboardService::new(
        Arc::new(OrganizationFsAdapter::new(&config.data_dir)),
        Arc::new(ClusterFsAdapter::new(&config.data_dir)),
        Arc::new(AlertFsAdapter::new(&config.data_dir)),
        Arc::new(KubeControlPlane::new(admin, config.outbound_timeout)),
        Arc::new(PrometheusClientFactory::new(http)),
        cache.clone(),
        config.metrics_namespace.clone(),
    );

    info!(
        "Dashboard service ready (data dir {}, metrics namespace {})",
        config.data_dir.display(),
        config.metrics_namespace
    );

    Ok(AppState {
        dashboard_service: Arc::new(dashboard_service),
        cache,
    })
}
