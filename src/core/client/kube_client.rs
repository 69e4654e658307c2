use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Api, Client, Config};
use tracing::debug;

use crate::core::client::control_plane::{bounded, ClusterControlPlane, ServiceRegistry};
use crate::core::client::kube_resources::Secret;
use crate::core::client::services::KubeServiceRegistry;
use crate::errors::DashboardError;

/// Secret key holding a cluster's kubeconfig.
pub const KUBECONFIG_SECRET_KEY: &str = "value";

/// Creates a client for the admin cluster (in-cluster config or local kubeconfig)
pub async fn build_kube_client() -> Result<Client> {
    let client = Client::try_default().await?;

    debug!("Kubernetes admin client initialized successfully");
    Ok(client)
}

/// Secret name holding the kubeconfig of a managed cluster. The secret lives
/// in a namespace named after the cluster.
pub fn kubeconfig_secret_name(cluster_id: &str) -> String {
    format!("{}-tks-kubeconfig", cluster_id)
}

/// Creates a client from raw kubeconfig YAML with bounded connect/read times
pub async fn client_from_kubeconfig(yaml: &str, timeout: Duration) -> Result<Client> {
    let kubeconfig = Kubeconfig::from_yaml(yaml)?;
    let mut config = Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default()).await?;
    config.connect_timeout = Some(timeout);
    config.read_timeout = Some(timeout);

    Ok(Client::try_from(config)?)
}

async fn fetch_cluster_kubeconfig(admin: &Client, cluster_id: &str) -> Result<String, DashboardError> {
    let secrets: Api<Secret> = Api::namespaced(admin.clone(), cluster_id);
    let name = kubeconfig_secret_name(cluster_id);

    let secret = secrets
        .get_opt(&name)
        .await
        .map_err(|e| DashboardError::Transport(format!("Failed to read secret {}/{}: {}", cluster_id, name, e)))?
        .ok_or_else(|| {
            DashboardError::Resolution(format!("Kubeconfig secret {}/{} not found", cluster_id, name))
        })?;

    let raw = secret
        .data
        .as_ref()
        .and_then(|data| data.get(KUBECONFIG_SECRET_KEY))
        .ok_or_else(|| {
            DashboardError::Resolution(format!(
                "Secret {}/{} has no '{}' key",
                cluster_id, name, KUBECONFIG_SECRET_KEY
            ))
        })?;

    String::from_utf8(raw.0.clone()).map_err(|_| {
        DashboardError::Resolution(format!("Kubeconfig of cluster {} is not UTF-8", cluster_id))
    })
}

/// Reaches managed clusters through kubeconfigs stored on the admin cluster.
pub struct KubeControlPlane {
    admin: Client,
    timeout: Duration,
}

impl KubeControlPlane {
    pub fn new(admin: Client, timeout: Duration) -> Self {
        Self { admin, timeout }
    }
}

#[async_trait]
impl ClusterControlPlane for KubeControlPlane {
    async fn service_registry(
        &self,
        cluster_id: &str,
    ) -> Result<Arc<dyn ServiceRegistry>, DashboardError> {
        let yaml = bounded(
            self.timeout,
            "kubeconfig lookup",
            fetch_cluster_kubeconfig(&self.admin, cluster_id),
        )
        .await?;

        let client = client_from_kubeconfig(&yaml, self.timeout)
            .await
            .map_err(|e| {
                DashboardError::Resolution(format!(
                    "Failed to build client for cluster {}: {}",
                    cluster_id, e
                ))
            })?;

        debug!("Built control-plane client for cluster {}", cluster_id);
        Ok(Arc::new(KubeServiceRegistry::new(client, self.timeout)))
    }
}
