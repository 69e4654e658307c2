use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::errors::DashboardError;

/// The parts of a Kubernetes Service needed to build a metrics endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoint {
    /// Service type, e.g. `LoadBalancer`.
    pub kind: String,
    pub ingress_hostname: Option<String>,
    pub port: Option<i32>,
    /// Named target port of the first service port, used as URL scheme.
    pub target_port_scheme: Option<String>,
}

/// Service lookup inside one cluster.
#[async_trait]
pub trait ServiceRegistry: Send + Sync {
    /// `Ok(None)` when the service does not exist.
    async fn get_service(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<ServiceEndpoint>, DashboardError>;
}

/// Access to the control plane of managed clusters.
#[async_trait]
pub trait ClusterControlPlane: Send + Sync {
    async fn service_registry(
        &self,
        cluster_id: &str,
    ) -> Result<Arc<dyn ServiceRegistry>, DashboardError>;
}

/// Run an outbound call under `timeout`; expiry is reported as a transport failure.
pub async fn bounded<T, F>(timeout: Duration, what: &str, fut: F) -> Result<T, DashboardError>
where
    F: Future<Output = Result<T, DashboardError>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result,
        Err(_) => Err(DashboardError::Transport(format!(
            "{} timed out after {}s",
            what,
            timeout.as_secs()
        ))),
    }
}
