use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use kube::{Api, Client};
use tracing::debug;

use crate::core::client::control_plane::{bounded, ServiceEndpoint, ServiceRegistry};
use crate::core::client::kube_resources::Service;
use crate::core::client::mappers::map_service_endpoint;
use crate::errors::DashboardError;

/// Fetch a single service by name and namespace; `None` when it does not exist
pub async fn fetch_service_by_name_and_namespace(
    client: &Client,
    namespace: &str,
    name: &str,
) -> Result<Option<Service>> {
    let services: Api<Service> = Api::namespaced(client.clone(), namespace);
    let svc = services.get_opt(name).await?;

    debug!(
        "Fetched service {}/{} (found: {})",
        namespace,
        name,
        svc.is_some()
    );
    Ok(svc)
}

/// [`ServiceRegistry`] backed by one cluster's API server.
pub struct KubeServiceRegistry {
    client: Client,
    timeout: Duration,
}

impl KubeServiceRegistry {
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait]
impl ServiceRegistry for KubeServiceRegistry {
    async fn get_service(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<ServiceEndpoint>, DashboardError> {
        let lookup = async {
            fetch_service_by_name_and_namespace(&self.client, namespace, name)
                .await
                .map_err(|e| {
                    DashboardError::Transport(format!(
                        "Failed to get service {}/{}: {}",
                        namespace, name, e
                    ))
                })
        };

        let service = bounded(self.timeout, "service lookup", lookup).await?;
        Ok(service.as_ref().map(map_service_endpoint))
    }
}
