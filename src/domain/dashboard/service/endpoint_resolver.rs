use std::sync::Arc;

use tracing::{debug, info};

use crate::core::cache::ttl_cache_trait::TtlCache;
use crate::core::client::control_plane::{ClusterControlPlane, ServiceEndpoint};
use crate::core::persistence::organization::organization_repository_trait::OrganizationDirectory;
use crate::errors::{internal_error, DashboardError};

const CACHE_PREFIX: &str = "metrics-endpoint:";

/// Query frontend, preferred when deployed.
pub const PRIMARY_SERVICE: &str = "thanos-query-frontend";
pub const FALLBACK_SERVICE: &str = "thanos-query";
pub const LOAD_BALANCER: &str = "LoadBalancer";

/// Resolves the metrics endpoint of an organization through its primary cluster.
pub struct EndpointResolver {
    organizations: Arc<dyn OrganizationDirectory>,
    control_plane: Arc<dyn ClusterControlPlane>,
    cache: Arc<dyn TtlCache>,
    namespace: String,
}

impl EndpointResolver {
    pub fn new(
        organizations: Arc<dyn OrganizationDirectory>,
        control_plane: Arc<dyn ClusterControlPlane>,
        cache: Arc<dyn TtlCache>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            organizations,
            control_plane,
            cache,
            namespace: namespace.into(),
        }
    }

    /// `scheme://host:port` of the organization's metrics backend.
    ///
    /// Only successful resolutions are cached.
    pub async fn resolve(&self, organization_id: &str) -> Result<String, DashboardError> {
        let key = format!("{}{}", CACHE_PREFIX, organization_id);
        if let Some(url) = self.cache.get(&key).await {
            debug!("Metrics endpoint cache hit for {}", organization_id);
            return Ok(url);
        }

        let organization = self
            .organizations
            .get(organization_id)
            .await
            .map_err(internal_error)?
            .ok_or_else(|| DashboardError::TenantNotFound(organization_id.to_string()))?;

        let cluster_id = organization.primary_cluster().ok_or_else(|| {
            DashboardError::Configuration(format!(
                "Organization {} has no primary cluster",
                organization_id
            ))
        })?;

        let registry = self.control_plane.service_registry(cluster_id).await?;

        let service = match registry.get_service(&self.namespace, PRIMARY_SERVICE).await? {
            Some(svc) => svc,
            None => registry
                .get_service(&self.namespace, FALLBACK_SERVICE)
                .await?
                .ok_or_else(|| {
                    DashboardError::Resolution(format!(
                        "Neither {} nor {} found in {}/{}",
                        PRIMARY_SERVICE, FALLBACK_SERVICE, cluster_id, self.namespace
                    ))
                })?,
        };

        let url = compose_endpoint(&service)?;

        self.cache.set(&key, url.clone()).await;
        info!("Resolved metrics endpoint for {}: {}", organization_id, url);
        Ok(url)
    }
}

/// Build `scheme://host:port` from a load-balanced service.
pub fn compose_endpoint(service: &ServiceEndpoint) -> Result<String, DashboardError> {
    if service.kind != LOAD_BALANCER {
        return Err(DashboardError::Resolution(format!(
            "Service type is not LoadBalancer [{}]",
            service.kind
        )));
    }

    let scheme = service
        .target_port_scheme
        .as_deref()
        .ok_or_else(|| DashboardError::Resolution("Service port has no named target port".into()))?;
    let host = service
        .ingress_hostname
        .as_deref()
        .ok_or_else(|| DashboardError::Resolution("Load balancer has no ingress hostname".into()))?;
    let port = service
        .port
        .ok_or_else(|| DashboardError::Resolution("Service exposes no port".into()))?;

    Ok(format!("{}://{}:{}", scheme, host, port))
}
