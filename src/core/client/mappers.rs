/// Maps k8s-openapi types → dashboard models
use crate::core::client::control_plane::ServiceEndpoint;
use crate::core::client::kube_resources::{IntOrString, Service};

/// Converts a Service into the endpoint fields the dashboard needs.
///
/// Only the first port and the first load-balancer ingress are considered.
pub fn map_service_endpoint(service: &Service) -> ServiceEndpoint {
    let spec = service.spec.as_ref();

    let kind = spec
        .and_then(|s| s.type_.clone())
        .unwrap_or_else(|| "ClusterIP".to_string());

    let first_port = spec.and_then(|s| s.ports.as_ref()).and_then(|p| p.first());

    let port = first_port.map(|p| p.port);

    let target_port_scheme = first_port
        .and_then(|p| p.target_port.as_ref())
        .and_then(|tp| match tp {
            IntOrString::String(name) if !name.is_empty() => Some(name.clone()),
            _ => None,
        });

    let ingress_hostname = service
        .status
        .as_ref()
        .and_then(|s| s.load_balancer.as_ref())
        .and_then(|lb| lb.ingress.as_ref())
        .and_then(|ingress| ingress.first())
        .and_then(|i| i.hostname.clone())
        .filter(|h| !h.is_empty());

    ServiceEndpoint {
        kind,
        ingress_hostname,
        port,
        target_port_scheme,
    }
}
