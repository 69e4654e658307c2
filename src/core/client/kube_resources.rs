/// Re-export the Kubernetes resource types used by the control-plane adapters

pub use k8s_openapi::api::core::v1::{
    LoadBalancerIngress,
    LoadBalancerStatus,
    Secret,
    Service,
    ServicePort,
    ServiceSpec,
    ServiceStatus,
};

pub use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
