// Kube-rs based Kubernetes client
pub mod control_plane;
pub mod kube_client;
pub mod kube_resources;
pub mod mappers;
pub mod services;

// Metrics backend clients
pub mod metrics_backend;
pub mod prometheus_client;
pub mod prometheus_dto;
