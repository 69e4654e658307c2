//! Hand-written collaborators for service tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::core::client::control_plane::{ClusterControlPlane, ServiceEndpoint, ServiceRegistry};
use crate::core::client::metrics_backend::{MetricsBackend, MetricsBackendFactory};
use crate::core::persistence::alert::alert_entity::{AlertEventEntity, POD_RESTART_ALERT_NAME};
use crate::core::persistence::alert::alert_repository_trait::AlertStore;
use crate::core::persistence::cluster::cluster_entity::{ClusterEntity, ClusterStatus};
use crate::core::persistence::cluster::cluster_repository_trait::ClusterRegistry;
use crate::core::persistence::organization::organization_entity::OrganizationEntity;
use crate::core::persistence::organization::organization_repository_trait::OrganizationDirectory;
use crate::domain::dashboard::model::metric_sample::{MetricSample, RangeSeries, CLUSTER_LABEL, METRIC_NAME_LABEL};
use crate::errors::DashboardError;

pub fn load_balancer() -> ServiceEndpoint {
    ServiceEndpoint {
        kind: "LoadBalancer".into(),
        ingress_hostname: Some("thanos.example.com".into()),
        port: Some(9090),
        target_port_scheme: Some("http".into()),
    }
}

pub fn cluster(id: &str, organization_id: &str, name: &str, status: ClusterStatus) -> ClusterEntity {
    ClusterEntity {
        id: id.into(),
        organization_id: organization_id.into(),
        name: name.into(),
        description: format!("{} stack", name),
        status,
        created_at: DateTime::<Utc>::UNIX_EPOCH,
    }
}

pub fn instant(cluster_id: &str, metric: Option<&str>, value: &str) -> MetricSample {
    let mut labels = std::collections::BTreeMap::new();
    labels.insert(CLUSTER_LABEL.to_string(), cluster_id.to_string());
    if let Some(name) = metric {
        labels.insert(METRIC_NAME_LABEL.to_string(), name.to_string());
    }
    MetricSample {
        labels,
        timestamp: 1_700_000_000.0,
        value: value.into(),
    }
}

pub fn range(cluster_id: &str, points: &[(f64, &str)]) -> RangeSeries {
    let mut labels = std::collections::BTreeMap::new();
    labels.insert(CLUSTER_LABEL.to_string(), cluster_id.to_string());
    RangeSeries {
        labels,
        points: points.iter().map(|(t, v)| (*t, v.to_string())).collect(),
    }
}

#[derive(Default)]
pub struct MockOrganizations {
    organizations: Vec<OrganizationEntity>,
}

impl MockOrganizations {
    pub fn with(id: &str, primary_cluster_id: Option<&str>) -> Self {
        Self {
            organizations: vec![OrganizationEntity {
                id: id.into(),
                name: format!("{} org", id),
                primary_cluster_id: primary_cluster_id.map(str::to_string),
            }],
        }
    }
}

#[async_trait]
impl OrganizationDirectory for MockOrganizations {
    async fn get(&self, organization_id: &str) -> anyhow::Result<Option<OrganizationEntity>> {
        Ok(self
            .organizations
            .iter()
            .find(|o| o.id == organization_id)
            .cloned())
    }
}

struct MockRegistry {
    services: HashMap<String, ServiceEndpoint>,
}

#[async_trait]
impl ServiceRegistry for MockRegistry {
    async fn get_service(
        &self,
        _namespace: &str,
        name: &str,
    ) -> Result<Option<ServiceEndpoint>, DashboardError> {
        Ok(self.services.get(name).cloned())
    }
}

/// Control plane with canned services; counts handle acquisitions.
#[derive(Default)]
pub struct MockControlPlane {
    services: HashMap<String, HashMap<String, ServiceEndpoint>>,
    calls: Mutex<usize>,
}

impl MockControlPlane {
    pub fn with_service(mut self, cluster_id: &str, name: &str, endpoint: ServiceEndpoint) -> Self {
        self.services
            .entry(cluster_id.to_string())
            .or_default()
            .insert(name.to_string(), endpoint);
        self
    }

    pub fn registry_calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl ClusterControlPlane for MockControlPlane {
    async fn service_registry(
        &self,
        cluster_id: &str,
    ) -> Result<Arc<dyn ServiceRegistry>, DashboardError> {
        *self.calls.lock().unwrap() += 1;
        let registry: Arc<dyn ServiceRegistry> = Arc::new(MockRegistry {
            services: self.services.get(cluster_id).cloned().unwrap_or_default(),
        });
        Ok(registry)
    }
}

pub struct MockClusters {
    clusters: Vec<ClusterEntity>,
    failing: bool,
    get_calls: Mutex<usize>,
}

impl MockClusters {
    pub fn new(clusters: Vec<ClusterEntity>) -> Self {
        Self {
            clusters,
            failing: false,
            get_calls: Mutex::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::new(vec![])
        }
    }

    pub fn get_calls(&self) -> usize {
        *self.get_calls.lock().unwrap()
    }
}

#[async_trait]
impl ClusterRegistry for MockClusters {
    async fn list_by_organization(&self, organization_id: &str) -> anyhow::Result<Vec<ClusterEntity>> {
        if self.failing {
            return Err(anyhow!("registry unavailable"));
        }
        Ok(self
            .clusters
            .iter()
            .filter(|c| c.organization_id == organization_id)
            .cloned()
            .collect())
    }

    async fn get(&self, cluster_id: &str) -> anyhow::Result<Option<ClusterEntity>> {
        *self.get_calls.lock().unwrap() += 1;
        if self.failing {
            return Err(anyhow!("registry unavailable"));
        }
        Ok(self.clusters.iter().find(|c| c.id == cluster_id).cloned())
    }
}

/// Alert store that records the requested ranges.
#[derive(Default)]
pub struct MockAlerts {
    created_at: Vec<DateTime<Utc>>,
    requested: Mutex<Vec<(DateTime<Utc>, DateTime<Utc>)>>,
}

impl MockAlerts {
    pub fn new(created_at: Vec<DateTime<Utc>>) -> Self {
        Self {
            created_at,
            requested: Mutex::new(vec![]),
        }
    }

    pub fn requested(&self) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl AlertStore for MockAlerts {
    async fn fetch_pod_restart_events(
        &self,
        organization_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> anyhow::Result<Vec<AlertEventEntity>> {
        self.requested.lock().unwrap().push((start, end));
        Ok(self
            .created_at
            .iter()
            .filter(|t| **t >= start && **t < end)
            .enumerate()
            .map(|(i, t)| AlertEventEntity {
                id: format!("a{}", i),
                organization_id: organization_id.into(),
                cluster_id: String::new(),
                name: POD_RESTART_ALERT_NAME.into(),
                created_at: *t,
            })
            .collect())
    }
}

/// Backend answering from canned results keyed by query expression.
#[derive(Default)]
pub struct MockBackend {
    instant: HashMap<String, Vec<MetricSample>>,
    range: HashMap<String, Vec<RangeSeries>>,
    fail_with: Option<String>,
    range_calls: Mutex<Vec<(String, i64, i64)>>,
    instant_calls: Mutex<usize>,
}

impl MockBackend {
    pub fn with_instant(mut self, expr: &str, samples: Vec<MetricSample>) -> Self {
        self.instant.insert(expr.to_string(), samples);
        self
    }

    pub fn with_range(mut self, expr: &str, series: Vec<RangeSeries>) -> Self {
        self.range.insert(expr.to_string(), series);
        self
    }

    pub fn unreachable(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// `(expr, end - start, step)` per range query, in call order.
    pub fn range_calls(&self) -> Vec<(String, i64, i64)> {
        self.range_calls.lock().unwrap().clone()
    }

    pub fn instant_calls(&self) -> usize {
        *self.instant_calls.lock().unwrap()
    }
}

#[async_trait]
impl MetricsBackend for MockBackend {
    async fn instant_query(&self, expr: &str) -> Result<Vec<MetricSample>, DashboardError> {
        *self.instant_calls.lock().unwrap() += 1;
        if let Some(msg) = &self.fail_with {
            return Err(DashboardError::Transport(msg.clone()));
        }
        Ok(self.instant.get(expr).cloned().unwrap_or_default())
    }

    async fn range_query(
        &self,
        expr: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        step_secs: i64,
    ) -> Result<Vec<RangeSeries>, DashboardError> {
        self.range_calls.lock().unwrap().push((
            expr.to_string(),
            (end - start).num_seconds(),
            step_secs,
        ));
        if let Some(msg) = &self.fail_with {
            return Err(DashboardError::Transport(msg.clone()));
        }
        Ok(self.range.get(expr).cloned().unwrap_or_default())
    }
}

/// Hands out one shared backend and remembers the endpoints asked for.
pub struct MockBackendFactory {
    backend: Arc<MockBackend>,
    endpoints: Mutex<Vec<String>>,
}

impl MockBackendFactory {
    pub fn new(backend: Arc<MockBackend>) -> Self {
        Self {
            backend,
            endpoints: Mutex::new(vec![]),
        }
    }

    pub fn endpoints(&self) -> Vec<String> {
        self.endpoints.lock().unwrap().clone()
    }
}

impl MetricsBackendFactory for MockBackendFactory {
    fn connect(&self, endpoint: &str) -> Result<Arc<dyn MetricsBackend>, DashboardError> {
        self.endpoints.lock().unwrap().push(endpoint.to_string());
        let backend: Arc<dyn MetricsBackend> = self.backend.clone();
        Ok(backend)
    }
}
