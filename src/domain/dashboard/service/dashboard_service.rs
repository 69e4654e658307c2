use std::sync::Arc;

use chrono::{DateTime, Datelike, Duration, Utc};
use futures::future::{join_all, try_join_all};
use tracing::{debug, error};

use crate::core::cache::ttl_cache_trait::TtlCache;
use crate::core::client::control_plane::ClusterControlPlane;
use crate::core::client::metrics_backend::{MetricsBackend, MetricsBackendFactory};
use crate::core::persistence::alert::alert_repository_trait::AlertStore;
use crate::core::persistence::cluster::cluster_entity::ClusterStatus;
use crate::core::persistence::cluster::cluster_repository_trait::ClusterRegistry;
use crate::core::persistence::organization::organization_repository_trait::OrganizationDirectory;
use crate::domain::dashboard::model::chart::{
    AxisData, Chart, ChartData, ChartKind, ChartSelection, ChartSeries, ChartShape, ChartWindow,
    RangeWindow,
};
use crate::domain::dashboard::model::metric_sample::RangeSeries;
use crate::domain::dashboard::model::stack::{
    running_first, ResourceTotals, StackSummary, STACK_CPU_QUERY, STACK_MEMORY_DISK_QUERY,
    TOTAL_CPU_QUERY, TOTAL_MEMORY_QUERY, TOTAL_STORAGE_QUERY,
};
use crate::errors::{internal_error, DashboardError};

use super::calendar_histogram::{build_monthly_histogram, month_window, POD_RESTART_SERIES};
use super::endpoint_resolver::EndpointResolver;
use super::name_resolver::NameResolver;
use super::series_aligner::align;
use super::utilization::{compute_organization_resources, compute_stack_utilization};

/// Optional chart parameters; which ones apply depends on the chart kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartParams {
    pub duration: Option<String>,
    pub interval: Option<String>,
    pub year: Option<i32>,
    pub month: Option<u32>,
}

/// Dashboard entry points: charts, stack cards and organization totals.
pub struct DashboardService {
    organizations: Arc<dyn OrganizationDirectory>,
    clusters: Arc<dyn ClusterRegistry>,
    alerts: Arc<dyn AlertStore>,
    backends: Arc<dyn MetricsBackendFactory>,
    endpoints: EndpointResolver,
    names: NameResolver,
}

impl DashboardService {
    pub fn new(
        organizations: Arc<dyn OrganizationDirectory>,
        clusters: Arc<dyn ClusterRegistry>,
        alerts: Arc<dyn AlertStore>,
        control_plane: Arc<dyn ClusterControlPlane>,
        backends: Arc<dyn MetricsBackendFactory>,
        cache: Arc<dyn TtlCache>,
        metrics_namespace: impl Into<String>,
    ) -> Self {
        let endpoints = EndpointResolver::new(
            organizations.clone(),
            control_plane,
            cache.clone(),
            metrics_namespace,
        );
        let names = NameResolver::new(clusters.clone(), cache);

        Self {
            organizations,
            clusters,
            alerts,
            backends,
            endpoints,
            names,
        }
    }

    pub async fn get_charts(
        &self,
        organization_id: &str,
        chart_type: &str,
        params: &ChartParams,
    ) -> Result<Vec<Chart>, DashboardError> {
        self.get_charts_at(organization_id, chart_type, params, Utc::now())
            .await
    }

    /// Charts as of `now`. `all` yields every kind in declaration order.
    pub async fn get_charts_at(
        &self,
        organization_id: &str,
        chart_type: &str,
        params: &ChartParams,
        now: DateTime<Utc>,
    ) -> Result<Vec<Chart>, DashboardError> {
        let selection: ChartSelection = chart_type.parse()?;

        self.organizations
            .get(organization_id)
            .await
            .map_err(internal_error)?
            .ok_or_else(|| DashboardError::TenantNotFound(organization_id.to_string()))?;

        let backend = self.backend_for(organization_id).await?;

        let kinds = selection.kinds();
        try_join_all(
            kinds
                .iter()
                .map(|kind| self.build_chart(organization_id, *kind, backend.as_ref(), params, now)),
        )
        .await
    }

    pub async fn get_stacks(&self, organization_id: &str) -> Result<Vec<StackSummary>, DashboardError> {
        let backend = self.backend_for(organization_id).await?;

        let clusters = self
            .clusters
            .list_by_organization(organization_id)
            .await
            .map_err(internal_error)?;

        let (memory_disk, cpu) = tokio::try_join!(
            backend.instant_query(STACK_MEMORY_DISK_QUERY),
            backend.instant_query(STACK_CPU_QUERY)
        )?;

        let mut stacks: Vec<StackSummary> = clusters
            .into_iter()
            .map(|cluster| {
                let usage = compute_stack_utilization(&cluster.id, &memory_disk, &cpu);
                StackSummary {
                    id: cluster.id,
                    name: cluster.name,
                    description: cluster.description,
                    status: cluster.status,
                    created_at: cluster.created_at,
                    cpu: with_percent_suffix(usage.cpu),
                    memory: with_percent_suffix(usage.memory),
                    storage: with_percent_suffix(usage.disk),
                }
            })
            .collect();

        running_first(&mut stacks);
        Ok(stacks)
    }

    pub async fn get_resources(&self, organization_id: &str) -> Result<ResourceTotals, DashboardError> {
        let backend = self.backend_for(organization_id).await?;

        let stack_count = self
            .clusters
            .list_by_organization(organization_id)
            .await
            .map_err(internal_error)?
            .iter()
            .filter(|c| c.status != ClusterStatus::Deleted)
            .count();

        let (cpu, memory, storage) = tokio::try_join!(
            backend.instant_query(TOTAL_CPU_QUERY),
            backend.instant_query(TOTAL_MEMORY_QUERY),
            backend.instant_query(TOTAL_STORAGE_QUERY)
        )?;

        let totals = compute_organization_resources(&cpu, &memory, &storage);

        Ok(ResourceTotals {
            stack_count,
            cpu_cores: totals.cpu_cores,
            memory_gb: totals.memory_gb,
            storage_gb: totals.storage_gb,
        })
    }

    async fn backend_for(&self, organization_id: &str) -> Result<Arc<dyn MetricsBackend>, DashboardError> {
        let endpoint = self.endpoints.resolve(organization_id).await.map_err(|e| {
            error!("Invalid primary stack for organization {}: {}", organization_id, e);
            e
        })?;
        self.backends.connect(&endpoint)
    }

    async fn build_chart(
        &self,
        organization_id: &str,
        kind: ChartKind,
        backend: &dyn MetricsBackend,
        params: &ChartParams,
        now: DateTime<Utc>,
    ) -> Result<Chart, DashboardError> {
        let (window, chart_data) = match kind.shape() {
            ChartShape::RangeAligned { query, percentage } => {
                let range = RangeWindow::from_labels(params.duration.as_deref(), params.interval.as_deref());
                let start = now - Duration::seconds(range.duration_secs);
                debug!("Range query for {} chart over {}/{}", kind, range.duration, range.interval);

                let series = backend.range_query(query, start, now, range.interval_secs).await?;
                let aligned = align(&series, percentage);
                let names = join_all(series.iter().map(|s| self.series_name(s))).await;

                let series = names
                    .into_iter()
                    .zip(aligned.rows)
                    .map(|(name, data)| ChartSeries { name, data })
                    .collect();

                (
                    ChartWindow::Range {
                        duration: range.duration.to_string(),
                        interval: range.interval.to_string(),
                    },
                    ChartData {
                        x_axis: AxisData { data: aligned.x_axis },
                        series,
                    },
                )
            }
            ChartShape::CalendarHistogram => {
                let year = params.year.unwrap_or_else(|| now.year());
                let month = params.month.unwrap_or_else(|| now.month());
                let window = month_window(year, month, now)?;

                let events = self
                    .alerts
                    .fetch_pod_restart_events(organization_id, window.start, window.end)
                    .await
                    .map_err(internal_error)?;
                let created: Vec<DateTime<Utc>> = events.iter().map(|e| e.created_at).collect();

                let histogram = build_monthly_histogram(year, month, &created, now)?;

                (
                    ChartWindow::Calendar { year, month },
                    ChartData {
                        x_axis: AxisData { data: histogram.x_axis },
                        series: vec![ChartSeries {
                            name: POD_RESTART_SERIES.to_string(),
                            data: histogram.counts,
                        }],
                    },
                )
            }
        };

        Ok(Chart {
            chart_type: kind,
            organization_id: organization_id.to_string(),
            name: kind.as_str().to_string(),
            description: describe(kind).to_string(),
            window,
            chart_data,
            updated_at: now,
        })
    }

    async fn series_name(&self, series: &RangeSeries) -> String {
        match series.cluster_id() {
            Some(id) => self.names.resolve(id).await,
            None => String::new(),
        }
    }
}

fn describe(kind: ChartKind) -> &'static str {
    match kind {
        ChartKind::Cpu => "Average CPU usage per stack (%)",
        ChartKind::Memory => "Average memory usage per stack (%)",
        ChartKind::Pod => "Pod restarts per stack",
        ChartKind::Traffic => "Inbound network traffic per stack (bytes/s)",
        ChartKind::PodCalendar => "Pod restarts per day",
    }
}

fn with_percent_suffix(value: String) -> String {
    if value.is_empty() {
        value
    } else {
        format!("{} %", value)
    }
}
