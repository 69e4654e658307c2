use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DashboardError;

pub const CPU_QUERY: &str =
    "avg by (taco_cluster) (1-rate(node_cpu_seconds_total{mode=\"idle\"}[1h]))";
pub const MEMORY_QUERY: &str = "avg by (taco_cluster) (sum(node_memory_MemTotal_bytes - node_memory_MemAvailable_bytes) by (taco_cluster) / sum(node_memory_MemTotal_bytes) by (taco_cluster))";
pub const POD_RESTART_QUERY: &str = "avg by (taco_cluster) (increase(kube_pod_container_status_restarts_total{namespace!=\"kube-system\"}[1h]))";
pub const TRAFFIC_QUERY: &str =
    "avg by (taco_cluster) (rate(container_network_receive_bytes_total[1h]))";

/// Dashboard chart categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Cpu,
    Memory,
    Pod,
    Traffic,
    PodCalendar,
}

/// How a chart kind is computed and shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartShape {
    /// Range query aligned on a shared x-axis, one series per cluster.
    RangeAligned {
        query: &'static str,
        percentage: bool,
    },
    /// Daily pod-restart histogram over one month of alert events.
    CalendarHistogram,
}

impl ChartKind {
    pub const ALL: [ChartKind; 5] = [
        ChartKind::Cpu,
        ChartKind::Memory,
        ChartKind::Pod,
        ChartKind::Traffic,
        ChartKind::PodCalendar,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Cpu => "cpu",
            ChartKind::Memory => "memory",
            ChartKind::Pod => "pod",
            ChartKind::Traffic => "traffic",
            ChartKind::PodCalendar => "pod_calendar",
        }
    }

    pub fn shape(&self) -> ChartShape {
        match self {
            ChartKind::Cpu => ChartShape::RangeAligned {
                query: CPU_QUERY,
                percentage: true,
            },
            ChartKind::Memory => ChartShape::RangeAligned {
                query: MEMORY_QUERY,
                percentage: true,
            },
            ChartKind::Pod => ChartShape::RangeAligned {
                query: POD_RESTART_QUERY,
                percentage: false,
            },
            ChartKind::Traffic => ChartShape::RangeAligned {
                query: TRAFFIC_QUERY,
                percentage: false,
            },
            ChartKind::PodCalendar => ChartShape::CalendarHistogram,
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested chart set: a single kind or every kind in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartSelection {
    All,
    Single(ChartKind),
}

impl ChartSelection {
    pub fn kinds(&self) -> Vec<ChartKind> {
        match self {
            ChartSelection::All => ChartKind::ALL.to_vec(),
            ChartSelection::Single(kind) => vec![*kind],
        }
    }
}

impl FromStr for ChartSelection {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        if normalized == "all" {
            return Ok(ChartSelection::All);
        }

        ChartKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .map(ChartSelection::Single)
            .ok_or_else(|| DashboardError::NoData(format!("unknown chart type '{}'", s)))
    }
}

/// Lookback and step for range charts, resolved from request labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeWindow {
    pub duration: &'static str,
    pub duration_secs: i64,
    pub interval: &'static str,
    pub interval_secs: i64,
}

impl RangeWindow {
    /// Unknown or missing labels fall back to a one day lookback with hourly steps.
    pub fn from_labels(duration: Option<&str>, interval: Option<&str>) -> Self {
        let (duration, duration_secs) = match duration.map(str::trim) {
            Some("1h") => ("1h", 60 * 60),
            Some("7d") => ("7d", 60 * 60 * 24 * 7),
            Some("30d") => ("30d", 60 * 60 * 24 * 30),
            _ => ("1d", 60 * 60 * 24),
        };

        let (interval, interval_secs) = match interval.map(str::trim) {
            Some("1d") => ("1d", 60 * 60 * 24),
            // "7h" is a legacy client key for the weekly step
            Some("7d") | Some("7h") => ("7d", 60 * 60 * 24 * 7),
            _ => ("1h", 60 * 60),
        };

        Self {
            duration,
            duration_secs,
            interval,
            interval_secs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub name: String,
    pub data: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisData {
    pub data: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub x_axis: AxisData,
    pub series: Vec<ChartSeries>,
}

/// Either the lookback of a range chart or the month of a calendar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChartWindow {
    Range { duration: String, interval: String },
    Calendar { year: i32, month: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    pub chart_type: ChartKind,
    pub organization_id: String,
    pub name: String,
    pub description: String,
    #[serde(flatten)]
    pub window: ChartWindow,
    pub chart_data: ChartData,
    pub updated_at: DateTime<Utc>,
}
