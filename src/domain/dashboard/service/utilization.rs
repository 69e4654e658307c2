use crate::domain::dashboard::model::metric_sample::{
    parse_metric_value, parse_whole_number, MetricSample,
};

pub const MEMORY_FREE_METRIC: &str = "node_memory_MemFree_bytes";
pub const MEMORY_TOTAL_METRIC: &str = "machine_memory_bytes";
pub const DISK_USED_METRIC: &str = "kubelet_volume_stats_used_bytes";
pub const DISK_CAPACITY_METRIC: &str = "kubelet_volume_stats_capacity_bytes";

const BYTES_PER_GB: i64 = 1024 * 1024 * 1024;

/// Per-cluster utilization as two-decimal percentages; `""` when unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackUtilization {
    pub cpu: String,
    pub memory: String,
    pub disk: String,
}

/// Organization-wide capacity, one entry per metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrganizationResources {
    pub cpu_cores: u64,
    pub memory_gb: u64,
    pub storage_gb: u64,
}

fn first_value(samples: &[MetricSample], cluster_id: &str, metric: Option<&str>) -> Option<f64> {
    samples
        .iter()
        .find(|s| s.cluster_id() == Some(cluster_id) && (metric.is_none() || s.metric_name() == metric))
        .and_then(|s| parse_metric_value(&s.value).ok())
}

/// `(1 - part/total) * 100` or `part/total * 100`, guarded against an
/// unknown or non-positive total.
fn ratio_pct(part: Option<f64>, total: Option<f64>, invert: bool) -> String {
    match total {
        Some(total) if total > 0.0 => {
            let ratio = part.unwrap_or(0.0) / total;
            let share = if invert { 1.0 - ratio } else { ratio };
            format!("{:.2}", share * 100.0)
        }
        _ => String::new(),
    }
}

pub fn compute_stack_utilization(
    cluster_id: &str,
    memory_disk: &[MetricSample],
    cpu: &[MetricSample],
) -> StackUtilization {
    let free = first_value(memory_disk, cluster_id, Some(MEMORY_FREE_METRIC));
    let total = first_value(memory_disk, cluster_id, Some(MEMORY_TOTAL_METRIC));
    let used = first_value(memory_disk, cluster_id, Some(DISK_USED_METRIC));
    let capacity = first_value(memory_disk, cluster_id, Some(DISK_CAPACITY_METRIC));

    StackUtilization {
        cpu: first_value(cpu, cluster_id, None)
            .map(|v| format!("{:.2}", v))
            .unwrap_or_default(),
        memory: ratio_pct(free, total, true),
        disk: ratio_pct(used, capacity, false),
    }
}

/// Positive whole-number values only; anything else is skipped.
fn positive_values(samples: &[MetricSample]) -> impl Iterator<Item = i64> + '_ {
    samples
        .iter()
        .filter_map(|s| parse_whole_number(&s.value).ok())
        .filter(|v| *v > 0)
}

pub fn compute_organization_resources(
    cpu: &[MetricSample],
    memory: &[MetricSample],
    storage: &[MetricSample],
) -> OrganizationResources {
    let to_gb_sum = |samples: &[MetricSample]| -> u64 {
        positive_values(samples)
            .map(|bytes| (bytes / BYTES_PER_GB) as u64)
            .sum()
    };

    OrganizationResources {
        cpu_cores: positive_values(cpu).map(|v| v as u64).sum(),
        memory_gb: to_gb_sum(memory),
        storage_gb: to_gb_sum(storage),
    }
}
