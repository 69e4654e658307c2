use std::collections::HashSet;

use crate::domain::dashboard::model::metric_sample::{parse_metric_value, RangeSeries};

/// Series projected onto one shared x-axis.
///
/// `rows[i]` belongs to the i-th input series and has one cell per x-axis entry.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedSeries {
    pub x_axis: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub fn round_timestamp(ts: f64) -> i64 {
    ts.round() as i64
}

/// Chart cell formatting shared by every range chart.
pub fn format_value(v: f64) -> String {
    format!("{:.6}", v)
}

/// Align sparse series on the union of their timestamps.
///
/// The axis keeps first-seen order. A cell is empty when its series has no
/// sample at that second or the sample does not parse; values are never
/// interpolated.
pub fn align(series: &[RangeSeries], percentage: bool) -> AlignedSeries {
    let mut seen = HashSet::new();
    let mut axis: Vec<i64> = Vec::new();

    for s in series {
        for (ts, _) in &s.points {
            let x = round_timestamp(*ts);
            if seen.insert(x) {
                axis.push(x);
            }
        }
    }

    let rows = series
        .iter()
        .map(|s| axis.iter().map(|x| y_value(s, *x, percentage)).collect())
        .collect();

    AlignedSeries {
        x_axis: axis.iter().map(|x| x.to_string()).collect(),
        rows,
    }
}

fn y_value(series: &RangeSeries, x: i64, percentage: bool) -> String {
    series
        .points
        .iter()
        .find(|(ts, _)| round_timestamp(*ts) == x)
        .and_then(|(_, raw)| parse_metric_value(raw).ok())
        .map(|v| if percentage { v * 100.0 } else { v })
        .map(format_value)
        .unwrap_or_default()
}
