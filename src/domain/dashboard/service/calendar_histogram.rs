use std::collections::HashMap;

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, Utc};

use crate::errors::DashboardError;

pub const POD_RESTART_SERIES: &str = "podRestartCount";

/// Histogram window length. Every month gets the same window whatever its
/// real length, so windows spill into the next month.
pub const WINDOW_DAYS: u64 = 30;

/// `[start, end]` of a monthly histogram, both at UTC midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub x_axis: Vec<String>,
    pub counts: Vec<String>,
}

fn midnight(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

/// Validate `(year, month)` against `now` and compute its window.
pub fn month_window(year: i32, month: u32, now: DateTime<Utc>) -> Result<MonthWindow, DashboardError> {
    if year > now.year() {
        return Err(DashboardError::InvalidRange(format!("year {} is in the future", year)));
    }
    if year == now.year() && month > now.month() {
        return Err(DashboardError::InvalidRange(format!(
            "month {}-{:02} is in the future",
            year, month
        )));
    }

    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| DashboardError::InvalidRange(format!("invalid month {}-{}", year, month)))?;
    let last = first
        .checked_add_days(Days::new(WINDOW_DAYS))
        .ok_or_else(|| DashboardError::InvalidRange(format!("month {}-{} out of range", year, month)))?;

    Ok(MonthWindow {
        start: midnight(first),
        end: midnight(last),
    })
}

/// Count events per UTC day over the month window.
///
/// Days up to and including today carry a count (possibly `"0"`); later days
/// are left empty because they cannot have been measured yet.
pub fn build_monthly_histogram(
    year: i32,
    month: u32,
    events: &[DateTime<Utc>],
    now: DateTime<Utc>,
) -> Result<Histogram, DashboardError> {
    let window = month_window(year, month, now)?;
    let today = now.date_naive();

    let mut per_day: HashMap<NaiveDate, usize> = HashMap::new();
    for created_at in events {
        *per_day.entry(created_at.date_naive()).or_default() += 1;
    }

    let mut x_axis = Vec::new();
    let mut counts = Vec::new();

    let last = window.end.date_naive();
    let mut day = window.start.date_naive();
    while day <= last {
        x_axis.push(midnight(day).timestamp().to_string());
        counts.push(if day <= today {
            per_day.get(&day).copied().unwrap_or(0).to_string()
        } else {
            String::new()
        });

        match day.checked_add_days(Days::new(1)) {
            Some(next) => day = next,
            None => break,
        }
    }

    Ok(Histogram { x_axis, counts })
}
