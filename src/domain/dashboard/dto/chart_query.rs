use serde::Deserialize;
use validator::Validate;

use crate::domain::dashboard::service::dashboard_service::ChartParams;

/// Query string of `GET /charts`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChartQuery {
    /// `all` or one chart kind, case-insensitive.
    #[validate(length(min = 1))]
    pub chart_type: String,

    /// `1h`, `1d`, `7d` or `30d`; range charts only.
    pub duration: Option<String>,

    /// `1h`, `1d` or `7d`; range charts only.
    pub interval: Option<String>,

    #[validate(range(min = 1970, max = 9999))]
    pub year: Option<i32>,

    #[validate(range(min = 1, max = 12))]
    pub month: Option<u32>,
}

impl ChartQuery {
    pub fn params(&self) -> ChartParams {
        ChartParams {
            duration: self.duration.clone(),
            interval: self.interval.clone(),
            year: self.year,
            month: self.month,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(chart_type: &str, year: Option<i32>, month: Option<u32>) -> ChartQuery {
        ChartQuery {
            chart_type: chart_type.into(),
            duration: None,
            interval: None,
            year,
            month,
        }
    }

    #[test]
    fn accepts_calendar_parameters() {
        assert!(query("pod_calendar", Some(2024), Some(2)).validate().is_ok());
        assert!(query("all", None, None).validate().is_ok());
    }

    #[test]
    fn rejects_empty_type_and_bad_month() {
        assert!(query("", None, None).validate().is_err());
        assert!(query("pod_calendar", Some(2024), Some(13)).validate().is_err());
        assert!(query("pod_calendar", Some(2024), Some(0)).validate().is_err());
    }

    #[test]
    fn deserializes_camel_case_query() {
        let q: ChartQuery =
            serde_json::from_str(r#"{"chartType":"cpu","duration":"7d","interval":"1d"}"#).unwrap();
        let params = q.params();
        assert_eq!(params.duration.as_deref(), Some("7d"));
        assert_eq!(params.interval.as_deref(), Some("1d"));
        assert_eq!(params.year, None);
    }
}
