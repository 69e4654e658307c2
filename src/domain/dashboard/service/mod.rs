pub mod calendar_histogram;
pub mod dashboard_service;
pub mod endpoint_resolver;
pub mod name_resolver;
pub mod series_aligner;
pub mod utilization;

#[cfg(test)]
pub(crate) mod test_support;
