pub mod chart;
pub mod metric_sample;
pub mod stack;
