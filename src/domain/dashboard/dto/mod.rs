pub mod chart_query;
