pub mod baseline_queries;
pub mod kpi_queries;
pub mod offset_queries;
pub mod outage_queries;
pub mod reading_queries;
