use time::{Date, OffsetDateTime};

/// One cumulative meter reading per (totalizer, date).
///
/// `difference_value` is derived (reading − previous + adjust) and persisted
/// alongside the raw values so downstream consumers never need to re-resolve
/// the previous-day row.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct TotalizerReading {
    pub totalizer_id: i32,
    pub date: Date,
    pub reading_value: f64,
    pub adjust_value: f64,
    pub difference_value: f64,
    pub username: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Configured substitute for "yesterday's reading": first day of operation
/// or a meter replacement/reset.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct TotalizerBaseline {
    pub totalizer_id: i32,
    pub effective_date: Date,
    pub baseline_value: f64,
    pub reason: String,
    pub configured_by: Option<String>,
    pub configured_at: OffsetDateTime,
}
