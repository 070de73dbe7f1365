//! Persistence seam. The engine only sees this trait; the storage engine
//! behind it (Postgres in production, an in-memory map in tests) supplies
//! the atomic upserts the unique keys rely on.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use plant_client::domain::{
    KpiOffset, KpiRecord, OutageInterval, OutageType, PeriodType, Scope, TotalizerBaseline,
    TotalizerReading,
};
use time::{Date, OffsetDateTime};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// Concurrent writers raced on a unique key; the caller may retry.
    #[error("storage conflict: {0}")]
    Conflict(String),
    #[error("storage backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Fields of a not-yet-persisted outage interval; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewOutage {
    pub unit: Scope,
    pub outage_type: OutageType,
    pub started_at: OffsetDateTime,
    pub reason: Option<String>,
    pub notification_no: Option<String>,
    pub recorded_by: Option<String>,
    pub created_at: OffsetDateTime,
}

#[async_trait]
pub trait Store: Send + Sync {
    async fn readings_for_date(&self, date: Date) -> StoreResult<Vec<TotalizerReading>>;

    async fn reading_on(
        &self,
        totalizer_id: i32,
        date: Date,
    ) -> StoreResult<Option<TotalizerReading>>;

    async fn upsert_reading(&self, reading: &TotalizerReading) -> StoreResult<()>;

    async fn update_difference(
        &self,
        totalizer_id: i32,
        date: Date,
        difference_value: f64,
        updated_at: OffsetDateTime,
    ) -> StoreResult<()>;

    async fn latest_baseline(
        &self,
        totalizer_id: i32,
        on_or_before: Date,
    ) -> StoreResult<Option<TotalizerBaseline>>;

    async fn insert_baseline(&self, baseline: &TotalizerBaseline) -> StoreResult<()>;

    async fn kpis_for_date(&self, date: Date) -> StoreResult<Vec<KpiRecord>>;

    async fn upsert_kpi(&self, record: &KpiRecord) -> StoreResult<()>;

    async fn outages_overlapping(
        &self,
        unit: Scope,
        window_start: OffsetDateTime,
        window_end: OffsetDateTime,
    ) -> StoreResult<Vec<OutageInterval>>;

    async fn insert_outage(&self, outage: &NewOutage) -> StoreResult<i64>;

    async fn outage_by_id(&self, id: i64) -> StoreResult<Option<OutageInterval>>;

    async fn close_outage(
        &self,
        id: i64,
        ended_at: OffsetDateTime,
        duration: &str,
    ) -> StoreResult<bool>;

    async fn offsets_for_period(
        &self,
        period_type: PeriodType,
        period_start: Date,
    ) -> StoreResult<Vec<KpiOffset>>;

    async fn upsert_offset(&self, offset: &KpiOffset) -> StoreResult<()>;

    async fn delete_offsets_for_period(
        &self,
        period_type: PeriodType,
        period_start: Date,
    ) -> StoreResult<u64>;
}
