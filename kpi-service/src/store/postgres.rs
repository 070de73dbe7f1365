use async_trait::async_trait;
use plant_client::db;
use plant_client::domain::{
    KpiOffset, KpiRecord, OutageInterval, PeriodType, Scope, TotalizerBaseline, TotalizerReading,
};
use sqlx::PgPool;
use time::{Date, OffsetDateTime};

use super::{NewOutage, Store, StoreError, StoreResult};

/// Production store backed by the plant-client query layer.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Unique-key races surface as retryable conflicts; everything else is a
/// backend failure.
fn map_err(err: anyhow::Error) -> StoreError {
    if let Some(sqlx::Error::Database(db_err)) = err.downcast_ref::<sqlx::Error>() {
        if db_err.is_unique_violation() {
            return StoreError::Conflict(db_err.to_string());
        }
    }
    StoreError::Backend(err.to_string())
}

#[async_trait]
impl Store for PgStore {
    async fn readings_for_date(&self, date: Date) -> StoreResult<Vec<TotalizerReading>> {
        db::reading_queries::readings_for_date(&self.pool, date)
            .await
            .map_err(map_err)
    }

    async fn reading_on(
        &self,
        totalizer_id: i32,
        date: Date,
    ) -> StoreResult<Option<TotalizerReading>> {
        db::reading_queries::reading_on(&self.pool, totalizer_id, date)
            .await
            .map_err(map_err)
    }

    async fn upsert_reading(&self, reading: &TotalizerReading) -> StoreResult<()> {
        db::reading_queries::upsert_reading(&self.pool, reading)
            .await
            .map_err(map_err)
    }

    async fn update_difference(
        &self,
        totalizer_id: i32,
        date: Date,
        difference_value: f64,
        updated_at: OffsetDateTime,
    ) -> StoreResult<()> {
        db::reading_queries::update_difference(
            &self.pool,
            totalizer_id,
            date,
            difference_value,
            updated_at,
        )
        .await
        .map_err(map_err)
    }

    async fn latest_baseline(
        &self,
        totalizer_id: i32,
        on_or_before: Date,
    ) -> StoreResult<Option<TotalizerBaseline>> {
        db::baseline_queries::latest_baseline(&self.pool, totalizer_id, on_or_before)
            .await
            .map_err(map_err)
    }

    async fn insert_baseline(&self, baseline: &TotalizerBaseline) -> StoreResult<()> {
        db::baseline_queries::insert_baseline(&self.pool, baseline)
            .await
            .map_err(map_err)
    }

    async fn kpis_for_date(&self, date: Date) -> StoreResult<Vec<KpiRecord>> {
        db::kpi_queries::kpis_for_date(&self.pool, date)
            .await
            .map_err(map_err)
    }

    async fn upsert_kpi(&self, record: &KpiRecord) -> StoreResult<()> {
        db::kpi_queries::upsert_kpi(&self.pool, record)
            .await
            .map_err(map_err)
    }

    async fn outages_overlapping(
        &self,
        unit: Scope,
        window_start: OffsetDateTime,
        window_end: OffsetDateTime,
    ) -> StoreResult<Vec<OutageInterval>> {
        db::outage_queries::outages_overlapping(&self.pool, unit, window_start, window_end)
            .await
            .map_err(map_err)
    }

    async fn insert_outage(&self, outage: &NewOutage) -> StoreResult<i64> {
        db::outage_queries::insert_outage(
            &self.pool,
            outage.unit,
            outage.outage_type,
            outage.started_at,
            outage.reason.as_deref(),
            outage.notification_no.as_deref(),
            outage.recorded_by.as_deref(),
            outage.created_at,
        )
        .await
        .map_err(map_err)
    }

    async fn outage_by_id(&self, id: i64) -> StoreResult<Option<OutageInterval>> {
        db::outage_queries::outage_by_id(&self.pool, id)
            .await
            .map_err(map_err)
    }

    async fn close_outage(
        &self,
        id: i64,
        ended_at: OffsetDateTime,
        duration: &str,
    ) -> StoreResult<bool> {
        db::outage_queries::close_outage(&self.pool, id, ended_at, duration)
            .await
            .map(|rows| rows > 0)
            .map_err(map_err)
    }

    async fn offsets_for_period(
        &self,
        period_type: PeriodType,
        period_start: Date,
    ) -> StoreResult<Vec<KpiOffset>> {
        db::offset_queries::offsets_for_period(&self.pool, period_type, period_start)
            .await
            .map_err(map_err)
    }

    async fn upsert_offset(&self, offset: &KpiOffset) -> StoreResult<()> {
        db::offset_queries::upsert_offset(&self.pool, offset)
            .await
            .map_err(map_err)
    }

    async fn delete_offsets_for_period(
        &self,
        period_type: PeriodType,
        period_start: Date,
    ) -> StoreResult<u64> {
        db::offset_queries::delete_offsets_for_period(&self.pool, period_type, period_start)
            .await
            .map_err(map_err)
    }
}
