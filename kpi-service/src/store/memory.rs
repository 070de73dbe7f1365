use std::collections::BTreeMap;

use async_trait::async_trait;
use plant_client::domain::{
    KpiKind, KpiOffset, KpiRecord, OutageInterval, PeriodType, Scope, TotalizerBaseline,
    TotalizerReading,
};
use time::{Date, OffsetDateTime};
use tokio::sync::Mutex;

use super::{NewOutage, Store, StoreResult};

#[derive(Debug, Default)]
struct Inner {
    readings: BTreeMap<(i32, Date), TotalizerReading>,
    baselines: Vec<TotalizerBaseline>,
    kpis: BTreeMap<(Date, KpiKind, Scope, String), KpiRecord>,
    outages: BTreeMap<i64, OutageInterval>,
    offsets: BTreeMap<(PeriodType, Date, Scope, String), KpiOffset>,
    next_outage_id: i64,
}

/// Map-backed store with the same upsert-key semantics as the Postgres
/// schema. Used by the engine tests and small embedded deployments.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn readings_for_date(&self, date: Date) -> StoreResult<Vec<TotalizerReading>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .readings
            .values()
            .filter(|r| r.date == date)
            .cloned()
            .collect())
    }

    async fn reading_on(
        &self,
        totalizer_id: i32,
        date: Date,
    ) -> StoreResult<Option<TotalizerReading>> {
        let inner = self.inner.lock().await;
        Ok(inner.readings.get(&(totalizer_id, date)).cloned())
    }

    async fn upsert_reading(&self, reading: &TotalizerReading) -> StoreResult<()> {
        let mut inner = self.inner.lock().await;
        inner
            .readings
            .insert((reading.totalizer_id, reading.date), reading.clone());
        Ok(())
    }

    async fn update_difference(
        &self,
        totalizer_id: i32,
        date: Date,
        difference_value: f64,
        updated_at: OffsetDateTime,
    ) -> StoreResult<()> {
        let mut inner = self.inner.lock().await;
        if let Some(reading) = inner.readings.get_mut(&(totalizer_id, date)) {
            reading.difference_value = difference_value;
            reading.updated_at = updated_at;
        }
        Ok(())
    }

    async fn latest_baseline(
        &self,
        totalizer_id: i32,
        on_or_before: Date,
    ) -> StoreResult<Option<TotalizerBaseline>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .baselines
            .iter()
            .filter(|b| b.totalizer_id == totalizer_id && b.effective_date <= on_or_before)
            .max_by_key(|b| (b.effective_date, b.configured_at))
            .cloned())
    }

    async fn insert_baseline(&self, baseline: &TotalizerBaseline) -> StoreResult<()> {
        let mut inner = self.inner.lock().await;
        inner.baselines.push(baseline.clone());
        Ok(())
    }

    async fn kpis_for_date(&self, date: Date) -> StoreResult<Vec<KpiRecord>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .kpis
            .values()
            .filter(|r| r.report_date == date)
            .cloned()
            .collect())
    }

    async fn upsert_kpi(&self, record: &KpiRecord) -> StoreResult<()> {
        let mut inner = self.inner.lock().await;
        let key = (
            record.report_date,
            record.kind,
            record.scope,
            record.kpi_name.clone(),
        );
        inner.kpis.insert(key, record.clone());
        Ok(())
    }

    async fn outages_overlapping(
        &self,
        unit: Scope,
        window_start: OffsetDateTime,
        window_end: OffsetDateTime,
    ) -> StoreResult<Vec<OutageInterval>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .outages
            .values()
            .filter(|o| {
                o.unit == unit
                    && o.started_at <= window_end
                    && o.ended_at.unwrap_or(window_end) >= window_start
            })
            .cloned()
            .collect())
    }

    async fn insert_outage(&self, outage: &NewOutage) -> StoreResult<i64> {
        let mut inner = self.inner.lock().await;
        inner.next_outage_id += 1;
        let id = inner.next_outage_id;
        inner.outages.insert(
            id,
            OutageInterval {
                id,
                unit: outage.unit,
                outage_type: outage.outage_type,
                started_at: outage.started_at,
                ended_at: None,
                reason: outage.reason.clone(),
                notification_no: outage.notification_no.clone(),
                duration: None,
                recorded_by: outage.recorded_by.clone(),
                created_at: outage.created_at,
            },
        );
        Ok(id)
    }

    async fn outage_by_id(&self, id: i64) -> StoreResult<Option<OutageInterval>> {
        let inner = self.inner.lock().await;
        Ok(inner.outages.get(&id).cloned())
    }

    async fn close_outage(
        &self,
        id: i64,
        ended_at: OffsetDateTime,
        duration: &str,
    ) -> StoreResult<bool> {
        let mut inner = self.inner.lock().await;
        match inner.outages.get_mut(&id) {
            Some(outage) => {
                outage.ended_at = Some(ended_at);
                outage.duration = Some(duration.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn offsets_for_period(
        &self,
        period_type: PeriodType,
        period_start: Date,
    ) -> StoreResult<Vec<KpiOffset>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .offsets
            .values()
            .filter(|o| o.period_type == period_type && o.period_start == period_start)
            .cloned()
            .collect())
    }

    async fn upsert_offset(&self, offset: &KpiOffset) -> StoreResult<()> {
        let mut inner = self.inner.lock().await;
        let key = (
            offset.period_type,
            offset.period_start,
            offset.scope,
            offset.kpi_name.clone(),
        );
        inner.offsets.insert(key, offset.clone());
        Ok(())
    }

    async fn delete_offsets_for_period(
        &self,
        period_type: PeriodType,
        period_start: Date,
    ) -> StoreResult<u64> {
        let mut inner = self.inner.lock().await;
        let before = inner.offsets.len();
        inner
            .offsets
            .retain(|(pt, start, _, _), _| !(*pt == period_type && *start == period_start));
        Ok((before - inner.offsets.len()) as u64)
    }
}
