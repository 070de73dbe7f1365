//! The derivation engine: readings in, KPI records out.
//!
//! Each operation is a single read-compute-write sequence against the
//! store; concurrency control is the store's atomic upserts, never
//! in-process locking.

pub mod aggregate;
pub mod diff;
pub mod formula;
pub mod outage;

use std::collections::{BTreeMap, BTreeSet};

use plant_client::domain::{
    KpiKind, KpiOffset, KpiRecord, OutageType, PeriodType, Scope, TotalizerBaseline,
    TotalizerReading,
};
use time::{Date, OffsetDateTime};

use crate::catalog::TotalizerCatalog;
use crate::config::PlantConfig;
use crate::deps::DependencyMap;
use crate::kpiset::{KpiKey, KpiSet};
use crate::registry::{KpiRegistry, Period};
use crate::store::{NewOutage, Store, StoreError};

use self::aggregate::{
    aggregate_kpi, apply_offset, dates_between, period_window, OffsetApplication,
};
use self::diff::{difference, resolve_previous, DiffsByScope};
use self::formula::{
    energy_meter_kpis, station_combined, station_water_kpis, unit_kpis, UnitDay,
};
use self::outage::{day_window, format_duration, outage_kpis, OutageKpis};

#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    /// Rejected before any computation or write.
    #[error("validation error: {0}")]
    Validation(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Identity of the submitting operator. `elevated` gates manual meter
/// adjustments; role resolution itself happens outside this engine.
#[derive(Debug, Clone)]
pub struct Principal {
    pub username: String,
    pub elevated: bool,
}

impl Principal {
    pub fn new(username: impl Into<String>, elevated: bool) -> Self {
        Self {
            username: username.into(),
            elevated,
        }
    }

    pub fn system() -> Self {
        Self::new("system", true)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadingSubmission {
    pub totalizer_id: i32,
    pub reading_value: f64,
    pub adjust_value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ManualKpiEntry {
    pub name: String,
    pub value: f64,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OffsetEntry {
    pub scope: Scope,
    pub kpi_name: String,
    pub offset_value: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub changed_totalizers: Vec<i32>,
    pub updated_kpi_count: usize,
}

/// Derive the full auto KPI set from a day's diffs alone (no outage
/// intervals, no store). Shared by the engine and the dependency-table
/// completeness test.
pub fn auto_kpis_from_diffs(diffs: &DiffsByScope, plant: &PlantConfig) -> KpiSet {
    assemble_day(
        diffs,
        &OutageKpis::idle_day(),
        &OutageKpis::idle_day(),
        plant,
    )
}

fn assemble_day(
    diffs: &DiffsByScope,
    unit1_outage: &OutageKpis,
    unit2_outage: &OutageKpis,
    plant: &PlantConfig,
) -> KpiSet {
    let energy = energy_meter_kpis(
        diffs.scope_map(Scope::EnergyMeter),
        plant.rated_unit_capacity_mwh,
    );
    let unit1 = UnitDay {
        kpis: unit_kpis(diffs.scope_map(Scope::Unit1), energy.unit1_generation),
        generation: energy.unit1_generation,
        plf_percent: energy.unit1_plf_percent,
        aux_power: energy.unit1_aux_consumption_mwh,
        aux_power_percent: energy.unit1_aux_percent,
        outage: *unit1_outage,
    };
    let unit2 = UnitDay {
        kpis: unit_kpis(diffs.scope_map(Scope::Unit2), energy.unit2_generation),
        generation: energy.unit2_generation,
        plf_percent: energy.unit2_plf_percent,
        aux_power: energy.unit2_aux_consumption_mwh,
        aux_power_percent: energy.unit2_aux_percent,
        outage: *unit2_outage,
    };
    let water = station_water_kpis(
        diffs.scope_map(Scope::Station),
        energy.unit1_generation,
        energy.unit2_generation,
    );
    let station = station_combined(&unit1, &unit2, plant.station_capacity_mwh());

    let mut set = KpiSet::new();
    for (name, value) in unit1.entries() {
        set.set(Scope::Unit1, name, value);
    }
    for (name, value) in unit2.entries() {
        set.set(Scope::Unit2, name, value);
    }
    for (name, value) in station.entries().into_iter().chain(water.entries()) {
        set.set(Scope::Station, name, value);
    }
    for (name, value) in energy.entries() {
        set.set(Scope::EnergyMeter, name, value);
    }
    set
}

fn nearly_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

pub struct KpiEngine<S> {
    store: S,
    catalog: TotalizerCatalog,
    registry: KpiRegistry,
    deps: DependencyMap,
    plant: PlantConfig,
}

impl<S: Store> KpiEngine<S> {
    pub fn new(
        store: S,
        catalog: TotalizerCatalog,
        registry: KpiRegistry,
        deps: DependencyMap,
        plant: PlantConfig,
    ) -> Self {
        Self {
            store,
            catalog,
            registry,
            deps,
            plant,
        }
    }

    /// Engine wired with the source plant's catalog, registry and
    /// dependency table.
    pub fn with_defaults(store: S, plant: PlantConfig) -> Self {
        Self::new(
            store,
            TotalizerCatalog::standard(),
            KpiRegistry::standard(),
            DependencyMap::standard(),
            plant,
        )
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn validate_readings(
        &self,
        scope: Scope,
        readings: &[ReadingSubmission],
    ) -> Result<(), EngineError> {
        for r in readings {
            let Some(def) = self.catalog.get(r.totalizer_id) else {
                metrics::counter!("reading_validation_rejected_total").increment(1);
                return Err(EngineError::Validation(format!(
                    "unknown totalizer id {}",
                    r.totalizer_id
                )));
            };
            if def.scope != scope {
                metrics::counter!("reading_validation_rejected_total").increment(1);
                return Err(EngineError::Validation(format!(
                    "totalizer {} ({}) belongs to {}, not {}",
                    def.id, def.name, def.scope, scope
                )));
            }
            if !r.reading_value.is_finite() {
                metrics::counter!("reading_validation_rejected_total").increment(1);
                return Err(EngineError::Validation(format!(
                    "reading for totalizer {} is not a finite number",
                    r.totalizer_id
                )));
            }
        }
        Ok(())
    }

    /// Previous-value resolution: prior-day reading, else the most recent
    /// baseline effective on or before the date, else zero.
    async fn previous_value(&self, totalizer_id: i32, date: Date) -> Result<f64, EngineError> {
        let prior = match date.previous_day() {
            Some(yesterday) => self
                .store
                .reading_on(totalizer_id, yesterday)
                .await?
                .map(|r| r.reading_value),
            None => None,
        };
        let baseline = if prior.is_none() {
            self.store
                .latest_baseline(totalizer_id, date)
                .await?
                .map(|b| b.baseline_value)
        } else {
            None
        };
        Ok(resolve_previous(prior, baseline).value())
    }

    /// Persist a day's readings, recompute the day and rewrite only the
    /// KPIs that depend on totalizers whose values actually changed.
    /// Resubmitting identical values is a no-op.
    pub async fn submit_readings(
        &self,
        date: Date,
        scope: Scope,
        readings: &[ReadingSubmission],
        principal: &Principal,
    ) -> Result<SubmitOutcome, EngineError> {
        self.validate_readings(scope, readings)?;

        let now = OffsetDateTime::now_utc();
        let mut changed = Vec::new();

        for r in readings {
            // Adjustments require elevated privilege; the engine forces
            // them to zero otherwise.
            let adjust = if principal.elevated {
                r.adjust_value.unwrap_or(0.0)
            } else {
                0.0
            };

            let previous = self.previous_value(r.totalizer_id, date).await?;
            let diff = difference(r.reading_value, previous, adjust);

            let existing = self.store.reading_on(r.totalizer_id, date).await?;
            let unchanged = existing.as_ref().is_some_and(|e| {
                nearly_equal(e.reading_value, r.reading_value)
                    && nearly_equal(e.adjust_value, adjust)
                    && nearly_equal(e.difference_value, diff)
            });
            if unchanged {
                continue;
            }

            self.store
                .upsert_reading(&TotalizerReading {
                    totalizer_id: r.totalizer_id,
                    date,
                    reading_value: r.reading_value,
                    adjust_value: adjust,
                    difference_value: diff,
                    username: Some(principal.username.clone()),
                    created_at: existing.as_ref().map_or(now, |e| e.created_at),
                    updated_at: now,
                })
                .await?;
            changed.push(r.totalizer_id);

            // Today's value is tomorrow's "previous": refresh the next
            // day's stored diff if that row already exists.
            if let Some(next) = date.next_day() {
                if let Some(next_row) = self.store.reading_on(r.totalizer_id, next).await? {
                    let refreshed =
                        difference(next_row.reading_value, r.reading_value, next_row.adjust_value);
                    if !nearly_equal(refreshed, next_row.difference_value) {
                        self.store
                            .update_difference(r.totalizer_id, next, refreshed, now)
                            .await?;
                    }
                }
            }
        }

        if changed.is_empty() {
            tracing::info!(date = %date, scope = %scope, "no readings changed, skipping kpi persist");
            return Ok(SubmitOutcome {
                changed_totalizers: changed,
                updated_kpi_count: 0,
            });
        }

        let computed = self.compute_day(date).await?;
        let affected = self.deps.affected(&changed);
        let updated = self
            .persist_affected(date, &computed, &affected, principal)
            .await?;

        tracing::info!(
            date = %date,
            scope = %scope,
            changed = changed.len(),
            updated,
            "readings submitted"
        );

        Ok(SubmitOutcome {
            changed_totalizers: changed,
            updated_kpi_count: updated,
        })
    }

    /// Compute every auto KPI for a date from persisted state.
    pub async fn compute_day(&self, date: Date) -> Result<KpiSet, EngineError> {
        let readings = self.store.readings_for_date(date).await?;
        let diffs = DiffsByScope::from_readings(&self.catalog, &readings);

        let (window_start, window_end) = day_window(date);
        let unit1_outage = outage_kpis(
            &self
                .store
                .outages_overlapping(Scope::Unit1, window_start, window_end)
                .await?,
            window_start,
            window_end,
        );
        let unit2_outage = outage_kpis(
            &self
                .store
                .outages_overlapping(Scope::Unit2, window_start, window_end)
                .await?,
            window_start,
            window_end,
        );

        Ok(assemble_day(
            &diffs,
            &unit1_outage,
            &unit2_outage,
            &self.plant,
        ))
    }

    async fn persist_affected(
        &self,
        date: Date,
        computed: &KpiSet,
        affected: &BTreeSet<KpiKey>,
        principal: &Principal,
    ) -> Result<usize, EngineError> {
        let stored: BTreeMap<(KpiKind, Scope, String), KpiRecord> = self
            .store
            .kpis_for_date(date)
            .await?
            .into_iter()
            .map(|r| ((r.kind, r.scope, r.kpi_name.clone()), r))
            .collect();

        let now = OffsetDateTime::now_utc();
        let mut updated = 0_usize;
        let mut skipped = 0_usize;

        for key in affected {
            let Some(value) = computed.get(key.scope, &key.name) else {
                continue;
            };
            if !value.is_finite() {
                continue;
            }

            let kind = if key.scope == Scope::EnergyMeter {
                KpiKind::Energy
            } else {
                KpiKind::Auto
            };
            let prior = stored.get(&(kind, key.scope, key.name.clone()));
            if let Some(prior) = prior {
                if (prior.value - value).abs() < self.plant.persist_epsilon {
                    skipped += 1;
                    continue;
                }
            }

            self.store
                .upsert_kpi(&KpiRecord {
                    report_date: date,
                    kind,
                    scope: key.scope,
                    kpi_name: key.name.clone(),
                    value,
                    unit: self.registry.get(&key.name).map(|d| d.unit.to_string()),
                    username: Some(principal.username.clone()),
                    created_at: prior.map_or(now, |p| p.created_at),
                    updated_at: now,
                })
                .await?;
            updated += 1;
        }

        metrics::counter!("kpi_records_updated_total").increment(updated as u64);
        metrics::counter!("kpi_records_skipped_total").increment(skipped as u64);
        tracing::info!(date = %date, updated, skipped, "selective kpi persist");

        Ok(updated)
    }

    /// Recompute a date and persist every derivable KPI (backfill path).
    pub async fn recompute_day(
        &self,
        date: Date,
        principal: &Principal,
    ) -> Result<usize, EngineError> {
        let computed = self.compute_day(date).await?;
        let affected: BTreeSet<KpiKey> = computed.keys().cloned().collect();
        self.persist_affected(date, &computed, &affected, principal)
            .await
    }

    /// Live KPI calculation for a scope from as-submitted readings.
    /// Nothing is written.
    pub async fn preview_kpis(
        &self,
        date: Date,
        scope: Scope,
        readings: &[ReadingSubmission],
    ) -> Result<BTreeMap<String, f64>, EngineError> {
        self.validate_readings(scope, readings)?;

        let mut diffs = DiffsByScope::zeroed(&self.catalog);
        for r in readings {
            let def = self
                .catalog
                .get(r.totalizer_id)
                .ok_or_else(|| {
                    EngineError::Validation(format!("unknown totalizer id {}", r.totalizer_id))
                })?;
            let previous = self.previous_value(r.totalizer_id, date).await?;
            diffs.set(
                def.scope,
                def.name,
                difference(r.reading_value, previous, r.adjust_value.unwrap_or(0.0)),
            );
        }

        let map = match scope {
            Scope::EnergyMeter => energy_meter_kpis(
                diffs.scope_map(Scope::EnergyMeter),
                self.plant.rated_unit_capacity_mwh,
            )
            .entries()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
            Scope::Unit1 | Scope::Unit2 => {
                let (gen1, gen2) = self.stored_generation(date).await?;
                let generation = if scope == Scope::Unit1 { gen1 } else { gen2 };
                unit_kpis(diffs.scope_map(scope), generation)
                    .entries()
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v))
                    .collect()
            }
            Scope::Station => {
                let (gen1, gen2) = self.stored_generation(date).await?;
                station_water_kpis(diffs.scope_map(Scope::Station), gen1, gen2)
                    .entries()
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v))
                    .collect()
            }
        };

        Ok(map)
    }

    /// Generation cache for unit/station previews, sourced from the
    /// persisted energy-meter KPI records of the date.
    async fn stored_generation(&self, date: Date) -> Result<(f64, f64), EngineError> {
        let mut gen1 = 0.0;
        let mut gen2 = 0.0;
        for record in self.store.kpis_for_date(date).await? {
            if record.kind != KpiKind::Energy || record.scope != Scope::EnergyMeter {
                continue;
            }
            match record.kpi_name.as_str() {
                "unit1_generation" => gen1 = record.value,
                "unit2_generation" => gen2 = record.value,
                _ => {}
            }
        }
        Ok((gen1, gen2))
    }

    /// Aggregate one scope's KPIs over day / month-to-date /
    /// fiscal-year-to-date, applying configured offsets for the period.
    /// Absent data yields nulls, never errors.
    pub async fn get_kpis(
        &self,
        date: Date,
        period: Period,
        scope: Scope,
    ) -> Result<BTreeMap<String, Option<f64>>, EngineError> {
        let (start, end) = period_window(period, date, self.plant.fiscal_year_start_month);

        let mut daily = Vec::new();
        let mut auto_names: BTreeSet<String> = BTreeSet::new();
        for day in dates_between(start, end) {
            let mut set = self.compute_day(day).await?;
            for key in set.keys() {
                if key.scope == scope {
                    auto_names.insert(key.name.clone());
                }
            }
            // Manual records join the day's map without shadowing
            // engine-computed values.
            for record in self.store.kpis_for_date(day).await? {
                if record.kind == KpiKind::Manual {
                    set.set_if_absent(record.scope, record.kpi_name.clone(), record.value);
                }
            }
            daily.push(set);
        }

        let mut names = auto_names.clone();
        for day in &daily {
            for key in day.keys() {
                if key.scope == scope {
                    names.insert(key.name.clone());
                }
            }
        }

        let offsets: BTreeMap<String, f64> = match period_offset_type(period) {
            Some(period_type) => self
                .store
                .offsets_for_period(period_type, start)
                .await?
                .into_iter()
                .filter(|o| o.scope == scope)
                .map(|o| (o.kpi_name, o.offset_value))
                .collect(),
            None => BTreeMap::new(),
        };

        let mut out = BTreeMap::new();
        for name in names {
            let Some(def) = self.registry.get(&name) else {
                if auto_names.contains(&name) {
                    metrics::counter!("kpi_configuration_gap_total").increment(1);
                    tracing::warn!(kpi = %name, "derived KPI missing from registry");
                }
                // Not configured: pass through at day granularity only.
                if period == Period::Day {
                    let value = daily.last().and_then(|d| d.get(scope, &name));
                    out.insert(name, value);
                }
                continue;
            };

            let aggregation = def.aggregation_for(period);
            let outcome = aggregate_kpi(def, period, scope, &daily);
            if outcome.weight_fallback {
                metrics::counter!("kpi_weight_fallback_total").increment(1);
                tracing::warn!(
                    kpi = %name,
                    scope = %scope,
                    "weighted average fell back to plain mean (no usable weight)"
                );
            }

            let mut value = outcome.value;
            if let Some(offset) = offsets.get(&name) {
                let (with_offset, how) = apply_offset(aggregation, value, *offset);
                if how == OffsetApplication::Approximate {
                    metrics::counter!("kpi_offset_average_approximation_total").increment(1);
                    tracing::warn!(
                        kpi = %name,
                        scope = %scope,
                        "offset added to an averaging KPI; expect a pre-blended offset value"
                    );
                }
                value = with_offset;
            }
            out.insert(name, value);
        }

        Ok(out)
    }

    /// Operator-entered KPI values. Always written; the engine never
    /// overwrites them from the derivation path.
    pub async fn save_manual_kpis(
        &self,
        date: Date,
        scope: Scope,
        entries: &[ManualKpiEntry],
        principal: &Principal,
    ) -> Result<usize, EngineError> {
        let stored: BTreeMap<(Scope, String), KpiRecord> = self
            .store
            .kpis_for_date(date)
            .await?
            .into_iter()
            .filter(|r| r.kind == KpiKind::Manual)
            .map(|r| ((r.scope, r.kpi_name.clone()), r))
            .collect();

        let now = OffsetDateTime::now_utc();
        let mut saved = 0_usize;
        for entry in entries {
            if entry.name.is_empty() {
                return Err(EngineError::Validation("manual KPI name is empty".into()));
            }
            if !entry.value.is_finite() {
                return Err(EngineError::Validation(format!(
                    "manual KPI {} is not a finite number",
                    entry.name
                )));
            }

            let prior = stored.get(&(scope, entry.name.clone()));
            let unit = entry
                .unit
                .clone()
                .or_else(|| self.registry.get(&entry.name).map(|d| d.unit.to_string()));
            self.store
                .upsert_kpi(&KpiRecord {
                    report_date: date,
                    kind: KpiKind::Manual,
                    scope,
                    kpi_name: entry.name.clone(),
                    value: entry.value,
                    unit,
                    username: Some(principal.username.clone()),
                    created_at: prior.map_or(now, |p| p.created_at),
                    updated_at: now,
                })
                .await?;
            saved += 1;
        }

        Ok(saved)
    }

    /// Open a new outage interval for a unit; returns its id.
    pub async fn record_outage(
        &self,
        unit: Scope,
        outage_type: OutageType,
        started_at: OffsetDateTime,
        reason: Option<String>,
        notification_no: Option<String>,
        principal: &Principal,
    ) -> Result<i64, EngineError> {
        if !matches!(unit, Scope::Unit1 | Scope::Unit2) {
            return Err(EngineError::Validation(format!(
                "outages are logged per unit, got {unit}"
            )));
        }

        let id = self
            .store
            .insert_outage(&NewOutage {
                unit,
                outage_type,
                started_at,
                reason,
                notification_no,
                recorded_by: Some(principal.username.clone()),
                created_at: OffsetDateTime::now_utc(),
            })
            .await?;

        tracing::info!(id, unit = %unit, outage_type = %outage_type, "outage recorded");
        Ok(id)
    }

    /// Close ("synchronize") an open outage; returns the derived
    /// human-readable duration.
    pub async fn close_outage(
        &self,
        id: i64,
        ended_at: OffsetDateTime,
    ) -> Result<String, EngineError> {
        let interval = self
            .store
            .outage_by_id(id)
            .await?
            .ok_or_else(|| EngineError::Validation(format!("outage {id} not found")))?;

        if ended_at < interval.started_at {
            return Err(EngineError::Validation(
                "outage cannot end before it starts".into(),
            ));
        }

        let duration = format_duration(interval.started_at, ended_at);
        self.store.close_outage(id, ended_at, &duration).await?;

        tracing::info!(id, duration = %duration, "outage closed");
        Ok(duration)
    }

    /// Configure one historical offset row (upsert on its period key).
    #[allow(clippy::too_many_arguments)]
    pub async fn configure_offset(
        &self,
        period_type: PeriodType,
        period_start: Date,
        period_end: Date,
        scope: Scope,
        kpi_name: String,
        offset_value: f64,
        reason: String,
        source: Option<String>,
        principal: &Principal,
    ) -> Result<(), EngineError> {
        if period_end < period_start {
            return Err(EngineError::Validation(
                "offset period ends before it starts".into(),
            ));
        }
        if !offset_value.is_finite() {
            return Err(EngineError::Validation(format!(
                "offset for {kpi_name} is not a finite number"
            )));
        }
        if self.registry.get(&kpi_name).is_none() {
            metrics::counter!("kpi_configuration_gap_total").increment(1);
            tracing::warn!(kpi = %kpi_name, "offset configured for unregistered KPI");
        }

        self.store
            .upsert_offset(&KpiOffset {
                period_type,
                period_start,
                period_end,
                scope,
                kpi_name,
                offset_value,
                reason,
                source,
                configured_by: Some(principal.username.clone()),
                configured_at: OffsetDateTime::now_utc(),
            })
            .await?;
        Ok(())
    }

    /// Replace every offset of a period in one sweep (go-live bulk load).
    #[allow(clippy::too_many_arguments)]
    pub async fn replace_offsets(
        &self,
        period_type: PeriodType,
        period_start: Date,
        period_end: Date,
        entries: &[OffsetEntry],
        reason: String,
        source: Option<String>,
        principal: &Principal,
    ) -> Result<usize, EngineError> {
        if period_end < period_start {
            return Err(EngineError::Validation(
                "offset period ends before it starts".into(),
            ));
        }

        let removed = self
            .store
            .delete_offsets_for_period(period_type, period_start)
            .await?;

        for entry in entries {
            self.configure_offset(
                period_type,
                period_start,
                period_end,
                entry.scope,
                entry.kpi_name.clone(),
                entry.offset_value,
                reason.clone(),
                source.clone(),
                principal,
            )
            .await?;
        }

        tracing::info!(
            period_type = %period_type,
            period_start = %period_start,
            removed,
            created = entries.len(),
            "offsets replaced"
        );
        Ok(entries.len())
    }

    /// Configure a baseline ("previous value" substitute) for first-day
    /// operation or a meter reset.
    pub async fn configure_baseline(
        &self,
        totalizer_id: i32,
        effective_date: Date,
        baseline_value: f64,
        reason: String,
        principal: &Principal,
    ) -> Result<(), EngineError> {
        if !self.catalog.contains(totalizer_id) {
            return Err(EngineError::Validation(format!(
                "unknown totalizer id {totalizer_id}"
            )));
        }
        if !baseline_value.is_finite() {
            return Err(EngineError::Validation(
                "baseline value is not a finite number".into(),
            ));
        }

        self.store
            .insert_baseline(&TotalizerBaseline {
                totalizer_id,
                effective_date,
                baseline_value,
                reason,
                configured_by: Some(principal.username.clone()),
                configured_at: OffsetDateTime::now_utc(),
            })
            .await?;

        tracing::info!(totalizer_id, effective_date = %effective_date, "baseline configured");
        Ok(())
    }
}

fn period_offset_type(period: Period) -> Option<PeriodType> {
    match period {
        Period::Day => None,
        Period::Month => Some(PeriodType::Month),
        Period::Year => Some(PeriodType::Year),
    }
}
