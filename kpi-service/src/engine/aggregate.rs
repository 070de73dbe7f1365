//! Registry-driven aggregation of per-day KPI maps into period values.
//!
//! Null handling is strict: absent days are ignored per aggregation rule,
//! and a KPI that is null on every day aggregates to null, never zero.

use plant_client::domain::Scope;
use time::{Date, Month};

use crate::kpiset::KpiSet;
use crate::registry::{Aggregation, KpiDef, Period};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregateOutcome {
    pub value: Option<f64>,
    /// A weighted average fell back to the plain mean because no usable
    /// weight was found (configuration gap, observable by the caller).
    pub weight_fallback: bool,
}

/// How an offset was merged into a period aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetApplication {
    /// Added directly (sum/max/min).
    Direct,
    /// Added to an averaging KPI. An approximation, since the offset's
    /// own day-count is unknown.
    Approximate,
    /// Not applied (aggregation has no meaningful offset semantics).
    Skipped,
}

pub fn aggregate_kpi(
    def: &KpiDef,
    period: Period,
    scope: Scope,
    daily: &[KpiSet],
) -> AggregateOutcome {
    let values: Vec<Option<f64>> = daily.iter().map(|d| d.get(scope, def.name)).collect();

    match def.aggregation_for(period) {
        Aggregation::Sum => AggregateOutcome {
            value: fold_present(&values, |acc, v| acc + v),
            weight_fallback: false,
        },
        Aggregation::Average => AggregateOutcome {
            value: average(&values),
            weight_fallback: false,
        },
        Aggregation::WeightedAvg => weighted_average(def, scope, daily, &values),
        Aggregation::LastValue => AggregateOutcome {
            value: values.iter().rev().find_map(|v| *v),
            weight_fallback: false,
        },
        Aggregation::Max => AggregateOutcome {
            value: fold_present(&values, f64::max),
            weight_fallback: false,
        },
        Aggregation::Min => AggregateOutcome {
            value: fold_present(&values, f64::min),
            weight_fallback: false,
        },
    }
}

fn fold_present(values: &[Option<f64>], f: impl Fn(f64, f64) -> f64) -> Option<f64> {
    values
        .iter()
        .flatten()
        .copied()
        .reduce(|acc, v| f(acc, v))
}

fn average(values: &[Option<f64>]) -> Option<f64> {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        None
    } else {
        Some(present.iter().sum::<f64>() / present.len() as f64)
    }
}

/// Σ(value·weight) / Σ(weight) over days where both are non-null. Days
/// with a null weight are excluded from both sums; when no weight
/// survives, fall back to the plain average.
fn weighted_average(
    def: &KpiDef,
    scope: Scope,
    daily: &[KpiSet],
    values: &[Option<f64>],
) -> AggregateOutcome {
    let Some(weight_name) = def.weight_by else {
        return AggregateOutcome {
            value: average(values),
            weight_fallback: true,
        };
    };

    let mut weighted_sum = 0.0;
    let mut weight_sum = 0.0;
    for (day, value) in daily.iter().zip(values) {
        let (Some(v), Some(w)) = (*value, day.get(scope, weight_name)) else {
            continue;
        };
        weighted_sum += v * w;
        weight_sum += w;
    }

    if weight_sum > 0.0 {
        AggregateOutcome {
            value: Some(weighted_sum / weight_sum),
            weight_fallback: false,
        }
    } else {
        let value = average(values);
        AggregateOutcome {
            value,
            weight_fallback: value.is_some(),
        }
    }
}

/// Merge a configured historical offset into a period aggregate.
pub fn apply_offset(
    aggregation: Aggregation,
    value: Option<f64>,
    offset: f64,
) -> (Option<f64>, OffsetApplication) {
    match aggregation {
        Aggregation::Sum | Aggregation::Max | Aggregation::Min => {
            (Some(value.unwrap_or(0.0) + offset), OffsetApplication::Direct)
        }
        Aggregation::Average | Aggregation::WeightedAvg => (
            Some(value.unwrap_or(0.0) + offset),
            OffsetApplication::Approximate,
        ),
        Aggregation::LastValue => (value, OffsetApplication::Skipped),
    }
}

pub fn month_start(date: Date) -> Date {
    date.replace_day(1).unwrap_or(date)
}

/// First day of the fiscal year containing `date` (April-start in the
/// source plant; the month is configurable).
pub fn fiscal_year_start(date: Date, start_month: u8) -> Date {
    let month = Month::try_from(start_month.clamp(1, 12)).unwrap_or(Month::April);
    let year = if u8::from(date.month()) >= u8::from(month) {
        date.year()
    } else {
        date.year() - 1
    };
    Date::from_calendar_date(year, month, 1).unwrap_or_else(|_| month_start(date))
}

/// Inclusive date window `[period_start, query_date]` for an aggregation
/// request. Periods never extend past the query date: monthly and yearly
/// previews are routinely requested mid-period.
pub fn period_window(period: Period, date: Date, fiscal_start_month: u8) -> (Date, Date) {
    match period {
        Period::Day => (date, date),
        Period::Month => (month_start(date), date),
        Period::Year => (fiscal_year_start(date, fiscal_start_month), date),
    }
}

pub fn dates_between(start: Date, end: Date) -> Vec<Date> {
    let mut out = Vec::new();
    let mut cur = start;
    while cur <= end {
        out.push(cur);
        match cur.next_day() {
            Some(next) => cur = next,
            None => break,
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::KpiRegistry;
    use time::macros::date;

    fn day(scope: Scope, entries: &[(&str, f64)]) -> KpiSet {
        let mut set = KpiSet::new();
        for (name, value) in entries {
            set.set(scope, *name, *value);
        }
        set
    }

    #[test]
    fn sum_ignores_absent_days() {
        let registry = KpiRegistry::standard();
        let def = registry.get("coal_consumption").unwrap();
        let daily = vec![
            day(Scope::Unit1, &[("coal_consumption", 500.0)]),
            KpiSet::new(),
            day(Scope::Unit1, &[("coal_consumption", 480.0)]),
        ];

        let outcome = aggregate_kpi(def, Period::Month, Scope::Unit1, &daily);
        assert_eq!(outcome.value, Some(980.0));
    }

    #[test]
    fn all_null_days_aggregate_to_null() {
        let registry = KpiRegistry::standard();
        let def = registry.get("stack_emission").unwrap();
        let daily = vec![KpiSet::new(), KpiSet::new()];

        let outcome = aggregate_kpi(def, Period::Month, Scope::Station, &daily);
        assert_eq!(outcome.value, None);
    }

    #[test]
    fn weighted_average_uses_same_day_weights() {
        let registry = KpiRegistry::standard();
        let def = registry.get("specific_coal").unwrap();
        let daily = vec![
            day(Scope::Unit1, &[("specific_coal", 10.0), ("generation", 2.0)]),
            day(Scope::Unit1, &[("specific_coal", 20.0), ("generation", 8.0)]),
        ];

        let outcome = aggregate_kpi(def, Period::Month, Scope::Unit1, &daily);
        assert_eq!(outcome.value, Some(18.0));
        assert!(!outcome.weight_fallback);
    }

    #[test]
    fn weighted_average_excludes_days_with_null_weight() {
        let registry = KpiRegistry::standard();
        let def = registry.get("specific_coal").unwrap();
        let daily = vec![
            day(Scope::Unit1, &[("specific_coal", 10.0), ("generation", 2.0)]),
            // Weight missing: this day must drop out of both sums.
            day(Scope::Unit1, &[("specific_coal", 99.0)]),
        ];

        let outcome = aggregate_kpi(def, Period::Month, Scope::Unit1, &daily);
        assert_eq!(outcome.value, Some(10.0));
    }

    #[test]
    fn weighted_average_falls_back_when_no_weight_survives() {
        let registry = KpiRegistry::standard();
        let def = registry.get("specific_coal").unwrap();
        let daily = vec![
            day(Scope::Unit1, &[("specific_coal", 10.0), ("generation", 0.0)]),
            day(Scope::Unit1, &[("specific_coal", 20.0), ("generation", 0.0)]),
        ];

        let outcome = aggregate_kpi(def, Period::Month, Scope::Unit1, &daily);
        assert_eq!(outcome.value, Some(15.0));
        assert!(outcome.weight_fallback);
    }

    #[test]
    fn single_day_month_equals_day_aggregation() {
        let registry = KpiRegistry::standard();
        let daily = vec![day(
            Scope::Unit1,
            &[
                ("coal_consumption", 500.0),
                ("specific_coal", 1.25),
                ("generation", 400.0),
                ("plf_percent", 13.333),
            ],
        )];

        for name in ["coal_consumption", "specific_coal", "generation", "plf_percent"] {
            let def = registry.get(name).unwrap();
            let as_day = aggregate_kpi(def, Period::Day, Scope::Unit1, &daily);
            let as_month = aggregate_kpi(def, Period::Month, Scope::Unit1, &daily);
            assert_eq!(as_day.value, as_month.value, "{name}");
        }
    }

    #[test]
    fn offsets_add_directly_for_sums_and_approximately_for_averages() {
        let (value, how) = apply_offset(Aggregation::Sum, Some(120.0), 30.0);
        assert_eq!(value, Some(150.0));
        assert_eq!(how, OffsetApplication::Direct);

        let (value, how) = apply_offset(Aggregation::Sum, None, 30.0);
        assert_eq!(value, Some(30.0));
        assert_eq!(how, OffsetApplication::Direct);

        let (value, how) = apply_offset(Aggregation::WeightedAvg, Some(1.2), 0.1);
        assert_eq!(value, Some(1.3));
        assert_eq!(how, OffsetApplication::Approximate);

        let (value, how) = apply_offset(Aggregation::LastValue, Some(7.0), 3.0);
        assert_eq!(value, Some(7.0));
        assert_eq!(how, OffsetApplication::Skipped);
    }

    #[test]
    fn fiscal_year_starts_in_april() {
        assert_eq!(
            fiscal_year_start(date!(2026 - 01 - 15), 4),
            date!(2025 - 04 - 01)
        );
        assert_eq!(
            fiscal_year_start(date!(2026 - 04 - 01), 4),
            date!(2026 - 04 - 01)
        );
        assert_eq!(
            fiscal_year_start(date!(2026 - 11 - 30), 4),
            date!(2026 - 04 - 01)
        );
    }

    #[test]
    fn period_windows_clamp_to_query_date() {
        let date = date!(2026 - 01 - 15);
        assert_eq!(period_window(Period::Day, date, 4), (date, date));
        assert_eq!(
            period_window(Period::Month, date, 4),
            (date!(2026 - 01 - 01), date)
        );
        assert_eq!(
            period_window(Period::Year, date, 4),
            (date!(2025 - 04 - 01), date)
        );

        let days = dates_between(date!(2026 - 01 - 01), date);
        assert_eq!(days.len(), 15);
    }
}
