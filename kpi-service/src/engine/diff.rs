use std::collections::HashMap;

use plant_client::domain::{Scope, TotalizerReading};

use crate::catalog::TotalizerCatalog;

/// Where the "previous value" of a diff came from, in lookup-precedence
/// order: prior-day reading, then the most recent effective baseline,
/// then zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PreviousValue {
    PriorReading(f64),
    Baseline(f64),
    Default,
}

impl PreviousValue {
    pub fn value(&self) -> f64 {
        match self {
            PreviousValue::PriorReading(v) | PreviousValue::Baseline(v) => *v,
            PreviousValue::Default => 0.0,
        }
    }
}

pub fn resolve_previous(prior_reading: Option<f64>, baseline: Option<f64>) -> PreviousValue {
    match (prior_reading, baseline) {
        (Some(v), _) => PreviousValue::PriorReading(v),
        (None, Some(v)) => PreviousValue::Baseline(v),
        (None, None) => PreviousValue::Default,
    }
}

/// The attributable daily delta. Negative results are preserved; they
/// reflect real adjustments, not errors.
pub fn difference(reading_value: f64, previous_value: f64, adjust_value: f64) -> f64 {
    reading_value - previous_value + adjust_value
}

/// Daily diffs grouped by scope, with every catalog totalizer present
/// (missing submissions read as 0.0 so the formulas never see gaps).
#[derive(Debug, Clone)]
pub struct DiffsByScope {
    by_scope: HashMap<Scope, HashMap<&'static str, f64>>,
}

impl DiffsByScope {
    pub fn zeroed(catalog: &TotalizerCatalog) -> Self {
        let mut by_scope: HashMap<Scope, HashMap<&'static str, f64>> = HashMap::new();
        for scope in Scope::ALL {
            by_scope.insert(scope, HashMap::new());
        }
        for def in catalog.iter() {
            by_scope.entry(def.scope).or_default().insert(def.name, 0.0);
        }
        Self { by_scope }
    }

    /// Build the day's diff map from persisted readings. The stored
    /// `difference_value` is authoritative; the previous-day row is never
    /// re-resolved here.
    pub fn from_readings(catalog: &TotalizerCatalog, readings: &[TotalizerReading]) -> Self {
        let mut diffs = Self::zeroed(catalog);
        for r in readings {
            if let Some(def) = catalog.get(r.totalizer_id) {
                diffs.set(def.scope, def.name, r.difference_value);
            }
        }
        diffs
    }

    pub fn set(&mut self, scope: Scope, name: &'static str, diff: f64) {
        self.by_scope.entry(scope).or_default().insert(name, diff);
    }

    pub fn get(&self, scope: Scope, name: &str) -> f64 {
        self.by_scope
            .get(&scope)
            .and_then(|m| m.get(name))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn scope_map(&self, scope: Scope) -> &HashMap<&'static str, f64> {
        static EMPTY: once_cell::sync::Lazy<HashMap<&'static str, f64>> =
            once_cell::sync::Lazy::new(HashMap::new);
        self.by_scope.get(&scope).unwrap_or_else(|| &*EMPTY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    fn reading(id: i32, diff: f64) -> TotalizerReading {
        TotalizerReading {
            totalizer_id: id,
            date: date!(2026 - 01 - 15),
            reading_value: 0.0,
            adjust_value: 0.0,
            difference_value: diff,
            username: None,
            created_at: datetime!(2026-01-15 06:00 UTC),
            updated_at: datetime!(2026-01-15 06:00 UTC),
        }
    }

    #[test]
    fn previous_value_precedence() {
        assert_eq!(
            resolve_previous(Some(1200.0), Some(900.0)),
            PreviousValue::PriorReading(1200.0)
        );
        assert_eq!(
            resolve_previous(None, Some(900.0)),
            PreviousValue::Baseline(900.0)
        );
        assert_eq!(resolve_previous(None, None), PreviousValue::Default);
        assert_eq!(PreviousValue::Default.value(), 0.0);
    }

    #[test]
    fn difference_preserves_negative_deltas() {
        // A replaced meter can legitimately read lower than yesterday.
        assert_eq!(difference(980.0, 1000.0, 0.0), -20.0);
        assert_eq!(difference(1100.0, 1000.0, -50.0), 50.0);
    }

    #[test]
    fn from_readings_zero_fills_missing_totalizers() {
        let catalog = TotalizerCatalog::standard();
        let diffs = DiffsByScope::from_readings(&catalog, &[reading(1, 100.0), reading(21, 7.5)]);

        assert_eq!(diffs.get(Scope::Unit1, "feeder_a"), 100.0);
        assert_eq!(diffs.get(Scope::Unit1, "feeder_b"), 0.0);
        assert_eq!(diffs.get(Scope::Station, "raw_water"), 7.5);
        assert_eq!(diffs.get(Scope::EnergyMeter, "unit1_gen"), 0.0);
    }
}
