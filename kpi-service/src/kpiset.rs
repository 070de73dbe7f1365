use std::collections::BTreeMap;

use plant_client::domain::Scope;

/// Fully-qualified KPI identity: one value per (scope, name) per day.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KpiKey {
    pub scope: Scope,
    pub name: String,
}

impl KpiKey {
    pub fn new(scope: Scope, name: impl Into<String>) -> Self {
        Self {
            scope,
            name: name.into(),
        }
    }
}

/// One day's KPI values, keyed by scope and name.
///
/// Absence means "no value for this day" and is never coerced to zero,
/// so aggregation can distinguish missing days from real zeros.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KpiSet {
    values: BTreeMap<KpiKey, f64>,
}

impl KpiSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, scope: Scope, name: &str) -> Option<f64> {
        self.values
            .get(&KpiKey::new(scope, name))
            .copied()
    }

    pub fn set(&mut self, scope: Scope, name: impl Into<String>, value: f64) {
        self.values.insert(KpiKey::new(scope, name), value);
    }

    /// Insert only when the key has no value yet (manual records must not
    /// shadow engine-computed values).
    pub fn set_if_absent(&mut self, scope: Scope, name: impl Into<String>, value: f64) {
        self.values.entry(KpiKey::new(scope, name)).or_insert(value);
    }

    pub fn contains(&self, scope: Scope, name: &str) -> bool {
        self.values.contains_key(&KpiKey::new(scope, name))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&KpiKey, f64)> {
        self.values.iter().map(|(k, v)| (k, *v))
    }

    pub fn scope_iter(&self, scope: Scope) -> impl Iterator<Item = (&str, f64)> {
        self.values
            .iter()
            .filter(move |(k, _)| k.scope == scope)
            .map(|(k, v)| (k.name.as_str(), *v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &KpiKey> {
        self.values.keys()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
