use std::fmt;
use std::str::FromStr;

use time::{Date, OffsetDateTime};

use super::Scope;

/// Provenance of a KPI record.
///
/// `Manual` rows are operator-owned and never overwritten by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, sqlx::Type)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum KpiKind {
    Auto,
    Manual,
    Energy,
}

impl KpiKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            KpiKind::Auto => "auto",
            KpiKind::Manual => "manual",
            KpiKind::Energy => "energy",
        }
    }
}

impl fmt::Display for KpiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KpiKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(KpiKind::Auto),
            "manual" => Ok(KpiKind::Manual),
            "energy" => Ok(KpiKind::Energy),
            other => Err(format!("unknown kpi kind: {other}")),
        }
    }
}

/// One persisted KPI value, unique on (report_date, kind, scope, kpi_name).
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct KpiRecord {
    pub report_date: Date,
    pub kind: KpiKind,
    pub scope: Scope,
    pub kpi_name: String,
    pub value: f64,
    pub unit: Option<String>,
    pub username: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}
