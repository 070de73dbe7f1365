use std::fmt;
use std::str::FromStr;

use time::{Date, OffsetDateTime};

use super::Scope;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, sqlx::Type)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PeriodType {
    Month,
    Year,
}

impl PeriodType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodType::Month => "month",
            PeriodType::Year => "year",
        }
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "month" => Ok(PeriodType::Month),
            "year" => Ok(PeriodType::Year),
            other => Err(format!("unknown period type: {other}")),
        }
    }
}

/// Pre-aggregated historical value injected into a period's aggregate to
/// cover time before the system went live. At most one row per
/// (period_type, period_start, scope, kpi_name).
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct KpiOffset {
    pub period_type: PeriodType,
    pub period_start: Date,
    pub period_end: Date,
    pub scope: Scope,
    pub kpi_name: String,
    pub offset_value: f64,
    pub reason: String,
    pub source: Option<String>,
    pub configured_by: Option<String>,
    pub configured_at: OffsetDateTime,
}
