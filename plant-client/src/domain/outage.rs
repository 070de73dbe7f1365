use std::fmt;
use std::str::FromStr;

use time::OffsetDateTime;

use super::Scope;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, sqlx::Type)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[sqlx(type_name = "text")]
pub enum OutageType {
    #[sqlx(rename = "Planned Outage")]
    #[cfg_attr(feature = "serde", serde(rename = "Planned Outage"))]
    Planned,
    #[sqlx(rename = "Strategic Outage")]
    #[cfg_attr(feature = "serde", serde(rename = "Strategic Outage"))]
    Strategic,
    #[sqlx(rename = "Forced Outage")]
    #[cfg_attr(feature = "serde", serde(rename = "Forced Outage"))]
    Forced,
}

impl OutageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutageType::Planned => "Planned Outage",
            OutageType::Strategic => "Strategic Outage",
            OutageType::Forced => "Forced Outage",
        }
    }
}

impl fmt::Display for OutageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Planned Outage" => Ok(OutageType::Planned),
            "Strategic Outage" => Ok(OutageType::Strategic),
            "Forced Outage" => Ok(OutageType::Forced),
            other => Err(format!("unknown outage type: {other}")),
        }
    }
}

/// A logged shutdown interval for one unit.
///
/// `ended_at = None` means the outage is still open; closing it
/// ("synchronization") sets `ended_at` and the human-readable `duration`.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct OutageInterval {
    pub id: i64,
    pub unit: Scope,
    pub outage_type: OutageType,
    pub started_at: OffsetDateTime,
    pub ended_at: Option<OffsetDateTime>,
    pub reason: Option<String>,
    pub notification_no: Option<String>,
    pub duration: Option<String>,
    pub recorded_by: Option<String>,
    pub created_at: OffsetDateTime,
}
