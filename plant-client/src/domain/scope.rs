use std::fmt;
use std::str::FromStr;

/// Organizational scope a totalizer or KPI belongs to.
///
/// The string forms ("Unit-1", "Energy-Meter", ...) are the canonical
/// values stored in the database and accepted at the service boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, sqlx::Type)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[sqlx(type_name = "text")]
pub enum Scope {
    #[sqlx(rename = "Unit-1")]
    #[cfg_attr(feature = "serde", serde(rename = "Unit-1"))]
    Unit1,
    #[sqlx(rename = "Unit-2")]
    #[cfg_attr(feature = "serde", serde(rename = "Unit-2"))]
    Unit2,
    #[sqlx(rename = "Station")]
    #[cfg_attr(feature = "serde", serde(rename = "Station"))]
    Station,
    #[sqlx(rename = "Energy-Meter")]
    #[cfg_attr(feature = "serde", serde(rename = "Energy-Meter"))]
    EnergyMeter,
}

impl Scope {
    pub const ALL: [Scope; 4] = [
        Scope::Unit1,
        Scope::Unit2,
        Scope::Station,
        Scope::EnergyMeter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Unit1 => "Unit-1",
            Scope::Unit2 => "Unit-2",
            Scope::Station => "Station",
            Scope::EnergyMeter => "Energy-Meter",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Unit-1" => Ok(Scope::Unit1),
            "Unit-2" => Ok(Scope::Unit2),
            "Station" => Ok(Scope::Station),
            "Energy-Meter" => Ok(Scope::EnergyMeter),
            other => Err(format!("unknown scope: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_canonical_names() {
        for scope in Scope::ALL {
            assert_eq!(scope.as_str().parse::<Scope>().unwrap(), scope);
        }
    }

    #[test]
    fn rejects_unknown_scope() {
        assert!("Unit-3".parse::<Scope>().is_err());
    }
}
