use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// How a KPI's daily values combine into a period aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    Sum,
    Average,
    WeightedAvg,
    LastValue,
    Max,
    Min,
}

/// Aggregation granularity requested by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Day,
    Month,
    Year,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Month => "month",
            Period::Year => "year",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Period::Day),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            other => Err(format!("unknown period: {other}")),
        }
    }
}

/// Static configuration for one KPI name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KpiDef {
    pub name: &'static str,
    pub display_name: &'static str,
    pub unit: &'static str,
    pub day_aggregation: Aggregation,
    pub month_aggregation: Aggregation,
    pub year_aggregation: Aggregation,
    /// Same-scope KPI whose daily value weights a `WeightedAvg` aggregate.
    pub weight_by: Option<&'static str>,
    pub decimals: u32,
}

impl KpiDef {
    pub fn aggregation_for(&self, period: Period) -> Aggregation {
        match period {
            Period::Day => self.day_aggregation,
            Period::Month => self.month_aggregation,
            Period::Year => self.year_aggregation,
        }
    }
}

/// Closed KPI vocabulary. Unknown names resolve to `None` ("not
/// configured") rather than an error so manual ad-hoc KPIs can still be
/// stored; they simply pass through unaggregated at day granularity.
#[derive(Debug, Clone)]
pub struct KpiRegistry {
    defs: BTreeMap<&'static str, KpiDef>,
}

macro_rules! kpi {
    ($name:literal, $display:literal, $unit:literal, $agg:ident, $decimals:literal) => {
        KpiDef {
            name: $name,
            display_name: $display,
            unit: $unit,
            day_aggregation: Aggregation::$agg,
            month_aggregation: Aggregation::$agg,
            year_aggregation: Aggregation::$agg,
            weight_by: None,
            decimals: $decimals,
        }
    };
    ($name:literal, $display:literal, $unit:literal, weighted_by $weight:literal, $decimals:literal) => {
        KpiDef {
            name: $name,
            display_name: $display,
            unit: $unit,
            day_aggregation: Aggregation::WeightedAvg,
            month_aggregation: Aggregation::WeightedAvg,
            year_aggregation: Aggregation::WeightedAvg,
            weight_by: Some($weight),
            decimals: $decimals,
        }
    };
}

impl KpiRegistry {
    pub fn new(defs: Vec<KpiDef>) -> Self {
        Self {
            defs: defs.into_iter().map(|d| (d.name, d)).collect(),
        }
    }

    /// The full report vocabulary of the source plant, plus the
    /// energy-meter intermediates so every formula output is registered.
    pub fn standard() -> Self {
        Self::new(vec![
            // Generation and capacity
            kpi!("generation", "Generation", "MWh", Sum, 3),
            kpi!("plf_percent", "PLF", "%", Average, 3),
            // Availability and outages
            kpi!("running_hour", "Running Hours", "Hr", Sum, 2),
            kpi!("plant_availability_percent", "Plant Availability Factor", "%", Average, 2),
            kpi!("planned_outage_hour", "Planned Outage", "Hr", Sum, 2),
            kpi!("planned_outage_percent", "Planned Outage %", "%", Average, 2),
            kpi!("strategic_outage_hour", "Strategic Outage", "Hr", Sum, 2),
            // Coal
            kpi!("coal_consumption", "Coal Consumption", "T", Sum, 3),
            kpi!("specific_coal", "Specific Coal Consumption", "kg/kWh", weighted_by "generation", 6),
            kpi!("gcv", "Average GCV", "kcal/kg", weighted_by "coal_consumption", 2),
            kpi!("heat_rate", "Heat Rate", "kcal/kWh", weighted_by "generation", 2),
            // Oil
            kpi!("oil_consumption", "Oil Consumption", "KL", Sum, 3),
            kpi!("specific_oil", "Specific Oil Consumption", "ml/kWh", weighted_by "generation", 6),
            // Auxiliary power
            kpi!("aux_power", "Auxiliary Power Consumption", "MWh", Sum, 3),
            kpi!("aux_power_percent", "Auxiliary Power %", "%", weighted_by "generation", 3),
            // Steam
            kpi!("steam_generation", "Steam Generation", "T", Sum, 3),
            kpi!("specific_steam", "Specific Steam Consumption", "T/MWh", weighted_by "generation", 6),
            // Water
            kpi!("dm_water", "DM Water Consumption", "Cu.M", Sum, 3),
            kpi!("specific_dm_percent", "Specific DM Water Consumption", "%", weighted_by "steam_generation", 3),
            kpi!("total_raw_water_used_m3", "Total Raw Water Used", "Cu.M", Sum, 3),
            kpi!("avg_raw_water_m3_per_hr", "Average Raw Water/Hr", "Cu.M/Hr", Average, 3),
            kpi!("sp_raw_water_l_per_kwh", "Specific Raw Water", "L/kWh", weighted_by "generation", 3),
            kpi!("total_dm_water_used_m3", "Total DM Water Used", "Cu.M", Sum, 3),
            // Station
            kpi!("stn_net_export_mu", "Station Net Export", "MWh", Sum, 3),
            // Environment (manual entry)
            kpi!("stack_emission", "Stack Emission (SPM)", "mg/Nm3", Average, 2),
            // RO plant (manual entry)
            kpi!("ro_running_hour", "RO Plant Running Hours", "Hr", Sum, 2),
            kpi!("ro_production_cum", "RO Plant Production", "Cu.M", Sum, 3),
            // Coal blending (manual entry)
            kpi!("clarifier_level", "Clarifier Reservoir Level", "%", Average, 2),
            kpi!("coal_indonesian_percent", "Indonesian Coal %", "%", weighted_by "coal_consumption", 2),
            kpi!("coal_southafrica_percent", "South African Coal %", "%", weighted_by "coal_consumption", 2),
            kpi!("coal_domestic_percent", "Domestic Coal %", "%", weighted_by "coal_consumption", 2),
            // Energy-meter intermediates
            kpi!("unit1_generation", "Unit-1 Generation", "MWh", Sum, 3),
            kpi!("unit2_generation", "Unit-2 Generation", "MWh", Sum, 3),
            kpi!("unit1_unit_aux_mwh", "Unit-1 Unit Aux", "MWh", Sum, 3),
            kpi!("unit2_unit_aux_mwh", "Unit-2 Unit Aux", "MWh", Sum, 3),
            kpi!("total_station_aux_mwh", "Station Aux Total", "MWh", Sum, 3),
            kpi!("total_station_tie_mwh", "Station Tie Total", "MWh", Sum, 3),
            kpi!("unit1_aux_consumption_mwh", "Unit-1 Aux Consumption", "MWh", Sum, 3),
            kpi!("unit2_aux_consumption_mwh", "Unit-2 Aux Consumption", "MWh", Sum, 3),
            kpi!("unit1_aux_percent", "Unit-1 Aux %", "%", weighted_by "unit1_generation", 3),
            kpi!("unit2_aux_percent", "Unit-2 Aux %", "%", weighted_by "unit2_generation", 3),
            kpi!("unit1_plf_percent", "Unit-1 PLF", "%", Average, 3),
            kpi!("unit2_plf_percent", "Unit-2 PLF", "%", Average, 3),
            kpi!("station_plf_percent", "Station PLF", "%", Average, 3),
        ])
    }

    pub fn get(&self, name: &str) -> Option<&KpiDef> {
        self.defs.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.defs.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_name_is_not_configured() {
        let registry = KpiRegistry::standard();
        assert!(registry.get("boiler_magic").is_none());
    }

    #[test]
    fn weight_targets_are_registered() {
        let registry = KpiRegistry::standard();
        for name in registry.names().collect::<Vec<_>>() {
            let def = registry.get(name).unwrap();
            if let Some(weight) = def.weight_by {
                assert!(
                    registry.get(weight).is_some(),
                    "weight_by {weight} of {name} must be registered"
                );
            }
        }
    }

    #[test]
    fn aggregation_follows_period_column() {
        let registry = KpiRegistry::standard();
        let def = registry.get("specific_coal").unwrap();
        assert_eq!(def.aggregation_for(Period::Month), Aggregation::WeightedAvg);
        assert_eq!(def.weight_by, Some("generation"));
        assert_eq!(def.decimals, 6);

        let def = registry.get("coal_consumption").unwrap();
        assert_eq!(def.aggregation_for(Period::Year), Aggregation::Sum);
    }
}
