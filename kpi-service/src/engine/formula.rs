//! Pure KPI formulas. Every output is rounded exactly once, here at the
//! formula boundary; aggregation never rounds again.

use std::collections::HashMap;

use super::outage::OutageKpis;

pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

fn d(diffs: &HashMap<&'static str, f64>, key: &str) -> f64 {
    diffs.get(key).copied().unwrap_or(0.0)
}

/// Fuel, water and steam KPIs for one unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitKpis {
    pub coal_consumption: f64,
    pub specific_coal: f64,
    pub oil_consumption: f64,
    pub specific_oil: f64,
    pub dm_water: f64,
    pub steam_generation: f64,
    pub specific_steam: f64,
    pub specific_dm_percent: f64,
}

impl UnitKpis {
    pub fn entries(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("coal_consumption", self.coal_consumption),
            ("specific_coal", self.specific_coal),
            ("oil_consumption", self.oil_consumption),
            ("specific_oil", self.specific_oil),
            ("dm_water", self.dm_water),
            ("steam_generation", self.steam_generation),
            ("specific_steam", self.specific_steam),
            ("specific_dm_percent", self.specific_dm_percent),
        ]
    }
}

pub fn unit_kpis(diffs: &HashMap<&'static str, f64>, generation_mwh: f64) -> UnitKpis {
    let coal = d(diffs, "feeder_a")
        + d(diffs, "feeder_b")
        + d(diffs, "feeder_c")
        + d(diffs, "feeder_d")
        + d(diffs, "feeder_e");
    let oil = d(diffs, "ldo_flow");
    let dm_water = d(diffs, "dm7") + d(diffs, "dm11");
    let steam = d(diffs, "main_steam");

    let gen = generation_mwh;
    let specific_coal = if gen > 0.0 { coal / gen } else { 0.0 };
    let specific_oil = if gen > 0.0 { oil / gen } else { 0.0 };
    let specific_steam = if gen > 0.0 { steam / gen } else { 0.0 };
    let specific_dm_percent = if steam > 0.0 { dm_water / steam * 100.0 } else { 0.0 };

    UnitKpis {
        coal_consumption: round_to(coal, 3),
        specific_coal: round_to(specific_coal, 6),
        oil_consumption: round_to(oil, 3),
        specific_oil: round_to(specific_oil, 6),
        dm_water: round_to(dm_water, 3),
        steam_generation: round_to(steam, 3),
        specific_steam: round_to(specific_steam, 6),
        specific_dm_percent: round_to(specific_dm_percent, 3),
    }
}

/// Generation, auxiliary power and PLF derived from the energy meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyMeterKpis {
    pub unit1_generation: f64,
    pub unit2_generation: f64,
    pub unit1_unit_aux_mwh: f64,
    pub unit2_unit_aux_mwh: f64,
    pub total_station_aux_mwh: f64,
    pub total_station_tie_mwh: f64,
    pub unit1_aux_consumption_mwh: f64,
    pub unit1_aux_percent: f64,
    pub unit2_aux_consumption_mwh: f64,
    pub unit2_aux_percent: f64,
    pub unit1_plf_percent: f64,
    pub unit2_plf_percent: f64,
    pub station_plf_percent: f64,
}

impl EnergyMeterKpis {
    pub fn entries(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("unit1_generation", self.unit1_generation),
            ("unit2_generation", self.unit2_generation),
            ("unit1_unit_aux_mwh", self.unit1_unit_aux_mwh),
            ("unit2_unit_aux_mwh", self.unit2_unit_aux_mwh),
            ("total_station_aux_mwh", self.total_station_aux_mwh),
            ("total_station_tie_mwh", self.total_station_tie_mwh),
            ("unit1_aux_consumption_mwh", self.unit1_aux_consumption_mwh),
            ("unit1_aux_percent", self.unit1_aux_percent),
            ("unit2_aux_consumption_mwh", self.unit2_aux_consumption_mwh),
            ("unit2_aux_percent", self.unit2_aux_percent),
            ("unit1_plf_percent", self.unit1_plf_percent),
            ("unit2_plf_percent", self.unit2_plf_percent),
            ("station_plf_percent", self.station_plf_percent),
        ]
    }
}

pub fn energy_meter_kpis(
    diffs: &HashMap<&'static str, f64>,
    rated_unit_capacity_mwh: f64,
) -> EnergyMeterKpis {
    let unit1_unit_aux = d(diffs, "1lsr01_ic1") + d(diffs, "1lsr02_ic1")
        + d(diffs, "1lsr01_ic2_tie")
        - d(diffs, "SST_10")
        - d(diffs, "UST_15");

    let unit2_unit_aux =
        d(diffs, "2lsr01_ic1") + d(diffs, "2lsr02_ic1") + d(diffs, "2lsr01_ic2_tie")
            - d(diffs, "UST_25");

    // SST_10 and UST_15 are counted twice; the legacy meter sheet does the
    // same and the published report numbers depend on it.
    let station_aux = d(diffs, "rlsr01")
        + d(diffs, "rlsr02")
        + d(diffs, "rlsr03")
        + d(diffs, "rlsr04")
        - d(diffs, "1lsr01_ic2_tie")
        - d(diffs, "1lsr02_ic2_tie")
        - d(diffs, "2lsr01_ic2_tie")
        - d(diffs, "2lsr02_ic2_tie")
        + d(diffs, "SST_10")
        + d(diffs, "UST_15")
        + d(diffs, "UST_25")
        + d(diffs, "SST_10")
        + d(diffs, "UST_15");

    let station_tie = d(diffs, "1lsr01_ic2_tie")
        + d(diffs, "1lsr02_ic2_tie")
        + d(diffs, "2lsr01_ic2_tie")
        + d(diffs, "2lsr02_ic2_tie");

    let unit1_gen = d(diffs, "unit1_gen");
    let unit2_gen = d(diffs, "unit2_gen");

    // Each unit carries half of the shared station auxiliaries.
    let unit1_aux_total = unit1_unit_aux + station_aux / 2.0;
    let unit2_aux_total = unit2_unit_aux + station_aux / 2.0;

    let unit1_aux_percent = if unit1_gen > 0.0 {
        unit1_aux_total / unit1_gen * 100.0
    } else {
        0.0
    };
    let unit2_aux_percent = if unit2_gen > 0.0 {
        unit2_aux_total / unit2_gen * 100.0
    } else {
        0.0
    };

    let rated = rated_unit_capacity_mwh;
    let unit1_plf = if unit1_gen > 0.0 && rated > 0.0 {
        unit1_gen / rated * 100.0
    } else {
        0.0
    };
    let unit2_plf = if unit2_gen > 0.0 && rated > 0.0 {
        unit2_gen / rated * 100.0
    } else {
        0.0
    };
    let station_gen = unit1_gen + unit2_gen;
    let station_plf = if station_gen > 0.0 && rated > 0.0 {
        station_gen / (2.0 * rated) * 100.0
    } else {
        0.0
    };

    EnergyMeterKpis {
        unit1_generation: round_to(unit1_gen, 3),
        unit2_generation: round_to(unit2_gen, 3),
        unit1_unit_aux_mwh: round_to(unit1_unit_aux, 3),
        unit2_unit_aux_mwh: round_to(unit2_unit_aux, 3),
        total_station_aux_mwh: round_to(station_aux, 3),
        total_station_tie_mwh: round_to(station_tie, 3),
        unit1_aux_consumption_mwh: round_to(unit1_aux_total, 3),
        unit1_aux_percent: round_to(unit1_aux_percent, 3),
        unit2_aux_consumption_mwh: round_to(unit2_aux_total, 3),
        unit2_aux_percent: round_to(unit2_aux_percent, 3),
        unit1_plf_percent: round_to(unit1_plf, 3),
        unit2_plf_percent: round_to(unit2_plf, 3),
        station_plf_percent: round_to(station_plf, 3),
    }
}

/// Station raw-water balance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationWaterKpis {
    pub total_raw_water_used_m3: f64,
    pub avg_raw_water_m3_per_hr: f64,
    pub sp_raw_water_l_per_kwh: f64,
}

impl StationWaterKpis {
    pub fn entries(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("total_raw_water_used_m3", self.total_raw_water_used_m3),
            ("avg_raw_water_m3_per_hr", self.avg_raw_water_m3_per_hr),
            ("sp_raw_water_l_per_kwh", self.sp_raw_water_l_per_kwh),
        ]
    }
}

pub fn station_water_kpis(
    diffs: &HashMap<&'static str, f64>,
    unit1_generation: f64,
    unit2_generation: f64,
) -> StationWaterKpis {
    let raw_water = d(diffs, "raw_water");
    let combined_gen = unit1_generation + unit2_generation;

    let sp_raw = if combined_gen > 0.0 {
        raw_water * 1000.0 / combined_gen
    } else {
        0.0
    };

    StationWaterKpis {
        total_raw_water_used_m3: round_to(raw_water, 3),
        avg_raw_water_m3_per_hr: round_to(raw_water / 24.0, 3),
        sp_raw_water_l_per_kwh: round_to(sp_raw, 3),
    }
}

/// Everything a unit contributes to the day: process KPIs, energy-derived
/// KPIs and the outage picture. Input to the station roll-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitDay {
    pub kpis: UnitKpis,
    pub generation: f64,
    pub plf_percent: f64,
    pub aux_power: f64,
    pub aux_power_percent: f64,
    pub outage: OutageKpis,
}

/// Station-level roll-up of the two units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationKpis {
    pub generation: f64,
    pub coal_consumption: f64,
    pub oil_consumption: f64,
    pub aux_power: f64,
    pub steam_generation: f64,
    pub dm_water: f64,
    pub specific_coal: f64,
    pub specific_oil: f64,
    pub specific_steam: f64,
    pub aux_power_percent: f64,
    pub specific_dm_percent: f64,
    pub plf_percent: f64,
    pub running_hour: f64,
    pub planned_outage_hour: f64,
    pub strategic_outage_hour: f64,
    pub plant_availability_percent: f64,
    pub planned_outage_percent: f64,
    pub stn_net_export_mu: f64,
}

impl UnitDay {
    pub fn entries(&self) -> Vec<(&'static str, f64)> {
        let mut entries = self.kpis.entries();
        entries.extend([
            ("generation", self.generation),
            ("plf_percent", self.plf_percent),
            ("aux_power", self.aux_power),
            ("aux_power_percent", self.aux_power_percent),
        ]);
        entries.extend(self.outage.entries());
        entries
    }
}

impl StationKpis {
    pub fn entries(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("generation", self.generation),
            ("coal_consumption", self.coal_consumption),
            ("oil_consumption", self.oil_consumption),
            ("aux_power", self.aux_power),
            ("steam_generation", self.steam_generation),
            ("dm_water", self.dm_water),
            ("specific_coal", self.specific_coal),
            ("specific_oil", self.specific_oil),
            ("specific_steam", self.specific_steam),
            ("aux_power_percent", self.aux_power_percent),
            ("specific_dm_percent", self.specific_dm_percent),
            ("plf_percent", self.plf_percent),
            ("running_hour", self.running_hour),
            ("planned_outage_hour", self.planned_outage_hour),
            ("strategic_outage_hour", self.strategic_outage_hour),
            ("plant_availability_percent", self.plant_availability_percent),
            ("planned_outage_percent", self.planned_outage_percent),
            ("stn_net_export_mu", self.stn_net_export_mu),
        ]
    }
}

/// Quantities and hours sum across units; specific ratios are
/// generation-weighted (steam-weighted for DM %); availability-style
/// percents are the plain mean of the two units.
pub fn station_combined(u1: &UnitDay, u2: &UnitDay, station_capacity_mwh: f64) -> StationKpis {
    let generation = u1.generation + u2.generation;
    let aux_power = u1.aux_power + u2.aux_power;
    let steam = u1.kpis.steam_generation + u2.kpis.steam_generation;

    let weighted_by_gen = |a: f64, b: f64| {
        if generation > 0.0 {
            (a * u1.generation + b * u2.generation) / generation
        } else {
            0.0
        }
    };

    let specific_dm_percent = if steam > 0.0 {
        (u1.kpis.specific_dm_percent * u1.kpis.steam_generation
            + u2.kpis.specific_dm_percent * u2.kpis.steam_generation)
            / steam
    } else {
        0.0
    };

    let plf = if generation > 0.0 && station_capacity_mwh > 0.0 {
        generation / station_capacity_mwh * 100.0
    } else {
        0.0
    };

    StationKpis {
        generation: round_to(generation, 3),
        coal_consumption: round_to(u1.kpis.coal_consumption + u2.kpis.coal_consumption, 3),
        oil_consumption: round_to(u1.kpis.oil_consumption + u2.kpis.oil_consumption, 3),
        aux_power: round_to(aux_power, 3),
        steam_generation: round_to(steam, 3),
        dm_water: round_to(u1.kpis.dm_water + u2.kpis.dm_water, 3),
        specific_coal: round_to(
            weighted_by_gen(u1.kpis.specific_coal, u2.kpis.specific_coal),
            6,
        ),
        specific_oil: round_to(
            weighted_by_gen(u1.kpis.specific_oil, u2.kpis.specific_oil),
            6,
        ),
        specific_steam: round_to(
            weighted_by_gen(u1.kpis.specific_steam, u2.kpis.specific_steam),
            6,
        ),
        aux_power_percent: round_to(
            weighted_by_gen(u1.aux_power_percent, u2.aux_power_percent),
            3,
        ),
        specific_dm_percent: round_to(specific_dm_percent, 3),
        plf_percent: round_to(plf, 3),
        running_hour: round_to(u1.outage.running_hour + u2.outage.running_hour, 2),
        planned_outage_hour: round_to(
            u1.outage.planned_outage_hour + u2.outage.planned_outage_hour,
            2,
        ),
        strategic_outage_hour: round_to(
            u1.outage.strategic_outage_hour + u2.outage.strategic_outage_hour,
            2,
        ),
        plant_availability_percent: round_to(
            (u1.outage.plant_availability_percent + u2.outage.plant_availability_percent) / 2.0,
            2,
        ),
        planned_outage_percent: round_to(
            (u1.outage.planned_outage_percent + u2.outage.planned_outage_percent) / 2.0,
            2,
        ),
        stn_net_export_mu: round_to(generation - aux_power, 3),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diffs(entries: &[(&'static str, f64)]) -> HashMap<&'static str, f64> {
        entries.iter().copied().collect()
    }

    #[test]
    fn coal_is_sum_of_five_feeders() {
        let diffs = diffs(&[
            ("feeder_a", 100.0),
            ("feeder_b", 120.0),
            ("feeder_c", 90.0),
            ("feeder_d", 110.0),
            ("feeder_e", 80.0),
        ]);
        let kpis = unit_kpis(&diffs, 400.0);

        assert_eq!(kpis.coal_consumption, 500.0);
        assert!((kpis.specific_coal - 1.25).abs() < 1e-9);
    }

    #[test]
    fn specific_ratios_zero_when_generation_not_positive() {
        let diffs = diffs(&[("feeder_a", 100.0), ("ldo_flow", 2.0), ("main_steam", 900.0)]);

        for gen in [0.0, -5.0] {
            let kpis = unit_kpis(&diffs, gen);
            assert_eq!(kpis.specific_coal, 0.0);
            assert_eq!(kpis.specific_oil, 0.0);
            assert_eq!(kpis.specific_steam, 0.0);
        }
    }

    #[test]
    fn dm_percent_guards_on_steam_not_generation() {
        let diffs = diffs(&[("dm7", 30.0), ("dm11", 15.0), ("main_steam", 900.0)]);
        let kpis = unit_kpis(&diffs, 0.0);
        assert_eq!(kpis.specific_dm_percent, 5.0);

        let no_steam = unit_kpis(&HashMap::new(), 400.0);
        assert_eq!(no_steam.specific_dm_percent, 0.0);
    }

    #[test]
    fn station_aux_double_counts_sst10_and_ust15() {
        // Only SST_10 and UST_15 set: every other term is zero, so the
        // station aux total is exactly twice their sum.
        let diffs = diffs(&[("SST_10", 10.0), ("UST_15", 6.0)]);
        let kpis = energy_meter_kpis(&diffs, 3000.0);

        assert_eq!(kpis.total_station_aux_mwh, 2.0 * (10.0 + 6.0));
        // And each of them cancels out of its unit's own aux total:
        // -1 from the unit term, +2/2 from the halved station total.
        assert_eq!(kpis.unit1_unit_aux_mwh, -16.0);
        assert_eq!(kpis.unit1_aux_consumption_mwh, 0.0);
    }

    #[test]
    fn plf_uses_rated_capacity() {
        let diffs = diffs(&[("unit1_gen", 2400.0), ("unit2_gen", 3000.0)]);
        let kpis = energy_meter_kpis(&diffs, 3000.0);

        assert_eq!(kpis.unit1_plf_percent, 80.0);
        assert_eq!(kpis.unit2_plf_percent, 100.0);
        assert_eq!(kpis.station_plf_percent, 90.0);
    }

    #[test]
    fn aux_percent_against_own_generation() {
        let diffs = diffs(&[
            ("unit1_gen", 2000.0),
            ("1lsr01_ic1", 100.0),
            ("1lsr02_ic1", 60.0),
        ]);
        let kpis = energy_meter_kpis(&diffs, 3000.0);

        assert_eq!(kpis.unit1_unit_aux_mwh, 160.0);
        assert_eq!(kpis.unit1_aux_consumption_mwh, 160.0);
        assert_eq!(kpis.unit1_aux_percent, 8.0);
        assert_eq!(kpis.unit2_aux_percent, 0.0);
    }

    #[test]
    fn station_water_balance() {
        let diffs = diffs(&[("raw_water", 4800.0)]);
        let kpis = station_water_kpis(&diffs, 2000.0, 2000.0);

        assert_eq!(kpis.total_raw_water_used_m3, 4800.0);
        assert_eq!(kpis.avg_raw_water_m3_per_hr, 200.0);
        assert_eq!(kpis.sp_raw_water_l_per_kwh, 1200.0);

        let idle = station_water_kpis(&diffs, 0.0, 0.0);
        assert_eq!(idle.sp_raw_water_l_per_kwh, 0.0);
    }

    fn unit_day(generation: f64, coal: f64, specific_coal: f64) -> UnitDay {
        UnitDay {
            kpis: UnitKpis {
                coal_consumption: coal,
                specific_coal,
                oil_consumption: 0.0,
                specific_oil: 0.0,
                dm_water: 0.0,
                steam_generation: 0.0,
                specific_steam: 0.0,
                specific_dm_percent: 0.0,
            },
            generation,
            plf_percent: 0.0,
            aux_power: 0.0,
            aux_power_percent: 0.0,
            outage: OutageKpis::idle_day(),
        }
    }

    #[test]
    fn station_roll_up_weights_specifics_by_generation() {
        let u1 = unit_day(1000.0, 500.0, 0.5);
        let u2 = unit_day(3000.0, 2100.0, 0.7);
        let station = station_combined(&u1, &u2, 6000.0);

        assert_eq!(station.generation, 4000.0);
        assert_eq!(station.coal_consumption, 2600.0);
        // (0.5*1000 + 0.7*3000) / 4000 = 0.65
        assert!((station.specific_coal - 0.65).abs() < 1e-9);
        assert!((station.plf_percent - 66.667).abs() < 1e-9);
    }

    #[test]
    fn station_roll_up_zero_generation_guards() {
        let u1 = unit_day(0.0, 0.0, 0.0);
        let u2 = unit_day(0.0, 0.0, 0.0);
        let station = station_combined(&u1, &u2, 6000.0);

        assert_eq!(station.specific_coal, 0.0);
        assert_eq!(station.plf_percent, 0.0);
        assert_eq!(station.stn_net_export_mu, 0.0);
    }
}
