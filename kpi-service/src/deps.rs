//! Totalizer-to-KPI dependency edges.
//!
//! The selective persister only rewrites KPIs reachable from a changed
//! totalizer, so this table must cover every KPI a totalizer's diff can
//! influence through the formula layer. The perturbation test below
//! asserts that against the formulas themselves.

use std::collections::{BTreeSet, HashMap};

use plant_client::domain::Scope;

use crate::kpiset::KpiKey;

#[derive(Debug, Clone)]
pub struct DependencyMap {
    map: HashMap<i32, BTreeSet<KpiKey>>,
}

fn keys(entries: &[(Scope, &str)]) -> BTreeSet<KpiKey> {
    entries
        .iter()
        .map(|(scope, name)| KpiKey::new(*scope, *name))
        .collect()
}

fn merged(sets: &[BTreeSet<KpiKey>]) -> BTreeSet<KpiKey> {
    sets.iter().flatten().cloned().collect()
}

impl DependencyMap {
    pub fn new(map: HashMap<i32, BTreeSet<KpiKey>>) -> Self {
        Self { map }
    }

    /// Edges for the standard catalog.
    pub fn standard() -> Self {
        use Scope::*;

        let coal = |unit: Scope| {
            keys(&[
                (unit, "coal_consumption"),
                (unit, "specific_coal"),
                (Station, "coal_consumption"),
                (Station, "specific_coal"),
            ])
        };
        let oil = |unit: Scope| {
            keys(&[
                (unit, "oil_consumption"),
                (unit, "specific_oil"),
                (Station, "oil_consumption"),
                (Station, "specific_oil"),
            ])
        };
        let dm = |unit: Scope| {
            keys(&[
                (unit, "dm_water"),
                (unit, "specific_dm_percent"),
                (Station, "dm_water"),
                (Station, "specific_dm_percent"),
            ])
        };
        let steam = |unit: Scope| {
            keys(&[
                (unit, "steam_generation"),
                (unit, "specific_steam"),
                (unit, "specific_dm_percent"),
                (Station, "steam_generation"),
                (Station, "specific_steam"),
                (Station, "specific_dm_percent"),
            ])
        };
        let raw_water = keys(&[
            (Station, "total_raw_water_used_m3"),
            (Station, "avg_raw_water_m3_per_hr"),
            (Station, "sp_raw_water_l_per_kwh"),
        ]);

        // A generation meter moves everything divided by its unit's
        // generation, plus the station equivalents and the PLF family.
        let generation = |unit: Scope, gen_name: &str, aux_pct: &str, plf: &str| {
            keys(&[
                (unit, "generation"),
                (unit, "plf_percent"),
                (unit, "aux_power_percent"),
                (unit, "specific_coal"),
                (unit, "specific_oil"),
                (unit, "specific_steam"),
                (Station, "generation"),
                (Station, "plf_percent"),
                (Station, "aux_power_percent"),
                (Station, "specific_coal"),
                (Station, "specific_oil"),
                (Station, "specific_steam"),
                (Station, "stn_net_export_mu"),
                (Station, "sp_raw_water_l_per_kwh"),
                (EnergyMeter, gen_name),
                (EnergyMeter, aux_pct),
                (EnergyMeter, plf),
                (EnergyMeter, "station_plf_percent"),
            ])
        };

        // Aux consumption on the unit/station record side.
        let aux_unit = |unit: Scope| {
            keys(&[
                (unit, "aux_power"),
                (unit, "aux_power_percent"),
                (Station, "aux_power"),
                (Station, "aux_power_percent"),
                (Station, "stn_net_export_mu"),
            ])
        };
        let aux_both = merged(&[aux_unit(Unit1), aux_unit(Unit2)]);

        // Energy-meter-scope intermediates per side.
        let em_unit1 = keys(&[
            (EnergyMeter, "unit1_unit_aux_mwh"),
            (EnergyMeter, "unit1_aux_consumption_mwh"),
            (EnergyMeter, "unit1_aux_percent"),
        ]);
        let em_unit2 = keys(&[
            (EnergyMeter, "unit2_unit_aux_mwh"),
            (EnergyMeter, "unit2_aux_consumption_mwh"),
            (EnergyMeter, "unit2_aux_percent"),
        ]);
        // Meters feeding the shared station aux total move both units'
        // halves at once.
        let em_station = keys(&[
            (EnergyMeter, "total_station_aux_mwh"),
            (EnergyMeter, "unit1_aux_consumption_mwh"),
            (EnergyMeter, "unit1_aux_percent"),
            (EnergyMeter, "unit2_aux_consumption_mwh"),
            (EnergyMeter, "unit2_aux_percent"),
        ]);
        let em_tie = keys(&[(EnergyMeter, "total_station_tie_mwh")]);

        let mut map: HashMap<i32, BTreeSet<KpiKey>> = HashMap::new();

        // Unit-1 process meters (feed_water has no dependents).
        for id in 1..=5 {
            map.insert(id, coal(Unit1));
        }
        map.insert(6, oil(Unit1));
        map.insert(7, dm(Unit1));
        map.insert(8, dm(Unit1));
        map.insert(9, steam(Unit1));

        // Unit-2 process meters.
        for id in 11..=15 {
            map.insert(id, coal(Unit2));
        }
        map.insert(16, oil(Unit2));
        map.insert(17, dm(Unit2));
        map.insert(18, dm(Unit2));
        map.insert(19, steam(Unit2));

        // Station raw water.
        map.insert(21, raw_water);

        // Generation meters.
        map.insert(
            22,
            merged(&[
                generation(Unit1, "unit1_generation", "unit1_aux_percent", "unit1_plf_percent"),
                aux_unit(Unit1),
            ]),
        );
        map.insert(
            23,
            merged(&[
                generation(Unit2, "unit2_generation", "unit2_aux_percent", "unit2_plf_percent"),
                aux_unit(Unit2),
            ]),
        );

        // Incomers feeding a single unit's aux.
        map.insert(24, merged(&[aux_unit(Unit1), em_unit1.clone()]));
        map.insert(25, merged(&[aux_unit(Unit1), em_unit1.clone()]));
        map.insert(26, merged(&[aux_unit(Unit2), em_unit2.clone()]));
        map.insert(27, merged(&[aux_unit(Unit2), em_unit2.clone()]));

        // Station incomers (rlsr01..04).
        for id in 28..=31 {
            map.insert(id, merged(&[aux_both.clone(), em_station.clone()]));
        }

        // Tie lines: shared aux plus the tie total; two of them also sit in
        // a unit's own aux term.
        map.insert(
            32,
            merged(&[aux_both.clone(), em_station.clone(), em_tie.clone(), em_unit1.clone()]),
        );
        map.insert(33, merged(&[aux_both.clone(), em_station.clone(), em_tie.clone()]));
        map.insert(
            34,
            merged(&[aux_both.clone(), em_station.clone(), em_tie.clone(), em_unit2.clone()]),
        );
        map.insert(35, merged(&[aux_both.clone(), em_station.clone(), em_tie]));

        // Station/unit transformers, present in both a unit term and the
        // (double-counted) station total.
        map.insert(36, merged(&[aux_both.clone(), em_station.clone(), em_unit1.clone()]));
        map.insert(37, merged(&[aux_both.clone(), em_station.clone(), em_unit1]));
        map.insert(38, merged(&[aux_both, em_station, em_unit2]));

        Self::new(map)
    }

    pub fn get(&self, totalizer_id: i32) -> Option<&BTreeSet<KpiKey>> {
        self.map.get(&totalizer_id)
    }

    /// Union of the dependents of every changed totalizer.
    pub fn affected(&self, changed: &[i32]) -> BTreeSet<KpiKey> {
        changed
            .iter()
            .filter_map(|id| self.map.get(id))
            .flatten()
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TotalizerCatalog;
    use crate::config::PlantConfig;
    use crate::engine::auto_kpis_from_diffs;
    use crate::engine::diff::DiffsByScope;

    #[test]
    fn feeder_a_affects_only_the_coal_family() {
        let deps = DependencyMap::standard();
        let affected = deps.affected(&[1]);

        assert!(affected.contains(&KpiKey::new(Scope::Unit1, "coal_consumption")));
        assert!(affected.contains(&KpiKey::new(Scope::Station, "specific_coal")));
        assert!(!affected.contains(&KpiKey::new(Scope::Unit2, "coal_consumption")));
        assert!(!affected.contains(&KpiKey::new(Scope::Unit1, "generation")));
        assert_eq!(affected.len(), 4);
    }

    #[test]
    fn feed_water_has_no_dependents() {
        let deps = DependencyMap::standard();
        assert!(deps.get(10).is_none());
        assert!(deps.get(20).is_none());
        assert!(deps.affected(&[10, 20]).is_empty());
    }

    #[test]
    fn affected_is_a_union_over_changed_totalizers() {
        let deps = DependencyMap::standard();
        let affected = deps.affected(&[1, 21]);

        assert!(affected.contains(&KpiKey::new(Scope::Unit1, "coal_consumption")));
        assert!(affected.contains(&KpiKey::new(Scope::Station, "total_raw_water_used_m3")));
    }

    /// Completeness: perturbing any totalizer's diff must only move KPIs
    /// the dependency table lists for it. A miss here means the selective
    /// persister would leave a stale KPI behind.
    #[test]
    fn table_covers_every_formula_sensitivity() {
        let catalog = TotalizerCatalog::standard();
        let deps = DependencyMap::standard();
        let plant = PlantConfig::default();

        let mut base = DiffsByScope::zeroed(&catalog);
        for def in catalog.iter() {
            base.set(def.scope, def.name, 100.0 + f64::from(def.id));
        }
        let base_kpis = auto_kpis_from_diffs(&base, &plant);

        for def in catalog.iter() {
            let mut perturbed = base.clone();
            perturbed.set(def.scope, def.name, 100.0 + f64::from(def.id) + 10.0);
            let new_kpis = auto_kpis_from_diffs(&perturbed, &plant);

            let affected = deps.affected(&[def.id]);
            for (key, new_value) in new_kpis.iter() {
                let old_value = base_kpis.get(key.scope, &key.name).unwrap_or(f64::NAN);
                if (new_value - old_value).abs() > 1e-9 {
                    assert!(
                        affected.contains(key),
                        "totalizer {} ({}) moved {:?} but the table does not list it",
                        def.id,
                        def.name,
                        key
                    );
                }
            }
        }
    }
}
