use std::collections::HashMap;

use plant_client::domain::Scope;

/// Immutable reference data for one cumulative meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TotalizerDef {
    pub id: i32,
    pub name: &'static str,
    pub scope: Scope,
}

/// The plant's totalizer master table, passed into the engine as an
/// explicit configuration value so multiple plants can coexist in tests.
#[derive(Debug, Clone)]
pub struct TotalizerCatalog {
    defs: Vec<TotalizerDef>,
    by_id: HashMap<i32, usize>,
}

impl TotalizerCatalog {
    pub fn new(defs: Vec<TotalizerDef>) -> Self {
        let by_id = defs.iter().enumerate().map(|(i, d)| (d.id, i)).collect();
        Self { defs, by_id }
    }

    /// The source plant's meter set: ten process totalizers per unit, one
    /// station raw-water totalizer and seventeen energy meters.
    pub fn standard() -> Self {
        use Scope::*;

        Self::new(vec![
            TotalizerDef { id: 1, name: "feeder_a", scope: Unit1 },
            TotalizerDef { id: 2, name: "feeder_b", scope: Unit1 },
            TotalizerDef { id: 3, name: "feeder_c", scope: Unit1 },
            TotalizerDef { id: 4, name: "feeder_d", scope: Unit1 },
            TotalizerDef { id: 5, name: "feeder_e", scope: Unit1 },
            TotalizerDef { id: 6, name: "ldo_flow", scope: Unit1 },
            TotalizerDef { id: 7, name: "dm7", scope: Unit1 },
            TotalizerDef { id: 8, name: "dm11", scope: Unit1 },
            TotalizerDef { id: 9, name: "main_steam", scope: Unit1 },
            TotalizerDef { id: 10, name: "feed_water", scope: Unit1 },
            TotalizerDef { id: 11, name: "feeder_a", scope: Unit2 },
            TotalizerDef { id: 12, name: "feeder_b", scope: Unit2 },
            TotalizerDef { id: 13, name: "feeder_c", scope: Unit2 },
            TotalizerDef { id: 14, name: "feeder_d", scope: Unit2 },
            TotalizerDef { id: 15, name: "feeder_e", scope: Unit2 },
            TotalizerDef { id: 16, name: "ldo_flow", scope: Unit2 },
            TotalizerDef { id: 17, name: "dm7", scope: Unit2 },
            TotalizerDef { id: 18, name: "dm11", scope: Unit2 },
            TotalizerDef { id: 19, name: "main_steam", scope: Unit2 },
            TotalizerDef { id: 20, name: "feed_water", scope: Unit2 },
            TotalizerDef { id: 21, name: "raw_water", scope: Station },
            TotalizerDef { id: 22, name: "unit1_gen", scope: EnergyMeter },
            TotalizerDef { id: 23, name: "unit2_gen", scope: EnergyMeter },
            TotalizerDef { id: 24, name: "1lsr01_ic1", scope: EnergyMeter },
            TotalizerDef { id: 25, name: "1lsr02_ic1", scope: EnergyMeter },
            TotalizerDef { id: 26, name: "2lsr01_ic1", scope: EnergyMeter },
            TotalizerDef { id: 27, name: "2lsr02_ic1", scope: EnergyMeter },
            TotalizerDef { id: 28, name: "rlsr01", scope: EnergyMeter },
            TotalizerDef { id: 29, name: "rlsr02", scope: EnergyMeter },
            TotalizerDef { id: 30, name: "rlsr03", scope: EnergyMeter },
            TotalizerDef { id: 31, name: "rlsr04", scope: EnergyMeter },
            TotalizerDef { id: 32, name: "1lsr01_ic2_tie", scope: EnergyMeter },
            TotalizerDef { id: 33, name: "1lsr02_ic2_tie", scope: EnergyMeter },
            TotalizerDef { id: 34, name: "2lsr01_ic2_tie", scope: EnergyMeter },
            TotalizerDef { id: 35, name: "2lsr02_ic2_tie", scope: EnergyMeter },
            TotalizerDef { id: 36, name: "SST_10", scope: EnergyMeter },
            TotalizerDef { id: 37, name: "UST_15", scope: EnergyMeter },
            TotalizerDef { id: 38, name: "UST_25", scope: EnergyMeter },
        ])
    }

    pub fn get(&self, id: i32) -> Option<&TotalizerDef> {
        self.by_id.get(&id).map(|i| &self.defs[*i])
    }

    pub fn contains(&self, id: i32) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TotalizerDef> {
        self.defs.iter()
    }

    pub fn in_scope(&self, scope: Scope) -> impl Iterator<Item = &TotalizerDef> {
        self.defs.iter().filter(move |d| d.scope == scope)
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
    fn standard_catalog_has_unique_ids() {
        let catalog = TotalizerCatalog::standard();
        assert_eq!(catalog.len(), 38);
        assert_eq!(catalog.iter().count(), catalog.len());
    }

    #[test]
    fn lookups_resolve_name_and_scope() {
        let catalog = TotalizerCatalog::standard();
        let def = catalog.get(21).unwrap();
        assert_eq!(def.name, "raw_water");
        assert_eq!(def.scope, Scope::Station);
        assert!(catalog.get(99).is_none());
    }

    #[test]
    fn scope_filter_matches_master_layout() {
        let catalog = TotalizerCatalog::standard();
        assert_eq!(catalog.in_scope(Scope::Unit1).count(), 10);
        assert_eq!(catalog.in_scope(Scope::Unit2).count(), 10);
        assert_eq!(catalog.in_scope(Scope::Station).count(), 1);
        assert_eq!(catalog.in_scope(Scope::EnergyMeter).count(), 17);
    }
}
