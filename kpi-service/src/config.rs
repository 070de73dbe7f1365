use serde::Deserialize;
use std::fs;

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub uri: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    pub bind_addr: String,
}

/// Plant parameters the formulas and the persister depend on. Carried as
/// an explicit value (not a global) so several plant configurations can
/// coexist in one process.
#[derive(Debug, Clone, Deserialize)]
pub struct PlantConfig {
    /// Rated capacity of one unit over one day, in MWh (PLF denominator).
    #[serde(default = "default_rated_capacity")]
    pub rated_unit_capacity_mwh: f64,
    /// KPI writes are skipped when the stored value is within this band.
    #[serde(default = "default_persist_epsilon")]
    pub persist_epsilon: f64,
    /// First month of the reporting year (April in the source plant).
    #[serde(default = "default_fiscal_year_start_month")]
    pub fiscal_year_start_month: u8,
}

impl PlantConfig {
    /// Two units share the station bus.
    pub fn station_capacity_mwh(&self) -> f64 {
        2.0 * self.rated_unit_capacity_mwh
    }
}

impl Default for PlantConfig {
    fn default() -> Self {
        Self {
            rated_unit_capacity_mwh: default_rated_capacity(),
            persist_epsilon: default_persist_epsilon(),
            fiscal_year_start_month: default_fiscal_year_start_month(),
        }
    }
}

fn default_rated_capacity() -> f64 {
    3000.0
}

fn default_persist_epsilon() -> f64 {
    1e-4
}

fn default_fiscal_year_start_month() -> u8 {
    4
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub plant: PlantConfig,
    pub metrics: Option<MetricsConfig>,
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        use std::env;

        let path = env::var("KPI_ENGINE_CONFIG").unwrap_or_else(|_| "kpi-config.toml".to_string());
        let contents = fs::read_to_string(&path)?;
        let cfg: AppConfig = toml::from_str(&contents)?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plant_defaults_fill_missing_sections() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [database]
            uri = "postgres://localhost/plant"
            max_connections = 4
            "#,
        )
        .unwrap();

        assert_eq!(cfg.plant.rated_unit_capacity_mwh, 3000.0);
        assert_eq!(cfg.plant.station_capacity_mwh(), 6000.0);
        assert_eq!(cfg.plant.fiscal_year_start_month, 4);
        assert!(cfg.metrics.is_none());
    }

    #[test]
    fn plant_section_overrides_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [database]
            uri = "postgres://localhost/plant"
            max_connections = 4

            [plant]
            rated_unit_capacity_mwh = 2500.0
            fiscal_year_start_month = 1

            [metrics]
            bind_addr = "127.0.0.1:9102"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.plant.rated_unit_capacity_mwh, 2500.0);
        assert_eq!(cfg.plant.fiscal_year_start_month, 1);
        assert_eq!(cfg.metrics.unwrap().bind_addr, "127.0.0.1:9102");
    }
}
