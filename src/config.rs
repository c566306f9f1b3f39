//! Configuration for the explorer: model constants, slider bounds, web and logging.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::constants::{
    Continent, ContinentProfile, ContinentTable, GrowthParameters, HistoricalCurve, MAX_CAPACITY,
    REFERENCE_POPULATION, SLIDER_MINIMUM,
};
use crate::controller::{Controller, SliderBounds};
use crate::growth::GrowthModel;

/// Allowed drift of the continent shares from 1.0 before a warning is logged.
const SHARE_SUM_TOLERANCE: f64 = 0.05;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("base growth rate must lie strictly between 0 and 1, got {0}")]
    GrowthRate(f64),
    #[error("start year {start} must precede current year {current}")]
    YearRange { start: i64, current: i64 },
    #[error("reference population must be positive, got {0}")]
    ReferencePopulation(i64),
    #[error("no profile configured for continent '{0}'")]
    MissingContinent(Continent),
    #[error("continent '{continent}': {field} must be positive, got {value}")]
    NonPositive {
        continent: Continent,
        field: &'static str,
        value: f64,
    },
    #[error("continent '{0}': share of world cannot exceed 1, got {1}")]
    ShareAboveOne(Continent, f64),
    #[error("slider minimum {minimum} lies above maximum {maximum}")]
    SliderRange { minimum: i64, maximum: i64 },
    #[error("initial slider value {initial} lies outside [{minimum}, {maximum}]")]
    SliderInitial {
        initial: i64,
        minimum: i64,
        maximum: i64,
    },
}

/// Main configuration, every section optional in YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub growth: GrowthParameters,
    #[serde(default)]
    pub historical: HistoricalCurve,
    #[serde(default = "default_continents")]
    pub continents: BTreeMap<Continent, ContinentProfile>,
    #[serde(default)]
    pub slider: SliderConfig,
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    pub minimum: i64,
    /// Also shown as the maximum-capacity readout.
    pub maximum: i64,
    pub initial: i64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            minimum: SLIDER_MINIMUM,
            maximum: MAX_CAPACITY,
            initial: REFERENCE_POPULATION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_continents() -> BTreeMap<Continent, ContinentProfile> {
    Continent::ALL
        .into_iter()
        .map(|continent| (continent, ContinentProfile::standard(continent)))
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            growth: GrowthParameters::default(),
            historical: HistoricalCurve::default(),
            continents: default_continents(),
            slider: SliderConfig::default(),
            web: WebConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load and validate configuration from a YAML file.
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_str(&contents)
    }

    /// Parse and validate configuration from YAML text.
    pub fn from_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file.
    pub fn to_yaml<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let growth = &self.growth;
        if !(growth.base_growth_rate > 0.0 && growth.base_growth_rate < 1.0) {
            return Err(ConfigError::GrowthRate(growth.base_growth_rate));
        }
        if growth.start_year >= growth.current_year {
            return Err(ConfigError::YearRange {
                start: growth.start_year,
                current: growth.current_year,
            });
        }
        if growth.initial_population <= 0 {
            return Err(ConfigError::ReferencePopulation(growth.initial_population));
        }

        let table = self.continent_table()?;
        for (continent, profile) in table.iter() {
            let fields = [
                ("share_of_world", profile.share_of_world),
                ("land_area_km2", profile.land_area_km2),
                (
                    "base_water_liters_per_person_per_day",
                    profile.base_water_liters_per_person_per_day,
                ),
                (
                    "base_food_kg_per_person_per_day",
                    profile.base_food_kg_per_person_per_day,
                ),
            ];
            for (field, value) in fields {
                if !(value > 0.0) {
                    return Err(ConfigError::NonPositive {
                        continent,
                        field,
                        value,
                    });
                }
            }
            if profile.share_of_world > 1.0 {
                return Err(ConfigError::ShareAboveOne(continent, profile.share_of_world));
            }
        }

        let total_share = table.total_share();
        if (total_share - 1.0).abs() > SHARE_SUM_TOLERANCE {
            warn!(total_share, "continent shares drift from 1.0");
        }

        if self.slider.minimum > self.slider.maximum {
            return Err(ConfigError::SliderRange {
                minimum: self.slider.minimum,
                maximum: self.slider.maximum,
            });
        }
        if !(self.slider.minimum..=self.slider.maximum).contains(&self.slider.initial) {
            return Err(ConfigError::SliderInitial {
                initial: self.slider.initial,
                minimum: self.slider.minimum,
                maximum: self.slider.maximum,
            });
        }
        Ok(())
    }

    pub fn continent_table(&self) -> Result<ContinentTable, ConfigError> {
        for continent in Continent::ALL {
            if !self.continents.contains_key(&continent) {
                return Err(ConfigError::MissingContinent(continent));
            }
        }
        Ok(ContinentTable::from_fn(|continent| {
            self.continents
                .get(&continent)
                .copied()
                .unwrap_or_else(|| ContinentProfile::standard(continent))
        }))
    }

    pub fn growth_model(&self) -> GrowthModel {
        GrowthModel::new(self.growth, self.historical)
    }

    pub fn slider_bounds(&self) -> SliderBounds {
        SliderBounds {
            minimum: self.slider.minimum,
            max_capacity: self.slider.maximum,
        }
    }

    pub fn build_controller(&self) -> Result<Controller, ConfigError> {
        Ok(Controller::new(
            self.growth_model(),
            self.continent_table()?,
            self.slider_bounds(),
        ))
    }
}
