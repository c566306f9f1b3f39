//! Constants table: growth parameters and the per-continent profiles.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reference world population the model is anchored on.
pub const REFERENCE_POPULATION: i64 = 8_000_000_000;

/// Earth's assumed maximum carrying capacity, also the slider maximum.
pub const MAX_CAPACITY: i64 = 20_000_000_000;

/// Lower bound applied to the population slider after initialization.
pub const SLIDER_MINIMUM: i64 = -1000;

pub const CURRENT_YEAR: i64 = 2024;
pub const START_YEAR: i64 = -300_000;
pub const BASE_GROWTH_RATE: f64 = 0.011;

/// Parameters of the year/population inversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthParameters {
    pub current_year: i64,
    /// Growth (or decay, going backwards) rate per year; strictly inside (0, 1).
    pub base_growth_rate: f64,
    /// Approximate year modern humans first appeared.
    pub start_year: i64,
    /// Population at `current_year`.
    pub initial_population: i64,
}

impl Default for GrowthParameters {
    fn default() -> Self {
        Self {
            current_year: CURRENT_YEAR,
            base_growth_rate: BASE_GROWTH_RATE,
            start_year: START_YEAR,
            initial_population: REFERENCE_POPULATION,
        }
    }
}

/// Exponential curve seeded at `start_year`, used for forward projections.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoricalCurve {
    pub seed_population: f64,
    pub growth_rate: f64,
}

impl Default for HistoricalCurve {
    fn default() -> Self {
        Self {
            seed_population: 1000.0,
            growth_rate: 0.00005,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Continent {
    Asia,
    Africa,
    Europe,
    NorthAmerica,
    SouthAmerica,
    Australia,
}

impl Continent {
    pub const ALL: [Continent; 6] = [
        Continent::Asia,
        Continent::Africa,
        Continent::Europe,
        Continent::NorthAmerica,
        Continent::SouthAmerica,
        Continent::Australia,
    ];

    /// Identifier of the hover zone on the map.
    pub fn region_id(self) -> &'static str {
        match self {
            Continent::Asia => "asia",
            Continent::Africa => "africa",
            Continent::Europe => "europe",
            Continent::NorthAmerica => "north-america",
            Continent::SouthAmerica => "south-america",
            Continent::Australia => "australia",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Continent::Asia => "Asia",
            Continent::Africa => "Africa",
            Continent::Europe => "Europe",
            Continent::NorthAmerica => "North America",
            Continent::SouthAmerica => "South America",
            Continent::Australia => "Australia",
        }
    }

    pub fn from_region_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.region_id() == id)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Continent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.region_id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContinentProfile {
    /// Fraction of the world population living on the continent.
    pub share_of_world: f64,
    pub land_area_km2: f64,
    pub base_water_liters_per_person_per_day: f64,
    pub base_food_kg_per_person_per_day: f64,
}

impl ContinentProfile {
    pub const fn new(share: f64, land_km2: f64, water: f64, food: f64) -> Self {
        Self {
            share_of_world: share,
            land_area_km2: land_km2,
            base_water_liters_per_person_per_day: water,
            base_food_kg_per_person_per_day: food,
        }
    }

    /// Built-in figures for a continent.
    pub const fn standard(continent: Continent) -> Self {
        match continent {
            Continent::Asia => Self::new(0.6, 44_579_000.0, 3.3, 1.6),
            Continent::Africa => Self::new(0.17, 30_370_000.0, 2.5, 1.1),
            Continent::Europe => Self::new(0.1, 10_180_000.0, 4.1, 1.9),
            Continent::NorthAmerica => Self::new(0.08, 24_709_000.0, 4.9, 2.2),
            Continent::SouthAmerica => Self::new(0.05, 17_840_000.0, 3.6, 1.8),
            Continent::Australia => Self::new(0.01, 7_692_000.0, 3.0, 1.4),
        }
    }
}

/// Enum-keyed lookup of one profile per continent.
#[derive(Debug, Clone, PartialEq)]
pub struct ContinentTable {
    profiles: [ContinentProfile; 6],
}

impl ContinentTable {
    pub fn from_fn(mut f: impl FnMut(Continent) -> ContinentProfile) -> Self {
        Self {
            profiles: Continent::ALL.map(&mut f),
        }
    }

    pub fn profile(&self, continent: Continent) -> &ContinentProfile {
        &self.profiles[continent.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Continent, &ContinentProfile)> {
        Continent::ALL.into_iter().zip(self.profiles.iter())
    }

    pub fn total_share(&self) -> f64 {
        self.profiles.iter().map(|p| p.share_of_world).sum()
    }
}

impl Default for ContinentTable {
    fn default() -> Self {
        Self::from_fn(ContinentProfile::standard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shares_stay_close_to_one() {
        // The built-in table is deliberately rough: it sums to 1.01.
        let table = ContinentTable::default();
        assert!((table.total_share() - 1.01).abs() < 1e-9);
    }

    #[test]
    fn region_ids_resolve_back_to_continents() {
        for continent in Continent::ALL {
            assert_eq!(Continent::from_region_id(continent.region_id()), Some(continent));
        }
        assert_eq!(Continent::from_region_id("antarctica"), None);
        assert_eq!(Continent::from_region_id("northAmerica"), None);
    }

    #[test]
    fn table_lookup_is_keyed_by_continent() {
        let table = ContinentTable::default();
        assert_eq!(table.profile(Continent::Europe).land_area_km2, 10_180_000.0);
        assert_eq!(table.profile(Continent::Australia).share_of_world, 0.01);
        assert_eq!(table.iter().count(), 6);
    }

    #[test]
    fn growth_defaults() {
        let params = GrowthParameters::default();
        assert_eq!(params.current_year, 2024);
        assert_eq!(params.start_year, -300_000);
        assert!(params.base_growth_rate > 0.0 && params.base_growth_rate < 1.0);
    }
}
