//! Per-continent population, living space and resource availability.

use serde::Serialize;

use crate::constants::{Continent, ContinentProfile, ContinentTable};

/// Floor applied to the resource reduction factor.
pub const MIN_REDUCTION_FACTOR: f64 = 0.1;

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// People living on the continent when the world holds `total_population`.
pub fn continent_population(total_population: i64, profile: &ContinentProfile) -> i64 {
    (total_population as f64 * profile.share_of_world).round() as i64
}

/// Continent population at the reference world population.
pub fn base_population(reference_population: i64, profile: &ContinentProfile) -> i64 {
    continent_population(reference_population, profile)
}

/// Land per person, in square meters, to two decimals.
///
/// Callers must not pass a zero population.
pub fn space_per_person(profile: &ContinentProfile, continent_population: i64) -> f64 {
    round2(profile.land_area_km2 * 1e6 / continent_population as f64 / 1000.0)
}

/// Scales a per-person daily allowance by population pressure.
///
/// Shrinks proportionally as the continent outgrows its baseline but never below
/// 10% of `base_value`. Fewer people than the baseline means more per person.
pub fn adjusted_resource(base_value: f64, current_population: i64, base_population: i64) -> f64 {
    let reduction = (base_population as f64 / current_population as f64).max(MIN_REDUCTION_FACTOR);
    round2(base_value * reduction)
}

/// Everything the details panel shows for one continent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContinentReport {
    pub continent: Continent,
    pub population: i64,
    pub base_population: i64,
    /// `None` when nobody lives on the continent.
    pub space_per_person_m2: Option<f64>,
    pub water_liters_per_day: Option<f64>,
    pub food_kg_per_day: Option<f64>,
}

impl ContinentReport {
    pub fn compute(
        continent: Continent,
        profile: &ContinentProfile,
        total_population: i64,
        reference_population: i64,
    ) -> Self {
        let population = continent_population(total_population, profile);
        let base = base_population(reference_population, profile);
        let inhabited = population > 0;
        Self {
            continent,
            population,
            base_population: base,
            space_per_person_m2: inhabited.then(|| space_per_person(profile, population)),
            water_liters_per_day: inhabited.then(|| {
                adjusted_resource(profile.base_water_liters_per_person_per_day, population, base)
            }),
            food_kg_per_day: inhabited.then(|| {
                adjusted_resource(profile.base_food_kg_per_person_per_day, population, base)
            }),
        }
    }
}

/// Reports for every continent at one world population.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldReport {
    pub total_population: i64,
    pub continents: Vec<ContinentReport>,
}

impl WorldReport {
    pub fn compute(table: &ContinentTable, total_population: i64, reference_population: i64) -> Self {
        let continents = table
            .iter()
            .map(|(continent, profile)| {
                ContinentReport::compute(continent, profile, total_population, reference_population)
            })
            .collect();
        Self {
            total_population,
            continents,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::REFERENCE_POPULATION;

    fn asia() -> ContinentProfile {
        ContinentProfile::standard(Continent::Asia)
    }

    #[test]
    fn reference_population_reproduces_base_figures() {
        for continent in Continent::ALL {
            let profile = ContinentProfile::standard(continent);
            assert_eq!(
                continent_population(REFERENCE_POPULATION, &profile),
                base_population(REFERENCE_POPULATION, &profile)
            );
        }
        assert_eq!(base_population(REFERENCE_POPULATION, &asia()), 4_800_000_000);
    }

    #[test]
    fn doubled_population_halves_asian_resources() {
        let profile = asia();
        let population = continent_population(16_000_000_000, &profile);
        let base = base_population(REFERENCE_POPULATION, &profile);
        assert_eq!(population, 9_600_000_000);
        assert_eq!(adjusted_resource(3.3, population, base), 1.65);
        assert_eq!(adjusted_resource(1.6, population, base), 0.8);
        assert_eq!(space_per_person(&profile, population), 4.64);
    }

    #[test]
    fn reduction_factor_is_floored() {
        let base_value = 4.9;
        for current in [1_000_000_000_i64, 10_000_000_000, 1_000_000_000_000, i64::MAX / 4] {
            let value = adjusted_resource(base_value, current, 100_000_000);
            assert!(value >= round2(base_value * MIN_REDUCTION_FACTOR), "{current} -> {value}");
        }
        assert_eq!(adjusted_resource(3.0, 1_000_000_000, 1), 0.3);
    }

    #[test]
    fn fewer_people_means_more_per_person() {
        assert_eq!(adjusted_resource(2.5, 500, 1000), 5.0);
    }

    #[test]
    fn empty_continent_has_no_per_person_figures() {
        let profile = ContinentProfile::standard(Continent::Australia);
        let report = ContinentReport::compute(Continent::Australia, &profile, 10, REFERENCE_POPULATION);
        assert_eq!(report.population, 0);
        assert_eq!(report.space_per_person_m2, None);
        assert_eq!(report.water_liters_per_day, None);
        assert_eq!(report.food_kg_per_day, None);
    }

    #[test]
    fn world_report_covers_every_continent() {
        let table = ContinentTable::default();
        let report = WorldReport::compute(&table, REFERENCE_POPULATION, REFERENCE_POPULATION);
        assert_eq!(report.continents.len(), 6);
        assert_eq!(report.continents[3].continent, Continent::NorthAmerica);
        for entry in &report.continents {
            assert_eq!(entry.population, entry.base_population);
        }
    }
}
