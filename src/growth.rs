//! Year/population growth model.

use crate::constants::{GrowthParameters, HistoricalCurve};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GrowthModel {
    pub params: GrowthParameters,
    pub curve: HistoricalCurve,
}

impl GrowthModel {
    pub fn new(params: GrowthParameters, curve: HistoricalCurve) -> Self {
        Self { params, curve }
    }

    /// Population predicted for `year` by the exponential curve seeded at the start year.
    ///
    /// Extreme years saturate at `i64::MAX` (or bottom out at 0).
    pub fn predicted_population_for_year(&self, year: i64) -> i64 {
        let elapsed = year as f64 - self.params.start_year as f64;
        (self.curve.seed_population * (self.curve.growth_rate * elapsed).exp()).round() as i64
    }

    /// Calendar year at which the world reaches `target` people.
    ///
    /// Targets at or below the reference population are historical queries and are
    /// clamped into `[start_year, current_year]`; larger targets are projected forward
    /// with compound growth.
    pub fn predicted_year_for_population(&self, target: f64) -> i64 {
        let GrowthParameters {
            current_year,
            base_growth_rate,
            start_year,
            initial_population,
        } = self.params;
        let reference = initial_population as f64;

        if target <= reference {
            if target <= 0.0 {
                return start_year;
            }
            let ratio = target / reference;
            let years_ago = ratio.ln() / (1.0 - base_growth_rate).ln();
            let estimated = (current_year as f64 + years_ago).round() as i64;
            estimated.clamp(start_year, current_year)
        } else {
            let years_to_reach = (target / reference).ln() / (1.0 + base_growth_rate).ln();
            (current_year as f64 + years_to_reach).round() as i64
        }
    }
}
