//! Interaction controller: turns slider and hover events into boundary updates.

use serde::Deserialize;
use tracing::debug;

use crate::{
    boundary::{Boundary, DetailsContent, ElementId, Trigger},
    constants::{Continent, ContinentTable, MAX_CAPACITY, SLIDER_MINIMUM},
    format::{format_optional_fixed2, format_population, format_year},
    growth::GrowthModel,
    resources::ContinentReport,
};

/// Region the pointer is currently over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoveredRegion {
    Continent(Continent),
    Unknown(String),
}

impl HoveredRegion {
    pub fn parse(key: &str) -> Self {
        match Continent::from_region_id(key) {
            Some(continent) => HoveredRegion::Continent(continent),
            None => HoveredRegion::Unknown(key.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    /// Raw slider value; may be negative.
    pub slider_population: i64,
    pub hovered: Option<HoveredRegion>,
}

/// Event delivered by the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UiEvent {
    ControlChanged { value: i64 },
    HoverEnter { region: String },
    HoverExit { region: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderBounds {
    pub minimum: i64,
    pub max_capacity: i64,
}

impl Default for SliderBounds {
    fn default() -> Self {
        Self {
            minimum: SLIDER_MINIMUM,
            max_capacity: MAX_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Controller {
    growth: GrowthModel,
    continents: ContinentTable,
    bounds: SliderBounds,
    state: SelectionState,
}

impl Controller {
    pub fn new(growth: GrowthModel, continents: ContinentTable, bounds: SliderBounds) -> Self {
        Self {
            growth,
            continents,
            bounds,
            state: SelectionState::default(),
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn growth(&self) -> &GrowthModel {
        &self.growth
    }

    pub fn continents(&self) -> &ContinentTable {
        &self.continents
    }

    /// Registers every trigger, refreshes the readouts once, then applies the slider minimum.
    pub fn initialize(&mut self, boundary: &mut impl Boundary) {
        for trigger in Trigger::all() {
            boundary.register(trigger);
        }
        let value = boundary.read_control_value();
        self.on_control_change(value, boundary);
        boundary.set_control_minimum(self.bounds.minimum);
    }

    pub fn handle(&mut self, event: &UiEvent, boundary: &mut impl Boundary) {
        match event {
            UiEvent::ControlChanged { value } => self.on_control_change(*value, boundary),
            UiEvent::HoverEnter { region } => self.on_region_hover_enter(region, boundary),
            UiEvent::HoverExit { region } => self.on_region_hover_exit(region, boundary),
        }
    }

    pub fn on_control_change(&mut self, value: i64, boundary: &mut impl Boundary) {
        self.state.slider_population = value;

        let (population, year) = if value < 0 {
            (0, self.growth.params.start_year)
        } else {
            (value, self.growth.predicted_year_for_population(value as f64))
        };
        debug!(value, year, "slider moved");

        boundary.display_text(ElementId::Population, &format_population(population));
        boundary.display_text(ElementId::PredictedYear, &format_year(year));
        boundary.display_text(
            ElementId::MaxPopulation,
            &format_population(self.bounds.max_capacity),
        );
    }

    pub fn on_region_hover_enter(&mut self, region: &str, boundary: &mut impl Boundary) {
        let value = boundary.read_control_value();
        let hovered = HoveredRegion::parse(region);
        self.state.slider_population = value;
        self.state.hovered = Some(hovered.clone());

        let content = if value < 0 {
            DetailsContent::Unavailable
        } else {
            match hovered {
                HoveredRegion::Continent(continent) => self.continent_details(continent, value),
                HoveredRegion::Unknown(key) => {
                    debug!(region = %key, "hover over unknown region");
                    DetailsContent::Empty
                }
            }
        };

        boundary.render_details_panel(&content);
        boundary.set_panel_visible(true);
    }

    pub fn on_region_hover_exit(&mut self, region: &str, boundary: &mut impl Boundary) {
        debug!(region, "hover exit");
        self.state.hovered = None;
        boundary.set_panel_visible(false);
    }

    fn continent_details(&self, continent: Continent, total_population: i64) -> DetailsContent {
        let report = ContinentReport::compute(
            continent,
            self.continents.profile(continent),
            total_population,
            self.growth.params.initial_population,
        );
        debug!(%continent, population = report.population, "details computed");
        DetailsContent::Continent {
            name: continent.display_name().to_string(),
            population: format_population(report.population),
            space_per_person: format_optional_fixed2(report.space_per_person_m2),
            water_per_day: format_optional_fixed2(report.water_liters_per_day),
            food_per_day: format_optional_fixed2(report.food_kg_per_day),
        }
    }
}
