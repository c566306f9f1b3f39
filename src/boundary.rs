//! Presentation boundary: the capability set the controller drives.

use serde::{Deserialize, Serialize};

use crate::constants::Continent;

/// Text readouts on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementId {
    #[serde(rename = "population-display")]
    Population,
    #[serde(rename = "max-population-display")]
    MaxPopulation,
    #[serde(rename = "max-year-display")]
    PredictedYear,
}

impl ElementId {
    pub fn as_str(self) -> &'static str {
        match self {
            ElementId::Population => "population-display",
            ElementId::MaxPopulation => "max-population-display",
            ElementId::PredictedYear => "max-year-display",
        }
    }
}

/// A UI trigger the controller wants to be notified about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "on", content = "region", rename_all = "snake_case")]
pub enum Trigger {
    ControlChange,
    HoverEnter(Continent),
    HoverExit(Continent),
}

impl Trigger {
    /// Control change plus enter/exit for every continent zone.
    pub fn all() -> Vec<Trigger> {
        let mut triggers = vec![Trigger::ControlChange];
        triggers.extend(Continent::ALL.into_iter().map(Trigger::HoverEnter));
        triggers.extend(Continent::ALL.into_iter().map(Trigger::HoverExit));
        triggers
    }
}

/// Contents of the hover details panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetailsContent {
    Continent {
        name: String,
        population: String,
        space_per_person: String,
        water_per_day: String,
        food_per_day: String,
    },
    /// Shown while the slider sits below zero.
    Unavailable,
    Empty,
}

impl DetailsContent {
    pub fn to_html(&self) -> String {
        match self {
            DetailsContent::Continent {
                name,
                population,
                space_per_person,
                water_per_day,
                food_per_day,
            } => format!(
                "<h3>Population Details</h3>\
                 <p>{name}: {population}</p>\
                 <p>Average Space per Person: {space_per_person} m²</p>\
                 <p>Average Water per Person per Day: {water_per_day} liters</p>\
                 <p>Average Food per Person per Day: {food_per_day} kg</p>"
            ),
            DetailsContent::Unavailable => "<h3>Population Details</h3>\
                 <p>Population data is not available for negative values.</p>"
                .to_string(),
            DetailsContent::Empty => String::new(),
        }
    }
}

pub trait Boundary {
    /// Current slider position.
    fn read_control_value(&self) -> i64;
    fn set_control_minimum(&mut self, value: i64);
    fn display_text(&mut self, element: ElementId, text: &str);
    fn render_details_panel(&mut self, content: &DetailsContent);
    fn set_panel_visible(&mut self, visible: bool);
    fn register(&mut self, trigger: Trigger);
}

/// One recorded boundary call, in the shape the browser applies it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Command {
    Register { trigger: Trigger },
    SetControlMinimum { value: i64 },
    DisplayText { element: ElementId, text: String },
    RenderDetails { html: String },
    SetPanelVisible { visible: bool },
}

/// Boundary that records every call as a [`Command`].
#[derive(Debug, Clone, Default)]
pub struct CommandBuffer {
    control_value: i64,
    commands: Vec<Command>,
}

impl CommandBuffer {
    pub fn new(control_value: i64) -> Self {
        Self {
            control_value,
            commands: Vec::new(),
        }
    }

    /// Position the slider reports on the next read.
    pub fn set_control_value(&mut self, value: i64) {
        self.control_value = value;
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn drain(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    /// Most recent text written to `element`, if any.
    pub fn last_text(&self, element: ElementId) -> Option<&str> {
        self.commands.iter().rev().find_map(|command| match command {
            Command::DisplayText { element: e, text } if *e == element => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn last_details_html(&self) -> Option<&str> {
        self.commands.iter().rev().find_map(|command| match command {
            Command::RenderDetails { html } => Some(html.as_str()),
            _ => None,
        })
    }

    pub fn panel_visible(&self) -> Option<bool> {
        self.commands.iter().rev().find_map(|command| match command {
            Command::SetPanelVisible { visible } => Some(*visible),
            _ => None,
        })
    }
}

impl Boundary for CommandBuffer {
    fn read_control_value(&self) -> i64 {
        self.control_value
    }

    fn set_control_minimum(&mut self, value: i64) {
        self.commands.push(Command::SetControlMinimum { value });
    }

    fn display_text(&mut self, element: ElementId, text: &str) {
        self.commands.push(Command::DisplayText {
            element,
            text: text.to_string(),
        });
    }

    fn render_details_panel(&mut self, content: &DetailsContent) {
        self.commands.push(Command::RenderDetails {
            html: content.to_html(),
        });
    }

    fn set_panel_visible(&mut self, visible: bool) {
        self.commands.push(Command::SetPanelVisible { visible });
    }

    fn register(&mut self, trigger: Trigger) {
        self.commands.push(Command::Register { trigger });
    }
}
