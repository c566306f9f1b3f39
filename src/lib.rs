pub mod boundary;
pub mod config;
pub mod constants;
pub mod controller;
pub mod format;
pub mod growth;
pub mod resources;
pub mod web;

pub use boundary::{Boundary, Command, CommandBuffer, DetailsContent, ElementId, Trigger};
pub use config::{Config, ConfigError};
pub use controller::{Controller, HoveredRegion, SelectionState, UiEvent};
pub use growth::GrowthModel;
