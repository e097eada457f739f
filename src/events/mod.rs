//! Event engine - probability model, severity, cascades and forecasts

pub mod catalog;
pub mod engine;

pub use catalog::{CascadeMap, EventKind, EventSpec, EventTable};
pub use engine::{combined_impact, DayForecast, Event, EventEngine, GameConditions};
