//! Colony Sim - day-by-day survival colony simulation
//!
//! Survivors with needs and skills, a resource economy, buildings, random
//! events with cascades, a zombie horde and combat, advanced one day at a
//! time by [`simulation::Colony::advance_day`].

pub mod city;
pub mod combat;
pub mod core;
pub mod economy;
pub mod events;
pub mod horde;
pub mod persistence;
pub mod population;
pub mod simulation;

pub use crate::core::config::SimulationConfig;
pub use crate::core::error::{ColonyError, Result};
pub use crate::simulation::{Colony, DayOutcome, DayReport, GameOver};
