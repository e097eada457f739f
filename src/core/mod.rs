//! Core types, configuration, errors and the RNG service

pub mod config;
pub mod error;
pub mod rng;
pub mod types;

pub use config::SimulationConfig;
pub use error::{ColonyError, PlacementError, Result};
pub use rng::SimRng;
pub use types::{BuildingId, Day, GridPos, SurvivorId, Vec2, Weather, ZombieId};
