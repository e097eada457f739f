//! Simulation configuration with documented constants
//!
//! Every tunable number of the daily loop lives here. A config is built once
//! (defaults or a TOML file) and passed by reference to the colony.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{ColonyError, Result};
use crate::economy::ResourceType;

/// Configuration for the colony simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for the shared RNG; same seed and same commands reproduce a run
    pub seed: u64,

    /// Survivors generated when a new colony is founded
    pub initial_survivors: usize,

    // === SPACE ===
    /// Side of the square grid; buildings occupy `[0, grid_size)` cells,
    /// zombies and survivors roam `[0, grid_size]`
    pub grid_size: i32,

    /// Distance at which a zombie notices a survivor and starts chasing
    pub detection_radius: f32,

    /// Radius within which a screamer flips other zombies to chasing
    pub scream_radius: f32,

    // === COMBAT ===
    /// Survivors need a combat skill strictly above this to fight
    pub combat_skill_threshold: f32,

    // === EVENTS ===
    /// Longest cascade chain including the triggering event (1 = no cascades)
    pub cascade_max_length: usize,

    /// Stock level under which a resource counts as short
    pub shortage_threshold: f32,

    // === ECONOMY ===
    /// Days averaged by the economy report and shortage prediction
    pub history_window: usize,

    /// Whether food and water withdrawn from the stockpile feed survivors
    pub rationing: bool,

    /// Stockpile a new colony starts with
    pub starting_resources: Vec<(ResourceType, f32)>,

    // === CAPS ===
    /// Arrivals that would exceed this are rejected
    pub max_population: usize,

    /// Spawns that would exceed this are rejected
    pub max_horde_size: usize,

    /// Workers contributed to each unbuilt building per day
    pub construction_workers: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            initial_survivors: 5,

            grid_size: 100,
            detection_radius: 30.0,
            scream_radius: 15.0,

            combat_skill_threshold: 3.0,

            cascade_max_length: 3,
            shortage_threshold: 20.0,

            history_window: 7,
            rationing: true,
            starting_resources: vec![
                (ResourceType::Food, 100.0),
                (ResourceType::Water, 100.0),
                (ResourceType::Medicine, 20.0),
                (ResourceType::Materials, 50.0),
                (ResourceType::Wood, 50.0),
                (ResourceType::Metal, 30.0),
            ],

            max_population: 200,
            max_horde_size: 500,
            construction_workers: 1,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Same defaults, different seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Parse a config from TOML; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.grid_size <= 0 {
            return Err(ColonyError::InvalidConfig(format!(
                "grid_size ({}) must be positive",
                self.grid_size
            )));
        }

        if self.detection_radius < 0.0 || self.scream_radius < 0.0 {
            return Err(ColonyError::InvalidConfig(
                "detection and scream radii must not be negative".into(),
            ));
        }

        if self.cascade_max_length == 0 {
            return Err(ColonyError::InvalidConfig(
                "cascade_max_length must be at least 1".into(),
            ));
        }

        if self.history_window == 0 {
            return Err(ColonyError::InvalidConfig(
                "history_window must be at least 1".into(),
            ));
        }

        if let Some((resource, amount)) = self
            .starting_resources
            .iter()
            .find(|(_, amount)| *amount < 0.0)
        {
            return Err(ColonyError::InvalidConfig(format!(
                "starting {resource} ({amount}) must not be negative"
            )));
        }

        Ok(())
    }
}
