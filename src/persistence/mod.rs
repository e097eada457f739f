//! Persistence - JSON save files with best-effort loading

pub mod load;
pub mod snapshot;

pub use load::{from_save_state, load_from_json, EntityKind, LoadFailure};
pub use snapshot::{to_json, BuildingRecord, SaveState, SurvivorRecord};

use std::path::Path;

use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::simulation::Colony;

pub fn save_to_file(colony: &Colony, path: &Path) -> Result<()> {
    std::fs::write(path, to_json(colony)?)?;
    tracing::info!("Saved day {} to {}", colony.day(), path.display());
    Ok(())
}

pub fn load_from_file(path: &Path, config: SimulationConfig) -> Result<(Colony, Vec<LoadFailure>)> {
    let json = std::fs::read_to_string(path)?;
    load_from_json(&json, config)
}
