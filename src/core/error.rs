use thiserror::Error;

use crate::core::types::{BuildingId, GridPos, SurvivorId};
use crate::events::EventKind;

/// Why a building could not be placed on a cell
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    #[error("Position {0} already occupied")]
    Occupied(GridPos),

    #[error("Position {0} out of bounds")]
    OutOfBounds(GridPos),
}

#[derive(Error, Debug)]
pub enum ColonyError {
    #[error("Invalid placement: {0}")]
    Placement(#[from] PlacementError),

    #[error("Invalid building type: {0}")]
    InvalidBuildingType(String),

    #[error("Invalid job: {0}")]
    InvalidJob(String),

    #[error("Invalid recipe: {0}")]
    InvalidRecipe(String),

    #[error("Not enough materials to craft {0}")]
    InsufficientMaterials(String),

    #[error("Building {0} is not a workshop")]
    NotAWorkshop(BuildingId),

    #[error("Survivor not found: {0}")]
    SurvivorNotFound(SurvivorId),

    #[error("Building not found: {0}")]
    BuildingNotFound(BuildingId),

    #[error("Effect of {kind} failed: {reason}")]
    EventEffect { kind: EventKind, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid save file: {0}")]
    InvalidSave(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ColonyError>;
