//! City layer - buildings, construction, and crafting

pub mod building;
pub mod construction;
pub mod grid;
pub mod recipe;

pub use building::{Building, BuildingKind, BuildingState, BuildingType, MAX_LEVEL};
pub use construction::{advance_construction, calculate_contribution, ContributionResult};
pub use grid::BuildingGrid;
pub use recipe::{CraftItem, Recipe, RecipeCatalog};
