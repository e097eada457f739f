//! Building grid - placement index and colony-wide building operations
//!
//! Each building occupies exactly one cell. The cell index and the building
//! list are always updated together.

use ahash::AHashMap;

use crate::city::building::{Building, BuildingKind, BuildingType};
use crate::city::construction::{advance_construction, ContributionResult};
use crate::city::recipe::{CraftItem, RecipeCatalog};
use crate::core::error::{ColonyError, PlacementError, Result};
use crate::core::types::{BuildingId, GridPos};
use crate::economy::Stockpile;

#[derive(Debug, Clone)]
pub struct BuildingGrid {
    size: i32,
    buildings: Vec<Building>,
    cells: AHashMap<GridPos, BuildingId>,
    next_id: u32,
}

impl BuildingGrid {
    pub fn new(size: i32) -> Self {
        Self {
            size,
            buildings: Vec::new(),
            cells: AHashMap::new(),
            next_id: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn get(&self, id: BuildingId) -> Option<&Building> {
        self.buildings.iter().find(|b| b.id == id)
    }

    pub fn get_mut(&mut self, id: BuildingId) -> Option<&mut Building> {
        self.buildings.iter_mut().find(|b| b.id == id)
    }

    pub fn at(&self, pos: GridPos) -> Option<&Building> {
        self.cells.get(&pos).and_then(|id| self.get(*id))
    }

    pub fn can_build_at(&self, pos: GridPos) -> std::result::Result<(), PlacementError> {
        if self.cells.contains_key(&pos) {
            return Err(PlacementError::Occupied(pos));
        }
        if !pos.in_bounds(self.size) {
            return Err(PlacementError::OutOfBounds(pos));
        }
        Ok(())
    }

    /// Start construction of `building_type` at `pos`
    pub fn place(&mut self, building_type: BuildingType, pos: GridPos) -> Result<BuildingId> {
        self.can_build_at(pos)?;
        let id = BuildingId(self.next_id);
        self.next_id += 1;
        self.buildings.push(Building::new(id, building_type, pos));
        self.cells.insert(pos, id);
        tracing::debug!("Started construction of {} at {}", building_type, pos);
        Ok(id)
    }

    /// Place by type name; the cell is checked before the name
    pub fn place_named(&mut self, name: &str, pos: GridPos) -> Result<BuildingId> {
        self.can_build_at(pos)?;
        self.place(BuildingType::from_name(name)?, pos)
    }

    /// Damage a building; a destroyed building leaves the list and the grid.
    /// Returns true if it was destroyed.
    pub fn damage(&mut self, id: BuildingId, amount: f32) -> Result<bool> {
        let building = self.get_mut(id).ok_or(ColonyError::BuildingNotFound(id))?;
        if !building.take_damage(amount) {
            return Ok(false);
        }
        let pos = building.position;
        self.buildings.retain(|b| b.id != id);
        self.cells.remove(&pos);
        tracing::info!("{} at {} has been destroyed", id, pos);
        Ok(true)
    }

    pub fn repair(&mut self, id: BuildingId, materials: &Stockpile) -> Result<f32> {
        let building = self.get_mut(id).ok_or(ColonyError::BuildingNotFound(id))?;
        Ok(building.repair(materials))
    }

    /// New level, or None if already at max
    pub fn upgrade(&mut self, id: BuildingId) -> Result<Option<u32>> {
        let building = self.get_mut(id).ok_or(ColonyError::BuildingNotFound(id))?;
        Ok(building.upgrade())
    }

    /// Craft in a workshop, paying from `materials`
    pub fn craft(
        &self,
        id: BuildingId,
        recipe: &str,
        recipes: &RecipeCatalog,
        materials: &mut Stockpile,
    ) -> Result<CraftItem> {
        let building = self.get(id).ok_or(ColonyError::BuildingNotFound(id))?;
        if building.building_type() != BuildingType::Workshop {
            return Err(ColonyError::NotAWorkshop(id));
        }
        recipes.craft(recipe, materials)
    }

    /// Shelter capacity, total farm rate, or plain building count
    pub fn total_capacity(&self, building_type: Option<BuildingType>) -> f32 {
        match building_type {
            Some(BuildingType::Shelter) => self
                .buildings
                .iter()
                .map(|b| match b.kind {
                    BuildingKind::Shelter { capacity, .. } => capacity as f32,
                    _ => 0.0,
                })
                .sum(),
            Some(BuildingType::Farm) => self
                .buildings
                .iter()
                .map(|b| match b.kind {
                    BuildingKind::Farm { production_rate, .. } => production_rate,
                    _ => 0.0,
                })
                .sum(),
            _ => self.buildings.len() as f32,
        }
    }

    /// Advance every unbuilt building by `workers` worker-days
    pub fn daily_update(&mut self, workers: u32) -> Vec<(BuildingId, ContributionResult)> {
        let mut results = Vec::new();
        for building in self.buildings.iter_mut().filter(|b| !b.is_built()) {
            let result = advance_construction(building, workers);
            if result == ContributionResult::Completed {
                tracing::debug!("{} {} construction completed", building.building_type(), building.id);
            }
            results.push((building.id, result));
        }
        results
    }
}
