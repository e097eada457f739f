//! Buildings as a tagged variant: shared fields plus per-type state

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::core::error::{ColonyError, Result};
use crate::core::types::{BuildingId, GridPos, Weather};
use crate::economy::{ResourceType, Stockpile};

pub const MAX_LEVEL: u32 = 3;

/// Max HP multiplier applied per upgrade
const UPGRADE_HP_FACTOR: f32 = 1.5;

/// HP restored per unit of the scarcer of wood and metal
const REPAIR_PER_MATERIAL: f32 = 10.0;

/// Type of building
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingType {
    Shelter,
    Farm,
    Watchtower,
    Workshop,
}

impl BuildingType {
    pub const ALL: [BuildingType; 4] = [
        BuildingType::Shelter,
        BuildingType::Farm,
        BuildingType::Watchtower,
        BuildingType::Workshop,
    ];

    /// Case-insensitive lookup by name ("farm", "Farm")
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.to_string().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| ColonyError::InvalidBuildingType(name.to_string()))
    }

    /// Materials needed to build
    pub fn build_cost(&self) -> Vec<(ResourceType, f32)> {
        match self {
            BuildingType::Shelter => vec![(ResourceType::Wood, 20.0), (ResourceType::Metal, 5.0)],
            BuildingType::Farm => vec![(ResourceType::Wood, 15.0), (ResourceType::Metal, 2.0)],
            BuildingType::Watchtower => vec![(ResourceType::Wood, 10.0), (ResourceType::Metal, 8.0)],
            BuildingType::Workshop => vec![(ResourceType::Wood, 25.0), (ResourceType::Metal, 15.0)],
        }
    }

    /// Days to build with a single worker
    pub fn build_time(&self) -> f32 {
        match self {
            BuildingType::Shelter => 2.0,
            BuildingType::Farm => 3.0,
            BuildingType::Watchtower => 4.0,
            BuildingType::Workshop => 5.0,
        }
    }

    /// Max HP at level 1
    pub fn base_max_hp(&self) -> f32 {
        match self {
            BuildingType::Shelter => 200.0,
            BuildingType::Farm => 150.0,
            BuildingType::Watchtower => 120.0,
            BuildingType::Workshop => 180.0,
        }
    }

    /// Max HP after upgrading to `level`
    pub fn max_hp_at(&self, level: u32) -> f32 {
        let upgrades = level.clamp(1, MAX_LEVEL) - 1;
        self.base_max_hp() * UPGRADE_HP_FACTOR.powi(upgrades as i32)
    }
}

/// Per-type state and constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BuildingKind {
    Shelter { capacity: u32, occupants: u32 },
    Farm { production_rate: f32, assigned_workers: u32 },
    Watchtower { vision_range: f32, detection_chance: f32 },
    Workshop { crafting_speed: f32 },
}

impl BuildingKind {
    pub fn new(building_type: BuildingType) -> Self {
        match building_type {
            BuildingType::Shelter => BuildingKind::Shelter {
                capacity: 5,
                occupants: 0,
            },
            BuildingType::Farm => BuildingKind::Farm {
                production_rate: 10.0,
                assigned_workers: 0,
            },
            BuildingType::Watchtower => BuildingKind::Watchtower {
                vision_range: 50.0,
                detection_chance: 0.7,
            },
            BuildingType::Workshop => BuildingKind::Workshop { crafting_speed: 1.0 },
        }
    }

    pub fn building_type(&self) -> BuildingType {
        match self {
            BuildingKind::Shelter { .. } => BuildingType::Shelter,
            BuildingKind::Farm { .. } => BuildingType::Farm,
            BuildingKind::Watchtower { .. } => BuildingType::Watchtower,
            BuildingKind::Workshop { .. } => BuildingType::Workshop,
        }
    }
}

/// Lifecycle; construction only ever moves forward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildingState {
    UnderConstruction,
    Built,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Building {
    pub id: BuildingId,
    pub kind: BuildingKind,
    pub position: GridPos,
    pub level: u32,
    pub current_hp: f32,
    pub max_hp: f32,
    /// 0.0 to 1.0
    pub construction_progress: f32,
    pub state: BuildingState,
}

impl Building {
    /// Fresh construction site at full HP
    pub fn new(id: BuildingId, building_type: BuildingType, position: GridPos) -> Self {
        let max_hp = building_type.base_max_hp();
        Self {
            id,
            kind: BuildingKind::new(building_type),
            position,
            level: 1,
            current_hp: max_hp,
            max_hp,
            construction_progress: 0.0,
            state: BuildingState::UnderConstruction,
        }
    }

    pub fn building_type(&self) -> BuildingType {
        self.kind.building_type()
    }

    pub fn name(&self) -> String {
        self.building_type().to_string()
    }

    pub fn is_built(&self) -> bool {
        self.state == BuildingState::Built
    }

    pub fn is_destroyed(&self) -> bool {
        self.current_hp <= 0.0
    }

    /// Returns true if this destroyed the building. Negative amounts do nothing.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        self.current_hp -= amount.max(0.0);
        self.is_destroyed()
    }

    /// Heal by the scarcer of wood and metal on hand, capped at max HP.
    /// Materials are only inspected, not spent. Returns HP restored.
    pub fn repair(&mut self, materials: &Stockpile) -> f32 {
        let available = materials
            .get(ResourceType::Wood)
            .min(materials.get(ResourceType::Metal));
        let before = self.current_hp;
        self.current_hp = (self.current_hp + available * REPAIR_PER_MATERIAL).min(self.max_hp);
        self.current_hp - before
    }

    /// Raise level by one and fully heal; None at max level
    pub fn upgrade(&mut self) -> Option<u32> {
        if self.level >= MAX_LEVEL {
            return None;
        }
        self.level += 1;
        self.max_hp *= UPGRADE_HP_FACTOR;
        self.current_hp = self.max_hp;
        Some(self.level)
    }

    /// Shelter only; false when full or not a shelter
    pub fn add_occupant(&mut self) -> bool {
        match &mut self.kind {
            BuildingKind::Shelter { capacity, occupants } if *occupants < *capacity => {
                *occupants += 1;
                true
            }
            _ => false,
        }
    }

    /// Shelter only; false when empty or not a shelter
    pub fn remove_occupant(&mut self) -> bool {
        match &mut self.kind {
            BuildingKind::Shelter { occupants, .. } if *occupants > 0 => {
                *occupants -= 1;
                true
            }
            _ => false,
        }
    }

    /// Farm only; set how many workers tend the farm
    pub fn set_farm_workers(&mut self, workers: u32) -> bool {
        match &mut self.kind {
            BuildingKind::Farm { assigned_workers, .. } => {
                *assigned_workers = workers;
                true
            }
            _ => false,
        }
    }

    /// Farm only: `rate * workers * skill`
    pub fn produce_food(&self, skill_level: f32) -> Option<f32> {
        match &self.kind {
            BuildingKind::Farm {
                production_rate,
                assigned_workers,
            } => Some(production_rate * *assigned_workers as f32 * skill_level),
            _ => None,
        }
    }

    /// Watchtower only: sight distance under the given weather
    pub fn vision_range(&self, weather: Weather) -> Option<f32> {
        match &self.kind {
            BuildingKind::Watchtower { vision_range, .. } => {
                Some(vision_range * weather.visibility_modifier())
            }
            _ => None,
        }
    }
}
