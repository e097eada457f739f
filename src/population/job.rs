//! Fixed job catalog and per-survivor job effects

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::core::error::{ColonyError, Result};
use crate::core::rng::SimRng;
use crate::population::survivor::{SkillType, Survivor};

/// Chance that a hazard hit also trains the survivor
const HAZARD_TRAINING_CHANCE: f32 = 0.3;
const HAZARD_TRAINING_AMOUNT: f32 = 0.5;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobType {
    Guard,
    Farmer,
    Medic,
    Builder,
    Scout,
}

impl JobType {
    /// Catalog order; jobs are always processed in this order
    pub const ALL: [JobType; 5] = [
        JobType::Guard,
        JobType::Farmer,
        JobType::Medic,
        JobType::Builder,
        JobType::Scout,
    ];

    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|job| job.to_string().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| ColonyError::InvalidJob(name.to_string()))
    }

    pub fn required_skill(&self) -> SkillType {
        match self {
            JobType::Guard => SkillType::Combat,
            JobType::Farmer => SkillType::Farming,
            JobType::Medic => SkillType::Medical,
            JobType::Builder => SkillType::Building,
            JobType::Scout => SkillType::Scouting,
        }
    }

    /// Hazard level 0-100: percent chance of injury per day and max damage
    pub fn danger_level(&self) -> u32 {
        match self {
            JobType::Guard => 7,
            JobType::Farmer => 2,
            JobType::Medic => 3,
            JobType::Builder => 4,
            JobType::Scout => 8,
        }
    }

    /// Roll the day's hazard for one assigned survivor.
    /// Returns the damage dealt, if any.
    pub fn apply_danger(&self, survivor: &mut Survivor, rng: &mut SimRng) -> Option<f32> {
        let danger = self.danger_level();
        if !rng.chance(danger as f32 / 100.0) {
            return None;
        }
        let damage = rng.int_range(1, danger as i32) as f32;
        survivor.take_damage(damage);
        if rng.chance(HAZARD_TRAINING_CHANCE) {
            survivor.gain_experience(self.required_skill(), HAZARD_TRAINING_AMOUNT);
        }
        Some(damage)
    }

    /// One survivor's contribution: skill level scaled by productivity
    pub fn output_of(&self, survivor: &Survivor) -> f32 {
        survivor.skills.get(self.required_skill()) * survivor.productivity()
    }
}
