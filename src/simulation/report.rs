//! What a day produced: reports, end-of-game results, snapshots

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::city::ContributionResult;
use crate::combat::CombatOutcome;
use crate::core::types::{BuildingId, Day, SurvivorId, Weather};
use crate::economy::{EconomySummary, ResourceAmounts};
use crate::events::Event;
use crate::population::{JobType, Survivor};

/// A survivor lost during the day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Casualty {
    pub id: SurvivorId,
    pub name: String,
}

impl From<&Survivor> for Casualty {
    fn from(survivor: &Survivor) -> Self {
        Self {
            id: survivor.id,
            name: survivor.name.clone(),
        }
    }
}

/// An event whose effect could not be applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedEffect {
    pub event: Event,
    pub reason: String,
}

/// Everything that happened on one day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayReport {
    pub day: Day,
    /// Weather the day was played under
    pub weather: Weather,
    /// Triggered events followed by their cascades, in application order
    pub events: Vec<Event>,
    pub skipped_effects: Vec<SkippedEffect>,
    pub combat: Vec<CombatOutcome>,
    pub economy: EconomySummary,
    pub construction: Vec<(BuildingId, ContributionResult)>,
    pub job_outputs: Vec<(JobType, f32)>,
    pub deaths: Vec<Casualty>,
    pub impact: f32,
    /// Population at the end of the day
    pub population: usize,
    pub horde_size: usize,
}

impl DayReport {
    pub fn zombies_killed(&self) -> usize {
        self.combat.iter().filter(|c| c.killed).count()
    }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    /// The day started with nobody left
    #[display(fmt = "no survivors")]
    NoSurvivors,
    /// Everybody died from hunger, thirst or job hazards overnight
    #[display(fmt = "all survivors perished")]
    AllPerished,
}

/// Terminal result; the day counter is not advanced
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[display(fmt = "game over on day {}: {}", day, cause)]
pub struct GameOver {
    pub day: Day,
    pub cause: GameOverCause,
}

#[derive(Debug, Clone)]
pub enum DayOutcome {
    Completed(DayReport),
    GameOver(GameOver),
}

impl DayOutcome {
    pub fn is_game_over(&self) -> bool {
        matches!(self, DayOutcome::GameOver(_))
    }

    pub fn report(&self) -> Option<&DayReport> {
        match self {
            DayOutcome::Completed(report) => Some(report),
            DayOutcome::GameOver(_) => None,
        }
    }
}

/// Per-day state handed to statistics consumers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySnapshot {
    pub day: Day,
    pub survivors: Vec<Survivor>,
    pub resources: ResourceAmounts,
    pub building_count: usize,
}
