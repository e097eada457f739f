//! Construction system - handles building progress from worker contributions

use serde::{Deserialize, Serialize};

use crate::city::building::{Building, BuildingState};

/// Result of a day's construction work on one building
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ContributionResult {
    /// Work contributed, building still under construction
    InProgress { progress: f32 },
    /// Work contributed, building is now complete
    Completed,
    /// Building is already complete
    AlreadyComplete,
}

/// Progress gained from `workers` for one day: `workers / build_time`
pub fn calculate_contribution(building: &Building, workers: u32) -> f32 {
    workers as f32 / building.building_type().build_time()
}

/// Apply a day of construction work to a building
pub fn advance_construction(building: &mut Building, workers: u32) -> ContributionResult {
    if building.state == BuildingState::Built {
        return ContributionResult::AlreadyComplete;
    }

    building.construction_progress += calculate_contribution(building, workers);

    if building.construction_progress >= 1.0 {
        building.construction_progress = 1.0;
        building.state = BuildingState::Built;
        ContributionResult::Completed
    } else {
        ContributionResult::InProgress {
            progress: building.construction_progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::building::BuildingType;
    use crate::core::types::{BuildingId, GridPos};

    fn site(t: BuildingType) -> Building {
        Building::new(BuildingId(0), t, GridPos::new(0, 0))
    }

    #[test]
    fn test_contribution_formula() {
        let workshop = site(BuildingType::Workshop);
        assert!((calculate_contribution(&workshop, 1) - 0.2).abs() < 1e-6);
        assert!((calculate_contribution(&workshop, 2) - 0.4).abs() < 1e-6);
        assert_eq!(calculate_contribution(&workshop, 0), 0.0);
    }

    #[test]
    fn test_construction_completion_transition() {
        // Farm takes 3 worker-days
        let mut farm = site(BuildingType::Farm);
        let mut last = 0.0;
        for _ in 0..2 {
            match advance_construction(&mut farm, 1) {
                ContributionResult::InProgress { progress } => {
                    assert!(progress > last);
                    last = progress;
                }
                other => panic!("expected progress, got {other:?}"),
            }
            assert!(!farm.is_built());
        }

        assert_eq!(advance_construction(&mut farm, 1), ContributionResult::Completed);
        assert!(farm.is_built());
        assert_eq!(farm.construction_progress, 1.0);
    }

    #[test]
    fn test_apply_construction_already_complete() {
        let mut shelter = site(BuildingType::Shelter);
        assert_eq!(advance_construction(&mut shelter, 2), ContributionResult::Completed);
        assert_eq!(advance_construction(&mut shelter, 2), ContributionResult::AlreadyComplete);
        assert_eq!(shelter.construction_progress, 1.0);
    }

    #[test]
    fn test_no_workers_no_progress() {
        let mut tower = site(BuildingType::Watchtower);
        assert_eq!(
            advance_construction(&mut tower, 0),
            ContributionResult::InProgress { progress: 0.0 }
        );
    }
}
