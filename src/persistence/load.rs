//! Best-effort loading of save files
//!
//! A document that is not a JSON object is an error. Inside a valid
//! document every building, survivor and resource entry is restored on its
//! own; entries that fail are reported as `LoadFailure`s and loading goes on.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::city::{BuildingState, BuildingType, MAX_LEVEL};
use crate::core::config::SimulationConfig;
use crate::core::error::{ColonyError, Result};
use crate::core::types::{Day, Weather};
use crate::economy::ResourceType;
use crate::persistence::snapshot::{BuildingRecord, SaveState, SurvivorRecord};
use crate::population::STAT_MAX;
use crate::simulation::Colony;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    #[display(fmt = "building")]
    Building,
    #[display(fmt = "survivor")]
    Survivor,
    #[display(fmt = "resource")]
    Resource,
}

/// One entry of a save file that could not be restored
#[derive(Debug, Display, Clone, PartialEq, Serialize, Deserialize)]
#[display(fmt = "{} #{}: {}", entity, index, reason)]
pub struct LoadFailure {
    pub entity: EntityKind,
    /// Position of the entry within its list (or key order for resources)
    pub index: usize,
    pub reason: String,
}

/// Rebuild a colony from JSON, collecting per-entry failures
pub fn load_from_json(json: &str, config: SimulationConfig) -> Result<(Colony, Vec<LoadFailure>)> {
    let document: Value = serde_json::from_str(json)?;
    let Value::Object(root) = document else {
        return Err(ColonyError::InvalidSave("expected a JSON object".into()));
    };

    let mut colony = Colony::empty(config)?;
    let mut failures = Vec::new();

    let day = match root.get("day") {
        None => 1,
        Some(value) => value
            .as_u64()
            .and_then(|d| Day::try_from(d).ok())
            .ok_or_else(|| ColonyError::InvalidSave(format!("day {} is not a valid day", value)))?,
    };
    let weather = root
        .get("weather")
        .and_then(|w| serde_json::from_value::<Weather>(w.clone()).ok())
        .unwrap_or_default();
    colony.set_clock(day, weather);

    if let Some(Value::Object(resources)) = root.get("resources") {
        restore_resources(&mut colony, resources, &mut failures);
    }

    for (index, value) in entries(&root, "buildings").iter().enumerate() {
        let restored = serde_json::from_value::<BuildingRecord>(value.clone())
            .map_err(ColonyError::from)
            .and_then(|record| restore_building(&mut colony, &record));
        if let Err(err) = restored {
            tracing::warn!("Skipping building #{}: {}", index, err);
            failures.push(LoadFailure {
                entity: EntityKind::Building,
                index,
                reason: err.to_string(),
            });
        }
    }

    for (index, value) in entries(&root, "survivors").iter().enumerate() {
        let restored = serde_json::from_value::<SurvivorRecord>(value.clone())
            .map_err(ColonyError::from)
            .and_then(|record| restore_survivor(&mut colony, &record));
        if let Err(err) = restored {
            tracing::warn!("Skipping survivor #{}: {}", index, err);
            failures.push(LoadFailure {
                entity: EntityKind::Survivor,
                index,
                reason: err.to_string(),
            });
        }
    }

    tracing::info!(
        "Loaded day {} with {} survivors, {} buildings ({} entries skipped)",
        colony.day(),
        colony.population.len(),
        colony.buildings.len(),
        failures.len()
    );
    Ok((colony, failures))
}

/// Rebuild a colony from an already typed save
pub fn from_save_state(state: &SaveState, config: SimulationConfig) -> Result<(Colony, Vec<LoadFailure>)> {
    let mut colony = Colony::empty(config)?;
    let mut failures = Vec::new();
    colony.set_clock(state.day, state.weather);

    for (&resource, &amount) in &state.resources {
        colony.economy.stockpile.set(resource, amount.max(0.0));
    }
    for (index, record) in state.buildings.iter().enumerate() {
        if let Err(err) = restore_building(&mut colony, record) {
            tracing::warn!("Skipping building #{}: {}", index, err);
            failures.push(LoadFailure {
                entity: EntityKind::Building,
                index,
                reason: err.to_string(),
            });
        }
    }
    for (index, record) in state.survivors.iter().enumerate() {
        if let Err(err) = restore_survivor(&mut colony, record) {
            tracing::warn!("Skipping survivor #{}: {}", index, err);
            failures.push(LoadFailure {
                entity: EntityKind::Survivor,
                index,
                reason: err.to_string(),
            });
        }
    }
    Ok((colony, failures))
}

fn entries<'a>(root: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    match root.get(key) {
        Some(Value::Array(items)) => items.as_slice(),
        _ => &[],
    }
}

/// Known resources overwrite the starting stock, clamped at zero
fn restore_resources(colony: &mut Colony, resources: &Map<String, Value>, failures: &mut Vec<LoadFailure>) {
    for (index, (name, value)) in resources.iter().enumerate() {
        let resource = serde_json::from_value::<ResourceType>(Value::String(name.clone()));
        match (resource, value.as_f64()) {
            (Ok(resource), Some(amount)) => {
                colony.economy.stockpile.set(resource, (amount as f32).max(0.0));
            }
            (Err(err), _) => failures.push(LoadFailure {
                entity: EntityKind::Resource,
                index,
                reason: err.to_string(),
            }),
            (Ok(_), None) => failures.push(LoadFailure {
                entity: EntityKind::Resource,
                index,
                reason: format!("amount of {} is not a number", name),
            }),
        }
    }
}

/// Destroyed buildings are rejected before they take a cell
fn restore_building(colony: &mut Colony, record: &BuildingRecord) -> Result<()> {
    let building_type = BuildingType::from_name(&record.name)?;
    if let Some(hp) = record.current_hp.filter(|hp| *hp <= 0.0) {
        return Err(ColonyError::InvalidSave(format!(
            "{} at {} is destroyed ({} hp)",
            record.name, record.position, hp
        )));
    }
    let id = colony.buildings.place(building_type, record.position)?;
    let building = colony
        .buildings
        .get_mut(id)
        .ok_or(ColonyError::BuildingNotFound(id))?;

    building.level = record.level.clamp(1, MAX_LEVEL);
    building.max_hp = building_type.max_hp_at(building.level);
    building.current_hp = record
        .current_hp
        .unwrap_or(building.max_hp)
        .clamp(0.0, building.max_hp);
    if record.is_built {
        building.construction_progress = 1.0;
        building.state = BuildingState::Built;
    }
    Ok(())
}

fn restore_survivor(colony: &mut Colony, record: &SurvivorRecord) -> Result<()> {
    if record.health <= 0.0 {
        return Err(ColonyError::InvalidSave(format!(
            "{} is dead ({} health)",
            record.name, record.health
        )));
    }
    let id = colony.population.add(record.name.clone(), record.age);
    let survivor = colony
        .population
        .get_mut(id)
        .ok_or(ColonyError::SurvivorNotFound(id))?;
    survivor.health = record.health.min(STAT_MAX);
    survivor.skills = record.skills.clamped();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::GridPos;

    #[test]
    fn test_partial_load_reports_failures() {
        let json = r#"{
            "day": 12,
            "weather": "storm",
            "buildings": [
                {"name": "farm", "position": [1, 1], "level": 2, "current_hp": 100.0, "is_built": true},
                {"name": "castle", "position": [2, 2]},
                {"name": "shelter", "position": [1, 1]},
                {"name": "workshop"},
                {"name": "Shelter", "position": [150, 3]},
                {"name": "watchtower", "position": [5, 5], "is_built": false},
                {"name": "farm", "position": [7, 7], "current_hp": 0.0},
                {"name": "shelter", "position": [7, 7]}
            ],
            "survivors": [
                {"name": "Casey", "age": 40, "health": 80.0, "skills": {"combat": 6.5}},
                {"name": "Nameless"},
                {"name": "Riley", "age": "old"},
                {"name": "Ghost", "age": 30, "health": 0.0}
            ],
            "resources": {"food": 12.5, "water": -4.0, "gold": 3}
        }"#;

        let (colony, failures) = load_from_json(json, SimulationConfig::default()).unwrap();
        assert_eq!(colony.day(), 12);
        assert_eq!(colony.weather(), Weather::Storm);

        assert_eq!(colony.buildings.len(), 3);
        let farm = colony.buildings.at(GridPos::new(1, 1)).unwrap();
        assert_eq!(farm.level, 2);
        assert_eq!(farm.max_hp, 225.0);
        assert_eq!(farm.current_hp, 100.0);
        assert!(farm.is_built());
        let tower = colony.buildings.at(GridPos::new(5, 5)).unwrap();
        assert!(!tower.is_built());
        assert_eq!(tower.construction_progress, 0.0);
        // the destroyed farm never claimed its cell
        let shelter = colony.buildings.at(GridPos::new(7, 7)).unwrap();
        assert_eq!(shelter.building_type(), BuildingType::Shelter);
        assert!(colony.buildings.buildings().iter().all(|b| b.current_hp > 0.0));

        assert_eq!(colony.population.len(), 1);
        assert_eq!(colony.population.survivors()[0].skills.combat, 6.5);
        assert_eq!(colony.daily_snapshot().survivors.len(), 1);

        assert_eq!(colony.economy.stockpile.get(ResourceType::Food), 12.5);
        assert_eq!(colony.economy.stockpile.get(ResourceType::Water), 0.0);
        // missing resources keep their starting amounts
        assert_eq!(colony.economy.stockpile.get(ResourceType::Metal), 30.0);

        let count = |kind| failures.iter().filter(|f| f.entity == kind).count();
        assert_eq!(count(EntityKind::Building), 5);
        assert_eq!(count(EntityKind::Survivor), 3);
        assert_eq!(count(EntityKind::Resource), 1);
        let building_indices: Vec<_> = failures
            .iter()
            .filter(|f| f.entity == EntityKind::Building)
            .map(|f| f.index)
            .collect();
        assert_eq!(building_indices, vec![1, 2, 3, 4, 6]);
    }

    #[test]
    fn test_dead_entries_in_typed_save_are_skipped() {
        let colony = Colony::new(SimulationConfig::with_seed(6)).unwrap();
        let mut state = colony.to_save_state();
        state.survivors[2].health = 0.0;
        state.buildings.push(BuildingRecord {
            name: "farm".into(),
            position: GridPos::new(2, 2),
            level: 1,
            current_hp: Some(-5.0),
            is_built: true,
        });

        let (loaded, failures) = from_save_state(&state, SimulationConfig::default()).unwrap();
        assert_eq!(loaded.population.len(), 4);
        assert!(loaded.buildings.is_empty());
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].entity, EntityKind::Building);
        assert_eq!(failures[1].entity, EntityKind::Survivor);
        assert_eq!(failures[1].index, 2);
    }

    #[test]
    fn test_day_out_of_range_is_rejected() {
        let config = SimulationConfig::default;
        assert!(matches!(
            load_from_json(r#"{"day": 4294967301}"#, config()),
            Err(ColonyError::InvalidSave(_))
        ));
        assert!(matches!(
            load_from_json(r#"{"day": -3}"#, config()),
            Err(ColonyError::InvalidSave(_))
        ));
        let (colony, _) = load_from_json(r#"{"day": 4294967295}"#, config()).unwrap();
        assert_eq!(colony.day(), u32::MAX);
    }

    #[test]
    fn test_document_errors() {
        assert!(load_from_json("not json", SimulationConfig::default()).is_err());
        assert!(load_from_json("[1, 2]", SimulationConfig::default()).is_err());
    }

    #[test]
    fn test_empty_document_gives_defaults() {
        let (colony, failures) = load_from_json("{}", SimulationConfig::default()).unwrap();
        assert!(failures.is_empty());
        assert_eq!(colony.day(), 1);
        assert_eq!(colony.weather(), Weather::Clear);
        assert!(colony.population.is_empty());
        assert_eq!(colony.economy.stockpile.get(ResourceType::Food), 100.0);
    }
}
