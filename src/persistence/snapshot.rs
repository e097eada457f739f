//! Save file shape and conversion from a running colony

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::{Day, GridPos, Weather};
use crate::economy::ResourceAmounts;
use crate::population::Skills;
use crate::simulation::Colony;

fn default_level() -> u32 {
    1
}

fn default_built() -> bool {
    true
}

fn default_health() -> f32 {
    100.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingRecord {
    /// Building type name, e.g. "farm"
    pub name: String,
    pub position: GridPos,
    #[serde(default = "default_level")]
    pub level: u32,
    /// Missing means full health for the recorded level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_hp: Option<f32>,
    #[serde(default = "default_built")]
    pub is_built: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurvivorRecord {
    pub name: String,
    pub age: u32,
    #[serde(default = "default_health")]
    pub health: f32,
    #[serde(default)]
    pub skills: Skills,
}

/// Everything a save file holds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveState {
    pub day: Day,
    pub weather: Weather,
    pub buildings: Vec<BuildingRecord>,
    pub survivors: Vec<SurvivorRecord>,
    pub resources: ResourceAmounts,
}

impl Colony {
    pub fn to_save_state(&self) -> SaveState {
        SaveState {
            day: self.day(),
            weather: self.weather(),
            buildings: self
                .buildings
                .buildings()
                .iter()
                .map(|b| BuildingRecord {
                    name: b.name().to_lowercase(),
                    position: b.position,
                    level: b.level,
                    current_hp: Some(b.current_hp),
                    is_built: b.is_built(),
                })
                .collect(),
            survivors: self
                .population
                .iter()
                .map(|s| SurvivorRecord {
                    name: s.name.clone(),
                    age: s.age,
                    health: s.health,
                    skills: s.skills.clone(),
                })
                .collect(),
            resources: self.economy.stockpile.amounts(),
        }
    }
}

/// Pretty-printed JSON save
pub fn to_json(colony: &Colony) -> Result<String> {
    Ok(serde_json::to_string_pretty(&colony.to_save_state())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;

    #[test]
    fn test_save_state_shape() {
        let mut colony = Colony::new(SimulationConfig::with_seed(4)).unwrap();
        colony.place_building("watchtower", GridPos::new(4, 9)).unwrap();

        let json = to_json(&colony).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["day"], 1);
        assert_eq!(value["weather"], "clear");
        assert_eq!(value["buildings"][0]["name"], "watchtower");
        assert_eq!(value["buildings"][0]["position"], serde_json::json!([4, 9]));
        assert_eq!(value["buildings"][0]["is_built"], false);
        assert_eq!(value["survivors"].as_array().unwrap().len(), 5);
        assert!(value["survivors"][0]["skills"]["combat"].is_number());
        assert_eq!(value["resources"]["food"], 100.0);
    }

    #[test]
    fn test_record_defaults() {
        let record: BuildingRecord =
            serde_json::from_str(r#"{"name": "farm", "position": [1, 2]}"#).unwrap();
        assert_eq!(record.level, 1);
        assert_eq!(record.current_hp, None);
        assert!(record.is_built);

        let survivor: SurvivorRecord =
            serde_json::from_str(r#"{"name": "Riley", "age": 33, "skills": {"combat": 4.0}}"#).unwrap();
        assert_eq!(survivor.health, 100.0);
        assert_eq!(survivor.skills.combat, 4.0);
        assert_eq!(survivor.skills.farming, 1.0);
    }
}
