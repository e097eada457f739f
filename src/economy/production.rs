//! Production and consumption formulas
//!
//! Pure functions over immutable rate tables. The `Economy` manager feeds
//! them colony state; nothing here touches the stockpile.

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::core::types::Weather;
use crate::economy::stockpile::{ResourceAmounts, ResourceType};
use crate::population::SkillType;

/// Kind of production site
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductionKind {
    #[display(fmt = "farm")]
    Farm,
    #[display(fmt = "water_collector")]
    WaterCollector,
    #[display(fmt = "scavenging")]
    Scavenging,
}

impl ProductionKind {
    pub fn output(&self) -> ResourceType {
        match self {
            ProductionKind::Farm => ResourceType::Food,
            ProductionKind::WaterCollector => ResourceType::Water,
            ProductionKind::Scavenging => ResourceType::Materials,
        }
    }

    /// Skill averaged over workers for the skill bonus
    pub fn worker_skill(&self) -> SkillType {
        match self {
            ProductionKind::Farm => SkillType::Farming,
            ProductionKind::WaterCollector | ProductionKind::Scavenging => SkillType::Scouting,
        }
    }
}

/// Output per day: `base * level + per_worker * workers + skill_multiplier * avg_skill`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductionRate {
    pub base: f32,
    pub per_worker: f32,
    pub skill_multiplier: f32,
}

/// Per-day consumption rates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConsumptionRates {
    pub food_per_survivor: f32,
    pub water_per_survivor: f32,
    pub medicine_per_sick: f32,
    pub medicine_prevention: f32,
}

/// One day of consumption
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Consumption {
    pub food: f32,
    pub water: f32,
    pub medicine: f32,
}

impl Consumption {
    pub fn get(&self, resource: ResourceType) -> f32 {
        match resource {
            ResourceType::Food => self.food,
            ResourceType::Water => self.water,
            ResourceType::Medicine => self.medicine,
            _ => 0.0,
        }
    }
}

/// Days until a resource runs out at the current net rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortageForecast {
    NoShortage,
    EmptyIn { days: f32 },
}

/// Immutable production and consumption catalog
#[derive(Debug, Clone)]
pub struct ProductionTable {
    farm: ProductionRate,
    water_collector: ProductionRate,
    scavenging: ProductionRate,
    pub consumption: ConsumptionRates,
}

impl Default for ProductionTable {
    fn default() -> Self {
        Self {
            farm: ProductionRate {
                base: 10.0,
                per_worker: 5.0,
                skill_multiplier: 2.0,
            },
            water_collector: ProductionRate {
                base: 15.0,
                per_worker: 3.0,
                skill_multiplier: 1.5,
            },
            scavenging: ProductionRate {
                base: 0.0,
                per_worker: 8.0,
                skill_multiplier: 3.0,
            },
            consumption: ConsumptionRates {
                food_per_survivor: 2.0,
                water_per_survivor: 1.5,
                medicine_per_sick: 1.0,
                medicine_prevention: 0.1,
            },
        }
    }
}

impl ProductionTable {
    pub fn rate(&self, kind: ProductionKind) -> &ProductionRate {
        match kind {
            ProductionKind::Farm => &self.farm,
            ProductionKind::WaterCollector => &self.water_collector,
            ProductionKind::Scavenging => &self.scavenging,
        }
    }

    pub fn calculate_production(
        &self,
        kind: ProductionKind,
        worker_count: usize,
        avg_skill: f32,
        level: u32,
    ) -> f32 {
        let rate = self.rate(kind);
        rate.base * level as f32 + rate.per_worker * worker_count as f32 + rate.skill_multiplier * avg_skill
    }

    /// Food and water scale with stress; medicine covers the sick plus a
    /// small preventive dose for everyone
    pub fn calculate_consumption(&self, population: usize, sick_count: usize, stress: f32) -> Consumption {
        if population == 0 {
            return Consumption::default();
        }
        let rates = &self.consumption;
        let stress_factor = 1.0 + stress / 100.0;
        let n = population as f32;
        Consumption {
            food: rates.food_per_survivor * n * stress_factor,
            water: rates.water_per_survivor * n * stress_factor,
            medicine: rates.medicine_per_sick * sick_count as f32 + rates.medicine_prevention * n,
        }
    }
}

/// Production multiplier from worker morale, structural damage and weather
pub fn calculate_efficiency(morale: f32, damage: f32, weather: Weather) -> f32 {
    let morale_factor = morale / 100.0;
    let damage_factor = 1.0 - damage / 200.0;
    morale_factor * damage_factor * weather.production_modifier()
}

/// Forecast per resource from average daily production and consumption
pub fn predict_shortage(
    current: &ResourceAmounts,
    production: &ResourceAmounts,
    consumption: &ResourceAmounts,
) -> Vec<(ResourceType, ShortageForecast)> {
    current
        .iter()
        .map(|(resource, stock)| {
            let produced = production.get(resource).copied().unwrap_or(0.0);
            let consumed = consumption.get(resource).copied().unwrap_or(0.0);
            let net_daily = produced - consumed;
            let forecast = if net_daily >= 0.0 {
                ShortageForecast::NoShortage
            } else {
                ShortageForecast::EmptyIn {
                    days: stock / net_daily.abs(),
                }
            };
            (*resource, forecast)
        })
        .collect()
}
