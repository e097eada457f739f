//! Survivors: condition, needs and skills

use ahash::AHashMap;
use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::core::rng::SimRng;
use crate::core::types::SurvivorId;

/// Upper bound for health, hunger, thirst and morale
pub const STAT_MAX: f32 = 100.0;
pub const SKILL_MIN: f32 = 1.0;
pub const SKILL_MAX: f32 = 10.0;

/// Starting morale of a fresh survivor
const STARTING_MORALE: f32 = 75.0;

/// Daily need growth
const HUNGER_PER_DAY: f32 = 10.0;
const THIRST_PER_DAY: f32 = 15.0;

/// Need reduction per unit of food / water eaten
const HUNGER_PER_FOOD: f32 = 10.0;
const THIRST_PER_WATER: f32 = 15.0;

/// Both needs under this after a meal lifts morale
const SATED_THRESHOLD: f32 = 30.0;
const SATED_MORALE_BONUS: f32 = 5.0;

const NAMES: [&str; 6] = ["Alex", "Jamie", "Taylor", "Casey", "Riley", "Morgan"];

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillType {
    #[display(fmt = "combat")]
    Combat,
    #[display(fmt = "medical")]
    Medical,
    #[display(fmt = "farming")]
    Farming,
    #[display(fmt = "building")]
    Building,
    #[display(fmt = "scouting")]
    Scouting,
}

impl SkillType {
    pub const ALL: [SkillType; 5] = [
        SkillType::Combat,
        SkillType::Medical,
        SkillType::Farming,
        SkillType::Building,
        SkillType::Scouting,
    ];
}

/// Skill levels, each within `[SKILL_MIN, SKILL_MAX]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skills {
    pub combat: f32,
    pub medical: f32,
    pub farming: f32,
    pub building: f32,
    pub scouting: f32,
}

impl Default for Skills {
    fn default() -> Self {
        Self {
            combat: SKILL_MIN,
            medical: SKILL_MIN,
            farming: SKILL_MIN,
            building: SKILL_MIN,
            scouting: SKILL_MIN,
        }
    }
}

impl Skills {
    pub fn get(&self, skill: SkillType) -> f32 {
        match skill {
            SkillType::Combat => self.combat,
            SkillType::Medical => self.medical,
            SkillType::Farming => self.farming,
            SkillType::Building => self.building,
            SkillType::Scouting => self.scouting,
        }
    }

    /// Set a skill, clamped into the valid range
    pub fn set(&mut self, skill: SkillType, value: f32) {
        let slot = match skill {
            SkillType::Combat => &mut self.combat,
            SkillType::Medical => &mut self.medical,
            SkillType::Farming => &mut self.farming,
            SkillType::Building => &mut self.building,
            SkillType::Scouting => &mut self.scouting,
        };
        *slot = value.clamp(SKILL_MIN, SKILL_MAX);
    }

    /// Copy with every value forced into range
    pub fn clamped(&self) -> Self {
        let mut skills = Self::default();
        for skill in SkillType::ALL {
            skills.set(skill, self.get(skill));
        }
        skills
    }
}

/// A member of the colony
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Survivor {
    pub id: SurvivorId,
    pub name: String,
    pub age: u32,
    /// 0 = dead, 100 = unhurt
    pub health: f32,
    /// 0 = fed, 100 = starved (lethal)
    pub hunger: f32,
    /// 0 = hydrated, 100 = dehydrated (lethal)
    pub thirst: f32,
    pub morale: f32,
    pub skills: Skills,
    /// Total experience gained per skill, uncapped
    pub experience: AHashMap<SkillType, f32>,
}

impl Survivor {
    pub fn new(id: SurvivorId, name: impl Into<String>, age: u32) -> Self {
        Self {
            id,
            name: name.into(),
            age,
            health: STAT_MAX,
            hunger: 0.0,
            thirst: 0.0,
            morale: STARTING_MORALE,
            skills: Skills::default(),
            experience: AHashMap::new(),
        }
    }

    /// Newcomer with a random name, age and slightly varied skills
    pub fn random(id: SurvivorId, rng: &mut SimRng) -> Self {
        let name = rng.choose(&NAMES).copied().unwrap_or("Survivor");
        let age = rng.int_range(18, 60) as u32;
        let mut survivor = Self::new(id, name, age);
        for skill in SkillType::ALL {
            let jitter = rng.uniform_range(-0.5, 0.5);
            survivor.skills.set(skill, SKILL_MIN + jitter);
        }
        survivor
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Daily need growth. Reaching either cap is instantly lethal.
    pub fn update_needs(&mut self) {
        self.hunger = (self.hunger + HUNGER_PER_DAY).min(STAT_MAX);
        self.thirst = (self.thirst + THIRST_PER_DAY).min(STAT_MAX);
        if self.hunger >= STAT_MAX || self.thirst >= STAT_MAX {
            self.health = 0.0;
        }
    }

    /// Eat and drink. Morale rises when both needs end up low.
    pub fn consume_resources(&mut self, food: f32, water: f32) {
        if food > 0.0 {
            self.hunger = (self.hunger - food * HUNGER_PER_FOOD).max(0.0);
        }
        if water > 0.0 {
            self.thirst = (self.thirst - water * THIRST_PER_WATER).max(0.0);
        }
        if self.hunger < SATED_THRESHOLD && self.thirst < SATED_THRESHOLD {
            self.morale = (self.morale + SATED_MORALE_BONUS).min(STAT_MAX);
        }
    }

    pub fn gain_experience(&mut self, skill: SkillType, amount: f32) {
        self.skills.set(skill, self.skills.get(skill) + amount);
        *self.experience.entry(skill).or_insert(0.0) += amount;
    }

    /// Weighted blend of condition and unmet needs, in `[0, 1]`
    pub fn productivity(&self) -> f32 {
        let health_factor = self.health / STAT_MAX;
        let morale_factor = self.morale / STAT_MAX;
        let needs_factor = 1.0 - (self.hunger + self.thirst) / (2.0 * STAT_MAX);
        health_factor * 0.4 + morale_factor * 0.4 + needs_factor * 0.2
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).clamp(0.0, STAT_MAX);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn survivor() -> Survivor {
        Survivor::new(SurvivorId(0), "Alex", 30)
    }

    #[test]
    fn test_update_needs_from_zero() {
        let mut s = survivor();
        s.update_needs();
        assert_eq!(s.hunger, 10.0);
        assert_eq!(s.thirst, 15.0);
        assert_eq!(s.health, 100.0);
    }

    #[test]
    fn test_thirst_cap_is_lethal() {
        let mut s = survivor();
        s.thirst = 90.0;
        s.update_needs();
        assert_eq!(s.thirst, 100.0);
        assert_eq!(s.health, 0.0);
        assert!(s.is_dead());
    }

    #[test]
    fn test_hunger_cap_is_lethal() {
        let mut s = survivor();
        s.hunger = 95.0;
        s.update_needs();
        assert_eq!(s.hunger, 100.0);
        assert_eq!(s.health, 0.0);
    }

    #[test]
    fn test_consume_large_meal() {
        let mut s = survivor();
        s.hunger = 60.0;
        s.thirst = 45.0;
        s.consume_resources(1000.0, 1000.0);
        assert_eq!(s.hunger, 0.0);
        assert_eq!(s.thirst, 0.0);
        assert_eq!(s.morale, 80.0);
    }

    #[test]
    fn test_consume_morale_capped() {
        let mut s = survivor();
        s.morale = 98.0;
        s.consume_resources(1000.0, 1000.0);
        assert_eq!(s.morale, 100.0);
    }

    #[test]
    fn test_consume_no_bonus_while_thirsty() {
        let mut s = survivor();
        s.thirst = 80.0;
        s.consume_resources(1.0, 1.0);
        assert_eq!(s.thirst, 65.0);
        assert_eq!(s.morale, 75.0);
    }

    #[test]
    fn test_gain_experience_caps_skill() {
        let mut s = survivor();
        s.gain_experience(SkillType::Combat, 25.0);
        assert_eq!(s.skills.combat, 10.0);
        assert_eq!(s.experience[&SkillType::Combat], 25.0);

        s.gain_experience(SkillType::Combat, 0.5);
        assert_eq!(s.skills.combat, 10.0);
        assert_eq!(s.experience[&SkillType::Combat], 25.5);
    }

    #[test]
    fn test_productivity_fresh_survivor() {
        let s = survivor();
        // 0.4 * 1.0 + 0.4 * 0.75 + 0.2 * 1.0
        assert!((s.productivity() - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_productivity_range() {
        let mut s = survivor();
        s.health = 0.0;
        s.morale = 0.0;
        s.hunger = 100.0;
        s.thirst = 100.0;
        assert_eq!(s.productivity(), 0.0);
    }

    #[test]
    fn test_take_damage_clamps() {
        let mut s = survivor();
        s.take_damage(250.0);
        assert_eq!(s.health, 0.0);
    }

    #[test]
    fn test_random_survivor_skills_in_range() {
        let mut rng = SimRng::from_seed(11);
        for i in 0..50 {
            let s = Survivor::random(SurvivorId(i), &mut rng);
            assert!((18..=60).contains(&s.age));
            assert!(NAMES.contains(&s.name.as_str()));
            for skill in SkillType::ALL {
                let v = s.skills.get(skill);
                assert!((SKILL_MIN..=1.5).contains(&v));
            }
        }
    }
}
