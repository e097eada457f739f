//! Attack resolution between survivors and zombies
//!
//! A hit is one uniform draw against `hit_chance`; a critical is a second
//! draw at 10% taken only after a hit. Damage is floored to whole points.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::combat::weapons::{WeaponKind, WeaponTable};
use crate::core::rng::SimRng;
use crate::core::types::{SurvivorId, Vec2, ZombieId};
use crate::horde::{Horde, Zombie, ZombieKind};

pub const MAX_HIT_CHANCE: f32 = 0.95;
pub const CRITICAL_CHANCE: f32 = 0.1;
pub const CRITICAL_MULTIPLIER: f32 = 1.5;
pub const NIGHT_PENALTY: f32 = 0.7;

/// A survivor ready to fight
#[derive(Debug, Clone)]
pub struct Combatant {
    pub id: SurvivorId,
    pub name: String,
    pub skill: f32,
    pub position: Vec2,
    pub weapon: WeaponKind,
}

/// Outcome of a single attack roll
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackResult {
    pub hit: bool,
    pub damage: f32,
    pub critical: bool,
}

impl AttackResult {
    pub const MISS: AttackResult = AttackResult {
        hit: false,
        damage: 0.0,
        critical: false,
    };
}

/// One engagement in a group combat pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatOutcome {
    pub attacker: SurvivorId,
    pub attacker_name: String,
    pub target: ZombieId,
    pub zombie_kind: ZombieKind,
    pub weapon: WeaponKind,
    pub distance: f32,
    pub hit: bool,
    pub damage: f32,
    pub critical: bool,
    pub killed: bool,
}

/// `min(0.95, accuracy * (1 + skill*0.05) * max(0.1, 1 - distance/20) * night)`
pub fn hit_chance(skill: f32, accuracy: f32, distance: f32, night: bool) -> f32 {
    let base = accuracy * (1.0 + skill * 0.05);
    let distance_penalty = (1.0 - distance / 20.0).max(0.1);
    let night_penalty = if night { NIGHT_PENALTY } else { 1.0 };
    (base * distance_penalty * night_penalty).min(MAX_HIT_CHANCE)
}

/// `floor(base * uniform(0.8, 1.2) * (1 + skill*0.1) * crit)`
pub fn damage(base_damage: f32, skill: f32, critical: bool, rng: &mut SimRng) -> f32 {
    let variance = rng.uniform_range(0.8, 1.2);
    damage_with_variance(base_damage, skill, critical, variance)
}

pub fn damage_with_variance(base_damage: f32, skill: f32, critical: bool, variance: f32) -> f32 {
    let skill_bonus = 1.0 + skill * 0.1;
    let crit = if critical { CRITICAL_MULTIPLIER } else { 1.0 };
    (base_damage * variance * skill_bonus * crit).floor()
}

/// Roll one attack and apply its damage to `target`
pub fn resolve_attack(
    attacker: &Combatant,
    target: &mut Zombie,
    distance: f32,
    night: bool,
    weapons: &WeaponTable,
    rng: &mut SimRng,
) -> AttackResult {
    let Some(stats) = weapons.get(attacker.weapon) else {
        return AttackResult::MISS;
    };

    let chance = hit_chance(attacker.skill, stats.accuracy, distance, night);
    let hit = rng.uniform() <= chance;
    if !hit {
        return AttackResult::MISS;
    }

    let critical = rng.uniform() <= CRITICAL_CHANCE;
    let dealt = damage(stats.damage, attacker.skill, critical, rng);
    target.take_damage(dealt);

    AttackResult {
        hit,
        damage: dealt,
        critical,
    }
}

/// Each combatant, in order, attacks its nearest zombie if it is within
/// weapon reach. Killed zombies leave the horde at once, so later combatants
/// pick from what is left.
pub fn group_combat(
    combatants: &[Combatant],
    horde: &mut Horde,
    night: bool,
    weapons: &WeaponTable,
    rng: &mut SimRng,
) -> Vec<CombatOutcome> {
    let mut outcomes = Vec::new();

    for combatant in combatants {
        let Some((target_id, distance)) = nearest_zombie(horde, combatant.position) else {
            break;
        };
        if distance > weapons.range(combatant.weapon) {
            continue;
        }
        let Some(target) = horde.get_mut(target_id) else {
            continue;
        };

        let result = resolve_attack(combatant, target, distance, night, weapons, rng);
        let killed = target.is_dead();
        let zombie_kind = target.kind;

        if killed {
            horde.remove(target_id);
            tracing::debug!("{} killed {} {}", combatant.name, zombie_kind, target_id);
        }

        outcomes.push(CombatOutcome {
            attacker: combatant.id,
            attacker_name: combatant.name.clone(),
            target: target_id,
            zombie_kind,
            weapon: combatant.weapon,
            distance,
            hit: result.hit,
            damage: result.damage,
            critical: result.critical,
            killed,
        });
    }

    outcomes
}

/// Closest zombie by straight-line distance; ties go to the earliest spawned
fn nearest_zombie(horde: &Horde, from: Vec2) -> Option<(ZombieId, f32)> {
    horde
        .zombies()
        .iter()
        .map(|z| (z.id, z.position.distance(&from)))
        .min_by_key(|&(_, d)| OrderedFloat(d))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fighter(name: &str, position: Vec2, weapon: WeaponKind) -> Combatant {
        Combatant {
            id: SurvivorId(0),
            name: name.to_string(),
            skill: 1.0,
            position,
            weapon,
        }
    }

    #[test]
    fn test_fists_hit_chance_at_one_tile() {
        // 0.8 * 1.05 * 0.95
        assert!((hit_chance(1.0, 0.8, 1.0, false) - 0.798).abs() < 1e-5);
    }

    #[test]
    fn test_hit_chance_caps_and_floors() {
        assert_eq!(hit_chance(10.0, 0.85, 0.0, false), MAX_HIT_CHANCE);
        // far away keeps the 0.1 distance floor
        let far = hit_chance(1.0, 0.8, 100.0, false);
        assert!((far - 0.8 * 1.05 * 0.1).abs() < 1e-6);
        let night = hit_chance(1.0, 0.8, 1.0, true);
        assert!((night - 0.798 * 0.7).abs() < 1e-5);
    }

    #[test]
    fn test_damage_formula() {
        // fists, skill 1: 5 * 1.1 = 5.5 before variance
        assert_eq!(damage_with_variance(5.0, 1.0, false, 0.8), 4.0);
        assert_eq!(damage_with_variance(5.0, 1.0, false, 1.2), 6.0);
        assert_eq!(damage_with_variance(50.0, 0.0, true, 1.0), 75.0);
    }

    #[test]
    fn test_damage_stays_in_variance_band() {
        let mut rng = SimRng::from_seed(3);
        for _ in 0..200 {
            let d = damage(5.0, 1.0, false, &mut rng);
            assert!((4.0..=6.0).contains(&d), "damage {d}");
        }
    }

    #[test]
    fn test_out_of_range_survivor_does_nothing() {
        let mut rng = SimRng::from_seed(1);
        let mut horde = Horde::new();
        horde.spawn_at(ZombieKind::Shambler, Vec2::new(10.0, 0.0));
        let table = WeaponTable::default();
        let out = group_combat(
            &[fighter("Alex", Vec2::new(0.0, 0.0), WeaponKind::Knife)],
            &mut horde,
            false,
            &table,
            &mut rng,
        );
        assert!(out.is_empty());
        assert_eq!(horde.zombies()[0].health, 100.0);
    }

    #[test]
    fn test_engages_nearest_zombie() {
        let mut rng = SimRng::from_seed(1);
        let mut horde = Horde::new();
        horde.spawn_at(ZombieKind::Shambler, Vec2::new(1.5, 0.0));
        let near = horde.spawn_at(ZombieKind::Runner, Vec2::new(0.5, 0.0));
        let table = WeaponTable::default();
        let out = group_combat(
            &[fighter("Alex", Vec2::new(0.0, 0.0), WeaponKind::MeleeWeapon)],
            &mut horde,
            false,
            &table,
            &mut rng,
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].target, near);
        assert_eq!(out[0].zombie_kind, ZombieKind::Runner);
        assert!((out[0].distance - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_kill_removes_zombie_before_next_attacker() {
        let table = WeaponTable::default();
        let fighters = [
            fighter("Alex", Vec2::new(0.0, 0.0), WeaponKind::Rifle),
            fighter("Jamie", Vec2::new(0.0, 0.0), WeaponKind::Rifle),
        ];

        // rifle at point blank: skill 1 gives 0.7875 hit and at least 44 damage
        for seed in 0..64 {
            let mut rng = SimRng::from_seed(seed);
            let mut horde = Horde::new();
            let weak = horde.spawn_at(ZombieKind::Screamer, Vec2::new(0.0, 0.0));
            let other = horde.spawn_at(ZombieKind::Shambler, Vec2::new(3.0, 0.0));
            horde.get_mut(weak).unwrap().health = 1.0;

            let out = group_combat(&fighters, &mut horde, false, &table, &mut rng);
            assert_eq!(out.len(), 2);
            if out[0].hit {
                assert!(out[0].killed);
                assert!(horde.get(weak).is_none());
                assert_eq!(out[1].target, other);
            } else {
                assert_eq!(out[1].target, weak);
            }
        }
    }

    #[test]
    fn test_empty_horde_stops_pass() {
        let mut rng = SimRng::from_seed(1);
        let mut horde = Horde::new();
        let table = WeaponTable::default();
        let out = group_combat(
            &[fighter("Alex", Vec2::new(0.0, 0.0), WeaponKind::Fists)],
            &mut horde,
            false,
            &table,
            &mut rng,
        );
        assert!(out.is_empty());
    }
}
