//! Integration tests for the horde and group combat
//!
//! Zombies are placed by hand so distances and reach are exact.

use colony_sim::combat::{group_combat, hit_chance, Combatant, WeaponKind, WeaponTable};
use colony_sim::core::rng::SimRng;
use colony_sim::core::types::{SurvivorId, Vec2};
use colony_sim::horde::{Horde, ZombieKind, ZombieState};

fn combatant(id: u32, skill: f32, position: Vec2, weapon: WeaponKind) -> Combatant {
    Combatant {
        id: SurvivorId(id),
        name: format!("Fighter {}", id),
        skill,
        position,
        weapon,
    }
}

// ============================================================================
// Horde movement
// ============================================================================

#[test]
fn test_runner_closes_distance_faster() {
    let mut horde = Horde::new();
    let shambler = horde.spawn_at(ZombieKind::Shambler, Vec2::new(0.0, 0.0));
    let runner = horde.spawn_at(ZombieKind::Runner, Vec2::new(0.0, 0.0));
    let target = [Vec2::new(9.0, 0.0)];

    horde.update_all(&target, 10.0, 0.0);

    assert_eq!(horde.get(shambler).unwrap().position, Vec2::new(1.0, 0.0));
    assert_eq!(horde.get(runner).unwrap().position, Vec2::new(4.0, 0.0));
    assert_eq!(horde.chasing_count(), 2);
}

#[test]
fn test_undetected_zombies_keep_wandering() {
    let mut horde = Horde::new();
    let id = horde.spawn_at(ZombieKind::Shambler, Vec2::new(50.0, 50.0));
    horde.update_all(&[Vec2::new(0.0, 0.0)], 10.0, 15.0);
    let zombie = horde.get(id).unwrap();
    assert_eq!(zombie.state, ZombieState::Wandering);
    assert_eq!(zombie.position, Vec2::new(50.0, 50.0));
}

#[test]
fn test_screamer_wakes_neighbours_only() {
    let mut horde = Horde::new();
    horde.spawn_at(ZombieKind::Screamer, Vec2::new(0.0, 0.0));
    let near = horde.spawn_at(ZombieKind::Shambler, Vec2::new(15.0, 0.0));
    let far = horde.spawn_at(ZombieKind::Shambler, Vec2::new(16.0, 0.0));

    // nobody sees a survivor, screams still carry
    horde.update_all(&[], 10.0, 15.0);

    assert_eq!(horde.get(near).unwrap().state, ZombieState::Chasing);
    assert_eq!(horde.get(far).unwrap().state, ZombieState::Wandering);
}

// ============================================================================
// Group combat
// ============================================================================

#[test]
fn test_out_of_reach_survivor_does_nothing() {
    let mut horde = Horde::new();
    horde.spawn_at(ZombieKind::Shambler, Vec2::new(5.0, 0.0));
    let fighters = [combatant(1, 5.0, Vec2::new(0.0, 0.0), WeaponKind::Knife)];
    let mut rng = SimRng::from_seed(3);

    let outcomes = group_combat(&fighters, &mut horde, false, &WeaponTable::default(), &mut rng);
    assert!(outcomes.is_empty());
    assert_eq!(horde.len(), 1);
}

#[test]
fn test_rifle_reaches_across_the_yard() {
    let mut horde = Horde::new();
    let id = horde.spawn_at(ZombieKind::Screamer, Vec2::new(8.0, 0.0));
    let fighters = [combatant(1, 10.0, Vec2::new(0.0, 0.0), WeaponKind::Rifle)];
    let mut rng = SimRng::from_seed(11);

    let outcomes = group_combat(&fighters, &mut horde, false, &WeaponTable::default(), &mut rng);
    assert_eq!(outcomes.len(), 1);
    let outcome = &outcomes[0];
    assert_eq!(outcome.target, id);
    assert_eq!(outcome.distance, 8.0);
    if outcome.hit {
        // 50 * 0.8 * 2.0 is already past a screamer's 50 health
        assert!(outcome.killed);
        assert!(horde.is_empty());
    } else {
        assert_eq!(outcome.damage, 0.0);
        assert_eq!(horde.len(), 1);
    }
}

#[test]
fn test_kills_are_removed_before_the_next_attacker() {
    let table = WeaponTable::default();
    let mut rng = SimRng::from_seed(5);
    let mut saw_second_target = false;

    for _ in 0..200 {
        let mut horde = Horde::new();
        let first = horde.spawn_at(ZombieKind::Screamer, Vec2::new(1.0, 0.0));
        let second = horde.spawn_at(ZombieKind::Screamer, Vec2::new(0.0, 2.0));
        let fighters = [
            combatant(1, 10.0, Vec2::new(0.0, 0.0), WeaponKind::MeleeWeapon),
            combatant(2, 10.0, Vec2::new(0.0, 0.0), WeaponKind::MeleeWeapon),
        ];

        let outcomes = group_combat(&fighters, &mut horde, false, &table, &mut rng);
        assert_eq!(outcomes[0].target, first);
        if outcomes[0].killed {
            assert!(horde.get(first).is_none());
            if let Some(next) = outcomes.get(1) {
                assert_eq!(next.target, second);
                saw_second_target = true;
            }
        } else {
            assert_eq!(outcomes[1].target, first);
        }
    }
    assert!(saw_second_target);
}

#[test]
fn test_empty_horde_stops_combat() {
    let mut horde = Horde::new();
    let fighters = [
        combatant(1, 3.0, Vec2::new(0.0, 0.0), WeaponKind::Fists),
        combatant(2, 3.0, Vec2::new(1.0, 1.0), WeaponKind::Knife),
    ];
    let mut rng = SimRng::from_seed(9);
    let outcomes = group_combat(&fighters, &mut horde, true, &WeaponTable::default(), &mut rng);
    assert!(outcomes.is_empty());
}

#[test]
fn test_observed_hit_rate_matches_hit_chance() {
    let table = WeaponTable::default();
    let mut rng = SimRng::from_seed(21);
    let expected = hit_chance(1.0, 0.8, 1.0, false);
    let trials = 3000;
    let mut hits = 0;

    for _ in 0..trials {
        let mut horde = Horde::new();
        horde.spawn_at(ZombieKind::Shambler, Vec2::new(1.0, 0.0));
        let fighters = [combatant(1, 1.0, Vec2::new(0.0, 0.0), WeaponKind::Fists)];
        let outcomes = group_combat(&fighters, &mut horde, false, &table, &mut rng);
        if outcomes[0].hit {
            hits += 1;
        }
    }

    let rate = hits as f32 / trials as f32;
    assert!((rate - expected).abs() < 0.03, "rate {rate} vs {expected}");
}
