//! Combat - weapon catalog and hit/damage resolution against the horde

pub mod resolution;
pub mod weapons;

pub use resolution::{
    damage, group_combat, hit_chance, resolve_attack, AttackResult, Combatant, CombatOutcome,
};
pub use weapons::{WeaponKind, WeaponStats, WeaponTable};
