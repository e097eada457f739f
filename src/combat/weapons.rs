//! Weapon catalog
//!
//! Weapons have three numbers: base damage, reach, and accuracy. The table is
//! built once and passed by reference into combat resolution.

use ahash::AHashMap;
use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponKind {
    #[display(fmt = "fists")]
    Fists,
    #[display(fmt = "knife")]
    Knife,
    #[display(fmt = "pistol")]
    Pistol,
    #[display(fmt = "rifle")]
    Rifle,
    #[display(fmt = "melee_weapon")]
    MeleeWeapon,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 5] = [
        WeaponKind::Fists,
        WeaponKind::Knife,
        WeaponKind::Pistol,
        WeaponKind::Rifle,
        WeaponKind::MeleeWeapon,
    ];

    /// What the colony hands out to its fighters each day
    pub const MELEE: [WeaponKind; 3] = [WeaponKind::Fists, WeaponKind::Knife, WeaponKind::MeleeWeapon];
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponStats {
    pub damage: f32,
    pub range: f32,
    /// Base hit probability before skill and distance
    pub accuracy: f32,
}

#[derive(Debug, Clone)]
pub struct WeaponTable {
    stats: AHashMap<WeaponKind, WeaponStats>,
}

impl Default for WeaponTable {
    fn default() -> Self {
        let mut stats = AHashMap::new();
        let mut add = |kind, damage, range, accuracy| {
            stats.insert(kind, WeaponStats { damage, range, accuracy });
        };
        add(WeaponKind::Fists, 5.0, 1.0, 0.8);
        add(WeaponKind::Knife, 15.0, 1.0, 0.85);
        add(WeaponKind::Pistol, 30.0, 5.0, 0.7);
        add(WeaponKind::Rifle, 50.0, 10.0, 0.75);
        add(WeaponKind::MeleeWeapon, 25.0, 2.0, 0.8);
        Self { stats }
    }
}

impl WeaponTable {
    pub fn get(&self, kind: WeaponKind) -> Option<&WeaponStats> {
        self.stats.get(&kind)
    }

    /// Weapon reach, 1.0 for weapons missing from the table
    pub fn range(&self, kind: WeaponKind) -> f32 {
        self.get(kind).map_or(1.0, |s| s.range)
    }
}
