//! Zombie entities - a closed catalog of kinds with shared mutable state

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::core::types::{Vec2, ZombieId};

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZombieKind {
    #[display(fmt = "shambler")]
    Shambler,
    #[display(fmt = "runner")]
    Runner,
    #[display(fmt = "screamer")]
    Screamer,
}

impl ZombieKind {
    pub const ALL: [ZombieKind; 3] = [ZombieKind::Shambler, ZombieKind::Runner, ZombieKind::Screamer];

    pub fn max_health(&self) -> f32 {
        match self {
            ZombieKind::Shambler => 100.0,
            ZombieKind::Runner => 70.0,
            ZombieKind::Screamer => 50.0,
        }
    }

    /// Distance covered per pursuit step
    pub fn speed(&self) -> f32 {
        match self {
            ZombieKind::Shambler => 1.0,
            ZombieKind::Runner => 4.0,
            ZombieKind::Screamer => 2.0,
        }
    }

    pub fn damage(&self) -> f32 {
        match self {
            ZombieKind::Shambler => 10.0,
            ZombieKind::Runner => 15.0,
            ZombieKind::Screamer => 5.0,
        }
    }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZombieState {
    #[display(fmt = "wandering")]
    Wandering,
    #[display(fmt = "chasing")]
    Chasing,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zombie {
    pub id: ZombieId,
    pub kind: ZombieKind,
    pub health: f32,
    pub max_health: f32,
    pub speed: f32,
    pub damage: f32,
    pub position: Vec2,
    pub state: ZombieState,
}

impl Zombie {
    pub fn new(id: ZombieId, kind: ZombieKind, position: Vec2) -> Self {
        Self {
            id,
            kind,
            health: kind.max_health(),
            max_health: kind.max_health(),
            speed: kind.speed(),
            damage: kind.damage(),
            position,
            state: ZombieState::Wandering,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// One speed-length step along the straight line to `target`
    pub fn move_towards(&mut self, target: Vec2) {
        let direction = target - self.position;
        if direction.length() > 0.0 {
            self.position = self.position + direction.normalize() * self.speed;
        }
    }

    /// Returns true if this killed the zombie
    pub fn take_damage(&mut self, amount: f32) -> bool {
        self.health -= amount;
        self.is_dead()
    }

    pub fn can_detect(&self, target: Vec2, range: f32) -> bool {
        self.position.distance(&target) <= range
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_stats() {
        let runner = Zombie::new(ZombieId(0), ZombieKind::Runner, Vec2::new(0.0, 0.0));
        assert_eq!(runner.health, 70.0);
        assert_eq!(runner.speed, 4.0);
        assert_eq!(runner.damage, 15.0);
        assert_eq!(runner.state, ZombieState::Wandering);
    }

    #[test]
    fn test_move_towards_one_step() {
        let mut z = Zombie::new(ZombieId(0), ZombieKind::Runner, Vec2::new(0.0, 0.0));
        z.move_towards(Vec2::new(30.0, 40.0));
        assert!((z.position.x - 2.4).abs() < 1e-5);
        assert!((z.position.y - 3.2).abs() < 1e-5);
    }

    #[test]
    fn test_move_towards_same_position_is_noop() {
        let mut z = Zombie::new(ZombieId(0), ZombieKind::Shambler, Vec2::new(5.0, 5.0));
        z.move_towards(Vec2::new(5.0, 5.0));
        assert_eq!(z.position, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_detection_range_inclusive() {
        let z = Zombie::new(ZombieId(0), ZombieKind::Shambler, Vec2::new(0.0, 0.0));
        assert!(z.can_detect(Vec2::new(30.0, 0.0), 30.0));
        assert!(!z.can_detect(Vec2::new(30.1, 0.0), 30.0));
    }

    #[test]
    fn test_take_damage() {
        let mut z = Zombie::new(ZombieId(0), ZombieKind::Screamer, Vec2::new(0.0, 0.0));
        assert!(!z.take_damage(49.0));
        assert!(z.take_damage(1.0));
    }
}
