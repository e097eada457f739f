//! Zombie horde - spawning, detection, pursuit and screamer alerts
//!
//! Movement is straight-line interpolation toward detected survivors;
//! obstacles are not modeled.

pub mod zombie;

pub use zombie::{Zombie, ZombieKind, ZombieState};

use serde::{Deserialize, Serialize};

use crate::core::rng::SimRng;
use crate::core::types::{Vec2, ZombieId};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Horde {
    zombies: Vec<Zombie>,
    next_id: u32,
}

impl Horde {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.zombies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zombies.is_empty()
    }

    pub fn zombies(&self) -> &[Zombie] {
        &self.zombies
    }

    pub fn get(&self, id: ZombieId) -> Option<&Zombie> {
        self.zombies.iter().find(|z| z.id == id)
    }

    pub fn get_mut(&mut self, id: ZombieId) -> Option<&mut Zombie> {
        self.zombies.iter_mut().find(|z| z.id == id)
    }

    /// Spawn on a random integer cell in `[0, grid_size]` on both axes
    pub fn spawn(&mut self, kind: ZombieKind, rng: &mut SimRng, grid_size: i32) -> ZombieId {
        let x = rng.int_range(0, grid_size) as f32;
        let y = rng.int_range(0, grid_size) as f32;
        self.spawn_at(kind, Vec2::new(x, y))
    }

    pub fn spawn_at(&mut self, kind: ZombieKind, position: Vec2) -> ZombieId {
        let id = ZombieId(self.next_id);
        self.next_id += 1;
        self.zombies.push(Zombie::new(id, kind, position));
        id
    }

    pub fn remove(&mut self, id: ZombieId) -> Option<Zombie> {
        let idx = self.zombies.iter().position(|z| z.id == id)?;
        Some(self.zombies.remove(idx))
    }

    pub fn remove_dead(&mut self) -> Vec<Zombie> {
        let (dead, alive): (Vec<_>, Vec<_>) = self.zombies.drain(..).partition(|z| z.is_dead());
        self.zombies = alive;
        dead
    }

    pub fn count(&self, kind: ZombieKind) -> usize {
        self.zombies.iter().filter(|z| z.kind == kind).count()
    }

    pub fn chasing_count(&self) -> usize {
        self.zombies
            .iter()
            .filter(|z| z.state == ZombieState::Chasing)
            .count()
    }

    /// Advance every zombie one tick.
    ///
    /// Each zombie checks the survivor positions in order; every position in
    /// `detection_radius` (measured from where the zombie currently stands)
    /// sets it chasing and pulls it one step closer. Afterwards each screamer
    /// sets every other zombie within `scream_radius` chasing.
    pub fn update_all(&mut self, survivors: &[Vec2], detection_radius: f32, scream_radius: f32) {
        for zombie in &mut self.zombies {
            for &target in survivors {
                if zombie.can_detect(target, detection_radius) {
                    zombie.state = ZombieState::Chasing;
                    zombie.move_towards(target);
                }
            }
        }

        let screamers: Vec<(ZombieId, Vec2)> = self
            .zombies
            .iter()
            .filter(|z| z.kind == ZombieKind::Screamer)
            .map(|z| (z.id, z.position))
            .collect();

        for (screamer_id, origin) in screamers {
            for zombie in &mut self.zombies {
                if zombie.id != screamer_id && zombie.can_detect(origin, scream_radius) {
                    if zombie.state != ZombieState::Chasing {
                        tracing::debug!("{} alerted by screamer {}", zombie.id, screamer_id);
                    }
                    zombie.state = ZombieState::Chasing;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_in_bounds() {
        let mut rng = SimRng::from_seed(7);
        let mut horde = Horde::new();
        for _ in 0..50 {
            horde.spawn(ZombieKind::Shambler, &mut rng, 100);
        }
        assert_eq!(horde.len(), 50);
        for z in horde.zombies() {
            assert!((0.0..=100.0).contains(&z.position.x));
            assert!((0.0..=100.0).contains(&z.position.y));
            assert_eq!(z.position.x.fract(), 0.0);
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let mut horde = Horde::new();
        let a = horde.spawn_at(ZombieKind::Runner, Vec2::new(0.0, 0.0));
        let b = horde.spawn_at(ZombieKind::Runner, Vec2::new(0.0, 0.0));
        assert_ne!(a, b);
        horde.remove(a);
        let c = horde.spawn_at(ZombieKind::Runner, Vec2::new(0.0, 0.0));
        assert_ne!(a, c);
    }

    #[test]
    fn test_update_chases_detected_survivor() {
        let mut horde = Horde::new();
        let near = horde.spawn_at(ZombieKind::Shambler, Vec2::new(10.0, 0.0));
        let far = horde.spawn_at(ZombieKind::Shambler, Vec2::new(90.0, 90.0));

        horde.update_all(&[Vec2::new(0.0, 0.0)], 30.0, 15.0);

        let near = horde.get(near).unwrap();
        assert_eq!(near.state, ZombieState::Chasing);
        assert!((near.position.x - 9.0).abs() < 1e-5);

        let far = horde.get(far).unwrap();
        assert_eq!(far.state, ZombieState::Wandering);
        assert_eq!(far.position, Vec2::new(90.0, 90.0));
    }

    #[test]
    fn test_screamer_alerts_neighbours_without_detection() {
        let mut horde = Horde::new();
        horde.spawn_at(ZombieKind::Screamer, Vec2::new(50.0, 50.0));
        let close = horde.spawn_at(ZombieKind::Shambler, Vec2::new(60.0, 50.0));
        let distant = horde.spawn_at(ZombieKind::Shambler, Vec2::new(80.0, 50.0));

        horde.update_all(&[], 30.0, 15.0);

        assert_eq!(horde.get(close).unwrap().state, ZombieState::Chasing);
        assert_eq!(horde.get(distant).unwrap().state, ZombieState::Wandering);
        // the screamer itself saw nothing
        assert_eq!(horde.chasing_count(), 1);
    }

    #[test]
    fn test_remove_dead() {
        let mut horde = Horde::new();
        let a = horde.spawn_at(ZombieKind::Screamer, Vec2::new(0.0, 0.0));
        horde.spawn_at(ZombieKind::Runner, Vec2::new(0.0, 0.0));
        horde.get_mut(a).unwrap().take_damage(100.0);
        let dead = horde.remove_dead();
        assert_eq!(dead.len(), 1);
        assert_eq!(horde.len(), 1);
        assert_eq!(horde.count(ZombieKind::Runner), 1);
    }
}
