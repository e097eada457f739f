//! Core type definitions used throughout the codebase

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Simulated day counter
pub type Day = u32;

/// Stable survivor identifier, never reused within a run
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[display(fmt = "survivor#{}", _0)]
pub struct SurvivorId(pub u32);

/// Stable building identifier
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[display(fmt = "building#{}", _0)]
pub struct BuildingId(pub u32);

/// Stable zombie identifier
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[display(fmt = "zombie#{}", _0)]
pub struct ZombieId(pub u32);

/// 2D position
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0001 {
            Self { x: self.x / len, y: self.y / len }
        } else {
            Self::default()
        }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

/// Integer cell on the building grid. Serialized as `[x, y]`.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[display(fmt = "({}, {})", x, y)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// True when the cell lies in `[0, size) x [0, size)`
    pub fn in_bounds(&self, size: i32) -> bool {
        (0..size).contains(&self.x) && (0..size).contains(&self.y)
    }
}

impl From<[i32; 2]> for GridPos {
    fn from([x, y]: [i32; 2]) -> Self {
        Self { x, y }
    }
}

impl From<GridPos> for [i32; 2] {
    fn from(pos: GridPos) -> Self {
        [pos.x, pos.y]
    }
}

/// Weather condition for the current day
#[derive(Debug, Display, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    #[display(fmt = "normal")]
    Normal,
    #[default]
    #[display(fmt = "clear")]
    Clear,
    #[display(fmt = "rain")]
    Rain,
    #[display(fmt = "storm")]
    Storm,
    #[display(fmt = "drought")]
    Drought,
}

impl Weather {
    /// Weathers the day counter resamples from
    pub const DAILY: [Weather; 3] = [Weather::Clear, Weather::Rain, Weather::Storm];

    /// Production efficiency multiplier
    pub fn production_modifier(&self) -> f32 {
        match self {
            Self::Normal => 1.0,
            Self::Rain => 0.9,
            Self::Storm => 0.7,
            Self::Drought => 0.8,
            Self::Clear => 1.1,
        }
    }

    /// Event probability multiplier
    pub fn event_modifier(&self) -> f32 {
        match self {
            Self::Clear => 0.8,
            Self::Rain => 1.2,
            Self::Storm => 1.5,
            Self::Normal | Self::Drought => 1.0,
        }
    }

    /// Watchtower vision multiplier
    pub fn visibility_modifier(&self) -> f32 {
        match self {
            Self::Clear => 1.0,
            Self::Rain => 0.8,
            Self::Storm => 0.3,
            Self::Normal | Self::Drought => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_distance() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 0.0001);
    }

    #[test]
    fn test_vec2_normalize_zero() {
        let v = Vec2::default().normalize();
        assert_eq!(v, Vec2::default());
    }

    #[test]
    fn test_grid_pos_bounds() {
        assert!(GridPos::new(0, 0).in_bounds(100));
        assert!(GridPos::new(99, 99).in_bounds(100));
        assert!(!GridPos::new(100, 5).in_bounds(100));
        assert!(!GridPos::new(-1, 5).in_bounds(100));
    }

    #[test]
    fn test_grid_pos_serializes_as_pair() {
        let json = serde_json::to_string(&GridPos::new(3, 7)).unwrap();
        assert_eq!(json, "[3,7]");
        let back: GridPos = serde_json::from_str("[3,7]").unwrap();
        assert_eq!(back, GridPos::new(3, 7));
    }

    #[test]
    fn test_weather_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Weather::Storm).unwrap(), "\"storm\"");
        assert_eq!(Weather::Rain.to_string(), "rain");
    }

    #[test]
    fn test_weather_modifiers() {
        assert_eq!(Weather::Clear.production_modifier(), 1.1);
        assert_eq!(Weather::Drought.event_modifier(), 1.0);
        assert_eq!(Weather::Storm.visibility_modifier(), 0.3);
    }
}
