//! Stockpile - colony-level resource storage

use std::collections::BTreeMap;

use ahash::AHashMap;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Kind of stored resource
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    #[display(fmt = "food")]
    Food,
    #[display(fmt = "water")]
    Water,
    #[display(fmt = "medicine")]
    Medicine,
    #[display(fmt = "materials")]
    Materials,
    #[display(fmt = "wood")]
    Wood,
    #[display(fmt = "metal")]
    Metal,
}

impl ResourceType {
    pub const ALL: [ResourceType; 6] = [
        ResourceType::Food,
        ResourceType::Water,
        ResourceType::Medicine,
        ResourceType::Materials,
        ResourceType::Wood,
        ResourceType::Metal,
    ];
}

/// Resource amounts keyed in a stable order, used in reports and saves
pub type ResourceAmounts = BTreeMap<ResourceType, f32>;

/// Stored resources. Amounts are never negative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stockpile {
    resources: AHashMap<ResourceType, f32>,
}

impl Default for Stockpile {
    fn default() -> Self {
        Self {
            resources: ResourceType::ALL.into_iter().map(|r| (r, 0.0)).collect(),
        }
    }
}

impl Stockpile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_amounts<'a>(amounts: impl IntoIterator<Item = &'a (ResourceType, f32)>) -> Self {
        let mut stockpile = Self::new();
        for (resource, amount) in amounts {
            stockpile.set(*resource, *amount);
        }
        stockpile
    }

    /// Get current amount of a resource
    pub fn get(&self, resource: ResourceType) -> f32 {
        self.resources.get(&resource).copied().unwrap_or(0.0)
    }

    /// Overwrite an amount, clamped at zero
    pub fn set(&mut self, resource: ResourceType, amount: f32) {
        self.resources.insert(resource, amount.max(0.0));
    }

    pub fn add(&mut self, resource: ResourceType, amount: f32) {
        let current = self.get(resource);
        self.set(resource, current + amount.max(0.0));
    }

    /// Remove up to `amount`, returns amount actually removed
    pub fn remove(&mut self, resource: ResourceType, amount: f32) -> f32 {
        let current = self.get(resource);
        let removed = amount.max(0.0).min(current);
        self.set(resource, current - removed);
        removed
    }

    /// Check if stockpile has enough of all required materials
    pub fn has_materials(&self, requirements: &[(ResourceType, f32)]) -> bool {
        requirements
            .iter()
            .all(|(res, amount)| self.get(*res) >= *amount)
    }

    /// Consume all requirements or nothing, returns true if successful
    pub fn consume_materials(&mut self, requirements: &[(ResourceType, f32)]) -> bool {
        if !self.has_materials(requirements) {
            return false;
        }
        for (res, amount) in requirements {
            self.remove(*res, *amount);
        }
        true
    }

    /// Number of resources stocked below `threshold`
    pub fn shortage_count(&self, threshold: f32) -> usize {
        ResourceType::ALL
            .into_iter()
            .filter(|r| self.get(*r) < threshold)
            .count()
    }

    pub fn amounts(&self) -> ResourceAmounts {
        ResourceType::ALL
            .into_iter()
            .map(|r| (r, self.get(r)))
            .collect()
    }
}
