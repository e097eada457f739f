//! Crafting recipes - what a workshop can make from wood and metal

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::core::error::{ColonyError, Result};
use crate::economy::{ResourceType, Stockpile};

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CraftItem {
    #[display(fmt = "tool")]
    Tool,
    #[display(fmt = "weapon")]
    Weapon,
    #[display(fmt = "barricade")]
    Barricade,
}

/// A crafting recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub item: CraftItem,
    /// Materials consumed, all or nothing
    pub inputs: Vec<(ResourceType, f32)>,
}

/// Catalog of all available recipes
#[derive(Debug, Clone, Default)]
pub struct RecipeCatalog {
    recipes: Vec<Recipe>,
}

impl RecipeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        catalog.add(Recipe {
            item: CraftItem::Tool,
            inputs: vec![(ResourceType::Wood, 2.0), (ResourceType::Metal, 1.0)],
        });
        catalog.add(Recipe {
            item: CraftItem::Weapon,
            inputs: vec![(ResourceType::Wood, 1.0), (ResourceType::Metal, 3.0)],
        });
        catalog.add(Recipe {
            item: CraftItem::Barricade,
            inputs: vec![(ResourceType::Wood, 5.0), (ResourceType::Metal, 2.0)],
        });
        catalog
    }

    pub fn add(&mut self, recipe: Recipe) {
        self.recipes.push(recipe);
    }

    /// Look a recipe up by item name
    pub fn get(&self, name: &str) -> Result<&Recipe> {
        self.recipes
            .iter()
            .find(|r| r.item.to_string().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| ColonyError::InvalidRecipe(name.to_string()))
    }

    pub fn all(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Deduct a recipe's inputs from the stockpile
    pub fn craft(&self, name: &str, materials: &mut Stockpile) -> Result<CraftItem> {
        let recipe = self.get(name)?;
        if !materials.consume_materials(&recipe.inputs) {
            return Err(ColonyError::InsufficientMaterials(recipe.item.to_string()));
        }
        Ok(recipe.item)
    }
}
