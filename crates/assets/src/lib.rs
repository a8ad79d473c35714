#![warn(missing_docs)]
//! Block catalog and recipe pack schema + validation helpers.

mod loader;

pub use loader::{catalog_from_file, catalog_from_str, recipes_from_file, recipes_from_str};

use blockcraft_core::{ClassId, TypeId};
use blockcraft_world::{BlockType, PatternTemplate, StackError, DEFAULT_DAMAGE, DEFAULT_DURABILITY};
use serde::Deserialize;
use thiserror::Error;

/// Block type definition as written in a catalog pack.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockDefinition {
    /// Type identifier (e.g., "org/game/coal").
    pub id: TypeId,
    /// Classes the type belongs to (e.g., "org/game/Fuel").
    #[serde(default)]
    pub classes: Vec<ClassId>,
    /// Damage absorbed before the block is destroyed.
    #[serde(default)]
    pub durability: Option<f32>,
    /// Damage dealt when used as a tool.
    #[serde(default)]
    pub damage: Option<f32>,
}

impl BlockDefinition {
    /// Catalog metadata for this definition, filling in default stats.
    pub fn block_type(&self) -> BlockType {
        BlockType {
            classes: self.classes.clone(),
            durability: self.durability.unwrap_or(DEFAULT_DURABILITY),
            damage: self.damage.unwrap_or(DEFAULT_DAMAGE),
        }
    }
}

/// Recipe definition as written in a recipe pack.
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeDefinition {
    /// Unique recipe name (e.g., "torch").
    pub name: String,
    /// Input arrangement.
    pub template: PatternTemplate,
    /// Type produced.
    pub output: TypeId,
    /// Blocks produced per craft (defaults to 1).
    #[serde(default = "default_count")]
    pub count: usize,
}

fn default_count() -> usize {
    1
}

/// Errors emitted during pack loading.
#[derive(Debug, Error)]
pub enum AssetError {
    /// Wrap IO errors when reading packs.
    #[error("failed to read asset pack: {0}")]
    Io(#[from] std::io::Error),
    /// Wrap serde parsing issues, including malformed identifiers.
    #[error("failed to parse asset pack: {0}")]
    Parse(#[from] serde_json::Error),
    /// The same type is defined twice.
    #[error("block type {0} is defined more than once")]
    DuplicateType(TypeId),
    /// The same recipe name is used twice.
    #[error("recipe {0:?} is defined more than once")]
    DuplicateRecipe(String),
    /// A recipe's output cannot form a stack.
    #[error("recipe {recipe:?} has an invalid output: {source}")]
    InvalidOutput {
        /// Offending recipe.
        recipe: String,
        /// Why the output was rejected.
        source: StackError,
    },
}

/// Parse a JSON string into a list of block definitions.
pub fn load_blocks_from_str(input: &str) -> Result<Vec<BlockDefinition>, AssetError> {
    Ok(serde_json::from_str(input)?)
}

/// Parse a JSON string into a list of recipe definitions.
pub fn load_recipes_from_str(input: &str) -> Result<Vec<RecipeDefinition>, AssetError> {
    Ok(serde_json::from_str(input)?)
}
