//! Block type metadata and the class-membership lookup used by matching.

use std::collections::HashMap;

use blockcraft_core::{ClassId, TypeId};
use serde::{Deserialize, Serialize};

/// Durability assumed when a type does not declare one.
pub const DEFAULT_DURABILITY: f32 = 20.0;
/// Damage dealt when a type does not declare one.
pub const DEFAULT_DAMAGE: f32 = 1.0;

/// Resolves class membership of block types.
///
/// Matching code never owns catalog data; a catalog is passed to every call
/// that needs to resolve a class.
pub trait TypeCatalog {
    /// True if `type_id` is a member of `class`.
    fn has_class(&self, type_id: &TypeId, class: &ClassId) -> bool;
}

impl<C: TypeCatalog + ?Sized> TypeCatalog for &C {
    fn has_class(&self, type_id: &TypeId, class: &ClassId) -> bool {
        (**self).has_class(type_id, class)
    }
}

/// Metadata of one block type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockType {
    /// Classes this type belongs to.
    #[serde(default)]
    pub classes: Vec<ClassId>,
    /// How much damage the block absorbs before it is destroyed.
    #[serde(default = "default_durability")]
    pub durability: f32,
    /// Damage the block deals when used as a tool.
    #[serde(default = "default_damage")]
    pub damage: f32,
}

fn default_durability() -> f32 {
    DEFAULT_DURABILITY
}

fn default_damage() -> f32 {
    DEFAULT_DAMAGE
}

impl Default for BlockType {
    fn default() -> Self {
        Self {
            classes: Vec::new(),
            durability: DEFAULT_DURABILITY,
            damage: DEFAULT_DAMAGE,
        }
    }
}

impl BlockType {
    /// A type with default stats belonging to `classes`.
    pub fn with_classes(classes: Vec<ClassId>) -> Self {
        Self {
            classes,
            ..Self::default()
        }
    }

    /// True if this type belongs to `class`.
    pub fn has_class(&self, class: &ClassId) -> bool {
        self.classes.contains(class)
    }

    /// True if this type belongs to every class in `classes`.
    pub fn has_classes(&self, classes: &[ClassId]) -> bool {
        classes.iter().all(|class| self.has_class(class))
    }
}

/// In-memory catalog keyed by type id.
#[derive(Debug, Clone, Default)]
pub struct BlockCatalog {
    types: HashMap<TypeId, BlockType>,
}

impl BlockCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a type.
    pub fn insert(&mut self, type_id: TypeId, block_type: BlockType) {
        self.types.insert(type_id, block_type);
    }

    /// Metadata for a type.
    pub fn get(&self, type_id: &TypeId) -> Option<&BlockType> {
        self.types.get(type_id)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// True if no types are registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// All types belonging to `class`.
    pub fn members<'a>(&'a self, class: &'a ClassId) -> impl Iterator<Item = &'a TypeId> + 'a {
        self.types
            .iter()
            .filter(move |(_, ty)| ty.has_class(class))
            .map(|(id, _)| id)
    }
}

impl FromIterator<(TypeId, BlockType)> for BlockCatalog {
    fn from_iter<I: IntoIterator<Item = (TypeId, BlockType)>>(iter: I) -> Self {
        Self {
            types: iter.into_iter().collect(),
        }
    }
}

impl TypeCatalog for BlockCatalog {
    /// Unknown types belong to no class.
    fn has_class(&self, type_id: &TypeId, class: &ClassId) -> bool {
        self.get(type_id).is_some_and(|ty| ty.has_class(class))
    }
}
