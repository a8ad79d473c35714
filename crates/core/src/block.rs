//! A single block held in an inventory or placed in the world.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Health, Orientation, TypeId};

/// One instance of a block type.
///
/// Blocks are values: the `with_*` methods return a modified copy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Block {
    id: Option<Uuid>,
    #[serde(rename = "type")]
    type_id: TypeId,
    #[serde(default)]
    health: Health,
    #[serde(default)]
    orientation: Orientation,
}

impl Block {
    /// A pristine, anonymous block of the given type.
    pub fn create(type_id: TypeId) -> Self {
        Self {
            id: None,
            type_id,
            health: Health::PRISTINE,
            orientation: Orientation::NORMAL,
        }
    }

    /// A pristine block with a freshly generated persistent identity.
    pub fn create_with_id(type_id: TypeId) -> Self {
        Self::create(type_id).with_id(Some(Uuid::new_v4()))
    }

    /// Persistent identity, if the block has one.
    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    /// Block type.
    pub fn type_id(&self) -> &TypeId {
        &self.type_id
    }

    /// Remaining health.
    pub fn health(&self) -> Health {
        self.health
    }

    /// Placement orientation.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Copy with a different identity.
    pub fn with_id(&self, id: Option<Uuid>) -> Self {
        Self { id, ..self.clone() }
    }

    /// Copy with a different health.
    pub fn with_health(&self, health: Health) -> Self {
        Self {
            health,
            ..self.clone()
        }
    }

    /// Copy with a different orientation.
    pub fn with_orientation(&self, orientation: Orientation) -> Self {
        Self {
            orientation,
            ..self.clone()
        }
    }

    /// Copy after taking a hit of `damage` against the type's `durability`.
    pub fn damage(&self, damage: f32, durability: f32) -> Self {
        self.with_health(self.health.damage_with(damage, durability))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Direction, Rotation};

    fn stone() -> TypeId {
        TypeId::parse("org/game/stone").unwrap()
    }

    #[test]
    fn with_methods_leave_original_untouched() {
        let block = Block::create(stone());
        let turned = block.with_orientation(Orientation::new(Direction::Left, Rotation::Half));
        assert_eq!(block.orientation(), Orientation::NORMAL);
        assert_eq!(turned.orientation().direction, Direction::Left);
        assert_eq!(turned.type_id(), block.type_id());
    }

    #[test]
    fn identity_is_part_of_equality() {
        let anonymous = Block::create(stone());
        let tracked = Block::create_with_id(stone());
        assert!(anonymous.id().is_none());
        assert!(tracked.id().is_some());
        assert_ne!(anonymous, tracked);
        assert_eq!(tracked.with_id(None), anonymous);
    }

    #[test]
    fn damage_reduces_health() {
        let block = Block::create(stone()).damage(1.0, 20.0);
        assert!(block.health().get() < Health::MAX);
        assert!(!block.health().is_destroyed());
    }
}
