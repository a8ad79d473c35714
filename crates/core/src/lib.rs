#![warn(missing_docs)]
//! Core value types shared across the workspace: identifiers, health,
//! orientation and the block item itself.

pub mod block;
pub mod health;
pub mod ids;
pub mod orientation;

pub use block::Block;
pub use health::{Health, HealthError};
pub use ids::{is_class_name, ClassId, IdError, InventoryId, TypeId, TypeOrClassId};
pub use orientation::{Direction, Orientation, OrientationError, Rotation};
