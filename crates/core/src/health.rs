//! Block health (damage level).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a health value is out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("health {0} is above the maximum of {max}", max = Health::MAX)]
pub struct HealthError(pub u16);

/// Remaining health of a block, from 0 (destroyed) to 2047 (pristine).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Health(u16);

impl Health {
    /// Highest representable health.
    pub const MAX: u16 = 2047;
    /// An undamaged block.
    pub const PRISTINE: Self = Self(Self::MAX);
    /// A block with no health left.
    pub const DESTROYED: Self = Self(0);

    /// Construct a health value, rejecting anything above [`Health::MAX`].
    pub fn new(health: u16) -> Result<Self, HealthError> {
        if health > Self::MAX {
            return Err(HealthError(health));
        }
        Ok(Self(health))
    }

    /// Convert a damage/durability ratio into health points.
    pub fn calculate_damage(damage: f32, durability: f32) -> u16 {
        let points = (damage / durability) * f32::from(Self::MAX);
        points.clamp(0.0, f32::from(Self::MAX)) as u16
    }

    /// Raw health value.
    pub fn get(self) -> u16 {
        self.0
    }

    /// True when no health is left.
    pub fn is_destroyed(self) -> bool {
        self.0 == 0
    }

    /// True when the block is undamaged.
    pub fn is_pristine(self) -> bool {
        self.0 == Self::MAX
    }

    /// Remove `damage` points, bottoming out at [`Health::DESTROYED`].
    pub fn damage(self, damage: u16) -> Self {
        Self(self.0.saturating_sub(damage))
    }

    /// Apply a hit of `damage` against a block of the given `durability`.
    pub fn damage_with(self, damage: f32, durability: f32) -> Self {
        self.damage(Self::calculate_damage(damage, durability))
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::PRISTINE
    }
}

impl TryFrom<u16> for Health {
    type Error = HealthError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Health> for u16 {
    fn from(health: Health) -> Self {
        health.0
    }
}
