//! Placement orientation of a block.
//!
//! Only the encodings live here; the rotation math belongs to the geometry
//! layer that consumes them.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when decoding a direction or rotation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrientationError {
    /// Unknown integer encoding.
    #[error("no {kind} encoded by {encoding}")]
    Encoding {
        /// "direction" or "rotation".
        kind: &'static str,
        /// Offending value.
        encoding: u8,
    },
    /// Unknown string encoding.
    #[error("no {kind} named {name:?}")]
    Name {
        /// "direction" or "rotation".
        kind: &'static str,
        /// Offending value.
        name: String,
    },
}

/// One of the six axis-aligned directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// +Y
    Up = 0,
    /// -Y
    Down = 1,
    /// +X
    Right = 2,
    /// -X
    Left = 3,
    /// -Z
    Forward = 4,
    /// +Z
    Backward = 5,
}

impl Direction {
    /// All directions in encoding order.
    pub const ALL: [Direction; 6] = [
        Direction::Up,
        Direction::Down,
        Direction::Right,
        Direction::Left,
        Direction::Forward,
        Direction::Backward,
    ];

    /// Decode from the integer encoding.
    pub fn from_encoding(encoding: u8) -> Result<Self, OrientationError> {
        Self::ALL
            .get(encoding as usize)
            .copied()
            .ok_or(OrientationError::Encoding {
                kind: "direction",
                encoding,
            })
    }

    /// Decode from the string encoding.
    pub fn from_name(name: &str) -> Result<Self, OrientationError> {
        Self::ALL
            .into_iter()
            .find(|d| d.name() == name)
            .ok_or_else(|| OrientationError::Name {
                kind: "direction",
                name: name.to_string(),
            })
    }

    /// Pick a direction using the caller's RNG.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Integer encoding.
    pub fn encoding(self) -> u8 {
        self as u8
    }

    /// String encoding.
    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Right => "right",
            Direction::Left => "left",
            Direction::Forward => "forward",
            Direction::Backward => "backward",
        }
    }

    /// True for directions pointing along a positive axis.
    pub fn is_positive(self) -> bool {
        matches!(self, Direction::Up | Direction::Right | Direction::Backward)
    }

    /// The opposite direction.
    pub fn inverse(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Right,
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// Quarter-turn rotation around the facing direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    /// No rotation.
    Identity = 0,
    /// Quarter turn left.
    Left = 1,
    /// Quarter turn right.
    Right = 2,
    /// Half turn.
    Half = 3,
}

impl Rotation {
    /// All rotations in encoding order.
    pub const ALL: [Rotation; 4] = [
        Rotation::Identity,
        Rotation::Left,
        Rotation::Right,
        Rotation::Half,
    ];

    /// Decode from the integer encoding.
    pub fn from_encoding(encoding: u8) -> Result<Self, OrientationError> {
        Self::ALL
            .get(encoding as usize)
            .copied()
            .ok_or(OrientationError::Encoding {
                kind: "rotation",
                encoding,
            })
    }

    /// Integer encoding.
    pub fn encoding(self) -> u8 {
        self as u8
    }

    /// String encoding.
    pub fn name(self) -> &'static str {
        match self {
            Rotation::Identity => "identity",
            Rotation::Left => "left",
            Rotation::Right => "right",
            Rotation::Half => "half",
        }
    }

    /// The rotation that undoes this one.
    pub fn inverse(self) -> Self {
        match self {
            Rotation::Left => Rotation::Right,
            Rotation::Right => Rotation::Left,
            other => other,
        }
    }
}

/// Facing direction plus rotation of a placed block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Orientation {
    /// Direction the block's top faces.
    pub direction: Direction,
    /// Rotation around that direction.
    pub rotation: Rotation,
}

impl Orientation {
    /// Upright, unrotated.
    pub const NORMAL: Self = Self {
        direction: Direction::Up,
        rotation: Rotation::Identity,
    };

    /// Combine a direction and rotation.
    pub fn new(direction: Direction, rotation: Rotation) -> Self {
        Self {
            direction,
            rotation,
        }
    }

    /// Decode from the pair of integer encodings.
    pub fn from_encoding(direction: u8, rotation: u8) -> Result<Self, OrientationError> {
        Ok(Self::new(
            Direction::from_encoding(direction)?,
            Rotation::from_encoding(rotation)?,
        ))
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::NORMAL
    }
}
