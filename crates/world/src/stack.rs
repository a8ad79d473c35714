//! Bounded, homogeneous runs of blocks.
//!
//! A [`Stack`] always holds between 1 and [`MAX_STACK_SIZE`] blocks of a
//! single type. "No stack" is `None`, never an empty stack, so every
//! operation that could empty a stack returns `Option<Stack>`.

use blockcraft_core::{Block, TypeId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::TypeCatalog;
use crate::pattern::StackTemplate;

/// Maximum number of blocks in one stack.
pub const MAX_STACK_SIZE: usize = 64;

/// Errors raised when constructing an invalid stack.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StackError {
    /// A stack must contain at least one block.
    #[error("a stack must contain at least one block")]
    Empty,
    /// More blocks than a stack can hold.
    #[error("a stack holds at most {max} blocks, got {0}", max = MAX_STACK_SIZE)]
    TooLarge(usize),
    /// Blocks of different types.
    #[error("all blocks in a stack must be of type {expected}, found {found}")]
    MixedTypes {
        /// Type of the first block.
        expected: TypeId,
        /// First block of another type.
        found: TypeId,
    },
}

/// How much of a stack to move in a single interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StackAmount {
    /// The whole stack.
    All,
    /// Half the stack, rounded down, but at least one block.
    Half,
    /// A single block.
    One,
}

impl StackAmount {
    /// Number of blocks this amount selects from a stack of `size`.
    pub fn of(self, size: usize) -> usize {
        match self {
            StackAmount::All => size,
            StackAmount::Half => (size / 2).max(1),
            StackAmount::One => 1,
        }
    }
}

/// Outcome of merging something into a receiver.
///
/// `leftover` is `None` when everything was absorbed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accepted<T> {
    /// The receiver after the merge.
    pub accepting: T,
    /// What could not be absorbed.
    pub leftover: Option<Stack>,
}

/// A non-empty run of at most 64 blocks sharing one type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Block>", into = "Vec<Block>")]
pub struct Stack {
    blocks: Vec<Block>,
}

impl Stack {
    /// Build a stack, validating size and homogeneity.
    pub fn new(blocks: Vec<Block>) -> Result<Self, StackError> {
        let first = blocks.first().ok_or(StackError::Empty)?;
        if blocks.len() > MAX_STACK_SIZE {
            return Err(StackError::TooLarge(blocks.len()));
        }
        if let Some(other) = blocks.iter().find(|b| b.type_id() != first.type_id()) {
            return Err(StackError::MixedTypes {
                expected: first.type_id().clone(),
                found: other.type_id().clone(),
            });
        }
        Ok(Self { blocks })
    }

    /// A stack holding exactly one block.
    pub fn from_block(block: Block) -> Self {
        Self {
            blocks: vec![block],
        }
    }

    /// A stack of `size` pristine anonymous blocks of `type_id`.
    pub fn of_size(type_id: &TypeId, size: usize) -> Result<Self, StackError> {
        Self::new(vec![Block::create(type_id.clone()); size])
    }

    /// Callers guarantee the invariants (non-empty slice of a valid stack).
    fn from_slice(blocks: &[Block]) -> Option<Self> {
        if blocks.is_empty() {
            None
        } else {
            Some(Self {
                blocks: blocks.to_vec(),
            })
        }
    }

    /// All blocks, head first.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Type shared by every block in the stack.
    pub fn type_id(&self) -> &TypeId {
        self.blocks[0].type_id()
    }

    /// Number of blocks.
    pub fn size(&self) -> usize {
        self.blocks.len()
    }

    /// How many more blocks fit.
    pub fn room_left(&self) -> usize {
        MAX_STACK_SIZE - self.size()
    }

    /// True when no more blocks fit.
    pub fn is_full(&self) -> bool {
        self.size() == MAX_STACK_SIZE
    }

    /// First block.
    pub fn head(&self) -> &Block {
        &self.blocks[0]
    }

    /// Everything but the head, or `None` if the head was the only block.
    pub fn tail(&self) -> Option<Stack> {
        self.drop(1)
    }

    /// Copy with the head swapped for `block`, which must share the stack's type.
    pub fn replace_head(&self, block: Block) -> Result<Stack, StackError> {
        if block.type_id() != self.type_id() {
            return Err(StackError::MixedTypes {
                expected: self.type_id().clone(),
                found: block.type_id().clone(),
            });
        }
        let mut blocks = self.blocks.clone();
        blocks[0] = block;
        Ok(Self { blocks })
    }

    /// The first `min(n, size)` blocks, or `None` when `n == 0`.
    pub fn take(&self, n: usize) -> Option<Stack> {
        Self::from_slice(&self.blocks[..n.min(self.size())])
    }

    /// [`Stack::take`] with the count chosen by `amount`.
    pub fn take_amount(&self, amount: StackAmount) -> Option<Stack> {
        self.take(amount.of(self.size()))
    }

    /// What remains after removing the first `n` blocks, or `None` if nothing does.
    pub fn drop(&self, n: usize) -> Option<Stack> {
        if n >= self.size() {
            return None;
        }
        Self::from_slice(&self.blocks[n..])
    }

    /// [`Stack::drop`] with the count chosen by `amount`.
    pub fn drop_amount(&self, amount: StackAmount) -> Option<Stack> {
        self.drop(amount.of(self.size()))
    }

    /// True if `block` is of this stack's type and there is room for it.
    pub fn can_accept(&self, block: &Block) -> bool {
        block.type_id() == self.type_id() && !self.is_full()
    }

    /// True if at least part of `other` could be merged into this stack.
    pub fn can_accept_part_of(&self, other: &Stack) -> bool {
        other.type_id() == self.type_id() && !self.is_full()
    }

    /// Append one block, or `None` if [`Stack::can_accept`] is false.
    pub fn accept(&self, block: Block) -> Option<Stack> {
        if !self.can_accept(&block) {
            return None;
        }
        let mut blocks = self.blocks.clone();
        blocks.push(block);
        Some(Self { blocks })
    }

    /// Move as much of `other` into this stack as fits.
    ///
    /// Returns `None` if [`Stack::can_accept_part_of`] is false. Otherwise the
    /// merged stack is the receiver followed by the head of `other`, and the
    /// leftover is whatever of `other` did not fit.
    pub fn accept_part_of(&self, other: &Stack) -> Option<Accepted<Stack>> {
        if !self.can_accept_part_of(other) {
            return None;
        }
        let room = self.room_left();
        let moved = room.min(other.size());
        let mut blocks = Vec::with_capacity(self.size() + moved);
        blocks.extend_from_slice(&self.blocks);
        blocks.extend_from_slice(&other.blocks[..moved]);
        Some(Accepted {
            accepting: Self { blocks },
            leftover: other.drop(room),
        })
    }

    /// Number of times `template` fits in this stack.
    ///
    /// The stack's type must equal the template's type, or belong to the
    /// template's class according to `catalog`. An absent template fits zero
    /// times.
    pub fn contains<C>(&self, template: Option<&StackTemplate>, catalog: &C) -> usize
    where
        C: TypeCatalog + ?Sized,
    {
        let Some(template) = template else {
            return 0;
        };
        if template.matches(self.type_id(), catalog) {
            self.size() / template.size()
        } else {
            0
        }
    }
}

impl TryFrom<Vec<Block>> for Stack {
    type Error = StackError;

    fn try_from(blocks: Vec<Block>) -> Result<Self, Self::Error> {
        Self::new(blocks)
    }
}

impl From<Stack> for Vec<Block> {
    fn from(stack: Stack) -> Self {
        stack.blocks
    }
}
