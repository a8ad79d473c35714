#![warn(missing_docs)]
//! Stacks, inventories and pattern-based crafting.

mod catalog;
mod crafting;
mod inventory;
mod pattern;
mod stack;
mod store;

pub use catalog::*;
pub use crafting::*;
pub use inventory::*;
pub use pattern::*;
pub use stack::*;
pub use store::*;
