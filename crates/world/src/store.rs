//! Owner of the current inventory values of every container.
//!
//! Inventories are immutable values, so somebody has to hold the canonical
//! copy and serialize read-modify-write cycles against it. [`InventoryStore`]
//! is that owner: every mutation goes through `&mut self`, so two updates to
//! the same inventory can never be computed from the same stale snapshot.
//! Each method mirrors one inventory request a server component can send.

use std::collections::HashMap;

use blockcraft_core::{InventoryId, TypeId};
use thiserror::Error;
use tracing::{debug, trace};
use uuid::Uuid;

use crate::inventory::Inventory;
use crate::stack::{Stack, StackAmount};

/// Key of one inventory: the container (block or player) and the inventory's name.
pub type InventoryKey = (Uuid, InventoryId);

/// Errors for requests that address something that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No inventory under that key.
    #[error("container {0} has no inventory {1}")]
    UnknownInventory(Uuid, InventoryId),
    /// Slot index past the end of the inventory.
    #[error("slot {slot} is outside inventory {inventory} of {len} slots")]
    SlotOutOfRange {
        /// Inventory addressed.
        inventory: InventoryId,
        /// Requested slot.
        slot: usize,
        /// Number of slots.
        len: usize,
    },
}

/// Single-writer registry of inventories.
#[derive(Debug, Clone, Default)]
pub struct InventoryStore {
    inventories: HashMap<InventoryKey, Inventory>,
}

impl InventoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `inventory` for a container, replacing any previous one.
    pub fn create(&mut self, container: Uuid, id: InventoryId, inventory: Inventory) {
        debug!(%container, inventory = %id, slots = inventory.len(), "created inventory");
        self.inventories.insert((container, id), inventory);
    }

    /// Remove every inventory of a container, returning how many there were.
    pub fn delete(&mut self, container: Uuid) -> usize {
        let before = self.inventories.len();
        self.inventories.retain(|(owner, _), _| *owner != container);
        let removed = before - self.inventories.len();
        debug!(%container, removed, "deleted inventories");
        removed
    }

    /// Current value of an inventory.
    pub fn get(&self, container: Uuid, id: &InventoryId) -> Option<&Inventory> {
        self.inventories.get(&(container, id.clone()))
    }

    /// Number of inventories held.
    pub fn len(&self) -> usize {
        self.inventories.len()
    }

    /// True if no inventories are held.
    pub fn is_empty(&self) -> bool {
        self.inventories.is_empty()
    }

    fn entry(&mut self, container: Uuid, id: &InventoryId) -> Result<&mut Inventory, StoreError> {
        self.inventories
            .get_mut(&(container, id.clone()))
            .ok_or_else(|| StoreError::UnknownInventory(container, id.clone()))
    }

    fn check_slot(inventory: &Inventory, id: &InventoryId, slot: usize) -> Result<(), StoreError> {
        if slot >= inventory.len() {
            return Err(StoreError::SlotOutOfRange {
                inventory: id.clone(),
                slot,
                len: inventory.len(),
            });
        }
        Ok(())
    }

    /// Distribute `stack` into an inventory, returning what did not fit.
    pub fn add(
        &mut self,
        container: Uuid,
        id: &InventoryId,
        stack: &Stack,
    ) -> Result<Option<Stack>, StoreError> {
        let inventory = self.entry(container, id)?;
        let result = inventory.accept_part_of(stack);
        *inventory = result.accepting;
        trace!(
            %container,
            inventory = %id,
            offered = stack.size(),
            leftover = result.leftover.as_ref().map_or(0, Stack::size),
            "added stack"
        );
        Ok(result.leftover)
    }

    /// Remove exactly `amount` blocks of `type_id`, returning them as a stack.
    ///
    /// `Ok(None)` leaves the inventory untouched when fewer are held.
    pub fn remove(
        &mut self,
        container: Uuid,
        id: &InventoryId,
        type_id: &TypeId,
        amount: usize,
    ) -> Result<Option<Stack>, StoreError> {
        let inventory = self.entry(container, id)?;
        let Some(taken) = inventory.take(type_id, amount) else {
            return Ok(None);
        };
        *inventory = inventory.drop(type_id, amount);
        trace!(%container, inventory = %id, %type_id, amount, "removed blocks");
        Ok(Some(taken))
    }

    /// Put `stack` into a slot, returning what the caller gets back.
    ///
    /// An empty slot takes the stack. A stack of the same type absorbs as much
    /// as fits and the rest is returned. A stack of another type is swapped
    /// out and returned.
    pub fn put_stack(
        &mut self,
        container: Uuid,
        id: &InventoryId,
        slot: usize,
        stack: Stack,
    ) -> Result<Option<Stack>, StoreError> {
        let inventory = self.entry(container, id)?;
        Self::check_slot(inventory, id, slot)?;
        let (placed, returned) = match inventory.get(slot) {
            None => (stack, None),
            Some(existing) if existing.type_id() == stack.type_id() => {
                match existing.accept_part_of(&stack) {
                    Some(merged) => (merged.accepting, merged.leftover),
                    None => (existing.clone(), Some(stack)),
                }
            }
            Some(existing) => {
                let previous = existing.clone();
                (stack, Some(previous))
            }
        };
        *inventory = inventory.with_slot(slot, Some(placed));
        trace!(%container, inventory = %id, slot, "put stack into slot");
        Ok(returned)
    }

    /// Take `amount` of the stack in a slot out of the inventory.
    pub fn remove_stack(
        &mut self,
        container: Uuid,
        id: &InventoryId,
        slot: usize,
        amount: StackAmount,
    ) -> Result<Option<Stack>, StoreError> {
        let inventory = self.entry(container, id)?;
        Self::check_slot(inventory, id, slot)?;
        let Some(existing) = inventory.get(slot) else {
            return Ok(None);
        };
        let taken = existing.take_amount(amount);
        let rest = existing.drop_amount(amount);
        *inventory = inventory.with_slot(slot, rest);
        trace!(%container, inventory = %id, slot, ?amount, "removed stack from slot");
        Ok(taken)
    }

    /// Move up to `amount` blocks of `type_id` from one inventory to another.
    ///
    /// Only what the destination accepts leaves the source. Returns the number
    /// of blocks moved; 0 when the source holds fewer than `amount`.
    pub fn transfer(
        &mut self,
        from: (Uuid, &InventoryId),
        to: (Uuid, &InventoryId),
        type_id: &TypeId,
        amount: usize,
    ) -> Result<usize, StoreError> {
        let source = self.entry(from.0, from.1)?.clone();
        let destination = self.entry(to.0, to.1)?.clone();
        let Some(taken) = source.take(type_id, amount) else {
            return Ok(0);
        };
        let result = destination.accept_part_of(&taken);
        let moved = taken.size() - result.leftover.as_ref().map_or(0, Stack::size);
        if moved == 0 {
            return Ok(0);
        }
        // Source and destination may be the same inventory.
        *self.entry(to.0, to.1)? = result.accepting;
        let source = self.entry(from.0, from.1)?;
        *source = source.drop(type_id, moved);
        debug!(
            from = %from.1,
            to = %to.1,
            %type_id,
            requested = amount,
            moved,
            "transferred blocks"
        );
        Ok(moved)
    }
}
