//! Slot-based block containers.
//!
//! An [`Inventory`] is a fixed number of slots, each holding an optional
//! [`Stack`]. Inventories are values: every operation returns a new
//! inventory and leaves the receiver untouched. Running out of room or items
//! is a normal outcome and is reported by returning the input unchanged or
//! `None`, never by an error.

use blockcraft_core::{Block, TypeId};
use serde::{Deserialize, Serialize};

use crate::catalog::TypeCatalog;
use crate::pattern::{Pattern, PatternTemplate};
use crate::stack::{Accepted, Stack, MAX_STACK_SIZE};

/// Rectangular geometry laid over an inventory's slots (row-major).
///
/// Inventories have no geometry of their own; whoever displays one supplies
/// the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InventoryView {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub columns: usize,
}

impl InventoryView {
    /// A view of `rows` by `columns` slots.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self { rows, columns }
    }

    /// Number of slots covered by the view.
    ///
    /// Saturates at `usize::MAX`, which no inventory can match.
    pub fn size(self) -> usize {
        self.rows.saturating_mul(self.columns)
    }

    fn index(self, row: usize, column: usize) -> usize {
        row * self.columns + column
    }
}

/// Half-open bounding box of the occupied slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    first_row: usize,
    last_row: usize,
    first_column: usize,
    last_column: usize,
}

impl Frame {
    fn rows(self) -> usize {
        self.last_row - self.first_row
    }

    fn columns(self) -> usize {
        self.last_column - self.first_column
    }

    /// Slot indices covered by the frame, row-major.
    fn slots(self, view: InventoryView) -> impl Iterator<Item = usize> {
        (self.first_row..self.last_row).flat_map(move |row| {
            (self.first_column..self.last_column).map(move |column| view.index(row, column))
        })
    }
}

/// A fixed-length array of optional stacks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    slots: Vec<Option<Stack>>,
}

impl Inventory {
    /// Wrap existing slots.
    pub fn new(slots: Vec<Option<Stack>>) -> Self {
        Self { slots }
    }

    /// An inventory of `size` empty slots.
    pub fn empty(size: usize) -> Self {
        Self {
            slots: vec![None; size],
        }
    }

    /// An empty inventory sized to fit `view`.
    pub fn empty_grid(view: InventoryView) -> Self {
        Self::empty(view.size())
    }

    /// All slots in index order.
    pub fn slots(&self) -> &[Option<Stack>] {
        &self.slots
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True if every slot is empty.
    ///
    /// This is about contents, not slots: an inventory with a nonzero
    /// [`Inventory::len`] can still be empty.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Stack in `slot`.
    ///
    /// # Panics
    /// If `slot` is out of range.
    pub fn get(&self, slot: usize) -> Option<&Stack> {
        self.slots[slot].as_ref()
    }

    /// Copy with `slot` replaced by `stack`.
    ///
    /// # Panics
    /// If `slot` is out of range.
    pub fn with_slot(&self, slot: usize, stack: Option<Stack>) -> Self {
        let mut slots = self.slots.clone();
        slots[slot] = stack;
        Self { slots }
    }

    /// Copy with `slot` emptied.
    pub fn without_slot(&self, slot: usize) -> Self {
        self.with_slot(slot, None)
    }

    /// First block of the stack in `slot`.
    pub fn stack_head(&self, slot: usize) -> Option<&Block> {
        self.get(slot).map(Stack::head)
    }

    /// Copy with the head of the stack in `slot` removed.
    pub fn stack_tail(&self, slot: usize) -> Self {
        match self.get(slot) {
            Some(stack) => self.with_slot(slot, stack.tail()),
            None => self.clone(),
        }
    }

    /// Copy with the contents of two slots exchanged.
    pub fn swap_slot(&self, a: usize, b: usize) -> Self {
        let mut slots = self.slots.clone();
        slots.swap(a, b);
        Self { slots }
    }

    /// Total number of blocks of `type_id` across all slots.
    pub fn count(&self, type_id: &TypeId) -> usize {
        self.slots
            .iter()
            .flatten()
            .filter(|stack| stack.type_id() == type_id)
            .map(Stack::size)
            .sum()
    }

    /// True if [`Inventory::accept`] would place `block`.
    pub fn can_accept(&self, block: &Block) -> bool {
        self.slots
            .iter()
            .any(|slot| slot.as_ref().map_or(true, |stack| stack.can_accept(block)))
    }

    /// Place one block: first on a stack that takes it, else in the first empty slot.
    ///
    /// Returns an unchanged copy when there is no room.
    pub fn accept(&self, block: Block) -> Self {
        let target = self
            .slots
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|stack| stack.can_accept(&block)));
        if let Some(slot) = target {
            let merged = self.slots[slot]
                .as_ref()
                .and_then(|stack| stack.accept(block));
            return self.with_slot(slot, merged);
        }
        match self.slots.iter().position(Option::is_none) {
            Some(slot) => self.with_slot(slot, Some(Stack::from_block(block))),
            None => self.clone(),
        }
    }

    /// True if [`Inventory::accept_part_of`] would absorb at least one block.
    pub fn can_accept_part_of(&self, stack: &Stack) -> bool {
        self.slots.iter().any(|slot| {
            slot.as_ref()
                .map_or(true, |existing| existing.can_accept_part_of(stack))
        })
    }

    /// Distribute `stack` over the inventory.
    ///
    /// Existing stacks of the same type are topped up in slot order; whatever
    /// remains goes whole into the first empty slot. The leftover is `None`
    /// when everything was absorbed, and the full input when nothing was.
    pub fn accept_part_of(&self, stack: &Stack) -> Accepted<Inventory> {
        let mut slots = self.slots.clone();
        let mut left = Some(stack.clone());
        for slot in slots.iter_mut() {
            let Some(giving) = left.as_ref() else {
                break;
            };
            if let Some(merged) = slot
                .as_ref()
                .and_then(|existing| existing.accept_part_of(giving))
            {
                *slot = Some(merged.accepting);
                left = merged.leftover;
            }
        }
        if let Some(rest) = left.take() {
            match slots.iter_mut().find(|slot| slot.is_none()) {
                Some(empty) => *empty = Some(rest),
                None => left = Some(rest),
            }
        }
        Accepted {
            accepting: Self { slots },
            leftover: left,
        }
    }

    /// Remove exactly `amount` blocks of `type_id`, taking from slots in order.
    ///
    /// All or nothing: if fewer than `amount` blocks are held, an unchanged
    /// copy is returned.
    pub fn drop(&self, type_id: &TypeId, amount: usize) -> Self {
        if amount == 0 || self.count(type_id) < amount {
            return self.clone();
        }
        let mut slots = self.slots.clone();
        let mut remaining = amount;
        for slot in slots.iter_mut() {
            if remaining == 0 {
                break;
            }
            let Some(stack) = slot.as_ref().filter(|stack| stack.type_id() == type_id) else {
                continue;
            };
            let removed = remaining.min(stack.size());
            *slot = stack.drop(removed);
            remaining -= removed;
        }
        Self { slots }
    }

    /// Assemble a stack of exactly `amount` blocks of `type_id` from the slots,
    /// in slot order, without removing anything.
    ///
    /// `None` if the inventory holds fewer than `amount`, or if `amount` is 0
    /// or larger than one stack can hold. Pair with [`Inventory::drop`] to
    /// actually remove the blocks.
    pub fn take(&self, type_id: &TypeId, amount: usize) -> Option<Stack> {
        if amount == 0 || amount > MAX_STACK_SIZE {
            return None;
        }
        let mut taken: Option<Stack> = None;
        for stack in self.slots.iter().flatten() {
            if stack.type_id() != type_id {
                continue;
            }
            let needed = amount - taken.as_ref().map_or(0, Stack::size);
            let part = stack.take(needed)?;
            taken = Some(match taken {
                None => part,
                Some(acc) => acc.accept_part_of(&part)?.accepting,
            });
            if taken.as_ref().map_or(0, Stack::size) == amount {
                return taken;
            }
        }
        None
    }

    fn row_is_empty(&self, row: usize, view: InventoryView) -> bool {
        (0..view.columns).all(|column| self.slots[view.index(row, column)].is_none())
    }

    fn column_is_empty(&self, column: usize, view: InventoryView) -> bool {
        (0..view.rows).all(|row| self.slots[view.index(row, column)].is_none())
    }

    /// Bounding box of occupied slots; `None` when the inventory is empty.
    fn frame(&self, view: InventoryView) -> Option<Frame> {
        assert_eq!(
            view.size(),
            self.len(),
            "{}x{} view does not cover an inventory of {} slots",
            view.rows,
            view.columns,
            self.len()
        );
        if self.is_empty() {
            return None;
        }
        let rows: Vec<usize> = (0..view.rows)
            .filter(|&row| !self.row_is_empty(row, view))
            .collect();
        let columns: Vec<usize> = (0..view.columns)
            .filter(|&column| !self.column_is_empty(column, view))
            .collect();
        Some(Frame {
            first_row: *rows.first()?,
            last_row: *rows.last()? + 1,
            first_column: *columns.first()?,
            last_column: *columns.last()? + 1,
        })
    }

    /// Trim the inventory, seen through `view`, to the minimal pattern holding
    /// every occupied slot. `None` when the inventory is empty.
    ///
    /// # Panics
    /// If `view` does not cover exactly this inventory's slots.
    pub fn pattern(&self, view: InventoryView) -> Option<Pattern> {
        let frame = self.frame(view)?;
        let cells = frame.slots(view).map(|slot| self.slots[slot].clone()).collect();
        Pattern::new(cells, frame.rows(), frame.columns()).ok()
    }

    /// Consume `template` `number` times, slot by slot.
    ///
    /// Slot `i` is compared with template cell `i` (cells past the end of the
    /// template count as empty). Both empty is fine; an empty slot against a
    /// required cell, or a stack that does not contain its cell `number`
    /// times, aborts with `None`. On success every matched slot loses
    /// `cell.size * number` blocks.
    ///
    /// # Panics
    /// If `number` is 0.
    pub fn remove<C>(&self, template: &PatternTemplate, catalog: &C, number: usize) -> Option<Self>
    where
        C: TypeCatalog + ?Sized,
    {
        assert!(number > 0, "a template must be removed at least once");
        if template.size() > self.len() {
            return None;
        }
        let mut slots = Vec::with_capacity(self.len());
        for (index, slot) in self.slots.iter().enumerate() {
            let cell = template.cell(index);
            match (slot, cell) {
                (None, None) => slots.push(None),
                (None, Some(_)) => return None,
                (Some(stack), cell) => {
                    let cell = cell.filter(|cell| stack.contains(Some(*cell), catalog) >= number)?;
                    slots.push(stack.drop(cell.size() * number));
                }
            }
        }
        Some(Self { slots })
    }

    /// Consume `template` `number` times from the occupied region seen through
    /// `view`, wherever in the grid that region sits.
    ///
    /// `None` unless the trimmed pattern matches `template` at least `number`
    /// times.
    pub fn consume<C>(
        &self,
        view: InventoryView,
        template: &PatternTemplate,
        catalog: &C,
        number: usize,
    ) -> Option<Self>
    where
        C: TypeCatalog + ?Sized,
    {
        assert!(number > 0, "a template must be consumed at least once");
        let frame = self.frame(view)?;
        let pattern = Pattern::new(
            frame.slots(view).map(|slot| self.slots[slot].clone()).collect(),
            frame.rows(),
            frame.columns(),
        )
        .ok()?;
        if pattern.count(template, catalog) < number {
            return None;
        }
        let mut slots = self.slots.clone();
        for (slot, cell) in frame.slots(view).zip(template.cells()) {
            if let (Some(stack), Some(cell)) = (&self.slots[slot], cell) {
                slots[slot] = stack.drop(cell.size() * number);
            }
        }
        Some(Self { slots })
    }
}
