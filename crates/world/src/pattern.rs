//! Rectangular grids of stacks and the recipe templates they are matched against.
//!
//! A [`Pattern`] is the trimmed, canonical form of an inventory's occupied
//! region (see [`crate::Inventory::pattern`]). A [`PatternTemplate`] describes
//! a recipe: each cell asks for a quantity of an exact type or of any type in
//! a class.

use blockcraft_core::{TypeId, TypeOrClassId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::TypeCatalog;
use crate::stack::Stack;

/// Errors raised when constructing patterns and templates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// Cell count disagrees with the declared geometry.
    #[error("grid of {rows}x{columns} does not fit {cells} cells")]
    CellCount {
        /// Declared rows.
        rows: usize,
        /// Declared columns.
        columns: usize,
        /// Cells supplied.
        cells: usize,
    },
    /// A stack template must ask for at least one block.
    #[error("stack template for {0} must have a size of at least 1")]
    ZeroSize(TypeOrClassId),
}

fn check_cells(rows: usize, columns: usize, cells: usize) -> Result<(), PatternError> {
    if rows.checked_mul(columns) != Some(cells) {
        return Err(PatternError::CellCount {
            rows,
            columns,
            cells,
        });
    }
    Ok(())
}

/// A required quantity of one type or class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawStackTemplate")]
pub struct StackTemplate {
    id: TypeOrClassId,
    size: usize,
}

#[derive(Deserialize)]
struct RawStackTemplate {
    id: TypeOrClassId,
    size: usize,
}

impl TryFrom<RawStackTemplate> for StackTemplate {
    type Error = PatternError;

    fn try_from(raw: RawStackTemplate) -> Result<Self, Self::Error> {
        Self::new(raw.id, raw.size)
    }
}

impl StackTemplate {
    /// Build a template; `size` must be at least 1.
    pub fn new(id: TypeOrClassId, size: usize) -> Result<Self, PatternError> {
        if size == 0 {
            return Err(PatternError::ZeroSize(id));
        }
        Ok(Self { id, size })
    }

    /// Type or class required.
    pub fn id(&self) -> &TypeOrClassId {
        &self.id
    }

    /// Blocks required per repetition.
    pub fn size(&self) -> usize {
        self.size
    }

    /// True if a block of `type_id` satisfies this template's identifier.
    pub fn matches<C>(&self, type_id: &TypeId, catalog: &C) -> bool
    where
        C: TypeCatalog + ?Sized,
    {
        match &self.id {
            TypeOrClassId::Type(id) => id == type_id,
            TypeOrClassId::Class(class) => catalog.has_class(type_id, class),
        }
    }
}

/// A recipe: a row-major grid of optional stack templates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPatternTemplate")]
pub struct PatternTemplate {
    cells: Vec<Option<StackTemplate>>,
    rows: usize,
    columns: usize,
}

#[derive(Deserialize)]
struct RawPatternTemplate {
    cells: Vec<Option<StackTemplate>>,
    rows: usize,
    columns: usize,
}

impl TryFrom<RawPatternTemplate> for PatternTemplate {
    type Error = PatternError;

    fn try_from(raw: RawPatternTemplate) -> Result<Self, Self::Error> {
        Self::new(raw.cells, raw.rows, raw.columns)
    }
}

impl PatternTemplate {
    /// Build a template; `cells.len()` must equal `rows * columns`.
    pub fn new(
        cells: Vec<Option<StackTemplate>>,
        rows: usize,
        columns: usize,
    ) -> Result<Self, PatternError> {
        check_cells(rows, columns, cells.len())?;
        Ok(Self {
            cells,
            rows,
            columns,
        })
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> &[Option<StackTemplate>] {
        &self.cells
    }

    /// Cell at a flat index, `None` past the end.
    pub fn cell(&self, index: usize) -> Option<&StackTemplate> {
        self.cells.get(index).and_then(Option::as_ref)
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// `rows * columns`.
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Total blocks required by one repetition; callers prefer higher values
    /// when several templates match the same pattern.
    pub fn complexity(&self) -> usize {
        self.cells.iter().flatten().map(StackTemplate::size).sum()
    }
}

/// The trimmed, row-major grid of stacks taken from an inventory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Pattern {
    cells: Vec<Option<Stack>>,
    rows: usize,
    columns: usize,
}

impl Pattern {
    /// Build a pattern; `cells.len()` must equal `rows * columns`.
    pub fn new(cells: Vec<Option<Stack>>, rows: usize, columns: usize) -> Result<Self, PatternError> {
        check_cells(rows, columns, cells.len())?;
        Ok(Self {
            cells,
            rows,
            columns,
        })
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> &[Option<Stack>] {
        &self.cells
    }

    /// Cell at `(row, column)`.
    pub fn get(&self, row: usize, column: usize) -> Option<&Stack> {
        assert!(
            row < self.rows && column < self.columns,
            "cell ({row}, {column}) outside {}x{} pattern",
            self.rows,
            self.columns
        );
        self.cells[row * self.columns + column].as_ref()
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// `rows * columns`.
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// How many times `template` can be crafted from this pattern.
    ///
    /// Geometry must be identical. Every cell must then agree: both empty,
    /// or a stack that contains its template cell. The result is the
    /// smallest per-cell repetition count, so 0 means no match.
    pub fn count<C>(&self, template: &PatternTemplate, catalog: &C) -> usize
    where
        C: TypeCatalog + ?Sized,
    {
        if template.rows() != self.rows
            || template.columns() != self.columns
            || template.size() != self.size()
        {
            return 0;
        }
        let mut repetitions = usize::MAX;
        for (cell, other) in self.cells.iter().zip(template.cells()) {
            match (cell, other) {
                (None, None) => continue,
                (None, Some(_)) | (Some(_), None) => return 0,
                (Some(stack), Some(other)) => {
                    repetitions = repetitions.min(stack.contains(Some(other), catalog));
                    if repetitions == 0 {
                        return 0;
                    }
                }
            }
        }
        // A template of only empty cells never matches a non-empty pattern.
        if repetitions == usize::MAX {
            0
        } else {
            repetitions
        }
    }

    /// True if `template` can be crafted at least once from this pattern.
    pub fn contains<C>(&self, template: &PatternTemplate, catalog: &C) -> bool
    where
        C: TypeCatalog + ?Sized,
    {
        self.count(template, catalog) >= 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BlockCatalog, BlockType};
    use blockcraft_core::ClassId;

    fn stack(s: &str, n: usize) -> Option<Stack> {
        Some(Stack::of_size(&TypeId::parse(s).unwrap(), n).unwrap())
    }

    fn cell(s: &str, n: usize) -> Option<StackTemplate> {
        Some(StackTemplate::new(TypeOrClassId::parse(s).unwrap(), n).unwrap())
    }

    fn catalog(coal_is_fuel: bool) -> BlockCatalog {
        let classes = if coal_is_fuel {
            vec![ClassId::parse("org/game/Fuel").unwrap()]
        } else {
            vec![]
        };
        let mut catalog = BlockCatalog::new();
        catalog.insert(
            TypeId::parse("org/game/coal").unwrap(),
            BlockType::with_classes(classes),
        );
        catalog
    }

    #[test]
    fn class_cells_follow_the_catalog() {
        let template =
            PatternTemplate::new(vec![cell("org/game/wood", 1), cell("org/game/Fuel", 1)], 1, 2)
                .unwrap();
        let pattern = Pattern::new(vec![stack("org/game/wood", 1), stack("org/game/coal", 1)], 1, 2)
            .unwrap();

        assert!(pattern.contains(&template, &catalog(true)));
        assert!(!pattern.contains(&template, &catalog(false)));
    }

    #[test]
    fn geometry_must_agree() {
        let template = PatternTemplate::new(vec![cell("org/game/wood", 1), None], 2, 1).unwrap();
        let pattern = Pattern::new(vec![stack("org/game/wood", 1), None], 1, 2).unwrap();
        assert!(!pattern.contains(&template, &catalog(true)));
    }

    #[test]
    fn empty_cells_must_line_up() {
        let template =
            PatternTemplate::new(vec![cell("org/game/wood", 1), None], 1, 2).unwrap();
        let extra = Pattern::new(vec![stack("org/game/wood", 1), stack("org/game/wood", 1)], 1, 2)
            .unwrap();
        let exact = Pattern::new(vec![stack("org/game/wood", 1), None], 1, 2).unwrap();
        assert!(!extra.contains(&template, &catalog(true)));
        assert!(exact.contains(&template, &catalog(true)));
    }

    #[test]
    fn count_is_the_smallest_cell_multiplier() {
        let template =
            PatternTemplate::new(vec![cell("org/game/wood", 2), cell("org/game/Fuel", 1)], 1, 2)
                .unwrap();
        let pattern = Pattern::new(vec![stack("org/game/wood", 7), stack("org/game/coal", 5)], 1, 2)
            .unwrap();
        assert_eq!(pattern.count(&template, &catalog(true)), 3);

        let short = Pattern::new(vec![stack("org/game/wood", 1), stack("org/game/coal", 5)], 1, 2)
            .unwrap();
        assert_eq!(short.count(&template, &catalog(true)), 0);
    }

    #[test]
    fn complexity_sums_cell_sizes() {
        let template = PatternTemplate::new(
            vec![cell("org/game/wood", 2), None, cell("org/game/Fuel", 3), None],
            2,
            2,
        )
        .unwrap();
        assert_eq!(template.complexity(), 5);
        assert_eq!(template.size(), 4);
    }

    #[test]
    fn construction_checks_geometry() {
        assert_eq!(
            PatternTemplate::new(vec![None], 2, 2),
            Err(PatternError::CellCount {
                rows: 2,
                columns: 2,
                cells: 1
            })
        );
        assert!(Pattern::new(vec![None, None], 1, 2).is_ok());
        assert!(StackTemplate::new(TypeOrClassId::parse("org/game/wood").unwrap(), 0).is_err());
    }

    #[test]
    fn templates_deserialize_with_validation() {
        let json = r#"{
            "rows": 1,
            "columns": 2,
            "cells": [{ "id": "org/game/wood", "size": 1 }, { "id": "org/game/Fuel", "size": 1 }]
        }"#;
        let template: PatternTemplate = serde_json::from_str(json).unwrap();
        assert_eq!(template.complexity(), 2);

        let bad = r#"{ "rows": 2, "columns": 2, "cells": [null] }"#;
        assert!(serde_json::from_str::<PatternTemplate>(bad).is_err());

        // Geometry whose product overflows is rejected, not wrapped.
        let huge = format!(
            r#"{{ "rows": {}, "columns": 4, "cells": [] }}"#,
            usize::MAX / 2
        );
        assert!(serde_json::from_str::<PatternTemplate>(&huge).is_err());
        let wraps_to_zero = PatternTemplate::new(vec![], 1 << (usize::BITS - 1), 2);
        assert_eq!(
            wraps_to_zero,
            Err(PatternError::CellCount {
                rows: 1 << (usize::BITS - 1),
                columns: 2,
                cells: 0
            })
        );
    }
}
