//! Pattern-based crafting.
//!
//! A [`RecipeBook`] holds recipes keyed by a [`PatternTemplate`]. Crafting
//! trims an inventory to its canonical [`Pattern`], picks the most specific
//! matching recipe and consumes one repetition of it.

use blockcraft_core::TypeId;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace, warn};

use crate::catalog::TypeCatalog;
use crate::inventory::{Inventory, InventoryView};
use crate::pattern::{Pattern, PatternTemplate};
use crate::stack::{Stack, StackError};

/// A crafting recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique recipe identifier (e.g., "torch").
    pub name: String,
    /// Arrangement of inputs.
    pub template: PatternTemplate,
    /// Block type produced.
    pub output: TypeId,
    /// Blocks produced per repetition.
    pub output_count: usize,
}

impl Recipe {
    /// The stack produced by crafting this recipe once.
    pub fn output_stack(&self) -> Result<Stack, StackError> {
        Stack::of_size(&self.output, self.output_count)
    }

    /// Total blocks consumed per repetition.
    pub fn complexity(&self) -> usize {
        self.template.complexity()
    }
}

/// Result of a successful craft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crafted {
    /// Name of the recipe that was used.
    pub recipe: String,
    /// The inventory with the inputs removed.
    pub inventory: Inventory,
    /// What the recipe produced.
    pub output: Stack,
}

/// Ordered collection of recipes.
#[derive(Debug, Clone, Default)]
pub struct RecipeBook {
    recipes: Vec<Recipe>,
}

impl RecipeBook {
    /// Create an empty recipe book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a recipe; earlier recipes win ties on complexity.
    pub fn add_recipe(&mut self, recipe: Recipe) {
        self.recipes.push(recipe);
    }

    /// Look up a recipe by name.
    pub fn get(&self, name: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| recipe.name == name)
    }

    /// All recipes in registration order.
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Number of recipes.
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// True if there are no recipes.
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Every recipe `pattern` satisfies, most complex first.
    pub fn matches<'a, C>(&'a self, pattern: &Pattern, catalog: &C) -> Vec<&'a Recipe>
    where
        C: TypeCatalog + ?Sized,
    {
        let mut found: Vec<&Recipe> = self
            .recipes
            .iter()
            .filter(|recipe| pattern.contains(&recipe.template, catalog))
            .collect();
        // Stable sort keeps registration order among equals.
        found.sort_by(|a, b| b.complexity().cmp(&a.complexity()));
        trace!(matches = found.len(), "matched recipes against pattern");
        found
    }

    /// The most complex recipe `pattern` satisfies.
    pub fn best_match<'a, C>(&'a self, pattern: &Pattern, catalog: &C) -> Option<&'a Recipe>
    where
        C: TypeCatalog + ?Sized,
    {
        self.matches(pattern, catalog).into_iter().next()
    }

    /// Craft once from the occupied region of `inventory` seen through `view`.
    ///
    /// Matching recipes are tried most complex first; one whose output is not
    /// a valid stack is skipped. `None` if the inventory is empty or no recipe
    /// can be crafted.
    #[instrument(skip_all, fields(rows = view.rows, columns = view.columns))]
    pub fn craft<C>(&self, inventory: &Inventory, view: InventoryView, catalog: &C) -> Option<Crafted>
    where
        C: TypeCatalog + ?Sized,
    {
        let pattern = inventory.pattern(view)?;
        for recipe in self.matches(&pattern, catalog) {
            let output = match recipe.output_stack() {
                Ok(stack) => stack,
                Err(err) => {
                    warn!(recipe = %recipe.name, %err, "skipping recipe with invalid output");
                    continue;
                }
            };
            let Some(remaining) = inventory.consume(view, &recipe.template, catalog, 1) else {
                continue;
            };
            debug!(recipe = %recipe.name, output = output.size(), "crafted");
            return Some(Crafted {
                recipe: recipe.name.clone(),
                inventory: remaining,
                output,
            });
        }
        None
    }
}

impl FromIterator<Recipe> for RecipeBook {
    fn from_iter<I: IntoIterator<Item = Recipe>>(iter: I) -> Self {
        Self {
            recipes: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BlockCatalog, BlockType};
    use crate::pattern::StackTemplate;
    use blockcraft_core::{ClassId, TypeOrClassId};

    fn id(s: &str) -> TypeId {
        TypeId::parse(s).unwrap()
    }

    fn cell(s: &str, n: usize) -> Option<StackTemplate> {
        Some(StackTemplate::new(TypeOrClassId::parse(s).unwrap(), n).unwrap())
    }

    fn stack(s: &str, n: usize) -> Option<Stack> {
        Some(Stack::of_size(&id(s), n).unwrap())
    }

    fn catalog() -> BlockCatalog {
        let mut catalog = BlockCatalog::new();
        catalog.insert(
            id("org/game/coal"),
            BlockType::with_classes(vec![ClassId::parse("org/game/Fuel").unwrap()]),
        );
        catalog
    }

    fn book() -> RecipeBook {
        [
            Recipe {
                name: "torch".into(),
                template: PatternTemplate::new(
                    vec![cell("org/game/Fuel", 1), cell("org/game/stick", 1)],
                    2,
                    1,
                )
                .unwrap(),
                output: id("org/game/torch"),
                output_count: 4,
            },
            Recipe {
                name: "big_torch".into(),
                template: PatternTemplate::new(
                    vec![cell("org/game/coal", 2), cell("org/game/stick", 1)],
                    2,
                    1,
                )
                .unwrap(),
                output: id("org/game/big_torch"),
                output_count: 1,
            },
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn more_complex_recipe_is_preferred() {
        let view = InventoryView::new(2, 2);
        let inventory = Inventory::empty_grid(view)
            .with_slot(1, stack("org/game/coal", 2))
            .with_slot(3, stack("org/game/stick", 1));
        let pattern = inventory.pattern(view).unwrap();

        let book_ = book();
        let catalog_ = catalog();
        let names: Vec<&str> = book_
            .matches(&pattern, &catalog_)
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, vec!["big_torch", "torch"]);

        let crafted = book().craft(&inventory, view, &catalog()).unwrap();
        assert_eq!(crafted.recipe, "big_torch");
        assert_eq!(crafted.output.size(), 1);
        assert!(crafted.inventory.is_empty());
    }

    #[test]
    fn class_recipe_leaves_remainder() {
        let view = InventoryView::new(2, 2);
        let inventory = Inventory::empty_grid(view)
            .with_slot(0, stack("org/game/coal", 1))
            .with_slot(2, stack("org/game/stick", 3));

        let crafted = book().craft(&inventory, view, &catalog()).unwrap();
        assert_eq!(crafted.recipe, "torch");
        assert_eq!(crafted.output.type_id(), &id("org/game/torch"));
        assert_eq!(crafted.output.size(), 4);
        assert_eq!(crafted.inventory.get(0), None);
        assert_eq!(crafted.inventory.get(2).map(Stack::size), Some(2));
    }

    #[test]
    fn invalid_output_falls_through_to_next_match() {
        let mut recipes = RecipeBook::new();
        recipes.add_recipe(Recipe {
            name: "broken".into(),
            template: PatternTemplate::new(
                vec![cell("org/game/coal", 1), cell("org/game/stick", 1)],
                2,
                1,
            )
            .unwrap(),
            output: id("org/game/heap"),
            output_count: 0,
        });
        for recipe in book().recipes() {
            recipes.add_recipe(recipe.clone());
        }

        let view = InventoryView::new(2, 1);
        let inventory = Inventory::new(vec![stack("org/game/coal", 1), stack("org/game/stick", 1)]);
        let crafted = recipes.craft(&inventory, view, &catalog()).unwrap();
        assert_eq!(crafted.recipe, "torch");
        assert_eq!(crafted.output.size(), 4);
        assert!(crafted.inventory.is_empty());
    }

    #[test]
    fn nothing_to_craft() {
        let view = InventoryView::new(1, 2);
        let book = book();
        assert!(book.craft(&Inventory::empty_grid(view), view, &catalog()).is_none());

        let inventory = Inventory::empty_grid(view).with_slot(0, stack("org/game/stick", 1));
        assert!(book.craft(&inventory, view, &catalog()).is_none());
        assert_eq!(book.len(), 2);
        assert!(book.get("torch").is_some());
    }
}
