use std::collections::HashSet;
use std::fs;
use std::path::Path;

use blockcraft_world::{BlockCatalog, Recipe, RecipeBook};
use tracing::debug;

use crate::AssetError;

/// Load a block catalog from the provided JSON file path.
pub fn catalog_from_file(path: &Path) -> Result<BlockCatalog, AssetError> {
    let data = fs::read_to_string(path)?;
    let catalog = catalog_from_str(&data)?;
    debug!(path = %path.display(), types = catalog.len(), "loaded block catalog");
    Ok(catalog)
}

/// Load a block catalog from an in-memory JSON string.
pub fn catalog_from_str(input: &str) -> Result<BlockCatalog, AssetError> {
    let defs = crate::load_blocks_from_str(input)?;
    let mut catalog = BlockCatalog::new();
    for def in defs {
        if catalog.get(&def.id).is_some() {
            return Err(AssetError::DuplicateType(def.id));
        }
        let block_type = def.block_type();
        catalog.insert(def.id, block_type);
    }
    Ok(catalog)
}

/// Load a recipe book from the provided JSON file path.
pub fn recipes_from_file(path: &Path) -> Result<RecipeBook, AssetError> {
    let data = fs::read_to_string(path)?;
    let book = recipes_from_str(&data)?;
    debug!(path = %path.display(), recipes = book.len(), "loaded recipe pack");
    Ok(book)
}

/// Load a recipe book from an in-memory JSON string.
///
/// Recipes keep their pack order, which breaks ties between recipes of equal
/// complexity.
pub fn recipes_from_str(input: &str) -> Result<RecipeBook, AssetError> {
    let defs = crate::load_recipes_from_str(input)?;
    let mut seen = HashSet::new();
    let mut book = RecipeBook::new();
    for def in defs {
        if !seen.insert(def.name.clone()) {
            return Err(AssetError::DuplicateRecipe(def.name));
        }
        let recipe = Recipe {
            name: def.name,
            template: def.template,
            output: def.output,
            output_count: def.count,
        };
        if let Err(source) = recipe.output_stack() {
            return Err(AssetError::InvalidOutput {
                recipe: recipe.name,
                source,
            });
        }
        book.add_recipe(recipe);
    }
    Ok(book)
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockcraft_core::{ClassId, TypeId};
    use blockcraft_world::TypeCatalog;
    use std::io::Write;

    const BLOCKS: &str = r#"[
        { "id": "org/game/coal", "classes": ["org/game/Fuel"], "durability": 5.0 },
        { "id": "org/game/stick" }
    ]"#;

    const RECIPES: &str = r#"[
        {
            "name": "torch",
            "template": {
                "rows": 2,
                "columns": 1,
                "cells": [{ "id": "org/game/Fuel", "size": 1 }, { "id": "org/game/stick", "size": 1 }]
            },
            "output": "org/game/torch",
            "count": 4
        },
        {
            "name": "stick_pile",
            "template": { "rows": 1, "columns": 1, "cells": [{ "id": "org/game/stick", "size": 2 }] },
            "output": "org/game/pile"
        }
    ]"#;

    #[test]
    fn catalog_fills_default_stats() {
        let catalog = catalog_from_str(BLOCKS).unwrap();
        assert_eq!(catalog.len(), 2);

        let coal = TypeId::parse("org/game/coal").unwrap();
        let stick = TypeId::parse("org/game/stick").unwrap();
        let fuel = ClassId::parse("org/game/Fuel").unwrap();
        assert!(catalog.has_class(&coal, &fuel));
        assert!(!catalog.has_class(&stick, &fuel));
        assert_eq!(catalog.get(&coal).unwrap().durability, 5.0);
        assert_eq!(
            catalog.get(&stick).unwrap().durability,
            blockcraft_world::DEFAULT_DURABILITY
        );
    }

    #[test]
    fn catalog_rejects_bad_packs() {
        let duplicate = r#"[{ "id": "org/game/coal" }, { "id": "org/game/coal" }]"#;
        assert!(matches!(
            catalog_from_str(duplicate),
            Err(AssetError::DuplicateType(_))
        ));

        // Class names must start upper-case.
        let bad_class = r#"[{ "id": "org/game/coal", "classes": ["org/game/fuel"] }]"#;
        assert!(matches!(catalog_from_str(bad_class), Err(AssetError::Parse(_))));

        let no_namespace = r#"[{ "id": "coal" }]"#;
        assert!(matches!(catalog_from_str(no_namespace), Err(AssetError::Parse(_))));
    }

    #[test]
    fn recipes_keep_pack_order() {
        let book = recipes_from_str(RECIPES).unwrap();
        let names: Vec<&str> = book.recipes().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["torch", "stick_pile"]);
        assert_eq!(book.get("torch").unwrap().output_count, 4);
        assert_eq!(book.get("stick_pile").unwrap().output_count, 1);
        assert_eq!(book.get("torch").unwrap().complexity(), 2);
    }

    #[test]
    fn recipes_reject_bad_packs() {
        let oversized = r#"[{
            "name": "heap",
            "template": { "rows": 1, "columns": 1, "cells": [{ "id": "org/game/stick", "size": 1 }] },
            "output": "org/game/heap",
            "count": 65
        }]"#;
        assert!(matches!(
            recipes_from_str(oversized),
            Err(AssetError::InvalidOutput { .. })
        ));

        let geometry = r#"[{
            "name": "broken",
            "template": { "rows": 2, "columns": 2, "cells": [null] },
            "output": "org/game/heap"
        }]"#;
        assert!(matches!(recipes_from_str(geometry), Err(AssetError::Parse(_))));

        let twice = format!("[{0}, {0}]", r#"{
            "name": "same",
            "template": { "rows": 1, "columns": 1, "cells": [{ "id": "org/game/stick", "size": 1 }] },
            "output": "org/game/heap"
        }"#);
        assert!(matches!(
            recipes_from_str(&twice),
            Err(AssetError::DuplicateRecipe(name)) if name == "same"
        ));
    }

    #[test]
    fn packs_load_from_files() {
        let mut blocks = tempfile::NamedTempFile::new().unwrap();
        blocks.write_all(BLOCKS.as_bytes()).unwrap();
        let mut recipes = tempfile::NamedTempFile::new().unwrap();
        recipes.write_all(RECIPES.as_bytes()).unwrap();

        assert_eq!(catalog_from_file(blocks.path()).unwrap().len(), 2);
        assert_eq!(recipes_from_file(recipes.path()).unwrap().len(), 2);
        assert!(matches!(
            catalog_from_file(Path::new("/nonexistent/blocks.json")),
            Err(AssetError::Io(_))
        ));
    }
}
