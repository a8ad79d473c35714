//! Crafting grid files: a row-major JSON list of `null` or `{ "id", "count" }`.

use anyhow::{Context, Result};
use blockcraft_core::TypeId;
use blockcraft_world::{Inventory, Stack};
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize)]
struct GridCell {
    id: TypeId,
    #[serde(default = "one")]
    count: usize,
}

fn one() -> usize {
    1
}

pub fn load(path: &Path) -> Result<Inventory> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("reading grid {}", path.display()))?;
    parse(&contents).with_context(|| format!("parsing grid {}", path.display()))
}

pub fn parse(contents: &str) -> Result<Inventory> {
    let cells: Vec<Option<GridCell>> = serde_json::from_str(contents)?;
    let slots = cells
        .into_iter()
        .enumerate()
        .map(|(slot, cell)| {
            cell.map(|cell| {
                Stack::of_size(&cell.id, cell.count).with_context(|| format!("slot {slot}"))
            })
            .transpose()
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Inventory::new(slots))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sparse_grid() {
        let inventory =
            parse(r#"[null, { "id": "org/game/coal", "count": 3 }, { "id": "org/game/stick" }, null]"#)
                .unwrap();
        assert_eq!(inventory.len(), 4);
        assert_eq!(inventory.get(0), None);
        assert_eq!(inventory.get(1).map(Stack::size), Some(3));
        assert_eq!(inventory.get(2).map(Stack::size), Some(1));
    }

    #[test]
    fn rejects_invalid_stacks() {
        let err = parse(r#"[{ "id": "org/game/coal", "count": 65 }]"#).unwrap_err();
        assert!(format!("{err:#}").contains("slot 0"));
        assert!(parse(r#"[{ "id": "org/game/coal", "count": 0 }]"#).is_err());
        assert!(parse(r#"[{ "id": "org/game/Fuel" }]"#).is_err());
    }
}
