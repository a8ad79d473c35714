use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_CONFIG_PATH: &str = "config/blockcraft.toml";
const DEFAULT_CATALOG_PATH: &str = "blocks.json";
const DEFAULT_RECIPES_PATH: &str = "recipes.json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CraftConfig {
    /// Block catalog pack (JSON), relative to the config file.
    pub catalog: PathBuf,
    /// Recipe pack (JSON), relative to the config file.
    pub recipes: PathBuf,
    /// Rows of the crafting grid.
    pub rows: usize,
    /// Columns of the crafting grid.
    pub columns: usize,
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for CraftConfig {
    fn default() -> Self {
        Self {
            catalog: PathBuf::from(DEFAULT_CATALOG_PATH),
            recipes: PathBuf::from(DEFAULT_RECIPES_PATH),
            rows: 3,
            columns: 3,
            log_level: "warn".to_string(),
        }
    }
}

impl CraftConfig {
    /// Read and parse a config file.
    pub fn read(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("parsing {}", path.display()))
    }

    /// Parse config from TOML text; missing keys take their defaults.
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Resolve relative pack paths against the directory holding the config.
    pub fn relative_to(mut self, config_path: &Path) -> Self {
        if let Some(dir) = config_path.parent() {
            if self.catalog.is_relative() {
                self.catalog = dir.join(&self.catalog);
            }
            if self.recipes.is_relative() {
                self.recipes = dir.join(&self.recipes);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_use_defaults() {
        let cfg = CraftConfig::parse("rows = 2\n").unwrap();
        assert_eq!(cfg.rows, 2);
        assert_eq!(cfg.columns, 3);
        assert_eq!(cfg.log_level, "warn");
        assert_eq!(cfg.catalog, PathBuf::from(DEFAULT_CATALOG_PATH));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(CraftConfig::parse("rows = \"three\"").is_err());
        assert!(CraftConfig::read(Path::new("/nonexistent/blockcraft.toml")).is_err());
    }

    #[test]
    fn relative_paths_follow_the_config_file() {
        let cfg = CraftConfig::parse("catalog = \"blocks.json\"\nrecipes = \"/packs/recipes.json\"")
            .unwrap()
            .relative_to(Path::new("/srv/craft/blockcraft.toml"));
        assert_eq!(cfg.catalog, PathBuf::from("/srv/craft/blocks.json"));
        assert_eq!(cfg.recipes, PathBuf::from("/packs/recipes.json"));
    }
}
