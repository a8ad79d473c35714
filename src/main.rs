//! blockcraft - pattern crafting from the command line
//!
//! Loads a block catalog and a recipe pack, lays a crafting grid file over
//! an inventory view and reports the recipe the grid crafts.

mod config;
mod grid;

use anyhow::{bail, Context, Result};
use blockcraft_assets::{catalog_from_file, recipes_from_file};
use blockcraft_world::{BlockCatalog, Inventory, InventoryView, RecipeBook};
use clap::Parser;
use config::CraftConfig;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about = "Find the recipe a crafting grid makes", long_about = None)]
struct Args {
    /// Config file (TOML)
    #[arg(short, long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Crafting grid: row-major JSON list of null or {"id", "count"}
    #[arg(short, long)]
    grid: PathBuf,

    /// Override the block catalog pack from the config
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Override the recipe pack from the config
    #[arg(long)]
    recipes: Option<PathBuf>,

    /// Override the number of grid rows
    #[arg(long)]
    rows: Option<usize>,

    /// Override the number of grid columns
    #[arg(long)]
    columns: Option<usize>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // The config carries the log level, so read it before tracing exists and
    // report any failure afterwards.
    let loaded = CraftConfig::read(&args.config);
    let config = loaded
        .as_ref()
        .cloned()
        .unwrap_or_default()
        .relative_to(&args.config);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    if let Err(err) = &loaded {
        warn!("{err:#}. Using defaults");
    }
    info!("Starting blockcraft v{}", env!("CARGO_PKG_VERSION"));

    let catalog_path = args.catalog.unwrap_or(config.catalog);
    let catalog = catalog_from_file(&catalog_path)
        .with_context(|| format!("loading catalog {}", catalog_path.display()))?;
    let recipes_path = args.recipes.unwrap_or(config.recipes);
    let book = recipes_from_file(&recipes_path)
        .with_context(|| format!("loading recipes {}", recipes_path.display()))?;

    let view = InventoryView::new(
        args.rows.unwrap_or(config.rows),
        args.columns.unwrap_or(config.columns),
    );
    let inventory = grid::load(&args.grid)?;
    println!("{}", describe(&book, &catalog, &inventory, view)?);
    Ok(())
}

/// One-line report of what `inventory` crafts.
fn describe(
    book: &RecipeBook,
    catalog: &BlockCatalog,
    inventory: &Inventory,
    view: InventoryView,
) -> Result<String> {
    if inventory.len() != view.size() {
        bail!(
            "grid has {} slots but the view is {}x{}",
            inventory.len(),
            view.rows,
            view.columns
        );
    }
    let Some(pattern) = inventory.pattern(view) else {
        return Ok("grid is empty".to_string());
    };
    let Some(recipe) = book.best_match(&pattern, catalog) else {
        return Ok(format!(
            "no recipe matches the {}x{} pattern",
            pattern.rows(),
            pattern.columns()
        ));
    };
    let repetitions = pattern.count(&recipe.template, catalog);
    let output = recipe.output_stack()?;
    Ok(format!(
        "{}: {} {} per craft, can craft {} time{}",
        recipe.name,
        output.size(),
        output.type_id(),
        repetitions,
        if repetitions == 1 { "" } else { "s" }
    ))
}
