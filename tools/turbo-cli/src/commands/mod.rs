//! CLI command implementations.

pub mod categories;
pub mod config;
pub mod favorites;
pub mod product;
pub mod products;
pub mod search;

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};
use turbo_catalog::search::SortKey;
use turbo_catalog::ProductId;
use turbo_state::{load_catalog, shared, SharedStore};

use crate::context::Context;

/// Fetch products and categories into a fresh store.
///
/// A product failure aborts; a category failure only warns since the
/// catalog is still usable without it.
pub(crate) async fn load_store(ctx: &Context) -> Result<SharedStore> {
    let client = ctx.client()?;
    ctx.output.debug(&format!("Using catalog API at {}", client.config().base_url));

    let store = shared(ctx.store());
    let spinner = ctx.output.spinner("Loading catalog...");
    let (products, categories) = load_catalog(&store, &client).await;
    spinner.finish_and_clear();

    products.context("Failed to load products")?;
    if let Err(e) = categories {
        ctx.output.warn(&format!("Could not load categories: {}", e));
    }
    Ok(store)
}

fn parse_sort_key(s: &str) -> Result<SortKey, String> {
    SortKey::parse(s).ok_or_else(|| {
        let valid: Vec<&str> = SortKey::ALL.iter().map(|k| k.as_str()).collect();
        format!("unknown sort key '{}' (expected one of: {})", s, valid.join(", "))
    })
}

fn parse_limit(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("limit must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Case-insensitive text matched against title and description.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Exact category name.
    #[arg(long)]
    pub category: Option<String>,

    /// Sort order: name, price-asc, price-desc, rating.
    #[arg(long, default_value = "name", value_parser = parse_sort_key)]
    pub sort: SortKey,

    /// Show at most N products.
    #[arg(short, long, value_parser = parse_limit)]
    pub limit: Option<usize>,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product id.
    pub id: ProductId,
}

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Restrict results to one category.
    #[arg(long)]
    pub category: Option<String>,

    /// Sort order: name, price-asc, price-desc, rating.
    #[arg(long, default_value = "name", value_parser = parse_sort_key)]
    pub sort: SortKey,

    /// Show at most N products per result.
    #[arg(short, long, default_value = "10", value_parser = parse_limit)]
    pub limit: usize,
}

/// Arguments for the favorites command.
#[derive(Args)]
pub struct FavoritesArgs {
    #[command(subcommand)]
    pub command: FavoritesCommand,
}

#[derive(Subcommand)]
pub enum FavoritesCommand {
    /// List favorites.
    List,
    /// Add a product to favorites.
    Add {
        /// Product id.
        id: ProductId,
    },
    /// Remove a product from favorites.
    Remove {
        /// Product id.
        id: ProductId,
    },
    /// Add the product if absent, remove it otherwise.
    Toggle {
        /// Product id.
        id: ProductId,
    },
    /// Remove all favorites.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
