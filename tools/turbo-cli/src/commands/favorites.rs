//! Favorites management.

use anyhow::{Context as _, Result};
use dialoguer::Confirm;
use serde_json::json;
use turbo_catalog::format::format_currency;
use turbo_catalog::{Product, ProductId};
use turbo_state::{Action, Store};

use super::{FavoritesArgs, FavoritesCommand};
use crate::context::Context;

/// Run the favorites command.
pub async fn run(args: FavoritesArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.store();
    ctx.output
        .debug(&format!("Favorites file: {}", ctx.favorites_path.display()));

    match args.command {
        FavoritesCommand::List => list(&store, ctx),
        FavoritesCommand::Add { id } => add(&mut store, id, ctx).await,
        FavoritesCommand::Remove { id } => remove(&mut store, id, ctx),
        FavoritesCommand::Toggle { id } => toggle(&mut store, id, ctx).await,
        FavoritesCommand::Clear { yes } => clear(&mut store, yes, ctx),
    }
}

fn list(store: &Store, ctx: &Context) -> Result<()> {
    let favorites = &store.state().favorites;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "count": store.favorites_count(),
            "items": favorites,
        }));
        return Ok(());
    }

    ctx.output.header(&format!("Favorites ({})", store.favorites_count()));
    if favorites.is_empty() {
        ctx.output.info("No favorites yet");
        return Ok(());
    }

    let currency = ctx.config.currency();
    for product in favorites.iter() {
        ctx.output.list_item(&format!(
            "{} {} - {}",
            product.id,
            product.title,
            format_currency(product.price, currency)
        ));
    }
    Ok(())
}

async fn fetch(id: ProductId, ctx: &Context) -> Result<Product> {
    let client = ctx.client()?;
    let spinner = ctx.output.spinner(&format!("Loading product {}...", id));
    let result = client.get_product_by_id(id).await;
    spinner.finish_and_clear();
    result.with_context(|| format!("Failed to load product {}", id))
}

async fn add(store: &mut Store, id: ProductId, ctx: &Context) -> Result<()> {
    if store.is_favorite(id) {
        report(ctx, id, true, &format!("Product {} is already a favorite", id));
        return Ok(());
    }

    let product = fetch(id, ctx).await?;
    let title = product.title.clone();
    apply(store, Action::AddFavorite(product))?;
    report(ctx, id, true, &format!("Added {} to favorites", title));
    Ok(())
}

fn remove(store: &mut Store, id: ProductId, ctx: &Context) -> Result<()> {
    if apply(store, Action::RemoveFavorite(id))? {
        report(ctx, id, false, &format!("Removed product {} from favorites", id));
    } else {
        ctx.output.warn(&format!("Product {} is not a favorite", id));
        if ctx.output.is_json() {
            ctx.output.json(&json!({ "id": id, "favorite": false }));
        }
    }
    Ok(())
}

async fn toggle(store: &mut Store, id: ProductId, ctx: &Context) -> Result<()> {
    // Removing needs only the id; adding needs the product itself.
    let product = match store.state().favorites.get(id) {
        Some(existing) => existing.clone(),
        None => fetch(id, ctx).await?,
    };
    let title = product.title.clone();
    apply(store, Action::ToggleFavorite(product))?;

    let favorite = store.is_favorite(id);
    let msg = if favorite {
        format!("Added {} to favorites", title)
    } else {
        format!("Removed {} from favorites", title)
    };
    report(ctx, id, favorite, &msg);
    Ok(())
}

fn clear(store: &mut Store, yes: bool, ctx: &Context) -> Result<()> {
    let count = store.favorites_count();
    if count == 0 {
        ctx.output.info("No favorites to clear");
        if ctx.output.is_json() {
            ctx.output.json(&json!({ "cleared": 0 }));
        }
        return Ok(());
    }

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove all {} favorites?", count))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Clear cancelled");
            return Ok(());
        }
    }

    apply(store, Action::ClearFavorites)?;
    if ctx.output.is_json() {
        ctx.output.json(&json!({ "cleared": count }));
    } else {
        ctx.output.success(&format!("Cleared {} favorites", count));
    }
    Ok(())
}

/// Dispatch a favorites change, failing if it could not be saved.
fn apply(store: &mut Store, action: Action) -> Result<bool> {
    store.try_dispatch(action).context("Failed to save favorites")
}

fn report(ctx: &Context, id: ProductId, favorite: bool, msg: &str) {
    if ctx.output.is_json() {
        ctx.output.json(&json!({ "id": id, "favorite": favorite }));
    } else {
        ctx.output.success(msg);
    }
}
