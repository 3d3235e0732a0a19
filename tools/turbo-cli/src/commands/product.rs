//! Single product detail.

use anyhow::{Context as _, Result};
use console::style;
use serde_json::json;
use turbo_catalog::format::{
    capitalize_first, format_currency, format_rating, star_rating, truncate_text,
};
use turbo_state::{fetch_product, lock, shared};

use super::ProductArgs;
use crate::context::Context;

/// Run the product command.
pub async fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let store = shared(ctx.store());

    let spinner = ctx.output.spinner(&format!("Loading product {}...", args.id));
    let result = fetch_product(&store, &client, args.id).await;
    spinner.finish_and_clear();
    result.with_context(|| format!("Failed to load product {}", args.id))?;

    let store = lock(&store);
    let Some(product) = store.state().detail.product.as_ref() else {
        anyhow::bail!("Product {} was not loaded", args.id);
    };
    let favorite = store.is_favorite(product.id);

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "product": product, "favorite": favorite }));
        return Ok(());
    }

    let display = &ctx.config.display;
    let title = if favorite {
        format!("{} {}", product.title, style("♥").red())
    } else {
        product.title.clone()
    };
    ctx.output.header(&title);
    ctx.output.kv("id", &product.id.to_string());
    ctx.output.kv("price", &format_currency(product.price, ctx.config.currency()));
    ctx.output.kv("category", &capitalize_first(&product.category));
    if product.is_rated() {
        ctx.output.kv(
            "rating",
            &format!(
                "{} {} ({} reviews)",
                star_rating(product.rating.rate),
                format_rating(product.rating.rate),
                product.rating.count
            ),
        );
    }
    if !product.description.is_empty() {
        ctx.output.kv(
            "description",
            &truncate_text(&product.description, display.description_width),
        );
    }
    if ctx.output.is_verbose() && !product.image.is_empty() {
        ctx.output.kv("image", &product.image);
    }

    Ok(())
}
