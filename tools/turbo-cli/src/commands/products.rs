//! Product listing.

use anyhow::Result;
use serde_json::json;
use turbo_state::{lock, Action};

use super::{load_store, ProductsArgs};
use crate::context::Context;
use crate::output::status_badge;

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let store = load_store(ctx).await?;
    let mut store = lock(&store);

    if let Some(term) = args.search {
        store.dispatch(Action::SetSearchTerm(term));
    }
    if let Some(category) = args.category {
        if !store.state().catalog.categories.is_empty()
            && !store.state().catalog.categories.contains(&category)
        {
            ctx.output.warn(&format!("Unknown category: {}", category));
        }
        store.dispatch(Action::SetSelectedCategory(category));
    }
    store.dispatch(Action::SetSortKey(args.sort));

    let total = store.visible_count();
    let limit = args.limit.unwrap_or(total);
    let shown: Vec<_> = store.visible_products().iter().take(limit).cloned().collect();

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "total": total,
            "filters": store.state().filters,
            "products": shown,
        }));
        return Ok(());
    }

    ctx.output.header(&format!("Products ({})", args.sort.display_name()));
    ctx.output
        .debug(&format!("Catalog status: {}", status_badge(store.state().catalog.status)));

    if total == 0 {
        if store.has_active_filters() {
            ctx.output.info("No products match the current filters");
        } else {
            ctx.output.info("The catalog is empty");
        }
        return Ok(());
    }

    ctx.output.product_table(&shown, ctx.config.currency(), |p| store.is_favorite(p.id));

    ctx.output.info("");
    if shown.len() < total {
        ctx.output
            .info(&format!("Showing {} of {} products", shown.len(), total));
    } else {
        ctx.output.info(&format!("{} products", total));
    }

    Ok(())
}
