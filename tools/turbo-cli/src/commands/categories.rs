//! Category listing.

use anyhow::Result;
use turbo_catalog::catalog::{category_facets, CategoryFacet};
use turbo_catalog::format::capitalize_first;
use turbo_state::lock;

use super::load_store;
use crate::context::Context;

/// Run the categories command.
pub async fn run(ctx: &Context) -> Result<()> {
    let store = load_store(ctx).await?;
    let store = lock(&store);
    let catalog = &store.state().catalog;

    let mut facets = category_facets(&catalog.items, "");
    // Categories the service knows about but no loaded product uses.
    for name in &catalog.categories {
        if !facets.iter().any(|f| &f.name == name) {
            facets.push(CategoryFacet {
                name: name.clone(),
                count: 0,
                selected: false,
            });
        }
    }

    if ctx.output.is_json() {
        ctx.output.json(&facets);
        return Ok(());
    }

    ctx.output.header("Categories");
    if facets.is_empty() {
        ctx.output.info("No categories");
        return Ok(());
    }
    for facet in &facets {
        ctx.output
            .list_item(&format!("{} ({})", capitalize_first(&facet.name), facet.count));
    }

    Ok(())
}
