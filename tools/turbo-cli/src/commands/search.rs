//! Interactive search.
//!
//! Reads one search term per line from stdin. Terms go through the search
//! debouncer, so only the last of a rapid burst is applied and printed.

use std::sync::Arc;

use anyhow::{Context as _, Result};
use serde_json::json;
use tokio::io::{AsyncBufReadExt, BufReader};
use turbo_catalog::format::Currency;
use turbo_state::{lock, Action, Debouncer, SharedStore};

use super::{load_store, SearchArgs};
use crate::context::Context;
use crate::output::Output;

/// Run the search command.
pub async fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    let store = load_store(ctx).await?;
    {
        let mut store = lock(&store);
        if let Some(category) = args.category {
            store.dispatch(Action::SetSelectedCategory(category));
        }
        store.dispatch(Action::SetSortKey(args.sort));
    }

    ctx.output.info(&format!(
        "Type a search term and press enter ({} products loaded, Ctrl-D to quit)",
        lock(&store).state().catalog.items.len()
    ));

    let debouncer = {
        let store = Arc::clone(&store);
        let output = ctx.output.clone();
        let currency = ctx.config.currency();
        let limit = args.limit;
        Debouncer::spawn(ctx.config.debounce(), move |term: String| {
            apply_term(&store, &output, currency, limit, term);
        })
    };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        if !debouncer.submit(line) {
            break;
        }
    }
    debouncer.shutdown().await;

    Ok(())
}

fn apply_term(
    store: &SharedStore,
    output: &Output,
    currency: Currency,
    limit: usize,
    term: String,
) {
    let mut store = lock(store);
    store.dispatch(Action::SetSearchTerm(term.clone()));

    let total = store.visible_count();
    let shown: Vec<_> = store.visible_products().iter().take(limit).cloned().collect();

    if output.is_json() {
        output.json(&json!({ "term": term, "total": total, "products": shown }));
        return;
    }

    output.header(&format!("Results for \"{}\" ({})", term.trim(), total));
    if shown.is_empty() {
        output.info("No products match");
        return;
    }
    output.product_table(&shown, currency, |p| store.is_favorite(p.id));
}
