//! Search and category predicates.

use crate::catalog::Product;

/// Case-insensitive substring match on title or description.
///
/// `term` must already be trimmed and non-empty; see [`filter_products`].
pub fn matches_search(product: &Product, term: &str) -> bool {
    let needle = term.to_lowercase();
    product.title.to_lowercase().contains(&needle)
        || product.description.to_lowercase().contains(&needle)
}

/// Exact, case-sensitive category match.
pub fn matches_category(product: &Product, category: &str) -> bool {
    product.category == category
}

/// Apply the search and category filters, preserving input order.
///
/// A blank `term` or an empty `category` leaves that filter off.
pub fn filter_products(products: &[Product], term: &str, category: &str) -> Vec<Product> {
    let term = term.trim();

    products
        .iter()
        .filter(|p| term.is_empty() || matches_search(p, term))
        .filter(|p| category.is_empty() || matches_category(p, category))
        .cloned()
        .collect()
}
