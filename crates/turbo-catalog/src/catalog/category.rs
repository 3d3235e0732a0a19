//! Category membership aggregates.

use crate::catalog::Product;
use serde::{Deserialize, Serialize};

/// A category with the number of products that belong to it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryFacet {
    /// Category name.
    pub name: String,
    /// Number of products in this category.
    pub count: usize,
    /// Whether this category is the active filter.
    pub selected: bool,
}

/// Distinct category names, in order of first appearance.
pub fn category_names(products: &[Product]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for product in products {
        if !names.iter().any(|n| n == &product.category) {
            names.push(product.category.clone());
        }
    }
    names
}

/// Count products per category.
///
/// Facets are listed in order of first appearance. `selected` is matched
/// exactly, the same way the category filter matches.
pub fn category_facets(products: &[Product], selected: &str) -> Vec<CategoryFacet> {
    let mut facets: Vec<CategoryFacet> = Vec::new();
    for product in products {
        match facets.iter_mut().find(|f| f.name == product.category) {
            Some(facet) => facet.count += 1,
            None => facets.push(CategoryFacet {
                name: product.category.clone(),
                count: 1,
                selected: product.category == selected,
            }),
        }
    }
    facets
}
