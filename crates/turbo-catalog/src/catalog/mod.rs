//! Product catalog module.
//!
//! Contains the product record and category aggregates.

mod category;
mod product;

pub use category::{category_facets, category_names, CategoryFacet};
pub use product::{Product, Rating, MAX_RATE};
