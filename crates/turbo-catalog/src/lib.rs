//! Catalog domain types and client-side query logic for TurboCommerce.
//!
//! This crate is the pure core of the catalog browser:
//!
//! - **Catalog**: Products, ratings, category facets
//! - **Search**: Filter spec, sort keys, the visible-products pipeline
//! - **Favorites**: An ordered, id-unique favorites set
//! - **Format**: Display helpers for prices, ratings and titles
//!
//! Nothing in here performs I/O; fetching lives in `turbo-data` and state
//! wiring in `turbo-state`.
//!
//! # Example
//!
//! ```rust,ignore
//! use turbo_catalog::prelude::*;
//!
//! let spec = FilterSpec::new()
//!     .with_search_term("backpack")
//!     .with_sort_key(SortKey::PriceAsc);
//!
//! let visible = derive_visible_products(&products, &spec);
//!
//! let mut favorites = FavoritesSet::new();
//! favorites.toggle(visible[0].clone());
//! assert!(favorites.contains(visible[0].id));
//! ```

pub mod error;
pub mod format;
pub mod ids;

pub mod catalog;
pub mod favorites;
pub mod search;
pub mod selectors;

pub use catalog::{Product, Rating};
pub use error::CatalogError;
pub use favorites::FavoritesSet;
pub use ids::ProductId;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CatalogError;
    pub use crate::ids::ProductId;

    // Catalog
    pub use crate::catalog::{category_facets, category_names, CategoryFacet, Product, Rating};

    // Search
    pub use crate::search::{
        derive_visible_products, filter_products, has_active_filters, sort_products,
        visible_count, FilterSpec, SortKey,
    };

    // Favorites
    pub use crate::favorites::FavoritesSet;
    pub use crate::selectors::{favorites_count, find_by_id, is_favorite};
}
