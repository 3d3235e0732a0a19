//! Search module.
//!
//! Contains the filter spec, sort keys, and the pipeline that turns the raw
//! catalog into the visible product list.

mod filter;
mod pipeline;
mod query;
mod sort;

pub use filter::{filter_products, matches_category, matches_search};
pub use pipeline::{derive_visible_products, has_active_filters, visible_count};
pub use query::FilterSpec;
pub use sort::{locale_cmp, sort_products, SortKey};
