//! State container for the TurboCommerce catalog browser.
//!
//! - `AppState` - Catalog data, filters, favorites, product detail
//! - `Action` / `reduce` - Every state transition, with request fencing
//! - `Store` - Owns the state, memoizes visible products, persists favorites
//! - `effects` - Async fetches over any `CatalogSource`
//! - `Debouncer` - Quiet-period debouncing for search input
//!
//! # Example
//!
//! ```rust,ignore
//! use turbo_state::prelude::*;
//!
//! let store = shared(Store::new().with_storage(JsonFileStorage::new(path)));
//! load_catalog(&store, &client).await;
//!
//! let mut store = lock(&store);
//! store.dispatch(Action::SetSortKey(SortKey::PriceAsc));
//! for product in store.visible_products() {
//!     println!("{}", product.title);
//! }
//! ```

pub mod action;
pub mod debounce;
pub mod effects;
pub mod error;
pub mod reducer;
pub mod state;
pub mod storage;
pub mod store;

pub use action::Action;
pub use debounce::{Debouncer, DEFAULT_QUIET};
pub use effects::{
    fetch_categories, fetch_product, fetch_products, load_catalog, lock, search_debouncer, shared,
    Completion, SharedStore,
};
pub use error::StorageError;
pub use reducer::reduce;
pub use state::{AppState, CatalogState, DetailState, FetchFailure, FetchStatus, RequestId};
pub use storage::{FavoritesStorage, JsonFileStorage, MemoryStorage};
pub use store::Store;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        fetch_categories, fetch_product, fetch_products, load_catalog, lock, shared, Action,
        AppState, Completion, FavoritesStorage, FetchStatus, JsonFileStorage, MemoryStorage,
        SharedStore, Store,
    };
    pub use turbo_catalog::search::SortKey;
}
