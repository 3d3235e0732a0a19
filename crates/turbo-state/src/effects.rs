//! Async fetch effects over a shared store.
//!
//! Each effect allocates a request id and dispatches the `*Requested` action
//! under the lock, releases the lock for the fetch itself, then dispatches the
//! completion. The reducer decides whether the completion is still current.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use futures::future::join;
use tracing::{debug, info};
use turbo_catalog::ProductId;
use turbo_data::{CatalogSource, FetchError};

use crate::action::Action;
use crate::debounce::Debouncer;
use crate::state::FetchFailure;
use crate::store::Store;

/// A store shared between tasks.
pub type SharedStore = Arc<Mutex<Store>>;

pub fn shared(store: Store) -> SharedStore {
    Arc::new(Mutex::new(store))
}

/// Lock the store. A poisoned lock still holds a consistent state since
/// every mutation is a single `reduce` call.
pub fn lock(store: &SharedStore) -> MutexGuard<'_, Store> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}

/// How a finished fetch ended up in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The result was applied.
    Applied,
    /// A newer request had been issued; the result was dropped.
    Stale,
}

impl Completion {
    fn from_changed(changed: bool) -> Self {
        if changed {
            Completion::Applied
        } else {
            Completion::Stale
        }
    }
}

/// Fetch the full product list.
///
/// Errors are recorded in the store and also returned, unless the request
/// was superseded, in which case the outcome is [`Completion::Stale`].
pub async fn fetch_products<S>(store: &SharedStore, source: &S) -> Result<Completion, FetchError>
where
    S: CatalogSource + ?Sized,
{
    let request = {
        let mut store = lock(store);
        let request = store.next_request_id();
        store.dispatch(Action::ProductsRequested { request });
        request
    };

    let start = Instant::now();
    let result = source.get_all_products().await;
    debug!(
        %request,
        elapsed_ms = start.elapsed().as_millis() as u64,
        ok = result.is_ok(),
        "products fetch finished"
    );

    let mut store = lock(store);
    match result {
        Ok(products) => {
            let count = products.len();
            let changed = store.dispatch(Action::ProductsLoaded { request, products });
            let completion = Completion::from_changed(changed);
            if completion == Completion::Applied {
                info!(count, "catalog loaded");
            }
            Ok(completion)
        }
        Err(e) => {
            let error = FetchFailure::from(&e);
            let changed = store.dispatch(Action::ProductsFailed { request, error });
            match Completion::from_changed(changed) {
                Completion::Applied => Err(e),
                Completion::Stale => Ok(Completion::Stale),
            }
        }
    }
}

/// Fetch the category names.
pub async fn fetch_categories<S>(store: &SharedStore, source: &S) -> Result<Completion, FetchError>
where
    S: CatalogSource + ?Sized,
{
    let request = {
        let mut store = lock(store);
        let request = store.next_request_id();
        store.dispatch(Action::CategoriesRequested { request });
        request
    };

    let result = source.get_categories().await;

    let mut store = lock(store);
    match result {
        Ok(categories) => Ok(Completion::from_changed(
            store.dispatch(Action::CategoriesLoaded { request, categories }),
        )),
        Err(e) => {
            let error = FetchFailure::from(&e);
            let changed = store.dispatch(Action::CategoriesFailed { request, error });
            match Completion::from_changed(changed) {
                Completion::Applied => Err(e),
                Completion::Stale => Ok(Completion::Stale),
            }
        }
    }
}

/// Fetch one product into the detail slot.
pub async fn fetch_product<S>(
    store: &SharedStore,
    source: &S,
    id: ProductId,
) -> Result<Completion, FetchError>
where
    S: CatalogSource + ?Sized,
{
    let request = {
        let mut store = lock(store);
        let request = store.next_request_id();
        store.dispatch(Action::ProductRequested { request, id });
        request
    };

    let result = source.get_product_by_id(id).await;

    let mut store = lock(store);
    match result {
        Ok(product) => Ok(Completion::from_changed(
            store.dispatch(Action::ProductLoaded { request, product }),
        )),
        Err(e) => {
            let error = FetchFailure::from(&e);
            let changed = store.dispatch(Action::ProductFailed { request, error });
            match Completion::from_changed(changed) {
                Completion::Applied => Err(e),
                Completion::Stale => Ok(Completion::Stale),
            }
        }
    }
}

/// Load products and categories concurrently.
pub async fn load_catalog<S>(
    store: &SharedStore,
    source: &S,
) -> (Result<Completion, FetchError>, Result<Completion, FetchError>)
where
    S: CatalogSource + ?Sized,
{
    join(fetch_products(store, source), fetch_categories(store, source)).await
}

/// A debouncer that applies search terms to `store`.
pub fn search_debouncer(store: SharedStore, quiet: Duration) -> Debouncer<String> {
    Debouncer::spawn(quiet, move |term| {
        lock(&store).dispatch(Action::SetSearchTerm(term));
    })
}
