//! The reducer: applies one action to the state.
//!
//! Fetch completions are fenced: a `*Loaded`/`*Failed` action only applies
//! when its request id is the one recorded by the latest `*Requested` for
//! that slot. Anything else is a stale response and leaves state untouched.

use tracing::debug;

use crate::action::Action;
use crate::state::{AppState, FetchStatus, RequestId};

/// Apply `action` to `state`; returns whether anything changed.
pub fn reduce(state: &mut AppState, action: Action) -> bool {
    match action {
        Action::SetSearchTerm(term) => replace(&mut state.filters.search_term, term),
        Action::SetSelectedCategory(category) => {
            replace(&mut state.filters.selected_category, category)
        }
        Action::SetSortKey(key) => replace(&mut state.filters.sort_key, key),
        Action::ClearFilters => {
            let changed = state.filters.has_active_filters();
            state.filters.clear();
            changed
        }
        Action::ClearError => state.catalog.error.take().is_some(),

        Action::AddFavorite(product) => state.favorites.add(product),
        Action::RemoveFavorite(id) => state.favorites.remove(id),
        Action::ToggleFavorite(product) => {
            state.favorites.toggle(product);
            true
        }
        Action::ClearFavorites => {
            let changed = !state.favorites.is_empty();
            state.favorites.clear();
            changed
        }

        Action::ProductsRequested { request } => {
            let catalog = &mut state.catalog;
            catalog.products_request = Some(request);
            catalog.status = FetchStatus::Pending;
            catalog.error = None;
            true
        }
        Action::ProductsLoaded { request, products } => {
            let catalog = &mut state.catalog;
            if !settle(&mut catalog.products_request, request, "products") {
                return false;
            }
            catalog.items = products;
            catalog.revision += 1;
            catalog.status = FetchStatus::Succeeded;
            true
        }
        Action::ProductsFailed { request, error } => {
            let catalog = &mut state.catalog;
            if !settle(&mut catalog.products_request, request, "products") {
                return false;
            }
            catalog.status = FetchStatus::Failed;
            catalog.error = Some(error);
            true
        }

        Action::CategoriesRequested { request } => {
            state.catalog.categories_request = Some(request);
            true
        }
        Action::CategoriesLoaded {
            request,
            categories,
        } => {
            let catalog = &mut state.catalog;
            if !settle(&mut catalog.categories_request, request, "categories") {
                return false;
            }
            catalog.categories = categories;
            true
        }
        Action::CategoriesFailed { request, error } => {
            let catalog = &mut state.catalog;
            if !settle(&mut catalog.categories_request, request, "categories") {
                return false;
            }
            catalog.error = Some(error);
            true
        }

        Action::ProductRequested { request, id: _ } => {
            let detail = &mut state.detail;
            detail.request = Some(request);
            detail.status = FetchStatus::Pending;
            detail.error = None;
            true
        }
        Action::ProductLoaded { request, product } => {
            let detail = &mut state.detail;
            if !settle(&mut detail.request, request, "product") {
                return false;
            }
            detail.product = Some(product);
            detail.status = FetchStatus::Succeeded;
            true
        }
        Action::ProductFailed { request, error } => {
            let detail = &mut state.detail;
            if !settle(&mut detail.request, request, "product") {
                return false;
            }
            detail.product = None;
            detail.status = FetchStatus::Failed;
            detail.error = Some(error);
            true
        }
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

/// Clear the in-flight slot if `request` is the one it holds.
fn settle(slot: &mut Option<RequestId>, request: RequestId, what: &str) -> bool {
    if *slot != Some(request) {
        debug!(%request, latest = ?slot, what, "ignoring stale response");
        return false;
    }
    *slot = None;
    true
}
