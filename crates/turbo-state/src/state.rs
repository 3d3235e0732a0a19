//! Application state snapshot.

use serde::{Deserialize, Serialize};
use std::fmt;
use turbo_catalog::{FavoritesSet, Product};
use turbo_catalog::search::FilterSpec;
use turbo_data::{ErrorKind, FetchError};

/// Identifies one issued fetch, so completions can be matched to requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(u64);

impl RequestId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req-{}", self.0)
    }
}

/// Lifecycle of an async fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FetchStatus {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A request is in flight.
    Pending,
    /// The latest request succeeded.
    Succeeded,
    /// The latest request failed.
    Failed,
}

impl FetchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchStatus::Idle => "idle",
            FetchStatus::Pending => "pending",
            FetchStatus::Succeeded => "succeeded",
            FetchStatus::Failed => "failed",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchStatus::Pending)
    }
}

/// A fetch failure as recorded in state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchFailure {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&FetchError> for FetchFailure {
    fn from(e: &FetchError) -> Self {
        Self {
            kind: e.kind(),
            message: e.to_string(),
        }
    }
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Raw catalog data and the status of its fetches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogState {
    /// Products from the latest successful fetch.
    pub items: Vec<Product>,
    /// Category names.
    pub categories: Vec<String>,
    /// Status of the product list fetch.
    pub status: FetchStatus,
    /// Last recorded error, for either products or categories.
    pub error: Option<FetchFailure>,
    /// Bumped every time `items` is replaced.
    pub revision: u64,
    /// Product list request awaiting completion.
    pub products_request: Option<RequestId>,
    /// Category request awaiting completion.
    pub categories_request: Option<RequestId>,
}

/// The product shown on a detail view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailState {
    pub product: Option<Product>,
    pub status: FetchStatus,
    pub error: Option<FetchFailure>,
    pub request: Option<RequestId>,
}

/// The whole application state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub catalog: CatalogState,
    pub detail: DetailState,
    pub filters: FilterSpec,
    pub favorites: FavoritesSet,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
