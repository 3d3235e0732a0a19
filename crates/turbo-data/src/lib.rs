//! Remote catalog access for TurboCommerce.
//!
//! This crate provides:
//! - `CatalogSource` - The async contract the state layer fetches through
//! - `CatalogClient` - HTTP implementation against a Fake Store style API
//! - `StaticCatalog` - In-memory implementation for offline use and tests
//! - `RetryPolicy` - Retry strategies
//! - `FetchError` - Tagged errors (`Network`, `Decode`, `NotFound`)
//!
//! # Example
//!
//! ```rust,ignore
//! use turbo_data::{CatalogClient, ClientConfig};
//!
//! let client = CatalogClient::new(ClientConfig::default())?;
//! let products = client.get_all_products().await?;
//! let categories = client.get_categories().await?;
//! ```

mod client;
mod config;
mod error;
mod retry;
mod source;

pub use client::{CatalogClient, SortOrder};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{ErrorKind, FetchError};
pub use retry::{BackoffStrategy, RetryCondition, RetryPolicy};
pub use source::{CatalogSource, StaticCatalog};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        CatalogClient, CatalogSource, ClientConfig, ErrorKind, FetchError, StaticCatalog,
    };
}
