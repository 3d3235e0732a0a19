//! Catalog client error types.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use turbo_catalog::ProductId;

/// Coarse error category surfaced to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    /// Transport failure, timeout, or an unexpected HTTP status.
    Network,
    /// The response did not have the expected shape.
    Decode,
    /// The service reports the requested product does not exist.
    NotFound,
}

/// Errors that can occur when talking to the remote catalog.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Failed to send the request or read the response.
    #[error("Request failed: {0}")]
    Network(String),

    /// No complete response within the configured timeout.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// HTTP error response.
    #[error("HTTP {status} for {url}")]
    Http { status: u16, url: String },

    /// Failed to parse or validate the response body.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Product does not exist.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// Invalid base URL or path.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// Map to the tagged kind the UI reacts to.
    ///
    /// Timeouts and HTTP failures other than a product 404 are network-kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::Network(_)
            | FetchError::Timeout(_)
            | FetchError::Http { .. }
            | FetchError::InvalidUrl(_) => ErrorKind::Network,
            FetchError::Decode(_) => ErrorKind::Decode,
            FetchError::NotFound(_) => ErrorKind::NotFound,
        }
    }

    /// Whether a later retry of the same request might succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Network(_) | FetchError::Timeout(_) => true,
            FetchError::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}

impl From<turbo_catalog::CatalogError> for FetchError {
    fn from(e: turbo_catalog::CatalogError) -> Self {
        FetchError::Decode(e.to_string())
    }
}
