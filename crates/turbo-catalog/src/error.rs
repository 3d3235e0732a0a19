//! Catalog error types.

use crate::ids::ProductId;
use thiserror::Error;

/// Errors raised while validating catalog data.
///
/// The query pipeline and the favorites set never fail; these errors only
/// come up at the boundary where raw payloads become domain values.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A product record violates a catalog invariant.
    #[error("Invalid product {id}: {reason}")]
    InvalidProduct { id: ProductId, reason: String },
}

impl CatalogError {
    pub(crate) fn invalid(id: ProductId, reason: impl Into<String>) -> Self {
        CatalogError::InvalidProduct {
            id,
            reason: reason.into(),
        }
    }
}
