//! The catalog source seam and an in-memory implementation.

use std::time::Duration;

use async_trait::async_trait;
use turbo_catalog::catalog::category_names;
use turbo_catalog::{Product, ProductId};

use crate::FetchError;

/// Anything that can serve the remote catalog contract.
///
/// All calls are asynchronous; implementations bound them with a timeout
/// that surfaces as a network-kind [`FetchError`].
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch every product.
    async fn get_all_products(&self) -> Result<Vec<Product>, FetchError>;

    /// Fetch the category names.
    async fn get_categories(&self) -> Result<Vec<String>, FetchError>;

    /// Fetch one product, or [`FetchError::NotFound`].
    async fn get_product_by_id(&self, id: ProductId) -> Result<Product, FetchError>;

    /// Fetch the products of one category.
    async fn get_products_by_category(&self, category: &str) -> Result<Vec<Product>, FetchError> {
        let products = self.get_all_products().await?;
        Ok(products
            .into_iter()
            .filter(|p| p.category == category)
            .collect())
    }
}

/// A fixed, in-memory catalog.
///
/// Useful offline and in tests: responses can be delayed to simulate a slow
/// network, or replaced by an error.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<Product>,
    categories: Option<Vec<String>>,
    latency: Duration,
    failure: Option<FetchError>,
}

impl StaticCatalog {
    /// Serve `products`; categories are derived from them.
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            ..Self::default()
        }
    }

    /// Serve an explicit category list.
    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = Some(categories);
        self
    }

    /// Delay every response.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Fail every request with `error`.
    pub fn failing(mut self, error: FetchError) -> Self {
        self.failure = Some(error);
        self
    }

    async fn respond(&self) -> Result<(), FetchError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    async fn get_all_products(&self) -> Result<Vec<Product>, FetchError> {
        self.respond().await?;
        Ok(self.products.clone())
    }

    async fn get_categories(&self) -> Result<Vec<String>, FetchError> {
        self.respond().await?;
        Ok(self
            .categories
            .clone()
            .unwrap_or_else(|| category_names(&self.products)))
    }

    async fn get_product_by_id(&self, id: ProductId) -> Result<Product, FetchError> {
        self.respond().await?;
        self.products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(FetchError::NotFound(id))
    }
}
