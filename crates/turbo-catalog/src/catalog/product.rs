//! Product types.

use crate::error::CatalogError;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Highest value a rating can take.
pub const MAX_RATE: f64 = 5.0;

/// Aggregate customer rating for a product.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Rating {
    /// Average rate in `[0, 5]`.
    pub rate: f64,
    /// Number of ratings contributing to `rate`.
    pub count: u64,
}

impl Rating {
    /// Create a rating.
    pub fn new(rate: f64, count: u64) -> Self {
        Self { rate, count }
    }
}

/// A product record as served by the remote catalog.
///
/// Products are owned by the catalog response; the application keeps copies
/// and never mutates them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price in the store currency.
    pub price: f64,
    /// Long-form description.
    #[serde(default)]
    pub description: String,
    /// Category name, one of the catalog's categories.
    pub category: String,
    /// Image URL.
    #[serde(default)]
    pub image: String,
    /// Customer rating.
    #[serde(default)]
    pub rating: Rating,
}

impl Product {
    /// Create a product with an empty description, no image and no rating.
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        price: f64,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price,
            description: String::new(),
            category: category.into(),
            image: String::new(),
            rating: Rating::default(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the image URL.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Set the rating.
    pub fn with_rating(mut self, rate: f64, count: u64) -> Self {
        self.rating = Rating::new(rate, count);
        self
    }

    /// Check the record against the catalog invariants.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if !self.id.is_valid() {
            return Err(CatalogError::invalid(self.id, "id must be positive"));
        }
        if self.title.trim().is_empty() {
            return Err(CatalogError::invalid(self.id, "title is empty"));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(CatalogError::invalid(
                self.id,
                format!("price {} is not a non-negative number", self.price),
            ));
        }
        if self.category.trim().is_empty() {
            return Err(CatalogError::invalid(self.id, "category is empty"));
        }
        if !(0.0..=MAX_RATE).contains(&self.rating.rate) {
            return Err(CatalogError::invalid(
                self.id,
                format!("rating {} outside [0, {}]", self.rating.rate, MAX_RATE),
            ));
        }
        Ok(())
    }

    /// Whether the product is rated at all.
    pub fn is_rated(&self) -> bool {
        self.rating.count > 0
    }
}
