//! State transitions.

use serde::{Deserialize, Serialize};
use turbo_catalog::search::SortKey;
use turbo_catalog::{Product, ProductId};

use crate::state::{FetchFailure, RequestId};

/// Every way the application state can change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Action {
    // Filters
    SetSearchTerm(String),
    SetSelectedCategory(String),
    SetSortKey(SortKey),
    ClearFilters,
    ClearError,

    // Favorites
    AddFavorite(Product),
    RemoveFavorite(ProductId),
    ToggleFavorite(Product),
    ClearFavorites,

    // Product list fetch
    ProductsRequested {
        request: RequestId,
    },
    ProductsLoaded {
        request: RequestId,
        products: Vec<Product>,
    },
    ProductsFailed {
        request: RequestId,
        error: FetchFailure,
    },

    // Category fetch
    CategoriesRequested {
        request: RequestId,
    },
    CategoriesLoaded {
        request: RequestId,
        categories: Vec<String>,
    },
    CategoriesFailed {
        request: RequestId,
        error: FetchFailure,
    },

    // Single product fetch
    ProductRequested {
        request: RequestId,
        id: ProductId,
    },
    ProductLoaded {
        request: RequestId,
        product: Product,
    },
    ProductFailed {
        request: RequestId,
        error: FetchFailure,
    },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetSearchTerm(_) => "setSearchTerm",
            Action::SetSelectedCategory(_) => "setSelectedCategory",
            Action::SetSortKey(_) => "setSortKey",
            Action::ClearFilters => "clearFilters",
            Action::ClearError => "clearError",
            Action::AddFavorite(_) => "addFavorite",
            Action::RemoveFavorite(_) => "removeFavorite",
            Action::ToggleFavorite(_) => "toggleFavorite",
            Action::ClearFavorites => "clearFavorites",
            Action::ProductsRequested { .. } => "productsRequested",
            Action::ProductsLoaded { .. } => "productsLoaded",
            Action::ProductsFailed { .. } => "productsFailed",
            Action::CategoriesRequested { .. } => "categoriesRequested",
            Action::CategoriesLoaded { .. } => "categoriesLoaded",
            Action::CategoriesFailed { .. } => "categoriesFailed",
            Action::ProductRequested { .. } => "productRequested",
            Action::ProductLoaded { .. } => "productLoaded",
            Action::ProductFailed { .. } => "productFailed",
        }
    }

    /// Whether the action can change the favorites set.
    pub fn touches_favorites(&self) -> bool {
        matches!(
            self,
            Action::AddFavorite(_)
                | Action::RemoveFavorite(_)
                | Action::ToggleFavorite(_)
                | Action::ClearFavorites
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_type_tag() {
        let json = serde_json::to_value(Action::SetSortKey(SortKey::PriceAsc)).unwrap();
        assert_eq!(json["type"], "setSortKey");
        assert_eq!(json["payload"], "price-asc");

        let json = serde_json::to_value(Action::ClearFilters).unwrap();
        assert_eq!(json["type"], "clearFilters");
    }

    #[test]
    fn test_name_matches_tag() {
        let actions = vec![
            Action::RemoveFavorite(ProductId::new(1)),
            Action::ProductsRequested { request: RequestId::new(1) },
            Action::ClearError,
        ];
        for action in actions {
            let json = serde_json::to_value(&action).unwrap();
            assert_eq!(json["type"], action.name());
        }
    }

    #[test]
    fn test_touches_favorites() {
        assert!(Action::ClearFavorites.touches_favorites());
        assert!(!Action::ClearFilters.touches_favorites());
    }
}
