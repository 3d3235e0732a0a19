//! Derived-state accessors over catalog snapshots.

use crate::catalog::Product;
use crate::favorites::FavoritesSet;
use crate::ids::ProductId;

/// Find a product by id.
pub fn find_by_id(products: &[Product], id: ProductId) -> Option<&Product> {
    products.iter().find(|p| p.id == id)
}

/// Whether `id` is in the favorites set.
pub fn is_favorite(favorites: &FavoritesSet, id: ProductId) -> bool {
    favorites.contains(id)
}

/// Number of favorites (header badge).
pub fn favorites_count(favorites: &FavoritesSet) -> usize {
    favorites.count()
}
