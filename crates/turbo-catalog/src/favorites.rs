//! Favorites set.
//!
//! An ordered collection of products, unique by id. Iteration follows
//! insertion order, oldest favorite first. Removal leaves a tombstone in the
//! slot vector; tombstones are compacted once they outnumber live entries,
//! so every operation is O(1) amortized.

use crate::catalog::Product;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Tombstones tolerated before compaction is considered.
const COMPACT_THRESHOLD: usize = 16;

/// A user-curated set of products.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Product>", into = "Vec<Product>")]
pub struct FavoritesSet {
    slots: Vec<Option<Product>>,
    index: HashMap<ProductId, usize>,
}

impl FavoritesSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a product unless its id is already present.
    ///
    /// Returns `true` if the product was added.
    pub fn add(&mut self, product: Product) -> bool {
        if self.index.contains_key(&product.id) {
            return false;
        }
        self.index.insert(product.id, self.slots.len());
        self.slots.push(Some(product));
        true
    }

    /// Remove the entry with `id`, if present.
    ///
    /// Returns `true` if an entry was removed.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let Some(slot) = self.index.remove(&id) else {
            return false;
        };
        self.slots[slot] = None;
        self.maybe_compact();
        true
    }

    /// Remove the product if present, otherwise add it at the end.
    ///
    /// Returns `true` if the product is a favorite afterwards.
    pub fn toggle(&mut self, product: Product) -> bool {
        if self.remove(product.id) {
            false
        } else {
            self.add(product)
        }
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.index.clear();
    }

    /// Membership test.
    pub fn contains(&self, id: ProductId) -> bool {
        self.index.contains_key(&id)
    }

    /// Look up a favorite by id.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.index
            .get(&id)
            .and_then(|&slot| self.slots[slot].as_ref())
    }

    /// Current number of favorites.
    pub fn count(&self) -> usize {
        self.index.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> + '_ {
        self.slots.iter().flatten()
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> Vec<ProductId> {
        self.iter().map(|p| p.id).collect()
    }

    /// Copy the favorites out, in insertion order.
    pub fn to_vec(&self) -> Vec<Product> {
        self.iter().cloned().collect()
    }

    fn maybe_compact(&mut self) {
        let live = self.index.len();
        let dead = self.slots.len() - live;
        if dead < COMPACT_THRESHOLD || dead <= live {
            return;
        }

        self.slots.retain(Option::is_some);
        for (slot, product) in self.slots.iter().enumerate() {
            if let Some(product) = product {
                self.index.insert(product.id, slot);
            }
        }
    }
}

impl PartialEq for FavoritesSet {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl From<Vec<Product>> for FavoritesSet {
    fn from(products: Vec<Product>) -> Self {
        products.into_iter().collect()
    }
}

impl From<FavoritesSet> for Vec<Product> {
    fn from(set: FavoritesSet) -> Self {
        set.slots.into_iter().flatten().collect()
    }
}

impl FromIterator<Product> for FavoritesSet {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        let mut set = FavoritesSet::new();
        set.extend(iter);
        set
    }
}

impl Extend<Product> for FavoritesSet {
    fn extend<I: IntoIterator<Item = Product>>(&mut self, iter: I) {
        for product in iter {
            self.add(product);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u64) -> Product {
        Product::new(id, format!("Product {id}"), id as f64, "misc")
    }

    fn ids(set: &FavoritesSet) -> Vec<u64> {
        set.iter().map(|p| p.id.get()).collect()
    }

    #[test]
    fn test_add_and_toggle_scenario() {
        let mut set = FavoritesSet::new();
        set.add(product(1));
        assert!(set.contains(ProductId::new(1)));
        assert_eq!(set.count(), 1);

        set.toggle(product(1));
        assert_eq!(set.count(), 0);
    }

    #[test]
    fn test_clear_empty_is_noop() {
        let mut set = FavoritesSet::new();
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.count(), 0);
    }

    #[test]
    fn test_add_duplicate_is_noop() {
        let mut set = FavoritesSet::new();
        assert!(set.add(product(1)));
        assert!(!set.add(product(1)));
        assert_eq!(set.count(), 1);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut set = FavoritesSet::new();
        set.add(product(1));
        assert!(!set.remove(ProductId::new(2)));
        assert_eq!(ids(&set), vec![1]);
    }

    #[test]
    fn test_insertion_order() {
        let mut set = FavoritesSet::new();
        for id in [3, 1, 2] {
            set.add(product(id));
        }
        assert_eq!(ids(&set), vec![3, 1, 2]);

        set.remove(ProductId::new(1));
        assert_eq!(ids(&set), vec![3, 2]);
    }

    #[test]
    fn test_toggle_readd_moves_to_end() {
        let mut set: FavoritesSet = vec![product(1), product(2), product(3)].into();
        assert!(!set.toggle(product(1)));
        assert!(set.toggle(product(1)));
        assert_eq!(ids(&set), vec![2, 3, 1]);
    }

    #[test]
    fn test_toggle_twice_restores_membership() {
        let mut set: FavoritesSet = vec![product(1), product(2)].into();
        let before: std::collections::HashSet<u64> = ids(&set).into_iter().collect();

        set.toggle(product(5));
        set.toggle(product(5));
        set.toggle(product(2));
        set.toggle(product(2));

        let after: std::collections::HashSet<u64> = ids(&set).into_iter().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_no_duplicates_under_churn() {
        let mut set = FavoritesSet::new();
        for round in 0..200u64 {
            let id = round % 7 + 1;
            match round % 4 {
                0 => {
                    set.add(product(id));
                }
                1 => {
                    set.toggle(product(id));
                }
                2 => {
                    set.remove(ProductId::new((round + 3) % 7 + 1));
                }
                _ => {
                    set.add(product(id));
                    set.add(product(id));
                }
            }

            let mut seen = ids(&set);
            let len = seen.len();
            seen.sort_unstable();
            seen.dedup();
            assert_eq!(seen.len(), len);
            assert_eq!(set.count(), len);
        }
    }

    #[test]
    fn test_compaction_preserves_order_and_lookup() {
        let mut set = FavoritesSet::new();
        for id in 1..=100 {
            set.add(product(id));
        }
        for id in 1..=90 {
            set.remove(ProductId::new(id));
        }
        assert!(set.slots.len() < 100);
        assert_eq!(ids(&set), (91..=100).collect::<Vec<_>>());
        assert_eq!(set.get(ProductId::new(95)).map(|p| p.id.get()), Some(95));

        set.add(product(1));
        assert_eq!(ids(&set).last(), Some(&1));
        assert!(set.remove(ProductId::new(100)));
        assert!(!set.contains(ProductId::new(100)));
    }

    #[test]
    fn test_serde_as_array() {
        let set: FavoritesSet = vec![product(2), product(1)].into();
        let json = serde_json::to_value(&set).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["id"], 2);

        let back: FavoritesSet = serde_json::from_value(json).unwrap();
        assert_eq!(back, set);
    }

    #[test]
    fn test_decode_collapses_duplicates() {
        let set: FavoritesSet = vec![product(1), product(2), product(1)].into();
        assert_eq!(ids(&set), vec![1, 2]);
    }
}
