//! The visible-products pipeline.

use crate::catalog::Product;
use crate::search::{filter_products, sort_products, FilterSpec};

/// Derive the list to display from the raw catalog and a filter spec.
///
/// Search filter, then category filter, then a stable sort. Pure: the same
/// inputs always give the same output, and the output is a subsequence of
/// `products` up to reordering by the sort.
pub fn derive_visible_products(products: &[Product], spec: &FilterSpec) -> Vec<Product> {
    let filtered = filter_products(products, &spec.search_term, &spec.selected_category);
    sort_products(filtered, spec.sort_key)
}

/// Number of products the spec lets through.
pub fn visible_count(products: &[Product], spec: &FilterSpec) -> usize {
    derive_visible_products(products, spec).len()
}

/// Whether any filter or a non-default sort is in effect.
pub fn has_active_filters(spec: &FilterSpec) -> bool {
    spec.has_active_filters()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SortKey;
    use std::collections::HashSet;

    fn mock_products() -> Vec<Product> {
        vec![
            Product::new(1, "Test Product 1", 29.99, "electronics")
                .with_description("Test description 1")
                .with_rating(4.5, 100),
            Product::new(2, "Test Product 2", 49.99, "clothing")
                .with_description("Test description 2")
                .with_rating(3.8, 50),
        ]
    }

    fn catalog() -> Vec<Product> {
        vec![
            Product::new(10, "Widget", 5.0, "tools").with_rating(3.0, 1),
            Product::new(11, "anvil", 80.0, "tools").with_rating(4.9, 9),
            Product::new(12, "Bolt", 5.0, "hardware").with_rating(3.0, 4),
            Product::new(13, "widget", 1.0, "tools")
                .with_description("Smaller widget")
                .with_rating(2.0, 2),
            Product::new(14, "Crate", 5.0, "hardware").with_rating(4.9, 3),
        ]
    }

    fn ids(list: &[Product]) -> Vec<u64> {
        list.iter().map(|p| p.id.get()).collect()
    }

    #[test]
    fn test_search_scenario() {
        let spec = FilterSpec::new().with_search_term("Test Product 1");
        let visible = derive_visible_products(&mock_products(), &spec);
        assert_eq!(ids(&visible), vec![1]);
    }

    #[test]
    fn test_category_scenario() {
        let spec = FilterSpec::new().with_category("electronics");
        let visible = derive_visible_products(&mock_products(), &spec);
        assert_eq!(ids(&visible), vec![1]);
    }

    #[test]
    fn test_price_desc_scenario() {
        let spec = FilterSpec::new().with_sort_key(SortKey::PriceDesc);
        let visible = derive_visible_products(&mock_products(), &spec);
        assert_eq!(ids(&visible), vec![2, 1]);
    }

    #[test]
    fn test_default_spec_sorts_by_name() {
        let visible = derive_visible_products(&catalog(), &FilterSpec::new());
        assert_eq!(ids(&visible), vec![11, 12, 14, 13, 10]);
    }

    #[test]
    fn test_filters_then_sorts() {
        let spec = FilterSpec::new()
            .with_search_term("widget")
            .with_category("tools")
            .with_sort_key(SortKey::PriceAsc);
        assert_eq!(ids(&derive_visible_products(&catalog(), &spec)), vec![13, 10]);
    }

    #[test]
    fn test_deterministic() {
        let spec = FilterSpec::new().with_sort_key(SortKey::Rating);
        let a = derive_visible_products(&catalog(), &spec);
        let b = derive_visible_products(&catalog(), &spec);
        assert_eq!(a, b);
        assert_eq!(ids(&a), vec![11, 14, 10, 12, 13]);
    }

    #[test]
    fn test_output_is_drawn_from_input() {
        let input = catalog();
        for key in SortKey::ALL {
            for category in ["", "tools", "hardware", "missing"] {
                let spec = FilterSpec::new().with_category(category).with_sort_key(key);
                let out = derive_visible_products(&input, &spec);

                let unique: HashSet<u64> = ids(&out).into_iter().collect();
                assert_eq!(unique.len(), out.len(), "duplicates for {spec:?}");
                assert!(out.iter().all(|p| input.contains(p)), "invented item for {spec:?}");
            }
        }
    }

    #[test]
    fn test_empty_catalog() {
        let spec = FilterSpec::new().with_search_term("anything");
        assert!(derive_visible_products(&[], &spec).is_empty());
        assert_eq!(visible_count(&[], &spec), 0);
    }

    #[test]
    fn test_aggregates() {
        let spec = FilterSpec::new().with_category("hardware");
        assert_eq!(visible_count(&catalog(), &spec), 2);
        assert!(has_active_filters(&spec));
        assert!(!has_active_filters(&FilterSpec::new()));
    }
}
