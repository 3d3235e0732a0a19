//! Sort keys and ordering for product lists.

use crate::catalog::Product;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Sort options for the visible product list.
///
/// Parsing is lossy: any value that is not one of the four known keys
/// becomes [`SortKey::Name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "&'static str")]
pub enum SortKey {
    /// Sort by title A-Z.
    #[default]
    Name,
    /// Sort by price, low to high.
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
    /// Sort by highest rated.
    Rating,
}

impl SortKey {
    /// All keys, in menu order.
    pub const ALL: [SortKey; 4] = [
        SortKey::Name,
        SortKey::PriceAsc,
        SortKey::PriceDesc,
        SortKey::Rating,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::Rating => "rating",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortKey::Name => "Name: A-Z",
            SortKey::PriceAsc => "Price: Low to High",
            SortKey::PriceDesc => "Price: High to Low",
            SortKey::Rating => "Highest Rated",
        }
    }

    /// Parse a known key, returning `None` for anything else.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "name" => Some(SortKey::Name),
            "price-asc" => Some(SortKey::PriceAsc),
            "price-desc" => Some(SortKey::PriceDesc),
            "rating" => Some(SortKey::Rating),
            _ => None,
        }
    }

    /// Parse a key, falling back to [`SortKey::Name`].
    pub fn from_str_lossy(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }

    /// Compare two products under this key.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortKey::Name => locale_cmp(&a.title, &b.title),
            SortKey::PriceAsc => a.price.total_cmp(&b.price),
            SortKey::PriceDesc => b.price.total_cmp(&a.price),
            SortKey::Rating => b.rating.rate.total_cmp(&a.rating.rate),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for SortKey {
    fn from(s: String) -> Self {
        Self::from_str_lossy(&s)
    }
}

impl From<&str> for SortKey {
    fn from(s: &str) -> Self {
        Self::from_str_lossy(s)
    }
}

impl From<SortKey> for &'static str {
    fn from(key: SortKey) -> Self {
        key.as_str()
    }
}

/// Stable-sort a product list by `key`.
///
/// Products that compare equal keep their relative input order.
pub fn sort_products(mut products: Vec<Product>, key: SortKey) -> Vec<Product> {
    products.sort_by(|a, b| key.compare(a, b));
    products
}

/// Character classes in collation order.
fn char_class(c: char) -> u8 {
    if c.is_whitespace() {
        0
    } else if c.is_alphabetic() {
        3
    } else if c.is_numeric() {
        2
    } else {
        1
    }
}

fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Locale-style string comparison for display titles.
///
/// Primary level: character class (whitespace, punctuation and symbols,
/// digits, letters) then case-folded character. Tertiary level: lowercase
/// sorts before uppercase at the first case difference.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let primary = a
        .chars()
        .map(|c| (char_class(c), fold(c)))
        .cmp(b.chars().map(|c| (char_class(c), fold(c))));

    primary.then_with(|| {
        a.chars()
            .map(char::is_uppercase)
            .cmp(b.chars().map(char::is_uppercase))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_keys() {
        for key in SortKey::ALL {
            assert_eq!(SortKey::parse(key.as_str()), Some(key));
        }
    }

    #[test]
    fn test_unknown_key_falls_back_to_name() {
        assert_eq!(SortKey::parse("newest"), None);
        assert_eq!(SortKey::from_str_lossy("newest"), SortKey::Name);
        assert_eq!(SortKey::from(""), SortKey::Name);
    }

    #[test]
    fn test_serde_uses_wire_names() {
        assert_eq!(serde_json::to_string(&SortKey::PriceDesc).unwrap(), r#""price-desc""#);
        let key: SortKey = serde_json::from_str(r#""rating""#).unwrap();
        assert_eq!(key, SortKey::Rating);
        let fallback: SortKey = serde_json::from_str(r#""bogus""#).unwrap();
        assert_eq!(fallback, SortKey::Name);
    }

    #[test]
    fn test_locale_cmp_ignores_case_at_primary_level() {
        assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_cmp("Zebra", "apple"), Ordering::Greater);
        assert_eq!(locale_cmp("a", "A"), Ordering::Less);
        assert_eq!(locale_cmp("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_locale_cmp_classes() {
        assert_eq!(locale_cmp("10 pack", "Alpha"), Ordering::Less);
        assert_eq!(locale_cmp("-sale-", "1"), Ordering::Less);
        assert_eq!(locale_cmp("a b", "ab"), Ordering::Less);
        assert_eq!(locale_cmp("Test", "Test Product"), Ordering::Less);
    }

    #[test]
    fn test_price_sorts() {
        let items = vec![
            Product::new(1, "A", 30.0, "x"),
            Product::new(2, "B", 10.0, "x"),
            Product::new(3, "C", 20.0, "x"),
        ];
        let asc: Vec<u64> = sort_products(items.clone(), SortKey::PriceAsc)
            .iter()
            .map(|p| p.id.get())
            .collect();
        assert_eq!(asc, vec![2, 3, 1]);

        let desc: Vec<u64> = sort_products(items, SortKey::PriceDesc)
            .iter()
            .map(|p| p.id.get())
            .collect();
        assert_eq!(desc, vec![1, 3, 2]);
    }

    #[test]
    fn test_rating_sort_is_stable() {
        let items = vec![
            Product::new(1, "A", 1.0, "x").with_rating(4.0, 1),
            Product::new(2, "B", 1.0, "x").with_rating(4.5, 1),
            Product::new(3, "C", 1.0, "x").with_rating(4.0, 1),
            Product::new(4, "D", 1.0, "x").with_rating(4.5, 1),
        ];
        let ids: Vec<u64> = sort_products(items, SortKey::Rating)
            .iter()
            .map(|p| p.id.get())
            .collect();
        assert_eq!(ids, vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_name_sort_keeps_ties_in_input_order() {
        let items = vec![
            Product::new(5, "Mug", 1.0, "x"),
            Product::new(1, "cup", 1.0, "x"),
            Product::new(3, "Mug", 2.0, "x"),
        ];
        let ids: Vec<u64> = sort_products(items, SortKey::Name)
            .iter()
            .map(|p| p.id.get())
            .collect();
        assert_eq!(ids, vec![1, 5, 3]);
    }
}
