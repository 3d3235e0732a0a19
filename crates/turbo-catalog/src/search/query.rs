//! Filter specification.

use crate::search::SortKey;
use serde::{Deserialize, Serialize};

/// The user-controlled (search term, category, sort key) triple.
///
/// An empty `selected_category` means "all categories".
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSpec {
    /// Free-text search term.
    pub search_term: String,
    /// Exact category name, or empty for all.
    pub selected_category: String,
    /// Sort applied after filtering.
    pub sort_key: SortKey,
}

impl FilterSpec {
    /// Create a spec that shows everything sorted by name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search term.
    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    /// Set the category filter.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.selected_category = category.into();
        self
    }

    /// Set the sort key.
    pub fn with_sort_key(mut self, key: SortKey) -> Self {
        self.sort_key = key;
        self
    }

    /// The trimmed search term, if it is non-empty.
    pub fn search(&self) -> Option<&str> {
        let term = self.search_term.trim();
        (!term.is_empty()).then_some(term)
    }

    /// The selected category, if any.
    pub fn category(&self) -> Option<&str> {
        (!self.selected_category.is_empty()).then_some(self.selected_category.as_str())
    }

    /// Whether any filter or a non-default sort is in effect.
    pub fn has_active_filters(&self) -> bool {
        !self.search_term.is_empty()
            || !self.selected_category.is_empty()
            || self.sort_key != SortKey::Name
    }

    /// Reset to defaults.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
