//! Title search and category filtering over a [`Catalog`].
//!
//! Matching is a plain case-insensitive substring test on the title. There is
//! no ranking: results always come back in catalog order.
use crate::catalog::{Catalog, Item, ALL_CATEGORIES};

/// Trim outer whitespace, then case-fold.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Items whose category matches `category` (or any, for the sentinel) and
/// whose normalized title contains the normalized `search`.
///
/// An empty or whitespace-only search matches every title. A category that
/// no item carries yields an empty result rather than an error.
pub fn filter_items<'a>(catalog: &'a Catalog, search: &str, category: &str) -> Vec<&'a Item> {
    let needle = normalize(search);
    let any_category = category == ALL_CATEGORIES;

    catalog
        .items()
        .iter()
        .filter(|item| any_category || item.category == category)
        .filter(|item| needle.is_empty() || normalize(&item.title).contains(&needle))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
