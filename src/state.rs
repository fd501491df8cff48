//! The state store: search text, selected category and favorites.
//!
//! Each slot is loaded from storage once in [`StateStore::initialize`] and
//! written back by the mutator that changed it, before the mutator returns.
//! Slots persist under separate keys, so a failed write of one never touches
//! the others. Storage problems are absorbed by the [`StoreAdapter`]; no
//! method here returns an error.
use crate::catalog::{Catalog, CategoryIndex, Item, ALL_CATEGORIES};
use crate::favorites::{self, FavoriteSet};
use crate::filter::filter_items;
use crate::storage::{StorageKeys, StoreAdapter};

pub struct StateStore {
    catalog: Catalog,
    categories: CategoryIndex,
    keys: StorageKeys,
    adapter: StoreAdapter,
    search_text: String,
    category: String,
    favorites: FavoriteSet,
}

impl StateStore {
    /// Load all three slots from storage, substituting defaults.
    ///
    /// - search text: raw stored string, or `""`
    /// - category: stored value if it names a known category, else the sentinel
    /// - favorites: decoded set, or empty if absent or unreadable
    pub fn initialize(catalog: Catalog, adapter: StoreAdapter, keys: StorageKeys) -> Self {
        let categories = CategoryIndex::from_catalog(&catalog);

        let search_text = adapter.read(&keys.search).unwrap_or_default();

        let category = match adapter.read(&keys.category) {
            Some(stored) if categories.contains(&stored) => stored,
            Some(stored) if !stored.is_empty() => {
                tracing::warn!(
                    category = %stored,
                    "Stored category is not in the catalog, showing all"
                );
                ALL_CATEGORIES.to_string()
            }
            _ => ALL_CATEGORIES.to_string(),
        };

        let favorites = favorites::decode_or_default(adapter.read(&keys.favorites).as_deref());

        tracing::debug!(
            backend = adapter.backend_name(),
            search = %search_text,
            category = %category,
            favorites = favorites.len(),
            "Restored browsing state"
        );

        Self {
            catalog,
            categories,
            keys,
            adapter,
            search_text,
            category,
            favorites,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn categories(&self) -> &CategoryIndex {
        &self.categories
    }

    /// Raw search text, with its original casing and whitespace.
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn selected_category(&self) -> &str {
        &self.category
    }

    pub fn favorites(&self) -> &FavoriteSet {
        &self.favorites
    }

    pub fn is_favorite(&self, id: i64) -> bool {
        favorites::is_favorite(&self.favorites, id)
    }

    /// Catalog items matching the current search text and category.
    pub fn filtered(&self) -> Vec<&Item> {
        filter_items(&self.catalog, &self.search_text, &self.category)
    }

    pub fn adapter(&self) -> &StoreAdapter {
        &self.adapter
    }

    // ========================================================================
    // Mutators
    // ========================================================================

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.adapter.write(&self.keys.search, &self.search_text);
    }

    /// Not validated against the category index: an unknown category simply
    /// filters everything out.
    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
        self.adapter.write(&self.keys.category, &self.category);
    }

    pub fn toggle_favorite(&mut self, item: &Item) {
        self.favorites = favorites::toggle(&self.favorites, item);
        self.persist_favorites();
    }

    pub fn clear_favorites(&mut self) {
        self.favorites = FavoriteSet::new();
        self.persist_favorites();
    }

    /// Restore every slot to its default and remove all three keys.
    pub fn reset(&mut self) {
        self.search_text.clear();
        self.category = ALL_CATEGORIES.to_string();
        self.favorites = FavoriteSet::new();
        for key in self.keys.all() {
            self.adapter.clear(key);
        }
        tracing::info!("Cleared browsing state");
    }

    fn persist_favorites(&mut self) {
        let encoded = favorites::encode(&self.favorites);
        self.adapter.write(&self.keys.favorites, &encoded);
    }
}

// ============================================================================
// Tests
// ============================================================================
