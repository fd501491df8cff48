//! The read-only item catalog.
//!
//! A [`Catalog`] is validated once at construction and never mutates. It can
//! come from the built-in list or from a TOML file of `[[items]]` tables.
use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

mod categories;
mod item;

pub use categories::{CategoryIndex, ALL_CATEGORIES};
pub use item::{CatalogError, Item};

/// Ordered, immutable sequence of items with unique ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<Item>,
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    items: Vec<Item>,
}

impl Catalog {
    /// Maximum catalog file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Build a catalog, enforcing unique ids, non-empty titles and that no
    /// item claims the sentinel category.
    pub fn new(items: Vec<Item>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id) {
                return Err(CatalogError::DuplicateId(item.id));
            }
            if item.title.trim().is_empty() {
                return Err(CatalogError::EmptyTitle(item.id));
            }
            if item.category == ALL_CATEGORIES {
                return Err(CatalogError::ReservedCategory {
                    id: item.id,
                    category: item.category.clone(),
                });
            }
        }
        Ok(Self { items })
    }

    pub fn empty() -> Self {
        Self { items: Vec::new() }
    }

    /// The school book club list shipped with the application.
    pub fn builtin() -> Self {
        Self {
            items: vec![
                Item::new(1, "Crime and Punishment", "Fyodor Dostoevsky", "Classic"),
                Item::new(
                    2,
                    "One Hundred Years of Solitude",
                    "Gabriel Garcia Marquez",
                    "Literature",
                ),
                Item::new(3, "Les Misérables", "Victor Hugo", "Classic"),
                Item::new(
                    4,
                    "JavaScript: The Good Parts",
                    "Douglas Crockford",
                    "Programming",
                ),
                Item::new(5, "Clean Code", "Robert C. Martin", "Programming"),
                Item::new(6, "The Little Prince", "Antoine de Saint-Exupéry", "Children"),
            ],
        }
    }

    /// Parse a catalog from TOML text.
    ///
    /// An empty document yields an empty catalog.
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(content)?;
        Self::new(file.items)
    }

    /// Load a catalog from a TOML file.
    ///
    /// Unlike the config file, a missing catalog file is an error: the caller
    /// asked for this catalog explicitly.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let meta = std::fs::metadata(path)?;
        if meta.len() > Self::MAX_FILE_SIZE {
            return Err(CatalogError::TooLarge(format!(
                "Catalog file is {} bytes (max {} bytes)",
                meta.len(),
                Self::MAX_FILE_SIZE
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&content)?;
        tracing::info!(path = %path.display(), items = catalog.len(), "Loaded catalog");
        Ok(catalog)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, id: i64) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
