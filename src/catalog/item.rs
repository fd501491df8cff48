use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Item
// ============================================================================

/// A single catalog entry.
///
/// `id` is the identity key: favorites, lookups and deduplication compare ids,
/// never whole records. The serialized field names are part of the persisted
/// favorites format and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub category: String,
}

impl Item {
    pub fn new(
        id: i64,
        title: impl Into<String>,
        author: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            category: category.into(),
        }
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in catalog file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Catalog file too large: {0}")]
    TooLarge(String),

    #[error("Duplicate item id {0} in catalog")]
    DuplicateId(i64),

    #[error("Item {0} has an empty title")]
    EmptyTitle(i64),

    /// The category name is reserved for the "no filter" sentinel.
    #[error("Item {id} uses reserved category name '{category}'")]
    ReservedCategory { id: i64, category: String },
}
