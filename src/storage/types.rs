use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Failure reported by a storage medium.
///
/// These never leave the [`StoreAdapter`](super::StoreAdapter); they exist so
/// backends can use `?` and the adapter can log something precise.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage database error: {0}")]
    Sqlite(#[from] sqlx::Error),

    #[error("Storage document is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage document too large: {0}")]
    TooLarge(String),

    /// The medium refused the operation (quota exceeded, disabled, ...).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

// ============================================================================
// Backend Trait
// ============================================================================

/// A key-value storage medium holding opaque string values.
///
/// Implementations report every failure. Callers that need the never-fails
/// contract go through [`StoreAdapter`](super::StoreAdapter).
pub trait KeyValueBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a key. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;

    /// Short backend name for log fields.
    fn name(&self) -> &'static str;
}

// ============================================================================
// Storage Keys
// ============================================================================

/// The three storage keys, one per persisted state slot.
///
/// Keys use the dotted convention `<prefix>.<slot>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub search: String,
    pub category: String,
    pub favorites: String,
}

impl StorageKeys {
    pub const DEFAULT_PREFIX: &'static str = "folio";

    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            search: format!("{prefix}.search"),
            category: format!("{prefix}.category"),
            favorites: format!("{prefix}.favorites"),
        }
    }

    pub fn all(&self) -> [&str; 3] {
        [&self.search, &self.category, &self.favorites]
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::with_prefix(Self::DEFAULT_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keys() {
        let keys = StorageKeys::default();
        assert_eq!(keys.search, "folio.search");
        assert_eq!(keys.category, "folio.category");
        assert_eq!(keys.favorites, "folio.favorites");
    }

    #[test]
    fn test_keys_are_distinct() {
        let keys = StorageKeys::with_prefix("club");
        let [a, b, c] = keys.all();
        assert!(a != b && b != c && a != c);
        assert!(keys.all().iter().all(|k| k.starts_with("club.")));
    }
}
