use super::Catalog;

/// Sentinel category meaning "no category filter applied".
///
/// [`Catalog::new`] rejects items using this name so it can never collide
/// with a real category.
pub const ALL_CATEGORIES: &str = "all";

/// Ordered set of selectable categories: the sentinel first, then each
/// distinct item category in first-occurrence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryIndex {
    entries: Vec<String>,
}

impl CategoryIndex {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut entries = vec![ALL_CATEGORIES.to_string()];
        for item in catalog.items() {
            if !entries.iter().any(|c| c == &item.category) {
                entries.push(item.category.clone());
            }
        }
        Self { entries }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.entries.iter().any(|c| c == category)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: the sentinel is present even for an empty catalog.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
