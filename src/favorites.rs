//! Favorite set operations and the persisted favorites encoding.
//!
//! Favorites are full [`Item`] snapshots taken when the item was marked, kept
//! in the order they were added. Membership is decided by `id` alone.
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::catalog::Item;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoriteSet(Vec<Item>);

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from raw entries, keeping the first entry for each id.
    pub fn from_items(items: Vec<Item>) -> Self {
        let mut seen = HashSet::with_capacity(items.len());
        let entries = items.into_iter().filter(|i| seen.insert(i.id)).collect();
        Self(entries)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.0.iter().any(|fav| fav.id == id)
    }

    pub fn items(&self) -> &[Item] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self) -> Vec<i64> {
        self.0.iter().map(|fav| fav.id).collect()
    }
}

/// Remove every entry sharing `item.id`, or append a snapshot of `item` if
/// there was none.
pub fn toggle(favorites: &FavoriteSet, item: &Item) -> FavoriteSet {
    if favorites.contains(item.id) {
        FavoriteSet(
            favorites
                .0
                .iter()
                .filter(|fav| fav.id != item.id)
                .cloned()
                .collect(),
        )
    } else {
        let mut entries = favorites.0.clone();
        entries.push(item.clone());
        FavoriteSet(entries)
    }
}

pub fn is_favorite(favorites: &FavoriteSet, id: i64) -> bool {
    favorites.contains(id)
}

// ============================================================================
// Persisted Encoding
// ============================================================================

/// Encode as a JSON array of `{id, title, author, category}` objects.
pub fn encode(favorites: &FavoriteSet) -> String {
    // Serializing plain strings and integers cannot fail.
    serde_json::to_string(&favorites.0).unwrap_or_else(|_| "[]".to_string())
}

/// Decode a stored payload, falling back to the empty set.
///
/// Absent values are the normal first-run case and log nothing. Malformed
/// JSON or records of the wrong shape log a warning and yield an empty set.
pub fn decode_or_default(raw: Option<&str>) -> FavoriteSet {
    let Some(raw) = raw else {
        return FavoriteSet::new();
    };

    match serde_json::from_str::<Vec<Item>>(raw) {
        Ok(items) => {
            let count = items.len();
            let set = FavoriteSet::from_items(items);
            if set.len() != count {
                tracing::debug!(
                    stored = count,
                    kept = set.len(),
                    "Dropped duplicate favorite entries"
                );
            }
            set
        }
        Err(e) => {
            tracing::warn!(error = %e, "Stored favorites are unreadable, starting with none");
            FavoriteSet::new()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn crime() -> Item {
        Item::new(1, "Crime and Punishment", "Fyodor Dostoevsky", "Classic")
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let empty = FavoriteSet::new();
        let once = toggle(&empty, &crime());
        assert_eq!(once.items(), &[crime()]);

        let twice = toggle(&once, &crime());
        assert!(twice.is_empty());
    }

    #[test]
    fn test_toggle_does_not_mutate_input() {
        let empty = FavoriteSet::new();
        let _ = toggle(&empty, &crime());
        assert!(empty.is_empty());
    }

    #[test]
    fn test_toggle_appends_in_insertion_order() {
        let catalog = Catalog::builtin();
        let mut set = FavoriteSet::new();
        for id in [5, 1, 3] {
            set = toggle(&set, catalog.get(id).unwrap());
        }
        assert_eq!(set.ids(), vec![5, 1, 3]);
    }

    #[test]
    fn test_membership_by_id_only() {
        let set = toggle(&FavoriteSet::new(), &crime());
        let renamed = Item::new(1, "Different Title", "Someone", "Other");

        assert!(is_favorite(&set, 1));
        // Same id, different fields: removes the stored snapshot.
        let removed = toggle(&set, &renamed);
        assert!(removed.is_empty());
    }

    #[test]
    fn test_toggle_removes_all_duplicates() {
        // Bypass from_items deduplication to simulate a corrupted set.
        let dup = FavoriteSet(vec![crime(), crime()]);
        let removed = toggle(&dup, &crime());
        assert!(removed.is_empty());
    }

    #[test]
    fn test_snapshot_is_kept() {
        let set = toggle(&FavoriteSet::new(), &crime());
        assert_eq!(set.items()[0].title, "Crime and Punishment");
    }

    #[test]
    fn test_encode_field_names() {
        let set = toggle(&FavoriteSet::new(), &crime());
        let json = encode(&set);
        assert_eq!(
            json,
            r#"[{"id":1,"title":"Crime and Punishment","author":"Fyodor Dostoevsky","category":"Classic"}]"#
        );
        assert_eq!(encode(&FavoriteSet::new()), "[]");
    }

    #[test]
    fn test_round_trip_sizes_zero_one_three() {
        let catalog = Catalog::builtin();
        for ids in [vec![], vec![2], vec![6, 4, 1]] {
            let mut set = FavoriteSet::new();
            for id in &ids {
                set = toggle(&set, catalog.get(*id).unwrap());
            }
            let decoded = decode_or_default(Some(&encode(&set)));
            assert_eq!(decoded, set);
        }
    }

    #[test]
    fn test_decode_absent_is_empty() {
        assert!(decode_or_default(None).is_empty());
    }

    #[test]
    fn test_decode_corrupt_is_empty() {
        for raw in ["not valid json {{", "", "null", "{}", "[1,2,3]", r#"[{"id":"x"}]"#] {
            assert!(decode_or_default(Some(raw)).is_empty(), "payload: {raw:?}");
        }
    }

    #[test]
    fn test_decode_collapses_duplicate_ids() {
        let raw = r#"[
            {"id":1,"title":"First","author":"a","category":"c"},
            {"id":2,"title":"Second","author":"b","category":"c"},
            {"id":1,"title":"Again","author":"a","category":"c"}
        ]"#;
        let set = decode_or_default(Some(raw));
        assert_eq!(set.ids(), vec![1, 2]);
        assert_eq!(set.items()[0].title, "First");
    }

    proptest! {
        #[test]
        fn prop_toggle_twice_is_identity(start in proptest::collection::vec(1i64..=6, 0..6), pick in 1i64..=6) {
            let catalog = Catalog::builtin();
            let mut set = FavoriteSet::new();
            for id in start {
                set = toggle(&set, catalog.get(id).unwrap());
            }
            let item = catalog.get(pick).unwrap();
            let back = toggle(&toggle(&set, item), item);

            let mut before = set.ids();
            let mut after = back.ids();
            before.sort_unstable();
            after.sort_unstable();
            prop_assert_eq!(before, after);
        }

        #[test]
        fn prop_ids_stay_unique(sequence in proptest::collection::vec(1i64..=6, 0..32)) {
            let catalog = Catalog::builtin();
            let mut set = FavoriteSet::new();
            for id in sequence {
                set = toggle(&set, catalog.get(id).unwrap());
                let ids = set.ids();
                let unique: HashSet<i64> = ids.iter().copied().collect();
                prop_assert_eq!(unique.len(), ids.len());
            }
        }
    }
}
