//! Catalog browser core.
//!
//! Holds a fixed, ordered catalog of items and the three pieces of user state
//! layered over it: the search text, the selected category and the favorite
//! set. Each state slot is read from a key-value store at startup and written
//! back after every change.
//!
//! - [`catalog`]: items, catalog validation and the category index
//! - [`filter`]: title search + category filtering
//! - [`favorites`]: favorite set toggling and its persisted encoding
//! - [`storage`]: key-value backends and the failure-isolating adapter
//! - [`state`]: the state store tying everything together
//!
//! # Examples
//!
//! ```
//! use folio::catalog::Catalog;
//! use folio::state::StateStore;
//! use folio::storage::{MemoryBackend, StorageKeys, StoreAdapter};
//!
//! let adapter = StoreAdapter::new(MemoryBackend::new());
//! let mut store = StateStore::initialize(Catalog::builtin(), adapter, StorageKeys::default());
//!
//! store.set_search_text("code");
//! let titles: Vec<&str> = store.filtered().iter().map(|i| i.title.as_str()).collect();
//! assert_eq!(titles, vec!["Clean Code"]);
//! ```

pub mod catalog;
pub mod config;
pub mod favorites;
pub mod filter;
pub mod state;
pub mod storage;
