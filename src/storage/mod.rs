//! Key-value persistence for the three state slots.
//!
//! Backends implement [`KeyValueBackend`] and report every failure. The
//! [`StoreAdapter`] sits between them and the state store and absorbs those
//! failures, so the core never sees a storage error.
mod adapter;
mod file;
mod memory;
mod sqlite;
mod types;

pub use adapter::StoreAdapter;
pub use file::FileBackend;
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;
pub use types::{KeyValueBackend, StorageError, StorageKeys};
