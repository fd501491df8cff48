use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use super::types::{KeyValueBackend, StorageError};

#[derive(Default)]
struct Shared {
    values: RefCell<HashMap<String, String>>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
}

/// In-process key-value store.
///
/// Clones share the same map, so a test can keep a handle to inspect what a
/// [`StateStore`](crate::state::StateStore) wrote, or hand a clone to a second
/// store to simulate the next session. Failure switches apply to all clones.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    shared: Rc<Shared>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a backend with existing values.
    pub fn with_values<K, V>(values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let backend = Self::new();
        backend
            .shared
            .values
            .borrow_mut()
            .extend(values.into_iter().map(|(k, v)| (k.into(), v.into())));
        backend
    }

    pub fn fail_reads(&self, fail: bool) {
        self.shared.fail_reads.set(fail);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.shared.fail_writes.set(fail);
    }

    /// Current value of a key, bypassing failure injection.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.shared.values.borrow().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.shared.values.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.values.borrow().is_empty()
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.shared.fail_reads.get() {
            return Err(StorageError::Unavailable("reads disabled".to_string()));
        }
        Ok(self.peek(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.shared.fail_writes.get() {
            return Err(StorageError::Unavailable("quota exceeded".to_string()));
        }
        self.shared
            .values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.shared.fail_writes.get() {
            return Err(StorageError::Unavailable("writes disabled".to_string()));
        }
        self.shared.values.borrow_mut().remove(key);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
