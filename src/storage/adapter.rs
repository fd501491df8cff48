use super::types::KeyValueBackend;

/// Failure-isolating front for a [`KeyValueBackend`].
///
/// Nothing here returns an error. A failed read looks exactly like a missing
/// key, and a failed write is logged and counted but otherwise ignored. The
/// in-memory state held by the caller stays authoritative either way.
pub struct StoreAdapter {
    backend: Box<dyn KeyValueBackend>,
    failed_writes: u64,
}

impl StoreAdapter {
    pub fn new(backend: impl KeyValueBackend + 'static) -> Self {
        Self::from_boxed(Box::new(backend))
    }

    pub fn from_boxed(backend: Box<dyn KeyValueBackend>) -> Self {
        Self {
            backend,
            failed_writes: 0,
        }
    }

    pub fn read(&self, key: &str) -> Option<String> {
        match self.backend.get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(
                    backend = self.backend.name(),
                    key = %key,
                    error = %e,
                    "Storage read failed, treating as absent"
                );
                None
            }
        }
    }

    pub fn write(&mut self, key: &str, value: &str) {
        if let Err(e) = self.backend.set(key, value) {
            self.failed_writes += 1;
            tracing::warn!(
                backend = self.backend.name(),
                key = %key,
                error = %e,
                "Storage write failed, keeping in-memory value"
            );
        }
    }

    pub fn clear(&mut self, key: &str) {
        if let Err(e) = self.backend.remove(key) {
            self.failed_writes += 1;
            tracing::warn!(
                backend = self.backend.name(),
                key = %key,
                error = %e,
                "Storage clear failed"
            );
        }
    }

    /// Number of writes and clears the backend rejected so far.
    pub fn failed_writes(&self) -> u64 {
        self.failed_writes
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBackend;

    #[test]
    fn test_read_write_pass_through() {
        let backend = MemoryBackend::new();
        let mut adapter = StoreAdapter::new(backend.clone());

        adapter.write("k", "v");
        assert_eq!(adapter.read("k").as_deref(), Some("v"));
        assert_eq!(backend.peek("k").as_deref(), Some("v"));
        assert_eq!(adapter.failed_writes(), 0);
    }

    #[test]
    fn test_read_failure_is_absent() {
        let backend = MemoryBackend::with_values([("k", "v")]);
        backend.fail_reads(true);
        let adapter = StoreAdapter::new(backend);
        assert_eq!(adapter.read("k"), None);
    }

    #[test]
    fn test_write_failure_is_counted_not_raised() {
        let backend = MemoryBackend::new();
        backend.fail_writes(true);
        let mut adapter = StoreAdapter::new(backend.clone());

        adapter.write("k", "v");
        adapter.clear("k");
        assert_eq!(adapter.failed_writes(), 2);
        assert_eq!(backend.peek("k"), None);
    }

    #[test]
    fn test_clear_removes_key() {
        let backend = MemoryBackend::with_values([("k", "v")]);
        let mut adapter = StoreAdapter::new(backend.clone());
        adapter.clear("k");
        assert_eq!(adapter.read("k"), None);
        assert!(backend.is_empty());
    }

    #[test]
    fn test_backend_name() {
        let adapter = StoreAdapter::new(MemoryBackend::new());
        assert_eq!(adapter.backend_name(), "memory");
    }
}
