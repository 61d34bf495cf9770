use super::backend::StorageBackend;
use crate::error::{FreezerError, Result};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// In-memory storage backend for testing and ephemeral sessions.
///
/// Uses `RefCell` for interior mutability since the ledger is single-writer.
/// This keeps the `StorageBackend` trait on `&self` without a lock.
#[derive(Default)]
pub struct MemBackend {
    values: RefCell<HashMap<String, String>>,
    simulate_write_error: Cell<bool>,
    failing_writes: Cell<u32>,
    write_count: Cell<usize>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Fail only the next `count` writes, then recover.
    pub fn fail_next_writes(&self, count: u32) {
        self.failing_writes.set(count);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.write_count.get()
    }

    /// Test helper to seed a raw value, bypassing any serialization.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

impl StorageBackend for MemBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(FreezerError::Store("Simulated write error".to_string()));
        }
        let pending = self.failing_writes.get();
        if pending > 0 {
            self.failing_writes.set(pending - 1);
            return Err(FreezerError::Store("Simulated write error".to_string()));
        }

        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.write_count.set(self.write_count.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_none() {
        let backend = MemBackend::new();
        assert_eq!(backend.get("freezer_stock").unwrap(), None);
    }

    #[test]
    fn set_replaces_value() {
        let backend = MemBackend::new();
        backend.set("k", "one").unwrap();
        backend.set("k", "two").unwrap();
        assert_eq!(backend.get("k").unwrap(), Some("two".to_string()));
        assert_eq!(backend.write_count(), 2);
    }

    #[test]
    fn simulated_error_keeps_old_value() {
        let backend = MemBackend::new();
        backend.set("k", "one").unwrap();
        backend.set_simulate_write_error(true);
        assert!(backend.set("k", "two").is_err());
        assert_eq!(backend.get("k").unwrap(), Some("one".to_string()));
    }

    #[test]
    fn fail_next_writes_recovers() {
        let backend = MemBackend::new();
        backend.fail_next_writes(2);
        assert!(backend.set("k", "v").is_err());
        assert!(backend.set("k", "v").is_err());
        assert!(backend.set("k", "v").is_ok());
    }
}
