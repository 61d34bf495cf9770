use crate::error::Result;

/// Abstract interface for raw key-value storage.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while LedgerStore handles the "what" (snapshot format, recovery, retries).
pub trait StorageBackend {
    /// Read the value stored under `key`.
    /// Returns Ok(None) if nothing has been stored yet.
    /// Returns Err only on actual I/O errors (permissions, disk failure).
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
