use super::backend::StorageBackend;
use crate::config::{CorruptDataPolicy, FreezerConfig};
use crate::error::{FreezerError, Result};
use crate::ledger::Ledger;

/// Result of hydrating a ledger at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome {
    pub ledger: Ledger,
    /// True when an unreadable snapshot was discarded under
    /// [`CorruptDataPolicy::Reset`].
    pub recovered: bool,
}

pub struct LedgerStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    key: String,
    on_corrupt: CorruptDataPolicy,
    write_retries: u32,
    dirty: bool,
}

impl<B: StorageBackend> LedgerStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self::with_config(backend, &FreezerConfig::default())
    }

    pub fn with_config(backend: B, config: &FreezerConfig) -> Self {
        Self {
            backend,
            key: config.storage_key().to_string(),
            on_corrupt: config.on_corrupt,
            write_retries: config.write_retries,
            dirty: false,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Key the first discarded snapshot is copied to. Later ones go to
    /// `<key>.corrupt.1`, `<key>.corrupt.2` and so on.
    pub fn corrupt_backup_key(&self) -> String {
        format!("{}.corrupt", self.key)
    }

    /// First free backup slot for `raw`, or `None` when an identical payload
    /// is already backed up (a restart before the first save).
    fn next_backup_key(&self, raw: &str) -> Result<Option<String>> {
        let base = self.corrupt_backup_key();
        let mut n = 0u32;
        loop {
            let candidate = if n == 0 {
                base.clone()
            } else {
                format!("{}.{}", base, n)
            };
            match self.backend.get(&candidate) {
                Ok(None) => return Ok(Some(candidate)),
                Ok(Some(existing)) if existing == raw => return Ok(None),
                Ok(Some(_)) | Err(FreezerError::UndecodableValue { .. }) => n += 1,
                Err(e) => return Err(e),
            }
        }
    }

    /// True when the last save did not reach the backend, i.e. the in-memory
    /// ledger is ahead of durable storage.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Reads the stored snapshot.
    ///
    /// Nothing stored (or an empty string) yields an empty ledger. An
    /// unreadable snapshot is handled according to the configured
    /// [`CorruptDataPolicy`].
    pub fn load(&self) -> Result<LoadOutcome> {
        let raw = match self.backend.get(&self.key) {
            Ok(Some(raw)) if !raw.trim().is_empty() => raw,
            Err(FreezerError::UndecodableValue { lossy, .. }) => {
                return self.recover(&lossy, "stored bytes are not valid UTF-8".to_string());
            }
            Err(e) => return Err(e),
            Ok(_) => {
                tracing::debug!(key = %self.key, "no stored snapshot, starting empty");
                return Ok(LoadOutcome {
                    ledger: Ledger::new(),
                    recovered: false,
                });
            }
        };

        match serde_json::from_str::<Ledger>(&raw) {
            Ok(ledger) => {
                tracing::info!(key = %self.key, items = ledger.len(), "loaded snapshot");
                Ok(LoadOutcome {
                    ledger,
                    recovered: false,
                })
            }
            Err(e) => self.recover(&raw, e.to_string()),
        }
    }

    fn recover(&self, raw: &str, cause: String) -> Result<LoadOutcome> {
        match self.on_corrupt {
            CorruptDataPolicy::Fail => Err(FreezerError::CorruptSnapshot {
                key: self.key.clone(),
                reason: cause,
            }),
            CorruptDataPolicy::Reset => {
                tracing::warn!(
                    key = %self.key,
                    error = %cause,
                    "stored snapshot is unreadable, starting with an empty ledger"
                );
                match self.next_backup_key(raw) {
                    Ok(Some(backup)) => {
                        if let Err(e) = self.backend.set(&backup, raw) {
                            tracing::warn!(key = %backup, error = %e, "could not keep a copy of the unreadable snapshot");
                        }
                    }
                    Ok(None) => {
                        tracing::debug!(key = %self.key, "unreadable snapshot already backed up");
                    }
                    Err(e) => {
                        tracing::warn!(key = %self.key, error = %e, "could not find a free backup key");
                    }
                }
                Ok(LoadOutcome {
                    ledger: Ledger::new(),
                    recovered: true,
                })
            }
        }
    }

    /// Writes the full ledger, replacing whatever was stored.
    ///
    /// Failed writes are retried up to `write_retries` more times. If every
    /// attempt fails the store is marked dirty and the last error returned;
    /// the caller's ledger is untouched either way.
    pub fn save(&mut self, ledger: &Ledger) -> Result<()> {
        let payload = serde_json::to_string(ledger)?;

        let mut attempt = 0;
        loop {
            match self.backend.set(&self.key, &payload) {
                Ok(()) => {
                    self.dirty = false;
                    tracing::debug!(key = %self.key, items = ledger.len(), attempt, "saved snapshot");
                    return Ok(());
                }
                Err(e) if attempt < self.write_retries => {
                    attempt += 1;
                    tracing::warn!(key = %self.key, error = %e, attempt, "snapshot write failed, retrying");
                }
                Err(e) => {
                    self.dirty = true;
                    tracing::warn!(key = %self.key, error = %e, "snapshot write failed, ledger is not durable");
                    return Err(e);
                }
            }
        }
    }
}
