//! # Configuration
//!
//! Freezer configuration is managed by [`clapfig`], which handles layered
//! loading from TOML files, environment variables, and compiled defaults.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `FREEZER__STORAGE_KEY`, `FREEZER__ON_CORRUPT`, ...
//! 2. **Config file**: `freezer.toml` in the data directory.
//! 3. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `storage_key` | `freezer_stock` | Key the ledger snapshot is stored under |
//! | `on_corrupt` | `reset` | What to do with an unreadable snapshot: `reset` or `fail` |
//! | `write_retries` | `2` | Extra save attempts after a failed write |

use confique::Config;
use serde::{Deserialize, Serialize};

pub const DEFAULT_STORAGE_KEY: &str = "freezer_stock";

/// Recovery policy for a stored snapshot that cannot be read back.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CorruptDataPolicy {
    /// Start from an empty ledger, keep a copy of the bad payload, warn.
    #[default]
    Reset,
    /// Refuse to open and surface the error to the caller.
    Fail,
}

/// Configuration for the freezer ledger, stored in `freezer.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FreezerConfig {
    /// Key the ledger snapshot is stored under.
    #[config(default = "freezer_stock")]
    pub storage_key: String,

    /// Policy for unreadable snapshots at startup ("reset" or "fail").
    #[config(default = "reset")]
    pub on_corrupt: CorruptDataPolicy,

    /// Extra save attempts after a failed write before giving up with a warning.
    #[config(default = 2)]
    pub write_retries: u32,
}

impl Default for FreezerConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            on_corrupt: CorruptDataPolicy::Reset,
            write_retries: 2,
        }
    }
}

impl FreezerConfig {
    /// Storage key with surrounding whitespace removed, falling back to the
    /// default when blank.
    pub fn storage_key(&self) -> &str {
        let key = self.storage_key.trim();
        if key.is_empty() {
            DEFAULT_STORAGE_KEY
        } else {
            key
        }
    }
}
