use thiserror::Error;

use crate::scanner::{ScanAction, ScanState};

#[derive(Error, Debug)]
pub enum FreezerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Stored snapshot under '{key}' is unreadable: {reason}")]
    CorruptSnapshot { key: String, reason: String },

    /// The backend holds bytes under `key` that are not valid UTF-8.
    /// `lossy` keeps a best-effort copy for backups.
    #[error("Value under '{key}' is not valid UTF-8")]
    UndecodableValue { key: String, lossy: String },

    /// A freshly generated id matched an item already in the ledger.
    /// Never recoverable: appending would break id uniqueness.
    #[error("Generated id '{0}' collides with an existing item")]
    IdCollision(String),

    #[error("Quantity of '{0}' cannot go above {max}", max = u32::MAX)]
    QuantityOverflow(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Cannot {action} while scanner is {from}")]
    InvalidScanTransition { from: ScanState, action: ScanAction },

    #[error("Scanning is unavailable: camera permission was denied")]
    ScanUnavailable,

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, FreezerError>;
