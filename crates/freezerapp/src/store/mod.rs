//! # Storage Layer
//!
//! This module is the persistence bridge between the in-memory [`Ledger`]
//! and whatever durable key-value storage the host provides.
//!
//! ## Split of Responsibilities
//!
//! - [`backend::StorageBackend`]: raw `get`/`set` of strings by key. Knows
//!   nothing about items.
//! - [`ledger_store::LedgerStore`]: the snapshot format, corrupt-data
//!   recovery and write retries. Knows nothing about files or memory.
//!
//! ## Snapshot Semantics
//!
//! - **One key, whole ledger**: the full item list is stored under a single
//!   key (`freezer_stock` by default) as a JSON array.
//! - **Total replacement**: every save rewrites the whole snapshot. There is
//!   no append log, so a save can never leave a half-applied change.
//! - **Memory is authoritative**: a failed write never rolls back the
//!   ledger. The store is marked dirty and the next save catches up.
//!
//! ## Corrupt Snapshots
//!
//! A snapshot that is not UTF-8, does not parse, has a zero quantity, or
//! repeats an id is treated as corrupt. Under the default
//! [`CorruptDataPolicy::Reset`] the ledger starts empty, a warning is logged
//! and the raw payload is copied to the first free key among `<key>.corrupt`,
//! `<key>.corrupt.1`, `<key>.corrupt.2`... Earlier backups are never
//! overwritten, and a payload already backed up is not copied again. Under [`CorruptDataPolicy::Fail`] loading returns
//! [`FreezerError::CorruptSnapshot`].
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: snapshot files in a data directory.
//! - [`memory::InMemoryStore`]: for testing logic without filesystem I/O.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── freezer.toml                 # Optional configuration
//! ├── freezer_stock.json           # Ledger snapshot
//! ├── freezer_stock.corrupt.json   # First discarded snapshot, if any
//! └── freezer_stock.corrupt.1.json # Later ones, numbered
//! ```
//!
//! [`Ledger`]: crate::ledger::Ledger
//! [`CorruptDataPolicy::Reset`]: crate::config::CorruptDataPolicy::Reset
//! [`CorruptDataPolicy::Fail`]: crate::config::CorruptDataPolicy::Fail
//! [`FreezerError::CorruptSnapshot`]: crate::error::FreezerError::CorruptSnapshot

pub mod backend;
pub mod fs;
pub mod fs_backend;
pub mod ledger_store;
pub mod mem_backend;
pub mod memory;

pub use backend::StorageBackend;
pub use ledger_store::{LedgerStore, LoadOutcome};
