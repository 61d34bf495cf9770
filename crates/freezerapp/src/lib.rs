//! # freezerapp
//!
//! An inventory ledger for a home freezer. Items come in from barcode scans
//! or manual entry, duplicate scans merge into a quantity, depleted items
//! disappear, and the whole list survives restarts through a key-value store.
//!
//! ## Layers
//!
//! ```text
//! presentation (camera, list UI)   <- not in this crate
//!        │
//!        ▼
//!   api::FreezerApi     facade, owns all state, gates scanning
//!        │
//!        ▼
//!   commands::*         mutate-then-persist transactions
//!      │       │
//!      ▼       ▼
//!   ledger   store      pure state transitions / snapshot persistence
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use freezerapp::api::FreezerApi;
//! use freezerapp::store::memory::InMemoryStore;
//!
//! let mut api = FreezerApi::open(InMemoryStore::new()).unwrap();
//! api.scan_add("5701234567890").unwrap();
//! api.scan_add("5701234567890").unwrap();
//! assert_eq!(api.current_items()[0].qty, 2);
//! ```
//!
//! The crate logs through [`tracing`] and never installs a subscriber.

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod ledger;
pub mod model;
pub mod scanner;
pub mod store;
