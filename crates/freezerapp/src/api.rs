//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the
//! single entry point for a presentation layer: whatever draws the list and
//! drives the camera calls these methods and renders what comes back.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns the state**: the ledger, the store and the id generator live here
//!   and nowhere else. There are no globals.
//! - **Dispatches** to the appropriate command function
//! - **Gates scanning** through the [`ScanSession`] state machine
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `ledger.rs` and `commands/*.rs`
//! - **Device access**: No camera, no permission prompts; the host reports
//!   their outcome
//! - **Presentation concerns**: Returns data structures, not strings
//!
//! ## Ordering
//!
//! Every mutating method takes `&mut self` and saves before returning, so
//! operations apply one at a time in call order. Hosts that can receive
//! overlapping events (a rapid double tap) queue them as [`Command`]s and
//! hand them to [`FreezerApi::dispatch_all`].
//!
//! ## Generic Over StorageBackend
//!
//! `FreezerApi<B: StorageBackend>` is generic over the storage backend:
//! - Production: `FreezerApi<FsBackend>`
//! - Testing: `FreezerApi<MemBackend>`

use crate::commands::{self, CmdResult, Command};
use crate::error::Result;
use crate::ledger::{IdGenerator, IdSource, Ledger};
use crate::model::Item;
use crate::scanner::{ScanSession, ScanState};
use crate::store::{LedgerStore, StorageBackend};

/// The main API facade for freezer operations.
pub struct FreezerApi<B: StorageBackend> {
    ledger: Ledger,
    store: LedgerStore<B>,
    ids: Box<dyn IdSource>,
    scanner: ScanSession,
    recovered: bool,
}

impl<B: StorageBackend> FreezerApi<B> {
    /// Hydrates the ledger from `store` with a system-clock id generator.
    pub fn open(store: LedgerStore<B>) -> Result<Self> {
        Self::with_id_source(store, Box::new(IdGenerator::default()))
    }

    pub fn with_id_source(store: LedgerStore<B>, ids: Box<dyn IdSource>) -> Result<Self> {
        let outcome = store.load()?;
        Ok(Self {
            ledger: outcome.ledger,
            store,
            ids,
            scanner: ScanSession::new(),
            recovered: outcome.recovered,
        })
    }

    // --- User-facing operations ---

    pub fn add_manual(&mut self, name: &str) -> Result<CmdResult> {
        commands::add::run(&mut self.ledger, &mut self.store, self.ids.as_mut(), name)
    }

    pub fn scan_add(&mut self, code: &str) -> Result<CmdResult> {
        commands::scan::run(&mut self.ledger, &mut self.store, self.ids.as_mut(), code)
    }

    pub fn decrement(&mut self, id: &str) -> CmdResult {
        commands::decrement::run(&mut self.ledger, &mut self.store, id)
    }

    pub fn current_items(&self) -> &[Item] {
        self.ledger.items()
    }

    pub fn list(&self) -> CmdResult {
        commands::list::run(&self.ledger)
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    // --- Queued commands ---

    pub fn dispatch(&mut self, command: Command) -> Result<CmdResult> {
        match command {
            Command::AddManual { name } => self.add_manual(&name),
            Command::ScanAdd { code } => self.scan_add(&code),
            Command::Decrement { id } => Ok(self.decrement(&id)),
        }
    }

    /// Applies queued commands strictly in arrival order. A rejected command
    /// does not stop the ones after it.
    pub fn dispatch_all<I>(&mut self, commands: I) -> Vec<Result<CmdResult>>
    where
        I: IntoIterator<Item = Command>,
    {
        commands
            .into_iter()
            .map(|command| self.dispatch(command))
            .collect()
    }

    // --- Scan workflow ---

    pub fn scan_state(&self) -> ScanState {
        self.scanner.state()
    }

    pub fn resolve_camera_permission(&mut self, granted: bool) -> Result<ScanState> {
        self.scanner.resolve_permission(granted)
    }

    pub fn start_scan(&mut self) -> Result<()> {
        self.scanner.start()
    }

    pub fn cancel_scan(&mut self) -> bool {
        self.scanner.cancel()
    }

    /// Hands the session's one code to the ledger. The session returns to
    /// idle even if the code is then rejected.
    pub fn complete_scan(&mut self, code: &str) -> Result<CmdResult> {
        let code = self.scanner.consume(code)?;
        self.scan_add(&code)
    }

    // --- Durability ---

    /// True when the last save failed and storage is behind memory.
    pub fn is_dirty(&self) -> bool {
        self.store.is_dirty()
    }

    /// True when startup discarded an unreadable snapshot.
    pub fn recovered_from_corrupt(&self) -> bool {
        self.recovered
    }

    /// Writes the current ledger again, e.g. after a failed save.
    pub fn flush(&mut self) -> Result<()> {
        self.store.save(&self.ledger)
    }

    pub fn store(&self) -> &LedgerStore<B> {
        &self.store
    }
}
