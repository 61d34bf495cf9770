//! # Command Layer
//!
//! Each user-facing operation lives in its own submodule as a plain `run`
//! function. A command is one **mutate-then-persist transaction**:
//!
//! 1. Validate the input at the boundary (blank names, empty scan codes).
//! 2. Apply the ledger operation.
//! 3. If the ledger changed, save the full snapshot before returning.
//!
//! Because every command borrows the ledger and the store mutably, a second
//! command cannot start until the previous save has finished. That is what
//! keeps a stale snapshot from overwriting a newer one.
//!
//! ## Structured Returns
//!
//! Commands return [`CmdResult`], not strings:
//! - `affected_items`: the item touched by the operation, as it is now
//! - `listed_items`: items to display (for [`list`])
//! - `messages`: leveled messages (info, success, warning)
//!
//! A failed save is *not* an error. The ledger keeps the change and the
//! result carries a warning, so the app stays usable without durability.
//!
//! ## Command Modules
//!
//! - [`add`]: Manual entry by name
//! - [`scan`]: Add from a scanned code
//! - [`decrement`]: Take one unit out
//! - [`list`]: Current items
//! - [`helpers`]: Shared commit logic

use crate::ledger::LedgerChange;
use crate::model::Item;
use serde::Serialize;

pub mod add;
pub mod decrement;
pub mod helpers;
pub mod list;
pub mod scan;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub change: Option<LedgerChange>,
    pub affected_items: Vec<Item>,
    pub listed_items: Vec<Item>,
    pub messages: Vec<CmdMessage>,
    /// True only when this command wrote the snapshot. No-ops and reads
    /// leave it false; so does a failed save, which also adds a warning.
    pub persisted: bool,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_items(mut self, items: Vec<Item>) -> Self {
        self.listed_items = items;
        self
    }

    pub fn has_warnings(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Warning)
    }
}

/// A user request, as queued by a host that can receive overlapping events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddManual { name: String },
    ScanAdd { code: String },
    Decrement { id: String },
}
