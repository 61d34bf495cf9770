//! # The Ledger
//!
//! The ledger is the authoritative in-memory list of freezer items. It is a
//! pure state machine: every operation takes the current collection and
//! leaves behind the next one. It never touches storage, that is the job of
//! [`crate::store::LedgerStore`], and callers are expected to persist the
//! ledger after each mutation (see [`crate::commands`]).
//!
//! ## Invariants
//!
//! - At most one [`Item`] per `id`.
//! - Every item present has `qty >= 1`.
//! - Insertion order is preserved: new items append at the end, removed
//!   items leave no gap.
//!
//! ## Identity Resolution
//!
//! A non-empty scan code *is* the id, so scanning the same package twice
//! merges into one entry. Manual entries without a code get a generated id
//! from an [`IdSource`], so two manual adds of "Peas" stay two entries.
//!
//! The default [`IdGenerator`] issues millisecond timestamps. Ids are strictly
//! increasing within a run and skip anything already in the ledger, so a
//! generated id never matches an existing or previously issued one.
//!
//! ## Operations
//!
//! | Operation | Existing id | Unknown id |
//! |-----------|-------------|------------|
//! | [`Ledger::add_or_increment`] | `qty + 1`, name kept | append with `qty = 1` |
//! | [`Ledger::decrement`] | `qty - 1`, removed at 0 | no-op |
//! | [`Ledger::scan_to_add`] | as add, no name | as add, placeholder name |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{FreezerError, Result};
use crate::model::Item;

/// What a ledger operation did. Carries the item as it looks afterwards
/// (for [`LedgerChange::Removed`], as it looked when it hit zero).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerChange {
    Added(Item),
    Incremented(Item),
    Decremented(Item),
    Removed(Item),
    Unchanged,
}

impl LedgerChange {
    /// Whether the collection differs from before the operation.
    pub fn is_mutation(&self) -> bool {
        !matches!(self, LedgerChange::Unchanged)
    }

    pub fn item(&self) -> Option<&Item> {
        match self {
            LedgerChange::Added(item)
            | LedgerChange::Incremented(item)
            | LedgerChange::Decremented(item)
            | LedgerChange::Removed(item) => Some(item),
            LedgerChange::Unchanged => None,
        }
    }
}

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Source of ids for items added without a code.
pub trait IdSource {
    fn next_id(&mut self, ledger: &Ledger) -> String;
}

/// Timestamp-based id source.
pub struct IdGenerator {
    clock: Box<dyn Clock>,
    last_issued: Option<i64>,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(Box::new(SystemClock))
    }
}

impl IdGenerator {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self {
            clock,
            last_issued: None,
        }
    }
}

impl IdSource for IdGenerator {
    fn next_id(&mut self, ledger: &Ledger) -> String {
        let now = self.clock.now().timestamp_millis();
        let mut candidate = match self.last_issued {
            Some(last) => now.max(last + 1),
            None => now,
        };
        // Scanned codes are free-form, one may look like a timestamp.
        while ledger.contains(&candidate.to_string()) {
            candidate += 1;
        }
        self.last_issued = Some(candidate);
        candidate.to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Ledger {
    items: Vec<Item>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ledger from an existing collection, checking the invariants.
    pub fn from_items(items: Vec<Item>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if item.qty == 0 {
                return Err(FreezerError::InvalidInput(format!(
                    "item '{}' has quantity 0",
                    item.id
                )));
            }
            if !seen.insert(item.id.as_str()) {
                return Err(FreezerError::InvalidInput(format!(
                    "duplicate item id '{}'",
                    item.id
                )));
            }
        }
        Ok(Self { items })
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn into_items(self) -> Vec<Item> {
        self.items
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities across all items.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.qty)).sum()
    }

    /// Resolves the id for an incoming observation.
    ///
    /// A non-empty `code` is used as is. Otherwise a new id is drawn from
    /// `ids`; if that id is already taken the ledger refuses it with
    /// [`FreezerError::IdCollision`].
    pub fn resolve_id(&self, code: &str, ids: &mut dyn IdSource) -> Result<String> {
        if !code.is_empty() {
            return Ok(code.to_string());
        }

        let id = ids.next_id(self);
        if self.contains(&id) {
            tracing::error!(id = %id, "generated id collides with an existing item");
            return Err(FreezerError::IdCollision(id));
        }
        Ok(id)
    }

    /// Records one more unit of an item, adding it if it is new.
    ///
    /// The existing display name always wins over `name`. Calling this with
    /// both `code` and `name` empty is not an error: the item gets a generated
    /// id and a placeholder name.
    ///
    /// Incrementing an item already at `u32::MAX` fails with
    /// [`FreezerError::QuantityOverflow`] and leaves the ledger unchanged.
    pub fn add_or_increment(
        &mut self,
        code: &str,
        name: &str,
        ids: &mut dyn IdSource,
    ) -> Result<LedgerChange> {
        let id = self.resolve_id(code, ids)?;

        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.qty = item
                .qty
                .checked_add(1)
                .ok_or_else(|| FreezerError::QuantityOverflow(item.id.clone()))?;
            return Ok(LedgerChange::Incremented(item.clone()));
        }

        let item = Item::new(id, name);
        self.items.push(item.clone());
        Ok(LedgerChange::Added(item))
    }

    /// A completed scan: the code is the id and there is never a name.
    pub fn scan_to_add(&mut self, raw_code: &str, ids: &mut dyn IdSource) -> Result<LedgerChange> {
        self.add_or_increment(raw_code, "", ids)
    }

    /// Takes one unit out. Items reaching zero are dropped; unknown ids are
    /// ignored.
    pub fn decrement(&mut self, id: &str) -> LedgerChange {
        let Some(pos) = self.items.iter().position(|item| item.id == id) else {
            return LedgerChange::Unchanged;
        };

        let item = &mut self.items[pos];
        item.qty = item.qty.saturating_sub(1);
        if item.qty == 0 {
            LedgerChange::Removed(self.items.remove(pos))
        } else {
            LedgerChange::Decremented(item.clone())
        }
    }
}

impl<'de> Deserialize<'de> for Ledger {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let items = Vec::<Item>::deserialize(deserializer)?;
        Ledger::from_items(items).map_err(serde::de::Error::custom)
    }
}
