use super::{CmdMessage, CmdResult};
use crate::ledger::{Ledger, LedgerChange};
use crate::store::{LedgerStore, StorageBackend};

/// Persists `ledger` if `change` mutated it and describes the outcome.
pub fn commit<B: StorageBackend>(
    store: &mut LedgerStore<B>,
    ledger: &Ledger,
    change: LedgerChange,
) -> CmdResult {
    let mut result = CmdResult::default();

    if let Some(message) = describe(&change) {
        result.add_message(message);
    }
    if let Some(item) = change.item() {
        result.affected_items.push(item.clone());
    }

    if change.is_mutation() {
        match store.save(ledger) {
            Ok(()) => result.persisted = true,
            Err(e) => result.add_message(CmdMessage::warning(format!(
                "Change kept for this session but not saved: {}",
                e
            ))),
        }
    }

    result.change = Some(change);
    result
}

fn describe(change: &LedgerChange) -> Option<CmdMessage> {
    let message = match change {
        LedgerChange::Added(item) => CmdMessage::success(format!("Added {}", item.name)),
        LedgerChange::Incremented(item) | LedgerChange::Decremented(item) => {
            CmdMessage::success(format!("{}: x{}", item.name, item.qty))
        }
        LedgerChange::Removed(item) => CmdMessage::success(format!("Removed {}", item.name)),
        LedgerChange::Unchanged => return None,
    };
    Some(message)
}
