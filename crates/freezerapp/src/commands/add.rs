use crate::commands::helpers::commit;
use crate::commands::CmdResult;
use crate::error::{FreezerError, Result};
use crate::ledger::{IdSource, Ledger};
use crate::store::{LedgerStore, StorageBackend};

/// Manual entry: there is no code, so every call creates a new item.
pub fn run<B: StorageBackend>(
    ledger: &mut Ledger,
    store: &mut LedgerStore<B>,
    ids: &mut dyn IdSource,
    name: &str,
) -> Result<CmdResult> {
    let name = name.trim();
    if name.is_empty() {
        return Err(FreezerError::InvalidInput(
            "Item name cannot be empty".to_string(),
        ));
    }

    let change = ledger.add_or_increment("", name, ids)?;
    Ok(commit(store, ledger, change))
}
