use crate::commands::helpers::commit;
use crate::commands::CmdResult;
use crate::error::{FreezerError, Result};
use crate::ledger::{IdSource, Ledger};
use crate::store::{LedgerStore, StorageBackend};

/// Adds one unit for a scanned code. The code is opaque: anything non-empty
/// is accepted verbatim as the item id.
pub fn run<B: StorageBackend>(
    ledger: &mut Ledger,
    store: &mut LedgerStore<B>,
    ids: &mut dyn IdSource,
    code: &str,
) -> Result<CmdResult> {
    if code.is_empty() {
        return Err(FreezerError::InvalidInput(
            "Scan code cannot be empty".to_string(),
        ));
    }

    let change = ledger.scan_to_add(code, ids)?;
    Ok(commit(store, ledger, change))
}
