use crate::commands::helpers::commit;
use crate::commands::{CmdMessage, CmdResult};
use crate::ledger::Ledger;
use crate::store::{LedgerStore, StorageBackend};

/// Takes one unit of `id` out. Unknown ids are not an error; nothing is
/// written in that case.
pub fn run<B: StorageBackend>(
    ledger: &mut Ledger,
    store: &mut LedgerStore<B>,
    id: &str,
) -> CmdResult {
    let change = ledger.decrement(id);
    let unchanged = !change.is_mutation();

    let mut result = commit(store, ledger, change);
    if unchanged {
        result.add_message(CmdMessage::info(format!("No item with id {}", id)));
    }
    result
}
