use crate::commands::CmdResult;
use crate::ledger::Ledger;

pub fn run(ledger: &Ledger) -> CmdResult {
    CmdResult::default().with_listed_items(ledger.items().to_vec())
}
