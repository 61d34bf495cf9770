use super::ledger_store::LedgerStore;
use super::mem_backend::MemBackend;

pub type InMemoryStore = LedgerStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        LedgerStore::with_backend(MemBackend::new())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::ledger::Ledger;
    use crate::model::Item;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// Stores a snapshot holding `count` scanned items, `code-1..=code-N`.
        pub fn with_scanned(mut self, count: usize) -> Self {
            let items = (1..=count)
                .map(|i| Item::new(format!("code-{}", i), ""))
                .collect();
            let ledger = Ledger::from_items(items).unwrap();
            self.store.save(&ledger).unwrap();
            self
        }

        /// Stores a raw payload under the snapshot key.
        pub fn with_raw_snapshot(self, raw: &str) -> Self {
            self.store.backend.insert_raw(self.store.key(), raw);
            self
        }
    }
}
