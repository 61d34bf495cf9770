use super::fs_backend::FsBackend;
use super::ledger_store::LedgerStore;
use crate::config::FreezerConfig;
use std::path::PathBuf;

pub type FileStore = LedgerStore<FsBackend>;

impl FileStore {
    pub fn new_fs(root: PathBuf, config: &FreezerConfig) -> Self {
        LedgerStore::with_config(FsBackend::new(root), config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Ledger;
    use crate::model::Item;
    use tempfile::TempDir;

    #[test]
    fn snapshot_survives_a_new_store() {
        let dir = TempDir::new().unwrap();
        let config = FreezerConfig::default();
        let ledger = Ledger::from_items(vec![Item::new("111", ""), Item::new("222", "Fish")]).unwrap();

        let mut first = FileStore::new_fs(dir.path().to_path_buf(), &config);
        first.save(&ledger).unwrap();

        let second = FileStore::new_fs(dir.path().to_path_buf(), &config);
        assert_eq!(second.load().unwrap().ledger, ledger);
        assert!(dir.path().join("freezer_stock.json").exists());
    }

    #[test]
    fn creates_missing_data_dir_on_save() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("nested").join("data");
        let mut store = FileStore::new_fs(root.clone(), &FreezerConfig::default());

        assert!(store.load().unwrap().ledger.is_empty());
        store.save(&Ledger::new()).unwrap();
        assert!(root.join("freezer_stock.json").exists());
    }
}
