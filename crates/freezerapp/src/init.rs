//! # Startup
//!
//! [`initialize`] wires a ready-to-use [`FreezerApi`] backed by the
//! filesystem: it picks the data directory, loads configuration from it and
//! hydrates the ledger.
//!
//! ## Data Directory Resolution
//!
//! 1. `data_override`, when the host passes one.
//! 2. The `FREEZER_DATA` environment variable (primarily for testing).
//! 3. The OS-appropriate data directory, via the `directories` crate.
//!
//! Configuration (`freezer.toml`) is read from the same directory. A broken
//! config file is reported with a warning and compiled defaults are used.

use crate::api::FreezerApi;
use crate::config::FreezerConfig;
use crate::error::{FreezerError, Result};
use crate::store::fs::FileStore;
use crate::store::fs_backend::FsBackend;
use clapfig::{Clapfig, SearchMode, SearchPath};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "FREEZER_DATA";
pub const CONFIG_FILE: &str = "freezer.toml";

pub struct FreezerContext {
    pub api: FreezerApi<FsBackend>,
    pub config: FreezerConfig,
    pub data_dir: PathBuf,
}

/// Resolve the directory holding the snapshot and config file.
pub fn resolve_data_dir(data_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = data_override {
        return Ok(path);
    }
    if let Some(path) = std::env::var_os(DATA_DIR_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    ProjectDirs::from("com", "freezer", "freezer")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| FreezerError::Config("Could not determine data directory".to_string()))
}

/// Load `freezer.toml` from `data_dir`, layered with `FREEZER__*` variables.
pub fn load_config(data_dir: &Path) -> FreezerConfig {
    let loaded = Clapfig::builder::<FreezerConfig>()
        .app_name("freezer")
        .file_name(CONFIG_FILE)
        .search_paths(vec![SearchPath::Path(data_dir.to_path_buf())])
        .search_mode(SearchMode::Merge)
        .load();

    match loaded {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(dir = %data_dir.display(), error = %e, "could not load config, using defaults");
            FreezerConfig::default()
        }
    }
}

/// Build a filesystem-backed API and hydrate it from the stored snapshot.
pub fn initialize(data_override: Option<PathBuf>) -> Result<FreezerContext> {
    let data_dir = resolve_data_dir(data_override)?;
    let config = load_config(&data_dir);

    let store = FileStore::new_fs(data_dir.clone(), &config);
    let api = FreezerApi::open(store)?;
    tracing::info!(
        dir = %data_dir.display(),
        items = api.current_items().len(),
        "freezer ledger ready"
    );

    Ok(FreezerContext {
        api,
        config,
        data_dir,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn override_wins() {
        let dir = resolve_data_dir(Some(PathBuf::from("/tmp/freezer-test"))).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/freezer-test"));
    }

    #[test]
    fn initialize_in_empty_dir_starts_empty() {
        let dir = TempDir::new().unwrap();
        let ctx = initialize(Some(dir.path().to_path_buf())).unwrap();

        assert!(ctx.api.current_items().is_empty());
        assert_eq!(ctx.config.storage_key(), "freezer_stock");
        assert_eq!(ctx.data_dir, dir.path());
    }

    #[test]
    fn initialize_reopens_saved_ledger() {
        let dir = TempDir::new().unwrap();

        let mut ctx = initialize(Some(dir.path().to_path_buf())).unwrap();
        ctx.api.scan_add("111").unwrap();
        ctx.api.add_manual("Peas").unwrap();
        let before = ctx.api.ledger().clone();
        drop(ctx);

        let ctx = initialize(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(*ctx.api.ledger(), before);
    }
}
