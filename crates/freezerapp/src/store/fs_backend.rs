use super::backend::StorageBackend;
use crate::error::{FreezerError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Filesystem backend: one JSON file per key under a data directory.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `key`.
    pub fn key_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}.json", key)))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(FreezerError::Io)?;
        }
        Ok(())
    }
}

// Keys become file names, so they must stay inside the data directory.
fn validate_key(key: &str) -> Result<()> {
    let bad = key.is_empty()
        || key.starts_with('.')
        || key.contains(['/', '\\'])
        || key.chars().any(char::is_control);
    if bad {
        return Err(FreezerError::Store(format!("Invalid storage key: {:?}", key)));
    }
    Ok(())
}

impl StorageBackend for FsBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(path).map_err(FreezerError::Io)?;
        match String::from_utf8(bytes) {
            Ok(content) => Ok(Some(content)),
            Err(e) => Err(FreezerError::UndecodableValue {
                key: key.to_string(),
                lossy: String::from_utf8_lossy(e.as_bytes()).into_owned(),
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let target = self.key_path(key)?;
        self.ensure_dir()?;

        // Atomic Write
        let tmp_path = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp_path, value).map_err(FreezerError::Io)?;
        if let Err(e) = fs::rename(&tmp_path, &target) {
            let _ = fs::remove_file(&tmp_path);
            return Err(FreezerError::Io(e));
        }

        Ok(())
    }
}
