//! File-backed snapshot store.
//!
//! Each record lives in `<dir>/<key>.json`. Writes go to a uniquely named
//! temporary file in the same directory which is then renamed over the
//! record, so a reader never sees a half-written snapshot. Keys must be plain
//! file stems: no path separators and no leading dot.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;
use uuid::Uuid;

use crate::error::{TipError, TipResult};

use super::SnapshotStore;

/// A [`SnapshotStore`] that keeps one JSON file per record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`. The directory is created on first write.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Returns the directory holding the records.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the path of the record stored under `key`.
    ///
    /// Fails for keys that are empty, start with a dot, or contain a path
    /// separator.
    pub fn record_path(&self, key: &str) -> TipResult<PathBuf> {
        if key.is_empty() || key.starts_with('.') || key.contains(['/', '\\']) {
            return Err(TipError::Storage {
                key: key.to_string(),
                message: "record keys must be plain file names".to_string(),
            });
        }
        Ok(self.dir.join(format!("{key}.json")))
    }

    fn storage_error(key: &str, err: std::io::Error) -> TipError {
        TipError::Storage {
            key: key.to_string(),
            message: err.to_string(),
        }
    }
}

impl SnapshotStore for FileStore {
    fn read(&self, key: &str) -> TipResult<Option<String>> {
        match fs::read_to_string(self.record_path(key)?) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(Self::storage_error(key, err)),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> TipResult<()> {
        let record_path = self.record_path(key)?;
        fs::create_dir_all(&self.dir).map_err(|e| Self::storage_error(key, e))?;

        let tmp_path = self.dir.join(format!(".{key}.{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_path, value).map_err(|e| Self::storage_error(key, e))?;

        if let Err(err) = fs::rename(&tmp_path, &record_path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(Self::storage_error(key, err));
        }

        debug!(path = %record_path.display(), bytes = value.len(), "Wrote record");
        Ok(())
    }

    fn delete(&mut self, key: &str) -> TipResult<()> {
        match fs::remove_file(self.record_path(key)?) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(Self::storage_error(key, err)),
        }
    }
}
