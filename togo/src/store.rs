//! JSON file persistence for record lists.
//!
//! A [`JsonStore`] is bound to a single file holding a JSON array of records.
//! The store is deliberately forgiving:
//!
//! - **Missing file**: created with an empty array on first load.
//! - **Empty file or `[]`**: treated as "no records".
//! - **Malformed JSON or I/O failure**: logged and treated as an empty list,
//!   so a damaged store never takes the CLI down with it.
//!
//! Writes only happen once the file exists, which guards against saving before
//! the store has been loaded.
//!
//! # Example
//!
//! ```no_run
//! use togo::store::JsonStore;
//! use togo::types::TodoRecord;
//!
//! let store: JsonStore<TodoRecord> = JsonStore::new("/home/user/.togo.store");
//! let mut records = store.load();
//! records.push(TodoRecord::new("coding 10 minutes", None));
//! store.save(&records);
//! ```

use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, warn};

/// Encoding of an empty record list.
const EMPTY_ARRAY: &str = "[]";

/// Errors that can occur while reading or writing a store file.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store file could not be read, created, or written.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store file does not contain a valid JSON record array.
    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The in-memory records could not be encoded.
    #[error("failed to encode records: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A JSON array of `T` persisted at a fixed path.
#[derive(Debug, Clone)]
pub struct JsonStore<T> {
    path: PathBuf,
    _records: PhantomData<fn() -> T>,
}

impl<T> JsonStore<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Creates a store bound to `path`. Nothing touches the disk until
    /// [`load`](Self::load) is called.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _records: PhantomData,
        }
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads all records, creating the file with an empty array if it is missing.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the file cannot be created or read, or if its
    /// contents are not a JSON array of records.
    pub fn try_load(&self) -> Result<Vec<T>, StoreError> {
        if !self.path.exists() {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
            }
            fs::write(&self.path, EMPTY_ARRAY).map_err(|source| self.io_error(source))?;
            debug!(path = %self.path.display(), "Created empty store file");
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path).map_err(|source| self.io_error(source))?;
        let trimmed = contents.trim();
        if trimmed.is_empty() || trimmed == EMPTY_ARRAY {
            return Ok(Vec::new());
        }

        serde_json::from_str(trimmed).map_err(|source| StoreError::Decode {
            path: self.path.clone(),
            source,
        })
    }

    /// Loads all records, falling back to an empty list on any failure.
    ///
    /// Failures are reported through `tracing` and never reach the caller.
    #[must_use]
    pub fn load(&self) -> Vec<T> {
        match self.try_load() {
            Ok(records) => {
                debug!(
                    path = %self.path.display(),
                    count = records.len(),
                    "Loaded store"
                );
                records
            }
            Err(e) => {
                error!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to load store, continuing with no records"
                );
                Vec::new()
            }
        }
    }

    /// Overwrites the file with `records`.
    ///
    /// Returns `Ok(false)` without writing if the file does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if encoding or writing fails.
    pub fn try_save(&self, records: &[T]) -> Result<bool, StoreError> {
        if !self.path.exists() {
            return Ok(false);
        }

        let mut encoded = serde_json::to_string(records)?;
        encoded.push('\n');
        fs::write(&self.path, encoded).map_err(|source| self.io_error(source))?;
        Ok(true)
    }

    /// Overwrites the file with `records`, logging any failure.
    ///
    /// The caller's in-memory records stay authoritative when the write fails.
    pub fn save(&self, records: &[T]) {
        match self.try_save(records) {
            Ok(true) => {
                debug!(
                    path = %self.path.display(),
                    count = records.len(),
                    "Saved store"
                );
            }
            Ok(false) => {
                warn!(
                    path = %self.path.display(),
                    "Store file missing, skipping save"
                );
            }
            Err(e) => {
                error!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to save store"
                );
            }
        }
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Item {
        name: String,
    }

    fn item(name: &str) -> Item {
        Item {
            name: name.to_string(),
        }
    }

    #[test]
    fn test_load_creates_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".store");
        let store: JsonStore<Item> = JsonStore::new(&path);

        let records = store.load();

        assert!(records.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn test_load_creates_missing_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join(".store");
        let store: JsonStore<Item> = JsonStore::new(&path);

        assert!(store.try_load().unwrap().is_empty());
        assert!(path.exists());
    }

    #[test]
    fn test_load_treats_blank_file_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".store");
        fs::write(&path, "  \n\t").unwrap();
        let store: JsonStore<Item> = JsonStore::new(&path);

        assert!(store.try_load().unwrap().is_empty());
    }

    #[test]
    fn test_load_treats_empty_array_with_newline_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".store");
        fs::write(&path, "[]\n").unwrap();
        let store: JsonStore<Item> = JsonStore::new(&path);

        assert!(store.try_load().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_json_falls_back_to_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".store");
        fs::write(&path, "{ not json").unwrap();
        let store: JsonStore<Item> = JsonStore::new(&path);

        let err = store.try_load().unwrap_err();
        assert!(matches!(err, StoreError::Decode { .. }));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_wrong_shape_is_decode_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".store");
        fs::write(&path, r#"{"name": "not an array"}"#).unwrap();
        let store: JsonStore<Item> = JsonStore::new(&path);

        assert!(matches!(store.try_load(), Err(StoreError::Decode { .. })));
    }

    #[test]
    fn test_save_then_load_preserves_order() {
        let dir = TempDir::new().unwrap();
        let store: JsonStore<Item> = JsonStore::new(dir.path().join(".store"));
        let _ = store.load();

        let records = vec![item("first"), item("second"), item("third")];
        assert!(store.try_save(&records).unwrap());

        assert_eq!(store.try_load().unwrap(), records);
    }

    #[test]
    fn test_save_skips_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".store");
        let store: JsonStore<Item> = JsonStore::new(&path);

        assert!(!store.try_save(&[item("orphan")]).unwrap());
        store.save(&[item("orphan")]);
        assert!(!path.exists());
    }

    #[test]
    fn test_save_empty_writes_array_with_newline() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".store");
        let store: JsonStore<Item> = JsonStore::new(&path);
        let _ = store.load();

        store.save(&[item("gone soon")]);
        store.save(&[]);

        assert_eq!(fs::read_to_string(&path).unwrap(), "[]\n");
    }

    #[test]
    fn test_unreadable_store_falls_back_to_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".store");
        fs::create_dir(&path).unwrap();
        let store: JsonStore<Item> = JsonStore::new(&path);

        assert!(matches!(store.try_load(), Err(StoreError::Io { .. })));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_unwritable_store_reports_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".store");
        fs::create_dir(&path).unwrap();
        let store: JsonStore<Item> = JsonStore::new(&path);

        assert!(matches!(
            store.try_save(&[item("lost")]),
            Err(StoreError::Io { .. })
        ));
        store.save(&[item("lost")]);
        assert!(path.is_dir());
    }

    #[test]
    fn test_io_error_display_includes_path() {
        let err = StoreError::Io {
            path: PathBuf::from("/tmp/.togo.store"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };

        assert_eq!(err.to_string(), "I/O error on /tmp/.togo.store: denied");
    }
}
