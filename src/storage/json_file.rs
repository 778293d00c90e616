//! Address book persisted as a versioned JSON document.
//!
//! ```json
//! {
//!   "version": 1,
//!   "records": [
//!     { "name": "Alice", "phones": ["1234567890"], "birthday": "25.12.1990" }
//!   ]
//! }
//! ```

use crate::error::{StorageError, StorageResult};
use crate::models::AddressBook;
use crate::storage::traits::BookStore;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, info};

/// Current on-disk format version.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct BookFileOut<'a> {
    version: u32,
    records: &'a AddressBook,
}

#[derive(Deserialize)]
struct BookFileIn {
    version: u32,
    #[serde(default)]
    records: serde_json::Value,
}

/// Stores the address book in a single JSON file.
///
/// Saves go through a sibling temp file that is renamed over the target, so
/// an interrupted save never leaves a half-written book behind.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Decode a book from the JSON document in `data`.
    pub fn decode(data: &str) -> StorageResult<AddressBook> {
        let file: BookFileIn = serde_json::from_str(data)?;
        if file.version != FORMAT_VERSION {
            return Err(StorageError::UnsupportedVersion {
                found: file.version,
                expected: FORMAT_VERSION,
            });
        }

        if file.records.is_null() {
            return Ok(AddressBook::new());
        }
        Ok(serde_json::from_value(file.records)?)
    }

    /// Encode `book` as a pretty-printed JSON document.
    pub fn encode(book: &AddressBook) -> StorageResult<String> {
        let file = BookFileOut {
            version: FORMAT_VERSION,
            records: book,
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl BookStore for JsonFileStore {
    fn load(&self) -> StorageResult<AddressBook> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No address book at {}, starting empty", self.path.display());
                return Ok(AddressBook::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        let book = Self::decode(&data)?;
        info!(
            "Loaded {} contact(s) from {}",
            book.len(),
            self.path.display()
        );
        Ok(book)
    }

    fn save(&self, book: &AddressBook) -> StorageResult<()> {
        let data = Self::encode(book)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let tmp = self.temp_path();
        debug!("Writing address book to {}", tmp.display());
        fs::write(&tmp, data).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;

        info!("Saved {} contact(s) to {}", book.len(), self.path.display());
        Ok(())
    }
}
