//! File-backed JSON document storage.
//!
//! A thin load/store collaborator over a single JSON file. Failures come
//! back as [`Error::Persistence`] values; the caller decides whether to
//! surface them on the HTTP layer.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{Error, PersistenceKind};

/// A JSON document identified by a file path.
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the document.
    pub fn read(&self) -> Result<Value, Error> {
        let raw = std::fs::read_to_string(&self.path).map_err(|e| self.failure(e.into()))?;
        serde_json::from_str(&raw).map_err(|e| self.failure(e.into()))
    }

    /// Serializes `document` over the file's previous contents.
    pub fn write(&self, document: &Value) -> Result<(), Error> {
        let raw = serde_json::to_string(document).map_err(|e| self.failure(e.into()))?;
        std::fs::write(&self.path, raw).map_err(|e| self.failure(e.into()))
    }

    fn failure(&self, source: PersistenceKind) -> Error {
        Error::Persistence {
            path: self.path.clone(),
            source,
        }
    }
}
