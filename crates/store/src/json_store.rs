//! Pretty-printed JSON document store.

use std::fs;
use std::path::{Path, PathBuf};

use shelftrack_core::InventoryDoc;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence-level error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file exists but does not parse as an inventory document.
    ///
    /// Fatal for the current operation; the store never writes over a
    /// file it cannot read back.
    #[error("inventory file {path} is malformed: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The document failed to serialize.
    #[error("failed to encode inventory document: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("inventory store io failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Single-file JSON store with a sibling backup path.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
    backup_path: PathBuf,
}

impl JsonStore {
    /// Store at `path`, with the backup next to it as `<file name>.bak`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let backup_path = sibling(&path, ".bak");
        Self { path, backup_path }
    }

    /// Store with an explicit backup path.
    pub fn with_backup_path(path: impl Into<PathBuf>, backup_path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            backup_path: backup_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backup_path(&self) -> &Path {
        &self.backup_path
    }

    /// Load the document; a missing file yields the empty schema without
    /// creating anything on disk.
    pub fn load(&self) -> StoreResult<InventoryDoc> {
        if !self.path.exists() {
            return Ok(InventoryDoc::default());
        }
        let content = fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| {
            tracing::warn!(path = %self.path.display(), error = %source, "inventory file failed to parse");
            StoreError::Malformed {
                path: self.path.clone(),
                source,
            }
        })
    }

    /// Write the full document, pretty-printed, replacing the file.
    ///
    /// Writes a temp sibling first and renames it over the target.
    pub fn save(&self, doc: &InventoryDoc) -> StoreResult<()> {
        let content = serde_json::to_string_pretty(doc).map_err(StoreError::Encode)?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let temp_path = sibling(&self.path, ".tmp");
        fs::write(&temp_path, content).map_err(|source| StoreError::Io {
            path: temp_path.clone(),
            source,
        })?;
        fs::rename(&temp_path, &self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }

    /// Write the empty schema only when no file exists yet.
    ///
    /// Returns whether a file was created.
    pub fn create_if_absent(&self) -> StoreResult<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        self.save(&InventoryDoc::default())?;
        tracing::info!(path = %self.path.display(), "created empty inventory file");
        Ok(true)
    }

    /// Copy the current file bytes verbatim to the backup path (replacing
    /// any prior backup), then write the empty schema to the primary path.
    /// A missing primary file skips the copy.
    pub fn backup_then_reset(&self) -> StoreResult<()> {
        if self.path.exists() {
            fs::copy(&self.path, &self.backup_path).map_err(|source| StoreError::Io {
                path: self.backup_path.clone(),
                source,
            })?;
            tracing::info!(
                from = %self.path.display(),
                to = %self.backup_path.display(),
                "backed up inventory file"
            );
        }
        self.save(&InventoryDoc::default())
    }
}

/// `path` with `suffix` appended to its file name, in the same directory.
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}
