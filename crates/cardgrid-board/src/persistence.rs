#![forbid(unsafe_code)]

//! Durable storage for the pin set and unpinned order.
//!
//! The format is two ordered lists of ids. The board saves after every order
//! mutation and never retries: a failed save only costs durability, the
//! in-memory order stays authoritative for the session.
//!
//! # Backends
//!
//! - [`MemoryStore`]: in-process, optionally read-only to simulate failures.
//! - [`FileStore`]: one JSON file, written atomically (temp file + rename).
//!   A failed write removes the temp file.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::id::ItemId;

/// Persisted ordering state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedOrder {
    /// Pinned ids in user order.
    #[serde(default)]
    pub pinned: Vec<ItemId>,
    /// Unpinned ids in display order.
    #[serde(default)]
    pub unpinned: Vec<ItemId>,
}

/// Storage failure.
#[derive(Debug)]
pub enum StorageError {
    /// Filesystem failure.
    Io(io::Error),
    /// The stored document could not be encoded or decoded.
    Serialization(serde_json::Error),
    /// The backend refused the operation.
    Unavailable(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "order storage I/O error: {err}"),
            Self::Serialization(err) => write!(f, "order storage format error: {err}"),
            Self::Unavailable(msg) => write!(f, "order storage unavailable: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err)
    }
}

/// Load/save contract for ordering state.
pub trait OrderStore {
    /// Load the saved order, or `None` if nothing was saved yet.
    fn load(&mut self) -> Result<Option<PersistedOrder>, StorageError>;

    /// Replace the saved order.
    fn save(&mut self, order: &PersistedOrder) -> Result<(), StorageError>;
}

impl<S: OrderStore + ?Sized> OrderStore for Box<S> {
    fn load(&mut self) -> Result<Option<PersistedOrder>, StorageError> {
        (**self).load()
    }

    fn save(&mut self, order: &PersistedOrder) -> Result<(), StorageError> {
        (**self).save(order)
    }
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    saved: Option<PersistedOrder>,
    save_count: usize,
    read_only: bool,
}

impl MemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with an order.
    #[must_use]
    pub fn with_order(order: PersistedOrder) -> Self {
        Self {
            saved: Some(order),
            ..Self::default()
        }
    }

    /// Reject every save with [`StorageError::Unavailable`].
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Last successfully saved order.
    #[must_use]
    pub fn saved(&self) -> Option<&PersistedOrder> {
        self.saved.as_ref()
    }

    /// Number of successful saves.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.save_count
    }
}

impl OrderStore for MemoryStore {
    fn load(&mut self) -> Result<Option<PersistedOrder>, StorageError> {
        Ok(self.saved.clone())
    }

    fn save(&mut self, order: &PersistedOrder) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::Unavailable("store is read-only".into()));
        }
        self.saved = Some(order.clone());
        self.save_count += 1;
        Ok(())
    }
}

/// JSON file store.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store backed by `path`. The file need not exist yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl OrderStore for FileStore {
    fn load(&mut self) -> Result<Option<PersistedOrder>, StorageError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_str(&text)?))
    }

    fn save(&mut self, order: &PersistedOrder) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec_pretty(order)?;
        let tmp = self.temp_path();
        let written = fs::write(&tmp, json).and_then(|()| fs::rename(&tmp, &self.path));
        if let Err(err) = written {
            let _ = fs::remove_file(&tmp);
            return Err(err.into());
        }
        Ok(())
    }
}
