//! Reading-position persistence.
//!
//! A store holds a single value: the last settled page index, encoded as a
//! decimal string. Anything that does not parse back to a non-negative
//! integer loads as "no saved position". Writes are last-write-wins.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::Result;

/// Durable storage for the last-viewed page index.
pub trait PositionStore {
    /// The saved index, or `None` if nothing usable was saved.
    fn load(&self) -> Option<usize>;

    /// Overwrite the saved index.
    fn save(&mut self, index: usize) -> Result<()>;
}

/// Parse a stored value. Surrounding whitespace is tolerated, anything else
/// that is not a plain non-negative integer is rejected.
pub fn parse_position(raw: &str) -> Option<usize> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

pub fn encode_position(index: usize) -> String {
    index.to_string()
}

/// In-memory store, for tests and headless use.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    raw: Option<String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an arbitrary stored string, valid or not.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
            writes: 0,
        }
    }

    /// Raw stored value.
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// Number of successful saves.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl PositionStore for MemoryStore {
    fn load(&self) -> Option<usize> {
        self.raw.as_deref().and_then(parse_position)
    }

    fn save(&mut self, index: usize) -> Result<()> {
        self.raw = Some(encode_position(index));
        self.writes += 1;
        Ok(())
    }
}

/// Store backed by one small file on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PositionStore for FileStore {
    fn load(&self) -> Option<usize> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => {
                let position = parse_position(&raw);
                if position.is_none() {
                    debug!("ignoring corrupt position in {}", self.path.display());
                }
                position
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                debug!("cannot read position from {}: {e}", self.path.display());
                None
            }
        }
    }

    fn save(&mut self, index: usize) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, encode_position(index))?;
        Ok(())
    }
}

/// Store backed by one `window.localStorage` key.
#[cfg(feature = "wasm")]
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

#[cfg(feature = "wasm")]
impl LocalStorageStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

#[cfg(feature = "wasm")]
impl PositionStore for LocalStorageStore {
    fn load(&self) -> Option<usize> {
        let raw = Self::storage()?.get_item(&self.key).ok().flatten()?;
        parse_position(&raw)
    }

    fn save(&mut self, index: usize) -> Result<()> {
        let storage = Self::storage()
            .ok_or_else(|| crate::Error::Storage("local storage unavailable".to_string()))?;
        storage
            .set_item(&self.key, &encode_position(index))
            .map_err(|e| crate::Error::Storage(format!("{e:?}")))
    }
}
