use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;

use crate::model::record::{Record, records_from_value};

/// Error type for local cache operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no offline cache at {0}")]
    Missing(PathBuf),
    #[error("could not read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("offline cache {path} is not valid JSON: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not save offline data to {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("could not remove {path}: {source}")]
    Clear { path: PathBuf, source: io::Error },
}

/// The local replica of the working set.
pub trait LocalStore {
    /// Read the cache, distinguishing a missing file from a corrupt one.
    fn try_read(&self) -> Result<Vec<Record>, StoreError>;

    /// Overwrite the cache with `records`.
    fn write(&self, records: &[Record]) -> Result<(), StoreError>;

    /// Remove the cache. Succeeds if there is nothing to remove.
    fn clear(&self) -> Result<(), StoreError>;

    /// Read the cache, treating any failure as an empty cache.
    fn read(&self) -> Vec<Record> {
        match self.try_read() {
            Ok(records) => records,
            Err(StoreError::Missing(_)) => Vec::new(),
            Err(e) => {
                tracing::warn!("ignoring offline cache: {}", e);
                Vec::new()
            }
        }
    }
}

/// A JSON array on disk, pretty-printed with four-space indentation.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }
}

impl LocalStore for JsonFileStore {
    fn try_read(&self) -> Result<Vec<Record>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::Missing(self.path.clone()));
            }
            Err(e) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };
        let value = serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            source: e,
        })?;
        Ok(records_from_value(value))
    }

    fn write(&self, records: &[Record]) -> Result<(), StoreError> {
        let content = to_pretty_json(records).map_err(|e| StoreError::Write {
            path: self.path.clone(),
            source: e,
        })?;
        atomic_write(&self.path, &content).map_err(|e| StoreError::Write {
            path: self.path.clone(),
            source: e,
        })?;
        tracing::debug!(path = %self.path.display(), count = records.len(), "wrote offline cache");
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "removed offline cache");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Clear {
                path: self.path.clone(),
                source: e,
            }),
        }
    }
}

fn to_pretty_json(records: &[Record]) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    records.serialize(&mut ser).map_err(io::Error::other)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
