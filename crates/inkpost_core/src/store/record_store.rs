//! Record store contract and filesystem implementation.
//!
//! # Responsibility
//! - Persist one serialized article per storage key.
//! - Provide exclusive-create and atomic relocation primitives.
//!
//! # Invariants
//! - Every failure surfaces to the caller; nothing is retried or swallowed.
//! - `write_new` never overwrites: two racing creates of one key cannot
//!   both succeed.

use crate::model::article::Article;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

const RECORD_EXTENSION: &str = "json";

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence-level failure taxonomy.
#[derive(Debug)]
pub enum StoreError {
    /// No record exists at the key.
    NotFound(String),
    /// The key is already occupied (exclusive create, rename target).
    Conflict(String),
    /// A record exists at the key but does not decode as an article.
    Decode {
        key: String,
        source: serde_json::Error,
    },
    /// Filesystem failure outside the not-found/conflict cases.
    Io { key: String, source: io::Error },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(key) => write!(f, "no record at `{key}`"),
            Self::Conflict(key) => write!(f, "record already exists at `{key}`"),
            Self::Decode { key, source } => write!(f, "corrupt record at `{key}`: {source}"),
            Self::Io { key, source } => write!(f, "record i/o failure at `{key}`: {source}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Decode { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            Self::NotFound(_) | Self::Conflict(_) => None,
        }
    }
}

/// Storage seam for article records.
///
/// Implementations perform plain reads and writes of individual records;
/// ordering, uniqueness of titles and index consistency live above this
/// trait.
pub trait RecordStore {
    /// Writes or overwrites the record at `key`.
    fn write(&self, key: &str, article: &Article) -> StoreResult<()>;
    /// Writes the record only if `key` is vacant; `Conflict` otherwise.
    fn write_new(&self, key: &str, article: &Article) -> StoreResult<()>;
    /// Reads the record at `key`.
    fn read(&self, key: &str) -> StoreResult<Article>;
    /// Removes the record at `key`; `NotFound` if absent.
    fn delete(&self, key: &str) -> StoreResult<()>;
    /// Relocates a record; `Conflict` if `new_key` is occupied, `NotFound`
    /// if `old_key` is absent.
    fn rename(&self, old_key: &str, new_key: &str) -> StoreResult<()>;
    /// Returns all stored keys, in no particular order.
    fn list_keys(&self) -> StoreResult<Vec<String>>;
}

/// Filesystem-backed record store: one `<key>.json` file per article under
/// a root directory.
pub struct FsRecordStore {
    root: PathBuf,
}

impl FsRecordStore {
    /// Opens a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl AsRef<Path>) -> StoreResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(|source| StoreError::Io {
            key: root.display().to_string(),
            source,
        })?;
        info!("event=store_open module=store status=ok root={}", root.display());
        Ok(Self { root })
    }

    /// Root directory holding the record files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.{RECORD_EXTENSION}"))
    }
}

impl RecordStore for FsRecordStore {
    fn write(&self, key: &str, article: &Article) -> StoreResult<()> {
        let payload = encode(key, article)?;
        fs::write(self.record_path(key), payload).map_err(|source| StoreError::Io {
            key: key.to_string(),
            source,
        })
    }

    fn write_new(&self, key: &str, article: &Article) -> StoreResult<()> {
        let payload = encode(key, article)?;
        let mut file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(self.record_path(key))
        {
            Ok(file) => file,
            Err(source) if source.kind() == ErrorKind::AlreadyExists => {
                return Err(StoreError::Conflict(key.to_string()));
            }
            Err(source) => {
                return Err(StoreError::Io {
                    key: key.to_string(),
                    source,
                });
            }
        };
        file.write_all(&payload).map_err(|source| StoreError::Io {
            key: key.to_string(),
            source,
        })
    }

    fn read(&self, key: &str) -> StoreResult<Article> {
        let bytes = match fs::read(self.record_path(key)) {
            Ok(bytes) => bytes,
            Err(source) if source.kind() == ErrorKind::NotFound => {
                return Err(StoreError::NotFound(key.to_string()));
            }
            Err(source) => {
                return Err(StoreError::Io {
                    key: key.to_string(),
                    source,
                });
            }
        };
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Decode {
            key: key.to_string(),
            source,
        })
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        match fs::remove_file(self.record_path(key)) {
            Ok(()) => Ok(()),
            Err(source) if source.kind() == ErrorKind::NotFound => {
                Err(StoreError::NotFound(key.to_string()))
            }
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn rename(&self, old_key: &str, new_key: &str) -> StoreResult<()> {
        let old_path = self.record_path(old_key);
        let new_path = self.record_path(new_key);
        // fs::rename silently replaces an existing target on unix, so the
        // collision check has to happen up front.
        if !old_path.exists() {
            return Err(StoreError::NotFound(old_key.to_string()));
        }
        if new_path.exists() {
            return Err(StoreError::Conflict(new_key.to_string()));
        }
        fs::rename(old_path, new_path).map_err(|source| StoreError::Io {
            key: old_key.to_string(),
            source,
        })
    }

    fn list_keys(&self) -> StoreResult<Vec<String>> {
        let entries = fs::read_dir(&self.root).map_err(|source| StoreError::Io {
            key: self.root.display().to_string(),
            source,
        })?;

        let mut keys = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::Io {
                key: self.root.display().to_string(),
                source,
            })?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                keys.push(stem.to_string());
            }
        }
        Ok(keys)
    }
}

fn encode(key: &str, article: &Article) -> StoreResult<Vec<u8>> {
    serde_json::to_vec_pretty(article).map_err(|source| StoreError::Io {
        key: key.to_string(),
        source: io::Error::new(ErrorKind::InvalidData, source),
    })
}
