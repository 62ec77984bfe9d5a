use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::Record;

const SNAPSHOT_PREFIX: &str = "responses_";
const CURRENT_POINTER: &str = "current_user.json";
const ARTIFACT_PREFIX: &str = "cv_";
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Collision suffixes tried before giving up on a timestamp.
const MAX_SUFFIX: u32 = 100;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Snapshot {path} is not a valid record: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Record could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("No free snapshot name for timestamp {0}")]
    NameExhausted(String),
}

impl PersistenceError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Result of one commit: the immutable snapshot plus its timestamp, which also
/// names the rendered artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Committed {
    pub snapshot: PathBuf,
    pub timestamp: String,
}

/// Append-only store of Record snapshots plus the single mutable "current" pointer.
///
/// Snapshots are created with `create_new` and never opened for writing again.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn timestamp_now() -> String {
        Local::now().format(TIMESTAMP_FORMAT).to_string()
    }

    pub fn current_path(&self) -> PathBuf {
        self.dir.join(CURRENT_POINTER)
    }

    pub fn artifact_path(&self, timestamp: &str, extension: &str) -> PathBuf {
        self.dir.join(format!("{ARTIFACT_PREFIX}{timestamp}.{extension}"))
    }

    /// Snapshot plus pointer update under one fresh timestamp.
    pub fn commit(&self, record: &Record) -> Result<Committed, PersistenceError> {
        let timestamp = Self::timestamp_now();
        let snapshot = self.write_snapshot(record, &timestamp)?;
        self.update_current(record)?;
        Ok(Committed {
            snapshot,
            timestamp,
        })
    }

    /// Writes `responses_<timestamp>.json`. An existing file with that name is
    /// left untouched and `_1`, `_2`, ... suffixes are tried instead.
    pub fn write_snapshot(
        &self,
        record: &Record,
        timestamp: &str,
    ) -> Result<PathBuf, PersistenceError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| PersistenceError::io(&self.dir, e))?;
        let json = serde_json::to_string_pretty(record)?;

        for attempt in 0..=MAX_SUFFIX {
            let name = match attempt {
                0 => format!("{SNAPSHOT_PREFIX}{timestamp}.json"),
                n => format!("{SNAPSHOT_PREFIX}{timestamp}_{n}.json"),
            };
            let path = self.dir.join(name);
            let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!("{} exists, trying next suffix", path.display());
                    continue;
                }
                Err(e) => return Err(PersistenceError::io(&path, e)),
            };
            file.write_all(json.as_bytes())
                .and_then(|_| file.sync_all())
                .map_err(|e| PersistenceError::io(&path, e))?;

            info!("Snapshot written: {}", path.display());
            return Ok(path);
        }

        Err(PersistenceError::NameExhausted(timestamp.to_string()))
    }

    /// Replaces the pointer file atomically so readers never see a partial write.
    pub fn update_current(&self, record: &Record) -> Result<PathBuf, PersistenceError> {
        let target = self.current_path();
        std::fs::create_dir_all(&self.dir).map_err(|e| PersistenceError::io(&self.dir, e))?;

        let json = serde_json::to_string_pretty(record)?;
        let mut tmp =
            NamedTempFile::new_in(&self.dir).map_err(|e| PersistenceError::io(&self.dir, e))?;
        tmp.write_all(json.as_bytes())
            .map_err(|e| PersistenceError::io(tmp.path(), e))?;
        tmp.persist(&target)
            .map_err(|e| PersistenceError::io(&target, e.error))?;

        debug!("Current pointer updated: {}", target.display());
        Ok(target)
    }

    pub fn load(&self, path: &Path) -> Result<Record, PersistenceError> {
        let raw = std::fs::read_to_string(path).map_err(|e| PersistenceError::io(path, e))?;
        serde_json::from_str(&raw).map_err(|source| PersistenceError::Format {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The pointer record, or None if it has never been written.
    pub fn load_current(&self) -> Result<Option<Record>, PersistenceError> {
        let path = self.current_path();
        if !path.exists() {
            return Ok(None);
        }
        self.load(&path).map(Some)
    }
}
