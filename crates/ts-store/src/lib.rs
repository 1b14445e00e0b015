//! Flat-file storage for the timesheet.
//!
//! Provides persistence for the ledger and timer using plain files:
//!
//! - [`timesheet`]: the CSV export (`Day,Client,Time`) users hand in
//! - [`state`]: the state directory holding the JSON checkpoint of the
//!   unsaved ledger, the persisted timer, and a lock file
//!
//! # Atomic writes
//!
//! Every write goes to a sibling `*.tmp` file which is then renamed over the
//! target. A failed write leaves the previous file intact; at worst a stale
//! `*.tmp` file remains next to it.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod state;
pub mod timesheet;

pub use state::{StateDir, StateLock, load_checkpoint, save_checkpoint};
pub use timesheet::{WriteMode, day_label, write_timesheet};

const TMP_SUFFIX: &str = "tmp";

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A filesystem operation failed.
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Writing CSV rows failed.
    #[error("csv error on {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    /// A JSON state file could not be encoded or decoded.
    #[error("invalid json in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn json(path: &Path, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Sibling temp path: `checkpoint.json` becomes `checkpoint.json.tmp`.
pub(crate) fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

/// Writes `data` to `path` through a temp file and rename.
pub(crate) fn write_atomic(path: &Path, data: &[u8]) -> Result<(), StoreError> {
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp).map_err(|e| StoreError::io(&tmp, e))?;
    file.write_all(data).map_err(|e| StoreError::io(&tmp, e))?;
    commit(file, &tmp, path)
}

/// Syncs a fully written temp file and renames it over `path`.
pub(crate) fn commit(file: File, tmp: &Path, path: &Path) -> Result<(), StoreError> {
    file.sync_all().map_err(|e| StoreError::io(tmp, e))?;
    drop(file);
    fs::rename(tmp, path).map_err(|e| StoreError::io(path, e))
}
