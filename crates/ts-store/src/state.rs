//! Session state persisted between invocations.
//!
//! The state directory holds:
//! - `checkpoint.json`: the unsaved ledger as a flat `{"client": hours}` map
//! - `timer.json`: the timer, `{"state":"idle"}` or a running interval
//! - `ts.lock`: advisory lock serializing load → mutate → persist cycles
//!
//! A missing checkpoint or timer file means an empty ledger or an idle timer.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::Serialize;
use serde::de::DeserializeOwned;

use ts_core::{ClientRoster, Ledger, Session, Timer};

use crate::{StoreError, write_atomic};

const CHECKPOINT_FILE: &str = "checkpoint.json";
const TIMER_FILE: &str = "timer.json";
const LOCK_FILE: &str = "ts.lock";

/// Serializes the ledger as a checkpoint at `path`.
pub fn save_checkpoint(path: &Path, ledger: &Ledger) -> Result<(), StoreError> {
    save_json(path, ledger)
}

/// Reads a checkpoint; `None` if there is none.
pub fn load_checkpoint(path: &Path) -> Result<Option<Ledger>, StoreError> {
    load_json(path)
}

fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let json = serde_json::to_vec_pretty(value).map_err(|e| StoreError::json(path, e))?;
    write_atomic(path, &json)
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| StoreError::json(path, e)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::io(path, e)),
    }
}

/// Held exclusive lock on a state directory; released on drop.
#[derive(Debug)]
pub struct StateLock {
    _file: File,
}

/// Directory holding the checkpoint and timer files.
#[derive(Debug, Clone)]
pub struct StateDir {
    root: PathBuf,
}

impl StateDir {
    /// Opens a state directory, creating it if necessary.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| StoreError::io(&root, e))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn checkpoint_path(&self) -> PathBuf {
        self.root.join(CHECKPOINT_FILE)
    }

    pub fn timer_path(&self) -> PathBuf {
        self.root.join(TIMER_FILE)
    }

    /// Blocks until this process holds the directory lock.
    pub fn lock(&self) -> Result<StateLock, StoreError> {
        let path = self.root.join(LOCK_FILE);
        let file = File::create(&path).map_err(|e| StoreError::io(&path, e))?;
        file.lock_exclusive().map_err(|e| StoreError::io(&path, e))?;
        Ok(StateLock { _file: file })
    }

    pub fn load_ledger(&self) -> Result<Ledger, StoreError> {
        Ok(load_checkpoint(&self.checkpoint_path())?.unwrap_or_default())
    }

    pub fn load_timer(&self) -> Result<Timer, StoreError> {
        Ok(load_json(&self.timer_path())?.unwrap_or_default())
    }

    /// Restores the session left by the previous invocation.
    pub fn load_session(&self, roster: ClientRoster) -> Result<Session, StoreError> {
        let ledger = self.load_ledger()?;
        let timer = self.load_timer()?;
        tracing::debug!(
            entries = ledger.len(),
            timer = %timer.phase(),
            root = %self.root.display(),
            "restored session"
        );
        Ok(Session::restore(roster, ledger, timer))
    }

    /// Checkpoints the ledger and timer of `session`.
    pub fn save_session(&self, session: &Session) -> Result<(), StoreError> {
        save_checkpoint(&self.checkpoint_path(), session.ledger())?;
        save_json(&self.timer_path(), session.timer())?;
        tracing::debug!(entries = session.ledger().len(), "checkpointed session");
        Ok(())
    }
}
