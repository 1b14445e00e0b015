//! Shared utilities for CLI commands.

use anyhow::{Context, Result};

use ts_core::Session;
use ts_store::StateDir;

use crate::Config;

/// Opens the configured state directory.
pub fn open_state(config: &Config) -> Result<StateDir> {
    StateDir::open(&config.state_dir)
        .with_context(|| format!("failed to open {}", config.state_dir.display()))
}

/// Restores the session without persisting anything afterwards.
pub fn load_session(config: &Config) -> Result<Session> {
    let state = open_state(config)?;
    let _lock = state.lock().context("failed to lock state directory")?;
    let roster = config.roster().context("invalid client configuration")?;
    state
        .load_session(roster)
        .context("failed to restore session")
}

/// Runs one mutating action against the restored session.
///
/// The session is checkpointed only if `action` succeeds; a failed action
/// leaves the state directory exactly as it was.
pub fn with_session<T>(
    config: &Config,
    action: impl FnOnce(&mut Session) -> Result<T>,
) -> Result<T> {
    with_session_checkpointed(config, action, || "failed to checkpoint session".to_string())
}

/// Like [`with_session`], with the error context used when the checkpoint
/// after a successful action fails.
pub fn with_session_checkpointed<T>(
    config: &Config,
    action: impl FnOnce(&mut Session) -> Result<T>,
    checkpoint_context: impl FnOnce() -> String,
) -> Result<T> {
    let state = open_state(config)?;
    let _lock = state.lock().context("failed to lock state directory")?;
    let roster = config.roster().context("invalid client configuration")?;
    let mut session = state
        .load_session(roster)
        .context("failed to restore session")?;

    let value = action(&mut session)?;

    state
        .save_session(&session)
        .with_context(checkpoint_context)?;
    Ok(value)
}

/// Formats hours for the text views, to the hundredth.
///
/// Stored values keep full precision; `status --json` and the CSV show them.
pub fn format_hours(hours: f64) -> String {
    format!("{hours:.2}")
}

/// Formats whole seconds as `H:MM:SS`.
pub fn format_seconds(seconds: i64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hours}:{minutes:02}:{secs:02}")
}

/// Config pointing at a throwaway state directory.
#[cfg(test)]
pub(crate) fn test_config(state_dir: &std::path::Path) -> Config {
    Config {
        state_dir: state_dir.to_path_buf(),
        ..Config::default()
    }
}
