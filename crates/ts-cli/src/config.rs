//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use ts_core::{ClientError, ClientRoster, DEFAULT_CLIENTS};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the checkpoint and timer state.
    pub state_dir: PathBuf,

    /// Clients time may be booked against, in configured order.
    pub clients: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state_dir: dirs_data_path().unwrap_or_else(|| PathBuf::from(".")),
            clients: DEFAULT_CLIENTS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Environment variables (TS_*) win over files
        figment = figment.merge(Env::prefixed("TS_"));

        figment.extract()
    }

    /// Builds the client roster from the configured names.
    pub fn roster(&self) -> Result<ClientRoster, ClientError> {
        ClientRoster::new(self.clients.iter().cloned())
    }
}

/// Returns the platform-specific config directory for the timesheet.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("timesheet"))
}

/// Returns the platform-specific data directory for the timesheet.
///
/// On Linux: `~/.local/share/timesheet`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("timesheet"))
}
