use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use planner_engine::{ClientSettings, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};

use super::logging::LogDestination;
use crate::cli::Cli;

pub const CONFIG_FILENAME: &str = "planner.ron";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub endpoint: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: Option<u64>,
    pub log_file: PathBuf,
    pub log_to_terminal: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_BASE_URL.to_string(),
            connect_timeout_secs: 10,
            request_timeout_secs: None,
            log_file: PathBuf::from("./planner.log"),
            log_to_terminal: false,
        }
    }
}

impl PlannerConfig {
    /// Loads `explicit` if given (errors are fatal), otherwise `./planner.ron`
    /// when it exists (errors fall back to defaults), otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()));
        }

        let local = PathBuf::from(CONFIG_FILENAME);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => return Ok(config),
                // The logger is not up yet; this is the only place we print directly.
                Err(err) => eprintln!(
                    "Warning: ignoring {}: {:#}",
                    local.display(),
                    err
                ),
            }
        }

        Ok(Self::default())
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = ron::from_str(&content)?;
        Ok(config)
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(endpoint) = &cli.endpoint {
            self.endpoint = endpoint.clone();
        }
        if let Some(secs) = cli.request_timeout {
            self.request_timeout_secs = Some(secs);
        }
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.endpoint.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: self
                .request_timeout_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        }
    }

    pub fn log_destination(&self) -> LogDestination {
        if self.log_to_terminal {
            LogDestination::Both(self.log_file.clone())
        } else {
            LogDestination::File(self.log_file.clone())
        }
    }
}
