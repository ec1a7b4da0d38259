//! Application configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use slide_puzzle_engine::EngineOptions;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Settings shared by every command.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Fixed shuffle seed; random when absent.
    #[serde(default)]
    seed: Option<u64>,

    /// Extra points for completing level 3 (0 disables it).
    #[serde(default)]
    final_completion_bonus: u32,

    /// Clock ticks a placement-bonus message stays visible.
    #[serde(default = "default_bonus_message_ticks")]
    bonus_message_ticks: u32,

    /// Where the terminal frontend writes its log.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,
}

#[instrument]
fn default_bonus_message_ticks() -> u32 {
    1
}

#[instrument]
fn default_log_file() -> PathBuf {
    PathBuf::from("slide_puzzle.log")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: None,
            final_completion_bonus: 0,
            bonus_message_ticks: default_bonus_message_ticks(),
            log_file: default_log_file(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(seed = ?config.seed, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` when given, defaults otherwise.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                debug!("No config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Overrides the shuffle seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    /// Engine tunables derived from this configuration.
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            seed: self.seed,
            final_completion_bonus: self.final_completion_bonus,
            bonus_message_ticks: self.bonus_message_ticks,
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
