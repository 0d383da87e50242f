//! Match configuration loading.

use derive_more::{Display, Error};
use geratrix_core::{Difficulty, MatchConfig, Seat};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Loads a match configuration from a TOML file.
///
/// A missing file yields the defaults; a present but malformed file is an
/// error.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_config(path: impl AsRef<Path>) -> Result<MatchConfig, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        info!("Config file not found, using defaults");
        return Ok(MatchConfig::default());
    }

    debug!("Loading config from file");
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

    let config: MatchConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
    config
        .validate()
        .map_err(|e| ConfigError::new(format!("Invalid config: {}", e)))?;

    info!(
        difficulty = %config.difficulty(),
        win_threshold = config.win_threshold(),
        "Config loaded successfully"
    );
    Ok(config)
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Opponent strength.
    pub difficulty: Option<Difficulty>,
    /// Seats of the first and second player.
    pub seats: Option<[Seat; 2]>,
    /// Random seed.
    pub seed: Option<u64>,
    /// Bot delay in milliseconds.
    pub bot_delay_ms: Option<u64>,
}

impl ConfigOverrides {
    /// Applies every set override to `config`.
    #[instrument(skip(config))]
    pub fn apply(&self, mut config: MatchConfig) -> MatchConfig {
        if let Some(difficulty) = self.difficulty {
            config = config.with_difficulty(difficulty);
        }
        if let Some(seats) = self.seats {
            config = config.with_seats(seats);
        }
        if self.seed.is_some() {
            config = config.with_seed(self.seed);
        }
        if let Some(ms) = self.bot_delay_ms {
            config = config.with_bot_delay(std::time::Duration::from_millis(ms));
        }
        config
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
