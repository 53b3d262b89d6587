//! Configuration management with validation and defaults
//!
//! Sectioned configuration for the round engine, the HTTP surface, and
//! the finance-service connection. Values load from an optional TOML
//! file with CLI overrides applied by the binary.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Top-level configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StarBingoConfig {
    pub game: GameConfig,
    pub server: ServerConfig,
    pub ledger: LedgerConfig,
}

/// Round timing and economy settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Length of the card-selection window, seconds.
    pub selection_secs: u64,
    /// Pause between drawn numbers, milliseconds.
    pub ball_interval_ms: u64,
    /// How long the winner stays on display, seconds.
    pub winner_secs: u64,
    /// Engine tick cadence, milliseconds.
    pub tick_interval_ms: u64,
    /// Entry fee per card.
    pub entry_fee: u64,
    /// House share of the entry pool, percent. The winner receives the
    /// remainder, floored to a whole unit.
    pub house_cut_percent: u64,
    /// Size of the public card catalog.
    pub total_cards: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            selection_secs: 45,
            ball_interval_ms: 4_000,
            winner_secs: 12,
            tick_interval_ms: 1_000,
            entry_fee: 10,
            house_cut_percent: 20,
            total_cards: 500,
        }
    }
}

impl GameConfig {
    pub fn selection_window_ms(&self) -> i64 {
        self.selection_secs as i64 * 1_000
    }

    pub fn winner_window_ms(&self) -> i64 {
        self.winner_secs as i64 * 1_000
    }

    pub fn ball_interval(&self) -> Duration {
        Duration::from_millis(self.ball_interval_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Winner's share of an entry pool, floored.
    pub fn prize_from_pool(&self, pool: u64) -> u64 {
        pool * (100 - self.house_cut_percent) / 100
    }
}

/// HTTP surface settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins; `*` allows all.
    pub allowed_origins: Vec<String>,
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            allowed_origins: vec!["*".to_string()],
            request_timeout_secs: 30,
        }
    }
}

/// Finance-service connection settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Base URL of the external finance service.
    pub base_url: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
        }
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration value: {0}")]
    InvalidValue(String),
}

impl StarBingoConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate for logical consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidValue(
                "tick_interval_ms must be > 0".to_string(),
            ));
        }

        if self.game.selection_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "selection_secs must be > 0".to_string(),
            ));
        }

        if self.game.ball_interval_ms == 0 {
            return Err(ConfigError::InvalidValue(
                "ball_interval_ms must be > 0".to_string(),
            ));
        }

        if self.game.house_cut_percent > 100 {
            return Err(ConfigError::InvalidValue(
                "house_cut_percent must be <= 100".to_string(),
            ));
        }

        if self.game.total_cards == 0 {
            return Err(ConfigError::InvalidValue(
                "total_cards must be > 0".to_string(),
            ));
        }

        if self.ledger.base_url.is_empty() {
            return Err(ConfigError::InvalidValue(
                "ledger.base_url must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
