//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use bracket_retry::RetryPolicy;
use bracket_surface::SelectorSet;

use crate::error::{AppError, AppResult};

/// One retry/poll budget as it appears in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollConfig {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Pause between attempts (ms).
    pub interval_ms: u64,
}

impl PollConfig {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::from_millis(self.max_attempts, self.interval_ms)
    }
}

/// Panel simulator tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Table reads before a click's effect becomes visible, exercising
    /// the confirmation polling the way a repainting page does.
    pub settle_reads: u32,
    /// Simulated last traded price at startup.
    pub last_price: rust_decimal::Decimal,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            settle_reads: 2,
            last_price: rust_decimal::Decimal::new(1825000, 2), // 18250.00
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Symbol used when neither the CLI nor stored defaults supply one.
    pub symbol: String,
    /// Quantity used when neither the CLI nor stored defaults supply one.
    pub quantity: u32,
    /// Stop-loss ticks override; `None` defers to stored defaults.
    pub stop_loss_ticks: Option<u32>,
    /// Take-profit ticks override; `None` defers to stored defaults.
    pub take_profit_ticks: Option<u32>,
    /// Path of the persisted settings file.
    pub settings_path: String,
    /// Wait budget for individual ticket elements.
    pub element_wait: PollConfig,
    /// Poll budget for post-action table confirmation.
    pub confirm_poll: PollConfig,
    /// Panel selector overrides.
    pub selectors: SelectorSet,
    /// Simulator tuning.
    pub sim: SimConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            symbol: "NQ".to_string(),
            quantity: 1,
            stop_loss_ticks: None,
            take_profit_ticks: None,
            settings_path: "data/settings.json".to_string(),
            element_wait: PollConfig {
                max_attempts: 20,
                interval_ms: 250,
            },
            confirm_poll: PollConfig {
                max_attempts: 12,
                interval_ms: 250,
            },
            selectors: SelectorSet::default(),
            sim: SimConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from the given path, falling back to defaults when the file
    /// does not exist. A file that exists but does not parse is an error;
    /// silently trading with defaults the user did not ask for is worse
    /// than stopping.
    pub fn load(config_path: &str) -> AppResult<Self> {
        if Path::new(config_path).exists() {
            Self::from_file(config_path)
        } else {
            tracing::warn!(path = %config_path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        toml::from_str(&content).map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.symbol, "NQ");
        assert_eq!(config.element_wait.max_attempts, 20);
        assert_eq!(config.confirm_poll.policy().max_attempts, 12);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            symbol = "MNQ"
            quantity = 3

            [confirm_poll]
            max_attempts = 5
            interval_ms = 100
            "#,
        )
        .unwrap();

        assert_eq!(config.symbol, "MNQ");
        assert_eq!(config.quantity, 3);
        assert_eq!(config.confirm_poll.max_attempts, 5);
        // Untouched sections keep their defaults
        assert_eq!(config.element_wait, AppConfig::default().element_wait);
        assert_eq!(config.selectors, SelectorSet::default());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = AppConfig::load("/definitely/not/here.toml").unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
