//! # Configuration Management Module
//!
//! Loads and writes the TOML configuration for the gamecoin CLI and for bots
//! embedding the library.
//!
//! ## Configuration Structure
//!
//! - [`StorageConfig`] - where the user record database lives
//! - [`LoggingConfig`] - log level and optional log file
//! - [`EconomyConfig`] - daily award amounts
//! - [`AssetsConfig`] - emoji list and mad-lib template files
//!
//! ## Configuration File Format
//!
//! ```toml
//! [storage]
//! data_dir = "./data"
//!
//! [logging]
//! level = "info"
//! file = "gamecoin.log"
//!
//! [economy]
//! daily_award = 10.0
//! daily_jackpot_award = 500.0
//!
//! [assets]
//! emoji_list = "./data/games/emojilist.txt"
//! madlibs = "./data/games/madlibs.txt"
//! ```
//!
//! Only `[storage]` and `[logging]` are required; the other sections fall
//! back to their defaults when omitted.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;

use crate::economy::constants::{DAILY_AWARD, DAILY_JACKPOT_AWARD};
use crate::economy::{Coin, DailyReward};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub economy: EconomyConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: String,
    /// Optional override for the sled database path; defaults to `<data_dir>/users`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_path: Option<String>,
}

impl StorageConfig {
    pub fn user_db_path(&self) -> PathBuf {
        match &self.db_path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(&self.data_dir).join("users"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomyConfig {
    /// Daily award when the lucky number misses.
    #[serde(default = "default_daily_award")]
    pub daily_award: f64,
    /// Daily award when the lucky number hits.
    #[serde(default = "default_daily_jackpot_award")]
    pub daily_jackpot_award: f64,
}

fn default_daily_award() -> f64 {
    DAILY_AWARD as f64
}

fn default_daily_jackpot_award() -> f64 {
    DAILY_JACKPOT_AWARD as f64
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            daily_award: default_daily_award(),
            daily_jackpot_award: default_daily_jackpot_award(),
        }
    }
}

impl EconomyConfig {
    /// Award amounts as coins. Negative or non-finite amounts are rejected.
    pub fn daily_reward(&self) -> Result<DailyReward> {
        let coin = |value: f64, name: &str| -> Result<Coin> {
            if value < 0.0 {
                return Err(anyhow!("economy.{} must not be negative", name));
            }
            Coin::from_f64(value).map_err(|e| anyhow!("economy.{}: {}", name, e))
        };
        Ok(DailyReward {
            base_award: coin(self.daily_award, "daily_award")?,
            jackpot_award: coin(self.daily_jackpot_award, "daily_jackpot_award")?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    pub emoji_list: String,
    pub madlibs: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            emoji_list: "./data/games/emojilist.txt".to_string(),
            madlibs: "./data/games/madlibs.txt".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        Ok(config)
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            storage: StorageConfig {
                data_dir: "./data".to_string(),
                db_path: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file: Some("gamecoin.log".to_string()),
            },
            economy: EconomyConfig::default(),
            assets: AssetsConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_economy_matches_constants() {
        let reward = Config::default().economy.daily_reward().unwrap();
        assert_eq!(reward, DailyReward::default());
    }

    #[test]
    fn test_optional_sections_default() {
        let text = r#"
            [storage]
            data_dir = "/tmp/gc"

            [logging]
            level = "debug"
        "#;
        let config: Config = toml::from_str(text).unwrap();
        assert_eq!(config.storage.user_db_path(), PathBuf::from("/tmp/gc/users"));
        assert_eq!(config.logging.file, None);
        assert_eq!(config.economy.daily_award, 10.0);
        assert_eq!(config.assets.madlibs, "./data/games/madlibs.txt");
    }

    #[test]
    fn test_partial_economy_section() {
        let text = r#"
            [storage]
            data_dir = "./data"
            db_path = "/var/lib/gamecoin"

            [logging]
            level = "info"

            [economy]
            daily_jackpot_award = 250.5
        "#;
        let config: Config = toml::from_str(text).unwrap();
        assert_eq!(
            config.storage.user_db_path(),
            PathBuf::from("/var/lib/gamecoin")
        );
        let reward = config.economy.daily_reward().unwrap();
        assert_eq!(reward.base_award, Coin::from_whole(10));
        assert_eq!(reward.jackpot_award, Coin::from_cents(25_050));
    }

    #[test]
    fn test_negative_award_rejected() {
        let economy = EconomyConfig {
            daily_award: -1.0,
            ..EconomyConfig::default()
        };
        assert!(economy.daily_reward().is_err());
    }

    #[tokio::test]
    async fn test_create_default_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let path = path.to_str().unwrap();
        Config::create_default(path).await.unwrap();
        let loaded = Config::load(path).await.unwrap();
        assert_eq!(loaded.storage.data_dir, "./data");
        assert_eq!(loaded.logging.file.as_deref(), Some("gamecoin.log"));
        assert_eq!(loaded.economy.daily_jackpot_award, 500.0);
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let err = Config::load("/nonexistent/gamecoin.toml").await.unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
