use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Path to a vocabulary JSON file. None means the bundled sample.
    #[serde(default)]
    pub vocabulary_path: Option<String>,
    #[serde(default = "default_matching_board_size")]
    pub matching_board_size: usize,
    /// Delay before the daily card auto-advances after a grade.
    #[serde(default = "default_daily_advance_ms")]
    pub daily_advance_ms: u64,
    /// Delay before the typing drill auto-advances after a correct answer.
    #[serde(default = "default_typing_advance_ms")]
    pub typing_advance_ms: u64,
    /// How long a mismatched card pair stays highlighted.
    #[serde(default = "default_mismatch_flash_ms")]
    pub mismatch_flash_ms: u64,
}

fn default_theme() -> String {
    "terminal-default".to_string()
}
fn default_matching_board_size() -> usize {
    10
}
fn default_daily_advance_ms() -> u64 {
    500
}
fn default_typing_advance_ms() -> u64 {
    1000
}
fn default_mismatch_flash_ms() -> u64 {
    1000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            vocabulary_path: None,
            matching_board_size: default_matching_board_size(),
            daily_advance_ms: default_daily_advance_ms(),
            typing_advance_ms: default_typing_advance_ms(),
            mismatch_flash_ms: default_mismatch_flash_ms(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vocadr")
            .join("config.toml")
    }

    /// A board size of zero would make every game instantly complete.
    pub fn normalize(&mut self) {
        if self.matching_board_size == 0 {
            self.matching_board_size = default_matching_board_size();
        }
    }
}
