use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::engine::timer::Timings;
use crate::keyboard::keyset::Difficulty;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    #[serde(default = "default_partial_timeout_ms")]
    pub partial_timeout_ms: u64,
    #[serde(default = "default_prefix_timeout_ms")]
    pub prefix_timeout_ms: u64,
    #[serde(default = "default_drill_pause_ms")]
    pub drill_pause_ms: u64,
    #[serde(default = "default_challenge_pause_ms")]
    pub challenge_pause_ms: u64,
    #[serde(default = "default_show_keyboard")]
    pub show_keyboard: bool,
}

fn default_difficulty() -> String {
    Difficulty::Easy.as_str().to_string()
}
fn default_partial_timeout_ms() -> u64 {
    800
}
fn default_prefix_timeout_ms() -> u64 {
    1000
}
fn default_drill_pause_ms() -> u64 {
    200
}
fn default_challenge_pause_ms() -> u64 {
    1000
}
fn default_show_keyboard() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            difficulty: default_difficulty(),
            partial_timeout_ms: default_partial_timeout_ms(),
            prefix_timeout_ms: default_prefix_timeout_ms(),
            drill_pause_ms: default_drill_pause_ms(),
            challenge_pause_ms: default_challenge_pause_ms(),
            show_keyboard: default_show_keyboard(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize_difficulty();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vimtype")
            .join("config.toml")
    }

    pub fn log_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vimtype")
            .join("vimtype.log")
    }

    pub fn difficulty(&self) -> Difficulty {
        Difficulty::from_name_or_default(&self.difficulty)
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty.as_str().to_string();
    }

    /// Reset an unknown difficulty name to the default tier.
    pub fn normalize_difficulty(&mut self) {
        self.difficulty = self.difficulty().as_str().to_string();
    }

    pub fn timings(&self) -> Timings {
        Timings {
            partial_timeout: Duration::from_millis(self.partial_timeout_ms),
            prefix_timeout: Duration::from_millis(self.prefix_timeout_ms),
            drill_pause: Duration::from_millis(self.drill_pause_ms),
            challenge_pause: Duration::from_millis(self.challenge_pause_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.difficulty, "easy");
        assert_eq!(config.partial_timeout_ms, 800);
        assert_eq!(config.prefix_timeout_ms, 1000);
        assert!(config.show_keyboard);
        assert_eq!(config.timings(), Timings::default());
    }

    #[test]
    fn test_config_partial_file_keeps_defaults() {
        let toml_str = r#"
difficulty = "hard"
drill_pause_ms = 350
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.difficulty(), Difficulty::Hard);
        assert_eq!(config.timings().drill_pause, Duration::from_millis(350));
        assert_eq!(config.challenge_pause_ms, 1000);
    }

    #[test]
    fn test_unknown_difficulty_normalized_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "difficulty = \"legendary\"\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.difficulty, "easy");
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.difficulty(), Difficulty::Easy);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.set_difficulty(Difficulty::Meister);
        config.prefix_timeout_ms = 1500;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.difficulty(), Difficulty::Meister);
        assert_eq!(loaded.prefix_timeout_ms, 1500);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "difficulty = [").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
