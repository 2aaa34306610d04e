//! Configuration management for reelplay
//!
//! Config is stored at ~/.config/reelplay/config.toml. A missing or broken
//! file falls back to defaults.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::ResizeMode;
use crate::player::PlayerOptions;

/// Errors reading an explicitly requested config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seconds moved by the back/forward buttons
    pub seek_step_secs: f64,
    /// Start playing as soon as the player opens
    pub autoplay: bool,
    /// Initial volume (0.0 - 1.0)
    pub initial_volume: f64,
    /// Initial zoom mode
    pub default_resize_mode: ResizeMode,
    /// Player screen refresh interval
    pub tick_millis: u64,
    /// Log file for the terminal player (defaults next to the config file)
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seek_step_secs: 10.0,
            autoplay: true,
            initial_volume: 1.0,
            default_resize_mode: ResizeMode::Cover,
            tick_millis: 250,
            log_file: None,
        }
    }
}

impl Config {
    /// Get config file path (~/.config/reelplay/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("reelplay").join("config.toml"))
    }

    /// Load config from the default path, or return default if not found
    pub fn load() -> Self {
        Self::path()
            .and_then(|p| std::fs::read_to_string(p).ok())
            .and_then(|s| toml::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Load config from an explicit path; errors are reported, not swallowed
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml = toml::to_string_pretty(self)?;
        std::fs::write(path, toml)?;
        Ok(())
    }

    /// Log file path: configured, else `player.log` next to the config file
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file.clone().or_else(|| {
            dirs::config_dir().map(|p| p.join("reelplay").join("player.log"))
        })
    }

    /// Seek step, falling back to the default for unusable values
    pub fn seek_step(&self) -> f64 {
        if self.seek_step_secs.is_finite() && self.seek_step_secs > 0.0 {
            self.seek_step_secs
        } else {
            Config::default().seek_step_secs
        }
    }

    /// Controller options derived from this config
    pub fn player_options(&self) -> PlayerOptions {
        PlayerOptions {
            autoplay: self.autoplay,
            volume: self.initial_volume,
            resize_mode: self.default_resize_mode,
            resume_at: None,
        }
    }
}
