use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::core::search::DEFAULT_LIMIT;
use crate::error::{IconError, IconResult};

pub const DEFAULT_COPY_FORMAT: &str = "html";
pub const DEFAULT_ICON_COLOR: &str = "#7dcfff";
pub const MIN_RESULTS: usize = 1;
pub const MAX_RESULTS: usize = 50;

/// Clamp a result limit to the accepted range
pub fn clamp_max_results(max_results: usize) -> usize {
    max_results.clamp(MIN_RESULTS, MAX_RESULTS)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub preferences: PreferencesConfig,
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferencesConfig {
    pub copy_format: String,
    pub icon_color: String,
    pub max_results: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Asset root holding `images/` and `data/`
    pub base_dir: PathBuf,
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            copy_format: DEFAULT_COPY_FORMAT.to_string(),
            icon_color: DEFAULT_ICON_COLOR.to_string(),
            max_results: DEFAULT_LIMIT as u32,
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            base_dir: dirs::data_dir()
                .unwrap_or_else(|| {
                    dirs::home_dir()
                        .map(|h| h.join(".local").join("share"))
                        .unwrap_or_else(|| PathBuf::from("/tmp"))
                })
                .join("fa-search"),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .map(|h| h.join(".config"))
                    .unwrap_or_else(|| PathBuf::from("/tmp"))
            })
            .join("fa-search")
            .join("config.toml")
    }

    /// Load config from the default location, or return defaults if not found
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load config from `path`; unreadable or invalid files yield defaults
    pub fn load_from(path: &Path) -> Self {
        let mut config = if path.exists() {
            match Self::try_load_from(path) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Failed to load config: {}", e);
                    Self::default()
                }
            }
        } else {
            Self::default()
        };

        config.validate();
        config
    }

    fn try_load_from(path: &Path) -> IconResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Clamp and sanitize values
    fn validate(&mut self) {
        self.preferences.max_results = clamp_max_results(self.preferences.max_results as usize) as u32;

        if !is_valid_color(&self.preferences.icon_color) {
            warn!(
                "Ignoring invalid icon color {:?}, using {}",
                self.preferences.icon_color, DEFAULT_ICON_COLOR
            );
            self.preferences.icon_color = DEFAULT_ICON_COLOR.to_string();
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> IconResult<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> IconResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| IconError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, content)?;

        Ok(())
    }
}

/// A color can be any SVG paint value that fits inside a double-quoted attribute
pub fn is_valid_color(color: &str) -> bool {
    let color = color.trim();
    !color.is_empty() && !color.contains(['"', '<', '>'])
}
