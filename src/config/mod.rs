use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    core::services::{OverlapPolicy, DEFAULT_TREND_WINDOW_DAYS},
    errors::{AnalyzerError, Result},
    utils::{app_data_dir, persistence::write_atomic},
};

const CONFIG_FILE: &str = "config.json";

/// User preferences for batch analysis runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "Config::default_trend_window_days")]
    pub trend_window_days: usize,
    #[serde(default)]
    pub short_period: bool,
    #[serde(default)]
    pub overlap_policy: OverlapPolicy,
    #[serde(default = "Config::default_extract_extension")]
    pub extract_extension: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_extracts_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trend_window_days: Self::default_trend_window_days(),
            short_period: false,
            overlap_policy: OverlapPolicy::default(),
            extract_extension: Self::default_extract_extension(),
            default_extracts_dir: None,
        }
    }
}

impl Config {
    pub fn default_trend_window_days() -> usize {
        DEFAULT_TREND_WINDOW_DAYS
    }

    pub fn default_extract_extension() -> String {
        "json".into()
    }

    pub fn validate(&self) -> Result<()> {
        let extension = self.extract_extension.trim();
        if extension.is_empty() || extension.contains(['/', '\\']) {
            return Err(AnalyzerError::Config(format!(
                "invalid extract extension `{}`",
                self.extract_extension
            )));
        }
        Ok(())
    }
}

/// Loads and persists [`Config`] as pretty-printed JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Manager rooted at the application data directory.
    pub fn new() -> Self {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Self {
        Self {
            path: base.join(CONFIG_FILE),
        }
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Missing files yield the defaults.
    pub fn load(&self) -> Result<Config> {
        let config = if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data)?
        } else {
            tracing::debug!(path = %self.path.display(), "no config file, using defaults");
            Config::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
