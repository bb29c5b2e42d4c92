use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::bounds::Bounds;

/// Default warning and critical ranges for one check, as range specifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    #[serde(default)]
    pub warning: Option<String>,
    #[serde(default)]
    pub critical: Option<String>,
}

impl ThresholdConfig {
    /// Parse both specifiers. Empty strings count as unset.
    pub fn bounds(&self) -> Result<(Option<Bounds>, Option<Bounds>)> {
        Ok((
            parse_optional(self.warning.as_deref())
                .with_context(|| "Invalid warning threshold in config")?,
            parse_optional(self.critical.as_deref())
                .with_context(|| "Invalid critical threshold in config")?,
        ))
    }
}

fn parse_optional(spec: Option<&str>) -> Result<Option<Bounds>> {
    match spec.map(str::trim).filter(|spec| !spec.is_empty()) {
        Some(spec) => Ok(Some(Bounds::parse(spec)?)),
        None => Ok(None),
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Print verbose result lines unless the command line says otherwise
    #[serde(default)]
    pub verbose: bool,
    /// Where delta checks keep their previous measurements
    #[serde(default)]
    pub state_dir: Option<PathBuf>,
    /// Per-check default thresholds, keyed by check name (`load`, `memory`, ...)
    #[serde(default)]
    pub thresholds: HashMap<String, ThresholdConfig>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load from an explicit path. A missing or empty file yields the defaults.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            log::debug!("no config file at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        let data = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        if data.trim().is_empty() {
            return Ok(Config::default());
        }

        serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let data =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        fs::write(config_path, data)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        Ok(())
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().with_context(|| "Could not determine config directory")?;

        Ok(config_dir.join("nagkit").join("config.json"))
    }

    pub fn thresholds_for(&self, check: &str) -> Option<&ThresholdConfig> {
        self.thresholds.get(check)
    }

    pub fn set_thresholds<S: Into<String>>(&mut self, check: S, thresholds: ThresholdConfig) {
        self.thresholds.insert(check.into(), thresholds);
    }

    /// File used by delta checks, `state_dir/delta.json` or the user cache directory.
    pub fn delta_store_path(&self) -> Result<PathBuf> {
        let dir = match &self.state_dir {
            Some(dir) => dir.clone(),
            None => dirs::cache_dir()
                .with_context(|| "Could not determine cache directory")?
                .join("nagkit"),
        };

        Ok(dir.join("delta.json"))
    }
}
