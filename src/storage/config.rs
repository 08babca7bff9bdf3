//! Configuration handling for the parking tracker
//!
//! Configuration is stored in `parking.toml` (facility, next to the data
//! file) and `~/.config/parking/config.toml` (global, per user).

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Category, HourlyRate, LotPolicy};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// A run of spots reserved for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotGroup {
    pub category: Category,
    pub count: u32,
}

impl SpotGroup {
    pub fn new(category: impl Into<Category>, count: u32) -> Self {
        Self {
            category: category.into(),
            count,
        }
    }
}

/// Facility-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LotConfig {
    /// Charge per hour of parking
    pub hourly_rate: f64,

    /// Currency symbol shown before charges
    pub currency: String,

    /// Vehicle store, relative to the facility root
    pub data_file: PathBuf,

    /// Refuse blank plates and plates that are already parked
    pub reject_duplicate_plates: bool,

    /// Spot groups, numbered in this order
    pub spots: Vec<SpotGroup>,
}

impl Default for LotConfig {
    fn default() -> Self {
        Self {
            hourly_rate: HourlyRate::DEFAULT.per_hour(),
            currency: "$".to_string(),
            data_file: PathBuf::from("parking_data.txt"),
            reject_duplicate_plates: false,
            spots: vec![
                SpotGroup::new(Category::car(), 30),
                SpotGroup::new(Category::motorcycle(), 20),
            ],
        }
    }
}

impl LotConfig {
    /// Checks the layout and rate make sense
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.spots.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one spot group is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for group in &self.spots {
            if !seen.insert(&group.category) {
                return Err(ConfigError::Invalid(format!(
                    "category '{}' is listed more than once",
                    group.category
                )));
            }
        }

        if !self.hourly_rate.is_finite() || self.hourly_rate < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "hourly_rate must be a non-negative number, got {}",
                self.hourly_rate
            )));
        }

        if self.data_file.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("data_file cannot be empty".to_string()));
        }

        Ok(())
    }

    /// Spot layout for the engine
    pub fn layout(&self) -> Vec<(Category, u32)> {
        self.spots
            .iter()
            .map(|g| (g.category.clone(), g.count))
            .collect()
    }

    pub fn rate(&self) -> HourlyRate {
        HourlyRate::new(self.hourly_rate)
    }

    pub fn policy(&self) -> LotPolicy {
        LotPolicy {
            reject_duplicate_plates: self.reject_duplicate_plates,
        }
    }
}

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GlobalConfig {
    /// Output format when `--format` is not given
    pub default_format: OutputFormat,
}

/// Output format for commands
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Combined configuration (global + facility)
#[derive(Debug, Clone)]
pub struct Config {
    pub lot: LotConfig,
    pub global: GlobalConfig,
    pub root: PathBuf,
}

impl Config {
    /// Facility config file name
    pub const FILE_NAME: &'static str = "parking.toml";

    /// Loads configuration for the facility rooted at `root`
    ///
    /// A missing `parking.toml` yields the standard layout.
    pub fn for_facility(root: &Path) -> Result<Self> {
        let global = Self::load_global()?;
        let lot = Self::load_lot_config(root)?;

        Ok(Self {
            lot,
            global,
            root: root.to_path_buf(),
        })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "parking", "parking-cli")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads global configuration
    pub fn load_global() -> Result<GlobalConfig> {
        let config_dir = match Self::global_config_dir() {
            Some(dir) => dir,
            None => return Ok(GlobalConfig::default()),
        };

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(GlobalConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read global config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse global config")
    }

    /// Loads and validates facility configuration from a specific root
    fn load_lot_config(root: &Path) -> Result<LotConfig> {
        let config_path = root.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(LotConfig::default());
        }

        let content = fs::read_to_string(&config_path).with_context(|| {
            format!("Failed to read facility config: {}", config_path.display())
        })?;

        let lot: LotConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse facility config")?;

        lot.validate()
            .with_context(|| format!("Invalid facility config: {}", config_path.display()))?;

        Ok(lot)
    }

    /// Path of the facility config file
    pub fn lot_config_path(&self) -> PathBuf {
        self.root.join(Self::FILE_NAME)
    }

    /// Path of the vehicle store; absolute `data_file` values are kept as is
    pub fn data_path(&self) -> PathBuf {
        self.root.join(&self.lot.data_file)
    }
}
