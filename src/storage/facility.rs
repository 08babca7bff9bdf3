//! Facility management
//!
//! A facility is a directory holding `parking.toml` and the vehicle store.
//! Handles initialization and builds the garage from configuration.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use super::{Config, Garage, Startup, VehicleStore};
use crate::domain::ParkingLot;

#[derive(Debug, Error)]
pub enum FacilityError {
    #[error("Facility directory does not exist: {0}")]
    MissingRoot(PathBuf),
}

const DEFAULT_CONFIG: &str = r#"# Parking facility configuration

# Charge per hour of parking, no minimum and no rounding
hourly_rate = 2.5

# Symbol shown before charges
currency = "$"

# Active vehicles, one `plate,category,entry_epoch_seconds` line each
data_file = "parking_data.txt"

# Refuse blank plates and plates that are already parked
reject_duplicate_plates = false

# Spots are numbered from 1 in the order listed here
[[spots]]
category = "Car"
count = 30

[[spots]]
category = "Motorcycle"
count = 20
"#;

/// A parking facility on disk
pub struct Facility {
    root: PathBuf,
    config: Config,
}

impl Facility {
    /// Opens the facility at the given directory
    ///
    /// No `parking.toml` is needed; without one the facility gets 30 car
    /// spots followed by 20 motorcycle spots.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        if !root.is_dir() {
            return Err(FacilityError::MissingRoot(root).into());
        }

        let config = Config::for_facility(&root)?;

        Ok(Self { root, config })
    }

    /// Writes a default `parking.toml` unless one exists, then opens
    pub fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create facility directory: {}", root.display()))?;

        let config_path = root.join(Config::FILE_NAME);
        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG)
                .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
        }

        Self::open(root)
    }

    /// Returns the facility root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the vehicle store
    pub fn store(&self) -> VehicleStore {
        VehicleStore::new(self.config.data_path())
    }

    /// Builds an empty lot from the configured layout
    pub fn empty_lot(&self) -> ParkingLot {
        let lot = &self.config.lot;
        ParkingLot::new(&lot.layout(), lot.rate(), lot.policy())
    }

    /// Builds the lot and replays the stored vehicles into it
    pub fn open_garage(&self) -> Result<(Garage, Startup)> {
        Garage::open(self.empty_lot(), self.store())
    }
}
