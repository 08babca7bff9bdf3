//! # Storage Layer
//!
//! Persistence and configuration for the parking tracker.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Active vehicles | `plate,category,epoch_seconds` lines | `parking_data.txt` |
//! | Facility config | TOML | `parking.toml` |
//! | User config | TOML | `~/.config/parking/config.toml` |
//!
//! ## Durability
//!
//! - [`VehicleStore`] rewrites the whole file on every change
//! - Writes go to a temp file that is renamed over the store
//! - Reads and writes take `fs2` file locks
//!
//! ## Key Types
//!
//! - [`Facility`] - Entry point: a directory with its config
//! - [`Garage`] - The parking lot bound to its store
//! - [`VehicleStore`] - Read/write active vehicles
//! - [`Config`] - Facility and global configuration

mod records;
mod config;
mod garage;
mod facility;

pub use records::{format_line, parse_line, LoadReport, VehicleStore};
pub use config::{Config, ConfigError, GlobalConfig, LotConfig, OutputFormat, SpotGroup};
pub use garage::{Garage, Startup, Synced};
pub use facility::{Facility, FacilityError};
