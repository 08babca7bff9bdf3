//! Parking CLI - occupancy and fee tracking for a small parking facility
//!
//! Vehicles are assigned to typed spots on entry, charged a flat hourly
//! rate on exit, and the set of parked vehicles survives restarts in a
//! plain line-per-vehicle file.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{Category, ParkingLot, Vehicle};
