//! Domain models for the parking tracker
//!
//! Contains the allocation and pricing logic without any I/O concerns.

mod vehicle;
mod spot;
mod fee;
mod lot;

pub use vehicle::{whole_seconds, Category, Vehicle};
pub use spot::{Spot, SpotInventory};
pub use fee::{Charge, HourlyRate};
pub use lot::{
    CategoryOccupancy, ExitError, LotPolicy, ParkError, Parked, ParkingLot, Receipt,
    RestoreReport, StatusReport,
};
