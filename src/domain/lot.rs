//! Allocation engine
//!
//! [`ParkingLot`] is the only thing that mutates spots and vehicle records.
//! It has no I/O of its own; callers persist [`ParkingLot::active_vehicles`]
//! after each successful park or exit.
//!
//! ## Spot release on exit
//!
//! Each vehicle remembers the spot it was given and exit frees exactly that
//! spot. A vehicle restored without a spot (more records than capacity)
//! frees nothing.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use super::fee::{Charge, HourlyRate};
use super::spot::SpotInventory;
use super::vehicle::{Category, Vehicle};

#[derive(Debug, Error, PartialEq)]
pub enum ParkError {
    #[error("No available spots for {0}")]
    NoSpotAvailable(Category),

    #[error("Vehicle {0} is already parked")]
    AlreadyParked(String),

    #[error("License plate cannot be empty")]
    EmptyPlate,
}

#[derive(Debug, Error, PartialEq)]
pub enum ExitError {
    #[error("Vehicle {0} not found")]
    NotFound(String),
}

/// Admission rules beyond capacity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LotPolicy {
    /// Refuse blank plates and plates that are already parked
    pub reject_duplicate_plates: bool,
}

/// Result of a successful park
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parked {
    pub spot: u32,
    pub vehicle: Vehicle,
}

/// Result of a successful exit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Receipt {
    /// The closed session record
    pub vehicle: Vehicle,
    pub exit_time: DateTime<Utc>,
    pub charge: Charge,
    /// Spot freed by this exit, if the vehicle held one
    pub released: Option<u32>,
}

/// Occupancy for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryOccupancy {
    pub category: Category,
    pub occupied: u32,
    pub total: u32,
}

/// Read-only snapshot of the lot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusReport {
    pub total_spots: usize,
    /// One entry per category, in declaration order
    pub occupancy: Vec<CategoryOccupancy>,
    /// Active vehicles in the order they were recorded
    pub active: Vec<Vehicle>,
}

/// Outcome of replaying stored vehicles into a fresh lot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestoreReport {
    pub restored: usize,
    /// Plates that were kept active but could not be given a spot
    pub unplaced: Vec<String>,
}

/// The parking facility's in-memory state
#[derive(Debug, Clone)]
pub struct ParkingLot {
    inventory: SpotInventory,
    vehicles: Vec<Vehicle>,
    rate: HourlyRate,
    policy: LotPolicy,
}

impl ParkingLot {
    /// Creates an empty lot with the given layout
    pub fn new(layout: &[(Category, u32)], rate: HourlyRate, policy: LotPolicy) -> Self {
        Self {
            inventory: SpotInventory::initialize(layout),
            vehicles: Vec::new(),
            rate,
            policy,
        }
    }

    /// The 30 car / 20 motorcycle layout at the default rate
    pub fn standard() -> Self {
        Self::new(
            &[(Category::car(), 30), (Category::motorcycle(), 20)],
            HourlyRate::DEFAULT,
            LotPolicy::default(),
        )
    }

    /// Replays stored vehicles against the inventory
    ///
    /// Every vehicle comes back active and takes the lowest free spot of its
    /// category. Should the store hold more vehicles of a category than there
    /// are spots, the extras stay active without a spot.
    pub fn restore(&mut self, vehicles: impl IntoIterator<Item = Vehicle>) -> RestoreReport {
        let mut report = RestoreReport::default();

        for mut vehicle in vehicles {
            vehicle.active = true;
            vehicle.spot = self.inventory.find_free(&vehicle.category);
            match vehicle.spot {
                Some(number) => {
                    self.inventory.occupy(number);
                }
                None => report.unplaced.push(vehicle.plate.clone()),
            }
            self.vehicles.push(vehicle);
            report.restored += 1;
        }

        report
    }

    /// Parks a vehicle now
    pub fn park(&mut self, plate: &str, category: Category) -> Result<Parked, ParkError> {
        self.park_at(plate, category, Utc::now())
    }

    /// Parks a vehicle in the lowest free spot of its category
    ///
    /// On error nothing changes.
    pub fn park_at(
        &mut self,
        plate: &str,
        category: Category,
        now: DateTime<Utc>,
    ) -> Result<Parked, ParkError> {
        if self.policy.reject_duplicate_plates {
            if plate.trim().is_empty() {
                return Err(ParkError::EmptyPlate);
            }
            if self.find_active(plate).is_some() {
                return Err(ParkError::AlreadyParked(plate.to_string()));
            }
        }

        let spot = self
            .inventory
            .find_free(&category)
            .ok_or_else(|| ParkError::NoSpotAvailable(category.clone()))?;

        let vehicle = Vehicle::park_at(plate, category, Some(spot), now);
        self.inventory.occupy(spot);
        self.vehicles.push(vehicle.clone());

        Ok(Parked { spot, vehicle })
    }

    /// Removes a vehicle now
    pub fn exit(&mut self, plate: &str) -> Result<Receipt, ExitError> {
        self.exit_at(plate, Utc::now())
    }

    /// Ends the earliest active session for `plate` and prices it
    ///
    /// On error nothing changes.
    pub fn exit_at(&mut self, plate: &str, now: DateTime<Utc>) -> Result<Receipt, ExitError> {
        let idx = self
            .find_active(plate)
            .ok_or_else(|| ExitError::NotFound(plate.to_string()))?;

        let charge = self.rate.charge_for(self.vehicles[idx].entry_time, now);

        let vehicle = &mut self.vehicles[idx];
        vehicle.exit();
        let released = vehicle.spot.filter(|n| self.inventory.vacate(*n));

        Ok(Receipt {
            vehicle: vehicle.clone(),
            exit_time: now,
            charge,
            released,
        })
    }

    /// Snapshot of occupancy and active vehicles
    pub fn status(&self) -> StatusReport {
        let occupancy = self
            .inventory
            .categories()
            .into_iter()
            .map(|category| {
                let (occupied, total) = self.inventory.occupancy(&category);
                CategoryOccupancy {
                    category,
                    occupied,
                    total,
                }
            })
            .collect();

        StatusReport {
            total_spots: self.inventory.len(),
            occupancy,
            active: self.active_vehicles().cloned().collect(),
        }
    }

    /// Active vehicles in insertion order
    pub fn active_vehicles(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.iter().filter(|v| v.active)
    }

    /// Every session recorded since startup, including closed ones
    pub fn records(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn inventory(&self) -> &SpotInventory {
        &self.inventory
    }

    fn find_active(&self, plate: &str) -> Option<usize> {
        self.vehicles
            .iter()
            .position(|v| v.active && v.plate == plate)
    }
}
