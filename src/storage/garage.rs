//! Persistent parking lot
//!
//! Wraps the in-memory [`ParkingLot`] with its [`VehicleStore`]. Every
//! successful park or exit rewrites the store before returning. A failed
//! write does not undo the operation: the error rides along with the
//! outcome and the in-memory state stays authoritative.

use anyhow::Result;
use chrono::{DateTime, Utc};

use super::records::VehicleStore;
use crate::domain::{
    Category, ExitError, ParkError, Parked, ParkingLot, Receipt, RestoreReport, StatusReport,
};

/// An outcome plus the result of persisting it
#[derive(Debug)]
pub struct Synced<T> {
    pub outcome: T,
    /// Set when the store could not be written
    pub save_error: Option<anyhow::Error>,
}

impl<T> Synced<T> {
    pub fn is_saved(&self) -> bool {
        self.save_error.is_none()
    }
}

/// What happened while loading the store at startup
#[derive(Debug, Default)]
pub struct Startup {
    pub restore: RestoreReport,
    /// Store lines that were skipped as malformed
    pub skipped: Vec<usize>,
}

/// A parking lot bound to its store
pub struct Garage {
    lot: ParkingLot,
    store: VehicleStore,
}

impl Garage {
    /// Binds a lot to a store without reading it
    pub fn new(lot: ParkingLot, store: VehicleStore) -> Self {
        Self { lot, store }
    }

    /// Loads the store and replays its vehicles into `lot`
    pub fn open(mut lot: ParkingLot, store: VehicleStore) -> Result<(Self, Startup)> {
        let report = store.load()?;
        let restore = lot.restore(report.vehicles);

        let startup = Startup {
            restore,
            skipped: report.skipped,
        };
        Ok((Self { lot, store }, startup))
    }

    pub fn park(&mut self, plate: &str, category: Category) -> Result<Synced<Parked>, ParkError> {
        self.park_at(plate, category, Utc::now())
    }

    pub fn park_at(
        &mut self,
        plate: &str,
        category: Category,
        now: DateTime<Utc>,
    ) -> Result<Synced<Parked>, ParkError> {
        let outcome = self.lot.park_at(plate, category, now)?;
        Ok(self.sync(outcome))
    }

    pub fn exit(&mut self, plate: &str) -> Result<Synced<Receipt>, ExitError> {
        self.exit_at(plate, Utc::now())
    }

    pub fn exit_at(
        &mut self,
        plate: &str,
        now: DateTime<Utc>,
    ) -> Result<Synced<Receipt>, ExitError> {
        let outcome = self.lot.exit_at(plate, now)?;
        Ok(self.sync(outcome))
    }

    pub fn status(&self) -> StatusReport {
        self.lot.status()
    }

    pub fn lot(&self) -> &ParkingLot {
        &self.lot
    }

    pub fn store(&self) -> &VehicleStore {
        &self.store
    }

    fn sync<T>(&self, outcome: T) -> Synced<T> {
        let save_error = self.store.save(self.lot.active_vehicles()).err();
        Synced {
            outcome,
            save_error,
        }
    }
}
