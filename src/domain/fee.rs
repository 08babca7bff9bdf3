//! Time-based parking fees

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Flat charge per hour of parking
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HourlyRate(f64);

impl HourlyRate {
    pub const DEFAULT: HourlyRate = HourlyRate(2.50);

    pub fn new(per_hour: f64) -> Self {
        Self(per_hour)
    }

    pub fn per_hour(&self) -> f64 {
        self.0
    }

    /// Charge for a stay from `entry` to `exit`
    ///
    /// Elapsed whole seconds / 3600 * rate, no rounding and no minimum.
    /// Elapsed time below zero counts as zero.
    pub fn charge_for(&self, entry: DateTime<Utc>, exit: DateTime<Utc>) -> Charge {
        let seconds = (exit.timestamp() - entry.timestamp()).max(0);
        Charge(seconds as f64 / 3600.0 * self.0)
    }
}

impl Default for HourlyRate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// An amount owed on exit, kept unrounded
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Charge(f64);

impl Charge {
    pub fn amount(&self) -> f64 {
        self.0
    }
}

/// Two decimal places; rounding only happens here
impl fmt::Display for Charge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
