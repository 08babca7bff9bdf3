//! Vehicle domain model
//!
//! A vehicle record is one parking session: created when a park request
//! succeeds and flipped inactive on exit. Records are never removed from
//! the engine's list, so it doubles as a session log.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Vehicle category that decides which spots a vehicle may use
///
/// Categories are compared by exact string equality. Any string is accepted
/// as input; a category without configured spots simply never finds one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub const CAR: &'static str = "Car";
    pub const MOTORCYCLE: &'static str = "Motorcycle";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn car() -> Self {
        Self::new(Self::CAR)
    }

    pub fn motorcycle() -> Self {
        Self::new(Self::MOTORCYCLE)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Truncates a timestamp to whole seconds, the precision the store keeps
pub fn whole_seconds(at: DateTime<Utc>) -> DateTime<Utc> {
    Utc.timestamp_opt(at.timestamp(), 0).single().unwrap_or(at)
}

/// One parking session for a vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// License plate as entered, no normalization
    pub plate: String,

    /// Category the vehicle parked under
    pub category: Category,

    /// When the vehicle entered, whole seconds
    pub entry_time: DateTime<Utc>,

    /// True while the vehicle occupies a spot
    pub active: bool,

    /// Spot assigned on entry; `None` for records restored without a free spot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spot: Option<u32>,
}

impl Vehicle {
    /// Starts a parking session at the given time
    pub fn park_at(
        plate: impl Into<String>,
        category: Category,
        spot: Option<u32>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            plate: plate.into(),
            category,
            entry_time: whole_seconds(now),
            active: true,
            spot,
        }
    }

    /// Ends the parking session
    pub fn exit(&mut self) {
        self.active = false;
    }

    /// Entry time as seconds since the Unix epoch
    pub fn entry_epoch(&self) -> i64 {
        self.entry_time.timestamp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_compare_by_exact_string() {
        assert_eq!(Category::from("Car"), Category::car());
        assert_ne!(Category::from("car"), Category::car());
        assert_eq!(Category::motorcycle().to_string(), "Motorcycle");
    }

    #[test]
    fn park_truncates_entry_to_seconds() {
        let now = Utc.timestamp_opt(1_700_000_000, 987_000_000).unwrap();
        let vehicle = Vehicle::park_at("ABC123", Category::car(), Some(1), now);

        assert_eq!(vehicle.entry_epoch(), 1_700_000_000);
        assert_eq!(vehicle.entry_time.timestamp_subsec_nanos(), 0);
        assert!(vehicle.active);
    }

    #[test]
    fn exit_marks_inactive() {
        let mut vehicle = Vehicle::park_at("ABC123", Category::car(), Some(1), Utc::now());
        vehicle.exit();
        assert!(!vehicle.active);
    }

    #[test]
    fn category_serializes_as_plain_string() {
        let json = serde_json::to_string(&Category::motorcycle()).unwrap();
        assert_eq!(json, "\"Motorcycle\"");
    }
}
