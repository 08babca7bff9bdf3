//! Flat-file storage for active vehicles
//!
//! One line per active vehicle: `<plate>,<category>,<entry epoch seconds>`.
//! No header, no escaping, the whole file is rewritten on every change.
//! A plate containing a comma produces a line that will be skipped on load.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use fs2::FileExt;

use crate::domain::{Category, Vehicle};

const DELIMITER: char = ',';

/// Vehicles read back from the store
#[derive(Debug, Default)]
pub struct LoadReport {
    pub vehicles: Vec<Vehicle>,
    /// 1-based line numbers that were not well-formed records
    pub skipped: Vec<usize>,
}

/// Store for active vehicle records
pub struct VehicleStore {
    path: PathBuf,
}

impl VehicleStore {
    /// Creates a new vehicle store at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all well-formed records
    ///
    /// A missing file means no vehicles are parked.
    pub fn load(&self) -> Result<LoadReport> {
        if !self.path.exists() {
            return Ok(LoadReport::default());
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open vehicle store: {}", self.path.display()))?;

        file.lock_shared()
            .context("Failed to acquire read lock on vehicle store")?;

        let mut reader = BufReader::new(&file);
        let mut report = LoadReport::default();
        let mut buf = Vec::new();
        let mut line_num = 0;

        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .with_context(|| format!("Failed to read line {}", line_num + 1))?;
            if read == 0 {
                break;
            }
            line_num += 1;

            // Lines that are not UTF-8 are malformed records, not read errors
            let Ok(line) = std::str::from_utf8(&buf) else {
                report.skipped.push(line_num);
                continue;
            };
            let line = line.trim_end_matches(['\n', '\r']);

            if line.trim().is_empty() {
                continue;
            }

            match parse_line(line) {
                Some(vehicle) => report.vehicles.push(vehicle),
                None => report.skipped.push(line_num),
            }
        }

        Ok(report)
    }

    /// Replaces the store with the given vehicles
    pub fn save<'a>(&self, vehicles: impl IntoIterator<Item = &'a Vehicle>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create directory: {}", parent.display())
                })?;
            }
        }

        let temp_path = self.temp_path();

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            file.lock_exclusive()
                .context("Failed to acquire write lock on vehicle store")?;

            let mut writer = BufWriter::new(&file);
            for vehicle in vehicles {
                writeln!(writer, "{}", format_line(vehicle)).context("Failed to write vehicle")?;
            }
            writer.flush().context("Failed to flush vehicle store")?;
        }

        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Serializes one record
pub fn format_line(vehicle: &Vehicle) -> String {
    format!(
        "{}{d}{}{d}{}",
        vehicle.plate,
        vehicle.category,
        vehicle.entry_epoch(),
        d = DELIMITER
    )
}

/// Parses one record; `None` unless there are exactly three fields and the
/// last is an integer timestamp
pub fn parse_line(line: &str) -> Option<Vehicle> {
    let fields: Vec<&str> = line.split(DELIMITER).collect();
    let [plate, category, epoch] = fields.as_slice() else {
        return None;
    };

    let seconds: i64 = epoch.trim().parse().ok()?;
    let entry_time = Utc.timestamp_opt(seconds, 0).single()?;

    Some(Vehicle::park_at(*plate, Category::new(*category), None, entry_time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_vehicle(plate: &str, category: Category, epoch: i64) -> Vehicle {
        Vehicle::park_at(plate, category, Some(1), Utc.timestamp_opt(epoch, 0).unwrap())
    }

    #[test]
    fn missing_store_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = VehicleStore::new(dir.path().join("parking_data.txt"));

        let report = store.load().unwrap();
        assert!(report.vehicles.is_empty());
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn save_writes_one_line_per_vehicle() {
        let dir = TempDir::new().unwrap();
        let store = VehicleStore::new(dir.path().join("parking_data.txt"));

        let vehicles = vec![
            make_vehicle("ABC123", Category::car(), 1_700_000_000),
            make_vehicle("MOTO1", Category::motorcycle(), 1_700_000_100),
        ];
        store.save(&vehicles).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            content,
            "ABC123,Car,1700000000\nMOTO1,Motorcycle,1700000100\n"
        );
    }

    #[test]
    fn save_then_load_keeps_plate_category_and_seconds() {
        let dir = TempDir::new().unwrap();
        let store = VehicleStore::new(dir.path().join("parking_data.txt"));

        let vehicles = vec![
            make_vehicle("ABC123", Category::car(), 1_700_000_000),
            make_vehicle("MOTO1", Category::motorcycle(), 1_700_000_100),
        ];
        store.save(&vehicles).unwrap();

        let loaded = store.load().unwrap().vehicles;
        assert_eq!(loaded.len(), 2);
        for (saved, loaded) in vehicles.iter().zip(&loaded) {
            assert_eq!(saved.plate, loaded.plate);
            assert_eq!(saved.category, loaded.category);
            assert_eq!(saved.entry_time, loaded.entry_time);
            assert!(loaded.active);
        }
    }

    #[test]
    fn save_overwrites_previous_content() {
        let dir = TempDir::new().unwrap();
        let store = VehicleStore::new(dir.path().join("parking_data.txt"));

        store
            .save(&[make_vehicle("OLD", Category::car(), 1)])
            .unwrap();
        store.save(&Vec::<Vehicle>::new()).unwrap();

        assert_eq!(fs::read_to_string(store.path()).unwrap(), "");
        assert!(store.load().unwrap().vehicles.is_empty());
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("parking_data.txt");
        fs::write(&path, "GOOD1,Car,1700000000\nBAD,Car\n").unwrap();

        let report = VehicleStore::new(&path).load().unwrap();
        assert_eq!(report.vehicles.len(), 1);
        assert_eq!(report.vehicles[0].plate, "GOOD1");
        assert!(report.vehicles[0].active);
        assert_eq!(report.skipped, vec![2]);
    }

    #[test]
    fn non_utf8_line_is_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("parking_data.txt");
        fs::write(&path, b"GOOD1,Car,1700000000\nBAD\xff,Car,1\n").unwrap();

        let report = VehicleStore::new(&path).load().unwrap();
        assert_eq!(report.vehicles.len(), 1);
        assert_eq!(report.vehicles[0].plate, "GOOD1");
        assert_eq!(report.skipped, vec![2]);
    }

    #[test]
    fn crlf_line_endings_are_accepted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("parking_data.txt");
        fs::write(&path, "A,Car,1700000000\r\n").unwrap();

        let report = VehicleStore::new(&path).load().unwrap();
        assert_eq!(report.vehicles.len(), 1);
        assert_eq!(report.vehicles[0].entry_epoch(), 1_700_000_000);
    }

    #[test]
    fn extra_fields_and_bad_timestamps_are_skipped() {
        assert!(parse_line("A,B,Car,1700000000").is_none());
        assert!(parse_line("A,Car,yesterday").is_none());
        assert!(parse_line("").is_none());
        assert!(parse_line("A,Car,1700000000").is_some());
    }

    #[test]
    fn comma_in_plate_does_not_survive_reload() {
        let dir = TempDir::new().unwrap();
        let store = VehicleStore::new(dir.path().join("parking_data.txt"));

        store
            .save(&[make_vehicle("AB,12", Category::car(), 1_700_000_000)])
            .unwrap();

        let report = store.load().unwrap();
        assert!(report.vehicles.is_empty());
        assert_eq!(report.skipped, vec![1]);
    }

    #[test]
    fn blank_lines_are_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("parking_data.txt");
        fs::write(&path, "\nA,Car,1\n\n").unwrap();

        let report = VehicleStore::new(&path).load().unwrap();
        assert_eq!(report.vehicles.len(), 1);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn atomic_write_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let store = VehicleStore::new(dir.path().join("parking_data.txt"));

        store
            .save(&[make_vehicle("A", Category::car(), 1)])
            .unwrap();

        assert!(!dir.path().join("parking_data.txt.tmp").exists());
    }

    #[test]
    fn creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = VehicleStore::new(dir.path().join("nested").join("parking_data.txt"));

        store.save(&Vec::<Vehicle>::new()).unwrap();
        assert!(store.path().exists());
    }
}
