//! Facility commands (init, park, exit, status)

use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Local, Utc};

use super::output::Output;
use crate::domain::{Category, Charge, Receipt, StatusReport};
use crate::storage::{Facility, Garage, Synced};

/// Initialize a facility directory
pub fn init(output: &Output, root: &Path) -> Result<()> {
    output.verbose("init", &format!("Initializing facility at: {}", root.display()));
    let facility = Facility::init(root)?;
    let config = facility.config();

    if output.is_json() {
        output.json(&serde_json::json!({
            "initialized": true,
            "root": facility.root().display().to_string(),
            "config": config.lot_config_path().display().to_string(),
            "data_file": config.data_path().display().to_string(),
        }))?;
    } else {
        output.success(&format!(
            "Initialized parking facility at {}",
            facility.root().display()
        ));
    }

    Ok(())
}

/// Park one vehicle
pub fn park(output: &Output, root: &Path, plate: &str, category: &str) -> Result<()> {
    let (facility, mut garage) = open(output, root)?;

    let parked = garage.park(plate, Category::new(category))?;
    report_save(output, &parked);
    let parked = parked.outcome;

    output.verbose(
        "park",
        &format!("{} assigned spot {}", parked.vehicle.plate, parked.spot),
    );

    if output.is_json() {
        output.json(&serde_json::json!({
            "plate": parked.vehicle.plate,
            "category": parked.vehicle.category,
            "spot": parked.spot,
            "entry_time": parked.vehicle.entry_epoch(),
            "data_file": facility.config().data_path().display().to_string(),
        }))?;
    } else {
        output.success(&format!(
            "Vehicle parked successfully! Spot {}",
            parked.spot
        ));
    }

    Ok(())
}

/// Remove one vehicle and print its charge
pub fn exit(output: &Output, root: &Path, plate: &str) -> Result<()> {
    let (facility, mut garage) = open(output, root)?;

    let receipt = garage.exit(plate)?;
    report_save(output, &receipt);
    let receipt = receipt.outcome;

    if output.is_json() {
        output.json(&receipt_json(&receipt))?;
    } else {
        let currency = &facility.config().lot.currency;
        println!("{}", charge_line(currency, receipt.charge));
        output.success("Vehicle removed successfully!");
    }

    Ok(())
}

/// Show occupancy and parked vehicles
pub fn status(output: &Output, root: &Path) -> Result<()> {
    let (_, garage) = open(output, root)?;
    let report = garage.status();

    if output.is_json() {
        output.json(&report)?;
    } else {
        write_status(&mut io::stdout().lock(), &report)?;
    }

    Ok(())
}

/// Opens the facility and loads its garage, reporting what startup found
pub(super) fn open(output: &Output, root: &Path) -> Result<(Facility, Garage)> {
    let facility = Facility::open(root)?;
    output.verbose(
        "open",
        &format!("Opened facility at: {}", facility.root().display()),
    );

    let (garage, startup) = facility.open_garage()?;
    output.verbose(
        "open",
        &format!(
            "Restored {} vehicles from {}",
            startup.restore.restored,
            garage.store().path().display()
        ),
    );

    for line in &startup.skipped {
        output.verbose("open", &format!("Skipped malformed record on line {}", line));
    }
    for plate in &startup.restore.unplaced {
        output.warn(&format!("No free spot for restored vehicle {}", plate));
    }

    Ok((facility, garage))
}

/// Warns when a change could not be written to the store
pub(super) fn report_save<T>(output: &Output, synced: &Synced<T>) {
    if synced.is_saved() {
        output.verbose("save", "Vehicle store updated");
    } else if let Some(e) = &synced.save_error {
        output.warn(&format!("Could not save vehicle store: {:#}", e));
    }
}

pub(super) fn charge_line(currency: &str, charge: Charge) -> String {
    format!("Parking charges: {}{}", currency, charge)
}

fn receipt_json(receipt: &Receipt) -> serde_json::Value {
    serde_json::json!({
        "plate": receipt.vehicle.plate,
        "category": receipt.vehicle.category,
        "entry_time": receipt.vehicle.entry_epoch(),
        "exit_time": receipt.exit_time.timestamp(),
        "charge": receipt.charge,
        "released_spot": receipt.released,
    })
}

/// Entry time in local time, `Thu Nov 14 22:13:20 2023` style
pub(super) fn format_entry_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local)
        .format("%a %b %e %H:%M:%S %Y")
        .to_string()
}

/// Renders the status report as text
pub(super) fn write_status(w: &mut impl Write, report: &StatusReport) -> io::Result<()> {
    writeln!(w)?;
    writeln!(w, "Parking Lot Status:")?;
    writeln!(w, "Total spots: {}", report.total_spots)?;

    for entry in &report.occupancy {
        writeln!(
            w,
            "Occupied {} spots: {}/{}",
            entry.category.as_str().to_lowercase(),
            entry.occupied,
            entry.total
        )?;
    }

    writeln!(w)?;
    writeln!(w, "Currently parked vehicles:")?;
    for vehicle in &report.active {
        writeln!(
            w,
            "License Plate: {} | Type: {} | Entry Time: {}",
            vehicle.plate,
            vehicle.category,
            format_entry_time(vehicle.entry_time)
        )?;
    }

    Ok(())
}
