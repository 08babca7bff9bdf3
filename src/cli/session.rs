//! Interactive menu session
//!
//! Reads one choice per line and prompts for details:
//!
//! ```text
//! 1. Park Vehicle
//! 2. Remove Vehicle
//! 3. Display Status
//! 4. Exit
//! ```
//!
//! Refusals (full category, unknown plate) are printed and the menu comes
//! back; end of input ends the session like choice 4.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};

use super::lot_cmd::{charge_line, open, report_save, write_status};
use super::output::Output;
use crate::domain::{Category, ParkError};
use crate::storage::Garage;

/// Runs the menu on stdin/stdout
pub fn run(output: &Output, root: &Path) -> Result<()> {
    let (facility, mut garage) = open(output, root)?;
    let currency = facility.config().lot.currency.clone();

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Session::new(&mut garage, output, &currency).run(stdin.lock(), stdout.lock())
}

/// A menu loop over any line source and sink
pub struct Session<'a> {
    garage: &'a mut Garage,
    output: &'a Output,
    currency: &'a str,
}

impl<'a> Session<'a> {
    pub fn new(garage: &'a mut Garage, output: &'a Output, currency: &'a str) -> Self {
        Self {
            garage,
            output,
            currency,
        }
    }

    /// Loops until choice 4 or end of input
    pub fn run(&mut self, mut input: impl BufRead, mut out: impl Write) -> Result<()> {
        loop {
            write!(
                out,
                "\nParking Management System\n\
                 1. Park Vehicle\n\
                 2. Remove Vehicle\n\
                 3. Display Status\n\
                 4. Exit\n\
                 Enter choice: "
            )?;
            out.flush()?;

            let Some(choice) = read_line(&mut input)? else {
                break;
            };

            match choice.as_str() {
                "1" => self.park(&mut input, &mut out)?,
                "2" => self.remove(&mut input, &mut out)?,
                "3" => write_status(&mut out, &self.garage.status())?,
                "4" => break,
                _ => writeln!(out, "Invalid choice!")?,
            }
        }

        self.output.verbose("session", "Session ended");
        Ok(())
    }

    fn park(&mut self, input: &mut impl BufRead, out: &mut impl Write) -> Result<()> {
        let Some(plate) = prompt(input, out, "Enter license plate: ")? else {
            return Ok(());
        };

        let categories: Vec<String> = self
            .garage
            .lot()
            .inventory()
            .categories()
            .iter()
            .map(|c| c.to_string())
            .collect();
        let question = format!("Enter vehicle type ({}): ", categories.join("/"));
        let Some(category) = prompt(input, out, &question)? else {
            return Ok(());
        };

        match self.garage.park(&plate, Category::new(category.clone())) {
            Ok(parked) => {
                report_save(self.output, &parked);
                self.output.verbose(
                    "session",
                    &format!("{} assigned spot {}", plate, parked.outcome.spot),
                );
                writeln!(out, "Vehicle parked successfully!")?;
            }
            Err(ParkError::NoSpotAvailable(_)) => {
                writeln!(out, "No available spots for {}!", category)?;
            }
            Err(ParkError::AlreadyParked(_)) => {
                writeln!(out, "Vehicle {} is already parked!", plate)?;
            }
            Err(ParkError::EmptyPlate) => {
                writeln!(out, "License plate cannot be empty!")?;
            }
        }

        Ok(())
    }

    fn remove(&mut self, input: &mut impl BufRead, out: &mut impl Write) -> Result<()> {
        let Some(plate) = prompt(input, out, "Enter license plate: ")? else {
            return Ok(());
        };

        match self.garage.exit(&plate) {
            Ok(receipt) => {
                report_save(self.output, &receipt);
                writeln!(out, "{}", charge_line(self.currency, receipt.outcome.charge))?;
                writeln!(out, "Vehicle removed successfully!")?;
            }
            Err(_) => writeln!(out, "Vehicle not found!")?,
        }

        Ok(())
    }
}

fn prompt(input: &mut impl BufRead, out: &mut impl Write, question: &str) -> Result<Option<String>> {
    write!(out, "{}", question)?;
    out.flush()?;
    read_line(input)
}

/// Next line without its line ending, `None` at end of input
///
/// Only the line ending is stripped; a choice of ` 1 ` is not `1`.
fn read_line(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut buf = Vec::new();
    let read = input.read_until(b'\n', &mut buf).context("Failed to read input")?;
    if read == 0 {
        return Ok(None);
    }

    // Bytes that are not UTF-8 become U+FFFD instead of ending the session
    let line = String::from_utf8_lossy(&buf);
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}
