//! Parking CLI - occupancy and fee tracking for a parking facility

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = parking_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
