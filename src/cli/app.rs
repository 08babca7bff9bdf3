//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{lot_cmd, session};
use crate::storage::Config;

#[derive(Parser)]
#[command(name = "parking")]
#[command(author, version, about = "Occupancy and fee tracking for a parking facility")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the user config, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Facility directory holding parking.toml and the vehicle store
    #[arg(long, short = 'd', global = true, env = "PARKING_DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Runs the interactive menu when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default parking.toml into the facility directory
    Init,

    /// Park a vehicle in the first free spot of its category
    Park {
        /// License plate
        plate: String,

        /// Vehicle category, e.g. Car or Motorcycle
        category: String,
    },

    /// Remove a parked vehicle and print its charge
    #[command(alias = "remove")]
    Exit {
        /// License plate
        plate: String,
    },

    /// Show occupancy per category and the parked vehicles
    Status,

    /// Interactive menu
    Session,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = match cli.format {
        Some(format) => format,
        None => Config::load_global()?.default_format,
    };
    let output = Output::new(format, cli.verbose);

    output.verbose("app", "Parking CLI starting");
    output.verbose("dir", &format!("Facility directory: {}", cli.dir.display()));

    match cli.command {
        Some(Commands::Init) => lot_cmd::init(&output, &cli.dir)?,

        Some(Commands::Park { plate, category }) => {
            output.verbose("park", &format!("Parking {} as {}", plate, category));
            lot_cmd::park(&output, &cli.dir, &plate, &category)?
        }

        Some(Commands::Exit { plate }) => {
            output.verbose("exit", &format!("Removing {}", plate));
            lot_cmd::exit(&output, &cli.dir, &plate)?
        }

        Some(Commands::Status) => lot_cmd::status(&output, &cli.dir)?,

        Some(Commands::Session) | None => session::run(&output, &cli.dir)?,
    }

    output.verbose("app", "Command completed successfully");
    Ok(())
}
