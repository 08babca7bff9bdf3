//! # Command-Line Interface
//!
//! User-facing commands, output formatting and the interactive menu.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | (none), `session` | Interactive menu: park, remove, status, exit |
//! | `init` | Write a default `parking.toml` |
//! | `park <plate> <category>` | Park one vehicle |
//! | `exit <plate>` / `remove` | Remove one vehicle and print the charge |
//! | `status` | Occupancy per category and parked vehicles |
//!
//! ## Output Formats
//!
//! One-shot commands support `--format`:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! The interactive menu always prints text.
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output on stderr:
//! ```bash
//! parking --verbose status
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod lot_cmd;
mod session;

pub use app::{Cli, Commands, run};
pub use output::{Output, OutputFormat};
pub use session::Session;
