//! Output for CLI commands
//!
//! Text mode prints plain lines and lets each command render its own
//! results. JSON mode prints one compact object per line on stdout.
//! Warnings and `--verbose` diagnostics always go to stderr.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::json;

pub use crate::storage::OutputFormat;

/// Where command output goes and how it looks
pub struct Output {
    format: OutputFormat,
    verbose: bool,
}

impl Output {
    pub fn new(format: OutputFormat, verbose: bool) -> Self {
        Self { format, verbose }
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Prints a confirmation line
    pub fn success(&self, message: &str) {
        println!("{}", self.success_line(message));
    }

    /// Prints a non-fatal problem to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{}", self.warning_line(message));
    }

    /// Prints a command result as a single JSON line
    pub fn json<T: Serialize>(&self, data: &T) -> Result<()> {
        let line = serde_json::to_string(data).context("Failed to encode JSON output")?;
        println!("{}", line);
        Ok(())
    }

    /// Prints a diagnostic tagged with `context`, only under `--verbose`
    pub fn verbose(&self, context: &str, message: &str) {
        if self.verbose {
            eprintln!("[verbose:{}] {}", context, message);
        }
    }

    fn success_line(&self, message: &str) -> String {
        match self.format {
            OutputFormat::Text => message.to_string(),
            OutputFormat::Json => json!({ "success": true, "message": message }).to_string(),
        }
    }

    fn warning_line(&self, message: &str) -> String {
        match self.format {
            OutputFormat::Text => format!("Warning: {}", message),
            OutputFormat::Json => json!({ "warning": message }).to_string(),
        }
    }
}
