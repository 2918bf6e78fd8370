//! Core library entry for the `pdpguard` CLI.
//!
//! Turns a prose description of a recurring product-page check into a
//! validated workflow specification, verifies each target page for price,
//! Add-to-Cart, and required-text signals under bounded concurrency, picks
//! the matching action branch, and dispatches notifications.

pub mod adapters;
pub mod branch;
pub mod cli;
pub mod commands;
pub mod compile;
pub mod config;
pub mod context;
pub mod diagnose;
pub mod discover;
pub mod dispatch;
pub mod extract;
pub mod ports;
pub mod report;
pub mod spec;
pub mod validate;
pub mod verify;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli.command)
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn run_errors_on_unknown_subcommand() {
        let result = run(["pdpguard", "unknown"]);
        assert!(result.is_err());
    }

    #[test]
    fn run_errors_on_missing_spec_file() {
        let result = run(["pdpguard", "validate", "--spec", "/nonexistent/spec.json"]);
        assert!(result.is_err());
    }
}
