//! Core library entry for the `snyk-reach` CLI.
//!
//! Turns a Snyk issue URL into a reachability verdict: decompose the URL,
//! resolve the organization, walk the project's issue pages for the issue
//! key, then inspect the issue's coordinates.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod handler;
pub mod ports;
pub mod reachability;
pub mod server;
pub mod severity;
pub mod snyk;
pub mod tracker_url;

#[cfg(test)]
mod testing;

use clap::error::ErrorKind;
use clap::Parser;

pub use config::Settings;
pub use error::ReachError;
pub use handler::{ReachabilityService, Response, Verdict};

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing, configuration loading or
/// command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    let settings = Settings::load().map_err(|err| err.to_string())?;
    execute(&cli, settings)
}

fn execute(cli: &cli::Cli, settings: Settings) -> Result<(), String> {
    commands::dispatch(&cli.command, settings)
}
