//! CLI argument definitions.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `snyk-reach`.
#[derive(Debug, Parser)]
#[command(name = "snyk-reach", version, about = "Check whether a Snyk issue is reachable")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run one reachability check and print the response envelope.
    Check {
        /// Snyk issue URL (`.../org/<org>/project/<id>#issue-<key>`).
        #[arg(long, conflicts_with = "body", required_unless_present = "body")]
        url: Option<String>,
        /// Severity filter: critical, high, medium or low.
        #[arg(long, conflicts_with = "body")]
        severity: Option<String>,
        /// Raw JSON request body instead of --url/--severity.
        #[arg(long)]
        body: Option<String>,
        /// Serve upstream traffic from a recorded cassette.
        #[arg(long, value_name = "CASSETTE")]
        replay: Option<PathBuf>,
    },
    /// Serve the check over HTTP.
    Serve {
        /// Address to listen on.
        #[arg(long, default_value = "127.0.0.1:8080")]
        addr: SocketAddr,
    },
}
