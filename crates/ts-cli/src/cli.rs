//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Timesheet: time clients with a stopwatch, export the day as CSV.
///
/// Unsaved hours and a running timer are checkpointed after every command,
/// so nothing is lost between invocations or after a crash.
#[derive(Debug, Parser)]
#[command(name = "ts", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the clients time can be booked against.
    Clients,

    /// Start the timer for a client.
    Start {
        /// Client name, exactly as configured.
        client: String,
    },

    /// Stop the timer and log the elapsed time, rounded to 0.1 h.
    Stop,

    /// Show the timer and current totals, including the running interval.
    ///
    /// The text view rounds hours to 0.01; `--json` prints the exact values.
    Status {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Add hours to a client by hand.
    Add {
        /// Client name, exactly as configured.
        client: String,

        /// Hours to add, e.g. 2.5.
        #[arg(allow_hyphen_values = true)]
        hours: String,
    },

    /// Write the logged hours to a CSV timesheet and clear them.
    Save {
        /// Timesheet file; a header row is added if it does not exist yet.
        path: PathBuf,

        /// Start a new timesheet, replacing the file instead of appending.
        #[arg(long)]
        new: bool,
    },

    /// Drop unsaved hours before exiting.
    Discard {
        /// Confirm discarding hours that were never saved.
        #[arg(short, long)]
        yes: bool,
    },
}
