//! Timesheet CLI library.
//!
//! This crate provides the command-line front end: argument parsing,
//! configuration, and one module per subcommand.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::Config;
