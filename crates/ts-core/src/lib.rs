//! Core domain logic for the timesheet.
//!
//! This crate contains the fundamental types and logic for:
//! - Clients: the configured roster of billable names
//! - Ledger: accumulated hours per client, with live snapshots
//! - Timer: the start/stop stopwatch and its rounding to tenths of an hour
//! - Session: the owning context that composes the three

pub mod client;
pub mod ledger;
pub mod session;
pub mod timer;

pub use client::{Client, ClientError, ClientRoster, DEFAULT_CLIENTS};
pub use ledger::{InvalidManualEntry, Ledger, Snapshot, parse_manual_hours};
pub use session::{Logged, SaveError, Session, SessionError};
pub use timer::{Elapsed, Timer, TimerPhase, TimerStateError, hours_from_seconds};
