//! The owning context for one user's timesheet.
//!
//! A [`Session`] composes the client roster, the ledger and the timer. Every
//! user action maps to one method taking explicit inputs (client name,
//! typed amount, instant). Errors end the attempted action only; the ledger
//! is never left half-updated.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::client::{Client, ClientError, ClientRoster};
use crate::ledger::{InvalidManualEntry, Ledger, Snapshot, parse_manual_hours};
use crate::timer::{Elapsed, Timer, TimerStateError};

/// Errors from session operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    InvalidManualEntry(#[from] InvalidManualEntry),

    #[error(transparent)]
    TimerState(#[from] TimerStateError),

    #[error(transparent)]
    Client(#[from] ClientError),

    /// Saving would drop the interval still being timed.
    #[error("cannot save while the timer is running for {client}; stop it first")]
    SaveWhileRunning { client: Client },

    /// Exit requested with entries that were never saved.
    #[error("{entries} unsaved ledger entries; confirm to discard them")]
    UnsavedExit { entries: usize },
}

/// Failure of [`Session::save`]: either the session refused, or the writer failed.
#[derive(Debug, Error)]
pub enum SaveError<E> {
    #[error(transparent)]
    Session(SessionError),

    #[error(transparent)]
    Write(E),
}

/// Hours booked by stopping the timer.
#[derive(Debug, Clone, PartialEq)]
pub struct Logged {
    pub client: Client,
    pub seconds: i64,
    pub hours: f64,
}

impl From<&Elapsed> for Logged {
    fn from(elapsed: &Elapsed) -> Self {
        Self {
            client: elapsed.client.clone(),
            seconds: elapsed.seconds,
            hours: elapsed.hours(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    roster: ClientRoster,
    ledger: Ledger,
    timer: Timer,
}

impl Session {
    /// A fresh session with an empty ledger and an idle timer.
    pub fn new(roster: ClientRoster) -> Self {
        Self::restore(roster, Ledger::new(), Timer::Idle)
    }

    /// Rebuilds a session from persisted state, verbatim.
    pub fn restore(roster: ClientRoster, ledger: Ledger, timer: Timer) -> Self {
        for (client, _) in ledger.iter() {
            if !roster.contains(client.as_str()) {
                tracing::warn!(%client, "restored ledger entry for a client outside the roster");
            }
        }
        Self {
            roster,
            ledger,
            timer,
        }
    }

    pub const fn roster(&self) -> &ClientRoster {
        &self.roster
    }

    pub const fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub const fn timer(&self) -> &Timer {
        &self.timer
    }

    /// Splits the session into its persisted parts.
    pub fn into_parts(self) -> (Ledger, Timer) {
        (self.ledger, self.timer)
    }

    /// Starts timing the named client.
    pub fn start(&mut self, client: &str, now: DateTime<Utc>) -> Result<Client, SessionError> {
        let client = self.roster.resolve(client)?;
        self.timer.start(client.clone(), now)?;
        tracing::info!(%client, %now, "timer started");
        Ok(client)
    }

    /// Stops the timer and books the rounded hours to its client.
    pub fn stop(&mut self, now: DateTime<Utc>) -> Result<Logged, SessionError> {
        let elapsed = self.timer.stop(now)?;
        let logged = Logged::from(&elapsed);
        self.ledger.add(elapsed.client, logged.hours);
        tracing::info!(
            client = %logged.client,
            seconds = logged.seconds,
            hours = logged.hours,
            "timer stopped"
        );
        Ok(logged)
    }

    /// Seconds on the running timer.
    pub fn split(&self, now: DateTime<Utc>) -> Result<i64, SessionError> {
        Ok(self.timer.split(now)?)
    }

    /// Current totals including any in-progress interval.
    pub fn live_snapshot(&self, now: DateTime<Utc>) -> Snapshot {
        self.ledger.snapshot(Some(&self.timer), now)
    }

    /// Adds hours typed by the user to the named client.
    ///
    /// Both inputs are validated before the ledger is touched.
    pub fn manual_add(&mut self, input: &str, client: &str) -> Result<f64, SessionError> {
        let hours = parse_manual_hours(input)?;
        let client = self.roster.resolve(client)?;
        tracing::info!(%client, hours, "manual entry");
        self.ledger.add(client, hours);
        Ok(hours)
    }

    /// Hands the ledger to `write` and clears it once the write succeeds.
    ///
    /// Refused while the timer is running. Returns the number of entries
    /// written.
    pub fn save<E, F>(&mut self, write: F) -> Result<usize, SaveError<E>>
    where
        F: FnOnce(&Ledger) -> Result<(), E>,
    {
        if let Some(client) = self.timer.active_client() {
            return Err(SaveError::Session(SessionError::SaveWhileRunning {
                client: client.clone(),
            }));
        }
        write(&self.ledger).map_err(SaveError::Write)?;
        let written = self.ledger.len();
        self.ledger.clear();
        tracing::info!(entries = written, "ledger saved and cleared");
        Ok(written)
    }

    /// Exit gate: a non-empty ledger needs confirmation, which discards it.
    pub fn confirm_exit(&mut self, confirmed: bool) -> Result<(), SessionError> {
        if self.ledger.is_empty() {
            return Ok(());
        }
        if !confirmed {
            return Err(SessionError::UnsavedExit {
                entries: self.ledger.len(),
            });
        }
        tracing::info!(entries = self.ledger.len(), "discarding unsaved ledger");
        self.ledger.clear();
        Ok(())
    }
}
