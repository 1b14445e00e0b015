//! Accumulated hours per client.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::client::Client;
use crate::timer::{Timer, hours_from_seconds};

/// Manual time text that is not a non-negative decimal number.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid manual entry {input:?}: expected a non-negative number of hours")]
pub struct InvalidManualEntry {
    pub input: String,
}

/// Parses hours typed by the user, keeping full precision.
pub fn parse_manual_hours(input: &str) -> Result<f64, InvalidManualEntry> {
    let invalid = || InvalidManualEntry {
        input: input.to_string(),
    };
    let hours: f64 = input.trim().parse().map_err(|_| invalid())?;
    if !hours.is_finite() || hours < 0.0 {
        return Err(invalid());
    }
    Ok(hours)
}

/// Mapping from client to accumulated hours.
///
/// Absent clients read as zero. Serializes as a flat `{"client": hours}`
/// object, which is also the checkpoint format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    entries: BTreeMap<Client, f64>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `hours` to the client's entry, starting from zero if absent.
    pub fn add(&mut self, client: Client, hours: f64) {
        *self.entries.entry(client).or_insert(0.0) += hours;
    }

    /// Hours booked for `client`, zero if none.
    pub fn get(&self, client: &Client) -> f64 {
        self.entries.get(client).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in client-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&Client, f64)> {
        self.entries.iter().map(|(client, hours)| (client, *hours))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Copies the current totals.
    ///
    /// If `timer` is running, its split (rounded to a tenth of an hour) is
    /// added to the active client in the copy. The ledger itself is untouched.
    pub fn snapshot(&self, timer: Option<&Timer>, now: DateTime<Utc>) -> Snapshot {
        let mut entries = self.entries.clone();
        if let Some(Timer::Running { client, .. }) = timer {
            let split = timer.and_then(|t| t.split(now).ok()).unwrap_or(0);
            *entries.entry(client.clone()).or_insert(0.0) += hours_from_seconds(split);
        }
        Snapshot { entries }
    }
}

impl FromIterator<(Client, f64)> for Ledger {
    fn from_iter<I: IntoIterator<Item = (Client, f64)>>(iter: I) -> Self {
        let mut ledger = Self::new();
        for (client, hours) in iter {
            ledger.add(client, hours);
        }
        ledger
    }
}

/// A read-only copy of ledger totals, used for live views.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Snapshot {
    entries: BTreeMap<Client, f64>,
}

impl Snapshot {
    pub fn get(&self, client: &Client) -> f64 {
        self.entries.get(client).copied().unwrap_or(0.0)
    }

    /// Sum of all entries.
    pub fn total(&self) -> f64 {
        self.entries.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Client, f64)> {
        self.entries.iter().map(|(client, hours)| (client, *hours))
    }
}
