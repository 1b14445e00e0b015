//! Status command: live view of the timer and current totals.
//!
//! Totals include the running interval's split, rounded like a stop would
//! round it, without booking anything.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

use ts_core::{Session, Snapshot, Timer};

use crate::Config;
use crate::commands::util::{format_hours, format_seconds, load_session};

/// Everything the live view shows, computed at one instant.
#[derive(Debug)]
pub struct StatusData {
    pub timer: TimerStatus,
    pub totals: Snapshot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerStatus {
    Idle,
    Running {
        client: String,
        since: DateTime<Utc>,
        split_seconds: i64,
    },
}

impl StatusData {
    pub fn from_session(session: &Session, now: DateTime<Utc>) -> Self {
        let timer = match session.timer() {
            Timer::Idle => TimerStatus::Idle,
            Timer::Running { client, since } => TimerStatus::Running {
                client: client.to_string(),
                since: *since,
                split_seconds: session.split(now).unwrap_or(0),
            },
        };
        Self {
            timer,
            totals: session.live_snapshot(now),
        }
    }
}

/// Formats the live view for a terminal.
pub fn format_status(data: &StatusData) -> String {
    let mut output = String::new();

    match &data.timer {
        TimerStatus::Idle => writeln!(output, "Timer: idle").unwrap(),
        TimerStatus::Running {
            client,
            split_seconds,
            ..
        } => writeln!(
            output,
            "Timer: running for {client} ({})",
            format_seconds(*split_seconds)
        )
        .unwrap(),
    }

    if data.totals.is_empty() {
        writeln!(output, "No hours logged.").unwrap();
        return output;
    }

    let width = data
        .totals
        .iter()
        .map(|(client, _)| client.as_str().len())
        .chain(std::iter::once("Total".len()))
        .max()
        .unwrap_or_default();
    for (client, hours) in data.totals.iter() {
        writeln!(output, "{:<width$}  {}", client.as_str(), format_hours(hours)).unwrap();
    }
    writeln!(output, "{:<width$}  {}", "Total", format_hours(data.totals.total())).unwrap();

    output
}

// ========== JSON Output ==========

#[derive(Debug, Serialize)]
pub struct JsonStatus<'a> {
    pub timer: JsonTimer<'a>,
    pub totals: &'a Snapshot,
    pub total: f64,
}

#[derive(Debug, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum JsonTimer<'a> {
    Idle,
    Running {
        client: &'a str,
        since: String,
        split_seconds: i64,
    },
}

/// Formats the live view as JSON.
pub fn format_status_json(data: &StatusData) -> Result<String> {
    let timer = match &data.timer {
        TimerStatus::Idle => JsonTimer::Idle,
        TimerStatus::Running {
            client,
            since,
            split_seconds,
        } => JsonTimer::Running {
            client,
            since: since.to_rfc3339(),
            split_seconds: *split_seconds,
        },
    };
    let status = JsonStatus {
        timer,
        totals: &data.totals,
        total: data.totals.total(),
    };
    Ok(serde_json::to_string_pretty(&status)?)
}

// ========== Public Interface ==========

pub fn run<W: Write>(writer: &mut W, json: bool, now: DateTime<Utc>, config: &Config) -> Result<()> {
    let session = load_session(config)?;
    let data = StatusData::from_session(&session, now);

    if json {
        writeln!(writer, "{}", format_status_json(&data)?)?;
    } else {
        write!(writer, "{}", format_status(&data))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{Duration, TimeZone};
    use insta::assert_snapshot;
    use serde_json::Value;

    use crate::commands::util::test_config;
    use crate::commands::{add, start};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 7, 9, 0, 0).unwrap()
    }

    #[test]
    fn status_of_fresh_state() {
        let temp = tempfile::tempdir().unwrap();
        let config = test_config(temp.path());
        let mut output = Vec::new();

        run(&mut output, false, t0(), &config).unwrap();

        assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        Timer: idle
        No hours logged.
        ");
    }

    #[test]
    fn status_includes_running_split() {
        let temp = tempfile::tempdir().unwrap();
        let config = test_config(temp.path());
        add::run(&mut Vec::new(), "Training", "0.3", &config).unwrap();
        start::run(&mut Vec::new(), "Admin", t0(), &config).unwrap();

        let mut output = Vec::new();
        run(&mut output, false, t0() + Duration::minutes(45), &config).unwrap();

        assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        Timer: running for Admin (0:45:00)
        Admin     0.80
        Training  0.30
        Total     1.10
        ");
    }

    #[test]
    fn status_does_not_book_the_split() {
        let temp = tempfile::tempdir().unwrap();
        let config = test_config(temp.path());
        start::run(&mut Vec::new(), "Admin", t0(), &config).unwrap();

        run(&mut Vec::new(), false, t0() + Duration::hours(2), &config).unwrap();

        let state = ts_store::StateDir::open(temp.path()).unwrap();
        assert!(state.load_ledger().unwrap().is_empty());
        assert!(state.load_timer().unwrap().is_running());
    }

    #[test]
    fn text_view_rounds_while_json_keeps_manual_precision() {
        let temp = tempfile::tempdir().unwrap();
        let config = test_config(temp.path());
        add::run(&mut Vec::new(), "NPIC", "1.234567", &config).unwrap();

        let mut text = Vec::new();
        run(&mut text, false, t0(), &config).unwrap();
        assert_snapshot!(String::from_utf8(text).unwrap(), @r"
        Timer: idle
        NPIC   1.23
        Total  1.23
        ");

        let mut json = Vec::new();
        run(&mut json, true, t0(), &config).unwrap();
        let json: Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(json["totals"]["NPIC"], 1.234_567);
        assert_eq!(json["total"], 1.234_567);
    }

    #[test]
    fn status_json_reports_timer_and_totals() {
        let temp = tempfile::tempdir().unwrap();
        let config = test_config(temp.path());
        add::run(&mut Vec::new(), "AOL", "2.5", &config).unwrap();
        start::run(&mut Vec::new(), "AOL", t0(), &config).unwrap();

        let mut output = Vec::new();
        run(&mut output, true, t0() + Duration::minutes(30), &config).unwrap();

        let json: Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(json["timer"]["state"], "running");
        assert_eq!(json["timer"]["client"], "AOL");
        assert_eq!(json["timer"]["split_seconds"], 1800);
        assert_eq!(json["totals"]["AOL"], 3.0);
        assert_eq!(json["total"], 3.0);
    }
}
