//! Start/stop stopwatch with an explicit idle/running state.
//!
//! The timer never reads the wall clock itself: every transition takes the
//! instant it happens at, so callers (and tests) control time.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::client::Client;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Which state an operation required versus what it found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Idle,
    Running,
}

impl fmt::Display for TimerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Running => write!(f, "running"),
        }
    }
}

/// Rejected timer transition.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("timer is {found}, expected {expected}")]
pub struct TimerStateError {
    pub expected: TimerPhase,
    pub found: TimerPhase,
}

/// The single process-wide stopwatch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum Timer {
    #[default]
    Idle,
    Running {
        /// Client the running interval is booked against.
        client: Client,
        since: DateTime<Utc>,
    },
}

/// A completed interval, produced by [`Timer::stop`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Elapsed {
    pub client: Client,
    pub started: DateTime<Utc>,
    pub stopped: DateTime<Utc>,
    /// Whole seconds between start and stop, never negative.
    pub seconds: i64,
}

impl Elapsed {
    /// Elapsed time in hours, rounded to a tenth.
    pub fn hours(&self) -> f64 {
        hours_from_seconds(self.seconds)
    }
}

impl Timer {
    pub const fn phase(&self) -> TimerPhase {
        match self {
            Self::Idle => TimerPhase::Idle,
            Self::Running { .. } => TimerPhase::Running,
        }
    }

    pub const fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }

    /// Client of the running interval, if any.
    pub const fn active_client(&self) -> Option<&Client> {
        match self {
            Self::Idle => None,
            Self::Running { client, .. } => Some(client),
        }
    }

    /// Starts timing `client` at `now`.
    ///
    /// Starting an already running timer is rejected and keeps the original
    /// start instant.
    pub fn start(&mut self, client: Client, now: DateTime<Utc>) -> Result<(), TimerStateError> {
        if self.is_running() {
            return Err(TimerStateError {
                expected: TimerPhase::Idle,
                found: TimerPhase::Running,
            });
        }
        *self = Self::Running { client, since: now };
        Ok(())
    }

    /// Stops the timer at `now` and returns the completed interval.
    pub fn stop(&mut self, now: DateTime<Utc>) -> Result<Elapsed, TimerStateError> {
        match std::mem::take(self) {
            Self::Running { client, since } => Ok(Elapsed {
                client,
                started: since,
                stopped: now,
                seconds: whole_seconds(since, now),
            }),
            Self::Idle => Err(TimerStateError {
                expected: TimerPhase::Running,
                found: TimerPhase::Idle,
            }),
        }
    }

    /// Seconds elapsed so far, without stopping.
    pub fn split(&self, now: DateTime<Utc>) -> Result<i64, TimerStateError> {
        match self {
            Self::Running { since, .. } => Ok(whole_seconds(*since, now)),
            Self::Idle => Err(TimerStateError {
                expected: TimerPhase::Running,
                found: TimerPhase::Idle,
            }),
        }
    }
}

/// Truncates to whole seconds; a clock that went backwards counts as zero.
fn whole_seconds(since: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - since).num_seconds().max(0)
}

/// Converts seconds to hours rounded to one decimal place.
///
/// Rounds the exact value of the `f64` quotient, ties to even: 900 seconds
/// is exactly 0.25 hours and becomes 0.2, while 540 seconds is stored just
/// below 0.15 and becomes 0.1.
#[allow(
    clippy::cast_precision_loss,
    reason = "timed intervals are far below 2^52 seconds"
)]
pub fn hours_from_seconds(seconds: i64) -> f64 {
    let hours = seconds as f64 / SECONDS_PER_HOUR;
    // Precision formatting rounds the exact decimal expansion, unlike
    // scaling by ten and calling `round`.
    format!("{hours:.1}").parse().unwrap_or(hours)
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 7, 9, 0, 0).unwrap()
    }

    fn admin() -> Client {
        Client::new("Admin").unwrap()
    }

    #[test]
    fn start_then_stop_reports_whole_seconds() {
        let mut timer = Timer::default();
        timer.start(admin(), t0()).unwrap();
        assert!(timer.is_running());

        let elapsed = timer
            .stop(t0() + Duration::milliseconds(5_400_900))
            .unwrap();
        assert_eq!(elapsed.seconds, 5400);
        assert_eq!(elapsed.client, admin());
        assert_eq!(elapsed.started, t0());
        assert_eq!(timer, Timer::Idle);
    }

    #[test]
    fn double_start_is_rejected_and_keeps_start() {
        let mut timer = Timer::default();
        timer.start(admin(), t0()).unwrap();

        let err = timer
            .start(Client::new("AOL").unwrap(), t0() + Duration::minutes(30))
            .unwrap_err();
        assert_eq!(err.expected, TimerPhase::Idle);
        assert_eq!(err.found, TimerPhase::Running);

        let elapsed = timer.stop(t0() + Duration::hours(1)).unwrap();
        assert_eq!(elapsed.client, admin());
        assert_eq!(elapsed.seconds, 3600);
    }

    #[test]
    fn stop_and_split_while_idle_are_rejected() {
        let mut timer = Timer::default();
        let expected = TimerStateError {
            expected: TimerPhase::Running,
            found: TimerPhase::Idle,
        };
        assert_eq!(timer.stop(t0()), Err(expected.clone()));
        assert_eq!(timer.split(t0()), Err(expected));
    }

    #[test]
    fn split_does_not_change_state() {
        let mut timer = Timer::default();
        timer.start(admin(), t0()).unwrap();
        assert_eq!(timer.split(t0() + Duration::seconds(90)), Ok(90));
        assert!(timer.is_running());
        assert_eq!(timer.active_client(), Some(&admin()));
    }

    #[test]
    fn clock_going_backwards_counts_as_zero() {
        let mut timer = Timer::default();
        timer.start(admin(), t0()).unwrap();
        let elapsed = timer.stop(t0() - Duration::seconds(10)).unwrap();
        assert_eq!(elapsed.seconds, 0);
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "rounded values are exact tenths")]
    fn hours_round_to_one_tenth() {
        assert_eq!(hours_from_seconds(3600), 1.0);
        assert_eq!(hours_from_seconds(1800), 0.5);
        assert_eq!(hours_from_seconds(5400), 1.5);
        assert_eq!(hours_from_seconds(0), 0.0);
        assert_eq!(hours_from_seconds(179), 0.0);
        assert_eq!(hours_from_seconds(180), 0.1);
        assert_eq!(hours_from_seconds(539), 0.1);
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "rounded values are exact tenths")]
    fn hours_ties_round_to_even_on_the_stored_quotient() {
        // Exact ties go to the even tenth.
        assert_eq!(hours_from_seconds(900), 0.2);
        assert_eq!(hours_from_seconds(4500), 1.2);
        assert_eq!(hours_from_seconds(2700), 0.8);
        // 0.15 and 0.85 are stored slightly low, so they round down.
        assert_eq!(hours_from_seconds(540), 0.1);
        assert_eq!(hours_from_seconds(3060), 0.8);
        // 0.05 is stored slightly high.
        assert_eq!(hours_from_seconds(180), 0.1);
    }

    #[test]
    fn timer_state_serde_roundtrip() {
        let idle = serde_json::to_string(&Timer::Idle).unwrap();
        assert_eq!(idle, r#"{"state":"idle"}"#);

        let running = Timer::Running {
            client: admin(),
            since: t0(),
        };
        let json = serde_json::to_string(&running).unwrap();
        assert_eq!(
            json,
            r#"{"state":"running","client":"Admin","since":"2025-06-07T09:00:00Z"}"#
        );
        let parsed: Timer = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, running);
    }
}
