//! Stop command for logging the running interval.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::Config;
use crate::commands::util::{format_seconds, with_session};

pub fn run<W: Write>(writer: &mut W, now: DateTime<Utc>, config: &Config) -> Result<()> {
    let logged = with_session(config, |session| Ok(session.stop(now)?))?;
    writeln!(
        writer,
        "Logged {:.1} h to {} ({} elapsed).",
        logged.hours,
        logged.client,
        format_seconds(logged.seconds)
    )?;
    Ok(())
}
