//! Start command for timing a client.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::Config;
use crate::commands::util::with_session;

pub fn run<W: Write>(writer: &mut W, client: &str, now: DateTime<Utc>, config: &Config) -> Result<()> {
    let client = with_session(config, |session| Ok(session.start(client, now)?))?;
    writeln!(writer, "Timer started for {client}.")?;
    Ok(())
}
