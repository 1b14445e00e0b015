//! Add command for manual time entries.

use std::io::Write;

use anyhow::Result;

use crate::Config;
use crate::commands::util::with_session;

pub fn run<W: Write>(writer: &mut W, client: &str, hours: &str, config: &Config) -> Result<()> {
    let added = with_session(config, |session| Ok(session.manual_add(hours, client)?))?;
    writeln!(writer, "Added {added} h to {client}.")?;
    Ok(())
}
