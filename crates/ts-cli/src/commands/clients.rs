//! Clients command for listing the configured roster.

use std::io::Write;

use anyhow::{Context, Result};

use crate::Config;

pub fn run<W: Write>(writer: &mut W, config: &Config) -> Result<()> {
    let roster = config.roster().context("invalid client configuration")?;
    for client in roster.sorted() {
        writeln!(writer, "{client}")?;
    }
    Ok(())
}
