//! Save command for exporting the ledger to a CSV timesheet.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;

use ts_store::{WriteMode, day_label, write_timesheet};

use crate::Config;
use crate::commands::util::with_session_checkpointed;

/// Writes the ledger to `path` dated `today`, then clears it.
///
/// Refused while the timer is running, so the interval being timed is never
/// silently dropped.
pub fn run<W: Write>(
    writer: &mut W,
    path: &Path,
    new: bool,
    today: NaiveDate,
    config: &Config,
) -> Result<()> {
    let mode = if new {
        WriteMode::Overwrite
    } else {
        WriteMode::Append
    };
    let day = day_label(today);

    // Past the CSV rename the rows are in the sheet; saving again would
    // book them twice.
    let written = with_session_checkpointed(
        config,
        |session| {
            Ok(session.save(|ledger| write_timesheet(path, &day, ledger, mode).map(|_| ()))?)
        },
        || {
            format!(
                "rows were written to {} but the ledger could not be cleared; \
                 run `ts discard --yes` instead of saving again",
                path.display()
            )
        },
    )?;

    writeln!(writer, "Saved {written} entries to {}.", path.display())?;
    Ok(())
}
