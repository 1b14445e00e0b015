//! CSV timesheet export.
//!
//! One row per ledger entry: `Day,Client,Time`. The header row is written
//! only when the target file does not exist yet, whichever [`WriteMode`] is
//! used, so appending a second day never repeats it.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use ts_core::Ledger;

use crate::{StoreError, commit, tmp_path};

/// Header row for newly created timesheets.
pub const HEADER: [&str; 3] = ["Day", "Client", "Time"];

/// Full weekday, zero-padded day, full month: `Friday 07 June`.
const DAY_FORMAT: &str = "%A %d %B";

/// How rows land in an existing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Replace any existing content.
    Overwrite,
    /// Keep existing rows and add after them.
    Append,
}

#[derive(Debug, Serialize)]
struct TimesheetRow<'a> {
    day: &'a str,
    client: &'a str,
    time: f64,
}

/// Formats the `Day` column for a date.
pub fn day_label(date: NaiveDate) -> String {
    date.format(DAY_FORMAT).to_string()
}

/// Writes every ledger entry as a row labelled `day`.
///
/// The file is replaced atomically. Returns the number of rows written,
/// not counting the header.
pub fn write_timesheet(
    path: &Path,
    day: &str,
    ledger: &Ledger,
    mode: WriteMode,
) -> Result<usize, StoreError> {
    let tmp = tmp_path(path);
    let result = write_via(&tmp, path, day, ledger, mode);
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

fn write_via(
    tmp: &Path,
    path: &Path,
    day: &str,
    ledger: &Ledger,
    mode: WriteMode,
) -> Result<usize, StoreError> {
    let existed = path.exists();
    let mut file = File::create(tmp).map_err(|e| StoreError::io(tmp, e))?;

    if existed && mode == WriteMode::Append {
        let existing = fs::read(path).map_err(|e| StoreError::io(path, e))?;
        file.write_all(&existing)
            .map_err(|e| StoreError::io(tmp, e))?;
        if !existing.is_empty() && !existing.ends_with(b"\n") {
            file.write_all(b"\n").map_err(|e| StoreError::io(tmp, e))?;
        }
    }

    let csv_err = |source: csv::Error| StoreError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    if !existed {
        writer.write_record(HEADER).map_err(csv_err)?;
    }
    let mut rows = 0;
    for (client, hours) in ledger.iter() {
        writer
            .serialize(TimesheetRow {
                day,
                client: client.as_str(),
                time: hours,
            })
            .map_err(csv_err)?;
        rows += 1;
    }
    let file = writer
        .into_inner()
        .map_err(|e| StoreError::io(tmp, e.into_error()))?;

    commit(file, tmp, path)?;
    tracing::debug!(path = %path.display(), rows, header = !existed, ?mode, "wrote timesheet");
    Ok(rows)
}
