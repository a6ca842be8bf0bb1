//! Mechanical (`.txt`) export reader.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ecr_core::MechReading;

use crate::error::{ReadError, Result};

/// First field of the header row that precedes the data section.
const DATA_SENTINEL: &str = "Depth (nm)";

/// Read the mechanical stream: tab-separated rows of
/// `(displacement_nm, force_uN, time_s)` following the header sentinel.
///
/// Rows before the sentinel are instrument preamble and are ignored.
/// Short or non-numeric data rows (truncated exports) are skipped with
/// a log line; they never abort the read.
pub fn read_mechanical(path: &Path) -> Result<Vec<MechReading>> {
    let file = File::open(path).map_err(|source| ReadError::Open {
        path: path.display().to_string(),
        source,
    })?;
    let reader = BufReader::new(file);

    let mut readings = Vec::new();
    let mut in_data = false;
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if !in_data {
            if line.split('\t').next() == Some(DATA_SENTINEL) {
                in_data = true;
            }
            continue;
        }
        match parse_row(&line) {
            Some(r) => readings.push(r),
            None => {
                if !line.trim().is_empty() {
                    tracing::debug!(line = lineno + 1, "skipping malformed mechanical row");
                }
            }
        }
    }

    if !in_data {
        return Err(ReadError::MissingHeader {
            sentinel: DATA_SENTINEL,
        });
    }
    tracing::debug!(path = %path.display(), rows = readings.len(), "mechanical stream read");
    Ok(readings)
}

fn parse_row(line: &str) -> Option<MechReading> {
    let mut parts = line.split('\t');
    let displacement = parts.next()?.trim().parse().ok()?;
    let force = parts.next()?.trim().parse().ok()?;
    let time = parts.next()?.trim().parse().ok()?;
    Some(MechReading {
        time,
        force,
        displacement,
    })
}
