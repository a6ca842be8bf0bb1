//! Electrical (`.ecr`) export reader.
//!
//! The file opens with `key: value` metadata lines describing an
//! optional calibration sweep, then a sentinel header row, then
//! tab-separated data rows of `(voltage_V, current_A, time_s)`.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use ecr_core::{EcrReading, EcrStream, SweepDecl};

use crate::error::{ReadError, Result};

/// First non-empty field of the header row preceding the data section.
const DATA_SENTINEL: &str = "Voltage(V)";

const KEY_SWEEP_START_TIME: &str = "Sweep 0 Start Time";
const KEY_SWEEP_END_TIME: &str = "Sweep 0 End Time";
const KEY_SWEEP_START_VALUE: &str = "Sweep 0 Start Value";
const KEY_SWEEP_END_VALUE: &str = "Sweep 0 End Value";

/// The `.ecr` file that belongs to a mechanical export.
pub fn electrical_path(mech_path: &Path) -> PathBuf {
    mech_path.with_extension("ecr")
}

/// Read the electrical stream, or `None` when the file does not exist
/// (a mechanical-only run, not a failure).
///
/// The sweep declaration is only populated when the metadata declares
/// differing start and end values for the sweep channel; an equal pair
/// means no sweep was driven.
pub fn read_electrical(path: &Path) -> Result<Option<EcrStream>> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "no ECR file; mechanical-only dataset");
            return Ok(None);
        }
        Err(source) => {
            return Err(ReadError::Open {
                path: path.display().to_string(),
                source,
            });
        }
    };
    let reader = BufReader::new(file);

    let mut meta = SweepMeta::default();
    let mut readings = Vec::new();
    let mut in_data = false;
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let fields: Vec<&str> = line
            .split('\t')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .collect();
        if !in_data {
            if fields.first() == Some(&DATA_SENTINEL) {
                in_data = true;
            } else {
                meta.absorb(&line);
            }
            continue;
        }
        match parse_row(&fields) {
            Some(r) => readings.push(r),
            None => {
                if !fields.is_empty() {
                    tracing::debug!(line = lineno + 1, "skipping malformed ECR row");
                }
            }
        }
    }

    if !in_data {
        return Err(ReadError::MissingHeader {
            sentinel: DATA_SENTINEL,
        });
    }
    let sweep = meta.into_decl();
    if let Some(decl) = &sweep {
        tracing::info!(
            path = %path.display(),
            start = decl.start_time,
            end = decl.end_time,
            "sweep declared"
        );
    }
    tracing::debug!(path = %path.display(), rows = readings.len(), "ECR stream read");
    Ok(Some(EcrStream { sweep, readings }))
}

/// Data row layout: voltage, current, time.
fn parse_row(fields: &[&str]) -> Option<EcrReading> {
    if fields.len() < 3 {
        return None;
    }
    let voltage = fields[0].parse().ok()?;
    let current = fields[1].parse().ok()?;
    let time = fields[2].parse().ok()?;
    Some(EcrReading {
        time,
        current,
        voltage,
    })
}

/// Sweep metadata accumulated from `key: value` preamble lines.
#[derive(Debug, Default)]
struct SweepMeta {
    start_time: Option<f64>,
    end_time: Option<f64>,
    start_value: Option<f64>,
    end_value: Option<f64>,
}

impl SweepMeta {
    fn absorb(&mut self, line: &str) {
        let Some((key, value)) = line.split_once(':') else {
            return; // not a metadata line
        };
        let Ok(value) = value.trim().parse::<f64>() else {
            return;
        };
        match key.trim() {
            KEY_SWEEP_START_TIME => self.start_time = Some(value),
            KEY_SWEEP_END_TIME => self.end_time = Some(value),
            KEY_SWEEP_START_VALUE => self.start_value = Some(value),
            KEY_SWEEP_END_VALUE => self.end_value = Some(value),
            _ => {}
        }
    }

    /// A sweep exists only when the declared start and end values
    /// differ and both window times are present.
    fn into_decl(self) -> Option<SweepDecl> {
        let (start_value, end_value) = (self.start_value?, self.end_value?);
        if start_value == end_value {
            return None;
        }
        Some(SweepDecl {
            start_time: self.start_time?,
            end_time: self.end_time?,
        })
    }
}
