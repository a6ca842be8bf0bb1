//! Nearest-neighbor time alignment of the electrical stream onto the
//! mechanical sample sequence.
//!
//! Both streams are time-ordered, so a single forward cursor suffices:
//! for each electrical reading the scan resumes where the previous one
//! matched, and the cursor never retreats. Each mechanical sample
//! therefore receives at most one match.

use crate::config::AnalysisCfg;
use crate::sample::{EcrReading, Sample, SweepDecl};

/// Merge electrical readings into `samples` in place.
///
/// Returns the `(current, voltage)` pairs recorded inside the declared
/// sweep window (empty when no sweep was declared). Sweep recording
/// toggles on the declared boundary timestamps whether or not the
/// reading found a mechanical match; zero-current readings are never
/// recorded since they carry no usable offset information.
pub(crate) fn merge_electrical(
    samples: &mut [Sample],
    readings: &[EcrReading],
    sweep: Option<&SweepDecl>,
    cfg: &AnalysisCfg,
) -> Vec<(f64, f64)> {
    let mut cursor = 0usize;
    let mut recording = false;
    let mut pairs: Vec<(f64, f64)> = Vec::new();
    let mut matched = 0usize;

    for r in readings {
        if let Some(decl) = sweep {
            if r.time == decl.start_time {
                tracing::debug!(time = r.time, "sweep recording started");
                recording = true;
            }
            if recording && r.time > decl.end_time {
                tracing::debug!(time = r.time, "sweep recording stopped");
                recording = false;
            }
        }
        if recording && r.current != 0.0 {
            pairs.push((r.current, r.voltage));
        }

        let Some(idx) = best_match(samples, cursor, r.time, cfg.match_tolerance_s) else {
            // No mechanical sample within tolerance; reading is dropped.
            continue;
        };
        debug_assert!(idx >= cursor, "match cursor must never retreat");
        // Resume past the matched sample: each mechanical sample
        // receives at most one match.
        cursor = idx + 1;
        matched += 1;

        let sample = &mut samples[idx];
        sample.current = Some(r.current);
        sample.voltage = Some(r.voltage);
        sample.resistance = resistance_in_band(r.voltage, r.current, cfg.resistance_max_ohm);
    }

    tracing::debug!(
        readings = readings.len(),
        matched,
        sweep_points = pairs.len(),
        "electrical merge complete"
    );
    pairs
}

/// Index of the in-tolerance mechanical sample closest in time to `te`,
/// scanning forward from `cursor`.
///
/// Loop invariants: mechanical times are non-decreasing, so once the
/// time difference grows past a recorded best, no later sample can beat
/// it; and once a sample's time exceeds `te + tolerance` with no best
/// yet, none ever will. Either condition terminates the scan.
fn best_match(samples: &[Sample], cursor: usize, te: f64, tolerance: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, s) in samples.iter().enumerate().skip(cursor) {
        let diff = (s.time - te).abs();
        match best {
            Some((_, best_diff)) => {
                if diff > best_diff {
                    break; // past the closest point
                }
                if diff < best_diff {
                    best = Some((i, diff));
                }
            }
            None => {
                if diff < tolerance {
                    best = Some((i, diff));
                } else if s.time > te + tolerance {
                    break; // window already behind us
                }
            }
        }
    }
    best.map(|(i, _)| i)
}

/// `voltage / current` when defined and inside the plausibility band.
///
/// Zero current is an expected degenerate case (resistance undefined),
/// and out-of-band values are sensor noise; neither is ever stored.
pub(crate) fn resistance_in_band(voltage: f64, current: f64, max_ohm: f64) -> Option<f64> {
    if current == 0.0 {
        return None;
    }
    let r = voltage / current;
    (r > 0.0 && r < max_ohm).then_some(r)
}
