//! Calibration sweep fitting and offset removal.
//!
//! During a declared sweep the instrument ramps the current and records
//! the voltage; an ordinary least-squares line through the recorded
//! `(current, voltage)` pairs yields an intercept interpreted as a
//! constant voltage offset (contact resistance or amplifier bias) to be
//! removed from every sample.

use crate::config::AnalysisCfg;
use crate::error::SweepError;
use crate::merge::resistance_in_band;
use crate::sample::Sample;

/// Least-squares line `voltage = slope * current + intercept` over the
/// recorded sweep pairs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepFit {
    pub slope: f64,
    pub intercept: f64,
}

/// Fit the sweep line with mean-centered OLS in f64.
///
/// Fewer than two points leaves the line underdetermined; that is a
/// reportable condition, not a dataset failure.
pub fn fit_sweep(pairs: &[(f64, f64)]) -> Result<SweepFit, SweepError> {
    if pairs.len() < 2 {
        return Err(SweepError::Underdetermined {
            points: pairs.len(),
        });
    }

    let n = pairs.len() as f64;
    let mean_i: f64 = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_v: f64 = pairs.iter().map(|p| p.1).sum::<f64>() / n;
    let mut sxx = 0.0f64;
    let mut sxy = 0.0f64;
    for (i, v) in pairs {
        let x = i - mean_i;
        let y = v - mean_v;
        sxx += x * x;
        sxy += x * y;
    }
    if !sxx.is_finite() || sxx == 0.0 {
        return Err(SweepError::DegenerateCurrent);
    }
    let slope = sxy / sxx;
    if !slope.is_finite() {
        return Err(SweepError::DegenerateCurrent);
    }
    let intercept = mean_v - slope * mean_i;
    Ok(SweepFit { slope, intercept })
}

/// Re-walk the merged sequence subtracting the fitted voltage offset.
///
/// Every sample with a present voltage gets its voltage overwritten and
/// its resistance recomputed under the usual band rules; a corrected
/// value that falls outside the band is cleared, never kept stale. A
/// zero (or absent) current skips recomputation for that sample only,
/// leaving any prior resistance as-is.
pub(crate) fn apply_offset(samples: &mut [Sample], intercept: f64, cfg: &AnalysisCfg) {
    for sample in samples.iter_mut() {
        let Some(voltage) = sample.voltage else {
            continue;
        };
        let corrected = voltage - intercept;
        sample.voltage = Some(corrected);
        if let Some(current) = sample.current
            && current != 0.0
        {
            sample.resistance = resistance_in_band(corrected, current, cfg.resistance_max_ohm);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_recovers_exact_line() {
        // v = 2*i + 0.5
        let pairs = vec![(0.1, 0.7), (0.2, 0.9), (0.3, 1.1)];
        let fit = fit_sweep(&pairs).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-12);
        assert!((fit.intercept - 0.5).abs() < 1e-12);
    }

    #[test]
    fn fit_underdetermined_below_two_points() {
        assert_eq!(
            fit_sweep(&[(0.1, 0.2)]),
            Err(SweepError::Underdetermined { points: 1 })
        );
        assert_eq!(fit_sweep(&[]), Err(SweepError::Underdetermined { points: 0 }));
    }

    #[test]
    fn fit_degenerate_when_current_constant() {
        let pairs = vec![(0.1, 0.2), (0.1, 0.4)];
        assert_eq!(fit_sweep(&pairs), Err(SweepError::DegenerateCurrent));
    }
}
