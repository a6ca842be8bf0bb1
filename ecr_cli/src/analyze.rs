//! Per-file pipeline: read both streams, build the dataset, run the
//! configured metric extractions.

use std::path::Path;

use ecr_core::{AnalysisCfg, Measurement};
use ecr_io::{electrical_path, read_electrical, read_mechanical};
use eyre::WrapErr;

/// Build and analyze one dataset.
///
/// An unreadable mechanical file is fatal for the dataset. A missing or
/// unreadable ECR file degrades to a mechanical-only dataset. Metric
/// not-found/not-applicable outcomes are logged inside the core; the
/// zero-peak-displacement case is surfaced as an error log here but
/// does not abort the remaining extractions.
pub fn analyze_file(
    path: &Path,
    name: String,
    particle_size_um: f64,
    cfg: AnalysisCfg,
    thresholds_ohm: &[f64],
    strains: &[f64],
) -> eyre::Result<Measurement> {
    let mech = read_mechanical(path)
        .wrap_err_with(|| format!("reading mechanical export {}", path.display()))?;

    let ecr = match read_electrical(&electrical_path(path)) {
        Ok(stream) => stream,
        Err(e) => {
            tracing::warn!(error = %e, "unable to read ECR file; mechanical-only dataset");
            None
        }
    };

    let mut m = Measurement::build(name, &mech, ecr, particle_size_um, cfg);

    m.min_resistance();
    if let Err(e) = m.recovery_ratio() {
        // Data-quality problem, distinct from an expected not-found.
        tracing::error!(dataset = %m.name(), error = %e, "recovery ratio unusable");
    }
    for &t in thresholds_ohm {
        m.threshold_strain(t);
    }
    for &s in strains {
        m.resistance_at_strain(s);
    }

    Ok(m)
}
