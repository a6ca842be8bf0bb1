//! Report sink: CSV tables for the merged record, sweep data, and
//! aggregated statistics, plus an optional JSON summary.
//!
//! The statistics table unions metric names across datasets in
//! first-seen order; datasets may record different metric sets, so the
//! schema is not fixed.

use std::path::Path;

use ecr_core::Measurement;
use eyre::WrapErr;

/// Column headers of the per-sample table, matching the instrument's
/// own export conventions.
const SAMPLE_HEADERS: [&str; 8] = [
    "Time [s]",
    "Depth [nm]",
    "Force [uN]",
    "Strain",
    "Stress [MPa]",
    "Current [A]",
    "Voltage [V]",
    "Resistance [Ohm]",
];

fn opt_field(v: Option<f64>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

/// Write `<name>_samples.csv`: one row per merged sample. Absent fields
/// become empty cells, never zeros.
pub fn write_samples(m: &Measurement, out_dir: &Path) -> eyre::Result<()> {
    let path = out_dir.join(format!("{}_samples.csv", m.name()));
    let mut wtr = csv::WriterBuilder::new()
        .from_path(&path)
        .wrap_err_with(|| format!("creating {}", path.display()))?;
    wtr.write_record(SAMPLE_HEADERS)?;
    for s in m.samples() {
        wtr.write_record([
            s.time.to_string(),
            s.displacement.to_string(),
            s.force.to_string(),
            opt_field(s.strain),
            opt_field(s.stress),
            opt_field(s.current),
            opt_field(s.voltage),
            opt_field(s.resistance),
        ])?;
    }
    wtr.flush()?;
    tracing::info!(path = %path.display(), rows = m.len(), "sample table written");
    Ok(())
}

/// Write `<name>_sweep.csv`: the raw recorded `(current, voltage)`
/// pairs and the fitted line, for independent charting. No-op when the
/// dataset declared no sweep.
pub fn write_sweep(m: &Measurement, out_dir: &Path) -> eyre::Result<()> {
    if !m.sweep_found() {
        return Ok(());
    }
    let path = out_dir.join(format!("{}_sweep.csv", m.name()));
    let mut wtr = csv::WriterBuilder::new()
        .from_path(&path)
        .wrap_err_with(|| format!("creating {}", path.display()))?;
    wtr.write_record(["Current [A]", "Voltage [V]", "Fitted voltage [V]"])?;
    for &(current, voltage) in m.sweep_pairs() {
        let fitted = m
            .sweep_fit()
            .map(|f| (f.slope * current + f.intercept).to_string())
            .unwrap_or_default();
        wtr.write_record([current.to_string(), voltage.to_string(), fitted])?;
    }
    wtr.flush()?;
    tracing::info!(path = %path.display(), "sweep table written");
    Ok(())
}

/// Union of statistic names across datasets, in first-seen order.
fn stat_columns(measurements: &[Measurement]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for m in measurements {
        for (name, _) in m.statistics().iter() {
            if !columns.iter().any(|c| c == name) {
                columns.push(name.to_string());
            }
        }
    }
    columns
}

/// Write `statistics.csv`: one row per dataset, one column per metric
/// name seen anywhere. Metrics a dataset did not record stay empty.
pub fn write_statistics(measurements: &[Measurement], out_dir: &Path) -> eyre::Result<()> {
    let columns = stat_columns(measurements);
    let path = out_dir.join("statistics.csv");
    let mut wtr = csv::WriterBuilder::new()
        .from_path(&path)
        .wrap_err_with(|| format!("creating {}", path.display()))?;

    let mut header = vec!["Data series".to_string()];
    header.extend(columns.iter().cloned());
    wtr.write_record(&header)?;

    for m in measurements {
        let mut row = vec![m.name().to_string()];
        for col in &columns {
            row.push(opt_field(m.statistics().get(col)));
        }
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    tracing::info!(path = %path.display(), datasets = measurements.len(), "statistics written");
    Ok(())
}

/// JSON summary of every dataset for machine consumption.
pub fn json_summary(measurements: &[Measurement]) -> serde_json::Value {
    let datasets: Vec<serde_json::Value> = measurements
        .iter()
        .map(|m| {
            let stats: serde_json::Map<String, serde_json::Value> = m
                .statistics()
                .iter()
                .map(|(name, value)| (name.to_string(), serde_json::json!(value)))
                .collect();
            serde_json::json!({
                "name": m.name(),
                "samples": m.len(),
                "particle_size_um": m.particle_size_um(),
                "max_force_index": m.max_force_index(),
                "sweep_found": m.sweep_found(),
                "sweep_fit": m.sweep_fit().map(|f| serde_json::json!({
                    "slope": f.slope,
                    "intercept": f.intercept,
                })),
                "statistics": stats,
            })
        })
        .collect();
    serde_json::json!({ "datasets": datasets })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecr_core::{AnalysisCfg, MechReading};

    fn measurement(name: &str) -> Measurement {
        let mechs = [MechReading {
            time: 0.0,
            force: 1.0,
            displacement: 2.0,
        }];
        Measurement::build(name, &mechs, None, 0.0, AnalysisCfg::default())
    }

    #[test]
    fn stat_columns_union_in_first_seen_order() {
        let mut a = measurement("a");
        let mut b = measurement("b");
        a.recovery_ratio().unwrap();
        b.min_resistance(); // not recorded: no resistance data
        b.recovery_ratio().unwrap();
        let cols = stat_columns(&[a, b]);
        assert_eq!(cols, vec!["Recovery ratio".to_string()]);
    }

    #[test]
    fn json_summary_carries_dataset_shape() {
        let m = measurement("a");
        let v = json_summary(&[m]);
        assert_eq!(v["datasets"][0]["name"], "a");
        assert_eq!(v["datasets"][0]["samples"], 1);
        assert_eq!(v["datasets"][0]["sweep_found"], false);
    }
}
