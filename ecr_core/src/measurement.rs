//! Dataset lifecycle: construction merges the two streams and applies
//! the sweep correction exactly once; metric extraction runs afterward,
//! appending to the statistics mapping; the finished dataset is then
//! read-only for the report sink.

use crate::config::AnalysisCfg;
use crate::merge::merge_electrical;
use crate::sample::{EcrReading, MechReading, ParticleGeometry, Sample, Statistics, SweepDecl};
use crate::sweep::{SweepFit, apply_offset, fit_sweep};

/// Parsed electrical stream: the optional sweep declaration from the
/// file metadata plus the data rows in arrival order.
#[derive(Debug, Clone, Default)]
pub struct EcrStream {
    pub sweep: Option<SweepDecl>,
    pub readings: Vec<EcrReading>,
}

/// One coupled ECR/mechanical dataset.
pub struct Measurement {
    /// Dataset label for reports (typically the source file stem).
    name: String,
    samples: Vec<Sample>,
    particle_size_um: f64,
    cfg: AnalysisCfg,
    statistics: Statistics,
    sweep_decl: Option<SweepDecl>,
    sweep_pairs: Vec<(f64, f64)>,
    sweep_fit: Option<SweepFit>,
}

impl Measurement {
    /// Build a dataset from the two raw streams.
    ///
    /// An absent electrical stream yields a mechanical-only dataset. A
    /// declared sweep with too few recorded points downgrades to a
    /// warning and skips recalibration; it never fails construction.
    /// Sweep correction runs exactly once, here.
    pub fn build(
        name: impl Into<String>,
        mech: &[MechReading],
        ecr: Option<EcrStream>,
        particle_size_um: f64,
        cfg: AnalysisCfg,
    ) -> Self {
        let name = name.into();
        let geometry = ParticleGeometry::new(particle_size_um);
        let mut samples: Vec<Sample> = mech
            .iter()
            .map(|r| Sample::from_mech(r, geometry.as_ref()))
            .collect();

        let EcrStream { sweep, readings } = ecr.unwrap_or_default();
        let pairs = merge_electrical(&mut samples, &readings, sweep.as_ref(), &cfg);

        let mut fit = None;
        if sweep.is_some() {
            match fit_sweep(&pairs) {
                Ok(f) => {
                    tracing::info!(
                        dataset = %name,
                        slope = f.slope,
                        intercept = f.intercept,
                        points = pairs.len(),
                        "sweep fitted; removing voltage offset"
                    );
                    apply_offset(&mut samples, f.intercept, &cfg);
                    fit = Some(f);
                }
                Err(e) => {
                    tracing::warn!(dataset = %name, error = %e, "skipping sweep recalibration");
                }
            }
        }

        Self {
            name,
            samples,
            particle_size_um,
            cfg,
            statistics: Statistics::default(),
            sweep_decl: sweep,
            sweep_pairs: pairs,
            sweep_fit: fit,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Particle size in micrometres; 0 means stress/strain undefined.
    pub fn particle_size_um(&self) -> f64 {
        self.particle_size_um
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Whether the electrical metadata declared a real sweep (start and
    /// end values differing). The fit may still be absent when too few
    /// points were recorded.
    pub fn sweep_found(&self) -> bool {
        self.sweep_decl.is_some()
    }

    pub fn sweep_fit(&self) -> Option<SweepFit> {
        self.sweep_fit
    }

    /// Raw `(current, voltage)` pairs recorded inside the sweep window.
    pub fn sweep_pairs(&self) -> &[(f64, f64)] {
        &self.sweep_pairs
    }

    /// Index of the sample with the largest force, first occurrence on
    /// ties. `None` for an empty dataset.
    pub fn max_force_index(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (idx, s) in self.samples.iter().enumerate() {
            match best {
                Some(b) if s.force <= self.samples[b].force => {}
                _ => best = Some(idx),
            }
        }
        best
    }

    pub(crate) fn cfg(&self) -> &AnalysisCfg {
        &self.cfg
    }

    pub(crate) fn statistics_mut(&mut self) -> &mut Statistics {
        &mut self.statistics
    }

    /// Drop every sample without a stored resistance, preserving order.
    ///
    /// Indices computed before this call are invalidated.
    pub fn clean(&mut self) {
        let before = self.samples.len();
        self.samples.retain(|s| s.resistance.is_some());
        tracing::debug!(
            dataset = %self.name,
            removed = before - self.samples.len(),
            "dropped samples without resistance"
        );
    }
}
