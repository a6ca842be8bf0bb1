//! Derived-metric extraction over a merged dataset.
//!
//! Each extractor appends a named scalar to the dataset's statistics
//! mapping on success and leaves it untouched on any other outcome.
//! Expected absences (threshold never crossed, strain never reached,
//! no usable neighbors) are `MetricOutcome` variants, not errors; only
//! data-quality problems (zero peak displacement) are fatal.

use crate::error::MetricError;
use crate::measurement::Measurement;

/// Why a metric produced no statistic, without being an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No sample's resistance ever dropped below the threshold.
    ThresholdNeverCrossed,
    /// Strain never exceeded the requested target.
    StrainNeverReached,
    /// A neighbor search ran off an end of the sequence.
    EndOfDataset,
    /// The nearest resistance points are too far in strain to
    /// interpolate meaningfully.
    NeighborsTooFar,
    /// The dataset holds no resistance values at all.
    NoResistanceData,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            Self::ThresholdNeverCrossed => "resistance never dropped below the threshold",
            Self::StrainNeverReached => "strain never reached the target",
            Self::EndOfDataset => "end of dataset reached while searching for neighbors",
            Self::NeighborsTooFar => "no resistance points close enough in strain",
            Self::NoResistanceData => "no resistance data in the dataset",
        };
        f.write_str(msg)
    }
}

/// Result of one extractor call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricOutcome {
    /// Value computed and appended to the statistics mapping.
    Recorded(f64),
    /// Strain is undefined for this dataset (no particle size supplied).
    NotApplicable,
    /// Expected absence; nothing recorded.
    NotFound(SkipReason),
}

impl Measurement {
    fn strain_defined(&self) -> bool {
        self.particle_size_um() > 0.0
    }

    /// Strain of the first sample whose resistance is present and below
    /// `threshold_ohm`. Appends `"Strain under {threshold} Ohm threshold"`.
    pub fn threshold_strain(&mut self, threshold_ohm: f64) -> MetricOutcome {
        if !self.strain_defined() {
            tracing::info!(
                dataset = %self.name(),
                "threshold strain not applicable: strain undefined without a particle size"
            );
            return MetricOutcome::NotApplicable;
        }
        let hit = self.samples().iter().find_map(|s| match (s.resistance, s.strain) {
            (Some(r), Some(strain)) if r < threshold_ohm => Some(strain),
            _ => None,
        });
        match hit {
            Some(strain) => {
                self.statistics_mut()
                    .insert(format!("Strain under {threshold_ohm} Ohm threshold"), strain);
                MetricOutcome::Recorded(strain)
            }
            None => {
                tracing::info!(
                    dataset = %self.name(),
                    threshold_ohm,
                    "resistance never dropped below threshold"
                );
                MetricOutcome::NotFound(SkipReason::ThresholdNeverCrossed)
            }
        }
    }

    /// Resistance at strain `target`, linearly interpolated between the
    /// nearest valid neighbors around the first sample whose strain
    /// exceeds the target. Appends `"Resistance at {target} strain"`.
    pub fn resistance_at_strain(&mut self, target: f64) -> MetricOutcome {
        if !self.strain_defined() {
            tracing::info!(
                dataset = %self.name(),
                "resistance at strain not applicable: strain undefined without a particle size"
            );
            return MetricOutcome::NotApplicable;
        }
        let samples = self.samples();
        let Some(above) = samples
            .iter()
            .position(|s| s.strain.is_some_and(|x| x > target))
        else {
            tracing::info!(dataset = %self.name(), strain = target, "strain never reached target");
            return MetricOutcome::NotFound(SkipReason::StrainNeverReached);
        };

        // Nearest resistance point strictly before the crossing, and
        // nearest at or after it.
        let below = samples[..above].iter().rposition(|s| s.resistance.is_some());
        let after = samples[above..]
            .iter()
            .position(|s| s.resistance.is_some())
            .map(|i| above + i);
        let (Some(below), Some(after)) = (below, after) else {
            tracing::info!(
                dataset = %self.name(),
                strain = target,
                "end of dataset reached while searching for resistance neighbors"
            );
            return MetricOutcome::NotFound(SkipReason::EndOfDataset);
        };

        let (s1, r1) = strain_resistance(&samples[below]);
        let (s2, r2) = strain_resistance(&samples[after]);
        let tol = self.cfg().strain_neighbor_tolerance;
        if (s1 - target).abs() > tol || (s2 - target).abs() > tol || s1 == s2 {
            tracing::info!(
                dataset = %self.name(),
                strain = target,
                "no resistance points close enough in strain to interpolate"
            );
            return MetricOutcome::NotFound(SkipReason::NeighborsTooFar);
        }

        let slope = (r2 - r1) / (s2 - s1);
        let intercept = r1 - slope * s1;
        let value = slope * target + intercept;
        self.statistics_mut()
            .insert(format!("Resistance at {target} strain"), value);
        MetricOutcome::Recorded(value)
    }

    /// Minimum stored resistance across the dataset, appended under
    /// `"Min R"`. The running threshold starts at the plausibility band
    /// limit, so a dataset with no resistance data records nothing.
    pub fn min_resistance(&mut self) -> MetricOutcome {
        let mut min = self.cfg().resistance_max_ohm;
        let mut found = false;
        for s in self.samples() {
            if let Some(r) = s.resistance
                && r < min
            {
                min = r;
                found = true;
            }
        }
        if found {
            self.statistics_mut().insert("Min R", min);
            MetricOutcome::Recorded(min)
        } else {
            tracing::info!(dataset = %self.name(), "no resistance data; Min R not recorded");
            MetricOutcome::NotFound(SkipReason::NoResistanceData)
        }
    }

    /// Fraction of peak deformation not retained at the end of the
    /// record: `(d[max_force] - d[last]) / d[max_force]`. Appended under
    /// `"Recovery ratio"`.
    ///
    /// A zero peak displacement means the record is unusable for this
    /// metric and surfaces as a hard error, never as Inf/NaN.
    pub fn recovery_ratio(&mut self) -> Result<f64, MetricError> {
        let max_i = self.max_force_index().ok_or(MetricError::EmptyDataset)?;
        let peak = self.samples()[max_i].displacement;
        if peak == 0.0 {
            return Err(MetricError::ZeroPeakDisplacement);
        }
        // max_force_index returned Some, so the slice is non-empty.
        let last = self.samples()[self.len() - 1].displacement;
        let ratio = (peak - last) / peak;
        self.statistics_mut().insert("Recovery ratio", ratio);
        Ok(ratio)
    }
}

fn strain_resistance(s: &crate::sample::Sample) -> (f64, f64) {
    // Callers only reach here for samples with both fields present.
    (
        s.strain.unwrap_or_default(),
        s.resistance.unwrap_or_default(),
    )
}
