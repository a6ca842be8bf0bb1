//! Core analysis knobs.
//!
//! These are plain structs with defaults; the TOML-facing schema lives
//! in `ecr_config` and is bridged here via `conversions`.

use crate::{MATCH_TOLERANCE_S, RESISTANCE_MAX_OHM, STRAIN_NEIGHBOR_TOLERANCE};

/// Tunables shared by the merge, sweep-correction, and metric passes.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisCfg {
    /// Max |t_mech - t_ecr| (s) for an electrical reading to match.
    pub match_tolerance_s: f64,
    /// Exclusive upper band limit for stored resistances (ohm).
    pub resistance_max_ohm: f64,
    /// Max strain distance for interpolation neighbors.
    pub strain_neighbor_tolerance: f64,
}

impl Default for AnalysisCfg {
    fn default() -> Self {
        Self {
            match_tolerance_s: MATCH_TOLERANCE_S,
            resistance_max_ohm: RESISTANCE_MAX_OHM,
            strain_neighbor_tolerance: STRAIN_NEIGHBOR_TOLERANCE,
        }
    }
}
