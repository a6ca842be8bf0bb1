//! `From` implementations bridging `ecr_config` types to `ecr_core` types.

use crate::config::AnalysisCfg;

impl From<&ecr_config::Analysis> for AnalysisCfg {
    fn from(c: &ecr_config::Analysis) -> Self {
        Self {
            match_tolerance_s: c.match_tolerance_s,
            resistance_max_ohm: c.resistance_max_ohm,
            strain_neighbor_tolerance: c.strain_neighbor_tolerance,
        }
    }
}
