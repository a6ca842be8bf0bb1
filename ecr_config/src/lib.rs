#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Analysis configuration for the ECR correlation tool.
//!
//! The threshold and strain lists driving metric extraction are
//! configuration, not core state: the core takes them as explicit
//! per-call parameters, and this crate is where they live between runs.
//! Deserialized from TOML and validated before use.

use serde::Deserialize;
use std::path::PathBuf;

/// Metric extraction and merge tunables.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Analysis {
    /// Resistance thresholds (ohm) under which to find the strain.
    pub thresholds_ohm: Vec<f64>,
    /// Strain targets at which to interpolate the resistance.
    pub strains: Vec<f64>,
    /// Max |t_mech - t_ecr| (s) for time correlation.
    pub match_tolerance_s: f64,
    /// Exclusive upper bound on a plausible resistance (ohm).
    pub resistance_max_ohm: f64,
    /// Max strain distance to an interpolation neighbor.
    pub strain_neighbor_tolerance: f64,
}

impl Default for Analysis {
    fn default() -> Self {
        Self {
            thresholds_ohm: vec![5.0, 10.0, 100.0],
            strains: vec![0.1, 0.15, 0.2, 0.3, 0.35, 0.4, 0.45, 0.5, 0.55, 0.6],
            match_tolerance_s: 0.02,
            resistance_max_ohm: 1000.0,
            strain_neighbor_tolerance: 0.1,
        }
    }
}

/// Report sink options.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Report {
    /// Output directory; defaults to the input file's directory.
    pub out_dir: Option<PathBuf>,
    /// Also write the per-sample table for each dataset.
    pub write_samples: bool,
}

impl Default for Report {
    fn default() -> Self {
        Self {
            out_dir: None,
            write_samples: true,
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Config {
    pub analysis: Analysis,
    pub report: Report,
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        let a = &self.analysis;
        if !a.match_tolerance_s.is_finite() || a.match_tolerance_s <= 0.0 {
            eyre::bail!("analysis.match_tolerance_s must be finite and > 0");
        }
        if !a.resistance_max_ohm.is_finite() || a.resistance_max_ohm <= 0.0 {
            eyre::bail!("analysis.resistance_max_ohm must be finite and > 0");
        }
        if !a.strain_neighbor_tolerance.is_finite() || a.strain_neighbor_tolerance <= 0.0 {
            eyre::bail!("analysis.strain_neighbor_tolerance must be finite and > 0");
        }
        for t in &self.analysis.thresholds_ohm {
            if !t.is_finite() || *t <= 0.0 {
                eyre::bail!("analysis.thresholds_ohm entries must be finite and > 0, got {t}");
            }
        }
        for s in &self.analysis.strains {
            if !s.is_finite() || *s <= 0.0 {
                eyre::bail!("analysis.strains entries must be finite and > 0, got {s}");
            }
        }
        Ok(())
    }
}
