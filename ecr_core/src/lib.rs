#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Core analysis logic for coupled ECR/nanoindentation measurements
//! (format-agnostic).
//!
//! This crate time-correlates a mechanical reading stream (time, force,
//! displacement) with an independently sampled electrical stream (time,
//! current, voltage) into one per-timestamp record, corrects the merged
//! record for a declared I-V calibration sweep, and extracts derived
//! metrics. Parsing of the raw instrument exports lives in `ecr_io`;
//! report rendering lives in the CLI.
//!
//! ## Architecture
//!
//! - **Sample store**: per-instant records with explicit present/absent
//!   electrical fields (`sample` module)
//! - **Merge**: monotone two-pointer nearest-neighbor time alignment
//!   (`merge` module)
//! - **Sweep**: calibration sweep OLS fit and offset removal (`sweep`
//!   module)
//! - **Metrics**: threshold strain, interpolated resistance at strain,
//!   min resistance, recovery ratio (`metrics` module)
//! - **Measurement**: dataset lifecycle tying the passes together
//!   (`measurement` module)
//!
//! ## Units
//!
//! Time is seconds, displacement nanometres, force micronewtons,
//! current amperes, voltage volts, resistance ohms, stress megapascals.
//! Strain is dimensionless (depth over particle diameter).

pub mod config;
pub mod conversions;
pub mod error;
pub mod measurement;
pub mod merge;
pub mod metrics;
pub mod sample;
pub mod sweep;

pub use config::AnalysisCfg;
pub use error::{MetricError, SweepError};
pub use measurement::{EcrStream, Measurement};
pub use metrics::{MetricOutcome, SkipReason};
pub use sample::{EcrReading, MechReading, Sample, Statistics, SweepDecl};
pub use sweep::SweepFit;

/// Largest time difference (seconds) still accepted when matching an
/// electrical reading to a mechanical sample.
pub const MATCH_TOLERANCE_S: f64 = 0.02;

/// Upper bound (exclusive) on a plausible contact resistance in ohms.
/// Values at or above this are sensor noise/overflow and are never stored.
pub const RESISTANCE_MAX_OHM: f64 = 1000.0;

/// Largest strain distance at which a neighboring resistance point may
/// still anchor the interpolation in `resistance_at_strain`.
pub const STRAIN_NEIGHBOR_TOLERANCE: f64 = 0.1;
