use thiserror::Error;

/// Fatal per-metric conditions. These indicate unusable input data and
/// are surfaced distinctly from an expected "not found" outcome.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MetricError {
    #[error("recovery ratio undefined: peak displacement is zero")]
    ZeroPeakDisplacement,
    #[error("dataset holds no samples")]
    EmptyDataset,
}

/// Sweep-fit failures. Underdetermined fits are reportable but never
/// abort dataset construction; the caller skips recalibration instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SweepError {
    #[error("sweep fit needs at least 2 recorded points, got {points}")]
    Underdetermined { points: usize },
    #[error("sweep fit cannot determine slope (degenerate current variance)")]
    DegenerateCurrent,
}
