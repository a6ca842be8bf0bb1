#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Readers for the raw instrument exports.
//!
//! A nanoindentation run produces two tab-separated files next to each
//! other: the mechanical export (`.txt`) and the ECR export (`.ecr`).
//! Both start with free-form preamble lines and a sentinel header row
//! that marks the beginning of data. These readers skip malformed rows
//! with a log line instead of failing; only an unopenable mechanical
//! file or a file with no data section at all is an error. A missing
//! `.ecr` file is expected (mechanical-only run) and maps to `None`.

pub mod ecr;
pub mod error;
pub mod mech;

pub use ecr::{electrical_path, read_electrical};
pub use error::ReadError;
pub use mech::read_mechanical;
