//! Per-instant sample records and the typed reading streams that feed
//! them.
//!
//! Electrical fields are `Option`s rather than sentinel values: "no
//! data" can never be mistaken for a numeric zero.

/// One reading from the nanoindenter export, in arrival order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MechReading {
    /// Seconds since the start of the run.
    pub time: f64,
    /// Force in micronewtons.
    pub force: f64,
    /// Indentation depth in nanometres.
    pub displacement: f64,
}

/// One reading from the ECR circuit export, in arrival order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EcrReading {
    pub time: f64,
    /// Current in amperes.
    pub current: f64,
    /// Voltage in volts.
    pub voltage: f64,
}

/// Calibration sweep window declared by the electrical-stream metadata.
///
/// Only populated when the declared start and end values of the sweep
/// channel differ; an equal pair means no sweep was driven.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepDecl {
    pub start_time: f64,
    pub end_time: f64,
}

/// One time-aligned measurement instant.
///
/// `time`, `force`, and `displacement` always come from the mechanical
/// stream. `stress`/`strain` are present only when a particle size was
/// supplied. The electrical fields stay absent until the merge pass
/// finds a close-enough electrical reading; `resistance` additionally
/// requires a finite value inside the plausibility band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub time: f64,
    pub force: f64,
    pub displacement: f64,
    pub stress: Option<f64>,
    pub strain: Option<f64>,
    pub current: Option<f64>,
    pub voltage: Option<f64>,
    pub resistance: Option<f64>,
}

/// Contact geometry for a spherical particle, derived once per dataset.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ParticleGeometry {
    /// Projected contact area in m^2.
    area_m2: f64,
    /// Reference length (particle diameter) in nm.
    length_nm: f64,
}

impl ParticleGeometry {
    /// `None` when the size is zero or negative (stress/strain undefined).
    pub(crate) fn new(particle_size_um: f64) -> Option<Self> {
        (particle_size_um > 0.0).then(|| Self {
            area_m2: (1e-6 * particle_size_um / 2.0).powi(2) * std::f64::consts::PI,
            length_nm: particle_size_um * 1e3,
        })
    }

    /// Nominal stress in MPa from a force in micronewtons.
    pub(crate) fn stress_mpa(&self, force_un: f64) -> f64 {
        force_un * 1e-12 / self.area_m2
    }

    /// Nominal strain from a depth in nanometres.
    pub(crate) fn strain(&self, displacement_nm: f64) -> f64 {
        displacement_nm / self.length_nm
    }
}

impl Sample {
    pub(crate) fn from_mech(r: &MechReading, geometry: Option<&ParticleGeometry>) -> Self {
        Self {
            time: r.time,
            force: r.force,
            displacement: r.displacement,
            stress: geometry.map(|g| g.stress_mpa(r.force)),
            strain: geometry.map(|g| g.strain(r.displacement)),
            current: None,
            voltage: None,
            resistance: None,
        }
    }
}

/// Insertion-ordered metric name -> scalar mapping.
///
/// Later passes append new names; re-running the same metric updates its
/// value in place without disturbing the order. Names are never
/// silently repurposed for a different metric.
#[derive(Debug, Default, Clone)]
pub struct Statistics {
    entries: Vec<(String, f64)>,
}

impl Statistics {
    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
