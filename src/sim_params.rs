//! # Simulation parameters
//!
//! This module defines [`SimParams`], the configuration of one simulation run, and its
//! validating builder [`SimParamsBuilder`].
//!
//! ## Overview
//!
//! A run is fully described by:
//!
//! - the **time grid**: `step_size` (seconds) and `steps` (number of steps, the trajectory holds
//!   `steps + 1` samples),
//! - the **propagation model** ([`PropagationModel`]), parsed from the external names `kep`,
//!   `rk4-monopole` and `rk4-j2`,
//! - the **degeneracy policy** applied when Keplerian elements are extracted
//!   ([`DegeneracyPolicy`]),
//! - the **Kepler solver settings** ([`KeplerSolverSettings`]).
//!
//! ## Example
//!
//! ```rust
//! use satsim::sim_params::{PropagationModel, SimParams};
//!
//! let params = SimParams::builder()
//!     .step_size(30.0)
//!     .steps(2880)
//!     .model("rk4-j2".parse::<PropagationModel>().unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(params.model, PropagationModel::Rk4J2);
//! ```
use std::{cmp::Ordering::Greater, fmt, str::FromStr};

use crate::{
    constants::Seconds, kepler::KeplerSolverSettings, orb_elem::DegeneracyPolicy,
    sim_errors::SimError,
};

/// Orbit propagation model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PropagationModel {
    /// Analytic two-body propagation (`kep`)
    #[default]
    Keplerian,
    /// RK4 integration of point-mass gravity (`rk4-monopole`)
    Rk4Monopole,
    /// RK4 integration of point-mass gravity plus J2 (`rk4-j2`)
    Rk4J2,
}

impl PropagationModel {
    /// External name of the model.
    pub fn as_str(&self) -> &'static str {
        match self {
            PropagationModel::Keplerian => "kep",
            PropagationModel::Rk4Monopole => "rk4-monopole",
            PropagationModel::Rk4J2 => "rk4-j2",
        }
    }
}

impl FromStr for PropagationModel {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kep" => Ok(PropagationModel::Keplerian),
            "rk4-monopole" => Ok(PropagationModel::Rk4Monopole),
            "rk4-j2" => Ok(PropagationModel::Rk4J2),
            _ => Err(SimError::InvalidPropagationModel(s.to_string())),
        }
    }
}

impl fmt::Display for PropagationModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration of a simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimParams {
    /// Propagation step in seconds (> 0)
    pub step_size: Seconds,
    /// Number of propagation steps (>= 1)
    pub steps: usize,
    pub model: PropagationModel,
    pub degeneracy: DegeneracyPolicy,
    pub kepler: KeplerSolverSettings,
}

impl SimParams {
    /// Default parameters, same as [`SimParams::default()`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a [`SimParamsBuilder`] initialized with the defaults.
    pub fn builder() -> SimParamsBuilder {
        SimParamsBuilder::new()
    }

    /// Time span covered by the run, `steps · step_size`.
    pub fn horizon(&self) -> Seconds {
        self.steps as f64 * self.step_size
    }
}

impl Default for SimParams {
    fn default() -> Self {
        SimParams {
            step_size: 10.0,
            steps: 1000,
            model: PropagationModel::Keplerian,
            degeneracy: DegeneracyPolicy::Regularize,
            kepler: KeplerSolverSettings::default(),
        }
    }
}

impl fmt::Display for SimParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "Simulation Parameters")?;
            writeln!(f, "---------------------")?;
            writeln!(f, "  model            = {}", self.model)?;
            writeln!(f, "  step_size        = {} s", self.step_size)?;
            writeln!(f, "  steps            = {}", self.steps)?;
            writeln!(f, "  horizon          = {} s", self.horizon())?;
            writeln!(f, "  degeneracy       = {:?}", self.degeneracy)?;
            writeln!(f, "  kepler tolerance = {:e}", self.kepler.tolerance)?;
            write!(f, "  kepler max iter  = {}", self.kepler.max_iterations)
        } else {
            write!(
                f,
                "SimParams(model={}, step={} s, steps={}, degeneracy={:?})",
                self.model, self.step_size, self.steps, self.degeneracy
            )
        }
    }
}

/// Builder for [`SimParams`], with validation.
#[derive(Debug, Clone, Default)]
pub struct SimParamsBuilder {
    params: SimParams,
}

impl SimParamsBuilder {
    pub fn new() -> Self {
        Self {
            params: SimParams::default(),
        }
    }

    pub fn step_size(mut self, v: Seconds) -> Self {
        self.params.step_size = v;
        self
    }
    pub fn steps(mut self, v: usize) -> Self {
        self.params.steps = v;
        self
    }
    pub fn model(mut self, v: PropagationModel) -> Self {
        self.params.model = v;
        self
    }
    pub fn degeneracy(mut self, v: DegeneracyPolicy) -> Self {
        self.params.degeneracy = v;
        self
    }
    pub fn kepler_tolerance(mut self, v: f64) -> Self {
        self.params.kepler.tolerance = v;
        self
    }
    pub fn kepler_max_iterations(mut self, v: usize) -> Self {
        self.params.kepler.max_iterations = v;
        self
    }

    /// Return true iff x > 0.0 and comparable (i.e., not NaN).
    #[inline]
    fn gt0(x: f64) -> bool {
        x.partial_cmp(&0.0) == Some(Greater)
    }

    /// Validate and return the parameters.
    ///
    /// Errors
    /// ----------
    /// * [`SimError::InvalidSimParameter`] if `step_size` is not finite and > 0, `steps` is 0,
    ///   the Kepler tolerance is not > 0 or the iteration cap is 0.
    pub fn build(self) -> Result<SimParams, SimError> {
        let p = &self.params;

        if !Self::gt0(p.step_size) || !p.step_size.is_finite() {
            return Err(SimError::InvalidSimParameter(
                "step_size must be finite and > 0".into(),
            ));
        }
        if p.steps == 0 {
            return Err(SimError::InvalidSimParameter("steps must be >= 1".into()));
        }
        if !Self::gt0(p.kepler.tolerance) {
            return Err(SimError::InvalidSimParameter(
                "kepler tolerance must be > 0".into(),
            ));
        }
        if p.kepler.max_iterations == 0 {
            return Err(SimError::InvalidSimParameter(
                "kepler max_iterations must be >= 1".into(),
            ));
        }

        Ok(self.params)
    }
}
