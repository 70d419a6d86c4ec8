//! # Orbit propagation
//!
//! Two families of propagators advance an inertial [`State`] on a fixed time grid:
//!
//! - [`keplerian::KeplerianPropagator`]: analytic two-body motion. Each step extracts the
//!   osculating elements, advances the mean anomaly and solves Kepler's equation.
//! - [`rk4::Rk4Propagator`]: fixed-step fourth-order Runge-Kutta integration of a pluggable
//!   [`force_model::AccelerationModel`] ([`force_model::Monopole`] or [`force_model::J2`]).
//!
//! Both produce a [`Trajectory`] of `steps + 1` samples in [`Frame::Inertial`], the first sample
//! being the initial state and sample `k` sitting at `t0 + k·h`.
//!
//! Propagation is sequential: every step depends on the previous state.
//!
//! [`Frame::Inertial`]: crate::state::Frame::Inertial
use crate::{
    constants::Seconds,
    sim_errors::SimError,
    sim_params::{PropagationModel, SimParams},
    state::{State, Trajectory},
};

pub mod force_model;
pub mod keplerian;
pub mod rk4;

use force_model::{Monopole, J2};
use keplerian::KeplerianPropagator;
use rk4::Rk4Propagator;

/// Advance an initial state over a fixed-step time grid.
pub trait Propagator {
    /// Propagate `initial` for `steps` steps of `step` seconds.
    ///
    /// Return
    /// ----------
    /// * An inertial [`Trajectory`] of `steps + 1` states starting with `initial`.
    ///
    /// Errors
    /// ----------
    /// * [`SimError::InvalidSimParameter`] for a non-positive or non-finite step, or a
    ///   non-finite initial state.
    /// * Any error raised by a single step (element extraction, Kepler solver, divergence).
    fn propagate(
        &self,
        initial: &State,
        step: Seconds,
        steps: usize,
    ) -> Result<Trajectory, SimError>;

    /// Name of the model, as accepted by [`PropagationModel`]'s parser.
    fn name(&self) -> &'static str;
}

/// Build the propagator selected by the simulation parameters.
pub fn propagator_for(params: &SimParams) -> Box<dyn Propagator + Send + Sync> {
    match params.model {
        PropagationModel::Keplerian => Box::new(KeplerianPropagator::new(
            params.kepler,
            params.degeneracy,
        )),
        PropagationModel::Rk4Monopole => Box::new(Rk4Propagator::new(Monopole::default())),
        PropagationModel::Rk4J2 => Box::new(Rk4Propagator::new(J2::egm96())),
    }
}

pub(crate) fn check_inputs(initial: &State, step: Seconds) -> Result<(), SimError> {
    if !(step.is_finite() && step > 0.0) {
        return Err(SimError::InvalidSimParameter(format!(
            "step size must be finite and strictly positive, got {step}"
        )));
    }
    let finite = initial
        .position
        .iter()
        .chain(initial.velocity.iter())
        .all(|x| x.is_finite())
        && initial.epoch.is_finite();
    if !finite {
        return Err(SimError::InvalidSimParameter(format!(
            "initial state is not finite: {initial:?}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod propagation_test {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn test_check_inputs() {
        let state = State::new(Vector3::new(7000.0, 0.0, 0.0), Vector3::new(0.0, 7.5, 0.0), 0.0);
        assert!(check_inputs(&state, 10.0).is_ok());
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                check_inputs(&state, bad),
                Err(SimError::InvalidSimParameter(_))
            ));
        }

        let nan_state = State::new(Vector3::new(f64::NAN, 0.0, 0.0), state.velocity, 0.0);
        assert!(check_inputs(&nan_state, 10.0).is_err());
    }

    #[test]
    fn test_propagator_for() {
        let mut params = SimParams::default();
        assert_eq!(propagator_for(&params).name(), "kep");
        params.model = PropagationModel::Rk4Monopole;
        assert_eq!(propagator_for(&params).name(), "rk4-monopole");
        params.model = PropagationModel::Rk4J2;
        assert_eq!(propagator_for(&params).name(), "rk4-j2");
    }
}
