use tracing::debug;

use crate::{
    angles::normalize_angle,
    constants::Seconds,
    kepler::{solve_kepler, KeplerSolverSettings},
    orb_elem::{cartesian_to_elements, DegeneracyPolicy},
    sim_errors::SimError,
    state::{Frame, State, Trajectory},
    time::time_grid,
};

use super::{check_inputs, Propagator};

/// Analytic two-body propagator.
///
/// The orbital plane and shape `(a, e, i, Ω, ω)` are constant under unperturbed motion, so a
/// step only moves the satellite along its ellipse:
///
/// 1. extract the osculating elements of the current state,
/// 2. `M₀ = E₀ − e·sin E₀` from the current eccentric anomaly,
/// 3. `M = M₀ + n·Δt`, solve Kepler's equation for `E`,
/// 4. rebuild position and velocity in the `(P, Q)` basis.
///
/// Elements are re-extracted from the latest state at every step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KeplerianPropagator {
    pub solver: KeplerSolverSettings,
    pub degeneracy: DegeneracyPolicy,
}

impl KeplerianPropagator {
    pub fn new(solver: KeplerSolverSettings, degeneracy: DegeneracyPolicy) -> Self {
        KeplerianPropagator { solver, degeneracy }
    }

    /// Move `state` along its Keplerian orbit to `epoch`.
    ///
    /// `epoch` may be earlier than `state.epoch`; the mean anomaly is then moved backwards.
    pub fn advance(&self, state: &State, epoch: Seconds) -> Result<State, SimError> {
        let kep = cartesian_to_elements(&state.position, &state.velocity, self.degeneracy)?;
        let e = kep.eccentricity;

        let mean_anomaly =
            normalize_angle(kep.mean_anomaly() + kep.mean_motion() * (epoch - state.epoch));
        let ecc_anomaly = solve_kepler(e, mean_anomaly, &self.solver)?;

        let (position, velocity) = kep.state_at_eccentric_anomaly(ecc_anomaly);
        Ok(State::new(position, velocity, epoch))
    }
}

impl Propagator for KeplerianPropagator {
    fn propagate(
        &self,
        initial: &State,
        step: Seconds,
        steps: usize,
    ) -> Result<Trajectory, SimError> {
        check_inputs(initial, step)?;
        debug!(model = self.name(), step, steps, t0 = initial.epoch, "starting propagation");

        let grid = time_grid(initial.epoch, step, steps);
        let mut states = Vec::with_capacity(grid.len());
        states.push(*initial);

        for &epoch in &grid[1..] {
            let next = self.advance(&states[states.len() - 1], epoch)?;
            states.push(next);
        }

        let trajectory = Trajectory::new(Frame::Inertial, states)?;
        debug!(
            model = self.name(),
            samples = trajectory.len(),
            t_end = trajectory.last().epoch,
            "propagation finished"
        );
        Ok(trajectory)
    }

    fn name(&self) -> &'static str {
        "kep"
    }
}
