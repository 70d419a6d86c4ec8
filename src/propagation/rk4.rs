use nalgebra::Vector3;
use tracing::debug;

use crate::{
    constants::Seconds,
    sim_errors::SimError,
    state::{Frame, State, Trajectory},
    time::time_grid,
};

use super::{check_inputs, force_model::AccelerationModel, Propagator};

/// Fixed-step fourth-order Runge-Kutta integrator for `R'' = a(R)`.
///
/// The stages are written on position increments `k = ½·h²·a(R)`
/// ([`AccelerationModel::displacement`]):
///
/// ```text
/// k1 = d(R)
/// k2 = d(R + h/2·V + k1/4)
/// k3 = d(R + h/2·V + k2/4)
/// k4 = d(R + h·V + k3)
/// R' = R + h·V + (k1 + k2 + k3)/3
/// V' = V + (k1 + 2·k2 + 2·k3 + k4)/(3h)
/// ```
///
/// There is no error control: accuracy depends only on the step size.
#[derive(Debug, Clone, Default)]
pub struct Rk4Propagator<M: AccelerationModel> {
    pub model: M,
}

impl<M: AccelerationModel> Rk4Propagator<M> {
    pub fn new(model: M) -> Self {
        Rk4Propagator { model }
    }

    /// One integration step of `h` seconds.
    ///
    /// Return
    /// ----------
    /// * The new `(R, V)` pair.
    pub fn step(
        &self,
        position: &Vector3<f64>,
        velocity: &Vector3<f64>,
        h: Seconds,
    ) -> (Vector3<f64>, Vector3<f64>) {
        let half_drift = position + 0.5 * h * velocity;
        let full_drift = position + h * velocity;

        let k1 = self.model.displacement(position, h);
        let k2 = self.model.displacement(&(half_drift + k1 / 4.), h);
        let k3 = self.model.displacement(&(half_drift + k2 / 4.), h);
        let k4 = self.model.displacement(&(full_drift + k3), h);

        let p = (k1 + k2 + k3) / 3.;
        let q = (k1 + 2. * k2 + 2. * k3 + k4) / 3.;

        (full_drift + p, velocity + q / h)
    }
}

impl<M: AccelerationModel> Propagator for Rk4Propagator<M> {
    fn propagate(
        &self,
        initial: &State,
        step: Seconds,
        steps: usize,
    ) -> Result<Trajectory, SimError> {
        check_inputs(initial, step)?;
        debug!(
            model = self.name(),
            step,
            steps,
            t0 = initial.epoch,
            "starting propagation"
        );

        let grid = time_grid(initial.epoch, step, steps);
        let mut states = Vec::with_capacity(grid.len());
        states.push(*initial);

        let mut position = initial.position;
        let mut velocity = initial.velocity;
        for (k, &epoch) in grid.iter().enumerate().skip(1) {
            (position, velocity) = self.step(&position, &velocity, step);
            if !position.iter().chain(velocity.iter()).all(|x| x.is_finite()) {
                return Err(SimError::DegenerateOrbit(format!(
                    "numerical integration diverged at step {k} (t = {epoch} s)"
                )));
            }
            states.push(State::new(position, velocity, epoch));
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
        self.model.name()
    }
}
