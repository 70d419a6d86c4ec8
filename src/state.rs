//! # Satellite states and trajectories
//!
//! A [`State`] is one sample of the satellite motion: position, velocity and epoch. A
//! [`Trajectory`] is an ordered, non-empty sequence of states tagged with the [`Frame`] they are
//! expressed in.
//!
//! ## Invariants
//!
//! - A trajectory always holds at least one state.
//! - Epochs are strictly increasing.
//! - All states of a trajectory share the same frame.
//!
//! These are enforced by [`Trajectory::new`]; propagators build their output through it.
use nalgebra::Vector3;

use crate::{
    constants::Seconds,
    ref_system::{earth_fixed_to_inertial, inertial_to_earth_fixed},
    sim_errors::SimError,
};

/// Reference frame of a state vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frame {
    /// Earth-centered inertial frame (J2000 axes)
    Inertial,
    /// Earth-centered, Earth-fixed frame rotating with the Earth
    EarthFixed,
}

/// Position (km), velocity (km/s) and epoch (seconds since J2000.0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
    pub epoch: Seconds,
}

impl State {
    pub fn new(position: Vector3<f64>, velocity: Vector3<f64>, epoch: Seconds) -> Self {
        State {
            position,
            velocity,
            epoch,
        }
    }

    /// Specific angular momentum `R × V` in km²/s.
    pub fn angular_momentum(&self) -> Vector3<f64> {
        self.position.cross(&self.velocity)
    }

    /// Specific orbital energy `v²/2 − μ/r` in km²/s².
    pub fn specific_energy(&self) -> f64 {
        self.velocity.norm_squared() / 2. - crate::constants::GM / self.position.norm()
    }
}

/// Time-ordered sequence of states in a single frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    frame: Frame,
    states: Vec<State>,
}

impl Trajectory {
    /// Build a trajectory and check its invariants.
    ///
    /// Errors
    /// ----------
    /// * [`SimError::EmptyTrajectory`] if `states` is empty.
    /// * [`SimError::NonMonotonicTrajectory`] with the first offending index if epochs are not
    ///   strictly increasing (or not finite).
    pub fn new(frame: Frame, states: Vec<State>) -> Result<Self, SimError> {
        if states.is_empty() {
            return Err(SimError::EmptyTrajectory);
        }
        if let Some(idx) = states.iter().position(|s| !s.epoch.is_finite()) {
            return Err(SimError::NonMonotonicTrajectory(idx));
        }
        if let Some(idx) = states
            .windows(2)
            .position(|pair| pair[1].epoch <= pair[0].epoch)
        {
            return Err(SimError::NonMonotonicTrajectory(idx + 1));
        }
        Ok(Trajectory { frame, states })
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always `false` for a trajectory built through [`Trajectory::new`].
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn first(&self) -> &State {
        &self.states[0]
    }

    pub fn last(&self) -> &State {
        &self.states[self.states.len() - 1]
    }

    pub fn epochs(&self) -> impl Iterator<Item = Seconds> + '_ {
        self.states.iter().map(|s| s.epoch)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, State> {
        self.states.iter()
    }

    pub fn into_states(self) -> Vec<State> {
        self.states
    }

    /// Fail with [`SimError::FrameMismatch`] unless the trajectory is in `expected`.
    pub fn require_frame(&self, expected: Frame) -> Result<(), SimError> {
        if self.frame != expected {
            return Err(SimError::FrameMismatch {
                expected,
                found: self.frame,
            });
        }
        Ok(())
    }

    /// Convert every state into the Earth-fixed frame at its own epoch.
    ///
    /// A trajectory already in [`Frame::EarthFixed`] is returned unchanged.
    pub fn to_earth_fixed(&self) -> Trajectory {
        match self.frame {
            Frame::EarthFixed => self.clone(),
            Frame::Inertial => Trajectory {
                frame: Frame::EarthFixed,
                states: self.states.iter().map(inertial_to_earth_fixed).collect(),
            },
        }
    }

    /// Convert every state into the inertial frame at its own epoch.
    pub fn to_inertial(&self) -> Trajectory {
        match self.frame {
            Frame::Inertial => self.clone(),
            Frame::EarthFixed => Trajectory {
                frame: Frame::Inertial,
                states: self.states.iter().map(earth_fixed_to_inertial).collect(),
            },
        }
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a State;
    type IntoIter = std::slice::Iter<'a, State>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}

#[cfg(test)]
mod state_test {
    use super::*;

    fn sample(epoch: f64) -> State {
        State::new(
            Vector3::new(7000.0, 0.0, 0.0),
            Vector3::new(0.0, 7.5, 0.0),
            epoch,
        )
    }

    #[test]
    fn test_empty_trajectory() {
        assert_eq!(
            Trajectory::new(Frame::Inertial, vec![]).unwrap_err(),
            SimError::EmptyTrajectory
        );
    }

    #[test]
    fn test_non_monotonic_trajectory() {
        let states = vec![sample(0.0), sample(10.0), sample(10.0), sample(30.0)];
        assert_eq!(
            Trajectory::new(Frame::Inertial, states).unwrap_err(),
            SimError::NonMonotonicTrajectory(2)
        );

        let states = vec![sample(0.0), sample(f64::NAN)];
        assert_eq!(
            Trajectory::new(Frame::Inertial, states).unwrap_err(),
            SimError::NonMonotonicTrajectory(1)
        );
    }

    #[test]
    fn test_require_frame() {
        let traj = Trajectory::new(Frame::Inertial, vec![sample(0.0)]).unwrap();
        assert!(traj.require_frame(Frame::Inertial).is_ok());
        assert_eq!(
            traj.require_frame(Frame::EarthFixed).unwrap_err(),
            SimError::FrameMismatch {
                expected: Frame::EarthFixed,
                found: Frame::Inertial
            }
        );
    }

    #[test]
    fn test_frame_round_trip() {
        let traj =
            Trajectory::new(Frame::Inertial, vec![sample(0.0), sample(600.0), sample(1e5)])
                .unwrap();
        let ecef = traj.to_earth_fixed();
        assert_eq!(ecef.frame(), Frame::EarthFixed);
        assert_eq!(ecef.len(), 3);

        let back = ecef.to_inertial();
        for (a, b) in traj.iter().zip(back.iter()) {
            assert!((a.position - b.position).norm() < 1e-8);
            assert!((a.velocity - b.velocity).norm() < 1e-11);
            assert_eq!(a.epoch, b.epoch);
        }
    }
}
