//! # Trajectory differences
//!
//! Express the separation between two satellites (or two propagations of the same satellite)
//! in a physically meaningful basis.
//!
//! - **HCL** ([`hcl_difference`]): Height / Cross-track / aLong-track basis attached to the
//!   first state,
//!   * `H = R₁/|R₁|` (radial),
//!   * `C = (R₁ × V₁)/|R₁ × V₁|` (orbit normal),
//!   * `L = C × H` (along the motion for a circular orbit).
//! - **ENU** ([`enu_difference`]): East / North / Up basis of a ground station, after
//!   converting both positions to the Earth-fixed frame.
//!
//! In both cases the separation is `R₂ − R₁`.
//!
//! ## Trajectory pairing
//!
//! [`hcl_differences`] and [`enu_differences`] never interpolate. The two trajectories are
//! compared sample by sample and must therefore share
//!
//! * their frame ([`SimError::FrameMismatch`]),
//! * their length ([`SimError::MismatchedTrajectoryLength`]),
//! * their epochs, to within [`EPOCH_EPS`] ([`SimError::MisalignedEpochs`]).
use nalgebra::Vector3;

use crate::{
    constants::{Seconds, EPOCH_EPS},
    observers::GroundStation,
    ref_system::inertial_to_earth_fixed_vectors,
    sim_errors::SimError,
    state::{Frame, State, Trajectory},
};

/// Orthonormal Height / Cross-track / Along-track basis of an inertial state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HclBasis {
    pub height: Vector3<f64>,
    pub cross_track: Vector3<f64>,
    pub along_track: Vector3<f64>,
}

impl HclBasis {
    /// Basis attached to `state`.
    ///
    /// Errors
    /// ----------
    /// * [`SimError::DegenerateOrbit`] if the position is zero or parallel to the velocity.
    pub fn new(state: &State) -> Result<Self, SimError> {
        let height = state.position.try_normalize(0.0).ok_or_else(|| {
            SimError::DegenerateOrbit("HCL basis undefined at the origin".into())
        })?;
        let cross_track = state.angular_momentum().try_normalize(0.0).ok_or_else(|| {
            SimError::DegenerateOrbit(
                "HCL basis undefined for a velocity parallel to the position".into(),
            )
        })?;
        Ok(HclBasis {
            height,
            cross_track,
            along_track: cross_track.cross(&height),
        })
    }

    /// Components `(h, c, l)` of `vector` in this basis.
    pub fn project(&self, vector: &Vector3<f64>) -> Vector3<f64> {
        Vector3::new(
            self.height.dot(vector),
            self.cross_track.dot(vector),
            self.along_track.dot(vector),
        )
    }
}

/// Difference vector at one epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifferenceVector {
    pub epoch: Seconds,
    /// `(ΔH, ΔC, ΔL)` or `(ΔE, ΔN, ΔU)` in km
    pub components: Vector3<f64>,
}

/// `R₂ − R₁` projected on the HCL basis of `state1`.
///
/// Both states must be inertial.
pub fn hcl_difference(state1: &State, state2: &State) -> Result<Vector3<f64>, SimError> {
    let basis = HclBasis::new(state1)?;
    Ok(basis.project(&(state2.position - state1.position)))
}

/// `R₂ − R₁` in the Earth-fixed frame at `time`, projected on the ENU basis of `station`.
///
/// Both states must be inertial; they are rotated with the sidereal angle of `time`.
pub fn enu_difference(
    state1: &State,
    state2: &State,
    station: &GroundStation,
    time: Seconds,
) -> Vector3<f64> {
    let (r1, _) = inertial_to_earth_fixed_vectors(&state1.position, &state1.velocity, time);
    let (r2, _) = inertial_to_earth_fixed_vectors(&state2.position, &state2.velocity, time);
    station.enu_basis().project(&(r2 - r1))
}

fn check_pairing(first: &Trajectory, second: &Trajectory) -> Result<(), SimError> {
    second.require_frame(first.frame())?;
    if first.len() != second.len() {
        return Err(SimError::MismatchedTrajectoryLength {
            left: first.len(),
            right: second.len(),
        });
    }
    first
        .epochs()
        .zip(second.epochs())
        .enumerate()
        .try_for_each(|(index, (left, right))| {
            if (left - right).abs() > EPOCH_EPS {
                Err(SimError::MisalignedEpochs { index, left, right })
            } else {
                Ok(())
            }
        })
}

/// Sample-wise HCL differences between two inertial trajectories.
///
/// Errors
/// ----------
/// * [`SimError::FrameMismatch`] if either trajectory is not inertial.
/// * [`SimError::MismatchedTrajectoryLength`] / [`SimError::MisalignedEpochs`] if the samples
///   cannot be paired.
/// * [`SimError::DegenerateOrbit`] if the HCL basis of a sample of `first` is undefined.
pub fn hcl_differences(
    first: &Trajectory,
    second: &Trajectory,
) -> Result<Vec<DifferenceVector>, SimError> {
    first.require_frame(Frame::Inertial)?;
    check_pairing(first, second)?;

    first
        .iter()
        .zip(second.iter())
        .map(|(s1, s2)| {
            Ok(DifferenceVector {
                epoch: s1.epoch,
                components: hcl_difference(s1, s2)?,
            })
        })
        .collect()
}

/// Sample-wise ENU differences between two trajectories as seen from `station`.
///
/// Inertial trajectories are rotated to the Earth-fixed frame at each sample epoch;
/// Earth-fixed trajectories are used as they are.
///
/// Errors
/// ----------
/// * [`SimError::FrameMismatch`] if the trajectories are not in the same frame.
/// * [`SimError::MismatchedTrajectoryLength`] / [`SimError::MisalignedEpochs`] if the samples
///   cannot be paired.
pub fn enu_differences(
    first: &Trajectory,
    second: &Trajectory,
    station: &GroundStation,
) -> Result<Vec<DifferenceVector>, SimError> {
    check_pairing(first, second)?;

    let basis = station.enu_basis();
    let frame = first.frame();
    Ok(first
        .iter()
        .zip(second.iter())
        .map(|(s1, s2)| {
            let components = match frame {
                Frame::Inertial => enu_difference(s1, s2, station, s1.epoch),
                Frame::EarthFixed => basis.project(&(s2.position - s1.position)),
            };
            DifferenceVector {
                epoch: s1.epoch,
                components,
            }
        })
        .collect())
}
