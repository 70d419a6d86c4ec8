//! # Cartesian state to Keplerian elements
//!
//! Extraction of osculating Keplerian elements from a geocentric position/velocity pair.
//!
//! ## Singularities
//!
//! The classical element set is singular for equatorial orbits (`sin i → 0`, the ascending node
//! is undefined) and for circular orbits (`e → 0`, the periapsis is undefined). How those cases
//! are handled is selected with [`DegeneracyPolicy`]:
//!
//! - [`DegeneracyPolicy::Strict`] rejects them with [`SimError::DegenerateOrbit`].
//! - [`DegeneracyPolicy::Regularize`] pins the undefined angles (`Ω = 0` and/or `ω = 0`) and
//!   moves the orbital phase into the remaining angle, so that the position on the orbit is
//!   preserved. Circular orbits also get `e = 0`. A `tracing` warning is emitted.
//!
//! Unbound, parabolic and rectilinear states are rejected under both policies.
use nalgebra::Vector3;
use tracing::warn;

use crate::{
    angles::{normalize_angle, normalized_atan2},
    constants::GM,
    keplerian_element::KeplerianElements,
    sim_errors::SimError,
};

/// `sin i` below which an orbit is treated as equatorial.
pub const EQUATORIAL_EPS: f64 = 1e-10;

/// Eccentricity below which an orbit is treated as circular.
///
/// `e` is recovered as `√(1 − p/a)`, so rounding in `p/a` alone yields `e ~ 1e-8` for an exactly
/// circular state.
pub const CIRCULAR_EPS: f64 = 1e-7;

/// Eccentricities within this distance of 1 are rejected as parabolic.
pub const PARABOLIC_EPS: f64 = 1e-10;

/// Behavior of [`cartesian_to_elements`] at the equatorial and circular singularities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegeneracyPolicy {
    /// Fail with [`SimError::DegenerateOrbit`].
    Strict,
    /// Pin the undefined angles to zero and warn.
    #[default]
    Regularize,
}

/// Convert a Cartesian state into classical Keplerian elements.
///
/// Arguments
/// -----------------
/// * `position`: geocentric position in km (inertial frame).
/// * `velocity`: geocentric velocity in km/s (inertial frame).
/// * `policy`: what to do with equatorial and/or circular orbits.
///
/// Return
/// ----------
/// * The osculating [`KeplerianElements`]. `Ω`, `ω` and `ν` are in `[0, 2π)`, `i` in `[0, π]`.
///
/// Errors
/// ----------
/// * [`SimError::DegenerateOrbit`] for non-finite input, zero angular momentum, unbound or
///   parabolic states, and (under [`DegeneracyPolicy::Strict`]) equatorial or circular orbits.
///
/// See also
/// ------------
/// * [`KeplerianElements::to_state_vectors`] – the inverse conversion.
pub fn cartesian_to_elements(
    position: &Vector3<f64>,
    velocity: &Vector3<f64>,
    policy: DegeneracyPolicy,
) -> Result<KeplerianElements, SimError> {
    if !position.iter().chain(velocity.iter()).all(|x| x.is_finite()) {
        return Err(SimError::DegenerateOrbit(format!(
            "non-finite state R = {position:?}, V = {velocity:?}"
        )));
    }

    let ang_mom = position.cross(velocity);
    let ang_mom_norm = ang_mom.norm();
    if ang_mom_norm == 0.0 {
        return Err(SimError::DegenerateOrbit(
            "zero angular momentum (rectilinear or null state)".into(),
        ));
    }
    let normal = ang_mom / ang_mom_norm;

    let sin_incl = normal.x.hypot(normal.y);
    let inclination = sin_incl.atan2(normal.z);

    let r = position.norm();
    let semi_major_axis = 1. / (2. / r - velocity.norm_squared() / GM);
    if !(semi_major_axis > 0.0) || !semi_major_axis.is_finite() {
        return Err(SimError::DegenerateOrbit(format!(
            "unbound state (a = {semi_major_axis} km)"
        )));
    }

    let semi_latus_rectum = ang_mom_norm.powi(2) / GM;
    let eccentricity = (1. - semi_latus_rectum / semi_major_axis).max(0.0).sqrt();
    if eccentricity >= 1. - PARABOLIC_EPS {
        return Err(SimError::DegenerateOrbit(format!(
            "parabolic state (e = {eccentricity})"
        )));
    }

    let mean_motion = (GM / semi_major_axis.powi(3)).sqrt();
    let ecc_anomaly = normalized_atan2(
        position.dot(velocity) / (semi_major_axis.powi(2) * mean_motion),
        1. - r / semi_major_axis,
    );
    let true_anomaly = normalized_atan2(
        (1. - eccentricity.powi(2)).sqrt() * ecc_anomaly.sin(),
        ecc_anomaly.cos() - eccentricity,
    );

    let equatorial = sin_incl < EQUATORIAL_EPS;
    let circular = eccentricity < CIRCULAR_EPS;

    if policy == DegeneracyPolicy::Strict && (equatorial || circular) {
        return Err(SimError::DegenerateOrbit(format!(
            "singular element set (sin i = {sin_incl:e}, e = {eccentricity:e})"
        )));
    }

    if equatorial || circular {
        warn!(
            equatorial,
            circular,
            sin_incl,
            eccentricity,
            "degenerate orbit regularized: undefined angles pinned to zero"
        );
    }

    let (ascending_node_longitude, latitude_argument) = if equatorial {
        // node pinned on the x axis, phase measured in the direction of motion
        let u = normalized_atan2(position.y * normal.z.signum(), position.x);
        (0.0, u)
    } else {
        let node = normalized_atan2(normal.x, -normal.y);
        let u = normalized_atan2(
            position.z / sin_incl,
            position.x * node.cos() + position.y * node.sin(),
        );
        (node, u)
    };

    let (eccentricity, periapsis_argument, true_anomaly) = if circular {
        (0.0, 0.0, latitude_argument)
    } else {
        (
            eccentricity,
            normalize_angle(latitude_argument - true_anomaly),
            true_anomaly,
        )
    };

    Ok(KeplerianElements {
        semi_major_axis,
        eccentricity,
        inclination,
        ascending_node_longitude,
        periapsis_argument,
        true_anomaly,
    })
}
