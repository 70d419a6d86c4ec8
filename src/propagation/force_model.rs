//! # Acceleration models
//!
//! Gravity field models plugged into the RK4 integrator through [`AccelerationModel`].
//!
//! - [`Monopole`]: point-mass Earth.
//! - [`J2`]: point mass plus the degree-2 zonal harmonic (oblateness).
use nalgebra::Vector3;

use crate::constants::{AEGMA96, C20, GM};

/// Gravitational acceleration as a function of position.
///
/// The RK4 stages do not consume the acceleration directly but the position increment it
/// produces over one step, [`AccelerationModel::displacement`].
pub trait AccelerationModel: Send + Sync {
    /// Acceleration in km/s² at an inertial position given in km.
    fn acceleration(&self, position: &Vector3<f64>) -> Vector3<f64>;

    /// Position increment `½·h²·a(R)` in km over a step of `h` seconds.
    fn displacement(&self, position: &Vector3<f64>, step: f64) -> Vector3<f64> {
        0.5 * step * step * self.acceleration(position)
    }

    /// Name of the RK4 model integrating this field, e.g. `rk4-j2`.
    fn name(&self) -> &'static str;
}

/// Point-mass gravity `a = −μ·R/|R|³`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Monopole {
    pub mu: f64,
}

impl Default for Monopole {
    fn default() -> Self {
        Monopole { mu: GM }
    }
}

impl AccelerationModel for Monopole {
    fn acceleration(&self, position: &Vector3<f64>) -> Vector3<f64> {
        let r = position.norm();
        -self.mu / r.powi(3) * position
    }

    fn name(&self) -> &'static str {
        "rk4-monopole"
    }
}

/// Point-mass gravity plus the `J2` zonal term.
///
/// With `c` the denormalized `C20` coefficient and `a` the reference radius:
///
/// ```text
/// a_x = −μ·x/r³ + 1.5·μ·(a²/r⁵)·c·x·(1 − 5z²/r²)
/// a_y = −μ·y/r³ + 1.5·μ·(a²/r⁵)·c·y·(1 − 5z²/r²)
/// a_z = −μ·z/r³ + 1.5·μ·(a²/r⁵)·c·z·(3 − 5z²/r²)
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct J2 {
    pub mu: f64,
    /// Unnormalized `C20` (equal to `−J2`)
    pub coefficient: f64,
    /// Reference equatorial radius of the gravity model in km
    pub reference_radius: f64,
}

impl J2 {
    /// The EGM96 `C20` term.
    pub fn egm96() -> Self {
        J2 {
            mu: GM,
            coefficient: denormalize_coefficient(C20, 2, 0),
            reference_radius: AEGMA96,
        }
    }
}

impl Default for J2 {
    fn default() -> Self {
        J2::egm96()
    }
}

impl AccelerationModel for J2 {
    fn acceleration(&self, position: &Vector3<f64>) -> Vector3<f64> {
        let r = position.norm();
        let z2_r2 = (position.z / r).powi(2);
        let factor = 1.5 * self.mu * self.reference_radius.powi(2) / r.powi(5) * self.coefficient;

        let central = -self.mu / r.powi(3) * position;
        let oblateness = Vector3::new(
            factor * position.x * (1. - 5. * z2_r2),
            factor * position.y * (1. - 5. * z2_r2),
            factor * position.z * (3. - 5. * z2_r2),
        );
        central + oblateness
    }

    fn name(&self) -> &'static str {
        "rk4-j2"
    }
}

/// Convert a fully normalized spherical-harmonic coefficient of degree `n` and order `m` to its
/// unnormalized value.
///
/// `C̄nm · √((n−m)!·(2n+1)·(2−δ_{m0}) / (n+m)!)`. Terms with `m > n` do not exist and map to 0.
pub fn denormalize_coefficient(normalized: f64, degree: u32, order: u32) -> f64 {
    if order > degree {
        return 0.0;
    }
    let kronecker = if order == 0 { 1.0 } else { 0.0 };
    let ratio = factorial(degree + order)
        / (factorial(degree - order) * (2. * degree as f64 + 1.) * (2. - kronecker));
    normalized / ratio.sqrt()
}

fn factorial(n: u32) -> f64 {
    (1..=n).map(f64::from).product()
}
