use std::fmt;

use nalgebra::Vector3;

use crate::{
    angles::normalized_atan2,
    constants::{Kilometer, Radian, DPI, GM},
};

/// Classical Keplerian orbital elements of a bound (elliptic) geocentric orbit.
///
/// Units:
/// * `semi_major_axis`: km
/// * `eccentricity`: unitless, in `[0, 1)`
/// * `inclination`: radians, in `[0, π]`
/// * `ascending_node_longitude`: radians, in `[0, 2π)`
/// * `periapsis_argument`: radians, in `[0, 2π)`
/// * `true_anomaly`: radians, in `[0, 2π)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerianElements {
    pub semi_major_axis: Kilometer,
    pub eccentricity: f64,
    pub inclination: Radian,
    pub ascending_node_longitude: Radian,
    pub periapsis_argument: Radian,
    pub true_anomaly: Radian,
}

impl KeplerianElements {
    /// Mean motion `n = √(μ / a³)` in rad/s.
    pub fn mean_motion(&self) -> f64 {
        (GM / self.semi_major_axis.powi(3)).sqrt()
    }

    /// Orbital period `2π / n` in seconds.
    pub fn period(&self) -> f64 {
        DPI / self.mean_motion()
    }

    /// Semi-latus rectum `p = a(1 − e²)` in km.
    pub fn semi_latus_rectum(&self) -> Kilometer {
        self.semi_major_axis * (1. - self.eccentricity.powi(2))
    }

    /// Radial distance `r = p / (1 + e·cos ν)` at the current true anomaly, in km.
    pub fn radius(&self) -> Kilometer {
        self.semi_latus_rectum() / (1. + self.eccentricity * self.true_anomaly.cos())
    }

    /// Eccentric anomaly matching the current true anomaly, in `[0, 2π)`.
    pub fn eccentric_anomaly(&self) -> Radian {
        let r = self.radius();
        let a = self.semi_major_axis;
        let cos_e = r * self.true_anomaly.cos() / a + self.eccentricity;
        let sin_e =
            r * self.true_anomaly.sin() / (a * (1. - self.eccentricity.powi(2)).sqrt());
        normalized_atan2(sin_e, cos_e)
    }

    /// Mean anomaly `M = E − e·sin E` matching the current true anomaly.
    pub fn mean_anomaly(&self) -> Radian {
        let ecc_anomaly = self.eccentric_anomaly();
        ecc_anomaly - self.eccentricity * ecc_anomaly.sin()
    }

    /// Gaussian vectors `(P, Q)` of the orbital plane.
    ///
    /// `P` points towards the periapsis and `Q` is `P` rotated by 90° in the direction of
    /// motion. Both are unit vectors of the inertial frame and depend only on `(Ω, ω, i)`.
    pub fn gaussian_vectors(&self) -> (Vector3<f64>, Vector3<f64>) {
        let (sin_node, cos_node) = self.ascending_node_longitude.sin_cos();
        let (sin_peri, cos_peri) = self.periapsis_argument.sin_cos();
        let (sin_i, cos_i) = self.inclination.sin_cos();

        let p = Vector3::new(
            cos_node * cos_peri - sin_node * cos_i * sin_peri,
            sin_node * cos_peri + cos_node * cos_i * sin_peri,
            sin_i * sin_peri,
        );
        let q = Vector3::new(
            -cos_node * sin_peri - sin_node * cos_i * cos_peri,
            cos_node * cos_i * cos_peri - sin_node * sin_peri,
            sin_i * cos_peri,
        );
        (p, q)
    }

    /// Position and velocity at an arbitrary eccentric anomaly, keeping `(a, e, Ω, ω, i)`.
    ///
    /// This is the reconstruction step of the Keplerian propagator: the orbital plane does
    /// not move under two-body motion, so only the position on the ellipse changes.
    ///
    /// Return
    /// ----------
    /// * `(R, V)` in km and km/s, inertial frame.
    pub fn state_at_eccentric_anomaly(&self, ecc_anomaly: Radian) -> (Vector3<f64>, Vector3<f64>) {
        let a = self.semi_major_axis;
        let e = self.eccentricity;
        let sqrt_one_minus_e2 = (1. - e.powi(2)).sqrt();
        let (sin_e, cos_e) = ecc_anomaly.sin_cos();

        let (p, q) = self.gaussian_vectors();

        let x = a * (cos_e - e);
        let y = a * sqrt_one_minus_e2 * sin_e;

        let r = a * (1. - e * cos_e);
        let sqrt_a_mu = (a * GM).sqrt();
        let x_dot = -sqrt_a_mu * sin_e / r;
        let y_dot = sqrt_a_mu * sqrt_one_minus_e2 * cos_e / r;

        (x * p + y * q, x_dot * p + y_dot * q)
    }

    /// Convert the elements back into a Cartesian state.
    ///
    /// Position is `r·cos ν·P + r·sin ν·Q`; velocity uses the eccentric-anomaly form with
    /// `cos E = r·cos ν / a + e` and `sin E = r·sin ν / (a·√(1 − e²))`.
    ///
    /// Return
    /// ----------
    /// * `(R, V)` in km and km/s, inertial frame.
    ///
    /// See also
    /// ------------
    /// * [`crate::orb_elem::cartesian_to_elements`] – the inverse conversion.
    pub fn to_state_vectors(&self) -> (Vector3<f64>, Vector3<f64>) {
        let a = self.semi_major_axis;
        let e = self.eccentricity;
        let (p, q) = self.gaussian_vectors();

        let r = self.radius();
        let x = r * self.true_anomaly.cos();
        let y = r * self.true_anomaly.sin();
        let position = x * p + y * q;

        let sqrt_one_minus_e2 = (1. - e.powi(2)).sqrt();
        let cos_e = x / a + e;
        let sin_e = y / (a * sqrt_one_minus_e2);
        let f = (a * GM).sqrt() / r;
        let velocity = -f * sin_e * p + f * sqrt_one_minus_e2 * cos_e * q;

        (position, velocity)
    }
}

impl fmt::Display for KeplerianElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rad_to_deg = 180.0 / std::f64::consts::PI;
        writeln!(f, "Keplerian Elements:")?;
        writeln!(f, "  a   = {:.6} km", self.semi_major_axis)?;
        writeln!(f, "  e   = {:.9}", self.eccentricity)?;
        writeln!(f, "  i   = {:.6}°", self.inclination * rad_to_deg)?;
        writeln!(f, "  Ω   = {:.6}°", self.ascending_node_longitude * rad_to_deg)?;
        writeln!(f, "  ω   = {:.6}°", self.periapsis_argument * rad_to_deg)?;
        write!(f, "  ν   = {:.6}°", self.true_anomaly * rad_to_deg)
    }
}
