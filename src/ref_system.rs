//! # Reference frames
//!
//! Conversions between the frames used by the simulator:
//!
//! | Frame | Representation |
//! |---|---|
//! | Inertial (ECI) | Cartesian km / km·s⁻¹, J2000 axes |
//! | Earth-fixed (ECEF) | Cartesian km / km·s⁻¹, rotating with the Earth |
//! | Geodetic | latitude / longitude in degrees, height in km |
//! | Topocentric (ENU) | East / North / Up unit vectors at a surface point |
//!
//! ## Model
//!
//! - The inertial and Earth-fixed frames differ by a single rotation about the polar axis by
//!   the sidereal angle [`crate::time::gast`]. Precession, nutation and polar motion are not
//!   modelled.
//! - The Earth is a sphere of radius [`EARTH_RADIUS`]: latitudes are geocentric and heights are
//!   measured from that sphere.
use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::{
    angles::normalized_atan2,
    constants::{Degree, Kilometer, Seconds, EARTH_RADIUS, EARTH_ROTATION_RATE, RADEG},
    state::State,
    time::gast,
};

/// Coordinate axis of an elementary rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Rotation matrix of angle `alpha` (radians) about a coordinate axis.
///
/// The rotation is **active**: it turns a vector within a fixed frame. A change of basis by
/// `alpha` is therefore `rotmt(-alpha, axis)`.
///
/// The returned matrix is orthonormal, so its transpose is its inverse.
pub fn rotmt(alpha: f64, axis: Axis) -> Matrix3<f64> {
    let axis = match axis {
        Axis::X => Vector3::x_axis(),
        Axis::Y => Vector3::y_axis(),
        Axis::Z => Vector3::z_axis(),
    };
    Rotation3::from_axis_angle(&axis, alpha).into()
}

/// Rotation taking inertial coordinates to Earth-fixed coordinates at time `t`.
pub fn inertial_to_earth_fixed_matrix(t: Seconds) -> Matrix3<f64> {
    rotmt(-gast(t), Axis::Z)
}

/// Express an inertial position/velocity pair in the Earth-fixed frame at time `t`.
///
/// The position is rotated by the sidereal angle. The velocity is rotated and then corrected
/// for the frame rotation, `V_ecef = Rot·V − ω⊕ × R_ecef`.
///
/// Arguments
/// -----------------
/// * `position`: inertial position in km.
/// * `velocity`: inertial velocity in km/s.
/// * `t`: seconds since J2000.0.
///
/// Return
/// ----------
/// * `(R_ecef, V_ecef)` in km and km/s.
///
/// See also
/// ------------
/// * [`earth_fixed_to_inertial_vectors`] – the exact inverse.
pub fn inertial_to_earth_fixed_vectors(
    position: &Vector3<f64>,
    velocity: &Vector3<f64>,
    t: Seconds,
) -> (Vector3<f64>, Vector3<f64>) {
    let rot = inertial_to_earth_fixed_matrix(t);
    let position_ecef = rot * position;
    let velocity_ecef = rot * velocity - earth_rotation_vector().cross(&position_ecef);
    (position_ecef, velocity_ecef)
}

/// Express an Earth-fixed position/velocity pair in the inertial frame at time `t`.
pub fn earth_fixed_to_inertial_vectors(
    position: &Vector3<f64>,
    velocity: &Vector3<f64>,
    t: Seconds,
) -> (Vector3<f64>, Vector3<f64>) {
    let rot_t = inertial_to_earth_fixed_matrix(t).transpose();
    let inertial_velocity = velocity + earth_rotation_vector().cross(position);
    (rot_t * position, rot_t * inertial_velocity)
}

/// [`inertial_to_earth_fixed_vectors`] applied to a state at its own epoch.
pub fn inertial_to_earth_fixed(state: &State) -> State {
    let (position, velocity) =
        inertial_to_earth_fixed_vectors(&state.position, &state.velocity, state.epoch);
    State::new(position, velocity, state.epoch)
}

/// [`earth_fixed_to_inertial_vectors`] applied to a state at its own epoch.
pub fn earth_fixed_to_inertial(state: &State) -> State {
    let (position, velocity) =
        earth_fixed_to_inertial_vectors(&state.position, &state.velocity, state.epoch);
    State::new(position, velocity, state.epoch)
}

fn earth_rotation_vector() -> Vector3<f64> {
    Vector3::new(0.0, 0.0, EARTH_ROTATION_RATE)
}

/// Spherical geodetic coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geodetic {
    /// Geocentric latitude in degrees, `[-90, 90]`
    pub latitude: Degree,
    /// Longitude in degrees, `(-180, 180]`
    pub longitude: Degree,
    /// Height above the spherical Earth in km
    pub height: Kilometer,
}

impl Geodetic {
    /// Earth-fixed position of this point, `(R⊕ + h)·U(φ, λ)`.
    pub fn to_earth_fixed(&self) -> Vector3<f64> {
        (EARTH_RADIUS + self.height) * EnuBasis::new(self.latitude, self.longitude).up
    }
}

/// Geodetic coordinates of an Earth-fixed position.
///
/// The longitude comes from a `[0, 2π)` arctangent and is folded into `(-180°, 180°]`.
pub fn earth_fixed_to_geodetic(position: &Vector3<f64>) -> Geodetic {
    let mut longitude = normalized_atan2(position.y, position.x) / RADEG;
    if longitude > 180.0 {
        longitude -= 360.0;
    }
    let latitude = position.z.atan2(position.x.hypot(position.y)) / RADEG;
    Geodetic {
        latitude,
        longitude,
        height: position.norm() - EARTH_RADIUS,
    }
}

/// Earth-fixed position of a point on the surface of the spherical Earth.
pub fn geodetic_to_earth_fixed(latitude: Degree, longitude: Degree) -> Vector3<f64> {
    EARTH_RADIUS * EnuBasis::new(latitude, longitude).up
}

/// Local East-North-Up triad at a surface point, expressed in the Earth-fixed frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnuBasis {
    pub east: Vector3<f64>,
    pub north: Vector3<f64>,
    pub up: Vector3<f64>,
}

impl EnuBasis {
    /// Build the triad at latitude `φ` and longitude `λ`, both in degrees.
    pub fn new(latitude: Degree, longitude: Degree) -> Self {
        let (sin_lat, cos_lat) = (latitude * RADEG).sin_cos();
        let (sin_lon, cos_lon) = (longitude * RADEG).sin_cos();
        EnuBasis {
            east: Vector3::new(-sin_lon, cos_lon, 0.0),
            north: Vector3::new(-cos_lon * sin_lat, -sin_lon * sin_lat, cos_lat),
            up: Vector3::new(cos_lon * cos_lat, sin_lon * cos_lat, sin_lat),
        }
    }

    /// Components `(e, n, u)` of an Earth-fixed vector in this basis.
    pub fn project(&self, vector: &Vector3<f64>) -> Vector3<f64> {
        Vector3::new(
            self.east.dot(vector),
            self.north.dot(vector),
            self.up.dot(vector),
        )
    }
}
