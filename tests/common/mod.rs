#![allow(dead_code)]

use nalgebra::Vector3;
use satsim::{
    constants::{Seconds, RADEG},
    keplerian_element::KeplerianElements,
    observers::GroundStation,
    state::{Frame, State, Trajectory},
};

pub fn leo() -> KeplerianElements {
    KeplerianElements {
        semi_major_axis: 6878.137,
        eccentricity: 0.001,
        inclination: 97.4 * RADEG,
        ascending_node_longitude: 0.3,
        periapsis_argument: 1.1,
        true_anomaly: 0.5,
    }
}

pub fn initial_state(kep: &KeplerianElements, epoch: Seconds) -> State {
    let (position, velocity) = kep.to_state_vectors();
    State::new(position, velocity, epoch)
}

pub fn assert_vector_close(actual: &Vector3<f64>, expected: &Vector3<f64>, epsilon: f64) {
    let diff = (actual - expected).norm();
    assert!(
        diff <= epsilon,
        "|{actual:?} - {expected:?}| = {diff} > {epsilon}"
    );
}

/// Earth-fixed position seen from `station` at `elevation` and `azimuth` (degrees), `range` km
/// away.
pub fn position_at(
    station: &GroundStation,
    elevation: f64,
    azimuth: f64,
    range: f64,
) -> Vector3<f64> {
    let enu = station.enu_basis();
    let (sin_el, cos_el) = (elevation * RADEG).sin_cos();
    let (sin_az, cos_az) = (azimuth * RADEG).sin_cos();
    let direction = cos_el * (sin_az * enu.east + cos_az * enu.north) + sin_el * enu.up;
    station.earth_fixed_position() + range * direction
}

/// Earth-fixed trajectory sampled every `step` seconds, one position per sample.
pub fn earth_fixed_track(positions: &[Vector3<f64>], step: Seconds) -> Trajectory {
    let states = positions
        .iter()
        .enumerate()
        .map(|(k, r)| State::new(*r, Vector3::zeros(), k as f64 * step))
        .collect();
    Trajectory::new(Frame::EarthFixed, states).unwrap()
}
