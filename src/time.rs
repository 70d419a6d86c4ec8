//! # Simulation time
//!
//! The simulator measures time as **seconds since J2000.0** (2000-01-01T12:00:00, taken in UTC).
//! This is also the reference epoch of the sidereal angle used to rotate the inertial frame
//! into the Earth-fixed one.
//!
//! Calendar handling (parsing, leap seconds, MJD) is delegated to `hifitime`.
use std::str::FromStr;

use hifitime::{Duration, Epoch};

use crate::{
    angles::normalize_angle,
    constants::{Radian, Seconds, GAST_J2000, GAST_RATE, MJD, RADEG, SECONDS_PER_DAY, T2000},
    sim_errors::SimError,
};

/// The J2000.0 reference epoch as a `hifitime` [`Epoch`] (UTC).
pub fn j2000_epoch() -> Epoch {
    Epoch::from_mjd_utc(T2000)
}

/// Convert a calendar epoch into simulation seconds since J2000.0.
///
/// Leap seconds between J2000.0 and `epoch` are counted, so this is elapsed SI seconds.
pub fn epoch_to_seconds(epoch: &Epoch) -> Seconds {
    (*epoch - j2000_epoch()).to_seconds()
}

/// Inverse of [`epoch_to_seconds`].
pub fn seconds_to_epoch(seconds: Seconds) -> Epoch {
    j2000_epoch() + Duration::from_seconds(seconds)
}

/// Parse an ISO 8601 / RFC 3339 date (e.g. `2024-03-01T06:00:00 UTC`) into simulation seconds.
///
/// Errors
/// ----------
/// * [`SimError::InvalidSimParameter`] if `hifitime` cannot parse the string.
pub fn parse_epoch(date: &str) -> Result<Seconds, SimError> {
    let epoch = Epoch::from_str(date)
        .map_err(|e| SimError::InvalidSimParameter(format!("invalid epoch {date:?}: {e}")))?;
    Ok(epoch_to_seconds(&epoch))
}

/// Modified Julian Date (UTC) of a simulation time.
pub fn seconds_to_mjd(seconds: Seconds) -> MJD {
    seconds_to_epoch(seconds).to_mjd_utc_days()
}

/// Greenwich sidereal angle Θ at a simulation time, in radians within `[0, 2π)`.
///
/// Linear model `Θ = 280.4606° + 360.9856473662° · d`, with `d` the number of days since
/// J2000.0. Nutation and polar motion are ignored.
///
/// Arguments
/// -----------------
/// * `t`: seconds since J2000.0.
///
/// Return
/// ----------
/// * The rotation angle from the inertial frame to the Earth-fixed frame.
pub fn gast(t: Seconds) -> Radian {
    let days = t / SECONDS_PER_DAY;
    let degrees = (GAST_J2000 + GAST_RATE * days).rem_euclid(360.0);
    normalize_angle(degrees * RADEG)
}

/// Sample times `t0, t0 + h, …, t0 + steps·h` of a fixed-step propagation.
///
/// Each time is computed as `t0 + k·h` rather than accumulated, so no drift builds up over long
/// horizons.
pub fn time_grid(t0: Seconds, step: Seconds, steps: usize) -> Vec<Seconds> {
    (0..=steps).map(|k| t0 + k as f64 * step).collect()
}
