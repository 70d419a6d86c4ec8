//! # Angle normalization
//!
//! Every angle reconstructed from a sine/cosine pair in this crate goes through one of the
//! two helpers below, so that all orbital-element angles live on the same `[0, 2π)` branch.
//!
//! Non-finite inputs (`NaN`, `±∞`) are returned as `NaN`; callers are expected to catch those
//! upstream (see [`crate::orb_elem`]).
use crate::constants::{Radian, DPI};

/// Wrap an angle into the half-open interval `[0, 2π)`.
///
/// `rem_euclid` can round up to exactly `2π` for tiny negative inputs; that value is folded
/// back onto `0`.
pub fn normalize_angle(angle: Radian) -> Radian {
    let wrapped = angle.rem_euclid(DPI);
    if wrapped >= DPI {
        0.0
    } else {
        // also turns -0.0 into 0.0
        wrapped + 0.0
    }
}

/// Quadrant-correct arctangent of `y / x` mapped into `[0, 2π)`.
///
/// Arguments
/// -----------------
/// * `y`: numerator (sine-like component).
/// * `x`: denominator (cosine-like component).
///
/// Return
/// ----------
/// * `atan2(y, x)`, shifted by `2π` when negative.
pub fn normalized_atan2(y: f64, x: f64) -> Radian {
    let mut angle = y.atan2(x);
    if angle < 0.0 {
        angle += DPI;
    }
    if angle >= DPI {
        0.0
    } else {
        angle + 0.0
    }
}
