//! # Ground stations
//!
//! A [`GroundStation`] is a point on the surface of the (spherical) Earth from which a satellite
//! is tracked, together with the masking angle below which the satellite is considered hidden.
//!
//! ## Overview
//!
//! - Sites are given by **geocentric latitude** and **longitude** in degrees (east positive),
//!   and sit on the sphere of radius [`EARTH_RADIUS`](crate::constants::EARTH_RADIUS).
//! - The **masking angle** (degrees) is the minimum elevation above the local horizon for a
//!   satellite to count as visible. It may be negative for a site on a mountain top.
//! - The site's Earth-fixed position and its topocentric East/North/Up basis are derived on
//!   demand with [`GroundStation::earth_fixed_position`] and [`GroundStation::enu_basis`].
//!
//! ## Validation
//!
//! `NotNan<f64>` is used for every field, so a station can never hold a NaN coordinate and can
//! be hashed or used as a map key. [`GroundStation::new`] additionally checks
//!
//! - `latitude ∈ [-90, 90]`,
//! - `longitude ∈ (-180, 180]`,
//! - `masking_angle` finite and in `[-90, 90]`,
//!
//! and returns [`SimError::InvalidStation`] otherwise.
//!
//! ## Example
//!
//! ```rust
//! use satsim::observers::GroundStation;
//!
//! let london = GroundStation::new(51.5, -0.1, 5.0).unwrap();
//! assert_eq!(london.latitude(), 51.5);
//!
//! assert!(GroundStation::new(91.0, 0.0, 5.0).is_err());
//! ```
//!
//! ## See also
//! ------------
//! * [`crate::visibility`] – Look angles, pass scans and station sweeps.
//! * [`crate::differences::enu_difference`] – Trajectory differences in a station's frame.
//! * [`crate::ref_system::EnuBasis`] – Topocentric basis used by the station.
use std::fmt;

use nalgebra::Vector3;
use ordered_float::NotNan;

use crate::{
    constants::Degree,
    ref_system::{geodetic_to_earth_fixed, EnuBasis},
    sim_errors::SimError,
};

/// Ground station on a spherical Earth.
///
/// Units
/// -----
/// * `latitude`, `longitude`, `masking_angle`: degrees.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct GroundStation {
    latitude: NotNan<f64>,
    longitude: NotNan<f64>,
    masking_angle: NotNan<f64>,

    /// Optional human-readable site name.
    pub name: Option<String>,
}

impl GroundStation {
    /// Create a new station.
    ///
    /// Arguments
    /// -----------------
    /// * `latitude`: Geocentric latitude in **degrees**, in `[-90, 90]`.
    /// * `longitude`: Longitude in **degrees** east of Greenwich, in `(-180, 180]`.
    /// * `masking_angle`: Minimum visible elevation in **degrees**, in `[-90, 90]`.
    ///
    /// Errors
    /// ----------
    /// * [`SimError::InvalidStation`] if a value is NaN, infinite or out of range.
    pub fn new(
        latitude: Degree,
        longitude: Degree,
        masking_angle: Degree,
    ) -> Result<Self, SimError> {
        let latitude = checked("latitude", latitude)?;
        let longitude = checked("longitude", longitude)?;
        let masking_angle = checked("masking angle", masking_angle)?;

        if !(-90.0..=90.0).contains(&latitude.into_inner()) {
            return Err(SimError::InvalidStation(format!(
                "latitude {latitude}° outside [-90, 90]"
            )));
        }
        if !(longitude.into_inner() > -180.0 && longitude.into_inner() <= 180.0) {
            return Err(SimError::InvalidStation(format!(
                "longitude {longitude}° outside (-180, 180]"
            )));
        }
        if !(-90.0..=90.0).contains(&masking_angle.into_inner()) {
            return Err(SimError::InvalidStation(format!(
                "masking angle {masking_angle}° outside [-90, 90]"
            )));
        }

        Ok(GroundStation {
            latitude,
            longitude,
            masking_angle,
            name: None,
        })
    }

    /// Attach a site name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn latitude(&self) -> Degree {
        self.latitude.into_inner()
    }

    pub fn longitude(&self) -> Degree {
        self.longitude.into_inner()
    }

    pub fn masking_angle(&self) -> Degree {
        self.masking_angle.into_inner()
    }

    /// Earth-fixed position of the site in km.
    pub fn earth_fixed_position(&self) -> Vector3<f64> {
        geodetic_to_earth_fixed(self.latitude(), self.longitude())
    }

    /// Local East/North/Up basis at the site.
    pub fn enu_basis(&self) -> EnuBasis {
        EnuBasis::new(self.latitude(), self.longitude())
    }
}

impl fmt::Display for GroundStation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name.as_deref().unwrap_or("station");
        write!(
            f,
            "{name} (lat = {:.4}°, lon = {:.4}°, mask = {:.2}°)",
            self.latitude(),
            self.longitude(),
            self.masking_angle()
        )
    }
}

fn checked(field: &str, value: f64) -> Result<NotNan<f64>, SimError> {
    if !value.is_finite() {
        return Err(SimError::InvalidStation(format!(
            "{field} must be finite, got {value}"
        )));
    }
    NotNan::new(value).map_err(|_| SimError::InvalidStation(format!("{field} is NaN")))
}

#[cfg(test)]
mod observers_test {
    use super::*;
    use crate::constants::EARTH_RADIUS;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_station() {
        let station = GroundStation::new(51.5, -0.1, 5.0).unwrap();
        assert_eq!(station.latitude(), 51.5);
        assert_eq!(station.longitude(), -0.1);
        assert_eq!(station.masking_angle(), 5.0);
        assert_eq!(station.name, None);

        let named = station.clone().with_name("London");
        assert_eq!(named.name.as_deref(), Some("London"));
        assert_ne!(named, station);
    }

    #[test]
    fn test_station_validation() {
        for (lat, lon, mask) in [
            (90.5, 0.0, 0.0),
            (-91.0, 0.0, 0.0),
            (0.0, -180.0, 0.0),
            (0.0, 180.1, 0.0),
            (0.0, 0.0, 95.0),
            (f64::NAN, 0.0, 0.0),
            (0.0, f64::NAN, 0.0),
            (0.0, 0.0, f64::INFINITY),
        ] {
            assert!(
                matches!(
                    GroundStation::new(lat, lon, mask),
                    Err(SimError::InvalidStation(_))
                ),
                "({lat}, {lon}, {mask}) should be rejected"
            );
        }

        assert!(GroundStation::new(90.0, 180.0, -2.0).is_ok());
        assert!(GroundStation::new(-90.0, -179.9, 90.0).is_ok());
    }

    #[test]
    fn test_earth_fixed_position() {
        let station = GroundStation::new(0.0, 90.0, 0.0).unwrap();
        let r = station.earth_fixed_position();
        assert_relative_eq!(r.norm(), EARTH_RADIUS, max_relative = 1e-14);
        assert!(r.x.abs() < 1e-9);
        assert_relative_eq!(r.y, EARTH_RADIUS, max_relative = 1e-14);

        // the local up vector is the radial direction
        let up = station.enu_basis().up;
        assert!((up - r.normalize()).norm() < 1e-14);
    }

    #[test]
    fn test_display() {
        let station = GroundStation::new(51.5, -0.1, 5.0).unwrap().with_name("London");
        assert_eq!(
            station.to_string(),
            "London (lat = 51.5000°, lon = -0.1000°, mask = 5.00°)"
        );
    }

    #[test]
    fn test_hash_as_key() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(GroundStation::new(10.0, 20.0, 5.0).unwrap());
        set.insert(GroundStation::new(10.0, 20.0, 5.0).unwrap());
        set.insert(GroundStation::new(10.0, 21.0, 5.0).unwrap());
        assert_eq!(set.len(), 2);
    }
}
