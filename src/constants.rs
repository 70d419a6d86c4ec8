//! # Constants and type definitions for satsim
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **common type
//! aliases** used throughout the `satsim` library.
//!
//! ## Overview
//!
//! - Geophysical constants (gravitational parameter, Earth radius, rotation rate)
//! - Gravity field coefficients used by the J2 acceleration model
//! - Unit conversions (degrees ↔ radians, days ↔ seconds)
//! - Core type aliases used across the crate
//!
//! All distances are expressed in **kilometers**, velocities in **km/s** and times in
//! **seconds since J2000.0** unless stated otherwise.

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// MJD epoch of J2000.0 (2000-01-01 12:00:00)
pub const T2000: f64 = 51544.5;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Earth gravitational parameter μ in km³/s²
pub const GM: f64 = 398_600.4418;

/// Spherical Earth radius in kilometers, used for geodetic heights and station placement
pub const EARTH_RADIUS: f64 = 6378.137;

/// Earth rotation rate in rad/s
pub const EARTH_ROTATION_RATE: f64 = 7.292_115_855_3e-5;

/// Normalized C20 zonal coefficient of the EGM96 gravity model
pub const C20: f64 = -4.841_653_717_36e-4;

/// Reference equatorial radius of the EGM96 gravity model in kilometers
pub const AEGMA96: f64 = 6378.1363;

/// Greenwich sidereal angle at J2000.0, in degrees
pub const GAST_J2000: f64 = 280.4606;

/// Greenwich sidereal angle rate, in degrees per day
pub const GAST_RATE: f64 = 360.985_647_366_2;

/// Numerical epsilon used for floating-point comparisons of epochs (seconds)
pub const EPOCH_EPS: f64 = 1e-6;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Time in seconds since J2000.0
pub type Seconds = f64;
/// Modified Julian Date (days)
pub type MJD = f64;
