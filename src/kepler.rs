use std::f64::consts::PI;

use crate::sim_errors::SimError;

/// Tolerance and iteration cap of the Newton solver used by [`solve_kepler`].
///
/// Units
/// -----
/// * `tolerance`: radians, bound on the residual `|E − e·sin E − M|`.
/// * `max_iterations`: hard cap on Newton steps before giving up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolverSettings {
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for KeplerSolverSettings {
    fn default() -> Self {
        KeplerSolverSettings {
            tolerance: 1e-8,
            max_iterations: 100,
        }
    }
}

/// Residual of Kepler's equation, zero at the root.
#[inline]
fn kepler_residual(ecc_anomaly: f64, eccentricity: f64, mean_anomaly: f64) -> f64 {
    ecc_anomaly - eccentricity * ecc_anomaly.sin() - mean_anomaly
}

/// Solve Kepler's equation `E − e·sin(E) = M` for the eccentric anomaly with Newton-Raphson.
///
/// The starting point is `E₀ = π` for `e > 0.8` (the iteration diverges from `E₀ = M` close to
/// the parabolic limit) and `E₀ = M` otherwise. Iterations stop once the residual is within
/// `settings.tolerance`.
///
/// Arguments
/// -----------------
/// * `eccentricity`: orbit eccentricity, expected in `[0, 1)`.
/// * `mean_anomaly`: mean anomaly in radians (any branch).
/// * `settings`: tolerance and iteration cap.
///
/// Return
/// ----------
/// * The eccentric anomaly in radians, on the same branch as `mean_anomaly`.
///
/// Errors
/// ----------
/// * [`SimError::NonConvergence`] if the cap is reached or the iterate stops being finite.
///   This is the only way out for pathological input such as `e ≥ 1`.
pub fn solve_kepler(
    eccentricity: f64,
    mean_anomaly: f64,
    settings: &KeplerSolverSettings,
) -> Result<f64, SimError> {
    let mut ecc_anomaly = if eccentricity > 0.8 { PI } else { mean_anomaly };

    for _ in 0..settings.max_iterations {
        let residual = kepler_residual(ecc_anomaly, eccentricity, mean_anomaly);
        if residual.abs() <= settings.tolerance {
            return Ok(ecc_anomaly);
        }
        ecc_anomaly -= residual / (1.0 - eccentricity * ecc_anomaly.cos());
        if !ecc_anomaly.is_finite() {
            break;
        }
    }

    // the last Newton step may have landed on the root
    if ecc_anomaly.is_finite()
        && kepler_residual(ecc_anomaly, eccentricity, mean_anomaly).abs() <= settings.tolerance
    {
        return Ok(ecc_anomaly);
    }

    Err(SimError::NonConvergence {
        eccentricity,
        mean_anomaly,
        iterations: settings.max_iterations,
    })
}
