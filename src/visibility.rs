//! # Visibility analysis
//!
//! Line-of-sight geometry between a satellite and [`GroundStation`]s, all in the Earth-fixed
//! frame.
//!
//! ## Overview
//!
//! For a satellite at `R` and a station at `Rp`, the unit line of sight `ρ̂ = (R − Rp)/|R − Rp|`
//! is projected on the station's East/North/Up basis, giving `(e, n, u)`. Then
//!
//! ```text
//! elevation = asin(u)            (degrees)
//! azimuth   = atan2(e, n) in [0°, 360°), clockwise from North
//! visible  <=> elevation − mask > 0
//! ```
//!
//! Visibility is a **strict** inequality: a satellite exactly at the masking angle is hidden.
//!
//! ## Pass scanning
//!
//! [`scan_passes`] walks a trajectory once with a two-state machine (hidden / visible):
//!
//! * a hidden → visible transition opens a pass at that sample (rise time, rise elevation and
//!   azimuth),
//! * a visible → hidden transition closes it at that sample (set time).
//!
//! A pass already in progress at the first sample, or still in progress at the last one, is
//! **not** reported: no rise or set is synthesized at the ends of the window.
//!
//! [`scan_stations`] runs the scan for many stations in parallel with `rayon`.
use itertools::Itertools;
use nalgebra::Vector3;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::{
    angles::normalized_atan2,
    constants::{Degree, Seconds, RADEG},
    observers::GroundStation,
    ref_system::{earth_fixed_to_geodetic, Geodetic},
    sim_errors::SimError,
    state::{Frame, Trajectory},
};

/// Direction of a satellite as seen from a station.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookAngles {
    /// Elevation above the local horizon in degrees, `[-90, 90]`
    pub elevation: Degree,
    /// Azimuth in degrees clockwise from North, `[0, 360)`
    pub azimuth: Degree,
}

/// Look angles of an Earth-fixed satellite position from `station`.
///
/// A satellite coincident with the station is reported at the zenith (elevation 90°, azimuth 0°).
pub fn look_angles(satellite: &Vector3<f64>, station: &GroundStation) -> LookAngles {
    let line_of_sight = satellite - station.earth_fixed_position();
    let Some(direction) = line_of_sight.try_normalize(0.0) else {
        return LookAngles {
            elevation: 90.0,
            azimuth: 0.0,
        };
    };

    let enu = station.enu_basis().project(&direction);
    LookAngles {
        elevation: enu.z.clamp(-1.0, 1.0).asin() / RADEG,
        azimuth: normalized_atan2(enu.x, enu.y) / RADEG,
    }
}

/// Is the satellite strictly above the station's masking angle?
pub fn is_visible(satellite: &Vector3<f64>, station: &GroundStation) -> bool {
    look_angles(satellite, station).elevation - station.masking_angle() > 0.0
}

/// Is the satellite visible from at least one of `stations`?
///
/// An empty station list sees nothing.
pub fn visible_from_any(satellite: &Vector3<f64>, stations: &[GroundStation]) -> bool {
    stations.iter().any(|station| is_visible(satellite, station))
}

/// One complete pass of a satellite over a station.
#[derive(Debug, Clone, PartialEq)]
pub struct PassRecord {
    pub station: GroundStation,
    /// Epoch of the first visible sample
    pub rise_time: Seconds,
    /// Epoch of the first hidden sample after the rise
    pub set_time: Seconds,
    /// `set_time − rise_time`
    pub duration: Seconds,
    pub rise_elevation: Degree,
    pub rise_azimuth: Degree,
}

/// Find the complete passes of an Earth-fixed trajectory over `station`.
///
/// Return
/// ----------
/// * The passes in chronological order. Passes cut by either end of the trajectory are dropped.
///
/// Errors
/// ----------
/// * [`SimError::FrameMismatch`] if the trajectory is not Earth-fixed.
pub fn scan_passes(
    trajectory: &Trajectory,
    station: &GroundStation,
) -> Result<Vec<PassRecord>, SimError> {
    trajectory.require_frame(Frame::EarthFixed)?;

    let mut passes = Vec::new();
    let mut visible = is_visible(&trajectory.first().position, station);
    let mut rise: Option<(Seconds, LookAngles)> = None;

    for state in trajectory.iter().skip(1) {
        let angles = look_angles(&state.position, station);
        let now_visible = angles.elevation - station.masking_angle() > 0.0;

        match (visible, now_visible) {
            (false, true) => rise = Some((state.epoch, angles)),
            (true, false) => {
                if let Some((rise_time, at_rise)) = rise.take() {
                    let pass = PassRecord {
                        station: station.clone(),
                        rise_time,
                        set_time: state.epoch,
                        duration: state.epoch - rise_time,
                        rise_elevation: at_rise.elevation,
                        rise_azimuth: at_rise.azimuth,
                    };
                    debug!(
                        %station,
                        rise = pass.rise_time,
                        set = pass.set_time,
                        duration = pass.duration,
                        "pass recorded"
                    );
                    passes.push(pass);
                }
            }
            _ => {}
        }
        visible = now_visible;
    }

    Ok(passes)
}

/// Scan every station against the same trajectory, in parallel.
///
/// Return
/// ----------
/// * All passes grouped by station, in the order of `stations`, each group chronological.
///
/// Errors
/// ----------
/// * [`SimError::FrameMismatch`] if the trajectory is not Earth-fixed.
pub fn scan_stations(
    trajectory: &Trajectory,
    stations: &[GroundStation],
) -> Result<Vec<PassRecord>, SimError> {
    trajectory.require_frame(Frame::EarthFixed)?;

    let per_station = stations
        .par_iter()
        .map(|station| scan_passes(trajectory, station))
        .collect::<Result<Vec<_>, SimError>>()?;

    let passes = per_station.into_iter().flatten().collect_vec();
    info!(
        stations = stations.len(),
        samples = trajectory.len(),
        passes = passes.len(),
        "station sweep finished"
    );
    Ok(passes)
}

/// Sub-satellite point of one trajectory sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundTrackPoint {
    pub epoch: Seconds,
    pub geodetic: Geodetic,
    /// Visible from at least one station at this epoch
    pub visible: bool,
}

/// Ground track of an Earth-fixed trajectory, flagged with station coverage.
///
/// Errors
/// ----------
/// * [`SimError::FrameMismatch`] if the trajectory is not Earth-fixed.
pub fn ground_track(
    trajectory: &Trajectory,
    stations: &[GroundStation],
) -> Result<Vec<GroundTrackPoint>, SimError> {
    trajectory.require_frame(Frame::EarthFixed)?;

    Ok(trajectory
        .iter()
        .map(|state| GroundTrackPoint {
            epoch: state.epoch,
            geodetic: earth_fixed_to_geodetic(&state.position),
            visible: visible_from_any(&state.position, stations),
        })
        .collect())
}
