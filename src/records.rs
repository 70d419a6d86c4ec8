//! # Flat records
//!
//! Results leave the simulator as header-less, comma-separated rows:
//!
//! | Row | Columns |
//! |---|---|
//! | [`TrajectoryRow`] | `rx, ry, rz, vx, vy, vz, t` |
//! | [`GroundTrackRow`] | `lat, lon, height, visible` |
//! | [`PassRow`] | `lat, lon, rise, set, duration, elevation, azimuth` |
//! | [`DifferenceRow`] | `t, d1, d2, d3` |
//!
//! Every row type derives `serde::{Serialize, Deserialize}` and converts from the matching
//! in-memory result, so a run can be persisted with [`write_records`]:
//!
//! ```rust
//! use nalgebra::Vector3;
//! use satsim::{
//!     records::{read_trajectory, write_records, TrajectoryRow},
//!     state::{Frame, State, Trajectory},
//! };
//!
//! let traj = Trajectory::new(
//!     Frame::Inertial,
//!     vec![State::new(Vector3::new(7000.0, 0.0, 0.0), Vector3::new(0.0, 7.5, 0.0), 0.0)],
//! )
//! .unwrap();
//!
//! let mut buffer = Vec::new();
//! write_records(&mut buffer, traj.iter().map(TrajectoryRow::from)).unwrap();
//! assert_eq!(String::from_utf8(buffer.clone()).unwrap(), "7000.0,0.0,0.0,0.0,7.5,0.0,0.0\n");
//!
//! assert_eq!(read_trajectory(buffer.as_slice()).unwrap(), traj);
//! ```
use std::io;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::{
    constants::{Degree, Kilometer, Seconds},
    differences::DifferenceVector,
    sim_errors::SimError,
    state::{Frame, State, Trajectory},
    visibility::{GroundTrackPoint, PassRecord},
};

/// Inertial state sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryRow {
    pub rx: Kilometer,
    pub ry: Kilometer,
    pub rz: Kilometer,
    pub vx: f64,
    pub vy: f64,
    pub vz: f64,
    pub t: Seconds,
}

impl From<&State> for TrajectoryRow {
    fn from(state: &State) -> Self {
        TrajectoryRow {
            rx: state.position.x,
            ry: state.position.y,
            rz: state.position.z,
            vx: state.velocity.x,
            vy: state.velocity.y,
            vz: state.velocity.z,
            t: state.epoch,
        }
    }
}

impl From<TrajectoryRow> for State {
    fn from(row: TrajectoryRow) -> Self {
        State::new(
            Vector3::new(row.rx, row.ry, row.rz),
            Vector3::new(row.vx, row.vy, row.vz),
            row.t,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundTrackRow {
    pub lat: Degree,
    pub lon: Degree,
    pub height: Kilometer,
    pub visible: bool,
}

impl From<&GroundTrackPoint> for GroundTrackRow {
    fn from(point: &GroundTrackPoint) -> Self {
        GroundTrackRow {
            lat: point.geodetic.latitude,
            lon: point.geodetic.longitude,
            height: point.geodetic.height,
            visible: point.visible,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PassRow {
    pub lat: Degree,
    pub lon: Degree,
    pub rise: Seconds,
    pub set: Seconds,
    pub duration: Seconds,
    pub elevation: Degree,
    pub azimuth: Degree,
}

impl From<&PassRecord> for PassRow {
    fn from(pass: &PassRecord) -> Self {
        PassRow {
            lat: pass.station.latitude(),
            lon: pass.station.longitude(),
            rise: pass.rise_time,
            set: pass.set_time,
            duration: pass.duration,
            elevation: pass.rise_elevation,
            azimuth: pass.rise_azimuth,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifferenceRow {
    pub t: Seconds,
    pub d1: Kilometer,
    pub d2: Kilometer,
    pub d3: Kilometer,
}

impl From<&DifferenceVector> for DifferenceRow {
    fn from(diff: &DifferenceVector) -> Self {
        DifferenceRow {
            t: diff.epoch,
            d1: diff.components.x,
            d2: diff.components.y,
            d3: diff.components.z,
        }
    }
}

/// Write `rows` as header-less comma-separated records.
///
/// Errors
/// ----------
/// * [`SimError::CsvError`] if a row cannot be serialized or written.
/// * [`SimError::IoError`] if the final flush fails.
pub fn write_records<W, R, I>(writer: W, rows: I) -> Result<(), SimError>
where
    W: io::Write,
    R: Serialize,
    I: IntoIterator<Item = R>,
{
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Read trajectory rows back into an inertial [`Trajectory`].
///
/// Fields may be surrounded by whitespace.
///
/// Errors
/// ----------
/// * [`SimError::CsvError`] for malformed rows.
/// * [`SimError::EmptyTrajectory`] / [`SimError::NonMonotonicTrajectory`] if the rows do not
///   form a valid trajectory.
pub fn read_trajectory<R: io::Read>(reader: R) -> Result<Trajectory, SimError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let states = csv_reader
        .deserialize::<TrajectoryRow>()
        .map(|row| row.map(State::from))
        .collect::<Result<Vec<_>, csv::Error>>()?;

    Trajectory::new(Frame::Inertial, states)
}
