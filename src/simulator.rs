//! # Simulator
//!
//! [`Simulator`] ties a [`SimParams`] configuration to the matching [`Propagator`] and exposes
//! the analyses of the crate on the trajectories it produces.
//!
//! ## Example
//!
//! ```rust
//! use nalgebra::Vector3;
//! use satsim::{
//!     observers::GroundStation,
//!     sim_params::{PropagationModel, SimParams},
//!     simulator::Simulator,
//!     state::State,
//! };
//!
//! let params = SimParams::builder()
//!     .step_size(60.0)
//!     .steps(1440)
//!     .model(PropagationModel::Rk4J2)
//!     .build()
//!     .unwrap();
//! let sim = Simulator::new(params);
//!
//! let initial = State::new(
//!     Vector3::new(6878.137, 0.0, 0.0),
//!     Vector3::new(0.0, 4.8, 5.9),
//!     0.0,
//! );
//! let trajectory = sim.propagate(&initial).unwrap();
//! assert_eq!(trajectory.len(), 1441);
//!
//! let stations = [GroundStation::new(51.5, -0.1, 5.0).unwrap()];
//! let passes = sim.pass_times(&trajectory, &stations).unwrap();
//! for pass in &passes {
//!     assert!(pass.duration > 0.0);
//! }
//! ```
use std::fmt;

use tracing::info;

use crate::{
    differences::{enu_differences, hcl_differences, DifferenceVector},
    observers::GroundStation,
    propagation::{propagator_for, Propagator},
    sim_errors::SimError,
    sim_params::SimParams,
    state::{State, Trajectory},
    visibility::{ground_track, scan_stations, GroundTrackPoint, PassRecord},
};

/// Configured simulation run.
pub struct Simulator {
    params: SimParams,
    propagator: Box<dyn Propagator + Send + Sync>,
}

impl Simulator {
    pub fn new(params: SimParams) -> Self {
        let propagator = propagator_for(&params);
        info!(%params, "simulator configured");
        Simulator { params, propagator }
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    /// Propagate `initial` over the configured time grid.
    ///
    /// Return
    /// ----------
    /// * An inertial trajectory of `steps + 1` samples.
    pub fn propagate(&self, initial: &State) -> Result<Trajectory, SimError> {
        self.propagator
            .propagate(initial, self.params.step_size, self.params.steps)
    }

    /// Ground track of `trajectory` with station coverage flags.
    ///
    /// Inertial trajectories are converted to the Earth-fixed frame first.
    pub fn ground_track(
        &self,
        trajectory: &Trajectory,
        stations: &[GroundStation],
    ) -> Result<Vec<GroundTrackPoint>, SimError> {
        ground_track(&trajectory.to_earth_fixed(), stations)
    }

    /// Complete passes of `trajectory` over every station, grouped by station.
    ///
    /// Inertial trajectories are converted to the Earth-fixed frame first.
    pub fn pass_times(
        &self,
        trajectory: &Trajectory,
        stations: &[GroundStation],
    ) -> Result<Vec<PassRecord>, SimError> {
        scan_stations(&trajectory.to_earth_fixed(), stations)
    }

    /// Sample-wise HCL differences between two inertial trajectories.
    pub fn compare_hcl(
        &self,
        first: &Trajectory,
        second: &Trajectory,
    ) -> Result<Vec<DifferenceVector>, SimError> {
        hcl_differences(first, second)
    }

    /// Sample-wise ENU differences between two trajectories seen from `station`.
    pub fn compare_enu(
        &self,
        first: &Trajectory,
        second: &Trajectory,
        station: &GroundStation,
    ) -> Result<Vec<DifferenceVector>, SimError> {
        enu_differences(first, second, station)
    }
}

impl fmt::Debug for Simulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulator")
            .field("params", &self.params)
            .field("propagator", &self.propagator.name())
            .finish()
    }
}
