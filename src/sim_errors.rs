use thiserror::Error;

use crate::state::Frame;

#[derive(Error, Debug)]
pub enum SimError {
    #[error(
        "Kepler solver did not converge (e = {eccentricity}, M = {mean_anomaly}) after {iterations} iterations"
    )]
    NonConvergence {
        eccentricity: f64,
        mean_anomaly: f64,
        iterations: usize,
    },

    #[error("Degenerate orbit: {0}")]
    DegenerateOrbit(String),

    #[error("Trajectories have mismatched lengths: {left} vs {right}")]
    MismatchedTrajectoryLength { left: usize, right: usize },

    #[error("Trajectories are not sampled at the same epochs at index {index}: {left} vs {right}")]
    MisalignedEpochs { index: usize, left: f64, right: f64 },

    #[error("Trajectory is expressed in the {found:?} frame, expected {expected:?}")]
    FrameMismatch { expected: Frame, found: Frame },

    #[error("Trajectory epochs must be strictly increasing (violated at index {0})")]
    NonMonotonicTrajectory(usize),

    #[error("Trajectory has no samples")]
    EmptyTrajectory,

    #[error("Invalid simulation parameter: {0}")]
    InvalidSimParameter(String),

    #[error("Invalid ground station: {0}")]
    InvalidStation(String),

    #[error("Unknown propagation model: {0}")]
    InvalidPropagationModel(String),

    #[error("Unable to read or write delimited records: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),
}

impl PartialEq for SimError {
    fn eq(&self, other: &Self) -> bool {
        use SimError::*;
        match (self, other) {
            (
                NonConvergence {
                    eccentricity: e1,
                    mean_anomaly: m1,
                    iterations: i1,
                },
                NonConvergence {
                    eccentricity: e2,
                    mean_anomaly: m2,
                    iterations: i2,
                },
            ) => e1 == e2 && m1 == m2 && i1 == i2,
            (DegenerateOrbit(a), DegenerateOrbit(b)) => a == b,
            (
                MismatchedTrajectoryLength { left: l1, right: r1 },
                MismatchedTrajectoryLength { left: l2, right: r2 },
            ) => l1 == l2 && r1 == r2,
            (
                MisalignedEpochs {
                    index: i1,
                    left: l1,
                    right: r1,
                },
                MisalignedEpochs {
                    index: i2,
                    left: l2,
                    right: r2,
                },
            ) => i1 == i2 && l1 == l2 && r1 == r2,
            (
                FrameMismatch {
                    expected: e1,
                    found: f1,
                },
                FrameMismatch {
                    expected: e2,
                    found: f2,
                },
            ) => e1 == e2 && f1 == f2,
            (NonMonotonicTrajectory(a), NonMonotonicTrajectory(b)) => a == b,
            (InvalidSimParameter(a), InvalidSimParameter(b)) => a == b,
            (InvalidStation(a), InvalidStation(b)) => a == b,
            (InvalidPropagationModel(a), InvalidPropagationModel(b)) => a == b,

            // not comparable: same variant is enough
            (CsvError(_), CsvError(_)) => true,
            (IoError(_), IoError(_)) => true,

            (EmptyTrajectory, EmptyTrajectory) => true,

            _ => false,
        }
    }
}
