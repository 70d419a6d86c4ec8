mod common;

use satsim::{
    observers::GroundStation,
    records::{
        read_trajectory, write_records, DifferenceRow, GroundTrackRow, PassRow, TrajectoryRow,
    },
    sim_params::SimParams,
    simulator::Simulator,
    state::Frame,
};

use common::{initial_state, leo};

#[test]
fn trajectory_survives_a_write_read_cycle() {
    let sim = Simulator::new(SimParams::builder().step_size(15.0).steps(400).build().unwrap());
    let trajectory = sim.propagate(&initial_state(&leo(), 3600.0)).unwrap();

    let mut buffer = Vec::new();
    write_records(&mut buffer, trajectory.iter().map(TrajectoryRow::from)).unwrap();

    let text = String::from_utf8(buffer).unwrap();
    assert_eq!(text.lines().count(), 401);
    assert!(text.lines().all(|line| line.split(',').count() == 7));

    let back = read_trajectory(text.as_bytes()).unwrap();
    assert_eq!(back.frame(), Frame::Inertial);
    assert_eq!(back, trajectory);
}

#[test]
fn analysis_outputs_have_one_row_each() {
    let sim = Simulator::new(SimParams::builder().step_size(30.0).steps(2880).build().unwrap());
    let trajectory = sim.propagate(&initial_state(&leo(), 0.0)).unwrap();
    let stations = [
        GroundStation::new(78.23, 15.39, 5.0).unwrap(),
        GroundStation::new(-72.0, 2.5, 5.0).unwrap(),
    ];

    let track = sim.ground_track(&trajectory, &stations).unwrap();
    let mut buffer = Vec::new();
    write_records(&mut buffer, track.iter().map(GroundTrackRow::from)).unwrap();
    let text = String::from_utf8(buffer).unwrap();
    assert_eq!(text.lines().count(), trajectory.len());
    assert!(text
        .lines()
        .all(|line| line.ends_with(",true") || line.ends_with(",false")));

    let passes = sim.pass_times(&trajectory, &stations).unwrap();
    let mut buffer = Vec::new();
    write_records(&mut buffer, passes.iter().map(PassRow::from)).unwrap();
    let rows: Vec<PassRow> = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(buffer.as_slice())
        .deserialize::<PassRow>()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(rows.len(), passes.len());
    for (row, pass) in rows.iter().zip(&passes) {
        assert_eq!(row.lat, pass.station.latitude());
        assert_eq!(row.duration, row.set - row.rise);
    }

    let hcl = sim.compare_hcl(&trajectory, &trajectory).unwrap();
    let mut buffer = Vec::new();
    write_records(&mut buffer, hcl.iter().map(DifferenceRow::from)).unwrap();
    let text = String::from_utf8(buffer).unwrap();
    assert_eq!(text.lines().count(), trajectory.len());
    assert!(text.lines().all(|line| line.split(',').count() == 4));
}
