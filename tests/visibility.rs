mod common;

use approx::assert_abs_diff_eq;
use nalgebra::Vector3;

use satsim::{
    observers::GroundStation,
    sim_params::{PropagationModel, SimParams},
    simulator::Simulator,
    visibility::{is_visible, look_angles, scan_passes, scan_stations},
};

use common::{earth_fixed_track, initial_state, leo, position_at};

#[test]
fn single_pass_scenario() {
    let station = GroundStation::new(51.5, -0.1, 5.0).unwrap();
    let positions: Vec<Vector3<f64>> = (0..60)
        .map(|k| {
            let elevation = if (10..40).contains(&k) { 30.0 } else { -10.0 };
            position_at(&station, elevation, 90.0, 1500.0)
        })
        .collect();
    let trajectory = earth_fixed_track(&positions, 30.0);

    let passes = scan_passes(&trajectory, &station).unwrap();
    assert_eq!(passes.len(), 1);

    let pass = &passes[0];
    assert_eq!(pass.rise_time, trajectory.states()[10].epoch);
    assert_eq!(pass.set_time, trajectory.states()[40].epoch);
    assert_eq!(pass.duration, 900.0);
    assert_abs_diff_eq!(pass.rise_elevation, 30.0, epsilon = 1e-9);
    assert_abs_diff_eq!(pass.rise_azimuth, 90.0, epsilon = 1e-9);
    assert_eq!(pass.station, station);
}

#[test]
fn visibility_is_monotonic_across_the_mask() {
    let station = GroundStation::new(-33.9, 18.4, 10.0).unwrap();

    let mut previous = false;
    for k in 0..=200 {
        let elevation = 9.0 + k as f64 * 0.01;
        let position = position_at(&station, elevation, 135.0, 2000.0);
        let visible = is_visible(&position, &station);

        assert!(!previous || visible, "visibility lost at {elevation}°");
        if elevation < 10.0 - 1e-9 {
            assert!(!visible, "visible below the mask at {elevation}°");
        }
        if elevation > 10.0 + 1e-9 {
            assert!(visible, "hidden above the mask at {elevation}°");
        }
        previous = visible;
    }

    let angles = look_angles(&position_at(&station, 45.0, 135.0, 2000.0), &station);
    assert_abs_diff_eq!(angles.elevation, 45.0, epsilon = 1e-9);
    assert_abs_diff_eq!(angles.azimuth, 135.0, epsilon = 1e-9);
}

#[test]
fn station_sweep_groups_by_station() {
    let a = GroundStation::new(0.0, 0.0, 5.0).unwrap().with_name("A");
    let b = GroundStation::new(0.0, 90.0, 5.0).unwrap().with_name("B");

    let hidden = Vector3::new(0.0, 0.0, -7000.0);
    let positions: Vec<Vector3<f64>> = (0..25)
        .map(|k| match k {
            5..=9 => Vector3::new(0.0, 7000.0, 0.0),
            15..=19 => Vector3::new(7000.0, 0.0, 0.0),
            _ => hidden,
        })
        .collect();
    let trajectory = earth_fixed_track(&positions, 10.0);

    let passes = scan_stations(&trajectory, &[a.clone(), b.clone()]).unwrap();
    assert_eq!(passes.len(), 2);

    assert_eq!(passes[0].station, a);
    assert_eq!((passes[0].rise_time, passes[0].set_time), (150.0, 200.0));
    assert_eq!(passes[1].station, b);
    assert_eq!((passes[1].rise_time, passes[1].set_time), (50.0, 100.0));

    assert!(scan_stations(&trajectory, &[]).unwrap().is_empty());
}

#[test]
fn polar_orbit_passes_over_high_latitude_station() {
    let params = SimParams::builder()
        .step_size(20.0)
        .steps(4320)
        .model(PropagationModel::Rk4J2)
        .build()
        .unwrap();
    let sim = Simulator::new(params);
    let trajectory = sim.propagate(&initial_state(&leo(), 0.0)).unwrap();

    let svalbard = GroundStation::new(78.23, 15.39, 5.0).unwrap();
    let passes = sim.pass_times(&trajectory, &[svalbard.clone()]).unwrap();
    assert!(passes.len() >= 5, "only {} passes in a day", passes.len());

    for pass in &passes {
        assert!(pass.set_time > pass.rise_time);
        assert!(pass.duration >= 20.0 && pass.duration <= 20.0 * 60.0);
        assert!(pass.rise_elevation > svalbard.masking_angle());
        // sampled every 20 s, the rise is caught just above the mask
        assert!(pass.rise_elevation < 15.0);
        assert!((0.0..360.0).contains(&pass.rise_azimuth));
    }
    for pair in passes.windows(2) {
        assert!(pair[0].set_time <= pair[1].rise_time);
    }

    let track = sim.ground_track(&trajectory, &[svalbard]).unwrap();
    assert_eq!(track.len(), trajectory.len());
    assert!(track.iter().any(|p| p.visible));
    for point in &track {
        assert!((400.0..600.0).contains(&point.geodetic.height));
        assert!(point.geodetic.latitude.abs() <= 83.0);
    }
}
