use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use satsim::{
    keplerian_element::KeplerianElements,
    observers::GroundStation,
    propagation::{
        force_model::{Monopole, J2},
        keplerian::KeplerianPropagator,
        rk4::Rk4Propagator,
        Propagator,
    },
    state::State,
    visibility::scan_stations,
};

/// Random bound LEO-to-MEO initial state.
fn random_state(rng: &mut StdRng) -> State {
    let kep = KeplerianElements {
        semi_major_axis: rng.random_range(6800.0..30000.0),
        eccentricity: rng.random_range(0.001..0.2),
        inclination: rng.random_range(0.1..3.0),
        ascending_node_longitude: rng.random_range(0.0..std::f64::consts::TAU),
        periapsis_argument: rng.random_range(0.0..std::f64::consts::TAU),
        true_anomaly: rng.random_range(0.0..std::f64::consts::TAU),
    };
    let (r, v) = kep.to_state_vectors();
    State::new(r, v, 0.0)
}

fn bench_propagators(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let mut group = c.benchmark_group("propagate_1000_steps");

    let kep = KeplerianPropagator::default();
    group.bench_function("kep", |b| {
        b.iter_batched(
            || random_state(&mut rng),
            |initial| black_box(kep.propagate(&initial, black_box(10.0), 1000)),
            BatchSize::SmallInput,
        )
    });

    let monopole = Rk4Propagator::new(Monopole::default());
    group.bench_function("rk4-monopole", |b| {
        b.iter_batched(
            || random_state(&mut rng),
            |initial| black_box(monopole.propagate(&initial, black_box(10.0), 1000)),
            BatchSize::SmallInput,
        )
    });

    let j2 = Rk4Propagator::new(J2::egm96());
    group.bench_function("rk4-j2", |b| {
        b.iter_batched(
            || random_state(&mut rng),
            |initial| black_box(j2.propagate(&initial, black_box(10.0), 1000)),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn bench_station_sweep(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let initial = random_state(&mut rng);
    let trajectory = Rk4Propagator::new(J2::egm96())
        .propagate(&initial, 30.0, 2880)
        .unwrap()
        .to_earth_fixed();

    let stations: Vec<GroundStation> = (0..64)
        .map(|_| {
            GroundStation::new(
                rng.random_range(-80.0..80.0),
                rng.random_range(-179.0..180.0),
                5.0,
            )
            .unwrap()
        })
        .collect();

    c.bench_function("scan_stations/64_stations_1_day", |b| {
        b.iter(|| black_box(scan_stations(&trajectory, black_box(&stations)).unwrap()))
    });
}

criterion_group!(benches, bench_propagators, bench_station_sweep);
criterion_main!(benches);
