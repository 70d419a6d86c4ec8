use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use satsim::kepler::{solve_kepler, KeplerSolverSettings};

/// Uniform random in [0, 2π)
#[inline]
fn rand_angle(rng: &mut StdRng) -> f64 {
    rng.random::<f64>() * std::f64::consts::TAU
}

fn random_cases(rng: &mut StdRng, samples: usize, e_range: (f64, f64)) -> Vec<(f64, f64)> {
    (0..samples)
        .map(|_| (rng.random_range(e_range.0..e_range.1), rand_angle(rng)))
        .collect()
}

/// Typical regime: e ∈ [0.0, 0.7)
fn bench_typical(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xDEADBEEF);
    let settings = KeplerSolverSettings::default();

    c.bench_function("solve_kepler/typical_e<0.7", |b| {
        b.iter_batched(
            || random_cases(&mut rng, 10_000, (0.0, 0.7)),
            |cases| {
                for (e, m) in cases {
                    let ecc = solve_kepler(black_box(e), black_box(m), &settings).unwrap();
                    black_box(ecc);
                }
            },
            BatchSize::LargeInput,
        )
    });
}

/// High-eccentricity (still elliptic): e ∈ [0.7, 0.99)
fn bench_high_e(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xBADF00D);
    let settings = KeplerSolverSettings::default();

    c.bench_function("solve_kepler/high_e_0.7..0.99", |b| {
        b.iter_batched(
            || random_cases(&mut rng, 10_000, (0.7, 0.99)),
            |cases| {
                for (e, m) in cases {
                    let _ = black_box(solve_kepler(black_box(e), black_box(m), &settings));
                }
            },
            BatchSize::LargeInput,
        )
    });
}

/// Circular orbits converge on the first iteration.
fn bench_circular(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xFEEDFACE);
    let settings = KeplerSolverSettings::default();

    c.bench_function("solve_kepler/circular_e=0", |b| {
        b.iter_batched(
            || (0..10_000).map(|_| rand_angle(&mut rng)).collect::<Vec<_>>(),
            |cases| {
                for m in cases {
                    let ecc = solve_kepler(0.0, black_box(m), &settings).unwrap();
                    black_box(ecc);
                }
            },
            BatchSize::LargeInput,
        )
    });
}

/// Near-parabolic, close to periapsis: the slowest converging corner.
fn bench_fixed_stress(c: &mut Criterion) {
    let settings = KeplerSolverSettings::default();

    c.bench_function("solve_kepler/fixed_stress_case", |b| {
        b.iter(|| {
            let ecc = solve_kepler(black_box(0.99), black_box(0.01), &settings);
            black_box(ecc.ok());
        })
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_typical, bench_high_e, bench_circular, bench_fixed_stress
);
criterion_main!(benches);
