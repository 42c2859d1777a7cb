//! Benchmarks for Bessel evaluation and membrane field sampling.
//!
//! Run:
//! - cargo bench

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use drumhead::core::bessel::BesselSolver;
use drumhead::core::special::SpecialFunctions;
use drumhead::core::util::{angles, linspace};
use drumhead::membrane::{Membrane, Mode, ModeSet};

const RADIUS: f64 = 3.0;
const MODE_COUNTS: [u32; 3] = [1, 4, 16];
const GRID_SIZES: [usize; 3] = [8, 32, 64];

fn build_modes(count: u32) -> ModeSet {
    (0..count)
        .filter_map(|i| Mode::new(i % 4, 1 + i / 4).ok())
        .collect()
}

fn bench_bessel_j(c: &mut Criterion) {
    let mut group = c.benchmark_group("bessel_j");
    group.sample_size(50);
    let solver = BesselSolver::default();

    for &x in &[1.0, 10.0, 100.0] {
        let id = BenchmarkId::new("order0", format!("x{x}"));
        group.bench_with_input(id, &x, |b, &x| {
            b.iter(|| black_box(solver.bessel_j(0, black_box(x))));
        });
    }

    group.finish();
}

fn bench_zeros(c: &mut Criterion) {
    let mut group = c.benchmark_group("bessel_j_zeros");
    group.sample_size(20);
    let solver = BesselSolver::default();

    for &count in &[1usize, 5, 20] {
        let id = BenchmarkId::new("order2", format!("k{count}"));
        group.bench_with_input(id, &count, |b, &count| {
            b.iter(|| black_box(solver.bessel_j_zeros(2, black_box(count))));
        });
    }

    group.finish();
}

fn bench_sample_field(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample_field");
    group.sample_size(20);
    let membrane = Membrane::new(RADIUS).unwrap();

    for &mode_count in &MODE_COUNTS {
        let modes = build_modes(mode_count);
        for &grid in &GRID_SIZES {
            let radii = linspace(0.0, RADIUS, grid);
            let phis = angles(grid);
            let sampler = membrane.sample_field(&modes, 0.5, radii, phis).unwrap();

            let id = BenchmarkId::new("case", format!("m{mode_count}_g{grid}"));
            group.bench_with_input(id, &sampler, |b, sampler| {
                b.iter(|| {
                    let mut acc = 0.0;
                    for sample in sampler {
                        acc += sample.unwrap().z;
                    }
                    black_box(acc);
                });
            });
        }
    }

    group.finish();
}

fn bench_field_per_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_per_frame");
    group.sample_size(50);
    let membrane = Membrane::new(RADIUS).unwrap();

    for &mode_count in &MODE_COUNTS {
        let modes = build_modes(mode_count);
        let id = BenchmarkId::new("build", format!("m{mode_count}"));
        group.bench_with_input(id, &modes, |b, modes| {
            let mut t = 0.0;
            b.iter(|| {
                t += 1.0 / 30.0;
                black_box(membrane.field(modes, black_box(t)).unwrap());
            });
        });
    }

    group.finish();
}

criterion_group!(
    membrane_field,
    bench_bessel_j,
    bench_zeros,
    bench_sample_field,
    bench_field_per_frame
);
criterion_main!(membrane_field);
