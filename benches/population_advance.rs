use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use outbreak::geometry::Bounds;
use outbreak::parameters::{Constants, Parameters};
use outbreak::population::Population;
use outbreak::random::RandomSource;
use outbreak::simulation::Simulation;

const SEED: u64 = 123;
const POPULATION_SIZES: [usize; 3] = [250, 1_000, 2_000];

fn population(size: usize) -> Population {
    let random = RandomSource::new(SEED);
    Population::new(
        size,
        0.0,
        3,
        Bounds::new(600.0, 400.0),
        Constants::default(),
        &random,
    )
    .expect("benchmark population is valid")
}

pub fn advance_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("population advance");
    for size in POPULATION_SIZES {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bencher, &size| {
            bencher.iter_batched_ref(
                || population(size),
                |population| black_box(population.advance()),
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn full_run() -> Simulation {
    let mut simulation = Simulation::new(Parameters::default(), Constants::default(), SEED)
        .expect("default parameters are valid");
    simulation.run().expect("run completes");
    simulation
}

pub fn run_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation");
    group.sample_size(10);
    group.bench_function("default run", |bencher| {
        bencher.iter_with_large_drop(full_run);
    });
    group.finish();
}

criterion_group!(population_benches, advance_benchmark, run_benchmark);
criterion_main!(population_benches);
