/*
 * Boid Simulation Benchmark
 *
 * Measures the three stages of a tick separately: rebuilding the neighbor
 * index, computing next velocities, and the full World::tick. Each stage is
 * run for several flock sizes with both neighbor strategies.
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use nannou::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::time::Duration;

use flocking::boid::Role;
use flocking::influence;
use flocking::physics::{self, StepContext};
use flocking::{Boid, NeighborQuery, NeighborStrategy, SimulationParams, World};

const WIDTH: f32 = 1000.0;
const HEIGHT: f32 = 700.0;
const BOID_COUNTS: [usize; 4] = [100, 500, 1000, 2000];
const STRATEGIES: [(&str, NeighborStrategy); 2] =
    [("brute_force", NeighborStrategy::BruteForce), ("grid", NeighborStrategy::Grid)];

fn random_boids(count: usize, params: &SimulationParams) -> Vec<Boid> {
    let mut rng = SmallRng::seed_from_u64(42);
    (0..count)
        .map(|_| Boid::random(&mut rng, WIDTH, HEIGHT, params.min_speed, params.max_speed, Role::Normal))
        .collect()
}

// Benchmark rebuilding the neighbor index from scratch
fn bench_neighbor_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("neighbor_rebuild");
    let params = SimulationParams::default();
    let reach = params.snapshot().flock_reach();

    for &count in &BOID_COUNTS {
        let positions: Vec<Point2> = random_boids(count, &params).iter().map(|b| b.position).collect();
        group.throughput(Throughput::Elements(count as u64));

        for (name, strategy) in STRATEGIES {
            let mut index = strategy.build(WIDTH, HEIGHT, count);
            group.bench_with_input(BenchmarkId::new(name, count), &positions, |b, positions| {
                b.iter(|| index.rebuild(black_box(positions), reach));
            });
        }
    }

    group.finish();
}

// Benchmark the steering rules against a prebuilt index
fn bench_compute_velocities(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_velocities");
    let params = SimulationParams::default();
    let snapshot = params.snapshot();

    for &count in &BOID_COUNTS {
        let boids = random_boids(count, &params);
        let positions: Vec<Point2> = boids.iter().map(|b| b.position).collect();
        let mut sources = Vec::new();
        influence::collect_sources(Some(pt2(WIDTH / 2.0, HEIGHT / 2.0)), &boids, &snapshot, &mut sources);
        group.throughput(Throughput::Elements(count as u64));

        for (name, strategy) in STRATEGIES {
            let mut index = strategy.build(WIDTH, HEIGHT, count);
            index.rebuild(&positions, snapshot.flock_reach());
            let ctx = StepContext {
                boids: &boids,
                neighbors: index.as_ref(),
                sources: &sources,
                params: &snapshot,
                bounds: vec2(WIDTH, HEIGHT),
            };
            let mut out = Vec::with_capacity(count);

            for parallel in [false, true] {
                let id = if parallel { format!("{name}_mt") } else { name.to_string() };
                group.bench_with_input(BenchmarkId::new(id, count), &parallel, |b, &parallel| {
                    b.iter(|| physics::compute_velocities(black_box(&ctx), &mut out, parallel));
                });
            }
        }
    }

    group.finish();
}

// Benchmark the full tick
fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    for &count in &BOID_COUNTS {
        group.throughput(Throughput::Elements(count as u64));

        for (name, strategy) in STRATEGIES {
            let mut world = World::builder()
                .width(WIDTH as u32)
                .height(HEIGHT as u32)
                .boid_count(count)
                .predator_count(2)
                .neighbor_strategy(strategy)
                .parallel(true)
                .seed(42)
                .build();
            world.set_predator_loc(WIDTH / 2.0, HEIGHT / 2.0);

            group.bench_function(BenchmarkId::new(name, count), |b| b.iter(|| world.tick()));
        }
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(10)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1));
    targets = bench_neighbor_rebuild, bench_compute_velocities, bench_tick
}

criterion_main!(benches);
