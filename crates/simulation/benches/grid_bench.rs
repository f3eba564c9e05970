//! Criterion benchmarks for grid operations.
//!
//! Benchmarks:
//!   - neighbors at an interior cell and at a corner
//!   - one full tick of a 200x200 grid, quiet and mid-fire
//!   - terrain generation for a 200x200 grid
//!
//! Run with: cargo bench -p simulation --bench grid_bench

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use simulation::cell::Cell;
use simulation::config::{GRID_HEIGHT, GRID_WIDTH};
use simulation::fire_params::FireParams;
use simulation::terrain::{generate_grid, TerrainConfig};
use simulation::wildfire_grid::WildfireGrid;

fn forest() -> WildfireGrid {
    WildfireGrid::new(GRID_WIDTH, GRID_HEIGHT, Cell::new(0.4, 0.7, 0.8, false, 0.0))
        .expect("bench grid dimensions are non-zero")
}

// ---------------------------------------------------------------------------
// Benchmark: neighbors
// ---------------------------------------------------------------------------

fn bench_neighbors(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_neighbors");
    group.sample_size(1000);

    let grid = forest();

    group.bench_function("interior_100_100", |b| {
        b.iter(|| black_box(grid.neighbors(black_box(100), black_box(100))));
    });

    group.bench_function("corner_0_0", |b| {
        b.iter(|| black_box(grid.neighbors(black_box(0), black_box(0))));
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: full tick
// ---------------------------------------------------------------------------

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_tick_200x200");
    let params = FireParams::default();

    group.bench_function("quiet_forest", |b| {
        let mut grid = forest();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        b.iter(|| black_box(grid.tick(&params, &mut rng)));
    });

    // A forest with a burning band down the middle, so ignition draws happen.
    group.bench_function("burning_forest", |b| {
        b.iter_batched(
            || {
                let mut grid = forest();
                for y in 0..GRID_HEIGHT {
                    grid.set(GRID_WIDTH / 2, y, Cell::new(0.4, 0.7, 0.8, true, 0.0))
                        .expect("in bounds");
                }
                (grid, ChaCha8Rng::seed_from_u64(7))
            },
            |(mut grid, mut rng)| black_box(grid.tick(&params, &mut rng)),
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: terrain generation
// ---------------------------------------------------------------------------

fn bench_terrain(c: &mut Criterion) {
    let config = TerrainConfig::default();
    c.bench_function("terrain_generate_200x200", |b| {
        b.iter(|| black_box(generate_grid(black_box(&config))))
    });
}

// ---------------------------------------------------------------------------
// Register groups
// ---------------------------------------------------------------------------

criterion_group!(benches, bench_neighbors, bench_tick, bench_terrain);
criterion_main!(benches);
