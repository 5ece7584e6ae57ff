// Copyright 2025 the Padi Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use padi_farm::{FarmConfig, Phase, Pipeline, SampleGrid, Seeding, decompose};

/// Rolling terrain: solid below a height field made of a few sine waves.
fn terrain(resolution: u32) -> SampleGrid {
    let side = ((1 << resolution) + 1) as f32;
    SampleGrid::sample(resolution, 0.0, &|x: usize, y: usize, z: usize| {
        let (fx, fy) = (x as f32 / side, y as f32 / side);
        let height = 0.5 + 0.2 * (fx * 9.0).sin() * (fy * 7.0).cos() + 0.05 * (fx * 31.0).sin();
        height * side - z as f32
    })
    .unwrap()
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn next_f32(&mut self) -> f32 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        (x >> 40) as f32 / (1_u64 << 24) as f32
    }
}

/// Uniform noise: the worst case, nearly every line crosses everywhere.
fn noise(resolution: u32) -> SampleGrid {
    let mut rng = Rng(0xCAFE_F00D_DEAD_BEEF);
    SampleGrid::from_fn(resolution, 0.5, |_, _, _| rng.next_f32()).unwrap()
}

fn bench_decompose(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompose");
    group.sample_size(20);
    for resolution in [4_u32, 5, 6] {
        let side = (1_u64 << resolution) + 1;
        group.throughput(Throughput::Elements(side * side * side));
        let grid = terrain(resolution);
        for parallel in [false, true] {
            let config = FarmConfig::default().with_parallel(parallel);
            let label = if parallel { "par" } else { "seq" };
            group.bench_function(format!("terrain_k{resolution}_{label}"), |b| {
                b.iter(|| black_box(decompose(&grid, &config).unwrap().padi_count()));
            });
        }
        let config = FarmConfig::default().with_index(true);
        group.bench_function(format!("terrain_k{resolution}_indexed"), |b| {
            b.iter(|| black_box(decompose(&grid, &config).unwrap().padi_count()));
        });
    }
    group.finish();
}

fn bench_seeding(c: &mut Criterion) {
    let mut group = c.benchmark_group("seeding");
    group.sample_size(20);
    let grid = noise(5);
    for seeding in [Seeding::RunStart, Seeding::EveryRow] {
        let config = FarmConfig::default().with_seeding(seeding);
        group.bench_function(format!("noise_k5_{seeding:?}"), |b| {
            b.iter(|| black_box(decompose(&grid, &config).unwrap().stats));
        });
    }
    group.finish();
}

fn bench_phases(c: &mut Criterion) {
    let mut group = c.benchmark_group("phases");
    group.sample_size(20);
    let grid = terrain(6);
    let config = FarmConfig::default().with_index(true);
    // Time the run up to and including each phase.
    for last in [Phase::Threshold, Phase::Ligns, Phase::Strips, Phase::Padis] {
        group.bench_function(format!("terrain_k6_through_{last:?}"), |b| {
            b.iter(|| {
                let mut pipeline = Pipeline::new(&grid, config);
                while pipeline.step().unwrap() != last {}
                black_box(pipeline.next_phase());
            });
        });
    }
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let grid = terrain(6);
    let out = decompose(&grid, &FarmConfig::default().with_index(true)).unwrap();
    let mut rng = Rng(0xFACE_FEED_CAFE_BABE);
    let points: Vec<(usize, usize, usize)> = (0..4096)
        .map(|_| {
            let mut coord = || (rng.next_f32() * 65.0) as usize;
            (coord(), coord(), coord())
        })
        .collect();
    let mut group = c.benchmark_group("query");
    group.throughput(Throughput::Elements(points.len() as u64));
    group.bench_function("terrain_k6_points", |b| {
        b.iter(|| {
            let hits = points
                .iter()
                .filter(|&&(x, y, z)| out.query(x, y, z).is_some())
                .count();
            black_box(hits);
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_decompose,
    bench_seeding,
    bench_phases,
    bench_query
);
criterion_main!(benches);
