// Copyright 2025 the Padi Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stepwise farming.
//!
//! Drive the pipeline one phase per "frame", the way a game loop would spread
//! the work over several ticks, then show a run cancelled halfway.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p padi_demos --example farm_stepwise`

use std::ops::ControlFlow;
use std::time::Instant;

use padi_farm::{FarmConfig, Phase, Pipeline, SampleGrid, Seeding};

fn main() {
    env_logger::init();

    // Two overlapping spheres.
    let grid = SampleGrid::sample(6, 0.0, &|x: usize, y: usize, z: usize| {
        let d = |cx: f32, cy: f32, cz: f32| {
            let (dx, dy, dz) = (x as f32 - cx, y as f32 - cy, z as f32 - cz);
            (dx * dx + dy * dy + dz * dz).sqrt()
        };
        (20.0 - d(24.0, 32.0, 32.0)).max(14.0 - d(44.0, 30.0, 36.0))
    })
    .unwrap();

    let config = FarmConfig::default()
        .with_seeding(Seeding::EveryRow)
        .with_index(true);
    let mut pipeline = Pipeline::new(&grid, config);
    let mut frame = 0;
    while !pipeline.is_done() {
        let started = Instant::now();
        let phase = pipeline.step().unwrap();
        println!("frame {frame}: {phase:?} in {:?}", started.elapsed());
        frame += 1;
    }
    let out = pipeline.into_output().unwrap();
    println!("{} padis, {:?}", out.padi_count(), out.stats);

    // Give up once the strips are built; nothing is returned.
    let cancelled = Pipeline::new(&grid, config)
        .run_with(|phase| {
            log::info!("finished {phase:?}");
            if phase == Phase::Strips {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .unwrap();
    assert!(cancelled.is_none());
    println!("second run cancelled after the strip phase");
}
