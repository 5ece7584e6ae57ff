// Copyright 2025 the Padi Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Farm basics.
//!
//! Sample a small terrain, tile it along each axis, print per-layer padi counts,
//! and answer a few point queries.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p padi_demos --example farm_basics`

use padi_farm::{Axis, FarmConfig, Fill, SampleGrid, decompose};

fn main() {
    env_logger::init();

    // A hill in the middle of a 33³ grid. Solid below the surface.
    let grid = SampleGrid::sample(5, 0.0, &|x: usize, y: usize, z: usize| {
        let dx = x as f32 - 16.0;
        let dy = y as f32 - 16.0;
        let height = 6.0 + 14.0 * (-(dx * dx + dy * dy) / 120.0).exp();
        height - z as f32
    })
    .unwrap();

    for axis in [Axis::Z, Axis::X, Axis::Y] {
        let config = FarmConfig::default().with_layer_axis(axis).with_index(true);
        let out = decompose(&grid, &config).unwrap();
        println!(
            "layers along {axis:?}: {} padis over {} layers",
            out.padi_count(),
            out.layers.len()
        );
        for layer in out.layers.iter().step_by(8) {
            let mixed = layer.padis.iter().filter(|p| p.fill == Fill::Mixed).count();
            println!(
                "  layer {:2}: {:4} padis ({mixed} mixed)",
                layer.layer,
                layer.padis.len()
            );
        }
        println!("  stats: {:?}", out.stats);
    }

    let out = decompose(&grid, &FarmConfig::default().with_index(true)).unwrap();
    for (x, y, z) in [(16, 16, 10), (0, 0, 3), (32, 32, 32)] {
        let rect = out.query(x, y, z).unwrap();
        let padi = out.layers[z].padi_at(rect.min_x, rect.min_y).unwrap();
        println!(
            "point ({x}, {y}, {z}) -> {rect:?} {:?}, {:?} at 0.5 units per cell",
            padi.fill,
            padi.to_kurbo_rect(0.5)
        );
    }
}
