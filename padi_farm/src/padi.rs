// Copyright 2025 the Padi Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-layer padi construction.
//!
//! A layer is tiled in three moves:
//!
//! 1. Every plot of every strip row seeds a candidate one cell row tall, grown
//!    downward while the next rows' chains contain the same plot.
//! 2. The candidate's row range is cut until it is a single node of the
//!    partition and simple on every column it crosses.
//! 3. The aligned candidate is reconciled against the layer's accepted list.

use std::collections::VecDeque;

use padi_span::{Rect, Span, SpanShape};

use crate::config::Seeding;
use crate::grid::Occupancy;
use crate::lign::{Lign, LignSet};
use crate::reconcile::{LayerTiling, Outcome, ReconcileStats};
use crate::strip::{Strip, StripSet};
use crate::types::{Fill, Frame, Padi, PadiLayer};
use crate::util::map_units;

/// Whether a candidate needs another cut across the strips.
enum Partition {
    Final,
    Split(Rect, Rect),
}

/// Inputs for tiling one layer.
#[derive(Clone, Copy, Debug)]
pub struct LayerBuilder<'a> {
    shape: SpanShape,
    frame: Frame,
    layer: usize,
    strips: &'a [Strip],
    rows: &'a [Lign],
    columns: &'a [Lign],
    occupancy: &'a Occupancy,
}

impl<'a> LayerBuilder<'a> {
    /// Builder for layer `w`, reading the strips and ligns of that layer.
    pub fn new(
        occupancy: &'a Occupancy,
        frame: Frame,
        ligns: &'a LignSet,
        strips: &'a StripSet,
        w: usize,
    ) -> Self {
        Self {
            shape: ligns.shape(),
            frame,
            layer: w,
            strips: strips.layer(w),
            rows: ligns.rows(w),
            columns: ligns.columns(w),
            occupancy,
        }
    }

    /// Tile the layer.
    pub fn build(&self, seeding: Seeding) -> (PadiLayer, ReconcileStats) {
        let shape = self.shape;
        let cells = shape.cells();
        let nodes = shape.node_count();

        let chains: Vec<Vec<usize>> = self.strips.iter().map(|s| s.chain().collect()).collect();
        let mut plots = vec![false; cells * nodes];
        for (v, chain) in chains.iter().enumerate() {
            for &plot in chain {
                plots[v * nodes + plot] = true;
            }
        }
        let has_plot = |v: usize, plot: usize| plots[v * nodes + plot];

        let mut tiling = LayerTiling::new();
        let mut stats = ReconcileStats::default();
        let mut queue = VecDeque::new();
        for (v, chain) in chains.iter().enumerate() {
            for &plot in chain {
                if seeding == Seeding::RunStart && v > 0 && has_plot(v - 1, plot) {
                    continue;
                }
                let mut end = v + 1;
                while end < cells && has_plot(end, plot) {
                    end += 1;
                }
                queue.push_back(Rect::from_spans(shape.edges(plot), Span::new(v, end)));
                stats.seeded += 1;
                self.drain(&mut queue, &mut tiling, &mut stats);
            }
        }

        let mut padis: Vec<Padi> = tiling
            .into_rects()
            .into_iter()
            .map(|rect| Padi {
                rect,
                layer: self.layer,
                fill: self.fill_of(&rect),
            })
            .collect();
        padis.sort_by_key(|p| (p.rect.min_y, p.rect.min_x));
        stats.accepted = padis.len();
        log::trace!("layer {}: {} padis, {:?}", self.layer, padis.len(), stats);
        (
            PadiLayer {
                layer: self.layer,
                padis,
            },
            stats,
        )
    }

    fn drain(
        &self,
        queue: &mut VecDeque<Rect>,
        tiling: &mut LayerTiling,
        stats: &mut ReconcileStats,
    ) {
        while let Some(candidate) = queue.pop_front() {
            if let Partition::Split(a, b) = self.partition(&candidate) {
                stats.partition_splits += 1;
                queue.push_back(a);
                queue.push_back(b);
                continue;
            }
            match tiling.reconcile(candidate) {
                Outcome::Accepted { replaced } => stats.replaced += replaced,
                Outcome::Discarded => stats.discarded += 1,
                Outcome::Halved(a, b) => {
                    stats.halved += 1;
                    queue.push_back(a);
                    queue.push_back(b);
                }
            }
        }
    }

    /// Cut `candidate` along `v` at the end of the largest node starting at its
    /// top, or at that node's midpoint if some column is not simple across it.
    fn partition(&self, candidate: &Rect) -> Partition {
        let shape = self.shape;
        let node = shape.largest_span(candidate.min_y, candidate.max_y);
        let span = shape.edges(node);
        if span.max < candidate.max_y {
            let (a, b) = candidate.split_y(span.max);
            return Partition::Split(a, b);
        }
        let simple = self.columns[candidate.min_x..=candidate.max_x]
            .iter()
            .all(|column| column.get(node).simplicity.is_simple());
        if simple {
            Partition::Final
        } else {
            let (a, b) = candidate.split_y(span.midpoint());
            Partition::Split(a, b)
        }
    }

    /// Uniform when every row is crossing-free across the padi and so is its
    /// left column; the corner sample then decides solid or empty.
    fn fill_of(&self, rect: &Rect) -> Fill {
        let shape = self.shape;
        let x_node = shape.largest_span(rect.min_x, rect.max_x);
        let y_node = shape.largest_span(rect.min_y, rect.max_y);
        debug_assert_eq!(shape.edges(x_node), rect.x_span(), "padi is not aligned along u");
        debug_assert_eq!(shape.edges(y_node), rect.y_span(), "padi is not aligned along v");
        let uniform = self.rows[rect.min_y..=rect.max_y]
            .iter()
            .all(|row| row.get(x_node).simplicity.is_empty())
            && self.columns[rect.min_x].get(y_node).simplicity.is_empty();
        if !uniform {
            Fill::Mixed
        } else if self
            .occupancy
            .is_solid_in(self.frame, rect.min_x, rect.min_y, self.layer)
        {
            Fill::Solid
        } else {
            Fill::Empty
        }
    }
}

/// Tile every layer. Layers are independent and run on the rayon pool when
/// `parallel` is set.
pub fn build_layers(
    occupancy: &Occupancy,
    frame: Frame,
    ligns: &LignSet,
    strips: &StripSet,
    seeding: Seeding,
    parallel: bool,
) -> (Vec<PadiLayer>, ReconcileStats) {
    let layers = map_units(parallel, ligns.shape().samples(), |w| {
        LayerBuilder::new(occupancy, frame, ligns, strips, w).build(seeding)
    });
    let mut total = ReconcileStats::default();
    let layers = layers
        .into_iter()
        .map(|(layer, stats)| {
            total += stats;
            layer
        })
        .collect();
    (layers, total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Axis;

    fn tile(occ: &Occupancy, axis: Axis, seeding: Seeding) -> Vec<PadiLayer> {
        let frame = Frame::new(axis);
        let ligns = LignSet::build(occ, frame, false);
        let strips = StripSet::build(&ligns, false);
        build_layers(occ, frame, &ligns, &strips, seeding, false).0
    }

    /// Disjoint, covering, aligned, and simple on every line it crosses.
    fn assert_valid_layer(layer: &PadiLayer, ligns: &LignSet) {
        let shape = ligns.shape();
        let cells = shape.cells();
        let mut covered = vec![0_u8; cells * cells];
        for padi in &layer.padis {
            let r = padi.rect;
            for v in r.min_y..r.max_y {
                for u in r.min_x..r.max_x {
                    covered[v * cells + u] += 1;
                }
            }
            let x_node = shape.largest_span(r.min_x, r.max_x);
            let y_node = shape.largest_span(r.min_y, r.max_y);
            assert_eq!(shape.edges(x_node), r.x_span());
            assert_eq!(shape.edges(y_node), r.y_span());
            for v in r.min_y..=r.max_y {
                assert!(ligns.along_u(v, layer.layer).get(x_node).simplicity.is_simple());
            }
            for u in r.min_x..=r.max_x {
                assert!(ligns.along_v(u, layer.layer).get(y_node).simplicity.is_simple());
            }
        }
        assert!(
            covered.iter().all(|&c| c == 1),
            "layer {} is not an exact tiling",
            layer.layer
        );
    }

    fn assert_valid(occ: &Occupancy, axis: Axis, seeding: Seeding) {
        let frame = Frame::new(axis);
        let ligns = LignSet::build(occ, frame, false);
        let strips = StripSet::build(&ligns, false);
        let (layers, stats) = build_layers(occ, frame, &ligns, &strips, seeding, true);
        assert_eq!(layers.len(), occ.side());
        for (w, layer) in layers.iter().enumerate() {
            assert_eq!(layer.layer, w);
            assert_valid_layer(layer, &ligns);
        }
        assert_eq!(
            stats.accepted,
            layers.iter().map(|l| l.padis.len()).sum::<usize>()
        );
    }

    /// Deterministic xorshift noise in `[0, 1)`.
    fn noise(seed: u64) -> impl Fn(usize, usize, usize) -> bool {
        move |x, y, z| {
            let mut h = seed ^ ((x as u64) << 40 | (y as u64) << 20 | z as u64);
            h ^= h << 13;
            h ^= h >> 7;
            h ^= h << 17;
            h ^= h >> 29;
            h.wrapping_mul(0x2545_f491_4f6c_dd1d) >> 62 == 0
        }
    }

    #[test]
    fn uniform_grid_is_one_padi_per_layer() {
        for solid in [false, true] {
            let occ = Occupancy::from_fn(3, |_, _, _| solid).unwrap();
            for layer in tile(&occ, Axis::Z, Seeding::EveryRow) {
                assert_eq!(layer.padis.len(), 1);
                let padi = layer.padis[0];
                assert_eq!(padi.rect, Rect::new(0, 0, 8, 8));
                assert_eq!(padi.fill, if solid { Fill::Solid } else { Fill::Empty });
            }
        }
    }

    #[test]
    fn alternating_columns_give_minimal_strips() {
        let occ = Occupancy::from_fn(4, |x, _, _| x % 2 == 1).unwrap();
        for layer in tile(&occ, Axis::Z, Seeding::RunStart) {
            assert_eq!(layer.padis.len(), 16);
            for (u, padi) in layer.padis.iter().enumerate() {
                assert_eq!(padi.rect, Rect::new(u, 0, u + 1, 16));
                assert_eq!(padi.fill, Fill::Mixed);
            }
        }
    }

    #[test]
    fn half_space_is_one_mixed_padi() {
        // One crossing on every line along x; nothing along y.
        let occ = Occupancy::from_fn(3, |x, _, _| x >= 3).unwrap();
        for layer in tile(&occ, Axis::Z, Seeding::RunStart) {
            assert_eq!(layer.padis.len(), 1);
            assert_eq!(layer.padis[0].fill, Fill::Mixed);
        }
    }

    #[test]
    fn single_solid_sample_refines_around_it() {
        let occ = Occupancy::from_fn(3, |x, y, z| (x, y, z) == (3, 5, 2)).unwrap();
        let layers = tile(&occ, Axis::Z, Seeding::RunStart);
        for layer in &layers {
            if layer.layer == 2 {
                assert!(layer.padis.len() > 1);
                assert!(layer.padis.iter().any(|p| p.fill == Fill::Mixed));
            } else {
                assert_eq!(layer.padis.len(), 1);
                assert_eq!(layer.padis[0].fill, Fill::Empty);
            }
        }
    }

    #[test]
    fn noise_tilings_are_exact_for_both_seedings() {
        for seed in [1, 7, 42] {
            let occ = Occupancy::from_fn(3, noise(seed)).unwrap();
            assert_valid(&occ, Axis::Z, Seeding::RunStart);
            assert_valid(&occ, Axis::Z, Seeding::EveryRow);
        }
    }

    #[test]
    fn sphere_tilings_are_exact_along_every_axis() {
        let occ = Occupancy::from_fn(4, |x, y, z| {
            let d = |a: usize| a as f32 - 7.5;
            d(x) * d(x) + d(y) * d(y) + d(z) * d(z) < 36.0
        })
        .unwrap();
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            assert_valid(&occ, axis, Seeding::RunStart);
            assert_valid(&occ, axis, Seeding::EveryRow);
        }
    }

    #[test]
    fn every_row_seeding_reconciles_overlaps() {
        let occ = Occupancy::from_fn(3, noise(3)).unwrap();
        let frame = Frame::new(Axis::Z);
        let ligns = LignSet::build(&occ, frame, false);
        let strips = StripSet::build(&ligns, false);
        let (_, every) = build_layers(&occ, frame, &ligns, &strips, Seeding::EveryRow, false);
        let (_, run) = build_layers(&occ, frame, &ligns, &strips, Seeding::RunStart, false);
        assert!(every.seeded >= run.seeded);
        assert!(every.discarded > 0, "row seeds below a run start are redundant");
    }
}
