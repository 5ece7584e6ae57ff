// Copyright 2025 the Padi Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point queries over finished padi layers.
//!
//! For each layer the index keeps one span tree per cell row (along `u`) and
//! one per cell column (along `v`). A padi writes the node of its `u` span into
//! every row it crosses and the node of its `v` span into every column it
//! crosses; all other nodes hold [`UNASSIGNED`]. A query walks a row and a
//! column from the root and stops at the first assigned node.

use padi_span::{Rect, SpanShape, SpanTree, parent_of};

use crate::error::FarmError;
use crate::types::{Axis, Frame, PadiLayer};
use crate::util::{map_units, node_value};

/// Node value of a span no padi has claimed.
pub const UNASSIGNED: u16 = u16::MAX;

/// Row and column trees of one layer.
#[derive(Clone, Debug)]
struct LayerIndex {
    /// One tree per cell row, over `u`.
    rows: Vec<SpanTree<u16>>,
    /// One tree per cell column, over `v`.
    columns: Vec<SpanTree<u16>>,
}

impl LayerIndex {
    fn build(shape: SpanShape, frame: Frame, layer: &PadiLayer) -> Result<Self, FarmError> {
        let cells = shape.cells();
        let mut rows = vec![SpanTree::new(shape, UNASSIGNED); cells];
        let mut columns = vec![SpanTree::new(shape, UNASSIGNED); cells];
        for padi in &layer.padis {
            let r = padi.rect;
            let u_node = shape.largest_span(r.min_x, r.max_x);
            let v_node = shape.largest_span(r.min_y, r.max_y);
            for v in r.min_y..r.max_y {
                assign(&mut rows[v], u_node).map_err(|()| FarmError::DoubleAssignment {
                    layer: layer.layer,
                    axis: frame.u,
                    u: r.min_x,
                    v,
                })?;
            }
            for u in r.min_x..r.max_x {
                assign(&mut columns[u], v_node).map_err(|()| FarmError::DoubleAssignment {
                    layer: layer.layer,
                    axis: frame.v,
                    u,
                    v: r.min_y,
                })?;
            }
        }
        for (v, row) in rows.iter().enumerate() {
            check_paths(row).map_err(|(u, gap)| fault(gap, layer.layer, frame.u, u, v))?;
        }
        for (u, column) in columns.iter().enumerate() {
            check_paths(column).map_err(|(v, gap)| fault(gap, layer.layer, frame.v, u, v))?;
        }
        Ok(Self { rows, columns })
    }

    fn query(&self, u: usize, v: usize) -> Option<Rect> {
        let row = &self.rows[v];
        let column = &self.columns[u];
        let assigned = |_: usize, value: &u16| *value != UNASSIGNED;
        let u_node = row.find_span(u, assigned)?;
        let v_node = column.find_span(v, assigned)?;
        Some(Rect::from_spans(row.edges(u_node), column.edges(v_node)))
    }
}

fn fault(gap: bool, layer: usize, axis: Axis, u: usize, v: usize) -> FarmError {
    if gap {
        FarmError::CoverageGap { layer, axis, u, v }
    } else {
        FarmError::DoubleAssignment { layer, axis, u, v }
    }
}

fn assign(tree: &mut SpanTree<u16>, node: usize) -> Result<(), ()> {
    let slot = tree.get_mut(node);
    if *slot != UNASSIGNED {
        return Err(());
    }
    *slot = node_value(node);
    Ok(())
}

/// Every root-to-leaf path must carry exactly one assignment. On failure,
/// returns the first offending cell and whether it was a gap.
fn check_paths(tree: &SpanTree<u16>) -> Result<(), (usize, bool)> {
    let shape = tree.shape();
    for cell in 0..shape.cells() {
        let mut node = shape.leaf_for_cell(cell);
        let mut count = usize::from(*tree.get(node) != UNASSIGNED);
        while node != 0 {
            node = parent_of(node);
            count += usize::from(*tree.get(node) != UNASSIGNED);
        }
        if count != 1 {
            return Err((cell, count == 0));
        }
    }
    Ok(())
}

/// Point-to-padi lookup over every layer of a decomposition.
#[derive(Clone, Debug)]
pub struct PadiIndex {
    shape: SpanShape,
    frame: Frame,
    layers: Vec<LayerIndex>,
}

impl PadiIndex {
    /// Index `layers`, which must be exact tilings of an `N × N` cell plane.
    ///
    /// Fails with [`FarmError::DoubleAssignment`] if two padis claim the same
    /// span and with [`FarmError::CoverageGap`] if a cell is left uncovered.
    pub fn build(
        shape: SpanShape,
        frame: Frame,
        layers: &[PadiLayer],
        parallel: bool,
    ) -> Result<Self, FarmError> {
        let layers = map_units(parallel, layers.len(), |w| {
            LayerIndex::build(shape, frame, &layers[w])
        })
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            shape,
            frame,
            layers,
        })
    }

    /// The padi rectangle covering grid point `(x, y, z)`, in its layer's
    /// `(u, v)` cell coordinates.
    ///
    /// Points on the far face of a planar axis fall in the last cell. Returns
    /// `None` for points outside the grid.
    pub fn query(&self, x: usize, y: usize, z: usize) -> Option<Rect> {
        let (u, v, w) = self.frame.from_grid(x, y, z);
        self.query_in_layer(u, v, w)
    }

    /// The padi rectangle covering frame point `(u, v)` of layer `w`.
    pub fn query_in_layer(&self, u: usize, v: usize, w: usize) -> Option<Rect> {
        let n = self.shape.samples();
        if u >= n || v >= n {
            return None;
        }
        let last = self.shape.cells() - 1;
        self.layers.get(w)?.query(u.min(last), v.min(last))
    }

    /// Number of indexed layers.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Fill, Padi};

    fn layer(rects: &[Rect]) -> PadiLayer {
        PadiLayer {
            layer: 0,
            padis: rects
                .iter()
                .map(|&rect| Padi {
                    rect,
                    layer: 0,
                    fill: Fill::Mixed,
                })
                .collect(),
        }
    }

    #[test]
    fn queries_find_the_covering_rect() {
        let shape = SpanShape::with_resolution(2);
        let rects = [
            Rect::new(0, 0, 2, 2),
            Rect::new(2, 0, 4, 2),
            Rect::new(0, 2, 1, 4),
            Rect::new(1, 2, 2, 4),
            Rect::new(2, 2, 4, 4),
        ];
        let index = PadiIndex::build(shape, Frame::new(Axis::Z), &[layer(&rects)], false).unwrap();
        for v in 0..5 {
            for u in 0..5 {
                let hit = index.query(u, v, 0).unwrap();
                assert!(hit.contains_cell(u.min(3), v.min(3)), "({u}, {v}) -> {hit:?}");
                assert!(rects.contains(&hit));
            }
        }
        assert_eq!(index.query(5, 0, 0), None);
        assert_eq!(index.query(0, 0, 1), None);
    }

    #[test]
    fn overlap_is_a_double_assignment() {
        let shape = SpanShape::with_resolution(1);
        let rects = [Rect::new(0, 0, 2, 2), Rect::new(0, 0, 2, 2)];
        let err = PadiIndex::build(shape, Frame::new(Axis::Z), &[layer(&rects)], false).unwrap_err();
        assert!(matches!(err, FarmError::DoubleAssignment { layer: 0, .. }), "{err:?}");
    }

    #[test]
    fn nested_overlap_is_caught_by_the_path_check() {
        // Different nodes on one path: no slot is written twice.
        let shape = SpanShape::with_resolution(1);
        let rects = [Rect::new(0, 0, 1, 1), Rect::new(0, 0, 2, 2)];
        let err = PadiIndex::build(shape, Frame::new(Axis::Z), &[layer(&rects)], false).unwrap_err();
        assert!(matches!(err, FarmError::DoubleAssignment { .. }), "{err:?}");
    }

    #[test]
    fn hole_is_a_coverage_gap() {
        let shape = SpanShape::with_resolution(1);
        let rects = [Rect::new(0, 0, 1, 2)];
        let err = PadiIndex::build(shape, Frame::new(Axis::Z), &[layer(&rects)], false).unwrap_err();
        assert_eq!(
            err,
            FarmError::CoverageGap {
                layer: 0,
                axis: Axis::X,
                u: 1,
                v: 0
            }
        );
    }
}
