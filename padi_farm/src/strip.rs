// Copyright 2025 the Padi Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strips: two adjacent ligns merged into a tree of plot links.

use padi_span::{SpanShape, SpanTree};

use crate::lign::{Lign, LignSet};
use crate::util::map_units;

/// Span tree of plot links for the cell row between two adjacent sample rows.
///
/// Node `i` links to the largest node sharing `i`'s left edge that is simple in
/// both ligns, so [`SpanTree::chain`] walks the plots of the row.
pub type Strip = SpanTree<u16>;

/// Merge the ligns of two adjacent sample rows.
///
/// Both links of a node share its left edge, so they lie on one root-to-leaf
/// path and the larger index is the smaller span, which is simple in both ligns.
pub fn build_strip(a: &Lign, b: &Lign) -> Strip {
    debug_assert_eq!(a.shape(), b.shape(), "strips merge ligns of one shape");
    let (da, db) = (a.values(), b.values());
    Strip::from_fn(a.shape(), |index| da[index].simplest.max(db[index].simplest))
}

/// Strips along `u` of every layer.
#[derive(Clone, Debug)]
pub struct StripSet {
    shape: SpanShape,
    /// Indexed by `w * (N - 1) + v`: the strip between sample rows `v` and `v + 1`.
    strips: Vec<Strip>,
}

impl StripSet {
    /// Build every strip from the ligns along `u`.
    pub fn build(ligns: &LignSet, parallel: bool) -> Self {
        let shape = ligns.shape();
        let (n, cells) = (shape.samples(), shape.cells());
        let strips = map_units(parallel, n * cells, |unit| {
            let (w, v) = (unit / cells, unit % cells);
            build_strip(ligns.along_u(v, w), ligns.along_u(v + 1, w))
        });
        Self { shape, strips }
    }

    /// Shape shared by every strip.
    #[inline]
    pub fn shape(&self) -> SpanShape {
        self.shape
    }

    /// Strip of cell row `v` in layer `w`.
    #[inline]
    pub fn get(&self, v: usize, w: usize) -> &Strip {
        &self.strips[w * self.shape.cells() + v]
    }

    /// Strips of layer `w`, indexed by cell row.
    #[inline]
    pub fn layer(&self, w: usize) -> &[Strip] {
        let cells = self.shape.cells();
        &self.strips[w * cells..(w + 1) * cells]
    }

    /// Number of strips.
    pub fn len(&self) -> usize {
        self.strips.len()
    }

    /// True if the set holds no strips.
    pub fn is_empty(&self) -> bool {
        self.strips.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Occupancy;
    use crate::lign::build_lign;
    use crate::types::{Axis, Frame};
    use padi_span::Span;

    fn lign_of(bits: &[bool]) -> Lign {
        build_lign(SpanShape::new(bits.len()), |i| bits[i])
    }

    #[test]
    fn strip_takes_the_smaller_plot() {
        // Row a crosses in cell 4, row b in cell 0.
        let a = lign_of(&[false, false, false, false, false, true, true, true, true]);
        let b = lign_of(&[true, false, false, false, false, false, false, false, false]);
        let strip = build_strip(&a, &b);
        let plots: Vec<_> = strip.chain().map(|i| strip.edges(i)).collect();
        assert_eq!(plots, [Span::new(0, 8)]);

        // Row c crosses twice, forcing a split the other row does not need.
        let c = lign_of(&[false, false, true, true, true, false, false, false, false]);
        let strip = build_strip(&a, &c);
        let plots: Vec<_> = strip.chain().map(|i| strip.edges(i)).collect();
        assert_eq!(plots, [Span::new(0, 4), Span::new(4, 8)]);
    }

    #[test]
    fn strip_plots_are_simple_in_both_rows() {
        for ma in (0_u32..(1 << 9)).step_by(7) {
            for mb in (0_u32..(1 << 9)).step_by(11) {
                let a: Vec<bool> = (0..9).map(|i| ma & (1 << i) != 0).collect();
                let b: Vec<bool> = (0..9).map(|i| mb & (1 << i) != 0).collect();
                let (la, lb) = (lign_of(&a), lign_of(&b));
                let strip = build_strip(&la, &lb);
                let mut next = 0;
                for plot in strip.chain() {
                    assert_eq!(strip.edges(plot).min, next);
                    assert!(la.get(plot).simplicity.is_simple());
                    assert!(lb.get(plot).simplicity.is_simple());
                    next = strip.edges(plot).max;
                }
                assert_eq!(next, 8);
            }
        }
    }

    #[test]
    fn strip_set_layout() {
        let occ = Occupancy::from_fn(2, |_, y, z| y == z).unwrap();
        let ligns = LignSet::build(&occ, Frame::new(Axis::Z), true);
        let strips = StripSet::build(&ligns, true);
        assert_eq!(strips.len(), 5 * 4);
        assert_eq!(strips.layer(3).len(), 4);
        // Rows are uniform along u, so every plot is the whole line.
        for w in 0..5 {
            for v in 0..4 {
                assert_eq!(strips.get(v, w).chain().collect::<Vec<_>>(), [0]);
            }
        }
    }
}
