// Copyright 2025 the Padi Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Index arithmetic for the implicit span tree.
//!
//! A line of `N = 2^k + 1` samples has `L = N - 1` cells. The tree over those
//! cells is a complete binary heap with `2L - 1` nodes: node `0` spans every
//! cell, node `i` has children `2i + 1` and `2i + 2`, and the last `L` nodes are
//! the leaves, one per cell. Nothing about a node's interval is stored; it is
//! recovered from the node index and the shape.

use crate::types::Span;

/// Parent of a non-root node.
#[inline]
pub const fn parent_of(index: usize) -> usize {
    debug_assert!(index > 0, "the root has no parent");
    (index - 1) / 2
}

/// First child of a node. The second child is `first_child_of(index) + 1`.
#[inline]
pub const fn first_child_of(index: usize) -> usize {
    2 * index + 1
}

/// Whether a node shares its left edge with its parent.
///
/// The root counts as a first child.
#[inline]
pub const fn is_first_child(index: usize) -> bool {
    index == 0 || index % 2 == 1
}

/// Depth of a node, with the root at layer `0`.
#[inline]
pub const fn layer_of(index: usize) -> u32 {
    usize::BITS - 1 - (index + 1).leading_zeros()
}

/// Index of the leftmost node in the same layer as `index`.
#[inline]
pub const fn first_index_in_layer(index: usize) -> usize {
    (index + 2).next_power_of_two() / 2 - 1
}

/// Whether `index` is the rightmost node of its layer, i.e. its span reaches the
/// last sample.
#[inline]
pub const fn is_last_in_layer(index: usize) -> bool {
    (index + 2).is_power_of_two()
}

/// Shape of a span tree: the number of samples on the line it covers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SpanShape {
    samples: usize,
}

impl SpanShape {
    /// Shape for a line of `samples` samples.
    ///
    /// # Panics
    ///
    /// Panics unless `samples - 1` is a power of two of at least `2`.
    pub const fn new(samples: usize) -> Self {
        match Self::try_new(samples) {
            Some(shape) => shape,
            None => panic!("span tree sample count must be 2^k + 1 with k >= 1"),
        }
    }

    /// Shape for a line of `samples` samples, or `None` if the count is not `2^k + 1`
    /// with `k >= 1`.
    pub const fn try_new(samples: usize) -> Option<Self> {
        if samples < 3 || !(samples - 1).is_power_of_two() {
            return None;
        }
        Some(Self { samples })
    }

    /// Shape for `2^resolution + 1` samples.
    pub const fn with_resolution(resolution: u32) -> Self {
        Self::new((1 << resolution) + 1)
    }

    /// Number of samples on the line.
    #[inline]
    pub const fn samples(self) -> usize {
        self.samples
    }

    /// Number of cells (adjacent sample pairs) on the line, which is also the
    /// number of leaves.
    #[inline]
    pub const fn cells(self) -> usize {
        self.samples - 1
    }

    /// Number of tree nodes: `2(N - 1) - 1`.
    #[inline]
    pub const fn node_count(self) -> usize {
        node_count(self.samples)
    }

    /// Index of the first leaf node.
    #[inline]
    pub const fn first_leaf_index(self) -> usize {
        first_leaf_index(self.node_count())
    }

    /// Whether `index` is a leaf.
    #[inline]
    pub const fn is_leaf(self, index: usize) -> bool {
        index >= self.first_leaf_index()
    }

    /// Leaf node covering `cell`.
    #[inline]
    pub const fn leaf_for_cell(self, cell: usize) -> usize {
        debug_assert!(cell < self.cells(), "cell out of range");
        self.first_leaf_index() + cell
    }

    /// Cell interval spanned by a node.
    ///
    /// The root spans `[0, N - 1)`, a node spans exactly the union of its two
    /// children, and the two children are adjacent and disjoint.
    pub const fn edges(self, index: usize) -> Span {
        debug_assert!(index < self.node_count(), "node out of range");
        let layer = layer_of(index);
        let width = self.cells() >> layer;
        let offset = index - ((1 << layer) - 1);
        let min = offset * width;
        Span::new(min, min + width)
    }

    /// The largest node whose span starts exactly at `min` and ends at or before
    /// `max`.
    ///
    /// Only a leaf can start at an odd cell, so that case is answered directly.
    /// Otherwise the search walks down from the root toward `min`.
    pub fn largest_span(self, min: usize, max: usize) -> usize {
        debug_assert!(
            min < max && max <= self.cells(),
            "largest_span needs a non-empty range inside the line"
        );
        if min % 2 == 1 {
            return self.leaf_for_cell(min);
        }
        let mut index = 0;
        loop {
            let edges = self.edges(index);
            if edges.min == min && edges.max <= max {
                return index;
            }
            index = self.child_toward(index, edges, min);
        }
    }

    /// The child of `index` whose span contains `cell`.
    #[inline]
    pub(crate) const fn child_toward(self, index: usize, edges: Span, cell: usize) -> usize {
        let first = first_child_of(index);
        if cell < edges.midpoint() { first } else { first + 1 }
    }
}

/// Number of nodes in a tree over `samples` samples: `2(N - 1) - 1`.
#[inline]
pub const fn node_count(samples: usize) -> usize {
    2 * (samples - 1) - 1
}

/// Index of the first leaf in a tree with `node_count` nodes.
#[inline]
pub const fn first_leaf_index(node_count: usize) -> usize {
    node_count / 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn shapes() -> impl Iterator<Item = SpanShape> {
        (1..=8).map(SpanShape::with_resolution)
    }

    #[test]
    fn node_count_and_root_edges() {
        for shape in shapes() {
            let n = shape.samples();
            assert_eq!(shape.node_count(), 2 * (n - 1) - 1);
            assert_eq!(shape.edges(0), Span::new(0, n - 1));
            assert_eq!(shape.edges(0).sample_count(), n);
        }
    }

    #[test]
    fn leaves_span_two_samples() {
        for shape in shapes() {
            let first = shape.first_leaf_index();
            for (cell, leaf) in (first..shape.node_count()).enumerate() {
                let edges = shape.edges(leaf);
                assert_eq!(edges.sample_count(), 2, "leaf {leaf} of {shape:?}");
                assert_eq!(edges.min, cell);
                assert_eq!(shape.leaf_for_cell(cell), leaf);
            }
        }
    }

    #[test]
    fn children_partition_their_parent() {
        for shape in shapes() {
            for parent in 0..shape.first_leaf_index() {
                let first = first_child_of(parent);
                let a = shape.edges(first);
                let b = shape.edges(first + 1);
                let p = shape.edges(parent);
                assert_eq!(a.max, b.min, "siblings must be adjacent");
                assert_eq!(a.min, p.min);
                assert_eq!(b.max, p.max);
                assert_eq!(parent_of(first), parent);
                assert_eq!(parent_of(first + 1), parent);
                assert!(is_first_child(first));
                assert!(!is_first_child(first + 1));
            }
        }
    }

    #[test]
    fn layer_positions() {
        assert_eq!(first_index_in_layer(0), 0);
        assert_eq!(first_index_in_layer(1), 1);
        assert_eq!(first_index_in_layer(2), 1);
        assert_eq!(first_index_in_layer(5), 3);
        assert_eq!(first_index_in_layer(14), 7);
        let last: Vec<_> = (0..31).filter(|&i| is_last_in_layer(i)).collect();
        assert_eq!(last, [0, 2, 6, 14, 30]);
        let shape = SpanShape::with_resolution(4);
        for i in 0..shape.node_count() {
            assert_eq!(
                is_last_in_layer(i),
                shape.edges(i).max == shape.cells(),
                "node {i}"
            );
            assert_eq!(shape.edges(first_index_in_layer(i)).min, 0);
        }
    }

    #[test]
    fn largest_span_starts_at_min_and_fits() {
        let shape = SpanShape::with_resolution(4);
        for min in 0..shape.cells() {
            for max in min + 1..=shape.cells() {
                let node = shape.largest_span(min, max);
                let edges = shape.edges(node);
                assert_eq!(edges.min, min);
                assert!(edges.max <= max);
                // Nothing larger starting at `min` fits: the parent either starts
                // elsewhere or overruns `max`.
                if node != 0 {
                    let parent = shape.edges(parent_of(node));
                    assert!(parent.min != min || parent.max > max);
                }
            }
        }
    }

    #[test]
    fn largest_span_examples() {
        let shape = SpanShape::with_resolution(3);
        assert_eq!(shape.largest_span(0, 8), 0);
        assert_eq!(shape.edges(shape.largest_span(0, 7)), Span::new(0, 4));
        assert_eq!(shape.edges(shape.largest_span(3, 8)), Span::new(3, 4));
        assert_eq!(shape.edges(shape.largest_span(4, 8)), Span::new(4, 8));
        assert_eq!(shape.edges(shape.largest_span(2, 3)), Span::new(2, 3));
    }

    #[test]
    fn rejects_bad_sample_counts() {
        assert!(SpanShape::try_new(0).is_none());
        assert!(SpanShape::try_new(2).is_none());
        assert!(SpanShape::try_new(4).is_none());
        assert!(SpanShape::try_new(10).is_none());
        assert!(SpanShape::try_new(3).is_some());
        assert!(SpanShape::try_new(17).is_some());
    }

    #[test]
    #[should_panic(expected = "2^k + 1")]
    fn new_panics_on_bad_sample_count() {
        let _ = SpanShape::new(6);
    }
}
