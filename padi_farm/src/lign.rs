// Copyright 2025 the Padi Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ligns: span trees of dikes over one line of samples.
//!
//! Every node of a lign records which boundary crossings occur inside its span
//! and, through `simplest`, the largest simple node that shares its left edge.
//! Following those links with [`SpanTree::chain`] yields the largest-simple-span
//! chain of the line.

use padi_span::{ChainLink, SpanShape, SpanTree, first_child_of, is_first_child, parent_of};

use crate::grid::Occupancy;
use crate::types::Frame;
use crate::util::{map_units, node_value};

bitflags::bitflags! {
    /// Boundary crossings inside a span.
    ///
    /// A span is simple when it crosses the boundary at most once. Because solid
    /// and empty alternate along a line, any two crossings include one of each
    /// direction, so the union of the children's flags is exactly the parent's.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Simplicity: u8 {
        /// Crosses from empty to solid.
        const RISING  = 0b0000_0001;
        /// Crosses from solid to empty.
        const FALLING = 0b0000_0010;
    }
}

impl Simplicity {
    /// Crossing of the cell between two adjacent samples.
    #[inline]
    pub fn of_cell(a: bool, b: bool) -> Self {
        match (a, b) {
            (false, true) => Self::RISING,
            (true, false) => Self::FALLING,
            _ => Self::empty(),
        }
    }

    /// At most one crossing.
    #[inline]
    pub fn is_simple(self) -> bool {
        !self.is_all()
    }
}

/// One node of a lign.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Dike {
    /// Crossings inside the node's span.
    pub simplicity: Simplicity,
    /// Largest simple node sharing this node's left edge.
    pub simplest: u16,
}

impl ChainLink for Dike {
    #[inline]
    fn link(&self) -> usize {
        usize::from(self.simplest)
    }
}

/// Span tree of dikes over one line of samples.
pub type Lign = SpanTree<Dike>;

/// Build the lign of a line whose sample `i` is solid when `occupied(i)`.
pub fn build_lign(shape: SpanShape, occupied: impl Fn(usize) -> bool) -> Lign {
    let first_leaf = shape.first_leaf_index();
    let mut lign = Lign::new(shape, Dike::default());
    let dikes = lign.values_mut();

    let mut prev = occupied(0);
    for cell in 0..shape.cells() {
        let next = occupied(cell + 1);
        dikes[first_leaf + cell].simplicity = Simplicity::of_cell(prev, next);
        prev = next;
    }

    for index in (0..first_leaf).rev() {
        let first = first_child_of(index);
        dikes[index].simplicity = dikes[first].simplicity | dikes[first + 1].simplicity;
    }

    // A simple root covers the whole line; every link is already 0.
    if dikes[0].simplicity.is_simple() {
        return lign;
    }

    // Heap order visits layers top-down, so a parent is final before its children.
    for index in 1..dikes.len() {
        let simple = dikes[index].simplicity.is_simple();
        if is_first_child(index) {
            let parent = parent_of(index);
            if dikes[parent].simplicity.is_simple() {
                dikes[index].simplest = dikes[parent].simplest;
            } else if simple {
                // Topmost simple node on this left edge: every ancestor sharing
                // the edge links down to it.
                let link = node_value(index);
                dikes[index].simplest = link;
                let mut up = index;
                while is_first_child(up) && up != 0 {
                    up = parent_of(up);
                    dikes[up].simplest = link;
                }
            }
        } else if simple {
            dikes[index].simplest = node_value(index);
        }
    }
    lign
}

/// All ligns of a grid along the two planar axes of a frame.
#[derive(Clone, Debug)]
pub struct LignSet {
    shape: SpanShape,
    /// Ligns along `u`, indexed by `w * N + v`.
    along_u: Vec<Lign>,
    /// Ligns along `v`, indexed by `w * N + u`.
    along_v: Vec<Lign>,
}

impl LignSet {
    /// Build every planar lign of `occupancy` in `frame`.
    pub fn build(occupancy: &Occupancy, frame: Frame, parallel: bool) -> Self {
        let n = occupancy.side();
        let shape = SpanShape::new(n);
        let along_u = map_units(parallel, n * n, |line| {
            let (w, v) = (line / n, line % n);
            build_lign(shape, |u| occupancy.is_solid_in(frame, u, v, w))
        });
        let along_v = map_units(parallel, n * n, |line| {
            let (w, u) = (line / n, line % n);
            build_lign(shape, |v| occupancy.is_solid_in(frame, u, v, w))
        });
        Self {
            shape,
            along_u,
            along_v,
        }
    }

    /// Shape shared by every lign.
    #[inline]
    pub fn shape(&self) -> SpanShape {
        self.shape
    }

    /// Lign along `u` at sample row `v` of layer `w`.
    #[inline]
    pub fn along_u(&self, v: usize, w: usize) -> &Lign {
        &self.along_u[w * self.shape.samples() + v]
    }

    /// Lign along `v` at sample column `u` of layer `w`.
    #[inline]
    pub fn along_v(&self, u: usize, w: usize) -> &Lign {
        &self.along_v[w * self.shape.samples() + u]
    }

    /// Ligns along `u` of layer `w`, indexed by `v`.
    #[inline]
    pub fn rows(&self, w: usize) -> &[Lign] {
        let n = self.shape.samples();
        &self.along_u[w * n..(w + 1) * n]
    }

    /// Ligns along `v` of layer `w`, indexed by `u`.
    #[inline]
    pub fn columns(&self, w: usize) -> &[Lign] {
        let n = self.shape.samples();
        &self.along_v[w * n..(w + 1) * n]
    }

    /// Number of ligns in the set.
    pub fn len(&self) -> usize {
        self.along_u.len() + self.along_v.len()
    }

    /// True if the set holds no ligns.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
