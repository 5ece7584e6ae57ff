// Copyright 2025 the Padi Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat-array span tree and the simple-span chain walk.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::shape::{SpanShape, is_last_in_layer};
use crate::types::Span;

/// A value per node of an implicit span tree, stored in heap order.
#[derive(Clone, PartialEq, Eq)]
pub struct SpanTree<T> {
    shape: SpanShape,
    values: Vec<T>,
}

impl<T: Debug> Debug for SpanTree<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SpanTree")
            .field("samples", &self.shape.samples())
            .field("root", &self.values.first())
            .finish_non_exhaustive()
    }
}

impl<T: Clone> SpanTree<T> {
    /// Create a tree with every node set to `fill`.
    pub fn new(shape: SpanShape, fill: T) -> Self {
        Self {
            shape,
            values: alloc::vec![fill; shape.node_count()],
        }
    }
}

impl<T> SpanTree<T> {
    /// Create a tree whose node `i` holds `f(i)`.
    pub fn from_fn(shape: SpanShape, f: impl FnMut(usize) -> T) -> Self {
        Self {
            shape,
            values: (0..shape.node_count()).map(f).collect(),
        }
    }

    /// Shape of the tree.
    #[inline]
    pub fn shape(&self) -> SpanShape {
        self.shape
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; a valid shape has at least three nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Node values in heap order.
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Mutable node values in heap order.
    #[inline]
    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// Value of node `index`.
    #[inline]
    pub fn get(&self, index: usize) -> &T {
        &self.values[index]
    }

    /// Mutable value of node `index`.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> &mut T {
        &mut self.values[index]
    }

    /// Replace the value of node `index`.
    #[inline]
    pub fn set(&mut self, index: usize, value: T) {
        self.values[index] = value;
    }

    /// Iterate over `(index, value)` pairs in heap order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.values.iter().enumerate()
    }

    /// Cell interval spanned by node `index`.
    #[inline]
    pub fn edges(&self, index: usize) -> Span {
        self.shape.edges(index)
    }

    /// Walk from the root toward `cell` and return the first node accepted by
    /// `predicate`, or `None` if no node on that path is accepted.
    pub fn find_span(&self, cell: usize, mut predicate: impl FnMut(usize, &T) -> bool) -> Option<usize> {
        debug_assert!(cell < self.shape.cells(), "cell out of range");
        let mut index = 0;
        loop {
            if predicate(index, &self.values[index]) {
                return Some(index);
            }
            if self.shape.is_leaf(index) {
                return None;
            }
            let edges = self.shape.edges(index);
            index = self.shape.child_toward(index, edges, cell);
        }
    }
}

/// A node value that names the next node of a simple-span chain.
///
/// For a node `i`, the link stored at `i` is the largest accepted node that
/// shares `i`'s left edge.
pub trait ChainLink {
    /// Index of the linked node.
    fn link(&self) -> usize;
}

impl ChainLink for u16 {
    #[inline]
    fn link(&self) -> usize {
        usize::from(*self)
    }
}

impl<T: ChainLink> SpanTree<T> {
    /// Walk the chain of linked spans from the left end of the line to the right.
    ///
    /// Starting from the root, each step follows the link stored at the node just
    /// after the current one, which is the node starting where the current one
    /// ends. The walk stops at the first node that reaches the end of the line.
    pub fn chain(&self) -> Chain<'_, T> {
        Chain {
            tree: self,
            current: 0,
            done: false,
        }
    }
}

/// Iterator over the node indices of a simple-span chain.
///
/// Created by [`SpanTree::chain`].
#[derive(Debug)]
pub struct Chain<'a, T> {
    tree: &'a SpanTree<T>,
    current: usize,
    done: bool,
}

impl<T: ChainLink> Iterator for Chain<'_, T> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.done {
            return None;
        }
        let next = self.tree.values[self.current + 1].link();
        debug_assert!(
            self.tree.shape.edges(next).min == self.tree.shape.edges(self.current + 1).min,
            "chain link must share the left edge of its node"
        );
        self.done = is_last_in_layer(next);
        self.current = next;
        Some(next)
    }
}

impl<T: ChainLink> core::iter::FusedIterator for Chain<'_, T> {}
