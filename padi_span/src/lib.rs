// Copyright 2025 the Padi Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=padi_span --heading-base-level=0

//! Padi Span: an implicit binary span tree over a line of `2^k + 1` samples.
//!
//! The tree partitions the `2^k` cells of a line into a power-of-two hierarchy:
//! the root covers the whole line, each node covers exactly the union of its two
//! children, and the leaves cover one cell (two samples) each.
//!
//! - Nodes live in a flat array in heap order; no bounds are stored per node.
//! - [`SpanShape`] holds all of the index arithmetic, so it can be tested apart
//!   from any payload.
//! - [`SpanTree`] stores one value per node and answers top-down searches.
//! - [`ChainLink`] and [`SpanTree::chain`] walk a chain of linked spans that
//!   covers the line from left to right without gaps or overlaps.
//!
//! # Example
//!
//! ```rust
//! use padi_span::{Span, SpanShape, SpanTree};
//!
//! // Nine samples, eight cells, fifteen nodes.
//! let shape = SpanShape::new(9);
//! assert_eq!(shape.node_count(), 15);
//! assert_eq!(shape.edges(0), Span::new(0, 8));
//!
//! // The largest node that starts at cell 4 and ends by cell 7.
//! let node = shape.largest_span(4, 7);
//! assert_eq!(shape.edges(node), Span::new(4, 6));
//!
//! // Mark a node and find it again from any cell it covers.
//! let mut tree = SpanTree::new(shape, false);
//! tree.set(node, true);
//! assert_eq!(tree.find_span(5, |_, marked| *marked), Some(node));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod shape;
pub mod tree;
pub mod types;

pub use shape::{
    SpanShape, first_child_of, first_index_in_layer, first_leaf_index, is_first_child,
    is_last_in_layer, layer_of, node_count, parent_of,
};
pub use tree::{Chain, ChainLink, SpanTree};
pub use types::{Rect, Span};
