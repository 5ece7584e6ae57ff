// Copyright 2025 the Padi Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors surfaced by grid validation and index compaction.

use crate::types::Axis;

/// Failures of a farm run.
///
/// Invalid input is rejected before any phase starts. The index variants are
/// invariant violations: they mean the padi tiling of a layer overlaps itself or
/// leaves a hole, which is a bug in tiling rather than a property of the input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FarmError {
    /// The requested resolution is outside `1..=MAX_RESOLUTION`.
    #[error("resolution {resolution} is outside 1..={max}")]
    InvalidResolution {
        /// Requested resolution.
        resolution: u32,
        /// Largest supported resolution.
        max: u32,
    },
    /// The sample buffer does not hold `N³` values.
    #[error("expected {expected} samples for a {side}³ grid, got {actual}")]
    SampleCount {
        /// Samples per side.
        side: usize,
        /// `side³`.
        expected: usize,
        /// Length of the buffer handed in.
        actual: usize,
    },
    /// Two padis claimed the same span of one line of the index.
    #[error("padis overlap in layer {layer} at cell ({u}, {v}) along {axis:?}")]
    DoubleAssignment {
        /// Layer coordinate.
        layer: usize,
        /// Axis of the line that was written twice.
        axis: Axis,
        /// Planar cell coordinate along `u`.
        u: usize,
        /// Planar cell coordinate along `v`.
        v: usize,
    },
    /// A cell of a layer is not covered by any padi.
    #[error("no padi covers layer {layer} at cell ({u}, {v}) along {axis:?}")]
    CoverageGap {
        /// Layer coordinate.
        layer: usize,
        /// Axis of the line with the hole.
        axis: Axis,
        /// Planar cell coordinate along `u`.
        u: usize,
        /// Planar cell coordinate along `v`.
        v: usize,
    },
}
