// Copyright 2025 the Padi Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reconciliation of candidate rectangles against a layer's accepted tiling.
//!
//! Candidates come in one at a time. Each is compared with every accepted
//! rectangle it overlaps:
//!
//! - inside an accepted rectangle: the candidate is dropped;
//! - covering an accepted rectangle: that rectangle is replaced;
//! - overlapping partially: the candidate is halved across the axis on which
//!   it oversteps, and both halves go back to the caller's queue.
//!
//! None of these steps changes the union of accepted and pending rectangles,
//! and the accepted list stays pairwise disjoint.

use core::ops::AddAssign;

use padi_span::Rect;

/// Counters for one or more layers of candidate processing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Candidates seeded from strip plots.
    pub seeded: usize,
    /// Cuts made to align candidates with the partition across the strips.
    pub partition_splits: usize,
    /// Candidates dropped because an accepted rectangle already covered them.
    pub discarded: usize,
    /// Accepted rectangles removed because a candidate covered them.
    pub replaced: usize,
    /// Candidates halved because of a partial overlap.
    pub halved: usize,
    /// Rectangles in the final tilings.
    pub accepted: usize,
}

impl AddAssign for ReconcileStats {
    fn add_assign(&mut self, rhs: Self) {
        self.seeded += rhs.seeded;
        self.partition_splits += rhs.partition_splits;
        self.discarded += rhs.discarded;
        self.replaced += rhs.replaced;
        self.halved += rhs.halved;
        self.accepted += rhs.accepted;
    }
}

/// Result of offering a candidate to a [`LayerTiling`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The candidate joined the tiling, replacing `replaced` rectangles it covered.
    Accepted {
        /// Number of accepted rectangles removed.
        replaced: usize,
    },
    /// An accepted rectangle already covers the candidate.
    Discarded,
    /// The candidate overlapped an accepted rectangle partially and was halved.
    Halved(Rect, Rect),
}

/// Accepted rectangles of one layer.
#[derive(Clone, Debug, Default)]
pub struct LayerTiling {
    accepted: Vec<Rect>,
}

impl LayerTiling {
    /// Create an empty tiling.
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a candidate.
    pub fn reconcile(&mut self, candidate: Rect) -> Outcome {
        if candidate.is_empty() {
            return Outcome::Discarded;
        }
        let mut covered = Vec::new();
        for (i, existing) in self.accepted.iter().enumerate() {
            if !existing.overlaps(&candidate) {
                continue;
            }
            if existing.contains(&candidate) {
                return Outcome::Discarded;
            }
            if candidate.contains(existing) {
                covered.push(i);
                continue;
            }
            let (a, b) = halve_against(&candidate, existing);
            return Outcome::Halved(a, b);
        }
        let replaced = covered.len();
        for i in covered.into_iter().rev() {
            self.accepted.swap_remove(i);
        }
        self.accepted.push(candidate);
        Outcome::Accepted { replaced }
    }

    /// Accepted rectangles, in no particular order.
    pub fn rects(&self) -> &[Rect] {
        &self.accepted
    }

    /// Take the accepted rectangles.
    pub fn into_rects(self) -> Vec<Rect> {
        self.accepted
    }

    /// Number of accepted rectangles.
    pub fn len(&self) -> usize {
        self.accepted.len()
    }

    /// True if nothing has been accepted.
    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }
}

/// Halve `candidate` across an axis on which it extends past `existing`.
///
/// When it oversteps on both axes the longer side is cut, x on a tie. Halving at
/// the midpoint keeps partition-aligned rectangles aligned.
fn halve_against(candidate: &Rect, existing: &Rect) -> (Rect, Rect) {
    let over_x = candidate.min_x < existing.min_x || candidate.max_x > existing.max_x;
    let over_y = candidate.min_y < existing.min_y || candidate.max_y > existing.max_y;
    let cut_x = match (over_x, over_y) {
        (true, true) => candidate.width() >= candidate.height(),
        (over_x, _) => over_x,
    };
    if cut_x {
        candidate.split_x(candidate.x_span().midpoint())
    } else {
        candidate.split_y(candidate.y_span().midpoint())
    }
}
