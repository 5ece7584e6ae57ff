// Copyright 2025 the Padi Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interval primitives in cell coordinates.
//!
//! Cell `c` lies between samples `c` and `c + 1`. Intervals are half-open over
//! cells, so a span `[min, max)` touches samples `min..=max`.

/// Half-open interval of cells along one axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    /// First cell.
    pub min: usize,
    /// One past the last cell.
    pub max: usize,
}

impl Span {
    /// Create a span from its bounds.
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Number of cells covered.
    #[inline]
    pub const fn len(&self) -> usize {
        self.max - self.min
    }

    /// True if the span covers no cells.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.max <= self.min
    }

    /// Number of samples touched, one more than the number of cells.
    #[inline]
    pub const fn sample_count(&self) -> usize {
        self.len() + 1
    }

    /// Cell boundary halfway through the span.
    #[inline]
    pub const fn midpoint(&self) -> usize {
        self.min + self.len() / 2
    }

    /// Whether `cell` lies inside the span.
    #[inline]
    pub const fn contains(&self, cell: usize) -> bool {
        self.min <= cell && cell < self.max
    }
}

/// Axis-aligned rectangle of cells, half-open on both axes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Minimum x (left)
    pub min_x: usize,
    /// Minimum y (top)
    pub min_y: usize,
    /// Maximum x (right), exclusive
    pub max_x: usize,
    /// Maximum y (bottom), exclusive
    pub max_y: usize,
}

impl Rect {
    /// Create a rectangle from min/max corners.
    pub const fn new(min_x: usize, min_y: usize, max_x: usize, max_y: usize) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Rectangle spanning `x` horizontally and `y` vertically.
    pub const fn from_spans(x: Span, y: Span) -> Self {
        Self::new(x.min, y.min, x.max, y.max)
    }

    /// Horizontal extent.
    #[inline]
    pub const fn x_span(&self) -> Span {
        Span::new(self.min_x, self.max_x)
    }

    /// Vertical extent.
    #[inline]
    pub const fn y_span(&self) -> Span {
        Span::new(self.min_y, self.max_y)
    }

    /// Width in cells.
    #[inline]
    pub const fn width(&self) -> usize {
        self.max_x.saturating_sub(self.min_x)
    }

    /// Height in cells.
    #[inline]
    pub const fn height(&self) -> usize {
        self.max_y.saturating_sub(self.min_y)
    }

    /// Number of cells covered.
    #[inline]
    pub const fn area(&self) -> usize {
        self.width() * self.height()
    }

    /// True if the rectangle covers no cells.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.max_x <= self.min_x || self.max_y <= self.min_y
    }

    /// Whether the cell at `(x, y)` lies inside.
    #[inline]
    pub const fn contains_cell(&self, x: usize, y: usize) -> bool {
        self.min_x <= x && x < self.max_x && self.min_y <= y && y < self.max_y
    }

    /// Whether `other` lies entirely inside this rectangle.
    #[inline]
    pub const fn contains(&self, other: &Self) -> bool {
        self.min_x <= other.min_x
            && self.min_y <= other.min_y
            && other.max_x <= self.max_x
            && other.max_y <= self.max_y
    }

    /// Whether the two rectangles share at least one cell.
    #[inline]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }

    /// The intersection of two rectangles; empty if they do not overlap.
    pub fn intersect(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.max(other.min_x),
            min_y: self.min_y.max(other.min_y),
            max_x: self.max_x.min(other.max_x),
            max_y: self.max_y.min(other.max_y),
        }
    }

    /// Split at cell boundary `x` into a left and right part.
    pub const fn split_x(&self, x: usize) -> (Self, Self) {
        debug_assert!(self.min_x < x && x < self.max_x, "split outside the rectangle");
        (
            Self::new(self.min_x, self.min_y, x, self.max_y),
            Self::new(x, self.min_y, self.max_x, self.max_y),
        )
    }

    /// Split at cell boundary `y` into a top and bottom part.
    pub const fn split_y(&self, y: usize) -> (Self, Self) {
        debug_assert!(self.min_y < y && y < self.max_y, "split outside the rectangle");
        (
            Self::new(self.min_x, self.min_y, self.max_x, y),
            Self::new(self.min_x, y, self.max_x, self.max_y),
        )
    }
}
