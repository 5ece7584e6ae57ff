// Copyright 2025 the Padi Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types: axes, the planar frame of a layer, and padis.

use padi_span::Rect;

/// One of the three grid axes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Axis {
    /// First grid coordinate.
    X,
    /// Second grid coordinate.
    Y,
    /// Third grid coordinate.
    #[default]
    Z,
}

/// Coordinate frame of a layer stack.
///
/// Layers are stacked along `w`; padis are rectangles in the `(u, v)` plane. The
/// planar axes follow `w` cyclically: layering along Z tiles the XY plane, along
/// X the YZ plane, and along Y the ZX plane.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Frame {
    /// First planar axis; rectangle `x` extents run along it.
    pub u: Axis,
    /// Second planar axis; rectangle `y` extents run along it.
    pub v: Axis,
    /// Layer axis.
    pub w: Axis,
}

impl Frame {
    /// Frame whose layers are stacked along `layer_axis`.
    pub const fn new(layer_axis: Axis) -> Self {
        match layer_axis {
            Axis::Z => Self {
                u: Axis::X,
                v: Axis::Y,
                w: Axis::Z,
            },
            Axis::X => Self {
                u: Axis::Y,
                v: Axis::Z,
                w: Axis::X,
            },
            Axis::Y => Self {
                u: Axis::Z,
                v: Axis::X,
                w: Axis::Y,
            },
        }
    }

    /// Grid coordinates `(x, y, z)` of frame coordinates `(u, v, w)`.
    #[inline]
    pub const fn to_grid(self, u: usize, v: usize, w: usize) -> (usize, usize, usize) {
        match self.w {
            Axis::Z => (u, v, w),
            Axis::X => (w, u, v),
            Axis::Y => (v, w, u),
        }
    }

    /// Frame coordinates `(u, v, w)` of grid coordinates `(x, y, z)`.
    #[inline]
    pub const fn from_grid(self, x: usize, y: usize, z: usize) -> (usize, usize, usize) {
        match self.w {
            Axis::Z => (x, y, z),
            Axis::X => (y, z, x),
            Axis::Y => (z, x, y),
        }
    }
}

/// Occupancy content of a padi.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Fill {
    /// Every sample the padi touches is below the threshold.
    Empty,
    /// Every sample the padi touches is above the threshold.
    Solid,
    /// The padi contains a boundary: each of its lines crosses it at most once.
    Mixed,
}

/// A rectangle of one layer, aligned to the power-of-two partition on both
/// planar axes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Padi {
    /// Cell rectangle in the `(u, v)` plane of the layer.
    pub rect: Rect,
    /// Layer coordinate along `w`.
    pub layer: usize,
    /// Occupancy content.
    pub fill: Fill,
}

impl Padi {
    /// Whether the padi covers the planar cell `(u, v)`.
    #[inline]
    pub const fn contains_cell(&self, u: usize, v: usize) -> bool {
        self.rect.contains_cell(u, v)
    }

    /// Rectangle in renderer units, scaling cells by `cell_size`.
    #[cfg(feature = "kurbo")]
    pub fn to_kurbo_rect(&self, cell_size: f64) -> kurbo::Rect {
        let r = &self.rect;
        kurbo::Rect::new(
            r.min_x as f64 * cell_size,
            r.min_y as f64 * cell_size,
            r.max_x as f64 * cell_size,
            r.max_y as f64 * cell_size,
        )
    }
}

/// All padis of one layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PadiLayer {
    /// Layer coordinate along `w`.
    pub layer: usize,
    /// Pairwise disjoint padis covering the layer, sorted by `(min_y, min_x)`.
    pub padis: Vec<Padi>,
}

impl PadiLayer {
    /// The padi covering planar cell `(u, v)`, by linear scan.
    pub fn padi_at(&self, u: usize, v: usize) -> Option<&Padi> {
        self.padis.iter().find(|p| p.contains_cell(u, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_round_trip_grid_coordinates() {
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            let frame = Frame::new(axis);
            let (u, v, w) = frame.from_grid(1, 2, 3);
            assert_eq!(frame.to_grid(u, v, w), (1, 2, 3), "{axis:?}");
        }
    }

    #[test]
    fn layer_axis_is_w() {
        let frame = Frame::new(Axis::X);
        assert_eq!(frame.w, Axis::X);
        // A point at x = 7 lands in layer 7.
        assert_eq!(frame.from_grid(7, 0, 0).2, 7);
        let frame = Frame::new(Axis::Y);
        assert_eq!(frame.from_grid(0, 7, 0).2, 7);
        assert_eq!((frame.u, frame.v), (Axis::Z, Axis::X));
    }
}
