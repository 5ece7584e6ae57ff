// Copyright 2025 the Padi Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sample grid input and the derived occupancy grid.

use rayon::prelude::*;

use crate::error::FarmError;
use crate::types::Frame;
use crate::util::map_units;

/// Largest supported resolution. Node indices are stored as `u16`, which caps a
/// line at `2^15` cells.
pub const MAX_RESOLUTION: u32 = 15;

/// Samples per side for `resolution`: `2^resolution + 1`.
#[inline]
pub const fn side_for_resolution(resolution: u32) -> usize {
    (1 << resolution) + 1
}

fn check_resolution(resolution: u32) -> Result<usize, FarmError> {
    if resolution == 0 || resolution > MAX_RESOLUTION {
        return Err(FarmError::InvalidResolution {
            resolution,
            max: MAX_RESOLUTION,
        });
    }
    Ok(side_for_resolution(resolution))
}

fn check_len(side: usize, actual: usize) -> Result<(), FarmError> {
    let expected = side * side * side;
    if actual != expected {
        return Err(FarmError::SampleCount {
            side,
            expected,
            actual,
        });
    }
    Ok(())
}

/// External scalar field evaluated at grid points.
pub trait FieldSampler: Sync {
    /// Field value at grid point `(x, y, z)`.
    fn sample(&self, x: usize, y: usize, z: usize) -> f32;
}

impl<F> FieldSampler for F
where
    F: Fn(usize, usize, usize) -> f32 + Sync,
{
    #[inline]
    fn sample(&self, x: usize, y: usize, z: usize) -> f32 {
        self(x, y, z)
    }
}

/// An `N × N × N` grid of scalar samples with `N = 2^resolution + 1`, plus the
/// threshold that separates solid from empty.
///
/// Values are stored flat, indexed by `x + y * N + z * N * N`.
#[derive(Clone)]
pub struct SampleGrid {
    resolution: u32,
    side: usize,
    values: Vec<f32>,
    threshold: f32,
}

impl SampleGrid {
    /// Wrap an existing sample buffer.
    pub fn new(resolution: u32, values: Vec<f32>, threshold: f32) -> Result<Self, FarmError> {
        let side = check_resolution(resolution)?;
        check_len(side, values.len())?;
        Ok(Self {
            resolution,
            side,
            values,
            threshold,
        })
    }

    /// Build a grid by evaluating `f` at every grid point, sequentially.
    pub fn from_fn(
        resolution: u32,
        threshold: f32,
        mut f: impl FnMut(usize, usize, usize) -> f32,
    ) -> Result<Self, FarmError> {
        let side = check_resolution(resolution)?;
        let mut values = Vec::with_capacity(side * side * side);
        for z in 0..side {
            for y in 0..side {
                for x in 0..side {
                    values.push(f(x, y, z));
                }
            }
        }
        Self::new(resolution, values, threshold)
    }

    /// Build a grid by evaluating `sampler` at every grid point in parallel.
    pub fn sample(
        resolution: u32,
        threshold: f32,
        sampler: &impl FieldSampler,
    ) -> Result<Self, FarmError> {
        let side = check_resolution(resolution)?;
        let mut values = vec![0.0; side * side * side];
        values
            .par_iter_mut()
            .enumerate()
            .for_each(|(index, value)| {
                let x = index % side;
                let y = (index / side) % side;
                let z = index / (side * side);
                *value = sampler.sample(x, y, z);
            });
        Self::new(resolution, values, threshold)
    }

    /// Grid resolution `k`, with `2^k + 1` samples per side.
    #[inline]
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Samples per side.
    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Solid/empty threshold.
    #[inline]
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Sample value at `(x, y, z)`.
    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> f32 {
        let n = self.side;
        self.values[x + y * n + z * n * n]
    }

    /// Raw sample buffer.
    #[inline]
    pub fn values(&self) -> &[f32] {
        &self.values
    }
}

impl core::fmt::Debug for SampleGrid {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SampleGrid")
            .field("resolution", &self.resolution)
            .field("side", &self.side)
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}

/// Boolean occupancy derived from a [`SampleGrid`]: a sample is solid when its
/// value is strictly above the threshold.
#[derive(Clone, PartialEq, Eq)]
pub struct Occupancy {
    resolution: u32,
    side: usize,
    solid: Vec<bool>,
}

impl core::fmt::Debug for Occupancy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Occupancy")
            .field("side", &self.side)
            .field("solid", &self.solid_count())
            .finish_non_exhaustive()
    }
}

impl Occupancy {
    /// Threshold every sample of `grid`.
    pub fn from_grid(grid: &SampleGrid, parallel: bool) -> Self {
        let threshold = grid.threshold;
        let values = &grid.values;
        let n = grid.side;
        // One unit per z slice.
        let slices = map_units(parallel, n, |z| {
            values[z * n * n..(z + 1) * n * n]
                .iter()
                .map(|&v| v > threshold)
                .collect::<Vec<_>>()
        });
        Self {
            resolution: grid.resolution,
            side: n,
            solid: slices.concat(),
        }
    }

    /// Wrap a precomputed boolean buffer, indexed like [`SampleGrid`].
    pub fn from_bools(resolution: u32, solid: Vec<bool>) -> Result<Self, FarmError> {
        let side = check_resolution(resolution)?;
        check_len(side, solid.len())?;
        Ok(Self {
            resolution,
            side,
            solid,
        })
    }

    /// Build occupancy from a predicate over grid points.
    pub fn from_fn(
        resolution: u32,
        mut f: impl FnMut(usize, usize, usize) -> bool,
    ) -> Result<Self, FarmError> {
        let side = check_resolution(resolution)?;
        let mut solid = Vec::with_capacity(side * side * side);
        for z in 0..side {
            for y in 0..side {
                for x in 0..side {
                    solid.push(f(x, y, z));
                }
            }
        }
        Self::from_bools(resolution, solid)
    }

    /// Grid resolution `k`.
    #[inline]
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Samples per side.
    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Whether grid point `(x, y, z)` is solid.
    #[inline]
    pub fn is_solid(&self, x: usize, y: usize, z: usize) -> bool {
        let n = self.side;
        self.solid[x + y * n + z * n * n]
    }

    /// Whether frame point `(u, v, w)` is solid.
    #[inline]
    pub fn is_solid_in(&self, frame: Frame, u: usize, v: usize, w: usize) -> bool {
        let (x, y, z) = frame.to_grid(u, v, w);
        self.is_solid(x, y, z)
    }

    /// Number of solid samples.
    pub fn solid_count(&self) -> usize {
        self.solid.iter().filter(|&&s| s).count()
    }
}
