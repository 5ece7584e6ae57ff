// Copyright 2025 the Padi Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The phase pipeline: threshold → ligns → strips → padis → index.
//!
//! Each phase consumes the owned output of the one before it and runs to
//! completion before the next starts; the units inside a phase are independent.
//! Between phases control returns to the caller, who may continue right away,
//! resume on a later turn, or drop the pipeline to cancel. Nothing of an
//! unfinished run is ever handed out.

use core::ops::ControlFlow;
use std::time::Instant;

use padi_span::{Rect, SpanShape};

use crate::config::FarmConfig;
use crate::error::FarmError;
use crate::grid::{Occupancy, SampleGrid};
use crate::index::PadiIndex;
use crate::lign::LignSet;
use crate::padi::build_layers;
use crate::reconcile::ReconcileStats;
use crate::strip::StripSet;
use crate::types::{Axis, Frame, PadiLayer};

/// A stage of the pipeline.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Derive occupancy from the sample grid.
    Threshold,
    /// Build ligns along both planar axes.
    Ligns,
    /// Merge adjacent ligns into strips.
    Strips,
    /// Tile every layer with padis.
    Padis,
    /// Build the point-query index, if configured.
    Index,
}

/// Finished output of a run.
#[derive(Clone, Debug)]
pub struct Decomposition {
    /// Grid resolution `k`.
    pub resolution: u32,
    /// Axis the layers are stacked along.
    pub layer_axis: Axis,
    /// One tiling per layer, in layer order.
    pub layers: Vec<PadiLayer>,
    /// Point-query index, when requested.
    pub index: Option<PadiIndex>,
    /// Candidate processing counters summed over every layer.
    pub stats: ReconcileStats,
}

impl Decomposition {
    /// Total number of padis over every layer.
    pub fn padi_count(&self) -> usize {
        self.layers.iter().map(|l| l.padis.len()).sum()
    }

    /// The padi rectangle covering grid point `(x, y, z)`.
    ///
    /// Returns `None` if no index was built or the point is outside the grid.
    pub fn query(&self, x: usize, y: usize, z: usize) -> Option<Rect> {
        self.index.as_ref()?.query(x, y, z)
    }
}

enum Stage {
    Pending,
    Thresholded(Occupancy),
    Ligned(Occupancy, LignSet),
    Stripped(Occupancy, LignSet, StripSet),
    Tiled(Vec<PadiLayer>, ReconcileStats),
    Done(Decomposition),
    Taken,
}

/// A farm run that advances one phase at a time.
pub struct Pipeline<'g> {
    grid: &'g SampleGrid,
    config: FarmConfig,
    frame: Frame,
    stage: Stage,
}

impl core::fmt::Debug for Pipeline<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Pipeline")
            .field("grid", self.grid)
            .field("config", &self.config)
            .field("next_phase", &self.next_phase())
            .finish_non_exhaustive()
    }
}

impl<'g> Pipeline<'g> {
    /// Prepare a run over `grid`. No work happens until the first [`step`](Self::step).
    pub fn new(grid: &'g SampleGrid, config: FarmConfig) -> Self {
        Self {
            grid,
            config,
            frame: Frame::new(config.layer_axis),
            stage: Stage::Pending,
        }
    }

    /// The phase the next [`step`](Self::step) will run, or `None` once finished.
    pub fn next_phase(&self) -> Option<Phase> {
        match self.stage {
            Stage::Pending => Some(Phase::Threshold),
            Stage::Thresholded(..) => Some(Phase::Ligns),
            Stage::Ligned(..) => Some(Phase::Strips),
            Stage::Stripped(..) => Some(Phase::Padis),
            Stage::Tiled(..) => Some(Phase::Index),
            Stage::Done(_) | Stage::Taken => None,
        }
    }

    /// Whether every phase has run.
    pub fn is_done(&self) -> bool {
        self.next_phase().is_none()
    }

    /// Run the next phase and return which one it was.
    ///
    /// Calling `step` on a finished pipeline runs nothing and returns
    /// [`Phase::Index`].
    pub fn step(&mut self) -> Result<Phase, FarmError> {
        let parallel = self.config.parallel;
        let started = Instant::now();
        let (phase, stage) = match core::mem::replace(&mut self.stage, Stage::Taken) {
            Stage::Pending => {
                let occupancy = Occupancy::from_grid(self.grid, parallel);
                log::debug!(
                    "thresholded {} samples at {}: {} solid",
                    self.grid.values().len(),
                    self.grid.threshold(),
                    occupancy.solid_count()
                );
                (Phase::Threshold, Stage::Thresholded(occupancy))
            }
            Stage::Thresholded(occupancy) => {
                let ligns = LignSet::build(&occupancy, self.frame, parallel);
                log::debug!("built {} ligns", ligns.len());
                (Phase::Ligns, Stage::Ligned(occupancy, ligns))
            }
            Stage::Ligned(occupancy, ligns) => {
                let strips = StripSet::build(&ligns, parallel);
                log::debug!("built {} strips", strips.len());
                (Phase::Strips, Stage::Stripped(occupancy, ligns, strips))
            }
            Stage::Stripped(occupancy, ligns, strips) => {
                let (layers, stats) = build_layers(
                    &occupancy,
                    self.frame,
                    &ligns,
                    &strips,
                    self.config.seeding,
                    parallel,
                );
                log::debug!("tiled {} layers: {:?}", layers.len(), stats);
                (Phase::Padis, Stage::Tiled(layers, stats))
            }
            Stage::Tiled(layers, stats) => {
                let index = if self.config.build_index {
                    let shape = SpanShape::new(self.grid.side());
                    let index = PadiIndex::build(shape, self.frame, &layers, parallel)?;
                    log::debug!("indexed {} layers", index.layer_count());
                    Some(index)
                } else {
                    None
                };
                let done = Decomposition {
                    resolution: self.grid.resolution(),
                    layer_axis: self.config.layer_axis,
                    layers,
                    index,
                    stats,
                };
                (Phase::Index, Stage::Done(done))
            }
            finished @ (Stage::Done(_) | Stage::Taken) => (Phase::Index, finished),
        };
        log::debug!("{phase:?} phase took {:?}", started.elapsed());
        self.stage = stage;
        Ok(phase)
    }

    /// Run every remaining phase and return the result.
    pub fn finish(mut self) -> Result<Decomposition, FarmError> {
        loop {
            match self.stage {
                Stage::Done(done) => return Ok(done),
                _ => {
                    self.step()?;
                }
            }
        }
    }

    /// Run the remaining phases, handing control to `between` after each one.
    ///
    /// If `between` breaks, the run stops and everything computed so far is
    /// discarded: the result is `Ok(None)`.
    pub fn run_with(
        mut self,
        mut between: impl FnMut(Phase) -> ControlFlow<()>,
    ) -> Result<Option<Decomposition>, FarmError> {
        while !self.is_done() {
            let phase = self.step()?;
            if between(phase).is_break() {
                log::debug!("run cancelled after {phase:?}");
                return Ok(None);
            }
        }
        Ok(self.into_output())
    }

    /// Take the result of a finished run; `None` if phases remain.
    pub fn into_output(self) -> Option<Decomposition> {
        match self.stage {
            Stage::Done(done) => Some(done),
            _ => None,
        }
    }
}

/// Run every phase over `grid` in one call.
pub fn decompose(grid: &SampleGrid, config: &FarmConfig) -> Result<Decomposition, FarmError> {
    Pipeline::new(grid, *config).finish()
}
