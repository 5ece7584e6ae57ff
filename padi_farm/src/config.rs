// Copyright 2025 the Padi Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Run configuration.

use crate::types::Axis;

/// Where the padi builder seeds candidate rectangles.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Seeding {
    /// Seed a plot only on the first row of each run of rows that share it.
    ///
    /// A plot that also occurs on the row above is already inside the candidate
    /// seeded there, so the skipped seed would only be discarded again.
    #[default]
    RunStart,
    /// Seed every plot of every strip row and let reconciliation drop or split
    /// the overlaps.
    EveryRow,
}

/// Options for a farm run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FarmConfig {
    /// Axis the layers are stacked along.
    pub layer_axis: Axis,
    /// Run the units of each phase on the rayon thread pool.
    pub parallel: bool,
    /// Build a [`PadiIndex`](crate::PadiIndex) for point queries.
    pub build_index: bool,
    /// Candidate seeding policy.
    pub seeding: Seeding,
}

impl Default for FarmConfig {
    fn default() -> Self {
        Self {
            layer_axis: Axis::Z,
            parallel: true,
            build_index: false,
            seeding: Seeding::RunStart,
        }
    }
}

impl FarmConfig {
    /// Stack layers along `axis`.
    pub const fn with_layer_axis(mut self, axis: Axis) -> Self {
        self.layer_axis = axis;
        self
    }

    /// Enable or disable the rayon thread pool.
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Enable or disable the point-query index.
    pub const fn with_index(mut self, build_index: bool) -> Self {
        self.build_index = build_index;
        self
    }

    /// Choose the seeding policy.
    pub const fn with_seeding(mut self, seeding: Seeding) -> Self {
        self.seeding = seeding;
        self
    }
}
