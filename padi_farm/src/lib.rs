// Copyright 2025 the Padi Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=padi_farm --heading-base-level=0

//! Padi Farm: adaptive rectangle tiling of a thresholded 3D sample grid.
//!
//! A cubic grid of `2^k + 1` samples per side is cut into layers along one axis.
//! Each layer is tiled with *padis*: rectangles aligned to the implicit
//! power-of-two partition of [`padi_span`], as large as possible while every
//! grid line through them crosses the solid/empty boundary at most once.
//!
//! The work runs in phases, each a set of independent units:
//!
//! - **Threshold**: samples strictly above the threshold become solid ([`Occupancy`]).
//! - **Ligns**: every sample line along the two planar axes gets a span tree of
//!   crossing flags and simplest-span links ([`lign`]).
//! - **Strips**: adjacent ligns merge into chains of plots ([`strip`]).
//! - **Padis**: plots are grown into rectangles and reconciled into a disjoint
//!   tiling per layer ([`padi`], [`reconcile`]).
//! - **Index**: optionally, per-line span trees answer point queries ([`PadiIndex`]).
//!
//! [`decompose`] runs everything at once. [`Pipeline`] runs one phase per call
//! so a caller can spread the work over several turns or cancel between phases.
//!
//! # Example
//!
//! ```rust
//! use padi_farm::{FarmConfig, Fill, SampleGrid, decompose};
//!
//! // A flat floor: everything below z = 3 is solid.
//! let grid = SampleGrid::from_fn(3, 0.0, |_, _, z| 3.0 - z as f32).unwrap();
//! let out = decompose(&grid, &FarmConfig::default().with_index(true)).unwrap();
//!
//! // Nine layers along z, each a single uniform padi.
//! assert_eq!(out.layers.len(), 9);
//! assert_eq!(out.padi_count(), 9);
//! assert_eq!(out.layers[0].padis[0].fill, Fill::Solid);
//! assert_eq!(out.layers[8].padis[0].fill, Fill::Empty);
//!
//! // Point queries return the covering rectangle.
//! let hit = out.query(4, 4, 1).unwrap();
//! assert_eq!((hit.width(), hit.height()), (8, 8));
//! ```
//!
//! ## Features
//!
//! - `kurbo`: convert padis to [`kurbo::Rect`](https://docs.rs/kurbo) for rendering.

pub mod config;
pub mod error;
pub mod grid;
pub mod index;
pub mod lign;
pub mod padi;
pub mod pipeline;
pub mod reconcile;
pub mod strip;
pub mod types;

mod util;

pub use padi_span::{Rect, Span, SpanShape};

pub use config::{FarmConfig, Seeding};
pub use error::FarmError;
pub use grid::{FieldSampler, MAX_RESOLUTION, Occupancy, SampleGrid};
pub use index::PadiIndex;
pub use pipeline::{Decomposition, Phase, Pipeline, decompose};
pub use reconcile::ReconcileStats;
pub use types::{Axis, Fill, Frame, Padi, PadiLayer};
