// Copyright 2025 the Padi Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use rayon::prelude::*;

/// Evaluate `f` for every unit in `0..count`, on the rayon pool if `parallel`.
///
/// Results come back in unit order either way.
pub(crate) fn map_units<T, F>(parallel: bool, count: usize, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    if parallel {
        (0..count).into_par_iter().map(f).collect()
    } else {
        (0..count).map(f).collect()
    }
}

/// Narrow a node index to its stored width.
#[allow(
    clippy::cast_possible_truncation,
    reason = "Node indices are below 2^16 because resolution is capped at 15."
)]
#[inline]
pub(crate) const fn node_value(index: usize) -> u16 {
    debug_assert!(index < u16::MAX as usize, "node index does not fit in u16");
    index as u16
}
