// Copyright 2025 the Parallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by the checked container operations.

use parallax_layout::ItemRef;

/// Why a checked container operation did nothing.
///
/// The unchecked operations treat all of these as silent no-ops.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParallaxError {
    /// The row index is past the last row.
    #[error("row {row} is out of bounds ({row_count} rows)")]
    RowOutOfBounds {
        /// Requested row.
        row: usize,
        /// Number of rows at the time of the request.
        row_count: usize,
    },
    /// The item index is past the last item of its row.
    #[error("item {item} is out of bounds ({item_count} items)")]
    ItemOutOfBounds {
        /// Requested item.
        item: ItemRef,
        /// Number of items in the row at the time of the request.
        item_count: usize,
    },
    /// The content is not wider than the viewport, so there is nowhere to scroll.
    #[error("content does not overflow the viewport")]
    NothingToScroll,
    /// The item's geometry could not be resolved.
    #[error("item {0} has no layout geometry")]
    ItemNotResolved(ItemRef),
}
