// Copyright 2025 the Parallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row and item hit testing in surface coordinates.

use kurbo::{Point, Rect};
use parallax_layout::ItemRef;

/// The stacked rows as seen by the master surface.
pub trait HitTarget {
    /// Number of rows in the stack.
    fn row_count(&self) -> usize;

    /// Frame of `row` in surface coordinates, including any stack transform.
    fn row_frame(&self, row: usize) -> Option<Rect>;

    /// Item of `row` under `point`, given in the row's local coordinates
    /// (relative to the row frame's origin).
    ///
    /// Implementations account for the row's own scroll offset.
    fn item_at(&self, row: usize, point: Point) -> Option<usize>;
}

/// Resolves the item under a surface-space `point`.
///
/// Rows are tested in ascending index order; the first row whose frame
/// contains the point is the only one asked for an item.
pub fn resolve_item<H: HitTarget + ?Sized>(target: &H, point: Point) -> Option<ItemRef> {
    let (row, frame) = (0..target.row_count())
        .filter_map(|row| target.row_frame(row).map(|frame| (row, frame)))
        .find(|(_, frame)| frame.contains(point))?;
    let local = point - frame.origin().to_vec2();
    target
        .item_at(row, local)
        .map(|item| ItemRef::new(row, item))
}
