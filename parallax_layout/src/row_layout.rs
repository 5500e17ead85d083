// Copyright 2025 the Parallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item geometry for a single row, backed by per-item widths and a prefix-sum cache.

use alloc::vec::Vec;
use core::ops::Range;

use kurbo::{Point, Rect};

use crate::LayoutConfig;

/// Item geometry for one row.
///
/// Items are placed left to right starting at the left inset, separated by the
/// configured inter-item spacing. The row stores each item's width and keeps
/// `prefix_starts[i]`, the distance from the left inset to the start of item
/// `i`, so position queries are a lookup or a binary search.
///
/// All positions are in row content space: `x = 0` is the left edge of the
/// row's content, before any scrolling is applied.
#[derive(Clone, Debug)]
pub struct RowLayout {
    config: LayoutConfig,
    widths: Vec<f64>,
    prefix_starts: Vec<f64>,
}

impl RowLayout {
    /// Creates an empty row layout.
    #[must_use]
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            widths: Vec::new(),
            prefix_starts: Vec::new(),
        }
    }

    /// The configuration this layout was created with.
    #[must_use]
    pub const fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Number of items in the row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.widths.len()
    }

    /// Returns `true` if the row has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    /// Replaces all item widths. Any previous widths are discarded.
    pub fn rebuild<I>(&mut self, widths: I)
    where
        I: IntoIterator<Item = f64>,
    {
        self.widths.clear();
        self.widths.extend(widths.into_iter().map(sanitize_width));
        let spacing = self.config.inter_item_spacing();
        let mut pos = 0.0;
        self.prefix_starts.clear();
        self.prefix_starts.extend(self.widths.iter().map(|width| {
            let start = pos;
            pos += width + spacing;
            start
        }));
    }

    /// Width of item `index`, if it exists.
    #[must_use]
    pub fn width_of(&self, index: usize) -> Option<f64> {
        self.widths.get(index).copied()
    }

    /// Left edge of item `index` in row content space.
    #[must_use]
    pub fn item_start(&self, index: usize) -> Option<f64> {
        self.prefix_starts
            .get(index)
            .map(|start| self.config.row_inset().x0 + start)
    }

    /// Frame of item `index` in row content space.
    ///
    /// Items span vertically from the top inset to the row height less the
    /// bottom inset.
    #[must_use]
    pub fn item_frame(&self, index: usize) -> Option<Rect> {
        let x0 = self.item_start(index)?;
        let width = self.widths[index];
        let inset = self.config.row_inset();
        let y0 = inset.y0;
        let y1 = (self.config.row_height() - inset.y1).max(y0);
        Some(Rect::new(x0, y0, x0 + width, y1))
    }

    /// Total content width of the row, insets included.
    ///
    /// An empty row has no content and reports `0.0`. Its insets alone are
    /// not content, so an empty row never overflows the viewport and takes
    /// no part in the widest-row extent.
    #[must_use]
    pub fn content_extent(&self) -> f64 {
        let Some(last) = self.widths.len().checked_sub(1) else {
            return 0.0;
        };
        let inset = self.config.row_inset();
        inset.x0 + self.prefix_starts[last] + self.widths[last] + inset.x1
    }

    /// Returns the last item whose start is at or before content position `x`.
    ///
    /// Positions before the first item resolve to `0`; an empty row resolves to `None`.
    #[must_use]
    pub fn index_at_x(&self, x: f64) -> Option<usize> {
        if self.widths.is_empty() {
            return None;
        }
        let target = x - self.config.row_inset().x0;
        let found = match self
            .prefix_starts
            .binary_search_by(|pos| pos.partial_cmp(&target).unwrap_or(core::cmp::Ordering::Equal))
        {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        Some(found)
    }

    /// Returns the item whose frame contains `point` (row content space).
    ///
    /// Points in the insets or in the spacing between items hit nothing.
    #[must_use]
    pub fn item_at(&self, point: Point) -> Option<usize> {
        let index = self.index_at_x(point.x)?;
        self.item_frame(index)
            .filter(|frame| frame.contains(point))
            .map(|_| index)
    }

    /// Range of items that overlap the window `[offset, offset + viewport)`.
    ///
    /// This is the set of items a host needs to realize for the row's current
    /// scroll offset.
    #[must_use]
    pub fn visible_range(&self, offset: f64, viewport: f64) -> Range<usize> {
        let len = self.widths.len();
        if len == 0 {
            return 0..0;
        }
        let min = offset.max(0.0);
        let max = (offset + viewport.max(0.0)).min(self.content_extent());
        if max <= min {
            return 0..0;
        }

        let left = self.config.row_inset().x0;
        let mut start = self.index_at_x(min).unwrap_or(0);
        // Skip an item that ends exactly where the window begins.
        if start < len && left + self.prefix_starts[start] + self.widths[start] <= min {
            start += 1;
        }
        let end = self
            .prefix_starts
            .partition_point(|pos| left + pos < max)
            .max(start);
        start..end
    }
}

fn sanitize_width(width: f64) -> f64 {
    // Widths are expected to be finite. Catch NaNs (and infinities) in
    // debug builds so misuse does not go unnoticed.
    debug_assert!(
        width.is_finite(),
        "RowLayout widths must be finite; got {width:?}"
    );
    // Clamp finite negative values to `0.0`.
    if width.is_sign_negative() || width.is_nan() {
        0.0
    } else {
        width
    }
}
