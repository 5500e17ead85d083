// Copyright 2025 the Parallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The row-side contract of the sync engine.

use kurbo::Rect;

/// A horizontally scrolled row driven by a [`SyncEngine`](crate::SyncEngine).
///
/// Rows never scroll on their own: the engine is the only writer of
/// [`SyncedRow::set_scroll_offset`] during a forward pass.
pub trait SyncedRow {
    /// Total content width of the row.
    fn content_extent(&self) -> f64;

    /// Width of the row's viewport.
    fn visible_extent(&self) -> f64;

    /// Current horizontal scroll offset.
    fn scroll_offset(&self) -> f64;

    /// Sets the horizontal scroll offset.
    fn set_scroll_offset(&mut self, offset: f64);

    /// Frame of item `index` in row content space, if it has been laid out.
    fn item_frame(&self, index: usize) -> Option<Rect>;

    /// Furthest the row can scroll: `max(0, content_extent - visible_extent)`.
    fn max_scroll_offset(&self) -> f64 {
        (self.content_extent() - self.visible_extent()).max(0.0)
    }
}

impl<R: SyncedRow + ?Sized> SyncedRow for &mut R {
    fn content_extent(&self) -> f64 {
        (**self).content_extent()
    }

    fn visible_extent(&self) -> f64 {
        (**self).visible_extent()
    }

    fn scroll_offset(&self) -> f64 {
        (**self).scroll_offset()
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        (**self).set_scroll_offset(offset);
    }

    fn item_frame(&self, index: usize) -> Option<Rect> {
        (**self).item_frame(index)
    }
}
