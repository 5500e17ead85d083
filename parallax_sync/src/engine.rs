// Copyright 2025 the Parallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Forward (offset → rows) and inverse (item → offset) progress mapping.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Affine, Vec2};

use crate::SyncedRow;

/// Where an item should land in the row's viewport when scrolling to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAlignment {
    /// Align the item's left edge with the left edge of the viewport.
    Left,
    /// Center the item within the viewport.
    Center,
    /// Align the item's right edge with the right edge of the viewport.
    Right,
}

/// Scroll state of the master surface as last seen by the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollState {
    /// Horizontal offset of the master surface. May leave `[0, master_max_offset]`
    /// during overscroll.
    pub master_offset: f64,
    /// Widest row content extent.
    pub master_content_extent: f64,
    /// Width of the master surface's viewport.
    pub master_visible_extent: f64,
    /// Unclamped progress computed from the fields above.
    pub progress: f64,
}

impl ScrollState {
    /// Furthest the master surface can scroll without overscrolling.
    #[must_use]
    pub fn master_max_offset(&self) -> f64 {
        (self.master_content_extent - self.master_visible_extent).max(0.0)
    }

    /// Returns `true` if the master content is wider than its viewport.
    #[must_use]
    pub fn can_scroll(&self) -> bool {
        self.master_content_extent - self.master_visible_extent > 0.0
    }

    /// Returns `true` while the progress lies outside `[0, 1]`.
    #[must_use]
    pub fn is_overscrolled(&self) -> bool {
        self.progress < 0.0 || self.progress > 1.0
    }
}

/// Synchronizes a set of rows with one master scroll offset.
///
/// The engine exclusively owns the [`ScrollState`]. Each tick:
/// 1. [`SyncEngine::sync`] stores the master offset and derives the progress,
/// 2. [`SyncEngine::apply_progress`] writes every row's clamped offset and the
///    cosmetic overscroll translation of the row stack.
///
/// Whenever row geometry changes, call [`SyncEngine::recompute_master_extent`]
/// before the next tick so the progress denominator is current.
#[derive(Debug, Clone)]
pub struct SyncEngine {
    state: ScrollState,
    stack_transform: Affine,
}

impl SyncEngine {
    /// Creates an engine with zero extents and an identity stack transform.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: ScrollState::default(),
            stack_transform: Affine::IDENTITY,
        }
    }

    /// Returns the current scroll state.
    #[must_use]
    pub const fn state(&self) -> ScrollState {
        self.state
    }

    /// Returns the cosmetic translation applied to the whole row stack.
    ///
    /// This is the identity unless the master surface is overscrolled.
    #[must_use]
    pub const fn stack_transform(&self) -> Affine {
        self.stack_transform
    }

    /// Sets the master visible extent (the surface viewport width).
    pub fn set_visible_extent(&mut self, visible_extent: f64) {
        self.state.master_visible_extent = visible_extent.max(0.0);
    }

    /// Recomputes the master content extent as the widest row's content extent.
    ///
    /// With no rows the master content extent is `0.0`. Returns the new extent.
    pub fn recompute_master_extent<R: SyncedRow>(&mut self, rows: &[R]) -> f64 {
        let widest = rows
            .iter()
            .map(SyncedRow::content_extent)
            .fold(0.0_f64, f64::max);
        self.state.master_content_extent = widest;
        widest
    }

    /// Progress for a master offset against the current extents.
    ///
    /// If the master content is not wider than its viewport there is nothing to
    /// synchronize and the progress is `0.0`.
    #[must_use]
    pub fn progress_for_offset(&self, master_offset: f64) -> f64 {
        let denominator = self.state.master_content_extent - self.state.master_visible_extent;
        if denominator > 0.0 {
            master_offset / denominator
        } else {
            0.0
        }
    }

    /// Runs one full tick: records `master_offset`, computes the progress, and
    /// applies it to `rows`. Returns the (unclamped) progress.
    pub fn sync<R: SyncedRow>(&mut self, master_offset: f64, rows: &mut [R]) -> f64 {
        self.state.master_offset = master_offset;
        let progress = self.progress_for_offset(master_offset);
        self.apply_progress(progress, rows);
        progress
    }

    /// Applies `progress` to every row and updates the overscroll transform.
    ///
    /// - Within `[0, 1]`, the stack transform is cleared.
    /// - Below `0`, the stack is translated right by `|master_offset|`.
    /// - Above `1`, the stack is translated left by
    ///   `|master_offset - master_max_offset|`.
    ///
    /// In every case each row's offset is `clamp(row_max * progress, 0, row_max)`,
    /// which pins rows at their extremes while overscrolled.
    pub fn apply_progress<R: SyncedRow>(&mut self, progress: f64, rows: &mut [R]) {
        self.state.progress = progress;

        let translation_x = if progress < 0.0 {
            self.state.master_offset.abs()
        } else if progress > 1.0 {
            let excess = self.state.master_offset
                - (self.state.master_content_extent - self.state.master_visible_extent);
            -excess.abs()
        } else {
            0.0
        };
        self.stack_transform = if translation_x == 0.0 {
            Affine::IDENTITY
        } else {
            Affine::translate(Vec2::new(translation_x, 0.0))
        };

        for row in rows.iter_mut() {
            let max_offset = row.max_scroll_offset();
            row.set_scroll_offset((max_offset * progress).clamp(0.0, max_offset));
        }
    }

    /// Progress that brings item `index` of `row` to `alignment`.
    ///
    /// Returns `None` when there is nothing to compute:
    /// - the row's content is not wider than its viewport, or
    /// - the item has no frame (unknown index or not laid out yet).
    ///
    /// Callers must leave the master offset untouched in that case.
    #[must_use]
    pub fn progress_for_item<R: SyncedRow + ?Sized>(
        row: &R,
        index: usize,
        alignment: ScrollAlignment,
    ) -> Option<f64> {
        let content = row.content_extent();
        let visible = row.visible_extent();
        if content <= visible {
            return None;
        }
        let frame = row.item_frame(index)?;

        let target = match alignment {
            ScrollAlignment::Left => frame.x0,
            ScrollAlignment::Center => frame.center().x - visible / 2.0,
            ScrollAlignment::Right => frame.x1 - visible,
        };
        let max_offset = content - visible;
        Some((target / max_offset).clamp(0.0, 1.0))
    }

    /// Master offset corresponding to `progress`.
    ///
    /// Returns `None` if the master content is not wider than its viewport.
    #[must_use]
    pub fn master_offset_for_progress(&self, progress: f64) -> Option<f64> {
        if !self.state.can_scroll() {
            return None;
        }
        Some(self.state.master_max_offset() * progress)
    }
}

impl Default for SyncEngine {
    fn default() -> Self {
        Self::new()
    }
}
