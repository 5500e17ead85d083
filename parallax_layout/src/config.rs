// Copyright 2025 the Parallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immutable layout configuration shared by all rows.

use kurbo::Insets;

/// Row height, spacing, and insets shared by every row of a parallax stack.
///
/// A configuration is supplied once when a container is built and never
/// changes afterwards. All values are in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutConfig {
    row_height: f64,
    inter_row_spacing: f64,
    inter_item_spacing: f64,
    row_inset: Insets,
}

impl LayoutConfig {
    /// Creates a configuration.
    ///
    /// `row_inset` uses kurbo's convention: `x0` is the left inset, `y0` the
    /// top, `x1` the right, and `y1` the bottom.
    ///
    /// Values are expected to be finite. Negative values are clamped to `0.0`.
    #[must_use]
    pub fn new(
        row_height: f64,
        inter_row_spacing: f64,
        inter_item_spacing: f64,
        row_inset: Insets,
    ) -> Self {
        Self {
            row_height: non_negative(row_height),
            inter_row_spacing: non_negative(inter_row_spacing),
            inter_item_spacing: non_negative(inter_item_spacing),
            row_inset: Insets::new(
                non_negative(row_inset.x0),
                non_negative(row_inset.y0),
                non_negative(row_inset.x1),
                non_negative(row_inset.y1),
            ),
        }
    }

    /// Height of every row.
    #[must_use]
    pub const fn row_height(&self) -> f64 {
        self.row_height
    }

    /// Vertical spacing between consecutive rows.
    #[must_use]
    pub const fn inter_row_spacing(&self) -> f64 {
        self.inter_row_spacing
    }

    /// Horizontal spacing between consecutive items of a row.
    #[must_use]
    pub const fn inter_item_spacing(&self) -> f64 {
        self.inter_item_spacing
    }

    /// Insets applied inside every row.
    #[must_use]
    pub const fn row_inset(&self) -> Insets {
        self.row_inset
    }

    /// Vertical position of the top edge of row `index` within the stack.
    #[must_use]
    pub fn row_origin_y(&self, index: usize) -> f64 {
        index as f64 * (self.row_height + self.inter_row_spacing)
    }

    /// Total height of a stack of `row_count` rows.
    #[must_use]
    pub fn stack_height(&self, row_count: usize) -> f64 {
        if row_count == 0 {
            return 0.0;
        }
        row_count as f64 * self.row_height + (row_count - 1) as f64 * self.inter_row_spacing
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::new(40.0, 10.0, 8.0, Insets::new(16.0, 0.0, 16.0, 0.0))
    }
}

fn non_negative(value: f64) -> f64 {
    debug_assert!(
        value.is_finite(),
        "LayoutConfig values must be finite; got {value:?}"
    );
    if value.is_sign_negative() || value.is_nan() {
        0.0
    } else {
        value
    }
}
