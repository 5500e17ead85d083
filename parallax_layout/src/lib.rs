// Copyright 2025 the Parallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parallax Layout: row configuration and per-row item geometry.
//!
//! This crate holds the leaf value types shared by the rest of the Parallax
//! workspace:
//!
//! - [`LayoutConfig`]: immutable row height, spacing, and insets shared by every row.
//! - [`ItemRef`]: the `(row, item)` address of one model item.
//! - [`RowLayout`]: item widths for one row plus a prefix-sum cache,
//!   answering item frames, content extent, visible ranges, and
//!   point-to-item queries.
//!
//! Rows are laid out left to right. Every item of a row has the same height
//! (the row height less the vertical insets) and its own width, and items are
//! separated by the inter-item spacing.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Insets;
//! use parallax_layout::{LayoutConfig, RowLayout};
//!
//! let config = LayoutConfig::new(40.0, 10.0, 8.0, Insets::new(16.0, 0.0, 16.0, 0.0));
//! let mut row = RowLayout::new(config);
//! row.rebuild([100.0, 100.0, 100.0]);
//!
//! // 16 + 100 + 8 + 100 + 8 + 100 + 16
//! assert_eq!(row.content_extent(), 348.0);
//! assert_eq!(row.item_frame(1).map(|r| r.x0), Some(124.0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod row_layout;
mod types;

pub use config::LayoutConfig;
pub use row_layout::RowLayout;
pub use types::ItemRef;
