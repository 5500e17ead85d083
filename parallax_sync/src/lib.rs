// Copyright 2025 the Parallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parallax Sync: one master scroll offset, many proportionally scrolled rows.
//!
//! ## Overview
//!
//! A parallax stack has several rows of different content widths but only one
//! real scrollable surface. [`SyncEngine`] turns the surface's offset into a
//! normalized progress
//!
//! ```text
//! progress = master_offset / (master_content_extent - master_visible_extent)
//! ```
//!
//! and applies it to every row as `clamp(row_max_offset * progress, 0, row_max_offset)`,
//! so all rows reach their start and end together no matter how wide they are.
//!
//! ## Overscroll
//!
//! When the surface is dragged past either end, progress leaves `[0, 1]`. Rows
//! stay pinned at their extremes and the engine instead reports a horizontal
//! translation for the whole stack through [`SyncEngine::stack_transform`].
//! Past the start the stack moves right by `|master_offset|`; past the end it
//! moves left by the excess over the master maximum offset.
//!
//! ## Scrolling to an item
//!
//! The inverse direction, [`SyncEngine::progress_for_item`], finds the progress
//! that brings an item of one row to a [`ScrollAlignment`]. Multiply it by the
//! master maximum offset ([`SyncEngine::master_offset_for_progress`]) and feed
//! the result back through the surface so the next forward pass moves every row.
//!
//! ```rust
//! use kurbo::Rect;
//! use parallax_sync::{SyncEngine, SyncedRow};
//!
//! struct Strip { content: f64, offset: f64 }
//!
//! impl SyncedRow for Strip {
//!     fn content_extent(&self) -> f64 { self.content }
//!     fn visible_extent(&self) -> f64 { 200.0 }
//!     fn scroll_offset(&self) -> f64 { self.offset }
//!     fn set_scroll_offset(&mut self, offset: f64) { self.offset = offset; }
//!     fn item_frame(&self, _index: usize) -> Option<Rect> { None }
//! }
//!
//! let mut rows = [Strip { content: 348.0, offset: 0.0 }, Strip { content: 82.0, offset: 0.0 }];
//! let mut engine = SyncEngine::new();
//! engine.recompute_master_extent(&rows);
//! engine.set_visible_extent(200.0);
//!
//! let progress = engine.sync(74.0, &mut rows);
//! assert_eq!(progress, 0.5);
//! assert_eq!(rows[0].offset, 74.0);
//! assert_eq!(rows[1].offset, 0.0);
//! ```
//!
//! This crate is `no_std` and does not allocate.

#![no_std]

mod engine;
mod row;

pub use engine::{ScrollAlignment, ScrollState, SyncEngine};
pub use row::SyncedRow;
