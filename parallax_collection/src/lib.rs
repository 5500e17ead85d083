// Copyright 2025 the Parallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parallax Collection: a stack of horizontally scrolling rows that move together.
//!
//! [`ParallaxContainer`] lays out one [`Row`] per row of a [`DataSource`] and
//! places a single master scroll surface over the whole stack. Every scroll of
//! that surface is turned into a normalized progress and applied to each row
//! in proportion to its own scrollable range, so rows of different widths
//! reach their start and end together. Taps on the surface are routed down to
//! the item underneath and reported to a [`SelectionSink`].
//!
//! ## Collaborators
//!
//! - [`DataSource`] supplies the row count, per-row item counts, and item
//!   models. It also names the one cell type used for every item.
//! - [`CellModel`] gives each item its required width.
//! - [`ContentCell`] renders one model and shows a pressed highlight. Cells
//!   are realized only for visible items and reused as the rows scroll.
//! - [`SelectionSink`] receives tapped items. Any `FnMut(ItemRef)` works.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Insets, Point, Size};
//! use parallax_collection::{
//!     CellModel, ContentCell, DataSource, ItemRef, LayoutConfig, ParallaxContainer, SyncedRow,
//! };
//!
//! struct Tile(f64);
//! impl CellModel for Tile {
//!     fn required_width(&self) -> f64 { self.0 }
//! }
//!
//! #[derive(Default)]
//! struct TileCell;
//! impl ContentCell for TileCell {
//!     type Model = Tile;
//!     fn configure(&mut self, _model: &Tile) {}
//! }
//!
//! /// Three 100px tiles on top, one 50px tile below.
//! struct Tiles;
//! impl DataSource for Tiles {
//!     type Model = Tile;
//!     type Cell = TileCell;
//!     fn row_count(&self) -> usize { 2 }
//!     fn item_count(&self, row: usize) -> usize { if row == 0 { 3 } else { 1 } }
//!     fn model(&self, item: ItemRef) -> Tile { Tile(if item.row == 0 { 100.0 } else { 50.0 }) }
//! }
//!
//! let layout = LayoutConfig::new(40.0, 10.0, 8.0, Insets::new(16.0, 0.0, 16.0, 0.0));
//! let mut selected = Vec::new();
//! let mut container = ParallaxContainer::new(layout, Tiles, |item: ItemRef| selected.push(item));
//! container.set_viewport(Size::new(200.0, 90.0));
//!
//! // Drag 94px to the left: 20px to cross the drag threshold, then 74px of pan.
//! container.pointer_down(None, Point::new(190.0, 20.0));
//! container.pointer_move(None, Point::new(170.0, 20.0));
//! container.pointer_move(None, Point::new(96.0, 20.0));
//! container.pointer_up(None, Point::new(96.0, 20.0));
//!
//! // The widest row (348px) is halfway along, the short row has nowhere to go.
//! assert_eq!(container.scroll_state().progress, 0.5);
//! assert_eq!(container.rows()[0].scroll_offset(), 74.0);
//! assert_eq!(container.rows()[1].scroll_offset(), 0.0);
//! drop(container);
//! assert!(selected.is_empty());
//! ```
//!
//! ## Features
//!
//! - `std` (default): use the standard library for float math.
//! - `libm`: `no_std` float math through `libm`.
//! - `tracing`: emit `tracing` events for row reconciliation, skipped
//!   operations, pans, and selections.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod container;
mod error;
mod row;
mod source;

pub use container::ParallaxContainer;
pub use error::ParallaxError;
pub use row::Row;
pub use source::{CellModel, ContentCell, DataSource, SelectionSink};

pub use parallax_gesture::{PointerId, SurfaceConfig};
pub use parallax_layout::{ItemRef, LayoutConfig, RowLayout};
pub use parallax_sync::{ScrollAlignment, ScrollState, SyncedRow};
