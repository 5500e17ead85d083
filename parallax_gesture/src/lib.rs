// Copyright 2025 the Parallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parallax Gesture: one scroll surface capturing input for a stack of rows.
//!
//! In a parallax stack only the master surface scrolls. Rows are neither
//! scrollable nor interactive on their own, so the surface has to do two jobs:
//!
//! - **Scrolling.** [`MasterScrollSurface`] owns the master content offset. A
//!   pointer that moves farther than the drag threshold starts panning, and
//!   panning past either end is damped by a linear rubber band. Releasing an
//!   overscrolled pan animates back to the nearest bound; programmatic scrolls
//!   either snap or animate linearly. Animations advance on [`MasterScrollSurface::tick`].
//! - **Delegating item interaction.** Each press is hit-tested against the
//!   rows through [`HitTarget`] and tracked by a small per-pointer state
//!   machine. The surface reports what the host should do as
//!   [`SurfaceEffect`]s: highlight or unhighlight an item, or select it.
//!
//! ## Per-touch state machine
//!
//! ```text
//! Idle ── down ──▶ Pressed ── move (still on an item) ──▶ Moved
//!                    │  │                                  │
//!                    │  └── move past threshold ──▶ Panning┤
//!                    │                                     │
//!                    ├── up ──▶ Released (select item under pointer)
//!                    └── cancel ──▶ Cancelled (no selection)
//! ```
//!
//! A panning touch never selects: starting a pan cancels its item interaction.
//!
//! ## Hit testing
//!
//! Rows are tested in ascending index order and the first row whose frame
//! contains the point wins. The point is then converted into that row's local
//! coordinates and handed to [`HitTarget::item_at`].
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use parallax_gesture::{HitTarget, MasterScrollSurface, SurfaceConfig, SurfaceEffect};
//! use parallax_layout::ItemRef;
//!
//! /// One row, 40px tall, with 100px items and no spacing.
//! struct OneRow;
//!
//! impl HitTarget for OneRow {
//!     fn row_count(&self) -> usize { 1 }
//!     fn row_frame(&self, _row: usize) -> Option<Rect> { Some(Rect::new(0.0, 0.0, 200.0, 40.0)) }
//!     fn item_at(&self, _row: usize, point: Point) -> Option<usize> { Some((point.x / 100.0) as usize) }
//! }
//!
//! let mut surface = MasterScrollSurface::new(SurfaceConfig::default());
//! let down = surface.on_down(None, Point::new(150.0, 20.0), &OneRow);
//! assert_eq!(down.as_slice(), &[SurfaceEffect::Highlight(ItemRef::new(0, 1))]);
//!
//! let up = surface.on_up(None, Point::new(151.0, 20.0), &OneRow);
//! assert_eq!(
//!     up.as_slice(),
//!     &[
//!         SurfaceEffect::Unhighlight(ItemRef::new(0, 1)),
//!         SurfaceEffect::Select(ItemRef::new(0, 1)),
//!     ]
//! );
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod hit;
mod surface;

pub use hit::{HitTarget, resolve_item};
pub use surface::{
    MasterScrollSurface, PointerId, SurfaceConfig, SurfaceEffect, SurfaceEffects, TouchPhase,
};
