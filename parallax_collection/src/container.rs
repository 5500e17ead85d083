// Copyright 2025 the Parallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The parallax container: rows, master surface, and sync engine wired together.

use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashSet;
use kurbo::{Affine, Point, Rect, Size};
use parallax_gesture::{
    HitTarget, MasterScrollSurface, PointerId, SurfaceConfig, SurfaceEffect, SurfaceEffects,
    resolve_item,
};
use parallax_layout::{ItemRef, LayoutConfig};
use parallax_sync::{ScrollAlignment, ScrollState, SyncEngine, SyncedRow};

use crate::{ContentCell, DataSource, ParallaxError, Row, SelectionSink};

/// A stack of horizontally scrolling rows driven by one master scroll surface.
///
/// ## Usage
///
/// - Build with [`ParallaxContainer::new`]; rows are created for the source's
///   current row count.
/// - Call [`ParallaxContainer::set_viewport`] from the host's layout pass.
/// - Forward pointer input to [`ParallaxContainer::pointer_down`],
///   [`pointer_move`](ParallaxContainer::pointer_move),
///   [`pointer_up`](ParallaxContainer::pointer_up), and
///   [`pointer_cancel`](ParallaxContainer::pointer_cancel), and drive
///   animations with [`ParallaxContainer::tick`].
/// - After the data changes, call [`ParallaxContainer::reload_data`],
///   [`reload_rows`](ParallaxContainer::reload_rows), or
///   [`reconfigure_item`](ParallaxContainer::reconfigure_item).
///
/// Every entry point finishes with at most one synchronization pass, so rows
/// always reflect the latest master offset and geometry when it returns.
pub struct ParallaxContainer<D: DataSource, S> {
    layout: LayoutConfig,
    source: D,
    delegate: S,
    rows: Vec<Row<D::Cell>>,
    surface: MasterScrollSurface,
    engine: SyncEngine,
    viewport: Size,
}

impl<D: DataSource, S> fmt::Debug for ParallaxContainer<D, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParallaxContainer")
            .field("layout", &self.layout)
            .field("row_count", &self.rows.len())
            .field("viewport", &self.viewport)
            .field("scroll_state", &self.engine.state())
            .finish_non_exhaustive()
    }
}

impl<D: DataSource, S: SelectionSink> ParallaxContainer<D, S> {
    /// Creates a container with the default surface tuning and loads every row.
    pub fn new(layout: LayoutConfig, source: D, delegate: S) -> Self {
        Self::with_surface_config(layout, source, delegate, SurfaceConfig::default())
    }

    /// Creates a container with explicit surface tuning and loads every row.
    pub fn with_surface_config(
        layout: LayoutConfig,
        source: D,
        delegate: S,
        surface_config: SurfaceConfig,
    ) -> Self {
        let mut container = Self {
            layout,
            source,
            delegate,
            rows: Vec::new(),
            surface: MasterScrollSurface::new(surface_config),
            engine: SyncEngine::new(),
            viewport: Size::ZERO,
        };
        container.reload_data();
        container
    }

    /// Shared layout configuration.
    #[must_use]
    pub const fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// The data source.
    #[must_use]
    pub const fn source(&self) -> &D {
        &self.source
    }

    /// Mutable access to the data source. Call one of the reload operations
    /// afterwards for the rows to pick up the changes.
    pub fn source_mut(&mut self) -> &mut D {
        &mut self.source
    }

    /// The selection delegate.
    #[must_use]
    pub const fn delegate(&self) -> &S {
        &self.delegate
    }

    /// Mutable access to the selection delegate.
    pub fn delegate_mut(&mut self) -> &mut S {
        &mut self.delegate
    }

    /// The rows, in stack order.
    #[must_use]
    pub fn rows(&self) -> &[Row<D::Cell>] {
        &self.rows
    }

    /// Row `index`, if it exists.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&Row<D::Cell>> {
        self.rows.get(index)
    }

    /// Number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Size of the container, as last set by [`ParallaxContainer::set_viewport`].
    #[must_use]
    pub const fn viewport(&self) -> Size {
        self.viewport
    }

    /// Height of the row stack.
    #[must_use]
    pub fn content_height(&self) -> f64 {
        self.layout.stack_height(self.rows.len())
    }

    /// The master scroll surface.
    #[must_use]
    pub const fn surface(&self) -> &MasterScrollSurface {
        &self.surface
    }

    /// Current master content offset.
    #[must_use]
    pub const fn content_offset(&self) -> f64 {
        self.surface.content_offset()
    }

    /// Scroll state from the last synchronization pass.
    #[must_use]
    pub const fn scroll_state(&self) -> ScrollState {
        self.engine.state()
    }

    /// Cosmetic overscroll translation to apply to the whole row stack.
    #[must_use]
    pub const fn stack_transform(&self) -> Affine {
        self.engine.stack_transform()
    }

    /// Frame of row `index` in container coordinates, including the stack transform.
    #[must_use]
    pub fn row_frame(&self, index: usize) -> Option<Rect> {
        self.stack_hit().row_frame(index)
    }

    /// Item under a container-space `point`.
    #[must_use]
    pub fn item_at(&self, point: Point) -> Option<ItemRef> {
        resolve_item(&self.stack_hit(), point)
    }

    /// Sets the container size, as in a layout pass.
    ///
    /// Every row's viewport takes the container width; the master extents are
    /// recomputed and the rows re-synchronized.
    pub fn set_viewport(&mut self, size: Size) {
        self.viewport = size;
        for row in &mut self.rows {
            row.set_visible_extent(size.width);
        }
        self.refresh_extents();
        self.sync();
    }

    /// Reconciles the rows with the source and reloads all of them.
    ///
    /// Rows are appended when the declared row count grew and removed from
    /// the tail backward when it shrank, so lower indices stay stable. The
    /// master offset is kept and re-applied against the new geometry.
    pub fn reload_data(&mut self) {
        let required = self.source.row_count();
        let current = self.rows.len();
        if required > current {
            for index in current..required {
                self.insert_row(index);
            }
        } else {
            for index in (required..current).rev() {
                self.remove_row(index);
            }
        }
        #[cfg(feature = "tracing")]
        if required != current {
            tracing::debug!(from = current, to = required, "row count reconciled");
        }

        for row in &mut self.rows {
            row.reload(&self.source);
        }
        self.refresh_extents();
        self.sync();
    }

    /// Reloads the given rows only. Indices past the last row are ignored.
    pub fn reload_rows<I>(&mut self, indices: I)
    where
        I: IntoIterator<Item = usize>,
    {
        let requested: HashSet<usize> = indices.into_iter().collect();
        for index in requested {
            if let Some(row) = self.rows.get_mut(index) {
                row.reload(&self.source);
            } else {
                #[cfg(feature = "tracing")]
                tracing::trace!(row = index, "skipping reload of missing row");
            }
        }
        self.refresh_extents();
        self.sync();
    }

    /// Configures the realized cell of `item` again, without relayout.
    ///
    /// Out-of-bounds addresses are ignored; see
    /// [`ParallaxContainer::try_reconfigure_item`] for the checked form.
    pub fn reconfigure_item(&mut self, item: ItemRef) {
        if let Err(_err) = self.try_reconfigure_item(item) {
            #[cfg(feature = "tracing")]
            tracing::trace!(%item, error = %_err, "reconfigure skipped");
        }
    }

    /// Configures the realized cell of `item` again, without relayout.
    ///
    /// An item that is in bounds but not visible has no cell; it picks up its
    /// current model once it scrolls into view, and this returns `Ok(())`.
    pub fn try_reconfigure_item(&mut self, item: ItemRef) -> Result<(), ParallaxError> {
        let row_count = self.rows.len();
        let row = self
            .rows
            .get_mut(item.row)
            .ok_or(ParallaxError::RowOutOfBounds {
                row: item.row,
                row_count,
            })?;
        let item_count = row.item_count();
        if item.item >= item_count {
            return Err(ParallaxError::ItemOutOfBounds { item, item_count });
        }
        row.reconfigure(&self.source, item.item);
        Ok(())
    }

    /// Scrolls so that `item` lands at `alignment` in its row.
    ///
    /// Does nothing if the content does not overflow, or if the item cannot be
    /// resolved; see [`ParallaxContainer::try_scroll_to_item`] for the checked form.
    pub fn scroll_to_item(&mut self, item: ItemRef, alignment: ScrollAlignment, animated: bool) {
        if let Err(_err) = self.try_scroll_to_item(item, alignment, animated) {
            #[cfg(feature = "tracing")]
            tracing::trace!(%item, error = %_err, "scroll to item skipped");
        }
    }

    /// Scrolls so that `item` lands at `alignment` in its row.
    ///
    /// The target progress is computed against the item's own row and then
    /// applied to the master surface, so every row moves with it. When
    /// `animated`, the surface animates linearly; advance it with
    /// [`ParallaxContainer::tick`].
    pub fn try_scroll_to_item(
        &mut self,
        item: ItemRef,
        alignment: ScrollAlignment,
        animated: bool,
    ) -> Result<(), ParallaxError> {
        if !self.engine.state().can_scroll() {
            return Err(ParallaxError::NothingToScroll);
        }
        let row = self
            .rows
            .get(item.row)
            .ok_or(ParallaxError::RowOutOfBounds {
                row: item.row,
                row_count: self.rows.len(),
            })?;
        let item_count = row.item_count();
        if item.item >= item_count {
            return Err(ParallaxError::ItemOutOfBounds { item, item_count });
        }
        if row.max_scroll_offset() <= 0.0 {
            return Err(ParallaxError::NothingToScroll);
        }
        let progress = SyncEngine::progress_for_item(row, item.item, alignment)
            .ok_or(ParallaxError::ItemNotResolved(item))?;
        let offset = self
            .engine
            .master_offset_for_progress(progress)
            .ok_or(ParallaxError::NothingToScroll)?;

        self.surface.set_content_offset(offset, animated);
        self.sync();
        Ok(())
    }

    /// Forwards a pointer down event.
    pub fn pointer_down(&mut self, pointer_id: Option<PointerId>, position: Point) {
        let hit = Self::hit_view(&self.rows, &self.layout, &self.engine, self.viewport.width);
        let effects = self.surface.on_down(pointer_id, position, &hit);
        self.apply_effects(effects);
        self.sync();
    }

    /// Forwards a pointer move event.
    pub fn pointer_move(&mut self, pointer_id: Option<PointerId>, position: Point) {
        let hit = Self::hit_view(&self.rows, &self.layout, &self.engine, self.viewport.width);
        let effects = self.surface.on_move(pointer_id, position, &hit);
        self.apply_effects(effects);
        self.sync();
    }

    /// Forwards a pointer up event. A tap selects the item under the pointer.
    pub fn pointer_up(&mut self, pointer_id: Option<PointerId>, position: Point) {
        let hit = Self::hit_view(&self.rows, &self.layout, &self.engine, self.viewport.width);
        let effects = self.surface.on_up(pointer_id, position, &hit);
        self.apply_effects(effects);
        self.sync();
    }

    /// Forwards a pointer cancel event.
    pub fn pointer_cancel(&mut self, pointer_id: Option<PointerId>) {
        let effects = self.surface.on_cancel(pointer_id);
        self.apply_effects(effects);
        self.sync();
    }

    /// Cancels every active touch, as when the host loses pointer capture.
    pub fn cancel_pointers(&mut self) {
        let effects = self.surface.cancel_all();
        self.apply_effects(effects);
        self.sync();
    }

    /// Advances surface animations to `now` (milliseconds).
    ///
    /// Returns `true` if the offset moved and the rows were re-synchronized.
    pub fn tick(&mut self, now: u64) -> bool {
        if !self.surface.tick(now) {
            return false;
        }
        self.sync();
        true
    }

    fn insert_row(&mut self, index: usize) {
        let row = Row::new(index, self.layout, self.viewport.width);
        self.rows.insert(index, row);
    }

    fn remove_row(&mut self, index: usize) {
        if index < self.rows.len() {
            self.rows.remove(index);
        }
    }

    fn apply_effects(&mut self, effects: SurfaceEffects) {
        for effect in effects {
            match effect {
                SurfaceEffect::Highlight(item) => self.set_highlighted(item, true),
                SurfaceEffect::Unhighlight(item) => self.set_highlighted(item, false),
                SurfaceEffect::Select(item) => self.delegate.did_select(item),
            }
        }
    }

    fn set_highlighted(&mut self, item: ItemRef, highlighted: bool) {
        if let Some(row) = self.rows.get_mut(item.row) {
            row.set_highlighted(item.item, highlighted);
        }
    }

    fn refresh_extents(&mut self) {
        let width = self.viewport.width;
        let content = self.engine.recompute_master_extent(&self.rows);
        self.engine.set_visible_extent(width);
        self.surface.set_extents(content, width);
    }

    /// One forward pass: master offset → row offsets → realized cells.
    fn sync(&mut self) {
        self.engine
            .sync(self.surface.content_offset(), &mut self.rows);
        for row in &mut self.rows {
            row.realize_visible(&self.source);
        }
    }

    fn stack_hit(&self) -> StackHit<'_, D::Cell> {
        Self::hit_view(&self.rows, &self.layout, &self.engine, self.viewport.width)
    }

    fn hit_view<'a>(
        rows: &'a [Row<D::Cell>],
        layout: &'a LayoutConfig,
        engine: &SyncEngine,
        width: f64,
    ) -> StackHit<'a, D::Cell> {
        StackHit {
            rows,
            layout,
            transform: engine.stack_transform(),
            width,
        }
    }
}

/// The row stack as a hit-test target for the master surface.
struct StackHit<'a, C> {
    rows: &'a [Row<C>],
    layout: &'a LayoutConfig,
    transform: Affine,
    width: f64,
}

impl<C: ContentCell> HitTarget for StackHit<'_, C> {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn row_frame(&self, row: usize) -> Option<Rect> {
        if row >= self.rows.len() {
            return None;
        }
        let y = self.layout.row_origin_y(row);
        let frame = Rect::new(0.0, y, self.width, y + self.layout.row_height());
        Some(self.transform.transform_rect_bbox(frame))
    }

    fn item_at(&self, row: usize, point: Point) -> Option<usize> {
        self.rows.get(row)?.item_at(point)
    }
}
