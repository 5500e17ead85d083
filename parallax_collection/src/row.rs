// Copyright 2025 the Parallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single horizontally laid-out row and its realized cells.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};
use parallax_layout::{ItemRef, LayoutConfig, RowLayout};
use parallax_sync::SyncedRow;

use crate::{CellModel, ContentCell, DataSource};

/// One row of the stack.
///
/// A row lays out its items, reports its content extent, and keeps cells
/// realized for the items that intersect its viewport. It never scrolls on its
/// own: the sync engine drives its offset.
#[derive(Debug)]
pub struct Row<C> {
    index: usize,
    layout: RowLayout,
    visible_extent: f64,
    scroll_offset: f64,
    cells: BTreeMap<usize, C>,
    reuse_pool: Vec<C>,
}

impl<C: ContentCell> Row<C> {
    pub(crate) fn new(index: usize, config: LayoutConfig, visible_extent: f64) -> Self {
        Self {
            index,
            layout: RowLayout::new(config),
            visible_extent,
            scroll_offset: 0.0,
            cells: BTreeMap::new(),
            reuse_pool: Vec::new(),
        }
    }

    /// Position of this row in the stack.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Number of items laid out in this row.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.layout.len()
    }

    /// Item geometry of this row.
    #[must_use]
    pub const fn layout(&self) -> &RowLayout {
        &self.layout
    }

    /// Realized cell for `item`, if it is currently visible.
    #[must_use]
    pub fn cell(&self, item: usize) -> Option<&C> {
        self.cells.get(&item)
    }

    /// Items that currently have a realized cell, in ascending order.
    pub fn realized_items(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells.keys().copied()
    }

    /// Item under `point`, given relative to the row's on-screen origin.
    ///
    /// The row's scroll offset is added before consulting the layout.
    #[must_use]
    pub fn item_at(&self, point: Point) -> Option<usize> {
        self.layout.item_at(point + Vec2::new(self.scroll_offset, 0.0))
    }

    pub(crate) fn set_visible_extent(&mut self, visible_extent: f64) {
        self.visible_extent = visible_extent.max(0.0);
    }

    /// Re-reads the item count and widths, then drops every realized cell
    /// into the reuse pool. The offset is clamped to the new content.
    pub(crate) fn reload<D>(&mut self, source: &D)
    where
        D: DataSource<Cell = C> + ?Sized,
    {
        let row = self.index;
        let count = source.item_count(row);
        self.layout.rebuild(
            (0..count).map(|item| source.model(ItemRef::new(row, item)).required_width()),
        );
        self.recycle_where(|_| true);
        self.scroll_offset = self.scroll_offset.clamp(0.0, self.max_scroll_offset());
    }

    /// Realizes cells for the items intersecting the viewport and recycles
    /// the ones that left it.
    pub(crate) fn realize_visible<D>(&mut self, source: &D)
    where
        D: DataSource<Cell = C, Model = C::Model> + ?Sized,
        C: Default,
    {
        let visible = self
            .layout
            .visible_range(self.scroll_offset, self.visible_extent);
        self.recycle_where(|item| !visible.contains(&item));

        for item in visible {
            if self.cells.contains_key(&item) {
                continue;
            }
            let mut cell = self.reuse_pool.pop().unwrap_or_default();
            cell.configure(&source.model(ItemRef::new(self.index, item)));
            self.cells.insert(item, cell);
        }
    }

    /// Configures the realized cell for `item` again with a fresh model.
    ///
    /// Returns `false` if the item has no realized cell; it will pick up the
    /// current model when it becomes visible.
    pub(crate) fn reconfigure<D>(&mut self, source: &D, item: usize) -> bool
    where
        D: DataSource<Cell = C, Model = C::Model> + ?Sized,
    {
        let Some(cell) = self.cells.get_mut(&item) else {
            return false;
        };
        cell.configure(&source.model(ItemRef::new(self.index, item)));
        true
    }

    pub(crate) fn set_highlighted(&mut self, item: usize, highlighted: bool) {
        if let Some(cell) = self.cells.get_mut(&item) {
            cell.set_highlighted(highlighted);
        }
    }

    fn recycle_where(&mut self, mut pred: impl FnMut(usize) -> bool) {
        let recycled: Vec<usize> = self.cells.keys().copied().filter(|&i| pred(i)).collect();
        for item in recycled {
            if let Some(mut cell) = self.cells.remove(&item) {
                cell.set_highlighted(false);
                self.reuse_pool.push(cell);
            }
        }
    }
}

impl<C> SyncedRow for Row<C> {
    fn content_extent(&self) -> f64 {
        self.layout.content_extent()
    }

    fn visible_extent(&self) -> f64 {
        self.visible_extent
    }

    fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll_offset = offset;
    }

    fn item_frame(&self, index: usize) -> Option<Rect> {
        self.layout.item_frame(index)
    }
}
