// Copyright 2025 the Parallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end behavior of the parallax container.

use std::rc::Rc;

use kurbo::{Affine, Insets, Point, Size};
use parallax_collection::{
    CellModel, ContentCell, DataSource, ItemRef, LayoutConfig, ParallaxContainer, ParallaxError,
    PointerId, ScrollAlignment, SelectionSink, SyncedRow,
};

#[derive(Clone, Debug, PartialEq)]
struct Tile {
    width: f64,
    label: &'static str,
}

impl CellModel for Tile {
    fn required_width(&self) -> f64 {
        self.width
    }
}

#[derive(Default, Debug)]
struct TileCell {
    label: &'static str,
    configured: usize,
    highlighted: bool,
}

impl ContentCell for TileCell {
    type Model = Tile;

    fn configure(&mut self, model: &Tile) {
        self.label = model.label;
        self.configured += 1;
    }

    fn set_highlighted(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
    }
}

/// Rows of item widths; every model carries the same label.
#[derive(Clone, Debug)]
struct Grid {
    rows: Vec<Vec<f64>>,
    label: &'static str,
}

impl Grid {
    fn new(rows: &[&[f64]]) -> Self {
        Self {
            rows: rows.iter().map(|row| row.to_vec()).collect(),
            label: "a",
        }
    }
}

impl DataSource for Grid {
    type Model = Tile;
    type Cell = TileCell;

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn item_count(&self, row: usize) -> usize {
        self.rows[row].len()
    }

    fn model(&self, item: ItemRef) -> Tile {
        Tile {
            width: self.rows[item.row][item.item],
            label: self.label,
        }
    }
}

#[derive(Default, Debug)]
struct Recorder(Vec<ItemRef>);

impl SelectionSink for Recorder {
    fn did_select(&mut self, item: ItemRef) {
        self.0.push(item);
    }
}

type Container = ParallaxContainer<Grid, Recorder>;

fn layout() -> LayoutConfig {
    LayoutConfig::new(40.0, 10.0, 8.0, Insets::new(16.0, 0.0, 16.0, 0.0))
}

fn container(rows: &[&[f64]]) -> Container {
    let mut container = ParallaxContainer::new(layout(), Grid::new(rows), Recorder::default());
    container.set_viewport(Size::new(200.0, 90.0));
    container
}

/// Widest row 348px, short row 82px, viewport 200px.
fn scenario() -> Container {
    container(&[&[100.0, 100.0, 100.0], &[50.0]])
}

fn offsets(container: &Container) -> Vec<f64> {
    container
        .rows()
        .iter()
        .map(|row| row.scroll_offset())
        .collect()
}

/// Presses at `from`, crosses the drag threshold, then pans to `to`. The
/// pointer stays down.
fn drag(container: &mut Container, from: f64, to: f64) {
    let start = if to < from { from - 20.0 } else { from + 20.0 };
    container.pointer_down(None, Point::new(from, 20.0));
    container.pointer_move(None, Point::new(start, 20.0));
    container.pointer_move(None, Point::new(to + (start - from), 20.0));
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn rows_follow_master_progress() {
    let mut container = scenario();
    assert_eq!(container.scroll_state().master_content_extent, 348.0);
    assert_eq!(container.scroll_state().master_max_offset(), 148.0);

    drag(&mut container, 190.0, 116.0);
    assert_eq!(container.content_offset(), 74.0);
    assert_eq!(container.scroll_state().progress, 0.5);
    assert_eq!(offsets(&container), [74.0, 0.0]);
    assert_eq!(container.stack_transform(), Affine::IDENTITY);
    container.pointer_up(None, Point::new(116.0, 20.0));
    assert!(container.delegate().0.is_empty());
}

#[test]
fn reload_is_idempotent() {
    let mut container = scenario();
    drag(&mut container, 190.0, 116.0);
    container.pointer_up(None, Point::new(116.0, 20.0));

    let before = (offsets(&container), container.scroll_state());
    container.reload_data();
    container.reload_data();
    assert_eq!(container.row_count(), 2);
    assert_eq!((offsets(&container), container.scroll_state()), before);
}

#[test]
fn reload_keeps_the_master_offset_against_new_geometry() {
    let mut container = scenario();
    drag(&mut container, 190.0, 116.0);
    container.pointer_up(None, Point::new(116.0, 20.0));

    // Row 0 grows to 456px, so the same offset is now less than halfway.
    container.source_mut().rows[0].push(100.0);
    container.reload_data();
    assert_eq!(container.content_offset(), 74.0);
    assert_eq!(container.scroll_state().master_max_offset(), 256.0);
    assert_close(container.scroll_state().progress, 74.0 / 256.0);
    assert_close(offsets(&container)[0], 74.0);
}

#[test]
fn reload_data_grows_and_shrinks_from_the_tail() {
    let mut container = scenario();
    container.source_mut().rows.push(vec![100.0; 5]);
    container.source_mut().rows.push(vec![30.0]);
    container.reload_data();
    assert_eq!(container.row_count(), 4);
    let indices: Vec<usize> = container.rows().iter().map(|row| row.index()).collect();
    assert_eq!(indices, [0, 1, 2, 3]);
    assert_eq!(container.row(2).map(|row| row.item_count()), Some(5));
    // Row 2 is now the widest: 16 + 500 + 32 + 16.
    assert_eq!(container.scroll_state().master_content_extent, 564.0);
    assert_eq!(container.content_height(), 4.0 * 40.0 + 3.0 * 10.0);

    container.source_mut().rows.truncate(1);
    container.reload_data();
    assert_eq!(container.row_count(), 1);
    assert_eq!(container.row(0).map(|row| row.index()), Some(0));
    assert_eq!(container.scroll_state().master_content_extent, 348.0);
}

#[test]
fn reload_data_with_no_rows_disables_scrolling() {
    let mut container = scenario();
    container.source_mut().rows.clear();
    container.reload_data();
    assert_eq!(container.row_count(), 0);
    assert_eq!(container.scroll_state().master_content_extent, 0.0);
    assert!(!container.scroll_state().can_scroll());
    assert_eq!(
        container.try_scroll_to_item(ItemRef::new(0, 0), ScrollAlignment::Left, false),
        Err(ParallaxError::NothingToScroll)
    );
}

#[test]
fn reload_rows_skips_missing_rows() {
    let mut container = container(&[&[100.0], &[100.0], &[100.0]]);
    container.source_mut().rows[0] = vec![100.0; 3];
    container.reload_rows([0, 5, 0]);
    assert_eq!(container.row_count(), 3);
    assert_eq!(container.row(0).map(|row| row.item_count()), Some(3));
    assert_eq!(container.scroll_state().master_content_extent, 348.0);
}

#[test]
fn scroll_to_item_left_aligns_in_the_widest_row() {
    let mut container = scenario();
    container.scroll_to_item(ItemRef::new(0, 1), ScrollAlignment::Left, false);
    // Item 1 starts at 124.
    assert_close(container.content_offset(), 124.0);
    assert_close(offsets(&container)[0], 124.0);
    let frame = container
        .row(0)
        .and_then(|row| row.item_frame(1))
        .expect("item 1 is laid out");
    assert_close(frame.x0 - offsets(&container)[0], 0.0);
}

#[test]
fn scroll_to_item_in_a_shorter_row_clamps_progress() {
    // Row 1 is 240px wide with a 40px range; its item 1 starts at 124.
    let mut container = container(&[&[100.0, 100.0, 100.0], &[100.0, 100.0]]);
    container
        .try_scroll_to_item(ItemRef::new(1, 1), ScrollAlignment::Left, false)
        .expect("row 1 overflows");
    assert_close(container.scroll_state().progress, 1.0);
    assert_close(container.content_offset(), 148.0);
    assert_close(offsets(&container)[1], 40.0);
}

#[test]
fn scroll_to_item_right_and_center() {
    let mut container = scenario();
    container.scroll_to_item(ItemRef::new(0, 1), ScrollAlignment::Right, false);
    // Item 1 ends at 224; 224 - 200.
    assert_close(container.content_offset(), 24.0);

    container.scroll_to_item(ItemRef::new(0, 1), ScrollAlignment::Center, false);
    // Center 174 - 100.
    assert_close(container.content_offset(), 74.0);
}

#[test]
fn scroll_to_item_is_a_no_op_when_nothing_overflows() {
    let mut container = scenario();
    container.set_viewport(Size::new(400.0, 90.0));
    assert_eq!(
        container.try_scroll_to_item(ItemRef::new(0, 2), ScrollAlignment::Left, false),
        Err(ParallaxError::NothingToScroll)
    );
    container.scroll_to_item(ItemRef::new(0, 2), ScrollAlignment::Left, false);
    assert_eq!(container.content_offset(), 0.0);
}

#[test]
fn scroll_to_item_in_a_row_without_overflow_does_not_move() {
    let mut container = scenario();
    assert_eq!(
        container.try_scroll_to_item(ItemRef::new(1, 0), ScrollAlignment::Left, false),
        Err(ParallaxError::NothingToScroll)
    );
    assert_eq!(container.content_offset(), 0.0);
}

#[test]
fn checked_operations_report_bad_addresses() {
    let mut container = scenario();
    assert_eq!(
        container.try_scroll_to_item(ItemRef::new(4, 0), ScrollAlignment::Left, false),
        Err(ParallaxError::RowOutOfBounds {
            row: 4,
            row_count: 2
        })
    );
    assert_eq!(
        container.try_scroll_to_item(ItemRef::new(0, 9), ScrollAlignment::Left, false),
        Err(ParallaxError::ItemOutOfBounds {
            item: ItemRef::new(0, 9),
            item_count: 3
        })
    );
    assert_eq!(
        container.try_reconfigure_item(ItemRef::new(2, 0)),
        Err(ParallaxError::RowOutOfBounds {
            row: 2,
            row_count: 2
        })
    );
    // The unchecked forms are silent.
    container.reconfigure_item(ItemRef::new(2, 0));
    container.scroll_to_item(ItemRef::new(0, 9), ScrollAlignment::Left, false);
    assert_eq!(container.content_offset(), 0.0);
}

#[test]
fn animated_scroll_advances_on_tick() {
    let mut container = scenario();
    container.scroll_to_item(ItemRef::new(0, 1), ScrollAlignment::Right, true);
    assert_eq!(container.content_offset(), 0.0);
    assert!(container.surface().is_animating());

    assert!(!container.tick(1_000));
    assert!(container.tick(1_150));
    assert_close(container.content_offset(), 12.0);
    assert_close(offsets(&container)[0], 12.0);
    assert!(container.tick(1_300));
    assert_close(container.content_offset(), 24.0);
    assert!(!container.surface().is_animating());
    assert!(!container.tick(1_400));
}

#[test]
fn reconfigure_updates_only_the_realized_cell() {
    let mut container = scenario();
    container.source_mut().label = "b";
    container
        .try_reconfigure_item(ItemRef::new(0, 0))
        .expect("item exists");
    let row = container.row(0).expect("row 0");
    assert_eq!(row.cell(0).map(|cell| cell.label), Some("b"));
    assert_eq!(row.cell(0).map(|cell| cell.configured), Some(2));
    assert_eq!(row.cell(1).map(|cell| cell.label), Some("a"));
    assert!(row.cell(2).is_none());

    // In bounds but not visible: nothing to configure, not an error.
    assert_eq!(container.try_reconfigure_item(ItemRef::new(0, 2)), Ok(()));
    assert_eq!(
        container.try_reconfigure_item(ItemRef::new(0, 3)),
        Err(ParallaxError::ItemOutOfBounds {
            item: ItemRef::new(0, 3),
            item_count: 3
        })
    );
}

#[test]
fn only_visible_cells_are_realized() {
    let mut container = scenario();
    let realized = |c: &Container, row: usize| -> Vec<usize> {
        c.row(row)
            .map(|row| row.realized_items().collect())
            .unwrap_or_default()
    };
    assert_eq!(realized(&container, 0), [0, 1]);
    assert_eq!(realized(&container, 1), [0]);

    container.scroll_to_item(ItemRef::new(0, 2), ScrollAlignment::Right, false);
    assert_eq!(realized(&container, 0), [1, 2]);
}

#[test]
fn tap_highlights_then_selects() {
    let mut container = scenario();
    container.pointer_down(None, Point::new(150.0, 20.0));
    assert!(
        container
            .row(0)
            .and_then(|row| row.cell(1))
            .is_some_and(|cell| cell.highlighted)
    );

    container.pointer_up(None, Point::new(152.0, 21.0));
    assert!(
        container
            .row(0)
            .and_then(|row| row.cell(1))
            .is_some_and(|cell| !cell.highlighted)
    );
    assert_eq!(container.delegate().0, [ItemRef::new(0, 1)]);

    // Second row starts at y = 50.
    container.pointer_down(None, Point::new(30.0, 60.0));
    container.pointer_up(None, Point::new(30.0, 60.0));
    assert_eq!(
        container.delegate().0,
        [ItemRef::new(0, 1), ItemRef::new(1, 0)]
    );
}

#[test]
fn taps_on_gaps_select_nothing() {
    let mut container = scenario();
    // Between items 0 and 1.
    container.pointer_down(None, Point::new(120.0, 20.0));
    container.pointer_up(None, Point::new(120.0, 20.0));
    // Between rows.
    container.pointer_down(None, Point::new(30.0, 45.0));
    container.pointer_up(None, Point::new(30.0, 45.0));
    assert!(container.delegate().0.is_empty());
    assert_eq!(container.item_at(Point::new(120.0, 20.0)), None);
}

#[test]
fn tap_hit_tests_through_the_row_offset() {
    let mut container = scenario();
    drag(&mut container, 190.0, 116.0);
    container.pointer_up(None, Point::new(116.0, 20.0));

    // Row 0 is scrolled by 74: x = 60 lands on item 1 (124..224).
    assert_eq!(container.item_at(Point::new(60.0, 20.0)), Some(ItemRef::new(0, 1)));
    container.pointer_down(None, Point::new(60.0, 20.0));
    container.pointer_up(None, Point::new(60.0, 20.0));
    assert_eq!(container.delegate().0, [ItemRef::new(0, 1)]);
}

#[test]
fn drag_cancels_selection() {
    let mut container = scenario();
    drag(&mut container, 150.0, 100.0);
    assert!(
        container
            .row(0)
            .and_then(|row| row.cell(1))
            .is_none_or(|cell| !cell.highlighted)
    );
    container.pointer_up(None, Point::new(100.0, 20.0));
    assert!(container.delegate().0.is_empty());
}

#[test]
fn cancel_clears_highlight_without_selecting() {
    let mut container = scenario();
    container.pointer_down(None, Point::new(150.0, 20.0));
    container.pointer_cancel(None);
    assert!(
        container
            .row(0)
            .and_then(|row| row.cell(1))
            .is_some_and(|cell| !cell.highlighted)
    );
    container.pointer_up(None, Point::new(150.0, 20.0));
    assert!(container.delegate().0.is_empty());
}

#[test]
fn pointers_are_tracked_independently() {
    let mut container = scenario();
    let second = PointerId::new(2);
    container.pointer_down(None, Point::new(30.0, 20.0));
    container.pointer_down(second, Point::new(30.0, 60.0));
    container.pointer_up(second, Point::new(30.0, 60.0));
    container.pointer_up(None, Point::new(30.0, 20.0));
    assert_eq!(
        container.delegate().0,
        [ItemRef::new(1, 0), ItemRef::new(0, 0)]
    );
}

#[test]
fn overscroll_translates_the_stack_and_bounces_back() {
    let mut container = scenario();
    // 100px past the start, halved by the rubber band.
    drag(&mut container, 50.0, 150.0);
    assert_eq!(container.content_offset(), -50.0);
    assert!(container.scroll_state().is_overscrolled());
    assert_eq!(offsets(&container), [0.0, 0.0]);
    assert_eq!(
        container.stack_transform(),
        Affine::translate((50.0, 0.0))
    );
    assert_eq!(container.row_frame(0).map(|frame| frame.x0), Some(50.0));

    container.pointer_up(None, Point::new(150.0, 20.0));
    assert!(container.surface().is_animating());
    assert!(!container.tick(0));
    assert!(container.tick(250));
    assert_eq!(container.content_offset(), 0.0);
    assert_eq!(container.stack_transform(), Affine::IDENTITY);
}

/// Pulls 100px past the start, releases, and lets 100ms of the bounce run.
fn bounce_partway(container: &mut Container) {
    drag(container, 50.0, 150.0);
    container.pointer_up(None, Point::new(150.0, 20.0));
    container.tick(0);
    container.tick(100);
    assert_eq!(container.content_offset(), -30.0);
}

#[test]
fn tap_during_bounce_selects_and_settles() {
    let mut container = scenario();
    bounce_partway(&mut container);

    // The stack is drawn 30px right; x = 100 is 70px into row 0.
    container.pointer_down(None, Point::new(100.0, 20.0));
    assert!(!container.surface().is_animating());
    container.pointer_up(None, Point::new(100.0, 20.0));
    assert_eq!(container.delegate().0, [ItemRef::new(0, 0)]);

    assert!(container.surface().is_animating());
    container.tick(1_000);
    assert!(container.tick(1_250));
    assert_eq!(container.content_offset(), 0.0);
    assert!(!container.scroll_state().is_overscrolled());
    assert_eq!(container.stack_transform(), Affine::IDENTITY);
}

#[test]
fn cancel_during_bounce_settles_without_selecting() {
    let mut container = scenario();
    bounce_partway(&mut container);

    container.pointer_down(None, Point::new(100.0, 20.0));
    container.pointer_cancel(None);
    assert!(container.surface().is_animating());
    container.tick(1_000);
    container.tick(1_250);
    assert_eq!(container.content_offset(), 0.0);
    assert_eq!(container.stack_transform(), Affine::IDENTITY);
    assert!(container.delegate().0.is_empty());
}

#[test]
fn overscroll_past_the_end_translates_left() {
    let mut container = scenario();
    // Pull 188px: 40px past the end, 20px after the rubber band.
    drag(&mut container, 190.0, 2.0);
    assert_eq!(container.content_offset(), 168.0);
    assert_eq!(offsets(&container), [148.0, 0.0]);
    let translation = container.stack_transform().translation();
    assert_close(translation.x, -20.0);
}

#[test]
fn shared_source_through_rc() {
    let grid = Rc::new(Grid::new(&[&[100.0, 100.0, 100.0]]));
    let mut picked = None;
    let mut container =
        ParallaxContainer::new(layout(), Rc::clone(&grid), |item: ItemRef| picked = Some(item));
    container.set_viewport(Size::new(200.0, 40.0));
    container.pointer_down(None, Point::new(20.0, 20.0));
    container.pointer_up(None, Point::new(20.0, 20.0));
    drop(container);
    assert_eq!(picked, Some(ItemRef::new(0, 0)));
    assert_eq!(Rc::strong_count(&grid), 1);
}

#[test]
fn shrinking_content_clamps_the_master_offset() {
    let mut container = scenario();
    drag(&mut container, 190.0, 60.0);
    container.pointer_up(None, Point::new(60.0, 20.0));
    assert_eq!(container.content_offset(), 130.0);

    // Row 0 loses an item: 240px wide, 40px of range left.
    container.source_mut().rows[0].pop();
    container.reload_data();
    assert_eq!(container.content_offset(), 40.0);
    assert_eq!(container.scroll_state().progress, 1.0);
    assert_eq!(container.stack_transform(), Affine::IDENTITY);
}

#[test]
fn cancel_pointers_ends_every_touch() {
    let mut container = scenario();
    container.pointer_down(PointerId::new(1), Point::new(30.0, 20.0));
    container.pointer_down(PointerId::new(2), Point::new(30.0, 60.0));
    container.cancel_pointers();
    assert!(
        container
            .rows()
            .iter()
            .filter_map(|row| row.cell(0))
            .all(|cell| !cell.highlighted)
    );
    container.pointer_up(PointerId::new(1), Point::new(30.0, 20.0));
    container.pointer_up(PointerId::new(2), Point::new(30.0, 60.0));
    assert!(container.delegate().0.is_empty());
}
