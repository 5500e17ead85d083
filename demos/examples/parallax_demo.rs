// Copyright 2025 the Parallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scripted session against a three-row parallax stack.
//!
//! The rows have different widths, so each one moves at its own speed while
//! all of them start and finish together. The demo drags the stack, pulls it
//! past the end and lets it bounce back, taps a tile, and animates a scroll to
//! an item, printing the row offsets along the way.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p parallax_demos --example parallax_demo`

use kurbo::{Insets, Point, Size};
use parallax_collection::{
    CellModel, ContentCell, DataSource, ItemRef, LayoutConfig, ParallaxContainer,
    ScrollAlignment, SyncedRow,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// A poster with a title; wide posters take more room.
#[derive(Clone, Debug)]
struct Poster {
    title: String,
    width: f64,
}

impl CellModel for Poster {
    fn required_width(&self) -> f64 {
        self.width
    }
}

#[derive(Default, Debug)]
struct PosterCell {
    title: String,
    pressed: bool,
}

impl ContentCell for PosterCell {
    type Model = Poster;

    fn configure(&mut self, model: &Poster) {
        self.title.clone_from(&model.title);
    }

    fn set_highlighted(&mut self, highlighted: bool) {
        self.pressed = highlighted;
    }
}

struct Shelf {
    rows: Vec<Vec<Poster>>,
}

impl Shelf {
    fn new() -> Self {
        let row = |name: &str, count: usize, width: f64| {
            (0..count)
                .map(|i| Poster {
                    title: format!("{name}{i}"),
                    width,
                })
                .collect::<Vec<_>>()
        };
        Self {
            rows: vec![row("A", 12, 120.0), row("B", 6, 90.0), row("C", 3, 200.0)],
        }
    }
}

impl DataSource for Shelf {
    type Model = Poster;
    type Cell = PosterCell;

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn item_count(&self, row: usize) -> usize {
        self.rows[row].len()
    }

    fn model(&self, item: ItemRef) -> Poster {
        self.rows[item.row][item.item].clone()
    }
}

fn print_rows<S: parallax_collection::SelectionSink>(
    label: &str,
    container: &ParallaxContainer<Shelf, S>,
) {
    let state = container.scroll_state();
    println!(
        "{label}: master {:.1} progress {:.3} stack dx {:.1}",
        state.master_offset,
        state.progress,
        container.stack_transform().translation().x,
    );
    for row in container.rows() {
        let titles: Vec<String> = row
            .realized_items()
            .filter_map(|item| row.cell(item))
            .map(|cell| {
                if cell.pressed {
                    format!("[{}]", cell.title)
                } else {
                    cell.title.clone()
                }
            })
            .collect();
        println!(
            "  row {}: offset {:7.1} / {:7.1}  {}",
            row.index(),
            row.scroll_offset(),
            row.max_scroll_offset(),
            titles.join(" "),
        );
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let layout = LayoutConfig::new(120.0, 12.0, 8.0, Insets::new(16.0, 4.0, 16.0, 4.0));
    let mut container = ParallaxContainer::new(layout, Shelf::new(), |item: ItemRef| {
        tracing::info!(%item, "poster selected");
    });
    container.set_viewport(Size::new(480.0, container.content_height()));
    print_rows("initial", &container);

    // Drag left by 300px.
    container.pointer_down(None, Point::new(400.0, 60.0));
    container.pointer_move(None, Point::new(380.0, 60.0));
    container.pointer_move(None, Point::new(80.0, 60.0));
    container.pointer_up(None, Point::new(80.0, 60.0));
    print_rows("after drag", &container);

    // Pull well past the end, then let go and let it bounce back.
    container.pointer_down(None, Point::new(460.0, 60.0));
    container.pointer_move(None, Point::new(440.0, 60.0));
    container.pointer_move(None, Point::new(-1400.0, 60.0));
    print_rows("overscrolled", &container);
    container.pointer_up(None, Point::new(-1400.0, 60.0));
    let mut now = 0;
    while container.surface().is_animating() {
        container.tick(now);
        now += 50;
    }
    print_rows("bounced back", &container);

    // Tap the first visible poster of the middle row.
    let tap = Point::new(40.0, layout.row_origin_y(1) + 60.0);
    container.pointer_down(None, tap);
    print_rows("pressed", &container);
    container.pointer_up(None, tap);

    // Bring the middle poster of the last row to the center.
    container.scroll_to_item(ItemRef::new(2, 1), ScrollAlignment::Center, true);
    while container.surface().is_animating() {
        if container.tick(now) {
            tracing::trace!(offset = container.content_offset(), "animation frame");
        }
        now += 16;
    }
    print_rows("scrolled to C1", &container);
}
