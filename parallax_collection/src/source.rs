// Copyright 2025 the Parallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborator contracts: data supply, cell rendering, and selection.

use alloc::rc::Rc;

use parallax_layout::ItemRef;

/// Model of one item. Its width decides the item's place in the row.
///
/// The width can be a constant or derived from the model's data.
pub trait CellModel {
    /// Width the item needs in its row, in logical pixels.
    fn required_width(&self) -> f64;
}

/// A renderable cell that draws one item from its model.
///
/// Cells are reused: a cell that scrolls out of view may be configured again
/// for a different item.
pub trait ContentCell {
    /// Model type this cell renders.
    type Model;

    /// Configures the cell for `model`.
    fn configure(&mut self, model: &Self::Model);

    /// Shows or clears the pressed state.
    fn set_highlighted(&mut self, highlighted: bool) {
        let _ = highlighted;
    }
}

/// Supplies rows, item counts, and models.
///
/// The container re-reads counts and models on every reload and never keeps
/// them beyond one reconciliation pass.
///
/// Implementations for `&T` and `Rc<T>` let a container refer to a source it
/// does not own.
pub trait DataSource {
    /// Item model type.
    type Model: CellModel;
    /// The one cell kind used for every item of the container.
    type Cell: ContentCell<Model = Self::Model> + Default;

    /// Number of rows.
    fn row_count(&self) -> usize;

    /// Number of items in `row`.
    fn item_count(&self, row: usize) -> usize;

    /// Model of `item`.
    fn model(&self, item: ItemRef) -> Self::Model;
}

impl<T: DataSource + ?Sized> DataSource for &T {
    type Model = T::Model;
    type Cell = T::Cell;

    fn row_count(&self) -> usize {
        (**self).row_count()
    }

    fn item_count(&self, row: usize) -> usize {
        (**self).item_count(row)
    }

    fn model(&self, item: ItemRef) -> Self::Model {
        (**self).model(item)
    }
}

impl<T: DataSource + ?Sized> DataSource for Rc<T> {
    type Model = T::Model;
    type Cell = T::Cell;

    fn row_count(&self) -> usize {
        (**self).row_count()
    }

    fn item_count(&self, row: usize) -> usize {
        (**self).item_count(row)
    }

    fn model(&self, item: ItemRef) -> Self::Model {
        (**self).model(item)
    }
}

/// Receives item selections.
pub trait SelectionSink {
    /// Called when `item` is tapped.
    fn did_select(&mut self, item: ItemRef);
}

impl<F: FnMut(ItemRef)> SelectionSink for F {
    fn did_select(&mut self, item: ItemRef) {
        self(item);
    }
}
