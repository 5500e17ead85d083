// Copyright 2025 the Parallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public addressing types.

use core::fmt;

/// Address of one model item: the row it lives in and its index within that row.
///
/// Rows address their items by local index only; containers translate to and
/// from `ItemRef` at their boundary.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemRef {
    /// Index of the row (section) in the stack.
    pub row: usize,
    /// Index of the item within its row.
    pub item: usize,
}

impl ItemRef {
    /// Creates an address for `item` in `row`.
    #[must_use]
    pub const fn new(row: usize, item: usize) -> Self {
        Self { row, item }
    }
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.row, self.item)
    }
}

impl From<(usize, usize)> for ItemRef {
    fn from((row, item): (usize, usize)) -> Self {
        Self::new(row, item)
    }
}
