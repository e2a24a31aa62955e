// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-slot row selection.

/// Which row of an overlay is selected, if any.
///
/// Selection is last-write-wins: selecting replaces the previous row, and deselecting clears the
/// slot no matter which row is named.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SelectionState {
    selected: Option<usize>,
}

impl SelectionState {
    /// No selected row.
    pub const fn new() -> Self {
        Self { selected: None }
    }

    /// The selected row.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Select `index`, or clear the selection when `None`.
    pub fn select(&mut self, index: Option<usize>) {
        match index {
            Some(i) => self.selected = Some(i),
            None => self.deselect(None),
        }
    }

    /// Clear the selection. The argument is accepted for symmetry with [`select`](Self::select)
    /// and does not need to match the selected row.
    pub fn deselect(&mut self, _index: Option<usize>) {
        self.selected = None;
    }
}
