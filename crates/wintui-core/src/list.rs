//! A selectable list of windows.
//!
//! [`List`] holds window handles and a selected index. Moving clamps at
//! both ends; it never wraps.

use wintui_term::input::{KeyCode, KeyEvent};

use crate::geometry::Axis;
use crate::tui::Tui;
use crate::window::WindowId;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct List {
    items: Vec<WindowId>,
    index: usize,
    axis: Axis,
}

impl List {
    /// An empty list moved with Up/Down (`Vertical`) or Left/Right
    /// (`Horizontal`).
    #[must_use]
    pub const fn new(axis: Axis) -> Self {
        Self {
            items: Vec::new(),
            index: 0,
            axis,
        }
    }

    pub fn push(&mut self, item: WindowId) {
        self.items.push(item);
    }

    #[must_use]
    pub fn items(&self) -> &[WindowId] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The selected item.
    #[must_use]
    pub fn current(&self) -> Option<WindowId> {
        self.items.get(self.index).copied()
    }

    /// Select `index`, clamped to the list. Returns `true` if it moved.
    pub fn select(&mut self, index: usize) -> bool {
        let index = index.min(self.items.len().saturating_sub(1));
        let moved = index != self.index;
        self.index = index;
        moved
    }

    /// Select `item` if it is in the list.
    pub fn select_item(&mut self, item: WindowId) -> bool {
        self.items
            .iter()
            .position(|&w| w == item)
            .is_some_and(|i| self.select(i))
    }

    pub fn forward(&mut self) -> bool {
        self.select(self.index + 1)
    }

    pub fn backward(&mut self) -> bool {
        self.select(self.index.saturating_sub(1))
    }

    /// Move on the arrow keys of the list's axis. Returns `true` if the
    /// selection moved.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match (self.axis, key.code) {
            (Axis::Vertical, KeyCode::Down) | (Axis::Horizontal, KeyCode::Right) => self.forward(),
            (Axis::Vertical, KeyCode::Up) | (Axis::Horizontal, KeyCode::Left) => self.backward(),
            _ => false,
        }
    }

    /// Drop items whose windows were deleted, keeping the selection in
    /// range.
    pub fn prune(&mut self, tui: &Tui) {
        self.items.retain(|&w| tui.contains(w));
        self.select(self.index);
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.index = 0;
    }
}
