//! Application state: selection, focus scope, views, undo history.

use indexmap::IndexMap;
use outly_core::{item_above, item_below, ItemId, ItemRecord, Tree};

use crate::command::UndoState;
use crate::layout::{self, ItemView};
use crate::theme::Theme;

/// The aggregate root of one open outline.
///
/// Everything the engine mutates hangs off this struct; there is no
/// ambient global state. Callers own exactly one instance per outline.
#[derive(Debug)]
pub struct AppState {
    /// The outline tree.
    pub tree: Tree,
    /// Render state for every currently visible item, identity-keyed.
    pub views: IndexMap<ItemId, ItemView>,
    /// The single selected item, if any.
    pub selected_item: Option<ItemId>,
    /// Root of the focus scope; defaults to the true root.
    pub item_focused: ItemId,
    /// Linear undo/redo history.
    pub undo: UndoState,
    /// Active palette.
    pub theme: Theme,
}

impl AppState {
    /// Wrap a tree, select its first top-level item, and lay it out.
    pub fn new(tree: Tree) -> Self {
        let item_focused = tree.root();
        let selected_item = tree.children(item_focused).first().copied();
        let mut app = Self {
            tree,
            views: IndexMap::new(),
            selected_item,
            item_focused,
            undo: UndoState::default(),
            theme: Theme::default(),
        };
        layout::sync_views(&mut app);
        app
    }

    /// Build state from serialized records.
    pub fn from_records(records: &[ItemRecord]) -> Self {
        Self::new(Tree::from_records(records))
    }

    /// Swap the palette and restyle the views.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        layout::sync_views(&mut self);
        self
    }

    /// Select `item` if it lies inside the focus scope; no-op otherwise.
    pub fn change_selection(&mut self, item: ItemId) {
        if self.tree.is_descendant_or_self(self.item_focused, item) {
            self.selected_item = Some(item);
        }
    }

    /// Move the selection to the visible item above it.
    pub fn select_item_above(&mut self) {
        if let Some(selected) = self.selected_item {
            if let Some(above) = item_above(&self.tree, selected) {
                self.change_selection(above);
            }
        }
    }

    /// Move the selection to the visible item below it.
    pub fn select_item_below(&mut self) {
        if let Some(selected) = self.selected_item {
            if let Some(below) = item_below(&self.tree, self.item_focused, selected) {
                self.change_selection(below);
            }
        }
    }

    /// Left arrow: close an open, non-focused selection; otherwise step
    /// out to the parent (the true root is never selectable).
    pub fn move_left(&mut self) {
        let Some(selected) = self.selected_item else {
            return;
        };
        if self.tree.is_open(selected) && selected != self.item_focused {
            self.tree.set_open(selected, false);
        } else if let Some(parent) = self.tree.parent(selected) {
            if !self.tree.is_root(parent) {
                self.change_selection(parent);
            }
        }
    }

    /// Right arrow: open a closed selection; otherwise step into the
    /// first child.
    pub fn move_right(&mut self) {
        let Some(selected) = self.selected_item else {
            return;
        };
        if !self.tree.is_open(selected) && selected != self.item_focused {
            self.tree.set_open(selected, true);
        } else if let Some(&first) = self.tree.children(selected).first() {
            self.change_selection(first);
        }
    }

    /// Zoom into the selected item. Every prior view is invalid under
    /// the new scope, so the map is cleared; the caller re-syncs.
    pub fn focus_on_item_selected(&mut self) {
        if let Some(selected) = self.selected_item {
            self.item_focused = selected;
            self.views.clear();
        }
    }

    /// Zoom one level out; no-op at the true root.
    pub fn focus_on_parent_of_focused(&mut self) {
        if let Some(parent) = self.tree.parent(self.item_focused) {
            self.item_focused = parent;
        }
    }
}
