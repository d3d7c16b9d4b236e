//! Grid layout and view-map reconciliation.
//!
//! One sync walks the focus scope in pre-order, assigns every visible
//! item a grid cell, and reconciles the result against the persistent
//! view map: existing entries are updated in place (move), missing ones
//! inserted (enter), untouched ones dropped (exit). The renderer keys
//! its animations off those three cases.

use std::collections::HashSet;

use indexmap::map::Entry;
use indexmap::IndexMap;
use outly_core::{ItemId, Tree};
use serde::Serialize;

use crate::app::AppState;
use crate::spacings::{
    FIRST_LEVEL_FONT_SIZE, FONT_SIZE, GRID_SIZE, TITLE_FONT_SIZE, TITLE_OFFSET_FROM_TOP,
};
use crate::theme::Theme;

/// Render state of one visible item.
///
/// Column is nesting depth relative to the focus scope; a non-root
/// focus scope root sits at column -1 with its children at 0. Row is
/// the item's position in the visible pre-order. Everything else is
/// derived from the grid cell and the selection state, recomputed on
/// every sync and never patched elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemView {
    pub grid_x: i32,
    pub grid_y: i32,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    pub text_color: &'static str,
    pub circle_color: &'static str,
}

impl ItemView {
    fn compute(grid_x: i32, grid_y: i32, is_selected: bool, theme: &Theme) -> Self {
        Self {
            grid_x,
            grid_y,
            x: calc_x(grid_x),
            y: calc_y(grid_x, grid_y),
            font_size: font_size_for(grid_x),
            text_color: if is_selected {
                theme.text_selected
            } else {
                theme.text_regular
            },
            circle_color: if is_selected {
                theme.circle_selected
            } else {
                theme.circle_regular
            },
        }
    }
}

/// Pixel x of a grid column. Column -1 sits at the left margin.
pub fn calc_x(grid_x: i32) -> f32 {
    (grid_x + 1) as f32 * GRID_SIZE
}

/// Pixel y of a grid cell. The focus root title hangs above the grid.
pub fn calc_y(grid_x: i32, grid_y: i32) -> f32 {
    if grid_x == -1 {
        TITLE_OFFSET_FROM_TOP
    } else {
        grid_y as f32 * GRID_SIZE
    }
}

/// Font size by column: title, first level, everything deeper.
///
/// Shared with the rename box, which must match the on-canvas text.
pub fn font_size_for(grid_x: i32) -> f32 {
    match grid_x {
        -1 => TITLE_FONT_SIZE,
        0 => FIRST_LEVEL_FONT_SIZE,
        _ => FONT_SIZE,
    }
}

/// Relayout the focus scope and reconcile the view map.
///
/// Runs after every structural or visibility-affecting mutation.
/// Deterministic: syncing twice without a mutation in between changes
/// nothing.
pub fn sync_views(app: &mut AppState) {
    let AppState {
        tree,
        views,
        selected_item,
        item_focused,
        theme,
        ..
    } = app;
    let mut pass = SyncPass {
        tree,
        views,
        touched: HashSet::new(),
        selected: *selected_item,
        theme,
        entered: 0,
        moved: 0,
    };

    let focus = *item_focused;
    let mut row = 0;
    if !pass.tree.is_root(focus) {
        pass.upsert(focus, -1, 0);
        row = 1;
    }
    for i in 0..pass.tree.children(focus).len() {
        let child = pass.tree.children(focus)[i];
        row += pass.walk(child, 0, row);
    }

    let before = pass.views.len();
    pass.views.retain(|id, _| pass.touched.contains(id));
    let exited = before - pass.views.len();
    tracing::trace!(
        target: "outly::layout",
        entered = pass.entered,
        moved = pass.moved,
        exited,
        rows = row,
        "views synced"
    );
}

struct SyncPass<'a> {
    tree: &'a Tree,
    views: &'a mut IndexMap<ItemId, ItemView>,
    touched: HashSet<ItemId>,
    selected: Option<ItemId>,
    theme: &'a Theme,
    entered: usize,
    moved: usize,
}

impl SyncPass<'_> {
    // Returns the number of rows the subtree occupies, so siblings can
    // accumulate their rows as a running total.
    fn walk(&mut self, item: ItemId, grid_x: i32, grid_y: i32) -> i32 {
        self.upsert(item, grid_x, grid_y);
        let mut height = 1;
        if self.tree.is_open(item) && self.tree.has_children(item) {
            for i in 0..self.tree.children(item).len() {
                let child = self.tree.children(item)[i];
                height += self.walk(child, grid_x + 1, grid_y + height);
            }
        }
        height
    }

    fn upsert(&mut self, item: ItemId, grid_x: i32, grid_y: i32) {
        let view = ItemView::compute(grid_x, grid_y, self.selected == Some(item), self.theme);
        match self.views.entry(item) {
            Entry::Occupied(mut slot) => {
                if *slot.get() != view {
                    *slot.get_mut() = view;
                    self.moved += 1;
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(view);
                self.entered += 1;
            }
        }
        self.touched.insert(item);
    }
}
