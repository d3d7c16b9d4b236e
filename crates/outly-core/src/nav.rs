//! Visibility-aware navigation over the outline.
//!
//! These functions walk the tree in the order items appear on screen:
//! pre-order, with closed subtrees skipped. They take the focus scope
//! root explicitly so navigation never escapes the focused subtree.

use crate::item::ItemId;
use crate::tree::Tree;

/// The next visible item below `item`, in on-screen order.
///
/// Descends into the first child when the item shows its children,
/// which it always does for the focus root. Otherwise falls through to
/// [`following_item`]. `None` at the bottom of the visible outline.
pub fn item_below(tree: &Tree, focus: ItemId, item: ItemId) -> Option<ItemId> {
    let shows_children = (tree.is_open(item) && tree.has_children(item)) || item == focus;
    if shows_children {
        tree.children(item).first().copied()
    } else {
        following_item(tree, focus, item)
    }
}

/// The next sibling of `item`, ascending past last siblings.
///
/// Ascent stops at the focus root and at the true root, so the result
/// always stays inside the focused scope. `None` when `item` closes the
/// visible outline.
pub fn following_item(tree: &Tree, focus: ItemId, item: ItemId) -> Option<ItemId> {
    let mut cursor = item;
    loop {
        if cursor == focus || tree.is_root(cursor) {
            return None;
        }
        let parent = tree.parent(cursor)?;
        let index = tree.item_index(cursor);
        let siblings = tree.children(parent);
        if index + 1 < siblings.len() {
            return Some(siblings[index + 1]);
        }
        cursor = parent;
    }
}

/// The visible item directly above `item`.
///
/// The previous sibling's deepest visible descendant when there is one,
/// otherwise the parent. `None` when `item` is the first visible item.
pub fn item_above(tree: &Tree, item: ItemId) -> Option<ItemId> {
    let parent = tree.parent(item)?;
    let index = tree.item_index(item);
    if index > 0 {
        let previous = tree.children(parent)[index - 1];
        Some(tree.last_nested_item(previous))
    } else if tree.is_root(parent) {
        None
    } else {
        Some(parent)
    }
}
