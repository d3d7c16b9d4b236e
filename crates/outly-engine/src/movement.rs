//! Directional structural moves.
//!
//! Reorders or reparents one item relative to its siblings. A move that
//! has nowhere to go leaves the tree untouched.

use outly_core::{ItemId, Tree};
use strum::Display;

/// Direction of a structural move of the selected item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum MoveDirection {
    /// Swap with the previous sibling.
    Up,
    /// Swap with the next sibling.
    Down,
    /// Become the sibling right after the current parent.
    Left,
    /// Become the last child of the previous sibling.
    Right,
}

/// Apply a directional move to an attached item.
///
/// `focus` is the current focus scope root; an item directly under it
/// cannot move left, that would escape the scope.
pub(crate) fn apply_move(tree: &mut Tree, focus: ItemId, item: ItemId, direction: MoveDirection) {
    let Some(parent) = tree.parent(item) else {
        return;
    };
    let index = tree.item_index(item);
    match direction {
        MoveDirection::Up => {
            if index > 0 {
                tree.remove_child_at(parent, index);
                tree.add_child_at(parent, item, index - 1);
            }
        }
        MoveDirection::Down => {
            if index + 1 < tree.children(parent).len() {
                tree.remove_child_at(parent, index);
                tree.add_child_at(parent, item, index + 1);
            }
        }
        MoveDirection::Right => {
            if index > 0 {
                let new_parent = tree.children(parent)[index - 1];
                tree.remove_child_at(parent, index);
                let end = tree.children(new_parent).len();
                tree.add_child_at(new_parent, item, end);
                // Keep the moved item on screen.
                tree.set_open(new_parent, true);
            }
        }
        MoveDirection::Left => {
            if parent == focus || tree.is_root(parent) {
                return;
            }
            let Some(grandparent) = tree.parent(parent) else {
                return;
            };
            let parent_index = tree.item_index(parent);
            tree.remove_child_at(parent, index);
            tree.add_child_at(grandparent, item, parent_index + 1);
        }
    }
}
