//! Abstract input actions.
//!
//! The input-decoding collaborator turns keypresses into [`Action`]s;
//! [`handle_action`] routes one action through selection, focus, or the
//! command engine and re-syncs the views. One action, one complete
//! turn.

use crate::app::AppState;
use crate::command::{self, CreatePosition};
use crate::layout;
use crate::movement::MoveDirection;

/// One decoded input event.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Select the visible item above.
    MoveUp,
    /// Select the visible item below.
    MoveDown,
    /// Close the selection, or step out to its parent.
    MoveLeft,
    /// Open the selection, or step into its first child.
    MoveRight,
    /// Structurally move the selection.
    MoveSelected(MoveDirection),
    /// Zoom into the selection.
    FocusSelected,
    /// Zoom out one level.
    FocusParent,
    /// Create an empty item near the selection.
    Create(CreatePosition),
    /// Remove the selection.
    RemoveSelected,
    /// Retitle the selection.
    Rename(String),
    Undo,
    Redo,
}

/// Handle one action and bring the view map up to date.
///
/// Rejected commands are dropped silently; an invalid keypress never
/// surfaces an error to the user.
pub fn handle_action(app: &mut AppState, action: Action) {
    let result = match action {
        Action::MoveUp => {
            app.select_item_above();
            Ok(())
        }
        Action::MoveDown => {
            app.select_item_below();
            Ok(())
        }
        Action::MoveLeft => {
            app.move_left();
            Ok(())
        }
        Action::MoveRight => {
            app.move_right();
            Ok(())
        }
        Action::MoveSelected(direction) => command::move_selected(app, direction),
        Action::FocusSelected => {
            app.focus_on_item_selected();
            Ok(())
        }
        Action::FocusParent => {
            app.focus_on_parent_of_focused();
            Ok(())
        }
        Action::Create(position) => command::create_item(app, position),
        Action::RemoveSelected => command::remove_selected(app),
        Action::Rename(title) => command::rename_selected(app, title),
        Action::Undo => {
            command::undo(app);
            Ok(())
        }
        Action::Redo => {
            command::redo(app);
            Ok(())
        }
    };
    if let Err(error) = result {
        tracing::debug!(target: "outly::action", %error, "action rejected");
    }
    layout::sync_views(app);
}

#[cfg(test)]
mod tests {
    use super::*;
    use outly_core::ItemRecord;

    fn app() -> AppState {
        AppState::from_records(&[
            ItemRecord::new("Item 1").with_children(vec![ItemRecord::new("Item 1.1")]),
            ItemRecord::new("Item 2"),
        ])
    }

    #[test]
    fn every_action_leaves_the_view_map_in_sync() {
        let mut app = app();
        let item1 = app.tree.children(app.tree.root())[0];
        let item11 = app.tree.children(item1)[0];

        handle_action(&mut app, Action::MoveLeft); // closes Item 1
        assert!(!app.views.contains_key(&item11));

        handle_action(&mut app, Action::MoveRight); // reopens it
        assert!(app.views.contains_key(&item11));
    }

    #[test]
    fn rejected_actions_change_nothing_visible() {
        let mut app = app();
        handle_action(&mut app, Action::FocusSelected);
        let before: Vec<_> = app.views.keys().copied().collect();

        // The selection is the focus scope root, so structural edits
        // on it are rejected before they reach the queue.
        handle_action(&mut app, Action::RemoveSelected);
        handle_action(&mut app, Action::MoveSelected(MoveDirection::Down));

        let after: Vec<_> = app.views.keys().copied().collect();
        assert_eq!(before, after);
        assert!(app.undo.is_empty());
    }

    #[test]
    fn focus_actions_rebuild_the_view_map() {
        let mut app = app();
        handle_action(&mut app, Action::FocusSelected);
        let item1 = app.item_focused;
        assert_eq!(app.views[&item1].grid_x, -1);

        handle_action(&mut app, Action::FocusParent);
        assert_eq!(app.views[&item1].grid_x, 0);
    }

    #[test]
    fn undo_actions_resync_views() {
        let mut app = app();
        handle_action(&mut app, Action::Create(CreatePosition::After));
        let created = app.selected_item.unwrap();
        assert!(app.views.contains_key(&created));

        handle_action(&mut app, Action::Undo);
        assert!(!app.views.contains_key(&created));
    }
}
