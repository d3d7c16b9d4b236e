//! Reversible commands and the linear undo history.
//!
//! Every mutation that should be undoable goes through [`dispatch`]:
//! apply the do-effect, drop the redo tail, append, advance. Each
//! command captures enough pre-state at dispatch time to invert itself
//! exactly, so N undos followed by N redos reproduce the same tree,
//! titles, and selection.

use compact_str::CompactString;
use outly_core::{following_item, item_above, ItemId};
use strum::Display;
use thiserror::Error;

use crate::app::AppState;
use crate::movement::{self, MoveDirection};

/// Where a created item lands relative to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum CreatePosition {
    /// Same parent, just before the selection.
    Before,
    /// Same parent, just after the selection.
    After,
    /// First child of the selection.
    Inside,
}

/// A recorded, invertible mutation.
#[derive(Debug, Clone, Display)]
pub enum Command {
    Create {
        item: ItemId,
        position: CreatePosition,
        previously_selected: ItemId,
        anchor_was_open: bool,
    },
    Remove {
        item: ItemId,
        parent: ItemId,
        index: usize,
    },
    Rename {
        item: ItemId,
        old_title: CompactString,
        new_title: CompactString,
    },
    Move {
        item: ItemId,
        direction: MoveDirection,
        previous_parent: ItemId,
        previous_index: usize,
    },
}

/// Why a command was rejected before touching the tree or the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("no item is selected")]
    NoSelection,
    #[error("the selected item has no parent")]
    NoParent,
    #[error("the focus scope root cannot be edited structurally")]
    ItemFocused,
}

/// Applied-commands prefix of a linear history.
///
/// `cursor` counts applied commands: `queue[..cursor]` are done and not
/// undone, `queue[cursor..]` is the redo tail.
#[derive(Debug, Default)]
pub struct UndoState {
    pub(crate) queue: Vec<Command>,
    pub(crate) cursor: usize,
}

impl UndoState {
    /// Whether an undo would do anything.
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Whether a redo would do anything.
    pub fn can_redo(&self) -> bool {
        self.cursor < self.queue.len()
    }

    /// Total recorded commands, redo tail included.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether the history is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Create an empty item near the selection and select it.
pub fn create_item(app: &mut AppState, position: CreatePosition) -> Result<(), CommandError> {
    let anchor = app.selected_item.ok_or(CommandError::NoSelection)?;
    if !matches!(position, CreatePosition::Inside) {
        // A sibling of the focus scope root would land outside the
        // scope, invisible and unselectable.
        if anchor == app.item_focused {
            return Err(CommandError::ItemFocused);
        }
        if app.tree.parent(anchor).is_none() {
            return Err(CommandError::NoParent);
        }
    }
    let item = app.tree.insert("");
    let anchor_was_open = app.tree.is_open(anchor);
    dispatch(
        app,
        Command::Create {
            item,
            position,
            previously_selected: anchor,
            anchor_was_open,
        },
    );
    Ok(())
}

/// Remove the selected item and select its computed neighbor.
pub fn remove_selected(app: &mut AppState) -> Result<(), CommandError> {
    let item = app.selected_item.ok_or(CommandError::NoSelection)?;
    if item == app.item_focused {
        return Err(CommandError::ItemFocused);
    }
    let parent = app.tree.parent(item).ok_or(CommandError::NoParent)?;
    let index = app.tree.item_index(item);
    dispatch(app, Command::Remove { item, parent, index });
    Ok(())
}

/// Retitle the selected item.
pub fn rename_selected(
    app: &mut AppState,
    new_title: impl Into<CompactString>,
) -> Result<(), CommandError> {
    let item = app.selected_item.ok_or(CommandError::NoSelection)?;
    let old_title = app.tree.item(item).title.clone();
    dispatch(
        app,
        Command::Rename {
            item,
            old_title,
            new_title: new_title.into(),
        },
    );
    Ok(())
}

/// Structurally move the selected item in a direction.
pub fn move_selected(app: &mut AppState, direction: MoveDirection) -> Result<(), CommandError> {
    let item = app.selected_item.ok_or(CommandError::NoSelection)?;
    if item == app.item_focused {
        return Err(CommandError::ItemFocused);
    }
    let previous_parent = app.tree.parent(item).ok_or(CommandError::NoParent)?;
    let previous_index = app.tree.item_index(item);
    dispatch(
        app,
        Command::Move {
            item,
            direction,
            previous_parent,
            previous_index,
        },
    );
    Ok(())
}

/// Step the history back one command. Returns whether anything changed.
pub fn undo(app: &mut AppState) -> bool {
    if !app.undo.can_undo() {
        return false;
    }
    let command = app.undo.queue[app.undo.cursor - 1].clone();
    tracing::debug!(target: "outly::command", %command, "undo");
    invert(app, &command);
    app.undo.cursor -= 1;
    true
}

/// Step the history forward one command. Returns whether anything changed.
pub fn redo(app: &mut AppState) -> bool {
    if !app.undo.can_redo() {
        return false;
    }
    let command = app.undo.queue[app.undo.cursor].clone();
    tracing::debug!(target: "outly::command", %command, "redo");
    apply(app, &command);
    app.undo.cursor += 1;
    true
}

fn dispatch(app: &mut AppState, command: Command) {
    tracing::debug!(target: "outly::command", %command, "dispatch");
    apply(app, &command);
    let AppState { tree, undo, .. } = app;
    for discarded in undo.queue.drain(undo.cursor..) {
        // An undone create in the discarded tail owns a subtree that
        // can never be reattached; give its slots back to the arena.
        if let Command::Create { item, .. } = discarded {
            if tree.contains(item) && tree.parent(item).is_none() {
                tree.release_subtree(item);
            }
        }
    }
    undo.queue.push(command);
    undo.cursor = undo.queue.len();
}

fn apply(app: &mut AppState, command: &Command) {
    match *command {
        Command::Create {
            item,
            position,
            previously_selected: anchor,
            ..
        } => {
            match position {
                CreatePosition::Inside => {
                    app.tree.add_child_at(anchor, item, 0);
                    app.tree.set_open(anchor, true);
                }
                CreatePosition::Before | CreatePosition::After => {
                    let parent = app
                        .tree
                        .parent(anchor)
                        .expect("create anchor lost its parent");
                    let index = app.tree.item_index(anchor)
                        + matches!(position, CreatePosition::After) as usize;
                    app.tree.add_child_at(parent, item, index);
                }
            }
            app.change_selection(item);
        }
        Command::Remove { item, .. } => {
            // The neighbor that inherits the selection is computed on
            // the still-intact tree.
            let neighbor = item_above(&app.tree, item)
                .or_else(|| following_item(&app.tree, app.item_focused, item));
            app.tree.detach(item);
            app.selected_item = None;
            if let Some(neighbor) = neighbor {
                app.change_selection(neighbor);
            }
        }
        Command::Rename {
            item,
            ref new_title,
            ..
        } => {
            app.tree.set_title(item, new_title.clone());
            app.change_selection(item);
        }
        Command::Move {
            item, direction, ..
        } => {
            movement::apply_move(&mut app.tree, app.item_focused, item, direction);
            app.change_selection(item);
        }
    }
}

fn invert(app: &mut AppState, command: &Command) {
    match *command {
        Command::Create {
            item,
            position,
            previously_selected,
            anchor_was_open,
        } => {
            app.tree.detach(item);
            if matches!(position, CreatePosition::Inside) {
                // Apply force-opens the anchor; put its flag back.
                app.tree.set_open(previously_selected, anchor_was_open);
            }
            app.selected_item = None;
            app.change_selection(previously_selected);
        }
        Command::Remove {
            item,
            parent,
            index,
        } => {
            app.tree.add_child_at(parent, item, index);
            app.change_selection(item);
        }
        Command::Rename {
            item,
            ref old_title,
            ..
        } => {
            app.tree.set_title(item, old_title.clone());
            app.change_selection(item);
        }
        Command::Move {
            item,
            previous_parent,
            previous_index,
            ..
        } => {
            app.tree.detach(item);
            app.tree.add_child_at(previous_parent, item, previous_index);
            app.change_selection(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outly_core::ItemRecord;

    fn app() -> AppState {
        AppState::from_records(&[
            ItemRecord::new("Item 1"),
            ItemRecord::new("Item 2"),
            ItemRecord::new("Item 3"),
        ])
    }

    fn root_titles(app: &AppState) -> Vec<String> {
        app.tree
            .children(app.tree.root())
            .iter()
            .map(|&c| app.tree.title(c).to_string())
            .collect()
    }

    fn selected_title(app: &AppState) -> String {
        app.tree
            .title(app.selected_item.expect("an item should be selected"))
            .to_string()
    }

    #[test]
    fn create_after_inserts_an_empty_selected_item() {
        let mut app = app();
        create_item(&mut app, CreatePosition::After).unwrap();
        assert_eq!(root_titles(&app), ["Item 1", "", "Item 2", "Item 3"]);
        assert_eq!(selected_title(&app), "");
    }

    #[test]
    fn undo_create_restores_the_previous_selection() {
        let mut app = app();
        create_item(&mut app, CreatePosition::After).unwrap();
        assert!(undo(&mut app));
        assert_eq!(root_titles(&app), ["Item 1", "Item 2", "Item 3"]);
        assert_eq!(selected_title(&app), "Item 1");
    }

    #[test]
    fn create_before_inserts_ahead_of_the_selection() {
        let mut app = app();
        let item2 = app.tree.children(app.tree.root())[1];
        app.change_selection(item2);

        create_item(&mut app, CreatePosition::Before).unwrap();
        assert_eq!(root_titles(&app), ["Item 1", "", "Item 2", "Item 3"]);
        assert_eq!(selected_title(&app), "");

        assert!(undo(&mut app));
        assert_eq!(root_titles(&app), ["Item 1", "Item 2", "Item 3"]);
        assert_eq!(selected_title(&app), "Item 2");
    }

    #[test]
    fn create_beside_the_focus_root_is_rejected() {
        let mut app = app();
        app.focus_on_item_selected(); // Item 1 becomes the scope root

        assert_eq!(
            create_item(&mut app, CreatePosition::After),
            Err(CommandError::ItemFocused)
        );
        assert_eq!(
            create_item(&mut app, CreatePosition::Before),
            Err(CommandError::ItemFocused)
        );
        assert_eq!(root_titles(&app), ["Item 1", "Item 2", "Item 3"]);
        assert!(app.undo.is_empty());

        // Inside stays legal: the new item lands within the scope.
        create_item(&mut app, CreatePosition::Inside).unwrap();
        assert_eq!(selected_title(&app), "");
    }

    #[test]
    fn undo_of_create_inside_restores_a_closed_anchor() {
        let mut app = app();
        let item1 = app.tree.children(app.tree.root())[0];
        create_item(&mut app, CreatePosition::Inside).unwrap();
        app.change_selection(item1);
        app.tree.set_open(item1, false);

        create_item(&mut app, CreatePosition::Inside).unwrap();
        assert!(app.tree.is_open(item1));

        assert!(undo(&mut app));
        assert!(!app.tree.is_open(item1));
        assert_eq!(app.tree.children(item1).len(), 1);
        assert_eq!(selected_title(&app), "Item 1");
    }

    #[test]
    fn create_inside_opens_the_anchor() {
        let mut app = app();
        let item1 = app.tree.children(app.tree.root())[0];
        create_item(&mut app, CreatePosition::Inside).unwrap();
        assert!(app.tree.is_open(item1));
        assert_eq!(app.tree.children(item1).len(), 1);
        assert_eq!(selected_title(&app), "");
    }

    #[test]
    fn remove_selects_the_item_above_and_undo_reselects_the_removed() {
        let mut app = app();
        let item2 = app.tree.children(app.tree.root())[1];
        app.change_selection(item2);

        remove_selected(&mut app).unwrap();
        assert_eq!(root_titles(&app), ["Item 1", "Item 3"]);
        assert_eq!(selected_title(&app), "Item 1");

        assert!(undo(&mut app));
        assert_eq!(root_titles(&app), ["Item 1", "Item 2", "Item 3"]);
        assert_eq!(selected_title(&app), "Item 2");
    }

    #[test]
    fn remove_of_the_first_item_selects_the_following_one() {
        let mut app = app();
        remove_selected(&mut app).unwrap();
        assert_eq!(selected_title(&app), "Item 2");
    }

    #[test]
    fn remove_of_the_focus_root_is_rejected() {
        let mut app = app();
        let item1 = app.tree.children(app.tree.root())[0];
        app.change_selection(item1);
        app.focus_on_item_selected();

        assert_eq!(remove_selected(&mut app), Err(CommandError::ItemFocused));
        assert!(app.undo.is_empty());
    }

    #[test]
    fn rename_round_trips_through_undo_and_redo() {
        let mut app = app();
        rename_selected(&mut app, "First").unwrap();
        assert_eq!(selected_title(&app), "First");

        assert!(undo(&mut app));
        assert_eq!(selected_title(&app), "Item 1");

        assert!(redo(&mut app));
        assert_eq!(selected_title(&app), "First");
    }

    #[test]
    fn move_down_then_undo_restores_the_original_order() {
        let mut app = app();
        move_selected(&mut app, MoveDirection::Down).unwrap();
        assert_eq!(root_titles(&app), ["Item 2", "Item 1", "Item 3"]);

        assert!(undo(&mut app));
        assert_eq!(root_titles(&app), ["Item 1", "Item 2", "Item 3"]);
        assert_eq!(selected_title(&app), "Item 1");
    }

    #[test]
    fn dispatch_after_undo_truncates_the_redo_tail() {
        let mut app = app();
        rename_selected(&mut app, "First").unwrap();
        assert!(undo(&mut app));
        assert!(app.undo.can_redo());

        rename_selected(&mut app, "Uno").unwrap();
        assert!(!app.undo.can_redo());
        assert!(!redo(&mut app));
        assert_eq!(selected_title(&app), "Uno");
        assert_eq!(app.undo.len(), 1);
    }

    #[test]
    fn truncation_releases_subtrees_of_discarded_creates() {
        let mut app = app();
        create_item(&mut app, CreatePosition::After).unwrap();
        let created = app.selected_item.unwrap();

        assert!(undo(&mut app));
        rename_selected(&mut app, "First").unwrap();

        assert!(!app.tree.contains(created));
    }

    #[test]
    fn undo_redo_inverse_law_over_a_mixed_session() {
        let mut app = app();
        create_item(&mut app, CreatePosition::After).unwrap();
        rename_selected(&mut app, "Inserted").unwrap();
        move_selected(&mut app, MoveDirection::Right).unwrap();
        let snapshot = app.tree.to_records();
        let selected = selected_title(&app);

        for _ in 0..3 {
            assert!(undo(&mut app));
        }
        assert!(!undo(&mut app));
        assert_eq!(app.tree.to_records().len(), 3);

        for _ in 0..3 {
            assert!(redo(&mut app));
        }
        assert!(!redo(&mut app));
        assert_eq!(app.tree.to_records(), snapshot);
        assert_eq!(selected_title(&app), selected);
    }

    #[test]
    fn commands_with_no_selection_are_rejected_before_mutation() {
        let mut app = AppState::from_records(&[]);
        assert_eq!(
            create_item(&mut app, CreatePosition::After),
            Err(CommandError::NoSelection)
        );
        assert_eq!(remove_selected(&mut app), Err(CommandError::NoSelection));
        assert_eq!(
            move_selected(&mut app, MoveDirection::Up),
            Err(CommandError::NoSelection)
        );
        assert!(app.undo.is_empty());
        assert!(app.tree.is_empty());
    }
}
