//! State engine for outly.
//!
//! Owns everything between the outline tree and the renderer: the
//! application state aggregate, grid layout with view reconciliation,
//! selection and focus scoping, the reversible command history, and
//! the action dispatcher the input layer talks to.

mod action;
mod app;
mod command;
mod layout;
mod movement;
pub mod spacings;
mod theme;

pub use action::{handle_action, Action};
pub use app::AppState;
pub use command::{
    create_item, move_selected, redo, remove_selected, rename_selected, undo, Command,
    CommandError, CreatePosition, UndoState,
};
pub use layout::{calc_x, calc_y, font_size_for, sync_views, ItemView};
pub use movement::MoveDirection;
pub use theme::{Theme, ThemeKind};
