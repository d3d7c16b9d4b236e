//! Grid and typography constants.
//!
//! Pixel positions and font sizes are derived from grid coordinates by
//! pure functions in the layout module; these are the knobs they share.

/// Pixel pitch of one grid cell, both axes.
pub const GRID_SIZE: f32 = 28.0;

/// Font size of the focus root title (column -1).
pub const TITLE_FONT_SIZE: f32 = 28.0;

/// Font size of first-level items (column 0).
pub const FIRST_LEVEL_FONT_SIZE: f32 = 20.0;

/// Font size of every deeper item.
pub const FONT_SIZE: f32 = 16.0;

/// Vertical pixel offset of the focus root title above the grid.
pub const TITLE_OFFSET_FROM_TOP: f32 = -10.0;
