//! Core types for outly.
//!
//! This crate provides the fundamental data structures used throughout
//! the outly ecosystem: outline items, the tree store, visibility-aware
//! navigation, and the on-disk record format.

mod item;
mod nav;
mod record;
mod tree;

pub use item::{Item, ItemId};
pub use nav::{following_item, item_above, item_below};
pub use record::ItemRecord;
pub use tree::Tree;
