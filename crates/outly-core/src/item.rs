//! Outline item types.

use compact_str::CompactString;

/// Stable handle to an item in a [`Tree`](crate::Tree).
///
/// Ids are generational: a slot freed and reused gets a new generation,
/// so a stale id held across a removal fails loudly instead of silently
/// pointing at an unrelated item. Equality is identity, never title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl ItemId {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// A single outline item.
///
/// Children are the owning direction; `parent` is a back reference kept
/// in sync by the tree's mutators. Only the root has no parent.
#[derive(Debug, Clone)]
pub struct Item {
    /// Display title.
    pub title: CompactString,
    /// Whether children are shown when laid out.
    pub is_open: bool,
    /// Back reference to the containing item, `None` for the root.
    pub parent: Option<ItemId>,
    /// Ordered child items.
    pub children: Vec<ItemId>,
}

impl Item {
    /// Create a closed, childless, detached item.
    pub fn new(title: impl Into<CompactString>) -> Self {
        Self {
            title: title.into(),
            is_open: false,
            parent: None,
            children: Vec::new(),
        }
    }
}
