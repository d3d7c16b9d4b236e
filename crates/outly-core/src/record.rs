//! On-disk outline records.
//!
//! Records are the serialized shape of a tree: titles, open flags, and
//! child nesting. Parent back references are transient and rebuilt on
//! load.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::item::ItemId;
use crate::tree::Tree;

/// One serialized outline item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Display title.
    pub title: CompactString,
    /// Whether the item shows its children.
    #[serde(default)]
    pub is_open: bool,
    /// Nested child records.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ItemRecord>,
}

impl ItemRecord {
    /// A closed, childless record.
    pub fn new(title: impl Into<CompactString>) -> Self {
        Self {
            title: title.into(),
            is_open: false,
            children: Vec::new(),
        }
    }

    /// Attach children; opens the record when any are given.
    pub fn with_children(mut self, children: Vec<ItemRecord>) -> Self {
        self.is_open = !children.is_empty();
        self.children = children;
        self
    }

    /// Mark the record closed, keeping its children.
    pub fn closed(mut self) -> Self {
        self.is_open = false;
        self
    }
}

impl Tree {
    /// Rebuild a tree from top-level records, restoring parent pointers.
    pub fn from_records(records: &[ItemRecord]) -> Self {
        let mut tree = Tree::new();
        let root = tree.root();
        for (index, record) in records.iter().enumerate() {
            attach_record(&mut tree, root, record, index);
        }
        tree
    }

    /// Serialize the root's subtree into records, dropping parent links.
    pub fn to_records(&self) -> Vec<ItemRecord> {
        self.children(self.root())
            .iter()
            .map(|&child| self.record_for(child))
            .collect()
    }

    fn record_for(&self, id: ItemId) -> ItemRecord {
        ItemRecord {
            title: self.item(id).title.clone(),
            is_open: self.is_open(id),
            children: self
                .children(id)
                .iter()
                .map(|&child| self.record_for(child))
                .collect(),
        }
    }
}

fn attach_record(tree: &mut Tree, parent: ItemId, record: &ItemRecord, index: usize) {
    let id = tree.insert(record.title.clone());
    tree.add_child_at(parent, id, index);
    for (child_index, child) in record.children.iter().enumerate() {
        attach_record(tree, id, child, child_index);
    }
    // After children, so the attach-time open nudge does not win over
    // the recorded flag.
    tree.set_open(id, record.is_open);
}
