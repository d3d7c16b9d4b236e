//! Arena-backed outline tree.

use compact_str::CompactString;

use crate::item::{Item, ItemId};

/// The outline tree.
///
/// Items live in a generational arena: removal frees a slot and bumps
/// its generation, so any [`ItemId`] handed out earlier stops resolving.
/// Accessing a dangling id is a programmer error and panics.
#[derive(Debug, Clone)]
pub struct Tree {
    slots: Vec<Option<Item>>,
    generations: Vec<u32>,
    free_list: Vec<u32>,
    root: ItemId,
}

impl Tree {
    /// Create a tree with a synthetic open root titled "Root".
    pub fn new() -> Self {
        let mut root_item = Item::new("Root");
        root_item.is_open = true;
        Self {
            slots: vec![Some(root_item)],
            generations: vec![0],
            free_list: Vec::new(),
            root: ItemId::new(0, 0),
        }
    }

    /// The synthetic root item.
    pub fn root(&self) -> ItemId {
        self.root
    }

    /// Allocate a detached item, reusing a freed slot when one exists.
    pub fn insert(&mut self, title: impl Into<CompactString>) -> ItemId {
        let item = Item::new(title);
        match self.free_list.pop() {
            Some(index) => {
                let generation = self.generations[index as usize];
                self.slots[index as usize] = Some(item);
                ItemId::new(index, generation)
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Some(item));
                self.generations.push(0);
                ItemId::new(index, 0)
            }
        }
    }

    /// Resolve an id to its item.
    ///
    /// # Panics
    /// Panics if the id is stale or was never issued by this tree.
    pub fn item(&self, id: ItemId) -> &Item {
        match self.slots.get(id.index as usize) {
            Some(Some(item)) if self.generations[id.index as usize] == id.generation => item,
            _ => panic!("dangling ItemId {id}"),
        }
    }

    /// Resolve an id to its item, mutably.
    ///
    /// # Panics
    /// Panics if the id is stale or was never issued by this tree.
    pub fn item_mut(&mut self, id: ItemId) -> &mut Item {
        match self.slots.get_mut(id.index as usize) {
            Some(Some(item)) if self.generations[id.index as usize] == id.generation => item,
            _ => panic!("dangling ItemId {id}"),
        }
    }

    /// Whether an id still resolves to a live item.
    pub fn contains(&self, id: ItemId) -> bool {
        matches!(self.slots.get(id.index as usize),
            Some(Some(_)) if self.generations[id.index as usize] == id.generation)
    }

    /// Attach `child` under `parent` at `index`, clamped to the child count.
    ///
    /// A parent gaining its first child is opened, so a freshly nested
    /// item is visible immediately.
    pub fn add_child_at(&mut self, parent: ItemId, child: ItemId, index: usize) {
        debug_assert!(self.item(child).parent.is_none(), "child already attached");
        let p = self.item_mut(parent);
        let index = index.min(p.children.len());
        let was_empty = p.children.is_empty();
        p.children.insert(index, child);
        if was_empty {
            p.is_open = true;
        }
        self.item_mut(child).parent = Some(parent);
    }

    /// Detach `child` from `parent` by identity. No-op when `child` is not
    /// among the parent's children. A parent losing its last child is
    /// closed. The child stays in the arena so it can be reattached.
    pub fn remove_child(&mut self, parent: ItemId, child: ItemId) {
        let p = self.item_mut(parent);
        let Some(pos) = p.children.iter().position(|&c| c == child) else {
            return;
        };
        p.children.remove(pos);
        if p.children.is_empty() {
            p.is_open = false;
        }
        self.item_mut(child).parent = None;
    }

    /// Detach the child at `index` from `parent`.
    ///
    /// # Panics
    /// Panics when `index` is out of range.
    pub fn remove_child_at(&mut self, parent: ItemId, index: usize) -> ItemId {
        let p = self.item_mut(parent);
        let child = p.children.remove(index);
        if p.children.is_empty() {
            p.is_open = false;
        }
        self.item_mut(child).parent = None;
        child
    }

    /// Detach an item from its parent, if it has one.
    pub fn detach(&mut self, child: ItemId) {
        if let Some(parent) = self.item(child).parent {
            self.remove_child(parent, child);
        }
    }

    /// Return a detached subtree's slots to the free list.
    ///
    /// # Panics
    /// Panics if `id` is still attached to a parent.
    pub fn release_subtree(&mut self, id: ItemId) {
        assert!(self.item(id).parent.is_none(), "cannot release an attached item");
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            let item = self.slots[next.index as usize]
                .take()
                .unwrap_or_else(|| panic!("dangling ItemId {next}"));
            stack.extend(item.children);
            self.generations[next.index as usize] += 1;
            self.free_list.push(next.index);
        }
    }

    /// Position of an item among its siblings.
    ///
    /// # Panics
    /// Panics when the item has no parent.
    pub fn item_index(&self, id: ItemId) -> usize {
        let parent = self.item(id).parent.expect("item_index on a parentless item");
        self.item(parent)
            .children
            .iter()
            .position(|&c| c == id)
            .expect("parent does not list item as a child")
    }

    /// Whether `id` is the synthetic root.
    pub fn is_root(&self, id: ItemId) -> bool {
        id == self.root
    }

    /// Whether the item has any children.
    pub fn has_children(&self, id: ItemId) -> bool {
        !self.item(id).children.is_empty()
    }

    /// Whether `item` lies in the subtree rooted at `ancestor`, inclusive.
    pub fn is_descendant_or_self(&self, ancestor: ItemId, item: ItemId) -> bool {
        let mut cursor = Some(item);
        while let Some(id) = cursor {
            if id == ancestor {
                return true;
            }
            cursor = self.item(id).parent;
        }
        false
    }

    /// Deepest visible item of a subtree: descend into the last child
    /// while the current item is open and non-empty.
    pub fn last_nested_item(&self, id: ItemId) -> ItemId {
        let mut cursor = id;
        loop {
            let item = self.item(cursor);
            if item.is_open && !item.children.is_empty() {
                cursor = *item.children.last().expect("non-empty children");
            } else {
                return cursor;
            }
        }
    }

    /// Visit every strict descendant of `id` in pre-order.
    pub fn for_each_descendant(&self, id: ItemId, mut f: impl FnMut(ItemId)) {
        let mut stack: Vec<ItemId> = self.item(id).children.iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            f(next);
            stack.extend(self.item(next).children.iter().rev());
        }
    }

    /// The item's children, in order.
    pub fn children(&self, id: ItemId) -> &[ItemId] {
        &self.item(id).children
    }

    /// The item's parent, `None` for the root.
    pub fn parent(&self, id: ItemId) -> Option<ItemId> {
        self.item(id).parent
    }

    /// The item's title.
    pub fn title(&self, id: ItemId) -> &str {
        &self.item(id).title
    }

    /// Whether the item is open.
    pub fn is_open(&self, id: ItemId) -> bool {
        self.item(id).is_open
    }

    /// Set the open flag directly. Open/closed is an independent toggle;
    /// the attach/detach mutators only nudge it at the empty boundary.
    pub fn set_open(&mut self, id: ItemId, open: bool) {
        self.item_mut(id).is_open = open;
    }

    /// Replace the item's title.
    pub fn set_title(&mut self, id: ItemId, title: impl Into<CompactString>) {
        self.item_mut(id).title = title.into();
    }

    /// Number of live items, root included.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }

    /// Whether only the root remains.
    pub fn is_empty(&self) -> bool {
        self.len() == 1
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child_titles(tree: &Tree, id: ItemId) -> Vec<String> {
        tree.children(id)
            .iter()
            .map(|&c| tree.title(c).to_string())
            .collect()
    }

    #[test]
    fn attach_sets_parent_and_order() {
        let mut tree = Tree::new();
        let a = tree.insert("a");
        let b = tree.insert("b");
        let c = tree.insert("c");
        tree.add_child_at(tree.root(), a, 0);
        tree.add_child_at(tree.root(), c, 1);
        tree.add_child_at(tree.root(), b, 1);

        assert_eq!(child_titles(&tree, tree.root()), ["a", "b", "c"]);
        assert_eq!(tree.parent(b), Some(tree.root()));
        assert_eq!(tree.item_index(c), 2);
    }

    #[test]
    fn attach_index_is_clamped() {
        let mut tree = Tree::new();
        let a = tree.insert("a");
        tree.add_child_at(tree.root(), a, 99);
        assert_eq!(tree.item_index(a), 0);
    }

    #[test]
    fn first_child_opens_parent_last_child_closes_it() {
        let mut tree = Tree::new();
        let a = tree.insert("a");
        let b = tree.insert("b");
        tree.add_child_at(tree.root(), a, 0);
        assert!(!tree.is_open(a));

        tree.add_child_at(a, b, 0);
        assert!(tree.is_open(a));

        tree.remove_child(a, b);
        assert!(!tree.is_open(a));
    }

    #[test]
    fn remove_child_is_identity_based_and_tolerates_absence() {
        let mut tree = Tree::new();
        let a = tree.insert("a");
        let stray = tree.insert("stray");
        tree.add_child_at(tree.root(), a, 0);

        tree.remove_child(tree.root(), stray);
        assert_eq!(child_titles(&tree, tree.root()), ["a"]);
    }

    #[test]
    fn detached_items_survive_for_reattachment() {
        let mut tree = Tree::new();
        let a = tree.insert("a");
        tree.add_child_at(tree.root(), a, 0);
        tree.detach(a);

        assert!(tree.contains(a));
        assert_eq!(tree.parent(a), None);

        tree.add_child_at(tree.root(), a, 0);
        assert_eq!(tree.item_index(a), 0);
    }

    #[test]
    fn release_subtree_invalidates_ids_and_reuses_slots() {
        let mut tree = Tree::new();
        let a = tree.insert("a");
        let b = tree.insert("b");
        tree.add_child_at(tree.root(), a, 0);
        tree.add_child_at(a, b, 0);

        tree.detach(a);
        tree.release_subtree(a);
        assert!(!tree.contains(a));
        assert!(!tree.contains(b));

        let c = tree.insert("c");
        assert!(tree.contains(c));
        assert_ne!(c, a);
        assert_ne!(c, b);
    }

    #[test]
    #[should_panic(expected = "dangling ItemId")]
    fn stale_id_access_panics() {
        let mut tree = Tree::new();
        let a = tree.insert("a");
        tree.add_child_at(tree.root(), a, 0);
        tree.detach(a);
        tree.release_subtree(a);
        tree.title(a);
    }

    #[test]
    fn descendant_or_self_walks_the_parent_chain() {
        let mut tree = Tree::new();
        let a = tree.insert("a");
        let b = tree.insert("b");
        let other = tree.insert("other");
        tree.add_child_at(tree.root(), a, 0);
        tree.add_child_at(tree.root(), other, 1);
        tree.add_child_at(a, b, 0);

        assert!(tree.is_descendant_or_self(a, a));
        assert!(tree.is_descendant_or_self(a, b));
        assert!(!tree.is_descendant_or_self(a, other));
        assert!(tree.is_descendant_or_self(tree.root(), other));
    }

    #[test]
    fn last_nested_item_stops_at_closed_items() {
        let mut tree = Tree::new();
        let a = tree.insert("a");
        let b = tree.insert("b");
        let c = tree.insert("c");
        tree.add_child_at(tree.root(), a, 0);
        tree.add_child_at(a, b, 0);
        tree.add_child_at(b, c, 0);

        assert_eq!(tree.last_nested_item(a), c);

        tree.set_open(b, false);
        assert_eq!(tree.last_nested_item(a), b);
    }

    #[test]
    fn for_each_descendant_is_preorder() {
        let mut tree = Tree::new();
        let a = tree.insert("a");
        let a1 = tree.insert("a1");
        let a2 = tree.insert("a2");
        let b = tree.insert("b");
        tree.add_child_at(tree.root(), a, 0);
        tree.add_child_at(tree.root(), b, 1);
        tree.add_child_at(a, a1, 0);
        tree.add_child_at(a, a2, 1);

        let mut seen = Vec::new();
        tree.for_each_descendant(tree.root(), |id| seen.push(tree.title(id).to_string()));
        assert_eq!(seen, ["a", "a1", "a2", "b"]);
    }
}
