//! Read-only index over parent-referencing items.
//!
//! Items are stored once, in input order. Both lookup tables refer to items
//! by their slot in that vector.

use std::collections::{HashMap, HashSet};

use tracing::{debug, instrument, trace, warn};

use crate::domain::entities::{ParentRef, TreeItem};

/// Position of an item in the input sequence.
type Slot = usize;

/// Index built once from a sequence of items and queried thereafter.
///
/// Lookups by id and by parent are O(1). Duplicate ids are accepted: the
/// later item wins the id lookup, while every item still shows up under its
/// parent. Dangling parents and cycles are accepted as well.
#[derive(Debug, Clone)]
pub struct TreeIndex<T: TreeItem> {
    items: Vec<T>,
    by_id: HashMap<T::Id, Slot>,
    children_by_parent: HashMap<ParentRef<T::Id>, Vec<Slot>>,
}

impl<T: TreeItem> Default for TreeIndex<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T: TreeItem> FromIterator<T> for TreeIndex<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T: TreeItem> TreeIndex<T> {
    #[instrument(level = "debug", skip_all)]
    pub fn new(items: Vec<T>) -> Self {
        let mut by_id = HashMap::with_capacity(items.len());
        let mut children_by_parent: HashMap<ParentRef<T::Id>, Vec<Slot>> = HashMap::new();

        for (slot, item) in items.iter().enumerate() {
            by_id.insert(item.id().clone(), slot);
            children_by_parent
                .entry(item.parent().clone())
                .or_default()
                .push(slot);
        }

        debug!(
            items = items.len(),
            ids = by_id.len(),
            parents = children_by_parent.len(),
            "Built tree index"
        );

        Self {
            items,
            by_id,
            children_by_parent,
        }
    }

    /// The input sequence, in input order.
    pub fn get_all(&self) -> &[T] {
        &self.items
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_item(&self, id: &T::Id) -> Option<&T> {
        self.by_id.get(id).map(|&slot| &self.items[slot])
    }

    /// Direct children of `id` in input order.
    ///
    /// Empty for leaves and for ids that are not in the index.
    #[instrument(level = "trace", skip(self))]
    pub fn get_children(&self, id: &T::Id) -> Vec<&T> {
        self.children_of(&ParentRef::ChildOf(id.clone()))
    }

    /// Top-level items in input order.
    #[instrument(level = "trace", skip(self))]
    pub fn get_roots(&self) -> Vec<&T> {
        self.children_of(&ParentRef::Root)
    }

    pub fn children_of(&self, parent: &ParentRef<T::Id>) -> Vec<&T> {
        self.child_slots(parent)
            .iter()
            .map(|&slot| &self.items[slot])
            .collect()
    }

    /// Ancestor chain of `id`, nearest first, without the item itself.
    ///
    /// Stops at the root, at a parent id that is not in the index, or when
    /// the chain runs into an item it already visited.
    #[instrument(level = "debug", skip(self))]
    pub fn get_all_parents(&self, id: &T::Id) -> Vec<&T> {
        self.ancestors(id).collect()
    }

    pub fn ancestors(&self, id: &T::Id) -> Ancestors<'_, T> {
        Ancestors::new(self, self.by_id.get(id).copied())
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Depth-first preorder walk from the roots, yielding `(level, item)`.
    ///
    /// Roots are level 1. Items not reachable from a root are skipped.
    pub fn iter(&self) -> Preorder<'_, T> {
        Preorder::new(self)
    }

    /// Number of levels reachable from the roots.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.iter().map(|(level, _)| level).max().unwrap_or(0)
    }

    /// Reachable items without children, in preorder.
    #[instrument(level = "debug", skip(self))]
    pub fn leaves(&self) -> Vec<&T> {
        self.iter()
            .filter(|(_, item)| self.get_children(item.id()).is_empty())
            .map(|(_, item)| item)
            .collect()
    }

    pub(crate) fn child_slots(&self, parent: &ParentRef<T::Id>) -> &[Slot] {
        self.children_by_parent
            .get(parent)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub(crate) fn item_at(&self, slot: Slot) -> &T {
        &self.items[slot]
    }
}

/// Iterator over the ancestors of an item. See [`TreeIndex::ancestors`].
pub struct Ancestors<'a, T: TreeItem> {
    index: &'a TreeIndex<T>,
    current: Option<Slot>,
    visited: HashSet<Slot>,
}

impl<'a, T: TreeItem> Ancestors<'a, T> {
    fn new(index: &'a TreeIndex<T>, start: Option<Slot>) -> Self {
        Self {
            index,
            current: start,
            visited: start.into_iter().collect(),
        }
    }
}

impl<'a, T: TreeItem> Iterator for Ancestors<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.index;
        let current = self.current.take()?;
        let parent_id = index.items[current].parent().id()?;

        let Some(&slot) = index.by_id.get(parent_id) else {
            trace!(?parent_id, "Parent not in index, chain ends");
            return None;
        };
        if !self.visited.insert(slot) {
            warn!(?parent_id, "Cycle in parent chain, stopping walk");
            return None;
        }

        self.current = Some(slot);
        Some(&index.items[slot])
    }
}

/// Preorder iterator. See [`TreeIndex::iter`].
pub struct Preorder<'a, T: TreeItem> {
    index: &'a TreeIndex<T>,
    stack: Vec<(usize, Slot)>,
    visited: HashSet<Slot>,
}

impl<'a, T: TreeItem> Preorder<'a, T> {
    fn new(index: &'a TreeIndex<T>) -> Self {
        // Push in reverse order for left-to-right traversal
        let stack = index
            .child_slots(&ParentRef::Root)
            .iter()
            .rev()
            .map(|&slot| (1, slot))
            .collect();
        Self {
            index,
            stack,
            visited: HashSet::new(),
        }
    }
}

impl<'a, T: TreeItem> Iterator for Preorder<'a, T> {
    type Item = (usize, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.index;
        while let Some((level, slot)) = self.stack.pop() {
            if !self.visited.insert(slot) {
                continue;
            }
            let item = &index.items[slot];
            let children = index.child_slots(&ParentRef::ChildOf(item.id().clone()));
            for &child in children.iter().rev() {
                self.stack.push((level + 1, child));
            }
            return Some((level, item));
        }
        None
    }
}
