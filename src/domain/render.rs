//! Tree display via termtree.

use std::collections::HashSet;
use std::fmt;

use termtree::Tree;
use tracing::instrument;

use crate::domain::entities::{ParentRef, TreeItem};
use crate::domain::index::TreeIndex;

/// Label of the synthetic node holding all top-level items.
pub const ROOT_LABEL: &str = "root";

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl<T> TreeNodeConvert for TreeIndex<T>
where
    T: TreeItem + fmt::Display,
{
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        fn build_tree<T: TreeItem + fmt::Display>(
            index: &TreeIndex<T>,
            slot: usize,
            visited: &mut HashSet<usize>,
        ) -> Tree<String> {
            let item = index.item_at(slot);
            let mut tree = Tree::new(item.to_string());
            for &child in index.child_slots(&ParentRef::ChildOf(item.id().clone())) {
                if visited.insert(child) {
                    tree.push(build_tree(index, child, visited));
                }
            }
            tree
        }

        let mut visited = HashSet::new();
        let mut tree = Tree::new(ROOT_LABEL.to_string());
        for &slot in self.child_slots(&ParentRef::Root) {
            if visited.insert(slot) {
                tree.push(build_tree(self, slot, &mut visited));
            }
        }
        tree
    }
}
