//! Ordered traversal along the leaf chain.

use std::iter::FusedIterator;

use crate::index::btree::node::{LeafNode, Node};
use crate::index::btree::tree::BPlusTree;

/// Iterator over every key in ascending order.
///
/// Starts at the leftmost leaf and follows `next` links, so it never touches
/// internal nodes after the initial descent. Call [`BPlusTree::keys`] again
/// to restart.
#[derive(Debug, Clone)]
pub struct Keys<'a> {
    nodes: &'a [Node],
    leaf: Option<&'a LeafNode>,
    pos: usize,
    remaining: usize,
}

impl<'a> Iterator for Keys<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let leaf = self.leaf?;

            if let Some(key) = leaf.keys().get(self.pos) {
                self.pos += 1;
                self.remaining -= 1;
                return Some(key.as_str());
            }

            // Leaf exhausted (or empty), hop to the next one
            let nodes = self.nodes;
            self.leaf = leaf.next().and_then(|id| nodes[id.0].as_leaf());
            self.pos = 0;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Keys<'_> {}

impl FusedIterator for Keys<'_> {}

impl BPlusTree {
    /// All keys in ascending order, duplicates included.
    ///
    /// # Example
    /// ```
    /// use wordtree::BPlusTree;
    ///
    /// let tree = BPlusTree::from_words(3, ["b", "a", "c"])?;
    /// assert_eq!(tree.keys().collect::<Vec<_>>(), ["a", "b", "c"]);
    /// # Ok::<(), wordtree::Error>(())
    /// ```
    pub fn keys(&self) -> Keys<'_> {
        Keys {
            nodes: &self.nodes,
            leaf: self.node(self.leftmost_leaf()).as_leaf(),
            pos: 0,
            remaining: self.len(),
        }
    }

    /// Collect [`keys`](Self::keys) into owned strings.
    pub fn traverse(&self) -> Vec<String> {
        self.keys().map(str::to_owned).collect()
    }
}

impl<'a> IntoIterator for &'a BPlusTree {
    type Item = &'a str;
    type IntoIter = Keys<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys()
    }
}
