//! Structural self-checks.
//!
//! Used by tests and property tests. Walks the whole tree, so keep it off
//! hot paths.

use crate::common::{Error, NodeId, Result};
use crate::index::btree::node::Node;
use crate::index::btree::tree::BPlusTree;

impl BPlusTree {
    /// Verify the tree's structural invariants.
    ///
    /// Checks that:
    /// - every leaf sits at depth `height()`
    /// - no node holds more than `max_degree` keys
    /// - internal nodes have `keys.len() + 1` children and sorted routers
    /// - each subtree lies within its routers (`>=` the left router, `<=` the
    ///   right one; ties are possible only with duplicate keys)
    /// - the leaf chain visits the leaves left to right, ending in `None`,
    ///   and yields keys in non-decreasing order
    /// - the chain holds exactly `len()` keys
    ///
    /// # Errors
    /// `Error::InvariantViolation` describing the first broken rule.
    pub fn check_invariants(&self) -> Result<()> {
        let height = self.height();
        let mut leaves = Vec::new();
        self.check_node(self.root(), 0, height, None, None, &mut leaves)?;
        self.check_leaf_chain(&leaves)
    }

    fn check_node(
        &self,
        id: NodeId,
        depth: usize,
        height: usize,
        lower: Option<&str>,
        upper: Option<&str>,
        leaves: &mut Vec<NodeId>,
    ) -> Result<()> {
        let node = self.node(id);
        let keys = node.keys();

        if keys.len() > self.max_degree() {
            return Err(violation(format!(
                "{id} holds {} keys, max_degree is {}",
                keys.len(),
                self.max_degree()
            )));
        }
        if keys.windows(2).any(|w| w[0] > w[1]) {
            return Err(violation(format!("{id} keys out of order: {keys:?}")));
        }
        if let Some(key) = keys.iter().find(|k| !within(k.as_str(), lower, upper)) {
            return Err(violation(format!(
                "{id} key {key:?} outside routing range {lower:?}..={upper:?}"
            )));
        }

        match node {
            Node::Leaf(_) => {
                if depth != height {
                    return Err(violation(format!(
                        "leaf {id} at depth {depth}, tree height is {height}"
                    )));
                }
                leaves.push(id);
            }
            Node::Internal(internal) => {
                let children = internal.children();
                if children.len() != keys.len() + 1 {
                    return Err(violation(format!(
                        "{id} has {} keys but {} children",
                        keys.len(),
                        children.len()
                    )));
                }
                for (slot, &child) in children.iter().enumerate() {
                    let child_lower = if slot == 0 {
                        lower
                    } else {
                        Some(keys[slot - 1].as_str())
                    };
                    let child_upper = keys.get(slot).map(String::as_str).or(upper);
                    self.check_node(child, depth + 1, height, child_lower, child_upper, leaves)?;
                }
            }
        }
        Ok(())
    }

    fn check_leaf_chain(&self, leaves: &[NodeId]) -> Result<()> {
        let mut expected = leaves.iter();
        let mut current = Some(self.leftmost_leaf());
        let mut previous_key: Option<&str> = None;
        let mut total = 0;

        while let Some(id) = current {
            if expected.next() != Some(&id) {
                return Err(violation(format!("leaf chain reached {id} out of order")));
            }
            let Some(leaf) = self.node(id).as_leaf() else {
                return Err(violation(format!("leaf chain points at internal {id}")));
            };
            for key in leaf.keys() {
                if previous_key.is_some_and(|prev| prev > key.as_str()) {
                    return Err(violation(format!("leaf chain not sorted at {key:?}")));
                }
                previous_key = Some(key.as_str());
            }
            total += leaf.keys().len();
            current = leaf.next();
        }

        if let Some(missed) = expected.next() {
            return Err(violation(format!("leaf {missed} unreachable via chain")));
        }
        if total != self.len() {
            return Err(violation(format!(
                "leaf chain holds {total} keys, {} were inserted",
                self.len()
            )));
        }
        Ok(())
    }
}

fn within(key: &str, lower: Option<&str>, upper: Option<&str>) -> bool {
    lower.map_or(true, |lo| key >= lo) && upper.map_or(true, |hi| key <= hi)
}

fn violation(message: String) -> Error {
    Error::InvariantViolation(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::btree::node::LeafNode;

    #[test]
    fn test_fresh_tree_passes() {
        BPlusTree::new(3).unwrap().check_invariants().unwrap();
    }

    #[test]
    fn test_built_trees_pass() {
        for degree in 2..8 {
            let words: Vec<String> = (0..300).map(|i| format!("{:03}", (i * 7) % 300)).collect();
            let tree = BPlusTree::from_words(degree, words).unwrap();
            tree.check_invariants().unwrap();
        }
    }

    #[test]
    fn test_duplicates_pass() {
        let words = ["b", "a", "b", "b", "c", "b", "b", "a", "b", "c", "b", "b"];
        for degree in 2..6 {
            let tree = BPlusTree::from_words(degree, words).unwrap();
            tree.check_invariants().unwrap();
        }
    }

    #[test]
    fn test_detects_unsorted_leaf() {
        let mut tree = BPlusTree::from_words(3, ["a", "b"]).unwrap();
        tree.nodes[0] = Node::Leaf(LeafNode {
            keys: vec!["b".into(), "a".into()],
            next: None,
        });
        assert!(matches!(
            tree.check_invariants(),
            Err(Error::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_detects_broken_chain() {
        let mut tree = BPlusTree::from_words(3, ["a", "b", "c", "d"]).unwrap();
        let left = tree.node(tree.root()).children()[0];
        if let Node::Leaf(leaf) = &mut tree.nodes[left.0] {
            leaf.next = None;
        }
        let err = tree.check_invariants().unwrap_err();
        assert!(err.to_string().contains("unreachable"));
    }
}
