//! Structural dump for diagnostics.
//!
//! The dump is plain data; callers decide how to print it. The `Display`
//! impls give the classic one-line-per-node rendering:
//!
//! ```text
//! Level 0: Internal Node with keys: ["b"]
//! Level 1: Leaf Node with words: ["a"]
//! Level 1: Leaf Node with words: ["b", "c", "d"]
//! ```

use std::fmt;

use crate::common::NodeId;
use crate::index::btree::node::Node;
use crate::index::btree::tree::BPlusTree;

/// Node variant as reported by a dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Leaf,
    Internal,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Leaf => write!(f, "Leaf"),
            NodeKind::Internal => write!(f, "Internal"),
        }
    }
}

/// One node of a pre-order dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSnapshot {
    /// Distance from the root (root = 0).
    pub level: usize,
    pub kind: NodeKind,
    pub keys: Vec<String>,
}

impl fmt::Display for NodeSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            NodeKind::Leaf => write!(f, "Level {}: Leaf Node with words: {:?}", self.level, self.keys),
            NodeKind::Internal => {
                write!(f, "Level {}: Internal Node with keys: {:?}", self.level, self.keys)
            }
        }
    }
}

/// Render a dump one node per line.
pub fn render_dump(snapshots: &[NodeSnapshot]) -> String {
    snapshots
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

impl BPlusTree {
    /// Depth-first, pre-order snapshot of every node.
    pub fn dump(&self) -> Vec<NodeSnapshot> {
        let mut out = Vec::with_capacity(self.node_count());
        self.dump_node(self.root(), 0, &mut out);
        out
    }

    fn dump_node(&self, id: NodeId, level: usize, out: &mut Vec<NodeSnapshot>) {
        let node = self.node(id);
        let kind = match node {
            Node::Leaf(_) => NodeKind::Leaf,
            Node::Internal(_) => NodeKind::Internal,
        };
        out.push(NodeSnapshot {
            level,
            kind,
            keys: node.keys().to_vec(),
        });

        for &child in node.children() {
            self.dump_node(child, level + 1, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dump_single_leaf() {
        let tree = BPlusTree::from_words(3, ["b", "a"]).unwrap();
        assert_eq!(
            tree.dump(),
            vec![NodeSnapshot {
                level: 0,
                kind: NodeKind::Leaf,
                keys: vec!["a".into(), "b".into()],
            }]
        );
    }

    #[test]
    fn test_dump_is_preorder() {
        let tree = BPlusTree::from_words(3, ["a", "b", "c", "d"]).unwrap();
        let dump = tree.dump();

        let shape: Vec<(usize, NodeKind)> = dump.iter().map(|s| (s.level, s.kind)).collect();
        assert_eq!(
            shape,
            [(0, NodeKind::Internal), (1, NodeKind::Leaf), (1, NodeKind::Leaf)]
        );
        assert_eq!(dump[0].keys, ["b"]);
        assert_eq!(dump[2].keys, ["b", "c", "d"]);
    }

    #[test]
    fn test_render_dump() {
        let tree = BPlusTree::from_words(3, ["a", "b", "c", "d"]).unwrap();
        let text = render_dump(&tree.dump());
        assert_eq!(
            text,
            "Level 0: Internal Node with keys: [\"b\"]\n\
             Level 1: Leaf Node with words: [\"a\"]\n\
             Level 1: Leaf Node with words: [\"b\", \"c\", \"d\"]"
        );
    }

    #[test]
    fn test_dump_covers_every_node() {
        let words: Vec<String> = (0..50).map(|i| format!("{i:02}")).collect();
        let tree = BPlusTree::from_words(3, words).unwrap();
        assert_eq!(tree.dump().len(), tree.node_count());
    }

    #[test]
    fn test_node_kind_display() {
        assert_eq!(NodeKind::Leaf.to_string(), "Leaf");
        assert_eq!(NodeKind::Internal.to_string(), "Internal");
    }
}
