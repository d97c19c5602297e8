//! B+ tree node variants.
//!
//! # Layout
//! ```text
//!            Internal { keys: [k0, k1], children: [c0, c1, c2] }
//!                 /               |                \
//!        keys < k0        k0 <= keys < k1        keys >= k1
//!
//!   Leaf { keys: [..], next } ──▶ Leaf { keys: [..], next } ──▶ None
//! ```
//!
//! Children are owned through the parent's `children` list. A leaf's `next`
//! is only a link for ordered scans and never owns its target.

use crate::common::NodeId;

/// A node in the tree arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf(LeafNode),
    Internal(InternalNode),
}

/// A leaf: sorted data keys plus the link to the next leaf in key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeafNode {
    pub(crate) keys: Vec<String>,
    pub(crate) next: Option<NodeId>,
}

/// An internal node: routing keys and `keys.len() + 1` children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InternalNode {
    pub(crate) keys: Vec<String>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    /// A fresh, empty leaf (the root of a new tree).
    pub fn empty_leaf() -> Self {
        Node::Leaf(LeafNode::default())
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    /// Data keys for a leaf, routing keys for an internal node.
    #[inline]
    pub fn keys(&self) -> &[String] {
        match self {
            Node::Leaf(leaf) => &leaf.keys,
            Node::Internal(internal) => &internal.keys,
        }
    }

    /// Child ids. Always empty for a leaf.
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        match self {
            Node::Leaf(_) => &[],
            Node::Internal(internal) => &internal.children,
        }
    }

    /// Whether the node has reached `max_degree` keys and must be split
    /// before anything descends into it.
    #[inline]
    pub fn is_full(&self, max_degree: usize) -> bool {
        self.keys().len() >= max_degree
    }

    pub fn as_leaf(&self) -> Option<&LeafNode> {
        match self {
            Node::Leaf(leaf) => Some(leaf),
            Node::Internal(_) => None,
        }
    }

    pub fn as_internal(&self) -> Option<&InternalNode> {
        match self {
            Node::Internal(internal) => Some(internal),
            Node::Leaf(_) => None,
        }
    }
}

impl LeafNode {
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn next(&self) -> Option<NodeId> {
        self.next
    }

    /// Insert `word` before the first key it is not greater than.
    ///
    /// An equal key stops the scan, so a duplicate lands in front of the
    /// existing run of equal keys.
    pub fn insert(&mut self, word: String) -> usize {
        let index = self.keys.iter().take_while(|k| word.as_str() > k.as_str()).count();
        self.keys.insert(index, word);
        index
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    /// Move `keys[mid..]` into a new right sibling and link it in after
    /// `self`. Returns the router for the parent (a copy of the sibling's
    /// first key) and the sibling.
    ///
    /// `sibling_id` is the id the sibling will occupy once pushed.
    pub(crate) fn split_off(&mut self, mid: usize, sibling_id: NodeId) -> (String, LeafNode) {
        let right = self.keys.split_off(mid);
        let router = right[0].clone();
        let sibling = LeafNode {
            keys: right,
            next: self.next.replace(sibling_id),
        };
        (router, sibling)
    }
}

impl InternalNode {
    /// A router-less internal node with a single child, used when the root
    /// grows.
    pub fn with_child(child: NodeId) -> Self {
        Self {
            keys: Vec::new(),
            children: vec![child],
        }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Child slot an insert of `word` descends into.
    ///
    /// Scans from the right while `word < keys[i]`, so `word` goes one slot
    /// past the rightmost key it is greater than or equal to.
    pub fn insert_slot(&self, word: &str) -> usize {
        self.keys
            .iter()
            .rposition(|k| word >= k.as_str())
            .map_or(0, |i| i + 1)
    }

    /// Child a search for `key` descends into: the first slot whose router
    /// is strictly greater than `key`, else the last child.
    pub fn search_child(&self, key: &str) -> NodeId {
        let slot = self
            .keys
            .iter()
            .position(|k| key < k.as_str())
            .unwrap_or(self.keys.len());
        self.children[slot]
    }

    /// Promote `keys[mid]` and move everything to its right into a new
    /// sibling. The promoted key is kept in neither half.
    pub(crate) fn split_off(&mut self, mid: usize) -> (String, InternalNode) {
        let keys = self.keys.split_off(mid + 1);
        let children = self.children.split_off(mid + 1);
        let promoted = self.keys.remove(mid);
        (promoted, InternalNode { keys, children })
    }

    /// Thread a split child's router and new sibling into this node.
    pub(crate) fn adopt(&mut self, index: usize, router: String, sibling: NodeId) {
        self.keys.insert(index, router);
        self.children.insert(index + 1, sibling);
    }
}
