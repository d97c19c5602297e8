//! The B+ tree: insertion with proactive splits, and search descent.

use tracing::{debug, trace, warn};

use crate::common::config::TreeConfig;
use crate::common::{NodeId, Result};
use crate::index::btree::node::{InternalNode, LeafNode, Node};

/// An in-memory B+ tree over string keys.
///
/// # Architecture
/// ```text
/// ┌─────────────────────────────────────────────────────────┐
/// │                       BPlusTree                         │
/// │   root ──▶ nodes: Vec<Node>  (arena, indexed by NodeId) │
/// │            [Internal] [Leaf] [Leaf] [Internal] ...      │
/// │   leaf chain:  Leaf ──next──▶ Leaf ──next──▶ None       │
/// └─────────────────────────────────────────────────────────┘
/// ```
///
/// # Splitting
/// Nodes are split on the way down, before an insert descends into them,
/// so the node an insert finally lands in always has room. A node is full
/// once it holds `max_degree` keys.
///
/// # Thread Safety
/// None. Every operation runs to completion on `&self`/`&mut self`; wrap the
/// tree in [`SharedTree`](crate::sync::SharedTree) to share it.
///
/// # Usage
/// ```
/// use wordtree::BPlusTree;
///
/// let mut tree = BPlusTree::new(3)?;
/// for word in ["b", "a", "c", "d"] {
///     tree.insert(word);
/// }
///
/// assert_eq!(tree.height(), 1);
/// assert!(tree.find("d").is_some());
/// assert!(tree.find("z").is_none());
/// # Ok::<(), wordtree::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct BPlusTree {
    /// Every node ever created. Nodes are never removed.
    pub(crate) nodes: Vec<Node>,

    pub(crate) root: NodeId,

    /// Keys per node that trigger a split (immutable after construction).
    max_degree: usize,

    /// Total keys inserted, duplicates included.
    len: usize,
}

/// A borrowed view of the leaf a search ended in.
///
/// Exposes every key stored alongside the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeafRef<'a> {
    id: NodeId,
    leaf: &'a LeafNode,
}

impl<'a> LeafRef<'a> {
    /// Arena id of the leaf.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// All keys in the leaf, ascending.
    pub fn keys(&self) -> &'a [String] {
        self.leaf.keys()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.leaf.contains(key)
    }

    /// Id of the next leaf in key order, if any.
    pub fn next(&self) -> Option<NodeId> {
        self.leaf.next()
    }
}

impl BPlusTree {
    /// Create an empty tree holding at most `max_degree` keys per node.
    ///
    /// # Errors
    /// `Error::InvalidConfiguration` if `max_degree < 2`.
    pub fn new(max_degree: usize) -> Result<Self> {
        Self::with_config(TreeConfig::new(max_degree))
    }

    /// Create an empty tree from a [`TreeConfig`].
    ///
    /// # Errors
    /// `Error::InvalidConfiguration` if the config fails validation.
    pub fn with_config(config: TreeConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            nodes: vec![Node::empty_leaf()],
            root: NodeId::new(0),
            max_degree: config.max_degree,
            len: 0,
        })
    }

    /// Build a tree by inserting `words` in order.
    ///
    /// # Errors
    /// `Error::InvalidConfiguration` if `max_degree < 2`.
    pub fn from_words<I, S>(max_degree: usize, words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tree = Self::new(max_degree)?;
        for word in words {
            tree.insert(word);
        }
        Ok(tree)
    }

    pub fn max_degree(&self) -> usize {
        self.max_degree
    }

    /// Number of keys inserted, duplicates counted.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of nodes allocated so far.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node by id.
    ///
    /// # Panics
    /// Panics if `id` was not handed out by this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    // ========================================================================
    // Insert
    // ========================================================================

    /// Insert `word`. Duplicates are kept side by side.
    pub fn insert(&mut self, word: impl Into<String>) {
        let word = word.into();

        if self.node(self.root).is_full(self.max_degree) {
            self.grow_root();
        }
        self.insert_non_full(self.root, word);
        self.len += 1;
    }

    /// Hang the full root under a new internal root and split it there.
    fn grow_root(&mut self) {
        let old_root = self.root;
        let new_root = self.alloc(Node::Internal(InternalNode::with_child(old_root)));

        self.split_child(new_root, 0);
        self.root = new_root;

        debug!(
            root = %new_root,
            height = self.height(),
            nodes = self.nodes.len(),
            "root split, tree grew a level"
        );
    }

    /// Descend from `start` (which is not full) to a leaf and insert there,
    /// splitting any full child before stepping into it.
    fn insert_non_full(&mut self, start: NodeId, word: String) {
        let mut current = start;

        while let Node::Internal(internal) = self.node(current) {
            let mut slot = internal.insert_slot(&word);
            let child = internal.children()[slot];

            if self.node(child).is_full(self.max_degree) {
                self.split_child(current, slot);
                // The split put a new router at `slot`; strictly greater
                // words belong to the new right sibling.
                if word.as_str() > self.node(current).keys()[slot].as_str() {
                    slot += 1;
                }
            }

            current = self.node(current).children()[slot];
        }

        if let Node::Leaf(leaf) = &mut self.nodes[current.0] {
            let index = leaf.insert(word);
            trace!(leaf = %current, index, "inserted key");
        }
    }

    /// Split the full child at `parent.children[index]` into two siblings.
    ///
    /// Leaves keep `keys[..mid]`, hand `keys[mid..]` to the sibling, and copy
    /// the sibling's first key up as the router. Internal nodes promote
    /// `keys[mid]` into the parent and keep it in neither half.
    fn split_child(&mut self, parent: NodeId, index: usize) {
        let mid = self.max_degree / 2;
        let child = self.node(parent).children()[index];
        let sibling_id = NodeId::new(self.nodes.len());

        let (router, sibling) = match &mut self.nodes[child.0] {
            Node::Leaf(leaf) => {
                let (router, sibling) = leaf.split_off(mid, sibling_id);
                (router, Node::Leaf(sibling))
            }
            Node::Internal(internal) => {
                let (promoted, sibling) = internal.split_off(mid);
                (promoted, Node::Internal(sibling))
            }
        };

        debug!(
            parent = %parent,
            child = %child,
            sibling = %sibling_id,
            leaf = sibling.is_leaf(),
            router = %router,
            "split child"
        );

        let pushed = self.alloc(sibling);
        debug_assert_eq!(pushed, sibling_id);

        match &mut self.nodes[parent.0] {
            Node::Internal(parent) => parent.adopt(index, router, sibling_id),
            Node::Leaf(_) => unreachable!("split_child called on a leaf parent"),
        }
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        id
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Find the leaf holding `key`.
    ///
    /// A `None` key is a null query: it is logged and reported as not found.
    /// The tree is never modified.
    pub fn search(&self, key: Option<&str>) -> Option<LeafRef<'_>> {
        let Some(key) = key else {
            warn!("search called without a key");
            return None;
        };

        let mut current = self.root;
        loop {
            match self.node(current) {
                Node::Internal(internal) => current = internal.search_child(key),
                Node::Leaf(leaf) => {
                    return leaf.contains(key).then_some(LeafRef { id: current, leaf });
                }
            }
        }
    }

    /// Find the leaf holding `key`.
    pub fn find(&self, key: &str) -> Option<LeafRef<'_>> {
        self.search(Some(key))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Number of internal levels above the leaves. A leaf root has height 0.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut current = self.root;
        while let Node::Internal(internal) = self.node(current) {
            height += 1;
            current = internal.children()[0];
        }
        height
    }

    /// Id of the leftmost leaf, where ordered scans start.
    pub(crate) fn leftmost_leaf(&self) -> NodeId {
        let mut current = self.root;
        while let Node::Internal(internal) = self.node(current) {
            current = internal.children()[0];
        }
        current
    }
}

impl Default for BPlusTree {
    fn default() -> Self {
        Self {
            nodes: vec![Node::empty_leaf()],
            root: NodeId::new(0),
            max_degree: TreeConfig::default().max_degree,
            len: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Error;

    fn tree_of(max_degree: usize, words: &[&str]) -> BPlusTree {
        BPlusTree::from_words(max_degree, words.iter().copied()).unwrap()
    }

    fn root_keys(tree: &BPlusTree) -> Vec<&str> {
        tree.node(tree.root()).keys().iter().map(String::as_str).collect()
    }

    /// Every key in each subtree, for routing checks.
    fn subtree_keys(tree: &BPlusTree, id: NodeId, out: &mut Vec<String>) {
        match tree.node(id) {
            Node::Leaf(leaf) => out.extend(leaf.keys().iter().cloned()),
            Node::Internal(internal) => {
                for &child in internal.children() {
                    subtree_keys(tree, child, out);
                }
            }
        }
    }

    #[test]
    fn test_new_tree_is_single_empty_leaf() {
        let tree = BPlusTree::new(3).unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.node_count(), 1);
        assert!(tree.node(tree.root()).is_leaf());
    }

    #[test]
    fn test_new_rejects_small_degree() {
        assert!(matches!(
            BPlusTree::new(1),
            Err(Error::InvalidConfiguration { max_degree: 1, .. })
        ));
        assert!(BPlusTree::new(0).is_err());
    }

    #[test]
    fn test_default_uses_default_degree() {
        let tree = BPlusTree::default();
        assert_eq!(tree.max_degree(), 3);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_root_leaf_fills_to_max_degree_before_split() {
        let tree = tree_of(3, &["c", "a", "b"]);
        assert_eq!(tree.height(), 0);
        assert_eq!(root_keys(&tree), ["a", "b", "c"]);
    }

    #[test]
    fn test_fourth_insert_splits_root() {
        let tree = tree_of(3, &["a", "b", "c", "d"]);

        assert_eq!(tree.height(), 1);
        assert_eq!(root_keys(&tree), ["b"]);

        let root = tree.node(tree.root());
        let left = tree.node(root.children()[0]);
        let right = tree.node(root.children()[1]);
        assert_eq!(left.keys(), ["a"]);
        assert_eq!(right.keys(), ["b", "c", "d"]);

        // Leaf router is a copy: "b" still lives in the right leaf.
        assert!(tree.find("b").unwrap().keys().contains(&"b".to_string()));
    }

    #[test]
    fn test_leaf_chain_links_split_leaves() {
        let tree = tree_of(3, &["a", "b", "c", "d"]);
        let root = tree.node(tree.root());
        let left = root.children()[0];
        let right = root.children()[1];

        assert_eq!(tree.node(left).as_leaf().unwrap().next(), Some(right));
        assert_eq!(tree.node(right).as_leaf().unwrap().next(), None);
    }

    #[test]
    fn test_internal_split_promotes_router() {
        // Enough ascending keys to force the root to split as an internal node.
        let words: Vec<String> = (0..20).map(|i| format!("k{i:02}")).collect();
        let tree = BPlusTree::from_words(3, words.iter().cloned()).unwrap();

        assert!(tree.height() >= 2);

        // A promoted router appears in exactly one internal node.
        let mut routers: Vec<&str> = tree
            .nodes
            .iter()
            .filter_map(Node::as_internal)
            .flat_map(|n| n.keys().iter().map(String::as_str))
            .collect();
        let total = routers.len();
        routers.sort_unstable();
        routers.dedup();
        assert_eq!(routers.len(), total);
    }

    #[test]
    fn test_children_count_matches_keys() {
        let tree = tree_of(3, &["m", "c", "x", "a", "e", "q", "z", "b", "d", "f", "n"]);
        for node in &tree.nodes {
            if let Node::Internal(internal) = node {
                assert_eq!(internal.children().len(), internal.keys().len() + 1);
            }
        }
    }

    #[test]
    fn test_routing_is_strict_for_distinct_keys() {
        let words: Vec<String> = (0..200).map(|i| format!("w{:03}", (i * 37) % 200)).collect();
        let tree = BPlusTree::from_words(4, words.iter().cloned()).unwrap();

        for node in &tree.nodes {
            let Node::Internal(internal) = node else { continue };
            for (i, router) in internal.keys().iter().enumerate() {
                let mut left = Vec::new();
                subtree_keys(&tree, internal.children()[i], &mut left);
                assert!(left.iter().all(|k| k < router), "left of {router}: {left:?}");

                let mut right = Vec::new();
                subtree_keys(&tree, internal.children()[i + 1], &mut right);
                assert!(right.iter().all(|k| k >= router), "right of {router}: {right:?}");
            }
        }
    }

    #[test]
    fn test_search_hits_and_misses() {
        let tree = tree_of(3, &["a", "b", "c", "d"]);

        let hit = tree.find("d").unwrap();
        assert!(hit.contains("d"));
        assert_eq!(hit.keys(), ["b", "c", "d"]);

        assert!(tree.find("z").is_none());
        assert!(tree.find("").is_none());
    }

    #[test]
    fn test_search_on_empty_tree() {
        let tree = BPlusTree::new(3).unwrap();
        assert!(tree.find("a").is_none());
    }

    #[test]
    fn test_null_query_is_not_found_and_leaves_tree_alone() {
        let tree = tree_of(3, &["a", "b", "c", "d"]);
        let before = tree.nodes.clone();

        assert!(tree.search(None).is_none());
        assert_eq!(tree.nodes, before);
    }

    #[test]
    fn test_search_is_idempotent() {
        let tree = tree_of(3, &["q", "w", "e", "r", "t", "y"]);
        let first = tree.find("t").unwrap();
        let second = tree.find("t").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.id(), second.id());
    }

    #[test]
    fn test_len_counts_duplicates() {
        let tree = tree_of(3, &["a", "a", "a", "a", "a"]);
        assert_eq!(tree.len(), 5);
        assert!(tree.contains("a"));
    }

    #[test]
    fn test_duplicates_at_split_boundary_stay_left_of_equal_router() {
        let tree = tree_of(3, &["b", "b", "b", "b", "b"]);

        // Fifth "b" meets a full right leaf, splits it, and ties go left.
        assert_eq!(root_keys(&tree), ["b", "b"]);
        let root = tree.node(tree.root());
        let sizes: Vec<usize> = root
            .children()
            .iter()
            .map(|&c| tree.node(c).keys().len())
            .collect();
        assert_eq!(sizes, [1, 2, 2]);
    }

    #[test]
    fn test_degree_two_splits_every_other_insert() {
        let tree = tree_of(2, &["d", "b", "a", "c", "e", "f"]);
        for node in &tree.nodes {
            assert!(node.keys().len() <= 2);
        }
        for word in ["a", "b", "c", "d", "e", "f"] {
            assert!(tree.contains(word), "missing {word}");
        }
    }

    #[test]
    fn test_height_grows_logarithmically() {
        let words: Vec<String> = (0..1000).map(|i| format!("{i:04}")).collect();
        let tree = BPlusTree::from_words(8, words.iter().cloned()).unwrap();
        assert!(tree.height() >= 3);
        assert!(tree.height() <= 7);
    }
}
