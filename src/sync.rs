//! Shared access to a tree across threads.
//!
//! [`BPlusTree`] has no internal synchronization. [`SharedTree`] puts one
//! behind a `parking_lot::RwLock` so that each operation holds the lock for
//! its whole run: inserts are exclusive, lookups and scans share.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::common::config::TreeConfig;
use crate::common::Result;
use crate::index::btree::BPlusTree;

/// A cloneable, lock-protected handle to a [`BPlusTree`].
///
/// # Thread Safety
/// - `insert`: write lock
/// - `find`, `keys`, `height`, `len`: read lock
///
/// Results are copied out before the lock is released, so no borrow of the
/// tree escapes a call.
///
/// # Example
/// ```
/// use wordtree::SharedTree;
///
/// let tree = SharedTree::new(3)?;
/// let writer = tree.clone();
/// std::thread::spawn(move || writer.insert("hello")).join().unwrap();
///
/// assert_eq!(tree.find("hello"), Some(vec!["hello".to_string()]));
/// # Ok::<(), wordtree::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct SharedTree {
    inner: Arc<RwLock<BPlusTree>>,
}

impl SharedTree {
    /// Create an empty shared tree.
    ///
    /// # Errors
    /// `Error::InvalidConfiguration` if `max_degree < 2`.
    pub fn new(max_degree: usize) -> Result<Self> {
        Ok(Self::from_tree(BPlusTree::new(max_degree)?))
    }

    /// # Errors
    /// `Error::InvalidConfiguration` if the config fails validation.
    pub fn with_config(config: TreeConfig) -> Result<Self> {
        Ok(Self::from_tree(BPlusTree::with_config(config)?))
    }

    /// Wrap an existing tree.
    pub fn from_tree(tree: BPlusTree) -> Self {
        Self {
            inner: Arc::new(RwLock::new(tree)),
        }
    }

    pub fn insert(&self, word: impl Into<String>) {
        self.inner.write().insert(word);
    }

    /// Keys of the leaf holding `key`, if present.
    pub fn find(&self, key: &str) -> Option<Vec<String>> {
        self.inner.read().find(key).map(|leaf| leaf.keys().to_vec())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.read().contains(key)
    }

    /// Snapshot of every key in order.
    pub fn keys(&self) -> Vec<String> {
        self.inner.read().traverse()
    }

    pub fn height(&self) -> usize {
        self.inner.read().height()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Run `f` with shared access to the tree.
    pub fn with_read<R>(&self, f: impl FnOnce(&BPlusTree) -> R) -> R {
        f(&self.inner.read())
    }

    /// Run `f` with exclusive access, e.g. to insert a batch atomically.
    pub fn with_write<R>(&self, f: impl FnOnce(&mut BPlusTree) -> R) -> R {
        f(&mut self.inner.write())
    }
}
