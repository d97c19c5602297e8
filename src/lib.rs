//! wordtree - an in-memory B+ tree index over string keys.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                            wordtree                             │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │            Shared access (sync/)  [optional]            │   │
//! │  │           SharedTree = Arc<RwLock<BPlusTree>>           │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                Index Layer (index/btree)                │   │
//! │  │    insert (split on the way down) · search · scan       │   │
//! │  │        Node arena: Internal ─▶ children, Leaf ─▶ next   │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↑                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │             Word lists (words) → keys to insert         │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (NodeId, Error, config)
//! - [`index`] - The B+ tree
//! - [`sync`] - Lock-protected handle for multi-threaded callers
//! - [`words`] - Reading newline-delimited word files
//!
//! # Quick Start
//! ```
//! use wordtree::BPlusTree;
//!
//! let mut tree = BPlusTree::new(3)?;
//! for word in ["b", "a", "c"] {
//!     tree.insert(word);
//! }
//!
//! assert_eq!(tree.traverse(), ["a", "b", "c"]);
//! assert_eq!(tree.find("b").map(|leaf| leaf.keys().len()), Some(3));
//! # Ok::<(), wordtree::Error>(())
//! ```

pub mod common;
pub mod index;
pub mod sync;
pub mod words;

// Re-export commonly used items at crate root for convenience
pub use common::config::{TreeConfig, DEFAULT_MAX_DEGREE, MIN_MAX_DEGREE};
pub use common::{Error, NodeId, Result};

pub use index::btree::{render_dump, BPlusTree, Keys, LeafRef, NodeKind, NodeSnapshot};
pub use sync::SharedTree;
