//! B+ tree index over string keys.
//!
//! # Structure
//! - Internal nodes: routing keys and child ids
//! - Leaf nodes: the keys themselves, singly linked in key order
//!
//! All nodes live in one arena owned by [`BPlusTree`]; parents own their
//! children through `children`, and the leaf chain is a non-owning link.
//!
//! # Usage
//! ```
//! use wordtree::index::btree::{render_dump, BPlusTree};
//!
//! let tree = BPlusTree::from_words(3, ["the", "of", "and", "to", "a"])?;
//! assert_eq!(tree.keys().collect::<Vec<_>>(), ["a", "and", "of", "the", "to"]);
//! println!("{}", render_dump(&tree.dump()));
//! # Ok::<(), wordtree::Error>(())
//! ```

mod check;
mod dump;
mod iter;
mod node;
mod tree;

pub use dump::{render_dump, NodeKind, NodeSnapshot};
pub use iter::Keys;
pub use node::{InternalNode, LeafNode, Node};
pub use tree::{BPlusTree, LeafRef};
