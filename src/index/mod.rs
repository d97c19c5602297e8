//! Index structures.
//!
//! - [`btree`] - In-memory B+ tree over string keys

pub mod btree;
