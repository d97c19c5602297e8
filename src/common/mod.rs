//! Common types and utilities shared across wordtree.
//!
//! This module contains the primitives the index is built from:
//! - Configuration (degree limits, [`TreeConfig`](config::TreeConfig))
//! - Error types
//! - Identifiers ([`NodeId`])

pub mod config;
pub mod error;
mod node_id;

pub use error::{Error, Result};
pub use node_id::NodeId;
