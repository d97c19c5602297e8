//! Error types for wordtree.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in wordtree.
///
/// A search miss is not an error: lookups return `Option` and absence is a
/// normal outcome. Inserting never fails.
#[derive(Debug, Error)]
pub enum Error {
    /// The tree was configured with a degree too small to split.
    ///
    /// Raised at construction; no tree is built.
    #[error("invalid configuration: max_degree {max_degree} is below the minimum of {min}")]
    InvalidConfiguration { max_degree: usize, min: usize },

    /// A structural check found the tree in an inconsistent state.
    ///
    /// This indicates a bug in the split or insert logic.
    #[error("tree invariant violated: {0}")]
    InvariantViolation(String),

    /// An environment setting could not be parsed.
    #[error("invalid value for {name}: {message}")]
    Config { name: String, message: String },

    /// I/O error while reading a word list.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
