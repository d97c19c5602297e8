//! Configuration for wordtree.
//!
//! The only tunable is the tree's `max_degree`: the number of keys a node
//! may hold before the next insert that passes through it splits it.
//!
//! # Environment Variables
//! - `WORDTREE_MAX_DEGREE`: max keys per node (default: `3`, minimum: `2`)

use crate::common::{Error, Result};

/// Smallest accepted `max_degree`.
///
/// With a degree of 1 the split midpoint is 0 and a leaf split would leave
/// the original leaf empty.
pub const MIN_MAX_DEGREE: usize = 2;

/// Degree used when none is configured.
pub const DEFAULT_MAX_DEGREE: usize = 3;

/// Environment variable holding the max degree.
pub const MAX_DEGREE_ENV: &str = "WORDTREE_MAX_DEGREE";

/// Tree construction options.
///
/// # Example
/// ```
/// use wordtree::TreeConfig;
///
/// let config = TreeConfig::new(4);
/// assert!(config.validate().is_ok());
/// assert!(TreeConfig::new(1).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    /// Maximum number of keys a node may hold.
    ///
    /// Internal nodes therefore fan out to at most `max_degree + 1` children.
    pub max_degree: usize,
}

impl TreeConfig {
    /// Create a config with the given max degree. Not validated until used.
    pub fn new(max_degree: usize) -> Self {
        Self { max_degree }
    }

    /// Reject degrees that make splitting ill-defined.
    ///
    /// # Errors
    /// `Error::InvalidConfiguration` if `max_degree < MIN_MAX_DEGREE`.
    pub fn validate(&self) -> Result<()> {
        if self.max_degree < MIN_MAX_DEGREE {
            return Err(Error::InvalidConfiguration {
                max_degree: self.max_degree,
                min: MIN_MAX_DEGREE,
            });
        }
        Ok(())
    }

    /// Load the config from the process environment.
    ///
    /// # Errors
    /// `Error::Config` if `WORDTREE_MAX_DEGREE` is set but not a number,
    /// `Error::InvalidConfiguration` if it is below the minimum.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load the config through an arbitrary variable lookup.
    ///
    /// Lets tests supply variables without touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_degree = match lookup(MAX_DEGREE_ENV) {
            Some(raw) => raw.trim().parse::<usize>().map_err(|e| Error::Config {
                name: MAX_DEGREE_ENV.to_string(),
                message: format!("expected a positive integer, got {raw:?} ({e})"),
            })?,
            None => DEFAULT_MAX_DEGREE,
        };

        let config = Self::new(max_degree);
        config.validate()?;
        Ok(config)
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEGREE)
    }
}
