//! Word-list loading.
//!
//! Reads newline-delimited word files, one key per line. Surrounding
//! whitespace (including `\r` from CRLF files) is stripped; blank lines are
//! kept as empty keys so the tree sees exactly one key per line.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::common::Result;

/// Split `text` into one trimmed word per line.
pub fn parse_words(text: &str) -> Vec<String> {
    text.lines().map(|line| line.trim().to_string()).collect()
}

/// Read a word file from disk.
///
/// # Errors
/// `Error::Io` if the file cannot be read or is not UTF-8.
pub fn read_words<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let words = parse_words(&text);
    debug!(path = %path.display(), count = words.len(), "read word list");
    Ok(words)
}
