//! Load a word list into a B+ tree and look up a handful of words.
//!
//! ```text
//! word-search [WORDS_FILE] [QUERY...]
//! ```
//!
//! # Environment Variables
//! - `WORDTREE_WORDS_FILE`: word list path (default: `1000-most-common-words.txt`)
//! - `WORDTREE_QUERIES`: comma separated queries (default: `I,your,test,noword`)
//! - `WORDTREE_MAX_DEGREE`: max keys per node (default: `3`)
//! - `WORDTREE_DUMP`: print the tree structure when set to `1` or `true`
//! - `RUST_LOG`: log filter (default: `wordtree=info,word_search=info`)
//!
//! Command-line arguments override the file and queries.

use std::path::PathBuf;
use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wordtree::words::read_words;
use wordtree::{render_dump, BPlusTree, TreeConfig};

const DEFAULT_WORDS_FILE: &str = "1000-most-common-words.txt";
const DEFAULT_QUERIES: &str = "I,your,test,noword";

/// Settings for one run of the demo.
#[derive(Debug, Clone)]
struct WordSearchConfig {
    words_file: PathBuf,
    queries: Vec<String>,
    tree: TreeConfig,
    dump: bool,
}

impl WordSearchConfig {
    /// Environment first, then positional arguments on top.
    fn load() -> wordtree::Result<Self> {
        let mut config = Self {
            words_file: std::env::var("WORDTREE_WORDS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_WORDS_FILE)),
            queries: split_queries(
                &std::env::var("WORDTREE_QUERIES").unwrap_or_else(|_| DEFAULT_QUERIES.into()),
            ),
            tree: TreeConfig::from_env()?,
            dump: std::env::var("WORDTREE_DUMP")
                .map(|v| matches!(v.trim(), "1" | "true"))
                .unwrap_or(false),
        };

        let mut args = std::env::args().skip(1);
        if let Some(path) = args.next() {
            config.words_file = PathBuf::from(path);
        }
        let queries: Vec<String> = args.collect();
        if !queries.is_empty() {
            config.queries = queries;
        }
        Ok(config)
    }
}

fn split_queries(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_string)
        .collect()
}

fn run(config: &WordSearchConfig) -> wordtree::Result<()> {
    let words = read_words(&config.words_file)?;
    let tree = BPlusTree::from_words(config.tree.max_degree, words)?;

    tracing::info!(
        "Loaded {} words from {} (max_degree={}, height={}, nodes={})",
        tree.len(),
        config.words_file.display(),
        tree.max_degree(),
        tree.height(),
        tree.node_count()
    );

    if config.dump {
        println!("{}", render_dump(&tree.dump()));
        println!();
    }

    for query in &config.queries {
        println!("Searching for: {query}");
        match tree.find(query) {
            Some(leaf) => println!("Found: {:?}", leaf.keys()),
            None => println!("Not found: {query}"),
        }
        println!();
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wordtree=info,word_search=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match WordSearchConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = run(&config) {
        tracing::error!("word search failed: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
