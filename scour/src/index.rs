//! Whole-word inverted index: lowercased token to posting list of file
//! paths. Built once per root in memory; repeated queries against the same
//! tree are answered by lookup instead of rescanning.

use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

use crate::filters;
use crate::walker::walk_files;

/// Token-to-files mapping over a directory tree.
///
/// Posting lists keep one entry per token occurrence, so a file whose text
/// contains a token several times appears that many times in the list. No
/// positional or frequency data is kept, and postings are not ranked.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    postings: HashMap<String, Vec<String>>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Default::default()
    }

    /// Builds the index over every eligible file under `root`.
    ///
    /// The walk and eligibility rules are exactly those of the scan path.
    /// Any postings from a previous build are cleared first, so rebuilding
    /// after the tree changes replaces the index rather than accumulating
    /// stale entries.
    pub fn build(&mut self, root: &Path) {
        self.postings.clear();

        let files = walk_files(root);
        let mut indexed = 0usize;
        for path in files {
            if filters::should_skip_extension(&path) {
                continue;
            }
            let Some(text) = filters::read_ascii_text(&path) else {
                continue;
            };

            let path_str = path.display().to_string();
            for token in text.split_whitespace() {
                self.postings
                    .entry(token.to_lowercase())
                    .or_default()
                    .push(path_str.clone());
            }
            indexed += 1;
            debug!("Indexed {}", path.display());
        }

        info!(
            "Index built over {}: {} files, {} distinct tokens",
            root.display(),
            indexed,
            self.postings.len()
        );
    }

    /// Looks up the posting list for an exact (lowercase) token.
    ///
    /// The term is not normalized here; callers must match the lowercase
    /// convention used during indexing. Unknown terms yield an empty slice.
    pub fn query(&self, term: &str) -> &[String] {
        self.postings.get(term).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct tokens in the index.
    pub fn token_count(&self) -> usize {
        self.postings.len()
    }
}
