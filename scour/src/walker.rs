//! Recursive enumeration of regular files under a root.
//!
//! The order in which files are yielded (filesystem enumeration order) is
//! the canonical output order for tree scans: the aggregator in
//! [`crate::scan::engine`] preserves it regardless of which file finishes
//! scanning first. No guarantee is made that the order is lexicographic,
//! only that it matches what the platform's directory iteration yields.

use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Enumerates every regular file reachable from `root`, depth-unbounded.
///
/// Per-entry traversal errors (permission denied, entries that vanish
/// between enumeration and access) are logged and skipped; they never abort
/// the walk. Hidden files are included and no gitignore semantics apply.
pub fn walk_files(root: &Path) -> Vec<PathBuf> {
    let mut builder = WalkBuilder::new(root);
    builder
        .hidden(false)
        .standard_filters(false)
        .follow_links(false);

    let files: Vec<PathBuf> = builder
        .build()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("Skipping unreadable entry: {}", err);
                None
            }
        })
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .map(|entry| entry.into_path())
        .collect();

    debug!("Enumerated {} files under {}", files.len(), root.display());
    files
}
