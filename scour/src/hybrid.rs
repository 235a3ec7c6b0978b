//! Chooses between index lookup and a direct scan, per invocation.

use tracing::debug;

use crate::config::ScanConfig;
use crate::errors::ScanResult;
use crate::index::InvertedIndex;
use crate::results::ScanSummary;
use crate::scan;
use std::path::Path;

/// The result of a hybrid search. The two modes are deliberately not
/// result-compatible: an index lookup yields bare file paths with no line
/// content, a scan yields full match records.
#[derive(Debug)]
pub enum SearchOutcome {
    /// File paths whose content contained the query as a whole token
    IndexHits(Vec<String>),
    /// Full line-level match records from a direct scan
    Scan(ScanSummary),
}

/// Routes searches through a freshly built index when one exists, and falls
/// back to the scan engine otherwise.
///
/// Once an index has been built, every search on this controller goes
/// through it; there is no per-query fallback from an index miss to a scan.
#[derive(Debug, Default)]
pub struct HybridController {
    index: InvertedIndex,
    indexed: bool,
}

impl HybridController {
    pub fn new() -> Self {
        Default::default()
    }

    /// Whether an index has been built on this controller.
    pub fn is_indexed(&self) -> bool {
        self.indexed
    }

    /// Builds (or rebuilds) the index over `root` and switches all
    /// subsequent searches to index lookups. Rebuilding replaces the
    /// previous postings.
    pub fn build_index(&mut self, root: &Path) {
        self.index.build(root);
        self.indexed = true;
    }

    /// Answers one search, by index lookup when indexed and by a full scan
    /// otherwise.
    ///
    /// Index lookups match the query string as an exact lowercase token;
    /// callers are responsible for lowercasing the term.
    pub fn search(&self, config: &ScanConfig) -> ScanResult<SearchOutcome> {
        if self.indexed {
            debug!("Answering query {:?} from index", config.pattern);
            Ok(SearchOutcome::IndexHits(
                self.index.query(&config.pattern).to_vec(),
            ))
        } else {
            debug!("No index built; delegating to scan engine");
            Ok(SearchOutcome::Scan(scan::scan(config)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroUsize;
    use tempfile::tempdir;

    fn config(pattern: &str, root: &Path) -> ScanConfig {
        ScanConfig {
            pattern: pattern.to_string(),
            case_insensitive: false,
            root_path: root.to_path_buf(),
            ignore_patterns: vec![],
            stats_only: false,
            thread_count: NonZeroUsize::new(2).unwrap(),
            log_level: "warn".to_string(),
        }
    }

    #[test]
    fn test_unindexed_delegates_to_scan() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "a test line\n").unwrap();

        let controller = HybridController::new();
        assert!(!controller.is_indexed());

        match controller.search(&config("test", dir.path())).unwrap() {
            SearchOutcome::Scan(summary) => assert_eq!(summary.total_matches, 1),
            SearchOutcome::IndexHits(_) => panic!("expected scan outcome"),
        }
    }

    #[test]
    fn test_indexed_answers_from_index() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "alpha beta\n").unwrap();

        let mut controller = HybridController::new();
        controller.build_index(dir.path());
        assert!(controller.is_indexed());

        match controller.search(&config("alpha", dir.path())).unwrap() {
            SearchOutcome::IndexHits(paths) => {
                assert_eq!(paths.len(), 1);
                assert!(paths[0].ends_with("a.txt"));
            }
            SearchOutcome::Scan(_) => panic!("expected index outcome"),
        }
    }

    #[test]
    fn test_index_miss_does_not_fall_back() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "alpha\n").unwrap();

        let mut controller = HybridController::new();
        controller.build_index(dir.path());

        // "alp" matches as a substring but not as a whole token; once
        // indexed, no scan fallback happens.
        match controller.search(&config("alp", dir.path())).unwrap() {
            SearchOutcome::IndexHits(paths) => assert!(paths.is_empty()),
            SearchOutcome::Scan(_) => panic!("expected index outcome"),
        }
    }
}
