use rayon::prelude::*;
use std::path::Path;
use tracing::{debug, info, warn};

use super::matcher::QueryMatcher;
use super::processor::FileProcessor;
use crate::config::ScanConfig;
use crate::errors::{ScanError, ScanResult};
use crate::results::ScanSummary;
use crate::walker::walk_files;

/// Runs a scan against the configured target.
///
/// Dispatches on the target kind: directories are scanned concurrently via
/// [`scan_tree`], a single regular file is scanned inline, and anything else
/// produces one `Invalid path: <path>` diagnostic in the summary. Only
/// pattern compilation can fail; every filesystem-level problem is absorbed
/// per file or per entry.
pub fn scan(config: &ScanConfig) -> ScanResult<ScanSummary> {
    info!(
        "Starting scan for {:?} under {}",
        config.pattern,
        config.root_path.display()
    );

    let matcher = QueryMatcher::new(&config.pattern, config.case_insensitive)?;
    let processor = FileProcessor::new(matcher, config.ignore_patterns.clone());

    let target = config.root_path.as_path();
    let summary = if target.is_dir() {
        scan_tree(&processor, target, config.thread_count.get())?
    } else if target.is_file() {
        let mut summary = ScanSummary::new();
        summary.add_file_matches(processor.process_file(target));
        summary
    } else {
        warn!("Scan target is neither file nor directory: {}", target.display());
        let mut summary = ScanSummary::new();
        summary.add_diagnostic(format!("Invalid path: {}", target.display()));
        summary
    };

    info!(
        "Scan complete. Found {} matches in {} of {} files",
        summary.total_matches, summary.files_with_matches, summary.files_scanned
    );
    Ok(summary)
}

/// Scans every file under `root` with one parallel task per candidate,
/// aggregating results in enumeration order.
///
/// Files are enumerated once, up front; the parallel collect is indexed by
/// enumeration position, so the output reads exactly as if the files had
/// been scanned sequentially even though completion order is arbitrary.
fn scan_tree(processor: &FileProcessor, root: &Path, threads: usize) -> ScanResult<ScanSummary> {
    let files = walk_files(root);
    debug!("Found {} candidate files under {}", files.len(), root.display());

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| ScanError::config_error(e.to_string()))?;

    let file_results = pool.install(|| {
        files
            .par_iter()
            .map(|path| processor.process_file(path))
            .collect::<Vec<_>>()
    });

    let mut summary = ScanSummary::new();
    for file_result in file_results {
        summary.add_file_matches(file_result);
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScanConfig;
    use std::num::NonZeroUsize;
    use tempfile::tempdir;

    fn config(pattern: &str, root: impl Into<std::path::PathBuf>) -> ScanConfig {
        ScanConfig {
            pattern: pattern.to_string(),
            case_insensitive: false,
            root_path: root.into(),
            ignore_patterns: vec![],
            stats_only: false,
            thread_count: NonZeroUsize::new(2).unwrap(),
            log_level: "warn".to_string(),
        }
    }

    #[test]
    fn test_scan_directory() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "test line\nother\n").unwrap();
        std::fs::write(dir.path().join("b.txt"), "no match here\n").unwrap();

        let summary = scan(&config("test", dir.path())).unwrap();
        assert_eq!(summary.total_matches, 1);
        assert_eq!(summary.files_scanned, 2);
        assert_eq!(summary.files_with_matches, 1);
        assert!(summary.diagnostics.is_empty());
    }

    #[test]
    fn test_scan_single_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("basic.txt");
        std::fs::write(&path, "hello world\nthis is a test\n").unwrap();

        let summary = scan(&config("test", &path)).unwrap();
        assert_eq!(summary.total_matches, 1);
        assert_eq!(summary.records().next().unwrap().line, "this is a test");
    }

    #[test]
    fn test_scan_invalid_path() {
        let summary = scan(&config("test", "does/not/exist")).unwrap();
        assert_eq!(summary.total_matches, 0);
        assert_eq!(summary.diagnostics, vec!["Invalid path: does/not/exist"]);
    }

    #[test]
    fn test_scan_invalid_pattern_is_fatal() {
        let dir = tempdir().unwrap();
        let result = scan(&config("[bad", dir.path()));
        assert!(matches!(result, Err(ScanError::InvalidPattern(_))));
    }

    #[test]
    fn test_scan_is_idempotent() {
        let dir = tempdir().unwrap();
        for i in 0..5 {
            std::fs::write(
                dir.path().join(format!("f{i}.txt")),
                format!("line with test {i}\nfiller\n"),
            )
            .unwrap();
        }

        let cfg = config("test", dir.path());
        let first = scan(&cfg).unwrap();
        let second = scan(&cfg).unwrap();

        let first_lines: Vec<_> = first.records().cloned().collect();
        let second_lines: Vec<_> = second.records().cloned().collect();
        assert_eq!(first_lines, second_lines);
    }
}
