use glob::Pattern;
use std::path::Path;
use tracing::trace;

use super::matcher::QueryMatcher;
use crate::errors::normalize_path;
use crate::filters;
use crate::results::{FileMatches, MatchRecord};

/// Scans individual files for matching lines.
///
/// Processing is infallible by design: ineligible files (denylisted
/// extension, non-ASCII content, custom ignore match) and files that fail to
/// open or read all yield an empty result rather than an error, so a failure
/// on one file never affects its siblings.
#[derive(Debug, Clone)]
pub struct FileProcessor {
    matcher: QueryMatcher,
    ignore_globs: Vec<Pattern>,
}

impl FileProcessor {
    pub fn new(matcher: QueryMatcher, ignore_patterns: Vec<String>) -> Self {
        Self {
            matcher,
            // Globs are compiled once here, not per file.
            ignore_globs: filters::compile_ignore_patterns(&ignore_patterns),
        }
    }

    /// Scans one file, producing one record per matching line in file order.
    pub fn process_file(&self, path: &Path) -> FileMatches {
        trace!("Processing file: {}", path.display());

        // Cheap checks first; the content check reads the whole file.
        if filters::should_skip_extension(path)
            || filters::should_ignore(path, &self.ignore_globs)
        {
            trace!("Skipping by extension or ignore pattern: {}", path.display());
            return FileMatches::empty(path);
        }

        let Some(contents) = filters::read_ascii_text(path) else {
            trace!("Skipping non-ASCII or unreadable file: {}", path.display());
            return FileMatches::empty(path);
        };

        let normalized = normalize_path(path);
        let records: Vec<MatchRecord> = contents
            .lines()
            .filter(|line| self.matcher.is_match(line))
            .map(|line| MatchRecord {
                path: normalized.clone(),
                line: line.to_string(),
            })
            .collect();

        FileMatches {
            path: path.to_path_buf(),
            records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn processor(pattern: &str, case_insensitive: bool) -> FileProcessor {
        FileProcessor::new(
            QueryMatcher::new(pattern, case_insensitive).unwrap(),
            vec![],
        )
    }

    #[test]
    fn test_matching_lines_in_file_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("basic.txt");
        std::fs::write(&path, "hello world\nthis is a test\nanother test line\n").unwrap();

        let result = processor("test", false).process_file(&path);
        let lines: Vec<&str> = result.records.iter().map(|r| r.line.as_str()).collect();
        assert_eq!(lines, vec!["this is a test", "another test line"]);
    }

    #[test]
    fn test_empty_pattern_matches_every_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("basic.txt");
        std::fs::write(&path, "hello world\nthis is a test\n").unwrap();

        let result = processor("", false).process_file(&path);
        assert_eq!(result.records.len(), 2);
    }

    #[test]
    fn test_denylisted_extension_yields_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("archive.zip");
        std::fs::write(&path, "test test test\n").unwrap();

        let result = processor("test", false).process_file(&path);
        assert!(result.records.is_empty());
    }

    #[test]
    fn test_non_ascii_file_yields_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("binary.txt");
        std::fs::write(&path, [b't', b'e', b's', b't', 0xFF]).unwrap();

        let result = processor("test", false).process_file(&path);
        assert!(result.records.is_empty());
    }

    #[test]
    fn test_missing_file_yields_nothing() {
        let dir = tempdir().unwrap();
        let result = processor("test", false).process_file(&dir.path().join("gone.txt"));
        assert!(result.records.is_empty());
    }

    #[test]
    fn test_case_insensitive_reports_original_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("basic.txt");
        std::fs::write(&path, "Hello World\n").unwrap();

        let result = processor("HELLO", true).process_file(&path);
        assert_eq!(result.records.len(), 1);
        // The reported line keeps its original casing.
        assert_eq!(result.records[0].line, "Hello World");
    }

    #[test]
    fn test_ignore_pattern_skips_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("skip.tmp");
        std::fs::write(&path, "test\n").unwrap();

        let p = FileProcessor::new(
            QueryMatcher::new("test", false).unwrap(),
            vec!["**/*.tmp".to_string()],
        );
        assert!(p.process_file(&path).records.is_empty());
    }

    #[test]
    fn test_malformed_ignore_pattern_does_not_disable_scanning() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("keep.txt");
        std::fs::write(&path, "test\n").unwrap();

        let p = FileProcessor::new(
            QueryMatcher::new("test", false).unwrap(),
            vec!["[unclosed".to_string()],
        );
        assert_eq!(p.process_file(&path).records.len(), 1);
    }
}
