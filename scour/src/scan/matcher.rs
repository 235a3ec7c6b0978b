use dashmap::DashMap;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

use crate::errors::{ScanError, ScanResult};

// Compiled patterns are shared process-wide; repeated scans with the same
// query reuse the compiled regex.
static PATTERN_CACHE: Lazy<DashMap<(String, bool), Arc<Regex>>> = Lazy::new(DashMap::new);

/// Tests lines against a search query.
///
/// The query is compiled as a regular expression once, at construction; a
/// malformed pattern fails construction with [`ScanError::InvalidPattern`]
/// before any scanning starts. An empty pattern is valid and matches every
/// line.
///
/// In case-insensitive mode the pattern is lowercased at construction (the
/// original casing is discarded) and each candidate line is lowercased
/// before testing, so matching always compares lowercased text against a
/// lowercased pattern.
#[derive(Debug, Clone)]
pub struct QueryMatcher {
    regex: Arc<Regex>,
    case_insensitive: bool,
}

impl QueryMatcher {
    /// Compiles `pattern` into a matcher.
    pub fn new(pattern: &str, case_insensitive: bool) -> ScanResult<Self> {
        let normalized = if case_insensitive {
            pattern.to_lowercase()
        } else {
            pattern.to_string()
        };

        let key = (normalized.clone(), case_insensitive);
        if let Some(entry) = PATTERN_CACHE.get(&key) {
            return Ok(Self {
                regex: Arc::clone(entry.value()),
                case_insensitive,
            });
        }

        let regex = Arc::new(
            Regex::new(&normalized).map_err(|e| ScanError::invalid_pattern(e.to_string()))?,
        );
        PATTERN_CACHE.insert(key, Arc::clone(&regex));

        Ok(Self {
            regex,
            case_insensitive,
        })
    }

    /// Returns true if the line matches the query.
    pub fn is_match(&self, line: &str) -> bool {
        if self.case_insensitive {
            self.regex.is_match(&line.to_lowercase())
        } else {
            self.regex.is_match(line)
        }
    }
}
