use std::fmt;
use std::path::PathBuf;

/// One reported line-level match: a forward-slash-normalized file path
/// paired with the full text of the matching line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    /// The originating file path, normalized to forward slashes
    pub path: String,
    /// The full text of the matching line
    pub line: String,
}

impl fmt::Display for MatchRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\": {}", self.path, self.line)
    }
}

/// All matches found in a single file, in the file's natural line order.
#[derive(Debug, Clone)]
pub struct FileMatches {
    /// The path to the file as discovered by the walker
    pub path: PathBuf,
    /// Matching lines, in line order
    pub records: Vec<MatchRecord>,
}

impl FileMatches {
    /// A result carrying no matches, used for ineligible or unreadable files.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: Vec::new(),
        }
    }
}

/// The complete result of one scan invocation.
///
/// `file_results` preserves directory-enumeration order: all records from
/// file *i* precede all records from file *i+1*, exactly as if the files had
/// been scanned one at a time.
#[derive(Debug, Clone, Default)]
pub struct ScanSummary {
    /// Per-file results for files that matched, in enumeration order
    pub file_results: Vec<FileMatches>,
    /// Total number of matching lines
    pub total_matches: usize,
    /// Total number of candidate files considered
    pub files_scanned: usize,
    /// Number of files with at least one match
    pub files_with_matches: usize,
    /// Diagnostics such as the invalid-path notice; never fatal
    pub diagnostics: Vec<String>,
}

impl ScanSummary {
    pub fn new() -> Self {
        Default::default()
    }

    /// Records the outcome for one scanned file. Files without matches are
    /// counted but their empty result is not retained.
    pub fn add_file_matches(&mut self, file_matches: FileMatches) {
        self.files_scanned += 1;
        if !file_matches.records.is_empty() {
            self.total_matches += file_matches.records.len();
            self.files_with_matches += 1;
            self.file_results.push(file_matches);
        }
    }

    pub fn add_diagnostic(&mut self, message: impl Into<String>) {
        self.diagnostics.push(message.into());
    }

    /// All match records in output order.
    pub fn records(&self) -> impl Iterator<Item = &MatchRecord> {
        self.file_results.iter().flat_map(|fr| fr.records.iter())
    }
}
