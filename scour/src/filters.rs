//! File eligibility: which files are worth scanning at all.
//!
//! A file is eligible when its extension is not on the binary-format
//! denylist and its entire byte content is plain ASCII. The extension check
//! is O(1) set membership and runs first; the content check reads the whole
//! file and is the dominant cost for large files.

use memmap2::Mmap;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, Read};
use std::ops::Deref;
use std::path::Path;

use glob::Pattern;
use tracing::{trace, warn};

/// Files at or above this size are memory-mapped instead of read into a
/// buffer for the content check.
const MMAP_THRESHOLD: u64 = 10 * 1024 * 1024; // 10MB

/// Extensions of known-binary formats that are never scanned.
/// Fixed at startup; no mutation API is exposed.
static DENYLISTED_EXTENSIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // executables and object code
        "exe", "dll", "so", "dylib", "bin", "app", "o", "obj", "class",
        // archives
        "zip", "tar", "gz", "bz2", "7z", "rar",
        // images
        "jpg", "jpeg", "png", "gif", "bmp", "tiff", "ico",
        // audio/video
        "mp3", "mp4", "avi", "mov", "flv", "wav",
        // documents
        "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx",
        // databases
        "db", "sqlite", "mdb",
        // disk images
        "iso", "img", "dmg",
        // fonts
        "ttf", "otf",
        // serialized data
        "dat", "pkl",
    ]
    .into_iter()
    .collect()
});

/// Returns true if the file's extension (case-folded) is on the binary
/// denylist. Files with no extension are never skipped by this rule.
pub fn should_skip_extension(path: &Path) -> bool {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => DENYLISTED_EXTENSIONS.contains(ext.to_lowercase().as_str()),
        None => false,
    }
}

/// Compiles custom ignore globs, once per scan. Malformed patterns are
/// dropped with a warning rather than failing the run.
pub fn compile_ignore_patterns(patterns: &[String]) -> Vec<Pattern> {
    patterns
        .iter()
        .filter_map(|pattern| match Pattern::new(pattern) {
            Ok(compiled) => Some(compiled),
            Err(err) => {
                warn!("Dropping malformed ignore pattern {:?}: {}", pattern, err);
                None
            }
        })
        .collect()
}

/// Checks if a file matches any of the precompiled ignore globs.
pub fn should_ignore(path: &Path, ignore_patterns: &[Pattern]) -> bool {
    if ignore_patterns.is_empty() {
        return false;
    }
    let normalized_path = path.to_string_lossy().replace('\\', "/");
    ignore_patterns
        .iter()
        .any(|pattern| pattern.matches(&normalized_path))
}

/// Full file content, either owned or memory-mapped.
enum FileBytes {
    Owned(Vec<u8>),
    Mapped(Mmap),
}

impl Deref for FileBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            FileBytes::Owned(buf) => buf,
            FileBytes::Mapped(mmap) => mmap,
        }
    }
}

fn read_file_bytes(path: &Path) -> io::Result<FileBytes> {
    let mut file = File::open(path)?;
    let len = file.metadata()?.len();
    if len >= MMAP_THRESHOLD {
        let mmap = unsafe { Mmap::map(&file) }?;
        Ok(FileBytes::Mapped(mmap))
    } else {
        let mut buf = Vec::with_capacity(len as usize);
        file.read_to_end(&mut buf)?;
        Ok(FileBytes::Owned(buf))
    }
}

/// Returns true if every byte of the file is ASCII (value <= 0x7F).
/// Files that cannot be opened are treated as ineligible, not as errors.
pub fn is_ascii_file(path: &Path) -> bool {
    match read_file_bytes(path) {
        Ok(bytes) => bytes.is_ascii(),
        Err(err) => {
            trace!("Treating unreadable file as ineligible: {}: {}", path.display(), err);
            false
        }
    }
}

/// Reads the full text of a file, returning `None` for files that cannot be
/// opened or that contain any non-ASCII byte.
pub fn read_ascii_text(path: &Path) -> Option<String> {
    let bytes = read_file_bytes(path).ok()?;
    if !bytes.is_ascii() {
        return None;
    }
    // ASCII is a strict subset of UTF-8, so this conversion cannot fail for
    // files that pass the byte check.
    std::str::from_utf8(&bytes).ok().map(str::to_owned)
}
