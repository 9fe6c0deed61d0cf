//! Source-tree traversal and extension filtering.
//!
//! Produces a lazy, finite walk of regular files under the source root whose
//! final extension matches the configured one. Unreadable entries are logged
//! and skipped rather than aborting the walk.

use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// Extension match, normalized to a leading `.`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionFilter {
    ext: String,
    case_sensitive: bool,
}

impl ExtensionFilter {
    /// Build a filter from a raw extension string; a missing leading dot is
    /// supplied, so `-E txt` and `-E .txt` behave the same.
    pub fn new(raw: &str, case_sensitive: bool) -> Self {
        let raw = raw.trim();
        let ext = if raw.starts_with('.') {
            raw.to_string()
        } else {
            format!(".{raw}")
        };
        Self {
            ext,
            case_sensitive,
        }
    }

    /// The normalized extension, including the leading dot.
    pub fn extension(&self) -> &str {
        &self.ext
    }

    /// Whether `path`'s final extension matches.
    pub fn matches(&self, path: &Path) -> bool {
        let Some(suffix) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        let want = &self.ext[1..];
        if self.case_sensitive {
            suffix == want
        } else {
            suffix.eq_ignore_ascii_case(want)
        }
    }
}

/// Lazily yield regular files under `source` whose extension matches.
pub fn matching_files<'a>(
    source: &'a Path,
    filter: &'a ExtensionFilter,
) -> impl Iterator<Item = PathBuf> + 'a {
    WalkDir::new(source)
        .min_depth(1)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                warn!(error = %err, "skipping unreadable entry during scan");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(move |p| filter.matches(p))
}
