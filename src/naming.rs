//! Destination-name resolution.
//!
//! Policy:
//! - Without a digest (prefix length 0): use the candidate name; on collision
//!   append `_<n>` to the stem, n counting up from 1.
//! - With a digest: use `<digest[..p]>_<name>` with p starting at the
//!   configured prefix length; on collision grow p one character at a time
//!   (re-slicing the precomputed digest, never rehashing). When the whole
//!   digest is spent and the name still collides, fall back to numeric
//!   suffixing of the fully-prefixed name.
//!
//! Notes:
//! - This only decides a name against current filesystem state; nothing is
//!   reserved between the existence check and the caller's placement, so
//!   concurrent writers into the same target directory can race. Single
//!   writer per target directory is assumed.
//! - Prefix growth is bounded by the digest length and the suffix counter is
//!   monotonic against a finite directory, so the probe always terminates.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use tracing::trace;

/// Compute a destination path inside `target_dir` that does not exist at
/// decision time.
///
/// `digest` enables hash-prefixed naming when paired with a non-zero
/// `prefix_len`; otherwise the bare candidate name is used.
pub fn resolve_destination(
    target_dir: &Path,
    file_name: &OsStr,
    digest: Option<&str>,
    prefix_len: usize,
) -> PathBuf {
    match digest {
        Some(d) if prefix_len > 0 && !d.is_empty() => {
            prefixed_destination(target_dir, file_name, d, prefix_len)
        }
        _ => unique_with_numeric_suffix(target_dir, file_name),
    }
}

/// Probe `<digest[..p]>_<name>` with growing p, then suffix as a last resort.
fn prefixed_destination(
    target_dir: &Path,
    file_name: &OsStr,
    digest: &str,
    initial_len: usize,
) -> PathBuf {
    let mut p = initial_len.clamp(1, digest.len());
    loop {
        let name = prefixed_name(&digest[..p], file_name);
        let candidate = target_dir.join(&name);
        if !candidate.exists() {
            return candidate;
        }
        if p >= digest.len() {
            // The digest can no longer disambiguate: either a true digest
            // collision or the identical file seen twice. Numeric suffixing
            // guarantees progress from here.
            trace!(name = ?name, dir = %target_dir.display(), "digest exhausted, switching to numeric suffix");
            return unique_with_numeric_suffix(target_dir, &name);
        }
        p += 1;
    }
}

/// `<prefix>_<file_name>`, preserving non-UTF8 names via OsString.
fn prefixed_name(prefix: &str, file_name: &OsStr) -> OsString {
    let mut name = OsString::with_capacity(prefix.len() + 1 + file_name.len());
    name.push(prefix);
    name.push("_");
    name.push(file_name);
    name
}

/// Return `dir/name` if free, else `dir/<stem>_<n>[.ext]` for the first free
/// n starting at 1.
///
/// Examples:
/// - "a.txt" -> "a_1.txt", "a_2.txt", ...
/// - ".env" -> ".env_1"
/// - "archive.tar.gz" -> "archive.tar_1.gz"
fn unique_with_numeric_suffix(dir: &Path, name: &OsStr) -> PathBuf {
    let candidate = dir.join(name);
    if !candidate.exists() {
        return candidate;
    }

    // Split once; rebuild "<stem>_<n>[.ext]" per attempt.
    let base = Path::new(name);
    let stem: OsString = base
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| name.to_os_string());
    let ext: Option<OsString> = base.extension().map(|e| e.to_os_string());

    let mut n: u64 = 1;
    loop {
        let mut alt = OsString::new();
        alt.push(&stem);
        alt.push(format!("_{n}"));
        if let Some(ref e) = ext {
            alt.push(".");
            alt.push(e);
        }
        let candidate = dir.join(&alt);
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}
