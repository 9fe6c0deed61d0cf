//! Per-run extraction driver.
//! Wires traversal -> fingerprint -> naming -> placement for one run, with
//! per-file errors contained at the per-file boundary.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::config::Config;
use crate::fingerprint::digest_file;
use crate::fs_ops::place_file;
use crate::naming::resolve_destination;
use crate::scan::{ExtensionFilter, matching_files};
use crate::shutdown;

/// Run-scoped counters, threaded through the loop rather than kept in
/// module-level state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Files placed successfully
    pub processed: u64,
    /// Files that failed and were skipped
    pub failed: u64,
}

/// Process every matching file under the configured source tree.
///
/// Files are handled one at a time: fully fingerprinted and named before the
/// next is considered. A failure on one file is logged with its path and the
/// run continues; the returned stats always reflect the whole run.
pub fn run_extract(cfg: &Config) -> Result<RunStats> {
    let filter = ExtensionFilter::new(&cfg.extension, cfg.case_sensitive);
    let mut stats = RunStats::default();

    for src in matching_files(&cfg.source_dir, &filter) {
        if shutdown::is_requested() {
            info!(processed = stats.processed, "shutdown requested; stopping scan");
            break;
        }
        match process_one(cfg, &src) {
            Ok(dest) => {
                stats.processed += 1;
                info!(src = %src.display(), dest = %dest.display(), "placed file");
            }
            Err(e) => {
                stats.failed += 1;
                error!(src = %src.display(), error = %e, "failed to process file; continuing");
            }
        }
    }

    Ok(stats)
}

/// Fingerprint (when prefixing is enabled), name, and place a single file.
fn process_one(cfg: &Config, src: &Path) -> Result<PathBuf> {
    let file_name = src
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("source file missing a file name: {}", src.display()))?;

    // Hash once up front; collision probing re-slices this digest, it never
    // rehashes the file.
    let digest = if cfg.prefix_length > 0 {
        Some(digest_file(src, cfg.algorithm)?)
    } else {
        None
    };

    let dest = resolve_destination(
        &cfg.target_dir,
        file_name,
        digest.as_deref(),
        cfg.prefix_length as usize,
    );

    if cfg.dry_run {
        info!(src = %src.display(), dest = %dest.display(), "dry-run: would place file");
        return Ok(dest);
    }

    place_file(src, &dest, cfg.mode)?;
    Ok(dest)
}
