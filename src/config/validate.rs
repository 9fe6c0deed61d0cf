//! Config validation logic.
//! Verifies the source tree and target directory before any file is touched;
//! all failures here are fatal to the whole run.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::errors::GatherError;

use super::types::Config;

impl Config {
    /// Validate existence, readability/writability and disjoint paths.
    pub fn validate(&self) -> Result<()> {
        if self.extension.trim().is_empty() {
            bail!("an extension to match is required (-E/--extension)");
        }

        let src = &self.source_dir;
        let tgt = &self.target_dir;

        // 1) Source: must exist, be a directory, and be readable.
        if !src.is_dir() {
            return Err(GatherError::SourceInvalid(src.clone()).into());
        }
        ensure_readable(src, "source directory")?;

        // 2) Target: must be a directory; create if missing; ensure writable.
        ensure_dir_is_or_create(tgt, "target directory")?;
        ensure_writable(tgt)?;

        // 3) Resolve symlinks and keep the trees disjoint: scanning a target
        //    nested in the source would feed placed files back into the walk.
        let src_real = fs::canonicalize(src).unwrap_or_else(|_| src.clone());
        let tgt_real = fs::canonicalize(tgt).unwrap_or_else(|_| tgt.clone());

        if src_real == tgt_real {
            bail!(
                "source and target resolve to the same path: '{}'",
                src_real.display()
            );
        }
        if tgt_real.starts_with(&src_real) {
            bail!(
                "target '{}' must not be inside source '{}'",
                tgt_real.display(),
                src_real.display()
            );
        }
        if src_real.starts_with(&tgt_real) {
            bail!(
                "source '{}' must not be inside target '{}'",
                src_real.display(),
                tgt_real.display()
            );
        }

        info!(
            "Config validated: source='{}' target='{}' extension='{}'",
            src.display(),
            tgt.display(),
            self.extension
        );
        Ok(())
    }
}

/// Ensure directory is readable by attempting to open its entries.
fn ensure_readable(path: &Path, name: &str) -> Result<()> {
    fs::read_dir(path).with_context(|| {
        format!(
            "Cannot read {name} '{}'; check permissions",
            path.display()
        )
    })?;
    debug!("{name} readable: {}", path.display());
    Ok(())
}

/// Ensure directory exists (create if missing). If it exists, it must be a
/// directory.
fn ensure_dir_is_or_create(path: &Path, name: &str) -> Result<()> {
    if path.exists() {
        if !path.is_dir() {
            return Err(GatherError::TargetInvalid {
                path: path.to_path_buf(),
                context: "exists but is not a directory".into(),
            }
            .into());
        }
    } else {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create {name} '{}'", path.display()))?;
        info!("Created {name}: {}", path.display());
    }
    Ok(())
}

/// Ensure directory is writable using a non-destructive probe file.
fn ensure_writable(path: &Path) -> Result<()> {
    let probe = path.join(format!(".gather_probe_{}.tmp", std::process::id()));
    match fs::OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(&probe)
    {
        Ok(_) => {
            let _ = fs::remove_file(&probe);
            debug!("target writable: {}", path.display());
            Ok(())
        }
        Err(e) => Err(GatherError::TargetInvalid {
            path: path.to_path_buf(),
            context: format!("not writable: {e}"),
        }
        .into()),
    }
}
