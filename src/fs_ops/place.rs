//! Copy/move placement of a single file.
//!
//! Copy stages into a hidden temp name in the destination directory and
//! renames into place, so a failed copy never leaves a partial file at the
//! chosen destination. Move attempts an atomic rename first and falls back
//! to copy+remove across filesystems.
//!
//! The destination path is taken as decided by the namer; nothing here
//! re-checks for collisions, and repeating a partially-failed placement may
//! re-trigger side effects.

use anyhow::Result;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, trace, warn};

use super::disk::check_disk_space;
use super::helpers::io_error_with_help;
use super::util::{fsync_dir, is_cross_device, unique_temp_path};

/// How a matched file reaches the target directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaceMode {
    /// Copy the source, preserving permissions and timestamps.
    #[default]
    Copy,
    /// Move the source; the original is gone on success.
    Move,
}

/// Perform the filesystem action for one file.
pub fn place_file(src: &Path, dest: &Path, mode: PlaceMode) -> Result<()> {
    let dest_dir = dest
        .parent()
        .ok_or_else(|| anyhow::anyhow!("destination has no parent: {}", dest.display()))?;
    fs::create_dir_all(dest_dir)
        .map_err(io_error_with_help("create destination directory", dest_dir))?;

    match mode {
        PlaceMode::Copy => copy_file(src, dest, dest_dir),
        PlaceMode::Move => move_file(src, dest, dest_dir),
    }
}

fn copy_file(src: &Path, dest: &Path, dest_dir: &Path) -> Result<()> {
    let src_meta = fs::metadata(src).map_err(io_error_with_help("stat source file", src))?;
    check_disk_space(src_meta.len(), dest_dir)?;

    let tmp = unique_temp_path(dest_dir);
    if let Err(e) = fs::copy(src, &tmp) {
        let _ = fs::remove_file(&tmp);
        return Err(io_error_with_help("copy file", src)(e));
    }
    if let Err(e) = fs::rename(&tmp, dest) {
        let _ = fs::remove_file(&tmp);
        return Err(io_error_with_help("rename temporary file into place", dest)(e));
    }
    let _ = fsync_dir(dest_dir);

    preserve_timestamps(dest, &src_meta);
    debug!(src = %src.display(), dest = %dest.display(), "copied file");
    Ok(())
}

fn move_file(src: &Path, dest: &Path, dest_dir: &Path) -> Result<()> {
    match fs::rename(src, dest) {
        Ok(()) => {
            let _ = fsync_dir(dest_dir);
            debug!(src = %src.display(), dest = %dest.display(), "renamed file atomically");
            Ok(())
        }
        Err(e) => {
            let hint = if is_cross_device(&e) {
                "cross-filesystem; copying instead"
            } else if e.kind() == io::ErrorKind::PermissionDenied {
                "permission denied; check destination perms"
            } else {
                "falling back to copy"
            };
            warn!(error = %e, hint, "atomic rename failed, using copy and remove");
            copy_file(src, dest, dest_dir)?;
            fs::remove_file(src).map_err(io_error_with_help("remove original file", src))?;
            Ok(())
        }
    }
}

/// Preserve atime/mtime on `dest` from already-fetched source metadata.
/// Best-effort: `fs::copy` already carried permissions, and a failed
/// timestamp update should not undo a completed placement.
fn preserve_timestamps(dest: &Path, src_meta: &fs::Metadata) {
    use filetime::{FileTime, set_file_times};

    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        let mt = FileTime::from_unix_time(src_meta.mtime(), src_meta.mtime_nsec() as u32);
        let at = FileTime::from_unix_time(src_meta.atime(), src_meta.atime_nsec() as u32);
        if let Err(e) = set_file_times(dest, at, mt) {
            warn!(path = %dest.display(), error = %e, "failed to set atime/mtime on destination");
        } else {
            trace!(path = %dest.display(), "set atime/mtime on destination");
        }
    }
    #[cfg(not(unix))]
    {
        if let (Ok(accessed), Ok(modified)) = (src_meta.accessed(), src_meta.modified()) {
            let at = FileTime::from_system_time(accessed);
            let mt = FileTime::from_system_time(modified);
            if let Err(e) = set_file_times(dest, at, mt) {
                warn!(path = %dest.display(), error = %e, "failed to set atime/mtime on destination");
            }
        }
    }
}
