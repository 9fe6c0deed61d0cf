//! Destination free-space check (Unix).
//! Compares the required byte count to available space using statvfs; no-op
//! on non-Unix platforms.

use anyhow::Result;
use std::path::Path;

#[cfg(unix)]
pub(super) fn check_disk_space(needed: u64, dest_dir: &Path) -> Result<()> {
    use anyhow::bail;
    use std::ffi::CString;

    let dest_c = CString::new(dest_dir.to_string_lossy().into_owned())
        .map_err(|e| anyhow::anyhow!("Invalid destination path '{}': {}", dest_dir.display(), e))?;
    let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };
    let rc = unsafe { libc::statvfs(dest_c.as_ptr(), &mut stat) };
    if rc != 0 {
        bail!("Failed to stat filesystem for {}", dest_dir.display());
    }
    // Normalize to u128 to avoid cross-platform integer mismatches.
    let available: u128 = (stat.f_bavail as u128).saturating_mul(stat.f_frsize as u128);
    if needed as u128 > available {
        bail!(
            "Insufficient space on destination: need {} bytes, have {} bytes",
            needed,
            available
        );
    }
    Ok(())
}

#[cfg(not(unix))]
pub(super) fn check_disk_space(_needed: u64, _dest_dir: &Path) -> Result<()> {
    Ok(())
}
