use std::fs;
use std::io::Write;
use std::path::Path;

use crate::errors::ScrapeResult;

/// Create the parent directory of `path` if it is missing
pub(super) fn ensure_parent(path: &Path) -> ScrapeResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Write bytes atomically (write to temp, then rename)
pub(super) fn write_atomic(path: &Path, bytes: &[u8]) -> ScrapeResult<()> {
    ensure_parent(path)?;

    let tmp = path.with_extension("csv.tmp");
    let mut file = fs::File::create(&tmp)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    drop(file);

    fs::rename(&tmp, path)?;
    Ok(())
}
