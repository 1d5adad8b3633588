//! Whole-file writes through a temp file and atomic rename.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use super::temp_path;

/// Writes `data` to `<final_path>.part`, syncs it, then renames it into place.
/// On failure the temp file is removed, so no partial file is left behind.
/// Returns the number of bytes written.
pub fn write_atomic(final_path: &Path, data: &[u8]) -> io::Result<u64> {
    let temp = temp_path(final_path);
    let result = write_and_sync(&temp, data).and_then(|()| std::fs::rename(&temp, final_path));
    if let Err(e) = result {
        let _ = std::fs::remove_file(&temp);
        return Err(e);
    }
    Ok(data.len() as u64)
}

fn write_and_sync(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = File::options()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    file.write_all(data)?;
    file.sync_all()
}
