//! Disk I/O for the saved page and its resources.
//!
//! Pre-flight checks for the output directory, parent directory creation
//! (mode 0755 on Unix) and atomic finalize (rename from `.part` to final name).

mod directory;
mod writer;

use std::io;
use std::path::{Path, PathBuf};

pub use directory::{assert_writable_directory, DirectoryError};
pub use writer::write_atomic;

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Permissions for directories created while storing files.
pub const DIRECTORY_MODE: u32 = 0o755;

/// Path for the temp file: appends `.part` to the final path (e.g. `a.png` → `a.png.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Stores `data` at `path`, creating missing parent directories.
/// Returns the number of bytes written.
pub fn store(path: &Path, data: &[u8]) -> io::Result<u64> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }
    write_atomic(path, data)
}

#[cfg(unix)]
fn create_dir_all(dir: &Path) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    std::fs::DirBuilder::new()
        .recursive(true)
        .mode(DIRECTORY_MODE)
        .create(dir)
}

#[cfg(not(unix))]
fn create_dir_all(dir: &Path) -> io::Result<()> {
    std::fs::create_dir_all(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_path_appends_part() {
        let p = temp_path(Path::new("file.png"));
        assert_eq!(p.to_string_lossy(), "file.png.part");
        let p2 = temp_path(Path::new("/tmp/page_files/a.css"));
        assert_eq!(p2.to_string_lossy(), "/tmp/page_files/a.css.part");
    }

    #[test]
    fn store_creates_parents_and_returns_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site_files").join("image.png");
        let n = store(&path, b"\x89PNG data").unwrap();
        assert_eq!(n, 9);
        assert_eq!(std::fs::read(&path).unwrap(), b"\x89PNG data");
        assert!(!temp_path(&path).exists());
    }

    #[cfg(unix)]
    #[test]
    fn created_directories_use_0755() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("res_files");
        store(&sub.join("a.js"), b"1").unwrap();
        let mode = std::fs::metadata(&sub).unwrap().permissions().mode() & 0o777;
        // umask may only clear bits
        assert_eq!(mode & !DIRECTORY_MODE, 0);
    }

    #[test]
    fn store_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        store(&path, b"first version").unwrap();
        store(&path, b"second").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn failed_store_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        // A file where a parent directory is needed.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();
        let path = blocker.join("a.png");
        assert!(store(&path, b"data").is_err());
        assert!(!path.exists());
    }
}
