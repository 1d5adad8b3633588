//! Output directory pre-flight checks.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Why an output directory cannot be used.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("directory `{}` does not exist", .0.display())]
    NotFound(PathBuf),
    #[error("path `{}` is not a directory", .0.display())]
    NotADirectory(PathBuf),
    #[error("directory `{}` is not writable", .0.display())]
    NotWritable(PathBuf),
}

impl DirectoryError {
    pub fn path(&self) -> &Path {
        match self {
            DirectoryError::NotFound(p)
            | DirectoryError::NotADirectory(p)
            | DirectoryError::NotWritable(p) => p,
        }
    }
}

/// Checks that `dir` exists, is a directory, and that files can be created in it.
pub fn assert_writable_directory(dir: &Path) -> Result<(), DirectoryError> {
    let meta = match std::fs::metadata(dir) {
        Ok(m) => m,
        Err(_) => return Err(DirectoryError::NotFound(dir.to_path_buf())),
    };
    if !meta.is_dir() {
        return Err(DirectoryError::NotADirectory(dir.to_path_buf()));
    }
    if !is_writable(dir, &meta) {
        return Err(DirectoryError::NotWritable(dir.to_path_buf()));
    }
    Ok(())
}

#[cfg(unix)]
fn is_writable(dir: &Path, _meta: &std::fs::Metadata) -> bool {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let Ok(c_path) = CString::new(dir.as_os_str().as_bytes()) else {
        return false;
    };
    // Creating entries needs both write and search permission.
    unsafe { libc::access(c_path.as_ptr(), libc::W_OK | libc::X_OK) == 0 }
}

#[cfg(not(unix))]
fn is_writable(_dir: &Path, meta: &std::fs::Metadata) -> bool {
    !meta.permissions().readonly()
}
