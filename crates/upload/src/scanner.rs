//! Directory listing for directory-mode uploads.
//!
//! Only the top level is considered: sub-directories are reported back
//! as skipped instead of being walked.

use std::path::{Path, PathBuf};

use crate::error::UploadError;

/// Entries of a directory, split into uploadable files and skipped sub-directories.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DirectoryListing {
    /// Regular files in lexicographic file name order.
    pub files: Vec<PathBuf>,
    /// Sub-directories, in the same order.
    pub skipped: Vec<PathBuf>,
}

/// Lists the regular files directly inside `dir`.
///
/// Symlinks are followed. Entries that are neither files nor directories
/// (sockets, broken links) are ignored.
pub fn scan_directory(dir: &Path) -> Result<DirectoryListing, UploadError> {
    if !dir.is_dir() {
        return Err(UploadError::NotADirectory(dir.to_path_buf()));
    }

    let mut entries = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()?;
    entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let mut listing = DirectoryListing::default();
    for path in entries {
        let Ok(metadata) = std::fs::metadata(&path) else {
            continue;
        };
        if metadata.is_dir() {
            listing.skipped.push(path);
        } else if metadata.is_file() {
            listing.files.push(path);
        }
    }

    Ok(listing)
}

/// Upload name of a file: its base name.
pub fn upload_name(path: &Path) -> Result<String, UploadError> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| UploadError::InvalidFileName(path.to_path_buf()))
}
