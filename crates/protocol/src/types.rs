use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{FILE_PATH, FOLDER_PATH};

/// Identifier of a remote folder, as used in `{base}/d/{id}` links.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FolderId(String);

/// Error returned when an operator-supplied folder id is blank.
#[derive(Debug, thiserror::Error)]
#[error("folder id must not be empty")]
pub struct InvalidFolderId;

impl FolderId {
    /// Parses a folder id, trimming surrounding whitespace.
    pub fn parse(raw: &str) -> Result<Self, InvalidFolderId> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InvalidFolderId);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An upload session: created once per file, consumed by the part loop.
///
/// `part_urls[i]` is the destination of part number `i + 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSession {
    pub session_id: String,
    pub part_urls: Vec<String>,
}

impl UploadSession {
    /// Number of parts the server expects.
    pub fn part_count(&self) -> usize {
        self.part_urls.len()
    }

    /// Destination URL of a 1-based part number.
    pub fn url_for(&self, part_number: u32) -> Option<&str> {
        let index = usize::try_from(part_number).ok()?.checked_sub(1)?;
        self.part_urls.get(index).map(String::as_str)
    }
}

/// Token proving a part landed on the server.
///
/// Serialized with the S3-style keys the completion endpoint expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartResult {
    #[serde(rename = "ETag")]
    pub etag: String,
    #[serde(rename = "PartNumber")]
    pub part_number: u32,
}

impl PartResult {
    pub fn new(part_number: u32, etag: impl Into<String>) -> Self {
        Self {
            etag: etag.into(),
            part_number,
        }
    }
}

/// Strips trailing slashes so paths can be appended with `format!`.
pub fn normalize_base_url(base: &str) -> String {
    base.trim_end_matches('/').to_string()
}

/// Link of an uploaded file: `{base}/{id}`.
pub fn file_link(base: &str, id: &str) -> String {
    format!("{}/{id}", normalize_base_url(base))
}

/// Link of a folder: `{base}/d/{folder}`.
pub fn folder_link(base: &str, folder: &FolderId) -> String {
    format!("{}{FOLDER_PATH}{folder}", normalize_base_url(base))
}

/// Session endpoint, or the completion endpoint of `upload_id` when given.
pub fn session_endpoint(base: &str, upload_id: Option<&str>) -> String {
    let base = normalize_base_url(base);
    match upload_id {
        Some(id) => format!("{base}{FILE_PATH}{id}"),
        None => format!("{base}{FILE_PATH}"),
    }
}

/// Folder creation endpoint.
pub fn folder_endpoint(base: &str) -> String {
    format!("{}{FOLDER_PATH}", normalize_base_url(base))
}

/// Last non-empty path segment of a link (the file or folder id).
pub fn link_id(link: &str) -> &str {
    link.trim_end_matches('/').rsplit('/').next().unwrap_or(link)
}
