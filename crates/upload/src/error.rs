//! Upload error types.

use std::path::PathBuf;

use buzzer_client::ClientError;
use buzzer_transfer::TransferError;

/// Errors produced while uploading a file or a directory.
///
/// Everything except [`UploadError::FolderNeedsOperator`] ends the run.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{}: not a regular file", .0.display())]
    NotAFile(PathBuf),

    #[error("{}: not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("{}: file name is not valid UTF-8", .0.display())]
    InvalidFileName(PathBuf),

    #[error("folder needs an operator-supplied id: {0}")]
    FolderNeedsOperator(#[source] ClientError),

    #[error("folder creation failed: {0}")]
    Folder(#[source] ClientError),

    #[error("{file}: session request failed: {source}")]
    Session { file: String, source: ClientError },

    #[error("{file}: part {part} failed: {source}")]
    Part {
        file: String,
        part: u32,
        source: ClientError,
    },

    #[error("{file}: commit failed: {source}")]
    Commit { file: String, source: ClientError },

    #[error("transfer error: {0}")]
    Transfer(#[from] TransferError),
}

impl UploadError {
    /// True when the run can continue once an operator supplies a folder id.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, UploadError::FolderNeedsOperator(_))
    }
}
