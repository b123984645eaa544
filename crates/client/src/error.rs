//! Client error types.

use buzzer_transfer::TransferError;

/// Errors from the folder, session, part and commit requests.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("invalid credential: cookie token is not a valid header value")]
    InvalidCredential,

    #[error("a folder named {name:?} already exists")]
    NameConflict { name: String },

    #[error("no folder id found in response ({} bytes)", .body.len())]
    FolderIdNotFound { body: String },

    #[error("session error: {0}")]
    Session(String),

    #[error("part {part} transfer failed: {reason}")]
    PartTransfer { part: u32, reason: String },

    #[error("part {part} response has no ETag header")]
    MissingETag { part: u32 },

    #[error("commit failed: {0}")]
    Commit(String),

    #[error("transfer error: {0}")]
    Transfer(#[from] TransferError),
}

impl ClientError {
    /// True when an operator can resolve the condition by supplying a folder id.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ClientError::NameConflict { .. } | ClientError::FolderIdNotFound { .. }
        )
    }
}
