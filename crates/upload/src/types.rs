//! Data types for the upload flow.

use std::path::PathBuf;

use buzzer_protocol::link_id;
use buzzer_transfer::UploadRecord;

/// Lifecycle of one file's upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileState {
    Init,
    SessionOpened,
    PartsInFlight,
    Committed,
    Failed,
}

impl FileState {
    pub fn is_terminal(self) -> bool {
        matches!(self, FileState::Committed | FileState::Failed)
    }
}

/// Event emitted during an upload run.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadEvent {
    /// A session was opened and parts are about to be sent.
    FileStarted {
        file_name: String,
        total_bytes: u64,
        parts: usize,
    },
    /// Running byte count of the active file.
    Progress {
        file_name: String,
        record: UploadRecord,
    },
    /// One part was accepted by the server.
    PartUploaded {
        file_name: String,
        part_number: u32,
        parts: usize,
    },
    /// The file was committed and is reachable at `link`.
    FileCommitted { file_name: String, link: String },
    /// A sub-directory was left out of a directory upload.
    SkippedDirectory { path: PathBuf },
    /// The file failed; the run stops.
    Failed { file_name: String, error: String },
}

/// Result of a committed upload, as presented to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    /// Last path segment of `link`.
    pub file_id: String,
    pub file_name: String,
    pub link: String,
}

impl UploadOutcome {
    pub fn new(link: String, file_name: String) -> Self {
        Self {
            file_id: link_id(&link).to_string(),
            file_name,
            link,
        }
    }
}

/// Result of a directory upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryOutcome {
    /// Points at the folder: `{base}/d/{folder}`.
    pub summary: UploadOutcome,
    /// Uploaded files, in upload order.
    pub files: Vec<UploadOutcome>,
    pub skipped: Vec<PathBuf>,
}
