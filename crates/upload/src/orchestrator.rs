//! Upload orchestrator for single files and directories.
//!
//! Files are uploaded one at a time; the first failure ends the run.

use std::path::Path;
use std::sync::Arc;

use buzzer_protocol::{CHUNK_SIZE, FolderId, folder_link};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::api::UploadApi;
use crate::error::UploadError;
use crate::file::FileUpload;
use crate::scanner::{scan_directory, upload_name};
use crate::types::{DirectoryOutcome, UploadEvent, UploadOutcome};

/// Sequences folder creation and per-file uploads against an [`UploadApi`].
pub struct UploadOrchestrator {
    api: Arc<dyn UploadApi>,
    events_tx: mpsc::Sender<UploadEvent>,
    events_rx: Option<mpsc::Receiver<UploadEvent>>,
    chunk_size: u64,
}

impl UploadOrchestrator {
    pub fn new(api: Arc<dyn UploadApi>) -> Self {
        let (events_tx, events_rx) = mpsc::channel(256);
        Self {
            api,
            events_tx,
            events_rx: Some(events_rx),
            chunk_size: CHUNK_SIZE,
        }
    }

    #[cfg(test)]
    fn with_chunk_size(mut self, chunk_size: u64) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Takes the event receiver. Can only be called once.
    pub fn take_events(&mut self) -> Option<mpsc::Receiver<UploadEvent>> {
        self.events_rx.take()
    }

    /// Creates the remote folder a directory upload lands in.
    ///
    /// A name conflict or an unreadable response is returned as
    /// [`UploadError::FolderNeedsOperator`]: the run can go on once an
    /// operator supplies an existing folder id.
    pub async fn prepare_folder(&self, name: &str) -> Result<FolderId, UploadError> {
        match self.api.create_folder(name).await {
            Ok(folder) => {
                info!(folder_name = name, folder = %folder, "folder ready");
                Ok(folder)
            }
            Err(e) if e.is_recoverable() => {
                warn!(folder_name = name, error = %e, "folder needs an operator-supplied id");
                Err(UploadError::FolderNeedsOperator(e))
            }
            Err(e) => Err(UploadError::Folder(e)),
        }
    }

    /// Uploads one file into `folder`.
    pub async fn upload_file(
        &self,
        path: &Path,
        folder: &FolderId,
    ) -> Result<UploadOutcome, UploadError> {
        let mut upload = FileUpload::prepare(self.api.as_ref(), path, self.events_tx.clone())
            .await?
            .with_chunk_size(self.chunk_size);
        upload.run(folder).await
    }

    /// Uploads every regular file directly inside `dir` into `folder`.
    ///
    /// Sub-directories are reported as [`UploadEvent::SkippedDirectory`]
    /// before any file is sent. Files go in file name order and the
    /// first failure aborts the remaining ones.
    pub async fn upload_directory(
        &self,
        dir: &Path,
        folder: &FolderId,
    ) -> Result<DirectoryOutcome, UploadError> {
        let listing = scan_directory(dir)?;

        for path in &listing.skipped {
            warn!(path = %path.display(), "skipping sub-directory");
            let _ = self.events_tx.try_send(UploadEvent::SkippedDirectory { path: path.clone() });
        }

        info!(
            dir = %dir.display(),
            folder = %folder,
            files = listing.files.len(),
            skipped = listing.skipped.len(),
            "uploading directory"
        );

        let mut files = Vec::with_capacity(listing.files.len());
        for path in &listing.files {
            files.push(self.upload_file(path, folder).await?);
        }

        let summary = UploadOutcome::new(
            folder_link(self.api.base_url(), folder),
            directory_name(dir)?,
        );

        Ok(DirectoryOutcome {
            summary,
            files,
            skipped: listing.skipped,
        })
    }
}

/// Name used for the remote folder of a directory upload.
///
/// Paths without a final component (`.`, `..`) are resolved first.
pub fn directory_name(dir: &Path) -> Result<String, UploadError> {
    match upload_name(dir) {
        Ok(name) if name != "." && name != ".." => Ok(name),
        _ => upload_name(&std::fs::canonicalize(dir)?),
    }
}
