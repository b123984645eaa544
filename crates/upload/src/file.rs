//! Per-file upload state machine.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use buzzer_client::ClientError;
use buzzer_protocol::{CHUNK_SIZE, FolderId, PartResult};
use buzzer_transfer::{ProgressTracker, SentCallback, UploadRecord, plan_parts, validate_part_sequence};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::api::UploadApi;
use crate::error::UploadError;
use crate::scanner::upload_name;
use crate::types::{FileState, UploadEvent, UploadOutcome};

/// Upload of a single file: `Init → SessionOpened → PartsInFlight → Committed | Failed`.
///
/// Owns the file's progress tracker; nothing here outlives the file.
pub struct FileUpload<'a> {
    api: &'a dyn UploadApi,
    events_tx: mpsc::Sender<UploadEvent>,
    path: PathBuf,
    file_name: String,
    size: u64,
    chunk_size: u64,
    state: FileState,
    tracker: Arc<ProgressTracker>,
}

impl<'a> FileUpload<'a> {
    /// Enters `Init`: stats the file and fixes its size for the whole upload.
    pub async fn prepare(
        api: &'a dyn UploadApi,
        path: &Path,
        events_tx: mpsc::Sender<UploadEvent>,
    ) -> Result<Self, UploadError> {
        let metadata = tokio::fs::metadata(path).await?;
        if !metadata.is_file() {
            return Err(UploadError::NotAFile(path.to_path_buf()));
        }
        let file_name = upload_name(path)?;
        let size = metadata.len();

        let tracker = {
            let tx = events_tx.clone();
            let name = file_name.clone();
            ProgressTracker::new(size).with_sink(Box::new(move |record| {
                let _ = tx.try_send(UploadEvent::Progress {
                    file_name: name.clone(),
                    record,
                });
            }))
        };

        debug!(file = %file_name, size, "file prepared");

        Ok(Self {
            api,
            events_tx,
            path: path.to_path_buf(),
            file_name,
            size,
            chunk_size: CHUNK_SIZE,
            state: FileState::Init,
            tracker: Arc::new(tracker),
        })
    }

    /// Overrides the part size. Only tests use anything but [`CHUNK_SIZE`].
    pub(crate) fn with_chunk_size(mut self, chunk_size: u64) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn state(&self) -> FileState {
        self.state
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Bytes sent so far for this file.
    pub fn progress(&self) -> UploadRecord {
        self.tracker.record()
    }

    /// Runs the upload to a terminal state.
    ///
    /// Any failure leaves the upload in [`FileState::Failed`]: no further
    /// part is sent and no commit is attempted.
    pub async fn run(&mut self, folder: &FolderId) -> Result<UploadOutcome, UploadError> {
        let result = self.drive(folder).await;
        if let Err(e) = &result {
            self.transition(FileState::Failed);
            error!(file = %self.file_name, error = %e, "upload failed");
            self.emit(UploadEvent::Failed {
                file_name: self.file_name.clone(),
                error: e.to_string(),
            });
        }
        result
    }

    async fn drive(&mut self, folder: &FolderId) -> Result<UploadOutcome, UploadError> {
        let session = self
            .api
            .open_session(&self.file_name, self.size)
            .await
            .map_err(|source| self.session_error(source))?;
        self.transition(FileState::SessionOpened);

        let ranges = plan_parts(self.size, self.chunk_size)?;
        if ranges.len() != session.part_count() {
            return Err(self.session_error(ClientError::Session(format!(
                "{} part urls issued for {} parts",
                session.part_count(),
                ranges.len()
            ))));
        }

        self.emit(UploadEvent::FileStarted {
            file_name: self.file_name.clone(),
            total_bytes: self.size,
            parts: ranges.len(),
        });
        self.transition(FileState::PartsInFlight);

        let mut parts: Vec<PartResult> = Vec::with_capacity(ranges.len());
        for range in ranges.iter().copied() {
            let url = session.url_for(range.index).ok_or_else(|| {
                self.session_error(ClientError::Session(format!(
                    "no url for part {}",
                    range.index
                )))
            })?;

            self.tracker.begin_part();
            let tracker = Arc::clone(&self.tracker);
            let on_sent: SentCallback = Arc::new(move |cumulative| {
                tracker.record_sent(cumulative);
            });

            let result = self
                .api
                .upload_part(&self.path, url, range, on_sent)
                .await
                .map_err(|source| UploadError::Part {
                    file: self.file_name.clone(),
                    part: range.index,
                    source,
                })?;

            // The part is on the server; settle any bytes the transport never reported.
            self.tracker.record_sent(range.len());
            parts.push(result);

            self.emit(UploadEvent::PartUploaded {
                file_name: self.file_name.clone(),
                part_number: range.index,
                parts: ranges.len(),
            });
        }

        validate_part_sequence(&parts, session.part_count()).map_err(|e| UploadError::Commit {
            file: self.file_name.clone(),
            source: ClientError::Commit(e.to_string()),
        })?;

        let link = self
            .api
            .commit(&session.session_id, folder, &parts)
            .await
            .map_err(|source| UploadError::Commit {
                file: self.file_name.clone(),
                source,
            })?;
        self.transition(FileState::Committed);

        info!(file = %self.file_name, link = %link, parts = parts.len(), "file uploaded");
        self.emit(UploadEvent::FileCommitted {
            file_name: self.file_name.clone(),
            link: link.clone(),
        });

        Ok(UploadOutcome::new(link, self.file_name.clone()))
    }

    fn session_error(&self, source: ClientError) -> UploadError {
        UploadError::Session {
            file: self.file_name.clone(),
            source,
        }
    }

    fn transition(&mut self, next: FileState) {
        debug!(file = %self.file_name, from = ?self.state, to = ?next, "state transition");
        self.state = next;
    }

    fn emit(&self, event: UploadEvent) {
        let _ = self.events_tx.try_send(event);
    }
}
