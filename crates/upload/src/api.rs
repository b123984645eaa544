//! Remote API seam.
//!
//! `UploadApi` is implemented by [`HttpApi`] for real runs. Keeping the
//! orchestration behind a trait lets it be exercised with mocks.

use std::future::Future;
use std::path::Path;
use std::pin::Pin;

use buzzer_client::{ClientConfig, ClientError, PartUploader, SessionClient};
use buzzer_protocol::{FolderId, PartResult, UploadSession};
use buzzer_transfer::{PartRange, SentCallback};

/// Boxed future returned by [`UploadApi`] methods.
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ClientError>> + Send + 'a>>;

/// Operations the orchestration needs from the remote service.
pub trait UploadApi: Send + Sync {
    /// Base URL links are built from.
    fn base_url(&self) -> &str;

    /// Creates a remote folder.
    fn create_folder<'a>(&'a self, name: &'a str) -> ApiFuture<'a, FolderId>;

    /// Requests an upload session sized to `size` bytes.
    fn open_session<'a>(&'a self, file_name: &'a str, size: u64) -> ApiFuture<'a, UploadSession>;

    /// Transfers one part; `on_sent` receives cumulative byte counts.
    fn upload_part<'a>(
        &'a self,
        path: &'a Path,
        url: &'a str,
        range: PartRange,
        on_sent: SentCallback,
    ) -> ApiFuture<'a, PartResult>;

    /// Finalizes a session and returns the file link.
    fn commit<'a>(
        &'a self,
        session_id: &'a str,
        folder: &'a FolderId,
        parts: &'a [PartResult],
    ) -> ApiFuture<'a, String>;
}

/// [`UploadApi`] over HTTP.
pub struct HttpApi {
    sessions: SessionClient,
    parts: PartUploader,
}

impl HttpApi {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        Ok(Self {
            sessions: SessionClient::new(config)?,
            parts: PartUploader::new(config)?,
        })
    }
}

impl UploadApi for HttpApi {
    fn base_url(&self) -> &str {
        self.sessions.base_url()
    }

    fn create_folder<'a>(&'a self, name: &'a str) -> ApiFuture<'a, FolderId> {
        Box::pin(self.sessions.create_folder(name))
    }

    fn open_session<'a>(&'a self, file_name: &'a str, size: u64) -> ApiFuture<'a, UploadSession> {
        Box::pin(self.sessions.open_session(file_name, size))
    }

    fn upload_part<'a>(
        &'a self,
        path: &'a Path,
        url: &'a str,
        range: PartRange,
        on_sent: SentCallback,
    ) -> ApiFuture<'a, PartResult> {
        Box::pin(async move { self.parts.upload_part(path, url, &range, on_sent).await })
    }

    fn commit<'a>(
        &'a self,
        session_id: &'a str,
        folder: &'a FolderId,
        parts: &'a [PartResult],
    ) -> ApiFuture<'a, String> {
        Box::pin(self.sessions.commit(session_id, folder, parts))
    }
}
