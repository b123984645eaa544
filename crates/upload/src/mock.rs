//! Scripted [`UploadApi`] for orchestration tests.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use buzzer_client::ClientError;
use buzzer_protocol::{FolderId, PartResult, UploadSession};
use buzzer_transfer::{PartRange, SentCallback, part_count};

use crate::api::{ApiFuture, UploadApi};

pub(crate) const BASE: &str = "https://buzz.test";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UploadedPart {
    pub path: PathBuf,
    pub url: String,
    pub range: PartRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Commit {
    pub session_id: String,
    pub folder: FolderId,
    pub parts: Vec<PartResult>,
}

/// Records every call; failures are opt-in per operation.
pub(crate) struct MockApi {
    chunk_size: u64,
    pub folder_error: Mutex<Option<ClientError>>,
    pub session_error: Mutex<Option<ClientError>>,
    /// Replaces the correct number of part urls.
    pub url_count: Mutex<Option<usize>>,
    /// Part number answered without an etag.
    pub missing_etag_part: Mutex<Option<u32>>,
    pub commit_error: Mutex<Option<ClientError>>,
    pub folders: Mutex<Vec<String>>,
    pub sessions: Mutex<Vec<(String, u64)>>,
    pub uploads: Mutex<Vec<UploadedPart>>,
    pub commits: Mutex<Vec<Commit>>,
}

impl MockApi {
    pub fn new(chunk_size: u64) -> Self {
        Self {
            chunk_size,
            folder_error: Mutex::new(None),
            session_error: Mutex::new(None),
            url_count: Mutex::new(None),
            missing_etag_part: Mutex::new(None),
            commit_error: Mutex::new(None),
            folders: Mutex::new(Vec::new()),
            sessions: Mutex::new(Vec::new()),
            uploads: Mutex::new(Vec::new()),
            commits: Mutex::new(Vec::new()),
        }
    }

    pub fn uploaded_files(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for upload in self.uploads.lock().unwrap().iter() {
            let name = upload.path.file_name().unwrap().to_string_lossy().into_owned();
            if names.last() != Some(&name) {
                names.push(name);
            }
        }
        names
    }
}

impl UploadApi for MockApi {
    fn base_url(&self) -> &str {
        BASE
    }

    fn create_folder<'a>(&'a self, name: &'a str) -> ApiFuture<'a, FolderId> {
        Box::pin(async move {
            self.folders.lock().unwrap().push(name.to_string());
            match self.folder_error.lock().unwrap().take() {
                Some(err) => Err(err),
                None => Ok(FolderId::parse("abcdefghij12").unwrap()),
            }
        })
    }

    fn open_session<'a>(&'a self, file_name: &'a str, size: u64) -> ApiFuture<'a, UploadSession> {
        Box::pin(async move {
            self.sessions
                .lock()
                .unwrap()
                .push((file_name.to_string(), size));
            if let Some(err) = self.session_error.lock().unwrap().take() {
                return Err(err);
            }
            let count = self
                .url_count
                .lock()
                .unwrap()
                .unwrap_or(part_count(size, self.chunk_size) as usize);
            Ok(UploadSession {
                session_id: format!("session-{file_name}"),
                part_urls: (1..=count)
                    .map(|n| format!("https://s3.test/{file_name}?partNumber={n}"))
                    .collect(),
            })
        })
    }

    fn upload_part<'a>(
        &'a self,
        path: &'a Path,
        url: &'a str,
        range: PartRange,
        on_sent: SentCallback,
    ) -> ApiFuture<'a, PartResult> {
        Box::pin(async move {
            self.uploads.lock().unwrap().push(UploadedPart {
                path: path.to_path_buf(),
                url: url.to_string(),
                range,
            });

            // A noisy transport: repeats, regressions, and a restart from zero.
            let len = range.len();
            for cumulative in [len / 2, len / 4, len / 2, 0, len, len] {
                on_sent(cumulative);
            }

            if *self.missing_etag_part.lock().unwrap() == Some(range.index) {
                return Err(ClientError::MissingETag { part: range.index });
            }
            Ok(PartResult::new(range.index, format!("\"etag-{}\"", range.index)))
        })
    }

    fn commit<'a>(
        &'a self,
        session_id: &'a str,
        folder: &'a FolderId,
        parts: &'a [PartResult],
    ) -> ApiFuture<'a, String> {
        Box::pin(async move {
            self.commits.lock().unwrap().push(Commit {
                session_id: session_id.to_string(),
                folder: folder.clone(),
                parts: parts.to_vec(),
            });
            if let Some(err) = self.commit_error.lock().unwrap().take() {
                return Err(err);
            }
            Ok(format!("{BASE}/{session_id}-id"))
        })
    }
}
