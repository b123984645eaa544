//! Folder, session and commit requests.

use std::sync::OnceLock;

use buzzer_protocol::constants::{
    DIRECTORY_ID_PARAM, FOLDER_NAME_FIELD, HX_CURRENT_URL, HX_REQUEST, HX_TARGET,
    HX_TARGET_VALUE, HX_TRIGGER, HX_TRIGGER_CREATE_DIRECTORY,
};
use buzzer_protocol::types::{folder_endpoint, session_endpoint};
use buzzer_protocol::{
    CHUNK_SIZE, CompleteRequest, CompleteResponse, CreateSessionRequest, CreateSessionResponse,
    FOLDER_CONFLICT_MARKER, FolderId, PartResult, UploadSession, file_link,
};
use buzzer_transfer::{part_count, validate_part_sequence};
use regex::Regex;
use reqwest::header::{COOKIE, HeaderMap};
use tracing::{debug, info};

use crate::ClientConfig;
use crate::error::ClientError;

/// Authenticated client for the folder and session endpoints.
pub struct SessionClient {
    http: reqwest::Client,
    base_url: String,
}

impl SessionClient {
    /// Builds a client that signs every request with the configured credential.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, config.credential.header_value()?);

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(config.connect_timeout);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Creates a remote folder and returns its id.
    ///
    /// The endpoint answers with an HTML fragment, so the id is scraped
    /// from the text. A taken name yields [`ClientError::NameConflict`] and
    /// a page without an id yields [`ClientError::FolderIdNotFound`]; both
    /// need an operator-supplied id, no alternate name is tried.
    pub async fn create_folder(&self, name: &str) -> Result<FolderId, ClientError> {
        let url = folder_endpoint(&self.base_url);
        let form = reqwest::multipart::Form::new().text(FOLDER_NAME_FIELD, name.to_string());

        let resp = self
            .http
            .post(&url)
            .header(HX_CURRENT_URL, url.as_str())
            .header(HX_REQUEST, "true")
            .header(HX_TARGET, HX_TARGET_VALUE)
            .header(HX_TRIGGER, HX_TRIGGER_CREATE_DIRECTORY)
            .multipart(form)
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;

        if body.contains(FOLDER_CONFLICT_MARKER) {
            return Err(ClientError::NameConflict {
                name: name.to_string(),
            });
        }
        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let extracted = extract_folder_id(&body).map(str::to_owned);
        match extracted.and_then(|id| FolderId::parse(&id).ok()) {
            Some(folder) => {
                info!(folder_name = name, folder = %folder, "folder created");
                Ok(folder)
            }
            None => Err(ClientError::FolderIdNotFound { body }),
        }
    }

    /// Requests an upload session for a file of `size` bytes.
    ///
    /// The server must return one part URL per [`CHUNK_SIZE`] slice.
    pub async fn open_session(
        &self,
        file_name: &str,
        size: u64,
    ) -> Result<UploadSession, ClientError> {
        let req = CreateSessionRequest {
            name: file_name.to_string(),
            size,
        };
        let resp = self
            .http
            .post(session_endpoint(&self.base_url, None))
            .json(&req)
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(ClientError::Session(format!(
                "server returned {}: {body}",
                status.as_u16()
            )));
        }

        let parsed: CreateSessionResponse = serde_json::from_str(&body)
            .map_err(|e| ClientError::Session(format!("malformed response: {e}")))?;

        let expected = part_count(size, CHUNK_SIZE);
        if parsed.upload_urls.len() as u64 != expected {
            return Err(ClientError::Session(format!(
                "expected {expected} part urls for {size} bytes, got {}",
                parsed.upload_urls.len()
            )));
        }

        debug!(
            file = file_name,
            upload_id = %parsed.upload_id,
            parts = parsed.upload_urls.len(),
            "session opened"
        );

        Ok(UploadSession {
            session_id: parsed.upload_id,
            part_urls: parsed.upload_urls,
        })
    }

    /// Finalizes a session into `{base}/{id}`.
    ///
    /// Issued exactly once per session; a rejected commit leaves the
    /// uploaded parts orphaned server-side.
    pub async fn commit(
        &self,
        session_id: &str,
        folder: &FolderId,
        parts: &[PartResult],
    ) -> Result<String, ClientError> {
        validate_part_sequence(parts, parts.len())
            .map_err(|e| ClientError::Commit(e.to_string()))?;

        let req = CompleteRequest {
            directory_id: folder.to_string(),
            parts: parts.to_vec(),
        };
        let resp = self
            .http
            .post(session_endpoint(&self.base_url, Some(session_id)))
            .query(&[(DIRECTORY_ID_PARAM, folder.as_str())])
            .json(&req)
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(ClientError::Commit(format!(
                "server returned {}: {body}",
                status.as_u16()
            )));
        }

        let parsed: CompleteResponse = serde_json::from_str(&body)
            .map_err(|e| ClientError::Commit(format!("malformed response: {e}")))?;

        let link = file_link(&self.base_url, &parsed.id);
        info!(upload_id = session_id, folder = %folder, link = %link, "upload committed");
        Ok(link)
    }
}

/// Finds the first 12-character lowercase alphanumeric run in `text`.
pub fn extract_folder_id(text: &str) -> Option<&str> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| {
        Regex::new(r"(?P<id>[a-z0-9]{12})").expect("folder id pattern is valid")
    });
    pattern
        .captures(text)
        .and_then(|caps| caps.name("id"))
        .map(|m| m.as_str())
}
