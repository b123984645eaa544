//! Streaming part transfer.

use std::path::Path;

use buzzer_protocol::PartResult;
use buzzer_transfer::{PartRange, SentCallback, open_range};
use futures_util::TryStreamExt;
use reqwest::header::{CONTENT_LENGTH, COOKIE, ETAG, HeaderMap, HeaderValue, LOCATION};
use reqwest::{Body, Url};
use reqwest::redirect::Policy;
use tokio_util::io::ReaderStream;
use tracing::debug;

use crate::ClientConfig;
use crate::error::ClientError;

/// Maximum redirects followed by a part PUT.
const MAX_REDIRECTS: usize = 10;

/// Uploads single parts to presigned part URLs.
///
/// Performs no chunking: it sends exactly the range it is given.
pub struct PartUploader {
    http: reqwest::Client,
    cookie: HeaderValue,
}

impl PartUploader {
    /// Builds an uploader signing requests with the configured credential.
    ///
    /// Only the connect phase is bounded; a part body may take as long as
    /// the link needs. Redirects are handled by [`Self::upload_part`], since
    /// a streamed body cannot be replayed by the client.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .redirect(Policy::none())
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http,
            cookie: config.credential.header_value()?,
        })
    }

    /// Streams `range` of `path` to `url` and returns the server's part token.
    ///
    /// `on_sent` receives the cumulative number of body bytes handed to the
    /// transport for the current attempt; it restarts from zero when a
    /// redirect is followed. Up to [`MAX_REDIRECTS`] redirects are followed,
    /// each with the same method, headers and body.
    pub async fn upload_part(
        &self,
        path: &Path,
        url: &str,
        range: &PartRange,
        on_sent: SentCallback,
    ) -> Result<PartResult, ClientError> {
        let part = range.index;
        let mut target = Url::parse(url).map_err(|e| ClientError::PartTransfer {
            part,
            reason: format!("invalid part url: {e}"),
        })?;

        for _ in 0..=MAX_REDIRECTS {
            let resp = self
                .send_range(path, target.clone(), range, on_sent.clone())
                .await?;

            let status = resp.status();
            if status.is_redirection() {
                let location = resp
                    .headers()
                    .get(LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .ok_or_else(|| ClientError::PartTransfer {
                        part,
                        reason: format!("server returned {} without a location", status.as_u16()),
                    })?;
                target = target.join(location).map_err(|e| ClientError::PartTransfer {
                    part,
                    reason: format!("invalid redirect location {location:?}: {e}"),
                })?;
                debug!(part, status = status.as_u16(), location = %target, "part redirected");
                continue;
            }

            if !status.is_success() {
                let body = resp.text().await.unwrap_or_default();
                return Err(ClientError::PartTransfer {
                    part,
                    reason: format!("server returned {}: {body}", status.as_u16()),
                });
            }

            let etag = extract_etag(resp.headers()).ok_or(ClientError::MissingETag { part })?;
            debug!(part, etag = %etag, "part uploaded");
            return Ok(PartResult::new(part, etag));
        }

        Err(ClientError::PartTransfer {
            part,
            reason: format!("more than {MAX_REDIRECTS} redirects"),
        })
    }

    /// One PUT attempt over a freshly opened range of the file.
    ///
    /// The file handle lives inside the request body and is closed with it
    /// on every exit path.
    async fn send_range(
        &self,
        path: &Path,
        url: Url,
        range: &PartRange,
        on_sent: SentCallback,
    ) -> Result<reqwest::Response, ClientError> {
        let part = range.index;
        let reader = open_range(path, range).await?;

        let mut sent: u64 = 0;
        let stream = ReaderStream::new(reader).inspect_ok(move |chunk| {
            sent += chunk.len() as u64;
            on_sent(sent);
        });

        debug!(part, start = range.start, end = range.end, url = %url, "uploading part");

        self.http
            .put(url)
            .header(CONTENT_LENGTH, range.len())
            .header(COOKIE, self.cookie.clone())
            .body(Body::wrap_stream(stream))
            .send()
            .await
            .map_err(|e| ClientError::PartTransfer {
                part,
                reason: e.to_string(),
            })
    }
}

/// Reads the `ETag` header (any casing), trimmed but otherwise verbatim.
pub fn extract_etag(headers: &HeaderMap) -> Option<String> {
    headers
        .get(ETAG)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
