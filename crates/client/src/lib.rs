//! Authenticated HTTP client for the Buzzheavier upload API.
//!
//! [`SessionClient`] talks to the folder and session endpoints,
//! [`PartUploader`] streams part bodies to the presigned part URLs. Both
//! are built from one immutable [`ClientConfig`].

pub mod credential;
pub mod error;
pub mod part;
pub mod session;

#[cfg(test)]
pub(crate) mod mock;

use std::time::Duration;

pub use credential::Credential;
pub use error::ClientError;
pub use part::{PartUploader, extract_etag};
pub use session::{SessionClient, extract_folder_id};

use buzzer_protocol::{DEFAULT_BASE_URL, normalize_base_url};

/// Default bound for folder, session and commit requests.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Default bound for establishing a connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Immutable settings shared by every request of a run.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub credential: Credential,
    /// Total timeout for API calls. Part uploads are never bounded by it.
    pub request_timeout: Option<Duration>,
    pub connect_timeout: Duration,
}

impl ClientConfig {
    /// Settings for the public endpoint with default timeouts.
    pub fn new(credential: Credential) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credential,
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = normalize_base_url(base_url);
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}
