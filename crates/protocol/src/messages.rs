use serde::{Deserialize, Serialize};

use crate::types::PartResult;

// ---------------------------------------------------------------------------
// Request payloads
// ---------------------------------------------------------------------------

/// Body of `POST {base}/f/`: asks for an upload session sized to a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    pub name: String,
    pub size: u64,
}

/// Body of `POST {base}/f/{uploadId}?directoryId={folder}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteRequest {
    pub directory_id: String,
    pub parts: Vec<PartResult>,
}

// ---------------------------------------------------------------------------
// Response payloads
// ---------------------------------------------------------------------------

/// Session issued by the server: one presigned URL per part, in part order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    pub upload_id: String,
    pub upload_urls: Vec<String>,
}

/// Completion result. The file is reachable at `{base}/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteResponse {
    pub id: String,
}
