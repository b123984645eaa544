//! Wire protocol for the Buzzheavier upload API.
//!
//! The API is a mix of htmx form posts (folder creation) and JSON
//! endpoints (upload sessions and completion). Everything that crosses the
//! wire lives here so the client and the wire compatibility tests agree on
//! one definition.

pub mod constants;
pub mod messages;
pub mod types;

// Re-export primary types for convenience.
pub use constants::{CHUNK_SIZE, DEFAULT_BASE_URL, FOLDER_CONFLICT_MARKER};
pub use messages::{CompleteRequest, CompleteResponse, CreateSessionRequest, CreateSessionResponse};
pub use types::{FolderId, InvalidFolderId, PartResult, UploadSession, file_link, folder_link, link_id, normalize_base_url};
