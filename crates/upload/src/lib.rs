//! Upload orchestration for Buzzheavier.
//!
//! This crate implements the **sequencing** of an upload. The HTTP
//! details live in `buzzer-client`; the orchestration only sees them
//! through the [`UploadApi`] trait, which keeps it testable with mocks.
//!
//! # Pipeline (per file)
//!
//! 1. **Init**: stat the file and derive its upload name
//! 2. **Session**: request one part URL per 5 GiB slice
//! 3. **Parts**: PUT each slice in order, one at a time, collecting etags
//! 4. **Commit**: submit the ordered part list and receive the file link
//!
//! Directory mode runs this pipeline for every regular file of one
//! directory, in file name order, and stops at the first failure.

pub mod api;
pub mod error;
pub mod file;
pub mod orchestrator;
pub mod scanner;
pub mod types;

#[cfg(test)]
pub(crate) mod mock;

// Re-export primary types for convenience.
pub use api::{ApiFuture, HttpApi, UploadApi};
pub use error::UploadError;
pub use file::FileUpload;
pub use orchestrator::{UploadOrchestrator, directory_name};
pub use scanner::{DirectoryListing, scan_directory};
pub use types::{DirectoryOutcome, FileState, UploadEvent, UploadOutcome};
