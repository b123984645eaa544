//! Part planning, ranged reads and progress accounting for chunked uploads.
//!
//! A file is split into fixed-size [`PartRange`]s, each range is read
//! straight from disk when its part is transferred, and the bytes the
//! transport reports are folded into one [`ProgressTracker`] per file.

mod chunked;
mod progress;
mod types;
mod validation;

pub use chunked::{RangeReader, open_range, part_count, plan_parts};
pub use progress::{ProgressCallback, ProgressTracker, SentCallback, positive_delta};
pub use types::{PartRange, UploadRecord};
pub use validation::validate_part_sequence;

pub use buzzer_protocol::CHUNK_SIZE;

/// Errors produced by the transfer crate.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid part sequence: {0}")]
    PartSequence(String),

    #[error("part count {0} exceeds the supported maximum")]
    TooManyParts(u64),
}
