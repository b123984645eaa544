use std::sync::atomic::{AtomicU64, Ordering};

use crate::types::UploadRecord;

/// Receives the running progress of a file after every applied delta.
pub type ProgressCallback = Box<dyn Fn(UploadRecord) + Send + Sync>;

/// Invoked by the transport with the cumulative bytes sent for the current part.
pub type SentCallback = std::sync::Arc<dyn Fn(u64) + Send + Sync>;

/// Bytes gained between two cumulative readings, clamped at zero.
pub fn positive_delta(previous: u64, cumulative: u64) -> u64 {
    cumulative.saturating_sub(previous)
}

/// Accumulates the bytes sent across all parts of one file.
///
/// One tracker exists per file and is dropped with it. All state is
/// atomic, so the transport may report from its own task, repeatedly,
/// or out of order without a lock.
pub struct ProgressTracker {
    total: u64,
    uploaded: AtomicU64,
    /// Highest cumulative value seen for the part in flight.
    part_high_water: AtomicU64,
    sink: Option<ProgressCallback>,
}

impl ProgressTracker {
    /// Creates a tracker for a file of `total` bytes.
    pub fn new(total: u64) -> Self {
        Self {
            total,
            uploaded: AtomicU64::new(0),
            part_high_water: AtomicU64::new(0),
            sink: None,
        }
    }

    /// Forwards every new total to `sink`.
    pub fn with_sink(mut self, sink: ProgressCallback) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Starts accounting for a new part; its cumulative count restarts at 0.
    pub fn begin_part(&self) {
        self.part_high_water.store(0, Ordering::SeqCst);
    }

    /// Applies a cumulative byte count for the current part.
    ///
    /// Only the amount above the highest value seen so far counts, so
    /// repeated or regressing readings leave the total unchanged.
    /// Returns the running total.
    pub fn record_sent(&self, cumulative: u64) -> u64 {
        let previous = self.part_high_water.fetch_max(cumulative, Ordering::SeqCst);
        let delta = positive_delta(previous, cumulative);
        if delta == 0 {
            return self.bytes_uploaded();
        }
        self.on_bytes_sent(delta)
    }

    /// Adds `delta` bytes to the running total and notifies the sink.
    pub fn on_bytes_sent(&self, delta: u64) -> u64 {
        let total = self.uploaded.fetch_add(delta, Ordering::SeqCst) + delta;
        if let Some(sink) = &self.sink {
            sink(UploadRecord {
                bytes_uploaded: total,
                total_bytes: self.total,
            });
        }
        total
    }

    pub fn bytes_uploaded(&self) -> u64 {
        self.uploaded.load(Ordering::SeqCst)
    }

    pub fn total_bytes(&self) -> u64 {
        self.total
    }

    /// Current progress snapshot.
    pub fn record(&self) -> UploadRecord {
        UploadRecord {
            bytes_uploaded: self.bytes_uploaded(),
            total_bytes: self.total,
        }
    }
}
