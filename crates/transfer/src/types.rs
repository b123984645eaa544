/// Byte range of one upload part: `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartRange {
    /// 1-based part number.
    pub index: u32,
    pub start: u64,
    /// Exclusive.
    pub end: u64,
}

impl PartRange {
    /// Number of bytes in this part.
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Snapshot of a file's upload progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UploadRecord {
    pub bytes_uploaded: u64,
    pub total_bytes: u64,
}

impl UploadRecord {
    /// Completed fraction in `[0.0, 1.0]`. An empty file counts as complete.
    pub fn fraction(&self) -> f64 {
        if self.total_bytes == 0 {
            return 1.0;
        }
        (self.bytes_uploaded as f64 / self.total_bytes as f64).min(1.0)
    }

    pub fn is_complete(&self) -> bool {
        self.bytes_uploaded >= self.total_bytes
    }
}
