use std::io::SeekFrom;
use std::path::Path;

use tokio::io::{AsyncReadExt, AsyncSeekExt};

use crate::types::PartRange;
use crate::{CHUNK_SIZE, TransferError};

/// Reader limited to the bytes of a single part.
pub type RangeReader = tokio::io::Take<tokio::fs::File>;

// ---------------------------------------------------------------------------
// Planning
// ---------------------------------------------------------------------------

/// Number of parts needed for `size` bytes: `ceil(size / chunk_size)`.
///
/// A `chunk_size` of 0 falls back to [`CHUNK_SIZE`].
pub fn part_count(size: u64, chunk_size: u64) -> u64 {
    size.div_ceil(effective_chunk_size(chunk_size))
}

/// Splits `size` bytes into contiguous part ranges numbered from 1.
///
/// Every range is `chunk_size` long except the last, which holds the
/// remainder. An empty file yields no parts.
pub fn plan_parts(size: u64, chunk_size: u64) -> Result<Vec<PartRange>, TransferError> {
    let chunk_size = effective_chunk_size(chunk_size);
    let count = part_count(size, chunk_size);
    if count > u64::from(u32::MAX) {
        return Err(TransferError::TooManyParts(count));
    }

    let parts = (0..count)
        .map(|i| {
            let start = i * chunk_size;
            PartRange {
                // Bounded by the check above.
                index: (i + 1) as u32,
                start,
                end: (start + chunk_size).min(size),
            }
        })
        .collect();
    Ok(parts)
}

fn effective_chunk_size(chunk_size: u64) -> u64 {
    if chunk_size == 0 { CHUNK_SIZE } else { chunk_size }
}

// ---------------------------------------------------------------------------
// Ranged reads
// ---------------------------------------------------------------------------

/// Opens `path` positioned at `range.start`, yielding at most `range.len()` bytes.
///
/// The file handle is owned by the returned reader and closed when it is
/// dropped, whether the transfer finished or failed.
pub async fn open_range(path: &Path, range: &PartRange) -> Result<RangeReader, TransferError> {
    let mut file = tokio::fs::File::open(path).await?;
    file.seek(SeekFrom::Start(range.start)).await?;
    Ok(file.take(range.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const GIB: u64 = 1024 * 1024 * 1024;

    fn create_test_file(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
        let path = dir.join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(data).unwrap();
        path
    }

    #[test]
    fn part_count_rounds_up() {
        assert_eq!(part_count(0, 4), 0);
        assert_eq!(part_count(1, 4), 1);
        assert_eq!(part_count(4, 4), 1);
        assert_eq!(part_count(5, 4), 2);
        assert_eq!(part_count(8, 4), 2);
        assert_eq!(part_count(9, 4), 3);
    }

    #[test]
    fn part_count_zero_chunk_uses_default() {
        assert_eq!(part_count(CHUNK_SIZE + 1, 0), 2);
    }

    #[test]
    fn twelve_gib_file_has_three_parts() {
        let parts = plan_parts(12 * GIB, CHUNK_SIZE).unwrap();
        let sizes: Vec<u64> = parts.iter().map(PartRange::len).collect();
        assert_eq!(sizes, vec![5 * GIB, 5 * GIB, 2 * GIB]);
        let numbers: Vec<u32> = parts.iter().map(|p| p.index).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn exact_multiple_has_no_short_part() {
        let parts = plan_parts(10 * GIB, CHUNK_SIZE).unwrap();
        assert_eq!(parts.len(), 2);
        assert!(parts.iter().all(|p| p.len() == CHUNK_SIZE));
    }

    #[test]
    fn empty_file_has_no_parts() {
        assert!(plan_parts(0, CHUNK_SIZE).unwrap().is_empty());
    }

    #[test]
    fn ranges_are_contiguous_and_cover_file() {
        for (size, chunk) in [(1u64, 1u64), (10, 3), (10, 10), (10, 11), (1000, 7), (4097, 4096)] {
            let parts = plan_parts(size, chunk).unwrap();
            assert_eq!(parts.len() as u64, part_count(size, chunk));
            assert_eq!(parts.first().unwrap().start, 0);
            assert_eq!(parts.last().unwrap().end, size);
            for pair in parts.windows(2) {
                assert_eq!(pair[0].end, pair[1].start, "gap or overlap at {pair:?}");
            }
            let (last, rest) = parts.split_last().unwrap();
            assert!(rest.iter().all(|p| p.len() == chunk));
            assert_eq!(last.len(), size - (parts.len() as u64 - 1) * chunk);
            assert_eq!(parts.iter().map(PartRange::len).sum::<u64>(), size);
        }
    }

    #[tokio::test]
    async fn open_range_reads_exact_slice() {
        let dir = TempDir::new().unwrap();
        let path = create_test_file(dir.path(), "test.bin", b"AABBCCDDEE");

        let parts = plan_parts(10, 4).unwrap();
        let mut collected = Vec::new();
        for part in &parts {
            let mut reader = open_range(&path, part).await.unwrap();
            let mut buf = Vec::new();
            reader.read_to_end(&mut buf).await.unwrap();
            assert_eq!(buf.len() as u64, part.len());
            collected.push(buf);
        }

        assert_eq!(collected[0], b"AABB");
        assert_eq!(collected[1], b"CCDD");
        assert_eq!(collected[2], b"EE");
    }

    #[tokio::test]
    async fn open_range_missing_file_fails() {
        let range = PartRange {
            index: 1,
            start: 0,
            end: 4,
        };
        let result = open_range(Path::new("/nonexistent/buzzer/part.bin"), &range).await;
        assert!(matches!(result, Err(TransferError::Io(_))));
    }
}
