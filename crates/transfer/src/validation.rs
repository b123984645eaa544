use buzzer_protocol::PartResult;

use crate::TransferError;

/// Checks that `parts` is exactly part numbers `1..=expected`, ascending.
///
/// The completion endpoint assembles the file from this list, so a gap,
/// duplicate or reordering would produce a broken object server-side.
pub fn validate_part_sequence(parts: &[PartResult], expected: usize) -> Result<(), TransferError> {
    if parts.len() != expected {
        return Err(TransferError::PartSequence(format!(
            "expected {expected} parts, got {}",
            parts.len()
        )));
    }

    for (i, part) in parts.iter().enumerate() {
        let wanted = i + 1;
        if usize::try_from(part.part_number).ok() != Some(wanted) {
            return Err(TransferError::PartSequence(format!(
                "position {wanted} holds part number {}",
                part.part_number
            )));
        }
        if part.etag.is_empty() {
            return Err(TransferError::PartSequence(format!(
                "part {} has an empty etag",
                part.part_number
            )));
        }
    }

    Ok(())
}
