//! Nearest-timestamp search.

use super::SyncError;

/// Returns the candidate closest to `target`.
///
/// Candidates are scanned in the given (ascending) order and the first
/// strict minimizer of the distance wins ties. The running best starts at
/// `0`, so a candidate is only chosen when it is strictly closer to `target`
/// than `0` is. For ordinary epoch timestamps this never matters.
///
/// # Errors
///
/// Returns [`SyncError::EmptyCandidates`] if `candidates` is empty.
///
/// # Example
///
/// ```
/// use shared::sync::nearest_timestamp;
///
/// assert_eq!(nearest_timestamp(1400, &[1000, 2000]).unwrap(), 1000);
/// assert_eq!(nearest_timestamp(1500, &[1000, 2000]).unwrap(), 1000);
/// assert_eq!(nearest_timestamp(1600, &[1000, 2000]).unwrap(), 2000);
/// ```
pub fn nearest_timestamp(target: i64, candidates: &[i64]) -> Result<i64, SyncError> {
    if candidates.is_empty() {
        return Err(SyncError::EmptyCandidates(target));
    }

    let closest = candidates.iter().fold(0_i64, |best, &candidate| {
        if candidate.abs_diff(target) < best.abs_diff(target) {
            candidate
        } else {
            best
        }
    });

    Ok(closest)
}
