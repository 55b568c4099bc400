//! Stream synchronization.
//!
//! Aligns the positional and physiological sample streams of one session
//! onto a single ordered timeline of [`Observation`](crate::models::Observation)s.

pub mod nearest;
pub mod reconcile;

pub use nearest::nearest_timestamp;
pub use reconcile::{reconcile, Timeline};

use thiserror::Error;

/// Errors that can occur while synchronizing sample streams.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The nearest-timestamp search was given no candidates.
    #[error("Nearest timestamp requested from an empty candidate set (target {0})")]
    EmptyCandidates(i64),

    /// A timestamp cannot be represented as a UTC date time.
    #[error("Timestamp {0} is out of range")]
    TimestampOutOfRange(i64),
}
