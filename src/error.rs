use thiserror::Error;

use crate::track::PointId;

/// Rejected editing or playback requests.
///
/// Geometric degeneracies never surface here; they are absorbed by fallbacks
/// in the framing code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackError {
    #[error("track point {0} not found")]
    PointNotFound(PointId),

    #[error("a ride needs at least 2 track points, found {found}")]
    NotEnoughPoints { found: usize },
}

impl TrackError {
    /// Status code used across the C ABI.
    pub fn code(&self) -> i32 {
        match self {
            TrackError::PointNotFound(_) => -4,
            TrackError::NotEnoughPoints { .. } => -2,
        }
    }
}
