use thiserror::Error;

use crate::race::model::{TargetTime, WallClockTime};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum ResolveError {
    #[error("Invalid Start Time: the selected start time is in the past")]
    InvalidStartTime { target_secs: u32, now_secs: u32 },
}

/// Seconds from `now` until `target`, both read as times of the same day.
///
/// A target at or before `now` is rejected rather than rolled over to the
/// next day.
pub fn resolve(target: &TargetTime, now: &WallClockTime) -> Result<u32, ResolveError> {
    let target_secs = target.seconds_since_midnight();
    let now_secs = now.seconds_since_midnight();
    if target_secs <= now_secs {
        return Err(ResolveError::InvalidStartTime {
            target_secs,
            now_secs,
        });
    }
    Ok(target_secs - now_secs)
}
