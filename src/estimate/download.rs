use crate::error::CalcError;
use serde::Serialize;

const SECS_PER_HOUR: u64 = 3600;
const SECS_PER_MINUTE: u64 = 60;

/// Elapsed time split into whole hours, minutes and seconds.
///
/// `minutes` and `seconds` are always below 60.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Duration {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Duration {
    pub fn from_secs(total: u64) -> Self {
        Self {
            hours: total / SECS_PER_HOUR,
            minutes: (total % SECS_PER_HOUR) / SECS_PER_MINUTE,
            seconds: total % SECS_PER_MINUTE,
        }
    }

    pub fn total_seconds(&self) -> u64 {
        self.hours
            .saturating_mul(SECS_PER_HOUR)
            .saturating_add(self.minutes * SECS_PER_MINUTE)
            .saturating_add(self.seconds)
    }
}

/// Time needed to move `size` bytes at `speed` bytes per second.
///
/// Sub-second remainders are truncated, never rounded up.
pub fn compute_download_time(size: f64, speed: f64) -> Result<Duration, CalcError> {
    // NaN fails both comparisons
    if !(speed > 0.0) {
        return Err(CalcError::InvalidSpeed);
    }
    if !(size >= 0.0) {
        return Err(CalcError::InvalidSize);
    }

    let total = size / speed;
    if !total.is_finite() || total >= u64::MAX as f64 {
        return Err(CalcError::Overflow);
    }

    Ok(Duration::from_secs(total as u64))
}
