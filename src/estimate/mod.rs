//! Download duration and finish time arithmetic.
//!
//! Everything here is a pure function of its inputs. The only outside
//! dependency, the current instant, comes in through [`Clock`].

pub mod download;
pub mod finish;
pub mod format;

pub use download::{Duration, compute_download_time};
pub use finish::{Clock, SystemClock, compute_finish_time, format_finish_time};
pub use format::{capitalize, format_duration};

use crate::error::CalcError;
use chrono::{DateTime, TimeZone};

/// Result of running a size and a speed through the whole pipeline.
#[derive(Debug, Clone)]
pub struct Estimate<Tz: TimeZone> {
    pub now: DateTime<Tz>,
    pub duration: Duration,
    pub finish: DateTime<Tz>,
}

/// Compute the duration, then project the finish from the same instant.
///
/// The finish is based on the truncated whole seconds of the duration, so an
/// empty file finishes exactly at `now`.
pub fn estimate<C: Clock>(
    clock: &C,
    bytes: f64,
    bytes_per_second: f64,
) -> Result<Estimate<C::Tz>, CalcError> {
    let duration = compute_download_time(bytes, bytes_per_second)?;
    let now = clock.now();
    let finish = compute_finish_time(&now, duration.total_seconds() as f64)?;
    Ok(Estimate {
        now,
        duration,
        finish,
    })
}
