use std::time::Duration;
use thiserror::Error;

/// Which unit table a token was looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Size,
    Speed,
}

impl std::fmt::Display for UnitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitKind::Size => f.write_str("size"),
            UnitKind::Speed => f.write_str("speed"),
        }
    }
}

/// Failures of the download estimate calculations.
///
/// These are ordinary values for the caller to render; none of them is
/// fatal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CalcError {
    #[error("download speed must be greater than zero (the download would never finish)")]
    InvalidSpeed,

    #[error("file size must be zero or a positive number")]
    InvalidSize,

    #[error("elapsed time must be zero or a positive number of seconds")]
    InvalidDuration,

    #[error("estimate is too large to represent (download time or finish time out of range)")]
    Overflow,

    #[error("unrecognized {kind} unit '{token}'")]
    UnrecognizedUnit { kind: UnitKind, token: String },
}

/// Failures of the network speed probe.
#[derive(Debug, Error)]
pub enum SpeedTestError {
    #[error("speed test request failed")]
    Http(#[from] reqwest::Error),

    #[error("speed test server returned status {0}")]
    Status(u16),

    #[error("speed test server returned an empty body")]
    EmptyResponse,

    #[error("speed test did not finish within {0:?}")]
    Timeout(Duration),
}
