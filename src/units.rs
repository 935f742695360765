//! Size and speed unit tables.
//!
//! Every size is converted to bytes and every speed to bytes per second
//! before any arithmetic happens. Lookups are case-insensitive. Tokens that
//! match no entry convert with a multiplier of 1, i.e. they are treated as
//! plain bytes (or bytes per second).

use crate::error::{CalcError, UnitKind};

const KIB: f64 = 1024.0;
const MIB: f64 = KIB * 1024.0;
const GIB: f64 = MIB * 1024.0;
const TIB: f64 = GIB * 1024.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeUnit {
    B,
    Kb,
    Mb,
    Gb,
    Tb,
}

impl SizeUnit {
    pub const ALL: [SizeUnit; 5] = [
        SizeUnit::B,
        SizeUnit::Kb,
        SizeUnit::Mb,
        SizeUnit::Gb,
        SizeUnit::Tb,
    ];

    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "b" => Some(SizeUnit::B),
            "kb" => Some(SizeUnit::Kb),
            "mb" => Some(SizeUnit::Mb),
            "gb" => Some(SizeUnit::Gb),
            "tb" => Some(SizeUnit::Tb),
            _ => None,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            SizeUnit::B => "b",
            SizeUnit::Kb => "kb",
            SizeUnit::Mb => "mb",
            SizeUnit::Gb => "gb",
            SizeUnit::Tb => "tb",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SizeUnit::B => "B",
            SizeUnit::Kb => "KB",
            SizeUnit::Mb => "MB",
            SizeUnit::Gb => "GB",
            SizeUnit::Tb => "TB",
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            SizeUnit::B => 1.0,
            SizeUnit::Kb => KIB,
            SizeUnit::Mb => MIB,
            SizeUnit::Gb => GIB,
            SizeUnit::Tb => TIB,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedUnit {
    /// Bytes per second.
    Bps,
    Kbps,
    Kbs,
    Mbps,
    Mbs,
    Gbps,
    Gbs,
}

impl SpeedUnit {
    pub const ALL: [SpeedUnit; 7] = [
        SpeedUnit::Bps,
        SpeedUnit::Kbps,
        SpeedUnit::Kbs,
        SpeedUnit::Mbps,
        SpeedUnit::Mbs,
        SpeedUnit::Gbps,
        SpeedUnit::Gbs,
    ];

    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "bps" => Some(SpeedUnit::Bps),
            "kbps" => Some(SpeedUnit::Kbps),
            "kbs" => Some(SpeedUnit::Kbs),
            "mbps" => Some(SpeedUnit::Mbps),
            "mbs" => Some(SpeedUnit::Mbs),
            "gbps" => Some(SpeedUnit::Gbps),
            "gbs" => Some(SpeedUnit::Gbs),
            _ => None,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            SpeedUnit::Bps => "bps",
            SpeedUnit::Kbps => "kbps",
            SpeedUnit::Kbs => "kbs",
            SpeedUnit::Mbps => "mbps",
            SpeedUnit::Mbs => "mbs",
            SpeedUnit::Gbps => "gbps",
            SpeedUnit::Gbs => "gbs",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SpeedUnit::Bps => "B/s",
            SpeedUnit::Kbps => "Kbps",
            SpeedUnit::Kbs => "KB/s",
            SpeedUnit::Mbps => "Mbps",
            SpeedUnit::Mbs => "MB/s",
            SpeedUnit::Gbps => "Gbps",
            SpeedUnit::Gbs => "GB/s",
        }
    }

    /// Bytes per second for one unit of this speed. Bit-based units are an
    /// eighth of their byte-based counterpart.
    pub fn multiplier(self) -> f64 {
        match self {
            SpeedUnit::Bps => 1.0,
            SpeedUnit::Kbps => KIB / 8.0,
            SpeedUnit::Kbs => KIB,
            SpeedUnit::Mbps => MIB / 8.0,
            SpeedUnit::Mbs => MIB,
            SpeedUnit::Gbps => GIB / 8.0,
            SpeedUnit::Gbs => GIB,
        }
    }
}

/// Convert a size to bytes. Unrecognized units count as bytes.
pub fn to_bytes(magnitude: f64, unit: &str) -> f64 {
    magnitude * SizeUnit::parse(unit).map_or(1.0, SizeUnit::multiplier)
}

/// Convert a speed to bytes per second. Unrecognized units count as bytes per
/// second.
pub fn to_bytes_per_second(magnitude: f64, unit: &str) -> f64 {
    magnitude * SpeedUnit::parse(unit).map_or(1.0, SpeedUnit::multiplier)
}

/// Strict lookup used when the configuration disables the byte fallback.
pub fn resolve_size_unit(token: &str) -> Result<SizeUnit, CalcError> {
    SizeUnit::parse(token).ok_or_else(|| CalcError::UnrecognizedUnit {
        kind: UnitKind::Size,
        token: token.to_string(),
    })
}

pub fn resolve_speed_unit(token: &str) -> Result<SpeedUnit, CalcError> {
    SpeedUnit::parse(token).ok_or_else(|| CalcError::UnrecognizedUnit {
        kind: UnitKind::Speed,
        token: token.to_string(),
    })
}
