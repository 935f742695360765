use crate::OutputFormat;
use crate::config::Config;
use crate::estimate::{self, Clock, Duration, SystemClock, format_duration, format_finish_time};
use crate::estimate::format::describe_estimate;
use crate::platform::state_paths;
use crate::state::State;
use crate::units::{self, SizeUnit, SpeedUnit, resolve_size_unit, resolve_speed_unit};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Display;
use tracing::{info, warn};

/// Where the download speed for a calculation comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum SpeedSource {
    /// Typed by the user. A missing unit means the configured default.
    Given { value: f64, unit: Option<String> },
    /// Freshly measured, in megabits per second.
    Measured(f64),
    /// The result of the last `speedtest` run.
    LastTest,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalcReport {
    pub size: f64,
    pub size_unit: String,
    pub speed: f64,
    pub speed_unit: String,
    pub bytes: f64,
    pub bytes_per_second: f64,
    pub duration: Duration,
    pub total_seconds: u64,
    pub download_time: String,
    pub finish_time: String,
    pub summary: String,
}

/// Convert, compute and render one estimate against `clock`.
pub fn build_report<C>(
    config: &Config,
    clock: &C,
    size: f64,
    size_unit: &str,
    speed: f64,
    speed_unit: &str,
) -> Result<CalcReport>
where
    C: Clock,
    <C::Tz as chrono::TimeZone>::Offset: Display,
{
    check_units(config, size_unit, speed_unit)?;

    let bytes = units::to_bytes(size, size_unit);
    let bytes_per_second = units::to_bytes_per_second(speed, speed_unit);
    info!(bytes, bytes_per_second, "converted inputs");

    let est = estimate::estimate(clock, bytes, bytes_per_second)?;
    let finish_time = format_finish_time(
        &est.now,
        &est.finish,
        &config.display.finish_time_format,
    )
    .context("Failed to render finish time")?;

    Ok(CalcReport {
        size,
        size_unit: size_unit.to_string(),
        speed,
        speed_unit: speed_unit.to_string(),
        bytes,
        bytes_per_second,
        duration: est.duration,
        total_seconds: est.duration.total_seconds(),
        download_time: format_duration(est.duration),
        summary: describe_estimate(size, size_unit, speed, speed_unit, &finish_time),
        finish_time,
    })
}

fn check_units(config: &Config, size_unit: &str, speed_unit: &str) -> Result<()> {
    if config.units.strict {
        resolve_size_unit(size_unit)?;
        resolve_speed_unit(speed_unit)?;
        return Ok(());
    }

    if SizeUnit::parse(size_unit).is_none() {
        warn!("Unrecognized size unit '{}', treating the size as bytes", size_unit);
    }
    if SpeedUnit::parse(speed_unit).is_none() {
        warn!(
            "Unrecognized speed unit '{}', treating the speed as bytes per second",
            speed_unit
        );
    }
    Ok(())
}

/// Turn a speed source into a (value, unit token) pair.
pub fn resolve_speed(config: &Config, source: SpeedSource) -> Result<(f64, String)> {
    match source {
        SpeedSource::Given { value, unit } => {
            Ok((value, unit.unwrap_or_else(|| config.defaults.speed_unit.clone())))
        }
        SpeedSource::Measured(mbps) => Ok((mbps, SpeedUnit::Mbps.token().to_string())),
        SpeedSource::LastTest => {
            let (_, state_path) = state_paths(config.state.state_dir_override.as_ref())?;
            let state = State::load(&state_path)?;
            let sample = state.last_speed_test.context(
                "No download speed given and no previous speed test found. \
                 Pass a SPEED or run 'dltime speedtest' first",
            )?;
            info!(
                mbps = sample.mbps,
                measured_at = %sample.measured_at,
                "using last speed test"
            );
            Ok((sample.mbps, SpeedUnit::Mbps.token().to_string()))
        }
    }
}

pub fn calc(
    config: &Config,
    size: f64,
    size_unit: &str,
    speed: SpeedSource,
    format: OutputFormat,
) -> Result<()> {
    let (speed, speed_unit) = resolve_speed(config, speed)?;
    let report = build_report(config, &SystemClock, size, size_unit, speed, &speed_unit)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            println!("Download Time: {}", report.download_time);
            println!("{}", report.summary);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn clock() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_report_for_one_gigabyte_at_ten_megabits() {
        let report = build_report(&Config::default(), &clock(), 1.0, "gb", 10.0, "mbps").unwrap();

        assert_eq!(report.bytes, 1_073_741_824.0);
        assert_eq!(report.bytes_per_second, 1_310_720.0);
        assert_eq!(
            report.duration,
            Duration {
                hours: 0,
                minutes: 13,
                seconds: 39
            }
        );
        assert_eq!(report.total_seconds, 819);
        assert_eq!(report.download_time, "0 Hours 13 Minutes 39 Seconds");
        assert_eq!(report.finish_time, "12:13:39");
        assert!(report.summary.starts_with("Based on a 1 Gb file"));
    }

    #[test]
    fn test_empty_file_finishes_now() {
        let report = build_report(&Config::default(), &clock(), 0.0, "mb", 5.0, "mbps").unwrap();
        assert_eq!(report.duration, Duration::default());
        assert_eq!(report.finish_time, "12:00:00");
    }

    #[test]
    fn test_zero_speed_is_reported() {
        let err = build_report(&Config::default(), &clock(), 1.0, "gb", 0.0, "mbps").unwrap_err();
        assert_eq!(
            err.downcast_ref::<crate::error::CalcError>(),
            Some(&crate::error::CalcError::InvalidSpeed)
        );
    }

    #[test]
    fn test_unknown_unit_is_bytes_unless_strict() {
        let mut config = Config::default();
        let report = build_report(&config, &clock(), 120.0, "lbs", 1.0, "bps").unwrap();
        assert_eq!(report.total_seconds, 120);

        config.units.strict = true;
        assert!(build_report(&config, &clock(), 120.0, "lbs", 1.0, "bps").is_err());
    }

    #[test]
    fn test_given_speed_defaults_unit_from_config() {
        let mut config = Config::default();
        config.defaults.speed_unit = "mbs".to_string();
        let (value, unit) = resolve_speed(
            &config,
            SpeedSource::Given {
                value: 3.0,
                unit: None,
            },
        )
        .unwrap();
        assert_eq!((value, unit.as_str()), (3.0, "mbs"));
    }

    #[test]
    fn test_measured_speed_is_megabits() {
        let (value, unit) = resolve_speed(&Config::default(), SpeedSource::Measured(87.5)).unwrap();
        assert_eq!((value, unit.as_str()), (87.5, "mbps"));
    }
}
