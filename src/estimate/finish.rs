use crate::error::CalcError;
use crate::estimate::format::pluralize;
use chrono::{DateTime, Local, TimeDelta, TimeZone};
use std::fmt::{Display, Write};

pub const DEFAULT_FINISH_TIME_FORMAT: &str = "%H:%M:%S";

/// Source of the current instant.
pub trait Clock {
    type Tz: TimeZone;

    fn now(&self) -> DateTime<Self::Tz>;
}

/// Reads the local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    type Tz = Local;

    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A fixed instant acts as a clock that never moves.
impl<Z: TimeZone> Clock for DateTime<Z> {
    type Tz = Z;

    fn now(&self) -> DateTime<Z> {
        self.clone()
    }
}

/// Project the instant at which `total_seconds` from now have elapsed.
pub fn compute_finish_time<C: Clock>(
    clock: &C,
    total_seconds: f64,
) -> Result<DateTime<C::Tz>, CalcError> {
    if total_seconds.is_nan() || total_seconds < 0.0 {
        return Err(CalcError::InvalidDuration);
    }
    if total_seconds.is_infinite() {
        return Err(CalcError::Overflow);
    }

    let whole = total_seconds.trunc();
    if whole >= i64::MAX as f64 {
        return Err(CalcError::Overflow);
    }
    let nanos = ((total_seconds - whole) * 1e9) as i64;

    let delta = TimeDelta::try_seconds(whole as i64)
        .and_then(|d| d.checked_add(&TimeDelta::nanoseconds(nanos)))
        .ok_or(CalcError::Overflow)?;

    clock
        .now()
        .checked_add_signed(delta)
        .ok_or(CalcError::Overflow)
}

/// Render a finish instant with a strftime pattern. When it lands on a later
/// calendar day than `now`, a "(+N days)" suffix is appended.
pub fn format_finish_time<Tz>(
    now: &DateTime<Tz>,
    finish: &DateTime<Tz>,
    pattern: &str,
) -> Result<String, std::fmt::Error>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::new();
    write!(out, "{}", finish.format(pattern))?;

    let days = finish
        .date_naive()
        .signed_duration_since(now.date_naive())
        .num_days();
    if days > 0 {
        let days = days as u64;
        write!(out, " (+{} {})", days, pluralize(days, "day", "days"))?;
    }

    Ok(out)
}

/// Whether `pattern` is a strftime pattern chrono can render.
pub fn is_valid_time_format(pattern: &str) -> bool {
    use chrono::format::{Item, StrftimeItems};

    !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_adds_seconds_to_now() {
        let finish = compute_finish_time(&noon(), 819.0).unwrap();
        assert_eq!(finish, Utc.with_ymd_and_hms(2026, 3, 14, 12, 13, 39).unwrap());
    }

    #[test]
    fn test_zero_seconds_is_now() {
        assert_eq!(compute_finish_time(&noon(), 0.0).unwrap(), noon());
    }

    #[test]
    fn test_keeps_sub_second_part() {
        let finish = compute_finish_time(&noon(), 0.5).unwrap();
        assert_eq!((finish - noon()).num_milliseconds(), 500);
    }

    #[test]
    fn test_same_clock_is_deterministic() {
        let clock = noon();
        let a = compute_finish_time(&clock, 4321.0).unwrap();
        let b = compute_finish_time(&clock, 4321.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_out_of_range_is_overflow() {
        assert_eq!(
            compute_finish_time(&noon(), 1e300),
            Err(CalcError::Overflow)
        );
        assert_eq!(
            compute_finish_time(&noon(), f64::INFINITY),
            Err(CalcError::Overflow)
        );
        // fits in an i64 of seconds but not in chrono's calendar range
        assert_eq!(
            compute_finish_time(&noon(), 1e17),
            Err(CalcError::Overflow)
        );
    }

    #[test]
    fn test_negative_is_invalid() {
        assert_eq!(
            compute_finish_time(&noon(), -1.0),
            Err(CalcError::InvalidDuration)
        );
        assert_eq!(
            compute_finish_time(&noon(), f64::NAN),
            Err(CalcError::InvalidDuration)
        );
    }

    #[test]
    fn test_format_same_day() {
        let now = noon();
        let finish = compute_finish_time(&now, 819.0).unwrap();
        assert_eq!(
            format_finish_time(&now, &finish, DEFAULT_FINISH_TIME_FORMAT).unwrap(),
            "12:13:39"
        );
    }

    #[test]
    fn test_format_marks_later_days() {
        let now = noon();
        let tomorrow = compute_finish_time(&now, 13.0 * 3600.0).unwrap();
        assert_eq!(
            format_finish_time(&now, &tomorrow, DEFAULT_FINISH_TIME_FORMAT).unwrap(),
            "01:00:00 (+1 day)"
        );

        let later = compute_finish_time(&now, 3.0 * 86400.0).unwrap();
        assert_eq!(
            format_finish_time(&now, &later, "%Y-%m-%d").unwrap(),
            "2026-03-17 (+3 days)"
        );
    }

    #[test]
    fn test_format_uses_clock_offset() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = noon().with_timezone(&offset);
        let finish = compute_finish_time(&now, 60.0).unwrap();
        assert_eq!(format_finish_time(&now, &finish, "%H:%M").unwrap(), "14:01");
    }

    #[test]
    fn test_time_format_validation() {
        assert!(is_valid_time_format("%H:%M:%S"));
        assert!(is_valid_time_format("%a %d %b, %I:%M %p"));
        assert!(!is_valid_time_format("%Q"));
    }
}
