use crate::estimate::download::Duration;

pub(crate) fn pluralize(value: u64, singular: &'static str, plural: &'static str) -> &'static str {
    if value == 1 { singular } else { plural }
}

/// Render as "<h> Hour(s) <m> Minute(s) <s> Second(s)". Each noun is
/// singular only when its own value is 1.
pub fn format_duration(d: Duration) -> String {
    format!(
        "{} {} {} {} {} {}",
        d.hours,
        pluralize(d.hours, "Hour", "Hours"),
        d.minutes,
        pluralize(d.minutes, "Minute", "Minutes"),
        d.seconds,
        pluralize(d.seconds, "Second", "Seconds"),
    )
}

/// Uppercase the first character, leave the rest alone.
pub fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// The one-line summary shown under a result.
pub fn describe_estimate(
    size: f64,
    size_unit: &str,
    speed: f64,
    speed_unit: &str,
    finish_time: &str,
) -> String {
    format!(
        "Based on a {} {} file and an internet speed of {} {}, the download will be finished at approximately {}",
        size,
        capitalize(size_unit),
        speed,
        capitalize(speed_unit),
        finish_time
    )
}
