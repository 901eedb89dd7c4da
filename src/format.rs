//! Human-readable formatting for durations, timestamps and rates

use crate::analytics::{round_half_up, ReportingZone};
use chrono::{DateTime, Utc};

/// Format an effort in minutes, e.g. `45m`, `2h` or `1h 30m`
pub fn format_duration(minutes: i64) -> String {
    if minutes < 60 {
        return format!("{minutes}m");
    }

    let hours = minutes / 60;
    let mins = minutes % 60;
    if mins > 0 {
        format!("{hours}h {mins}m")
    } else {
        format!("{hours}h")
    }
}

/// Format how long before `now` something happened
pub fn format_distance(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = now.signed_duration_since(then).num_seconds();

    if seconds < 60 {
        "just now".to_string()
    } else if seconds < 3600 {
        format!("{}m ago", seconds / 60)
    } else if seconds < 86400 {
        format!("{}h ago", seconds / 3600)
    } else {
        format!("{}d ago", seconds / 86400)
    }
}

/// Short date and time, e.g. `Oct 17, 3:05 PM`
pub fn format_date(timestamp: &DateTime<Utc>, zone: ReportingZone) -> String {
    zone.format(timestamp, "%b %-d, %-I:%M %p")
}

/// Hour of day as `HH:00`
pub fn format_hour(hour: u32) -> String {
    format!("{hour:02}:00")
}

/// A fraction in [0, 1] as a whole percentage, e.g. `67%`
pub fn format_rate(rate: f64) -> String {
    format!("{}%", round_half_up(rate * 100.0))
}
