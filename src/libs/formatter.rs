//! Duration formatting for terminal output.
//!
//! Logged time is shown both as `HH:MM` and as decimal hours/days with two
//! decimals, the same precision the exported reports use.
//!
//! ```rust
//! use chrono::Duration;
//! use jwlog::libs::formatter::{format_duration, format_decimal};
//!
//! assert_eq!(format_duration(&Duration::minutes(150)), "02:30");
//! assert_eq!(format_decimal(2.0 / 3.0), "0.67");
//! ```

use chrono::Duration;

/// Formats a duration as zero-padded `HH:MM`. Negative durations show as `00:00`.
pub fn format_duration(duration: &Duration) -> String {
    let hours = duration.num_hours();
    let mins = duration.num_minutes() % 60;

    format!("{:02}:{:02}", hours.max(0), mins.max(0))
}

/// Formats logged seconds as `HH:MM`.
pub fn format_seconds(seconds: u64) -> String {
    let duration = i64::try_from(seconds)
        .ok()
        .and_then(Duration::try_seconds)
        .unwrap_or(Duration::MAX);
    format_duration(&duration)
}

/// Two-decimal rendering used for hours and days.
pub fn format_decimal(value: f64) -> String {
    format!("{:.2}", value)
}
