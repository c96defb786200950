//! Utility functions for formatting and parsing timeline positions.
//!
//! These helpers are shared by the summary output and the command line
//! interface, which accepts durations either as plain seconds or as
//! `HH:MM:SS(.fff)` timestamps.

/// Formats seconds as HH:MM:SS.mmm (e.g., 3725.5 -> "01:02:05.500"). Returns "??:??:??" for invalid inputs.
#[must_use]
pub fn format_timestamp(seconds: f64) -> String {
    if seconds < 0.0 || !seconds.is_finite() {
        return "??:??:??".to_string();
    }

    let total_millis = (seconds * 1000.0).round() as u64;
    let hours = total_millis / 3_600_000;
    let minutes = (total_millis % 3_600_000) / 60_000;
    let secs = (total_millis % 60_000) / 1000;
    let millis = total_millis % 1000;
    format!("{hours:02}:{minutes:02}:{secs:02}.{millis:03}")
}

/// Formats a segment as "start - end".
#[must_use]
pub fn format_time_range(start: f64, end: f64) -> String {
    format!("{} - {}", format_timestamp(start), format_timestamp(end))
}

/// Parses either plain seconds ("125.5") or a timestamp ("00:02:05.5") into
/// seconds. Returns None if invalid.
#[must_use]
pub fn parse_timestamp(text: &str) -> Option<f64> {
    let text = text.trim();
    let seconds = if text.contains(':') {
        let parts: Vec<&str> = text.split(':').collect();
        if parts.len() != 3 {
            return None;
        }
        let hours: f64 = parts[0].parse().ok()?;
        let minutes: f64 = parts[1].parse().ok()?;
        let secs: f64 = parts[2].parse().ok()?;
        hours * 3600.0 + minutes * 60.0 + secs
    } else {
        text.parse().ok()?
    };
    (seconds.is_finite() && seconds >= 0.0).then_some(seconds)
}
