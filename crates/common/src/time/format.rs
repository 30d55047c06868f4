//! Duration formatting
//!
//! Provides the clock-style `HH:MM:SS` rendering used by timer displays and a
//! compact human-readable form used in log lines.

/// Format whole seconds as a zero-padded `HH:MM:SS` string
///
/// Hours are not wrapped at 24, so long-running timers render as `25:00:00`.
/// Negative input renders as `00:00:00`.
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "runtime")]
/// # {
/// use tempo_common::time::format::format_hms;
///
/// assert_eq!(format_hms(0), "00:00:00");
/// assert_eq!(format_hms(125), "00:02:05");
/// assert_eq!(format_hms(3665), "01:01:05");
/// # }
/// ```
pub fn format_hms(total_seconds: i64) -> String {
    let total_seconds = total_seconds.max(0);
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Format whole seconds into a human-readable string
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "runtime")]
/// # {
/// use tempo_common::time::format::format_duration;
///
/// assert_eq!(format_duration(5), "5s");
/// assert_eq!(format_duration(65), "1m 5s");
/// assert_eq!(format_duration(3665), "1h 1m 5s");
/// # }
/// ```
pub fn format_duration(total_seconds: i64) -> String {
    let total_secs = total_seconds.max(0);

    let days = total_secs / 86400;
    let hours = (total_secs % 86400) / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    let components = [(days, "d"), (hours, "h"), (minutes, "m"), (seconds, "s")];
    let start_index =
        components.iter().position(|(value, _)| *value > 0).unwrap_or(components.len() - 1);

    components[start_index..]
        .iter()
        .map(|(value, suffix)| format!("{value}{suffix}"))
        .collect::<Vec<_>>()
        .join(" ")
}
