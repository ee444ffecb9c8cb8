//! Human-readable trip durations such as `"1d 1h"` or `"1h 30m"`.

const MINUTES_PER_HOUR: u64 = 60;
const MINUTES_PER_DAY: u64 = 24 * MINUTES_PER_HOUR;

/// Format a duration given in minutes.
///
/// Input is rounded to whole minutes. Zero-valued components are omitted and
/// `"0m"` is returned when everything is zero. Negative or non-finite input
/// counts as zero.
pub fn format_duration(minutes: f64) -> String {
    let total = if minutes.is_finite() && minutes > 0.0 {
        minutes.round() as u64
    } else {
        0
    };

    let days = total / MINUTES_PER_DAY;
    let hours = (total % MINUTES_PER_DAY) / MINUTES_PER_HOUR;
    let mins = total % MINUTES_PER_HOUR;

    let parts: Vec<String> = [(days, 'd'), (hours, 'h'), (mins, 'm')]
        .into_iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, unit)| format!("{}{}", value, unit))
        .collect();

    if parts.is_empty() {
        "0m".to_string()
    } else {
        parts.join(" ")
    }
}
