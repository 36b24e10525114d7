//! Display formatting helpers
//!
//! Score, countdown and elapsed-time formatting shared by the screens.

use std::time::Duration;

/// Round a score to two decimals and drop trailing zeros
///
/// # Examples
/// ```
/// use quizterm::util::format::format_score;
///
/// assert_eq!(format_score(4.5), "4.5");
/// assert_eq!(format_score(8.0), "8");
/// assert_eq!(format_score(-0.25), "-0.25");
/// ```
pub fn format_score(score: f64) -> String {
    let rounded = (score * 100.0).round() / 100.0;
    if rounded == 0.0 {
        return "0".to_string();
    }

    let text = format!("{:.2}", rounded);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Remaining countdown units, zero-padded to two digits
///
/// # Examples
/// ```
/// use quizterm::util::format::pad_time;
///
/// assert_eq!(pad_time(5), "05");
/// assert_eq!(pad_time(15), "15");
/// ```
pub fn pad_time(units: u32) -> String {
    format!("{:02}", units)
}

/// Format a duration for the results screen
pub fn format_elapsed(duration: Duration) -> String {
    let total_secs = duration.as_secs();

    if total_secs >= 3600 {
        let hours = total_secs / 3600;
        let minutes = (total_secs % 3600) / 60;
        let seconds = total_secs % 60;
        format!("{}h {}m {:02}s", hours, minutes, seconds)
    } else if total_secs >= 60 {
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{}m {:02}s", minutes, seconds)
    } else {
        format!("{}s", total_secs)
    }
}

/// Time left on the countdown, for the gauge label
///
/// # Examples
/// ```
/// use quizterm::util::format::format_remaining;
/// use std::time::Duration;
///
/// assert_eq!(format_remaining(Duration::from_secs(7)), "07s");
/// assert_eq!(format_remaining(Duration::from_millis(1500)), "1.5s");
/// ```
pub fn format_remaining(remaining: Duration) -> String {
    let minute = Duration::from_secs(60);
    if remaining >= minute {
        format_elapsed(remaining)
    } else if remaining.subsec_millis() != 0 {
        format!("{:.1}s", remaining.as_secs_f64())
    } else {
        format!("{}s", pad_time(remaining.as_secs() as u32))
    }
}

/// Share of the quiz completed once question `shown` (1-based) is done,
/// clamped to 0.0..=1.0
pub fn progress_ratio(shown: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (shown as f64 / total as f64).clamp(0.0, 1.0)
    }
}
