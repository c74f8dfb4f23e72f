//! Formatting utilities for progress durations.

use std::time::Duration;

/// Formats a duration as a human-readable string.
///
/// - Under 60 seconds: "42s"
/// - Under 1 hour: "1m30s"
/// - 1 hour or more: "1h30m45s"
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m{}s", secs / 60, secs % 60)
    } else {
        format!("{}h{}m{}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

/// Estimates the time remaining from the elapsed time and progress so far.
///
/// Returns `None` until at least one item has completed, once the total has
/// been reached, and when the estimate does not fit in a `Duration`.
pub fn estimate_remaining(elapsed: Duration, current: usize, total: usize) -> Option<Duration> {
    if current == 0 || current >= total {
        return None;
    }
    let per_item = elapsed.as_secs_f64() / current as f64;
    Duration::try_from_secs_f64(per_item * (total - current) as f64).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(0)), "0s");
        assert_eq!(format_duration(Duration::from_secs(42)), "42s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m30s");
        assert_eq!(format_duration(Duration::from_secs(5445)), "1h30m45s");
    }

    #[test]
    fn test_estimate_remaining() {
        let eta = estimate_remaining(Duration::from_secs(10), 5, 10).unwrap();
        assert_eq!(eta.as_secs(), 10);
        assert!(estimate_remaining(Duration::from_secs(10), 0, 10).is_none());
        assert!(estimate_remaining(Duration::from_secs(10), 10, 10).is_none());
    }

    #[test]
    fn test_estimate_remaining_overflow() {
        assert!(estimate_remaining(Duration::from_secs(2), 1, usize::MAX).is_none());
    }
}
