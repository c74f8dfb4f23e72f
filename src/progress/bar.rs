use std::time::Duration;

use super::format::{estimate_remaining, format_duration};
use crate::style;

/// Default width of the bar itself, excluding the percentage and ETA.
pub(crate) const BAR_WIDTH: usize = 36;

/// Characters used to render a progress bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressBarChars {
    /// Character for filled portion (default: "#")
    pub fill: String,
    /// Character for the leading edge/head (default: "#")
    pub head: String,
    /// Character for empty portion (default: "-")
    pub empty: String,
    /// Left bracket (default: "[")
    pub left: String,
    /// Right bracket (default: "]")
    pub right: String,
}

impl Default for ProgressBarChars {
    fn default() -> Self {
        Self {
            fill: "#".to_string(),
            head: "#".to_string(),
            empty: "-".to_string(),
            left: "[".to_string(),
            right: "]".to_string(),
        }
    }
}

impl ProgressBarChars {
    /// Creates a new ProgressBarChars with block-style characters.
    pub fn blocks() -> Self {
        Self {
            fill: "█".to_string(),
            head: "▓".to_string(),
            empty: "░".to_string(),
            left: "".to_string(),
            right: "".to_string(),
        }
    }
}

pub(crate) fn progress_bar_with_chars(
    progress_current: usize,
    progress_total: usize,
    width: usize,
    chars: &ProgressBarChars,
) -> String {
    let bracket_width =
        console::measure_text_width(&chars.left) + console::measure_text_width(&chars.right);
    let inner_width = width.saturating_sub(bracket_width);

    let progress = if progress_total > 0 {
        progress_current as f64 / progress_total as f64
    } else {
        0.0
    };
    let filled_length = (inner_width as f64 * progress).round() as usize;

    let bar_content = if progress >= 1.0 {
        chars.fill.repeat(inner_width)
    } else if filled_length > 0 {
        let fill_part = chars.fill.repeat(filled_length.saturating_sub(1));
        let empty_part = chars
            .empty
            .repeat(inner_width.saturating_sub(filled_length));
        format!("{}{}{}", fill_part, chars.head, empty_part)
    } else {
        chars.empty.repeat(inner_width)
    };

    format!("{}{}{}", chars.left, bar_content, chars.right)
}

/// Renders a full progress line: optional label, bar, percentage, then ETA or
/// elapsed time.
pub(crate) fn render_line(
    current: usize,
    total: usize,
    elapsed: Duration,
    term_width: usize,
    label: Option<&str>,
    chars: &ProgressBarChars,
) -> String {
    let percent = if total > 0 {
        (current.min(total) as u128 * 100) / total as u128
    } else {
        100
    };
    let tail = match estimate_remaining(elapsed, current, total) {
        Some(eta) => format!("eta {}", format_duration(eta)),
        None => format_duration(elapsed),
    };
    let tail = format!("  {percent:>3}%  {tail}");
    let label = label.map(|l| format!("{l} ")).unwrap_or_default();
    let reserved = console::measure_text_width(&label) + console::measure_text_width(&tail);
    let width = BAR_WIDTH.min(term_width.saturating_sub(reserved));
    let bar = progress_bar_with_chars(current, total, width, chars);
    format!("{}{}{}", label, bar, style::edim(tail))
}
