//! Terminal styling helpers for stderr output.
//!
//! These follow the stream's color detection (`NO_COLOR`, `CLICOLOR`, tty
//! checks). Level prefixes do not use them: those are styled by
//! [`LevelStyle::apply`](crate::level::LevelStyle::apply), which is switched on
//! and off by the formatter instead.

use console::{StyledObject, style};

/// Creates a [`StyledObject`] configured for stderr output.
pub fn estyle<D>(val: D) -> StyledObject<D> {
    style(val).for_stderr()
}

/// Styles the value with dim/faint formatting for stderr.
pub fn edim<D>(val: D) -> StyledObject<D> {
    estyle(val).dim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estyle_returns_styled_object() {
        assert!(estyle("test").to_string().contains("test"));
    }

    #[test]
    fn test_edim_keeps_text() {
        let dimmed = edim("  40%").to_string();
        assert_eq!(console::strip_ansi_codes(&dimmed), "  40%");
    }
}
