//! Record formatting with colored severity prefixes.
//!
//! [`StyledFormatter`] renders the base message (optionally through a Tera
//! template) and prepends the prefix from the level table:
//!
//! ```rust
//! use clx_log::{Formatter, Level, Record, StyledFormatter};
//!
//! let formatter = StyledFormatter::new(false);
//! let line = formatter.format(&Record::new(
//!     Level::WARNING,
//!     "app",
//!     format_args!("disk {}% full", 95),
//! ));
//! assert_eq!(line, "[w] disk 95% full");
//! ```

use serde::Serialize;
use tera::{Context, Tera};

use crate::level;
use crate::{Record, Result};

const TEMPLATE_NAME: &str = "record";

/// Turns a record into the text written by a handler.
pub trait Formatter: Send + Sync {
    fn format(&self, record: &Record<'_>) -> String;
}

/// Variables available to record templates.
#[derive(Serialize)]
struct TemplateContext<'a> {
    message: &'a str,
    name: &'a str,
    level: &'a str,
    module: Option<&'a str>,
    file: Option<&'a str>,
    line: Option<u32>,
}

/// Formatter that prefixes each message with its severity tag, e.g. `[i]`.
///
/// Records whose level has no table entry are returned undecorated.
pub struct StyledFormatter {
    style: bool,
    tera: Option<Tera>,
}

impl StyledFormatter {
    /// Creates a formatter; `style` controls ANSI styling of the prefix.
    pub fn new(style: bool) -> Self {
        Self { style, tera: None }
    }

    /// Creates a formatter whose base text comes from a Tera template.
    ///
    /// Templates can reference `message`, `name`, `level`, `module`, `file`
    /// and `line`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Tera`] if the template does not parse.
    pub fn with_template(style: bool, template: &str) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, template)?;
        Ok(Self {
            style,
            tera: Some(tera),
        })
    }

    /// Whether prefixes are rendered with ANSI styling.
    pub fn style(&self) -> bool {
        self.style
    }

    fn base_format(&self, record: &Record<'_>) -> String {
        let message = record.message();
        let Some(tera) = &self.tera else {
            return message;
        };
        let level = record.level().name();
        let ctx = TemplateContext {
            message: &message,
            name: record.name(),
            level: &level,
            module: record.module_path(),
            file: record.file(),
            line: record.line(),
        };
        Context::from_serialize(&ctx)
            .and_then(|ctx| tera.render(TEMPLATE_NAME, &ctx))
            .unwrap_or(message)
    }
}

impl Default for StyledFormatter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Formatter for StyledFormatter {
    fn format(&self, record: &Record<'_>) -> String {
        let formatted = self.base_format(record);
        match level::lookup(&record.level().name()) {
            Some(format) => {
                let prefix = if self.style {
                    format.style.apply(format.prefix)
                } else {
                    format.prefix.to_string()
                };
                format!("{prefix} {formatted}")
            }
            // unknown levels are emitted as-is
            None => formatted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Level;

    fn format(formatter: &StyledFormatter, level: Level, msg: &str) -> String {
        formatter.format(&Record::new(level, "test", format_args!("{msg}")))
    }

    #[test]
    fn test_plain_prefixes() {
        let formatter = StyledFormatter::new(false);
        assert_eq!(format(&formatter, Level::CRITICAL, "boom"), "[c] boom");
        assert_eq!(format(&formatter, Level::ERROR, "bad"), "[e] bad");
        assert_eq!(format(&formatter, Level::WARNING, "hmm"), "[w] hmm");
        assert_eq!(format(&formatter, Level::INFO, "ok"), "[i] ok");
        assert_eq!(format(&formatter, Level::DEBUG, "dbg"), "[d] dbg");
    }

    #[test]
    fn test_styled_prefixes() {
        let formatter = StyledFormatter::new(true);
        for (level, name) in [
            (Level::CRITICAL, "CRITICAL"),
            (Level::ERROR, "ERROR"),
            (Level::WARNING, "WARNING"),
            (Level::INFO, "INFO"),
            (Level::DEBUG, "DEBUG"),
        ] {
            let entry = level::lookup(name).unwrap();
            let expected = format!("{} message", entry.style.apply(entry.prefix));
            assert_eq!(format(&formatter, level, "message"), expected);
        }
    }

    #[test]
    fn test_unknown_level_is_undecorated() {
        let formatter = StyledFormatter::new(true);
        assert_eq!(format(&formatter, Level::new(25), "custom"), "custom");
        assert_eq!(format(&formatter, Level::TRACE, "fine"), "fine");
    }

    #[test]
    fn test_template() {
        let formatter = StyledFormatter::with_template(false, "{{ name }}: {{ message }}").unwrap();
        assert_eq!(format(&formatter, Level::INFO, "ready"), "[i] test: ready");
    }

    #[test]
    fn test_template_level_variable() {
        let formatter = StyledFormatter::with_template(false, "{{ level }} {{ message }}").unwrap();
        assert_eq!(format(&formatter, Level::new(25), "x"), "Level 25 x");
    }

    #[test]
    fn test_invalid_template() {
        assert!(StyledFormatter::with_template(true, "{{ message").is_err());
    }

    #[test]
    fn test_render_failure_falls_back_to_message() {
        let formatter = StyledFormatter::with_template(false, "{{ missing }}").unwrap();
        assert_eq!(format(&formatter, Level::INFO, "kept"), "[i] kept");
    }
}
