//! Sinks that receive formatted records.

use std::io::{self, Stderr, Write};
use std::sync::Mutex;

use crate::progress;
use crate::{Formatter, Record, StyledFormatter};

/// Receives records dispatched by a [`Registry`](crate::Registry).
pub trait Handler: Send + Sync {
    /// Formats and writes one record.
    fn emit(&self, record: &Record<'_>);

    fn flush(&self) {}
}

/// Handler that writes one formatted line per record.
///
/// Each record is written with a single `write_all` followed by a flush, so
/// lines are never batched. Write errors are dropped.
pub struct StyledHandler<W = Stderr> {
    writer: Mutex<W>,
    formatter: Box<dyn Formatter>,
    terminal: bool,
}

impl StyledHandler<Stderr> {
    /// Creates a handler writing to stderr with a styled formatter.
    ///
    /// While a progress bar is on screen, the bar is cleared before each
    /// record is written and redrawn afterward.
    pub fn stderr() -> Self {
        Self {
            writer: Mutex::new(io::stderr()),
            formatter: Box::new(StyledFormatter::default()),
            terminal: true,
        }
    }
}

impl<W: Write + Send> StyledHandler<W> {
    /// Creates a handler writing to an arbitrary writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            formatter: Box::new(StyledFormatter::default()),
            terminal: false,
        }
    }

    /// Replaces the formatter.
    pub fn with_formatter(mut self, formatter: impl Formatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Consumes the handler, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(|e| e.into_inner())
    }

    fn write_line(&self, line: &str) {
        let mut writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        let _ = writer.write_all(line.as_bytes());
        let _ = writer.flush();
    }
}

impl<W: Write + Send> Handler for StyledHandler<W> {
    fn emit(&self, record: &Record<'_>) {
        let mut line = self.formatter.format(record);
        line.push('\n');
        if self.terminal {
            progress::suspend(|| self.write_line(&line));
        } else {
            self.write_line(&line);
        }
    }

    fn flush(&self) {
        let _ = self
            .writer
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Level;

    fn emit(handler: &StyledHandler<Vec<u8>>, level: Level, msg: &str) {
        handler.emit(&Record::new(level, "test", format_args!("{msg}")));
    }

    #[test]
    fn test_emit_writes_one_line_per_record() {
        let handler = StyledHandler::new(Vec::new()).with_formatter(StyledFormatter::new(false));
        emit(&handler, Level::INFO, "first");
        emit(&handler, Level::ERROR, "second");
        let out = String::from_utf8(handler.into_inner()).unwrap();
        assert_eq!(out, "[i] first\n[e] second\n");
    }

    #[test]
    fn test_emit_unknown_level() {
        let handler = StyledHandler::new(Vec::new()).with_formatter(StyledFormatter::new(true));
        emit(&handler, Level::new(42), "plain");
        assert_eq!(handler.into_inner(), b"plain\n");
    }

    #[test]
    fn test_default_formatter_is_styled() {
        let handler = StyledHandler::new(Vec::new());
        emit(&handler, Level::WARNING, "careful");
        let out = String::from_utf8(handler.into_inner()).unwrap();
        assert!(out.starts_with("\x1b["));
        assert!(out.ends_with(" careful\n"));
    }
}
