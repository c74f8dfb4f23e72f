use std::fmt;

use crate::Level;

/// Name reported for records emitted through the root logger.
pub const ROOT_NAME: &str = "root";

/// A single log event as seen by formatters and handlers.
///
/// Records are transient: they borrow the message arguments and logger name
/// for the duration of one dispatch.
#[derive(Clone, Debug)]
pub struct Record<'a> {
    level: Level,
    name: &'a str,
    args: fmt::Arguments<'a>,
    module_path: Option<&'a str>,
    file: Option<&'a str>,
    line: Option<u32>,
}

impl<'a> Record<'a> {
    pub fn new(level: Level, name: &'a str, args: fmt::Arguments<'a>) -> Self {
        Self {
            level,
            name,
            args,
            module_path: None,
            file: None,
            line: None,
        }
    }

    /// Attaches source location metadata.
    pub fn with_location(
        mut self,
        module_path: Option<&'a str>,
        file: Option<&'a str>,
        line: Option<u32>,
    ) -> Self {
        self.module_path = module_path;
        self.file = file;
        self.line = line;
        self
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Name of the logger that produced this record.
    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn args(&self) -> &fmt::Arguments<'a> {
        &self.args
    }

    /// Renders the message arguments.
    pub fn message(&self) -> String {
        self.args.to_string()
    }

    pub fn module_path(&self) -> Option<&'a str> {
        self.module_path
    }

    pub fn file(&self) -> Option<&'a str> {
        self.file
    }

    pub fn line(&self) -> Option<u32> {
        self.line
    }
}
