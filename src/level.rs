//! Severity levels and the fixed prefix/style table used to decorate them.
//!
//! Levels are numeric so that custom levels can exist alongside the named
//! ones. Only the five named severities have an entry in the format table;
//! anything else is emitted without a prefix.
//!
//! | Severity | Prefix | Style                |
//! |----------|--------|----------------------|
//! | CRITICAL | `[c]`  | red, bold, blink     |
//! | ERROR    | `[e]`  | red, bold, blink     |
//! | WARNING  | `[w]`  | yellow, bold         |
//! | INFO     | `[i]`  | green, bold          |
//! | DEBUG    | `[d]`  | white                |

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use strum::{Display, EnumString};

use crate::{Error, Result};

/// A log severity, ordered by numeric value (higher is more severe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level(u8);

impl Level {
    /// Unset level; a logger at this level defers to its parent.
    pub const NOTSET: Level = Level(0);
    pub const TRACE: Level = Level(5);
    pub const DEBUG: Level = Level(10);
    pub const INFO: Level = Level(20);
    pub const WARNING: Level = Level(30);
    pub const ERROR: Level = Level(40);
    pub const CRITICAL: Level = Level(50);

    /// Creates a level from its numeric value.
    pub const fn new(value: u8) -> Self {
        Level(value)
    }

    /// Returns the numeric value of this level.
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns the canonical name of this level.
    ///
    /// Unnamed levels render as `Level {n}`.
    pub fn name(self) -> Cow<'static, str> {
        match self {
            Level::NOTSET => "NOTSET".into(),
            Level::TRACE => "TRACE".into(),
            Level::DEBUG => "DEBUG".into(),
            Level::INFO => "INFO".into(),
            Level::WARNING => "WARNING".into(),
            Level::ERROR => "ERROR".into(),
            Level::CRITICAL => "CRITICAL".into(),
            Level(n) => format!("Level {n}").into(),
        }
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::INFO
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(n) = s.parse::<u8>() {
            return Ok(Level(n));
        }
        match s.to_ascii_lowercase().as_str() {
            "notset" => Ok(Level::NOTSET),
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warning" | "warn" => Ok(Level::WARNING),
            "error" => Ok(Level::ERROR),
            "critical" => Ok(Level::CRITICAL),
            _ => Err(Error::InvalidLevel(s.to_string())),
        }
    }
}

#[cfg(feature = "log")]
impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Level::ERROR,
            log::Level::Warn => Level::WARNING,
            log::Level::Info => Level::INFO,
            log::Level::Debug => Level::DEBUG,
            log::Level::Trace => Level::TRACE,
        }
    }
}

/// Foreground colors available to level prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl From<Color> for console::Color {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => console::Color::Black,
            Color::Red => console::Color::Red,
            Color::Green => console::Color::Green,
            Color::Yellow => console::Color::Yellow,
            Color::Blue => console::Color::Blue,
            Color::Magenta => console::Color::Magenta,
            Color::Cyan => console::Color::Cyan,
            Color::White => console::Color::White,
        }
    }
}

/// Display attributes applied to a level prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelStyle {
    pub color: Color,
    pub bold: bool,
    pub blink: bool,
}

impl LevelStyle {
    /// Renders `text` with this style's ANSI attributes.
    ///
    /// Styling is forced on regardless of terminal detection; callers decide
    /// whether to style at all.
    pub fn apply(&self, text: &str) -> String {
        let mut styled = console::style(text)
            .force_styling(true)
            .fg(self.color.into());
        if self.bold {
            styled = styled.bold();
        }
        if self.blink {
            styled = styled.blink();
        }
        styled.to_string()
    }
}

/// The prefix and style for one severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelFormat {
    pub prefix: &'static str,
    pub style: LevelStyle,
}

static LEVEL_FORMATS: [(&str, LevelFormat); 5] = [
    ("CRITICAL", entry("[c]", Color::Red, true, true)),
    ("ERROR", entry("[e]", Color::Red, true, true)),
    ("WARNING", entry("[w]", Color::Yellow, true, false)),
    ("INFO", entry("[i]", Color::Green, true, false)),
    ("DEBUG", entry("[d]", Color::White, false, false)),
];

const fn entry(prefix: &'static str, color: Color, bold: bool, blink: bool) -> LevelFormat {
    LevelFormat {
        prefix,
        style: LevelStyle { color, bold, blink },
    }
}

/// Looks up the format entry for a severity name.
///
/// Returns `None` for names outside the table, including `TRACE` and custom
/// levels.
pub fn lookup(name: &str) -> Option<&'static LevelFormat> {
    LEVEL_FORMATS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, format)| format)
}
