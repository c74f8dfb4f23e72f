//! Logger registry: root handlers, per-logger levels and configuration.
//!
//! A [`Registry`] is the explicit form of the process-wide logger state. The
//! crate keeps one global instance behind the free functions in the crate root
//! ([`configure`](crate::configure), [`reset`](crate::reset),
//! [`get_logger`](crate::get_logger)), but registries can also be created
//! directly, which is mostly useful for tests.
//!
//! Configuration is expected to happen once, early, before spawning threads
//! that log. Concurrent configuration calls are serialized but their relative
//! order is unspecified.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::record::ROOT_NAME;
use crate::{Handler, Level, Record, Result, StyledFormatter, StyledHandler};

/// Level of the root logger before anything is configured.
const DEFAULT_ROOT_LEVEL: Level = Level::WARNING;

/// Options for [`Registry::basic_config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Level set on the root logger.
    pub level: Level,
    /// Whether severity prefixes are rendered with ANSI styling.
    pub style: bool,
    /// Whether existing root handlers are replaced instead of kept.
    pub override_existing: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            style: true,
            override_existing: false,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn style(mut self, style: bool) -> Self {
        self.style = style;
        self
    }

    pub fn override_existing(mut self, override_existing: bool) -> Self {
        self.override_existing = override_existing;
        self
    }

    /// Builds a config from the environment.
    ///
    /// - `CLX_LOG_LEVEL` - root level, by name or number (default: `info`)
    /// - `CLX_LOG_STYLE=0` - disable prefix styling
    /// - `NO_COLOR` - disable prefix styling
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidLevel`] if `CLX_LOG_LEVEL` does not parse.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(level) = std::env::var("CLX_LOG_LEVEL") {
            config.level = level.parse()?;
        }
        if let Ok(style) = std::env::var("CLX_LOG_STYLE") {
            config.style = !matches!(style.trim().to_ascii_lowercase().as_str(), "0" | "false");
        }
        if std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            config.style = false;
        }
        Ok(config)
    }
}

struct State {
    configured: bool,
    root_level: Level,
    handlers: Vec<Arc<dyn Handler>>,
    levels: HashMap<String, Level>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            configured: false,
            root_level: DEFAULT_ROOT_LEVEL,
            handlers: vec![],
            levels: HashMap::new(),
        }
    }
}

/// Holds the root logger's handlers and level, and the levels of named loggers.
#[derive(Default)]
pub struct Registry {
    state: Mutex<State>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Attaches a styled stderr handler to the root logger.
    ///
    /// Returns `false` without changing anything if the root logger already has
    /// handlers and `config.override_existing` is not set. With
    /// `override_existing`, existing handlers are discarded first.
    pub fn basic_config(&self, config: &Config) -> bool {
        let handler = StyledHandler::stderr().with_formatter(StyledFormatter::new(config.style));
        self.configure_with_handler(config, handler)
    }

    /// Like [`basic_config`](Self::basic_config) with a caller-supplied handler.
    ///
    /// `config.style` is ignored; the handler brings its own formatter.
    pub fn configure_with_handler(&self, config: &Config, handler: impl Handler + 'static) -> bool {
        let mut state = self.state();
        if state.configured || !state.handlers.is_empty() {
            if !config.override_existing {
                return false;
            }
            state.handlers.clear();
        }
        state.root_level = config.level;
        state.handlers.push(Arc::new(handler));
        state.configured = true;
        true
    }

    /// Removes all handlers and logger levels, returning to the unconfigured state.
    pub fn reset(&self) {
        let handlers = std::mem::take(&mut *self.state()).handlers;
        for handler in handlers {
            handler.flush();
        }
    }

    pub fn is_configured(&self) -> bool {
        self.state().configured
    }

    /// Number of handlers attached to the root logger.
    pub fn handler_count(&self) -> usize {
        self.state().handlers.len()
    }

    /// Returns a handle to the named logger, or the root logger for `None`/`""`.
    ///
    /// If `level` is given it is set on that logger only.
    pub fn get_logger(&self, name: Option<&str>, level: Option<Level>) -> Logger<'_> {
        let logger = Logger {
            registry: self,
            name: name.filter(|n| !n.is_empty()).map(str::to_string),
        };
        if let Some(level) = level {
            logger.set_level(level);
        }
        logger
    }

    fn level_of(&self, name: Option<&str>) -> Level {
        let state = self.state();
        match name {
            None => state.root_level,
            Some(name) => state.levels.get(name).copied().unwrap_or(Level::NOTSET),
        }
    }

    fn set_level_of(&self, name: Option<&str>, level: Level) {
        let mut state = self.state();
        match name {
            None => state.root_level = level,
            Some(name) => {
                state.levels.insert(name.to_string(), level);
            }
        }
    }

    /// Returns the level that applies to records from `name`.
    ///
    /// Walks up the dotted (or `::`-separated) hierarchy to the first logger
    /// with a level set, ending at the root logger.
    pub fn effective_level(&self, name: &str) -> Level {
        let state = self.state();
        let mut current = Some(name).filter(|n| !n.is_empty() && *n != ROOT_NAME);
        while let Some(name) = current {
            if let Some(level) = state.levels.get(name).filter(|l| **l != Level::NOTSET) {
                return *level;
            }
            current = parent_name(name);
        }
        state.root_level
    }

    /// Returns `true` if a record at `level` from `name` would be dispatched.
    pub fn is_enabled(&self, name: &str, level: Level) -> bool {
        level >= self.effective_level(name)
    }

    /// Sends a record to every root handler if its level is enabled.
    ///
    /// Handlers run outside the registry lock.
    pub fn dispatch(&self, record: &Record<'_>) {
        if !self.is_enabled(record.name(), record.level()) {
            return;
        }
        let handlers = self.state().handlers.clone();
        for handler in &handlers {
            handler.emit(record);
        }
    }

    pub fn flush(&self) {
        let handlers = self.state().handlers.clone();
        for handler in &handlers {
            handler.flush();
        }
    }
}

fn parent_name(name: &str) -> Option<&str> {
    let dot = name.rfind('.').map(|i| (i, 1));
    let colons = name.rfind("::").map(|i| (i, 2));
    let (idx, _) = dot.max(colons)?;
    Some(&name[..idx]).filter(|n| !n.is_empty())
}

/// A handle to a named logger (or the root logger) in a [`Registry`].
///
/// ```rust
/// use clx_log::{Level, Registry, StyledHandler, StyledFormatter, Config};
///
/// let registry = Registry::new();
/// registry.configure_with_handler(
///     &Config::new().level(Level::DEBUG),
///     StyledHandler::new(Vec::new()).with_formatter(StyledFormatter::new(false)),
/// );
/// let logger = registry.get_logger(Some("app.db"), None);
/// logger.info(format_args!("connected to {}", "postgres"));
/// assert!(logger.is_enabled_for(Level::DEBUG));
/// ```
#[derive(Clone)]
pub struct Logger<'a> {
    registry: &'a Registry,
    name: Option<String>,
}

impl Logger<'_> {
    /// The logger's name; `"root"` for the root logger.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(ROOT_NAME)
    }

    pub fn is_root(&self) -> bool {
        self.name.is_none()
    }

    /// The level set on this logger, [`Level::NOTSET`] if none.
    pub fn level(&self) -> Level {
        self.registry.level_of(self.name.as_deref())
    }

    /// Sets this logger's level without touching the root level.
    pub fn set_level(&self, level: Level) {
        self.registry.set_level_of(self.name.as_deref(), level);
    }

    pub fn effective_level(&self) -> Level {
        self.registry.effective_level(self.name())
    }

    pub fn is_enabled_for(&self, level: Level) -> bool {
        self.registry.is_enabled(self.name(), level)
    }

    /// Logs a message at `level`, recording the caller's location.
    #[track_caller]
    pub fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        let location = std::panic::Location::caller();
        let record = Record::new(level, self.name(), args).with_location(
            None,
            Some(location.file()),
            Some(location.line()),
        );
        self.registry.dispatch(&record);
    }

    #[track_caller]
    pub fn critical(&self, args: fmt::Arguments<'_>) {
        self.log(Level::CRITICAL, args);
    }

    #[track_caller]
    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.log(Level::ERROR, args);
    }

    #[track_caller]
    pub fn warning(&self, args: fmt::Arguments<'_>) {
        self.log(Level::WARNING, args);
    }

    #[track_caller]
    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.log(Level::INFO, args);
    }

    #[track_caller]
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(Level::DEBUG, args);
    }
}

impl fmt::Debug for Logger<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name())
            .field("level", &self.level())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Write};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn plain_handler(buf: &SharedBuf) -> StyledHandler<SharedBuf> {
        StyledHandler::new(buf.clone()).with_formatter(StyledFormatter::new(false))
    }

    #[test]
    fn test_parent_name() {
        assert_eq!(parent_name("a.b.c"), Some("a.b"));
        assert_eq!(parent_name("crate::db::pool"), Some("crate::db"));
        assert_eq!(parent_name("a::b.c"), Some("a::b"));
        assert_eq!(parent_name("a.b::c"), Some("a.b"));
        assert_eq!(parent_name("top"), None);
        assert_eq!(parent_name(".hidden"), None);
    }

    #[test]
    fn test_unconfigured_defaults() {
        let registry = Registry::new();
        assert!(!registry.is_configured());
        assert_eq!(registry.handler_count(), 0);
        assert_eq!(registry.get_logger(None, None).level(), Level::WARNING);
    }

    #[test]
    fn test_effective_level_inherits() {
        let registry = Registry::new();
        registry.get_logger(None, Some(Level::ERROR));
        registry.get_logger(Some("app"), Some(Level::DEBUG));
        assert_eq!(registry.effective_level("app.db"), Level::DEBUG);
        assert_eq!(registry.effective_level("app::net"), Level::DEBUG);
        assert_eq!(registry.effective_level("other"), Level::ERROR);
        assert_eq!(registry.effective_level("root"), Level::ERROR);
    }

    #[test]
    fn test_logger_level_independent_of_root() {
        let registry = Registry::new();
        let logger = registry.get_logger(Some("quiet"), Some(Level::CRITICAL));
        assert_eq!(logger.level(), Level::CRITICAL);
        assert_eq!(registry.get_logger(None, None).level(), Level::WARNING);
        assert_eq!(registry.get_logger(Some("quiet"), None).level(), Level::CRITICAL);
    }

    #[test]
    fn test_empty_name_is_root() {
        let registry = Registry::new();
        let logger = registry.get_logger(Some(""), Some(Level::DEBUG));
        assert!(logger.is_root());
        assert_eq!(logger.name(), "root");
        assert_eq!(registry.effective_level("anything"), Level::DEBUG);
    }

    #[test]
    fn test_dispatch_filters_by_level() {
        let registry = Registry::new();
        let buf = SharedBuf::default();
        assert!(registry.configure_with_handler(&Config::new(), plain_handler(&buf)));

        let logger = registry.get_logger(Some("app"), None);
        logger.debug(format_args!("hidden"));
        logger.info(format_args!("shown"));
        logger.critical(format_args!("{} failures", 3));
        assert_eq!(buf.contents(), "[i] shown\n[c] 3 failures\n");
    }

    #[test]
    fn test_custom_level_dispatched_without_prefix() {
        let registry = Registry::new();
        let buf = SharedBuf::default();
        registry.configure_with_handler(&Config::new(), plain_handler(&buf));
        registry
            .get_logger(None, None)
            .log(Level::new(25), format_args!("notice"));
        assert_eq!(buf.contents(), "notice\n");
    }

    #[test]
    fn test_configure_twice_without_override() {
        let registry = Registry::new();
        let first = SharedBuf::default();
        let second = SharedBuf::default();
        assert!(registry.configure_with_handler(&Config::new(), plain_handler(&first)));
        assert!(!registry.configure_with_handler(
            &Config::new().level(Level::DEBUG),
            plain_handler(&second)
        ));
        assert_eq!(registry.handler_count(), 1);
        // second call changed nothing
        assert_eq!(registry.get_logger(None, None).level(), Level::INFO);

        registry.get_logger(None, None).info(format_args!("hello"));
        assert_eq!(first.contents(), "[i] hello\n");
        assert_eq!(second.contents(), "");
    }

    #[test]
    fn test_configure_with_override_replaces_handler() {
        let registry = Registry::new();
        let first = SharedBuf::default();
        let second = SharedBuf::default();
        registry.configure_with_handler(&Config::new(), plain_handler(&first));
        assert!(registry.configure_with_handler(
            &Config::new().level(Level::DEBUG).override_existing(true),
            plain_handler(&second)
        ));
        assert_eq!(registry.handler_count(), 1);

        registry.get_logger(None, None).debug(format_args!("detail"));
        assert_eq!(first.contents(), "");
        assert_eq!(second.contents(), "[d] detail\n");
    }

    #[test]
    fn test_reset() {
        let registry = Registry::new();
        registry.basic_config(&Config::new());
        registry.get_logger(Some("app"), Some(Level::DEBUG));
        registry.reset();
        assert!(!registry.is_configured());
        assert_eq!(registry.handler_count(), 0);
        assert_eq!(registry.get_logger(Some("app"), None).level(), Level::NOTSET);
        assert!(registry.basic_config(&Config::new()));
    }

    #[test]
    fn test_record_location() {
        struct Capture(Arc<Mutex<Option<(String, u32)>>>);
        impl Handler for Capture {
            fn emit(&self, record: &Record<'_>) {
                *self.0.lock().unwrap() =
                    Some((record.file().unwrap().to_string(), record.line().unwrap()));
            }
        }

        let registry = Registry::new();
        let seen = Arc::new(Mutex::new(None));
        registry.configure_with_handler(&Config::new(), Capture(seen.clone()));
        let line = line!() + 1;
        registry.get_logger(None, None).warning(format_args!("here"));
        let (file, recorded) = seen.lock().unwrap().clone().unwrap();
        assert!(file.ends_with("registry.rs"));
        assert_eq!(recorded, line);
    }

    #[test]
    fn test_config_builder() {
        let config = Config::new()
            .level(Level::DEBUG)
            .style(false)
            .override_existing(true);
        assert_eq!(config.level, Level::DEBUG);
        assert!(!config.style);
        assert!(config.override_existing);
        assert_eq!(Config::default().level, Level::INFO);
    }
}
