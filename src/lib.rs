//! Colored, level-prefixed console logging for CLI applications.
//!
//! ```rust,no_run
//! use clx_log::{Level, get_logger, progress::progressbar};
//!
//! # fn main() -> clx_log::Result<()> {
//! clx_log::configure(Level::INFO, true, false);
//!
//! let log = get_logger(Some("app"), None);
//! log.info(format_args!("starting"));
//! log.warning(format_args!("{} files skipped", 2));
//!
//! for item in progressbar(vec![1, 2, 3], Level::INFO, None)? {
//!     let _ = item;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Output on stderr:
//!
//! ```text
//! [i] starting
//! [w] 2 files skipped
//! ```
//!
//! With the `log` feature (on by default) the `log` crate macros are routed
//! through the same registry once [`configure`] has run.

use std::sync::LazyLock;

pub use error::{Error, Result};
pub use formatter::{Formatter, StyledFormatter};
pub use handler::{Handler, StyledHandler};
pub use level::Level;
pub use record::Record;
pub use registry::{Config, Logger, Registry};

#[cfg(feature = "log")]
mod bridge;
mod error;
mod formatter;
mod handler;
pub mod level;
pub mod progress;
mod record;
mod registry;
pub mod style;

static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

/// Returns the process-wide registry.
pub fn registry() -> &'static Registry {
    &REGISTRY
}

/// Configures the root logger with a styled stderr handler.
///
/// Returns `false` if the root logger already has a handler and
/// `override_existing` is not set; nothing is changed in that case.
pub fn configure(level: Level, style: bool, override_existing: bool) -> bool {
    basic_config(&Config {
        level,
        style,
        override_existing,
    })
}

/// [`configure`] taking a [`Config`], e.g. from [`Config::from_env`].
pub fn basic_config(config: &Config) -> bool {
    #[cfg(feature = "log")]
    bridge::install();
    registry().basic_config(config)
}

/// Configures the root logger with a caller-supplied handler.
///
/// Same return value as [`configure`]; `config.style` is ignored since the
/// handler brings its own formatter. The `log` crate macros are routed to the
/// handler as well.
pub fn configure_with_handler(config: &Config, handler: impl Handler + 'static) -> bool {
    #[cfg(feature = "log")]
    bridge::install();
    registry().configure_with_handler(config, handler)
}

/// Detaches all handlers and clears logger levels on the global registry.
pub fn reset() {
    registry().reset();
}

/// Returns `true` once the global root logger has been configured.
pub fn is_configured() -> bool {
    registry().is_configured()
}

/// Returns a handle to a logger in the global registry.
///
/// `None` or `""` selects the root logger. A given `level` is set on that
/// logger only.
pub fn get_logger(name: Option<&str>, level: Option<Level>) -> Logger<'static> {
    registry().get_logger(name, level)
}
