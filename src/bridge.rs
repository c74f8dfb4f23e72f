//! Routes records from the `log` crate macros into the global registry.
//!
//! Installed by [`configure`](crate::configure) and
//! [`basic_config`](crate::basic_config). The bridge enables every level at
//! the `log` crate and leaves filtering to the registry, so per-logger levels
//! set with [`get_logger`](crate::get_logger) apply to `log::info!` and friends
//! by target.

use std::sync::Once;

use log::{LevelFilter, Log, Metadata};

use crate::{Level, Record, registry};

struct Bridge;

static BRIDGE: Bridge = Bridge;
static INSTALL: Once = Once::new();

impl Log for Bridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        registry().is_enabled(metadata.target(), Level::from(metadata.level()))
    }

    fn log(&self, record: &log::Record) {
        let record = Record::new(record.level().into(), record.target(), *record.args())
            .with_location(record.module_path(), record.file(), record.line());
        registry().dispatch(&record);
    }

    fn flush(&self) {
        registry().flush();
    }
}

/// Installs the bridge as the `log` crate's logger, once per process.
///
/// If another logger is already installed the bridge is skipped; [`Logger`]
/// handles keep working since they dispatch to the registry directly.
///
/// [`Logger`]: crate::Logger
pub(crate) fn install() {
    INSTALL.call_once(|| {
        if log::set_logger(&BRIDGE).is_ok() {
            log::set_max_level(LevelFilter::Trace);
        }
    });
}
