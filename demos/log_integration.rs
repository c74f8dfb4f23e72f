//! Example routing `log` crate macros through the styled handler.
//!
//! Run with: cargo run --example log_integration --features log

use clx_log::{Level, get_logger};
use log::{debug, error, info, trace, warn};

fn main() {
    // This must be called before any logging
    clx_log::configure(Level::DEBUG, true, false);

    // per-target levels apply to the macros as well
    get_logger(Some("log_integration::noisy"), Some(Level::ERROR));

    info!("Starting application");
    debug!("Debug details");
    warn!("Something unexpected happened");
    error!("Simulated error");
    trace!("Trace records are dropped at DEBUG");
    info!(target: "log_integration::noisy", "Suppressed by the target level");

    get_logger(None, None).critical(format_args!("Critical has no log macro"));
}
