#![cfg(feature = "log")]

//! The `log` bridge must be installed by `configure_with_handler` alone.
//!
//! Kept in its own test binary so no other test installs the bridge first.

use clx_log::{Config, Level, StyledFormatter, StyledHandler, configure_with_handler};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_custom_handler_receives_log_macros() {
    let buf = SharedBuf::default();
    let handler = StyledHandler::new(buf.clone()).with_formatter(StyledFormatter::new(false));
    assert!(configure_with_handler(
        &Config::new().level(Level::DEBUG),
        handler
    ));

    log::debug!(target: "app", "routed");
    let out = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
    assert_eq!(out, "[d] routed\n");
}
