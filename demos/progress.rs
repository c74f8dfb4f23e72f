//! Example showing log output interleaved with a progress bar.
//!
//! Run with: cargo run --example progress
//!
//! Set `CLX_LOG_LEVEL=debug` to hide the bar and see debug records instead.

use clx_log::{Config, get_logger, progress::progressbar};
use std::{thread, time::Duration};

fn main() -> clx_log::Result<()> {
    let config = Config::from_env()?;
    clx_log::basic_config(&config);

    let log = get_logger(Some("demo"), None);
    log.info(format_args!("copying files"));

    let files: Vec<String> = (1..=20).map(|i| format!("file-{i:02}.txt")).collect();
    for file in progressbar(&files, config.level, None)?.with_label("Copying") {
        thread::sleep(Duration::from_millis(150));
        log.debug(format_args!("copied {file}"));
        if file.ends_with("13.txt") {
            log.warning(format_args!("{file} was skipped"));
        }
    }

    log.info(format_args!("done"));
    Ok(())
}
