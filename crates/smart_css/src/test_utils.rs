//! Utilities for asserting on emitted diagnostics in unit tests
#![cfg(test)]

use std::cell::RefCell;
use std::sync::Once;

thread_local! {
    /// Records logged from the current test thread
    static RECORDS: RefCell<Vec<(log::Level, String)>> = const { RefCell::new(Vec::new()) };
}

/// Installs the logger exactly once, other threads block until it is in place
static LOGGER_INIT: Once = Once::new();

/// A `log` logger that keeps warnings and errors per thread.
// NOTE: tests run in parallel on separate threads, keeping the records thread local means a test
// only ever sees its own diagnostics.
struct CapturingLogger;

impl log::Log for CapturingLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::Level::Warn
    }

    fn flush(&self) {}

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let entry = (record.level(), record.args().to_string());
        RECORDS.with(|records| records.borrow_mut().push(entry));
    }
}

/// Install the capturing logger, this is a no-op if it is already installed.
///
/// Returns once the logger is active, even when another thread is the one installing it.
pub(crate) fn init_logger() {
    LOGGER_INIT.call_once(|| {
        let _ = log::set_logger(&CapturingLogger);
        log::set_max_level(log::LevelFilter::Trace);
    });
}

/// Drain the records captured on this thread so far
pub(crate) fn take_records() -> Vec<(log::Level, String)> {
    RECORDS.with(|records| std::mem::take(&mut *records.borrow_mut()))
}

/// Check if a string is valid css
#[cfg(not(target_arch = "wasm32"))]
#[expect(clippy::panic, clippy::expect_used, reason = "This is meant for tests")]
pub(crate) fn assert_valid_css(string: &str) {
    let warnings = std::sync::Arc::default();
    let result = lightningcss::stylesheet::StyleSheet::parse(
        string,
        lightningcss::stylesheet::ParserOptions {
            warnings: Some(std::sync::Arc::clone(&warnings)),
            error_recovery: false,
            ..Default::default()
        },
    );

    match result {
        Err(error) => {
            panic!("The following code was not valid css\n{string}\nerror: {error}");
        }

        Ok(stylesheet) => {
            let warnings = warnings.read().expect("Failed to get lock");
            if !warnings.is_empty() {
                for warning in warnings.iter() {
                    eprintln!("{warning}");
                }
                panic!("The following code produced warnings\n{string}");
            }
            let debug_reps = format!("{stylesheet:?}");
            assert!(
                !debug_reps.contains("Unparsed") && !debug_reps.contains("Unknown"),
                "Found indications of invalid css\n{string}\n{stylesheet:?}"
            );
        }
    }
}
