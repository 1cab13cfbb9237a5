//! A hand-rolled debug-logging flag, matching lyon's own
//! `fuzz_tests`/debug-assertion style: no `log`/`tracing` dependency, just
//! an opt-in `eprintln!` behind a process-wide flag.

use std::sync::atomic::{AtomicBool, Ordering};

static LOGGING_ENABLED: AtomicBool = AtomicBool::new(false);

/// Enables or disables diagnostic `eprintln!` output from the tessellator
/// and stroker. Off by default; intended for debugging a specific input,
/// not for production use.
pub fn set_logging(enabled: bool) {
    LOGGING_ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn logging_enabled() -> bool {
    LOGGING_ENABLED.load(Ordering::Relaxed)
}

macro_rules! tess_log {
    ($($arg:tt)*) => {
        if $crate::logging::logging_enabled() {
            eprintln!($($arg)*);
        }
    };
}

pub(crate) use tess_log;
