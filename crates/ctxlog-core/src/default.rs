//! Process-wide default logger
//!
//! The default is what [`from_context`](crate::from_context) hands out for
//! contexts that carry no logger. It starts as a [`TextHandler`] on stderr at
//! `INFO` and is replaced by [`set_default`] or [`set_logger`](crate::set_logger).
//!
//! Replacement is last-writer-wins. Install the default once, early, before
//! other threads start logging.

use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::handler::{HandlerOptions, TextHandler};
use crate::logger::Logger;

static DEFAULT: Lazy<RwLock<Logger>> = Lazy::new(|| {
    RwLock::new(Logger::new(Arc::new(TextHandler::stderr(
        HandlerOptions::default(),
    ))))
});

/// The current process-wide default logger
pub fn default_logger() -> Logger {
    DEFAULT.read().clone()
}

/// Replace the process-wide default logger
pub fn set_default(logger: Logger) {
    *DEFAULT.write() = logger;
}

/// Serialises tests that read or replace the default
#[cfg(test)]
pub(crate) fn test_lock() -> parking_lot::MutexGuard<'static, ()> {
    static LOCK: parking_lot::Mutex<()> = parking_lot::const_mutex(());
    LOCK.lock()
}
