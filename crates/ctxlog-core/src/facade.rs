//! Leveled logging entry points
//!
//! Each function looks up the logger bound to the context (the default
//! logger when there is none) and emits through it. They return nothing and
//! never fail: handler errors are dropped.
//!
//! `args` is an alternating key/value list, paired by
//! [`args_to_attrs`](crate::args_to_attrs). The macros of the same names
//! build it from plain values:
//!
//! ```
//! use std::sync::Arc;
//! use ctxlog_core::{Context, MemoryHandler};
//!
//! let handler = MemoryHandler::new();
//! let ctx = ctxlog_core::set_logger(&Context::background(), Arc::new(handler.clone()));
//! let ctx = ctxlog_core::with(&ctx, &["req_id".into(), "abc".into()]);
//!
//! ctxlog_core::info!(&ctx, "request served", "status", 200, "cached", false);
//!
//! let record = handler.last().unwrap();
//! assert!(record.has("req_id", "abc"));
//! assert!(record.has("status", 200));
//! ```

use std::sync::Arc;

use crate::context::{from_context, with_context, Context};
use crate::default::set_default;
use crate::handler::Handler;
use crate::logger::Logger;
use crate::types::{Attr, Level, Value};

/// Install `handler` as the default logger and bind it into a new context
///
/// Code that has no context yet still logs through `handler` via the
/// default. Meant to be called once at startup.
pub fn set_logger(ctx: &Context, handler: Arc<dyn Handler>) -> Context {
    let logger = Logger::new(handler);
    set_default(logger.clone());
    with_context(ctx, logger)
}

#[track_caller]
pub fn debug(ctx: &Context, msg: &str, args: &[Value]) {
    from_context(ctx).log(ctx, Level::DEBUG, msg, args);
}

#[track_caller]
pub fn info(ctx: &Context, msg: &str, args: &[Value]) {
    from_context(ctx).log(ctx, Level::INFO, msg, args);
}

#[track_caller]
pub fn warn(ctx: &Context, msg: &str, args: &[Value]) {
    from_context(ctx).log(ctx, Level::WARN, msg, args);
}

#[track_caller]
pub fn error(ctx: &Context, msg: &str, args: &[Value]) {
    from_context(ctx).log(ctx, Level::ERROR, msg, args);
}

/// Emit at an arbitrary level
#[track_caller]
pub fn log(ctx: &Context, level: Level, msg: &str, args: &[Value]) {
    from_context(ctx).log(ctx, level, msg, args);
}

/// Emit at an arbitrary level with typed attributes
#[track_caller]
pub fn log_attrs(ctx: &Context, level: Level, msg: &str, attrs: Vec<Attr>) {
    from_context(ctx).log_attrs(ctx, level, msg, attrs);
}

/// Log at `DEBUG` through the context's logger
#[macro_export]
macro_rules! debug {
    ($ctx:expr, $msg:expr $(, $arg:expr)* $(,)?) => {
        $crate::facade::debug($ctx, $msg, &[$($crate::Value::from($arg)),*])
    };
}

/// Log at `INFO` through the context's logger
#[macro_export]
macro_rules! info {
    ($ctx:expr, $msg:expr $(, $arg:expr)* $(,)?) => {
        $crate::facade::info($ctx, $msg, &[$($crate::Value::from($arg)),*])
    };
}

/// Log at `WARN` through the context's logger
#[macro_export]
macro_rules! warn {
    ($ctx:expr, $msg:expr $(, $arg:expr)* $(,)?) => {
        $crate::facade::warn($ctx, $msg, &[$($crate::Value::from($arg)),*])
    };
}

/// Log at `ERROR` through the context's logger
#[macro_export]
macro_rules! error {
    ($ctx:expr, $msg:expr $(, $arg:expr)* $(,)?) => {
        $crate::facade::error($ctx, $msg, &[$($crate::Value::from($arg)),*])
    };
}
