//! Binding loggers into contexts

use super::chain::Context;
use crate::default::default_logger;
use crate::logger::Logger;
use crate::types::{Attr, Value};

/// Key under which the context's logger is stored. Private, so no other
/// code can bind or shadow it.
pub(crate) struct LoggerKey;

/// Derive a context carrying `logger`
pub fn with_context(ctx: &Context, logger: Logger) -> Context {
    ctx.with_value::<LoggerKey, _>(logger)
}

/// The logger bound to `ctx`, or the default logger
///
/// A context that never had a logger bound is normal (it may come from code
/// that knows nothing about logging), so this never fails.
pub fn from_context(ctx: &Context) -> Logger {
    ctx.get::<LoggerKey, Logger>()
        .cloned()
        .unwrap_or_else(default_logger)
}

/// Derive a context whose logger also emits the alternating key/value `args`
///
/// Equivalent to `with_context(ctx, from_context(ctx).with(args))`.
/// Attributes accumulate across nested calls in order; repeated keys are
/// kept as they are.
pub fn with(ctx: &Context, args: &[Value]) -> Context {
    with_context(ctx, from_context(ctx).with(args))
}

/// Typed form of [`with`]
pub fn with_attrs(ctx: &Context, attrs: Vec<Attr>) -> Context {
    with_context(ctx, from_context(ctx).with_attrs(attrs))
}

/// Derive a context whose logger places later attributes under `name`
pub fn with_group(ctx: &Context, name: &str) -> Context {
    with_context(ctx, from_context(ctx).with_group(name))
}
