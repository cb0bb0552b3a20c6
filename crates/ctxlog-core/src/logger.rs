//! Logger handle

use std::panic::Location;
use std::sync::Arc;

use crate::context::Context;
use crate::handler::Handler;
use crate::types::{args_to_attrs, Attr, Level, Record, Value};

/// Immutable logging handle over a [`Handler`]
///
/// Cloning a logger shares it; deriving one with [`Logger::with`],
/// [`Logger::with_attrs`] or [`Logger::with_group`] builds a new logger on a
/// new handler and leaves the receiver untouched. [`Logger::ptr_eq`] tells
/// the two apart.
///
/// Emission is fire-and-forget: the level is checked with
/// [`Handler::enabled`] first, and any error from [`Handler::handle`] is
/// dropped.
#[derive(Clone)]
pub struct Logger {
    inner: Arc<LoggerInner>,
}

struct LoggerInner {
    handler: Arc<dyn Handler>,
}

impl Logger {
    /// Create a logger emitting through `handler`
    pub fn new(handler: Arc<dyn Handler>) -> Self {
        Self {
            inner: Arc::new(LoggerInner { handler }),
        }
    }

    /// The handler behind this logger
    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.inner.handler
    }

    /// Whether two loggers are the same logger, not merely equivalent ones
    pub fn ptr_eq(a: &Logger, b: &Logger) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    /// Derive a logger that adds an alternating key/value list to every record
    ///
    /// The list is paired like the arguments of [`Logger::info`]. An empty list
    /// returns this logger unchanged.
    pub fn with(&self, args: &[Value]) -> Logger {
        if args.is_empty() {
            return self.clone();
        }
        self.with_attrs(args_to_attrs(args))
    }

    /// Derive a logger that adds `attrs` to every record
    pub fn with_attrs(&self, attrs: Vec<Attr>) -> Logger {
        if attrs.is_empty() {
            return self.clone();
        }
        Logger::new(self.inner.handler.with_attrs(attrs))
    }

    /// Derive a logger whose later attributes are placed under `name`
    ///
    /// An empty name returns this logger unchanged.
    pub fn with_group(&self, name: &str) -> Logger {
        if name.is_empty() {
            return self.clone();
        }
        Logger::new(self.inner.handler.with_group(name))
    }

    /// Whether a record at `level` would be emitted
    pub fn enabled(&self, ctx: &Context, level: Level) -> bool {
        self.inner.handler.enabled(ctx, level)
    }

    /// Emit at `level` with an alternating key/value list
    #[track_caller]
    pub fn log(&self, ctx: &Context, level: Level, msg: &str, args: &[Value]) {
        let source = Location::caller();
        if !self.enabled(ctx, level) {
            return;
        }
        self.emit(ctx, level, msg, args_to_attrs(args), source);
    }

    /// Emit at `level` with typed attributes
    #[track_caller]
    pub fn log_attrs(&self, ctx: &Context, level: Level, msg: &str, attrs: Vec<Attr>) {
        let source = Location::caller();
        if !self.enabled(ctx, level) {
            return;
        }
        self.emit(ctx, level, msg, attrs, source);
    }

    #[track_caller]
    pub fn debug(&self, ctx: &Context, msg: &str, args: &[Value]) {
        self.log(ctx, Level::DEBUG, msg, args);
    }

    #[track_caller]
    pub fn info(&self, ctx: &Context, msg: &str, args: &[Value]) {
        self.log(ctx, Level::INFO, msg, args);
    }

    #[track_caller]
    pub fn warn(&self, ctx: &Context, msg: &str, args: &[Value]) {
        self.log(ctx, Level::WARN, msg, args);
    }

    #[track_caller]
    pub fn error(&self, ctx: &Context, msg: &str, args: &[Value]) {
        self.log(ctx, Level::ERROR, msg, args);
    }

    fn emit(
        &self,
        ctx: &Context,
        level: Level,
        msg: &str,
        attrs: Vec<Attr>,
        source: &'static Location<'static>,
    ) {
        let record = Record::new(level, msg)
            .with_attrs(attrs)
            .with_source(source);
        // Logging never fails the caller.
        let _ = self.inner.handler.handle(ctx, &record);
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("inner", &Arc::as_ptr(&self.inner))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::MemoryHandler;

    fn capture() -> (MemoryHandler, Logger) {
        let handler = MemoryHandler::new();
        let logger = Logger::new(Arc::new(handler.clone()));
        (handler, logger)
    }

    #[test]
    fn test_leveled_methods() {
        let (handler, logger) = capture();
        let ctx = Context::background();

        logger.debug(&ctx, "d", &[]);
        logger.info(&ctx, "i", &[]);
        logger.warn(&ctx, "w", &[]);
        logger.error(&ctx, "e", &[]);

        let levels: Vec<_> = handler.records().iter().map(|r| r.level).collect();
        assert_eq!(levels, vec![Level::DEBUG, Level::INFO, Level::WARN, Level::ERROR]);
    }

    #[test]
    fn test_with_attrs_is_new_logger() {
        let (handler, logger) = capture();
        let ctx = Context::background();

        let derived = logger.with_attrs(vec![Attr::new("service", "api")]);
        assert!(!Logger::ptr_eq(&logger, &derived));

        logger.info(&ctx, "original", &[]);
        derived.info(&ctx, "derived", &[]);

        let records = handler.records();
        assert!(records[0].attrs.is_empty());
        assert!(records[1].has("service", "api"));
    }

    #[test]
    fn test_clone_shares_identity() {
        let (_, logger) = capture();
        assert!(Logger::ptr_eq(&logger, &logger.clone()));
    }

    #[test]
    fn test_empty_derivations_keep_identity() {
        let (_, logger) = capture();
        assert!(Logger::ptr_eq(&logger, &logger.with(&[])));
        assert!(Logger::ptr_eq(&logger, &logger.with_attrs(Vec::new())));
        assert!(Logger::ptr_eq(&logger, &logger.with_group("")));
    }

    #[test]
    fn test_with_group() {
        let (handler, logger) = capture();
        let ctx = Context::background();

        logger
            .with_group("db")
            .info(&ctx, "query", &["rows".into(), 3.into()]);

        let record = handler.last().unwrap();
        assert_eq!(record.groups, vec!["db".to_string()]);
        assert!(record.has("db.rows", 3));
    }

    #[test]
    fn test_disabled_level_skipped() {
        let handler = MemoryHandler::with_level(Level::WARN);
        let logger = Logger::new(Arc::new(handler.clone()));
        let ctx = Context::background();

        logger.info(&ctx, "dropped", &[]);
        logger.warn(&ctx, "kept", &[]);

        assert_eq!(handler.len(), 1);
        assert_eq!(handler.last().unwrap().message, "kept");
    }

    #[test]
    fn test_handler_error_swallowed() {
        let logger = Logger::new(Arc::new(MemoryHandler::failing()));
        logger.error(&Context::background(), "nobody hears this", &[]);
    }

    #[test]
    fn test_source_is_call_site() {
        let (handler, logger) = capture();
        let line = line!() + 1;
        logger.info(&Context::background(), "here", &[]);

        let source = handler.last().unwrap().source.unwrap();
        assert_eq!(source.file(), file!());
        assert_eq!(source.line(), line);
    }

    #[test]
    fn test_custom_level() {
        let (handler, logger) = capture();
        logger.log(&Context::background(), Level(2), "between", &[]);
        assert_eq!(handler.last().unwrap().level, Level(2));
    }

    #[test]
    fn test_log_attrs() {
        let (handler, logger) = capture();
        logger.log_attrs(
            &Context::background(),
            Level::INFO,
            "typed",
            vec![Attr::new("n", 1u64)],
        );
        assert!(handler.last().unwrap().has("n", 1u64));
    }
}
