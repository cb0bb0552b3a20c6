//! Handler forwarding records to a `log::Log` implementation

use std::sync::Arc;

use ctxlog_core::{Attr, Context, Handler, HandlerResult, Level, Record};
use log::{Log, Metadata};

use crate::fields::Fields;
use crate::level::to_log_level;

/// A [`Handler`] that emits through the `log` crate
///
/// Each record becomes one `log::Record`: the message as its arguments, the
/// level mapped by [`to_log_level`], the handler's target, the call site
/// captured by the facade as `file`/`line`, and the attributes as key/values
/// (bound fields first, then the record's own). Group-valued attributes are
/// emitted member by member under dotted keys.
///
/// `with_group` derives a named sub-logger: the group is appended to the
/// target, dot separated.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use ctxlog_core::Context;
/// use ctxlog_log::LogHandler;
///
/// env_logger::init();
/// let ctx = ctxlog_core::set_logger(&Context::background(), Arc::new(LogHandler::global()));
/// ctxlog_core::info!(&ctx, "hello", "user", "ada");
/// ```
#[derive(Clone)]
pub struct LogHandler {
    sink: Arc<dyn Log>,
    target: String,
    min_level: Level,
    fields: Arc<Vec<Attr>>,
}

impl LogHandler {
    /// Create a handler emitting into `sink`
    pub fn new(sink: Arc<dyn Log>) -> Self {
        Self {
            sink,
            target: String::new(),
            min_level: Level(i32::MIN),
            fields: Arc::new(Vec::new()),
        }
    }

    /// Create a handler emitting into the logger installed with `log::set_logger`
    pub fn global() -> Self {
        Self::new(Arc::new(GlobalLog))
    }

    /// Set the target records are emitted under
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    /// Skip records below `level` before asking the backend
    pub fn with_min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    /// The target records are emitted under
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Fields bound with `with_attrs`
    pub fn fields(&self) -> &[Attr] {
        &self.fields
    }
}

impl Handler for LogHandler {
    fn enabled(&self, _ctx: &Context, level: Level) -> bool {
        if level < self.min_level {
            return false;
        }
        let metadata = Metadata::builder()
            .level(to_log_level(level))
            .target(&self.target)
            .build();
        self.sink.enabled(&metadata)
    }

    fn handle(&self, _ctx: &Context, record: &Record) -> HandlerResult<()> {
        let fields = Fields::new(&self.fields, &record.attrs);
        let file = record.source.map(|s| s.file());
        let line = record.source.map(|s| s.line());

        self.sink.log(
            &log::Record::builder()
                .args(format_args!("{}", record.message))
                .level(to_log_level(record.level))
                .target(&self.target)
                .file(file)
                .line(line)
                .key_values(&fields)
                .build(),
        );
        Ok(())
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler> {
        let mut fields = Vec::with_capacity(self.fields.len() + attrs.len());
        fields.extend(self.fields.iter().cloned());
        fields.extend(attrs);
        Arc::new(Self {
            fields: Arc::new(fields),
            ..self.clone()
        })
    }

    fn with_group(&self, name: &str) -> Arc<dyn Handler> {
        let target = match (self.target.is_empty(), name.is_empty()) {
            (_, true) => self.target.clone(),
            (true, false) => name.to_string(),
            (false, false) => format!("{}.{}", self.target, name),
        };
        Arc::new(Self {
            target,
            ..self.clone()
        })
    }
}

impl std::fmt::Debug for LogHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogHandler")
            .field("target", &self.target)
            .field("min_level", &self.min_level)
            .field("fields", &self.fields.len())
            .finish()
    }
}

/// Forwards to whatever logger is installed globally, honouring
/// `log::max_level()`
struct GlobalLog;

impl Log for GlobalLog {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level() && log::logger().enabled(metadata)
    }

    fn log(&self, record: &log::Record<'_>) {
        if record.level() <= log::max_level() {
            log::logger().log(record);
        }
    }

    fn flush(&self) {
        log::logger().flush();
    }
}
