//! Handler trait definition

use std::sync::Arc;

use thiserror::Error;

use crate::context::Context;
use crate::types::{Attr, Level, Record};

/// Errors a handler can report while emitting a record
///
/// Loggers discard these; they exist so that handlers can be driven and
/// tested directly.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Backend error: {0}")]
    Backend(String),
}

pub type HandlerResult<T> = Result<T, HandlerError>;

/// Sink for log records
///
/// Implementations:
/// - `TextHandler`: `key=value` lines
/// - `JsonHandler`: one JSON object per line
/// - `DiscardHandler`: drops everything
/// - `MemoryHandler`: captures records for tests
/// - `LogHandler` (ctxlog-log crate): forwards to the `log` crate
///
/// Derivation (`with_attrs`, `with_group`) must leave the receiver as it was,
/// so that one handler can be derived from concurrently.
pub trait Handler: Send + Sync {
    /// Whether a record at `level` would be emitted
    ///
    /// Loggers call this before building a record and skip the call entirely
    /// when it returns false.
    fn enabled(&self, ctx: &Context, level: Level) -> bool;

    /// Emit one record
    ///
    /// Errors are for faults in the sink itself. They are best-effort: the
    /// logger that called this will not pass them on.
    fn handle(&self, ctx: &Context, record: &Record) -> HandlerResult<()>;

    /// A handler that also emits `attrs` with every record
    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler>;

    /// A handler that places later attributes under `name`
    fn with_group(&self, name: &str) -> Arc<dyn Handler>;
}

/// Options shared by the built-in handlers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerOptions {
    /// Records below this level are not emitted
    pub level: Level,
    /// Include the call site of each record
    pub add_source: bool,
}

impl Default for HandlerOptions {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            add_source: false,
        }
    }
}

impl HandlerOptions {
    /// Create options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum level
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set whether the call site is included
    pub fn with_source(mut self, add_source: bool) -> Self {
        self.add_source = add_source;
        self
    }
}

/// Attributes bound by `with_attrs`, each remembering the groups that were
/// open when it was bound
#[derive(Debug, Clone, Default)]
pub(crate) struct BoundAttrs {
    pub(crate) groups: Vec<String>,
    pub(crate) attrs: Vec<(Vec<String>, Attr)>,
}

impl BoundAttrs {
    pub(crate) fn with_attrs(&self, attrs: Vec<Attr>) -> Self {
        let mut next = self.clone();
        next.attrs
            .extend(attrs.into_iter().map(|a| (self.groups.clone(), a)));
        next
    }

    pub(crate) fn with_group(&self, name: &str) -> Self {
        let mut next = self.clone();
        next.groups.push(name.to_string());
        next
    }
}

/// Join group names and a key with dots
pub(crate) fn qualify(groups: &[String], key: &str) -> String {
    if groups.is_empty() {
        return key.to_string();
    }
    let mut out = groups.join(".");
    out.push('.');
    out.push_str(key);
    out
}
