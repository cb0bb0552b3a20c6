//! In-memory capturing handler

use std::panic::Location;
use std::sync::Arc;

use parking_lot::Mutex;

use super::traits::{qualify, BoundAttrs, Handler, HandlerError, HandlerResult};
use crate::context::Context;
use crate::types::{Attr, Level, Record, Value};

/// A record as seen by a [`MemoryHandler`]
///
/// `attrs` holds the handler's bound attributes followed by the record's
/// own, with keys qualified by the groups open at the time (`group.key`).
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedRecord {
    pub level: Level,
    pub message: String,
    pub attrs: Vec<Attr>,
    pub groups: Vec<String>,
    pub source: Option<&'static Location<'static>>,
}

impl CapturedRecord {
    /// The value of the last attribute named `key`
    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attrs
            .iter()
            .rev()
            .find(|a| a.key == key)
            .map(|a| &a.value)
    }

    /// Whether an attribute `key` with value `value` was captured
    pub fn has(&self, key: &str, value: impl Into<Value>) -> bool {
        let value = value.into();
        self.attrs.iter().any(|a| a.key == key && a.value == value)
    }
}

/// In-memory handler for testing and inspection
///
/// Every handler derived from one `MemoryHandler` appends to the same
/// buffer, so a test can keep the original and read what any logger built
/// on top of it emitted.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use ctxlog_core::{Context, Logger, MemoryHandler};
///
/// let handler = MemoryHandler::new();
/// let logger = Logger::new(Arc::new(handler.clone())).with(&["req_id".into(), "abc".into()]);
///
/// logger.info(&Context::background(), "hello", &[]);
///
/// let records = handler.records();
/// assert_eq!(records.len(), 1);
/// assert!(records[0].has("req_id", "abc"));
/// ```
#[derive(Debug, Clone)]
pub struct MemoryHandler {
    records: Arc<Mutex<Vec<CapturedRecord>>>,
    min_level: Level,
    failing: bool,
    bound: BoundAttrs,
}

impl Default for MemoryHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHandler {
    /// Create a handler that captures every level
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            min_level: Level(i32::MIN),
            failing: false,
            bound: BoundAttrs::default(),
        }
    }

    /// Create a handler that captures records at `level` and above
    pub fn with_level(level: Level) -> Self {
        Self {
            min_level: level,
            ..Self::new()
        }
    }

    /// Create a handler whose `handle` always fails and captures nothing
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::new()
        }
    }

    /// Snapshot of the captured records
    pub fn records(&self) -> Vec<CapturedRecord> {
        self.records.lock().clone()
    }

    /// The most recently captured record
    pub fn last(&self) -> Option<CapturedRecord> {
        self.records.lock().last().cloned()
    }

    /// Number of captured records
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Check if nothing was captured
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all captured records
    pub fn clear(&self) {
        self.records.lock().clear();
    }

    fn derive(&self, bound: BoundAttrs) -> Arc<dyn Handler> {
        Arc::new(Self {
            records: Arc::clone(&self.records),
            min_level: self.min_level,
            failing: self.failing,
            bound,
        })
    }
}

impl Handler for MemoryHandler {
    fn enabled(&self, _ctx: &Context, level: Level) -> bool {
        level >= self.min_level
    }

    fn handle(&self, _ctx: &Context, record: &Record) -> HandlerResult<()> {
        if self.failing {
            return Err(HandlerError::Backend("memory handler set to fail".to_string()));
        }

        let attrs = self
            .bound
            .attrs
            .iter()
            .map(|(groups, a)| Attr::new(qualify(groups, &a.key), a.value.clone()))
            .chain(
                record
                    .attrs
                    .iter()
                    .map(|a| Attr::new(qualify(&self.bound.groups, &a.key), a.value.clone())),
            )
            .collect();

        self.records.lock().push(CapturedRecord {
            level: record.level,
            message: record.message.clone(),
            attrs,
            groups: self.bound.groups.clone(),
            source: record.source,
        });
        Ok(())
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler> {
        self.derive(self.bound.with_attrs(attrs))
    }

    fn with_group(&self, name: &str) -> Arc<dyn Handler> {
        self.derive(self.bound.with_group(name))
    }
}
