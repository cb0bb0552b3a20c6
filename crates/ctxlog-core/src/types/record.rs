//! Log record

use std::panic::Location;
use std::time::SystemTime;

use super::attr::Attr;
use super::level::Level;

/// One emission event
///
/// Built per log call and handed to a handler by reference; handlers that
/// need to keep it must clone it.
#[derive(Debug, Clone)]
pub struct Record {
    pub time: SystemTime,
    pub level: Level,
    pub message: String,
    pub attrs: Vec<Attr>,
    /// Call site of the log statement, when known
    pub source: Option<&'static Location<'static>>,
}

impl Record {
    /// Create a record stamped with the current time
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            time: SystemTime::now(),
            level,
            message: message.into(),
            attrs: Vec::new(),
            source: None,
        }
    }

    /// Append attributes
    pub fn with_attrs(mut self, attrs: impl IntoIterator<Item = Attr>) -> Self {
        self.attrs.extend(attrs);
        self
    }

    /// Set the call site
    pub fn with_source(mut self, source: &'static Location<'static>) -> Self {
        self.source = Some(source);
        self
    }
}
