//! Discarding handler

use std::sync::Arc;

use super::traits::{Handler, HandlerResult};
use crate::context::Context;
use crate::types::{Attr, Level, Record};

/// A handler that emits nothing
///
/// Useful for tests or when logging is not needed. `enabled` is always
/// false, so loggers never build records for it.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardHandler;

impl DiscardHandler {
    /// Create a new discarding handler
    pub fn new() -> Self {
        Self
    }
}

impl Handler for DiscardHandler {
    fn enabled(&self, _ctx: &Context, _level: Level) -> bool {
        false
    }

    fn handle(&self, _ctx: &Context, _record: &Record) -> HandlerResult<()> {
        Ok(())
    }

    fn with_attrs(&self, _attrs: Vec<Attr>) -> Arc<dyn Handler> {
        Arc::new(Self)
    }

    fn with_group(&self, _name: &str) -> Arc<dyn Handler> {
        Arc::new(Self)
    }
}
