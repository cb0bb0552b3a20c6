//! ctxlog core
//!
//! Context-scoped structured logging.
//! A logger travels down a call tree inside a request [`Context`], picks up
//! attributes along the way, and emits leveled records through a pluggable
//! [`Handler`]. Swapping the handler (text, JSON, the `log` crate, ...) does
//! not change any call site.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use ctxlog_core::{Context, MemoryHandler};
//!
//! let handler = MemoryHandler::new();
//!
//! // Once at startup: install as default and bind to the root context
//! let ctx = ctxlog_core::set_logger(&Context::background(), Arc::new(handler.clone()));
//!
//! // Per request: enrich, then pass the context down
//! let ctx = ctxlog_core::with(&ctx, &["req_id".into(), "abc".into()]);
//!
//! // Anywhere below
//! ctxlog_core::debug!(&ctx, "msg", "k", "v");
//!
//! let record = handler.last().unwrap();
//! assert!(record.has("req_id", "abc"));
//! assert!(record.has("k", "v"));
//! ```

pub mod types;
pub mod context;
pub mod handler;
pub mod config;
pub mod facade;
mod default;
mod logger;

// Re-export commonly used types
pub use types::{args_to_attrs, Attr, Level, ParseLevelError, Record, Value, BAD_KEY, MISSING_VALUE};

pub use context::{from_context, with, with_attrs, with_context, with_group, Context};

pub use handler::{
    CapturedRecord, DiscardHandler, Handler, HandlerError, HandlerOptions, HandlerResult,
    JsonHandler, MemoryHandler, TextHandler,
};

pub use config::{ConfigError, ConfigResult, LogConfig};

pub use default::{default_logger, set_default};
pub use facade::{debug, error, info, log, log_attrs, set_logger, warn};
pub use logger::Logger;
