//! ctxlog backend for the `log` crate
//!
//! Puts any `log::Log` implementation (env_logger, fern, ...) behind the
//! ctxlog facade. Attributes travel as `log::kv` key/values, so backends with
//! key/value support render them; others still print the message.
//!
//! ```no_run
//! use std::sync::Arc;
//! use ctxlog_core::{Context, Level};
//! use ctxlog_log::LogHandler;
//!
//! env_logger::init();
//!
//! let handler = LogHandler::global().with_min_level(Level::DEBUG);
//! let ctx = ctxlog_core::set_logger(&Context::background(), Arc::new(handler));
//! ctxlog_core::info!(&ctx, "ready");
//! ```

mod fields;
mod handler;
mod level;

pub use handler::LogHandler;
pub use level::to_log_level;
