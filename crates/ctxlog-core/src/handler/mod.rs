//! Handler abstractions and built-in implementations
//!
//! A handler is the sink behind a [`Logger`](crate::Logger). This module provides:
//! - `Handler` trait for implementing custom sinks
//! - Built-in implementations: `TextHandler`, `JsonHandler`, `DiscardHandler`, `MemoryHandler`

mod traits;
mod discard;
mod json;
mod memory;
mod text;

pub use traits::{Handler, HandlerError, HandlerOptions, HandlerResult};
pub use discard::DiscardHandler;
pub use json::JsonHandler;
pub use memory::{CapturedRecord, MemoryHandler};
pub use text::TextHandler;
