//! Request-scoped contexts and the logger bound to them
//!
//! - `Context`: immutable key/value chain passed down a call tree
//! - `with_context` / `from_context`: bind and look up the context's logger
//! - `with`, `with_attrs`, `with_group`: enrich the bound logger

mod binding;
mod chain;

pub use binding::{from_context, with, with_attrs, with_context, with_group};
pub use chain::Context;
