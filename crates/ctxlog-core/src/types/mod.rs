//! Core types: levels, attributes and records

mod attr;
mod level;
mod record;

pub use attr::{args_to_attrs, Attr, Value, BAD_KEY, MISSING_VALUE};
pub use level::{Level, ParseLevelError};
pub use record::Record;
