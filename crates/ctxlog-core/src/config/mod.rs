//! Logger configuration
//!
//! The minimum level, resolved in order:
//! - the default (`INFO`)
//! - the user-level YAML file
//! - `CTXLOG_LEVEL`

mod error;
mod file;
mod settings;

pub use error::{ConfigError, ConfigResult};
pub use settings::{LogConfig, ENV_LEVEL};
