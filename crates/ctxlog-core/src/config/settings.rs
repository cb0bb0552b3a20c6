//! Logger settings

use serde::{Deserialize, Serialize};

use super::error::ConfigResult;
use crate::types::Level;

/// Environment variable holding the minimum level (`debug`, `INFO+2`, ...)
pub const ENV_LEVEL: &str = "CTXLOG_LEVEL";

/// Settings for the process logger
///
/// Only the minimum level is configurable; which handler records go to is
/// decided in code with [`set_logger`](crate::set_logger).
///
/// ```yaml
/// level: debug
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Minimum level emitted
    pub level: Level,
}

impl LogConfig {
    /// Defaults overridden by `CTXLOG_LEVEL`
    pub fn from_env() -> ConfigResult<Self> {
        Self::default().apply_env(|name| std::env::var(name).ok())
    }

    /// Override fields from variables found by `lookup`
    ///
    /// Unset variables leave the field as it is.
    pub fn apply_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        if let Some(level) = lookup(ENV_LEVEL) {
            self.level = level.parse()?;
        }
        Ok(self)
    }
}
