//! YAML configuration files
//!
//! User-level config lives at `<config dir>/ctxlog/config.yaml`
//! (`~/.config/ctxlog/config.yaml` on Linux).

use std::fs;
use std::path::{Path, PathBuf};

use super::error::ConfigResult;
use super::settings::LogConfig;

impl LogConfig {
    /// Path of the user-level config file
    pub fn user_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
        config_dir.join("ctxlog").join("config.yaml")
    }

    /// Load a YAML config file
    ///
    /// A missing file is not an error and yields the defaults. Fields absent
    /// from the file keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Write this config as YAML, creating parent directories
    pub fn save(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    /// The user config file, then the environment on top
    pub fn load() -> ConfigResult<Self> {
        Self::from_file(Self::user_path())?.apply_env(|name| std::env::var(name).ok())
    }
}
