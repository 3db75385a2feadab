//! Configuration management for pkgscope

pub mod schema;

pub use schema::ToolConfig;

use crate::error::{PkgscopeError, PkgscopeResult};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Project-local configuration file name
const LOCAL_CONFIG_FILE: &str = "pkgscope.json";

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager with default path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pkgscope")
            .join("config.json")
    }

    /// Find a project-local `pkgscope.json` in `dir` or its ancestors
    pub fn find_local_config(dir: &Path) -> Option<PathBuf> {
        let mut current = Some(dir);
        while let Some(dir) = current {
            let candidate = dir.join(LOCAL_CONFIG_FILE);
            if candidate.is_file() {
                return Some(candidate);
            }
            current = dir.parent();
        }
        None
    }

    /// Load configuration, using defaults if no file exists
    pub fn load(&self) -> PkgscopeResult<ToolConfig> {
        if !self.config_path.exists() {
            debug!("Config file not found, using defaults");
            return Ok(ToolConfig::default());
        }
        Self::load_from_file(&self.config_path)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> PkgscopeResult<ToolConfig> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| PkgscopeError::io(format!("reading config from {}", path.display()), e))?;

        serde_json::from_str(&content).map_err(|e| PkgscopeError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
