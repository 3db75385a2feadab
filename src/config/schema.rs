//! Configuration schema for pkgscope
//!
//! Configuration is stored as JSON at `~/.config/pkgscope/config.json`, or
//! project-locally as `pkgscope.json`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Consult the syntax-detection hint when no type is declared
    pub detect_syntax: bool,

    /// Resolve in ES-module context by default
    pub esm: bool,

    /// Integrity policy manifest to load at startup
    pub policy: Option<PathBuf>,

    /// Emit machine-readable JSON instead of styled text
    pub json: bool,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            detect_syntax: false,
            esm: false,
            policy: None,
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ToolConfig::default();
        assert!(!config.detect_syntax);
        assert!(!config.esm);
        assert!(config.policy.is_none());
        assert!(!config.json);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: ToolConfig = serde_json::from_str(r#"{"detect_syntax":true}"#).unwrap();
        assert!(config.detect_syntax);
        assert!(!config.esm);
        assert!(config.policy.is_none());
    }

    #[test]
    fn roundtrip() {
        let mut config = ToolConfig::default();
        config.policy = Some(PathBuf::from("/etc/pkgscope/policy.json"));
        let json = serde_json::to_string(&config).unwrap();
        let loaded: ToolConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.policy, config.policy);
    }
}
