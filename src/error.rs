//! Error types for pkgscope
//!
//! All modules use `PkgscopeResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pkgscope operations
pub type PkgscopeResult<T> = Result<T, PkgscopeError>;

/// All errors that can occur in pkgscope
#[derive(Error, Debug)]
pub enum PkgscopeError {
    // Descriptor errors
    #[error("Invalid package config {path}{}: {message}", base_suffix(.base))]
    InvalidPackageConfig {
        path: PathBuf,
        base: Option<String>,
        message: String,
    },

    #[error("Integrity check failed for {url}: {reason}")]
    IntegrityViolation { url: String, reason: String },

    #[error("Invalid policy manifest at {path}: {reason}")]
    PolicyInvalid { path: PathBuf, reason: String },

    // Resolution errors
    #[error("Invalid path: {path}: {reason}")]
    PathInvalid { path: PathBuf, reason: String },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    // Task runner errors
    #[error("No package.json found from {0}")]
    NoDescriptor(PathBuf),

    #[error("package.json at {0} has no \"scripts\" object")]
    NoScripts(PathBuf),

    #[error("Script not found: {name}. Available: {available}")]
    ScriptNotFound { name: String, available: String },

    #[error("Script \"{name}\" exited with code {code}")]
    ScriptFailed { name: String, code: i32 },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),
}

fn base_suffix(base: &Option<String>) -> String {
    match base {
        Some(base) => format!(" while resolving from {base}"),
        None => String::new(),
    }
}

impl PkgscopeError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a malformed-descriptor error
    pub fn invalid_config(
        path: impl Into<PathBuf>,
        base: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidPackageConfig {
            path: path.into(),
            base,
            message: message.into(),
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::InvalidPackageConfig { .. } => {
                Some("Check the descriptor for a JSON syntax error")
            }
            Self::NoDescriptor(_) => Some("Run from a directory governed by a package.json"),
            Self::NoScripts(_) => Some("Add a \"scripts\" object to package.json"),
            Self::PolicyInvalid { .. } => Some("Policy manifests are JSON: {\"resources\": {...}}"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PkgscopeError::invalid_config("/pkg/package.json", None, "unexpected token");
        assert!(err.to_string().contains("Invalid package config"));
        assert!(err.to_string().contains("/pkg/package.json"));
    }

    #[test]
    fn error_display_with_base() {
        let err = PkgscopeError::invalid_config(
            "/pkg/package.json",
            Some("/app/main.js".to_string()),
            "bad",
        );
        assert!(err.to_string().contains("while resolving from /app/main.js"));
    }

    #[test]
    fn error_hint() {
        let err = PkgscopeError::NoScripts(PathBuf::from("/pkg/package.json"));
        assert_eq!(err.hint(), Some("Add a \"scripts\" object to package.json"));
    }
}
