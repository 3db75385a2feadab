//! Module type classification
//!
//! Combines a package's declared type with an optional syntax-detection
//! signal into the final decision the loader acts on. Pure decision
//! function, no state.

use crate::descriptor::config::{PackageConfig, PackageType};

/// Output of the syntax-detection collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxHint {
    /// Source uses ES-module syntax
    Module,
    /// Source uses script-style syntax
    CommonJs,
    /// Source is valid under both interpretations
    Ambiguous,
}

/// Final interpretation of a module file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    Module,
    CommonJs,
}

impl ModuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Module => "module",
            Self::CommonJs => "commonjs",
        }
    }
}

impl std::fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decide the module kind for a file governed by `config`.
///
/// An explicit declared type is authoritative and the hint is ignored.
/// Without a declaration, detection mode consults the hint: ambiguous
/// content runs under the script-style default rather than erroring,
/// since detection exists to permit such content, not to force a choice.
/// With detection disabled the historical default applies.
pub fn decide(
    config: &PackageConfig,
    hint: Option<SyntaxHint>,
    detect_enabled: bool,
) -> ModuleKind {
    match config.package_type() {
        PackageType::Module => ModuleKind::Module,
        PackageType::CommonJs => ModuleKind::CommonJs,
        PackageType::None => {
            if detect_enabled {
                match hint {
                    Some(SyntaxHint::Module) => ModuleKind::Module,
                    Some(SyntaxHint::CommonJs)
                    | Some(SyntaxHint::Ambiguous)
                    | None => ModuleKind::CommonJs,
                }
            } else {
                ModuleKind::CommonJs
            }
        }
    }
}
