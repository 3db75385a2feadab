//! Resolved package configuration
//!
//! A [`PackageConfig`] is immutable once constructed; the cache hands out the
//! same instance for every lookup of the same descriptor path. The only
//! mutation it ever sees is the write-once memoization of a decoded
//! `exports`/`imports` value.

use crate::descriptor::store::RawField;
use crate::error::{PkgscopeError, PkgscopeResult};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Declared module type of a package
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageType {
    /// `"type": "commonjs"`
    CommonJs,
    /// `"type": "module"`
    Module,
    /// Absent, or an unrecognized declaration
    None,
}

impl PackageType {
    /// Map a declared `type` string to its recognized value.
    ///
    /// Unknown strings map to `None` for forward compatibility; a future
    /// `type` value must not break existing packages.
    pub fn from_declared(declared: Option<&str>) -> Self {
        match declared {
            Some("commonjs") => Self::CommonJs,
            Some("module") => Self::Module,
            _ => Self::None,
        }
    }

    /// Whether the package declared a recognized type
    pub fn is_explicit(&self) -> bool {
        !matches!(self, Self::None)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CommonJs => "commonjs",
            Self::Module => "module",
            Self::None => "none",
        }
    }
}

impl std::fmt::Display for PackageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// Write-once slot holding the structured form of exports/imports.
// A decode failure is cached too; it is never re-attempted.
#[derive(Debug, Default)]
struct LazyField {
    raw: Option<RawField>,
    decoded: OnceLock<Result<Value, String>>,
}

impl LazyField {
    fn absent() -> Self {
        Self::default()
    }

    fn from_raw(raw: Option<RawField>) -> Self {
        Self {
            raw,
            decoded: OnceLock::new(),
        }
    }

    fn needs_decode(&self) -> bool {
        self.raw.as_ref().is_some_and(RawField::needs_decode)
    }

    fn is_present(&self) -> bool {
        self.raw.is_some()
    }

    fn structured(&self, descriptor_path: &Path) -> PkgscopeResult<Option<&Value>> {
        let raw = match &self.raw {
            Some(raw) => raw,
            None => return Ok(None),
        };
        let decoded = self.decoded.get_or_init(|| match raw {
            RawField::Json(raw) => {
                serde_json::from_str(raw.get()).map_err(|e| e.to_string())
            }
            // A plain string whose content is JSON decodes to that value;
            // otherwise the string itself is the value.
            RawField::Text(text) => Ok(serde_json::from_str(text)
                .unwrap_or_else(|_| Value::String(text.clone()))),
        });
        match decoded {
            Ok(value) => Ok(Some(value)),
            Err(message) => Err(PkgscopeError::invalid_config(
                descriptor_path,
                None,
                message.clone(),
            )),
        }
    }
}

/// The resolved configuration of one descriptor path
#[derive(Debug)]
pub struct PackageConfig {
    descriptor_path: PathBuf,
    exists: bool,
    name: Option<String>,
    main: Option<String>,
    package_type: PackageType,
    exports: LazyField,
    imports: LazyField,
}

impl PackageConfig {
    /// The canonical record for a path with no usable descriptor
    pub fn absent(descriptor_path: impl Into<PathBuf>) -> Self {
        Self {
            descriptor_path: descriptor_path.into(),
            exists: false,
            name: None,
            main: None,
            package_type: PackageType::None,
            exports: LazyField::absent(),
            imports: LazyField::absent(),
        }
    }

    /// Build an existing record from extracted fields
    pub(crate) fn from_fields(
        descriptor_path: impl Into<PathBuf>,
        name: Option<String>,
        main: Option<String>,
        declared_type: Option<&str>,
        exports: Option<RawField>,
        imports: Option<RawField>,
    ) -> Self {
        Self {
            descriptor_path: descriptor_path.into(),
            exists: true,
            name,
            main,
            package_type: PackageType::from_declared(declared_type),
            exports: LazyField::from_raw(exports),
            imports: LazyField::from_raw(imports),
        }
    }

    /// Absolute path of the descriptor file this record describes
    pub fn descriptor_path(&self) -> &Path {
        &self.descriptor_path
    }

    /// Whether a usable descriptor was found at this path
    pub fn exists(&self) -> bool {
        self.exists
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Legacy entry-point field
    pub fn main(&self) -> Option<&str> {
        self.main.as_deref()
    }

    pub fn package_type(&self) -> PackageType {
        self.package_type
    }

    /// Structured `exports`, decoded on first access and memoized
    pub fn exports(&self) -> PkgscopeResult<Option<&Value>> {
        self.exports.structured(&self.descriptor_path)
    }

    /// Structured `imports`, decoded on first access and memoized
    pub fn imports(&self) -> PkgscopeResult<Option<&Value>> {
        self.imports.structured(&self.descriptor_path)
    }

    /// Whether the descriptor declared an `exports` field at all
    pub fn has_exports(&self) -> bool {
        self.exports.is_present()
    }

    /// Whether the descriptor declared an `imports` field at all
    pub fn has_imports(&self) -> bool {
        self.imports.is_present()
    }

    /// Force the decode of fields flagged as structured JSON.
    ///
    /// Called during normalization so a decode failure surfaces from the
    /// resolution itself rather than from a later structured access.
    pub(crate) fn prime_flagged(&self) -> PkgscopeResult<()> {
        if self.exports.needs_decode() {
            self.exports.structured(&self.descriptor_path)?;
        }
        if self.imports.needs_decode() {
            self.imports.structured(&self.descriptor_path)?;
        }
        Ok(())
    }

    /// Machine-readable form for CLI `--json` output
    pub fn to_json(&self) -> Value {
        let field = |lazy: &LazyField| -> Value {
            match lazy.structured(&self.descriptor_path) {
                Ok(Some(value)) => value.clone(),
                _ => Value::Null,
            }
        };
        serde_json::json!({
            "descriptorPath": self.descriptor_path.display().to_string(),
            "exists": self.exists,
            "name": self.name,
            "main": self.main,
            "type": self.package_type.as_str(),
            "exports": field(&self.exports),
            "imports": field(&self.imports),
        })
    }
}
