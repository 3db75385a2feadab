//! Raw descriptor reads
//!
//! Reads a single `package.json` and extracts only the recognized top-level
//! fields. `exports` and `imports` are kept as raw JSON text so nothing
//! nested is materialized until a consumer asks for it.

use crate::error::{PkgscopeError, PkgscopeResult};
use crate::platform;
use serde::Deserialize;
use serde_json::value::RawValue;
use std::io;
use std::path::Path;

/// What the filesystem returned for a descriptor path
#[derive(Debug)]
pub enum SourceRead {
    /// No file at this path
    Missing,
    /// Path exists but is a directory
    Directory,
    /// File content
    Content(Vec<u8>),
}

/// Filesystem collaborator behind the store.
///
/// The OS implementation is [`OsSource`]; tests inject in-memory and
/// read-counting sources to verify the read-at-most-once guarantee.
pub trait DescriptorSource {
    /// Read the descriptor bytes at a platform-namespaced path
    fn read(&self, namespaced_path: &Path) -> io::Result<SourceRead>;
}

/// `std::fs`-backed descriptor source
#[derive(Debug, Default)]
pub struct OsSource;

impl DescriptorSource for OsSource {
    fn read(&self, path: &Path) -> io::Result<SourceRead> {
        // Explicit metadata check: on some platforms a raw open of a
        // directory succeeds instead of failing with EISDIR.
        match std::fs::metadata(path) {
            Ok(meta) if meta.is_dir() => return Ok(SourceRead::Directory),
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(SourceRead::Missing),
            Err(e) => return Err(e),
        }
        match std::fs::read(path) {
            Ok(bytes) => Ok(SourceRead::Content(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(SourceRead::Missing),
            Err(e) => Err(e),
        }
    }
}

/// A recognized field kept in its wire form
#[derive(Debug, Clone)]
pub enum RawField {
    /// The field was a plain JSON string
    Text(String),
    /// The field was structured JSON, not yet decoded
    Json(Box<RawValue>),
}

impl RawField {
    /// Whether structured access requires a JSON decode
    pub fn needs_decode(&self) -> bool {
        matches!(self, Self::Json(_))
    }
}

/// Recognized top-level fields of a parsed descriptor
#[derive(Debug)]
pub struct RawFields {
    pub name: Option<String>,
    pub main: Option<String>,
    /// Declared `type` string, verbatim; `None` when absent or not a string
    pub package_type: Option<String>,
    pub exports: Option<RawField>,
    pub imports: Option<RawField>,
    /// At least one recognized key was present
    pub contains_keys: bool,
    /// Exact content that was read, for the integrity gate
    pub content: String,
}

/// Outcome of reading one descriptor path
#[derive(Debug)]
pub enum ReadOutcome {
    /// File does not exist
    Missing,
    /// Path exists but is a directory
    Directory,
    /// File exists but is empty (tolerated, no usable descriptor)
    Empty,
    /// Top-level JSON does not parse
    Malformed { message: String },
    /// Top-level JSON parses but is not an object (tolerated)
    NotAnObject,
    /// Object with its recognized fields extracted
    Fields(Box<RawFields>),
}

// Only the recognized keys are extracted; everything else is skipped.
// Values stay raw so a non-string `name` or `type` degrades instead of
// failing the whole read.
#[derive(Deserialize)]
struct TopLevel {
    name: Option<Box<RawValue>>,
    main: Option<Box<RawValue>>,
    #[serde(rename = "type")]
    package_type: Option<Box<RawValue>>,
    exports: Option<Box<RawValue>>,
    imports: Option<Box<RawValue>>,
}

/// Reads descriptors through an injected [`DescriptorSource`]
pub struct DescriptorStore {
    source: Box<dyn DescriptorSource>,
}

impl DescriptorStore {
    /// Create a store over an injected source
    pub fn new(source: Box<dyn DescriptorSource>) -> Self {
        Self { source }
    }

    /// Create a store backed by the real filesystem
    pub fn with_os_source() -> Self {
        Self::new(Box::new(OsSource))
    }

    /// Read and partially parse the descriptor at `path`.
    ///
    /// Never errors for a missing or malformed descriptor; the outcome
    /// taxonomy carries those cases so the resolver can decide what each
    /// one means in context.
    pub fn read(&self, path: &Path) -> PkgscopeResult<ReadOutcome> {
        let namespaced = platform::to_namespaced_path(path);
        let raw = self
            .source
            .read(&namespaced)
            .map_err(|e| PkgscopeError::io(format!("reading descriptor {}", path.display()), e))?;

        let bytes = match raw {
            SourceRead::Missing => return Ok(ReadOutcome::Missing),
            SourceRead::Directory => return Ok(ReadOutcome::Directory),
            SourceRead::Content(bytes) => bytes,
        };

        let content = match String::from_utf8(bytes) {
            Ok(content) => content,
            Err(e) => {
                return Ok(ReadOutcome::Malformed {
                    message: format!("invalid UTF-8: {e}"),
                })
            }
        };

        let text = content.trim_start_matches('\u{feff}');
        if text.trim().is_empty() {
            return Ok(ReadOutcome::Empty);
        }

        let top: TopLevel = match serde_json::from_str(text) {
            Ok(top) => top,
            Err(e) if e.is_data() => return Ok(ReadOutcome::NotAnObject),
            Err(e) => {
                return Ok(ReadOutcome::Malformed {
                    message: e.to_string(),
                })
            }
        };

        let contains_keys = top.name.is_some()
            || top.main.is_some()
            || top.package_type.is_some()
            || top.exports.is_some()
            || top.imports.is_some();

        Ok(ReadOutcome::Fields(Box::new(RawFields {
            name: top.name.as_deref().and_then(string_value),
            main: top.main.as_deref().and_then(string_value),
            package_type: top.package_type.as_deref().and_then(string_value),
            exports: top.exports.map(raw_field),
            imports: top.imports.map(raw_field),
            contains_keys,
            content,
        })))
    }
}

/// Decode a raw value only if it is a JSON string
fn string_value(raw: &RawValue) -> Option<String> {
    serde_json::from_str(raw.get()).ok()
}

/// Keep string fields as text; everything else stays raw for later decode
fn raw_field(raw: Box<RawValue>) -> RawField {
    if raw.get().starts_with('"') {
        if let Ok(text) = serde_json::from_str(raw.get()) {
            return RawField::Text(text);
        }
    }
    RawField::Json(raw)
}
