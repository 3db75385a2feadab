//! Integrity policy manifest
//!
//! Optional security mode: descriptors are only trusted after their byte
//! content matches a recorded SHA-256 digest. The manifest is loaded once
//! during bootstrap and passed to the resolver by reference; there is no
//! hidden first-use initialization.

use crate::error::{PkgscopeError, PkgscopeResult};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

const INTEGRITY_PREFIX: &str = "sha256-";

#[derive(Deserialize)]
struct ManifestFile {
    #[serde(default)]
    resources: HashMap<String, ResourceEntry>,
}

#[derive(Deserialize)]
struct ResourceEntry {
    integrity: String,
}

/// Loaded integrity policy
///
/// Maps a resource's canonical `file://` URL to its expected digest,
/// `sha256-<hex>`.
#[derive(Debug)]
pub struct IntegrityManifest {
    path: PathBuf,
    resources: HashMap<String, String>,
}

impl IntegrityManifest {
    /// Load and validate a policy manifest from a JSON file
    pub fn load(path: &Path) -> PkgscopeResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| PkgscopeError::io(format!("reading policy manifest {}", path.display()), e))?;

        let manifest: ManifestFile =
            serde_json::from_str(&content).map_err(|e| PkgscopeError::PolicyInvalid {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let mut resources = HashMap::with_capacity(manifest.resources.len());
        for (url, entry) in manifest.resources {
            let digest = entry
                .integrity
                .strip_prefix(INTEGRITY_PREFIX)
                .ok_or_else(|| PkgscopeError::PolicyInvalid {
                    path: path.to_path_buf(),
                    reason: format!("integrity for {url} must start with \"{INTEGRITY_PREFIX}\""),
                })?;
            if digest.len() != 64 || !digest.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(PkgscopeError::PolicyInvalid {
                    path: path.to_path_buf(),
                    reason: format!("integrity for {url} is not a SHA-256 hex digest"),
                });
            }
            resources.insert(url, digest.to_lowercase());
        }

        debug!("Loaded policy manifest with {} resources", resources.len());
        Ok(Self {
            path: path.to_path_buf(),
            resources,
        })
    }

    /// Build a manifest directly from URL → `sha256-<hex>` pairs
    pub fn from_resources(
        entries: impl IntoIterator<Item = (String, String)>,
    ) -> PkgscopeResult<Self> {
        let mut resources = HashMap::new();
        for (url, integrity) in entries {
            let digest = integrity
                .strip_prefix(INTEGRITY_PREFIX)
                .ok_or_else(|| PkgscopeError::Internal(format!("bad integrity value for {url}")))?;
            resources.insert(url, digest.to_lowercase());
        }
        Ok(Self {
            path: PathBuf::new(),
            resources,
        })
    }

    /// The integrity value for a content blob, `sha256-<hex>`
    pub fn integrity_of(content: &[u8]) -> String {
        format!("{INTEGRITY_PREFIX}{}", hex::encode(Sha256::digest(content)))
    }

    /// Assert that `content` matches the digest recorded for `url`.
    ///
    /// A missing entry is a violation: under an active policy, an unlisted
    /// descriptor is untrusted by definition.
    pub fn assert_integrity(&self, url: &str, content: &[u8]) -> PkgscopeResult<()> {
        let expected = self
            .resources
            .get(url)
            .ok_or_else(|| PkgscopeError::IntegrityViolation {
                url: url.to_string(),
                reason: "no integrity entry in policy manifest".to_string(),
            })?;

        let actual = hex::encode(Sha256::digest(content));
        if &actual != expected {
            return Err(PkgscopeError::IntegrityViolation {
                url: url.to_string(),
                reason: format!("expected sha256-{expected}, got sha256-{actual}"),
            });
        }
        Ok(())
    }

    /// Path the manifest was loaded from (empty for in-memory manifests)
    pub fn path(&self) -> &Path {
        &self.path
    }
}
