//! Descriptor memoization
//!
//! Append-only map from canonical descriptor path to its resolution. A
//! descriptor is read and parsed at most once per cache lifetime; negative
//! results and parse failures are memoized the same way as successes, so the
//! second lookup of any path costs a map probe and nothing else.

use crate::descriptor::config::PackageConfig;
use crate::platform;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A memoized resolution outcome
#[derive(Debug, Clone)]
pub enum CachedResolution {
    /// Usable (or canonical absent) configuration
    Config(Arc<PackageConfig>),
    /// The descriptor was present but unparsable; final for this cache
    Malformed { message: String },
}

/// Process-scoped descriptor cache.
///
/// An explicit service object owned by the resolver — tests construct a
/// fresh instance per test. No eviction, no TTL; entries live as long as
/// the cache does.
#[derive(Debug, Default)]
pub struct DescriptorCache {
    entries: HashMap<PathBuf, CachedResolution>,
}

impl DescriptorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the memoized resolution for a descriptor path
    pub fn get(&self, path: &Path) -> Option<CachedResolution> {
        self.entries.get(&platform::canonical_key(path)).cloned()
    }

    /// Whether a resolution is memoized for this path
    pub fn has(&self, path: &Path) -> bool {
        self.entries.contains_key(&platform::canonical_key(path))
    }

    /// Memoize a resolution. The first write for a key wins; a key is
    /// never overwritten.
    pub fn insert(&mut self, path: &Path, resolution: CachedResolution) {
        self.entries
            .entry(platform::canonical_key(path))
            .or_insert(resolution);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
