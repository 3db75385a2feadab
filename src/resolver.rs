//! Package configuration resolution
//!
//! The core algorithm: given a module path, locate the nearest governing
//! descriptor, obtain it through the cache, and expose the normalized
//! configuration. Every module load goes through here, so the contract is
//! strict: one read+parse per descriptor path, one `PackageConfig` instance
//! per path, and the same answer every time.
//!
//! Resolution runs to completion synchronously — there is no suspension
//! between the cache probe and the insert, which is what makes the
//! read-once guarantee hold without locking.

use crate::descriptor::cache::{CachedResolution, DescriptorCache};
use crate::descriptor::config::PackageConfig;
use crate::descriptor::store::{DescriptorStore, RawFields, ReadOutcome};
use crate::error::{PkgscopeError, PkgscopeResult};
use crate::platform::{self, Capabilities};
use crate::policy::IntegrityManifest;
use std::cell::RefCell;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Descriptor file name probed in every ancestor directory
pub const DESCRIPTOR_FILE: &str = "package.json";

/// Caller intent for one resolution request.
///
/// `specifier` and `base` only enrich error messages; `is_esm` feeds the
/// validity decision on platforms with the directory-open quirk.
#[derive(Debug, Clone, Default)]
pub struct ResolveContext {
    /// Specifier being resolved, if any
    pub specifier: Option<String>,
    /// Path or URL of the module that triggered the resolution
    pub base: Option<String>,
    /// Whether this lookup serves an ES-module resolution
    pub is_esm: bool,
}

impl ResolveContext {
    /// Context for an ES-module resolution
    pub fn esm() -> Self {
        Self {
            is_esm: true,
            ..Self::default()
        }
    }

    /// Context for a script-style (CommonJS) resolution
    pub fn commonjs() -> Self {
        Self::default()
    }

    pub fn with_specifier(mut self, specifier: impl Into<String>) -> Self {
        self.specifier = Some(specifier.into());
        self
    }

    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    // Human-readable origin for error messages
    fn origin(&self) -> Option<String> {
        match (&self.specifier, &self.base) {
            (Some(specifier), Some(base)) => {
                Some(format!("\"{specifier}\" imported from {base}"))
            }
            (Some(specifier), None) => Some(format!("\"{specifier}\"")),
            (None, Some(base)) => Some(base.clone()),
            (None, None) => None,
        }
    }
}

/// Resolves module paths to their governing [`PackageConfig`]
pub struct PackageResolver {
    store: DescriptorStore,
    cache: RefCell<DescriptorCache>,
    capabilities: Capabilities,
    policy: Option<IntegrityManifest>,
}

impl PackageResolver {
    /// Create a resolver over an injected store
    pub fn new(store: DescriptorStore, capabilities: Capabilities) -> Self {
        Self {
            store,
            cache: RefCell::new(DescriptorCache::new()),
            capabilities,
            policy: None,
        }
    }

    /// Create a resolver backed by the real filesystem
    pub fn with_os_source() -> Self {
        Self::new(DescriptorStore::with_os_source(), Capabilities::detect())
    }

    /// Attach an integrity policy. Every descriptor accepted afterwards
    /// must match the manifest.
    pub fn with_policy(mut self, policy: IntegrityManifest) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Number of memoized descriptor paths
    pub fn cached_len(&self) -> usize {
        self.cache.borrow().len()
    }

    /// Find the nearest descriptor governing `module_path`.
    ///
    /// Walks ancestor directories from the module's parent upward; the first
    /// existing descriptor wins. The walk ends at the filesystem root or at
    /// a `node_modules` directory (a package boundary). When nothing
    /// governs the path, the canonical `exists = false` record for the
    /// first probed candidate is returned.
    pub fn resolve_for(
        &self,
        module_path: &Path,
        ctx: &ResolveContext,
    ) -> PkgscopeResult<Arc<PackageConfig>> {
        if !module_path.is_absolute() {
            return Err(PkgscopeError::PathInvalid {
                path: module_path.to_path_buf(),
                reason: "module path must be absolute".to_string(),
            });
        }
        let start_dir = match module_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => {
                return Err(PkgscopeError::PathInvalid {
                    path: module_path.to_path_buf(),
                    reason: "module path has no parent directory".to_string(),
                })
            }
        };

        let mut dir = Some(start_dir);
        while let Some(current) = dir {
            if is_package_boundary(current) {
                break;
            }
            let candidate = current.join(DESCRIPTOR_FILE);
            let config = self.read_descriptor(&candidate, ctx)?;
            if config.exists() {
                debug!(
                    "Resolved {} to descriptor {}",
                    module_path.display(),
                    candidate.display()
                );
                return Ok(config);
            }
            dir = current.parent();
        }

        debug!("No descriptor governs {}", module_path.display());
        let first_candidate = start_dir.join(DESCRIPTOR_FILE);
        if is_package_boundary(start_dir) {
            // Never probed: the module sits directly inside a package
            // boundary directory, which no descriptor can govern.
            return Ok(Arc::new(PackageConfig::absent(first_candidate)));
        }
        // Cache hit from the walk above; same instance, no extra read.
        self.read_descriptor(&first_candidate, ctx)
    }

    /// Obtain the configuration at a known descriptor path.
    ///
    /// Never errors for a missing descriptor — that is a normal, cached
    /// negative result. Errors for a present-but-malformed descriptor and
    /// for an integrity rejection.
    pub fn read_descriptor(
        &self,
        descriptor_path: &Path,
        ctx: &ResolveContext,
    ) -> PkgscopeResult<Arc<PackageConfig>> {
        if let Some(entry) = self.cache.borrow().get(descriptor_path) {
            return self.unpack(descriptor_path, ctx, entry);
        }

        let outcome = self.store.read(descriptor_path)?;
        let resolution = match outcome {
            ReadOutcome::Malformed { message } => CachedResolution::Malformed { message },
            ReadOutcome::Missing
            | ReadOutcome::Directory
            | ReadOutcome::Empty
            | ReadOutcome::NotAnObject => {
                CachedResolution::Config(Arc::new(PackageConfig::absent(descriptor_path)))
            }
            ReadOutcome::Fields(fields) => self.normalize(descriptor_path, ctx, *fields)?,
        };

        self.cache
            .borrow_mut()
            .insert(descriptor_path, resolution.clone());
        self.unpack(descriptor_path, ctx, resolution)
    }

    // Turn extracted fields into a cacheable resolution. Errors returned
    // here are fatal to the resolution and are not memoized (integrity);
    // parse failures are memoized by the caller via `Malformed`.
    fn normalize(
        &self,
        descriptor_path: &Path,
        ctx: &ResolveContext,
        fields: RawFields,
    ) -> PkgscopeResult<CachedResolution> {
        let RawFields {
            name,
            main,
            package_type,
            exports,
            imports,
            contains_keys,
            content,
        } = fields;

        // Platforms where a directory open can spuriously succeed keep the
        // historical keys-based validity signal for non-ESM lookups only.
        let valid = if self.capabilities.tolerates_dir_open && !ctx.is_esm {
            contains_keys
        } else {
            true
        };
        if !valid {
            return Ok(CachedResolution::Config(Arc::new(PackageConfig::absent(
                descriptor_path,
            ))));
        }

        let config = PackageConfig::from_fields(
            descriptor_path,
            name,
            main,
            package_type.as_deref(),
            exports,
            imports,
        );

        // Fields flagged as structured JSON are decoded now so a bad
        // substring fails the resolution itself. The failure is memoized:
        // the parse outcome is final for this cache.
        if let Err(err) = config.prime_flagged() {
            let message = match err {
                PkgscopeError::InvalidPackageConfig { message, .. } => message,
                other => return Err(other),
            };
            self.cache.borrow_mut().insert(
                descriptor_path,
                CachedResolution::Malformed {
                    message: message.clone(),
                },
            );
            return Err(PkgscopeError::invalid_config(
                descriptor_path,
                ctx.origin(),
                message,
            ));
        }

        if let Some(policy) = &self.policy {
            let url = platform::to_file_url(descriptor_path);
            policy.assert_integrity(&url, content.as_bytes())?;
        }

        Ok(CachedResolution::Config(Arc::new(config)))
    }

    fn unpack(
        &self,
        descriptor_path: &Path,
        ctx: &ResolveContext,
        entry: CachedResolution,
    ) -> PkgscopeResult<Arc<PackageConfig>> {
        match entry {
            CachedResolution::Config(config) => Ok(config),
            CachedResolution::Malformed { message } => Err(PkgscopeError::invalid_config(
                descriptor_path,
                ctx.origin(),
                message,
            )),
        }
    }
}

fn is_package_boundary(dir: &Path) -> bool {
    dir.file_name().is_some_and(|name| name == "node_modules")
}
