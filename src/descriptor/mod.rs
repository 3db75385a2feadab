//! Package descriptor subsystem
//!
//! Reading, parsing, and memoizing `package.json` descriptors.
//!
//! # Contract
//!
//! - A descriptor is read and parsed at most once per cache lifetime.
//! - The cache is the sole authority: for a given descriptor path there is
//!   at most one [`PackageConfig`] instance, shared by every lookup.
//! - A missing descriptor is a normal, cached negative result; a present
//!   but unparsable one is a cached failure that every lookup re-surfaces.

pub mod cache;
pub mod config;
pub mod store;

pub use cache::{CachedResolution, DescriptorCache};
pub use config::{PackageConfig, PackageType};
pub use store::{DescriptorSource, DescriptorStore, OsSource, ReadOutcome};
