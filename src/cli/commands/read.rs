//! Read command - inspect a single descriptor file

use super::resolve::absolutize;
use super::{config_json, print_config};
use crate::cli::args::ReadArgs;
use crate::config::ToolConfig;
use crate::error::{PkgscopeError, PkgscopeResult};
use crate::policy::IntegrityManifest;
use crate::resolver::{PackageResolver, ResolveContext};

/// Execute the read command
pub fn read(args: ReadArgs, config: &ToolConfig) -> PkgscopeResult<()> {
    let is_esm = args.esm || config.esm;
    let json = args.json || config.json;

    let mut resolver = PackageResolver::with_os_source();
    if let Some(policy_path) = args.policy.as_deref().or(config.policy.as_deref()) {
        resolver = resolver.with_policy(IntegrityManifest::load(policy_path)?);
    }

    let descriptor_path = absolutize(args.descriptor)?;
    let ctx = ResolveContext {
        specifier: None,
        base: None,
        is_esm,
    };

    let package = resolver.read_descriptor(&descriptor_path, &ctx)?;

    if json {
        let payload = config_json(&package, None);
        println!("{}", serde_json::to_string_pretty(&payload).map_err(|e| {
            PkgscopeError::Internal(format!("serializing output: {e}"))
        })?);
    } else {
        print_config(&package, None);
    }
    Ok(())
}
