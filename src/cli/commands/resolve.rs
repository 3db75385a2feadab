//! Resolve command - find the descriptor governing a module path

use super::{config_json, print_config};
use crate::classify::{self, SyntaxHint};
use crate::cli::args::{HintArg, ResolveArgs};
use crate::config::ToolConfig;
use crate::error::{PkgscopeError, PkgscopeResult};
use crate::policy::IntegrityManifest;
use crate::resolver::{PackageResolver, ResolveContext};
use std::path::PathBuf;

impl From<HintArg> for SyntaxHint {
    fn from(hint: HintArg) -> Self {
        match hint {
            HintArg::Module => Self::Module,
            HintArg::Commonjs => Self::CommonJs,
            HintArg::Ambiguous => Self::Ambiguous,
        }
    }
}

/// Execute the resolve command
pub fn resolve(args: ResolveArgs, config: &ToolConfig) -> PkgscopeResult<()> {
    let is_esm = args.esm || config.esm;
    let detect = args.detect_syntax || config.detect_syntax;
    let json = args.json || config.json;

    let mut resolver = PackageResolver::with_os_source();
    if let Some(policy_path) = args.policy.as_deref().or(config.policy.as_deref()) {
        resolver = resolver.with_policy(IntegrityManifest::load(policy_path)?);
    }

    let module_path = absolutize(args.path)?;
    let ctx = ResolveContext {
        specifier: args.specifier,
        base: args.base,
        is_esm,
    };

    let package = resolver.resolve_for(&module_path, &ctx)?;
    let kind = classify::decide(&package, args.hint.map(Into::into), detect);

    if json {
        let payload = config_json(&package, Some(kind));
        println!("{}", serde_json::to_string_pretty(&payload).map_err(|e| {
            PkgscopeError::Internal(format!("serializing output: {e}"))
        })?);
    } else {
        print_config(&package, Some(kind));
    }
    Ok(())
}

/// Anchor a relative CLI path to the working directory
pub(crate) fn absolutize(path: PathBuf) -> PkgscopeResult<PathBuf> {
    if path.is_absolute() {
        return Ok(path);
    }
    let cwd = std::env::current_dir()
        .map_err(|e| PkgscopeError::io("getting current directory", e))?;
    Ok(cwd.join(path))
}
