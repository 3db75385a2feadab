//! pkgscope - Package Descriptor Resolver
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use pkgscope::cli::{commands, Cli, Commands};
use pkgscope::config::{ConfigManager, ToolConfig};
use pkgscope::error::PkgscopeResult;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> PkgscopeResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("pkgscope=warn"),
        1 => EnvFilter::new("pkgscope=info"),
        _ => EnvFilter::new("pkgscope=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    // Completions don't need config loading
    if let Commands::Completions(args) = cli.command {
        return commands::completions(args);
    }

    let config = load_config(&cli)?;

    match cli.command {
        Commands::Completions(_) => unreachable!("Completions handled above"),
        Commands::Resolve(args) => commands::resolve(args, &config),
        Commands::Read(args) => commands::read(args, &config),
        Commands::Run(args) => commands::run(args),
        Commands::Config(args) => commands::config(args, &config),
    }
}

fn load_config(cli: &Cli) -> PkgscopeResult<ToolConfig> {
    if let Some(ref path) = cli.config {
        return ConfigManager::load_from_file(path);
    }

    if !cli.no_local {
        let cwd = std::env::current_dir()
            .map_err(|e| pkgscope::error::PkgscopeError::io("getting current directory", e))?;
        if let Some(path) = ConfigManager::find_local_config(&cwd) {
            debug!("Found local config: {}", path.display());
            return ConfigManager::load_from_file(&path);
        }
    } else {
        debug!("Local config discovery disabled (--no-local)");
    }

    ConfigManager::new().load()
}
