//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// pkgscope - Package descriptor resolver
///
/// Determines which package.json governs a module path and how the
/// module will be interpreted.
#[derive(Parser, Debug)]
#[command(name = "pkgscope")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "PKGSCOPE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Skip local pkgscope.json discovery
    #[arg(long, global = true)]
    pub no_local: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the descriptor governing a module path
    Resolve(ResolveArgs),

    /// Read a single descriptor file directly
    Read(ReadArgs),

    /// Run a script from the nearest package.json
    Run(RunArgs),

    /// Show configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Syntax-detection hint supplied on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintArg {
    /// Source uses ES-module syntax
    Module,
    /// Source uses script-style syntax
    Commonjs,
    /// Source is valid under both interpretations
    Ambiguous,
}

/// Arguments for the resolve command
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Module path to resolve (absolute, or relative to the working directory)
    pub path: PathBuf,

    /// Resolve in ES-module context
    #[arg(long)]
    pub esm: bool,

    /// Consult the syntax hint when no type is declared
    #[arg(long)]
    pub detect_syntax: bool,

    /// Syntax-detection result for the module source
    #[arg(long, value_enum)]
    pub hint: Option<HintArg>,

    /// Integrity policy manifest to enforce
    #[arg(long)]
    pub policy: Option<PathBuf>,

    /// Specifier being resolved (enriches error messages)
    #[arg(long)]
    pub specifier: Option<String>,

    /// Module the resolution originates from (enriches error messages)
    #[arg(long)]
    pub base: Option<String>,

    /// Emit machine-readable JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the read command
#[derive(Parser, Debug)]
pub struct ReadArgs {
    /// Descriptor file to read
    pub descriptor: PathBuf,

    /// Read in ES-module context
    #[arg(long)]
    pub esm: bool,

    /// Integrity policy manifest to enforce
    #[arg(long)]
    pub policy: Option<PathBuf>,

    /// Emit machine-readable JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Script name; omit to list available scripts
    pub script: Option<String>,

    /// Extra arguments appended to the script command
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,

    /// Directory to start the descriptor search from
    #[arg(short, long)]
    pub dir: Option<PathBuf>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommand actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the configuration file path
    Path,
}

/// Arguments for the completions command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
