//! Completions command - generate shell completion scripts

use crate::cli::args::{Cli, CompletionsArgs};
use crate::error::PkgscopeResult;
use clap::CommandFactory;

/// Execute the completions command
pub fn completions(args: CompletionsArgs) -> PkgscopeResult<()> {
    let mut command = Cli::command();
    clap_complete::generate(args.shell, &mut command, "pkgscope", &mut std::io::stdout());
    Ok(())
}
