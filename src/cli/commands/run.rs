//! Run command - execute a script from the nearest package.json

use crate::cli::args::RunArgs;
use crate::error::{PkgscopeError, PkgscopeResult};
use crate::scripts::{self, ScriptSet};
use console::style;
use std::process::Command;
use tracing::debug;

/// Execute the run command
pub fn run(args: RunArgs) -> PkgscopeResult<()> {
    let start_dir = match args.dir {
        Some(dir) => dir,
        None => std::env::current_dir()
            .map_err(|e| PkgscopeError::io("getting current directory", e))?,
    };

    let scripts = scripts::load_scripts(&start_dir)?;

    let name = match args.script {
        Some(name) => name,
        None => {
            list_scripts(&scripts);
            return Ok(());
        }
    };

    let command = scripts.command(&name)?;
    let full_command = scripts::build_command(command, &args.args);
    println!("{} {}", style(">").dim(), style(&full_command).bold());

    let status = shell_command(&full_command)
        .current_dir(scripts.package_dir())
        .envs(scripts::bin_path_overrides(scripts.package_dir()))
        .status()
        .map_err(|e| PkgscopeError::io(format!("spawning \"{name}\""), e))?;

    if !status.success() {
        return Err(PkgscopeError::ScriptFailed {
            name,
            code: status.code().unwrap_or(-1),
        });
    }
    debug!("Script \"{}\" completed", name);
    Ok(())
}

fn list_scripts(scripts: &ScriptSet) {
    if scripts.is_empty() {
        println!(
            "No scripts in {}",
            scripts.descriptor_path().display()
        );
        return;
    }
    println!(
        "Scripts in {}:",
        style(scripts.descriptor_path().display()).bold()
    );
    for name in scripts.names() {
        println!("  {}", style(name).cyan());
    }
}

fn shell_command(command: &str) -> Command {
    #[cfg(windows)]
    {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").arg(command);
        cmd
    }
    #[cfg(not(windows))]
    {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command);
        cmd
    }
}
