//! Config command - show configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{ConfigManager, ToolConfig};
use crate::error::{PkgscopeError, PkgscopeResult};

/// Execute the config command
pub fn config(args: ConfigArgs, config: &ToolConfig) -> PkgscopeResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(config),
        Some(ConfigAction::Path) => {
            println!("{}", ConfigManager::new().path().display());
            Ok(())
        }
    }
}

fn show_config(config: &ToolConfig) -> PkgscopeResult<()> {
    let json = serde_json::to_string_pretty(config)
        .map_err(|e| PkgscopeError::Internal(format!("serializing config: {e}")))?;
    println!("{json}");
    Ok(())
}
