//! Command implementations

mod completions;
mod config;
mod read;
mod resolve;
mod run;

pub use completions::completions;
pub use config::config;
pub use read::read;
pub use resolve::resolve;
pub use run::run;

use crate::classify::ModuleKind;
use crate::descriptor::PackageConfig;
use console::style;

/// Print a resolved configuration for humans
pub(crate) fn print_config(config: &PackageConfig, kind: Option<ModuleKind>) {
    println!(
        "{} {}",
        style("descriptor:").bold(),
        config.descriptor_path().display()
    );
    println!(
        "{} {}",
        style("exists:").bold(),
        if config.exists() {
            style("yes").green()
        } else {
            style("no").yellow()
        }
    );
    if let Some(name) = config.name() {
        println!("{} {}", style("name:").bold(), name);
    }
    if let Some(main) = config.main() {
        println!("{} {}", style("main:").bold(), main);
    }
    println!("{} {}", style("type:").bold(), config.package_type());
    if config.has_exports() {
        match config.exports() {
            Ok(Some(exports)) => println!("{} {}", style("exports:").bold(), exports),
            _ => println!("{} {}", style("exports:").bold(), style("<invalid>").red()),
        }
    }
    if config.has_imports() {
        match config.imports() {
            Ok(Some(imports)) => println!("{} {}", style("imports:").bold(), imports),
            _ => println!("{} {}", style("imports:").bold(), style("<invalid>").red()),
        }
    }
    if let Some(kind) = kind {
        println!("{} {}", style("module kind:").bold(), style(kind).cyan());
    }
}

/// Machine-readable form of a resolution
pub(crate) fn config_json(config: &PackageConfig, kind: Option<ModuleKind>) -> serde_json::Value {
    let mut json = config.to_json();
    if let Some(kind) = kind {
        json["moduleKind"] = serde_json::Value::String(kind.as_str().to_string());
    }
    json
}
