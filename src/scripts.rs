//! Package script lookup for the task runner
//!
//! Reads the `"scripts"` object of the nearest `package.json` and assembles
//! the shell command to execute. This is a separate full-JSON read, not the
//! recognized-fields path the resolver uses: scripts are not part of the
//! resolution contract.

use crate::error::{PkgscopeError, PkgscopeResult};
use serde_json::Value;
use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Scripts table of one descriptor
#[derive(Debug)]
pub struct ScriptSet {
    descriptor_path: PathBuf,
    scripts: BTreeMap<String, String>,
}

impl ScriptSet {
    /// Descriptor the scripts came from
    pub fn descriptor_path(&self) -> &Path {
        &self.descriptor_path
    }

    /// Directory whose `node_modules/.bin` belongs on PATH
    pub fn package_dir(&self) -> &Path {
        self.descriptor_path
            .parent()
            .unwrap_or(Path::new("."))
    }

    /// Script names in stable order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.scripts.keys().map(String::as_str)
    }

    /// Look up the command for a script name
    pub fn command(&self, name: &str) -> PkgscopeResult<&str> {
        self.scripts
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| PkgscopeError::ScriptNotFound {
                name: name.to_string(),
                available: self
                    .scripts
                    .keys()
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }
}

/// Find the nearest descriptor from `start_dir` upward and load its
/// `"scripts"` object.
pub fn load_scripts(start_dir: &Path) -> PkgscopeResult<ScriptSet> {
    let mut dir = Some(start_dir);
    while let Some(current) = dir {
        let candidate = current.join("package.json");
        if candidate.is_file() {
            return parse_scripts(&candidate);
        }
        dir = current.parent();
    }
    Err(PkgscopeError::NoDescriptor(start_dir.to_path_buf()))
}

fn parse_scripts(descriptor_path: &Path) -> PkgscopeResult<ScriptSet> {
    let content = std::fs::read_to_string(descriptor_path).map_err(|e| {
        PkgscopeError::io(format!("reading {}", descriptor_path.display()), e)
    })?;

    let doc: Value = serde_json::from_str(&content).map_err(|e| {
        PkgscopeError::invalid_config(descriptor_path, None, e.to_string())
    })?;

    let table = match doc.get("scripts") {
        Some(Value::Object(table)) => table,
        _ => return Err(PkgscopeError::NoScripts(descriptor_path.to_path_buf())),
    };

    let scripts = table
        .iter()
        .filter_map(|(name, value)| {
            value
                .as_str()
                .map(|command| (name.clone(), command.to_string()))
        })
        .collect();

    debug!("Loaded scripts from {}", descriptor_path.display());
    Ok(ScriptSet {
        descriptor_path: descriptor_path.to_path_buf(),
        scripts,
    })
}

/// Assemble the full command line: the script body plus any extra
/// arguments passed on the CLI, appended shell-quoted.
pub fn build_command(script: &str, extra_args: &[String]) -> String {
    if extra_args.is_empty() {
        return script.to_string();
    }
    let mut command = String::from(script);
    for arg in extra_args {
        command.push(' ');
        command.push_str(&shell_quote(arg.trim()));
    }
    command
}

fn shell_quote(arg: &str) -> String {
    if !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:@,".contains(c))
    {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

/// Environment overrides that put `node_modules/.bin` first.
///
/// Every environment variable whose name is `PATH` case-insensitively gets
/// the package's bin directory prepended, mirroring how the original task
/// runner patches all `/^path$/i` variables.
pub fn bin_path_overrides(package_dir: &Path) -> Vec<(String, String)> {
    let bin = package_dir.join("node_modules").join(".bin");
    env::vars()
        .filter(|(key, _)| key.eq_ignore_ascii_case("path"))
        .map(|(key, value)| {
            let mut paths = vec![bin.clone()];
            paths.extend(env::split_paths(&value));
            let joined = env::join_paths(paths)
                .map(|v| v.to_string_lossy().into_owned())
                .unwrap_or(value);
            (key, joined)
        })
        .collect()
}
