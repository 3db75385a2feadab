//! Command-line interface for pkgscope

pub mod args;
pub mod commands;

pub use args::{Cli, Commands};
