//! Tooling & Integration Layer
//!
//! CLI entry points that let the generator be driven manually, from an editor
//! post-import hook, or by the watch daemon.

pub mod cli;

pub use cli::{Cli, CliContext, Commands};
