//! Tooling Layer
//!
//! CLI surface over the decoder: argument parsing, configuration wiring, and
//! output formatting.

pub mod cli;
pub mod format;

pub use cli::{Cli, CliContext, Commands};
