//! CLI Tooling
//!
//! Command-line interface for decoding shallow-update sections captured from
//! a fetch negotiation.

use crate::config::{ConfigLoader, ShallowConfig};
use crate::error::ApiError;
use crate::logging::LogOverrides;
use crate::shallow::{DecodeOptions, ShallowUpdate};
use crate::tooling::format::{format_shallow_update_json, format_shallow_update_text};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;
use tracing::info;

/// shallow-update CLI - inspect shallow/unshallow negotiation lines
#[derive(Parser)]
#[command(name = "shallow-update")]
#[command(about = "Decode the shallow/unshallow section of a git pkt-line stream")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Logging flags, applied above environment and configuration.
    pub fn log_overrides(&self) -> LogOverrides {
        LogOverrides {
            level: self.log_level.clone(),
            format: self.log_format.clone(),
            output: self.log_output.clone(),
            file: self.log_file.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decode a pkt-line stream and print shallow/unshallow commits
    Decode {
        /// Read from this file instead of stdin
        #[arg(long)]
        input: Option<PathBuf>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
        /// Fail if the stream ends before a flush-pkt
        #[arg(long)]
        require_flush: bool,
    },
    /// Print the effective configuration as JSON
    Config,
}

/// CLI context holding the loaded configuration
pub struct CliContext {
    config: ShallowConfig,
    color: bool,
}

impl CliContext {
    /// Create a new CLI context
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = ConfigLoader::load_optional(config_path.as_deref())?;
        Ok(Self::with_config(config))
    }

    pub fn with_config(config: ShallowConfig) -> Self {
        Self {
            config,
            color: std::env::var_os("NO_COLOR").is_none(),
        }
    }

    /// Disable or enable ANSI styling of text output
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn config(&self) -> &ShallowConfig {
        &self.config
    }

    /// Execute a CLI command, reading decode input from the file or stdin
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Decode {
                input: Some(path),
                format,
                require_flush,
            } => {
                let file = File::open(path).map_err(|e| {
                    ApiError::ConfigError(format!("Failed to open {}: {}", path.display(), e))
                })?;
                self.decode(BufReader::new(file), format, *require_flush)
            }
            Commands::Decode {
                input: None,
                format,
                require_flush,
            } => self.decode(std::io::stdin().lock(), format, *require_flush),
            Commands::Config => serde_json::to_string_pretty(&self.config)
                .map_err(|e| ApiError::ConfigError(format!("Failed to serialize config: {}", e))),
        }
    }

    /// Decode `reader` and render the result in `format`
    pub fn decode<R: Read>(
        &self,
        reader: R,
        format: &str,
        require_flush: bool,
    ) -> Result<String, ApiError> {
        let format = OutputFormat::parse(format)?;
        let options = DecodeOptions {
            require_flush: require_flush || self.config.decode.require_flush,
        };
        let update = ShallowUpdate::decode_reader_with(reader, options)?;
        info!(
            shallows = update.shallows.len(),
            unshallows = update.unshallows.len(),
            "decoded shallow update"
        );
        match format {
            OutputFormat::Text => Ok(format_shallow_update_text(&update, self.color)),
            OutputFormat::Json => format_shallow_update_json(&update),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    fn parse(format: &str) -> Result<Self, ApiError> {
        match format {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(ApiError::ConfigError(format!(
                "Invalid output format: {} (must be 'text' or 'json')",
                other
            ))),
        }
    }
}
