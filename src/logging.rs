//! Logging System
//!
//! Structured logging built on `tracing`. The library only emits events; the
//! CLI installs a subscriber configured from [`LoggingConfig`] and the
//! `SHALLOW_LOG*` environment variables.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Resolve the log file path with precedence: CLI, SHALLOW_LOG_FILE env, config file, default.
pub fn resolve_log_file_path(
    cli_file: Option<PathBuf>,
    config_file: Option<PathBuf>,
) -> Result<PathBuf, ApiError> {
    let env_file = std::env::var_os("SHALLOW_LOG_FILE").map(PathBuf::from);
    pick_log_file_path(cli_file, env_file, config_file)
}

fn pick_log_file_path(
    cli_file: Option<PathBuf>,
    env_file: Option<PathBuf>,
    config_file: Option<PathBuf>,
) -> Result<PathBuf, ApiError> {
    let chosen = [cli_file, env_file, config_file]
        .into_iter()
        .flatten()
        .find(|p| !p.as_os_str().is_empty());
    match chosen {
        Some(path) => Ok(path),
        None => default_log_file_path(),
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Whether logging is enabled (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stdout, stderr, file, file+stderr
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path when output includes file
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Enable colored output (text format, terminal outputs only)
    #[serde(default = "default_true")]
    pub color: bool,

    /// Module-specific log levels
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

// stdout is reserved for decode output.
fn default_output() -> String {
    "stderr".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: default_true(),
            modules: HashMap::new(),
        }
    }
}

/// Logging values given on the command line
///
/// Each value set here beats both the environment and the configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogOverrides {
    pub level: Option<String>,
    pub format: Option<String>,
    pub output: Option<String>,
    pub file: Option<PathBuf>,
}

/// Initialize the global subscriber
///
/// Priority order (highest to lowest):
/// 1. Command-line overrides
/// 2. Environment variables (SHALLOW_LOG, SHALLOW_LOG_FORMAT, SHALLOW_LOG_OUTPUT, SHALLOW_LOG_FILE)
/// 3. Configuration
/// 4. Defaults
pub fn init_logging(config: Option<&LoggingConfig>, cli: &LogOverrides) -> Result<(), ApiError> {
    let settings = LogSettings::resolve(config, cli, |key| std::env::var(key).ok())?;

    if !settings.enabled {
        return Registry::default()
            .with(EnvFilter::new("off"))
            .try_init()
            .map_err(|e| ApiError::ConfigError(format!("Failed to install logger: {}", e)));
    }

    let filter = EnvFilter::try_new(&settings.filter)
        .map_err(|e| ApiError::ConfigError(format!("Invalid log directive: {}", e)))?;
    let json = settings.format == LogFormat::Json;
    let output = settings.output;

    if output.file {
        let log_file = settings.file;
        if let Some(parent) = log_file.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ApiError::ConfigError(format!("Failed to create log directory: {}", e))
            })?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .map_err(|e| {
                ApiError::ConfigError(format!("Failed to open log file {:?}: {}", log_file, e))
            })?;
        let file = std::sync::Mutex::new(file);
        if output.stderr {
            install(filter, json, false, file.and(std::io::stderr))
        } else {
            install(filter, json, false, file)
        }
    } else if output.stdout {
        install(filter, json, settings.color, std::io::stdout)
    } else {
        install(filter, json, settings.color, std::io::stderr)
    }
}

/// Effective logging settings after layering CLI, environment, and config
#[derive(Debug)]
struct LogSettings {
    enabled: bool,
    filter: String,
    format: LogFormat,
    output: OutputDestinations,
    file: PathBuf,
    color: bool,
}

impl LogSettings {
    fn resolve<E>(
        config: Option<&LoggingConfig>,
        cli: &LogOverrides,
        env: E,
    ) -> Result<Self, ApiError>
    where
        E: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| env(key).filter(|v| !v.is_empty());

        let output = match cli.output.clone().or_else(|| var("SHALLOW_LOG_OUTPUT")) {
            Some(output) => parse_output_destinations(&output)?,
            None => {
                parse_output_destinations(config.map(|c| c.output.as_str()).unwrap_or("stderr"))?
            }
        };

        // Only the log file needs the platform default; skip it otherwise.
        let file = if output.file {
            pick_log_file_path(
                cli.file.clone(),
                var("SHALLOW_LOG_FILE").map(PathBuf::from),
                config.and_then(|c| c.file.clone()),
            )?
        } else {
            PathBuf::new()
        };

        Ok(Self {
            enabled: config.map(|c| c.enabled).unwrap_or(true),
            filter: build_filter_directives(config, cli, var("SHALLOW_LOG")),
            format: determine_format(config, cli, var("SHALLOW_LOG_FORMAT"))?,
            output,
            file,
            color: config.map(|c| c.color).unwrap_or(true),
        })
    }
}

fn install<W>(filter: EnvFilter, json: bool, ansi: bool, writer: W) -> Result<(), ApiError>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let base = Registry::default().with(filter);
    let result = if json {
        base.with(
            fmt::layer()
                .json()
                .with_target(true)
                .with_timer(ChronoUtc::rfc_3339())
                .with_writer(writer),
        )
        .try_init()
    } else {
        base.with(
            fmt::layer()
                .with_target(true)
                .with_timer(ChronoUtc::rfc_3339())
                .with_ansi(ansi)
                .with_writer(writer),
        )
        .try_init()
    };
    result.map_err(|e| ApiError::ConfigError(format!("Failed to install logger: {}", e)))
}

/// Filter directives: a CLI level, else SHALLOW_LOG, else the configured level
///
/// Configured module levels are appended unless SHALLOW_LOG supplies the
/// whole directive string.
fn build_filter_directives(
    config: Option<&LoggingConfig>,
    cli: &LogOverrides,
    env_filter: Option<String>,
) -> String {
    let level = match (&cli.level, env_filter) {
        (Some(level), _) => level.clone(),
        (None, Some(directives)) => return directives,
        (None, None) => config.map(|c| c.level.clone()).unwrap_or_else(default_log_level),
    };
    if level == "off" {
        return level;
    }

    let mut directives = vec![level];
    if let Some(config) = config {
        let mut modules: Vec<_> = config.modules.iter().collect();
        modules.sort();
        directives.extend(
            modules
                .into_iter()
                .map(|(module, module_level)| format!("{}={}", module, module_level)),
        );
    }
    directives.join(",")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

fn determine_format(
    config: Option<&LoggingConfig>,
    cli: &LogOverrides,
    env_format: Option<String>,
) -> Result<LogFormat, ApiError> {
    if let Some(format) = &cli.format {
        return parse_format(format);
    }
    // An unrecognized SHALLOW_LOG_FORMAT falls through to the configuration.
    if let Some(format) = env_format.and_then(|f| parse_format(&f).ok()) {
        return Ok(format);
    }
    parse_format(config.map(|c| c.format.as_str()).unwrap_or("text"))
}

fn parse_format(format: &str) -> Result<LogFormat, ApiError> {
    match format {
        "text" => Ok(LogFormat::Text),
        "json" => Ok(LogFormat::Json),
        other => Err(ApiError::ConfigError(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            other
        ))),
    }
}

/// Output destinations
#[derive(Debug)]
struct OutputDestinations {
    stdout: bool,
    stderr: bool,
    file: bool,
}

fn parse_output_destinations(output: &str) -> Result<OutputDestinations, ApiError> {
    let (stdout, stderr, file) = match output {
        "stdout" => (true, false, false),
        "stderr" => (false, true, false),
        "file" => (false, false, true),
        "file+stderr" => (false, true, true),
        _ => {
            return Err(ApiError::ConfigError(format!(
                "Invalid log output: {} (must be 'stdout', 'stderr', 'file', or 'file+stderr')",
                output
            )))
        }
    };
    Ok(OutputDestinations {
        stdout,
        stderr,
        file,
    })
}
