//! Configuration
//!
//! Layered configuration for the CLI: built-in defaults, an optional TOML
//! file, then `SHALLOW__*` environment variables. Nothing here is global;
//! callers load a [`ShallowConfig`] and pass the pieces they need along.

pub mod facade;
pub mod merge;
pub mod sources;

pub use facade::ConfigLoader;

use crate::logging::LoggingConfig;
use crate::shallow::DecodeOptions;
use serde::{Deserialize, Serialize};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShallowConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub decode: DecodeOptions,
}
