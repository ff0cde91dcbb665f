//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::ShallowConfig;
use config::ConfigError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the global file (if any) and environment.
    pub fn load() -> Result<ShallowConfig, ConfigError> {
        MergeService::load()
    }

    /// Load configuration from a specific file with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<ShallowConfig, ConfigError> {
        MergeService::load_from_file(path)
    }

    /// Load from `path` when given, otherwise from standard sources.
    pub fn load_optional(path: Option<&Path>) -> Result<ShallowConfig, ConfigError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::load(),
        }
    }
}
