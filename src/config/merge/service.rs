//! MergeService: orchestrates sources, applies merge policy, deserializes to ShallowConfig.

use crate::config::sources::{environment, file, global_file};
use crate::config::ShallowConfig;
use config::ConfigError;
use std::path::Path;

use super::merge_policy;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Precedence: defaults (lowest) -> global file -> environment (highest).
    pub fn load() -> Result<ShallowConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = environment::add_to_builder(builder)?;

        builder.build()?.try_deserialize()
    }

    /// Precedence: defaults (lowest) -> `path` -> environment (highest).
    pub fn load_from_file(path: &Path) -> Result<ShallowConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = file::add_to_builder(builder, path)?;
        let builder = environment::add_to_builder(builder)?;

        builder.build()?.try_deserialize()
    }
}
