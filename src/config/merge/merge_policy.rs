//! Defaults applied beneath every configuration source.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Start a builder carrying the built-in defaults.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("decode.require_flush", false)?
        .set_default("logging.level", "warn")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")
}
