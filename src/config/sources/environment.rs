//! Environment variable source: SHALLOW prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Environment source for the `SHALLOW__` variable family.
///
/// `SHALLOW__DECODE__REQUIRE_FLUSH=true` sets `decode.require_flush`.
pub fn environment() -> Environment {
    Environment::with_prefix("SHALLOW")
        .separator("__")
        .try_parsing(true)
}

/// Add environment variable overlay to builder.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(environment()))
}
