//! Environment variable source: RESGEN prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
/// Uses RESGEN__ prefix and __ as separator for nested keys,
/// e.g. `RESGEN__GENERATOR__ROOT_NAME`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix("RESGEN")
            .separator("__")
            .try_parsing(true),
    );
    Ok(builder)
}
