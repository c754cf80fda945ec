//! Explicit config file source: the file named by `--config`.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::Path;

/// Add the explicit config file to builder. The file must exist.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    config_path: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if !config_path.exists() {
        return Err(ConfigError::Message(format!(
            "Config file not found: {}",
            config_path.display()
        )));
    }
    Ok(builder.add_source(File::from(config_path).required(true)))
}
