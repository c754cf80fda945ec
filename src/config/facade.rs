//! Config loader facade: assembles sources in precedence order and validates.

use crate::config::merge::builder_with_defaults;
use crate::config::sources::{env_vars, explicit_file, global_file};
use crate::config::BladeConfig;
use crate::error::ApiError;
use std::path::Path;
use tracing::debug;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load defaults, the global config file, and environment overrides.
    pub fn load() -> Result<BladeConfig, ApiError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = env_vars::add_to_builder(builder)?;
        Self::finish(builder)
    }

    /// Like [`ConfigLoader::load`] with `config_path` layered above the global file.
    pub fn load_from_file(config_path: &Path) -> Result<BladeConfig, ApiError> {
        debug!(config_path = %config_path.display(), "loading explicit config file");
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = explicit_file::add_to_builder(builder, config_path)?;
        let builder = env_vars::add_to_builder(builder)?;
        Self::finish(builder)
    }

    /// Load from `config_path` when given, otherwise the default sources.
    pub fn load_optional(config_path: Option<&Path>) -> Result<BladeConfig, ApiError> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => Self::load(),
        }
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<BladeConfig, ApiError> {
        let config: BladeConfig = builder.build()?.try_deserialize()?;
        config.validate().map_err(|errors| {
            let msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                msgs.join("\n")
            ))
        })?;
        Ok(config)
    }
}
