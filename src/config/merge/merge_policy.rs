//! Merge rules: defaults, override order, conflict handling.

use crate::config::paths;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    let store_path = paths::default_store_path();
    Config::builder()
        .set_default("storage.store_path", store_path.to_string_lossy().to_string())?
        .set_default("uid.max_attempts", crate::uid::DEFAULT_MAX_ATTEMPTS as i64)?
        .set_default("revoke.sandbox_host", "127.0.0.1")?
        .set_default("revoke.jvm_timeout_secs", 0_i64)?
        .set_default("revoke.kubectl", "kubectl")?
        .set_default("revoke.k8s_namespace", "chaosblade")
}
