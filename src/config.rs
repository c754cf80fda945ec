//! Configuration System
//!
//! Layered configuration for the record store location, uid generation, revoke
//! backends, and logging. Sources are merged defaults → global file →
//! explicit file → environment.

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

mod facade;
mod merge;
pub mod paths;
mod sources;

pub use facade::ConfigLoader;
pub use sources::env_vars::ENV_PREFIX;
pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BladeConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub uid: UidConfig,

    #[serde(default)]
    pub revoke: RevokeConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the sled record database
    #[serde(default = "paths::default_store_path")]
    pub store_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            store_path: paths::default_store_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UidConfig {
    /// Candidates tried before giving up with ResourceExhausted
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
}

fn default_max_attempts() -> usize {
    crate::uid::DEFAULT_MAX_ATTEMPTS
}

impl Default for UidConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevokeConfig {
    /// Host the JVM sandbox control port listens on
    #[serde(default = "default_sandbox_host")]
    pub sandbox_host: String,

    /// HTTP timeout for sandbox calls; 0 disables it
    #[serde(default)]
    pub jvm_timeout_secs: u64,

    #[serde(default = "default_kubectl")]
    pub kubectl: String,

    /// Namespace removed by the k8s teardown
    #[serde(default = "default_k8s_namespace")]
    pub k8s_namespace: String,
}

fn default_sandbox_host() -> String {
    "127.0.0.1".to_string()
}

fn default_kubectl() -> String {
    "kubectl".to_string()
}

fn default_k8s_namespace() -> String {
    "chaosblade".to_string()
}

impl Default for RevokeConfig {
    fn default() -> Self {
        Self {
            sandbox_host: default_sandbox_host(),
            jvm_timeout_secs: 0,
            kubectl: default_kubectl(),
            k8s_namespace: default_k8s_namespace(),
        }
    }
}

impl RevokeConfig {
    pub fn jvm_timeout(&self) -> Option<Duration> {
        (self.jvm_timeout_secs > 0).then(|| Duration::from_secs(self.jvm_timeout_secs))
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Storage(String),
    Uid(String),
    Revoke(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Storage(msg) => write!(f, "Storage: {}", msg),
            ValidationError::Uid(msg) => write!(f, "Uid: {}", msg),
            ValidationError::Revoke(msg) => write!(f, "Revoke: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl BladeConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.storage.store_path.as_os_str().is_empty() {
            errors.push(ValidationError::Storage(
                "Store path cannot be empty".to_string(),
            ));
        }
        if self.uid.max_attempts == 0 {
            errors.push(ValidationError::Uid(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        if self.revoke.kubectl.trim().is_empty() {
            errors.push(ValidationError::Revoke(
                "kubectl binary cannot be empty".to_string(),
            ));
        }
        if self.revoke.k8s_namespace.trim().is_empty() {
            errors.push(ValidationError::Revoke(
                "k8s namespace cannot be empty".to_string(),
            ));
        }
        if self.revoke.sandbox_host.trim().is_empty() {
            errors.push(ValidationError::Revoke(
                "sandbox host cannot be empty".to_string(),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
