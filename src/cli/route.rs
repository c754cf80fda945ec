//! CLI route: single route table and run context. Dispatches to the core components.

use crate::cli::help::{command_name, create_command_path};
use crate::cli::parse::Commands;
use crate::config::{BladeConfig, ConfigLoader};
use crate::error::ApiError;
use crate::exec::LocalChannel;
use crate::recorder::Recorder;
use crate::response::Response;
use crate::revoke::{
    JvmSandboxTeardown, KubernetesTeardown, RevokeDispatcher, TeardownRegistry, PREPARE_JVM_TYPE,
    PREPARE_K8S_TYPE,
};
use crate::status::{StatusQuery, StatusResolver};
use crate::store::{SledRecordStore, STATUS_CREATED, STATUS_DESTROYED};
use crate::uid::UidGenerator;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Runtime context for CLI execution: config, the opened store, and the
/// teardown backends. Built once per invocation.
pub struct RunContext {
    config: BladeConfig,
    store: SledRecordStore,
    registry: TeardownRegistry,
}

impl RunContext {
    /// Create run context from an optional config file and store override.
    pub fn new(config_path: Option<&Path>, store_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let mut config = ConfigLoader::load_optional(config_path)?;
        if let Some(path) = store_path {
            config.storage.store_path = path;
        }
        Self::with_config(config)
    }

    pub fn with_config(config: BladeConfig) -> Result<Self, ApiError> {
        let store_path = &config.storage.store_path;
        std::fs::create_dir_all(store_path)
            .map_err(|e| ApiError::StorageError(crate::error::StorageError::IoError(e)))?;
        let store = SledRecordStore::new(store_path)?;
        debug!(store_path = %store_path.display(), "record store opened");

        let registry = default_registry(&config);
        Ok(Self {
            config,
            store,
            registry,
        })
    }

    pub fn config(&self) -> &BladeConfig {
        &self.config
    }

    pub fn store(&self) -> &SledRecordStore {
        &self.store
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Response {
        info!(command = command_name(command), "executing command");
        match self.execute_inner(command) {
            Ok(response) => response,
            Err(e) => Response::from(e),
        }
    }

    fn execute_inner(&self, command: &Commands) -> Result<Response, ApiError> {
        match command {
            Commands::Status {
                uid,
                uid_flag,
                command_type,
                target,
            } => {
                let query = StatusQuery {
                    uid: uid.clone().or_else(|| uid_flag.clone()),
                    command_type: command_type.clone(),
                    target: target.clone(),
                };
                Ok(StatusResolver::new(&self.store).resolve(&query))
            }
            Commands::Revoke { uid } => {
                Ok(RevokeDispatcher::new(&self.store, &self.registry).revoke(uid))
            }
            Commands::Create {
                target,
                action,
                flag,
            } => {
                let model = self.recorder().record_experiment(
                    &create_command_path(target, action),
                    flag,
                    STATUS_CREATED,
                    "",
                )?;
                Ok(Response::success(&model))
            }
            Commands::Destroy { uid } => {
                let model = self.recorder().update_experiment(uid, STATUS_DESTROYED, "")?;
                Ok(Response::success(&model))
            }
            Commands::Prepare {
                program_type,
                port,
                process,
                pid,
            } => {
                let record = self
                    .recorder()
                    .record_preparation(program_type, process, port, pid)?;
                Ok(Response::success(&record))
            }
        }
    }

    fn recorder(&self) -> Recorder<'_> {
        let uids = UidGenerator::new(&self.store).max_attempts(self.config.uid.max_attempts);
        Recorder::with_generator(&self.store, uids)
    }
}

/// Registry with the built-in jvm and k8s backends.
pub fn default_registry(config: &BladeConfig) -> TeardownRegistry {
    let revoke = &config.revoke;
    let mut registry = TeardownRegistry::new();
    registry.register(
        PREPARE_JVM_TYPE,
        Box::new(JvmSandboxTeardown::new(
            revoke.sandbox_host.clone(),
            revoke.jvm_timeout(),
        )),
    );
    registry.register(
        PREPARE_K8S_TYPE,
        Box::new(KubernetesTeardown::new(
            Box::new(LocalChannel::new()),
            revoke.kubectl.clone(),
            revoke.k8s_namespace.clone(),
        )),
    );
    registry
}
