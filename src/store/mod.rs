//! Record Store
//!
//! Persisted experiment and preparation records and the narrow query contract
//! the core components use to reach them.

pub mod persistence;

pub use persistence::SledRecordStore;

use crate::error::StorageError;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub const STATUS_CREATED: &str = "Created";
pub const STATUS_SUCCESS: &str = "Success";
pub const STATUS_ERROR: &str = "Error";
pub const STATUS_DESTROYED: &str = "Destroyed";
pub const STATUS_RUNNING: &str = "Running";
pub const STATUS_REVOKED: &str = "Revoked";

/// ExperimentModel: one invocation of an experiment command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentModel {
    pub uid: String,
    pub command: String,
    pub sub_command: String,
    pub flag: String,
    pub status: String,
    #[serde(default)]
    pub error: String,
    pub create_time: String,
    pub update_time: String,
}

/// PreparationRecord: an environment made ready for injection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparationRecord {
    pub uid: String,
    pub program_type: String,
    #[serde(default)]
    pub process: String,
    #[serde(default)]
    pub port: String,
    #[serde(default)]
    pub pid: String,
    pub status: String,
    #[serde(default)]
    pub error: String,
    pub create_time: String,
    pub update_time: String,
}

impl PreparationRecord {
    pub fn is_revoked(&self) -> bool {
        self.status == STATUS_REVOKED
    }
}

/// Record store interface
///
/// Lookups return `Ok(None)` for an absent uid; `Err` is reserved for store failures.
pub trait RecordStore {
    fn insert_experiment(&self, model: &ExperimentModel) -> Result<(), StorageError>;
    fn query_experiment_by_uid(&self, uid: &str) -> Result<Option<ExperimentModel>, StorageError>;
    /// Experiments whose `command` equals `command`
    fn query_experiments_by_command(
        &self,
        command: &str,
    ) -> Result<Vec<ExperimentModel>, StorageError>;
    fn list_experiments(&self) -> Result<Vec<ExperimentModel>, StorageError>;
    fn update_experiment_status(
        &self,
        uid: &str,
        status: &str,
        error: &str,
    ) -> Result<(), StorageError>;

    fn insert_preparation(&self, record: &PreparationRecord) -> Result<(), StorageError>;
    fn query_preparation_by_uid(
        &self,
        uid: &str,
    ) -> Result<Option<PreparationRecord>, StorageError>;
    fn list_preparations(&self) -> Result<Vec<PreparationRecord>, StorageError>;
    fn update_preparation_status(
        &self,
        uid: &str,
        status: &str,
        error: &str,
    ) -> Result<(), StorageError>;
}

/// Current time as RFC 3339 with fixed nanosecond precision in UTC.
///
/// Fixed width keeps lexicographic order equal to chronological order.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Next `update_time` for a record last touched at `previous`.
pub(crate) fn next_update_time(previous: &str) -> String {
    let now = now_timestamp();
    if now.as_str() < previous {
        previous.to_string()
    } else {
        now
    }
}
