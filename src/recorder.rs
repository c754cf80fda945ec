//! Record construction: build experiment and preparation records and insert
//! them through the store.

use crate::command_path::parse_command_path;
use crate::error::ApiError;
use crate::store::{now_timestamp, ExperimentModel, PreparationRecord, RecordStore, STATUS_RUNNING};
use crate::uid::{UidGenerator, UidSpace};
use tracing::info;

pub struct Recorder<'a> {
    store: &'a dyn RecordStore,
    uids: UidGenerator<'a>,
}

impl<'a> Recorder<'a> {
    pub fn new(store: &'a dyn RecordStore) -> Self {
        Self::with_generator(store, UidGenerator::new(store))
    }

    pub fn with_generator(store: &'a dyn RecordStore, uids: UidGenerator<'a>) -> Self {
        Self { store, uids }
    }

    /// Create and persist an experiment record for `command_path`.
    pub fn record_experiment(
        &self,
        command_path: &str,
        flag: &str,
        status: &str,
        error: &str,
    ) -> Result<ExperimentModel, ApiError> {
        let time = now_timestamp();
        let uid = self.uids.generate_uid()?;
        let (command, sub_command) = parse_command_path(command_path)?;
        let model = ExperimentModel {
            uid,
            command,
            sub_command,
            flag: flag.to_string(),
            status: status.to_string(),
            error: error.to_string(),
            create_time: time.clone(),
            update_time: time,
        };
        self.store.insert_experiment(&model)?;
        info!(uid = %model.uid, command = %model.command, sub_command = %model.sub_command, "experiment recorded");
        Ok(model)
    }

    /// Create and persist a `Running` preparation record.
    pub fn record_preparation(
        &self,
        program_type: &str,
        process: &str,
        port: &str,
        pid: &str,
    ) -> Result<PreparationRecord, ApiError> {
        if program_type.trim().is_empty() {
            return Err(ApiError::InvalidArgument(
                "preparation type must not be empty".to_string(),
            ));
        }
        let time = now_timestamp();
        let uid = self.uids.generate_in(UidSpace::Preparation)?;
        let record = PreparationRecord {
            uid,
            program_type: program_type.to_string(),
            process: process.to_string(),
            port: port.to_string(),
            pid: pid.to_string(),
            status: STATUS_RUNNING.to_string(),
            error: String::new(),
            create_time: time.clone(),
            update_time: time,
        };
        self.store.insert_preparation(&record)?;
        info!(uid = %record.uid, program_type = %record.program_type, "preparation recorded");
        Ok(record)
    }

    /// Update an experiment's status and error text, returning the stored result.
    pub fn update_experiment(
        &self,
        uid: &str,
        status: &str,
        error: &str,
    ) -> Result<ExperimentModel, ApiError> {
        if self.store.query_experiment_by_uid(uid)?.is_none() {
            return Err(ApiError::NotFound(format!("experiment {}", uid)));
        }
        self.store.update_experiment_status(uid, status, error)?;
        self.store
            .query_experiment_by_uid(uid)?
            .ok_or_else(|| ApiError::NotFound(format!("experiment {}", uid)))
    }
}
