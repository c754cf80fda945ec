//! Persistence layer for the record store

use crate::error::StorageError;
use crate::store::{next_update_time, ExperimentModel, PreparationRecord, RecordStore};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sled::{Db, Tree};
use std::io;
use std::path::Path;
use tracing::debug;

const TREE_EXPERIMENTS: &str = "experiments";
const TREE_PREPARATIONS: &str = "preparations";

/// Sled-based implementation of RecordStore
#[derive(Clone)]
pub struct SledRecordStore {
    db: Db,
    experiments: Tree,
    preparations: Tree,
}

impl SledRecordStore {
    /// Open (or create) a store at the given directory
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db = sled::open(path).map_err(|e| {
            StorageError::IoError(io::Error::new(
                io::ErrorKind::Other,
                format!("Failed to open sled database: {}", e),
            ))
        })?;
        Self::from_db(db)
    }

    /// Wrap an already opened sled database
    pub fn from_db(db: Db) -> Result<Self, StorageError> {
        let experiments = db.open_tree(TREE_EXPERIMENTS).map_err(to_storage_io)?;
        let preparations = db.open_tree(TREE_PREPARATIONS).map_err(to_storage_io)?;
        Ok(Self {
            db,
            experiments,
            preparations,
        })
    }

    /// Flush all pending writes to disk
    pub fn flush(&self) -> Result<(), StorageError> {
        self.db.flush().map_err(to_storage_io)?;
        Ok(())
    }

    fn insert_unique<T: Serialize>(
        &self,
        tree: &Tree,
        uid: &str,
        value: &T,
    ) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(value).map_err(to_storage_data)?;
        let swapped = tree
            .compare_and_swap(uid.as_bytes(), None as Option<&[u8]>, Some(bytes))
            .map_err(to_storage_io)?;
        if swapped.is_err() {
            return Err(StorageError::Duplicate(uid.to_string()));
        }
        self.flush()
    }

    fn put<T: Serialize>(&self, tree: &Tree, uid: &str, value: &T) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(value).map_err(to_storage_data)?;
        tree.insert(uid.as_bytes(), bytes).map_err(to_storage_io)?;
        self.flush()
    }
}

impl RecordStore for SledRecordStore {
    fn insert_experiment(&self, model: &ExperimentModel) -> Result<(), StorageError> {
        self.insert_unique(&self.experiments, &model.uid, model)?;
        debug!(uid = %model.uid, command = %model.command, "experiment record inserted");
        Ok(())
    }

    fn query_experiment_by_uid(&self, uid: &str) -> Result<Option<ExperimentModel>, StorageError> {
        get(&self.experiments, uid)
    }

    fn query_experiments_by_command(
        &self,
        command: &str,
    ) -> Result<Vec<ExperimentModel>, StorageError> {
        Ok(self
            .list_experiments()?
            .into_iter()
            .filter(|m| m.command == command)
            .collect())
    }

    fn list_experiments(&self) -> Result<Vec<ExperimentModel>, StorageError> {
        let mut out: Vec<ExperimentModel> = list(&self.experiments)?;
        out.sort_by(|a, b| a.create_time.cmp(&b.create_time));
        Ok(out)
    }

    fn update_experiment_status(
        &self,
        uid: &str,
        status: &str,
        error: &str,
    ) -> Result<(), StorageError> {
        let Some(mut model) = self.query_experiment_by_uid(uid)? else {
            return Err(StorageError::RecordNotFound(uid.to_string()));
        };
        model.status = status.to_string();
        model.error = error.to_string();
        model.update_time = next_update_time(&model.update_time);
        self.put(&self.experiments, uid, &model)
    }

    fn insert_preparation(&self, record: &PreparationRecord) -> Result<(), StorageError> {
        self.insert_unique(&self.preparations, &record.uid, record)?;
        debug!(uid = %record.uid, program_type = %record.program_type, "preparation record inserted");
        Ok(())
    }

    fn query_preparation_by_uid(
        &self,
        uid: &str,
    ) -> Result<Option<PreparationRecord>, StorageError> {
        get(&self.preparations, uid)
    }

    fn list_preparations(&self) -> Result<Vec<PreparationRecord>, StorageError> {
        let mut out: Vec<PreparationRecord> = list(&self.preparations)?;
        out.sort_by(|a, b| a.create_time.cmp(&b.create_time));
        Ok(out)
    }

    fn update_preparation_status(
        &self,
        uid: &str,
        status: &str,
        error: &str,
    ) -> Result<(), StorageError> {
        let Some(mut record) = self.query_preparation_by_uid(uid)? else {
            return Err(StorageError::RecordNotFound(uid.to_string()));
        };
        record.status = status.to_string();
        record.error = error.to_string();
        record.update_time = next_update_time(&record.update_time);
        self.put(&self.preparations, uid, &record)
    }
}

fn get<T: DeserializeOwned>(tree: &Tree, uid: &str) -> Result<Option<T>, StorageError> {
    let Some(raw) = tree.get(uid.as_bytes()).map_err(to_storage_io)? else {
        return Ok(None);
    };
    let parsed = serde_json::from_slice(&raw).map_err(to_storage_data)?;
    Ok(Some(parsed))
}

fn list<T: DeserializeOwned>(tree: &Tree) -> Result<Vec<T>, StorageError> {
    let mut out = Vec::new();
    for result in tree.iter() {
        let (_, value) = result.map_err(to_storage_io)?;
        out.push(serde_json::from_slice(&value).map_err(to_storage_data)?);
    }
    Ok(out)
}

fn to_storage_io(err: sled::Error) -> StorageError {
    StorageError::IoError(io::Error::new(io::ErrorKind::Other, err.to_string()))
}

fn to_storage_data(err: serde_json::Error) -> StorageError {
    StorageError::IoError(io::Error::new(io::ErrorKind::InvalidData, err.to_string()))
}
