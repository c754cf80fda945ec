//! Status Resolver
//!
//! Decides which record kind and which query a status request maps to. Exactly
//! one path is taken, in this order:
//!
//! 1. experiment command types (`create`, `destroy`, `c`, `d`): by uid, by
//!    target command, or the full list;
//! 2. preparation command types (`prepare`, `revoke`, `p`, `r`): by uid or the
//!    full list;
//! 3. anything else with a uid: experiment lookup, falling back to the
//!    preparation with the same uid;
//! 4. anything else without a uid: `IllegalCommand`.

use crate::error::StorageError;
use crate::response::{Response, ResponseCode};
use crate::store::{ExperimentModel, PreparationRecord, RecordStore};
use serde::Serialize;
use tracing::debug;

/// Record family selected by a status command type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Experiment,
    Preparation,
}

impl CommandType {
    /// Recognized command type names, including single-letter aliases.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "create" | "destroy" | "c" | "d" => Some(CommandType::Experiment),
            "prepare" | "revoke" | "p" | "r" => Some(CommandType::Preparation),
            _ => None,
        }
    }
}

/// Status request filters. Empty strings count as absent.
#[derive(Debug, Clone, Default)]
pub struct StatusQuery {
    pub uid: Option<String>,
    pub command_type: Option<String>,
    pub target: Option<String>,
}

impl StatusQuery {
    fn uid(&self) -> Option<&str> {
        non_empty(&self.uid)
    }

    fn target(&self) -> Option<&str> {
        non_empty(&self.target)
    }

    fn command_type(&self) -> Option<CommandType> {
        non_empty(&self.command_type).and_then(CommandType::parse)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Payload of a successful status resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatusResult {
    Experiment(ExperimentModel),
    Experiments(Vec<ExperimentModel>),
    Preparation(PreparationRecord),
    Preparations(Vec<PreparationRecord>),
}

pub struct StatusResolver<'a> {
    store: &'a dyn RecordStore,
}

impl<'a> StatusResolver<'a> {
    pub fn new(store: &'a dyn RecordStore) -> Self {
        Self { store }
    }

    pub fn resolve(&self, query: &StatusQuery) -> Response {
        match self.lookup(query) {
            Ok(Some(result)) => Response::success(&result),
            Ok(None) => Response::from_code(ResponseCode::DataNotFound),
            Err(Lookup::Storage(e)) => {
                Response::fail(ResponseCode::DatabaseError, e.to_string())
            }
            Err(Lookup::Unidentified) => Response::fail(
                ResponseCode::IllegalCommand,
                "must specify the right type or uid",
            ),
        }
    }

    fn lookup(&self, query: &StatusQuery) -> Result<Option<StatusResult>, Lookup> {
        let uid = query.uid();
        match query.command_type() {
            Some(CommandType::Experiment) => {
                if let Some(uid) = uid {
                    debug!(uid, "status: experiment by uid");
                    Ok(self
                        .store
                        .query_experiment_by_uid(uid)?
                        .map(StatusResult::Experiment))
                } else if let Some(target) = query.target() {
                    debug!(command = target, "status: experiments by target");
                    Ok(Some(StatusResult::Experiments(
                        self.store.query_experiments_by_command(target)?,
                    )))
                } else {
                    Ok(Some(StatusResult::Experiments(
                        self.store.list_experiments()?,
                    )))
                }
            }
            Some(CommandType::Preparation) => {
                if let Some(uid) = uid {
                    debug!(uid, "status: preparation by uid");
                    Ok(self
                        .store
                        .query_preparation_by_uid(uid)?
                        .map(StatusResult::Preparation))
                } else {
                    Ok(Some(StatusResult::Preparations(
                        self.store.list_preparations()?,
                    )))
                }
            }
            None => {
                let Some(uid) = uid else {
                    return Err(Lookup::Unidentified);
                };
                if let Ok(Some(model)) = self.store.query_experiment_by_uid(uid) {
                    return Ok(Some(StatusResult::Experiment(model)));
                }
                debug!(uid, "status: falling back to preparation lookup");
                Ok(self
                    .store
                    .query_preparation_by_uid(uid)?
                    .map(StatusResult::Preparation))
            }
        }
    }
}

enum Lookup {
    Storage(StorageError),
    Unidentified,
}

impl From<StorageError> for Lookup {
    fn from(err: StorageError) -> Self {
        Lookup::Storage(err)
    }
}
