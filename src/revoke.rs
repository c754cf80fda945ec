//! Revoke Dispatcher
//!
//! Reverses a preparation: resolves the record's backend type, hands the
//! record to the matching [`Teardown`], and reconciles the stored status with
//! the outcome. A failed teardown leaves the record `Running` with the error
//! text so the revoke can be retried.

mod jvm;
mod k8s;
mod registry;

pub use jvm::JvmSandboxTeardown;
pub use k8s::KubernetesTeardown;
pub use registry::{Teardown, TeardownRegistry, PREPARE_JVM_TYPE, PREPARE_K8S_TYPE};

use crate::response::{Response, ResponseCode};
use crate::store::{RecordStore, STATUS_REVOKED, STATUS_RUNNING};
use tracing::{info, warn};

pub struct RevokeDispatcher<'a> {
    store: &'a dyn RecordStore,
    registry: &'a TeardownRegistry,
}

impl<'a> RevokeDispatcher<'a> {
    pub fn new(store: &'a dyn RecordStore, registry: &'a TeardownRegistry) -> Self {
        Self { store, registry }
    }

    pub fn revoke(&self, uid: &str) -> Response {
        let record = match self.store.query_preparation_by_uid(uid) {
            Ok(Some(record)) => record,
            Ok(None) => {
                return Response::fail(ResponseCode::DataNotFound, "the uid record not found")
            }
            Err(e) => {
                return Response::fail(
                    ResponseCode::DatabaseError,
                    format!("query record err, {}", e),
                )
            }
        };

        if record.is_revoked() {
            info!(uid, "preparation already revoked");
            return Response::success(&record);
        }

        let Some(teardown) = self.registry.get(&record.program_type) else {
            return Response::fail(
                ResponseCode::IllegalParameters,
                format!("not support the {} type", record.program_type),
            );
        };

        let response = teardown.detach(&record);
        if !response.success {
            warn!(uid, program_type = %record.program_type, error = %response.err, "revoke failed");
            let error = format!("revoke failed. {}", response.err);
            if let Err(e) = self
                .store
                .update_preparation_status(uid, STATUS_RUNNING, &error)
            {
                return Response::fail(
                    ResponseCode::DatabaseError,
                    format!("update record err, {}", e),
                );
            }
            return response;
        }

        if let Err(e) = self.store.update_preparation_status(uid, STATUS_REVOKED, "") {
            return Response::fail(
                ResponseCode::DatabaseError,
                format!("update record err, {}", e),
            );
        }
        info!(uid, program_type = %record.program_type, "preparation revoked");
        response
    }
}
