//! Integration tests for revoke dispatch through the teardown registry

use super::test_utils::{preparation, temp_store, FaultyStore};
use blade::exec::Channel;
use blade::response::{Response, ResponseCode};
use blade::revoke::{
    JvmSandboxTeardown, KubernetesTeardown, RevokeDispatcher, Teardown, TeardownRegistry,
    PREPARE_JVM_TYPE, PREPARE_K8S_TYPE,
};
use blade::store::{PreparationRecord, RecordStore, STATUS_REVOKED, STATUS_RUNNING};
use std::cell::RefCell;
use std::net::TcpListener;
use std::rc::Rc;
use std::time::Duration;

/// Channel that answers every command with a fixed response and records calls.
struct ScriptedChannel {
    response: Response,
    calls: Rc<RefCell<Vec<String>>>,
}

impl Channel for ScriptedChannel {
    fn run(&self, program: &str, args: &str) -> Response {
        self.calls.borrow_mut().push(format!("{} {}", program, args));
        self.response.clone()
    }
}

fn k8s_registry(response: Response) -> (TeardownRegistry, Rc<RefCell<Vec<String>>>) {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let mut registry = TeardownRegistry::new();
    registry.register(
        PREPARE_K8S_TYPE,
        Box::new(KubernetesTeardown::new(
            Box::new(ScriptedChannel {
                response,
                calls: Rc::clone(&calls),
            }),
            "kubectl",
            "chaosblade",
        )),
    );
    (registry, calls)
}

/// Port with nothing listening on it.
fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

#[test]
fn test_k8s_success_transitions_to_revoked() {
    let (_dir, store) = temp_store();
    let mut record = preparation("k1", PREPARE_K8S_TYPE, "");
    record.error = "revoke failed. earlier attempt".to_string();
    store.insert_preparation(&record).unwrap();
    let (registry, calls) = k8s_registry(Response::success(&"namespace deleted"));

    let resp = RevokeDispatcher::new(&store, &registry).revoke("k1");
    assert!(resp.success);
    assert_eq!(calls.borrow().as_slice(), ["kubectl delete ns chaosblade"]);

    let stored = store.query_preparation_by_uid("k1").unwrap().unwrap();
    assert_eq!(stored.status, STATUS_REVOKED);
    assert!(stored.error.is_empty());
}

#[test]
fn test_jvm_detach_failure_keeps_record_revocable() {
    let (_dir, store) = temp_store();
    let port = closed_port();
    store
        .insert_preparation(&preparation("j1", PREPARE_JVM_TYPE, &port.to_string()))
        .unwrap();
    let mut registry = TeardownRegistry::new();
    registry.register(
        PREPARE_JVM_TYPE,
        Box::new(JvmSandboxTeardown::new(
            "127.0.0.1",
            Some(Duration::from_secs(2)),
        )),
    );
    let dispatcher = RevokeDispatcher::new(&store, &registry);

    let resp = dispatcher.revoke("j1");
    assert!(!resp.success);
    assert!(resp.is(ResponseCode::SandboxInvokeError));
    let stored = store.query_preparation_by_uid("j1").unwrap().unwrap();
    assert_eq!(stored.status, STATUS_RUNNING);
    assert!(stored.error.starts_with("revoke failed. "));

    let again = dispatcher.revoke("j1");
    assert!(again.is(ResponseCode::SandboxInvokeError));
    let stored = store.query_preparation_by_uid("j1").unwrap().unwrap();
    assert_eq!(stored.status, STATUS_RUNNING);
}

#[test]
fn test_failed_then_successful_revoke() {
    let (_dir, store) = temp_store();
    store
        .insert_preparation(&preparation("k1", PREPARE_K8S_TYPE, ""))
        .unwrap();

    let (failing, _) = k8s_registry(Response::fail(
        ResponseCode::ExecCommandError,
        "the server could not find the requested resource",
    ));
    let resp = RevokeDispatcher::new(&store, &failing).revoke("k1");
    assert!(resp.is(ResponseCode::ExecCommandError));
    let stored = store.query_preparation_by_uid("k1").unwrap().unwrap();
    assert_eq!(stored.status, STATUS_RUNNING);
    assert_eq!(
        stored.error,
        "revoke failed. the server could not find the requested resource"
    );

    let (working, _) = k8s_registry(Response::ok());
    assert!(RevokeDispatcher::new(&store, &working).revoke("k1").success);
    let stored = store.query_preparation_by_uid("k1").unwrap().unwrap();
    assert_eq!(stored.status, STATUS_REVOKED);
    assert!(stored.error.is_empty());
}

#[test]
fn test_unknown_uid_performs_no_mutation() {
    let (_dir, inner) = temp_store();
    let store = FaultyStore::new(&inner);
    let (registry, calls) = k8s_registry(Response::ok());

    let resp = RevokeDispatcher::new(&store, &registry).revoke("missing");
    assert!(resp.is(ResponseCode::DataNotFound));
    assert_eq!(store.updates.get(), 0);
    assert!(calls.borrow().is_empty());
}

#[test]
fn test_query_error_is_database_error() {
    let (_dir, inner) = temp_store();
    inner
        .insert_preparation(&preparation("k1", PREPARE_K8S_TYPE, ""))
        .unwrap();
    let mut store = FaultyStore::new(&inner);
    store.fail_preparations = true;
    let (registry, calls) = k8s_registry(Response::ok());

    let resp = RevokeDispatcher::new(&store, &registry).revoke("k1");
    assert!(resp.is(ResponseCode::DatabaseError));
    assert!(resp.err.starts_with("query record err"));
    assert!(calls.borrow().is_empty());
}

#[test]
fn test_status_update_error_is_surfaced() {
    let (_dir, inner) = temp_store();
    inner
        .insert_preparation(&preparation("k1", PREPARE_K8S_TYPE, ""))
        .unwrap();
    let mut store = FaultyStore::new(&inner);
    store.fail_updates = true;
    let (registry, _) = k8s_registry(Response::ok());

    let resp = RevokeDispatcher::new(&store, &registry).revoke("k1");
    assert!(resp.is(ResponseCode::DatabaseError));
    assert_eq!(store.updates.get(), 1);
}

/// Backends can be added without touching the dispatcher
#[test]
fn test_custom_backend_registration() {
    struct ContainerTeardown;

    impl Teardown for ContainerTeardown {
        fn detach(&self, record: &PreparationRecord) -> Response {
            Response::success(&format!("removed {}", record.process))
        }
    }

    let (_dir, store) = temp_store();
    let mut record = preparation("c1", "docker", "");
    record.process = "nginx".to_string();
    store.insert_preparation(&record).unwrap();

    let mut registry = TeardownRegistry::new();
    registry.register("docker", Box::new(ContainerTeardown));

    let resp = RevokeDispatcher::new(&store, &registry).revoke("c1");
    assert_eq!(resp.result_as::<String>().unwrap(), "removed nginx");
    assert_eq!(
        store.query_preparation_by_uid("c1").unwrap().unwrap().status,
        STATUS_REVOKED
    );
}
