//! Integration tests for status resolution across record kinds

use super::test_utils::{experiment, preparation, temp_store, FaultyStore};
use blade::response::ResponseCode;
use blade::status::{StatusQuery, StatusResolver};
use blade::store::{ExperimentModel, PreparationRecord, RecordStore};

fn query(uid: Option<&str>, command_type: Option<&str>, target: Option<&str>) -> StatusQuery {
    StatusQuery {
        uid: uid.map(str::to_string),
        command_type: command_type.map(str::to_string),
        target: target.map(str::to_string),
    }
}

#[test]
fn test_create_type_lists_all_experiments() {
    let (_dir, store) = temp_store();
    store.insert_experiment(&experiment("e1", "docker", "cpu")).unwrap();
    store.insert_experiment(&experiment("e2", "disk", "fill")).unwrap();

    let resp = StatusResolver::new(&store).resolve(&query(None, Some("create"), None));
    assert!(resp.success);
    let list: Vec<ExperimentModel> = resp.result_as().unwrap();
    assert_eq!(list.len(), 2);
}

#[test]
fn test_create_type_with_uid_returns_single_record() {
    let (_dir, store) = temp_store();
    let model = experiment("e1", "docker", "cpu");
    store.insert_experiment(&model).unwrap();
    store.insert_experiment(&experiment("e2", "disk", "fill")).unwrap();

    let resp = StatusResolver::new(&store).resolve(&query(Some("e1"), Some("c"), None));
    assert!(resp.success);
    assert_eq!(resp.result_as::<ExperimentModel>().unwrap(), model);
}

#[test]
fn test_create_type_with_missing_uid_is_not_found() {
    let (_dir, store) = temp_store();
    store.insert_experiment(&experiment("e1", "docker", "cpu")).unwrap();

    let resp = StatusResolver::new(&store).resolve(&query(Some("zz"), Some("create"), None));
    assert!(!resp.success);
    assert!(resp.is(ResponseCode::DataNotFound));
    assert_eq!(resp.err, "data not found");
}

#[test]
fn test_destroy_type_filters_by_target() {
    let (_dir, store) = temp_store();
    store.insert_experiment(&experiment("e1", "docker", "cpu")).unwrap();
    store.insert_experiment(&experiment("e2", "disk", "fill")).unwrap();

    let resp = StatusResolver::new(&store).resolve(&query(None, Some("destroy"), Some("disk")));
    let list: Vec<ExperimentModel> = resp.result_as().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].uid, "e2");

    let resp = StatusResolver::new(&store).resolve(&query(None, Some("d"), Some("dubbo")));
    assert!(resp.success);
    assert!(resp.result_as::<Vec<ExperimentModel>>().unwrap().is_empty());
}

#[test]
fn test_uid_takes_precedence_over_target() {
    let (_dir, store) = temp_store();
    store.insert_experiment(&experiment("e1", "docker", "cpu")).unwrap();

    let resp =
        StatusResolver::new(&store).resolve(&query(Some("e1"), Some("create"), Some("disk")));
    assert_eq!(resp.result_as::<ExperimentModel>().unwrap().uid, "e1");
}

#[test]
fn test_prepare_type_lists_and_fetches_preparations() {
    let (_dir, store) = temp_store();
    let record = preparation("p1", "jvm", "8703");
    store.insert_preparation(&record).unwrap();
    store.insert_preparation(&preparation("p2", "k8s", "")).unwrap();
    let resolver = StatusResolver::new(&store);

    let resp = resolver.resolve(&query(None, Some("prepare"), None));
    assert_eq!(resp.result_as::<Vec<PreparationRecord>>().unwrap().len(), 2);

    let resp = resolver.resolve(&query(Some("p1"), Some("r"), Some("ignored")));
    assert_eq!(resp.result_as::<PreparationRecord>().unwrap(), record);

    let resp = resolver.resolve(&query(Some("nope"), Some("revoke"), None));
    assert!(resp.is(ResponseCode::DataNotFound));
}

#[test]
fn test_untyped_uid_prefers_experiment() {
    let (_dir, store) = temp_store();
    store.insert_experiment(&experiment("same", "docker", "cpu")).unwrap();
    store.insert_preparation(&preparation("same", "jvm", "1")).unwrap();

    let resp = StatusResolver::new(&store).resolve(&query(Some("same"), None, None));
    let model: ExperimentModel = resp.result_as().unwrap();
    assert_eq!(model.command, "docker");
}

#[test]
fn test_untyped_uid_falls_back_to_preparation() {
    let (_dir, store) = temp_store();
    store.insert_preparation(&preparation("p1", "jvm", "1")).unwrap();

    let resp = StatusResolver::new(&store).resolve(&query(Some("p1"), Some("attach"), None));
    assert!(resp.success);
    assert_eq!(resp.result_as::<PreparationRecord>().unwrap().uid, "p1");

    let resp = StatusResolver::new(&store).resolve(&query(Some("ghost"), None, None));
    assert!(resp.is(ResponseCode::DataNotFound));
}

#[test]
fn test_untyped_uid_falls_back_when_experiment_lookup_errors() {
    let (_dir, inner) = temp_store();
    inner.insert_preparation(&preparation("p1", "k8s", "")).unwrap();
    let mut store = FaultyStore::new(&inner);
    store.fail_experiments = true;

    let resp = StatusResolver::new(&store).resolve(&query(Some("p1"), None, None));
    assert!(resp.success);
    assert_eq!(resp.result_as::<PreparationRecord>().unwrap().uid, "p1");
}

#[test]
fn test_no_type_and_no_uid_is_illegal_command() {
    let (_dir, store) = temp_store();
    let resolver = StatusResolver::new(&store);

    let resp = resolver.resolve(&query(None, None, None));
    assert!(!resp.success);
    assert!(resp.is(ResponseCode::IllegalCommand));

    let resp = resolver.resolve(&query(Some(""), Some("attach"), Some("docker")));
    assert!(resp.is(ResponseCode::IllegalCommand));
}

#[test]
fn test_store_errors_are_database_errors() {
    let (_dir, inner) = temp_store();
    let mut store = FaultyStore::new(&inner);
    store.fail_experiments = true;
    store.fail_preparations = true;
    let resolver = StatusResolver::new(&store);

    let resp = resolver.resolve(&query(None, Some("create"), None));
    assert!(resp.is(ResponseCode::DatabaseError));
    let resp = resolver.resolve(&query(Some("x"), Some("prepare"), None));
    assert!(resp.is(ResponseCode::DatabaseError));
    let resp = resolver.resolve(&query(Some("x"), None, None));
    assert!(resp.is(ResponseCode::DatabaseError));
    assert!(resp.err.contains("injected failure"));
}
