//! Integration tests for the record store and recorder

use super::test_utils::{experiment, preparation, temp_store};
use blade::error::{ApiError, StorageError};
use blade::recorder::Recorder;
use blade::store::{RecordStore, STATUS_CREATED, STATUS_ERROR, STATUS_SUCCESS};

/// Insert then query by uid returns an equal record
#[test]
fn test_experiment_round_trip() {
    let (_dir, store) = temp_store();
    let recorder = Recorder::new(&store);

    let model = recorder
        .record_experiment(
            "blade create docker cpu-fullload",
            "--cpu-percent 80 --timeout 60",
            STATUS_SUCCESS,
            "",
        )
        .unwrap();

    let fetched = store.query_experiment_by_uid(&model.uid).unwrap().unwrap();
    assert_eq!(fetched.uid, model.uid);
    assert_eq!(fetched.command, "docker");
    assert_eq!(fetched.sub_command, "cpu-fullload");
    assert_eq!(fetched.flag, model.flag);
    assert_eq!(fetched.status, STATUS_SUCCESS);
    assert_eq!(fetched.error, "");
    assert_eq!(fetched.create_time, model.create_time);
}

/// Recorded error text is kept on the record
#[test]
fn test_experiment_with_error_text() {
    let (_dir, store) = temp_store();
    let recorder = Recorder::new(&store);

    let model = recorder
        .record_experiment("blade create network delay", "", STATUS_ERROR, "tc not found")
        .unwrap();
    let fetched = store.query_experiment_by_uid(&model.uid).unwrap().unwrap();
    assert_eq!(fetched.status, STATUS_ERROR);
    assert_eq!(fetched.error, "tc not found");
}

/// Many recorded experiments never share a uid
#[test]
fn test_recorded_uids_are_unique() {
    let (_dir, store) = temp_store();
    let recorder = Recorder::new(&store);

    for _ in 0..50 {
        recorder
            .record_experiment("blade create cpu fullload", "", STATUS_CREATED, "")
            .unwrap();
    }
    let mut uids: Vec<String> = store
        .list_experiments()
        .unwrap()
        .into_iter()
        .map(|m| m.uid)
        .collect();
    assert_eq!(uids.len(), 50);
    uids.sort();
    uids.dedup();
    assert_eq!(uids.len(), 50);
}

/// Direct inserts with an existing uid are refused
#[test]
fn test_duplicate_insert_is_refused() {
    let (_dir, store) = temp_store();
    store.insert_experiment(&experiment("u1", "docker", "cpu")).unwrap();

    let err = store
        .insert_experiment(&experiment("u1", "disk", "fill"))
        .unwrap_err();
    assert!(matches!(err, StorageError::Duplicate(_)));

    store.insert_preparation(&preparation("u1", "jvm", "1")).unwrap();
    assert!(store
        .insert_preparation(&preparation("u1", "k8s", ""))
        .is_err());
}

/// Filtering by command only matches the command segment
#[test]
fn test_query_by_command_matches_command_only() {
    let (_dir, store) = temp_store();
    store.insert_experiment(&experiment("a", "docker", "cpu")).unwrap();
    store.insert_experiment(&experiment("b", "cpu", "docker")).unwrap();

    let found = store.query_experiments_by_command("docker").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].uid, "a");
}

/// Update failure for missing experiment surfaces as not found
#[test]
fn test_update_missing_experiment() {
    let (_dir, store) = temp_store();
    let recorder = Recorder::new(&store);
    assert!(matches!(
        recorder.update_experiment("ghost", STATUS_SUCCESS, ""),
        Err(ApiError::NotFound(_))
    ));
}
