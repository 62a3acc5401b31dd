use chrono::DateTime;
use tempfile::TempDir;

use stagehand_core::completion::{CompletionStore, FileCompletionStore, MemoryCompletionStore};

#[test]
fn absent_store_means_not_completed() {
    let temp = TempDir::new().unwrap();
    let store = FileCompletionStore::at(temp.path().join("state").join("completions.json"));

    assert!(!store.has_completed("example-v1").unwrap());
}

#[test]
fn mark_then_check_round_trip() {
    let temp = TempDir::new().unwrap();
    let store = FileCompletionStore::at(temp.path().join("completions.json"));

    store.mark_completed("example-v1").unwrap();

    assert!(store.has_completed("example-v1").unwrap());
    assert!(!store.has_completed("other-id").unwrap());
}

#[test]
fn records_survive_reopening() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("completions.json");

    FileCompletionStore::at(path.clone())
        .mark_completed("example-v1")
        .unwrap();

    let reopened = FileCompletionStore::at(path);
    assert!(reopened.has_completed("example-v1").unwrap());
}

#[test]
fn completion_value_is_an_iso8601_timestamp() {
    let temp = TempDir::new().unwrap();
    let store = FileCompletionStore::at(temp.path().join("completions.json"));
    store.mark_completed("example-v1").unwrap();

    let raw = std::fs::read_to_string(store.path()).unwrap();
    let records: std::collections::BTreeMap<String, String> = serde_json::from_str(&raw).unwrap();
    let stamp = records.get("example-v1").unwrap();

    assert!(DateTime::parse_from_rfc3339(stamp).is_ok());
}

#[test]
fn memory_store_gates_like_the_file_store() {
    let store = MemoryCompletionStore::new();

    assert!(!store.has_completed("x").unwrap());
    store.mark_completed("x").unwrap();
    assert!(store.has_completed("x").unwrap());
    assert_eq!(store.len(), 1);
}
