//! Integration tests for the persistent store.

use serde::{Deserialize, Serialize};
use serde_json::json;
use trellis_store::{Store, StoreError};

/// Helper to open a fresh store in a temporary directory.
fn fresh() -> (tempfile::TempDir, Store) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = Store::open(dir.path().join("test.json")).expect("open store");
    (dir, store)
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Todo {
    text: String,
    completed: bool,
}

#[test]
fn test_basic_operations() {
    let (_dir, mut store) = fresh();
    store.set("test1", "hello").unwrap();
    store.set("test2", &42).unwrap();
    store.set("test3", &true).unwrap();

    assert_eq!(store.get::<String>("test1").unwrap().as_deref(), Some("hello"));
    assert_eq!(store.get::<i64>("test2").unwrap(), Some(42));
    assert_eq!(store.get::<bool>("test3").unwrap(), Some(true));
    assert_eq!(store.get::<i64>("missing").unwrap(), None);
}

#[test]
fn test_complex_types() {
    let (_dir, mut store) = fresh();
    let list = json!([1, 2, "three", true]);
    store.set("list", &list).unwrap();
    assert_eq!(store.get::<serde_json::Value>("list").unwrap(), Some(list));

    let todo = Todo {
        text: "write tests".to_string(),
        completed: false,
    };
    store.set("000001", &todo).unwrap();
    assert_eq!(store.get::<Todo>("000001").unwrap(), Some(todo));
}

#[test]
fn test_wrong_type_is_json_error() {
    let (_dir, mut store) = fresh();
    store.set("n", &1).unwrap();
    assert!(matches!(store.get::<Todo>("n"), Err(StoreError::Json(_))));
}

#[test]
fn test_get_or_default() {
    let (_dir, mut store) = fresh();
    assert_eq!(store.get_or("counter", 0_u64).unwrap(), 0);
    store.set("counter", &7_u64).unwrap();
    assert_eq!(store.get_or("counter", 0_u64).unwrap(), 7);
}

#[test]
fn test_persistence_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("persist.json");
    {
        let mut store = Store::open(&path).unwrap();
        store.set("key", "value").unwrap();
        store.close().unwrap();
        assert!(!store.is_open());
    }
    let store = Store::open(&path).unwrap();
    assert_eq!(store.get::<String>("key").unwrap().as_deref(), Some("value"));
    assert_eq!(store.path(), path.as_path());
}

#[test]
fn test_writes_are_durable_without_close() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("durable.json");
    let mut store = Store::open(&path).unwrap();
    store.set("a", &1).unwrap();

    let reopened = Store::open(&path).unwrap();
    assert_eq!(reopened.get::<i64>("a").unwrap(), Some(1));
}

#[test]
fn test_open_creates_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("new.json");
    let store = Store::open(&path).unwrap();
    assert!(path.exists());
    assert!(store.is_empty().unwrap());
}

#[test]
fn test_dict_methods() {
    let (_dir, mut store) = fresh();
    for (k, v) in [("b", 2), ("a", 1), ("c", 3)] {
        store.set(k, &v).unwrap();
    }

    assert_eq!(store.keys().unwrap().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    assert_eq!(
        store.values().unwrap().cloned().collect::<Vec<_>>(),
        vec![json!(1), json!(2), json!(3)]
    );
    assert_eq!(store.iter().unwrap().count(), 3);
    assert_eq!(store.len().unwrap(), 3);
    assert!(store.contains("a").unwrap());
    assert!(!store.contains("x").unwrap());
}

#[test]
fn test_deletion() {
    let (_dir, mut store) = fresh();
    store.set("delete_me", "value").unwrap();
    assert!(store.contains("delete_me").unwrap());
    assert!(store.delete("delete_me").unwrap());
    assert!(!store.contains("delete_me").unwrap());
    assert!(!store.delete("delete_me").unwrap());
}

#[test]
fn test_range_inclusive_and_exclusive() {
    let (_dir, mut store) = fresh();
    for key in ["000001", "000002", "000003", "000004"] {
        store.set(key, key).unwrap();
    }

    let keys = |start, end, inclusive| {
        store
            .range(start, end, inclusive)
            .unwrap()
            .map(|(k, _)| k.to_string())
            .collect::<Vec<_>>()
    };

    assert_eq!(
        keys(Some("000002"), Some("000003"), true),
        vec!["000002", "000003"]
    );
    assert_eq!(keys(Some("000002"), Some("000003"), false), vec!["000002"]);
    assert_eq!(keys(None, Some("000002"), true), vec!["000001", "000002"]);
    assert_eq!(keys(Some("000003"), None, true), vec!["000003", "000004"]);
    assert_eq!(keys(None, None, false).len(), 4);
}

#[test]
fn test_closed_store_rejects_operations() {
    let (_dir, mut store) = fresh();
    store.set("k", &1).unwrap();
    store.close().unwrap();

    assert!(matches!(store.get::<i64>("k"), Err(StoreError::Closed)));
    assert!(matches!(store.set("k", &2), Err(StoreError::Closed)));
    assert!(matches!(store.delete("k"), Err(StoreError::Closed)));
    assert!(matches!(store.contains("k"), Err(StoreError::Closed)));
    assert!(matches!(store.len(), Err(StoreError::Closed)));
    assert!(matches!(store.is_empty(), Err(StoreError::Closed)));
    assert!(matches!(store.keys(), Err(StoreError::Closed)));
    assert!(matches!(store.values(), Err(StoreError::Closed)));
    assert!(matches!(store.iter(), Err(StoreError::Closed)));
    assert!(matches!(
        store.range(Some("a"), Some("z"), true),
        Err(StoreError::Closed)
    ));
    assert!(matches!(store.flush(), Err(StoreError::Closed)));
    assert_eq!(StoreError::Closed.to_string(), "store is closed");
}
