use lensforge::config::{FormPolicy, ShopDefinitions};
use lensforge::display::compute_display;
use lensforge::prescription::{DisplayMode, PrescriptionEntry, RawEyeEntry};
use lensforge::record::OrderRecord;
use lensforge::store::{JsonDirStore, OrderId, OrderStore, StoreError};
use std::fs;

fn record() -> OrderRecord {
    let entry = PrescriptionEntry::builder()
        .right_eye(RawEyeEntry::builder().sphere("-1.25").build())
        .customer_name("Ravi")
        .build();
    let display = compute_display(&entry, DisplayMode::Distance, false);
    OrderRecord::build(
        &entry,
        &display,
        &FormPolicy::default(),
        &ShopDefinitions::default(),
    )
}

#[test]
fn test_insert_then_get() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonDirStore::open(dir.path().join("orders")).unwrap();

    let id = store.insert(&record()).unwrap();
    let loaded = store.get(&id).unwrap();
    assert_eq!(loaded, record());
}

#[test]
fn test_each_insert_gets_its_own_document() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonDirStore::open(dir.path()).unwrap();

    let a = store.insert(&record()).unwrap();
    let b = store.insert(&record()).unwrap();
    assert_ne!(a, b);

    let names: Vec<String> = fs::read_dir(store.root())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.iter().all(|n| n.ends_with(".json") && !n.starts_with('.')));
}

#[test]
fn test_unknown_id_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonDirStore::open(dir.path()).unwrap();
    let err = store.get(&OrderId("missing".to_string())).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(ref id) if id == "missing"));
}

#[test]
fn test_failed_write_leaves_nothing_behind() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("orders");
    let store = JsonDirStore::open(&root).unwrap();
    fs::remove_dir_all(&root).unwrap();

    let err = store.insert(&record()).unwrap_err();
    assert!(matches!(err, StoreError::Io(_)));
    assert!(!root.exists());
}
