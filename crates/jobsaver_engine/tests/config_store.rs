use std::fs;

use jobsaver_core::{CONFIG_JSON_KEY, CONFIG_SHEET};
use jobsaver_engine::{ConfigStore, FileConfigStore, CONFIG_FILENAME};
use tempfile::TempDir;

#[test]
fn values_survive_a_new_store_instance() {
    let temp = TempDir::new().unwrap();
    let store = FileConfigStore::new(temp.path());
    store.set(CONFIG_SHEET, "sheet-1").unwrap();
    store.set(CONFIG_JSON_KEY, "{\"client_email\": \"a\"}").unwrap();

    let reopened = FileConfigStore::new(temp.path());
    assert_eq!(reopened.get(CONFIG_SHEET).unwrap().as_deref(), Some("sheet-1"));
    assert_eq!(
        reopened.get(CONFIG_JSON_KEY).unwrap().as_deref(),
        Some("{\"client_email\": \"a\"}")
    );
    assert_eq!(reopened.get("missing").unwrap(), None);
}

#[test]
fn missing_directory_is_created_on_write() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("nested").join("config");
    let store = FileConfigStore::new(&dir);
    assert_eq!(store.get(CONFIG_SHEET).unwrap(), None);

    store.set(CONFIG_SHEET, "abc").unwrap();
    assert!(dir.join(CONFIG_FILENAME).is_file());
}

#[test]
fn corrupt_file_reads_as_empty() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(CONFIG_FILENAME), "not ron at all {").unwrap();

    let store = FileConfigStore::new(temp.path());
    assert_eq!(store.get(CONFIG_SHEET).unwrap(), None);

    // Writing replaces the corrupt file.
    store.set(CONFIG_SHEET, "abc").unwrap();
    assert_eq!(store.get(CONFIG_SHEET).unwrap().as_deref(), Some("abc"));
}

#[test]
fn remove_and_clear() {
    let temp = TempDir::new().unwrap();
    let store = FileConfigStore::new(temp.path());
    store.set(CONFIG_SHEET, "abc").unwrap();
    store.set(CONFIG_JSON_KEY, "{}").unwrap();

    store.remove(CONFIG_SHEET).unwrap();
    assert_eq!(store.get(CONFIG_SHEET).unwrap(), None);
    assert_eq!(store.get(CONFIG_JSON_KEY).unwrap().as_deref(), Some("{}"));

    store.clear().unwrap();
    assert_eq!(store.get(CONFIG_JSON_KEY).unwrap(), None);
    assert!(!store.path().exists());
    // Clearing twice is fine.
    store.clear().unwrap();
}

#[test]
fn file_in_place_of_directory_is_an_error() {
    let temp = TempDir::new().unwrap();
    let not_a_dir = temp.path().join("not_a_dir");
    fs::write(&not_a_dir, "x").unwrap();

    let store = FileConfigStore::new(&not_a_dir);
    assert!(store.set(CONFIG_SHEET, "abc").is_err());
}
