// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use tempfile::tempdir;

#[test]
fn test_file_storage_missing_file_reads_empty() {
    let dir = tempdir().unwrap();
    let storage = FileStorage::open(&dir.path().join("storage.json")).unwrap();
    assert_eq!(storage.get(ACCESS_TOKEN_KEY).unwrap(), None);
    assert!(!storage.path().exists());
}

#[test]
fn test_file_storage_set_get_remove() {
    let dir = tempdir().unwrap();
    let storage = FileStorage::open(&dir.path().join("storage.json")).unwrap();

    storage.set(ACCESS_TOKEN_KEY, "tok-123").unwrap();
    storage.set(USERNAME_KEY, "Ada").unwrap();
    assert_eq!(
        storage.get(ACCESS_TOKEN_KEY).unwrap().as_deref(),
        Some("tok-123")
    );

    storage.remove(ACCESS_TOKEN_KEY).unwrap();
    assert_eq!(storage.get(ACCESS_TOKEN_KEY).unwrap(), None);
    assert_eq!(storage.get(USERNAME_KEY).unwrap().as_deref(), Some("Ada"));
}

#[test]
fn test_file_storage_persists_across_instances() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("storage.json");

    FileStorage::open(&path)
        .unwrap()
        .set(ACCESS_TOKEN_KEY, "tok")
        .unwrap();

    let reopened = FileStorage::open(&path).unwrap();
    assert_eq!(reopened.get(ACCESS_TOKEN_KEY).unwrap().as_deref(), Some("tok"));
}

#[test]
fn test_file_storage_is_plain_json_object() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("storage.json");
    let storage = FileStorage::open(&path).unwrap();
    storage.set(TASKS_KEY, "[]").unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw, serde_json::json!({ "tasks": "[]" }));
}

#[cfg(unix)]
#[test]
fn test_file_storage_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let path = dir.path().join("storage.json");
    FileStorage::open(&path)
        .unwrap()
        .set(ACCESS_TOKEN_KEY, "tok")
        .unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn test_file_storage_corrupt_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "not json").unwrap();

    let storage = FileStorage::open(&path).unwrap();
    assert!(matches!(
        storage.get(ACCESS_TOKEN_KEY),
        Err(StorageError::Serialization(_))
    ));
}

#[test]
fn test_file_storage_set_replaces_corrupt_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{ truncated").unwrap();

    let storage = FileStorage::open(&path).unwrap();
    storage.set(ACCESS_TOKEN_KEY, "tok-9").unwrap();

    assert_eq!(storage.get(ACCESS_TOKEN_KEY).unwrap().as_deref(), Some("tok-9"));
    assert!(!dir.path().join("session.json.tmp").exists());
}

#[test]
fn test_file_storage_clear_keys_repairs_corrupt_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{ truncated").unwrap();

    let storage = FileStorage::open(&path).unwrap();
    storage.clear_keys(&SESSION_KEYS).unwrap();

    assert_eq!(storage.get(ACCESS_TOKEN_KEY).unwrap(), None);
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.trim(), "{}");
}

#[test]
fn test_clear_keys_removes_only_listed_keys() {
    let storage = MemoryStorage::new();
    for key in SESSION_KEYS {
        storage.set(key, "x").unwrap();
    }
    storage.set("theme", "dark").unwrap();

    storage.clear_keys(&SESSION_KEYS).unwrap();

    assert_eq!(storage.len(), 1);
    assert_eq!(storage.get("theme").unwrap().as_deref(), Some("dark"));
}

#[test]
fn test_memory_storage_remove_missing_is_ok() {
    let storage = MemoryStorage::new();
    storage.remove(REFRESH_TOKEN_KEY).unwrap();
    assert!(storage.is_empty());
}
