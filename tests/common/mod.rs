#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use balance_core::{ledger::Ledger, storage::TextFileStore};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated home directory that outlives the calling test.
pub fn test_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn store_path(home: &Path) -> PathBuf {
    home.join(".transactions")
}

/// Ledger backed by `.transactions` inside `home`.
pub fn file_ledger(home: &Path) -> Ledger {
    Ledger::new(Box::new(TextFileStore::new(store_path(home))))
}
