use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

const FALLBACK_WARNING: &str =
    "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled";

#[cfg(not(feature = "storage-rocksdb"))]
#[test]
fn test_rocksdb_fallback_warning() {
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = Command::new(cargo_bin!("marketio"));
    cmd.env_remove("RUST_LOG")
        .arg("history")
        .arg("--db-path")
        .arg(dir.path().join("some_db"));

    cmd.assert()
        .success()
        .stdout("No purchases yet\n")
        .stderr(predicate::str::contains(FALLBACK_WARNING));
}

#[cfg(feature = "storage-rocksdb")]
#[test]
fn test_rocksdb_no_fallback_warning() {
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = Command::new(cargo_bin!("marketio"));
    cmd.env_remove("RUST_LOG")
        .arg("history")
        .arg("--db-path")
        .arg(dir.path().join("test_db"));

    cmd.assert()
        .success()
        .stderr(predicate::str::contains(FALLBACK_WARNING).not());
}
