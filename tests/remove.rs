mod common;

use common::{add, baseward_cmd, read_db, temp_root};
use predicates::prelude::*;
use std::fs;

#[test]
fn remove_monitored_file() {
    let (_temp, root) = temp_root();
    fs::write(root.join("file.txt"), "hello").unwrap();
    fs::write(root.join("kept.txt"), "kept").unwrap();
    add(&root, &["file.txt", "kept.txt"]);

    baseward_cmd(&root)
        .arg("remove")
        .arg("file.txt")
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed: file.txt"))
        .stdout(predicate::str::contains("Removed 1 file(s) from monitoring"));

    let db = read_db(&root);
    assert_eq!(db.len(), 1);
    assert!(db.contains_key(&common::key(&root.join("kept.txt"))));
}

#[test]
fn remove_unmonitored_path_is_not_an_error() {
    let (_temp, root) = temp_root();
    fs::write(root.join("file.txt"), "hello").unwrap();
    add(&root, &["file.txt"]);

    baseward_cmd(&root)
        .arg("remove")
        .arg("other.txt")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not monitored: other.txt"))
        .stdout(predicate::str::contains("Removed 0 file(s) from monitoring"));

    assert_eq!(read_db(&root).len(), 1);
}

#[test]
fn remove_deleted_file() {
    let (_temp, root) = temp_root();
    fs::write(root.join("file.txt"), "hello").unwrap();
    add(&root, &["file.txt"]);
    fs::remove_file(root.join("file.txt")).unwrap();

    baseward_cmd(&root)
        .arg("remove")
        .arg("file.txt")
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 1 file(s) from monitoring"));

    assert!(read_db(&root).is_empty());
}

#[test]
fn remove_without_paths_is_a_usage_error() {
    let (_temp, root) = temp_root();

    baseward_cmd(&root)
        .arg("remove")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("required"));
}
