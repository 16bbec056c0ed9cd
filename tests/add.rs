mod common;

use common::{HELLO_SHA256, add, baseward_cmd, key, read_db, temp_root};
use predicates::prelude::*;
use std::fs;

#[test]
fn add_records_file_under_absolute_path() {
    let (_temp, root) = temp_root();
    fs::write(root.join("file.txt"), "hello").unwrap();

    baseward_cmd(&root)
        .arg("add")
        .arg("file.txt")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Added: {}",
            root.join("file.txt").display()
        )))
        .stdout(predicate::str::contains("Added 1 file(s) to monitoring"))
        .stderr(predicate::str::is_empty());

    let db = read_db(&root);
    assert_eq!(db.len(), 1);

    let record = &db[&key(&root.join("file.txt"))];
    assert_eq!(record["hash"], HELLO_SHA256);
    assert_eq!(record["size"], 5);
    assert!(record["modified"].is_number());
    assert!(record["added_date"].is_string());
}

#[test]
fn add_directory_records_every_nested_file() {
    let (_temp, root) = temp_root();
    let dir = root.join("dirA");
    fs::create_dir_all(dir.join("sub")).unwrap();
    fs::write(dir.join("a.txt"), "a").unwrap();
    fs::write(dir.join("b.txt"), "b").unwrap();
    fs::write(dir.join("sub/c.txt"), "c").unwrap();

    baseward_cmd(&root)
        .arg("add")
        .arg("dirA/")
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 3 file(s) to monitoring"));

    let db = read_db(&root);
    assert_eq!(db.len(), 3);
    for name in ["a.txt", "b.txt", "sub/c.txt"] {
        assert!(db.contains_key(&key(&dir.join(name))), "missing {name}");
    }
}

#[test]
fn adding_same_file_twice_keeps_one_record() {
    let (_temp, root) = temp_root();
    fs::write(root.join("file.txt"), "hello").unwrap();

    add(&root, &["file.txt"]);
    add(&root, &["file.txt"]);

    assert_eq!(read_db(&root).len(), 1);
}

#[test]
fn add_skips_missing_paths_and_continues() {
    let (_temp, root) = temp_root();
    fs::write(root.join("file.txt"), "hello").unwrap();

    baseward_cmd(&root)
        .arg("add")
        .arg("missing.txt")
        .arg("file.txt")
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 1 file(s) to monitoring"))
        .stderr(predicate::str::contains("missing.txt not found"));

    assert_eq!(read_db(&root).len(), 1);
}

#[test]
fn add_without_paths_is_a_usage_error() {
    let (_temp, root) = temp_root();

    baseward_cmd(&root)
        .arg("add")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("required"));

    assert!(!root.join(common::DB_FILENAME).exists());
}

#[test]
fn add_uses_db_flag() {
    let (_temp, root) = temp_root();
    fs::write(root.join("file.txt"), "hello").unwrap();

    baseward_cmd(&root)
        .arg("--db")
        .arg("custom.json")
        .arg("add")
        .arg("file.txt")
        .assert()
        .success();

    assert!(root.join("custom.json").exists());
    assert!(!root.join(common::DB_FILENAME).exists());
}

#[cfg(unix)]
#[test]
fn add_reports_unreadable_file_and_continues() {
    use std::os::unix::fs::PermissionsExt;

    let (_temp, root) = temp_root();
    let locked = root.join("locked.txt");
    fs::write(&locked, "secret").unwrap();
    fs::write(root.join("open.txt"), "hello").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users can read regardless of mode.
    if fs::File::open(&locked).is_ok() {
        return;
    }

    baseward_cmd(&root)
        .arg("add")
        .arg("locked.txt")
        .arg("open.txt")
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 1 file(s) to monitoring"))
        .stderr(predicate::str::contains("Permission denied"));

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();
}
