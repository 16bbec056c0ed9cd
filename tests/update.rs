mod common;

use common::{DB_FILENAME, HELLO_SHA256, add, baseward_cmd, key, read_db, temp_root};
use predicates::prelude::*;
use std::fs;

#[test]
fn update_all_accepts_changes() {
    let (_temp, root) = temp_root();
    let file = root.join("file.txt");
    fs::write(&file, "hello").unwrap();
    add(&root, &["file.txt"]);

    fs::write(&file, "changed").unwrap();

    baseward_cmd(&root)
        .arg("update")
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated baseline for 1 file(s)"));

    baseward_cmd(&root)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("All monitored files are intact."));
}

#[test]
fn update_named_file_keeps_added_date() {
    let (_temp, root) = temp_root();
    let a = root.join("a.txt");
    let b = root.join("b.txt");
    fs::write(&a, "a").unwrap();
    fs::write(&b, "b").unwrap();
    add(&root, &["a.txt", "b.txt"]);
    let before = read_db(&root);

    fs::write(&a, "a, changed").unwrap();
    fs::write(&b, "b, changed").unwrap();

    baseward_cmd(&root)
        .arg("update")
        .arg("a.txt")
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated: a.txt"))
        .stdout(predicate::str::contains("Updated 1 file(s)"));

    let after = read_db(&root);
    let (old_a, new_a) = (&before[&key(&a)], &after[&key(&a)]);
    assert_ne!(old_a["hash"], new_a["hash"]);
    assert_eq!(new_a["size"], 10);
    assert_eq!(old_a["added_date"], new_a["added_date"]);
    assert_eq!(before[&key(&b)], after[&key(&b)]);
}

#[test]
fn update_skips_deleted_and_unmonitored_files() {
    let (_temp, root) = temp_root();
    fs::write(root.join("gone.txt"), "gone").unwrap();
    fs::write(root.join("stranger.txt"), "stranger").unwrap();
    add(&root, &["gone.txt"]);
    fs::remove_file(root.join("gone.txt")).unwrap();

    baseward_cmd(&root)
        .arg("update")
        .arg("gone.txt")
        .arg("stranger.txt")
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated 0 file(s)"))
        .stderr(predicate::str::is_empty());

    baseward_cmd(&root)
        .arg("update")
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated baseline for 0 file(s)"));

    let db = read_db(&root);
    assert_eq!(db.len(), 1, "deleted file should remain monitored");
    assert!(db.contains_key(&key(&root.join("gone.txt"))));
}

#[test]
fn update_keeps_baseline_of_file_that_cannot_be_read() {
    let (_temp, root) = temp_root();
    let item = root.join("item");
    fs::write(&item, "hello").unwrap();
    add(&root, &["item"]);
    let before = fs::read_to_string(root.join(DB_FILENAME)).unwrap();

    fs::remove_file(&item).unwrap();
    fs::create_dir(&item).unwrap();

    baseward_cmd(&root)
        .arg("update")
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated baseline for 0 file(s)"))
        .stderr(predicate::str::contains("Error reading"));

    let after = fs::read_to_string(root.join(DB_FILENAME)).unwrap();
    assert_eq!(before, after);
}

#[test]
fn update_rebaselines_record_without_hash() {
    let (_temp, root) = temp_root();
    let file = root.join("file.txt");
    fs::write(&file, "hello").unwrap();
    fs::write(
        root.join(DB_FILENAME),
        format!(
            r#"{{"{}": {{"hash": null, "size": 5, "modified": 1.0, "added_date": "2024-03-01T09:30:15.123456"}}}}"#,
            key(&file)
        ),
    )
    .unwrap();

    baseward_cmd(&root)
        .arg("update")
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated baseline for 1 file(s)"));

    let record = &read_db(&root)[&key(&file)];
    assert_eq!(record["hash"], HELLO_SHA256);
    assert_eq!(record["added_date"], "2024-03-01T09:30:15.123456");
}
