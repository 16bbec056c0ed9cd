// Each integration test file is compiled as its own crate and uses a
// different subset of these helpers.
#![allow(dead_code)]

use assert_cmd::{Command, cargo::cargo_bin_cmd};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const DB_FILENAME: &str = "integrity_db.json";

/// SHA-256 of `hello`.
pub const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

pub fn baseward_cmd(cwd: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("baseward");
    cmd.env_remove("RUST_LOG").arg("-C").arg(cwd);
    cmd
}

/// Temporary directory together with its canonical path, which is what the
/// binary sees as its working directory after `-C`.
pub fn temp_root() -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let root = temp.path().canonicalize().unwrap();
    (temp, root)
}

pub fn read_db(root: &Path) -> serde_json::Map<String, serde_json::Value> {
    let content = std::fs::read_to_string(root.join(DB_FILENAME)).expect("baseline file missing");
    match serde_json::from_str(&content).expect("baseline is not valid JSON") {
        serde_json::Value::Object(map) => map,
        other => panic!("baseline is not a JSON object: {other}"),
    }
}

pub fn key(path: &Path) -> String {
    path.to_str().unwrap().to_string()
}

pub fn add(root: &Path, paths: &[&str]) {
    baseward_cmd(root).arg("add").args(paths).assert().success();
}
