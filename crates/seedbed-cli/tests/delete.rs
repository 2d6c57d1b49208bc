use std::fs;

mod common;

use common::{parse_json, seedbed};

#[test]
fn absent_tree_is_a_no_op_success() {
    let temp = tempfile::tempdir().expect("tempdir");
    let base = temp.path().join("never-generated");

    let assert = seedbed()
        .args(["--json", "delete", base.to_str().expect("utf8 path")])
        .assert()
        .success();

    let payload = parse_json(&assert);
    assert_eq!(payload["status"], "ok");
    assert_eq!(payload["details"]["existed"], false);
}

#[test]
fn existing_tree_is_removed_recursively() {
    let temp = tempfile::tempdir().expect("tempdir");
    let base = temp.path().join("dataset");
    let nested = base.join("dir_0/sub_0/leaf_0");
    fs::create_dir_all(&nested).expect("nested dirs");
    fs::write(nested.join("data_0.bin"), b"stale").expect("stale file");

    let assert = seedbed()
        .args(["--json", "delete", base.to_str().expect("utf8 path")])
        .assert()
        .success();

    let payload = parse_json(&assert);
    assert_eq!(payload["details"]["existed"], true);
    assert!(!base.exists());
}
