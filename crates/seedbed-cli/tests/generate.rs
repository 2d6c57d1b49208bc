use seedbed_domain::TreeLayout;

mod common;

use common::{parse_json, seedbed};

#[test]
fn dry_run_reports_the_plan_without_writing() {
    let temp = tempfile::tempdir().expect("tempdir");
    let base = temp.path().join("dataset");
    let layout = TreeLayout::standard(2);

    let assert = seedbed()
        .args([
            "--json",
            "generate",
            base.to_str().expect("utf8 path"),
            "--size-gb",
            "2",
            "--dry-run",
        ])
        .assert()
        .success();

    let payload = parse_json(&assert);
    assert_eq!(payload["status"], "ok");
    assert_eq!(payload["details"]["files"], layout.file_count());
    assert_eq!(payload["details"]["bytes"], layout.total_bytes());
    assert_eq!(payload["details"]["dry_run"], true);
    assert!(!base.exists(), "dry run must not create the tree");
}

#[test]
fn custom_seed_is_echoed_in_details() {
    let temp = tempfile::tempdir().expect("tempdir");
    let base = temp.path().join("dataset");

    let assert = seedbed()
        .args([
            "--json",
            "generate",
            base.to_str().expect("utf8 path"),
            "--size-gb",
            "1",
            "--seed",
            "0x1234ABCD",
            "--dry-run",
        ])
        .assert()
        .success();

    let payload = parse_json(&assert);
    assert_eq!(payload["details"]["master_seed"], "0x1234ABCD");
}

#[test]
fn size_gb_zero_is_rejected() {
    seedbed()
        .args(["generate", "dataset", "--size-gb", "0"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn size_gb_above_the_seed_range_is_rejected() {
    seedbed()
        .args(["generate", "dataset", "--size-gb", "256"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn malformed_seed_is_rejected() {
    seedbed()
        .args(["generate", "dataset", "--size-gb", "1", "--seed", "banana"])
        .assert()
        .failure()
        .code(2);
}

#[test]
#[ignore = "writes a full 1 GiB dataset"]
fn full_gigabyte_round_trip() {
    let temp = tempfile::tempdir().expect("tempdir");
    let base = temp.path().join("dataset");
    let base_str = base.to_str().expect("utf8 path");

    seedbed()
        .args(["generate", base_str, "--size-gb", "1"])
        .assert()
        .success();

    let assert = seedbed()
        .args(["--json", "verify", base_str, "--size-gb", "1"])
        .assert()
        .success();
    let payload = parse_json(&assert);
    assert_eq!(payload["details"]["files"], 500);
    assert_eq!(payload["details"]["bytes"], 1_073_741_824u64);

    seedbed().args(["delete", base_str]).assert().success();
    seedbed()
        .args(["verify", base_str, "--size-gb", "1"])
        .assert()
        .code(2);
}
