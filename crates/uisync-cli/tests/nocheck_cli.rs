//! End-to-end tests for the suppression-marker applier binaries.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use uisync_test_util::{normalize_nondeterministic, read_file, utf8_root, write_file};

#[allow(deprecated)]
fn add_ts_nocheck() -> Command {
    Command::cargo_bin("add-ts-nocheck").unwrap()
}

#[allow(deprecated)]
fn uisync() -> Command {
    Command::cargo_bin("uisync").unwrap()
}

#[test]
fn adds_marker_to_every_unmarked_file() {
    let tmp = TempDir::new().expect("temp dir");
    let root = utf8_root(&tmp);
    write_file(&root.join("a.ts"), "let a;\n");
    write_file(&root.join("nested/b.tsx"), "export {};\n");
    write_file(&root.join("nested/c.js"), "let c;\n");

    add_ts_nocheck()
        .arg(root.as_str())
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Added @ts-nocheck to: ")
                .count(2)
                .and(predicate::str::contains("a.ts"))
                .and(predicate::str::contains("b.tsx")),
        );

    assert_eq!(read_file(&root.join("a.ts")), "// @ts-nocheck\nlet a;\n");
    assert_eq!(read_file(&root.join("nested/b.tsx")), "// @ts-nocheck\nexport {};\n");
    assert_eq!(read_file(&root.join("nested/c.js")), "let c;\n");
}

#[test]
fn second_run_only_skips() {
    let tmp = TempDir::new().expect("temp dir");
    let root = utf8_root(&tmp);
    write_file(&root.join("a.ts"), "let a;\n");
    write_file(&root.join("b.ts"), "\n  \n// @ts-nocheck\nlet b;\n");

    add_ts_nocheck().arg(root.as_str()).assert().success();
    let after_first = read_file(&root.join("a.ts"));

    add_ts_nocheck()
        .arg(root.as_str())
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Skipping (already has @ts-nocheck): ")
                .count(2)
                .and(predicate::str::contains("Added").not()),
        );
    assert_eq!(read_file(&root.join("a.ts")), after_first);
    assert_eq!(read_file(&root.join("b.ts")), "\n  \n// @ts-nocheck\nlet b;\n");
}

#[cfg(unix)]
#[test]
fn printed_paths_keep_the_directory_as_given() {
    let tmp = TempDir::new().expect("temp dir");
    let root = utf8_root(&tmp);
    write_file(&root.join("src/a.ts"), "let a;\n");

    add_ts_nocheck()
        .current_dir(&root)
        .arg("./src")
        .assert()
        .success()
        .stdout(predicate::str::contains("Added @ts-nocheck to: ./src/a.ts"));
}

#[test]
fn invalid_directory_exits_one() {
    let tmp = TempDir::new().expect("temp dir");
    let root = utf8_root(&tmp);
    let file = root.join("file.ts");
    write_file(&file, "let x;\n");

    add_ts_nocheck()
        .arg(root.join("missing").as_str())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("is not a valid directory"));

    add_ts_nocheck()
        .arg(file.as_str())
        .assert()
        .code(1);
    assert_eq!(read_file(&file), "let x;\n");
}

#[test]
fn missing_argument_exits_one_with_usage() {
    add_ts_nocheck()
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Usage: add-ts-nocheck <directory>"));
}

#[test]
fn extra_arguments_are_ignored() {
    let tmp = TempDir::new().expect("temp dir");
    let root = utf8_root(&tmp);
    write_file(&root.join("a.ts"), "let a;\n");

    add_ts_nocheck()
        .arg(root.as_str())
        .args(["second", "third"])
        .assert()
        .success()
        .stderr(predicate::str::contains("ignoring extra arguments: second third"));
    assert_eq!(read_file(&root.join("a.ts")), "// @ts-nocheck\nlet a;\n");
}

#[test]
fn unknown_flag_exits_one() {
    add_ts_nocheck()
        .arg("--bogus")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--bogus"));
}

#[test]
fn non_utf8_file_is_reported_and_run_continues() {
    let tmp = TempDir::new().expect("temp dir");
    let root = utf8_root(&tmp);
    std::fs::write(root.join("a.ts"), [0xff, 0xfe, 0x00]).expect("write bytes");
    write_file(&root.join("b.ts"), "let b;\n");

    add_ts_nocheck()
        .arg(root.as_str())
        .assert()
        .success()
        .stderr(predicate::str::contains("Error processing").and(predicate::str::contains("UTF-8")))
        .stdout(predicate::str::contains("Added @ts-nocheck to: "));

    assert_eq!(read_file(&root.join("b.ts")), "// @ts-nocheck\nlet b;\n");
}

#[test]
fn uisync_nocheck_check_mode_exits_two_without_writing() {
    let tmp = TempDir::new().expect("temp dir");
    let root = utf8_root(&tmp);
    write_file(&root.join("src/a.ts"), "let a;\n");

    uisync()
        .args(["--project-root", root.as_str(), "nocheck", "--check"])
        .arg(root.join("src").as_str())
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Missing @ts-nocheck: "));
    assert_eq!(read_file(&root.join("src/a.ts")), "let a;\n");
}

#[test]
fn uisync_nocheck_honors_config_and_writes_report() {
    let tmp = TempDir::new().expect("temp dir");
    let root = utf8_root(&tmp);
    write_file(
        &root.join("uisync.toml"),
        r#"[nocheck]
include = ["*.ts"]
exclude = ["**/*.d.ts"]
"#,
    );
    write_file(&root.join("src/a.ts"), "let a;\n");
    write_file(&root.join("src/a.d.ts"), "declare const a: number;\n");
    let report = root.join("out/report.json");

    uisync()
        .args(["--project-root", root.as_str(), "nocheck"])
        .arg(root.join("src").as_str())
        .args(["--report-out", report.as_str()])
        .assert()
        .success();

    assert_eq!(read_file(&root.join("src/a.d.ts")), "declare const a: number;\n");

    let value: serde_json::Value =
        serde_json::from_str(&read_file(&report)).expect("report json");
    let value = normalize_nondeterministic(value);
    assert_eq!(value["schema"], "uisync.nocheck.report.v1");
    assert_eq!(value["tool"]["version"], "__VERSION__");
    assert_eq!(value["data"]["counts"]["added"], 1);
    assert_eq!(value["data"]["files"].as_array().map(Vec::len), Some(1));
    assert_eq!(value["data"]["files"][0]["outcome"], "added");
}

#[test]
fn uisync_nocheck_rejects_bad_glob() {
    let tmp = TempDir::new().expect("temp dir");
    let root = utf8_root(&tmp);

    uisync()
        .args(["--project-root", root.as_str(), "nocheck", "--include", "["])
        .arg(root.as_str())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid include glob"));
}
