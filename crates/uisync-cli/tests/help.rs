use assert_cmd::Command;
use predicates::prelude::*;

#[allow(deprecated)]
fn bin(name: &str) -> Command {
    Command::cargo_bin(name).unwrap()
}

#[test]
fn help_works() {
    bin("uisync").arg("--help").assert().success();
    bin("add-ts-nocheck").arg("--help").assert().success();
}

#[test]
fn subcommands_are_listed() {
    bin("uisync")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("pack").and(predicate::str::contains("nocheck")));
}
