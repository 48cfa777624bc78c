#![cfg(feature = "cli")]

use std::fs;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;

fn bin_cmd() -> Command {
    Command::cargo_bin("iconsmith").unwrap()
}

#[test]
fn help_works() {
    bin_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Root of the Tauri project"));
}

#[test]
fn empty_assets_exits_with_failure() {
    let project = tempfile::tempdir().unwrap();
    let assets = project.path().join("assets");
    fs::create_dir_all(&assets).unwrap();
    fs::create_dir_all(project.path().join("src-tauri")).unwrap();

    bin_cmd()
        .arg(project.path())
        .env("RUST_LOG", "off")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("no source icon found"));

    assert_eq!(fs::read_dir(&assets).unwrap().count(), 0);
}

#[test]
fn missing_assets_dir_is_left_missing() {
    let project = tempfile::tempdir().unwrap();

    bin_cmd().arg(project.path()).assert().failure();

    assert!(!project.path().join("assets").exists());
}
