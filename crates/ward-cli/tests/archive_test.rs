//! End-to-end tests for the ward-archive binary contract.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn archive_in(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ward-archive").unwrap();
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("WARD_PROJECT_DIR");
    cmd
}

/// A project root anchored with both `.git` and `.ward`.
fn anchored_root(dir: &TempDir) -> PathBuf {
    let root = dir.path().join("project");
    std::fs::create_dir_all(root.join(".git")).unwrap();
    std::fs::create_dir_all(root.join(".ward")).unwrap();
    root
}

fn write_file(path: &Path, contents: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

#[test]
fn test_moves_file_into_quarantine() {
    let dir = TempDir::new().unwrap();
    let root = anchored_root(&dir);
    write_file(&root.join("src").join("a.txt"), "hello");

    archive_in(&root)
        .arg("src/a.txt")
        .assert()
        .success()
        .stdout(predicate::str::contains("Project root:"))
        .stdout(predicate::str::contains(
            "Moved file: src/a.txt -> .deleted/src/a.txt",
        ))
        .stdout(predicate::str::contains("Completed: 1 moved, 0 skipped"));

    assert!(!root.join("src").join("a.txt").exists());
    assert_eq!(
        std::fs::read_to_string(root.join(".deleted").join("src").join("a.txt")).unwrap(),
        "hello"
    );
    assert_eq!(
        std::fs::read_to_string(root.join(".deleted").join(".gitignore")).unwrap(),
        "*\n!.gitignore\n"
    );
}

#[test]
fn test_rearchive_overwrites_without_error() {
    let dir = TempDir::new().unwrap();
    let root = anchored_root(&dir);
    let source = root.join("src").join("a.txt");

    write_file(&source, "first");
    archive_in(&root).arg("src/a.txt").assert().success();

    write_file(&source, "second");
    archive_in(&root)
        .arg("src/a.txt")
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed: 1 moved, 0 skipped"));

    assert_eq!(
        std::fs::read_to_string(root.join(".deleted").join("src").join("a.txt")).unwrap(),
        "second"
    );
}

#[test]
fn test_missing_target_is_skip_not_error() {
    let dir = TempDir::new().unwrap();
    let root = anchored_root(&dir);

    archive_in(&root)
        .arg("ghost.txt")
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed: 0 moved, 1 skipped"))
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_batch_continues_past_missing_target() {
    let dir = TempDir::new().unwrap();
    let root = anchored_root(&dir);
    write_file(&root.join("keep.txt"), "k");

    archive_in(&root)
        .args(["ghost.txt", "keep.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed: 1 moved, 1 skipped"));

    assert!(root.join(".deleted").join("keep.txt").exists());
}

#[test]
fn test_moves_directory_tree() {
    let dir = TempDir::new().unwrap();
    let root = anchored_root(&dir);
    write_file(&root.join("pkg").join("nested").join("y.txt"), "y");

    archive_in(&root)
        .arg("pkg")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Moved directory: pkg -> .deleted/pkg",
        ));

    assert!(!root.join("pkg").exists());
    assert!(root
        .join(".deleted")
        .join("pkg")
        .join("nested")
        .join("y.txt")
        .exists());
}

#[test]
fn test_no_project_root_is_fatal() {
    let dir = TempDir::new().unwrap();

    archive_in(dir.path())
        .arg("anything.txt")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("project root"));
}

#[test]
fn test_env_override_supplies_root() {
    let dir = TempDir::new().unwrap();
    // No anchors anywhere; the override alone must make the batch work.
    let root = dir.path().join("plain");
    write_file(&root.join("data.txt"), "d");

    let mut cmd = Command::cargo_bin("ward-archive").unwrap();
    cmd.current_dir(&root)
        .env_remove("RUST_LOG")
        .env("WARD_PROJECT_DIR", &root)
        .arg("data.txt")
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed: 1 moved, 0 skipped"));

    assert!(root.join(".deleted").join("data.txt").exists());
}

#[test]
fn test_no_arguments_exits_1() {
    let dir = TempDir::new().unwrap();
    archive_in(dir.path()).assert().code(1);
}
