//! End-to-end CLI integration tests.
//!
//! These tests verify the complete CLI workflow by:
//! 1. Creating a temporary git repository
//! 2. Running commisery commands
//! 3. Verifying the expected outputs

use std::fs;
use std::path::Path;
use std::process::Command as StdCommand;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn commisery(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_commisery"));
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

fn git(dir: &Path, args: &[&str]) {
    let output = StdCommand::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Creates a temporary git repository on branch `main`.
fn setup_git_repo() -> TempDir {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let dir = temp_dir.path();

    git(dir, &["init", "-q"]);
    git(dir, &["symbolic-ref", "HEAD", "refs/heads/main"]);
    git(dir, &["config", "user.email", "test@example.com"]);
    git(dir, &["config", "user.name", "Test User"]);
    git(dir, &["config", "commit.gpgsign", "false"]);

    temp_dir
}

fn git_commit(dir: &Path, message: &str) {
    git(dir, &["commit", "-q", "--allow-empty", "-m", message]);
}

fn git_tag(dir: &Path, tag: &str) {
    git(dir, &["tag", tag]);
}

fn tags(dir: &Path) -> String {
    let output = StdCommand::new("git")
        .args(["tag", "--list"])
        .current_dir(dir)
        .output()
        .expect("failed to list tags");
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_check_compliant_message() {
    let temp_dir = TempDir::new().unwrap();

    commisery(temp_dir.path())
        .args(["check", "-m", "feat(parser): add footer folding"])
        .assert()
        .success();
}

#[test]
fn test_check_reports_diagnostics() {
    let temp_dir = TempDir::new().unwrap();

    commisery(temp_dir.path())
        .args(["check", "-m", "Chore: did something"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("C001"))
        .stderr(predicate::str::contains("chore"));
}

#[test]
fn test_check_reads_commit_msg_file() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("COMMIT_EDITMSG");
    fs::write(
        &file,
        "fix: handle empty input\n\n# Please enter the commit message for your changes.\n",
    )
    .unwrap();

    commisery(temp_dir.path())
        .arg("check")
        .arg(&file)
        .assert()
        .success();
}

#[test]
fn test_check_reads_stdin() {
    let temp_dir = TempDir::new().unwrap();

    commisery(temp_dir.path())
        .args(["check", "-"])
        .write_stdin("docs: explain the rules\n")
        .assert()
        .success();
}

#[test]
fn test_check_rejects_merge_commit() {
    let temp_dir = TempDir::new().unwrap();

    commisery(temp_dir.path())
        .args(["check", "-m", "Merge branch 'main' into topic"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("merge"));
}

#[test]
fn test_check_honours_config() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(".commisery.toml"),
        "[tags]\nwip = \"Work in progress\"\n",
    )
    .unwrap();

    commisery(temp_dir.path())
        .args(["check", "-m", "wip: half done"])
        .assert()
        .success();
}

#[test]
fn test_check_rejects_invalid_config() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(".commisery.toml"),
        "max-subject-length = \"long\"\n",
    )
    .unwrap();

    commisery(temp_dir.path())
        .args(["check", "-m", "feat: x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load configuration"));
}

#[test]
fn test_rules_lists_registry() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(".commisery.toml"),
        "disable = [\"C003\"]\n",
    )
    .unwrap();

    commisery(temp_dir.path())
        .arg("rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("C001  enabled"))
        .stdout(predicate::str::contains("C003  disabled"))
        .stdout(predicate::str::contains("C022  disabled"));
}

#[test]
fn test_gate_passes() {
    let temp_dir = setup_git_repo();
    let dir = temp_dir.path();
    git_commit(dir, "chore: initial commit");
    git(dir, &["checkout", "-q", "-b", "topic"]);
    git_commit(dir, "feat: add x");

    commisery(dir)
        .args(["gate", "--title", "feat: add x", "--since", "main"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_gate_reports_workflow_errors() {
    let temp_dir = setup_git_repo();
    let dir = temp_dir.path();
    git_commit(dir, "chore: initial commit");
    git(dir, &["checkout", "-q", "-b", "topic"]);
    git_commit(dir, "Add x");

    commisery(dir)
        .args(["gate", "--title", "Add x", "--since", "main"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("::error::pull request title"))
        .stdout(predicate::str::contains("::error::commit "));
}

#[test]
fn test_bump_semver_creates_tag() {
    let temp_dir = setup_git_repo();
    let dir = temp_dir.path();
    fs::write(dir.join(".commisery.toml"), "version-prefix = \"v\"\n").unwrap();

    git_commit(dir, "chore: initial commit");
    git_tag(dir, "v1.0.0");
    git_commit(dir, "feat: add new feature");
    git_commit(dir, "fix: resolve critical bug");

    commisery(dir)
        .arg("bump")
        .assert()
        .success()
        .stdout(predicate::str::contains("v1.0.0 -> v1.1.0"));

    assert!(tags(dir).contains("v1.1.0"));
}

#[test]
fn test_bump_dry_run_json() {
    let temp_dir = setup_git_repo();
    let dir = temp_dir.path();
    fs::write(dir.join(".commisery.toml"), "version-prefix = \"v\"\n").unwrap();

    git_commit(dir, "chore: initial commit");
    git_tag(dir, "v1.0.0");
    git_commit(dir, "fix!: drop legacy flag");

    let output = commisery(dir)
        .args(["bump", "--dry-run", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["current_version"], "v1.0.0");
    assert_eq!(report["next_version"], "v2.0.0");
    assert_eq!(report["bump"]["type"], "major");
    assert_eq!(report["commits"].as_array().unwrap().len(), 1);
    assert!(!tags(dir).contains("v2.0.0"));
}

#[test]
fn test_bump_nothing_to_do() {
    let temp_dir = setup_git_repo();
    let dir = temp_dir.path();

    git_commit(dir, "chore: initial commit");
    git_tag(dir, "1.0.0");
    git_commit(dir, "docs: readme");

    commisery(dir)
        .arg("bump")
        .assert()
        .success()
        .stdout(predicate::str::contains("No bump required"));
}

#[test]
fn test_bump_refused_on_release_branch() {
    let temp_dir = setup_git_repo();
    let dir = temp_dir.path();

    git_commit(dir, "chore: initial commit");
    git_tag(dir, "1.2.0");
    git(dir, &["checkout", "-q", "-b", "release/1.2"]);
    git_commit(dir, "feat: sneak in a feature");

    commisery(dir)
        .arg("bump")
        .assert()
        .failure()
        .stderr(predicate::str::contains("release branch"));

    assert!(!tags(dir).contains("1.3.0"));
}

#[test]
fn test_bump_sdkver_dev() {
    let temp_dir = setup_git_repo();
    let dir = temp_dir.path();
    fs::write(dir.join(".commisery.toml"), "initial-development = false\n").unwrap();

    git_commit(dir, "chore: initial commit");
    git_tag(dir, "1.2.0");
    git_commit(dir, "feat: add x");

    commisery(dir)
        .args(["bump", "--strategy", "sdkver", "--release-type", "dev"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1.2.0 -> 1.3.0-dev001."));

    assert!(tags(dir).contains("1.3.0-dev001."));
}

#[test]
fn test_bump_skips_disallowed_branch() {
    let temp_dir = setup_git_repo();
    let dir = temp_dir.path();
    fs::write(dir.join(".commisery.toml"), "allowed-branches = \"main\"\n").unwrap();

    git_commit(dir, "chore: initial commit");
    git(dir, &["checkout", "-q", "-b", "topic"]);
    git_commit(dir, "feat: add x");

    commisery(dir)
        .arg("bump")
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped bump on topic"));

    assert!(tags(dir).is_empty());
}

#[test]
fn test_bump_outside_repository_fails() {
    let temp_dir = TempDir::new().unwrap();

    commisery(temp_dir.path())
        .arg("bump")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to open git repository"));
}
