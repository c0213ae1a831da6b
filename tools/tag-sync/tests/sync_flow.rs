//! End-to-end tag synchronization against a real repository.

use std::path::Path;
use std::process::Command;

use tag_sync::git::GitRepo;
use tag_sync::version::DEFAULT_PATTERN;
use tag_sync::{sync_tag, SyncOptions, SyncOutcome};
use tempfile::TempDir;

/// `git init` plus one commit, with identity configured locally so the
/// test does not depend on the runner's global config.
fn init_repo() -> TempDir {
    let dir = TempDir::new().expect("create temp dir");
    git(dir.path(), &["init", "--quiet"]);
    git(dir.path(), &["config", "user.name", "Test"]);
    git(dir.path(), &["config", "user.email", "test@example.com"]);

    std::fs::write(
        dir.path().join("_metadata.py"),
        "__author__ = 'maskwork'\n__version__ = '1.4.0'\n",
    )
    .expect("write metadata file");
    git(dir.path(), &["add", "."]);
    git(dir.path(), &["commit", "--quiet", "-m", "initial"]);
    dir
}

fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args(args)
        .current_dir(dir)
        .status()
        .expect("git must be installed to run these tests");
    assert!(status.success(), "git {args:?} failed");
}

fn git_stdout(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git must be installed to run these tests");
    assert!(output.status.success(), "git {args:?} failed");
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

#[test]
fn creates_the_tag_once_then_noops() {
    let dir = init_repo();
    let repo = GitRepo::open(dir.path()).unwrap();
    let file = dir.path().join("_metadata.py");
    let options = SyncOptions::default();

    let outcome = sync_tag(&repo, &file, DEFAULT_PATTERN, &options).unwrap();
    let head = git_stdout(dir.path(), &["rev-parse", "HEAD"]);
    assert_eq!(
        outcome,
        SyncOutcome::Created {
            tag: "v1.4.0".to_string(),
            commit: head.clone(),
        }
    );

    // The tag points at the commit that was current when the run fired.
    let tagged = git_stdout(dir.path(), &["rev-parse", "v1.4.0^{commit}"]);
    assert_eq!(tagged, head);

    // Second run: no mutation, still successful.
    let outcome = sync_tag(&repo, &file, DEFAULT_PATTERN, &options).unwrap();
    assert_eq!(
        outcome,
        SyncOutcome::AlreadyExists {
            tag: "v1.4.0".to_string(),
        }
    );
    let tags = git_stdout(dir.path(), &["tag", "--list"]);
    assert_eq!(tags.lines().count(), 1);
}

#[test]
fn dry_run_reports_without_creating() {
    let dir = init_repo();
    let repo = GitRepo::open(dir.path()).unwrap();
    let file = dir.path().join("_metadata.py");

    let options = SyncOptions {
        dry_run: true,
        ..SyncOptions::default()
    };
    let outcome = sync_tag(&repo, &file, DEFAULT_PATTERN, &options).unwrap();
    assert!(matches!(outcome, SyncOutcome::WouldCreate { ref tag, .. } if tag == "v1.4.0"));

    let tags = git_stdout(dir.path(), &["tag", "--list"]);
    assert!(tags.is_empty());
}

#[test]
fn malformed_version_file_aborts_the_run() {
    let dir = init_repo();
    let repo = GitRepo::open(dir.path()).unwrap();

    let broken = dir.path().join("broken.py");
    std::fs::write(&broken, "__version__ = unquoted\n").unwrap();
    let err = sync_tag(&repo, &broken, DEFAULT_PATTERN, &SyncOptions::default()).unwrap_err();
    assert!(err.to_string().contains("version pattern"));

    let missing = dir.path().join("does_not_exist.py");
    let err = sync_tag(&repo, &missing, DEFAULT_PATTERN, &SyncOptions::default()).unwrap_err();
    assert!(err.to_string().contains("File not found"));
}

#[test]
fn explicit_commit_overrides_head() {
    let dir = init_repo();
    let first = git_stdout(dir.path(), &["rev-parse", "HEAD"]);

    // Advance HEAD past the commit we want to tag.
    std::fs::write(dir.path().join("extra.txt"), "later\n").unwrap();
    git(dir.path(), &["add", "."]);
    git(dir.path(), &["commit", "--quiet", "-m", "later"]);

    let repo = GitRepo::open(dir.path()).unwrap();
    let file = dir.path().join("_metadata.py");
    let options = SyncOptions {
        commit: Some(first.clone()),
        ..SyncOptions::default()
    };
    let outcome = sync_tag(&repo, &file, DEFAULT_PATTERN, &options).unwrap();
    assert_eq!(
        outcome,
        SyncOutcome::Created {
            tag: "v1.4.0".to_string(),
            commit: first.clone(),
        }
    );

    let tagged = git_stdout(dir.path(), &["rev-parse", "v1.4.0^{commit}"]);
    assert_eq!(tagged, first);
}
