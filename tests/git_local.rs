//! Integration tests for the git wrappers, run against scratch repositories
//! built with the real `git` binary.

use camino::{Utf8Path, Utf8PathBuf};
use commit_rank::git;
use std::fs;
use std::process::Command;
use tempfile::TempDir;
use url::Url;

fn utf8(path: &std::path::Path) -> Utf8PathBuf {
    Utf8Path::from_path(path).expect("UTF-8 path").to_owned()
}

fn run_git(dir: &Utf8Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git is available");

    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Create a repository with one commit per (file, message) pair, in order.
fn build_repo(dir: &Utf8Path, commits: &[(&str, &str)]) {
    run_git(dir, &["init", "-q"]);
    run_git(dir, &["config", "user.name", "Test Author"]);
    run_git(dir, &["config", "user.email", "test@example.com"]);
    run_git(dir, &["config", "commit.gpgsign", "false"]);

    for (file, message) in commits {
        fs::write(dir.join(file).as_std_path(), format!("contents of {file}\n")).expect("write file");
        run_git(dir, &["add", "."]);
        run_git(dir, &["commit", "-q", "-m", message]);
    }
}

#[tokio::test]
async fn test_list_returns_available_commits_newest_first() {
    let temp = TempDir::new().expect("tempdir");
    let repo = utf8(temp.path());
    build_repo(&repo, &[("a.txt", "first"), ("b.txt", "second"), ("c.txt", "third")]);

    let commits = git::list_recent_commits(&repo, 5).await;

    let messages: Vec<&str> = commits.iter().map(|c| c.message.as_str()).collect();
    assert_eq!(messages, vec!["third", "second", "first"]);

    for commit in &commits {
        assert_eq!(commit.hash.len(), 40);
        assert_eq!(commit.author, "Test Author");
        assert!(!commit.date.is_empty());
    }
}

#[tokio::test]
async fn test_list_honors_count_limit() {
    let temp = TempDir::new().expect("tempdir");
    let repo = utf8(temp.path());
    build_repo(&repo, &[("a.txt", "first"), ("b.txt", "second"), ("c.txt", "third")]);

    let commits = git::list_recent_commits(&repo, 2).await;
    let messages: Vec<&str> = commits.iter().map(|c| c.message.as_str()).collect();
    assert_eq!(messages, vec!["third", "second"]);
}

#[tokio::test]
async fn test_list_on_non_repository_is_empty() {
    let temp = TempDir::new().expect("tempdir");
    let commits = git::list_recent_commits(&utf8(temp.path()), 5).await;
    assert!(commits.is_empty());
}

#[tokio::test]
async fn test_diff_contains_the_change() {
    let temp = TempDir::new().expect("tempdir");
    let repo = utf8(temp.path());
    build_repo(&repo, &[("a.txt", "first")]);

    let commits = git::list_recent_commits(&repo, 1).await;
    let diff = git::commit_diff(&repo, &commits[0].hash).await;

    assert!(diff.contains("a.txt"));
    assert!(diff.contains("+contents of a.txt"));
}

#[tokio::test]
async fn test_diff_for_unknown_commit_is_empty() {
    let temp = TempDir::new().expect("tempdir");
    let repo = utf8(temp.path());
    build_repo(&repo, &[("a.txt", "first")]);

    let diff = git::commit_diff(&repo, "0000000000000000000000000000000000000000").await;
    assert!(diff.is_empty());
}

#[tokio::test]
async fn test_clone_from_local_source() {
    let source_temp = TempDir::new().expect("tempdir");
    let source = utf8(source_temp.path());
    build_repo(&source, &[("a.txt", "first"), ("b.txt", "second")]);

    let dest_temp = TempDir::new().expect("tempdir");
    let dest = utf8(dest_temp.path()).join("checkout");

    let url = Url::from_file_path(source.as_std_path()).expect("file URL");
    assert!(git::clone_repository(&url, &dest, None).await);

    // Shallow clone: only the most recent commit comes over.
    let commits = git::list_recent_commits(&dest, 5).await;
    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0].message, "second");
}

#[tokio::test]
async fn test_clone_failure_reports_false() {
    let dest_temp = TempDir::new().expect("tempdir");
    let dest = utf8(dest_temp.path()).join("checkout");

    let url = Url::parse("file:///nonexistent/never-there.git").expect("URL");
    assert!(!git::clone_repository(&url, &dest, None).await);
}
