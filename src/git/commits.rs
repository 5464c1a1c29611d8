//! Commit listing and diff retrieval through the `git` command line.
//!
//! Failures here are never fatal: a repository that cannot be inspected simply
//! contributes no commits, and a diff that cannot be retrieved is empty. Both
//! are logged.

use camino::Utf8Path;
use tokio::process::Command;

const LOG_TARGET: &str = "       git";

/// A single commit parsed from `git log` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Full commit SHA.
    pub hash: String,

    /// Author name.
    pub author: String,

    /// Author date in ISO format, as emitted by `git log --date=iso`.
    pub date: String,

    /// Subject line of the commit message.
    pub message: String,
}

/// The first eight characters of a commit hash, for display.
#[must_use]
pub fn short_hash(hash: &str) -> &str {
    hash.get(..8).unwrap_or(hash)
}

/// List up to `count` recent non-merge commits of the checkout at `repo`,
/// newest first. Returns an empty list if the repository cannot be read.
pub async fn list_recent_commits(repo: &Utf8Path, count: usize) -> Vec<Commit> {
    let result = Command::new("git")
        .arg("log")
        .arg("--no-merges")
        .arg(format!("-{count}"))
        .arg("--pretty=format:%H|%an|%ad|%s")
        .arg("--date=iso")
        .current_dir(repo)
        .output()
        .await;

    let repo_name = repo.file_name().unwrap_or(repo.as_str());

    match result {
        Ok(output) if output.status.success() => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let commits: Vec<Commit> = stdout.lines().filter_map(parse_log_line).collect();
            log::info!(target: LOG_TARGET, "Found {} commits in {repo_name}", commits.len());
            commits
        }
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            log::error!(target: LOG_TARGET, "Error getting commits from {repo}: {}", stderr.trim());
            Vec::new()
        }
        Err(e) => {
            log::error!(target: LOG_TARGET, "Error getting commits from {repo}: {e}");
            Vec::new()
        }
    }
}

/// Full diff text for one commit. Returns an empty string if it cannot be
/// retrieved.
pub async fn commit_diff(repo: &Utf8Path, hash: &str) -> String {
    log::debug!(target: LOG_TARGET, "Getting diff for commit {}", short_hash(hash));

    let result = Command::new("git")
        .arg("show")
        .arg("--no-merges")
        .arg(hash)
        .current_dir(repo)
        .output()
        .await;

    match result {
        Ok(output) if output.status.success() => String::from_utf8_lossy(&output.stdout).into_owned(),
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            log::error!(target: LOG_TARGET, "Error getting diff for commit {hash}: {}", stderr.trim());
            String::new()
        }
        Err(e) => {
            log::error!(target: LOG_TARGET, "Error getting diff for commit {hash}: {e}");
            String::new()
        }
    }
}

/// Parse one `hash|author|date|message` line. Lines without all four fields
/// are dropped; the message keeps any further pipe characters.
fn parse_log_line(line: &str) -> Option<Commit> {
    let mut parts = line.splitn(4, '|');

    Some(Commit {
        hash: parts.next()?.to_owned(),
        author: parts.next()?.to_owned(),
        date: parts.next()?.to_owned(),
        message: parts.next()?.to_owned(),
    })
}
