//! Global git identity for the run and GitHub username inference.

use tokio::process::Command;

const LOG_TARGET: &str = "       git";

const HTTPS_REMOTE_PREFIX: &str = "https://github.com/";
const SSH_REMOTE_PREFIX: &str = "git@github.com:";

/// Configure the global git identity used by clones during the run.
/// Failures are logged and ignored; review results do not depend on this.
pub async fn configure_identity(user_name: &str, user_email: &str) {
    let settings = [
        ["user.name", user_name],
        ["user.email", user_email],
        ["init.defaultBranch", "main"],
        ["pull.rebase", "false"],
    ];

    for [key, value] in settings {
        if !set_global(key, value).await {
            log::warn!(target: LOG_TARGET, "Failed to configure Git setting {key}");
            return;
        }
    }

    log::info!(target: LOG_TARGET, "Git configured: {user_name} <{user_email}>");
}

/// Infer a GitHub username from the current checkout's `origin` remote, or
/// failing that from the global `github.user` setting.
pub async fn infer_username() -> Option<String> {
    if let Some(remote) = git_stdout(&["remote", "get-url", "origin"]).await
        && let Some(username) = username_from_remote(&remote)
    {
        return Some(username);
    }

    git_stdout(&["config", "--global", "github.user"]).await
}

async fn set_global(key: &str, value: &str) -> bool {
    Command::new("git")
        .arg("config")
        .arg("--global")
        .arg(key)
        .arg(value)
        .output()
        .await
        .map(|output| output.status.success())
        .unwrap_or(false)
}

async fn git_stdout(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().await.ok()?;

    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_owned();
    (!stdout.is_empty()).then_some(stdout)
}

/// Owner segment of a GitHub remote URL, in either HTTPS or SSH form.
fn username_from_remote(remote: &str) -> Option<String> {
    let remote = remote.trim();

    let owner = if let Some(rest) = remote.strip_prefix(HTTPS_REMOTE_PREFIX) {
        rest.split('/').next()
    } else if let Some(rest) = remote.strip_prefix(SSH_REMOTE_PREFIX) {
        rest.split('/').next()
    } else {
        None
    };

    owner.filter(|segment| !segment.is_empty()).map(str::to_owned)
}
