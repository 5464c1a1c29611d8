//! Sequential per-repository review loop.

use super::{Analyzer, Review};
use crate::git;
use camino::Utf8Path;

const LOG_TARGET: &str = "    review";

/// Review the `commit_count` most recent commits of the checkout at `repo`.
///
/// Strictly sequential: each commit's diff is fetched and analyzed before the
/// next commit is touched, and the returned reviews preserve commit order
/// (newest first).
pub async fn review_repository(analyzer: &Analyzer, repo: &Utf8Path, commit_count: usize) -> Vec<Review> {
    let repo_name = repo.file_name().unwrap_or(repo.as_str());
    log::info!(target: LOG_TARGET, "Reviewing repository: {repo_name} (analyzing {commit_count} commits)");

    let commits = git::list_recent_commits(repo, commit_count).await;
    let mut reviews = Vec::with_capacity(commits.len());

    for commit in commits {
        let diff = git::commit_diff(repo, &commit.hash).await;
        let analysis = analyzer.analyze(&commit, &diff).await;

        reviews.push(Review {
            repository: repo.to_owned(),
            commit,
            analysis,
        });
    }

    log::info!(target: LOG_TARGET, "Completed analysis of {} commits from {repo_name}", reviews.len());
    reviews
}
