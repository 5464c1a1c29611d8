//! The markdown-flavored text report.

use crate::Result;
use crate::config::Config;
use crate::git::short_hash;
use crate::review::{self, Review};
use camino::Utf8Path;
use chrono::Local;
use core::fmt::Write;
use ohno::IntoAppError;
use std::fs;

const LOG_TARGET: &str = "   reports";

/// Write the full text report for `reviews` into `writer`.
///
/// The summary counts every review but averages only the numeric scores; the
/// detailed section lists every review exactly once, in the order produced by
/// the orchestrator.
pub fn generate<W: Write>(reviews: &[Review], config: &Config, log_level: &str, writer: &mut W) -> Result<()> {
    log::info!(target: LOG_TARGET, "Generating report for {} reviews", reviews.len());

    writeln!(writer, "# Git Commit Review Report")?;
    writeln!(writer, "Generated on: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(writer, "Log Level: {log_level}")?;
    writeln!(writer, "Max Diff Size: {} characters", config.max_diff_size)?;
    writeln!(writer)?;
    writeln!(writer, "## Summary")?;
    writeln!(writer, "Total commits reviewed: {}", reviews.len())?;

    if let Some(avg) = review::average_score(reviews) {
        let numeric: Vec<String> = reviews
            .iter()
            .filter_map(|review| review.analysis.score.numeric())
            .map(|value| value.to_string())
            .collect();

        writeln!(writer, "Average quality score: {avg:.1}/10")?;
        writeln!(writer, "Scores distribution: {}", numeric.join(", "))?;
    }

    writeln!(writer)?;
    writeln!(writer, "## Detailed Reviews")?;

    for review in reviews {
        let commit = &review.commit;
        let analysis = &review.analysis;

        writeln!(writer)?;
        writeln!(writer, "### Commit: {} ({})", short_hash(&commit.hash), review.repo_name())?;
        writeln!(writer, "**Author:** {}  ", commit.author)?;
        writeln!(writer, "**Date:** {}  ", commit.date)?;
        writeln!(writer, "**Message:** {}  ", commit.message)?;
        writeln!(writer, "**Quality Score:** {}/10", analysis.score)?;
        writeln!(writer)?;
        writeln!(writer, "**Feedback:**")?;
        writeln!(writer, "{}", analysis.feedback)?;
        writeln!(writer)?;
        writeln!(writer, "**Suggestions:**")?;

        for suggestion in &analysis.suggestions {
            writeln!(writer, "- {suggestion}")?;
        }

        writeln!(writer)?;
        writeln!(writer, "---")?;
    }

    Ok(())
}

/// Persist the report, creating parent directories as needed.
pub fn persist(report: &str, path: &Utf8Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        fs::create_dir_all(parent).into_app_err_with(|| format!("unable to create report directory '{parent}'"))?;
    }

    fs::write(path, report).into_app_err_with(|| format!("unable to save report to '{path}'"))?;

    log::info!(target: LOG_TARGET, "Report saved to: {path}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::Commit;
    use crate::review::{Analysis, Score};
    use camino::Utf8PathBuf;

    fn config() -> Config {
        Config {
            max_diff_size: 3000,
            default_commit_count: 5,
            log_level: None,
            log_file: Utf8PathBuf::from("app.log"),
            git_user_name: "GitHub PR Reviewer".to_owned(),
            git_user_email: "reviewer@localhost".to_owned(),
            default_username: None,
            output_dir: None,
            container_output_dir: None,
        }
    }

    fn review(repo: &str, hash_prefix: char, score: Score) -> Review {
        Review {
            repository: Utf8PathBuf::from(repo),
            commit: Commit {
                hash: core::iter::repeat_n(hash_prefix, 40).collect(),
                author: "Jane Doe".to_owned(),
                date: "2024-05-01 12:00:00 +0000".to_owned(),
                message: format!("Change {hash_prefix}"),
            },
            analysis: Analysis {
                score,
                feedback: format!("Feedback for {hash_prefix}"),
                suggestions: vec!["tighten tests".to_owned()],
            },
        }
    }

    fn render(reviews: &[Review]) -> String {
        let mut out = String::new();
        generate(reviews, &config(), "INFO", &mut out).unwrap();
        out
    }

    #[test]
    fn test_every_review_appears_once_in_order() {
        let reviews = vec![
            review("/scratch/alpha", 'a', Score::Rated(8)),
            review("/scratch/alpha", 'b', Score::Rated(6)),
            review("/scratch/beta", 'c', Score::NotAvailable),
        ];

        let report = render(&reviews);

        let positions: Vec<usize> = reviews
            .iter()
            .map(|r| report.find(&format!("### Commit: {}", short_hash(&r.commit.hash))).unwrap())
            .collect();

        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));

        for r in &reviews {
            assert_eq!(report.matches(short_hash(&r.commit.hash)).count(), 1);
        }
    }

    #[test]
    fn test_summary_average_excludes_sentinels() {
        let reviews = vec![
            review("/scratch/alpha", 'a', Score::Rated(8)),
            review("/scratch/alpha", 'b', Score::NotAvailable),
            review("/scratch/alpha", 'c', Score::Rated(6)),
        ];

        let report = render(&reviews);

        assert!(report.contains("Total commits reviewed: 3"));
        assert!(report.contains("Average quality score: 7.0/10"));
        assert!(report.contains("Scores distribution: 8, 6"));
    }

    #[test]
    fn test_summary_omits_average_without_numeric_scores() {
        let reviews = vec![review("/scratch/alpha", 'a', Score::Failed)];
        let report = render(&reviews);

        assert!(!report.contains("Average quality score"));
        assert!(report.contains("**Quality Score:** Error/10"));
    }

    #[test]
    fn test_sentinel_scores_render_as_text() {
        let reviews = vec![review("/scratch/alpha", 'a', Score::NotAvailable)];
        let report = render(&reviews);

        assert!(report.contains("**Quality Score:** N/A/10"));
    }

    #[test]
    fn test_detail_block_contents() {
        let reviews = vec![review("/scratch/alpha", 'a', Score::Rated(9))];
        let report = render(&reviews);

        assert!(report.contains("(alpha)"));
        assert!(report.contains("**Author:** Jane Doe"));
        assert!(report.contains("**Message:** Change a"));
        assert!(report.contains("Feedback for a"));
        assert!(report.contains("- tighten tests"));
    }
}
