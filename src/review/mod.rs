//! Commit review records and their aggregation.

pub mod analyzer;
pub mod extract;
pub mod orchestrator;

pub use analyzer::Analyzer;
pub use orchestrator::review_repository;

use crate::git::Commit;
use camino::Utf8PathBuf;
use core::fmt::{self, Display, Formatter};

/// Quality score for one commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Score {
    /// Numeric quality score in [1, 10].
    Rated(u8),

    /// No analysis was attempted (no reviewer configured), or the feedback
    /// contained no recognizable score.
    NotAvailable,

    /// Analysis was attempted and failed.
    Failed,
}

impl Score {
    /// The numeric value, if this is a rated score.
    #[must_use]
    pub const fn numeric(self) -> Option<u8> {
        match self {
            Self::Rated(value) => Some(value),
            Self::NotAvailable | Self::Failed => None,
        }
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rated(value) => write!(f, "{value}"),
            Self::NotAvailable => write!(f, "N/A"),
            Self::Failed => write!(f, "Error"),
        }
    }
}

/// Structured result of reviewing one commit's diff.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub score: Score,

    /// Free-form reviewer feedback (or an error description).
    pub feedback: String,

    /// Up to five improvement suggestions pulled out of the feedback.
    pub suggestions: Vec<String>,
}

/// One reviewed commit; the atomic unit aggregated into reports.
#[derive(Debug, Clone)]
pub struct Review {
    /// Path of the repository checkout the commit came from.
    pub repository: Utf8PathBuf,

    pub commit: Commit,
    pub analysis: Analysis,
}

impl Review {
    /// Display name of the repository: the checkout directory's file name.
    #[must_use]
    pub fn repo_name(&self) -> &str {
        self.repository.file_name().unwrap_or(self.repository.as_str())
    }
}

/// Average of the numeric scores. Sentinel scores are excluded from both the
/// sum and the divisor; `None` when no review carries a numeric score.
#[must_use]
pub fn average_score(reviews: &[Review]) -> Option<f64> {
    let numeric: Vec<f64> = reviews
        .iter()
        .filter_map(|review| review.analysis.score.numeric())
        .map(f64::from)
        .collect();

    if numeric.is_empty() {
        return None;
    }

    #[expect(clippy::cast_precision_loss, reason = "review counts are tiny")]
    Some(numeric.iter().sum::<f64>() / numeric.len() as f64)
}

/// Number of distinct repositories contributing to the ordered review
/// sequence. Reviews are grouped by repository, so counting transitions is
/// enough.
#[must_use]
pub fn repository_count(reviews: &[Review]) -> usize {
    let mut count = 0;
    let mut previous: Option<&Utf8PathBuf> = None;

    for review in reviews {
        if previous != Some(&review.repository) {
            count += 1;
            previous = Some(&review.repository);
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(repo: &str, score: Score) -> Review {
        Review {
            repository: Utf8PathBuf::from(repo),
            commit: Commit {
                hash: "0123456789abcdef0123456789abcdef01234567".to_owned(),
                author: "Jane Doe".to_owned(),
                date: "2024-05-01 12:00:00 +0000".to_owned(),
                message: "Fix the widget".to_owned(),
            },
            analysis: Analysis {
                score,
                feedback: String::new(),
                suggestions: Vec::new(),
            },
        }
    }

    #[test]
    fn test_score_display() {
        assert_eq!(Score::Rated(7).to_string(), "7");
        assert_eq!(Score::NotAvailable.to_string(), "N/A");
        assert_eq!(Score::Failed.to_string(), "Error");
    }

    #[test]
    fn test_average_excludes_sentinels() {
        let reviews = vec![
            review("/tmp/a", Score::Rated(8)),
            review("/tmp/a", Score::NotAvailable),
            review("/tmp/a", Score::Rated(6)),
        ];

        let avg = average_score(&reviews).unwrap();
        assert!((avg - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_average_none_when_all_sentinels() {
        let reviews = vec![review("/tmp/a", Score::NotAvailable), review("/tmp/a", Score::Failed)];
        assert!(average_score(&reviews).is_none());
        assert!(average_score(&[]).is_none());
    }

    #[test]
    fn test_repository_count() {
        let reviews = vec![
            review("/tmp/a", Score::Rated(8)),
            review("/tmp/a", Score::Rated(6)),
            review("/tmp/b", Score::Rated(5)),
        ];

        assert_eq!(repository_count(&reviews), 2);
        assert_eq!(repository_count(&[]), 0);
    }

    #[test]
    fn test_repo_name_is_file_name() {
        let r = review("/scratch/run42/hello-world", Score::Rated(8));
        assert_eq!(r.repo_name(), "hello-world");
    }
}
