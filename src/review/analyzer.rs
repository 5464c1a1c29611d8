//! Client for the remote review service.

use super::{Analysis, Score, extract};
use crate::Result;
use crate::git::{Commit, short_hash};
use core::time::Duration;
use serde::{Deserialize, Serialize};
use url::Url;

const LOG_TARGET: &str = "  analyzer";

const GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";
const API_KEY_HEADER: &str = "x-goog-api-key";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const UNAVAILABLE_FEEDBACK: &str = "AI analysis unavailable - no API key configured";

/// Sends commit diffs to the review service and turns the free-form response
/// into an [`Analysis`].
///
/// Every failure mode degrades to an `Analysis` carrying a sentinel score;
/// [`Analyzer::analyze`] never reports an error to the caller.
#[derive(Debug, Clone)]
pub struct Analyzer {
    client: reqwest::Client,
    endpoint: Url,
    api_key: Option<String>,
    max_diff_size: usize,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: ResponseContent,
}

#[derive(Debug, Default, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<Part>,
}

impl Analyzer {
    /// Create a new analyzer. Without an API key the analyzer still works but
    /// marks every commit as not analyzed.
    pub fn new(api_key: Option<String>, max_diff_size: usize) -> Result<Self> {
        if api_key.is_none() {
            log::warn!(target: LOG_TARGET, "No Gemini API key found. Set GEMINI_API_KEY environment variable.");
        }

        Ok(Self {
            client: reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            endpoint: Url::parse(GEMINI_ENDPOINT)?,
            api_key,
            max_diff_size,
        })
    }

    /// Replace the review service endpoint, e.g. to target a local stand-in.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Review one commit. Performs no network traffic when no API key is
    /// configured.
    pub async fn analyze(&self, commit: &Commit, diff: &str) -> Analysis {
        let Some(api_key) = &self.api_key else {
            return Analysis {
                score: Score::NotAvailable,
                feedback: UNAVAILABLE_FEEDBACK.to_owned(),
                suggestions: Vec::new(),
            };
        };

        let prompt = self.build_prompt(commit, diff);

        log::debug!(target: LOG_TARGET, "Making API request for commit {}", short_hash(&commit.hash));

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = match self
            .client
            .post(self.endpoint.clone())
            .header(API_KEY_HEADER, api_key)
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                log::error!(target: LOG_TARGET, "Exception during API call: {e}");
                return failed(format!("Analysis failed: {e}"));
            }
        };

        let status = response.status();
        log::info!(target: LOG_TARGET, "API Response Status: {}", status.as_u16());

        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            log::error!(target: LOG_TARGET, "API Error Details: {body}");
            return failed(format!("API Error: {} - {body}", status.as_u16()));
        }

        let parsed: GenerateResponse = match response.json().await {
            Ok(parsed) => parsed,
            Err(e) => {
                log::error!(target: LOG_TARGET, "Exception during API call: {e}");
                return failed(format!("Analysis failed: {e}"));
            }
        };

        let feedback = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .unwrap_or_default();

        let analysis = Analysis {
            score: extract::score(&feedback),
            suggestions: extract::suggestions(&feedback),
            feedback,
        };

        log::debug!(
            target: LOG_TARGET,
            "Analysis completed for commit {} - Score: {}",
            short_hash(&commit.hash),
            analysis.score
        );

        analysis
    }

    fn build_prompt(&self, commit: &Commit, diff: &str) -> String {
        let truncated = match diff.char_indices().nth(self.max_diff_size) {
            Some((cut, _)) => {
                log::debug!(
                    target: LOG_TARGET,
                    "Diff truncated from {} to {} characters",
                    diff.chars().count(),
                    self.max_diff_size
                );
                diff.get(..cut).unwrap_or(diff)
            }
            None => diff,
        };

        format!(
            "Please review this Git commit and provide feedback:\n\
             \n\
             Commit Hash: {}\n\
             Author: {}\n\
             Date: {}\n\
             Message: {}\n\
             \n\
             Diff:\n\
             {truncated}\n\
             \n\
             Please analyze this commit and provide:\n\
             1. A quality score (1-10)\n\
             2. Overall feedback\n\
             3. Specific suggestions for improvement\n\
             4. Code quality concerns\n\
             5. Best practices compliance\n\
             \n\
             Focus on:\n\
             - Code clarity and readability\n\
             - Potential bugs or issues\n\
             - Security concerns\n\
             - Performance implications\n\
             - Testing considerations\n\
             - Documentation needs\n",
            commit.hash, commit.author, commit.date, commit.message
        )
    }
}

fn failed(feedback: String) -> Analysis {
    Analysis {
        score: Score::Failed,
        feedback,
        suggestions: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer(max_diff_size: usize) -> Analyzer {
        Analyzer::new(Some("key".to_owned()), max_diff_size).unwrap()
    }

    fn commit() -> Commit {
        Commit {
            hash: "0123456789abcdef0123456789abcdef01234567".to_owned(),
            author: "Jane Doe".to_owned(),
            date: "2024-05-01 12:00:00 +0000".to_owned(),
            message: "Fix the widget".to_owned(),
        }
    }

    #[test]
    fn test_prompt_embeds_commit_fields() {
        let prompt = analyzer(3000).build_prompt(&commit(), "diff --git a/x b/x");

        assert!(prompt.contains("Commit Hash: 0123456789abcdef0123456789abcdef01234567"));
        assert!(prompt.contains("Author: Jane Doe"));
        assert!(prompt.contains("Date: 2024-05-01 12:00:00 +0000"));
        assert!(prompt.contains("Message: Fix the widget"));
        assert!(prompt.contains("diff --git a/x b/x"));
        assert!(prompt.contains("A quality score (1-10)"));
    }

    #[test]
    fn test_prompt_truncates_long_diffs() {
        let diff = "x".repeat(5000);
        let prompt = analyzer(3000).build_prompt(&commit(), &diff);

        assert!(prompt.contains(&"x".repeat(3000)));
        assert!(!prompt.contains(&"x".repeat(3001)));
    }

    #[test]
    fn test_prompt_truncation_counts_characters_not_bytes() {
        let diff = "é".repeat(10);
        let prompt = analyzer(4).build_prompt(&commit(), &diff);

        assert!(prompt.contains(&"é".repeat(4)));
        assert!(!prompt.contains(&"é".repeat(5)));
    }

    #[test]
    fn test_short_diff_kept_whole() {
        let prompt = analyzer(3000).build_prompt(&commit(), "tiny");
        assert!(prompt.contains("tiny"));
    }
}
