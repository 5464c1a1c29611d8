//! Heuristic extraction of scores and suggestions from free-form reviewer
//! feedback.

use super::Score;
use regex::Regex;
use std::sync::LazyLock;

/// Score patterns in priority order, most specific first. Only the first
/// occurrence of each pattern is considered; if its digits fall outside
/// [1, 10] the next pattern is tried.
static SCORE_PATTERNS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        Regex::new(r"score[:\s]*(\d+)/10").expect("invalid regex"),
        Regex::new(r"score[:\s]*(\d+)\s*/\s*10").expect("invalid regex"),
        Regex::new(r"(\d+)/10").expect("invalid regex"),
        Regex::new(r"score[:\s]*(\d+)").expect("invalid regex"),
    ]
});

const MAX_SUGGESTIONS: usize = 5;
const BULLET_MARKERS: [char; 3] = ['-', '*', '•'];

/// Pull a numeric quality score out of the feedback text.
#[must_use]
pub fn score(feedback: &str) -> Score {
    let lowered = feedback.to_lowercase();

    for pattern in SCORE_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(&lowered)
            && let Some(digits) = captures.get(1)
            && let Ok(value) = digits.as_str().parse::<u8>()
            && (1..=10).contains(&value)
        {
            return Score::Rated(value);
        }
    }

    Score::NotAvailable
}

/// Pull improvement suggestions out of the feedback text.
///
/// Collection starts at any line mentioning "suggestion" or "improve". While
/// collecting, bulleted lines are captured; a non-empty line without a bullet
/// marker stops collection until the next trigger line. Blank lines are
/// ignored. At most five suggestions are returned. A continuation line in the
/// middle of a bulleted list therefore truncates it; that matches how tools
/// built on this extractor expect it to behave.
#[must_use]
pub fn suggestions(feedback: &str) -> Vec<String> {
    let mut collected = Vec::new();
    let mut collecting = false;

    for raw in feedback.lines() {
        let line = raw.trim();
        let lowered = line.to_lowercase();

        if lowered.contains("suggestion") || lowered.contains("improve") {
            collecting = true;
        } else if collecting && line.starts_with(BULLET_MARKERS.as_slice()) {
            let mut chars = line.chars();
            let _ = chars.next();
            collected.push(chars.as_str().trim().to_owned());
        } else if collecting && !line.is_empty() {
            collecting = false;
        }
    }

    collected.truncate(MAX_SUGGESTIONS);
    collected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_slash_ten_form() {
        assert_eq!(score("Overall Score: 7/10, nice work"), Score::Rated(7));
        assert_eq!(score("I'd give this 9/10."), Score::Rated(9));
        assert_eq!(score("Quality score: 10 / 10"), Score::Rated(10));
    }

    #[test]
    fn test_score_bare_form() {
        assert_eq!(score("Score: 4"), Score::Rated(4));
        assert_eq!(score("score  8 with reservations"), Score::Rated(8));
    }

    #[test]
    fn test_score_pattern_priority() {
        // The explicit "score: N/10" beats an earlier bare "N/10".
        assert_eq!(score("3/10 of files changed. Score: 6/10"), Score::Rated(6));
    }

    #[test]
    fn test_score_out_of_range() {
        assert_eq!(score("the score is 11"), Score::NotAvailable);
        assert_eq!(score("score: 0/10"), Score::NotAvailable);
        assert_eq!(score("Score: 0"), Score::NotAvailable);
    }

    #[test]
    fn test_score_huge_number_does_not_overflow() {
        assert_eq!(score("score: 99999999999999999999"), Score::NotAvailable);
    }

    #[test]
    fn test_score_no_pattern() {
        assert_eq!(score("Looks good to me."), Score::NotAvailable);
        assert_eq!(score(""), Score::NotAvailable);
    }

    #[test]
    fn test_suggestions_basic() {
        let feedback = "Suggestions:\n- do X\n- do Y\n\nMore prose";
        assert_eq!(suggestions(feedback), vec!["do X", "do Y"]);
    }

    #[test]
    fn test_suggestions_all_bullet_markers() {
        let feedback = "Ways to improve:\n- dash\n* star\n• dot";
        assert_eq!(suggestions(feedback), vec!["dash", "star", "dot"]);
    }

    #[test]
    fn test_suggestions_prose_interrupts_collection() {
        let feedback = "Suggestions:\n- first\nThis sentence interrupts the list.\n- lost";
        assert_eq!(suggestions(feedback), vec!["first"]);
    }

    #[test]
    fn test_suggestions_restart_after_new_trigger() {
        let feedback = "Suggestions:\n- first\nprose ends it\nTo improve further:\n- second";
        assert_eq!(suggestions(feedback), vec!["first", "second"]);
    }

    #[test]
    fn test_suggestions_capped_at_five() {
        let feedback = "Suggestions:\n- a\n- b\n- c\n- d\n- e\n- f\n- g";
        assert_eq!(suggestions(feedback).len(), 5);
    }

    #[test]
    fn test_suggestions_none_without_trigger() {
        let feedback = "- orphan bullet\n- another";
        assert!(suggestions(feedback).is_empty());
    }
}
