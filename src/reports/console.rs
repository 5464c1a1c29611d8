//! Terminal summary printed at the end of a run.

use crate::review::{self, Review};
use owo_colors::OwoColorize;

const GOOD_SCORE: f64 = 8.0;
const FAIR_SCORE: f64 = 5.0;

/// Print the run summary: counts and the color-coded average score.
pub fn print_summary(reviews: &[Review]) {
    println!(
        "Analysis complete: {} commits from {} repositories",
        reviews.len(),
        review::repository_count(reviews)
    );

    if let Some(avg) = review::average_score(reviews) {
        let formatted = format!("{avg:.1}");
        let colored = if avg >= GOOD_SCORE {
            formatted.green().to_string()
        } else if avg >= FAIR_SCORE {
            formatted.yellow().to_string()
        } else {
            formatted.red().to_string()
        };

        println!("Average quality score: {colored}/10");
    }
}
