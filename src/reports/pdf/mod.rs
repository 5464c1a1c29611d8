//! PDF report rendering.
//!
//! Two interchangeable renderers sit behind the [`ReportRenderer`] trait: one
//! styles the markdown text report, the other lays the document out directly
//! from the review records. Candidates are tried in order until one produces
//! a file; a renderer that cannot run in this environment (missing fonts,
//! compiled out) just hands over to the next.

#[cfg(feature = "document-pdf")]
mod document;

#[cfg(feature = "markdown-pdf")]
mod markdown;

use crate::Result;
use crate::config::Config;
use crate::reports::file_stamp;
use crate::review::Review;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Local;

const LOG_TARGET: &str = "       pdf";

/// A strategy for rendering the review collection to a PDF file.
pub trait ReportRenderer {
    /// Short name used in log messages.
    fn name(&self) -> &'static str;

    /// Render the reviews to `path`.
    fn render(&self, reviews: &[Review], text_report: &str, path: &Utf8Path, username: &str, config: &Config) -> Result<()>;
}

/// Render the PDF report into `output_dir`, trying each available renderer in
/// order. Returns the path of the generated file, or `None` if no renderer
/// succeeded (the user gets a hint about the optional features).
pub fn generate(reviews: &[Review], text_report: &str, output_dir: &Utf8Path, username: &str, config: &Config) -> Option<Utf8PathBuf> {
    let renderers = candidates();

    if renderers.is_empty() {
        println!("PDF generation is not available in this build. Reinstall with:");
        println!("  cargo install commit-rank --features markdown-pdf");
        println!("or");
        println!("  cargo install commit-rank --features document-pdf");
        log::warn!(target: LOG_TARGET, "PDF generation skipped - no renderer compiled in");
        return None;
    }

    let filename = format!("analysis_{username}_{}.pdf", file_stamp(&Local::now()));
    let path = output_dir.join(filename);

    for renderer in renderers {
        log::info!(target: LOG_TARGET, "Generating PDF with {} renderer", renderer.name());

        match renderer.render(reviews, text_report, &path, username, config) {
            Ok(()) => {
                log::info!(target: LOG_TARGET, "PDF generated successfully: {path}");
                return Some(path);
            }
            Err(e) => {
                log::warn!(target: LOG_TARGET, "{} PDF generation failed: {e:#}", renderer.name());
            }
        }
    }

    println!("PDF generation failed. Check the log file for renderer errors.");
    log::warn!(target: LOG_TARGET, "PDF generation failed - all renderers exhausted");
    None
}

fn candidates() -> Vec<Box<dyn ReportRenderer>> {
    let mut renderers: Vec<Box<dyn ReportRenderer>> = Vec::new();

    #[cfg(feature = "markdown-pdf")]
    renderers.push(Box::new(markdown::MarkdownRenderer));

    #[cfg(feature = "document-pdf")]
    renderers.push(Box::new(document::DocumentRenderer));

    renderers
}
