//! Renders the PDF report directly from the review records via printpdf.
//!
//! Uses the built-in Helvetica family, so unlike the markdown renderer it has
//! no runtime font dependency. Layout is a manual cursor walk down the page:
//! a summary header, then one block per review with a page break after every
//! third one.

use super::ReportRenderer;
use crate::Result;
use crate::config::Config;
use crate::git::short_hash;
use crate::review::{self, Review};
use camino::Utf8Path;
use chrono::{Datelike, Local};
use ohno::IntoAppError;
use printpdf::{BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference, Rgb};
use std::fs::File;
use std::io::BufWriter;

const PAGE_WIDTH: f64 = 210.0;
const PAGE_HEIGHT: f64 = 297.0;
const MARGIN: f64 = 20.0;
const VALUE_COLUMN: f64 = 60.0;

/// Rough average glyph width in millimeters per point of font size, used to
/// estimate how many characters fit on a line.
const CHAR_WIDTH_PER_PT: f64 = 0.18;

const REVIEWS_PER_PAGE: usize = 3;
const MAX_FEEDBACK_CHARS: usize = 800;
const MAX_MESSAGE_CHARS: usize = 100;
const MAX_PDF_SUGGESTIONS: usize = 3;

const ACCENT: (f64, f64, f64) = (0.145, 0.388, 0.922);
const DARK: (f64, f64, f64) = (0.118, 0.161, 0.231);
const GRAY: (f64, f64, f64) = (0.392, 0.455, 0.545);

#[derive(Debug)]
pub struct DocumentRenderer;

impl ReportRenderer for DocumentRenderer {
    fn name(&self) -> &'static str {
        "document"
    }

    fn render(&self, reviews: &[Review], _text_report: &str, path: &Utf8Path, username: &str, config: &Config) -> Result<()> {
        let mut page = Page::new("Git Commit Review Report")?;

        page.centered("Git Commit Review Report", 24.0, Font::Bold, ACCENT);
        page.space(4.0);
        page.centered(&format!("Analysis for GitHub User: {username}"), 14.0, Font::Oblique, GRAY);
        page.space(8.0);

        page.line("Configuration:", 11.0, MARGIN, Font::Bold, DARK);
        page.line(&format!("Max Diff Size: {} characters", config.max_diff_size), 11.0, MARGIN, Font::Regular, DARK);
        page.line(
            &format!("Default Commit Count: {}", config.default_commit_count),
            11.0,
            MARGIN,
            Font::Regular,
            DARK,
        );
        page.line(
            &format!("Log Level: {}", config.log_level.as_deref().unwrap_or("INFO")),
            11.0,
            MARGIN,
            Font::Regular,
            DARK,
        );
        page.space(6.0);

        page.line(&format!("Total commits reviewed: {}", reviews.len()), 11.0, MARGIN, Font::Bold, DARK);
        if let Some(avg) = review::average_score(reviews) {
            page.line(&format!("Average quality score: {avg:.1}/10"), 11.0, MARGIN, Font::Bold, DARK);
        }
        page.line(
            &format!("Generated on: {}", Local::now().format("%B %d, %Y at %I:%M %p")),
            11.0,
            MARGIN,
            Font::Regular,
            DARK,
        );
        page.space(6.0);
        page.separator();

        page.line("Detailed Commit Analysis", 18.0, MARGIN, Font::Bold, DARK);
        page.space(4.0);

        for (index, entry) in reviews.iter().enumerate() {
            let number = index + 1;
            page.review_block(number, entry);

            if number % REVIEWS_PER_PAGE == 0 && number < reviews.len() {
                page.new_page();
            }
        }

        page.space(8.0);
        page.separator();
        page.centered(
            &format!("Report generated by AI-Powered Git Commit Reviewer | {}", Local::now().year()),
            10.0,
            Font::Oblique,
            GRAY,
        );

        page.save(path)
    }
}

#[derive(Debug, Clone, Copy)]
enum Font {
    Regular,
    Bold,
    Oblique,
}

/// Cursor-based page writer over a printpdf document.
struct Page {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    y: f64,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    oblique: IndirectFontRef,
}

impl Page {
    fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");

        let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
        let oblique = doc.add_builtin_font(BuiltinFont::HelveticaOblique)?;

        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            y: PAGE_HEIGHT - MARGIN,
            regular,
            bold,
            oblique,
        })
    }

    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT - MARGIN;
    }

    fn ensure_room(&mut self, needed: f64) {
        if self.y - needed < MARGIN {
            self.new_page();
        }
    }

    fn space(&mut self, mm: f64) {
        self.y -= mm;
    }

    fn separator(&mut self) {
        // Built-in fonts are WinAnsi-encoded, so stick to ASCII here.
        self.line(&"-".repeat(80), 9.0, MARGIN, Font::Regular, GRAY);
        self.space(2.0);
    }

    /// Write one already-fitting line at `x` and advance the cursor.
    fn line(&mut self, text: &str, size: f64, x: f64, font: Font, color: (f64, f64, f64)) {
        let height = line_height(size);
        self.ensure_room(height);
        self.y -= height;

        let font_ref = match font {
            Font::Regular => &self.regular,
            Font::Bold => &self.bold,
            Font::Oblique => &self.oblique,
        };

        self.layer.set_fill_color(Color::Rgb(Rgb::new(color.0, color.1, color.2, None)));
        self.layer.use_text(text, size, Mm(x), Mm(self.y), font_ref);
    }

    fn centered(&mut self, text: &str, size: f64, font: Font, color: (f64, f64, f64)) {
        #[expect(clippy::cast_precision_loss, reason = "line lengths are tiny")]
        let width = text.chars().count() as f64 * size * CHAR_WIDTH_PER_PT;
        let x = ((PAGE_WIDTH - width) / 2.0).max(MARGIN);
        self.line(text, size, x, font, color);
    }

    /// Write `text` wrapped to the usable width starting at `x`.
    fn wrapped(&mut self, text: &str, size: f64, x: f64, font: Font, color: (f64, f64, f64)) {
        let width = max_chars(size, PAGE_WIDTH - MARGIN - x);

        for part in text.lines() {
            for line in wrap(part, width) {
                self.line(&line, size, x, font, color);
            }
        }
    }

    /// Label/value row of the per-commit details table.
    fn table_row(&mut self, label: &str, value: &str) {
        let height = line_height(9.0);
        self.ensure_room(height);

        let row_y = self.y - height;
        self.layer.set_fill_color(Color::Rgb(Rgb::new(DARK.0, DARK.1, DARK.2, None)));
        self.layer.use_text(label, 9.0, Mm(MARGIN), Mm(row_y), &self.bold);
        self.y = row_y;

        let width = max_chars(9.0, PAGE_WIDTH - MARGIN - VALUE_COLUMN);
        let mut first = true;
        for line in wrap(value, width) {
            if first {
                self.layer.use_text(line, 9.0, Mm(VALUE_COLUMN), Mm(self.y), &self.regular);
                first = false;
            } else {
                self.line(&line, 9.0, VALUE_COLUMN, Font::Regular, DARK);
            }
        }
    }

    fn review_block(&mut self, number: usize, entry: &Review) {
        let commit = &entry.commit;
        let analysis = &entry.analysis;

        self.space(3.0);
        self.line(
            &format!("#{number} - Commit: {} ({})", short_hash(&commit.hash), entry.repo_name()),
            14.0,
            MARGIN,
            Font::Bold,
            ACCENT,
        );
        self.space(1.0);

        let date: String = commit.date.chars().take(19).collect();
        let message = capped(&commit.message, MAX_MESSAGE_CHARS);

        self.table_row("Author", &commit.author);
        self.table_row("Date", &date);
        self.table_row("Message", &message);
        self.table_row("Quality Score", &format!("{}/10", analysis.score));
        self.space(3.0);

        self.line("AI Analysis:", 12.0, MARGIN, Font::Bold, ACCENT);
        self.wrapped(&capped(&analysis.feedback, MAX_FEEDBACK_CHARS), 10.0, MARGIN, Font::Regular, DARK);

        if !analysis.suggestions.is_empty() {
            self.space(2.0);
            self.line("Improvement Suggestions:", 12.0, MARGIN, Font::Bold, ACCENT);

            for suggestion in analysis.suggestions.iter().take(MAX_PDF_SUGGESTIONS) {
                self.wrapped(&format!("\u{2022} {suggestion}"), 10.0, MARGIN, Font::Regular, DARK);
            }
        }

        self.space(5.0);
    }

    fn save(self, path: &Utf8Path) -> Result<()> {
        let file = File::create(path).into_app_err_with(|| format!("unable to create PDF file '{path}'"))?;

        self.doc
            .save(&mut BufWriter::new(file))
            .into_app_err_with(|| format!("unable to write PDF file '{path}'"))?;

        Ok(())
    }
}

const fn line_height(size: f64) -> f64 {
    size * 0.45
}

#[expect(clippy::cast_possible_truncation, reason = "character count is small and positive")]
#[expect(clippy::cast_sign_loss, reason = "character count is small and positive")]
fn max_chars(size: f64, usable_mm: f64) -> usize {
    ((usable_mm / (size * CHAR_WIDTH_PER_PT)) as usize).max(1)
}

/// Cap `text` at `limit` characters, appending an ellipsis when truncated.
fn capped(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", text.get(..cut).unwrap_or(text)),
        None => text.to_owned(),
    }
}

/// Greedy word wrap; words longer than `width` are split hard.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if current_len > 0 && current_len + 1 + word_len > width {
            lines.push(core::mem::take(&mut current));
            current_len = 0;
        }

        if word_len > width {
            let chars: Vec<char> = word.chars().collect();
            for chunk in chars.chunks(width) {
                if current_len > 0 {
                    lines.push(core::mem::take(&mut current));
                    current_len = 0;
                }
                current = chunk.iter().collect();
                current_len = chunk.len();
                if current_len == width {
                    lines.push(core::mem::take(&mut current));
                    current_len = 0;
                }
            }
            continue;
        }

        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_respects_width() {
        let lines = wrap("alpha beta gamma delta", 11);
        assert_eq!(lines, vec!["alpha beta", "gamma delta"]);
        assert!(lines.iter().all(|line| line.chars().count() <= 11));
    }

    #[test]
    fn test_wrap_splits_overlong_words() {
        let lines = wrap("abcdefghij", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wrap_empty_text_yields_one_blank_line() {
        assert_eq!(wrap("", 10), vec![String::new()]);
    }

    #[test]
    fn test_capped_appends_ellipsis() {
        assert_eq!(capped("abcdef", 3), "abc...");
        assert_eq!(capped("abc", 3), "abc");
        assert_eq!(capped("ééééé", 2), "éé...");
    }
}
