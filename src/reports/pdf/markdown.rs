//! Renders the markdown text report to a styled PDF via genpdf.
//!
//! Needs a TTF font family on disk; when none is found the renderer reports
//! itself unusable and the caller falls through to the next renderer.

use super::ReportRenderer;
use crate::Result;
use crate::config::Config;
use crate::review::Review;
use camino::Utf8Path;
use core::mem;
use genpdf::elements::{Break, Paragraph};
use genpdf::style::{Color, Style};
use genpdf::{Document, SimplePageDecorator, fonts};
use ohno::{IntoAppError, bail};
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};

/// Directories probed for the font family, most specific first.
const FONT_DIRS: [&str; 5] = [
    "./fonts",
    "/usr/share/fonts/truetype/liberation",
    "/usr/share/fonts/truetype/liberation2",
    "/usr/share/fonts/liberation",
    "/usr/share/fonts/TTF",
];

const FONT_FAMILY: &str = "LiberationSans";

const BODY_SIZE: u8 = 10;

const ACCENT: Color = Color::Rgb(37, 99, 235);
const TEXT_PRIMARY: Color = Color::Rgb(30, 41, 59);

#[derive(Debug)]
pub struct MarkdownRenderer;

impl ReportRenderer for MarkdownRenderer {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn render(&self, _reviews: &[Review], text_report: &str, path: &Utf8Path, username: &str, _config: &Config) -> Result<()> {
        let family = discover_fonts()?;

        let mut doc = Document::new(family);
        doc.set_title(format!("Git Commit Review Report - {username}"));

        let mut decorator = SimplePageDecorator::new();
        decorator.set_margins(15);
        doc.set_page_decorator(decorator);

        push_markdown(&mut doc, text_report);

        doc.render_to_file(path.as_std_path())
            .into_app_err_with(|| format!("unable to render PDF to '{path}'"))?;

        Ok(())
    }
}

fn discover_fonts() -> Result<fonts::FontFamily<fonts::FontData>> {
    for dir in FONT_DIRS {
        if let Ok(family) = fonts::from_files(dir, FONT_FAMILY, None) {
            return Ok(family);
        }
    }

    bail!("no usable {FONT_FAMILY} TTF family found under {FONT_DIRS:?}")
}

/// Walk the markdown event stream and push styled elements onto the document.
fn push_markdown(doc: &mut Document, markdown: &str) {
    let mut paragraph = Paragraph::default();
    let mut style = body_style();
    let mut bold = false;
    let mut in_list = false;

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                style = heading_style(level);
            }
            Event::End(TagEnd::Heading(_)) => {
                doc.push(mem::take(&mut paragraph));
                doc.push(Break::new(0.5));
                style = body_style();
            }
            Event::Start(Tag::Strong) => {
                bold = true;
            }
            Event::End(TagEnd::Strong) => {
                bold = false;
            }
            Event::Start(Tag::List(_)) => {
                in_list = true;
            }
            Event::End(TagEnd::List(_)) => {
                in_list = false;
                doc.push(Break::new(0.5));
            }
            Event::Start(Tag::Item) => {
                paragraph.push_styled("\u{2022} ", style);
            }
            Event::End(TagEnd::Item) => {
                doc.push(mem::take(&mut paragraph));
            }
            Event::End(TagEnd::Paragraph) => {
                doc.push(mem::take(&mut paragraph));
                if !in_list {
                    doc.push(Break::new(0.5));
                }
            }
            Event::Text(text) | Event::Code(text) => {
                let effective = if bold { style.bold() } else { style };
                paragraph.push_styled(text.to_string(), effective);
            }
            Event::SoftBreak | Event::HardBreak => {
                paragraph.push_styled(" ", style);
            }
            Event::Rule => {
                doc.push(mem::take(&mut paragraph));
                doc.push(Break::new(1.0));
            }
            _ => {}
        }
    }

    // Anything still buffered (markdown without a trailing newline).
    doc.push(paragraph);
}

fn body_style() -> Style {
    Style::new().with_font_size(BODY_SIZE).with_color(TEXT_PRIMARY)
}

fn heading_style(level: HeadingLevel) -> Style {
    let (size, color) = match level {
        HeadingLevel::H1 => (20, ACCENT),
        HeadingLevel::H2 => (16, TEXT_PRIMARY),
        _ => (13, ACCENT),
    };

    Style::new().bold().with_font_size(size).with_color(color)
}
