//! Report generation from the accumulated review sequence.

pub mod console;
pub mod pdf;
pub mod text;

pub use console::print_summary;

use chrono::{DateTime, Local};

/// Timestamp fragment embedded in report file names.
#[must_use]
pub fn file_stamp(now: &DateTime<Local>) -> String {
    now.format("%Y%m%d_%H%M%S").to_string()
}
