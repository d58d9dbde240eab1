//! Shared text utilities for diagram processing
//!
//! Labels are measured in terminal display columns, so East-Asian wide
//! characters count as two cells and stay aligned with box borders.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a string in terminal columns
///
/// # Example
/// ```
/// use sketchgrid::core::display_width;
///
/// assert_eq!(display_width("Start"), 5);
/// assert_eq!(display_width("日本"), 4);
/// ```
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Number of cells a single character occupies on the canvas (at least one)
pub fn char_cells(c: char) -> usize {
    UnicodeWidthChar::width(c).unwrap_or(1).max(1)
}

/// Width of a label as laid out on the canvas, one cell minimum per character
pub fn cell_width(text: &str) -> usize {
    text.chars().map(char_cells).sum()
}
