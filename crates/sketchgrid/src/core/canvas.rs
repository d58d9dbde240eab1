//! Character canvas shared by all diagram renderers
//!
//! A fixed-size grid of cells addressed by signed coordinates. Writes that
//! land outside the grid are dropped silently, so layout arithmetic that
//! strays one cell past an edge clips instead of failing the render.

use std::fmt;

use super::text::char_cells;
use super::{BoxCorners, GlyphSet};

/// Marker stored in the cell to the right of a double-width character
const CONTINUATION: char = '\0';

/// Character grid for diagram rendering
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    grid: Vec<Vec<char>>,
}

impl Canvas {
    /// Create a blank canvas with the specified dimensions
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            grid: vec![vec![' '; width]; height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn cell(&self, x: isize, y: isize) -> Option<(usize, usize)> {
        let (x, y) = (usize::try_from(x).ok()?, usize::try_from(y).ok()?);
        (x < self.width && y < self.height).then_some((x, y))
    }

    /// Set a character; out-of-bounds writes are discarded
    pub fn set_char(&mut self, x: isize, y: isize, c: char) {
        let Some((cx, cy)) = self.cell(x, y) else {
            return;
        };

        // Overwriting half of a wide glyph blanks its other half.
        match self.grid[cy][cx] {
            CONTINUATION => {
                if cx > 0 {
                    self.grid[cy][cx - 1] = ' ';
                }
            }
            old if char_cells(old) > 1 => {
                if cx + 1 < self.width && self.grid[cy][cx + 1] == CONTINUATION {
                    self.grid[cy][cx + 1] = ' ';
                }
            }
            _ => {}
        }

        self.grid[cy][cx] = c;
        if char_cells(c) > 1 && cx + 1 < self.width {
            self.grid[cy][cx + 1] = CONTINUATION;
        }
    }

    /// Get the character at the specified position (space when out of bounds)
    pub fn get_char(&self, x: isize, y: isize) -> char {
        match self.cell(x, y) {
            Some((cx, cy)) => self.grid[cy][cx],
            None => ' ',
        }
    }

    /// Draw text starting at the specified position (left-aligned)
    pub fn draw_text(&mut self, x: isize, y: isize, text: &str) {
        let mut cursor = x;
        for c in text.chars() {
            self.set_char(cursor, y, c);
            cursor += char_cells(c) as isize;
        }
    }

    /// Draw a horizontal run covering both endpoints, in either order
    pub fn draw_horizontal_line(&mut self, x1: isize, x2: isize, y: isize, c: char) {
        for x in x1.min(x2)..=x1.max(x2) {
            self.set_char(x, y, c);
        }
    }

    /// Draw a vertical run covering both endpoints, in either order
    pub fn draw_vertical_line(&mut self, x: isize, y1: isize, y2: isize, c: char) {
        for y in y1.min(y2)..=y1.max(y2) {
            self.set_char(x, y, c);
        }
    }

    /// Draw a rectangle frame with its top-left corner at `(x, y)`
    pub fn draw_box(
        &mut self,
        x: isize,
        y: isize,
        width: isize,
        height: isize,
        corners: BoxCorners,
        glyphs: &GlyphSet,
    ) {
        if width < 2 || height < 2 {
            return;
        }
        let (right, bottom) = (x + width - 1, y + height - 1);

        self.draw_horizontal_line(x + 1, right - 1, y, glyphs.horizontal);
        self.draw_horizontal_line(x + 1, right - 1, bottom, glyphs.horizontal);
        self.draw_vertical_line(x, y + 1, bottom - 1, glyphs.vertical);
        self.draw_vertical_line(right, y + 1, bottom - 1, glyphs.vertical);

        self.set_char(x, y, corners.top_left);
        self.set_char(right, y, corners.top_right);
        self.set_char(x, bottom, corners.bottom_left);
        self.set_char(right, bottom, corners.bottom_right);
    }
}

impl fmt::Display for Canvas {
    /// Finalize the grid: right-trim every row and drop trailing blank rows
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rows: Vec<String> = self
            .grid
            .iter()
            .map(|row| {
                let s: String = row.iter().filter(|&&c| c != CONTINUATION).collect();
                s.trim_end().to_string()
            })
            .collect();

        while rows.last().is_some_and(|row| row.is_empty()) {
            rows.pop();
        }

        write!(f, "{}", rows.join("\n"))
    }
}
