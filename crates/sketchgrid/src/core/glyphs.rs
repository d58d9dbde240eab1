//! Glyph tables for diagram rendering
//!
//! Two parallel symbol tables, Unicode box-drawing and a plain-ASCII
//! fallback, supplying every border, connector and arrowhead character the
//! renderers place. A table is selected once per render call and passed
//! down explicitly.

use super::{CharacterSet, NodeShape};

/// Corner characters for one box outline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxCorners {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
}

/// Complete glyph table used by the renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphSet {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
    /// T-junction opening to the right (exit through a right border)
    pub junction_right: char,
    /// T-junction opening to the left (exit through a left border)
    pub junction_left: char,
    /// T-junction opening downward (exit through a bottom border)
    pub junction_down: char,
    /// T-junction opening upward (exit through a top border)
    pub junction_up: char,
    pub arrow_right: char,
    pub arrow_left: char,
    pub arrow_down: char,
    pub arrow_up: char,
    pub dotted_horizontal: char,
    pub dotted_vertical: char,
    rounded: BoxCorners,
    diamond_corner: char,
}

impl GlyphSet {
    /// Select the table for a character set
    pub fn for_charset(charset: CharacterSet) -> Self {
        match charset {
            CharacterSet::Ascii => Self::ascii(),
            CharacterSet::Unicode => Self::unicode(),
        }
    }

    /// Unicode box-drawing table
    pub fn unicode() -> Self {
        Self {
            top_left: '┌',
            top_right: '┐',
            bottom_left: '└',
            bottom_right: '┘',
            horizontal: '─',
            vertical: '│',
            junction_right: '├',
            junction_left: '┤',
            junction_down: '┬',
            junction_up: '┴',
            arrow_right: '►',
            arrow_left: '◄',
            arrow_down: '▼',
            arrow_up: '▲',
            dotted_horizontal: '┈',
            dotted_vertical: '┊',
            rounded: BoxCorners {
                top_left: '╭',
                top_right: '╮',
                bottom_left: '╰',
                bottom_right: '╯',
            },
            diamond_corner: '◆',
        }
    }

    /// ASCII-only table
    pub fn ascii() -> Self {
        Self {
            top_left: '+',
            top_right: '+',
            bottom_left: '+',
            bottom_right: '+',
            horizontal: '-',
            vertical: '|',
            junction_right: '+',
            junction_left: '+',
            junction_down: '+',
            junction_up: '+',
            arrow_right: '>',
            arrow_left: '<',
            arrow_down: 'v',
            arrow_up: '^',
            dotted_horizontal: '.',
            dotted_vertical: ':',
            rounded: BoxCorners {
                top_left: '+',
                top_right: '+',
                bottom_left: '+',
                bottom_right: '+',
            },
            diamond_corner: '+',
        }
    }

    /// Square corners used for plain boxes
    pub fn square(&self) -> BoxCorners {
        BoxCorners {
            top_left: self.top_left,
            top_right: self.top_right,
            bottom_left: self.bottom_left,
            bottom_right: self.bottom_right,
        }
    }

    /// Corners for a node of the given shape
    pub fn corners(&self, shape: NodeShape) -> BoxCorners {
        match shape {
            NodeShape::Rect => self.square(),
            NodeShape::Round | NodeShape::Stadium => self.rounded,
            NodeShape::Diamond => BoxCorners {
                top_left: self.diamond_corner,
                top_right: self.diamond_corner,
                bottom_left: self.diamond_corner,
                bottom_right: self.diamond_corner,
            },
        }
    }

    /// Horizontal stroke for a line style
    pub fn horizontal_for(&self, dotted: bool) -> char {
        if dotted {
            self.dotted_horizontal
        } else {
            self.horizontal
        }
    }

    /// Vertical stroke for a line style
    pub fn vertical_for(&self, dotted: bool) -> char {
        if dotted {
            self.dotted_vertical
        } else {
            self.vertical
        }
    }
}

impl Default for GlyphSet {
    fn default() -> Self {
        Self::unicode()
    }
}
