//! Core type definitions for diagram processing
//!
//! This module contains the fundamental types used throughout sketchgrid:
//! node shapes, line styles, flow direction, glyph set selection and the
//! diagram kinds the dispatcher can route to.

use std::fmt;
use std::str::FromStr;

/// Character set for rendering output
///
/// Selects which glyph table is used for borders, connectors and arrowheads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum CharacterSet {
    /// Plain ASCII only: `+ - | > < v ^ .`
    Ascii,
    /// Unicode box-drawing characters: `┌ ┐ └ ┘ ─ │ ├ ►`
    #[default]
    Unicode,
}

impl CharacterSet {
    /// Map the caller's "ASCII only" flag to a character set
    pub fn from_ascii_flag(use_ascii: bool) -> Self {
        if use_ascii {
            CharacterSet::Ascii
        } else {
            CharacterSet::Unicode
        }
    }

    /// Returns true if this character set uses only ASCII
    pub fn is_ascii(&self) -> bool {
        matches!(self, CharacterSet::Ascii)
    }
}

impl fmt::Display for CharacterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharacterSet::Ascii => write!(f, "ascii"),
            CharacterSet::Unicode => write!(f, "unicode"),
        }
    }
}

/// Node shapes accepted by the flowchart syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum NodeShape {
    /// Rectangle: `A[label]`
    #[default]
    Rect,
    /// Rounded rectangle: `A(label)`
    Round,
    /// Decision: `A{label}`
    Diamond,
    /// Stadium: `A([label])`
    Stadium,
}

impl fmt::Display for NodeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeShape::Rect => write!(f, "rect"),
            NodeShape::Round => write!(f, "round"),
            NodeShape::Diamond => write!(f, "diamond"),
            NodeShape::Stadium => write!(f, "stadium"),
        }
    }
}

/// Stroke style shared by flowchart edges and sequence messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum LineStyle {
    #[default]
    Solid,
    Dotted,
}

impl LineStyle {
    pub fn is_dotted(&self) -> bool {
        matches!(self, LineStyle::Dotted)
    }
}

impl fmt::Display for LineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineStyle::Solid => write!(f, "solid"),
            LineStyle::Dotted => write!(f, "dotted"),
        }
    }
}

/// Flow direction for the diagram layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Direction {
    /// Left to right (LR)
    #[default]
    LeftRight,
    /// Right to left (RL)
    RightLeft,
    /// Top to bottom (TD or TB)
    TopDown,
    /// Bottom to top (BT), laid out like TD
    BottomUp,
}

impl Direction {
    /// Returns true if layers map to columns (LR or RL)
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::LeftRight | Direction::RightLeft)
    }

    /// Returns true if the column order is reversed (RL)
    pub fn is_reversed(&self) -> bool {
        matches!(self, Direction::RightLeft)
    }
}

impl FromStr for Direction {
    type Err = String;

    /// Parse a direction keyword (LR, RL, TD, TB, BT), case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "LR" => Ok(Direction::LeftRight),
            "RL" => Ok(Direction::RightLeft),
            "TD" | "TB" => Ok(Direction::TopDown),
            "BT" => Ok(Direction::BottomUp),
            _ => Err(format!("Unknown direction: {}", s)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::LeftRight => write!(f, "LR"),
            Direction::RightLeft => write!(f, "RL"),
            Direction::TopDown => write!(f, "TD"),
            Direction::BottomUp => write!(f, "BT"),
        }
    }
}

/// The two diagram families the engine understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum DiagramKind {
    /// Node/edge flow diagrams (`graph` / `flowchart`)
    #[default]
    Flowchart,
    /// Actor/message timelines (`sequenceDiagram`)
    Sequence,
}

impl fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagramKind::Flowchart => write!(f, "flowchart"),
            DiagramKind::Sequence => write!(f, "sequence"),
        }
    }
}

/// Rendering options threaded through the renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderConfig {
    pub charset: CharacterSet,
}

impl RenderConfig {
    pub fn new(charset: CharacterSet) -> Self {
        Self { charset }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_parsing() {
        assert_eq!("LR".parse::<Direction>(), Ok(Direction::LeftRight));
        assert_eq!("rl".parse::<Direction>(), Ok(Direction::RightLeft));
        assert_eq!("TD".parse::<Direction>(), Ok(Direction::TopDown));
        assert_eq!("tb".parse::<Direction>(), Ok(Direction::TopDown));
        assert_eq!("BT".parse::<Direction>(), Ok(Direction::BottomUp));
        assert!("XY".parse::<Direction>().is_err());
    }

    #[test]
    fn test_direction_default_is_left_right() {
        assert_eq!(Direction::default(), Direction::LeftRight);
    }

    #[test]
    fn test_direction_properties() {
        assert!(Direction::LeftRight.is_horizontal());
        assert!(Direction::RightLeft.is_horizontal());
        assert!(!Direction::TopDown.is_horizontal());
        assert!(!Direction::BottomUp.is_horizontal());
        assert!(Direction::RightLeft.is_reversed());
        assert!(!Direction::BottomUp.is_reversed());
    }

    #[test]
    fn test_character_set_from_flag() {
        assert_eq!(CharacterSet::from_ascii_flag(true), CharacterSet::Ascii);
        assert_eq!(CharacterSet::from_ascii_flag(false), CharacterSet::Unicode);
        assert!(CharacterSet::Ascii.is_ascii());
        assert_eq!(CharacterSet::default(), CharacterSet::Unicode);
    }

    #[test]
    fn test_display_impls() {
        assert_eq!(NodeShape::Stadium.to_string(), "stadium");
        assert_eq!(LineStyle::Dotted.to_string(), "dotted");
        assert_eq!(Direction::TopDown.to_string(), "TD");
        assert_eq!(DiagramKind::Sequence.to_string(), "sequence");
        assert_eq!(CharacterSet::Ascii.to_string(), "ascii");
    }
}
