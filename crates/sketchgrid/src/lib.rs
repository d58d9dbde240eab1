//! Sketchgrid - render flowchart and sequence diagram markup as character art
//!
//! Text goes in, a grid of box-drawing (or plain ASCII) characters comes
//! out. Two diagram kinds are understood: layered flowcharts introduced by
//! `graph`/`flowchart`, and sequence diagrams introduced by
//! `sequenceDiagram`.
//!
//! # Quick Start
//!
//! ```rust
//! let art = sketchgrid::render("graph LR\nA-->B-->C", false).unwrap();
//! assert!(art.contains('►'));
//!
//! let plain = sketchgrid::render("sequenceDiagram\nA->>B: Hi", true).unwrap();
//! assert!(plain.is_ascii());
//! ```
//!
//! # Advanced Usage
//!
//! ```rust
//! use sketchgrid::prelude::*;
//!
//! let mut database = FlowchartDatabase::new();
//! FlowchartParser::new()
//!     .parse("graph TD; A[Start] --> B{Decision}", &mut database)
//!     .unwrap();
//! assert_eq!(database.node_count(), 2);
//! assert_eq!(database.direction(), Direction::TopDown);
//!
//! let layout = FlowchartLayoutAlgorithm::new().layout(&database).unwrap();
//! assert_eq!(layout.layer_count(), 2);
//!
//! let art = FlowchartRenderer::new().render(&database).unwrap();
//! assert!(art.contains("Decision"));
//! ```

pub mod core;
pub mod plugins;

pub use crate::core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        CharacterSet, Database, Detector, DiagramError, DiagramKind, Direction, LayoutAlgorithm,
        LineStyle, NodeShape, Parser, RenderConfig, Renderer,
    };
    pub use crate::plugins::dispatcher::Dispatcher;
    pub use crate::plugins::flowchart::{
        FlowchartDatabase, FlowchartDetector, FlowchartLayoutAlgorithm, FlowchartParser,
        FlowchartRenderer,
    };
    pub use crate::plugins::sequence::{
        SequenceDatabase, SequenceDetector, SequenceLayoutAlgorithm, SequenceParser,
        SequenceRenderer,
    };
}

/// Render diagram markup, choosing the pipeline from the text itself
///
/// `use_ascii` selects the plain ASCII glyph set instead of Unicode
/// box-drawing characters.
///
/// # Errors
/// Returns [`DiagramError::EmptyInput`] for empty or whitespace-only input.
/// Malformed lines are skipped rather than reported.
///
/// # Example
/// ```rust
/// let art = sketchgrid::render("graph LR; A[Start]-->B[End]", false).unwrap();
/// assert!(art.contains("Start"));
/// assert!(art.contains("End"));
/// ```
pub fn render(input: &str, use_ascii: bool) -> anyhow::Result<String> {
    render_with_style(input, CharacterSet::from_ascii_flag(use_ascii))
}

/// Render diagram markup with a specific character set
///
/// # Example
/// ```rust
/// use sketchgrid::{render_with_style, CharacterSet};
///
/// let ascii = render_with_style("graph LR; A-->B", CharacterSet::Ascii).unwrap();
/// assert!(ascii.contains("+----->"));
/// ```
pub fn render_with_style(input: &str, style: CharacterSet) -> anyhow::Result<String> {
    plugins::dispatcher::Dispatcher::with_config(RenderConfig::new(style)).render(input)
}

/// Parse flowchart markup into a database without rendering
///
/// # Example
/// ```rust
/// use sketchgrid::{parse_flowchart, Direction};
/// use sketchgrid::prelude::Database;
///
/// let db = parse_flowchart("graph TD; A-->B-->C").unwrap();
/// assert_eq!(db.node_count(), 3);
/// assert_eq!(db.edge_count(), 2);
/// assert_eq!(db.direction(), Direction::TopDown);
/// ```
pub fn parse_flowchart(input: &str) -> anyhow::Result<plugins::flowchart::FlowchartDatabase> {
    use crate::core::Parser as _;
    use crate::plugins::flowchart::{FlowchartDatabase, FlowchartParser};

    let mut database = FlowchartDatabase::new();
    FlowchartParser::new().parse(input, &mut database)?;
    Ok(database)
}

/// Parse sequence diagram markup into a database without rendering
pub fn parse_sequence(input: &str) -> anyhow::Result<plugins::sequence::SequenceDatabase> {
    use crate::core::Parser as _;
    use crate::plugins::sequence::{SequenceDatabase, SequenceParser};

    let mut database = SequenceDatabase::new();
    SequenceParser::new().parse(input, &mut database)?;
    Ok(database)
}

/// Classify markup as a flowchart or a sequence diagram
///
/// ```rust
/// use sketchgrid::{detect, DiagramKind};
///
/// assert_eq!(detect("sequenceDiagram\nA->>B: Hi"), DiagramKind::Sequence);
/// assert_eq!(detect("A --> B"), DiagramKind::Flowchart);
/// ```
pub fn detect(input: &str) -> DiagramKind {
    plugins::dispatcher::classify(input)
}
