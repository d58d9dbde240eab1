//! Dispatcher for the two diagram pipelines
//!
//! Classifies input text before any parser runs, then drives
//! parse → layout → render for the matching diagram kind:
//! Dispatcher → {FlowchartParser → FlowchartRenderer} or
//! {SequenceParser → SequenceRenderer}

use anyhow::Result;
use tracing::{debug, info, span, trace, Level};

use super::flowchart::{FlowchartDatabase, FlowchartDetector, FlowchartParser, FlowchartRenderer};
use super::sequence::{SequenceDatabase, SequenceDetector, SequenceParser, SequenceRenderer};
use crate::core::{
    first_header, Database, Detector, DiagramError, DiagramKind, Parser, RenderConfig, Renderer,
};

/// Classify input as a flowchart or a sequence diagram
///
/// Lines are scanned top to bottom: the first `sequenceDiagram` line or
/// directed `graph`/`flowchart` header decides. Anything else is a
/// flowchart.
pub fn classify(input: &str) -> DiagramKind {
    let detectors: [&dyn Detector; 2] = [&SequenceDetector, &FlowchartDetector];
    first_header(&detectors, input).unwrap_or(DiagramKind::Flowchart)
}

/// Runs the full pipeline for whichever diagram kind the input holds
pub struct Dispatcher {
    flowchart_parser: FlowchartParser,
    flowchart_renderer: FlowchartRenderer,
    sequence_parser: SequenceParser,
    sequence_renderer: SequenceRenderer,
}

impl Dispatcher {
    /// Create a dispatcher using the Unicode glyph set
    pub fn new() -> Self {
        Self::with_config(RenderConfig::default())
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self {
            flowchart_parser: FlowchartParser::new(),
            flowchart_renderer: FlowchartRenderer::with_config(config),
            sequence_parser: SequenceParser::new(),
            sequence_renderer: SequenceRenderer::with_config(config),
        }
    }

    /// Detect the diagram kind of the input
    pub fn detect(&self, input: &str) -> DiagramKind {
        let kind = classify(input);
        trace!(%kind, "Classified input");
        kind
    }

    /// Render input of either kind to a string
    pub fn render(&self, input: &str) -> Result<String> {
        let dispatch_span = span!(Level::INFO, "dispatch", input_len = input.len());
        let _enter = dispatch_span.enter();

        DiagramError::ensure_not_empty(input)?;

        let kind = self.detect(input);
        info!(%kind, "Dispatching diagram");
        match kind {
            DiagramKind::Flowchart => self.render_flowchart(input),
            DiagramKind::Sequence => self.render_sequence(input),
        }
    }

    /// Run the flowchart pipeline directly, skipping detection
    pub fn render_flowchart(&self, input: &str) -> Result<String> {
        let mut database = FlowchartDatabase::new();
        self.flowchart_parser.parse(input, &mut database)?;
        debug!(
            node_count = database.node_count(),
            edge_count = database.edge_count(),
            "Parsing completed"
        );
        self.flowchart_renderer.render(&database)
    }

    /// Run the sequence pipeline directly, skipping detection
    pub fn render_sequence(&self, input: &str) -> Result<String> {
        let mut database = SequenceDatabase::new();
        self.sequence_parser.parse(input, &mut database)?;
        debug!(
            participant_count = database.node_count(),
            message_count = database.edge_count(),
            "Parsing completed"
        );
        self.sequence_renderer.render(&database)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}
