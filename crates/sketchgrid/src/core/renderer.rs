//! Core renderer trait for diagram output

use anyhow::Result;

use super::Database;

/// Core trait for diagram renderers
///
/// # Example
/// ```
/// use sketchgrid::core::{Parser, Renderer};
/// use sketchgrid::plugins::flowchart::{FlowchartDatabase, FlowchartParser, FlowchartRenderer};
///
/// let mut db = FlowchartDatabase::new();
/// FlowchartParser::new().parse("graph LR\nA-->B", &mut db).unwrap();
/// let output = FlowchartRenderer::new().render(&db).unwrap();
/// assert!(output.contains('►'));
/// ```
pub trait Renderer<D: Database>: Send + Sync {
    /// The output type of this renderer
    type Output;

    /// Render the diagram database into the output format
    fn render(&self, database: &D) -> Result<Self::Output>;

    /// Get the name of this renderer
    fn name(&self) -> &'static str;

    /// Get the version of this renderer
    fn version(&self) -> &'static str;

    /// Get the supported output format
    fn format(&self) -> &'static str;
}
