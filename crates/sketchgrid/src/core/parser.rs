//! Core parser trait for diagram markup

use anyhow::Result;

use super::Database;

/// Core trait for diagram parsers
///
/// Parsers are best-effort: lines they cannot interpret are skipped, so
/// `parse` only fails on input with nothing to parse at all.
///
/// # Example
/// ```
/// use sketchgrid::core::{Database, Parser};
/// use sketchgrid::plugins::flowchart::{FlowchartDatabase, FlowchartParser};
///
/// let parser = FlowchartParser::new();
/// let mut db = FlowchartDatabase::new();
/// parser.parse("A --> B", &mut db).unwrap();
/// assert_eq!(db.edge_count(), 1);
/// ```
pub trait Parser<D: Database>: Send + Sync {
    /// Parse diagram markup into the provided database
    fn parse(&self, input: &str, database: &mut D) -> Result<()>;

    /// Get the name of this parser
    fn name(&self) -> &'static str;

    /// Get the version of this parser
    fn version(&self) -> &'static str;
}
