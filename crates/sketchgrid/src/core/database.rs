//! Core database trait for diagram data storage
//!
//! Each diagram type keeps its parsed model in its own database, with its
//! own node and edge record types.

use anyhow::Result;

/// Core trait for diagram databases
///
/// A database is the hand-off point between a parser and the layout and
/// rendering passes. It is filled once per render and read-only afterwards.
///
/// # Example
/// ```
/// use sketchgrid::core::Database;
/// use sketchgrid::plugins::flowchart::{FlowchartDatabase, GraphEdge, GraphNode};
///
/// let mut db = FlowchartDatabase::new();
/// db.add_node(GraphNode::new("A")).unwrap();
/// db.add_edge(GraphEdge::new("A", "B")).unwrap();
/// assert_eq!(db.node_count(), 2);
/// ```
pub trait Database: Send + Sync {
    /// The node record type for this database
    type Node: Clone + Send + Sync;

    /// The edge record type for this database
    type Edge: Clone + Send + Sync;

    /// Add a node to the database
    fn add_node(&mut self, node: Self::Node) -> Result<()>;

    /// Add an edge to the database
    fn add_edge(&mut self, edge: Self::Edge) -> Result<()>;

    /// Get a node by ID
    fn get_node(&self, id: &str) -> Option<&Self::Node>;

    /// Iterate over all nodes in insertion order
    fn nodes(&self) -> impl Iterator<Item = &Self::Node>;

    /// Iterate over all edges in insertion order
    fn edges(&self) -> impl Iterator<Item = &Self::Edge>;

    /// Clear all data from the database
    fn clear(&mut self);

    /// Get the number of nodes
    fn node_count(&self) -> usize;

    /// Get the number of edges
    fn edge_count(&self) -> usize;

    /// Returns true when nothing was parsed into the database
    fn is_empty(&self) -> bool {
        self.node_count() == 0
    }
}
