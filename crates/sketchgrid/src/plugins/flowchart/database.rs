//! Flowchart database implementation
//!
//! Nodes live in an insertion-ordered arena with a companion id index;
//! edges refer to nodes by id and are kept in declaration order.

use anyhow::Result;
use std::collections::HashMap;
use tracing::trace;

use crate::core::{Database, Direction, LineStyle, NodeShape};

/// A node of the flow graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub id: String,
    /// Display label, defaults to the identifier
    pub label: String,
    pub shape: NodeShape,
}

impl GraphNode {
    /// Create a rect node labelled with its own identifier
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            shape: NodeShape::default(),
        }
    }

    /// Create a node with an explicit label and shape
    pub fn with_label(id: impl Into<String>, label: impl Into<String>, shape: NodeShape) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            shape,
        }
    }
}

/// A directed or undirected connection between two nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    pub label: Option<String>,
    pub style: LineStyle,
    /// False for plain lines without an arrowhead (`---`)
    pub arrow: bool,
}

impl GraphEdge {
    /// Create a solid, directed, unlabelled edge
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: None,
            style: LineStyle::Solid,
            arrow: true,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_style(mut self, style: LineStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_arrow(mut self, arrow: bool) -> Self {
        self.arrow = arrow;
        self
    }

    /// Returns true if the edge starts and ends at the same node
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// Flowchart database implementation
///
/// Maintains insertion order for deterministic layout.
#[derive(Debug, Default, Clone)]
pub struct FlowchartDatabase {
    /// Flow direction for the diagram
    direction: Direction,
    /// Node arena in first-seen order
    nodes: Vec<GraphNode>,
    /// Node id to arena index
    index: HashMap<String, usize>,
    /// Edges in declaration order
    edges: Vec<GraphEdge>,
}

impl FlowchartDatabase {
    /// Create a new empty database
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flow direction
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Get the flow direction
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Arena index of a node
    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Register a node reference
    ///
    /// A new id is created with the given label and shape (or its own id as
    /// label). An existing node takes the new label and shape only when a
    /// label is supplied; a bare reference leaves it unchanged.
    pub fn declare_node(&mut self, id: &str, declaration: Option<(&str, NodeShape)>) {
        match (self.index.get(id).copied(), declaration) {
            (Some(idx), Some((label, shape))) => {
                let node = &mut self.nodes[idx];
                node.label = label.to_string();
                node.shape = shape;
                trace!(id, label, %shape, "Updated node");
            }
            (Some(_), None) => {}
            (None, declaration) => {
                let node = match declaration {
                    Some((label, shape)) => GraphNode::with_label(id, label, shape),
                    None => GraphNode::new(id),
                };
                trace!(id, label = %node.label, shape = %node.shape, "Created node");
                self.index.insert(id.to_string(), self.nodes.len());
                self.nodes.push(node);
            }
        }
    }

    /// Edges as arena index pairs, skipping any whose endpoints are missing
    pub fn edge_indices(&self) -> Vec<(usize, usize)> {
        self.edges
            .iter()
            .filter_map(|e| Some((self.node_index(&e.from)?, self.node_index(&e.to)?)))
            .collect()
    }

    /// Longest edge label in display cells
    pub fn max_edge_label_width(&self) -> usize {
        self.edges
            .iter()
            .filter_map(|e| e.label.as_deref())
            .map(crate::core::cell_width)
            .max()
            .unwrap_or(0)
    }
}

impl Database for FlowchartDatabase {
    type Node = GraphNode;
    type Edge = GraphEdge;

    fn add_node(&mut self, node: GraphNode) -> Result<()> {
        self.declare_node(&node.id, Some((&node.label, node.shape)));
        Ok(())
    }

    fn add_edge(&mut self, edge: GraphEdge) -> Result<()> {
        // Endpoints always exist before layout runs.
        self.declare_node(&edge.from, None);
        self.declare_node(&edge.to, None);
        trace!(
            from = %edge.from,
            to = %edge.to,
            style = %edge.style,
            arrow = edge.arrow,
            "Added edge"
        );
        self.edges.push(edge);
        Ok(())
    }

    fn get_node(&self, id: &str) -> Option<&GraphNode> {
        self.node_index(id).map(|idx| &self.nodes[idx])
    }

    fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter()
    }

    fn edges(&self) -> impl Iterator<Item = &GraphEdge> {
        self.edges.iter()
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.index.clear();
        self.edges.clear();
        self.direction = Direction::default();
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_operations() {
        let mut db = FlowchartDatabase::new();
        assert!(db.is_empty());

        db.add_node(GraphNode::with_label("A", "Start", NodeShape::Round))
            .unwrap();
        db.add_node(GraphNode::new("B")).unwrap();
        db.add_edge(GraphEdge::new("A", "B")).unwrap();

        assert_eq!(db.node_count(), 2);
        assert_eq!(db.edge_count(), 1);
        assert_eq!(db.get_node("A").unwrap().label, "Start");
        assert_eq!(db.get_node("A").unwrap().shape, NodeShape::Round);
        assert_eq!(db.get_node("B").unwrap().label, "B");
        assert!(db.get_node("C").is_none());

        db.clear();
        assert_eq!(db.node_count(), 0);
        assert_eq!(db.edge_count(), 0);
        assert!(db.get_node("A").is_none());
    }

    #[test]
    fn test_edges_auto_create_endpoints() {
        let mut db = FlowchartDatabase::new();
        db.add_edge(GraphEdge::new("X", "Y")).unwrap();

        let ids: Vec<_> = db.nodes().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["X", "Y"]);
        assert_eq!(db.edge_indices(), vec![(0, 1)]);
    }

    #[test]
    fn test_redeclaration_semantics() {
        let mut db = FlowchartDatabase::new();
        db.declare_node("A", None);
        assert_eq!(db.get_node("A").unwrap().label, "A");

        db.declare_node("A", Some(("Decide", NodeShape::Diamond)));
        assert_eq!(db.get_node("A").unwrap().label, "Decide");
        assert_eq!(db.get_node("A").unwrap().shape, NodeShape::Diamond);

        db.declare_node("A", None);
        assert_eq!(db.get_node("A").unwrap().label, "Decide");
        assert_eq!(db.node_count(), 1);
    }

    #[test]
    fn test_parallel_edges_are_kept() {
        let mut db = FlowchartDatabase::new();
        db.add_edge(GraphEdge::new("A", "B")).unwrap();
        db.add_edge(GraphEdge::new("A", "B").with_style(LineStyle::Dotted))
            .unwrap();
        assert_eq!(db.edge_count(), 2);
        assert_eq!(db.node_count(), 2);
    }

    #[test]
    fn test_edge_builders() {
        let edge = GraphEdge::new("A", "A")
            .with_label("again")
            .with_arrow(false);
        assert!(edge.is_self_loop());
        assert!(!edge.arrow);
        assert_eq!(edge.label.as_deref(), Some("again"));
    }

    #[test]
    fn test_max_edge_label_width() {
        let mut db = FlowchartDatabase::new();
        assert_eq!(db.max_edge_label_width(), 0);
        db.add_edge(GraphEdge::new("A", "B").with_label("yes")).unwrap();
        db.add_edge(GraphEdge::new("A", "C").with_label("no way")).unwrap();
        assert_eq!(db.max_edge_label_width(), 6);
    }
}
