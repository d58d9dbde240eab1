//! Flowchart layout implementation
//!
//! Assigns every node a layer by a breadth-first Kahn walk, sizes boxes from
//! their labels and maps layers to columns (LR/RL) or rows (TD/TB/BT).

use anyhow::Result;
use std::collections::VecDeque;
use tracing::{debug, info, span, trace, Level};

use super::FlowchartDatabase;
use crate::core::{cell_width, Database, Direction, LayoutAlgorithm};

/// Position data for a laid out node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedNode {
    pub id: String,
    /// Topological rank
    pub layer: usize,
    /// Index within the layer
    pub position: usize,
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl PositionedNode {
    /// Column of the box's vertical center line
    pub fn center_x(&self) -> usize {
        self.x + self.width / 2
    }

    /// Row of the box's horizontal center line
    pub fn center_y(&self) -> usize {
        self.y + self.height / 2
    }

    /// Rightmost column of the border
    pub fn right(&self) -> usize {
        self.x + self.width - 1
    }

    /// Bottom row of the border
    pub fn bottom(&self) -> usize {
        self.y + self.height - 1
    }

    /// Returns true if the cell lies on or inside the box
    pub fn contains(&self, x: isize, y: isize) -> bool {
        x >= self.x as isize
            && x <= self.right() as isize
            && y >= self.y as isize
            && y <= self.bottom() as isize
    }
}

/// Layout output, index-aligned with the database's node arena
#[derive(Debug, Clone)]
pub struct FlowchartLayoutResult {
    pub nodes: Vec<PositionedNode>,
    pub direction: Direction,
    pub width: usize,
    pub height: usize,
}

impl FlowchartLayoutResult {
    /// Find a positioned node by id
    pub fn node(&self, id: &str) -> Option<&PositionedNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Number of distinct layers
    pub fn layer_count(&self) -> usize {
        self.nodes.iter().map(|n| n.layer + 1).max().unwrap_or(0)
    }
}

/// Layout configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Blank cells between a label and the side borders
    pub box_padding: usize,
    /// Gap between columns (LR/RL) or between boxes in a row (TD/BT)
    pub spacing_x: usize,
    /// Gap between stacked boxes (LR/RL) or between rows (TD/BT)
    pub spacing_y: usize,
    /// Column width used for a layer with no nodes
    pub min_layer_width: usize,
    /// Row height used for a layer with no nodes
    pub min_layer_height: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            box_padding: 1,
            spacing_x: 6,
            spacing_y: 2,
            min_layer_width: 5,
            min_layer_height: 3,
        }
    }
}

/// Flowchart layout algorithm implementation
pub struct FlowchartLayoutAlgorithm {
    config: LayoutConfig,
}

impl FlowchartLayoutAlgorithm {
    pub fn new() -> Self {
        Self {
            config: LayoutConfig::default(),
        }
    }

    pub fn with_config(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Box dimensions for a label
    pub fn node_size(&self, label: &str) -> (usize, usize) {
        let pad = self.config.box_padding;
        (cell_width(label) + 2 + pad * 2, 3 + pad * 2)
    }

    /// Assign a layer to every node, returning `(layer per node, members per layer)`
    ///
    /// Members are listed in visit order; nodes the walk never reaches are
    /// appended to layer 0 in insertion order.
    pub fn assign_layers(&self, database: &FlowchartDatabase) -> (Vec<usize>, Vec<Vec<usize>>) {
        let node_count = database.node_count();
        let mut successors: Vec<Vec<usize>> = vec![Vec::new(); node_count];
        let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); node_count];
        let mut pending: Vec<isize> = vec![0; node_count];

        for (from, to) in database.edge_indices() {
            successors[from].push(to);
            predecessors[to].push(from);
            pending[to] += 1;
        }

        let mut queue: VecDeque<usize> = (0..node_count).filter(|&i| pending[i] == 0).collect();
        if queue.is_empty() && node_count > 0 {
            debug!("No source nodes, seeding walk with the first node");
            queue.push_back(0);
        }

        let mut layer_of: Vec<Option<usize>> = vec![None; node_count];
        let mut members: Vec<Vec<usize>> = Vec::new();

        while let Some(idx) = queue.pop_front() {
            if layer_of[idx].is_some() {
                continue;
            }

            let layer = predecessors[idx]
                .iter()
                .filter(|&&p| p != idx)
                .filter_map(|&p| layer_of[p])
                .max()
                .map_or(0, |max| max + 1);
            layer_of[idx] = Some(layer);
            if members.len() <= layer {
                members.resize(layer + 1, Vec::new());
            }
            members[layer].push(idx);
            trace!(node = idx, layer, "Assigned layer");

            for &next in &successors[idx] {
                pending[next] -= 1;
                if pending[next] <= 0 {
                    queue.push_back(next);
                }
            }
        }

        let layers = layer_of
            .iter()
            .enumerate()
            .map(|(idx, layer)| match layer {
                Some(layer) => *layer,
                None => {
                    debug!(node = idx, "Unreached node forced to layer 0");
                    if members.is_empty() {
                        members.push(Vec::new());
                    }
                    members[0].push(idx);
                    0
                }
            })
            .collect();

        (layers, members)
    }
}

impl Default for FlowchartLayoutAlgorithm {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutAlgorithm<FlowchartDatabase> for FlowchartLayoutAlgorithm {
    type Output = FlowchartLayoutResult;

    fn layout(&self, database: &FlowchartDatabase) -> Result<Self::Output> {
        let layout_span = span!(
            Level::INFO,
            "layout_flowchart",
            node_count = database.node_count(),
            edge_count = database.edge_count(),
            direction = %database.direction()
        );
        let _enter = layout_span.enter();

        let direction = database.direction();
        let mut nodes: Vec<PositionedNode> = database
            .nodes()
            .map(|node| {
                let (width, height) = self.node_size(&node.label);
                PositionedNode {
                    id: node.id.clone(),
                    layer: 0,
                    position: 0,
                    x: 0,
                    y: 0,
                    width,
                    height,
                }
            })
            .collect();

        if nodes.is_empty() {
            debug!("Empty database, returning empty layout");
            return Ok(FlowchartLayoutResult {
                nodes,
                direction,
                width: 0,
                height: 0,
            });
        }

        let (_, members) = self.assign_layers(database);
        for (layer, layer_members) in members.iter().enumerate() {
            for (position, &idx) in layer_members.iter().enumerate() {
                nodes[idx].layer = layer;
                nodes[idx].position = position;
            }
        }

        let (width, height) = if direction.is_horizontal() {
            self.place_columns(&mut nodes, &members, direction.is_reversed())
        } else {
            self.place_rows(&mut nodes, &members)
        };

        info!(
            layer_count = members.len(),
            width, height, "Flowchart layout completed"
        );

        Ok(FlowchartLayoutResult {
            nodes,
            direction,
            width,
            height,
        })
    }

    fn name(&self) -> &'static str {
        "layered"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }
}

impl FlowchartLayoutAlgorithm {
    /// LR/RL: layers become columns, members stack downward
    fn place_columns(
        &self,
        nodes: &mut [PositionedNode],
        members: &[Vec<usize>],
        reversed: bool,
    ) -> (usize, usize) {
        let spacing_x = self.config.spacing_x;
        let order: Vec<usize> = if reversed {
            (0..members.len()).rev().collect()
        } else {
            (0..members.len()).collect()
        };

        let mut cx = 0;
        for layer in order {
            let layer_members = &members[layer];
            let column_width = layer_members
                .iter()
                .map(|&idx| nodes[idx].width)
                .max()
                .unwrap_or(self.config.min_layer_width);
            for &idx in layer_members {
                nodes[idx].x = cx + (column_width - nodes[idx].width) / 2;
            }
            cx += column_width + spacing_x;
        }

        for layer_members in members {
            let mut cy = 0;
            for &idx in layer_members {
                nodes[idx].y = cy;
                cy += nodes[idx].height + self.config.spacing_y;
            }
        }

        let width = (cx + 2).saturating_sub(spacing_x);
        let height = nodes.iter().map(|n| n.y + n.height).max().unwrap_or(0) + 1;
        (width, height)
    }

    /// TD/TB/BT: layers become rows, members run left to right
    fn place_rows(&self, nodes: &mut [PositionedNode], members: &[Vec<usize>]) -> (usize, usize) {
        let mut cy = 0;
        for layer_members in members {
            let row_height = layer_members
                .iter()
                .map(|&idx| nodes[idx].height)
                .max()
                .unwrap_or(self.config.min_layer_height);
            let mut cx = 0;
            for &idx in layer_members {
                nodes[idx].y = cy;
                nodes[idx].x = cx;
                cx += nodes[idx].width + self.config.spacing_x;
            }
            // One extra row so vertical connectors have room for an arrowhead.
            cy += row_height + self.config.spacing_y + 1;
        }

        let width = nodes.iter().map(|n| n.x + n.width).max().unwrap_or(0) + 2;
        (width, cy)
    }
}
