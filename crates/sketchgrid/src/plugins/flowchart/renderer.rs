//! Box and connector rendering for flowcharts
//!
//! Boxes are painted first, then connectors. Each connector's route is
//! picked from the geometry of its two boxes: a straight run when they face
//! each other, an elbow when they do not. Elbows are drawn before straight
//! runs so the junction glyphs of straight runs survive. A connector never
//! paints over a box other than the two it joins.

use anyhow::Result;
use tracing::{debug, info, span, trace, Level};

use super::{
    FlowchartDatabase, FlowchartLayoutAlgorithm, FlowchartLayoutResult, GraphEdge, LayoutConfig,
    PositionedNode,
};
use crate::core::{
    cell_width, char_cells, BoxCorners, Canvas, CharacterSet, Database, GlyphSet,
    LayoutAlgorithm, RenderConfig, Renderer,
};

/// Geometric route of one connector, in canvas cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    /// Run along one row between two facing side borders
    Horizontal { y: isize, from_x: isize, to_x: isize },
    /// Run along one column between two facing top/bottom borders
    Vertical { x: isize, from_y: isize, to_y: isize },
    /// Leave through the top or bottom border, turn once, enter through a side
    Elbow {
        exit_x: isize,
        exit_y: isize,
        enter_x: isize,
        enter_y: isize,
    },
    /// Leave vertically, cross over on a middle row, enter vertically
    Stepped {
        from_x: isize,
        from_y: isize,
        to_x: isize,
        to_y: isize,
        mid_y: isize,
    },
}

impl Route {
    /// Choose a route between two boxes; `None` for a box connected to itself
    fn between(src: &PositionedNode, dst: &PositionedNode, horizontal_flow: bool) -> Option<Self> {
        if src.id == dst.id {
            return None;
        }
        let s = Rect::from(src);
        let d = Rect::from(dst);

        let same_column = s.x <= d.right && d.x <= s.right;
        let same_row = s.y <= d.bottom && d.y <= s.bottom;

        let route = if horizontal_flow {
            if same_column {
                s.vertical_to(&d)
            } else if s.mid_y == d.mid_y {
                s.horizontal_to(&d)
            } else {
                let exit_y = if d.mid_y > s.mid_y { s.bottom } else { s.y };
                let enter_x = if d.x > s.mid_x { d.x } else { d.right };
                Route::Elbow {
                    exit_x: s.mid_x,
                    exit_y,
                    enter_x,
                    enter_y: d.mid_y,
                }
            }
        } else if same_row {
            s.horizontal_to(&d)
        } else if s.mid_x == d.mid_x {
            s.vertical_to(&d)
        } else {
            let (from_y, to_y) = if d.y > s.y { (s.bottom, d.y) } else { (s.y, d.bottom) };
            Route::Stepped {
                from_x: s.mid_x,
                from_y,
                to_x: d.mid_x,
                to_y,
                mid_y: from_y + (to_y - from_y).div_euclid(2),
            }
        };
        Some(route)
    }

    /// Turning routes sort before straight ones
    fn draw_order(&self) -> u8 {
        match self {
            Route::Elbow { .. } | Route::Stepped { .. } => 0,
            Route::Horizontal { .. } | Route::Vertical { .. } => 1,
        }
    }
}

/// Signed box extents used while routing
struct Rect {
    x: isize,
    y: isize,
    right: isize,
    bottom: isize,
    mid_x: isize,
    mid_y: isize,
}

impl From<&PositionedNode> for Rect {
    fn from(node: &PositionedNode) -> Self {
        Self {
            x: node.x as isize,
            y: node.y as isize,
            right: node.right() as isize,
            bottom: node.bottom() as isize,
            mid_x: node.center_x() as isize,
            mid_y: node.center_y() as isize,
        }
    }
}

impl Rect {
    fn horizontal_to(&self, other: &Rect) -> Route {
        let (from_x, to_x) = if other.x > self.x {
            (self.right, other.x)
        } else {
            (self.x, other.right)
        };
        Route::Horizontal {
            y: self.mid_y,
            from_x,
            to_x,
        }
    }

    fn vertical_to(&self, other: &Rect) -> Route {
        let (from_y, to_y) = if other.y > self.y {
            (self.bottom, other.y)
        } else {
            (self.y, other.bottom)
        };
        Route::Vertical {
            x: self.mid_x,
            from_y,
            to_y,
        }
    }
}

/// Flowchart renderer
pub struct FlowchartRenderer {
    config: RenderConfig,
    layout_config: LayoutConfig,
}

impl FlowchartRenderer {
    /// Create a new renderer with the default Unicode glyphs
    pub fn new() -> Self {
        Self {
            config: RenderConfig::default(),
            layout_config: LayoutConfig::default(),
        }
    }

    /// Create a renderer for a specific character set
    pub fn with_style(style: CharacterSet) -> Self {
        Self::with_config(RenderConfig::new(style))
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self {
            config,
            layout_config: LayoutConfig::default(),
        }
    }

    /// Override the layout constants used before painting
    pub fn with_layout_config(mut self, layout_config: LayoutConfig) -> Self {
        self.layout_config = layout_config;
        self
    }

    pub fn style(&self) -> CharacterSet {
        self.config.charset
    }

    /// Paint an already laid out diagram onto a fresh canvas
    pub fn draw(&self, database: &FlowchartDatabase, layout: &FlowchartLayoutResult) -> Canvas {
        let glyphs = GlyphSet::for_charset(self.config.charset);
        let mut canvas = Canvas::new(
            layout.width + database.max_edge_label_width(),
            layout.height,
        );

        for (node, placed) in database.nodes().zip(&layout.nodes) {
            draw_node(&mut canvas, &glyphs, placed, glyphs.corners(node.shape), &node.label);
        }

        let horizontal_flow = layout.direction.is_horizontal();
        let mut routed: Vec<(Route, &GraphEdge)> = Vec::new();
        for edge in database.edges() {
            let endpoints = database
                .node_index(&edge.from)
                .zip(database.node_index(&edge.to))
                .and_then(|(from, to)| Some((layout.nodes.get(from)?, layout.nodes.get(to)?)));
            let Some((src, dst)) = endpoints else {
                debug!(from = %edge.from, to = %edge.to, "Skipped edge with missing endpoint");
                continue;
            };
            match Route::between(src, dst, horizontal_flow) {
                Some(route) => routed.push((route, edge)),
                None => trace!(node = %edge.from, "Self edge not drawn"),
            }
        }

        // Stable: declaration order is kept within each group.
        routed.sort_by_key(|(route, _)| route.draw_order());

        for (route, edge) in &routed {
            trace!(from = %edge.from, to = %edge.to, ?route, "Drawing edge");
            let obstacles: Vec<&PositionedNode> = layout
                .nodes
                .iter()
                .filter(|n| n.id != edge.from && n.id != edge.to)
                .collect();
            let mut pen = Pen {
                canvas: &mut canvas,
                obstacles: &obstacles,
            };
            draw_route(&mut pen, &glyphs, *route, edge);
            if let Some(label) = &edge.label {
                let (x, y) = label_anchor(*route, label);
                draw_label(&mut canvas, &layout.nodes, x, y, label);
            }
        }

        canvas
    }
}

impl Default for FlowchartRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer<FlowchartDatabase> for FlowchartRenderer {
    type Output = String;

    fn render(&self, database: &FlowchartDatabase) -> Result<Self::Output> {
        let render_span = span!(
            Level::INFO,
            "render_flowchart",
            node_count = database.node_count(),
            edge_count = database.edge_count(),
            charset = %self.config.charset
        );
        let _enter = render_span.enter();

        if database.is_empty() {
            debug!("Empty database, nothing to render");
            return Ok(String::new());
        }

        let layout = FlowchartLayoutAlgorithm::with_config(self.layout_config.clone())
            .layout(database)?;
        let output = self.draw(database, &layout).to_string();

        info!(output_len = output.len(), "Flowchart rendered");
        Ok(output)
    }

    fn name(&self) -> &'static str {
        "box-drawing"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn format(&self) -> &'static str {
        match self.config.charset {
            CharacterSet::Ascii => "ascii",
            CharacterSet::Unicode => "unicode",
        }
    }
}

fn draw_node(
    canvas: &mut Canvas,
    glyphs: &GlyphSet,
    node: &PositionedNode,
    corners: BoxCorners,
    label: &str,
) {
    let (x, y) = (node.x as isize, node.y as isize);
    let (w, h) = (node.width as isize, node.height as isize);
    canvas.draw_box(x, y, w, h, corners, glyphs);

    let text_width = cell_width(label) as isize;
    canvas.draw_text(x + 1 + (w - 2 - text_width) / 2, y + h / 2, label);
}

/// Stroke writer for one connector
///
/// Cells on or inside a box the connector does not join are left alone.
struct Pen<'a> {
    canvas: &'a mut Canvas,
    obstacles: &'a [&'a PositionedNode],
}

impl Pen<'_> {
    fn put(&mut self, x: isize, y: isize, c: char) {
        if !self.obstacles.iter().any(|n| n.contains(x, y)) {
            self.canvas.set_char(x, y, c);
        }
    }
}

fn draw_route(pen: &mut Pen<'_>, glyphs: &GlyphSet, route: Route, edge: &GraphEdge) {
    let dotted = edge.style.is_dotted();
    let h_line = glyphs.horizontal_for(dotted);
    let v_line = glyphs.vertical_for(dotted);

    match route {
        Route::Horizontal { y, from_x, to_x } => {
            let step = (to_x - from_x).signum();
            let exit = if step > 0 { glyphs.junction_right } else { glyphs.junction_left };
            pen.put(from_x, y, exit);
            fill_between(from_x, to_x, |x| pen.put(x, y, h_line));
            if edge.arrow && (to_x - from_x).abs() > 1 {
                let head = if step > 0 { glyphs.arrow_right } else { glyphs.arrow_left };
                pen.put(to_x - step, y, head);
            }
        }
        Route::Vertical { x, from_y, to_y } => {
            let step = (to_y - from_y).signum();
            let exit = if step > 0 { glyphs.junction_down } else { glyphs.junction_up };
            pen.put(x, from_y, exit);
            fill_between(from_y, to_y, |y| pen.put(x, y, v_line));
            if edge.arrow && (to_y - from_y).abs() > 1 {
                let head = if step > 0 { glyphs.arrow_down } else { glyphs.arrow_up };
                pen.put(x, to_y - step, head);
            }
        }
        Route::Elbow {
            exit_x,
            exit_y,
            enter_x,
            enter_y,
        } => {
            let down = enter_y > exit_y;
            let right = enter_x > exit_x;
            pen.put(
                exit_x,
                exit_y,
                if down { glyphs.junction_down } else { glyphs.junction_up },
            );
            fill_between(exit_y, enter_y, |y| pen.put(exit_x, y, v_line));
            let corner = match (down, right) {
                (true, true) => glyphs.bottom_left,
                (true, false) => glyphs.bottom_right,
                (false, true) => glyphs.top_left,
                (false, false) => glyphs.top_right,
            };
            pen.put(exit_x, enter_y, corner);
            fill_between(exit_x, enter_x, |x| pen.put(x, enter_y, h_line));
            if edge.arrow && (enter_x - exit_x).abs() > 1 {
                let (x, head) = if right {
                    (enter_x - 1, glyphs.arrow_right)
                } else {
                    (enter_x + 1, glyphs.arrow_left)
                };
                pen.put(x, enter_y, head);
            }
        }
        Route::Stepped {
            from_x,
            from_y,
            to_x,
            to_y,
            mid_y,
        } => {
            let down = to_y > from_y;
            let right = to_x > from_x;
            pen.put(
                from_x,
                from_y,
                if down { glyphs.junction_down } else { glyphs.junction_up },
            );
            fill_between(from_y, mid_y, |y| pen.put(from_x, y, v_line));
            fill_between(from_x, to_x, |x| pen.put(x, mid_y, h_line));
            let (first_turn, second_turn) = match (down, right) {
                (true, true) => (glyphs.bottom_left, glyphs.top_right),
                (true, false) => (glyphs.bottom_right, glyphs.top_left),
                (false, true) => (glyphs.top_left, glyphs.bottom_right),
                (false, false) => (glyphs.top_right, glyphs.bottom_left),
            };
            pen.put(from_x, mid_y, first_turn);
            pen.put(to_x, mid_y, second_turn);
            fill_between(mid_y, to_y, |y| pen.put(to_x, y, v_line));
            if edge.arrow && (to_y - mid_y).abs() > 1 {
                let (y, head) = if down {
                    (to_y - 1, glyphs.arrow_down)
                } else {
                    (to_y + 1, glyphs.arrow_up)
                };
                pen.put(to_x, y, head);
            }
        }
    }
}

/// Call `put` for every cell strictly between `a` and `b`
fn fill_between(a: isize, b: isize, mut put: impl FnMut(isize)) {
    for i in a.min(b) + 1..a.max(b) {
        put(i);
    }
}

/// Top-left cell of an edge label for a route
fn label_anchor(route: Route, label: &str) -> (isize, isize) {
    let width = cell_width(label) as isize;
    match route {
        Route::Horizontal { y, from_x, to_x } => {
            (((from_x + to_x).div_euclid(2) - width / 2).max(0), y - 1)
        }
        Route::Vertical { x, from_y, to_y } => (x + 2, (from_y + to_y).div_euclid(2)),
        Route::Elbow {
            exit_x,
            enter_x,
            enter_y,
            ..
        } => (exit_x.min(enter_x) + 1, enter_y - 1),
        Route::Stepped {
            from_x,
            from_y,
            to_x,
            to_y,
            ..
        } => (from_x.max(to_x) + 2, (from_y + to_y).div_euclid(2)),
    }
}

/// Write a label cell by cell, leaving any cell covered by a box untouched
fn draw_label(canvas: &mut Canvas, nodes: &[PositionedNode], x: isize, y: isize, label: &str) {
    let mut cursor = x;
    for c in label.chars() {
        if !nodes.iter().any(|n| n.contains(cursor, y)) {
            canvas.set_char(cursor, y, c);
        }
        cursor += char_cells(c) as isize;
    }
}
