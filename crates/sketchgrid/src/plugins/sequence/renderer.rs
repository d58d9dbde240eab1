//! Sequence diagram renderer
//!
//! Header boxes across the top, a lifeline under each, then one horizontal
//! arrow per message with its text centered on the row above.

use anyhow::Result;
use tracing::{debug, info, span, trace, Level};

use super::{SequenceDatabase, SequenceLayoutAlgorithm, SequenceLayoutConfig, SequenceLayoutResult};
use crate::core::{
    cell_width, Canvas, CharacterSet, Database, GlyphSet, LayoutAlgorithm, RenderConfig, Renderer,
};

/// Sequence diagram renderer
pub struct SequenceRenderer {
    config: RenderConfig,
    layout_config: SequenceLayoutConfig,
}

impl SequenceRenderer {
    pub fn new() -> Self {
        Self::with_config(RenderConfig::default())
    }

    pub fn with_style(style: CharacterSet) -> Self {
        Self::with_config(RenderConfig::new(style))
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self {
            config,
            layout_config: SequenceLayoutConfig::default(),
        }
    }

    pub fn with_layout_config(mut self, layout_config: SequenceLayoutConfig) -> Self {
        self.layout_config = layout_config;
        self
    }

    pub fn style(&self) -> CharacterSet {
        self.config.charset
    }

    /// Paint an already laid out diagram onto a fresh canvas
    pub fn draw(&self, database: &SequenceDatabase, layout: &SequenceLayoutResult) -> Canvas {
        let glyphs = GlyphSet::for_charset(self.config.charset);
        let mut canvas = Canvas::new(layout.width, layout.height);
        let header_height = layout.header_height as isize;

        for (participant, column) in database.participants().iter().zip(&layout.columns) {
            let center = column.center_x as isize;
            canvas.draw_box(
                column.left() as isize,
                0,
                column.header_width as isize,
                header_height,
                glyphs.square(),
                &glyphs,
            );
            let text_width = cell_width(&participant.label) as isize;
            canvas.draw_text(center - text_width / 2, header_height / 2, &participant.label);
        }

        for column in &layout.columns {
            for y in layout.lifeline_rows() {
                canvas.set_char(column.center_x as isize, y as isize, glyphs.vertical);
            }
        }

        for (message, row) in database.messages().iter().zip(&layout.rows) {
            let (Some(src), Some(dst)) = (layout.columns.get(row.from), layout.columns.get(row.to))
            else {
                continue;
            };
            let (sx, dx) = (src.center_x as isize, dst.center_x as isize);
            if sx == dx {
                trace!(participant = %message.from, "Self message not drawn");
                continue;
            }

            let y = row.y as isize;
            let stroke = glyphs.horizontal_for(message.style.is_dotted());
            canvas.draw_horizontal_line(sx.min(dx) + 1, sx.max(dx) - 1, y, stroke);
            let head = if dx > sx { glyphs.arrow_right } else { glyphs.arrow_left };
            canvas.set_char(dx, y, head);

            let text_width = cell_width(&message.text) as isize;
            let label_x = sx.min(dx) + ((dx - sx).abs() - text_width).div_euclid(2);
            canvas.draw_text(label_x.max(0), y - 1, &message.text);
        }

        canvas
    }
}

impl Default for SequenceRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer<SequenceDatabase> for SequenceRenderer {
    type Output = String;

    fn render(&self, database: &SequenceDatabase) -> Result<Self::Output> {
        let render_span = span!(
            Level::INFO,
            "render_sequence",
            participant_count = database.participant_count(),
            message_count = database.message_count(),
            charset = %self.config.charset
        );
        let _enter = render_span.enter();

        if database.is_empty() {
            debug!("No participants, nothing to render");
            return Ok(String::new());
        }

        let layout = SequenceLayoutAlgorithm::with_config(self.layout_config.clone())
            .layout(database)?;
        let output = self.draw(database, &layout).to_string();

        info!(output_len = output.len(), "Sequence diagram rendered");
        Ok(output)
    }

    fn name(&self) -> &'static str {
        "lifeline"
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Parser;
    use crate::plugins::sequence::SequenceParser;

    fn render(input: &str, style: CharacterSet) -> String {
        let mut db = SequenceDatabase::new();
        SequenceParser::new().parse(input, &mut db).unwrap();
        SequenceRenderer::with_style(style).render(&db).unwrap()
    }

    #[test]
    fn test_renderer_properties() {
        let renderer = SequenceRenderer::new();
        assert_eq!(renderer.name(), "lifeline");
        assert_eq!(renderer.version(), "0.1.0");
        assert_eq!(renderer.format(), "unicode");
        assert_eq!(renderer.style(), CharacterSet::Unicode);
    }

    #[test]
    fn test_empty_database() {
        assert_eq!(SequenceRenderer::new().render(&SequenceDatabase::new()).unwrap(), "");
    }

    #[test]
    fn test_single_message() {
        let output = render(
            "sequenceDiagram\nparticipant A\nparticipant B\nA->>B: Hi",
            CharacterSet::Unicode,
        );
        let expected = [
            "┌──────────┐    ┌──────────┐",
            "│     A    │    │     B    │",
            "└──────────┘    └──────────┘",
            "      │               │",
            "      │      Hi       │",
            "      │───────────────►",
            "      │               │",
            "      │               │",
        ]
        .join("\n");
        assert_eq!(output, expected);
    }

    #[test]
    fn test_reverse_dotted_message() {
        let output = render("sequenceDiagram\nA->>B: go\nB-->>A: back", CharacterSet::Ascii);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[5], "      |--------------->");
        assert_eq!(lines[8], "      <...............|");
        assert_eq!(lines[7], "      |     back      |");
    }

    #[test]
    fn test_self_message_draws_no_arrow() {
        let output = render("sequenceDiagram\nA->>A: loop", CharacterSet::Unicode);
        assert!(!output.contains('►'));
        assert!(!output.contains('◄'));
        assert!(!output.contains("loop"));
        assert!(output.contains("│     A    │"));
        assert_eq!(output.lines().count(), 8);
    }

    #[test]
    fn test_alias_label_in_header() {
        let output = render(
            "sequenceDiagram\nparticipant C as Client\nparticipant S as Server\nC->>S: GET /",
            CharacterSet::Unicode,
        );
        assert!(output.contains("Client"));
        assert!(output.contains("Server"));
        assert!(output.contains("GET /"));
        assert!(output.contains('►'));
    }
}
