//! Sequence diagram layout
//!
//! Places one column per participant. The gap after each column starts at
//! the base spacing and grows until every message crossing it has room for
//! its text; message rows are spaced evenly below the headers.

use anyhow::Result;
use tracing::{debug, info, span, trace, Level};

use super::SequenceDatabase;
use crate::core::{cell_width, LayoutAlgorithm};

/// Layout configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceLayoutConfig {
    /// Base gap between neighbouring header boxes
    pub column_spacing: usize,
    pub min_header_width: usize,
    /// Added to the label width to size a header box
    pub header_padding: usize,
    pub header_height: usize,
    /// Rows per message
    pub message_spacing: usize,
    /// Added to the message text width to get the span it needs
    pub message_overhead: usize,
}

impl Default for SequenceLayoutConfig {
    fn default() -> Self {
        Self {
            column_spacing: 4,
            min_header_width: 12,
            header_padding: 4,
            header_height: 3,
            message_spacing: 3,
            message_overhead: 4,
        }
    }
}

/// A participant's column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantColumn {
    pub id: String,
    /// Lifeline column
    pub center_x: usize,
    pub header_width: usize,
}

impl ParticipantColumn {
    /// Leftmost column of the header box
    pub fn left(&self) -> usize {
        self.center_x - self.header_width / 2
    }
}

/// A message's row, with endpoints as column indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageRow {
    pub from: usize,
    pub to: usize,
    pub y: usize,
}

/// Layout output
#[derive(Debug, Clone)]
pub struct SequenceLayoutResult {
    pub columns: Vec<ParticipantColumn>,
    /// Index-aligned with the database's messages
    pub rows: Vec<MessageRow>,
    /// Gap after each column, widened where messages needed room
    pub gaps: Vec<usize>,
    pub header_height: usize,
    pub width: usize,
    pub height: usize,
}

impl SequenceLayoutResult {
    pub fn column(&self, id: &str) -> Option<&ParticipantColumn> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// Rows covered by lifelines, end exclusive
    pub fn lifeline_rows(&self) -> std::ops::Range<usize> {
        self.header_height..self.height.saturating_sub(1)
    }
}

/// Sequence layout algorithm
pub struct SequenceLayoutAlgorithm {
    config: SequenceLayoutConfig,
}

impl SequenceLayoutAlgorithm {
    pub fn new() -> Self {
        Self {
            config: SequenceLayoutConfig::default(),
        }
    }

    pub fn with_config(config: SequenceLayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SequenceLayoutConfig {
        &self.config
    }

    /// Header box width for a label
    pub fn header_width(&self, label: &str) -> usize {
        (cell_width(label) + self.config.header_padding).max(self.config.min_header_width)
    }

    /// Distance between two lifelines given header widths and gaps
    fn span(widths: &[usize], gaps: &[usize], lo: usize, hi: usize) -> usize {
        (lo..hi)
            .map(|j| widths[j] / 2 + gaps[j] + widths[j + 1] / 2)
            .sum()
    }

    /// Widen gaps so every message fits between its lifelines
    fn widen_gaps(&self, database: &SequenceDatabase, widths: &[usize]) -> Vec<usize> {
        let mut gaps = vec![self.config.column_spacing; widths.len()];

        for message in database.messages() {
            let (Some(from), Some(to)) = (
                database.participant_index(&message.from),
                database.participant_index(&message.to),
            ) else {
                continue;
            };
            if from == to {
                continue;
            }

            let (lo, hi) = (from.min(to), from.max(to));
            let needed = cell_width(&message.text) + self.config.message_overhead;
            let current = Self::span(widths, &gaps, lo, hi);
            if current < needed {
                let extra = (needed - current) / (hi - lo) + 1;
                for gap in &mut gaps[lo..hi] {
                    *gap += extra;
                }
                trace!(lo, hi, needed, current, extra, "Widened gaps for message");
            }
        }

        gaps
    }

    /// Row of the `index`-th message line
    pub fn message_row(&self, index: usize) -> usize {
        self.config.header_height + 2 + index * self.config.message_spacing
    }
}

impl Default for SequenceLayoutAlgorithm {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutAlgorithm<SequenceDatabase> for SequenceLayoutAlgorithm {
    type Output = SequenceLayoutResult;

    fn layout(&self, database: &SequenceDatabase) -> Result<Self::Output> {
        let layout_span = span!(
            Level::INFO,
            "layout_sequence",
            participant_count = database.participant_count(),
            message_count = database.message_count()
        );
        let _enter = layout_span.enter();

        let header_height = self.config.header_height;
        if database.participant_count() == 0 {
            debug!("No participants, returning empty layout");
            return Ok(SequenceLayoutResult {
                columns: Vec::new(),
                rows: Vec::new(),
                gaps: Vec::new(),
                header_height,
                width: 0,
                height: 0,
            });
        }

        let widths: Vec<usize> = database
            .participants()
            .iter()
            .map(|p| self.header_width(&p.label))
            .collect();
        let gaps = self.widen_gaps(database, &widths);

        let mut columns = Vec::with_capacity(widths.len());
        let mut cx = 0;
        for (idx, participant) in database.participants().iter().enumerate() {
            if idx > 0 {
                cx += gaps[idx - 1];
            }
            columns.push(ParticipantColumn {
                id: participant.id.clone(),
                center_x: cx + widths[idx] / 2,
                header_width: widths[idx],
            });
            cx += widths[idx];
        }

        let rows: Vec<MessageRow> = database
            .messages()
            .iter()
            .enumerate()
            .map(|(idx, message)| MessageRow {
                from: database.participant_index(&message.from).unwrap_or(0),
                to: database.participant_index(&message.to).unwrap_or(0),
                y: self.message_row(idx),
            })
            .collect();

        let width = cx + 2;
        let height = header_height + 1 + rows.len() * self.config.message_spacing + 2;

        info!(width, height, "Sequence layout completed");
        Ok(SequenceLayoutResult {
            columns,
            rows,
            gaps,
            header_height,
            width,
            height,
        })
    }

    fn name(&self) -> &'static str {
        "timeline"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }
}
