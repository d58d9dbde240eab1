//! Flowchart detector implementation
//!
//! A flowchart is decided by a `graph`/`flowchart` header that names a
//! direction. A bare `graph` line decides nothing.

use tracing::trace;

use super::syntax;
use crate::core::{Detector, DiagramKind};

/// Flowchart detector implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct FlowchartDetector;

impl FlowchartDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Detector for FlowchartDetector {
    fn kind(&self) -> DiagramKind {
        DiagramKind::Flowchart
    }

    fn is_header(&self, line: &str) -> bool {
        let first = line.split(';').next().unwrap_or_default();
        let directed = matches!(syntax::parse_header(first), Some(Some(_)));
        if directed {
            trace!(line, "Found directed flowchart header");
        }
        directed
    }
}
